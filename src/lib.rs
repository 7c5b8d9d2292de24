//! Prefix expression trees that collapse single-digit subtrees, plus
//! bounded-hop reachability on small road graphs.
//!
//! Layers follow the usual split: `domain` holds pure algorithms,
//! `application` wires them to input files, `infrastructure` provides the
//! filesystem boundary and `cli` the two binaries' surface.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
