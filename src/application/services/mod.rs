//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the FileSystem boundary trait but are themselves
//! concrete structs, not traits.

mod calc;
mod reach;

pub use calc::{CalcOutput, CalcService};
pub use reach::ReachService;
