//! Bounded-hop reachability service
//!
//! Cities are 1-based at this boundary and 0-based inside the domain.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{DomainError, Graph};
use crate::infrastructure::traits::FileSystem;

/// Service for answering reachability queries on a road graph.
pub struct ReachService {
    fs: Arc<dyn FileSystem>,
}

impl ReachService {
    /// Create a new reach service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read the adjacency matrix stored in `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Graph> {
        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read graph", path)?;
        let graph = Graph::parse(&text)?;
        debug!("load: {} cities", graph.city_count());
        Ok(graph)
    }

    /// Cities reachable from both `first` and `second` in at most `max_hops`
    /// roads, 1-based and ascending.
    pub fn common(
        &self,
        graph: &Graph,
        first: usize,
        second: usize,
        max_hops: usize,
    ) -> ApplicationResult<Vec<usize>> {
        let a = to_index(first, graph.city_count())?;
        let b = to_index(second, graph.city_count())?;
        let common = graph.common_reachable(a, b, max_hops)?;
        Ok(common.into_iter().map(|c| c + 1).collect())
    }
}

fn to_index(city: usize, count: usize) -> Result<usize, DomainError> {
    if (1..=count).contains(&city) {
        Ok(city - 1)
    } else {
        Err(DomainError::CityOutOfRange { city, count })
    }
}
