//! Directed road graph and bounded-hop reachability.

use std::collections::{BTreeSet, VecDeque};

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Directed graph stored as an adjacency matrix over zero-based city indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<bool>>,
}

impl Graph {
    /// Parses a city count followed by that many rows of 0/1 entries.
    ///
    /// Any non-zero entry counts as a road. The entry count is checked
    /// against the city count before the matrix is allocated.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let numbers = input
            .split_whitespace()
            .map(|word| {
                word.parse::<i64>().map_err(|_| DomainError::MalformedGraph {
                    message: format!("not an integer: '{}'", word),
                })
            })
            .collect::<DomainResult<Vec<i64>>>()?;

        let (count, entries) =
            numbers
                .split_first()
                .ok_or_else(|| DomainError::MalformedGraph {
                    message: "missing city count".to_string(),
                })?;
        let n = usize::try_from(*count).map_err(|_| DomainError::MalformedGraph {
            message: format!("invalid city count: {}", count),
        })?;

        match n.checked_mul(n) {
            Some(expected) if expected == entries.len() => {}
            Some(expected) => {
                return Err(DomainError::MalformedGraph {
                    message: format!(
                        "{} cities need {} matrix entries, found {}",
                        n,
                        expected,
                        entries.len()
                    ),
                });
            }
            None => {
                return Err(DomainError::MalformedGraph {
                    message: format!("invalid city count: {}", count),
                });
            }
        }

        let adjacency = if n == 0 {
            Vec::new()
        } else {
            entries
                .chunks(n)
                .map(|row| row.iter().map(|&value| value != 0).collect())
                .collect()
        };
        Ok(Self { adjacency })
    }

    pub fn city_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn has_road(&self, from: usize, to: usize) -> bool {
        self.adjacency
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(false)
    }

    /// Cities reachable from `start` using at most `max_hops` roads.
    ///
    /// The start city itself is always included.
    #[instrument(level = "debug", skip(self))]
    pub fn reachable_within(
        &self,
        start: usize,
        max_hops: usize,
    ) -> DomainResult<BTreeSet<usize>> {
        self.check_city(start)?;
        let mut reached = BTreeSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((city, hops)) = queue.pop_front() {
            if hops >= max_hops {
                continue;
            }
            for neighbor in 0..self.city_count() {
                if self.has_road(city, neighbor) && reached.insert(neighbor) {
                    trace!("reached {} in {} hops", neighbor, hops + 1);
                    queue.push_back((neighbor, hops + 1));
                }
            }
        }
        Ok(reached)
    }

    /// Cities reachable from both `first` and `second` within `max_hops`, ascending.
    pub fn common_reachable(
        &self,
        first: usize,
        second: usize,
        max_hops: usize,
    ) -> DomainResult<Vec<usize>> {
        let a = self.reachable_within(first, max_hops)?;
        let b = self.reachable_within(second, max_hops)?;
        Ok(a.intersection(&b).copied().collect())
    }

    fn check_city(&self, city: usize) -> DomainResult<()> {
        if city < self.city_count() {
            Ok(())
        } else {
            Err(DomainError::CityOutOfRange {
                city: city + 1,
                count: self.city_count(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 -> 2 -> 3 -> 4, 5 -> 3
    const CHAIN: &str = "5
        0 1 0 0 0
        0 0 1 0 0
        0 0 0 1 0
        0 0 0 0 0
        0 0 1 0 0";

    #[test]
    fn given_chain_when_reachable_within_then_respects_hop_limit() {
        let graph = Graph::parse(CHAIN).unwrap();
        assert_eq!(graph.reachable_within(0, 0).unwrap(), BTreeSet::from([0]));
        assert_eq!(graph.reachable_within(0, 2).unwrap(), BTreeSet::from([0, 1, 2]));
        assert_eq!(graph.reachable_within(0, 9).unwrap(), BTreeSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn given_two_starts_when_common_reachable_then_intersection_is_sorted() {
        let graph = Graph::parse(CHAIN).unwrap();
        assert_eq!(graph.common_reachable(0, 4, 2).unwrap(), vec![2]);
        assert_eq!(graph.common_reachable(0, 4, 3).unwrap(), vec![2, 3]);
        assert_eq!(graph.common_reachable(3, 4, 3).unwrap(), vec![3]);
        assert!(graph.common_reachable(1, 4, 0).unwrap().is_empty());
    }

    #[test]
    fn given_cycle_when_reachable_within_then_terminates() {
        let graph = Graph::parse("2\n0 1\n1 0").unwrap();
        assert_eq!(graph.reachable_within(0, 100).unwrap(), BTreeSet::from([0, 1]));
    }

    #[test]
    fn given_city_out_of_range_when_reachable_within_then_error() {
        let graph = Graph::parse(CHAIN).unwrap();
        assert_eq!(
            graph.reachable_within(5, 1).unwrap_err(),
            DomainError::CityOutOfRange { city: 6, count: 5 }
        );
    }

    #[test]
    fn given_short_matrix_when_parse_then_malformed_graph() {
        let err = Graph::parse("2\n0 1\n1").unwrap_err();
        assert!(matches!(err, DomainError::MalformedGraph { .. }));
        assert!(err.to_string().contains("need 4 matrix entries, found 3"));
    }

    #[test]
    fn given_garbage_when_parse_then_malformed_graph() {
        assert!(matches!(Graph::parse("").unwrap_err(), DomainError::MalformedGraph { .. }));
        assert!(matches!(Graph::parse("x").unwrap_err(), DomainError::MalformedGraph { .. }));
        assert!(matches!(Graph::parse("-1").unwrap_err(), DomainError::MalformedGraph { .. }));
        assert!(matches!(Graph::parse("1 0 0").unwrap_err(), DomainError::MalformedGraph { .. }));
    }

    #[test]
    fn given_huge_city_count_without_entries_when_parse_then_malformed_graph() {
        let err = Graph::parse("100000000000").unwrap_err();
        assert!(matches!(err, DomainError::MalformedGraph { .. }));
        let err = Graph::parse(&i64::MAX.to_string()).unwrap_err();
        assert!(matches!(err, DomainError::MalformedGraph { .. }));
    }

    #[test]
    fn given_zero_cities_when_parse_then_empty_graph() {
        assert_eq!(Graph::parse("0").unwrap().city_count(), 0);
    }
}
