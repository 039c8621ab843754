// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use fixedbitset::FixedBitSet;
use grantflow_model::{Donation, Project};
use grantflow_search::num::MoneyNumeric;

/// The static relay topology over projects.
///
/// Nodes are project positions in the caller's slice; a directed edge
/// P → Q exists iff some donation is eligible for both P and Q. Eligibility
/// is fixed at donation creation, so the graph is built once per solve; how
/// much money can actually cross an edge at a given moment depends on
/// current holdings and is evaluated live by the witness search.
///
/// Adjacency is stored as one bitset row per project, indexed by project
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityGraph {
    adjacency: Vec<FixedBitSet>,
}

impl EligibilityGraph {
    /// Builds the eligibility graph for the given donations and projects.
    pub fn build<T>(donations: &[Donation<T>], projects: &[Project<T>]) -> Self
    where
        T: MoneyNumeric,
    {
        let num_projects = projects.len();
        let mut adjacency = vec![FixedBitSet::with_capacity(num_projects); num_projects];

        let mut eligible: Vec<usize> = Vec::with_capacity(num_projects);
        for donation in donations {
            eligible.clear();
            eligible.extend(
                projects
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| donation.can_be_used_for(p))
                    .map(|(position, _)| position),
            );
            for &a in &eligible {
                for &b in &eligible {
                    if a != b {
                        adjacency[a].insert(b);
                    }
                }
            }
        }

        Self { adjacency }
    }

    /// Returns the number of projects (nodes) in the graph.
    #[inline]
    pub fn num_projects(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if some donation is eligible for both projects.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not in `0..num_projects()`.
    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        debug_assert!(
            from < self.num_projects(),
            "called `EligibilityGraph::has_edge` with project position out of bounds: the len is {} but the position is {}",
            self.num_projects(),
            from
        );

        self.adjacency[from].contains(to)
    }

    /// Returns the positions of the projects reachable from `from` in one
    /// relay step.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not in `0..num_projects()`.
    #[inline]
    pub fn neighbors(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        debug_assert!(
            from < self.num_projects(),
            "called `EligibilityGraph::neighbors` with project position out of bounds: the len is {} but the position is {}",
            self.num_projects(),
            from
        );

        self.adjacency[from].ones()
    }
}

impl std::fmt::Display for EligibilityGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let num_edges: usize = self.adjacency.iter().map(|row| row.count_ones(..)).sum();
        write!(
            f,
            "EligibilityGraph(projects: {}, edges: {})",
            self.num_projects(),
            num_edges
        )
    }
}
