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

/// Statistics collected during a run of the backtracking solver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DfsStatistics {
    /// Total search nodes expanded.
    pub nodes_explored: u64,
    /// Total units undone after a dead end.
    pub backtracks: u64,
    /// Total single-unit allocations applied (including later-undone ones).
    pub units_allocated: u64,
    /// Donations passed over because they were spent or their eligible
    /// projects were already satisfied.
    pub skips: u64,
    /// The deepest decision level reached.
    pub max_depth: u64,
}

impl DfsStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_unit_allocated(&mut self) {
        self.units_allocated = self.units_allocated.saturating_add(1);
    }

    #[inline]
    pub fn on_skip(&mut self) {
        self.skips = self.skips.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }
}

impl std::fmt::Display for DfsStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grantflow-DFS Solver Statistics:")?;
        writeln!(f, "  Nodes explored:    {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:        {}", self.backtracks)?;
        writeln!(f, "  Units allocated:   {}", self.units_allocated)?;
        writeln!(f, "  Donations skipped: {}", self.skips)?;
        writeln!(f, "  Max depth reached: {}", self.max_depth)?;
        Ok(())
    }
}
