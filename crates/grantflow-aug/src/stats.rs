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

/// Statistics collected during a run of the path-augmenting solver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AugStatistics {
    /// Witness searches run (one per loop round, plus the final empty one).
    pub witness_searches: u64,
    /// Path prefixes examined across all witness searches.
    pub paths_examined: u64,
    /// Witnesses applied.
    pub augmentations: u64,
    /// Relay chunks moved between projects.
    pub transfers_applied: u64,
    /// Total currency units pushed into end projects.
    pub units_pushed: u64,
}

impl AugStatistics {
    #[inline]
    pub fn on_witness_search(&mut self) {
        self.witness_searches = self.witness_searches.saturating_add(1);
    }

    #[inline]
    pub fn on_path_examined(&mut self) {
        self.paths_examined = self.paths_examined.saturating_add(1);
    }

    #[inline]
    pub fn on_augmentation(&mut self, units: u64) {
        self.augmentations = self.augmentations.saturating_add(1);
        self.units_pushed = self.units_pushed.saturating_add(units);
    }

    #[inline]
    pub fn on_transfer_applied(&mut self) {
        self.transfers_applied = self.transfers_applied.saturating_add(1);
    }
}

impl std::fmt::Display for AugStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grantflow-AUG Solver Statistics:")?;
        writeln!(f, "  Witness searches:  {}", self.witness_searches)?;
        writeln!(f, "  Paths examined:    {}", self.paths_examined)?;
        writeln!(f, "  Augmentations:     {}", self.augmentations)?;
        writeln!(f, "  Transfers applied: {}", self.transfers_applied)?;
        writeln!(f, "  Units pushed:      {}", self.units_pushed)?;
        Ok(())
    }
}
