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

/// The decision a solver reached about the allocation problem.
///
/// Infeasibility is an ordinary outcome, not an error: a `false` answer to
/// "can these donations fully fund these projects" is as meaningful as a
/// `true` one. `Unknown` is reserved for aborted searches (step budget),
/// which prove nothing in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// Every project is funded exactly to its target; the allocation is left
    /// in place on the donation and project records.
    Funded,
    /// No complete allocation exists; all records were restored to their
    /// pre-solve state.
    Infeasible,
    /// The search was stopped before it could prove either; all records were
    /// restored to their pre-solve state.
    Unknown,
}

impl SolveResult {
    /// Returns `true` if the solve produced a complete allocation.
    #[inline]
    pub fn is_funded(&self) -> bool {
        matches!(self, SolveResult::Funded)
    }

    /// Returns `true` if the solve proved that no complete allocation exists.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveResult::Infeasible)
    }
}

impl std::fmt::Display for SolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveResult::Funded => write!(f, "Funded"),
            SolveResult::Infeasible => write!(f, "Infeasible"),
            SolveResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why a solver stopped searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found a complete allocation.
    FeasibilityProven,
    /// The solver exhausted the search space without finding one.
    InfeasibilityProven,
    /// The solver aborted due to a search limit. The string carries the
    /// limit that fired.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::FeasibilityProven => write!(f, "Feasibility Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}
