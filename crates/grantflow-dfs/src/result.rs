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

use crate::stats::DfsStatistics;
use grantflow_search::result::{SolveResult, TerminationReason};

/// Result of the backtracking solver after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsOutcome {
    result: SolveResult,
    termination_reason: TerminationReason,
    statistics: DfsStatistics,
}

impl DfsOutcome {
    #[inline]
    pub fn funded(statistics: DfsStatistics) -> Self {
        Self {
            result: SolveResult::Funded,
            termination_reason: TerminationReason::FeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: DfsStatistics) -> Self {
        Self {
            result: SolveResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(reason: R, statistics: DfsStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolveResult::Unknown,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solve result.
    #[inline]
    pub fn result(&self) -> &SolveResult {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &DfsStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for DfsOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DfsOutcome(result: {}, reason: {})",
            self.result, self.termination_reason
        )
    }
}
