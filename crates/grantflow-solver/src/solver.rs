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

use grantflow_aug::{AugStatistics, PathAugmentingSolver};
use grantflow_dfs::{BacktrackingSolver, DfsStatistics};
use grantflow_model::{validate_inputs, Donation, PreconditionError, Project};
use grantflow_search::{
    monitor::{CompositeMonitor, StepLimitMonitor, TraceMonitor},
    num::MoneyNumeric,
    result::{SolveResult, TerminationReason},
};

/// Which engine answers the allocation question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Exhaustive unit-by-unit backtracking. The reference engine; its cost
    /// grows exponentially with the total funding amount, so it suits small
    /// integer amounts.
    #[default]
    Backtracking,
    /// Ford-Fulkerson-style augmentation over the project eligibility graph.
    /// Polynomial rounds for typical instances; the witness search itself is
    /// exponential only in dense relay topologies.
    PathAugmenting,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Backtracking => write!(f, "Backtracking"),
            Strategy::PathAugmenting => write!(f, "PathAugmenting"),
        }
    }
}

/// Per-engine statistics carried by a [`SolveReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatistics {
    Backtracking(DfsStatistics),
    PathAugmenting(AugStatistics),
}

impl std::fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatistics::Backtracking(stats) => stats.fmt(f),
            SolveStatistics::PathAugmenting(stats) => stats.fmt(f),
        }
    }
}

/// The outcome of a solve: result, termination reason and statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    result: SolveResult,
    termination_reason: TerminationReason,
    statistics: SolveStatistics,
}

impl SolveReport {
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

    /// Returns the engine statistics.
    #[inline]
    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for SolveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolveReport(result: {}, reason: {})",
            self.result, self.termination_reason
        )
    }
}

/// The configured entry point for allocation solves.
///
/// Build via [`Solver::builder`]; the solver is stateless between solves and
/// may be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solver {
    strategy: Strategy,
    step_limit: Option<u64>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Solver {
    /// Returns a builder with the default configuration: the backtracking
    /// strategy and no step limit.
    #[inline]
    pub fn builder() -> SolverBuilder {
        SolverBuilder::new()
    }

    /// Returns the configured strategy.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the configured step limit, if any.
    #[inline]
    pub fn step_limit(&self) -> Option<u64> {
        self.step_limit
    }

    /// Decides whether the donations can fully fund the projects.
    ///
    /// On a `Funded` result the complete allocation is left on the records;
    /// on `Infeasible` or `Unknown` the records are restored to their exact
    /// pre-call state. Precondition violations (duplicate identities,
    /// partially spent donations, pre-allocated projects) are reported as an
    /// error without touching the records.
    pub fn solve<T>(
        &self,
        donations: &mut [Donation<T>],
        projects: &mut [Project<T>],
    ) -> Result<SolveReport, PreconditionError>
    where
        T: MoneyNumeric,
    {
        validate_inputs(donations, projects)?;

        let span = tracing::debug_span!(
            "solve",
            strategy = %self.strategy,
            num_donations = donations.len(),
            num_projects = projects.len(),
        );
        let _guard = span.enter();

        let mut monitor = CompositeMonitor::new();
        monitor.add_monitor(TraceMonitor::new());
        if let Some(limit) = self.step_limit {
            monitor.add_monitor(StepLimitMonitor::new(limit));
        }

        let report = match self.strategy {
            Strategy::Backtracking => {
                let mut engine = BacktrackingSolver::preallocated(donations.len());
                let outcome = engine.solve(donations, projects, &mut monitor);
                SolveReport {
                    result: outcome.result().clone(),
                    termination_reason: outcome.termination_reason().clone(),
                    statistics: SolveStatistics::Backtracking(outcome.statistics().clone()),
                }
            }
            Strategy::PathAugmenting => {
                let mut engine = PathAugmentingSolver::new();
                let outcome = engine.solve(donations, projects, &mut monitor);
                SolveReport {
                    result: outcome.result().clone(),
                    termination_reason: outcome.termination_reason().clone(),
                    statistics: SolveStatistics::PathAugmenting(outcome.statistics().clone()),
                }
            }
        };

        tracing::debug!(result = %report.result, "solve finished");
        Ok(report)
    }
}

/// Builder for [`Solver`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverBuilder {
    strategy: Strategy,
    step_limit: Option<u64>,
}

impl SolverBuilder {
    /// Creates a builder with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self {
            strategy: Strategy::default(),
            step_limit: None,
        }
    }

    /// Selects the solving strategy.
    #[inline]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the number of search steps; a capped search ends in an
    /// `Unknown` result rather than hanging on pathological instances.
    #[inline]
    pub fn step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = Some(step_limit);
        self
    }

    /// Builds the configured solver.
    #[inline]
    pub fn build(self) -> Solver {
        Solver {
            strategy: self.strategy,
            step_limit: self.step_limit,
        }
    }
}

/// Decides whether the donations can fully fund the projects, using the
/// exhaustive backtracking engine.
///
/// Returns `true` and leaves the complete allocation on the records, or
/// returns `false` and leaves every record exactly as it was.
///
/// # Panics
///
/// Panics if the inputs violate the solver preconditions: donations must be
/// distinct and fully unspent, projects distinct and unallocated.
pub fn can_allocate<T>(donations: &mut [Donation<T>], projects: &mut [Project<T>]) -> bool
where
    T: MoneyNumeric,
{
    let report = Solver::builder()
        .build()
        .solve(donations, projects)
        .unwrap_or_else(|error| {
            panic!("called `can_allocate` with invalid inputs: {}", error)
        });
    report.result().is_funded()
}
