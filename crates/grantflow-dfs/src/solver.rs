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

//! The exhaustive backtracking engine.
//!
//! The search walks the donation sequence in order. A donation that is spent
//! or whose eligible projects are all satisfied is passed over; otherwise the
//! engine allocates one currency unit to one of the donation's underfunded
//! projects and continues at the same donation, so a donation can supply many
//! units across successive decision levels. A dead end undoes the most recent
//! unit and tries the donation's next candidate project; when a donation's
//! candidates are exhausted, the failure propagates one level up. The search
//! succeeds the moment every project is fully funded and fails once the root
//! level runs out of candidates.

use crate::{
    result::DfsOutcome,
    stack::{CandidateList, Frame, FrameStack},
    stats::DfsStatistics,
};
use grantflow_model::{validate_inputs, Donation, DonationIndex, Project, ProjectIndex};
use grantflow_search::{
    journal::AllocationJournal,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::MoneyNumeric,
    state::LedgerState,
};

/// The exhaustive backtracking solver for the donation allocation problem.
///
/// Reusable across solves: the internal journal and frame stack keep their
/// capacity between runs.
///
/// # Contract
///
/// Preconditions: distinct donation identities, every donation fully
/// unspent, distinct project identities, every project unallocated
/// (checked by [`validate_inputs`]; violated preconditions panic in debug
/// builds and are the caller's responsibility in release builds).
///
/// Postconditions: on a `Funded` outcome every project is funded exactly to
/// its target and the allocations are left in place; on any other outcome
/// the donations and projects are restored to their exact pre-solve state.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver<T> {
    journal: AllocationJournal<T>,
    stack: FrameStack,
}

impl<T> BacktrackingSolver<T>
where
    T: MoneyNumeric,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            journal: AllocationJournal::new(),
            stack: FrameStack::new(),
        }
    }

    /// Creates a solver with preallocated storage for the given problem size.
    #[inline]
    pub fn preallocated(num_donations: usize) -> Self {
        Self {
            journal: AllocationJournal::preallocated(num_donations),
            stack: FrameStack::preallocated(num_donations),
        }
    }

    /// Runs the exhaustive search over the given donations and projects.
    pub fn solve<M>(
        &mut self,
        donations: &mut [Donation<T>],
        projects: &mut [Project<T>],
        monitor: &mut M,
    ) -> DfsOutcome
    where
        M: SearchMonitor,
    {
        debug_assert!(
            validate_inputs(donations, projects).is_ok(),
            "called `BacktrackingSolver::solve` with inputs violating the solver preconditions"
        );

        let mut state = LedgerState::new(donations, projects);
        let mut stats = DfsStatistics::default();
        self.journal.reset();
        self.stack.reset();
        monitor.on_enter_search();

        if state.all_fully_funded() {
            monitor.on_exit_search();
            return DfsOutcome::funded(stats);
        }

        // Position of the pending helper invocation to expand next.
        let mut entry = 0usize;
        loop {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                self.journal.unwind_all(&mut state);
                self.stack.reset();
                monitor.on_exit_search();
                return DfsOutcome::aborted(reason, stats);
            }
            monitor.on_step();
            stats.on_node_explored();

            // Expand the pending invocation: walk past donations the skip
            // rule applies to, then freeze this level's branch candidates.
            let mut position = entry;
            let mut failed = loop {
                if position == state.num_donations() {
                    break true;
                }
                let donation_index = DonationIndex::new(position);
                if state.donation(donation_index).spent()
                    || eligible_projects_complete(&state, donation_index)
                {
                    stats.on_skip();
                    position += 1;
                    continue;
                }
                let candidates = underfunded_candidates(&state, donation_index);
                debug_assert!(!candidates.is_empty());
                self.stack.push(Frame::new(position, candidates));
                stats.on_depth_update(self.stack.depth() as u64);
                break false;
            };

            // Pick the next branch, unwinding dead ends as they surface.
            'branching: loop {
                if failed {
                    if self.stack.is_empty() {
                        // The root invocation failed; every unit was undone.
                        debug_assert!(self.journal.is_empty());
                        monitor.on_exit_search();
                        return DfsOutcome::infeasible(stats);
                    }
                    // The invocation entered via the top frame's current
                    // choice failed: undo that unit, then try the frame's
                    // next candidate.
                    self.journal.backtrack(&mut state);
                    stats.on_backtrack();
                    failed = false;
                }

                let (donation_position, candidate) = match self.stack.last_mut() {
                    Some(frame) => (frame.donation(), frame.next_candidate()),
                    None => unreachable!("the failed branch returns before emptying the stack"),
                };

                match candidate {
                    Some(project_position) => {
                        let project_index = ProjectIndex::new(project_position);
                        if state.project(project_index).fully_funded() {
                            continue 'branching;
                        }
                        self.journal.push_frame();
                        self.journal.apply_allocate(
                            &mut state,
                            DonationIndex::new(donation_position),
                            project_index,
                            T::PLUS_ONE,
                        );
                        stats.on_unit_allocated();
                        if state.all_fully_funded() {
                            monitor.on_exit_search();
                            return DfsOutcome::funded(stats);
                        }
                        // Continue at the same donation: it may supply more
                        // units at deeper levels.
                        entry = donation_position;
                        break 'branching;
                    }
                    None => {
                        self.stack.pop();
                        failed = true;
                    }
                }
            }
        }
    }
}

/// Returns `true` if every project the donation may fund is already funded.
fn eligible_projects_complete<T>(state: &LedgerState<'_, T>, donation_index: DonationIndex) -> bool
where
    T: MoneyNumeric,
{
    let donation = state.donation(donation_index);
    state
        .projects()
        .iter()
        .filter(|p| donation.can_be_used_for(p))
        .all(Project::fully_funded)
}

/// Collects the positions of the underfunded projects the donation may fund.
fn underfunded_candidates<T>(
    state: &LedgerState<'_, T>,
    donation_index: DonationIndex,
) -> CandidateList
where
    T: MoneyNumeric,
{
    let donation = state.donation(donation_index);
    state
        .projects()
        .iter()
        .enumerate()
        .filter(|(_, p)| donation.can_be_used_for(p) && !p.fully_funded())
        .map(|(position, _)| position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantflow_model::{DonationId, ProjectId};
    use grantflow_search::monitor::{no_op::NoOperationMonitor, step_limit::StepLimitMonitor};
    use grantflow_search::result::{SolveResult, TerminationReason};

    fn donation(id: usize, total: i64, eligible: &[usize]) -> Donation<i64> {
        Donation::new(
            DonationId::new(id),
            total,
            eligible.iter().map(|&p| ProjectId::new(p)),
        )
    }

    fn project(id: usize, target: i64) -> Project<i64> {
        Project::new(ProjectId::new(id), target)
    }

    fn solve(
        donations: &mut [Donation<i64>],
        projects: &mut [Project<i64>],
    ) -> DfsOutcome {
        let mut solver = BacktrackingSolver::new();
        let mut monitor = NoOperationMonitor::new();
        solver.solve(donations, projects, &mut monitor)
    }

    #[test]
    fn test_single_donation_funds_single_project() {
        let mut donations = [donation(0, 10, &[0])];
        let mut projects = [project(0, 10)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert!(projects[0].fully_funded());
        assert_eq!(projects[0].allocations().get(&DonationId::new(0)), Some(&10));
        assert!(donations[0].spent());
    }

    #[test]
    fn test_insufficient_donation_restores_state() {
        let mut donations = [donation(0, 5, &[0])];
        let mut projects = [project(0, 10)];
        let before = (donations.clone(), projects.clone());

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_infeasible());
        assert_eq!(donations, before.0);
        assert_eq!(projects, before.1);
    }

    #[test]
    fn test_donation_splits_across_projects() {
        let mut donations = [donation(0, 10, &[0, 1])];
        let mut projects = [project(0, 4), project(1, 6)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert!(projects.iter().all(Project::fully_funded));
        assert!(donations[0].spent());
    }

    #[test]
    fn test_disjoint_eligibility_shortfall_is_infeasible() {
        let mut donations = [donation(0, 10, &[0]), donation(1, 5, &[1])];
        let mut projects = [project(0, 8), project(1, 7)];
        let before = (donations.clone(), projects.clone());

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_infeasible());
        assert_eq!(donations, before.0);
        assert_eq!(projects, before.1);
    }

    #[test]
    fn test_spent_and_satisfied_donations_are_skipped() {
        // Donation 0 covers project 0 alone; donation 1 (total 0) is spent on
        // arrival; donation 2 must then fund project 1.
        let mut donations = [
            donation(0, 3, &[0]),
            donation(1, 0, &[1]),
            donation(2, 4, &[1]),
        ];
        let mut projects = [project(0, 3), project(1, 4)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert!(outcome.statistics().skips > 0);
        assert_eq!(projects[1].allocations().get(&DonationId::new(2)), Some(&4));
    }

    #[test]
    fn test_backtracking_reroutes_shared_donation() {
        // Donation 0 may fund either project, but project 1 is reachable only
        // through it; a greedy assignment of donation 0 to project 0 must be
        // undone.
        let mut donations = [donation(0, 4, &[0, 1]), donation(1, 4, &[0])];
        let mut projects = [project(0, 4), project(1, 4)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert_eq!(projects[1].allocations().get(&DonationId::new(0)), Some(&4));
        assert_eq!(projects[0].allocations().get(&DonationId::new(1)), Some(&4));
    }

    #[test]
    fn test_no_projects_succeeds_trivially() {
        let mut donations = [donation(0, 5, &[0])];
        let mut projects: [Project<i64>; 0] = [];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert_eq!(donations[0].unspent(), 5);
    }

    #[test]
    fn test_no_donations_with_zero_targets_succeeds() {
        let mut donations: [Donation<i64>; 0] = [];
        let mut projects = [project(0, 0)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
    }

    #[test]
    fn test_no_donations_with_positive_target_fails() {
        let mut donations: [Donation<i64>; 0] = [];
        let mut projects = [project(0, 2)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_infeasible());
    }

    #[test]
    fn test_step_limit_aborts_and_restores() {
        // Large amounts make the unit-by-unit search expensive enough that a
        // one-step budget fires immediately.
        let mut donations = [donation(0, 1_000, &[0, 1]), donation(1, 1_000, &[0, 1])];
        let mut projects = [project(0, 900), project(1, 1_100)];
        let before = (donations.clone(), projects.clone());

        let mut solver = BacktrackingSolver::new();
        let mut monitor = StepLimitMonitor::new(1);
        let outcome = solver.solve(&mut donations, &mut projects, &mut monitor);

        assert_eq!(*outcome.result(), SolveResult::Unknown);
        assert_eq!(
            *outcome.termination_reason(),
            TerminationReason::Aborted("step limit reached".to_string())
        );
        assert_eq!(donations, before.0);
        assert_eq!(projects, before.1);
    }

    #[test]
    fn test_solver_is_reusable_across_solves() {
        let mut solver = BacktrackingSolver::new();
        let mut monitor = NoOperationMonitor::new();

        let mut donations = [donation(0, 5, &[0])];
        let mut projects = [project(0, 10)];
        let first = solver.solve(&mut donations, &mut projects, &mut monitor);
        assert!(first.result().is_infeasible());

        let mut donations = [donation(0, 10, &[0])];
        let mut projects = [project(0, 10)];
        let second = solver.solve(&mut donations, &mut projects, &mut monitor);
        assert!(second.result().is_funded());
    }
}
