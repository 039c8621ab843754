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

//! The augmentation engine.
//!
//! Each round searches for a witness and applies it. The witness search runs
//! one depth-first traversal per head project, extending simple paths along
//! the static eligibility edges while carrying the running bottleneck: the
//! pooled unspent balance of the donations eligible for the head, narrowed by
//! each hop's currently transferable holdings. The first underfunded project
//! reached with a positive bottleneck yields the witness; a zero-length path
//! (the head itself underfunded) is the direct-allocation case.
//!
//! Applying a witness relays the amount tail-to-head, so every giver still
//! holds exactly the chunk set the witness was checked against, then
//! backfills the head greedily across all eligible donations. Holdings
//! change with every augmentation, which is why the next round starts its
//! witness search from scratch.

use crate::{graph::EligibilityGraph, result::AugOutcome, stats::AugStatistics};
use fixedbitset::FixedBitSet;
use grantflow_model::{
    validate_inputs, Donation, DonationId, DonationIndex, Project, ProjectIndex,
};
use grantflow_search::{
    journal::AllocationJournal,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::MoneyNumeric,
    state::LedgerState,
};
use rustc_hash::FxHashMap;

/// The `(amount, path)` pair proving a feasible augmentation exists.
///
/// `path` holds project positions; `path[0]` receives fresh donation money
/// and the last element is the underfunded project the amount ends up in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Witness<T> {
    amount: T,
    path: Vec<usize>,
}

/// Outcome of one witness search.
enum WitnessSearch<T> {
    Found(Witness<T>),
    Exhausted,
    Aborted(String),
}

/// The path-augmenting solver for the donation allocation problem.
///
/// Reusable across solves: the internal journal keeps its capacity between
/// runs; the eligibility graph and donation position map are rebuilt per
/// solve.
///
/// # Contract
///
/// Same contract as the backtracking solver: distinct, fully unspent
/// donations and distinct, unallocated projects on entry; on a `Funded`
/// outcome the complete allocation is left in place, on any other outcome
/// the inputs are restored to their exact pre-solve state.
#[derive(Debug, Clone, Default)]
pub struct PathAugmentingSolver<T> {
    journal: AllocationJournal<T>,
}

impl<T> PathAugmentingSolver<T>
where
    T: MoneyNumeric,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            journal: AllocationJournal::new(),
        }
    }

    /// Creates a solver with preallocated journal storage.
    #[inline]
    pub fn preallocated(expected_entries: usize) -> Self {
        Self {
            journal: AllocationJournal::preallocated(expected_entries),
        }
    }

    /// Runs the augmentation loop over the given donations and projects.
    pub fn solve<M>(
        &mut self,
        donations: &mut [Donation<T>],
        projects: &mut [Project<T>],
        monitor: &mut M,
    ) -> AugOutcome
    where
        M: SearchMonitor,
    {
        debug_assert!(
            validate_inputs(donations, projects).is_ok(),
            "called `PathAugmentingSolver::solve` with inputs violating the solver preconditions"
        );

        let mut state = LedgerState::new(donations, projects);
        let mut stats = AugStatistics::default();
        self.journal.reset();
        monitor.on_enter_search();

        let graph = EligibilityGraph::build(state.donations(), state.projects());
        let donation_positions: FxHashMap<DonationId, usize> = state
            .donations()
            .iter()
            .enumerate()
            .map(|(position, donation)| (donation.id(), position))
            .collect();

        loop {
            stats.on_witness_search();
            match find_witness(&state, &graph, &donation_positions, monitor, &mut stats) {
                WitnessSearch::Found(witness) => {
                    self.apply_witness(&mut state, &witness, &donation_positions, &mut stats);
                }
                WitnessSearch::Exhausted => break,
                WitnessSearch::Aborted(reason) => {
                    self.journal.unwind_all(&mut state);
                    monitor.on_exit_search();
                    return AugOutcome::aborted(reason, stats);
                }
            }
        }

        if state.all_fully_funded() {
            monitor.on_exit_search();
            AugOutcome::funded(stats)
        } else {
            self.journal.unwind_all(&mut state);
            monitor.on_exit_search();
            AugOutcome::infeasible(stats)
        }
    }

    /// Applies a witness inside one journal frame: relay tail-to-head, then
    /// backfill the head from unspent eligible donations.
    fn apply_witness(
        &mut self,
        state: &mut LedgerState<'_, T>,
        witness: &Witness<T>,
        donation_positions: &FxHashMap<DonationId, usize>,
        stats: &mut AugStatistics,
    ) {
        let amount = witness.amount;
        debug_assert!(amount > T::zero());
        self.journal.push_frame();

        // Walking the hops backward keeps every giver's holdings identical
        // to what the witness search checked.
        for hop in (0..witness.path.len().saturating_sub(1)).rev() {
            let from = ProjectIndex::new(witness.path[hop]);
            let to = ProjectIndex::new(witness.path[hop + 1]);
            let receiver_id = state.project(to).id();

            let chunks: Vec<(usize, T)> = state
                .project(from)
                .allocations()
                .iter()
                .filter(|&(&donation_id, _)| {
                    let position = donation_positions[&donation_id];
                    state.donations()[position].eligible_for(receiver_id)
                })
                .map(|(&donation_id, &held)| (donation_positions[&donation_id], held))
                .collect();

            let mut remaining = amount;
            for (position, held) in chunks {
                if remaining == T::zero() {
                    break;
                }
                let take = if held < remaining { held } else { remaining };
                self.journal.apply_transfer(
                    state,
                    DonationIndex::new(position),
                    from,
                    to,
                    take,
                );
                stats.on_transfer_applied();
                remaining = remaining - take;
            }
            debug_assert!(
                remaining == T::zero(),
                "witness hop capacity vanished during augmentation"
            );
        }

        let head = ProjectIndex::new(witness.path[0]);
        let head_id = state.project(head).id();
        let mut remaining = amount;
        for position in 0..state.num_donations() {
            if remaining == T::zero() {
                break;
            }
            let donation = state.donation(DonationIndex::new(position));
            if donation.spent() || !donation.eligible_for(head_id) {
                continue;
            }
            let unspent = donation.unspent();
            let take = if unspent < remaining { unspent } else { remaining };
            self.journal
                .apply_allocate(state, DonationIndex::new(position), head, take);
            remaining = remaining - take;
        }
        debug_assert!(
            remaining == T::zero(),
            "witness source capacity vanished during augmentation"
        );

        stats.on_augmentation(amount.to_u64().unwrap_or(u64::MAX));
    }
}

/// Searches every head project for a witness against the current holdings.
fn find_witness<T, M>(
    state: &LedgerState<'_, T>,
    graph: &EligibilityGraph,
    donation_positions: &FxHashMap<DonationId, usize>,
    monitor: &mut M,
    stats: &mut AugStatistics,
) -> WitnessSearch<T>
where
    T: MoneyNumeric,
    M: SearchMonitor,
{
    let num_projects = state.num_projects();
    for head in 0..num_projects {
        let source_capacity = state.unspent_eligible_for(ProjectIndex::new(head));
        if source_capacity <= T::zero() {
            continue;
        }

        let mut visited = FixedBitSet::with_capacity(num_projects);
        visited.insert(head);
        let mut path = vec![head];
        match extend_path(
            state,
            graph,
            donation_positions,
            source_capacity,
            &mut visited,
            &mut path,
            monitor,
            stats,
        ) {
            WitnessSearch::Exhausted => {}
            other => return other,
        }
    }
    WitnessSearch::Exhausted
}

/// Extends the current simple path depth-first, narrowing the bottleneck per
/// hop, until an underfunded project is reached or the subtree is exhausted.
#[allow(clippy::too_many_arguments)]
fn extend_path<T, M>(
    state: &LedgerState<'_, T>,
    graph: &EligibilityGraph,
    donation_positions: &FxHashMap<DonationId, usize>,
    bottleneck: T,
    visited: &mut FixedBitSet,
    path: &mut Vec<usize>,
    monitor: &mut M,
    stats: &mut AugStatistics,
) -> WitnessSearch<T>
where
    T: MoneyNumeric,
    M: SearchMonitor,
{
    monitor.on_step();
    stats.on_path_examined();
    if let SearchCommand::Terminate(reason) = monitor.search_command() {
        return WitnessSearch::Aborted(reason);
    }

    let current = *path.last().expect("path always contains its head");
    let needed = state.project(ProjectIndex::new(current)).needed_funds();
    if needed > T::zero() {
        let amount = if bottleneck < needed { bottleneck } else { needed };
        return WitnessSearch::Found(Witness {
            amount,
            path: path.clone(),
        });
    }

    for next in graph.neighbors(current) {
        if visited.contains(next) {
            continue;
        }
        let hop = transferable(state, donation_positions, current, next);
        let next_bottleneck = if hop < bottleneck { hop } else { bottleneck };
        if next_bottleneck <= T::zero() {
            continue;
        }

        visited.insert(next);
        path.push(next);
        match extend_path(
            state,
            graph,
            donation_positions,
            next_bottleneck,
            visited,
            path,
            monitor,
            stats,
        ) {
            WitnessSearch::Exhausted => {}
            other => return other,
        }
        path.pop();
        visited.set(next, false);
    }

    WitnessSearch::Exhausted
}

/// Returns how much of `from`'s current holdings could be relayed to `to`:
/// the total held from donations independently eligible for `to`.
fn transferable<T>(
    state: &LedgerState<'_, T>,
    donation_positions: &FxHashMap<DonationId, usize>,
    from: usize,
    to: usize,
) -> T
where
    T: MoneyNumeric,
{
    let receiver_id = state.project(ProjectIndex::new(to)).id();
    let mut total = T::zero();
    for (&donation_id, &held) in state.project(ProjectIndex::new(from)).allocations().iter() {
        let position = donation_positions[&donation_id];
        if state.donations()[position].eligible_for(receiver_id) {
            total = total + held;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantflow_model::ProjectId;
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
    ) -> AugOutcome {
        let mut solver = PathAugmentingSolver::new();
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
    fn test_relay_routes_funds_through_intermediate_project() {
        // Donation 1 can only reach project 0. The greedy first round parks
        // donation 0 there, so funding project 1 requires relaying donation
        // 0's money onward and backfilling project 0 with donation 1.
        let mut donations = [donation(0, 5, &[0, 1]), donation(1, 5, &[0])];
        let mut projects = [project(0, 5), project(1, 5)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert_eq!(projects[1].allocations().get(&DonationId::new(0)), Some(&5));
        assert_eq!(projects[0].allocations().get(&DonationId::new(1)), Some(&5));
        assert!(outcome.statistics().transfers_applied > 0);
    }

    #[test]
    fn test_relay_chain_across_three_projects() {
        // Eligibility forms a chain: d0 {0,1}, d1 {1,2} is absent; instead
        // each donation overlaps its neighbor so funds cascade two hops.
        let mut donations = [
            donation(0, 4, &[0, 1]),
            donation(1, 4, &[1, 2]),
            donation(2, 4, &[0]),
        ];
        let mut projects = [project(0, 4), project(1, 4), project(2, 4)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert!(projects.iter().all(Project::fully_funded));
        // Eligibility soundness: every recorded source must be eligible for
        // the project that ends up holding its money.
        for (position, project) in projects.iter().enumerate() {
            for (&donation_id, _) in project.allocations().iter() {
                let donation = donations
                    .iter()
                    .find(|d| d.id() == donation_id)
                    .expect("allocation keyed by known donation");
                assert!(donation.eligible_for(ProjectId::new(position)));
            }
        }
    }

    #[test]
    fn test_witness_pools_capacity_across_donations() {
        // No single donation covers the target; the witness amount must pool
        // the head capacity across all three.
        let mut donations = [
            donation(0, 2, &[0]),
            donation(1, 2, &[0]),
            donation(2, 2, &[0]),
        ];
        let mut projects = [project(0, 6)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_funded());
        assert_eq!(outcome.statistics().augmentations, 1);
        assert!(donations.iter().all(Donation::spent));
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
    fn test_no_donations_with_positive_target_fails() {
        let mut donations: [Donation<i64>; 0] = [];
        let mut projects = [project(0, 2)];

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_infeasible());
    }

    #[test]
    fn test_partial_progress_is_rolled_back_on_infeasibility() {
        // Project 0 can be funded, project 1 cannot; the successful first
        // augmentation must be unwound before reporting infeasible.
        let mut donations = [donation(0, 4, &[0])];
        let mut projects = [project(0, 4), project(1, 3)];
        let before = (donations.clone(), projects.clone());

        let outcome = solve(&mut donations, &mut projects);
        assert!(outcome.result().is_infeasible());
        assert_eq!(donations, before.0);
        assert_eq!(projects, before.1);
    }

    #[test]
    fn test_step_limit_aborts_and_restores() {
        let mut donations = [donation(0, 50, &[0, 1]), donation(1, 50, &[0, 1])];
        let mut projects = [project(0, 40), project(1, 60)];
        let before = (donations.clone(), projects.clone());

        let mut solver = PathAugmentingSolver::new();
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
        let mut solver = PathAugmentingSolver::new();
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
