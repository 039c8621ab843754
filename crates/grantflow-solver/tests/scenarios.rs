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

//! End-to-end contract tests: both engines must agree on feasibility, leave
//! a sound allocation behind on success, and restore the inputs exactly on
//! failure.

use grantflow_model::{Donation, DonationId, Project, ProjectId};
use grantflow_solver::{SolveResult, Solver, Strategy};

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

const STRATEGIES: [Strategy; 2] = [Strategy::Backtracking, Strategy::PathAugmenting];

fn solve_with(
    strategy: Strategy,
    donations: &mut Vec<Donation<i64>>,
    projects: &mut Vec<Project<i64>>,
) -> SolveResult {
    let solver = Solver::builder().strategy(strategy).build();
    let report = solver
        .solve(donations, projects)
        .expect("test fixtures satisfy the solver preconditions");
    report.result().clone()
}

/// Completeness on success: every project exactly at target, and no donation
/// over-spent relative to its recorded allocations.
fn assert_complete_allocation(donations: &[Donation<i64>], projects: &[Project<i64>]) {
    for project in projects {
        assert!(project.fully_funded(), "project {} not at target", project.id());
    }
    for donation in donations {
        let allocated: i64 = projects
            .iter()
            .filter_map(|p| p.allocations().get(&donation.id()))
            .sum();
        assert!(allocated <= donation.total());
        assert_eq!(donation.total() - donation.unspent(), allocated);
    }
}

/// Eligibility soundness: every unit in an allocation map is keyed by a
/// donation eligible for the project that holds it, however it got there.
fn assert_eligibility_sound(donations: &[Donation<i64>], projects: &[Project<i64>]) {
    for project in projects {
        for (&donation_id, &amount) in project.allocations().iter() {
            assert!(amount > 0);
            let donation = donations
                .iter()
                .find(|d| d.id() == donation_id)
                .expect("allocation keyed by a known donation");
            assert!(
                donation.eligible_for(project.id()),
                "project {} holds funds from ineligible donation {}",
                project.id(),
                donation_id
            );
        }
    }
}

/// No double counting: money drawn from donations equals money sitting in
/// projects.
fn assert_no_double_counting(donations: &[Donation<i64>], projects: &[Project<i64>]) {
    let drawn: i64 = donations.iter().map(|d| d.total() - d.unspent()).sum();
    let targets: i64 = projects.iter().map(Project::funding_target).sum();
    assert_eq!(drawn, targets);
}

fn assert_funded_invariants(donations: &[Donation<i64>], projects: &[Project<i64>]) {
    assert_complete_allocation(donations, projects);
    assert_eligibility_sound(donations, projects);
    assert_no_double_counting(donations, projects);
}

#[test]
fn scenario_a_exact_single_donation() {
    for strategy in STRATEGIES {
        let mut donations = vec![donation(0, 10, &[0])];
        let mut projects = vec![project(0, 10)];

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_funded(), "{} failed scenario A", strategy);
        assert_funded_invariants(&donations, &projects);
        assert_eq!(projects[0].allocations().get(&DonationId::new(0)), Some(&10));
    }
}

#[test]
fn scenario_b_shortfall_restores_state() {
    for strategy in STRATEGIES {
        let mut donations = vec![donation(0, 5, &[0])];
        let mut projects = vec![project(0, 10)];
        let before = (donations.clone(), projects.clone());

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_infeasible(), "{} failed scenario B", strategy);
        assert_eq!(donations, before.0);
        assert_eq!(projects, before.1);
    }
}

#[test]
fn scenario_c_split_across_two_projects() {
    for strategy in STRATEGIES {
        let mut donations = vec![donation(0, 10, &[0, 1])];
        let mut projects = vec![project(0, 4), project(1, 6)];

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_funded(), "{} failed scenario C", strategy);
        assert_funded_invariants(&donations, &projects);
    }
}

#[test]
fn scenario_d_disjoint_shortfall_is_infeasible() {
    for strategy in STRATEGIES {
        let mut donations = vec![donation(0, 10, &[0]), donation(1, 5, &[1])];
        let mut projects = vec![project(0, 8), project(1, 7)];
        let before = (donations.clone(), projects.clone());

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_infeasible(), "{} failed scenario D", strategy);
        assert_eq!(donations, before.0);
        assert_eq!(projects, before.1);
    }
}

#[test]
fn scenario_e_relay_required() {
    // Donation 1 can only reach project 0. A greedy direct assignment parks
    // donation 0 on project 0 first, so project 1 is only fundable by
    // relaying donation 0's money onward and backfilling with donation 1.
    for strategy in STRATEGIES {
        let mut donations = vec![donation(0, 5, &[0, 1]), donation(1, 5, &[0])];
        let mut projects = vec![project(0, 5), project(1, 5)];

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_funded(), "{} failed scenario E", strategy);
        assert_funded_invariants(&donations, &projects);
        // Project 1 is reachable by donation 0 alone, whichever engine ran.
        assert_eq!(projects[1].allocations().get(&DonationId::new(0)), Some(&5));
        assert_eq!(projects[0].allocations().get(&DonationId::new(1)), Some(&5));
    }
}

#[test]
fn multi_donation_head_capacity_is_pooled() {
    // The known trap for the flow method: no single donation covers the
    // target, so the augmentation amount must pool capacity across all of
    // them instead of being bounded by one donation's balance.
    for strategy in STRATEGIES {
        let mut donations = vec![
            donation(0, 2, &[0]),
            donation(1, 2, &[0]),
            donation(2, 2, &[0]),
        ];
        let mut projects = vec![project(0, 6)];

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_funded(), "{} failed pooled-capacity case", strategy);
        assert_funded_invariants(&donations, &projects);
    }
}

#[test]
fn relay_chain_across_three_projects() {
    for strategy in STRATEGIES {
        let mut donations = vec![
            donation(0, 4, &[0, 1]),
            donation(1, 4, &[1, 2]),
            donation(2, 4, &[0]),
        ];
        let mut projects = vec![project(0, 4), project(1, 4), project(2, 4)];

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_funded(), "{} failed chain relay", strategy);
        assert_funded_invariants(&donations, &projects);
    }
}

#[test]
fn leftover_donation_money_is_allowed() {
    // Donations may end with unspent balances; only projects must hit their
    // targets exactly.
    for strategy in STRATEGIES {
        let mut donations = vec![donation(0, 9, &[0, 1])];
        let mut projects = vec![project(0, 3), project(1, 2)];

        let result = solve_with(strategy, &mut donations, &mut projects);
        assert!(result.is_funded(), "{} failed leftover case", strategy);
        assert_complete_allocation(&donations, &projects);
        assert_eligibility_sound(&donations, &projects);
        assert_eq!(donations[0].unspent(), 4);
    }
}

#[test]
fn engines_agree_across_fixture_grid() {
    type Fixture = (Vec<(i64, Vec<usize>)>, Vec<i64>);
    // (donations as (total, eligible), project targets)
    let fixtures: Vec<Fixture> = vec![
        (vec![(3, vec![0, 1]), (3, vec![1])], vec![3, 3]),
        (vec![(3, vec![0, 1]), (3, vec![0])], vec![3, 3]),
        (vec![(2, vec![0]), (2, vec![1]), (2, vec![2])], vec![2, 2, 2]),
        (vec![(6, vec![0, 1, 2])], vec![2, 2, 2]),
        (vec![(6, vec![0, 1])], vec![2, 2, 3]),
        (vec![(4, vec![0, 1]), (4, vec![1, 2])], vec![2, 4, 2]),
        (vec![(4, vec![0, 1]), (4, vec![1, 2])], vec![4, 4, 2]),
        (vec![(1, vec![0]), (1, vec![0])], vec![2]),
        (vec![(1, vec![0]), (1, vec![0])], vec![3]),
        (vec![(5, vec![1]), (5, vec![0])], vec![5, 5]),
        (vec![(2, vec![0, 2]), (2, vec![1, 2]), (2, vec![2])], vec![2, 2, 2]),
        (vec![], vec![0, 0]),
        (vec![(3, vec![])], vec![1]),
    ];

    for (index, (donation_spec, targets)) in fixtures.iter().enumerate() {
        let build = || {
            let donations: Vec<Donation<i64>> = donation_spec
                .iter()
                .enumerate()
                .map(|(id, (total, eligible))| donation(id, *total, eligible))
                .collect();
            let projects: Vec<Project<i64>> = targets
                .iter()
                .enumerate()
                .map(|(id, &target)| project(id, target))
                .collect();
            (donations, projects)
        };

        let (mut donations_a, mut projects_a) = build();
        let result_a = solve_with(Strategy::Backtracking, &mut donations_a, &mut projects_a);

        let (mut donations_b, mut projects_b) = build();
        let result_b = solve_with(Strategy::PathAugmenting, &mut donations_b, &mut projects_b);

        assert_eq!(
            result_a.is_funded(),
            result_b.is_funded(),
            "engines disagree on fixture {}",
            index
        );

        if result_a.is_funded() {
            assert_funded_invariants(&donations_a, &projects_a);
            assert_funded_invariants(&donations_b, &projects_b);
        } else {
            let (expected_donations, expected_projects) = build();
            assert_eq!(donations_a, expected_donations);
            assert_eq!(projects_a, expected_projects);
            assert_eq!(donations_b, expected_donations);
            assert_eq!(projects_b, expected_projects);
        }
    }
}
