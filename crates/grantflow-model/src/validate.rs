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

use crate::{
    donation::Donation,
    index::{DonationId, ProjectId},
    project::Project,
};
use num_traits::{PrimInt, Signed};
use std::collections::BTreeSet;
use thiserror::Error;

/// A violation of the solver entry preconditions.
///
/// These are programmer errors on the caller's side, not solvable states:
/// the solvers' restore-on-failure postcondition cannot be guaranteed when
/// entered with duplicate identities or pre-existing allocations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Two donations in the sequence share the same identity.
    #[error("duplicate donation {0} in the input sequence")]
    DuplicateDonation(DonationId),

    /// A donation entered the solve with part of its total already spent.
    #[error("donation {0} is partially spent before the solve")]
    PartiallySpentDonation(DonationId),

    /// Two projects in the input share the same identity.
    #[error("duplicate project {0} in the input")]
    DuplicateProject(ProjectId),

    /// A project entered the solve with allocations already recorded.
    #[error("project {0} carries allocations before the solve")]
    PreAllocatedProject(ProjectId),
}

/// Checks the solver entry preconditions: distinct donation and project
/// identities, every donation fully unspent, every project unallocated.
pub fn validate_inputs<T>(
    donations: &[Donation<T>],
    projects: &[Project<T>],
) -> Result<(), PreconditionError>
where
    T: PrimInt + Signed,
{
    let mut donation_ids = BTreeSet::new();
    for donation in donations {
        if !donation_ids.insert(donation.id()) {
            return Err(PreconditionError::DuplicateDonation(donation.id()));
        }
        if donation.unspent() != donation.total() {
            return Err(PreconditionError::PartiallySpentDonation(donation.id()));
        }
    }

    let mut project_ids = BTreeSet::new();
    for project in projects {
        if !project_ids.insert(project.id()) {
            return Err(PreconditionError::DuplicateProject(project.id()));
        }
        if !project.allocations().is_empty() {
            return Err(PreconditionError::PreAllocatedProject(project.id()));
        }
    }

    Ok(())
}
