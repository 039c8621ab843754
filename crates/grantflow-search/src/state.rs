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

use crate::num::MoneyNumeric;
use grantflow_model::{Donation, DonationIndex, Project, ProjectIndex};

/// The mutable view a solver holds over the caller's donations and projects.
///
/// Donations are addressed by their position in the caller's ordered
/// sequence, projects by their position in the caller's slice. All ledger
/// mutations a solver performs go through this type (driven by the
/// [`AllocationJournal`](crate::journal::AllocationJournal)), so that every
/// mutation is paired with a journal entry that can reverse it.
#[derive(Debug)]
pub struct LedgerState<'a, T>
where
    T: MoneyNumeric,
{
    donations: &'a mut [Donation<T>],
    projects: &'a mut [Project<T>],
}

impl<'a, T> LedgerState<'a, T>
where
    T: MoneyNumeric,
{
    /// Creates a new ledger view over the given records.
    #[inline]
    pub fn new(donations: &'a mut [Donation<T>], projects: &'a mut [Project<T>]) -> Self {
        Self {
            donations,
            projects,
        }
    }

    /// Returns the number of donations in the sequence.
    #[inline]
    pub fn num_donations(&self) -> usize {
        self.donations.len()
    }

    /// Returns the number of projects.
    #[inline]
    pub fn num_projects(&self) -> usize {
        self.projects.len()
    }

    /// Returns all donations in caller order.
    #[inline]
    pub fn donations(&self) -> &[Donation<T>] {
        self.donations
    }

    /// Returns all projects in caller order.
    #[inline]
    pub fn projects(&self) -> &[Project<T>] {
        self.projects
    }

    /// Returns the donation at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `donation_index` is not in `0..num_donations()`.
    #[inline]
    pub fn donation(&self, donation_index: DonationIndex) -> &Donation<T> {
        let index = donation_index.get();
        debug_assert!(
            index < self.num_donations(),
            "called `LedgerState::donation` with donation index out of bounds: the len is {} but the index is {}",
            self.num_donations(),
            index
        );

        &self.donations[index]
    }

    /// Returns the project at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `project_index` is not in `0..num_projects()`.
    #[inline]
    pub fn project(&self, project_index: ProjectIndex) -> &Project<T> {
        let index = project_index.get();
        debug_assert!(
            index < self.num_projects(),
            "called `LedgerState::project` with project index out of bounds: the len is {} but the index is {}",
            self.num_projects(),
            index
        );

        &self.projects[index]
    }

    /// Returns `true` if every project is funded exactly to its target.
    #[inline]
    pub fn all_fully_funded(&self) -> bool {
        self.projects.iter().all(Project::fully_funded)
    }

    /// Returns the combined unspent balance of all donations eligible for the
    /// given project. This is the fresh money available at the head of an
    /// augmenting path, pooled across donations.
    pub fn unspent_eligible_for(&self, project_index: ProjectIndex) -> T {
        let project = &self.projects[project_index.get()];
        self.donations
            .iter()
            .filter(|d| d.can_be_used_for(project))
            .fold(T::zero(), |acc, d| acc + d.unspent())
    }

    /// Allocates `amount` from the donation at `donation_index` to the
    /// project at `project_index`.
    pub(crate) fn allocate(
        &mut self,
        donation_index: DonationIndex,
        project_index: ProjectIndex,
        amount: T,
    ) {
        let donation = &mut self.donations[donation_index.get()];
        self.projects[project_index.get()].allocate(donation, amount);
    }

    /// Reverses a previous allocation.
    pub(crate) fn deallocate(
        &mut self,
        donation_index: DonationIndex,
        project_index: ProjectIndex,
        amount: T,
    ) {
        let donation = &mut self.donations[donation_index.get()];
        self.projects[project_index.get()].deallocate(donation, amount);
    }

    /// Moves `amount` of funds keyed by the donation at `donation_index`
    /// from the project at `from` into the project at `to`.
    pub(crate) fn move_chunk(
        &mut self,
        donation_index: DonationIndex,
        from: ProjectIndex,
        to: ProjectIndex,
        amount: T,
    ) {
        let donation = &self.donations[donation_index.get()];
        let (giver, receiver) = pair_mut(self.projects, from.get(), to.get());
        receiver.transfer_chunk(donation, amount, giver);
    }
}

/// Returns mutable references to two distinct slice elements.
///
/// # Panics
///
/// Panics if `a == b` or either index is out of bounds.
fn pair_mut<X>(slice: &mut [X], a: usize, b: usize) -> (&mut X, &mut X) {
    assert_ne!(a, b, "called `pair_mut` with identical indices {}", a);
    if a < b {
        let (left, right) = slice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(a);
        let (second, first) = (&mut left[b], &mut right[0]);
        (first, second)
    }
}
