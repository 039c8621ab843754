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
    index::{DonationId, ProjectId},
    project::Project,
};
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};

/// A fixed sum of money restricted to a known set of eligible projects.
///
/// A donation is created with a `total` amount and an eligibility set, both
/// immutable for the lifetime of the record. Only the `unspent` balance
/// changes: it decreases when a project allocates from the donation and
/// increases when an allocation is reversed.
///
/// Invariant: `0 <= unspent() <= total()` at all times, so the net amount
/// ever allocated from a donation can never exceed its total.
///
/// # Examples
///
/// ```rust
/// use grantflow_model::{Donation, DonationId, ProjectId};
///
/// let d = Donation::<i64>::new(DonationId::new(0), 25, [ProjectId::new(2)]);
/// assert_eq!(d.total(), 25);
/// assert_eq!(d.unspent(), 25);
/// assert!(!d.spent());
/// assert!(d.eligible_for(ProjectId::new(2)));
/// assert!(!d.eligible_for(ProjectId::new(3)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Donation<T>
where
    T: PrimInt + Signed,
{
    id: DonationId,
    total: T,
    unspent: T,
    eligible: FixedBitSet,
}

impl<T> Donation<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new, fully unspent donation.
    ///
    /// The eligibility set is fixed here and never changes afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `total` is negative.
    pub fn new<I>(id: DonationId, total: T, eligible_projects: I) -> Self
    where
        I: IntoIterator<Item = ProjectId>,
    {
        assert!(
            total >= T::zero(),
            "called `Donation::new` with negative total for donation {}",
            id
        );

        let mut eligible = FixedBitSet::new();
        for project in eligible_projects {
            if project.get() >= eligible.len() {
                eligible.grow(project.get() + 1);
            }
            eligible.insert(project.get());
        }

        Self {
            id,
            total,
            unspent: total,
            eligible,
        }
    }

    /// Returns the identity of this donation.
    #[inline]
    pub fn id(&self) -> DonationId {
        self.id
    }

    /// Returns the total amount of this donation, fixed at creation.
    #[inline]
    pub fn total(&self) -> T {
        self.total
    }

    /// Returns the remaining unspent balance.
    #[inline]
    pub fn unspent(&self) -> T {
        self.unspent
    }

    /// Returns `true` if the donation has no unspent balance left.
    #[inline]
    pub fn spent(&self) -> bool {
        self.unspent == T::zero()
    }

    /// Returns `true` if this donation may fund the project with the given id.
    #[inline]
    pub fn eligible_for(&self, project: ProjectId) -> bool {
        self.eligible.contains(project.get())
    }

    /// Returns `true` if this donation may fund the given project.
    #[inline]
    pub fn can_be_used_for(&self, project: &Project<T>) -> bool {
        self.eligible_for(project.id())
    }

    /// Removes `amount` from the unspent balance.
    ///
    /// Callers (the allocation operations on `Project`) must have checked
    /// availability; in debug builds a violation panics.
    #[inline]
    pub(crate) fn debit(&mut self, amount: T)
    where
        T: std::fmt::Display,
    {
        debug_assert!(
            amount > T::zero() && amount <= self.unspent,
            "called `Donation::debit` on donation {} with amount {} but unspent is {}",
            self.id,
            amount,
            self.unspent
        );
        self.unspent = self.unspent - amount;
    }

    /// Returns `amount` to the unspent balance.
    #[inline]
    pub(crate) fn credit(&mut self, amount: T)
    where
        T: std::fmt::Display,
    {
        debug_assert!(
            amount > T::zero() && self.unspent + amount <= self.total,
            "called `Donation::credit` on donation {} with amount {} but unspent is {} of total {}",
            self.id,
            amount,
            self.unspent,
            self.total
        );
        self.unspent = self.unspent + amount;
    }
}

impl<T> std::fmt::Display for Donation<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Donation(id: {}, total: {}, unspent: {})",
            self.id, self.total, self.unspent
        )
    }
}
