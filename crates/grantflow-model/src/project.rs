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
};
use num_traits::{PrimInt, Signed};
use std::collections::BTreeMap;

/// A funding target that accumulates money from one or more donations.
///
/// The allocation map is always keyed by the originating donation, never by
/// another project: when money is relayed between projects via [`transfer`],
/// the donation-keyed entries are re-keyed from the giver's map into the
/// receiver's map unchanged. Tracing any unit of money in the map back to its
/// source is therefore a single lookup.
///
/// Invariant: `needed_funds() >= 0` at all times; allocation can never push a
/// project past its funding target.
///
/// [`transfer`]: Project::transfer
///
/// # Examples
///
/// ```rust
/// use grantflow_model::{Donation, DonationId, Project, ProjectId};
///
/// let mut donation = Donation::<i64>::new(DonationId::new(0), 10, [ProjectId::new(0)]);
/// let mut project = Project::<i64>::new(ProjectId::new(0), 6);
///
/// project.allocate(&mut donation, 6);
/// assert!(project.fully_funded());
/// assert_eq!(donation.unspent(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project<T>
where
    T: PrimInt + Signed,
{
    id: ProjectId,
    funding_target: T,
    allocations: BTreeMap<DonationId, T>,
}

impl<T> Project<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new, unallocated project.
    ///
    /// # Panics
    ///
    /// Panics if `funding_target` is negative.
    pub fn new(id: ProjectId, funding_target: T) -> Self {
        assert!(
            funding_target >= T::zero(),
            "called `Project::new` with negative funding target for project {}",
            id
        );

        Self {
            id,
            funding_target,
            allocations: BTreeMap::new(),
        }
    }

    /// Returns the identity of this project.
    #[inline]
    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the funding target, fixed at creation.
    #[inline]
    pub fn funding_target(&self) -> T {
        self.funding_target
    }

    /// Returns the donation-keyed allocation map.
    #[inline]
    pub fn allocations(&self) -> &BTreeMap<DonationId, T> {
        &self.allocations
    }

    /// Returns the total amount currently allocated to this project.
    #[inline]
    pub fn allocated_funding(&self) -> T {
        self.allocations
            .values()
            .fold(T::zero(), |acc, &amount| acc + amount)
    }

    /// Returns the amount still missing to reach the funding target.
    #[inline]
    pub fn needed_funds(&self) -> T {
        self.funding_target - self.allocated_funding()
    }

    /// Returns `true` if the project is funded exactly to its target.
    #[inline]
    pub fn fully_funded(&self) -> bool {
        self.needed_funds() == T::zero()
    }

    /// Allocates `amount` from the donation to this project.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive, the donation is not eligible for
    /// this project, the donation's unspent balance is insufficient, or the
    /// allocation would overfund the project.
    pub fn allocate(&mut self, donation: &mut Donation<T>, amount: T)
    where
        T: std::fmt::Display,
    {
        assert!(
            amount > T::zero(),
            "called `Project::allocate` on project {} with non-positive amount {}",
            self.id,
            amount
        );
        assert!(
            donation.eligible_for(self.id),
            "called `Project::allocate` on project {} with ineligible donation {}",
            self.id,
            donation.id()
        );
        assert!(
            donation.unspent() >= amount,
            "called `Project::allocate` on project {} with amount {} but donation {} has only {} unspent",
            self.id,
            amount,
            donation.id(),
            donation.unspent()
        );
        assert!(
            self.needed_funds() >= amount,
            "called `Project::allocate` on project {} with amount {} but only {} is needed",
            self.id,
            amount,
            self.needed_funds()
        );

        donation.debit(amount);
        let entry = self.allocations.entry(donation.id()).or_insert(T::zero());
        *entry = *entry + amount;
    }

    /// Reverses a previous allocation, returning `amount` to the donation.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive or this project does not currently
    /// hold `amount` sourced from the given donation.
    pub fn deallocate(&mut self, donation: &mut Donation<T>, amount: T)
    where
        T: std::fmt::Display,
    {
        assert!(
            amount > T::zero(),
            "called `Project::deallocate` on project {} with non-positive amount {}",
            self.id,
            amount
        );

        let held = self.allocations.get(&donation.id()).copied();
        match held {
            Some(held) if held >= amount => {
                if held == amount {
                    self.allocations.remove(&donation.id());
                } else {
                    self.allocations.insert(donation.id(), held - amount);
                }
                donation.credit(amount);
            }
            _ => panic!(
                "called `Project::deallocate` on project {} with amount {} but it holds {} from donation {}",
                self.id,
                amount,
                held.unwrap_or_else(T::zero),
                donation.id()
            ),
        }
    }

    /// Moves `amount` of `donation`-keyed funds from `from` into this project.
    ///
    /// The entry keeps its donation key; the underlying donation's unspent
    /// balance is untouched. This is the primitive relay step; [`transfer`]
    /// composes it across donations.
    ///
    /// [`transfer`]: Project::transfer
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive, the donation is not eligible for
    /// this project, or `from` does not hold `amount` from the donation.
    pub fn transfer_chunk(&mut self, donation: &Donation<T>, amount: T, from: &mut Project<T>)
    where
        T: std::fmt::Display,
    {
        assert!(
            amount > T::zero(),
            "called `Project::transfer_chunk` on project {} with non-positive amount {}",
            self.id,
            amount
        );
        assert!(
            donation.eligible_for(self.id),
            "called `Project::transfer_chunk` on project {} with ineligible donation {}",
            self.id,
            donation.id()
        );
        assert!(
            self.needed_funds() >= amount,
            "called `Project::transfer_chunk` on project {} with amount {} but only {} is needed",
            self.id,
            amount,
            self.needed_funds()
        );

        let held = from.allocations.get(&donation.id()).copied();
        match held {
            Some(held) if held >= amount => {
                if held == amount {
                    from.allocations.remove(&donation.id());
                } else {
                    from.allocations.insert(donation.id(), held - amount);
                }
                let entry = self.allocations.entry(donation.id()).or_insert(T::zero());
                *entry = *entry + amount;
            }
            _ => panic!(
                "called `Project::transfer_chunk` on project {} with amount {} but project {} holds {} from donation {}",
                self.id,
                amount,
                from.id,
                held.unwrap_or_else(T::zero),
                donation.id()
            ),
        }
    }

    /// Relays `amount` of already-allocated money from `from` into this
    /// project, drawing only on entries whose donation is independently
    /// eligible for this project. Entries keep their donation keys.
    ///
    /// The `donations` slice resolves eligibility of the giver's entries; it
    /// must contain every donation that funded `from`.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive, if `from` holds less than `amount`
    /// sourced from donations eligible for this project, or if an entry of
    /// `from` refers to a donation absent from `donations`.
    pub fn transfer(&mut self, amount: T, from: &mut Project<T>, donations: &[Donation<T>])
    where
        T: std::fmt::Display,
    {
        assert!(
            amount > T::zero(),
            "called `Project::transfer` on project {} with non-positive amount {}",
            self.id,
            amount
        );

        // Plan the chunk decomposition before mutating anything, so an
        // insufficient-funds panic cannot leave a partial move behind.
        let mut chunks: Vec<(DonationId, T)> = Vec::new();
        let mut remaining = amount;
        for (&donation_id, &held) in from.allocations.iter() {
            if remaining == T::zero() {
                break;
            }
            let donation = donations
                .iter()
                .find(|d| d.id() == donation_id)
                .unwrap_or_else(|| {
                    panic!(
                        "called `Project::transfer` on project {} but donation {} funding project {} is unknown",
                        self.id, donation_id, from.id
                    )
                });
            if !donation.eligible_for(self.id) {
                continue;
            }
            let take = if held < remaining { held } else { remaining };
            chunks.push((donation_id, take));
            remaining = remaining - take;
        }
        assert!(
            remaining == T::zero(),
            "called `Project::transfer` on project {} for amount {} but project {} holds too little eligible funding",
            self.id,
            amount,
            from.id
        );

        for (donation_id, take) in chunks {
            let donation = donations
                .iter()
                .find(|d| d.id() == donation_id)
                .expect("chunk plan refers to a known donation");
            self.transfer_chunk(donation, take, from);
        }
    }

    /// Reverses every allocation held by this project, returning the funds to
    /// their originating donations.
    ///
    /// # Panics
    ///
    /// Panics if an allocation entry refers to a donation absent from
    /// `donations`.
    pub fn deallocate_all(&mut self, donations: &mut [Donation<T>])
    where
        T: std::fmt::Display,
    {
        let drained: Vec<(DonationId, T)> = self
            .allocations
            .iter()
            .map(|(&id, &amount)| (id, amount))
            .collect();
        self.allocations.clear();

        for (donation_id, amount) in drained {
            let donation = donations
                .iter_mut()
                .find(|d| d.id() == donation_id)
                .unwrap_or_else(|| {
                    panic!(
                        "called `Project::deallocate_all` on project {} but donation {} is unknown",
                        self.id, donation_id
                    )
                });
            donation.credit(amount);
        }
    }
}

impl<T> std::fmt::Display for Project<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Project(id: {}, target: {}, allocated: {})",
            self.id,
            self.funding_target,
            self.allocated_funding()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn did(i: usize) -> DonationId {
        DonationId::new(i)
    }

    fn pid(i: usize) -> ProjectId {
        ProjectId::new(i)
    }

    #[test]
    fn test_new_project_is_unallocated() {
        let p = Project::<i64>::new(pid(0), 10);
        assert_eq!(p.funding_target(), 10);
        assert_eq!(p.allocated_funding(), 0);
        assert_eq!(p.needed_funds(), 10);
        assert!(!p.fully_funded());
        assert!(p.allocations().is_empty());
    }

    #[test]
    fn test_zero_target_is_fully_funded() {
        let p = Project::<i64>::new(pid(0), 0);
        assert!(p.fully_funded());
    }

    #[test]
    fn test_allocate_updates_both_sides() {
        let mut d = Donation::<i64>::new(did(0), 10, [pid(0)]);
        let mut p = Project::<i64>::new(pid(0), 8);

        p.allocate(&mut d, 5);
        assert_eq!(p.needed_funds(), 3);
        assert_eq!(d.unspent(), 5);
        assert_eq!(p.allocations().get(&did(0)), Some(&5));

        p.allocate(&mut d, 3);
        assert!(p.fully_funded());
        assert_eq!(d.unspent(), 2);
    }

    #[test]
    fn test_deallocate_restores_donation() {
        let mut d = Donation::<i64>::new(did(0), 10, [pid(0)]);
        let mut p = Project::<i64>::new(pid(0), 8);

        p.allocate(&mut d, 5);
        p.deallocate(&mut d, 2);
        assert_eq!(p.allocations().get(&did(0)), Some(&3));
        assert_eq!(d.unspent(), 7);

        p.deallocate(&mut d, 3);
        assert!(p.allocations().is_empty());
        assert_eq!(d.unspent(), 10);
    }

    #[test]
    #[should_panic(expected = "ineligible donation")]
    fn test_allocate_rejects_ineligible_donation() {
        let mut d = Donation::<i64>::new(did(0), 10, [pid(1)]);
        let mut p = Project::<i64>::new(pid(0), 8);
        p.allocate(&mut d, 1);
    }

    #[test]
    #[should_panic(expected = "is needed")]
    fn test_allocate_rejects_overfunding() {
        let mut d = Donation::<i64>::new(did(0), 10, [pid(0)]);
        let mut p = Project::<i64>::new(pid(0), 3);
        p.allocate(&mut d, 4);
    }

    #[test]
    fn test_transfer_rekeys_without_touching_unspent() {
        let mut d = Donation::<i64>::new(did(0), 10, [pid(0), pid(1)]);
        let mut giver = Project::<i64>::new(pid(0), 6);
        let mut receiver = Project::<i64>::new(pid(1), 6);

        giver.allocate(&mut d, 6);
        let unspent_before = d.unspent();

        let donations = [d.clone()];
        receiver.transfer(4, &mut giver, &donations);

        assert_eq!(receiver.allocations().get(&did(0)), Some(&4));
        assert_eq!(giver.allocations().get(&did(0)), Some(&2));
        assert_eq!(unspent_before, 4);
    }

    #[test]
    fn test_transfer_skips_ineligible_sources() {
        // Donation 0 may fund both projects, donation 1 only the giver.
        let mut d0 = Donation::<i64>::new(did(0), 3, [pid(0), pid(1)]);
        let mut d1 = Donation::<i64>::new(did(1), 3, [pid(0)]);
        let mut giver = Project::<i64>::new(pid(0), 6);
        let mut receiver = Project::<i64>::new(pid(1), 3);

        giver.allocate(&mut d0, 3);
        giver.allocate(&mut d1, 3);

        let donations = [d0.clone(), d1.clone()];
        receiver.transfer(3, &mut giver, &donations);

        assert_eq!(receiver.allocations().get(&did(0)), Some(&3));
        assert_eq!(receiver.allocations().get(&did(1)), None);
        assert_eq!(giver.allocations().get(&did(1)), Some(&3));
    }

    #[test]
    #[should_panic(expected = "holds too little eligible funding")]
    fn test_transfer_rejects_insufficient_eligible_funding() {
        let mut d0 = Donation::<i64>::new(did(0), 2, [pid(0), pid(1)]);
        let mut d1 = Donation::<i64>::new(did(1), 4, [pid(0)]);
        let mut giver = Project::<i64>::new(pid(0), 6);
        let mut receiver = Project::<i64>::new(pid(1), 6);

        giver.allocate(&mut d0, 2);
        giver.allocate(&mut d1, 4);

        let donations = [d0.clone(), d1.clone()];
        // Only 2 of the giver's 6 units are eligible for the receiver.
        receiver.transfer(3, &mut giver, &donations);
    }

    #[test]
    fn test_deallocate_all_refunds_every_source() {
        let mut d0 = Donation::<i64>::new(did(0), 4, [pid(0)]);
        let mut d1 = Donation::<i64>::new(did(1), 4, [pid(0)]);
        let mut p = Project::<i64>::new(pid(0), 6);

        p.allocate(&mut d0, 4);
        p.allocate(&mut d1, 2);

        let mut donations = [d0, d1];
        p.deallocate_all(&mut donations);

        assert!(p.allocations().is_empty());
        assert_eq!(donations[0].unspent(), 4);
        assert_eq!(donations[1].unspent(), 4);
    }
}
