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

#![allow(dead_code)]

use crate::{num::MoneyNumeric, state::LedgerState};
use grantflow_model::{DonationIndex, ProjectIndex};

/// A compact record of a single reversible ledger mutation.
///
/// `JournalEntry` captures sufficient information to undo one operation
/// during backtracking: an allocation names its donation, project and
/// amount; a relay chunk additionally names the giver and receiver. Entries
/// are stored in a linear log and consumed in reverse when rewinding.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JournalEntry<T> {
    /// `amount` was allocated from the donation to the project.
    Allocate {
        donation: DonationIndex,
        project: ProjectIndex,
        amount: T,
    },
    /// `amount` of donation-keyed funds was relayed from `from` to `to`.
    Transfer {
        donation: DonationIndex,
        from: ProjectIndex,
        to: ProjectIndex,
        amount: T,
    },
}

impl<T> std::fmt::Display for JournalEntry<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JournalEntry::Allocate {
                donation,
                project,
                amount,
            } => write!(
                f,
                "Allocate(donation: {}, project: {}, amount: {})",
                donation.get(),
                project.get(),
                amount
            ),
            JournalEntry::Transfer {
                donation,
                from,
                to,
                amount,
            } => write!(
                f,
                "Transfer(donation: {}, from: {}, to: {}, amount: {})",
                donation.get(),
                from.get(),
                to.get(),
                amount
            ),
        }
    }
}

/// A linear undo log with frame markers for efficient backtracking.
///
/// `AllocationJournal` records every ledger mutation along with frame
/// boundaries, enabling rollback of a decision level in reverse order.
/// Typical usage:
/// 1. Call `push_frame()` before a decision or augmentation,
/// 2. Apply mutations through `apply_allocate` / `apply_transfer`,
/// 3. On a dead end, call `backtrack(state)` to restore the ledger to the
///    start of the frame; on total failure, `unwind_all(state)` restores the
///    original pre-solve state.
///
/// Applying mutations only through the journal is what makes the solvers'
/// restore-on-failure postcondition a mechanical guarantee rather than a
/// per-call-site obligation.
#[derive(Debug, Clone)]
pub struct AllocationJournal<T> {
    /// The linear history of all ledger mutations.
    entries: Vec<JournalEntry<T>>,
    /// A stack of indices pointing to `entries`.
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl<T> Default for AllocationJournal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AllocationJournal<T> {
    /// Creates a new, empty journal.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a journal preallocating space based on the total funding
    /// amount expected to move during a solve.
    #[inline]
    pub fn preallocated(expected_entries: usize) -> Self {
        Self {
            entries: Vec::with_capacity(expected_entries),
            frames: Vec::with_capacity(expected_entries + 1),
        }
    }

    /// Returns the number of recorded mutations.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of open frames (depth).
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no mutations are recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pushes a new frame, marking the start of a decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Returns an iterator over all recorded mutations.
    #[inline]
    pub fn iter_entries(&self) -> std::slice::Iter<'_, JournalEntry<T>> {
        self.entries.iter()
    }
}

impl<T> AllocationJournal<T>
where
    T: MoneyNumeric,
{
    /// Allocates `amount` from a donation to a project and records the
    /// mutation in the current frame.
    pub fn apply_allocate(
        &mut self,
        state: &mut LedgerState<'_, T>,
        donation: DonationIndex,
        project: ProjectIndex,
        amount: T,
    ) {
        state.allocate(donation, project, amount);
        self.entries.push(JournalEntry::Allocate {
            donation,
            project,
            amount,
        });
    }

    /// Relays `amount` of donation-keyed funds from `from` to `to` and
    /// records the mutation in the current frame.
    pub fn apply_transfer(
        &mut self,
        state: &mut LedgerState<'_, T>,
        donation: DonationIndex,
        from: ProjectIndex,
        to: ProjectIndex,
        amount: T,
    ) {
        state.move_chunk(donation, from, to, amount);
        self.entries.push(JournalEntry::Transfer {
            donation,
            from,
            to,
            amount,
        });
    }

    /// Rewinds to the previous frame, undoing all mutations made since then
    /// in reverse order.
    pub fn backtrack(&mut self, state: &mut LedgerState<'_, T>) {
        let start = match self.frames.pop() {
            Some(start) => start,
            None => return,
        };

        while self.entries.len() > start {
            debug_assert!(
                !self.entries.is_empty(),
                "called `AllocationJournal::backtrack` on an empty journal"
            );

            let entry = self.entries.pop().expect("entry count checked above");
            Self::undo_entry(state, entry);
        }
    }

    /// Rewinds the entire journal, undoing every mutation across all frames.
    /// The ledger is restored to its exact pre-solve state.
    pub fn unwind_all(&mut self, state: &mut LedgerState<'_, T>) {
        while let Some(entry) = self.entries.pop() {
            Self::undo_entry(state, entry);
        }
        self.frames.clear();
    }

    /// Clears the journal markers without undoing any state changes.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    fn undo_entry(state: &mut LedgerState<'_, T>, entry: JournalEntry<T>) {
        match entry {
            JournalEntry::Allocate {
                donation,
                project,
                amount,
            } => state.deallocate(donation, project, amount),
            JournalEntry::Transfer {
                donation,
                from,
                to,
                amount,
            } => state.move_chunk(donation, to, from, amount),
        }
    }
}

impl<T> std::fmt::Display for AllocationJournal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AllocationJournal(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantflow_model::{Donation, DonationId, Project, ProjectId};

    fn fixture() -> (Vec<Donation<i64>>, Vec<Project<i64>>) {
        let donations = vec![
            Donation::new(DonationId::new(0), 6, [ProjectId::new(0), ProjectId::new(1)]),
            Donation::new(DonationId::new(1), 4, [ProjectId::new(0)]),
        ];
        let projects = vec![
            Project::new(ProjectId::new(0), 6),
            Project::new(ProjectId::new(1), 4),
        ];
        (donations, projects)
    }

    #[test]
    fn test_backtrack_restores_frame_start() {
        let (mut donations, mut projects) = fixture();
        let mut state = LedgerState::new(&mut donations, &mut projects);
        let mut journal = AllocationJournal::new();

        journal.push_frame();
        journal.apply_allocate(&mut state, DonationIndex::new(0), ProjectIndex::new(0), 3);
        journal.push_frame();
        journal.apply_allocate(&mut state, DonationIndex::new(1), ProjectIndex::new(0), 2);
        assert_eq!(state.project(ProjectIndex::new(0)).needed_funds(), 1);

        journal.backtrack(&mut state);
        assert_eq!(state.project(ProjectIndex::new(0)).needed_funds(), 3);
        assert_eq!(state.donation(DonationIndex::new(1)).unspent(), 4);
        assert_eq!(journal.depth(), 1);
    }

    #[test]
    fn test_unwind_all_restores_pristine_state() {
        let (mut donations, mut projects) = fixture();
        let before_donations = donations.clone();
        let before_projects = projects.clone();

        {
            let mut state = LedgerState::new(&mut donations, &mut projects);
            let mut journal = AllocationJournal::new();

            journal.push_frame();
            journal.apply_allocate(&mut state, DonationIndex::new(0), ProjectIndex::new(0), 4);
            journal.push_frame();
            journal.apply_transfer(
                &mut state,
                DonationIndex::new(0),
                ProjectIndex::new(0),
                ProjectIndex::new(1),
                4,
            );
            journal.apply_allocate(&mut state, DonationIndex::new(1), ProjectIndex::new(0), 1);

            journal.unwind_all(&mut state);
            assert!(journal.is_empty());
            assert_eq!(journal.depth(), 0);
        }

        assert_eq!(donations, before_donations);
        assert_eq!(projects, before_projects);
    }

    #[test]
    fn test_transfer_undo_moves_the_same_chunk_back() {
        let (mut donations, mut projects) = fixture();
        let mut state = LedgerState::new(&mut donations, &mut projects);
        let mut journal = AllocationJournal::new();

        journal.apply_allocate(&mut state, DonationIndex::new(0), ProjectIndex::new(0), 5);
        journal.push_frame();
        journal.apply_transfer(
            &mut state,
            DonationIndex::new(0),
            ProjectIndex::new(0),
            ProjectIndex::new(1),
            2,
        );
        assert_eq!(
            state
                .project(ProjectIndex::new(1))
                .allocations()
                .get(&DonationId::new(0)),
            Some(&2)
        );

        journal.backtrack(&mut state);
        assert_eq!(
            state
                .project(ProjectIndex::new(0))
                .allocations()
                .get(&DonationId::new(0)),
            Some(&5)
        );
        assert!(state.project(ProjectIndex::new(1)).allocations().is_empty());
    }

    #[test]
    fn test_backtrack_without_frames_is_a_no_op() {
        let (mut donations, mut projects) = fixture();
        let mut state = LedgerState::new(&mut donations, &mut projects);
        let mut journal = AllocationJournal::<i64>::new();
        journal.backtrack(&mut state);
        assert!(journal.is_empty());
    }
}
