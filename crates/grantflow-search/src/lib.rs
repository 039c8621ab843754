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

//! # Grantflow Search
//!
//! Shared infrastructure for the two allocation solvers. Both engines mutate
//! the same ledger (donation balances and project allocation maps) and both
//! must be able to rewind every mutation on failure, so the reversible-op
//! machinery lives here rather than in either engine.
//!
//! Module map
//! - `num`: the `MoneyNumeric` trait alias bounding amount types.
//! - `result`: `SolveResult` and `TerminationReason`, shared by all outcomes.
//! - `state`: `LedgerState`, the mutable view over the caller's donations and
//!   projects; all solver mutations flow through it.
//! - `journal`: `AllocationJournal`, a frame-marked undo log of reversible
//!   ledger operations; popping a frame restores the state exactly.
//! - `monitor`: search observers (`SearchMonitor`), including the step-limit
//!   monitor that turns pathological searches into a distinct
//!   "search exhausted" outcome, and tracing-based observability.

pub mod journal;
pub mod monitor;
pub mod num;
pub mod result;
pub mod state;
