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

//! Grantflow-DFS: exhaustive backtracking allocation
//!
//! This crate implements the complete, correct-by-exhaustion solver for the
//! donation allocation problem. It walks the donations in caller order and
//! distributes each one a single currency unit at a time across the
//! underfunded projects it may fund, undoing a unit whenever the remaining
//! search cannot complete the funding.
//!
//! Design highlights
//! - No recursion: decision levels live on an explicit `FrameStack`, so the
//!   search depth is bounded by heap, not by the call stack, even though the
//!   depth grows with the total funding amount.
//! - Tight inner loop: the ledger is mutated in place and restored through
//!   the shared `AllocationJournal`; a failed branch rewinds exactly one
//!   journal frame per undone unit.
//! - Deterministic: donations are tried in sequence order and projects in
//!   slice order.
//!
//! The search cost is exponential in the total funding amount; attach a
//! `StepLimitMonitor` for instances where that matters.
//!
//! Module map
//! - `solver`: the engine.
//! - `stack`: the explicit decision-frame stack.
//! - `result`: solver outcome with termination reason.
//! - `stats`: lightweight counters.

pub mod result;
pub mod solver;
pub mod stack;
pub mod stats;

pub use result::DfsOutcome;
pub use solver::BacktrackingSolver;
pub use stats::DfsStatistics;
