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

//! Grantflow-AUG: path-augmenting allocation
//!
//! This crate implements the flow-style solver for the donation allocation
//! problem. Eligibility is modeled as a directed graph over projects (an edge
//! P → Q exists when some donation may fund both), and the engine repeatedly
//! searches for a witness: an amount `x` and a simple project path along
//! which `x` units can be relayed from pooled eligible donations at the head
//! into an underfunded project at the end. Each witness is applied by
//! relaying tail-to-head and backfilling the head with fresh donation money;
//! the loop stops when no witness remains.
//!
//! Correctness hinges on two choices:
//! - `x` is the true bottleneck of the whole path: the end project's missing
//!   funds, the COMBINED unspent balance of all donations eligible for the
//!   head, and every hop's currently transferable holdings. Bounding `x` by
//!   a single donation's balance can strand feasible instances.
//! - Hop feasibility depends on current holdings, so the witness search runs
//!   fresh after every augmentation; only the static eligibility adjacency
//!   is cached per solve.
//!
//! Every mutation goes through the shared `AllocationJournal`; if the loop
//! ends short of full funding, the entire journal is unwound and the inputs
//! are restored exactly.
//!
//! Module map
//! - `graph`: the static eligibility adjacency.
//! - `solver`: witness search and augmentation engine.
//! - `result`: solver outcome with termination reason.
//! - `stats`: lightweight counters.

pub mod graph;
pub mod result;
pub mod solver;
pub mod stats;

pub use graph::EligibilityGraph;
pub use result::AugOutcome;
pub use solver::PathAugmentingSolver;
pub use stats::AugStatistics;
