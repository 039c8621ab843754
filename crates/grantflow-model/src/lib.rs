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

//! # Grantflow Model
//!
//! **The Core Domain Model for the Grantflow Allocation Solvers.**
//!
//! This crate defines the data records the solvers operate on: restricted-use
//! donations and the projects they may fund. It is the data interchange layer
//! between problem definition (caller input) and the solving engines
//! (`grantflow-dfs`, `grantflow-aug`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed identities (`DonationId`, `ProjectId`) and
//!   dense solver positions (`DonationIndex`, `ProjectIndex`). The two spaces
//!   are distinct on purpose: identities are fixed at record creation and key
//!   allocation maps; positions are slice offsets the solvers iterate over.
//! * **`donation`**: A fixed sum of money restricted to a known set of
//!   eligible projects, with a mutable unspent balance.
//! * **`project`**: A funding target accumulating donation-keyed allocations,
//!   including the relay (`transfer`) operation that moves already-allocated
//!   money between projects without changing its recorded source.
//! * **`validate`**: Fail-fast precondition checks for solver entry.
//!
//! ## Design Philosophy
//!
//! 1. **Type Safety**: a `DonationId` cannot be used where a `ProjectId` is
//!    expected, and neither can stand in for a slice position.
//! 2. **Source Fidelity**: allocation maps are always keyed by the
//!    originating donation. Relaying money between projects re-keys entries
//!    unchanged; no project ever appears as a source of funds.
//! 3. **Fail-Fast**: constructors and mutators validate eagerly so the
//!    solvers never encounter an invalid ledger.

pub mod donation;
pub mod index;
pub mod project;
pub mod validate;

pub use donation::Donation;
pub use index::{DonationId, DonationIndex, ProjectId, ProjectIndex};
pub use project::Project;
pub use validate::{validate_inputs, PreconditionError};
