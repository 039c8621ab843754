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

//! # Grantflow Solver
//!
//! The public entry point for deciding whether a collection of
//! restricted-use donations can fully fund a collection of projects.
//!
//! Two engines implement the same contract: the exhaustive backtracking
//! search (`grantflow-dfs`, the reference) and the path-augmenting flow
//! method (`grantflow-aug`). This crate selects between them, validates the
//! entry preconditions, wires up monitors (step budget, tracing), and
//! exposes both the rich [`Solver`] API and the plain boolean
//! [`can_allocate`] contract.
//!
//! ```rust
//! use grantflow_model::{Donation, DonationId, Project, ProjectId};
//! use grantflow_solver::can_allocate;
//!
//! let mut donations = vec![Donation::<i64>::new(
//!     DonationId::new(0),
//!     10,
//!     [ProjectId::new(0)],
//! )];
//! let mut projects = vec![Project::<i64>::new(ProjectId::new(0), 10)];
//!
//! assert!(can_allocate(&mut donations, &mut projects));
//! assert!(projects[0].fully_funded());
//! ```

pub mod solver;

pub use grantflow_model::{
    validate_inputs, Donation, DonationId, PreconditionError, Project, ProjectId,
};
pub use grantflow_search::result::{SolveResult, TerminationReason};
pub use solver::{can_allocate, SolveReport, SolveStatistics, Solver, SolverBuilder, Strategy};
