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

use grantflow_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for donation identities.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DonationIdTag;

impl TypedIndexTag for DonationIdTag {
    const NAME: &'static str = "DonationId";
}

/// The identity of a donation, fixed at creation. Keys allocation maps.
pub type DonationId = TypedIndex<DonationIdTag>;

/// A tag type for project identities.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ProjectIdTag;

impl TypedIndexTag for ProjectIdTag {
    const NAME: &'static str = "ProjectId";
}

/// The identity of a project, fixed at creation. Indexes eligibility sets.
pub type ProjectId = TypedIndex<ProjectIdTag>;

/// A tag type for donation positions in the caller's ordered sequence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DonationIndexTag;

impl TypedIndexTag for DonationIndexTag {
    const NAME: &'static str = "DonationIndex";
}

/// A dense position into the donations slice handed to a solver.
pub type DonationIndex = TypedIndex<DonationIndexTag>;

/// A tag type for project positions in the caller's slice.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ProjectIndexTag;

impl TypedIndexTag for ProjectIndexTag {
    const NAME: &'static str = "ProjectIndex";
}

/// A dense position into the projects slice handed to a solver.
pub type ProjectIndex = TypedIndex<ProjectIndexTag>;
