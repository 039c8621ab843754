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

//! # Money Numeric Trait
//!
//! Unified numeric bounds for monetary amounts. The solvers stay generic
//! over the integer type carrying currency units while requiring predictable
//! integer semantics (`PrimInt`, `Signed`) plus the constant traits the unit
//! increments rely on. `i64` is the canonical instantiation; `i128` is
//! intentionally excluded for performance reasons.

use grantflow_core::num::constants::{PlusOne, Zero};
use num_traits::{PrimInt, Signed};

/// A trait alias for integer types that can carry monetary amounts in the
/// solvers. These are usually the signed primitive integers `i8`, `i16`,
/// `i32`, `i64` and `isize`.
pub trait MoneyNumeric:
    PrimInt + Signed + Zero + PlusOne + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> MoneyNumeric for T where
    T: PrimInt + Signed + Zero + PlusOne + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
