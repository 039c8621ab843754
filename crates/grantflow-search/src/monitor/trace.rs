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

//! # Trace Monitor
//!
//! Structured observability for a running solve via `tracing`. The solvers
//! themselves contain no logging; attaching this monitor is how a caller
//! watches search progress without touching the algorithms.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMonitor {
    steps: u64,
}

impl TraceMonitor {
    /// Creates a new `TraceMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self { steps: 0 }
    }
}

impl Default for TraceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchMonitor for TraceMonitor {
    fn name(&self) -> &str {
        "TraceMonitor"
    }

    fn on_enter_search(&mut self) {
        self.steps = 0;
        tracing::debug!("search started");
    }

    fn on_exit_search(&mut self) {
        tracing::debug!(steps = self.steps, "search finished");
    }

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
