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

//! # Step Limit Monitor
//!
//! Both solvers are exponential in the worst case. This monitor caps the
//! number of search steps and requests termination once the budget is spent,
//! turning a pathological instance into a distinct "search exhausted"
//! outcome instead of a hang. An aborted search proves nothing: the solvers
//! report `Unknown`, never `Infeasible`, after a step-limit termination.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLimitMonitor {
    step_limit: u64,
    steps: u64,
}

impl StepLimitMonitor {
    /// Creates a monitor that terminates the search after `step_limit` steps.
    #[inline]
    pub fn new(step_limit: u64) -> Self {
        Self {
            step_limit,
            steps: 0,
        }
    }

    /// Returns the number of steps observed so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl SearchMonitor for StepLimitMonitor {
    fn name(&self) -> &str {
        "StepLimitMonitor"
    }

    fn on_enter_search(&mut self) {
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.steps >= self.step_limit {
            return SearchCommand::Terminate("step limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
