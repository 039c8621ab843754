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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};

/// A composite monitor that aggregates multiple monitors and forwards events
/// to all of them. The first `Terminate` command among the children wins.
#[derive(Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        f.debug_struct("CompositeMonitor")
            .field("monitors", &monitors_str)
            .finish()
    }
}

impl std::fmt::Display for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        write!(f, "CompositeMonitor([{}])", monitors_str)
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor to the composite.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Returns the number of aggregated monitors.
    #[inline]
    pub fn num_monitors(&self) -> usize {
        self.monitors.len()
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search();
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    #[inline]
    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}
