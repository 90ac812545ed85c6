//! Capture and report statistics for a run

use std::{fmt::Display, time::Duration};

use indexmap::IndexMap;

#[derive(Default, Debug)]
pub struct Timings {
    timings: IndexMap<String, Duration>,
}

impl Timings {
    pub fn record<T: AsRef<str>>(&mut self, name: T, elapsed: Duration) {
        self.timings.insert(name.as_ref().to_string(), elapsed);
    }

    pub fn merge(&mut self, other: Timings) {
        self.timings.extend(other.timings);
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }
}

impl Display for Timings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.timings.keys().map(|k| k.len()).max().unwrap_or(0) + 1;

        for (k, v) in &self.timings {
            writeln!(f, "{:width$}: {:14.9}s", k, v.as_secs_f64(), width = width)?;
        }
        Ok(())
    }
}

/// The statistics captured during a run
#[derive(Default, Debug)]
pub struct Statistics {
    modules: u64,
    fragments: u64,
    timings: Timings,
}

impl Statistics {
    /// Count one translated module of `fragments` top-level fragments
    pub fn add_module(&mut self, fragments: usize) {
        self.modules += 1;
        self.fragments += fragments as u64;
    }

    pub fn modules(&self) -> u64 {
        self.modules
    }

    pub fn timings_mut(&mut self) -> &mut Timings {
        &mut self.timings
    }

    pub fn merge(&mut self, other: Statistics) {
        self.modules += other.modules;
        self.fragments += other.fragments;
        self.timings.merge(other.timings);
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Modules   : {:10}", self.modules)?;
        writeln!(f, "Fragments : {:10}", self.fragments)?;
        if !self.timings.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.timings)?;
        }
        Ok(())
    }
}
