// Licensed under the Apache-2.0 license

//! Diagnostic sinks.
//!
//! Recoverable description problems (bad literals, unknown register types)
//! are handed to a caller-supplied [`Reporter`] instead of being printed.

use log::warn;

use crate::error::GeneratorError;

/// Receives problems that generation recovered from.
pub trait Reporter {
    fn report(&mut self, error: &GeneratorError);
}

/// Forwards diagnostics to the `log` facade at warning level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, error: &GeneratorError) {
        warn!("{error}");
    }
}

/// Keeps the rendered diagnostics in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectingReporter {
    pub messages: Vec<String>,
}

impl Reporter for CollectingReporter {
    fn report(&mut self, error: &GeneratorError) {
        self.messages.push(error.to_string());
    }
}
