//! Diagnostics sink: per-attempt resolution reporting.
//!
//! The evaluator reports every resolution attempt, successful or failed.
//! The sink decides whether to actually emit anything; the event carries
//! the verbosity the caller selected so filtering (and any rate limiting)
//! stays entirely on the sink side.

use bon::Builder;

/// How chatty resolution reporting should be.
///
/// `Quiet` sinks typically drop everything, `Normal` ones keep failures,
/// `Verbose` ones also keep per-chain success reports. The core never
/// filters; it only forwards this threshold inside each event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Whether a resolution attempt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Failure,
}

/// One resolution attempt, as handed to the sink.
#[derive(Debug, Clone, Builder)]
pub struct ResolutionEvent {
    /// Success or failure.
    pub severity: Severity,

    /// The original chain text, rendered back from the parse tree.
    pub chain: String,

    /// The resolved textual form. Present on success only.
    pub resolved: Option<String>,

    /// The verbosity the caller selected for this evaluation.
    pub verbosity: Verbosity,

    /// The caller's base style token, for sinks that substitute it into
    /// rendered messages.
    #[builder(default)]
    pub style: String,

    /// Registered names close to the unresolved key, closest first.
    /// Empty on success and for faults with a known key.
    #[builder(default)]
    pub suggestions: Vec<String>,
}

/// Receives resolution events from the evaluator.
pub trait DiagnosticsSink {
    fn report(&mut self, event: &ResolutionEvent);
}

/// A sink that drops every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn report(&mut self, _event: &ResolutionEvent) {}
}

/// A sink that keeps every event, for tests and tooling.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<ResolutionEvent>,
}

impl CollectingSink {
    /// Create an empty collecting sink.
    pub fn new() -> CollectingSink {
        CollectingSink::default()
    }

    /// Count collected events of the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.events.iter().filter(|e| e.severity == severity).count()
    }
}

impl DiagnosticsSink for CollectingSink {
    fn report(&mut self, event: &ResolutionEvent) {
        self.events.push(event.clone());
    }
}
