//! Evaluation context: per-call state threaded through chain resolution.

use std::collections::HashMap;

use crate::interpreter::diagnostics::{DiagnosticsSink, ResolutionEvent, Verbosity};
use crate::types::Value;

/// Read-only capability over the active variable scope.
///
/// Supplied by the surrounding script engine; the `var` base operation is
/// implemented purely in terms of this.
pub trait VarLookup {
    fn lookup(&self, name: &str) -> Option<Value>;
}

impl VarLookup for HashMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// The textual, numeric, and boolean projections of one control variable.
#[derive(Debug, Clone, PartialEq)]
pub struct CvarEntry {
    pub text: String,
    pub number: i64,
    pub boolean: bool,
}

/// Read-only capability over the control-variable store.
pub trait CvarLookup {
    fn lookup(&self, name: &str) -> Option<CvarEntry>;
}

impl CvarLookup for HashMap<String, CvarEntry> {
    fn lookup(&self, name: &str) -> Option<CvarEntry> {
        self.get(name).cloned()
    }
}

/// Per-evaluation context: variable bindings, style token, verbosity, and
/// the diagnostics sink.
///
/// Contexts are short-lived: construct one per top-level evaluation (or
/// reuse one read-only between evaluations on the same thread). Two
/// evaluations against two separate contexts may run in parallel, even when
/// they share a variable snapshot.
pub struct EvalContext<'a> {
    /// Variable bindings from the caller's scope.
    vars: &'a dyn VarLookup,
    /// Control-variable store, if the embedder wires one in.
    cvars: Option<&'a dyn CvarLookup>,
    /// Base style/color token substituted into rendered messages.
    style: &'a str,
    /// Caller-selected diagnostic verbosity, forwarded in every event.
    verbosity: Verbosity,
    /// Where resolution attempts are reported.
    sink: &'a mut dyn DiagnosticsSink,
    /// Current parameter-recursion depth.
    depth: usize,
    /// Maximum allowed depth (default 64).
    max_depth: usize,
}

impl<'a> EvalContext<'a> {
    /// Create a context with default verbosity and no cvar store.
    pub fn new(vars: &'a dyn VarLookup, sink: &'a mut dyn DiagnosticsSink) -> Self {
        Self {
            vars,
            cvars: None,
            style: "",
            verbosity: Verbosity::default(),
            sink,
            depth: 0,
            max_depth: 64,
        }
    }

    /// Attach a control-variable store.
    pub fn with_cvars(mut self, cvars: &'a dyn CvarLookup) -> Self {
        self.cvars = Some(cvars);
        self
    }

    /// Set the base style token.
    pub fn with_style(mut self, style: &'a str) -> Self {
        self.style = style;
        self
    }

    /// Set the diagnostic verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set a custom depth limit for parameter recursion.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Look up a variable in the caller's scope.
    pub fn var(&self, name: &str) -> Option<Value> {
        self.vars.lookup(name)
    }

    /// Look up a control variable, if a store is attached.
    pub fn cvar(&self, name: &str) -> Option<CvarEntry> {
        self.cvars.and_then(|cvars| cvars.lookup(name))
    }

    /// The base style token.
    pub fn style(&self) -> &str {
        self.style
    }

    /// The caller-selected verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Forward a resolution event to the sink.
    pub fn report(&mut self, event: &ResolutionEvent) {
        self.sink.report(event);
    }

    /// Enter one level of parameter recursion. False when the limit is hit.
    pub(crate) fn descend(&mut self) -> bool {
        if self.depth >= self.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave one level of parameter recursion.
    pub(crate) fn ascend(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// Current parameter-recursion depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
