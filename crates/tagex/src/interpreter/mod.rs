//! Chain resolution engine.
//!
//! This module binds parsed arguments against a handler registry and
//! evaluates them against per-call contexts: base lookups, member-operation
//! dispatch by value kind, static result-kind propagation, and the
//! fallback/placeholder failure policy with per-attempt diagnostics.

pub mod builtins;
mod context;
mod diagnostics;
mod error;
mod evaluator;
mod registry;
mod resolve;
mod typing;

pub use context::{CvarEntry, CvarLookup, EvalContext, VarLookup};
pub use diagnostics::{
    CollectingSink, DiagnosticsSink, NullSink, ResolutionEvent, Severity, Verbosity,
};
pub use error::{HandlerError, RegistryError, compute_suggestions};
pub use evaluator::{Resolution, eval_argument, evaluate};
pub use registry::{BaseFn, HandlerRegistry, MemberFn};
pub use resolve::{Binding, ResolvedArgument, ResolvedBit, ResolvedChain, ResolvedLink, resolve};
pub use typing::{literal_kind, propagate};
