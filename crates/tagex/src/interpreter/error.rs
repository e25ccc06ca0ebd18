//! Error types for registration and handler execution.

use thiserror::Error;

use crate::types::ValueKind;

/// A configuration error raised while populating a handler registry.
///
/// Duplicate registration is fatal at startup, never at evaluation time:
/// the registry refuses the second registration instead of silently
/// overwriting the first.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A base handler name was registered twice.
    #[error("base handler '{name}' is already registered")]
    DuplicateBase { name: String },

    /// A member operation was registered twice for the same value kind.
    #[error("member operation '{name}' is already registered for {kind} values")]
    DuplicateMember { kind: ValueKind, name: String },
}

/// A fault raised by a handler while resolving a link.
///
/// Handler faults never propagate past the evaluator: they are reported as
/// failure diagnostics and degrade to the chain's fallback or a visible
/// placeholder, exactly like an unresolved key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The operation requires a parameter and none was given.
    #[error("operation '{name}' requires a parameter")]
    MissingParameter { name: String },

    /// The parameter could not be interpreted by the operation.
    #[error("bad parameter for '{name}': {message}")]
    BadParameter { name: String, message: String },

    /// A variable lookup found no binding.
    #[error("variable '{name}' is not defined")]
    UnknownVariable { name: String },

    /// Parameter evaluation recursed past the context's depth limit.
    #[error("maximum evaluation depth exceeded")]
    DepthExceeded,

    /// Any other handler-specific fault.
    #[error("{message}")]
    Other { message: String },
}

impl HandlerError {
    /// Build an [`HandlerError::Other`] from any displayable cause.
    pub fn other(message: impl Into<String>) -> HandlerError {
        HandlerError::Other {
            message: message.into(),
        }
    }
}

/// Compute "did you mean" suggestions for an unresolved key.
///
/// Returns up to 3 registered names within a small edit distance of `key`,
/// closest first. Keys of three characters or fewer only match at distance
/// one to avoid noise.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = strsim::levenshtein(key, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
