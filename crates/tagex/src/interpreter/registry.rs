//! Handler registry: name-keyed base resolvers plus per-kind member
//! operations.
//!
//! The registry is built once at engine initialization and read-only
//! afterwards; it may be shared across concurrently evaluating chains
//! without locking, provided all registrations complete before any
//! evaluation begins.

use std::collections::BTreeMap;

use crate::interpreter::EvalContext;
use crate::interpreter::builtins;
use crate::interpreter::error::{HandlerError, RegistryError};
use crate::types::{Value, ValueKind};

/// Base resolver signature: resolves a chain's first link with no receiver.
pub type BaseFn = fn(&EvalContext<'_>, Option<&Value>) -> Result<Value, HandlerError>;

/// Member operation signature: applied to the previous link's result.
pub type MemberFn = fn(&EvalContext<'_>, &Value, Option<&Value>) -> Result<Value, HandlerError>;

#[derive(Clone, Copy)]
struct BaseEntry {
    return_kind: ValueKind,
    run: BaseFn,
}

#[derive(Clone, Copy)]
struct MemberEntry {
    return_kind: ValueKind,
    run: MemberFn,
}

/// Registry of base resolvers and per-value-kind member operations.
///
/// Names are folded to lowercase once, at registration; the parser folds
/// link keys the same way, so lookups never case-fold again. Registering a
/// duplicate name is a configuration error, fatal at startup.
#[derive(Default)]
pub struct HandlerRegistry {
    bases: BTreeMap<String, BaseEntry>,
    /// Member operations, keyed by receiver kind then operation name.
    members: BTreeMap<ValueKind, BTreeMap<String, MemberEntry>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the built-in operation set.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        builtins::install(&mut registry)?;
        Ok(registry)
    }

    /// Register a base resolver under `name`.
    pub fn register_base(
        &mut self,
        name: &str,
        return_kind: ValueKind,
        run: BaseFn,
    ) -> Result<(), RegistryError> {
        let name = name.to_lowercase();
        if self.bases.contains_key(&name) {
            return Err(RegistryError::DuplicateBase { name });
        }
        self.bases.insert(name, BaseEntry { return_kind, run });
        Ok(())
    }

    /// Register a member operation on `kind` under `name`.
    pub fn register_member(
        &mut self,
        kind: ValueKind,
        name: &str,
        return_kind: ValueKind,
        run: MemberFn,
    ) -> Result<(), RegistryError> {
        let name = name.to_lowercase();
        let table = self.members.entry(kind).or_default();
        if table.contains_key(&name) {
            return Err(RegistryError::DuplicateMember { kind, name });
        }
        table.insert(name, MemberEntry { return_kind, run });
        Ok(())
    }

    /// The resolver registered for a base key, if any.
    pub fn base_fn(&self, name: &str) -> Option<BaseFn> {
        self.bases.get(name).map(|entry| entry.run)
    }

    /// The declared return kind of a base, for the type propagator.
    pub fn base_return_kind(&self, name: &str) -> Option<ValueKind> {
        self.bases.get(name).map(|entry| entry.return_kind)
    }

    /// The operation registered on `kind` for a member key, if any.
    pub fn member_fn(&self, kind: ValueKind, name: &str) -> Option<MemberFn> {
        self.member(kind, name).map(|entry| entry.run)
    }

    /// The declared return kind of a member operation.
    pub fn member_return_kind(&self, kind: ValueKind, name: &str) -> Option<ValueKind> {
        self.member(kind, name).map(|entry| entry.return_kind)
    }

    /// All registered base names, sorted, for typo suggestions.
    pub fn base_names(&self) -> Vec<String> {
        self.bases.keys().cloned().collect()
    }

    /// All member names registered on `kind`, sorted, for typo suggestions.
    pub fn member_names(&self, kind: ValueKind) -> Vec<String> {
        self.members
            .get(&kind)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn member(&self, kind: ValueKind, name: &str) -> Option<&MemberEntry> {
        self.members.get(&kind).and_then(|table| table.get(name))
    }
}
