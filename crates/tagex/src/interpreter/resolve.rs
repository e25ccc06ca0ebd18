//! Binding phase: turn a parsed argument into a resolved one.
//!
//! `resolve` walks the argument tree once against the registry, binding
//! every chain link to a concrete operation reference and caching the
//! literal fast path. The result is an explicit, inspectable intermediate
//! value; evaluation of it is repeatable and never touches the parse tree
//! again.

use crate::interpreter::registry::{BaseFn, HandlerRegistry, MemberFn};
use crate::interpreter::typing;
use crate::parser::{Argument, ArgumentBit, Link};
use crate::types::{Value, ValueKind};

/// An argument with every chain bound against a registry.
#[derive(Clone)]
pub struct ResolvedArgument {
    pub bits: Vec<ResolvedBit>,
    /// Statically propagated result kind.
    pub kind: ValueKind,
    /// Pre-parsed value for single-literal arguments: evaluation returns
    /// this clone directly, skipping any re-parse of `true`/numeric text.
    pub literal: Option<Value>,
}

/// One bound bit: literal text or a bound chain.
#[derive(Clone)]
pub enum ResolvedBit {
    Text(String),
    Chain(ResolvedChain),
}

/// A chain with per-link bindings and a pre-rendered source form.
#[derive(Clone)]
pub struct ResolvedChain {
    pub links: Vec<ResolvedLink>,
    pub fallback: Option<ResolvedArgument>,
    /// The original chain text, for diagnostics.
    pub source: String,
}

/// One bound link.
#[derive(Clone)]
pub struct ResolvedLink {
    pub key: String,
    pub parameter: Option<ResolvedArgument>,
    pub binding: Binding,
}

/// How a link resolved against the registry.
#[derive(Clone)]
pub enum Binding {
    /// First link, bound to its base resolver.
    Base(BaseFn),
    /// First link with no registered base. Evaluation degrades to the
    /// chain's fallback or a placeholder.
    UnboundBase,
    /// Later link. The prediction pairs the statically propagated receiver
    /// kind with the operation registered on it; when the runtime receiver
    /// has a different kind, evaluation re-looks the key up by that kind.
    Member {
        predicted: Option<(ValueKind, MemberFn)>,
    },
}

/// Bind an argument against a registry.
pub fn resolve(argument: &Argument, registry: &HandlerRegistry) -> ResolvedArgument {
    let bits = argument
        .bits
        .iter()
        .map(|bit| resolve_bit(bit, registry))
        .collect();
    let literal = argument.single_text().map(typing::literal_value);
    ResolvedArgument {
        bits,
        kind: typing::propagate(argument, registry),
        literal,
    }
}

fn resolve_bit(bit: &ArgumentBit, registry: &HandlerRegistry) -> ResolvedBit {
    match bit {
        ArgumentBit::Text(text) => ResolvedBit::Text(text.clone()),
        ArgumentBit::Chain { links, fallback } => ResolvedBit::Chain(ResolvedChain {
            links: resolve_links(links, registry),
            fallback: fallback.as_ref().map(|arg| resolve(arg, registry)),
            source: bit.to_string(),
        }),
    }
}

fn resolve_links(links: &[Link], registry: &HandlerRegistry) -> Vec<ResolvedLink> {
    let mut resolved = Vec::with_capacity(links.len());
    let mut kind: Option<ValueKind> = None;

    for (position, link) in links.iter().enumerate() {
        let binding = if position == 0 {
            match registry.base_fn(&link.key) {
                Some(run) => {
                    kind = registry.base_return_kind(&link.key);
                    Binding::Base(run)
                }
                None => Binding::UnboundBase,
            }
        } else {
            let predicted = kind.and_then(|k| {
                registry
                    .member_fn(k, &link.key)
                    .map(|run| (k, run))
            });
            kind = kind.and_then(|k| registry.member_return_kind(k, &link.key));
            Binding::Member { predicted }
        };

        resolved.push(ResolvedLink {
            key: link.key.clone(),
            parameter: link
                .parameter
                .as_ref()
                .map(|arg| resolve(arg, registry)),
            binding,
        });
    }

    resolved
}
