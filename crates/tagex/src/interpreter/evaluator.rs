//! Chain evaluation engine.
//!
//! Evaluation is total over any resolved argument: internal failures are
//! reported through the diagnostics sink and degrade to the chain's
//! declared fallback, or to a visible placeholder embedding the offending
//! key. One bad tag never aborts evaluation of its sibling bits.

use crate::interpreter::diagnostics::{ResolutionEvent, Severity};
use crate::interpreter::error::{HandlerError, compute_suggestions};
use crate::interpreter::resolve::{
    Binding, ResolvedArgument, ResolvedBit, ResolvedChain, ResolvedLink, resolve,
};
use crate::interpreter::{EvalContext, HandlerRegistry};
use crate::parser::{Argument, escape};
use crate::types::{Value, ValueKind};

/// The outcome of running one chain.
///
/// This is the evaluator's failure channel: no exceptions, no early exit,
/// just explicit arms the fallback/placeholder policy matches over.
#[derive(Debug)]
pub enum Resolution {
    /// Every link resolved; the final receiver is the chain's value.
    Resolved(Value),
    /// A link's key had no handler at its position. For member links the
    /// receiver kind that was searched is carried for diagnostics.
    Unresolved {
        key: String,
        receiver: Option<ValueKind>,
    },
    /// A handler itself faulted while resolving a link.
    Faulted { key: String, cause: HandlerError },
}

/// Parse-free convenience: bind and evaluate an argument in one call.
pub fn eval_argument(
    argument: &Argument,
    ctx: &mut EvalContext<'_>,
    registry: &HandlerRegistry,
) -> Value {
    evaluate(&resolve(argument, registry), ctx, registry)
}

/// Evaluate a resolved argument against a context.
///
/// A multi-bit argument concatenates each bit's textual rendering. A
/// single-bit argument returns that bit's native value unconverted, so a
/// one-tag parameter preserves its kind (a list stays a list) instead of
/// being forced to text.
pub fn evaluate(
    argument: &ResolvedArgument,
    ctx: &mut EvalContext<'_>,
    registry: &HandlerRegistry,
) -> Value {
    if let Some(literal) = &argument.literal {
        return literal.clone();
    }
    match argument.bits.as_slice() {
        [] => Value::Text(String::new()),
        [bit] => eval_bit(bit, ctx, registry),
        bits => {
            let mut output = String::new();
            for bit in bits {
                match bit {
                    ResolvedBit::Text(text) => output.push_str(text),
                    ResolvedBit::Chain(chain) => {
                        output.push_str(&eval_chain(chain, ctx, registry).to_string());
                    }
                }
            }
            Value::Text(output)
        }
    }
}

fn eval_bit(bit: &ResolvedBit, ctx: &mut EvalContext<'_>, registry: &HandlerRegistry) -> Value {
    match bit {
        ResolvedBit::Text(text) => Value::Text(text.clone()),
        ResolvedBit::Chain(chain) => eval_chain(chain, ctx, registry),
    }
}

/// Run one chain, report the attempt, and apply the failure policy.
fn eval_chain(
    chain: &ResolvedChain,
    ctx: &mut EvalContext<'_>,
    registry: &HandlerRegistry,
) -> Value {
    match run_chain(chain, ctx, registry) {
        Resolution::Resolved(value) => {
            let event = ResolutionEvent::builder()
                .severity(Severity::Success)
                .chain(chain.source.clone())
                .resolved(value.to_string())
                .verbosity(ctx.verbosity())
                .style(ctx.style().to_string())
                .build();
            ctx.report(&event);
            value
        }
        Resolution::Unresolved { key, receiver } => {
            // Suggest near misses from the table that was searched: the
            // base table for a first-link miss, the receiver kind's member
            // table otherwise.
            let pool = match receiver {
                Some(kind) => registry.member_names(kind),
                None => registry.base_names(),
            };
            report_failure(chain, ctx, compute_suggestions(&key, &pool));
            fail_over(chain, &key, ctx, registry)
        }
        Resolution::Faulted { key, .. } => {
            report_failure(chain, ctx, Vec::new());
            fail_over(chain, &key, ctx, registry)
        }
    }
}

fn report_failure(chain: &ResolvedChain, ctx: &mut EvalContext<'_>, suggestions: Vec<String>) {
    let event = ResolutionEvent::builder()
        .severity(Severity::Failure)
        .chain(chain.source.clone())
        .verbosity(ctx.verbosity())
        .style(ctx.style().to_string())
        .suggestions(suggestions)
        .build();
    ctx.report(&event);
}

/// The failure policy: evaluate the declared fallback if there is one,
/// otherwise produce a placeholder embedding the offending key. The
/// placeholder's delimiters are escaped so re-parsing the output cannot
/// re-interpret it as a live tag.
fn fail_over(
    chain: &ResolvedChain,
    key: &str,
    ctx: &mut EvalContext<'_>,
    registry: &HandlerRegistry,
) -> Value {
    match &chain.fallback {
        Some(fallback) => evaluate(fallback, ctx, registry),
        None => Value::Text(escape(&format!("<{{{key}}}>"))),
    }
}

/// Resolve a chain link by link, threading each result into the next.
fn run_chain(
    chain: &ResolvedChain,
    ctx: &mut EvalContext<'_>,
    registry: &HandlerRegistry,
) -> Resolution {
    let Some((first, rest)) = chain.links.split_first() else {
        return Resolution::Unresolved {
            key: String::new(),
            receiver: None,
        };
    };

    let mut receiver = match &first.binding {
        Binding::Base(run) => {
            let parameter = match eval_parameter(first, ctx, registry) {
                Ok(parameter) => parameter,
                Err(cause) => {
                    return Resolution::Faulted {
                        key: first.key.clone(),
                        cause,
                    };
                }
            };
            match run(ctx, parameter.as_ref()) {
                Ok(value) => value,
                Err(cause) => {
                    return Resolution::Faulted {
                        key: first.key.clone(),
                        cause,
                    };
                }
            }
        }
        Binding::UnboundBase | Binding::Member { .. } => {
            return Resolution::Unresolved {
                key: first.key.clone(),
                receiver: None,
            };
        }
    };

    for link in rest {
        let run = match &link.binding {
            Binding::Member {
                predicted: Some((kind, run)),
            } if *kind == receiver.kind() => *run,
            _ => match registry.member_fn(receiver.kind(), &link.key) {
                Some(run) => run,
                None => {
                    return Resolution::Unresolved {
                        key: link.key.clone(),
                        receiver: Some(receiver.kind()),
                    };
                }
            },
        };

        let parameter = match eval_parameter(link, ctx, registry) {
            Ok(parameter) => parameter,
            Err(cause) => {
                return Resolution::Faulted {
                    key: link.key.clone(),
                    cause,
                };
            }
        };
        receiver = match run(ctx, &receiver, parameter.as_ref()) {
            Ok(value) => value,
            Err(cause) => {
                return Resolution::Faulted {
                    key: link.key.clone(),
                    cause,
                };
            }
        };
    }

    Resolution::Resolved(receiver)
}

/// Evaluate a link's parameter under the depth guard.
fn eval_parameter(
    link: &ResolvedLink,
    ctx: &mut EvalContext<'_>,
    registry: &HandlerRegistry,
) -> Result<Option<Value>, HandlerError> {
    let Some(parameter) = &link.parameter else {
        return Ok(None);
    };
    if !ctx.descend() {
        return Err(HandlerError::DepthExceeded);
    }
    let value = evaluate(parameter, ctx, registry);
    ctx.ascend();
    Ok(Some(value))
}
