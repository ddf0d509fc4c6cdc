//! The interpreter protocol: resolving effect requests and stacking
//! independently-authored handlers.
//!
//! An interpreter for one effect family implements three things:
//!
//! - [`Interpreter::handle_pure`]: what the final answer looks like when
//!   the computation finished without further requests from this family;
//! - [`Interpreter::handle_effect`]: resolve a recognized tag and hand its
//!   result to the pending continuation, or report the request unhandled;
//! - [`Interpreter::run`] (provided): the driving step that dispatches on
//!   the two computation variants and forwards unhandled requests outward.
//!
//! Forwarding re-emits the *same* unresolved tag above an adapter that
//! re-enters this interpreter once an outer one has supplied the result.
//! Interpreters therefore stack without knowing about each other's tags:
//! layering is keyed by effect identity, not by nesting order.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::marker::PhantomData;

use super::eff::{Eff, EffInner};
use super::queue::{AnyValue, Queue};
use super::tag::{EffectTag, Effects, TypedTag};

/// A computation suspended on one named effect request.
///
/// Holds the request's tag and the queue of continuations that still runs
/// once the tag's result is supplied. Obtained by an interpreter's
/// [`handle_effect`](Interpreter::handle_effect); consumed either by
/// [`extract`](Continuation::extract) (the tag is recognized) or by
/// [`forward`](Continuation::forward) (it belongs to an outer family).
pub struct Continuation<E: Effects, A: 'static> {
    tag: Box<dyn EffectTag>,
    queue: Queue<E>,
    _result: PhantomData<fn() -> A>,
}

impl<E: Effects, A: 'static> Continuation<E, A> {
    pub(crate) fn new(tag: Box<dyn EffectTag>, queue: Queue<E>) -> Self {
        Self {
            tag,
            queue,
            _result: PhantomData,
        }
    }

    /// The pending request's tag, for inspection and diagnostics.
    #[must_use]
    pub fn tag(&self) -> &dyn EffectTag {
        &*self.tag
    }

    /// Attempts to recognize the pending request as a `G`.
    ///
    /// On a match, returns the tag (payload included) together with a
    /// [`Resumption`] that accepts exactly a `G::Result`. Otherwise the
    /// continuation is handed back untouched for forwarding.
    ///
    /// # Errors
    ///
    /// Returns the unchanged continuation when the tag is not a `G`.
    pub fn extract<G: TypedTag>(self) -> Result<(G, Resumption<E, A, G>), Self> {
        let Self {
            tag,
            queue,
            _result,
        } = self;

        let tag_ref: &dyn Any = &*tag;
        if tag_ref.is::<G>() {
            let boxed: Box<dyn Any> = tag;
            match boxed.downcast::<G>() {
                Ok(tag) => Ok((
                    *tag,
                    Resumption {
                        queue,
                        _marker: PhantomData,
                    },
                )),
                Err(_) => unreachable!("tag type was checked before downcasting"),
            }
        } else {
            Err(Self {
                tag,
                queue,
                _result,
            })
        }
    }

    /// Re-emits the same unresolved request, arranging for `handler` to
    /// continue interpreting whatever the pending queue produces once an
    /// outer interpreter supplies the result.
    pub fn forward<B, H>(self, handler: H) -> Eff<E, B>
    where
        B: 'static,
        H: FnOnce(Eff<E, A>) -> Eff<E, B> + 'static,
    {
        let Self { tag, queue, .. } = self;
        let adapter = Queue::adapt(move |input: AnyValue| {
            let remainder = Eff::<E, A>::from_erased(queue.apply(input));
            handler(remainder).erase()
        });
        Eff::cont(tag, adapter)
    }
}

impl<E: Effects, A: 'static> fmt::Debug for Continuation<E, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Continuation")
            .field("tag", &self.tag)
            .field("queue", &self.queue)
            .finish()
    }
}

/// The pending remainder of a computation whose request was recognized as
/// tag type `G`; accepts the one result type bound to `G`.
pub struct Resumption<E: Effects, A: 'static, G: TypedTag> {
    queue: Queue<E>,
    _marker: PhantomData<fn(G) -> A>,
}

impl<E: Effects, A: 'static, G: TypedTag> Resumption<E, A, G> {
    /// Supplies the tag's result and runs the pending continuations up to
    /// the next suspension or to completion.
    pub fn resume(self, result: G::Result) -> Eff<E, A> {
        Eff::from_erased(self.queue.apply(Box::new(result)))
    }
}

/// The outcome of one [`Interpreter::handle_effect`] step.
pub enum Handled<I, E, A>
where
    I: Interpreter<E, A>,
    E: Effects,
    A: 'static,
{
    /// The tag belonged to this interpreter's family and was resolved.
    Resolved(Eff<E, I::Output>),
    /// The tag belongs to another family; interpreter and continuation are
    /// handed back so the driving step can forward the request outward.
    Unhandled(I, Continuation<E, A>),
}

/// A handler for one effect family.
///
/// State-carrying interpreters own an immutable state value and construct
/// a *new* interpreter for each resolved step rather than mutating in
/// place; the state is exclusively owned by the `run` call driving the
/// evaluation.
///
/// Each resolved effect occurrence re-enters `run` once, so the call depth
/// of an interpreter is bounded by the number of requests it resolves.
/// Pure bind chains cost no interpreter recursion at all.
pub trait Interpreter<E: Effects, A: 'static>: Sized + 'static {
    /// The shape of the final answer, possibly wrapping the computation's
    /// value with carried state (e.g. a value/log or value/state pair).
    type Output: 'static;

    /// Wraps a finished value into the final answer.
    fn handle_pure(self, value: A) -> Self::Output;

    /// Resolves the request if its tag belongs to this family.
    fn handle_effect(self, continuation: Continuation<E, A>) -> Handled<Self, E, A>;

    /// Drives the computation: wraps `Pure`, dispatches `Cont`, and
    /// forwards anything this family does not recognize.
    fn run(self, computation: Eff<E, A>) -> Eff<E, Self::Output> {
        match computation.into_inner() {
            EffInner::Pure(value) => Eff::pure(self.handle_pure(value)),
            EffInner::Cont(tag, queue) => {
                match self.handle_effect(Continuation::new(tag, queue)) {
                    Handled::Resolved(resolved) => resolved,
                    Handled::Unhandled(interpreter, continuation) => {
                        continuation.forward(move |remainder| interpreter.run(remainder))
                    }
                }
            }
        }
    }
}

/// Evaluation ended with an effect request that no interpreter resolved.
///
/// This signals a missing interpreter in the composed stack, a programming
/// error rather than a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledEffect {
    tag: &'static str,
}

impl UnhandledEffect {
    /// The diagnostic name of the unresolved tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }
}

impl fmt::Display for UnhandledEffect {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unhandled effect {}: no interpreter in the stack resolves it",
            self.tag
        )
    }
}

impl Error for UnhandledEffect {}

/// Extracts the final value of a fully-interpreted computation.
///
/// # Errors
///
/// Returns [`UnhandledEffect`] if a request remains, naming its tag.
pub fn try_run_pure<E: Effects, T: 'static>(computation: Eff<E, T>) -> Result<T, UnhandledEffect> {
    match computation.into_inner() {
        EffInner::Pure(value) => Ok(value),
        EffInner::Cont(tag, _) => Err(UnhandledEffect { tag: tag.name() }),
    }
}

/// Extracts the final value of a fully-interpreted computation.
///
/// # Panics
///
/// Panics if a request remains: a missing interpreter is a contract
/// violation, not a recoverable error.
pub fn run_pure_or_fail<E: Effects, T: 'static>(computation: Eff<E, T>) -> T {
    match try_run_pure(computation) {
        Ok(value) => value,
        Err(error) => panic!("{error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::tag::NoEffects;
    use rstest::rstest;

    struct Probe;

    impl EffectTag for Probe {
        fn name(&self) -> &'static str {
            "Probe"
        }
    }

    impl TypedTag for Probe {
        type Result = i32;
    }

    struct Fx;

    impl Effects for Fx {}

    #[rstest]
    fn try_run_pure_returns_the_value() {
        let computation: Eff<NoEffects, i32> = Eff::pure(42);
        assert_eq!(try_run_pure(computation), Ok(42));
    }

    #[rstest]
    fn try_run_pure_reports_the_unresolved_tag() {
        let computation: Eff<Fx, i32> = Eff::inject(Probe);
        let error = try_run_pure(computation).expect_err("request must remain");
        assert_eq!(error.tag(), "Probe");
        assert_eq!(
            error.to_string(),
            "unhandled effect Probe: no interpreter in the stack resolves it"
        );
    }

    #[rstest]
    #[should_panic(expected = "unhandled effect Probe")]
    fn run_pure_or_fail_panics_on_a_remaining_request() {
        let computation: Eff<Fx, i32> = Eff::inject(Probe);
        run_pure_or_fail(computation);
    }

    #[rstest]
    fn extract_recognizes_the_concrete_tag_type() {
        let computation: Eff<Fx, i32> = Eff::inject(Probe);
        let EffInner::Cont(tag, queue) = computation.into_inner() else {
            panic!("expected a pending request");
        };
        let continuation: Continuation<Fx, i32> = Continuation::new(tag, queue);

        let (_probe, resumption) = continuation
            .extract::<Probe>()
            .unwrap_or_else(|_| panic!("tag must match"));
        assert_eq!(run_pure_or_fail(resumption.resume(41).map(|x| x + 1)), 42);
    }

    #[rstest]
    fn extract_hands_back_a_foreign_tag() {
        struct Other;

        impl EffectTag for Other {
            fn name(&self) -> &'static str {
                "Other"
            }
        }

        impl TypedTag for Other {
            type Result = ();
        }

        let computation: Eff<Fx, i32> = Eff::inject(Probe);
        let EffInner::Cont(tag, queue) = computation.into_inner() else {
            panic!("expected a pending request");
        };
        let continuation: Continuation<Fx, i32> = Continuation::new(tag, queue);

        let continuation = match continuation.extract::<Other>() {
            Ok(_) => panic!("foreign tag must not match"),
            Err(continuation) => continuation,
        };
        assert_eq!(continuation.tag().name(), "Probe");
    }
}
