//! Coroutine effect: suspendable computations driven by their caller.
//!
//! `yield_value` suspends the evaluation and hands control back to the
//! caller of the run together with the yielded value and a one-shot
//! resumption. Calling the resumption re-enters the driver with the
//! request resolved and runs until the next suspension or completion.
//! This is a pull-based, cooperative iteration contract: the only control
//! a caller has over a suspended computation is to stop resuming it.
//!
//! Resuming consumes the suspension, so resuming the same point twice is
//! unrepresentable; resuming an already-completed result is a contract
//! violation and panics.
//!
//! The coroutine interpreter must be the innermost remaining stage when a
//! resumption is invoked: resuming evaluates the continuation to a final
//! result, so any other unresolved family at that point is an
//! unhandled-effect violation.
//!
//! # Examples
//!
//! ```rust
//! use effree::effect::{Coroutine, CoroutineResult, Eff, Effects, run_coroutine, run_pure_or_fail};
//!
//! struct Steps;
//! impl Effects for Steps {}
//! impl Coroutine<i32, i32> for Steps {}
//!
//! let computation = Steps::yield_value(1)
//!     .flat_map(|echo| Steps::yield_value(echo + 1))
//!     .map(|_| "done");
//!
//! let mut result = run_pure_or_fail(run_coroutine(computation));
//! assert_eq!(result.yielded(), Some(&1));
//!
//! result = result.resume(10); // echoed into the next yield
//! assert_eq!(result.yielded(), Some(&11));
//!
//! result = result.resume(0);
//! assert_eq!(result.into_done(), Some("done"));
//! ```

use static_assertions::assert_impl_all;
use std::fmt;
use std::marker::PhantomData;

use super::eff::Eff;
use super::interpreter::{Continuation, Handled, Interpreter, run_pure_or_fail};
use super::tag::{EffectTag, Effects, TypedTag};

/// Capability: computations over `Self` may yield values of type `Y` and
/// are resumed with values of type `R`.
pub trait Coroutine<Y: 'static, R: 'static>: Effects + Sized {
    /// Suspends the computation, reporting `output` to the caller of the
    /// run; evaluates to the value the caller resumes with.
    #[must_use]
    fn yield_value(output: Y) -> Eff<Self, R> {
        Eff::inject(Yield {
            output,
            _resume: PhantomData,
        })
    }
}

/// Effect tag for [`Coroutine::yield_value`]; resolves to the resumption
/// value supplied by the caller.
pub struct Yield<Y, R> {
    /// The value reported to the caller.
    pub output: Y,
    _resume: PhantomData<fn(R) -> R>,
}

impl<Y: 'static, R: 'static> EffectTag for Yield<Y, R> {
    fn name(&self) -> &'static str {
        "Yield"
    }
}

impl<Y: 'static, R: 'static> TypedTag for Yield<Y, R> {
    type Result = R;
}

assert_impl_all!(Yield<i32, ()>: EffectTag, TypedTag);

/// A one-shot resumption of a suspended coroutine.
///
/// Invoking it consumes the suspension, enforcing at-most-once resumption
/// by ownership.
pub struct Resume<Y, R, T> {
    resume: Box<dyn FnOnce(R) -> CoroutineResult<Y, R, T>>,
}

impl<Y, R, T> Resume<Y, R, T> {
    /// Re-enters the driver with the yield resolved to `value` and runs
    /// until the next suspension or completion.
    #[must_use]
    pub fn invoke(self, value: R) -> CoroutineResult<Y, R, T> {
        (self.resume)(value)
    }
}

impl<Y, R, T> fmt::Debug for Resume<Y, R, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Resume")
    }
}

/// The observable state of a coroutine run: completed, or suspended on a
/// yielded value with a one-shot resumption.
#[derive(Debug)]
pub enum CoroutineResult<Y, R, T> {
    /// The coroutine completed with this value.
    Done(T),
    /// The coroutine yielded a value and awaits resumption.
    Yielded(Y, Resume<Y, R, T>),
}

impl<Y, R, T> CoroutineResult<Y, R, T> {
    /// Whether this is the final result of the coroutine.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Whether this is an intermediate, resumable result.
    #[must_use]
    pub const fn is_yield(&self) -> bool {
        matches!(self, Self::Yielded(..))
    }

    /// The yielded value, if suspended.
    #[must_use]
    pub const fn yielded(&self) -> Option<&Y> {
        match self {
            Self::Yielded(output, _) => Some(output),
            Self::Done(_) => None,
        }
    }

    /// The final value, if completed.
    #[must_use]
    pub fn into_done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Yielded(..) => None,
        }
    }

    /// Resumes the coroutine with `value`.
    ///
    /// # Panics
    ///
    /// Panics if the coroutine has already completed; a late resume is a
    /// contract violation.
    #[must_use]
    pub fn resume(self, value: R) -> Self {
        match self {
            Self::Done(_) => panic!("cannot resume: coroutine has already completed"),
            Self::Yielded(_, resume) => resume.invoke(value),
        }
    }
}

/// Interpreter for the Coroutine family.
#[derive(Debug)]
pub struct CoroutineInterpreter<Y, R> {
    _marker: PhantomData<fn(R) -> Y>,
}

impl<Y, R> CoroutineInterpreter<Y, R> {
    /// Creates the coroutine interpreter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<Y, R> Default for CoroutineInterpreter<Y, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, Y, R, A> Interpreter<E, A> for CoroutineInterpreter<Y, R>
where
    E: Coroutine<Y, R>,
    Y: 'static,
    R: 'static,
    A: 'static,
{
    type Output = CoroutineResult<Y, R, A>;

    fn handle_pure(self, value: A) -> CoroutineResult<Y, R, A> {
        CoroutineResult::Done(value)
    }

    fn handle_effect(self, continuation: Continuation<E, A>) -> Handled<Self, E, A> {
        match continuation.extract::<Yield<Y, R>>() {
            Ok((Yield { output, .. }, resumption)) => {
                let resume = Resume {
                    resume: Box::new(move |value: R| {
                        run_pure_or_fail(Self::new().run(resumption.resume(value)))
                    }),
                };
                Handled::Resolved(Eff::pure(CoroutineResult::Yielded(output, resume)))
            }
            Err(continuation) => Handled::Unhandled(self, continuation),
        }
    }
}

/// Runs `computation` until its first suspension or completion.
pub fn run_coroutine<E, Y, R, A>(computation: Eff<E, A>) -> Eff<E, CoroutineResult<Y, R, A>>
where
    E: Coroutine<Y, R>,
    Y: 'static,
    R: 'static,
    A: 'static,
{
    CoroutineInterpreter::new().run(computation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Steps;

    impl Effects for Steps {}
    impl Coroutine<i32, i32> for Steps {}

    fn two_yields() -> Eff<Steps, &'static str> {
        Steps::yield_value(1)
            .flat_map(|_| Steps::yield_value(2))
            .map(|_| "done")
    }

    #[rstest]
    fn completed_without_yielding() {
        let computation: Eff<Steps, i32> = Eff::pure(42);
        let result = run_pure_or_fail(run_coroutine(computation));
        assert!(result.is_done());
        assert_eq!(result.into_done(), Some(42));
    }

    #[rstest]
    fn yields_in_order_then_completes() {
        let result = run_pure_or_fail(run_coroutine(two_yields()));
        assert_eq!(result.yielded(), Some(&1));

        let result = result.resume(0);
        assert_eq!(result.yielded(), Some(&2));

        let result = result.resume(0);
        assert!(result.is_done());
        assert_eq!(result.into_done(), Some("done"));
    }

    #[rstest]
    #[should_panic(expected = "coroutine has already completed")]
    fn resuming_a_completed_coroutine_panics() {
        let result = run_pure_or_fail(run_coroutine(two_yields()));
        let result = result.resume(0).resume(0);
        assert!(result.is_done());
        let _ = result.resume(0);
    }

    #[rstest]
    fn resumption_value_feeds_the_computation() {
        let computation = Steps::yield_value(1).flat_map(Steps::yield_value);
        let result = run_pure_or_fail(run_coroutine(computation));
        assert_eq!(result.yielded(), Some(&1));

        let result = result.resume(41);
        assert_eq!(result.yielded(), Some(&41));
    }

    #[rstest]
    fn yielded_is_none_once_done() {
        let computation: Eff<Steps, i32> = Eff::pure(1);
        let result = run_pure_or_fail(run_coroutine(computation));
        assert_eq!(result.yielded(), None);
    }
}
