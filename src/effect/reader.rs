//! Reader effect: read a shared immutable value from the environment.
//!
//! Every [`Reader::ask`] inside one interpreter run observes the identical
//! environment value; the environment never changes across a run.
//!
//! # Examples
//!
//! ```rust
//! use effree::effect::{Effects, Reader, run_pure_or_fail, run_reader};
//!
//! struct Env;
//! impl Effects for Env {}
//! impl Reader<u32> for Env {}
//!
//! let computation = Env::ask().map(|port| port + 1);
//! assert_eq!(run_pure_or_fail(run_reader(8079, computation)), 8080);
//! ```

use static_assertions::assert_impl_all;
use std::marker::PhantomData;

use super::eff::Eff;
use super::interpreter::{Continuation, Handled, Interpreter};
use super::tag::{EffectTag, Effects, TypedTag};

/// Capability: computations over `Self` may read an environment of type `R`.
pub trait Reader<R: 'static>: Effects + Sized {
    /// Requests the environment value.
    #[must_use]
    fn ask() -> Eff<Self, R> {
        Eff::inject(Ask::request())
    }

    /// Requests a projection of the environment value.
    #[must_use]
    fn asks<A, F>(projection: F) -> Eff<Self, A>
    where
        A: 'static,
        F: FnOnce(&R) -> A + 'static,
    {
        Self::ask().map(move |environment| projection(&environment))
    }
}

/// Effect tag for [`Reader::ask`]; resolves to the environment value.
pub struct Ask<R>(PhantomData<fn() -> R>);

impl<R> Ask<R> {
    pub(crate) const fn request() -> Self {
        Self(PhantomData)
    }
}

impl<R: 'static> EffectTag for Ask<R> {
    fn name(&self) -> &'static str {
        "Ask"
    }
}

impl<R: 'static> TypedTag for Ask<R> {
    type Result = R;
}

assert_impl_all!(Ask<()>: EffectTag, TypedTag);

/// Interpreter for the Reader family, carrying the environment value.
#[derive(Debug, Clone)]
pub struct ReaderInterpreter<R> {
    environment: R,
}

impl<R> ReaderInterpreter<R> {
    /// Creates an interpreter serving `environment` to every `Ask`.
    #[must_use]
    pub const fn new(environment: R) -> Self {
        Self { environment }
    }

    /// The carried environment value.
    #[must_use]
    pub const fn environment(&self) -> &R {
        &self.environment
    }
}

impl<E, R, A> Interpreter<E, A> for ReaderInterpreter<R>
where
    E: Reader<R>,
    R: Clone + 'static,
    A: 'static,
{
    type Output = A;

    fn handle_pure(self, value: A) -> A {
        value
    }

    fn handle_effect(self, continuation: Continuation<E, A>) -> Handled<Self, E, A> {
        match continuation.extract::<Ask<R>>() {
            Ok((Ask(..), resumption)) => {
                let environment = self.environment.clone();
                Handled::Resolved(self.run(resumption.resume(environment)))
            }
            Err(continuation) => Handled::Unhandled(self, continuation),
        }
    }
}

/// Resolves every `Ask` in `computation` to `environment`.
pub fn run_reader<E, R, A>(environment: R, computation: Eff<E, A>) -> Eff<E, A>
where
    E: Reader<R>,
    R: Clone + 'static,
    A: 'static,
{
    ReaderInterpreter::new(environment).run(computation)
}
