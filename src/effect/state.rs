//! State effect: read/write access to a single updatable state cell.
//!
//! Threading is single-writer and strictly sequential: `get` observes the
//! value carried by the interpreter, `put` replaces it for every
//! subsequent step. The interpreter never mutates in place; each resolved
//! `put` constructs a new interpreter value carrying the new state.
//!
//! # Examples
//!
//! ```rust
//! use effree::effect::{Effects, State, run_pure_or_fail, run_state};
//!
//! struct Counter;
//! impl Effects for Counter {}
//! impl State<i32> for Counter {}
//!
//! let computation = Counter::get()
//!     .flat_map(|count| Counter::put(count + 1))
//!     .then(Counter::get());
//!
//! let result = run_pure_or_fail(run_state(0, computation));
//! assert_eq!(result.value, 1);
//! assert_eq!(result.state, 1);
//! ```

use static_assertions::assert_impl_all;
use std::marker::PhantomData;

use super::eff::Eff;
use super::interpreter::{Continuation, Handled, Interpreter};
use super::tag::{EffectTag, Effects, TypedTag};

/// Capability: computations over `Self` may read and replace a state cell
/// of type `S`.
pub trait State<S: 'static>: Effects + Sized {
    /// Requests the current state value.
    #[must_use]
    fn get() -> Eff<Self, S> {
        Eff::inject(Get::request())
    }

    /// Replaces the state for all subsequent steps.
    #[must_use]
    fn put(state: S) -> Eff<Self, ()> {
        Eff::inject(Put(state))
    }

    /// Replaces the state with a function of the current value.
    #[must_use]
    fn modify<F>(update: F) -> Eff<Self, ()>
    where
        F: FnOnce(S) -> S + 'static,
    {
        Self::get().flat_map(move |state| Self::put(update(state)))
    }

    /// Requests a projection of the current state value.
    #[must_use]
    fn gets<A, F>(projection: F) -> Eff<Self, A>
    where
        A: 'static,
        F: FnOnce(&S) -> A + 'static,
    {
        Self::get().map(move |state| projection(&state))
    }
}

/// Effect tag for [`State::get`]; resolves to the current state.
pub struct Get<S>(PhantomData<fn() -> S>);

impl<S> Get<S> {
    pub(crate) const fn request() -> Self {
        Self(PhantomData)
    }
}

impl<S: 'static> EffectTag for Get<S> {
    fn name(&self) -> &'static str {
        "Get"
    }
}

impl<S: 'static> TypedTag for Get<S> {
    type Result = S;
}

/// Effect tag for [`State::put`], carrying the replacement state.
pub struct Put<S>(
    /// The state value to install.
    pub S,
);

impl<S: 'static> EffectTag for Put<S> {
    fn name(&self) -> &'static str {
        "Put"
    }
}

impl<S: 'static> TypedTag for Put<S> {
    type Result = ();
}

assert_impl_all!(Get<u64>: EffectTag, TypedTag);
assert_impl_all!(Put<u64>: EffectTag, TypedTag);

/// A final value paired with the final carried state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateResult<T, S> {
    /// The computation's value.
    pub value: T,
    /// The state after the last resolved step.
    pub state: S,
}

/// Interpreter for the State family, carrying the state cell.
#[derive(Debug, Clone)]
pub struct StateInterpreter<S> {
    state: S,
}

impl<S> StateInterpreter<S> {
    /// Creates an interpreter carrying `state`.
    #[must_use]
    pub const fn new(state: S) -> Self {
        Self { state }
    }

    /// The carried state value.
    #[must_use]
    pub const fn state(&self) -> &S {
        &self.state
    }
}

impl<E, S, A> Interpreter<E, A> for StateInterpreter<S>
where
    E: State<S>,
    S: Clone + 'static,
    A: 'static,
{
    type Output = StateResult<A, S>;

    fn handle_pure(self, value: A) -> StateResult<A, S> {
        StateResult {
            value,
            state: self.state,
        }
    }

    fn handle_effect(self, continuation: Continuation<E, A>) -> Handled<Self, E, A> {
        let continuation = match continuation.extract::<Get<S>>() {
            Ok((Get(..), resumption)) => {
                let current = self.state.clone();
                return Handled::Resolved(self.run(resumption.resume(current)));
            }
            Err(continuation) => continuation,
        };

        match continuation.extract::<Put<S>>() {
            Ok((Put(next), resumption)) => {
                Handled::Resolved(Self::new(next).run(resumption.resume(())))
            }
            Err(continuation) => Handled::Unhandled(self, continuation),
        }
    }
}

/// Threads a state cell through `computation`, starting from `initial`.
pub fn run_state<E, S, A>(initial: S, computation: Eff<E, A>) -> Eff<E, StateResult<A, S>>
where
    E: State<S>,
    S: Clone + 'static,
    A: 'static,
{
    StateInterpreter::new(initial).run(computation)
}
