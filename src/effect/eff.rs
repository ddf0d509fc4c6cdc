//! The effectful computation type.
//!
//! `Eff<E, T>` describes a computation that may request effects from the
//! row `E` and eventually produces a `T`. Building one performs nothing:
//! the value is inert data, evaluated only when an interpreter stack
//! drives it.
//!
//! # Representation
//!
//! ```text
//! Eff<E, T> = Pure(T)
//!           | Cont(tag, queue)
//! ```
//!
//! `Pure` already holds its result. `Cont` is waiting on one named effect;
//! once an interpreter supplies the tag's result, the queue of pending
//! continuations runs up to the next request or to completion.
//!
//! # Laws
//!
//! `Eff` satisfies the monad laws:
//!
//! - **Left identity**: `Eff::pure(a).flat_map(f) == f(a)`
//! - **Right identity**: `m.flat_map(Eff::pure) == m`
//! - **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
//!
//! # Performance
//!
//! - `flat_map` / `map` on a pending computation: O(1) queue append
//! - evaluation: O(n) over n appended continuations, with an iterative
//!   queue walk that keeps deep bind chains off the call stack

use std::fmt;

use super::queue::{AnyValue, Queue};
use super::tag::{EffectTag, Effects, TypedTag};

/// Internal representation of an effectful computation.
pub(crate) enum EffInner<E: Effects, T: 'static> {
    /// Finished, no outstanding request.
    Pure(T),
    /// Waiting for the result bound to the tag; the queue still runs after.
    Cont(Box<dyn EffectTag>, Queue<E>),
}

/// A computation that may request effects from the row `E` and produces a
/// value of type `T` once every request has been resolved.
///
/// # Examples
///
/// ```rust
/// use effree::effect::{Eff, NoEffects, run_pure_or_fail};
///
/// let computation = Eff::<NoEffects, i32>::pure(20)
///     .map(|x| x + 1)
///     .flat_map(|x| Eff::pure(x * 2));
///
/// assert_eq!(run_pure_or_fail(computation), 42);
/// ```
pub struct Eff<E: Effects, T: 'static> {
    pub(crate) inner: EffInner<E, T>,
}

impl<E: Effects, T: 'static> Eff<E, T> {
    /// Lifts a value into a finished computation.
    #[must_use]
    #[inline]
    pub const fn pure(value: T) -> Self {
        Self {
            inner: EffInner::Pure(value),
        }
    }

    /// Whether this computation holds its final value, requesting nothing.
    #[must_use]
    #[inline]
    pub const fn is_pure(&self) -> bool {
        matches!(self.inner, EffInner::Pure(_))
    }

    /// Constructs a computation suspended on one effect request.
    ///
    /// This is the injection point of the extension contract: an effect
    /// family's operations each build their tag and hand it here. The
    /// resulting computation carries an identity queue, so the tag's
    /// result (of type `G::Result`, which the bound forces to equal `T`)
    /// becomes the computation's value until further combinators append
    /// work.
    #[must_use]
    pub fn inject<G>(tag: G) -> Self
    where
        G: TypedTag<Result = T>,
    {
        Self::cont(Box::new(tag), Queue::identity())
    }

    pub(crate) fn cont(tag: Box<dyn EffectTag>, queue: Queue<E>) -> Self {
        Self {
            inner: EffInner::Cont(tag, queue),
        }
    }

    pub(crate) fn into_inner(self) -> EffInner<E, T> {
        self.inner
    }

    /// Erases the result type at a queue boundary.
    ///
    /// Must only be applied to a computation with a concrete result type;
    /// erasing twice would double-box the value.
    pub(crate) fn erase(self) -> Eff<E, AnyValue> {
        match self.inner {
            EffInner::Pure(value) => Eff::pure(Box::new(value) as AnyValue),
            EffInner::Cont(tag, queue) => Eff::cont(tag, queue),
        }
    }

    /// Re-establishes the result type after an erased queue application.
    pub(crate) fn from_erased(erased: Eff<E, AnyValue>) -> Self {
        match erased.inner {
            EffInner::Pure(value) => Self::pure(
                *value
                    .downcast::<T>()
                    .expect("evaluation produced a value of the wrong type"),
            ),
            EffInner::Cont(tag, queue) => Self::cont(tag, queue),
        }
    }

    /// Applies a function to the eventual result.
    ///
    /// On a finished computation the function runs immediately; on a
    /// pending one a value-lifting arrow is appended in O(1). Nothing is
    /// executed either way.
    pub fn map<B, F>(self, function: F) -> Eff<E, B>
    where
        B: 'static,
        F: FnOnce(T) -> B + 'static,
    {
        match self.inner {
            EffInner::Pure(value) => Eff::pure(function(value)),
            EffInner::Cont(tag, queue) => Eff::cont(
                tag,
                queue.compose(Queue::lift(move |value: T| Eff::pure(function(value)))),
            ),
        }
    }

    /// Chains a dependent computation onto the eventual result.
    ///
    /// The Kleisli arrow is appended to the composition queue in O(1);
    /// long sequential chains therefore cost amortized constant time per
    /// bind regardless of how the chain associates.
    pub fn flat_map<B, F>(self, function: F) -> Eff<E, B>
    where
        B: 'static,
        F: FnOnce(T) -> Eff<E, B> + 'static,
    {
        match self.inner {
            EffInner::Pure(value) => function(value),
            EffInner::Cont(tag, queue) => Eff::cont(tag, queue.compose(Queue::lift(function))),
        }
    }

    /// Alias for [`Eff::flat_map`].
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Eff<E, B>
    where
        B: 'static,
        F: FnOnce(T) -> Eff<E, B> + 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two computations, keeping the second result.
    #[inline]
    pub fn then<B: 'static>(self, next: Eff<E, B>) -> Eff<E, B> {
        self.flat_map(move |_| next)
    }

    /// Discards the value but keeps the effects.
    #[inline]
    pub fn discard(self) -> Eff<E, ()> {
        self.map(|_| ())
    }

    /// Appends the effects from `other`, keeping the current value.
    pub fn and(self, other: Eff<E, ()>) -> Self {
        self.flat_map(move |value| other.map(move |()| value))
    }

    /// Runs the effects produced from the current value, keeping the value.
    pub fn tap<F>(self, effects: F) -> Self
    where
        T: Clone,
        F: FnOnce(T) -> Eff<E, ()> + 'static,
    {
        self.flat_map(move |value| effects(value.clone()).map(move |()| value))
    }

    /// Appends the effects from each of `others`, keeping the first value.
    ///
    /// ```rust
    /// use effree::effect::{Eff, Effects, Writer, run_pure_or_fail, run_writer};
    ///
    /// struct Log;
    /// impl Effects for Log {}
    /// impl Writer<&'static str> for Log {}
    ///
    /// let computation = Eff::<Log, i32>::pure(1).chain([
    ///     Log::tell("first"),
    ///     Log::tell("second"),
    /// ]);
    ///
    /// let result = run_pure_or_fail(run_writer(computation));
    /// assert_eq!(result.value, 1);
    /// assert_eq!(Vec::from(result.written), vec!["first", "second"]);
    /// ```
    pub fn chain<I>(self, others: I) -> Self
    where
        I: IntoIterator<Item = Eff<E, ()>>,
    {
        others.into_iter().fold(self, |first, other| first.and(other))
    }

    /// Combines two computations using a binary function.
    pub fn map2<B, C, F>(self, other: Eff<E, B>, function: F) -> Eff<E, C>
    where
        B: 'static,
        C: 'static,
        F: FnOnce(T, B) -> C + 'static,
    {
        self.flat_map(move |first| other.map(move |second| function(first, second)))
    }

    /// Combines two computations into a tuple.
    #[inline]
    pub fn product<B: 'static>(self, other: Eff<E, B>) -> Eff<E, (T, B)> {
        self.map2(other, |first, second| (first, second))
    }
}

impl<E: Effects, T: fmt::Debug + 'static> fmt::Debug for Eff<E, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            EffInner::Pure(value) => formatter.debug_tuple("Pure").field(value).finish(),
            EffInner::Cont(tag, queue) => formatter
                .debug_struct("Cont")
                .field("tag", tag)
                .field("queue", queue)
                .finish(),
        }
    }
}
