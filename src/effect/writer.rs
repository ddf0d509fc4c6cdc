//! Writer effect: send outputs to the effects environment.
//!
//! Two accumulation strategies are provided:
//!
//! - [`WriterInterpreter`] (the default): resolves the remainder of the
//!   computation first and prepends each told item after the recursive
//!   result returns, yielding the outputs in document order. The natural
//!   call order makes this non-tail-recursive: its depth is the number of
//!   `tell`s in the run.
//! - [`ReverseWriterInterpreter`]: pushes each told item into a threaded
//!   accumulator immediately, producing the outputs in *reverse* order;
//!   callers reverse at the end if they need document order.
//!
//! # Examples
//!
//! ```rust
//! use effree::effect::{Eff, Effects, Writer, run_pure_or_fail, run_writer};
//!
//! struct Log;
//! impl Effects for Log {}
//! impl Writer<&'static str> for Log {}
//!
//! let computation = Log::tell("a").then(Log::tell("b")).then(Eff::pure(42));
//! let result = run_pure_or_fail(run_writer(computation));
//!
//! assert_eq!(result.value, 42);
//! assert_eq!(Vec::from(result.written), vec!["a", "b"]);
//! ```

use static_assertions::assert_impl_all;
use std::collections::VecDeque;
use std::marker::PhantomData;

use super::eff::Eff;
use super::interpreter::{Continuation, Handled, Interpreter};
use super::tag::{EffectTag, Effects, TypedTag};

/// Capability: computations over `Self` may append outputs of type `W`.
pub trait Writer<W: 'static>: Effects + Sized {
    /// Appends `output` to the accumulated sequence.
    #[must_use]
    fn tell(output: W) -> Eff<Self, ()> {
        Eff::inject(Tell(output))
    }
}

/// Effect tag for [`Writer::tell`], carrying the item to append.
pub struct Tell<W>(
    /// The output to append.
    pub W,
);

impl<W: 'static> EffectTag for Tell<W> {
    fn name(&self) -> &'static str {
        "Tell"
    }
}

impl<W: 'static> TypedTag for Tell<W> {
    type Result = ();
}

assert_impl_all!(Tell<String>: EffectTag, TypedTag);

/// A final value paired with the accumulated output sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterResult<T, W> {
    /// The computation's value.
    pub value: T,
    /// Everything told during the run.
    pub written: VecDeque<W>,
}

/// Forward-order Writer interpreter; see the module docs for the strategy.
#[derive(Debug)]
pub struct WriterInterpreter<W> {
    _output: PhantomData<fn(W)>,
}

impl<W> WriterInterpreter<W> {
    /// Creates the forward-order interpreter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _output: PhantomData,
        }
    }
}

impl<W> Default for WriterInterpreter<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, W, A> Interpreter<E, A> for WriterInterpreter<W>
where
    E: Writer<W>,
    W: 'static,
    A: 'static,
{
    type Output = WriterResult<A, W>;

    fn handle_pure(self, value: A) -> WriterResult<A, W> {
        WriterResult {
            value,
            written: VecDeque::new(),
        }
    }

    fn handle_effect(self, continuation: Continuation<E, A>) -> Handled<Self, E, A> {
        match continuation.extract::<Tell<W>>() {
            Ok((Tell(output), resumption)) => {
                let rest = Self::new().run(resumption.resume(()));
                Handled::Resolved(rest.map(move |mut result| {
                    result.written.push_front(output);
                    result
                }))
            }
            Err(continuation) => Handled::Unhandled(self, continuation),
        }
    }
}

/// Reverse-order Writer interpreter, threading its accumulator through
/// each step; see the module docs for the strategy.
#[derive(Debug, Clone)]
pub struct ReverseWriterInterpreter<W> {
    written: VecDeque<W>,
}

impl<W> ReverseWriterInterpreter<W> {
    /// Creates the reverse-order interpreter with an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            written: VecDeque::new(),
        }
    }

    /// Creates the reverse-order interpreter seeded with `written`.
    #[must_use]
    pub const fn with_output(written: VecDeque<W>) -> Self {
        Self { written }
    }
}

impl<W> Default for ReverseWriterInterpreter<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, W, A> Interpreter<E, A> for ReverseWriterInterpreter<W>
where
    E: Writer<W>,
    W: 'static,
    A: 'static,
{
    type Output = WriterResult<A, W>;

    fn handle_pure(self, value: A) -> WriterResult<A, W> {
        WriterResult {
            value,
            written: self.written,
        }
    }

    fn handle_effect(self, continuation: Continuation<E, A>) -> Handled<Self, E, A> {
        match continuation.extract::<Tell<W>>() {
            Ok((Tell(output), resumption)) => {
                let mut written = self.written;
                written.push_front(output);
                Handled::Resolved(Self::with_output(written).run(resumption.resume(())))
            }
            Err(continuation) => Handled::Unhandled(self, continuation),
        }
    }
}

/// Accumulates every `tell` in document order next to the final value.
pub fn run_writer<E, W, A>(computation: Eff<E, A>) -> Eff<E, WriterResult<A, W>>
where
    E: Writer<W>,
    W: 'static,
    A: 'static,
{
    WriterInterpreter::new().run(computation)
}

/// Accumulates every `tell` in reverse order, starting from `written`.
pub fn run_writer_reverse<E, W, A>(
    written: VecDeque<W>,
    computation: Eff<E, A>,
) -> Eff<E, WriterResult<A, W>>
where
    E: Writer<W>,
    W: 'static,
    A: 'static,
{
    ReverseWriterInterpreter::with_output(written).run(computation)
}
