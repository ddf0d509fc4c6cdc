//! Algebraic effects: describe effectful computations as inert data,
//! compose them without running them, and evaluate them later through
//! pluggable, stackable interpreters.
//!
//! # Core concepts
//!
//! - [`Eff`]: a computation that may request effects and produces a value
//! - [`EffectTag`] / [`TypedTag`]: markers identifying one requested
//!   operation and the type it must resolve to
//! - [`Interpreter`]: resolves one family's tags and forwards the rest
//!
//! # Effect families
//!
//! - [`Reader`]: read a shared immutable environment (`ask`)
//! - [`Writer`]: accumulate outputs (`tell`)
//! - [`State`]: thread an updatable state cell (`get`, `put`)
//! - [`Coroutine`]: suspend and be resumed by the caller (`yield_value`)
//!
//! A computation declares its capabilities by the traits its effect row
//! implements; interpreters peel families off one at a time, in any order:
//!
//! ```rust
//! use effree::effect::{Eff, Effects, State, Writer, run_pure_or_fail, run_state, run_writer};
//!
//! struct App;
//! impl Effects for App {}
//! impl Writer<&'static str> for App {}
//! impl State<i32> for App {}
//!
//! let program = App::tell("starting")
//!     .then(App::get())
//!     .flat_map(|count| App::put(count + 1))
//!     .then(App::get());
//!
//! let result = run_pure_or_fail(run_state(41, run_writer(program)));
//! assert_eq!(result.value.value, 42);
//! assert_eq!(result.state, 42);
//! assert_eq!(Vec::from(result.value.written), vec!["starting"]);
//! ```
//!
//! # Extending
//!
//! A new effect family needs a capability trait whose operations build
//! computations with [`Eff::inject`], one [`TypedTag`] per operation, and
//! one [`Interpreter`] recognizing exactly those tags via
//! [`Continuation::extract`].

mod coroutine;
mod eff;
mod interpreter;
mod queue;
mod reader;
mod state;
mod tag;
mod writer;

pub use coroutine::{
    Coroutine, CoroutineInterpreter, CoroutineResult, Resume, Yield, run_coroutine,
};
pub use eff::Eff;
pub use interpreter::{
    Continuation, Handled, Interpreter, Resumption, UnhandledEffect, run_pure_or_fail,
    try_run_pure,
};
pub use reader::{Ask, Reader, ReaderInterpreter, run_reader};
pub use state::{Get, Put, State, StateInterpreter, StateResult, run_state};
pub use tag::{EffectTag, Effects, NoEffects, TypedTag};
pub use writer::{
    ReverseWriterInterpreter, Tell, Writer, WriterInterpreter, WriterResult, run_writer,
    run_writer_reverse,
};
