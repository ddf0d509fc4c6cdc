//! # effree
//!
//! Algebraic effects for Rust: describe effectful computations as inert
//! data, compose them without running them, and evaluate them later
//! through pluggable, stackable interpreters.
//!
//! ## Overview
//!
//! - **Computations as data**: [`effect::Eff`] is a freer-monad value;
//!   building and combining one performs nothing.
//! - **Efficient composition**: binds append to a type-aligned tree of
//!   continuations in O(1), avoiding the quadratic blow-up of naive
//!   closure chaining, while preserving the monad laws.
//! - **Stackable interpreters**: Reader, Writer, State and Coroutine
//!   handlers each resolve their own requests and forward the rest, so
//!   independently-authored families compose in any nesting order.
//! - **Extensible**: a new family is a capability trait, a typed tag per
//!   operation, and one interpreter; no central registry.
//!
//! ## Example
//!
//! ```rust
//! use effree::effect::{Effects, State, Writer, run_pure_or_fail, run_state, run_writer};
//!
//! struct App;
//! impl Effects for App {}
//! impl Writer<String> for App {}
//! impl State<i32> for App {}
//!
//! let program = App::get()
//!     .flat_map(|n| App::tell(format!("seen {n}")))
//!     .then(App::put(10))
//!     .then(App::get());
//!
//! let result = run_pure_or_fail(run_writer(run_state(5, program)));
//! assert_eq!(result.value.value, 10);
//! assert_eq!(result.value.state, 10);
//! assert_eq!(Vec::from(result.written), vec!["seen 5".to_string()]);
//! ```
//!
//! Evaluation is single-threaded and synchronous throughout; effects
//! resolve in exactly the left-to-right order established by composition.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod control;
pub mod effect;

/// Prelude module for convenient imports.
///
/// ```rust
/// use effree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::control::*;
    pub use crate::effect::*;
}
