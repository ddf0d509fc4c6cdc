//! Type-aligned composition queue for pending continuations.
//!
//! A queue is a binary tree of Kleisli arrows (`X -> Eff<E, Y>`):
//!
//! ```text
//! Queue = Identity            pass-through, the unit of composition
//!       | Leaf(arrow)         one transformation
//!       | Node(left, right)   left, then right
//! ```
//!
//! Composing two queues builds a `Node` in O(1), so `flat_map` never pays
//! for the length of the chain already built. The cost is deferred to
//! [`Queue::apply`], which walks the left spine to the next arrow and
//! re-associates as it goes. A naive closure-wrapping encoding would
//! re-traverse the whole chain on every application, an O(n²) total for n
//! sequential binds; the tree keeps it amortized O(1) per bind.
//!
//! Argument and result types are erased at the leaf boundary: arrows take a
//! boxed `Any` and each leaf downcasts to the argument type it was built
//! with. Alignment is established at construction time by [`Queue::lift`],
//! so a failing downcast indicates a bug in the evaluation machinery, not
//! in user code, and aborts loudly.

use smallvec::SmallVec;
use std::any::Any;
use std::fmt;

use super::eff::{Eff, EffInner};
use super::tag::Effects;

/// A value whose type has been erased at a queue boundary.
pub(crate) type AnyValue = Box<dyn Any>;

/// A Kleisli arrow with both ends erased.
pub(crate) type ErasedArrow<E> = Box<dyn FnOnce(AnyValue) -> Eff<E, AnyValue>>;

/// Left-spine descent stack entries kept inline before spilling to the heap.
const PENDING_INLINE_CAPACITY: usize = 8;

/// A tree-shaped, type-aligned sequence of pending continuation arrows.
pub(crate) enum Queue<E: Effects> {
    /// Pass-through; present when a bare effect request has just been
    /// injected and nothing has been appended yet.
    Identity,
    /// One transformation.
    Leaf(ErasedArrow<E>),
    /// `left` then `right`, composed without touching either subtree.
    Node(Box<Queue<E>>, Box<Queue<E>>),
}

impl<E: Effects> Queue<E> {
    pub(crate) const fn identity() -> Self {
        Self::Identity
    }

    /// Lifts a typed Kleisli arrow into an erased leaf.
    ///
    /// The closure re-establishes the argument type that was erased at this
    /// boundary; the alignment invariant guarantees the downcast succeeds.
    pub(crate) fn lift<A, B, F>(function: F) -> Self
    where
        A: 'static,
        B: 'static,
        F: FnOnce(A) -> Eff<E, B> + 'static,
    {
        Self::Leaf(Box::new(move |input: AnyValue| {
            let argument = *input
                .downcast::<A>()
                .expect("continuation applied to a value of the wrong type");
            function(argument).erase()
        }))
    }

    /// Wraps an already-erased arrow, used for interpreter forwarding.
    pub(crate) fn adapt<F>(adapter: F) -> Self
    where
        F: FnOnce(AnyValue) -> Eff<E, AnyValue> + 'static,
    {
        Self::Leaf(Box::new(adapter))
    }

    /// Composes two queues in O(1).
    ///
    /// `Identity` is the unit and is eliminated on either side, so bare
    /// effect requests never carry needless indirection into later binds.
    pub(crate) fn compose(self, other: Self) -> Self {
        match (self, other) {
            (Self::Identity, queue) | (queue, Self::Identity) => queue,
            (left, right) => Self::Node(Box::new(left), Box::new(right)),
        }
    }

    /// Applies the queue to a start value.
    ///
    /// Descends along left children to the first arrow, applies it, and:
    ///
    /// - on a `Pure` result, continues through the remaining subtrees with
    ///   the produced value;
    /// - on a pending effect request, grafts the remaining subtrees onto
    ///   the inner continuation's queue and returns the new request
    ///   deferred, without executing further.
    ///
    /// The descent is iterative; arbitrarily left-heavy trees (the shape
    /// produced by long sequential bind chains) never grow the call stack.
    pub(crate) fn apply(self, start: AnyValue) -> Eff<E, AnyValue> {
        let mut pending: SmallVec<[Self; PENDING_INLINE_CAPACITY]> = SmallVec::new();
        let mut current = self;
        let mut value = start;

        loop {
            let produced = loop {
                match current {
                    Self::Identity => break Eff::pure(value),
                    Self::Leaf(arrow) => break arrow(value),
                    Self::Node(left, right) => {
                        pending.push(*right);
                        current = *left;
                    }
                }
            };

            match produced.into_inner() {
                EffInner::Pure(result) => match pending.pop() {
                    Some(next) => {
                        current = next;
                        value = result;
                    }
                    None => return Eff::pure(result),
                },
                EffInner::Cont(tag, inner) => {
                    let mut remainder = inner;
                    while let Some(next) = pending.pop() {
                        remainder = remainder.compose(next);
                    }
                    return Eff::cont(tag, remainder);
                }
            }
        }
    }
}

impl<E: Effects> fmt::Debug for Queue<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => formatter.write_str("PassThru"),
            Self::Leaf(_) => formatter.write_str("{arrow}"),
            Self::Node(left, right) => write!(formatter, "({left:?} => {right:?})"),
        }
    }
}
