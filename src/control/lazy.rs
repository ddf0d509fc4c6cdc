//! Deferred evaluation with memoization.
//!
//! A [`Lazy`] value runs its initializer at most once, on first access,
//! and caches the result for every later access.

use std::cell::{Ref, RefCell};
use std::fmt;

/// The memo cell: empty until forced, then holding the computed value.
enum Memo<T, F> {
    /// Not computed yet; holds the initializer.
    Deferred(F),
    /// Computed; holds the cached value.
    Evaluated(T),
    /// The initializer panicked; the cell is unusable.
    Poisoned,
}

/// A lazily evaluated, memoized value.
///
/// Evaluation is deferred until [`Lazy::force`] is first called; the
/// result is cached and later calls return it without recomputation. Not
/// thread-safe; evaluation here is the same single-threaded discipline as
/// the rest of the crate.
///
/// # Examples
///
/// ```rust
/// use effree::control::Lazy;
/// use std::cell::Cell;
///
/// let calls = Cell::new(0);
/// let lazy = Lazy::new(|| {
///     calls.set(calls.get() + 1);
///     42
/// });
///
/// assert_eq!(calls.get(), 0);
/// assert_eq!(*lazy.force(), 42);
/// assert_eq!(*lazy.force(), 42);
/// assert_eq!(calls.get(), 1);
/// ```
pub struct Lazy<T, F = fn() -> T> {
    memo: RefCell<Memo<T, F>>,
}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Defers `initializer` until the value is first forced.
    #[inline]
    pub const fn new(initializer: F) -> Self {
        Self {
            memo: RefCell::new(Memo::Deferred(initializer)),
        }
    }

    /// Forces evaluation and returns a reference to the value.
    ///
    /// # Panics
    ///
    /// Panics if the initializer panicked on an earlier call, or if called
    /// re-entrantly from its own initializer.
    pub fn force(&self) -> Ref<'_, T> {
        if matches!(&*self.memo.borrow(), Memo::Deferred(_)) {
            // Poisoned while the initializer runs, so a panicking
            // initializer leaves the cell unusable rather than half-built.
            let taken = self.memo.replace(Memo::Poisoned);
            let Memo::Deferred(initializer) = taken else {
                unreachable!("memo state changed between borrow and take");
            };
            let value = initializer();
            *self.memo.borrow_mut() = Memo::Evaluated(value);
        }

        Ref::map(self.memo.borrow(), |memo| match memo {
            Memo::Evaluated(value) => value,
            Memo::Deferred(_) => unreachable!("value was just evaluated"),
            Memo::Poisoned => panic!("lazy value poisoned by a panicking initializer"),
        })
    }

    /// Whether the value has been computed.
    pub fn is_evaluated(&self) -> bool {
        matches!(&*self.memo.borrow(), Memo::Evaluated(_))
    }

    /// Consumes the cell, returning the value if it was ever computed.
    pub fn into_inner(self) -> Option<T> {
        match self.memo.into_inner() {
            Memo::Evaluated(value) => Some(value),
            Memo::Deferred(_) | Memo::Poisoned => None,
        }
    }
}

impl<T> Lazy<T> {
    /// Wraps an already-computed value.
    pub const fn evaluated(value: T) -> Self {
        Self {
            memo: RefCell::new(Memo::Evaluated(value)),
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.memo.borrow() {
            Memo::Evaluated(value) => formatter.debug_tuple("Lazy").field(value).finish(),
            Memo::Deferred(_) => formatter.write_str("Lazy(<deferred>)"),
            Memo::Poisoned => formatter.write_str("Lazy(<poisoned>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn force_computes_once() {
        let calls = Cell::new(0);
        let lazy = Lazy::new(|| {
            calls.set(calls.get() + 1);
            21 * 2
        });

        assert!(!lazy.is_evaluated());
        assert_eq!(*lazy.force(), 42);
        assert_eq!(*lazy.force(), 42);
        assert_eq!(calls.get(), 1);
        assert!(lazy.is_evaluated());
    }

    #[rstest]
    fn evaluated_needs_no_initializer() {
        let lazy = Lazy::evaluated("ready");
        assert!(lazy.is_evaluated());
        assert_eq!(*lazy.force(), "ready");
    }

    #[rstest]
    fn into_inner_returns_the_computed_value() {
        let lazy = Lazy::new(|| 5);
        let _ = lazy.force();
        assert_eq!(lazy.into_inner(), Some(5));
    }

    #[rstest]
    fn into_inner_is_none_when_never_forced() {
        let lazy: Lazy<i32, _> = Lazy::new(|| 5);
        assert_eq!(lazy.into_inner(), None);
    }

    #[rstest]
    fn debug_hides_the_initializer() {
        let lazy: Lazy<i32, _> = Lazy::new(|| 5);
        assert_eq!(format!("{lazy:?}"), "Lazy(<deferred>)");
        let _ = lazy.force();
        assert_eq!(format!("{lazy:?}"), "Lazy(5)");
    }
}
