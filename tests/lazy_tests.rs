//! Integration tests for the lazy memoization utility.

use effree::control::Lazy;
use rstest::rstest;
use std::cell::Cell;
use std::rc::Rc;

#[rstest]
fn nothing_runs_before_the_first_force() {
    let journal: Rc<Cell<bool>> = Rc::new(Cell::new(false));
    let observer = Rc::clone(&journal);

    let lazy = Lazy::new(move || {
        observer.set(true);
        1
    });

    assert!(!journal.get());
    assert_eq!(*lazy.force(), 1);
    assert!(journal.get());
}

#[rstest]
fn the_initializer_runs_exactly_once() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    let lazy = Lazy::new(move || {
        counter.set(counter.get() + 1);
        "value"
    });

    for _ in 0..5 {
        assert_eq!(*lazy.force(), "value");
    }
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn pre_evaluated_values_never_call_anything() {
    let lazy = Lazy::evaluated(vec![1, 2, 3]);
    assert!(lazy.is_evaluated());
    assert_eq!(lazy.force().len(), 3);
    assert_eq!(lazy.into_inner(), Some(vec![1, 2, 3]));
}

#[rstest]
fn unforced_cells_give_up_no_value() {
    let lazy: Lazy<i32, _> = Lazy::new(|| 9);
    assert!(!lazy.is_evaluated());
    assert_eq!(lazy.into_inner(), None);
}
