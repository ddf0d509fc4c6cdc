//! Integration tests for caller-driven coroutine computations.

use effree::effect::{
    Coroutine, CoroutineResult, Eff, Effects, run_coroutine, run_pure_or_fail,
};
use rstest::rstest;

struct Gen;

impl Effects for Gen {}
impl Coroutine<i32, ()> for Gen {}

struct Echo;

impl Effects for Echo {}
impl Coroutine<i32, i32> for Echo {}

fn count_up(n: i32) -> Eff<Gen, &'static str> {
    (0..n)
        .fold(Eff::pure(()), |acc, i| acc.then(Gen::yield_value(i)))
        .map(|()| "finished")
}

#[rstest]
fn the_caller_pulls_every_suspension_in_order() {
    let mut result = run_pure_or_fail(run_coroutine(count_up(5)));

    let mut seen = Vec::new();
    loop {
        match result {
            CoroutineResult::Yielded(value, resume) => {
                seen.push(value);
                result = resume.invoke(());
            }
            CoroutineResult::Done(value) => {
                assert_eq!(value, "finished");
                break;
            }
        }
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
}

#[rstest]
fn the_caller_may_stop_pulling_at_any_point() {
    let result = run_pure_or_fail(run_coroutine(count_up(100)));
    let result = result.resume(());
    // Dropping a suspended coroutine abandons the rest of the computation.
    assert!(result.is_yield());
}

#[rstest]
fn three_step_protocol_with_resumption_values() {
    let computation = Echo::yield_value(1)
        .flat_map(|first| Echo::yield_value(first + 1))
        .map(|second| format!("done:{second}"));

    let result = run_pure_or_fail(run_coroutine(computation));
    assert_eq!(result.yielded(), Some(&1));

    let result = result.resume(10);
    assert_eq!(result.yielded(), Some(&11));

    let result = result.resume(31);
    assert_eq!(result.into_done(), Some("done:31".to_string()));
}

#[rstest]
#[should_panic(expected = "coroutine has already completed")]
fn a_third_resume_after_completion_is_a_contract_violation() {
    let computation = Echo::yield_value(1)
        .flat_map(|_| Echo::yield_value(2))
        .map(|_| "done");

    let done = run_pure_or_fail(run_coroutine(computation))
        .resume(0)
        .resume(0);
    assert!(done.is_done());
    let _ = done.resume(0);
}

#[rstest]
fn a_long_generator_drives_to_completion() {
    let mut result = run_pure_or_fail(run_coroutine(count_up(200)));
    let mut pulled = 0;
    while result.is_yield() {
        result = result.resume(());
        pulled += 1;
    }
    assert_eq!(pulled, 200);
    assert_eq!(result.into_done(), Some("finished"));
}
