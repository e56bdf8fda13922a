use pledge::{Deferred, Error, RuntimeBuilder, Settled};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_block_on_returns_the_outcome() {
    let rt = RuntimeBuilder::new().build();

    let outcome = rt
        .block_on(|| Deferred::<i32, String>::resolved(41).then(|v| Ok(v + 1)))
        .unwrap();

    assert_eq!(outcome, Settled::Fulfilled(42));
}

#[test]
fn test_block_on_reports_values_that_never_settle() {
    let rt = RuntimeBuilder::new().build();

    let result = rt.block_on(|| Deferred::<i32, String>::new(|_, _| Ok(())));

    assert_eq!(result, Err(Error::Unsettled));
}

#[test]
fn test_run_until_idle_counts_microtasks() {
    let rt = RuntimeBuilder::new().build();

    rt.enter(|| {
        Deferred::<i32, String>::resolved(0)
            .then(|v| Ok(v + 1))
            .then(|v| Ok(v + 1));
    });

    assert_eq!(rt.run_until_idle(), Ok(2));
    assert_eq!(rt.run_until_idle(), Ok(0));
}

/// Keeps adding a step to the chain for as long as it runs.
fn endless(step: u64) -> Deferred<u64, String> {
    Deferred::<u64, String>::resolved(step).then(|v| endless(v + 1))
}

#[test]
fn test_turn_budget_stops_runaway_chains() {
    let rt = RuntimeBuilder::new().max_turns(50).build();

    rt.enter(|| {
        endless(0);
    });

    assert_eq!(
        rt.run_until_idle(),
        Err(Error::TurnLimitExceeded { limit: 50 })
    );
    assert!(rt.pending_tasks() > 0, "remaining work must stay queued");
}

/// Queues a chain whose drain takes exactly `steps` microtasks.
fn chain_of(steps: usize) -> Deferred<usize, String> {
    (0..steps).fold(Deferred::<usize, String>::resolved(0), |chain, _| {
        chain.then(|v| Ok(v + 1))
    })
}

#[test]
fn test_turn_budget_allows_exactly_limit_microtasks() {
    let rt = RuntimeBuilder::new().max_turns(2).build();

    let d = rt.enter(|| chain_of(2));

    assert_eq!(rt.run_until_idle(), Ok(2));
    assert_eq!(d.outcome(), Some(Settled::Fulfilled(2)));
}

#[test]
fn test_turn_budget_fails_one_microtask_past_the_limit() {
    let rt = RuntimeBuilder::new().max_turns(2).build();

    let d = rt.enter(|| chain_of(3));

    assert_eq!(
        rt.run_until_idle(),
        Err(Error::TurnLimitExceeded { limit: 2 })
    );
    assert!(d.is_pending());
    assert_eq!(rt.pending_tasks(), 1);

    assert_eq!(rt.run_until_idle(), Ok(1));
    assert_eq!(d.outcome(), Some(Settled::Fulfilled(3)));
}

#[test]
fn test_free_run_until_idle_drains_the_current_runtime() {
    let rt = RuntimeBuilder::new().build();

    let seen = rt.enter(|| {
        let d = Deferred::<i32, String>::resolved(1).then(|v| Ok(v * 10));
        assert!(d.is_pending());

        pledge::run_until_idle().unwrap();
        d.outcome()
    });

    assert_eq!(seen, Some(Settled::Fulfilled(10)));
}

#[test]
#[should_panic(expected = "run_until_idle must be called within the context of a runtime")]
fn test_free_run_until_idle_outside_runtime_panics() {
    let _ = pledge::run_until_idle();
}

#[test]
fn test_nested_enter_restores_the_outer_runtime() {
    let outer = RuntimeBuilder::new().build();
    let inner = RuntimeBuilder::new().build();

    outer.enter(|| {
        inner.enter(|| {
            Deferred::<i32, String>::resolved(1).then(|v| Ok(v));
        });

        Deferred::<i32, String>::resolved(2).then(|v| Ok(v));
    });

    assert_eq!(inner.pending_tasks(), 1);
    assert_eq!(outer.pending_tasks(), 1);
}

#[test]
fn test_values_created_with_a_scheduler_need_no_context() {
    let rt = RuntimeBuilder::new().build();
    let scheduler = rt.scheduler();
    let seen = Rc::new(RefCell::new(None));

    {
        let seen = seen.clone();
        Deferred::<i32, String>::resolved_in(scheduler, 7).then(move |v| {
            *seen.borrow_mut() = Some(v);
            Ok(())
        });
    }

    assert_eq!(rt.pending_tasks(), 1);
    rt.run_until_idle().unwrap();
    assert_eq!(*seen.borrow(), Some(7));
}

#[test]
fn test_rejected_in_needs_no_context() {
    let rt = RuntimeBuilder::new().build();

    let d = Deferred::<i32, String>::rejected_in(rt.scheduler(), "nope".to_string())
        .catch_failure(|reason| Err::<i32, _>(reason + "!"));

    rt.run_until_idle().unwrap();

    let outcome = d.outcome().unwrap();
    assert!(!outcome.is_fulfilled());
    assert_eq!(outcome, Settled::Rejected("nope!".to_string()));
}

#[test]
fn test_dropping_the_runtime_discards_queued_reactions() {
    let ran = Rc::new(RefCell::new(false));

    let child = {
        let rt = RuntimeBuilder::new().queue_capacity(4).build();
        let ran = ran.clone();
        rt.enter(|| {
            Deferred::<i32, String>::resolved(1).then(move |v| {
                *ran.borrow_mut() = true;
                Ok(v)
            })
        })
    };

    assert!(!*ran.borrow());
    assert!(child.is_pending());
}
