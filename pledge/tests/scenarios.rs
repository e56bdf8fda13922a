use pledge::{Deferred, RuntimeBuilder, Scheduler, Settled};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_sync_resolution_is_observed_after_a_turn() {
    let rt = RuntimeBuilder::new().build();
    let captured = Rc::new(RefCell::new(None));

    rt.enter(|| {
        let captured = captured.clone();
        let d1 = Deferred::<i32, String>::new(|resolve, _| {
            resolve.settle(5);
            Ok(())
        });

        d1.then(|v| Ok(v + 1)).then(move |v| {
            *captured.borrow_mut() = Some(v);
            Ok(())
        });
    });

    assert_eq!(
        *captured.borrow(),
        None,
        "capture must not happen in the constructing block"
    );

    rt.run_until_idle().unwrap();
    assert_eq!(*captured.borrow(), Some(6));
}

#[test]
fn test_sync_rejection_reaches_the_rejection_handler() {
    let rt = RuntimeBuilder::new().build();
    let captured = Rc::new(RefCell::new(String::new()));

    rt.run(|| {
        let captured = captured.clone();
        let d2 = Deferred::<(), String>::new(|_, reject| {
            reject.settle("boom".to_string());
            Ok(())
        });

        d2.catch_failure(move |reason| {
            *captured.borrow_mut() = reason;
            Ok(())
        });
    })
    .unwrap();

    assert_eq!(*captured.borrow(), "boom");
}

#[test]
fn test_four_step_chain_from_a_fulfilled_seed() {
    let rt = RuntimeBuilder::new().build();
    let observed = Rc::new(RefCell::new(Vec::new()));

    let outcome = rt
        .block_on(|| {
            let mut chain = Deferred::<i32, String>::resolved(10);
            for _ in 0..4 {
                let observed = observed.clone();
                chain = chain.then(move |v| {
                    observed.borrow_mut().push(v);
                    Ok(v + 1)
                });
            }
            chain
        })
        .unwrap();

    assert_eq!(*observed.borrow(), vec![10, 11, 12, 13]);
    assert_eq!(outcome, Settled::Fulfilled(14));
}

#[test]
fn test_chain_resolved_from_a_later_turn() {
    let rt = RuntimeBuilder::new().build();
    let scheduler = rt.scheduler();
    let observed = Rc::new(RefCell::new(Vec::new()));

    let outcome = rt
        .block_on(|| {
            let mut chain = Deferred::<i32, String>::new_in(scheduler.clone(), |resolve, _| {
                scheduler.schedule(Box::new(move || resolve.settle(10)));
                Ok(())
            });
            for _ in 0..4 {
                let observed = observed.clone();
                chain = chain.then(move |v| {
                    observed.borrow_mut().push(v);
                    Ok(v + 1)
                });
            }
            chain
        })
        .unwrap();

    assert_eq!(*observed.borrow(), vec![10, 11, 12, 13]);
    assert_eq!(outcome, Settled::Fulfilled(14));
}

#[test]
fn test_rejected_seed_skips_every_step_until_caught() {
    let rt = RuntimeBuilder::new().build();
    let observed = Rc::new(RefCell::new(Vec::new()));
    let caught = Rc::new(RefCell::new(None));

    let outcome = rt
        .block_on(|| {
            let mut chain = Deferred::<i32, i32>::new(|_, reject| {
                reject.settle(10);
                Ok(())
            });
            for _ in 0..4 {
                let observed = observed.clone();
                chain = chain.then(move |v| {
                    observed.borrow_mut().push(v);
                    Ok(v + 1)
                });
            }

            let caught = caught.clone();
            chain.catch_failure(move |err| {
                *caught.borrow_mut() = Some(format!("Err: {err}"));
                Ok(err)
            })
        })
        .unwrap();

    assert!(observed.borrow().is_empty());
    assert_eq!(caught.borrow().as_deref(), Some("Err: 10"));
    assert_eq!(outcome, Settled::Fulfilled(10));
}
