//! Chains reactions on resolved and rejected values.
//!
//! Run with `RUST_LOG=chain=info,pledge=trace` to also see settlement
//! and dispatch events of the runtime.

use pledge::{Deferred, RuntimeBuilder, Scheduler, SchedulerHandle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter)
        .init();
}

/// Four steps, each logging the value and passing it on incremented.
fn count_up<E>(seed: Deferred<i32, E>, label: &'static str) -> Deferred<i32, E>
where
    E: Clone + 'static,
{
    (0..4).fold(seed, |chain, _| {
        chain.then(move |value| {
            tracing::info!(label, value, "step");
            Ok(value + 1)
        })
    })
}

/// A value settled from a later turn, like a callback from the host.
fn later<T>(scheduler: SchedulerHandle, outcome: Result<T, String>) -> Deferred<T, String>
where
    T: Clone + 'static,
{
    let queue = scheduler.clone();
    Deferred::new_in(scheduler, move |resolve, reject| {
        queue.schedule(Box::new(move || match outcome {
            Ok(value) => resolve.settle(value),
            Err(reason) => reject.settle(reason),
        }));
        Ok(())
    })
}

fn main() -> Result<(), pledge::Error> {
    init_tracing();

    let runtime = RuntimeBuilder::new().build();
    let scheduler = runtime.scheduler();

    runtime.run(|| {
        count_up(later(scheduler.clone(), Ok(10)), "async");

        later::<i32>(scheduler.clone(), Err("ERR: ".to_string())).then_or_else(
            |_| Ok(String::new()),
            |err| {
                tracing::info!(%err, "rejected");
                Ok(err + "NEW ")
            },
        );

        count_up(Deferred::<i32, String>::resolved(10), "sync");

        count_up(Deferred::<i32, i32>::rejected(10), "sync-rejected").catch_failure(|err| {
            tracing::info!("Err: {err}");
            Ok(err)
        });
    })?;

    tracing::info!("all chains settled");
    Ok(())
}
