//! End-to-end scenario coverage, matching spec.md §8. Every timing knob is
//! scaled down from the spec's real-world seconds into milliseconds so the
//! suite runs fast; the *shape* of each scenario (capacity, lane count,
//! retry cap) is kept as documented.

use std::time::Duration;

use burger_engine::{Engine, EngineConfig};

fn fast_config(num_lanes: usize, fifo_capacity: usize) -> EngineConfig {
    EngineConfig {
        num_lanes,
        ingredient_time: Duration::from_millis(15),
        order_interval: Duration::from_millis(25),
        fifo_capacity,
    }
}

/// Polls `snapshot()` until `pred` is satisfied or `timeout` elapses.
fn wait_until(engine: &Engine, timeout: Duration, pred: impl Fn(&burger_engine::StatusSnapshot) -> bool) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        let snapshot = engine.snapshot();
        if pred(&snapshot) {
            return true;
        }
        if std::time::Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn baseline_throughput_completes_orders_on_every_lane() {
    // Packing time alone is a fixed 1-2s per order (spec.md §4.4), so this
    // generously bounds how long a handful of completions can take.
    let engine = Engine::start(fast_config(2, 20));

    let ok = wait_until(&engine, Duration::from_secs(10), |s| {
        s.total_completed >= 4 && s.lanes.iter().all(|l| l.processed_count > 0)
    });
    assert!(ok, "expected both lanes to process at least one order");

    let snapshot = engine.snapshot();
    assert!(snapshot.total_admitted >= snapshot.total_completed);

    engine.shutdown();
}

#[test]
fn pause_lane_keeps_it_idle_until_resumed() {
    let engine = Engine::start(fast_config(2, 20));
    engine.pause_lane(0).unwrap();

    // Give the plant time to route an order to lane 1 only; lane 0 must
    // never pick up work while paused.
    let routed = wait_until(&engine, Duration::from_secs(5), |s| s.lanes[1].processed_count > 0);
    assert!(routed, "lane 1 should absorb all traffic while lane 0 is paused");
    assert_eq!(engine.snapshot().lanes[0].processed_count, 0, "paused lane must stay idle");

    engine.resume_all();
    let ok = wait_until(&engine, Duration::from_secs(5), |s| s.lanes[0].processed_count > 0);
    assert!(ok, "lane 0 should resume processing after resume_all");

    engine.shutdown();
}

#[test]
fn pause_then_resume_is_idempotent() {
    let engine = Engine::start(fast_config(1, 10));
    engine.pause_lane(0).unwrap();
    engine.pause_lane(0).unwrap();
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(engine.snapshot().lanes[0].processed_count, 0);

    engine.resume_lane(0).unwrap();
    engine.resume_lane(0).unwrap();

    let ok = wait_until(&engine, Duration::from_secs(5), |s| s.lanes[0].processed_count > 0);
    assert!(ok, "lane should resume processing orders");

    engine.shutdown();
}

#[test]
fn pause_requested_mid_order_takes_effect_once_the_lane_goes_idle() {
    let engine = Engine::start(fast_config(1, 10));

    // Wait for the single lane to actually pick up an order before pausing
    // it, so the pause request lands while the lane is assigned/processing
    // rather than idle.
    let assigned = wait_until(&engine, Duration::from_secs(5), |s| {
        s.lanes[0].current_order_id.is_some()
    });
    assert!(assigned, "lane should have picked up an order to pause mid-flight");

    engine.pause_lane(0).unwrap();

    // The in-flight order must still finish — a pause mid-order isn't a
    // cancellation.
    let finished = wait_until(&engine, Duration::from_secs(5), |s| s.lanes[0].processed_count > 0);
    assert!(finished, "order in flight when paused should still complete");

    let completed_at_pause = engine.snapshot().lanes[0].processed_count;
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(
        engine.snapshot().lanes[0].processed_count,
        completed_at_pause,
        "lane must not pick up further work once it settles into paused"
    );

    engine.resume_lane(0).unwrap();
    let resumed = wait_until(&engine, Duration::from_secs(5), |s| {
        s.lanes[0].processed_count > completed_at_pause
    });
    assert!(resumed, "lane should resume taking orders after resume_lane");

    engine.shutdown();
}

#[test]
fn orders_needing_a_depleted_ingredient_are_never_assigned() {
    // The dispatcher's retry backoff (3s per failed attempt, 20 attempts)
    // is a literal spec constant, not scaled for tests — exercising a full
    // drop-after-retry-cap cycle here would take the better part of a
    // minute. Instead this asserts the eligibility check itself: every
    // recipe on the menu needs patty or veggie_patty, so draining both
    // means nothing can ever be assigned to the lane, no matter how long
    // the generator keeps admitting orders.
    let engine = Engine::start(fast_config(1, 10));
    engine.adjust_ingredient(0, "patty", -100).unwrap();
    engine.adjust_ingredient(0, "veggie_patty", -100).unwrap();

    std::thread::sleep(Duration::from_millis(500));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.lanes[0].processed_count, 0, "lane cannot complete any recipe without a patty");
    assert_eq!(snapshot.lanes[0].current_order_id, None, "lane must stay idle, never assigned");
    assert!(snapshot.total_admitted > 0, "generator should still be admitting orders");

    engine.shutdown();
}

#[test]
fn replenish_clears_the_inventory_alert() {
    let engine = Engine::start(fast_config(1, 10));

    for ingredient in ["bacon", "jalapenos", "avocado"] {
        engine.adjust_ingredient(0, ingredient, -100).unwrap();
    }

    let ok = wait_until(&engine, Duration::from_secs(6), |s| s.lanes[0].needs_replenish);
    assert!(ok, "expected the inventory monitor to flag the lane");

    engine.replenish_lane(0).unwrap();
    assert!(!engine.snapshot().lanes[0].needs_replenish);

    // Idempotent: a second replenish is a no-op, not an error.
    engine.replenish_lane(0).unwrap();
    assert!(!engine.snapshot().lanes[0].needs_replenish);

    engine.shutdown();
}

#[test]
fn shutdown_is_prompt_even_with_a_full_fifo() {
    let engine = Engine::start(EngineConfig {
        num_lanes: 1,
        ingredient_time: Duration::from_millis(500),
        order_interval: Duration::from_millis(5),
        fifo_capacity: 4,
    });

    // Let the generator fill the bounded queue and start blocking.
    let ok = wait_until(&engine, Duration::from_secs(2), |s| s.pending_orders >= 4);
    assert!(ok, "fifo should fill to capacity");

    let started = std::time::Instant::now();
    engine.shutdown();
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "shutdown must join every thread within a bounded time"
    );
    assert!(!engine.snapshot().running);
}
