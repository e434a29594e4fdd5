use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use burger_core::Order;

use crate::engine::{EngineEvent, Shared};

/// Runs on its own thread, creating a new order from a uniformly random
/// burger type every `order_interval` and pushing it onto the shared FIFO.
/// Stops as soon as it notices `running` has gone false, waking from a
/// blocked `enqueue` by the FIFO's own shutdown broadcast if the queue
/// happened to be full.
pub(crate) fn run(shared: Arc<Shared>) {
    let interval = shared.config.order_interval;

    while shared.running.load(Ordering::Acquire) {
        let index = rand::rng().random_range(0..shared.menu.len());
        let burger = &shared.menu[index];

        let order = Order::new(burger);
        let order_id = order.id;
        shared.total_admitted.fetch_add(1, Ordering::Relaxed);
        if shared.fifo.enqueue(order) {
            shared.emit(EngineEvent::OrderCreated { order_id });
        }

        sleep_in_slices(&shared, interval);
    }
}

/// Sleeps in short slices instead of one long call so shutdown is noticed
/// promptly instead of after a full order interval.
fn sleep_in_slices(shared: &Shared, total: Duration) {
    const SLICE: Duration = Duration::from_millis(100);
    let mut remaining = total;
    while remaining > Duration::ZERO && shared.running.load(Ordering::Acquire) {
        let step = remaining.min(SLICE);
        std::thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}
