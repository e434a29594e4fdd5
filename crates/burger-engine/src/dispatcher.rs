use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::{EngineEvent, Shared};
use crate::lane::LaneStage;

/// Maximum number of assignment attempts before an order is dropped.
pub const RETRY_CAP: u32 = 20;

/// Backoff after finding the FIFO empty.
const EMPTY_QUEUE_BACKOFF: Duration = Duration::from_millis(200);
/// Backoff after finding no eligible (idle, unpaused) lane.
const NO_LANE_BACKOFF: Duration = Duration::from_secs(3);

/// Runs on its own thread: pulls one order at a time off the FIFO and hands
/// it to the lowest-indexed eligible lane — idle, unpaused, and stocked
/// with every ingredient the order's recipe needs. An order that finds no
/// eligible lane is re-admitted at the tail and retried, up to
/// [`RETRY_CAP`] times, after which it is dropped and logged.
pub(crate) fn run(shared: Arc<Shared>) {
    while shared.running.load(Ordering::Acquire) {
        let Some(mut order) = shared.fifo.dequeue_timeout(EMPTY_QUEUE_BACKOFF) else {
            continue;
        };

        order.assignment_attempts += 1;

        let mut assigned = false;
        for lane in shared.lanes.iter() {
            let mut inner = lane.lock();
            let eligible = lane.active
                && matches!(inner.stage, LaneStage::Idle)
                && order
                    .recipe
                    .iter()
                    .all(|kind| lane.dispenser_count(*kind) > 0);
            if eligible {
                order.assigned_lane = Some(lane.id);
                inner.current_order = Some(order.clone());
                inner.stage = LaneStage::Assigned;
                inner.display_state = format!("PREPARING {}", order.burger_name);
                inner.log(format!("ASSIGNED order {}", order.id));
                drop(inner);
                lane.notify_state_change();
                shared.emit(EngineEvent::OrderAssigned {
                    order_id: order.id,
                    lane: lane.id,
                });
                assigned = true;
                break;
            }
        }

        if assigned {
            continue;
        }

        if order.assignment_attempts >= RETRY_CAP {
            tracing::warn!(order_id = order.id, "dropping order after retry cap reached");
            shared.total_dropped.fetch_add(1, Ordering::Relaxed);
            shared.emit(EngineEvent::OrderDropped { order_id: order.id });
            continue;
        }

        // Re-admit at the tail, behind every order already waiting, not at
        // the front — and through the normal capacity-respecting path so a
        // racing generator can never push the queue past its cap.
        if !shared.fifo.enqueue(order) {
            continue;
        }
        sleep_in_slices(&shared, NO_LANE_BACKOFF);
    }
}

fn sleep_in_slices(shared: &Shared, total: Duration) {
    const SLICE: Duration = Duration::from_millis(100);
    let mut remaining = total;
    while remaining > Duration::ZERO && shared.running.load(Ordering::Acquire) {
        let step = remaining.min(SLICE);
        std::thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}
