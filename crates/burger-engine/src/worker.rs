use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::engine::{EngineEvent, Shared};
use crate::lane::LaneStage;
use crate::monitor;

/// Packing/finalizing takes somewhere between one and two seconds once the
/// recipe itself is assembled.
fn packing_time() -> Duration {
    Duration::from_millis(rand::rng().random_range(1000..=2000))
}

/// Runs on its own thread, one per lane: waits for an assigned order,
/// consumes its whole recipe up front, then walks through the recipe
/// ingredient by ingredient to model dispensing time before finalizing.
///
/// Consumption happens before the per-ingredient sleep loop, not
/// interleaved with it, so the dispatcher's admission-time eligibility
/// check can't be invalidated mid-run by another lane's consumption —
/// once a lane commits to an order its dispensers are already charged for
/// it.
pub(crate) fn run(shared: Arc<Shared>, lane_id: usize) {
    let lane = &shared.lanes[lane_id];

    loop {
        let mut inner = lane.wait_for_work(&shared.running);
        if !shared.running.load(Ordering::Acquire) && !matches!(inner.stage, LaneStage::Assigned) {
            return;
        }

        let mut order = match inner.current_order.take() {
            Some(order) => order,
            None => {
                inner.go_idle();
                continue;
            }
        };
        inner.stage = LaneStage::Processing;
        drop(inner);

        for kind in order.recipe {
            lane.consume(*kind);
        }

        let mut inner = lane.lock();
        inner.log(format!("INITIATED order {}", order.id));
        drop(inner);

        for kind in order.recipe {
            if !shared.running.load(Ordering::Acquire) {
                return;
            }

            let mut inner = lane.lock();
            inner.current_ingredient = Some(*kind);
            inner.display_state = format!("ADDING {}", kind.name());
            inner.log(format!("adding {}", kind.name()));
            drop(inner);

            std::thread::sleep(shared.config.ingredient_time);
            order.progress_step += 1;
        }

        let mut inner = lane.lock();
        inner.stage = LaneStage::Finalizing;
        inner.current_ingredient = None;
        inner.display_state = format!("FINALIZING {}", order.burger_name);
        inner.log("READY".to_string());
        drop(inner);

        std::thread::sleep(packing_time());

        let mut inner = lane.lock();
        inner.processed_count += 1;
        inner.current_order = None;
        inner.go_idle();
        inner.log(format!("completed order {}", order.id));
        drop(inner);

        shared.total_completed.fetch_add(1, Ordering::Relaxed);
        shared.emit(EngineEvent::OrderCompleted {
            order_id: order.id,
            lane: lane_id,
        });

        monitor::check_lane(&shared, lane);
    }
}
