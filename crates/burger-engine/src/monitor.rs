use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use burger_core::IngredientKind;

use crate::engine::{EngineEvent, Shared};
use crate::lane::Lane;

/// How often the monitor sweeps every lane's dispensers.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(15);
/// A dispenser at or below this count counts toward a lane's "low" tally.
pub const LOW_THRESHOLD: u32 = 2;
/// A lane is flagged once this many of its dispensers are individually low.
pub const LOW_DISPENSER_ALERT_COUNT: usize = 3;
/// Minimum gap between repeated alerts for the same lane.
pub const ALERT_DEBOUNCE: Duration = Duration::from_secs(30);

/// Runs on its own thread, periodically checking every lane's dispensers
/// for low stock and marking lanes that need replenishing. Emits at most
/// one alert per lane per [`ALERT_DEBOUNCE`] window.
pub(crate) fn run(shared: Arc<Shared>) {
    while shared.running.load(Ordering::Acquire) {
        for lane in shared.lanes.iter() {
            check_lane(&shared, lane);
        }

        sleep_in_slices(&shared, SWEEP_INTERVAL);
    }
}

/// Sweeps a single lane's dispensers and updates its alert state. Called
/// both by the periodic sweep above and by a worker right after it
/// finishes an order, so a lane that just drained itself gets flagged
/// without waiting for the next 15-second tick.
///
/// The dispenser scan itself never takes the lane lock — each count is
/// read through its own dispenser lock — so this can run concurrently
/// with a worker that's mid-recipe on the same lane. The lane lock is
/// only acquired for the debounce check and to stamp the alert fields.
pub(crate) fn check_lane(shared: &Shared, lane: &Lane) {
    {
        let inner = lane.lock();
        if let Some(last) = inner.last_inventory_alert_at {
            if last.elapsed() < ALERT_DEBOUNCE {
                return;
            }
        }
    }

    let out_names: Vec<&'static str> = IngredientKind::ALL
        .into_iter()
        .filter(|kind| lane.dispenser_count(*kind) == 0)
        .map(|kind| kind.name())
        .collect();
    let low_count = IngredientKind::ALL
        .into_iter()
        .filter(|kind| lane.dispenser_count(*kind) <= LOW_THRESHOLD)
        .count();

    let mut inner = lane.lock();
    if !out_names.is_empty() {
        inner.needs_replenish = true;
        inner.last_inventory_alert_at = Some(Instant::now());
        inner.log(format!("OUT OF STOCK: {}", out_names.join(", ")));
        drop(inner);
        shared.emit(EngineEvent::InventoryAlert {
            lane: lane.id,
            low_count,
        });
    } else if low_count >= LOW_DISPENSER_ALERT_COUNT {
        inner.needs_replenish = true;
        inner.last_inventory_alert_at = Some(Instant::now());
        inner.log(format!("low stock: {low_count} ingredients running low"));
        drop(inner);
        shared.emit(EngineEvent::InventoryAlert {
            lane: lane.id,
            low_count,
        });
    } else {
        inner.needs_replenish = false;
    }
}

fn sleep_in_slices(shared: &Shared, total: Duration) {
    const SLICE: Duration = Duration::from_millis(200);
    let mut remaining = total;
    while remaining > Duration::ZERO && shared.running.load(Ordering::Acquire) {
        let step = remaining.min(SLICE);
        std::thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}
