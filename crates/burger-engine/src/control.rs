use burger_core::IngredientKind;

use crate::engine::Shared;
use crate::error::ControlError;

fn lane_or_err(shared: &Shared, index: usize) -> Result<&crate::lane::Lane, ControlError> {
    shared
        .lanes
        .get(index)
        .ok_or(ControlError::LaneIndexOutOfRange {
            index,
            num_lanes: shared.lanes.len(),
        })
}

pub(crate) fn pause_lane(shared: &Shared, index: usize) -> Result<(), ControlError> {
    lane_or_err(shared, index)?.pause();
    Ok(())
}

pub(crate) fn resume_lane(shared: &Shared, index: usize) -> Result<(), ControlError> {
    lane_or_err(shared, index)?.resume();
    Ok(())
}

pub(crate) fn resume_all(shared: &Shared) {
    for lane in shared.lanes.iter() {
        lane.resume();
    }
}

/// Tops off every dispenser on a lane flagged `needs_replenish`. If no lane
/// needs it, replenishes one lane chosen by the caller-supplied fallback
/// index (used by the `SIGCONT` handler, which falls back to a random lane).
pub(crate) fn replenish_lane(shared: &Shared, index: usize) -> Result<(), ControlError> {
    let lane = lane_or_err(shared, index)?;
    lane.replenish_all();
    let mut inner = lane.lock();
    inner.needs_replenish = false;
    inner.last_inventory_alert_at = None;
    inner.log("REPLENISHED");
    Ok(())
}

pub(crate) fn replenish_needing_lanes(shared: &Shared) -> usize {
    let mut replenished = 0;
    for lane in shared.lanes.iter() {
        let mut inner = lane.lock();
        if inner.needs_replenish {
            drop(inner);
            lane.replenish_all();
            inner = lane.lock();
            inner.needs_replenish = false;
            inner.last_inventory_alert_at = None;
            inner.log("REPLENISHED");
            replenished += 1;
        }
    }
    replenished
}

pub(crate) fn adjust_ingredient(
    shared: &Shared,
    lane_index: usize,
    ingredient: &str,
    delta: i32,
) -> Result<(), ControlError> {
    let lane = lane_or_err(shared, lane_index)?;
    let kind = IngredientKind::by_name(ingredient)
        .ok_or_else(|| ControlError::IngredientUnknown(ingredient.to_string()))?;
    lane.adjust(kind, delta);
    Ok(())
}

pub(crate) fn fill_ingredient(
    shared: &Shared,
    lane_index: usize,
    ingredient: &str,
) -> Result<(), ControlError> {
    let lane = lane_or_err(shared, lane_index)?;
    let kind = IngredientKind::by_name(ingredient)
        .ok_or_else(|| ControlError::IngredientUnknown(ingredient.to_string()))?;
    lane.fill(kind);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig};

    #[test]
    fn pause_lane_rejects_out_of_range_index() {
        let engine = Engine::start(EngineConfig {
            num_lanes: 2,
            ..EngineConfig::default()
        });
        let err = pause_lane(&engine.shared, 5).unwrap_err();
        assert_eq!(
            err,
            ControlError::LaneIndexOutOfRange {
                index: 5,
                num_lanes: 2
            }
        );
        engine.shutdown();
    }

    #[test]
    fn adjust_ingredient_rejects_unknown_name() {
        let engine = Engine::start(EngineConfig {
            num_lanes: 1,
            ..EngineConfig::default()
        });
        let err = adjust_ingredient(&engine.shared, 0, "not_real", 5).unwrap_err();
        assert!(matches!(err, ControlError::IngredientUnknown(_)));
        engine.shutdown();
    }
}
