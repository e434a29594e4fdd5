use burger_engine::StatusSnapshot;

/// Prints the plant's current status as plain text lines.
///
/// The real terminal renderer is a separate process in this system; this
/// is the minimal stand-in the CLI itself needs, in the spirit of the
/// teacher's `--no-tui` fallback (plain `println!` status lines, no raw
/// terminal mode or redraw-in-place).
pub fn print_snapshot(snapshot: &StatusSnapshot) {
    println!(
        "-- plant status -- running={} pending={} admitted={} completed={} dropped={}",
        snapshot.running,
        snapshot.pending_orders,
        snapshot.total_admitted,
        snapshot.total_completed,
        snapshot.total_dropped
    );
    for lane in &snapshot.lanes {
        let order = lane
            .current_order_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let ingredient = lane.current_ingredient.unwrap_or("-");
        println!(
            "  lane {:>2} [{:<10}] order={:<6} ingredient={:<14} processed={:<5} replenish={}",
            lane.id, lane.stage, order, ingredient, lane.processed_count, lane.needs_replenish
        );
    }
}

/// Prints a single event line, used for the lifecycle/alert stream.
pub fn print_event(event: &burger_engine::EngineEvent) {
    println!("event: {event:?}");
}
