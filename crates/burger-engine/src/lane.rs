use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use burger_core::{Dispenser, IngredientKind, Order};

/// Every log ring keeps at most this many recent entries.
pub const MAX_LOGS_PER_LANE: usize = 10;

/// What a lane is doing right now, for status display and the control
/// plane's eligibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneStage {
    Idle,
    Paused,
    Assigned,
    Processing,
    Finalizing,
}

impl LaneStage {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            LaneStage::Idle => "idle",
            LaneStage::Paused => "paused",
            LaneStage::Assigned => "assigned",
            LaneStage::Processing => "processing",
            LaneStage::Finalizing => "finalizing",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LogEntry {
    pub message: String,
    pub at: Instant,
    pub wall_clock: chrono::DateTime<chrono::Local>,
}

/// The mutable, lock-protected part of a lane's state. Everything a worker
/// thread or the control plane reads or writes lives here, behind the
/// lane's single mutex — everything *except* the dispensers, which get
/// their own per-ingredient locks (see [`Lane::dispensers`]) so the
/// inventory monitor can read stock levels without contending with this
/// lock at all.
pub(crate) struct LaneInner {
    pub stage: LaneStage,
    /// Set and cleared by the control plane independently of `stage`. A
    /// lane paused mid-order keeps working `stage` through to completion;
    /// `paused` is what the worker consults the next time it would
    /// otherwise go back to `Idle`.
    pub paused: bool,
    pub processed_count: u64,
    pub current_order: Option<Order>,
    pub logs: VecDeque<LogEntry>,
    pub needs_replenish: bool,
    pub last_inventory_alert_at: Option<Instant>,
    pub current_ingredient: Option<IngredientKind>,
    /// Human-readable status line for the renderer, e.g. `"ADDING cheese"`.
    /// Distinct from `stage`: the renderer wants the ingredient name baked
    /// into the text, not just the state machine's coarse label.
    pub display_state: String,
}

impl LaneInner {
    fn new() -> LaneInner {
        LaneInner {
            stage: LaneStage::Idle,
            paused: false,
            processed_count: 0,
            current_order: None,
            logs: VecDeque::with_capacity(MAX_LOGS_PER_LANE),
            needs_replenish: false,
            last_inventory_alert_at: None,
            current_ingredient: None,
            display_state: "IDLE".to_string(),
        }
    }

    pub(crate) fn log(&mut self, message: impl Into<String>) {
        if self.logs.len() >= MAX_LOGS_PER_LANE {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            message: message.into(),
            at: Instant::now(),
            wall_clock: chrono::Local::now(),
        });
    }

    /// Returns the lane to the stage it should sit in while there's no
    /// order in hand — `Paused` if the control plane set the flag at any
    /// point since, `Idle` otherwise. Every place the worker would set
    /// `stage = Idle` should call this instead, so a pause requested mid-
    /// order isn't lost by the time the lane gets back around to it.
    pub(crate) fn go_idle(&mut self) {
        if self.paused {
            self.stage = LaneStage::Paused;
            self.display_state = "PAUSED".to_string();
        } else {
            self.stage = LaneStage::Idle;
            self.display_state = "IDLE".to_string();
        }
    }
}

/// One preparation lane: a worker thread's private kitchen, a set of
/// ingredient dispensers, and a single condvar the control plane, the
/// dispatcher, and the worker itself all wait and signal on.
///
/// `active` is reserved — always `true`, never mutated by this
/// implementation — kept because the data model names it.
///
/// Dispensers are locked one at a time, independently of `inner`: a lane
/// lock is only needed for display state, the current assignment, the
/// pause flag, and the log ring. This lets the inventory monitor read
/// every dispenser's count without ever touching the lane lock the
/// worker spends most of its time holding.
pub(crate) struct Lane {
    pub id: usize,
    pub active: bool,
    dispensers: [Mutex<Dispenser>; IngredientKind::ALL.len()],
    inner: Mutex<LaneInner>,
    state_cv: Condvar,
}

impl Lane {
    pub(crate) fn new(id: usize) -> Lane {
        Lane {
            id,
            active: true,
            dispensers: IngredientKind::ALL.map(|kind| Mutex::new(Dispenser::full(kind))),
            inner: Mutex::new(LaneInner::new()),
            state_cv: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> std::sync::MutexGuard<'_, LaneInner> {
        self.inner.lock().unwrap()
    }

    /// Current count for one ingredient. Takes only that dispenser's lock.
    pub(crate) fn dispenser_count(&self, kind: IngredientKind) -> u32 {
        self.dispensers[kind as usize].lock().unwrap().count()
    }

    /// Consumes one unit of `kind`, clamped at zero. Takes only that
    /// dispenser's lock, never the lane lock.
    pub(crate) fn consume(&self, kind: IngredientKind) -> bool {
        self.dispensers[kind as usize].lock().unwrap().consume_one()
    }

    /// Tops every dispenser on the lane back up to capacity.
    pub(crate) fn replenish_all(&self) {
        for dispenser in self.dispensers.iter() {
            dispenser.lock().unwrap().fill();
        }
    }

    /// Applies a signed delta to one dispenser, clamped into `[0, capacity]`.
    pub(crate) fn adjust(&self, kind: IngredientKind, delta: i32) {
        let mut dispenser = self.dispensers[kind as usize].lock().unwrap();
        if delta >= 0 {
            dispenser.replenish(delta as u32);
        } else {
            for _ in 0..delta.unsigned_abs() {
                dispenser.consume_one();
            }
        }
    }

    /// Fills a single dispenser to capacity.
    pub(crate) fn fill(&self, kind: IngredientKind) {
        self.dispensers[kind as usize].lock().unwrap().fill();
    }

    pub(crate) fn is_idle(&self) -> bool {
        matches!(self.lock().stage, LaneStage::Idle)
    }

    pub(crate) fn is_paused(&self) -> bool {
        matches!(self.lock().stage, LaneStage::Paused)
    }

    /// Sets the pause flag unconditionally, regardless of what the lane is
    /// doing right now. A lane mid-order keeps running that order; `go_idle`
    /// is what turns the flag into a `Paused` stage once there's no order
    /// left to finish.
    pub(crate) fn pause(&self) {
        let mut inner = self.lock();
        inner.paused = true;
        if matches!(inner.stage, LaneStage::Idle) {
            inner.go_idle();
            inner.log("paused");
        }
        drop(inner);
        self.state_cv.notify_all();
    }

    pub(crate) fn resume(&self) {
        let mut inner = self.lock();
        inner.paused = false;
        if matches!(inner.stage, LaneStage::Paused) {
            inner.go_idle();
            inner.log("resumed");
        }
        drop(inner);
        self.state_cv.notify_all();
    }

    /// Wakes anyone waiting on this lane's state — used by the dispatcher
    /// after assigning an order, by `resume`, and by engine shutdown.
    pub(crate) fn notify_state_change(&self) {
        self.state_cv.notify_all();
    }

    /// Blocks the calling worker thread until this lane has an order
    /// assigned to it, or `running` goes false. Re-checks `running`
    /// periodically rather than only on notification, so a shutdown that
    /// races the condvar broadcast is still noticed promptly.
    pub(crate) fn wait_for_work(&self, running: &AtomicBool) -> std::sync::MutexGuard<'_, LaneInner> {
        let mut inner = self.lock();
        while running.load(Ordering::Acquire) && !matches!(inner.stage, LaneStage::Assigned) {
            let (guard, _) = self
                .state_cv
                .wait_timeout(inner, Duration::from_millis(200))
                .unwrap();
            inner = guard;
        }
        inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_takes_effect_immediately_from_idle() {
        let lane = Lane::new(0);
        lane.pause();
        assert!(lane.is_paused());
    }

    #[test]
    fn pause_during_processing_persists_until_the_lane_goes_idle() {
        let lane = Lane::new(0);
        lane.lock().stage = LaneStage::Processing;
        lane.pause();
        // stage is untouched while the order is still in flight...
        assert!(matches!(lane.lock().stage, LaneStage::Processing));
        assert!(lane.lock().paused);
        // ...but the flag is remembered once the worker returns to idle.
        lane.lock().go_idle();
        assert!(lane.is_paused());
    }

    #[test]
    fn resume_is_idempotent() {
        let lane = Lane::new(0);
        lane.resume();
        lane.resume();
        assert!(lane.is_idle());
    }

    #[test]
    fn dispensers_are_independent_of_the_lane_lock() {
        use burger_core::DEFAULT_CAPACITY;

        let lane = Lane::new(0);
        assert_eq!(lane.dispenser_count(IngredientKind::Cheese), DEFAULT_CAPACITY);
        assert!(lane.consume(IngredientKind::Cheese));
        assert_eq!(lane.dispenser_count(IngredientKind::Cheese), DEFAULT_CAPACITY - 1);
        lane.replenish_all();
        assert_eq!(lane.dispenser_count(IngredientKind::Cheese), DEFAULT_CAPACITY);
        lane.adjust(IngredientKind::Cheese, -1000);
        assert_eq!(lane.dispenser_count(IngredientKind::Cheese), 0);
        lane.fill(IngredientKind::Cheese);
        assert_eq!(lane.dispenser_count(IngredientKind::Cheese), DEFAULT_CAPACITY);
    }

    #[test]
    fn log_ring_caps_at_ten_entries() {
        let lane = Lane::new(0);
        let mut inner = lane.lock();
        for i in 0..25 {
            inner.log(format!("event {i}"));
        }
        assert_eq!(inner.logs.len(), MAX_LOGS_PER_LANE);
        assert_eq!(inner.logs.back().unwrap().message, "event 24");
    }
}
