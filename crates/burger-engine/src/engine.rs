use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use rand::Rng;

use burger_core::{BurgerType, DEFAULT_MENU};

use crate::control;
use crate::dispatcher;
use crate::error::ControlError;
use crate::fifo::{Fifo, MAX_ORDERS};
use crate::generator;
use crate::lane::{Lane, MAX_LOGS_PER_LANE};
use crate::monitor;
use crate::worker;

pub const MAX_LANES: usize = 10;
pub const DEFAULT_NUM_LANES: usize = 3;
pub const DEFAULT_INGREDIENT_SECONDS: u64 = 2;
pub const DEFAULT_ORDER_INTERVAL_SECONDS: u64 = 7;

/// Tunable knobs for an [`Engine`], one-to-one with the CLI's flags.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of preparation lanes, 1..=10.
    pub num_lanes: usize,
    /// How long dispensing one ingredient takes, 1..=60 seconds.
    pub ingredient_time: Duration,
    /// How often a new order is generated, 1..=300 seconds.
    pub order_interval: Duration,
    /// FIFO capacity, capped at [`MAX_ORDERS`].
    pub fifo_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            num_lanes: DEFAULT_NUM_LANES,
            ingredient_time: Duration::from_secs(DEFAULT_INGREDIENT_SECONDS),
            order_interval: Duration::from_secs(DEFAULT_ORDER_INTERVAL_SECONDS),
            fifo_capacity: MAX_ORDERS,
        }
    }
}

impl EngineConfig {
    fn clamped(mut self) -> EngineConfig {
        self.num_lanes = self.num_lanes.clamp(1, MAX_LANES);
        self.fifo_capacity = self.fifo_capacity.clamp(1, MAX_ORDERS);
        self
    }
}

/// Lifecycle and state-transition events a status display or control panel
/// would subscribe to. Delivered over a plain `mpsc` channel since this
/// engine has exactly one real subscriber at a time, unlike a broadcast
/// fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    OrderCreated { order_id: u64 },
    OrderAssigned { order_id: u64, lane: usize },
    OrderCompleted { order_id: u64, lane: usize },
    OrderDropped { order_id: u64 },
    LanePaused { lane: usize },
    LaneResumed { lane: usize },
    InventoryAlert { lane: usize, low_count: usize },
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct LaneSnapshot {
    pub id: usize,
    pub stage: &'static str,
    pub display_state: String,
    pub processed_count: u64,
    pub current_order_id: Option<u64>,
    pub current_ingredient: Option<&'static str>,
    pub needs_replenish: bool,
    pub recent_logs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub running: bool,
    pub pending_orders: usize,
    pub total_admitted: u64,
    pub total_completed: u64,
    pub total_dropped: u64,
    pub lanes: Vec<LaneSnapshot>,
}

/// Shared state reachable from every background thread. Never exposed
/// outside the crate; callers interact through [`Engine`]'s methods.
pub(crate) struct Shared {
    pub lanes: Vec<Lane>,
    pub fifo: Fifo,
    pub running: AtomicBool,
    pub menu: &'static [BurgerType],
    pub config: EngineConfig,
    /// Engine-global counters. The spec allows a single lock guarding
    /// these two fields; atomics give the same serialization without
    /// a dedicated mutex.
    pub total_admitted: AtomicU64,
    pub total_completed: AtomicU64,
    pub total_dropped: AtomicU64,
    event_tx: mpsc::Sender<EngineEvent>,
}

impl Shared {
    pub(crate) fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

/// The running plant: a handle to the shared state plus the background
/// threads it owns. Dropping an `Engine` does not stop it — call
/// [`Engine::shutdown`] explicitly, mirroring an explicit `request_stop`
/// over a stop-on-drop design.
pub struct Engine {
    pub(crate) shared: Arc<Shared>,
    events: Mutex<mpsc::Receiver<EngineEvent>>,
    threads: Mutex<Vec<JoinHandle<()>>>,
}

impl Engine {
    /// Spawns `num_lanes + 3` threads (one worker per lane, plus the order
    /// generator, the dispatcher, and the inventory monitor) and returns a
    /// handle to the running plant.
    pub fn start(config: EngineConfig) -> Engine {
        let config = config.clamped();
        let (event_tx, event_rx) = mpsc::channel();

        let lanes = (0..config.num_lanes).map(Lane::new).collect();
        let shared = Arc::new(Shared {
            lanes,
            fifo: Fifo::new(config.fifo_capacity),
            running: AtomicBool::new(true),
            menu: &DEFAULT_MENU,
            config,
            total_admitted: AtomicU64::new(0),
            total_completed: AtomicU64::new(0),
            total_dropped: AtomicU64::new(0),
            event_tx,
        });

        let mut threads = Vec::new();
        for lane_id in 0..shared.lanes.len() {
            let shared = shared.clone();
            threads.push(std::thread::spawn(move || worker::run(shared, lane_id)));
        }
        {
            let shared = shared.clone();
            threads.push(std::thread::spawn(move || generator::run(shared)));
        }
        {
            let shared = shared.clone();
            threads.push(std::thread::spawn(move || dispatcher::run(shared)));
        }
        {
            let shared = shared.clone();
            threads.push(std::thread::spawn(move || monitor::run(shared)));
        }

        tracing::info!(num_lanes = shared.lanes.len(), "engine started");
        Engine {
            shared,
            events: Mutex::new(event_rx),
            threads: Mutex::new(threads),
        }
    }

    /// Blocks up to `timeout` for the next event, returning `None` if none
    /// arrives in time.
    pub fn recv_event(&self, timeout: Duration) -> Option<EngineEvent> {
        self.events.lock().unwrap().recv_timeout(timeout).ok()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        let lanes = self
            .shared
            .lanes
            .iter()
            .map(|lane| {
                let inner = lane.lock();
                LaneSnapshot {
                    id: lane.id,
                    stage: inner.stage.as_str(),
                    display_state: inner.display_state.clone(),
                    processed_count: inner.processed_count,
                    current_order_id: inner.current_order.as_ref().map(|o| o.id),
                    current_ingredient: inner.current_ingredient.map(|k| k.name()),
                    needs_replenish: inner.needs_replenish,
                    recent_logs: inner
                        .logs
                        .iter()
                        .rev()
                        .take(MAX_LOGS_PER_LANE)
                        .map(|entry| {
                            format!(
                                "[{}] {}",
                                entry.wall_clock.format("%H:%M:%S"),
                                entry.message
                            )
                        })
                        .collect(),
                }
            })
            .collect();

        StatusSnapshot {
            running: self.shared.running.load(Ordering::Acquire),
            pending_orders: self.shared.fifo.len(),
            total_admitted: self.shared.total_admitted.load(Ordering::Relaxed),
            total_completed: self.shared.total_completed.load(Ordering::Relaxed),
            total_dropped: self.shared.total_dropped.load(Ordering::Relaxed),
            lanes,
        }
    }

    pub fn pause_lane(&self, index: usize) -> Result<(), ControlError> {
        control::pause_lane(&self.shared, index)?;
        self.shared.emit(EngineEvent::LanePaused { lane: index });
        Ok(())
    }

    pub fn resume_lane(&self, index: usize) -> Result<(), ControlError> {
        control::resume_lane(&self.shared, index)?;
        self.shared.emit(EngineEvent::LaneResumed { lane: index });
        Ok(())
    }

    pub fn resume_all(&self) {
        control::resume_all(&self.shared);
    }

    pub fn replenish_lane(&self, index: usize) -> Result<(), ControlError> {
        control::replenish_lane(&self.shared, index)
    }

    /// Replenishes every lane flagged `needs_replenish`; if none are
    /// flagged, falls back to replenishing `fallback_index`. Matches the
    /// `SIGCONT` behavior documented for the control plane.
    pub fn replenish_needing_or(&self, fallback_index: usize) -> Result<usize, ControlError> {
        let replenished = control::replenish_needing_lanes(&self.shared);
        if replenished == 0 {
            control::replenish_lane(&self.shared, fallback_index)?;
            Ok(1)
        } else {
            Ok(replenished)
        }
    }

    /// `SIGCONT` behavior: replenish every lane that needs it, or one
    /// lane chosen at random if none do.
    pub fn replenish_needing_or_random(&self) -> Result<usize, ControlError> {
        let fallback = rand::rng().random_range(0..self.shared.lanes.len());
        self.replenish_needing_or(fallback)
    }

    /// `SIGUSR1` behavior: pause one lane chosen at random.
    pub fn pause_random_lane(&self) -> Result<(), ControlError> {
        let index = rand::rng().random_range(0..self.shared.lanes.len());
        self.pause_lane(index)
    }

    pub fn adjust_ingredient(
        &self,
        lane_index: usize,
        ingredient: &str,
        delta: i32,
    ) -> Result<(), ControlError> {
        control::adjust_ingredient(&self.shared, lane_index, ingredient, delta)
    }

    pub fn fill_ingredient(&self, lane_index: usize, ingredient: &str) -> Result<(), ControlError> {
        control::fill_ingredient(&self.shared, lane_index, ingredient)
    }

    pub fn num_lanes(&self) -> usize {
        self.shared.lanes.len()
    }

    /// Stops every background thread and blocks until all of them have
    /// exited. Safe to call more than once.
    pub fn shutdown(&self) {
        if self
            .shared
            .running
            .swap(false, Ordering::AcqRel)
        {
            self.shared.fifo.shutdown();
            for lane in self.shared.lanes.iter() {
                lane.notify_state_change();
            }
            self.shared.emit(EngineEvent::Shutdown);
            tracing::info!("engine shutdown requested");
        }

        let mut threads = self.threads.lock().unwrap();
        for handle in threads.drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_and_shuts_down_cleanly() {
        let engine = Engine::start(EngineConfig {
            num_lanes: 2,
            ingredient_time: Duration::from_millis(5),
            order_interval: Duration::from_millis(5),
            fifo_capacity: 4,
        });
        assert_eq!(engine.num_lanes(), 2);
        std::thread::sleep(Duration::from_millis(50));
        let snapshot = engine.snapshot();
        assert!(snapshot.running);
        engine.shutdown();
        assert!(!engine.snapshot().running);
    }

    #[test]
    fn config_clamps_lane_count() {
        let config = EngineConfig {
            num_lanes: 99,
            ..EngineConfig::default()
        }
        .clamped();
        assert_eq!(config.num_lanes, MAX_LANES);
    }
}
