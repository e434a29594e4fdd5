#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

//! The concurrent order-dispatch and lane-processing engine: a bounded
//! FIFO of incoming orders, an order generator, a dispatcher handing
//! orders to idle lanes, one worker thread per lane, and a background
//! inventory monitor — plus the control-plane operations a status display
//! or signal handler drives.

mod control;
mod dispatcher;
mod engine;
mod error;
mod fifo;
mod generator;
mod lane;
mod monitor;
mod worker;

pub use dispatcher::RETRY_CAP;
pub use engine::{
    Engine, EngineConfig, EngineEvent, LaneSnapshot, StatusSnapshot, DEFAULT_INGREDIENT_SECONDS,
    DEFAULT_NUM_LANES, DEFAULT_ORDER_INTERVAL_SECONDS, MAX_LANES,
};
pub use error::ControlError;
pub use fifo::MAX_ORDERS;
pub use lane::{LaneStage, MAX_LOGS_PER_LANE};
pub use monitor::{ALERT_DEBOUNCE, LOW_DISPENSER_ALERT_COUNT, LOW_THRESHOLD, SWEEP_INTERVAL};
