use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// A control-plane action requested by a POSIX signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// `SIGINT` or `SIGTERM`: stop the plant.
    Shutdown,
    /// `SIGUSR1`: pause one lane, chosen at random.
    PauseRandomLane,
    /// `SIGUSR2`: resume every paused lane.
    ResumeAll,
    /// `SIGCONT`: replenish lanes that need it, or one at random if none do.
    Replenish,
}

/// Spawns one tokio task per handled signal, each forwarding onto `tx` as
/// it fires. Mirrors the teacher's `spawn_ctrl_c_handler` shape, generalized
/// from a single `ctrl_c()` loop to the plant's full signal set.
pub fn spawn(tx: mpsc::UnboundedSender<ControlSignal>) -> anyhow::Result<()> {
    spawn_one(SignalKind::interrupt(), ControlSignal::Shutdown, tx.clone())?;
    spawn_one(SignalKind::terminate(), ControlSignal::Shutdown, tx.clone())?;
    spawn_one(SignalKind::user_defined1(), ControlSignal::PauseRandomLane, tx.clone())?;
    spawn_one(SignalKind::user_defined2(), ControlSignal::ResumeAll, tx.clone())?;
    spawn_one(SignalKind::from_raw(libc::SIGCONT), ControlSignal::Replenish, tx)?;
    Ok(())
}

fn spawn_one(
    kind: SignalKind,
    event: ControlSignal,
    tx: mpsc::UnboundedSender<ControlSignal>,
) -> anyhow::Result<()> {
    let mut stream = signal(kind)?;
    tokio::spawn(async move {
        while stream.recv().await.is_some() {
            if tx.send(event).is_err() {
                break;
            }
        }
    });
    Ok(())
}
