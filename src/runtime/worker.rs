//! Async worker - runs in Tokio runtime and performs the backend calls

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::api::Backend;
use crate::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// How often the command channel is drained
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Shown when a failed test reply carries no error text
pub const TEST_FAILED_FALLBACK: &str = "测试失败";

/// Run the async worker loop until `Shutdown` or the TUI side hangs up.
///
/// Every command becomes its own task: overlapping requests are neither
/// queued nor de-duplicated, and their events arrive in completion order.
pub async fn run_async_worker(
    backend: Arc<dyn Backend>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
    status_refresh: Option<Duration>,
) {
    let mut poll = interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let status_refresh = status_refresh.filter(|period| !period.is_zero());
    let mut next_status_refresh = status_refresh.map(|period| Instant::now() + period);

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(RuntimeCommand::Shutdown) => {
                    tracing::debug!("worker shutdown requested");
                    return;
                }
                Ok(cmd) => dispatch(cmd, &backend, &evt_tx),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }

        if let (Some(period), Some(due)) = (status_refresh, next_status_refresh) {
            if Instant::now() >= due {
                dispatch(RuntimeCommand::CheckStatus, &backend, &evt_tx);
                next_status_refresh = Some(Instant::now() + period);
            }
        }

        poll.tick().await;
    }
}

fn dispatch(cmd: RuntimeCommand, backend: &Arc<dyn Backend>, evt_tx: &Sender<RuntimeEvent>) {
    let backend = Arc::clone(backend);
    let evt_tx = evt_tx.clone();

    match cmd {
        RuntimeCommand::CheckStatus => {
            tokio::spawn(async move {
                let event = match backend.status().await {
                    Ok(status) => RuntimeEvent::StatusReady(status),
                    Err(err) => RuntimeEvent::StatusFailed {
                        message: err.to_string(),
                    },
                };
                let _ = evt_tx.send(event);
            });
        }

        RuntimeCommand::LoadTools => {
            tokio::spawn(async move {
                let event = match backend.tools().await {
                    Ok(tools) => RuntimeEvent::ToolsReady(tools),
                    Err(err) => RuntimeEvent::ToolsFailed {
                        message: err.to_string(),
                    },
                };
                let _ = evt_tx.send(event);
            });
        }

        RuntimeCommand::QuickTest { message } => {
            tokio::spawn(async move {
                let event = match backend.send_test(&message).await {
                    Ok(response) => RuntimeEvent::TestSucceeded { response },
                    Err(err) => RuntimeEvent::TestFailed {
                        message: err.user_message(TEST_FAILED_FALLBACK),
                    },
                };
                let _ = evt_tx.send(event);
            });
        }

        RuntimeCommand::Shutdown => {}
    }
}
