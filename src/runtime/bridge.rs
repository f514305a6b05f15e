//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI loop never awaits. It hands commands to a worker thread that
//! owns a Tokio runtime and drains the resulting events once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::api::{Backend, SystemStatus, Tool};
use crate::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Fetch `/api/status`
    CheckStatus,
    /// Fetch `/api/tools`
    LoadTools,
    /// Post a quick test message
    QuickTest { message: String },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    StatusReady(SystemStatus),
    StatusFailed { message: String },
    ToolsReady(Vec<Tool>),
    ToolsFailed { message: String },
    /// Quick test succeeded; `response` is the backend's reply text, if any
    TestSucceeded { response: Option<String> },
    /// Quick test failed; `message` is ready for display
    TestFailed { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread. `status_refresh` enables periodic status
    /// checks in addition to the explicit ones.
    pub fn new(
        backend: Arc<dyn Backend>,
        status_refresh: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(2)
            .thread_name("botdash-worker")
            .build()?;

        thread::Builder::new()
            .name("botdash-runtime".to_string())
            .spawn(move || {
                rt.block_on(run_async_worker(backend, cmd_rx, evt_tx, status_refresh));
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
