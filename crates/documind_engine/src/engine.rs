use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use documind_core::TimerId;
use documind_logging::{dm_debug, dm_trace, dm_warn};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::{EngineCommand, EngineError, EngineEvent};

/// Live timers keyed by id. The generation tells a replaced timer's task apart
/// from the one that replaced it.
#[derive(Debug, Default)]
struct TimerTable {
    next_generation: u64,
    live: HashMap<TimerId, (u64, CancellationToken)>,
}

impl TimerTable {
    fn insert(&mut self, timer: TimerId) -> (u64, CancellationToken) {
        self.next_generation += 1;
        let token = CancellationToken::new();
        if let Some((_, previous)) = self
            .live
            .insert(timer, (self.next_generation, token.clone()))
        {
            previous.cancel();
        }
        (self.next_generation, token)
    }

    fn cancel(&mut self, timer: TimerId) -> bool {
        match self.live.remove(&timer) {
            Some((_, token)) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Removes the entry if it still belongs to `generation`.
    fn complete(&mut self, timer: TimerId, generation: u64) -> bool {
        match self.live.get(&timer) {
            Some((current, _)) if *current == generation => {
                self.live.remove(&timer);
                true
            }
            _ => false,
        }
    }
}

type SharedTable = Arc<Mutex<TimerTable>>;

/// Cloneable sending half of an [`EngineHandle`].
#[derive(Clone)]
pub struct EngineCommander {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineCommander {
    pub fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            dm_warn!("Engine thread is gone; dropped {:?}", command);
        }
    }

    pub fn start_timer(&self, timer: TimerId, delay: Duration) {
        self.send(EngineCommand::StartTimer { timer, delay });
    }

    pub fn cancel_timer(&self, timer: TimerId) {
        self.send(EngineCommand::CancelTimer { timer });
    }
}

/// Runs real-time timers on a background tokio runtime and reports expiries
/// over a channel the app loop drains.
pub struct EngineHandle {
    commander: EngineCommander,
    event_rx: mpsc::Receiver<EngineEvent>,
    table: SharedTable,
}

impl EngineHandle {
    pub fn new() -> Result<Self, EngineError> {
        let runtime = Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let table = SharedTable::default();

        let worker_table = table.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &worker_table, command, &event_tx);
            }
            dm_debug!("Engine command channel closed; shutting down timers");
        });

        Ok(Self {
            commander: EngineCommander { cmd_tx },
            event_rx,
            table,
        })
    }

    pub fn commander(&self) -> EngineCommander {
        self.commander.clone()
    }

    pub fn send(&self, command: EngineCommand) {
        self.commander.send(command);
    }

    pub fn start_timer(&self, timer: TimerId, delay: Duration) {
        self.commander.start_timer(timer, delay);
    }

    pub fn cancel_timer(&self, timer: TimerId) {
        self.commander.cancel_timer(timer);
    }

    /// Number of timers that are scheduled and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.table.lock().map(|t| t.live.len()).unwrap_or(0)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Splits the handle so commands and events can live on different threads.
    /// The worker stops once every commander is dropped, which then
    /// disconnects the event stream.
    pub fn into_parts(self) -> (EngineCommander, EngineEvents) {
        (
            self.commander,
            EngineEvents {
                event_rx: self.event_rx,
            },
        )
    }
}

/// Receiving half of an [`EngineHandle`].
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks for the next event. `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

fn handle_command(
    runtime: &Runtime,
    table: &SharedTable,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::StartTimer { timer, delay } => {
            let Ok(mut guard) = table.lock() else {
                dm_warn!("Timer table poisoned; {} not started", timer);
                return;
            };
            let (generation, token) = guard.insert(timer);
            drop(guard);

            let table = table.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        dm_trace!("{} cancelled", timer);
                    }
                    _ = tokio::time::sleep(delay) => {
                        let current = table
                            .lock()
                            .map(|mut t| t.complete(timer, generation))
                            .unwrap_or(false);
                        if current {
                            let _ = event_tx.send(EngineEvent::TimerElapsed { timer });
                        }
                    }
                }
            });
        }
        EngineCommand::CancelTimer { timer } => {
            let cancelled = table.lock().map(|mut t| t.cancel(timer)).unwrap_or(false);
            if !cancelled {
                dm_trace!("Cancel for inactive {} ignored", timer);
            }
        }
    }
}
