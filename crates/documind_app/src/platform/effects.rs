use std::sync::mpsc;
use std::thread;

use chrono::Local;
use documind_core::{Effect, Msg};
use documind_engine::{EngineCommander, EngineError, EngineEvent, EngineEvents, EngineHandle};
use documind_logging::{dm_debug, dm_trace};

use super::app::AppEvent;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineCommander,
}

impl EffectRunner {
    pub fn new(event_tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::new()?.into_parts();
        spawn_event_loop(events, event_tx);
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartTimer { timer, delay } => {
                    dm_trace!("StartTimer {} delay={:?}", timer, delay);
                    self.engine.start_timer(timer, delay);
                }
                Effect::CancelTimer { timer } => {
                    dm_trace!("CancelTimer {}", timer);
                    self.engine.cancel_timer(timer);
                }
            }
        }
    }
}

/// Forwards engine events until the engine shuts down or the app stops listening.
fn spawn_event_loop(events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            dm_debug!("Engine event: {}", event);
            let msg = match event {
                EngineEvent::TimerElapsed { timer } => Msg::TimerFired {
                    timer,
                    at: Local::now().naive_local(),
                },
            };
            if event_tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        }
        dm_debug!("Engine event stream closed");
    });
}
