use std::sync::Once;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use documind_core::TimerId;
use documind_engine::{EngineCommand, EngineEvent, EngineHandle};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(documind_logging::initialize_for_tests);
}

const WAIT: Duration = Duration::from_secs(2);

#[test]
fn started_timer_reports_elapsed() {
    init_logging();
    let engine = EngineHandle::new().expect("engine");
    engine.start_timer(TimerId(1), Duration::from_millis(20));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { timer: TimerId(1) })
    );
    assert_eq!(engine.pending(), 0);
}

#[test]
fn cancelled_timer_never_fires() {
    init_logging();
    let engine = EngineHandle::new().expect("engine");
    engine.start_timer(TimerId(1), Duration::from_millis(150));
    engine.start_timer(TimerId(2), Duration::from_millis(250));
    engine.cancel_timer(TimerId(1));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { timer: TimerId(2) })
    );
    assert_eq!(engine.try_recv(), None);
}

#[test]
fn timers_fire_in_deadline_order() {
    init_logging();
    let engine = EngineHandle::new().expect("engine");
    engine.send(EngineCommand::StartTimer {
        timer: TimerId(5),
        delay: Duration::from_millis(200),
    });
    engine.send(EngineCommand::StartTimer {
        timer: TimerId(6),
        delay: Duration::from_millis(20),
    });

    let fired: Vec<_> = (0..2).filter_map(|_| engine.recv_timeout(WAIT)).collect();
    assert_eq!(
        fired,
        vec![
            EngineEvent::TimerElapsed { timer: TimerId(6) },
            EngineEvent::TimerElapsed { timer: TimerId(5) },
        ]
    );
}

#[test]
fn restarting_a_timer_fires_once() {
    init_logging();
    let engine = EngineHandle::new().expect("engine");
    engine.start_timer(TimerId(3), Duration::from_millis(100));
    engine.start_timer(TimerId(3), Duration::from_millis(150));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { timer: TimerId(3) })
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(300)), None);
}

#[test]
fn cancelling_unknown_timer_is_harmless() {
    init_logging();
    let engine = EngineHandle::new().expect("engine");
    engine.cancel_timer(TimerId(42));
    assert_eq!(engine.recv_timeout(Duration::from_millis(50)), None);
    assert_eq!(engine.pending(), 0);
}

#[test]
fn commander_clone_drives_the_same_engine() {
    init_logging();
    let engine = EngineHandle::new().expect("engine");
    let commander = engine.commander();
    std::thread::spawn(move || commander.start_timer(TimerId(9), Duration::from_millis(10)))
        .join()
        .expect("sender thread");

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { timer: TimerId(9) })
    );
}

#[test]
fn split_parts_deliver_events_and_close_with_the_commander() {
    init_logging();
    let (commander, events) = EngineHandle::new().expect("engine").into_parts();
    commander.start_timer(TimerId(3), Duration::from_millis(20));
    assert_eq!(
        events.recv_timeout(WAIT),
        Ok(EngineEvent::TimerElapsed { timer: TimerId(3) })
    );

    // A timer still pending at shutdown is dropped with the runtime.
    commander.start_timer(TimerId(4), Duration::from_secs(30));
    drop(commander);
    assert_eq!(events.recv_timeout(WAIT), Err(RecvTimeoutError::Disconnected));
    assert_eq!(events.recv(), None);
}
