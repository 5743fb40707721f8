//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side drain of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → StateTracker → TickControl
//
// Bounded polling prevents starvation: at most `MAX_EVENTS_PER_FRAME`
// messages are handled per tick, the rest wait for the next one. The
// runtime owns pacing, so the collector never sleeps.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::StateTracker;

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events into the input state tracker.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver }
    }

    /// Feeds pending input batches to `tracker`.
    ///
    /// Returns `Exit` on `WindowClosed` or when the platform hung up.
    pub(crate) fn collect_frame(&mut self, tracker: &mut StateTracker) -> TickControl {
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs {
                    discrete,
                    continuous,
                }) => {
                    tracker.process_events(&discrete);
                    tracker.process_events(&continuous);
                    drained += 1;
                }
                Ok(PlatformEvent::WindowClosed) => {
                    info!(target: "platform", "Window closed, stopping core thread");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "platform", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} batches this frame", drained);
        }

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crossbeam_channel::unbounded;

    fn inputs(discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) -> PlatformEvent {
        PlatformEvent::Inputs {
            discrete,
            continuous,
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        let mut tracker = StateTracker::new();

        assert_eq!(collector.collect_frame(&mut tracker), TickControl::Continue);
        assert!(tracker.finish_frame().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut tracker = StateTracker::new();

        tx.send(inputs(vec![InputEvent::KeyDown { key: KeyCode::Enter }], vec![]))
            .unwrap();
        tx.send(inputs(vec![], vec![InputEvent::PointerMoved { x: 10.0, y: 20.0 }]))
            .unwrap();

        assert_eq!(collector.collect_frame(&mut tracker), TickControl::Continue);

        let frame = tracker.finish_frame();
        assert_eq!(frame.enter_presses, 1);
        assert_eq!(frame.pointer, Some((10.0, 20.0)));
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(
            collector.collect_frame(&mut StateTracker::new()),
            TickControl::Exit
        );
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(
            collector.collect_frame(&mut StateTracker::new()),
            TickControl::Exit
        );
    }

    #[test]
    fn backlog_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut tracker = StateTracker::new();

        for _ in 0..MAX_EVENTS_PER_FRAME + 5 {
            tx.send(inputs(vec![], vec![])).unwrap();
        }

        collector.collect_frame(&mut tracker);
        assert_eq!(tx.len(), 5);
    }
}
