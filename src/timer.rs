use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Events delivered back to the event loop from background threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    /// The feedback window for a confirmed answer has elapsed. Carries the
    /// display generation that scheduled it; the runner drops stale tokens.
    AdvanceDue(u64),
}

/// Schedule one auto-advance tick after `delay`. The send fails harmlessly
/// if the receiver is gone by then.
pub fn schedule_advance(tx: mpsc::Sender<RunnerEvent>, token: u64, delay: Duration) {
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = tx.send(RunnerEvent::AdvanceDue(token));
    });
}
