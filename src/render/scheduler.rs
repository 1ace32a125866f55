// src/render/scheduler.rs
//! Frame scheduling for the render loop.
//!
//! The loop is cooperative: the host owns a "next display frame"
//! callback primitive (the [`FrameTimer`]), and the scheduler is a two
//! state machine over it. Idle holds no pending handle; Running holds
//! exactly one. Stopping cancels the pending handle before returning,
//! so no frame callback can fire after pause or teardown.

/// Opaque identity of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Host-provided timed-callback primitive (display-sync callback,
/// timer tick, or a manual clock in tests).
pub trait FrameTimer {
    /// Arm a single callback for the next display refresh.
    fn schedule(&mut self) -> FrameHandle;
    /// Cancel a previously scheduled callback. Cancelling a handle that
    /// already fired is a no-op.
    fn cancel(&mut self, handle: FrameHandle);
    /// Take the handle of a callback that has come due, if any.
    fn poll(&mut self) -> Option<FrameHandle>;
}

/// Timer driven by the TUI event-loop tick: an armed callback comes due
/// on the next poll.
#[derive(Debug, Default)]
pub struct TickTimer {
    next_id: u64,
    armed: Option<FrameHandle>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameTimer for TickTimer {
    fn schedule(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.armed = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }

    fn poll(&mut self) -> Option<FrameHandle> {
        self.armed.take()
    }
}

/// Two-state frame scheduler: Idle (no pending frame) or Running (one
/// frame pending). At most one frame is pending at any time.
pub struct FrameScheduler<T: FrameTimer> {
    timer: T,
    pending: Option<FrameHandle>,
}

impl<T: FrameTimer> FrameScheduler<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            pending: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Idle -> Running: schedule the first frame immediately. A no-op
    /// while already running.
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.timer.schedule());
        }
    }

    /// Running -> Idle: unconditionally cancel the pending frame. Used
    /// for pause, stop, and teardown.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }

    /// Poll the timer for a fired callback and validate it against the
    /// pending handle. Stale handles (cancelled or superseded) yield
    /// nothing; a valid one consumes the pending slot.
    pub fn due_frame(&mut self) -> Option<FrameHandle> {
        let fired = self.timer.poll()?;
        if self.pending == Some(fired) {
            self.pending = None;
            Some(fired)
        } else {
            None
        }
    }

    /// Called after a frame was drawn: schedule the next frame while
    /// playback still advances, otherwise fall back to Idle.
    pub fn frame_done(&mut self, still_playing: bool) {
        if still_playing && self.pending.is_none() {
            self.pending = Some(self.timer.schedule());
        }
    }
}

impl<T: FrameTimer> Drop for FrameScheduler<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_nothing_due() {
        let mut scheduler = FrameScheduler::new(TickTimer::new());
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.due_frame(), None);
    }

    #[test]
    fn start_schedules_exactly_one_frame() {
        let mut scheduler = FrameScheduler::new(TickTimer::new());
        scheduler.start();
        scheduler.start(); // idempotent while running
        assert!(scheduler.is_running());
        assert!(scheduler.due_frame().is_some());
        // the frame was consumed and nothing was re-armed yet
        assert_eq!(scheduler.due_frame(), None);
    }

    #[test]
    fn frame_done_rearms_while_playing() {
        let mut scheduler = FrameScheduler::new(TickTimer::new());
        scheduler.start();
        let first = scheduler.due_frame().unwrap();
        scheduler.frame_done(true);
        let second = scheduler.due_frame().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn frame_done_goes_idle_when_playback_stops() {
        let mut scheduler = FrameScheduler::new(TickTimer::new());
        scheduler.start();
        scheduler.due_frame().unwrap();
        scheduler.frame_done(false);
        assert!(!scheduler.is_running());
        for _ in 0..10 {
            assert_eq!(scheduler.due_frame(), None);
        }
    }

    #[test]
    fn stop_cancels_the_pending_frame() {
        let mut scheduler = FrameScheduler::new(TickTimer::new());
        scheduler.start();
        scheduler.stop();
        assert!(!scheduler.is_running());
        for _ in 0..10 {
            assert_eq!(scheduler.due_frame(), None);
        }
    }

    #[test]
    fn stale_handles_are_ignored() {
        // A handle left armed in the timer after the scheduler moved on
        // must not produce a frame.
        let mut timer = TickTimer::new();
        let stale = timer.schedule();
        let mut scheduler = FrameScheduler::new(timer);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.due_frame(), None);
        let _ = stale;
    }
}
