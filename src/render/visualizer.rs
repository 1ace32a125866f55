// src/render/visualizer.rs
//! The visualizer frame loop: sampler -> strategy -> surface.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::audio::{InitError, SampleTap, SignalSampler};
use crate::config::VisualizerConfig;

use super::scheduler::{FrameScheduler, FrameTimer};
use super::surface::Surface;
use super::{SignalSource, VisMode};

/// Fraction of the distance toward the background each frame fades,
/// leaving a decaying trail of previous frames.
const FADE_ALPHA: f32 = 0.1;

/// Owns the analysis session, the drawing surface, and the frame
/// scheduler; the transport collaborator supplies playback state, mode,
/// and sensitivity from outside.
pub struct Visualizer<T: FrameTimer> {
    sampler: SignalSampler,
    surface: Surface,
    scheduler: FrameScheduler<T>,
    mode: VisMode,
    sensitivity: f32,
    rng: SmallRng,
    frames_drawn: u64,
}

impl<T: FrameTimer> Visualizer<T> {
    pub fn new(config: &VisualizerConfig, timer: T) -> Self {
        Self {
            sampler: SignalSampler::new(),
            surface: Surface::new(config.surface_width, config.surface_height),
            scheduler: FrameScheduler::new(timer),
            mode: config.mode,
            sensitivity: config.sensitivity,
            rng: SmallRng::from_entropy(),
            frames_drawn: 0,
        }
    }

    /// Bind the analysis session to a loaded source's tap. Fails with
    /// [`InitError::AlreadyBound`] until the previous source is
    /// released.
    pub fn bind_source(&mut self, tap: SampleTap) -> Result<(), InitError> {
        self.sampler.bind(tap)
    }

    /// Release the current source and halt the loop. The surface keeps
    /// its last contents.
    pub fn release_source(&mut self) {
        self.scheduler.stop();
        self.sampler.unbind();
    }

    pub fn has_source(&self) -> bool {
        self.sampler.is_bound()
    }

    pub fn mode(&self) -> VisMode {
        self.mode
    }

    /// Select the active mode. Takes effect on the next frame; the loop
    /// is not restarted.
    pub fn set_mode(&mut self, mode: VisMode) {
        self.mode = mode;
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Set the sensitivity scalar. The selector glue validates range;
    /// anything non-positive here is a programming error.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        debug_assert!(sensitivity.is_finite() && sensitivity > 0.0);
        self.sensitivity = sensitivity;
    }

    /// Start the render loop when playback begins. A no-op without a
    /// bound source or while already running.
    pub fn start(&mut self) {
        if self.sampler.is_bound() {
            self.scheduler.start();
        }
    }

    /// Halt the render loop (pause or stop). The frame pending in the
    /// host timer is cancelled before this returns.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Number of frames drawn so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Drive the loop: called by the host once per display refresh.
    /// Draws at most one frame, then re-arms while `is_playing`.
    pub fn tick(&mut self, is_playing: bool) {
        if self.scheduler.due_frame().is_none() {
            return;
        }
        self.draw_frame();
        self.scheduler.frame_done(is_playing);
    }

    fn draw_frame(&mut self) {
        self.surface.fade(FADE_ALPHA);
        self.sampler.refresh();
        let bins = match self.mode.source() {
            SignalSource::Frequency => self.sampler.frequency_bins(),
            SignalSource::TimeDomain => self.sampler.time_domain_bins(),
        };
        (self.mode.strategy())(&mut self.surface, &bins, self.sensitivity, &mut self.rng);
        self.frames_drawn += 1;
    }
}

// FrameScheduler's own Drop cancels the pending frame, so dropping the
// visualizer mid-run cannot leave a live callback behind.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scheduler::{FrameHandle, TickTimer};
    use ringbuf::{HeapRb, traits::*};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    /// Timer that records every cancel for teardown assertions.
    struct RecordingTimer {
        inner: TickTimer,
        cancelled: Rc<RefCell<Vec<FrameHandle>>>,
    }

    impl FrameTimer for RecordingTimer {
        fn schedule(&mut self) -> FrameHandle {
            self.inner.schedule()
        }
        fn cancel(&mut self, handle: FrameHandle) {
            self.cancelled.borrow_mut().push(handle);
            self.inner.cancel(handle);
        }
        fn poll(&mut self) -> Option<FrameHandle> {
            self.inner.poll()
        }
    }

    fn silent_tap() -> SampleTap {
        let tap: SampleTap = Arc::new(Mutex::new(HeapRb::new(4096)));
        {
            let mut buf = tap.lock().unwrap();
            for _ in 0..1024 {
                let _ = buf.try_push(0.0f32);
            }
        }
        tap
    }

    fn visualizer() -> Visualizer<TickTimer> {
        Visualizer::new(&VisualizerConfig::default(), TickTimer::new())
    }

    #[test]
    fn does_not_run_without_a_source() {
        let mut viz = visualizer();
        viz.start();
        assert!(!viz.is_running());
        viz.tick(true);
        assert_eq!(viz.frames_drawn(), 0);
    }

    #[test]
    fn draws_one_frame_per_tick_while_playing() {
        let mut viz = visualizer();
        viz.bind_source(silent_tap()).unwrap();
        viz.start();
        for expected in 1..=5 {
            viz.tick(true);
            assert_eq!(viz.frames_drawn(), expected);
        }
    }

    #[test]
    fn mode_and_sensitivity_changes_do_not_interrupt_the_loop() {
        let mut viz = visualizer();
        viz.bind_source(silent_tap()).unwrap();
        viz.start();
        viz.tick(true);
        viz.set_mode(VisMode::Circular);
        viz.set_sensitivity(2.0);
        assert!(viz.is_running());
        viz.tick(true);
        assert_eq!(viz.frames_drawn(), 2);
        assert_eq!(viz.mode(), VisMode::Circular);
    }

    #[test]
    fn no_draws_after_stop() {
        let mut viz = visualizer();
        viz.bind_source(silent_tap()).unwrap();
        viz.start();
        viz.tick(true);
        viz.stop();
        for _ in 0..10 {
            viz.tick(true);
        }
        assert_eq!(viz.frames_drawn(), 1);
    }

    #[test]
    fn loop_goes_idle_when_playback_stops_advancing() {
        let mut viz = visualizer();
        viz.bind_source(silent_tap()).unwrap();
        viz.start();
        viz.tick(false); // frame draws, but playback halted
        assert_eq!(viz.frames_drawn(), 1);
        assert!(!viz.is_running());
        viz.tick(true);
        assert_eq!(viz.frames_drawn(), 1);
    }

    #[test]
    fn rebind_requires_release() {
        let mut viz = visualizer();
        viz.bind_source(silent_tap()).unwrap();
        assert!(matches!(
            viz.bind_source(silent_tap()),
            Err(InitError::AlreadyBound)
        ));
        viz.release_source();
        viz.bind_source(silent_tap()).unwrap();
    }

    #[test]
    fn teardown_cancels_the_pending_frame() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let timer = RecordingTimer {
            inner: TickTimer::new(),
            cancelled: cancelled.clone(),
        };
        let mut viz = Visualizer::new(&VisualizerConfig::default(), timer);
        viz.bind_source(silent_tap()).unwrap();
        viz.start();
        drop(viz);
        assert_eq!(cancelled.borrow().len(), 1);
    }
}
