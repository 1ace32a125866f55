// src/render/mod.rs
//! Rendering module - visualization surface, strategies, and frame loop.

pub mod scheduler;
pub mod strategies;
pub mod surface;
pub mod visualizer;

use rand::RngCore;

use crate::audio::SampleBuffer;
use surface::Surface;

// Re-export commonly used types
pub use scheduler::{FrameHandle, FrameScheduler, FrameTimer, TickTimer};
pub use surface::hsl;
pub use visualizer::Visualizer;

/// Drawing routine for one visualization mode: paints one sample
/// snapshot into the surface at the given sensitivity.
pub type Strategy = fn(&mut Surface, &SampleBuffer, f32, &mut dyn RngCore);

/// Which of the sampler's two snapshots a mode consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    Frequency,
    TimeDomain,
}

/// The closed set of visualization modes. Exactly one is active at a
/// time; the selection lives outside the render core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisMode {
    Spectrum,
    Waveform,
    Circular,
    Particles,
    Bars,
    Oscilloscope,
}

impl VisMode {
    pub const ALL: [VisMode; 6] = [
        VisMode::Spectrum,
        VisMode::Waveform,
        VisMode::Circular,
        VisMode::Particles,
        VisMode::Bars,
        VisMode::Oscilloscope,
    ];

    /// The strategy registered for this mode.
    pub fn strategy(self) -> Strategy {
        match self {
            VisMode::Spectrum => strategies::spectrum,
            VisMode::Waveform => strategies::waveform,
            VisMode::Circular => strategies::circular,
            VisMode::Particles => strategies::particles,
            VisMode::Bars => strategies::bars,
            VisMode::Oscilloscope => strategies::oscilloscope,
        }
    }

    /// The sample snapshot this mode consumes.
    pub fn source(self) -> SignalSource {
        match self {
            VisMode::Waveform | VisMode::Oscilloscope => SignalSource::TimeDomain,
            _ => SignalSource::Frequency,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisMode::Spectrum => "spectrum",
            VisMode::Waveform => "waveform",
            VisMode::Circular => "circular",
            VisMode::Particles => "particles",
            VisMode::Bars => "bars",
            VisMode::Oscilloscope => "oscilloscope",
        }
    }

    /// Next mode in display order, wrapping around.
    pub fn next(self) -> VisMode {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Map keyboard digits 1-6 to modes.
    pub fn from_digit(d: u32) -> Option<VisMode> {
        match d {
            1 => Some(VisMode::Spectrum),
            2 => Some(VisMode::Waveform),
            3 => Some(VisMode::Circular),
            4 => Some(VisMode::Particles),
            5 => Some(VisMode::Bars),
            6 => Some(VisMode::Oscilloscope),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_is_registered() {
        for mode in VisMode::ALL {
            // A missing registration would panic here at dispatch time.
            let _ = mode.strategy();
            let _ = mode.label();
        }
    }

    #[test]
    fn time_domain_modes() {
        assert_eq!(VisMode::Waveform.source(), SignalSource::TimeDomain);
        assert_eq!(VisMode::Oscilloscope.source(), SignalSource::TimeDomain);
        assert_eq!(VisMode::Spectrum.source(), SignalSource::Frequency);
        assert_eq!(VisMode::Bars.source(), SignalSource::Frequency);
        assert_eq!(VisMode::Circular.source(), SignalSource::Frequency);
        assert_eq!(VisMode::Particles.source(), SignalSource::Frequency);
    }

    #[test]
    fn next_cycles_through_all_modes() {
        let mut mode = VisMode::Spectrum;
        for _ in 0..VisMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, VisMode::Spectrum);
    }
}
