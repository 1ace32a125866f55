// src/audio/sampler/mod.rs
//! Signal sampler - bridges playback to per-frame analysis snapshots.
//!
//! A [`SignalSampler`] binds once to the sample tap of a loaded source
//! and exposes two fixed-length byte buffers per tick: smoothed
//! frequency-magnitude bins and raw time-domain bins. Both snapshots
//! are refreshed explicitly once per frame; reads in between are pure.

mod fft;

use std::ops::Deref;
use std::sync::{Arc, Mutex};

use ringbuf::{HeapRb, traits::*};

use super::error::InitError;
use fft::SpectrumAnalyzer;

/// Shared tap into the playback sample stream (mono, most recent last).
pub type SampleTap = Arc<Mutex<HeapRb<f32>>>;

/// Transform size used for analysis.
pub const FFT_SIZE: usize = 256;
/// Number of usable magnitude bins per snapshot (half the transform).
pub const BIN_COUNT: usize = FFT_SIZE / 2;
/// Per-bin exponential blend factor: 80% previous value, 20% new.
pub const SMOOTHING: f32 = 0.8;

/// Fixed-length snapshot of byte magnitudes, one value per bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer(Box<[u8]>);

impl SampleBuffer {
    /// Wrap raw bin values. Buffers are never empty by contract.
    pub fn new(values: Vec<u8>) -> Self {
        debug_assert!(!values.is_empty(), "sample buffers are never empty");
        Self(values.into_boxed_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for SampleBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

/// Analysis session over one loaded audio source.
///
/// Created unbound; [`bind`](Self::bind) attaches it to a source's tap
/// exactly once. The session lives until a new source is loaded, across
/// mode changes and play/pause toggles.
pub struct SignalSampler {
    tap: Option<SampleTap>,
    analyzer: SpectrumAnalyzer,
    /// Per-bin exponential moving average of linear magnitude.
    smoothed: Vec<f32>,
    freq_bins: Vec<u8>,
    time_bins: Vec<u8>,
}

impl SignalSampler {
    /// Create an unbound analysis session.
    pub fn new() -> Self {
        Self {
            tap: None,
            analyzer: SpectrumAnalyzer::new(FFT_SIZE),
            smoothed: vec![0.0; BIN_COUNT],
            freq_bins: vec![0; BIN_COUNT],
            time_bins: vec![128; BIN_COUNT],
        }
    }

    /// Bind the session to a source's sample tap. Fails if a source is
    /// already bound; call [`unbind`](Self::unbind) first.
    pub fn bind(&mut self, tap: SampleTap) -> Result<(), InitError> {
        if self.tap.is_some() {
            return Err(InitError::AlreadyBound);
        }
        self.reset();
        self.tap = Some(tap);
        Ok(())
    }

    /// Release the bound source, if any. The session may be rebound.
    pub fn unbind(&mut self) {
        self.tap = None;
    }

    pub fn is_bound(&self) -> bool {
        self.tap.is_some()
    }

    /// Advance both snapshots from the tap.
    ///
    /// Non-consuming: the most recent `FFT_SIZE` samples are copied out
    /// of the ring buffer. With fewer samples available the previous
    /// snapshot is kept, so repeated reads within one tick agree.
    pub fn refresh(&mut self) {
        let Some(tap) = &self.tap else { return };
        let block: Vec<f32> = {
            let Ok(buf) = tap.lock() else { return };
            let available = buf.occupied_len();
            if available < FFT_SIZE {
                return;
            }
            let start = available - FFT_SIZE;
            buf.iter().skip(start).copied().collect()
        };

        // Time domain: latest BIN_COUNT raw samples, centered on 128.
        let tail = &block[FFT_SIZE - BIN_COUNT..];
        for (dst, &s) in self.time_bins.iter_mut().zip(tail) {
            *dst = (128.0 + s.clamp(-1.0, 1.0) * 128.0).clamp(0.0, 255.0) as u8;
        }

        // Frequency domain: windowed FFT, then the per-bin exponential
        // blend that keeps the spectrum visually stable.
        let magnitudes = self.analyzer.magnitudes(&block);
        for (avg, &mag) in self.smoothed.iter_mut().zip(&magnitudes) {
            *avg = SMOOTHING * *avg + (1.0 - SMOOTHING) * mag;
        }
        for (dst, &avg) in self.freq_bins.iter_mut().zip(&self.smoothed) {
            *dst = fft::magnitude_to_byte(avg);
        }
    }

    /// Current magnitude-spectrum snapshot, ordered low to high.
    pub fn frequency_bins(&self) -> SampleBuffer {
        SampleBuffer::new(self.freq_bins.clone())
    }

    /// Current raw waveform snapshot, ordered earliest to latest,
    /// zero-centered around 128.
    pub fn time_domain_bins(&self) -> SampleBuffer {
        SampleBuffer::new(self.time_bins.clone())
    }

    fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.freq_bins.fill(0);
        self.time_bins.fill(128);
    }
}

impl Default for SignalSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn tap_with(samples: &[f32]) -> SampleTap {
        let tap: SampleTap = Arc::new(Mutex::new(HeapRb::new(4096)));
        {
            let mut buf = tap.lock().unwrap();
            for &s in samples {
                if buf.is_full() {
                    let _ = buf.try_pop();
                }
                let _ = buf.try_push(s);
            }
        }
        tap
    }

    #[test]
    fn bind_twice_is_rejected() {
        let mut sampler = SignalSampler::new();
        sampler.bind(tap_with(&[])).unwrap();
        let err = sampler.bind(tap_with(&[])).unwrap_err();
        assert!(matches!(err, InitError::AlreadyBound));
    }

    #[test]
    fn rebind_after_unbind_succeeds() {
        let mut sampler = SignalSampler::new();
        sampler.bind(tap_with(&[])).unwrap();
        sampler.unbind();
        assert!(!sampler.is_bound());
        sampler.bind(tap_with(&[])).unwrap();
        assert!(sampler.is_bound());
    }

    #[test]
    fn buffers_have_fixed_length() {
        let sampler = SignalSampler::new();
        assert_eq!(sampler.frequency_bins().len(), BIN_COUNT);
        assert_eq!(sampler.time_domain_bins().len(), BIN_COUNT);
    }

    #[test]
    fn silence_yields_baseline_bins() {
        let mut sampler = SignalSampler::new();
        sampler.bind(tap_with(&[0.0; 512])).unwrap();
        sampler.refresh();
        assert!(sampler.frequency_bins().iter().all(|&v| v == 0));
        assert!(sampler.time_domain_bins().iter().all(|&v| v == 128));
    }

    #[test]
    fn sine_peaks_in_matching_bin() {
        // Period of 16 samples puts the peak in bin 16 of a 256-point
        // transform.
        let samples: Vec<f32> = (0..512)
            .map(|i| 0.5 * (TAU * i as f32 / 16.0).sin())
            .collect();
        let mut sampler = SignalSampler::new();
        sampler.bind(tap_with(&samples)).unwrap();
        sampler.refresh();

        let bins = sampler.frequency_bins();
        let peak = bins
            .iter()
            .enumerate()
            .max_by_key(|&(_, &v)| v)
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 16);
        assert!(bins[16] > 0);
    }

    #[test]
    fn reads_are_idempotent_between_refreshes() {
        let samples: Vec<f32> = (0..512)
            .map(|i| 0.5 * (TAU * i as f32 / 16.0).sin())
            .collect();
        let mut sampler = SignalSampler::new();
        sampler.bind(tap_with(&samples)).unwrap();
        sampler.refresh();

        assert_eq!(sampler.frequency_bins(), sampler.frequency_bins());
        assert_eq!(sampler.time_domain_bins(), sampler.time_domain_bins());
    }

    #[test]
    fn smoothing_decays_bins_gradually() {
        // Quiet enough that the peak bin sits inside the dB window
        // instead of saturating at 255.
        let samples: Vec<f32> = (0..512)
            .map(|i| 0.02 * (TAU * i as f32 / 16.0).sin())
            .collect();
        let mut sampler = SignalSampler::new();
        let tap = tap_with(&samples);
        sampler.bind(tap.clone()).unwrap();
        sampler.refresh();
        let loud = sampler.frequency_bins()[16];

        // Replace the tap contents with silence and refresh again: the
        // 0.8 blend keeps most of the previous magnitude.
        {
            let mut buf = tap.lock().unwrap();
            buf.clear();
            for _ in 0..512 {
                let _ = buf.try_push(0.0f32);
            }
        }
        sampler.refresh();
        let decayed = sampler.frequency_bins()[16];
        assert!(decayed < loud);
        assert!(decayed > 0, "one silent refresh must not zero the bin");
    }

    #[test]
    fn short_tap_keeps_previous_snapshot() {
        let samples: Vec<f32> = (0..512)
            .map(|i| 0.5 * (TAU * i as f32 / 16.0).sin())
            .collect();
        let mut sampler = SignalSampler::new();
        let tap = tap_with(&samples);
        sampler.bind(tap.clone()).unwrap();
        sampler.refresh();
        let before = sampler.frequency_bins();

        {
            let mut buf = tap.lock().unwrap();
            buf.clear();
            let _ = buf.try_push(1.0f32);
        }
        sampler.refresh();
        assert_eq!(sampler.frequency_bins(), before);
    }
}
