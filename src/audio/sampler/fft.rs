// src/audio/sampler/fft.rs
//! Fixed-size spectrum analysis for the signal sampler.

use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

/// Lower edge of the dB window mapped onto byte 0.
const MIN_DB: f32 = -100.0;
/// Upper edge of the dB window mapped onto byte 255.
const MAX_DB: f32 = -30.0;

/// Fixed-size forward FFT with a precomputed Hann window.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    pub fn new(size: usize) -> Self {
        debug_assert!(size.is_power_of_two(), "transform size must be a power of two");
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        // Hann window to reduce spectral leakage
        let window = (0..size)
            .map(|i| {
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos())
            })
            .collect();

        Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); size],
        }
    }

    /// Linear magnitude spectrum of one sample block, normalized by the
    /// transform size. Returns the first half of the spectrum; `block`
    /// must hold at least `size` samples.
    pub fn magnitudes(&mut self, block: &[f32]) -> Vec<f32> {
        let size = self.buffer.len();
        debug_assert!(block.len() >= size);

        for (dst, (&s, &w)) in self.buffer.iter_mut().zip(block.iter().zip(&self.window)) {
            *dst = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.buffer);

        let scale = 1.0 / size as f32;
        self.buffer
            .iter()
            .take(size / 2)
            .map(|c| (c.re * c.re + c.im * c.im).sqrt() * scale)
            .collect()
    }
}

/// Map a linear magnitude to a byte over the `MIN_DB..MAX_DB` window.
pub fn magnitude_to_byte(mag: f32) -> u8 {
    let db = 20.0 * mag.max(1e-10).log10();
    let norm = ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0);
    (norm * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_mapping_covers_the_window() {
        assert_eq!(magnitude_to_byte(0.0), 0);
        assert_eq!(magnitude_to_byte(1.0), 255); // 0 dBFS, above the window
        // -65 dB sits mid-window
        let mid = magnitude_to_byte(10f32.powf(-65.0 / 20.0));
        assert!((120..=135).contains(&mid));
    }

    #[test]
    fn magnitudes_are_half_the_transform() {
        let mut analyzer = SpectrumAnalyzer::new(256);
        let mags = analyzer.magnitudes(&[0.0; 256]);
        assert_eq!(mags.len(), 128);
        assert!(mags.iter().all(|&m| m == 0.0));
    }
}
