// src/render/strategies.rs
//! The six visualization strategies.
//!
//! Each strategy is a pure function of one sample snapshot, the
//! sensitivity scalar, and the surface dimensions. Amplitude scaling is
//! `(bin / 255) * extent * sensitivity` throughout; hue cycling is
//! `(index / len) * 360`. Only `particles` consumes randomness, taken
//! from the injected generator so tests can seed it.

use image::Rgba;
use rand::{Rng, RngCore};

use crate::audio::SampleBuffer;

use super::surface::{Surface, hsl};

const WAVEFORM_STROKE: Rgba<u8> = Rgba([0x3b, 0x82, 0xf6, 255]);
const OSCILLOSCOPE_STROKE: Rgba<u8> = Rgba([0x10, 0xb9, 0x81, 255]);
/// White at 10% opacity for the oscilloscope grid.
const GUIDE_LINE: Rgba<u8> = Rgba([255, 255, 255, 26]);
/// Fixed number of bars in the reduced-band mode.
const BAR_COUNT: usize = 32;
/// Minimum unscaled amplitude ratio for a particle to appear.
const PARTICLE_THRESHOLD: f32 = 0.1;

/// Strategy inputs are sampler-produced and caller-validated; anything
/// else is a programming error.
fn check_inputs(bins: &SampleBuffer, sensitivity: f32) {
    debug_assert!(!bins.is_empty(), "strategy called with an empty buffer");
    debug_assert!(
        sensitivity.is_finite() && sensitivity > 0.0,
        "sensitivity must be a positive finite scalar"
    );
}

/// One vertical bar per frequency bin, drawn bottom-up with a dark-to-
/// light gradient, hue cycled by bin index.
pub fn spectrum(surface: &mut Surface, bins: &SampleBuffer, sensitivity: f32, _rng: &mut dyn RngCore) {
    check_inputs(bins, sensitivity);
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    let len = bins.len() as f32;
    let bar_w = w / len;

    for (i, &v) in bins.iter().enumerate() {
        let bar_h = v as f32 / 255.0 * h * sensitivity;
        if bar_h <= 0.0 {
            continue;
        }
        let x = i as f32 * bar_w;
        let y = h - bar_h;
        let hue = i as f32 / len * 360.0;
        surface.fill_rect_vgradient(
            x,
            y,
            (bar_w - 1.0).max(1.0), // 1 px gap, but never a zero-width bar
            bar_h,
            hsl(hue, 0.7, 0.5),
            hsl(hue, 0.7, 0.8),
        );
    }
}

/// 32 bars, each averaging a contiguous block of raw bins.
pub fn bars(surface: &mut Surface, bins: &SampleBuffer, sensitivity: f32, _rng: &mut dyn RngCore) {
    check_inputs(bins, sensitivity);
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    let bar_w = w / BAR_COUNT as f32;
    let block = bins.len() / BAR_COUNT;

    for i in 0..BAR_COUNT {
        // An empty block (buffer shorter than 32 bins) averages to 0
        let average = if block == 0 {
            0.0
        } else {
            let sum: f32 = bins[i * block..(i + 1) * block]
                .iter()
                .map(|&v| v as f32)
                .sum();
            sum / block as f32
        };
        let bar_h = average / 255.0 * h * sensitivity;
        if bar_h <= 0.0 {
            continue;
        }
        let x = i as f32 * bar_w + 2.0;
        let y = h - bar_h;
        let hue = i as f32 / BAR_COUNT as f32 * 360.0;
        surface.fill_rect_vgradient(
            x,
            y,
            (bar_w - 4.0).max(1.0), // 2 px gap on each side
            bar_h,
            hsl(hue, 0.7, 0.4),
            hsl(hue, 0.7, 0.7),
        );
    }
}

/// Single-stroke polyline over the raw waveform, anchored at the top.
pub fn waveform(surface: &mut Surface, bins: &SampleBuffer, sensitivity: f32, _rng: &mut dyn RngCore) {
    check_inputs(bins, sensitivity);
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    let slice = w / bins.len() as f32;

    let points: Vec<(f32, f32)> = bins
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = i as f32 * slice;
            let y = v as f32 / 128.0 * sensitivity * h / 2.0;
            (x, y)
        })
        .collect();
    surface.stroke_polyline(&points, WAVEFORM_STROKE);
}

/// Zero-centered waveform trace plus five faint horizontal guides.
pub fn oscilloscope(
    surface: &mut Surface,
    bins: &SampleBuffer,
    sensitivity: f32,
    _rng: &mut dyn RngCore,
) {
    check_inputs(bins, sensitivity);
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    let slice = w / bins.len() as f32;

    let points: Vec<(f32, f32)> = bins
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = i as f32 * slice;
            let y = h / 2.0 + (v as f32 - 128.0) / 128.0 * sensitivity * h / 4.0;
            (x, y)
        })
        .collect();
    surface.stroke_polyline(&points, OSCILLOSCOPE_STROKE);

    // Guide grid, drawn regardless of signal
    for i in 0..5 {
        let y = i as f32 / 4.0 * h;
        surface.draw_line(0.0, y, w - 1.0, y, GUIDE_LINE);
    }
}

/// Radial line segment per bin, growing outward from a fixed ring.
pub fn circular(surface: &mut Surface, bins: &SampleBuffer, sensitivity: f32, _rng: &mut dyn RngCore) {
    check_inputs(bins, sensitivity);
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    let cx = w / 2.0;
    let cy = h / 2.0;
    let radius = w.min(h) / 4.0;
    let len = bins.len() as f32;

    for (i, &v) in bins.iter().enumerate() {
        let amplitude = v as f32 / 255.0 * radius * sensitivity;
        if amplitude <= 0.0 {
            continue;
        }
        let angle = i as f32 / len * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let hue = i as f32 / len * 360.0;
        surface.draw_line(
            cx + cos * radius,
            cy + sin * radius,
            cx + cos * (radius + amplitude),
            cy + sin * (radius + amplitude),
            hsl(hue, 0.7, 0.6),
        );
    }
}

/// Filled circle per bin above the amplitude threshold, vertically
/// jittered by the scaled amplitude.
///
/// The threshold applies to the unscaled `bin / 255` ratio; sensitivity
/// only scales the jitter magnitude and particle size.
pub fn particles(surface: &mut Surface, bins: &SampleBuffer, sensitivity: f32, rng: &mut dyn RngCore) {
    check_inputs(bins, sensitivity);
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    let len = bins.len() as f32;

    for (i, &v) in bins.iter().enumerate() {
        let ratio = v as f32 / 255.0;
        if ratio <= PARTICLE_THRESHOLD {
            continue;
        }
        let amplitude = ratio * sensitivity;
        let x = i as f32 / len * w;
        let y = h / 2.0 + (rng.r#gen::<f32>() - 0.5) * amplitude * h;
        let size = amplitude * 10.0;
        let hue = i as f32 / len * 360.0;
        surface.fill_circle(x, y, size, hsl(hue, 0.7, 0.6));
    }
}
