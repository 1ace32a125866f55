// src/audio/sample_capture.rs
//! A wrapper source that mirrors playback samples into the analysis tap.

use ringbuf::traits::*;
use rodio::Source;

use super::sampler::SampleTap;

/// Wraps a rodio source, passing samples through unchanged while
/// pushing a mono downmix of each frame into the shared tap.
pub struct SampleCapture<S> {
    source: S,
    tap: SampleTap,
    /// Running sum of the current frame's channel samples
    acc: f32,
    /// Channels consumed so far in the current frame
    in_frame: u16,
}

impl<S> SampleCapture<S> {
    /// Create a new capture wrapper around an existing source.
    pub fn new(source: S, tap: SampleTap) -> Self {
        Self {
            source,
            tap,
            acc: 0.0,
            in_frame: 0,
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        let channels = self.source.channels().max(1);

        self.acc += sample;
        self.in_frame += 1;
        if self.in_frame >= channels {
            let mono = self.acc / channels as f32;
            self.acc = 0.0;
            self.in_frame = 0;

            // Push into the tap, overwriting the oldest sample if full
            if let Ok(mut buf) = self.tap.lock() {
                if buf.is_full() {
                    let _ = buf.try_pop();
                }
                let _ = buf.try_push(mono);
            }
        }

        Some(sample)
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.source.total_duration()
    }
}
