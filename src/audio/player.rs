// src/audio/player.rs
//! Audio playback engine using rodio with sample capture for analysis.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use ringbuf::{HeapRb, traits::*};
use rodio::{Decoder, OutputStream, Sink, Source};

use super::error::InitError;
use super::sample_capture::SampleCapture;
use super::sampler::SampleTap;

/// Capacity of the shared sample tap (mono samples, ~370 ms at 44.1 kHz).
const TAP_CAPACITY: usize = 16384;

type FileSource = Decoder<BufReader<File>>;

/// Commands sent to the audio playback thread.
enum PlayerCommand {
    Play(FileSource),
    Pause,
    Resume,
    Stop,
}

/// Player that can `play()`, `pause()`, `resume()`, or `stop()` a file,
/// stopping any prior playback. Decoded samples are mirrored into a
/// shared tap for the analysis session.
pub struct MusicPlayer {
    /// Sender to the audio thread for commands
    cmd_tx: Sender<PlayerCommand>,
    /// Local flags mirrored from the audio thread for quick UI access
    is_playing_flag: Arc<AtomicBool>,
    is_paused_flag: Arc<AtomicBool>,
    /// Shared circular buffer of recent mono samples
    tap: SampleTap,
}

impl MusicPlayer {
    /// Create an idle player and spawn its audio thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCommand>();

        let is_playing_flag = Arc::new(AtomicBool::new(false));
        let is_paused_flag = Arc::new(AtomicBool::new(false));
        let tap: SampleTap = Arc::new(Mutex::new(HeapRb::new(TAP_CAPACITY)));

        let playing = is_playing_flag.clone();
        let paused = is_paused_flag.clone();
        let thread_tap = tap.clone();

        // The audio thread owns the OutputStream and the current sink.
        thread::spawn(move || {
            let Ok((stream, handle)) = OutputStream::try_default() else {
                // No audio output available: drain commands until the
                // sender is dropped, then return.
                while rx.recv().is_ok() {}
                return;
            };
            let mut sink: Option<Sink> = None;

            while let Ok(cmd) = rx.recv() {
                match cmd {
                    PlayerCommand::Play(source) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }

                        // Fresh tap contents for the new track
                        if let Ok(mut buf) = thread_tap.lock() {
                            buf.clear();
                        }

                        if let Ok(new_sink) = Sink::try_new(&handle) {
                            let converted = source.convert_samples::<f32>();
                            let capturing =
                                SampleCapture::new(converted, thread_tap.clone());
                            new_sink.append(capturing);
                            new_sink.play();
                            playing.store(true, Ordering::SeqCst);
                            paused.store(false, Ordering::SeqCst);
                            sink = Some(new_sink);
                        }
                    }
                    PlayerCommand::Pause => {
                        if let Some(s) = &sink {
                            s.pause();
                            paused.store(true, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Resume => {
                        if let Some(s) = &sink {
                            s.play();
                            paused.store(false, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        playing.store(false, Ordering::SeqCst);
                        paused.store(false, Ordering::SeqCst);
                    }
                }
            }
            if let Some(s) = sink.take() {
                s.stop();
            }
            drop(stream);
        });

        Self {
            cmd_tx: tx,
            is_playing_flag,
            is_paused_flag,
            tap,
        }
    }

    /// Stop any existing playback and start playing `path`.
    ///
    /// The file is opened and probed for a decodable stream before the
    /// audio thread is involved, so an unplayable source fails here and
    /// no analysis session is started for it.
    pub fn play(&mut self, path: &Path) -> Result<(), InitError> {
        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        self.cmd_tx.send(PlayerCommand::Play(source)).ok();
        Ok(())
    }

    /// Pause playback if currently playing.
    pub fn pause(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Pause);
    }

    /// Resume playback if currently paused.
    pub fn resume(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Resume);
    }

    /// Immediately halt playback (if any).
    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Stop);
    }

    /// Returns true if there's an active sink (playing or paused).
    pub fn is_playing(&self) -> bool {
        self.is_playing_flag.load(Ordering::SeqCst)
    }

    /// Returns true if playback is currently paused.
    pub fn is_paused(&self) -> bool {
        self.is_paused_flag.load(Ordering::SeqCst)
    }

    /// Handle to the shared sample tap, for binding an analysis session.
    pub fn sample_tap(&self) -> SampleTap {
        self.tap.clone()
    }
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}
