// src/app/state.rs
//! Application state management.

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, widgets::ListState};
use ratatui_image::picker::Picker;

use crate::{
    audio::{MusicPlayer, TrackMetadata, metadata::load_metadata},
    config::{SENSITIVITY_STEP, VisualizerConfig, clamp_sensitivity},
    fs::{Entry, load_entries, tail_path},
    render::{TickTimer, Visualizer},
    ui::{
        keybindings::{Action, key_to_action},
        layout::compute_layout,
        widgets::{render_canvas, render_file_list, render_player_panel},
    },
};

/// Main application state.
pub struct App {
    /// Current directory being browsed
    current_dir: PathBuf,
    /// Directory entries
    entries: Vec<Entry>,
    /// List widget state
    state: ListState,
    /// Currently selected index
    selected: usize,

    /// Music player instance (external transport)
    player: MusicPlayer,
    /// The render core: sampler, surface, scheduler
    visualizer: Visualizer<TickTimer>,
    /// Terminal graphics picker for the canvas widget
    picker: Picker,

    /// Metadata for the current track (if loaded)
    metadata: Option<TrackMetadata>,
    /// Metadata channel (background loader -> UI)
    meta_tx: Sender<TrackMetadata>,
    meta_rx: Receiver<TrackMetadata>,

    /// Elapsed playback time in seconds
    elapsed: u64,
    /// Total track duration in seconds
    duration: u64,
    /// Most recent user-visible failure
    status: Option<String>,
}

impl App {
    /// Create a new application instance browsing the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut state = ListState::default();
        state.select(Some(0));

        // Probe the terminal for a graphics protocol, with a plain
        // font-size fallback
        let picker =
            Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 12)));

        let (meta_tx, meta_rx) = std::sync::mpsc::channel::<TrackMetadata>();

        Ok(Self {
            current_dir: cwd.clone(),
            entries: load_entries(&cwd),
            state,
            selected: 0,

            player: MusicPlayer::new(),
            visualizer: Visualizer::new(&VisualizerConfig::default(), TickTimer::new()),
            picker,

            metadata: None,
            meta_tx,
            meta_rx,

            elapsed: 0,
            duration: 1,
            status: None,
        })
    }

    /// Handle a key event; returns true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            Action::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            Action::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            Action::Enter => self.open_selected(),
            Action::Back => {
                if self.current_dir.pop() {
                    self.entries = load_entries(&self.current_dir);
                    self.selected = 0;
                }
            }
            Action::TogglePause => {
                if self.player.is_paused() {
                    self.player.resume();
                    self.visualizer.start();
                } else if self.player.is_playing() {
                    self.player.pause();
                    self.visualizer.stop();
                }
            }
            Action::Stop => {
                self.player.stop();
                self.visualizer.stop();
                self.elapsed = 0;
            }
            Action::SelectMode(mode) => self.visualizer.set_mode(mode),
            Action::CycleMode => {
                let next = self.visualizer.mode().next();
                self.visualizer.set_mode(next);
            }
            Action::SensitivityUp => {
                let s = clamp_sensitivity(self.visualizer.sensitivity() + SENSITIVITY_STEP);
                self.visualizer.set_sensitivity(s);
            }
            Action::SensitivityDown => {
                let s = clamp_sensitivity(self.visualizer.sensitivity() - SENSITIVITY_STEP);
                self.visualizer.set_sensitivity(s);
            }
            Action::Quit => {
                self.player.stop();
                return true;
            }
            Action::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    /// Enter a directory or start playing an audio file.
    fn open_selected(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        let path = self.current_dir.join(&entry.name);

        if entry.is_dir {
            self.current_dir.push(&entry.name);
            self.entries = load_entries(&self.current_dir);
            self.selected = 0;
            return;
        }
        if !entry.is_audio {
            return;
        }

        match self.play_track(&path) {
            Ok(()) => {
                self.status = None;
                self.metadata = None;
                self.elapsed = 0;
                self.duration = 1;

                // Load metadata off the UI thread
                let tx = self.meta_tx.clone();
                thread::spawn(move || {
                    if let Ok(meta) = load_metadata(path) {
                        let _ = tx.send(meta);
                    }
                });
            }
            Err(err) => {
                self.status = Some(format!("cannot analyze this source: {err}"));
            }
        }
    }

    fn play_track(&mut self, path: &std::path::Path) -> Result<(), crate::audio::InitError> {
        self.player.play(path)?;
        // One analysis session per loaded source
        self.visualizer.release_source();
        self.visualizer.bind_source(self.player.sample_tap())?;
        self.visualizer.start();
        Ok(())
    }

    /// Per-iteration update: drain metadata and drive the render loop.
    pub fn advance(&mut self) {
        if let Ok(meta) = self.meta_rx.try_recv() {
            self.duration = meta.duration_secs.max(1);
            self.metadata = Some(meta);
        }
        let playing = self.player.is_playing() && !self.player.is_paused();
        self.visualizer.tick(playing);
    }

    /// Advance the elapsed-seconds counter; called once per second.
    pub fn tick_elapsed(&mut self) {
        if self.player.is_playing() && !self.player.is_paused() {
            self.elapsed = (self.elapsed + 1).min(self.duration);
        }
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());

        let title = format!("1: {}", tail_path(&self.current_dir, 3));
        render_file_list(f, layout.files, &title, &self.entries, &mut self.state);

        render_canvas(f, layout.canvas, &mut self.picker, &self.visualizer);

        render_player_panel(
            f,
            layout.player,
            self.metadata.as_ref(),
            self.elapsed,
            self.duration,
            self.player.is_playing(),
            self.player.is_paused(),
            self.status.as_deref(),
        );
    }
}
