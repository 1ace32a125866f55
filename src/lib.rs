// src/lib.rs
//! Soniq - a terminal audio visualizer.
//!
//! Plays an audio file and paints real-time visualizations of its
//! frequency and amplitude content into a pixel surface displayed in
//! the terminal.

pub mod app;
pub mod audio;
pub mod config;
pub mod fs;
pub mod render;
pub mod ui;
