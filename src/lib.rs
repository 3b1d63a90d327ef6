//! Kana typing tutor engine.
//!
//! The library holds everything that is not terminal plumbing: glyph
//! matching, the kana keyboard table and hint resolution, the typing session
//! with its metrics, word lists and configuration. The `kare` binary renders
//! it with ratatui.

pub mod config;
pub mod generator;
pub mod kana;
pub mod keyboard;
pub mod logging;
pub mod session;
