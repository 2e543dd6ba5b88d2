//! wttr-tui - terminal weather viewer backed by wttr.in
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod glyphs;
pub mod reducer;
pub mod state;
