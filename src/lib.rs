//! # Connect Four Engine
//!
//! A two-player Connect Four game-state engine with a terminal front end
//! built with Ratatui. The engine performs no I/O and can be driven and
//! tested without any rendering surface.
//!
//! ## Modules
//!
//! - [`game`] — Board and gravity, win detection, round/session state machine,
//!   notification contract
//! - [`ui`] — Terminal UI consuming engine notifications
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
