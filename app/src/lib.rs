//! Fitness Tracker App Library
//!
//! This library exposes the app modules for use in tests and the terminal
//! front end.

pub mod advice;
pub mod config;
pub mod controller;
pub mod error;
pub mod preferences;
pub mod services;
pub mod state;
