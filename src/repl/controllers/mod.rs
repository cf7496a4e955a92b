//! # Controllers Module
//!
//! The controller that owns a session and runs its event loop.

pub mod app_controller;

pub use app_controller::AppController;
