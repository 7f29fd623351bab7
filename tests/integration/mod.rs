//! Integration tests for healthmon-rs
//!
//! These tests drive the public API with real checks, handlers and config files.

pub mod config_tests;
pub mod monitor_tests;
pub mod webhook_tests;
