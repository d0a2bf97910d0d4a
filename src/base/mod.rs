//! Core components, types, and utilities for the watchword-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Reply templates rendered by the tracker.
//! - Common types and result handling.

pub mod config;
pub mod messages;
pub mod types;
