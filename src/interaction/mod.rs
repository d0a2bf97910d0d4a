//! Event handling and user interactions for watchword-bot.
//!
//! This module glues inbound chat messages to the tracker:
//! - Classifying messages and resolving author names
//! - Running the tracker and sending its replies

pub mod message;
