//! Service integrations for external APIs and clients.
//!
//! This module contains the chat service used by the watchword-bot. The
//! service defines a generic trait and a concrete Slack implementation,
//! allowing for extensibility and easy testing.

pub mod chat;
