//! Tokenlens - operator dashboard over a conversational-AI document store
//!
//! This library provides the core functionality for browsing platform
//! collections and attributing raw token counts to monetary cost at message,
//! conversation, and user granularity.

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod pricing;
pub mod store;
