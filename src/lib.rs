//! Best firmware release resolution for device models
//!
//! - [`version`]: Pure resolution engine (ranking, selection, date/popularity tie-break)
//! - [`listing`]: Row records and the sources that produce them
//! - [`session`]: Conversation flow driving the engine step by step
//! - [`config`]: Configuration file and data directory paths
//! - [`logging`]: File-backed structured logging

pub mod config;
pub mod listing;
pub mod logging;
pub mod session;
pub mod version;
