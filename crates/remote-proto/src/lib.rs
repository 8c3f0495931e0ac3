//! Shared wire protocol, configuration, and platform paths for the tonearm
//! remote and any server speaking its framed JSON protocol.

pub mod config;
pub mod platform;
pub mod protocol;
