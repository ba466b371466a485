//! Core library modules shared by the server, the client and the CLI.
//!
//! ## Contents
//!
//! - **Domain**: task types ([`task`]), validation rules ([`validation`]),
//!   domain errors ([`error`]) and the JSON envelope ([`envelope`])
//! - **Server side**: transactional task operations ([`service`])
//! - **Client side**: the observable task cache ([`cache`])
//! - **Infrastructure**: configuration ([`config`]), data directory
//!   ([`data_storage`]) and the message catalog with its output macros
//!   ([`messages`])

pub mod cache;
pub mod config;
pub mod data_storage;
pub mod envelope;
pub mod error;
pub mod messages;
pub mod service;
pub mod task;
pub mod validation;
