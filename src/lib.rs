//! staticd - keep-alive static file server
//!
//! Core library for request framing, file resolution and response writing.

pub mod config;
pub mod http;
pub mod server;
