//! Listening socket and connection acceptance.

pub mod listener;

pub use listener::Server;
