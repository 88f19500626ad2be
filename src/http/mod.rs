//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 static file server with support
//! for keep-alive connections. Only `GET` is served.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: Per-connection session, line framing and the request-response state machine
//! - **`parser`**: Turns framed lines into a [`request::RequestHeader`]
//! - **`request`**: Request representation and validation rules
//! - **`dispatch`**: Chooses the status code and builds the response for a request
//! - **`resolve`**: Maps URLs to files inside the document root
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read byte by byte, 5s deadline per read
//!        └──────┬──────┘
//!               │ Blank line ends request     (idle timeout/EOF → Closed,
//!               ▼                              malformed → 400 + Closed)
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch: 200 / 400 / 404
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ No "Connection: close" → Reading (same connection)
//!               └─ "Connection: close"    → Closed
//! ```
//!
//! While in `Reading`, the parser itself tracks whether the request line has
//! been seen ([`parser::RequestState`]).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use staticd::http::connection::Connection;
//! use staticd::http::dispatch::Dispatcher;
//! use staticd::http::mime::MimeRegistry;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mime = Arc::new(MimeRegistry::load("mime.types")?);
//!     let dispatcher = Arc::new(Dispatcher::new("www", mime));
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let dispatcher = dispatcher.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, dispatcher);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod dispatch;
pub mod resolve;
pub mod writer;
pub mod mime;
