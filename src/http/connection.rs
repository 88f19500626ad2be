use std::sync::Arc;
use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;

use crate::http::dispatch::Dispatcher;
use crate::http::parser::{ParseError, RequestParser, RequestState};
use crate::http::request::RequestHeader;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// How long a single byte read may block.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest a line may grow without a CRLF.
pub const MAX_LINE_LEN: usize = 2048;

/// Accumulates bytes until a CRLF completes a line.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: BytesMut,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(256),
        }
    }

    /// Bytes buffered for the current, unfinished line.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends one byte. Returns the finished line, without its CRLF, once
    /// the terminator arrives.
    ///
    /// Fails if more than [`MAX_LINE_LEN`] bytes are already buffered.
    pub fn push(&mut self, byte: u8) -> Result<Option<Bytes>, ParseError> {
        if self.buf.len() > MAX_LINE_LEN {
            return Err(ParseError::LineTooLong(MAX_LINE_LEN));
        }

        self.buf.put_u8(byte);

        if self.buf.ends_with(b"\r\n") {
            let mut line = self.buf.split();
            line.truncate(line.len() - 2);
            return Ok(Some(line.freeze()));
        }

        Ok(None)
    }
}

pub enum ConnectionState {
    Reading,
    Processing(RequestHeader),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

enum ReadOutcome {
    Request(RequestHeader),
    Malformed(ParseError),
    Idle,
}

/// One client session: frames requests off the stream and answers them in
/// order until the client asks to close, misbehaves, or goes quiet.
pub struct Connection<S> {
    stream: BufReader<S>,
    framer: LineFramer,
    parser: RequestParser,
    dispatcher: Arc<Dispatcher>,
    read_timeout: Duration,
    state: ConnectionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, dispatcher: Arc<Dispatcher>) -> Self {
        Self::with_read_timeout(stream, dispatcher, READ_TIMEOUT)
    }

    pub fn with_read_timeout(stream: S, dispatcher: Arc<Dispatcher>, read_timeout: Duration) -> Self {
        Self {
            stream: BufReader::new(stream),
            framer: LineFramer::new(),
            parser: RequestParser::new(),
            dispatcher,
            read_timeout,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await {
                    ReadOutcome::Request(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    ReadOutcome::Malformed(e) => {
                        tracing::warn!(error = %e, "Bad request, closing connection");
                        let writer = ResponseWriter::new(&Response::bad_request(true));
                        self.state = ConnectionState::Writing(writer, false);
                    }
                    ReadOutcome::Idle => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = self.dispatcher.dispatch(req).await;
                    let keep_alive = !req.is_connection_close();

                    tracing::debug!(
                        method = %req.method,
                        url = %req.url,
                        status = response.status().as_u16(),
                        keep_alive,
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    let keep_alive = *keep_alive;
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        // Peer may already be gone.
        let _ = self.stream.shutdown().await;
        Ok(())
    }

    async fn read_request(&mut self) -> ReadOutcome {
        loop {
            let byte = match timeout(self.read_timeout, self.stream.read_u8()).await {
                Ok(Ok(byte)) => byte,
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, "Read failed");
                    return self.read_ended();
                }
                Err(_) => {
                    tracing::debug!(timeout = ?self.read_timeout, "Read timed out");
                    return self.read_ended();
                }
            };

            let line = match self.framer.push(byte) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(e) => return ReadOutcome::Malformed(e),
            };

            match self.parser.feed_line(&String::from_utf8_lossy(&line)) {
                Ok(Some(req)) => return ReadOutcome::Request(req),
                Ok(None) => {}
                Err(e) => return ReadOutcome::Malformed(e),
            }
        }
    }

    // Stream ended or timed out. Only an error if a request was under way.
    fn read_ended(&self) -> ReadOutcome {
        if !self.framer.is_empty() || self.parser.state() == RequestState::AwaitingHeaders {
            ReadOutcome::Malformed(ParseError::IncompleteRequest)
        } else {
            ReadOutcome::Idle
        }
    }
}
