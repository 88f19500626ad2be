use thiserror::Error;

use crate::http::request::RequestHeader;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
    #[error("line exceeds {0} bytes without a terminator")]
    LineTooLong(usize),
    #[error("connection ended in the middle of a request")]
    IncompleteRequest,
}

/// Where the parser is within the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// The next non-empty line is the request line
    AwaitingRequestLine,
    /// The request line is in; lines are headers until a blank line
    AwaitingHeaders,
}

/// Builds one [`RequestHeader`] at a time from already framed lines.
#[derive(Debug)]
pub struct RequestParser {
    state: RequestState,
    request: RequestHeader,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: RequestState::AwaitingRequestLine,
            request: RequestHeader::new(),
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Feeds one line (terminator stripped).
    ///
    /// Returns `Ok(Some(request))` on the blank line ending a request, after
    /// which the parser is ready for the next request on the connection.
    pub fn feed_line(&mut self, line: &str) -> Result<Option<RequestHeader>, ParseError> {
        if line.is_empty() {
            self.state = RequestState::AwaitingRequestLine;
            return Ok(Some(std::mem::take(&mut self.request)));
        }

        match self.state {
            RequestState::AwaitingRequestLine => {
                let (method, url, version) = parse_request_line(line)?;
                self.request.method = method.to_string();
                self.request.url = url.to_string();
                self.request.version = version.to_string();
                self.state = RequestState::AwaitingHeaders;
            }
            RequestState::AwaitingHeaders => {
                let (key, value) = parse_header_line(line)?;
                match key.to_ascii_lowercase().as_str() {
                    "connection" => self.request.connection = value.trim().to_string(),
                    "host" => self.request.host = value.to_string(),
                    _ => {}
                }
            }
        }

        Ok(None)
    }
}

/// Splits a request line on runs of whitespace into method, URL and version.
///
/// Exactly three fields are required.
pub fn parse_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
    let mut fields = split_whitespace_runs(line);

    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(method), Some(url), Some(version), None) => Ok((method, url, version)),
        _ => Err(ParseError::MalformedRequestLine(line.to_string())),
    }
}

/// Splits a header line at the first colon; ASCII whitespace following the
/// colon is dropped from the value.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;

    Ok((key, value.trim_start_matches(|c: char| c.is_ascii_whitespace())))
}

// Separators are ASCII whitespace only (space, \t, \n, \x0C, \r). Unlike
// `str::split_whitespace`, leading and trailing whitespace produce empty
// fields, so " GET / HTTP/1.1" does not count as three fields.
fn split_whitespace_runs(line: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(line);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(|c: char| c.is_ascii_whitespace()) {
            Some(start) => {
                let tail = &s[start..];
                let skip = tail
                    .find(|c: char| !c.is_ascii_whitespace())
                    .unwrap_or(tail.len());
                rest = Some(&tail[skip..]);
                Some(&s[..start])
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}
