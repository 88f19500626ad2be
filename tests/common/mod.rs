//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use staticd::http::connection::Connection;
use staticd::http::dispatch::Dispatcher;
use staticd::http::mime::MimeRegistry;
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncReadExt, DuplexStream};
use tokio::task::JoinHandle;

pub const MIME_TABLE: &str = ".html text/html\n.txt text/plain\n\n.png image/png\n";

/// A scratch directory removed on drop.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("staticd-test-")
            .tempdir()
            .unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }
}

/// Layout used by most tests:
///
/// ```text
/// <tmp>/secret              (outside the root)
/// <tmp>/www/index.html
/// <tmp>/www/about.html
/// <tmp>/www/notes.txt
/// <tmp>/www/data.xyz
/// <tmp>/www/dir1/file1.txt
/// <tmp>/www/dir2/index.html
/// ```
pub struct Site {
    pub dir: TestDir,
    pub root: PathBuf,
}

pub const INDEX_HTML: &[u8] = b"<h1>Hello World</h1>";
pub const ABOUT_HTML: &[u8] = b"<p>about us</p>";
pub const SECRET: &[u8] = b"top secret contents";

impl Site {
    pub fn new() -> Self {
        let dir = TestDir::new();
        dir.write("secret", SECRET);
        dir.write("www/index.html", INDEX_HTML);
        dir.write("www/about.html", ABOUT_HTML);
        dir.write("www/notes.txt", b"some notes");
        dir.write("www/data.xyz", b"\x00\x01\x02");
        dir.write("www/dir1/file1.txt", b"file one");
        dir.write("www/dir2/index.html", b"dir2 index");
        let root = dir.path().join("www");
        Self { dir, root }
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::new(Dispatcher::new(
            &self.root,
            Arc::new(MimeRegistry::parse(MIME_TABLE)),
        ))
    }

    /// Starts a session over an in-memory stream and returns the client end.
    pub fn session(&self, read_timeout: Duration) -> (DuplexStream, JoinHandle<anyhow::Result<()>>) {
        let (client, server) = tokio::io::duplex(1 << 20);
        let mut conn = Connection::with_read_timeout(server, self.dispatcher(), read_timeout);
        let handle = tokio::spawn(async move { conn.run().await });
        (client, handle)
    }
}

/// A response as read back off the wire.
#[derive(Debug)]
pub struct WireResponse {
    pub status_line: String,
    pub header_order: Vec<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn code(&self) -> &str {
        self.status_line.split(' ').nth(1).unwrap_or("")
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}

/// Reads exactly one response, using Content-Length to find its end.
/// Returns `None` if the stream ends before a status line arrives.
pub async fn read_response<R: AsyncRead + Unpin>(stream: &mut R) -> Option<WireResponse> {
    let mut head = Vec::new();
    while !head.ends_with(b"\r\n\r\n") {
        match stream.read_u8().await {
            Ok(b) => head.push(b),
            Err(_) if head.is_empty() => return None,
            Err(e) => panic!("stream ended inside response head: {}", e),
        }
    }

    let head = String::from_utf8(head).unwrap();
    let mut lines = head.split("\r\n").filter(|l| !l.is_empty());
    let status_line = lines.next().unwrap().to_string();

    let mut header_order = Vec::new();
    let mut headers = HashMap::new();
    for line in lines {
        let (k, v) = line.split_once(": ").unwrap();
        header_order.push(k.to_string());
        headers.insert(k.to_string(), v.to_string());
    }

    let len: usize = headers["Content-Length"].parse().unwrap();
    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).await.unwrap();

    Some(WireResponse {
        status_line,
        header_order,
        headers,
        body,
    })
}

/// True once the peer has closed its side and nothing more is buffered.
pub async fn is_closed<R: AsyncRead + Unpin>(stream: &mut R) -> bool {
    let mut rest = Vec::new();
    match tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut rest)).await {
        Ok(Ok(_)) => rest.is_empty(),
        Ok(Err(_)) => true,
        Err(_) => false,
    }
}
