use std::path::Path;

use staticd::http::mime::{DEFAULT_MIME_TYPE, MimeRegistry};

mod common;
use common::TestDir;

#[test]
fn test_mime_parse_basic() {
    let registry = MimeRegistry::parse(".html text/html\n.zip application/zip\n");

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.lookup(".html"), "text/html");
    assert_eq!(registry.lookup(".zip"), "application/zip");
}

#[test]
fn test_mime_unknown_extension_falls_back() {
    let registry = MimeRegistry::parse(".html text/html\n");

    assert_eq!(registry.lookup(".xxxx"), DEFAULT_MIME_TYPE);
    assert_eq!(registry.lookup(""), "application/octet-stream");
}

#[test]
fn test_mime_blank_lines_and_extra_tokens() {
    let registry = MimeRegistry::parse("\n   \n.css\ttext/css   ignored tokens\n\n.js  text/javascript\r\n");

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.lookup(".css"), "text/css");
    assert_eq!(registry.lookup(".js"), "text/javascript");
}

#[test]
fn test_mime_single_token_lines_skipped() {
    let registry = MimeRegistry::parse(".orphan\n.txt text/plain\n");

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup(".orphan"), DEFAULT_MIME_TYPE);
}

#[test]
fn test_mime_lookup_is_case_sensitive() {
    let registry = MimeRegistry::parse(".html text/html\n");

    assert_eq!(registry.lookup(".HTML"), DEFAULT_MIME_TYPE);
}

#[test]
fn test_mime_lookup_path() {
    let registry = MimeRegistry::parse(".html text/html\n.gz application/gzip\n");

    assert_eq!(registry.lookup_path(Path::new("/srv/www/index.html")), "text/html");
    assert_eq!(registry.lookup_path(Path::new("bundle.tar.gz")), "application/gzip");
    assert_eq!(registry.lookup_path(Path::new("/srv/www/README")), DEFAULT_MIME_TYPE);
}

#[test]
fn test_mime_lookup_path_dotfile() {
    let registry = MimeRegistry::parse(".bashrc text/plain\n.txt text/plain\n");

    assert_eq!(registry.lookup_path(Path::new("www/.bashrc")), "text/plain");
    assert_eq!(registry.lookup_path(Path::new("www/.config.txt")), "text/plain");
    assert_eq!(registry.lookup_path(Path::new("www/trailing.")), DEFAULT_MIME_TYPE);
}

#[test]
fn test_mime_load_from_file() {
    let dir = TestDir::new();
    let path = dir.write("mime.types", b".png image/png\n.txt text/plain\n");

    let registry = MimeRegistry::load(&path).unwrap();

    assert_eq!(registry.lookup(".png"), "image/png");
    assert_eq!(registry.lookup(".txt"), "text/plain");
}

#[test]
fn test_mime_load_missing_file_fails() {
    let dir = TestDir::new();

    let result = MimeRegistry::load(dir.path().join("does-not-exist"));

    assert!(result.is_err());
}
