use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::http::mime::MimeRegistry;
use crate::http::request::RequestHeader;
use crate::http::resolve::resolve;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Turns a framed request into a response.
///
/// One dispatcher is shared by every session; it only holds read-only state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    doc_root: PathBuf,
    mime: Arc<MimeRegistry>,
}

impl Dispatcher {
    pub fn new(doc_root: impl Into<PathBuf>, mime: Arc<MimeRegistry>) -> Self {
        Self {
            doc_root: doc_root.into(),
            mime,
        }
    }

    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    /// Picks 200, 400 or 404 for `req`.
    ///
    /// The response carries `Connection: close` only when the request did.
    pub async fn dispatch(&self, req: &RequestHeader) -> Response {
        let close = req.is_connection_close();

        if let Err(e) = req.validate() {
            tracing::debug!(
                method = %req.method,
                url = %req.url,
                error = %e,
                "Rejecting request"
            );
            return Response::bad_request(close);
        }

        let resolved = match resolve(&self.doc_root, &req.url).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!(url = %req.url, error = %e, "Unresolved URL");
                return Response::not_found(&req.url, close);
            }
        };

        let content_type = self.mime.lookup_path(&resolved.path);
        tracing::debug!(
            url = %req.url,
            path = %resolved.path.display(),
            content_type,
            bytes = resolved.contents.len(),
            "Serving file"
        );

        // Stamped with the time of serving, not the file's mtime.
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .last_modified(httpdate::fmt_http_date(SystemTime::now()))
            .connection(close.then_some("close"))
            .body(resolved.contents)
            .build()
    }
}
