//! Current-user resolution from request headers

use axum::http::HeaderMap;
use blog_app_core::{blog::AuthorId, ports::CurrentUser, Error, Result};

/// Header carrying the caller's author id
pub const AUTHOR_ID_HEADER: &str = "x-author-id";

/// Resolves the acting author from the `x-author-id` header.
///
/// The raw header is captured when the request arrives and parsed only when
/// the pipeline asks for it, so a bad header fails at the resolve step.
#[derive(Debug, Clone, Default)]
pub struct HeaderCurrentUser {
    raw: Option<String>,
}

impl HeaderCurrentUser {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let raw = headers
            .get(AUTHOR_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string());
        Self { raw }
    }
}

impl CurrentUser for HeaderCurrentUser {
    fn author_id(&self) -> Result<AuthorId> {
        let raw = self
            .raw
            .as_deref()
            .ok_or_else(|| Error::unauthenticated(format!("missing {} header", AUTHOR_ID_HEADER)))?;

        raw.parse::<AuthorId>().map_err(|_| {
            Error::unauthenticated(format!("{} header is not a valid id", AUTHOR_ID_HEADER))
        })
    }
}
