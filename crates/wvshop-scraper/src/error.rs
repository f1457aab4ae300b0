use thiserror::Error;

/// Maximum number of characters of a response body kept in [`ShopError::Fetch`].
pub const MAX_BODY_CHARS: usize = 1000;
/// Maximum number of characters of the entry page kept in
/// [`ShopError::BuildIdExtraction`].
pub const MAX_SNIPPET_CHARS: usize = 500;

const TRUNCATION_MARKER: &str = "... (truncated)";

/// One schema violation found while validating a sale payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted field path with array indices, e.g. `option.options.0.isSoldOut`.
    /// Empty for the payload root.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        };
        write!(f, "{path}: {}", self.message)
    }
}

#[derive(Debug, Error)]
pub enum ShopError {
    /// Non-2xx response (`status` set) or a transport failure such as a
    /// timeout or refused connection (`status` is `None`).
    #[error("failed to fetch {url} ({}): {body}", fmt_status(.status))]
    Fetch {
        status: Option<u16>,
        url: String,
        body: String,
    },

    #[error("could not extract build ID from storefront entry page; page structure may have changed. snippet: {snippet}")]
    BuildIdExtraction { snippet: String },

    #[error("invalid data response structure: {reason}")]
    InvalidStructure { reason: String },

    #[error("sale {sale_id} not found in response; available query keys: [{}]", .available_keys.join(", "))]
    SaleNotFound {
        sale_id: i64,
        available_keys: Vec<String>,
    },

    #[error("sale data failed validation:\n{}", fmt_issues(.issues))]
    Validation {
        issues: Vec<ValidationIssue>,
        raw: serde_json::Value,
    },

    #[error("invalid storefront base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ShopError {
    /// Builds a [`ShopError::Fetch`] for a non-2xx response, truncating the body.
    pub(crate) fn http_status(status: u16, url: impl Into<String>, body: &str) -> Self {
        ShopError::Fetch {
            status: Some(status),
            url: url.into(),
            body: truncate(body, MAX_BODY_CHARS),
        }
    }

    /// Builds a [`ShopError::Fetch`] for a request that never produced a response.
    pub(crate) fn transport(url: impl Into<String>, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        ShopError::Fetch {
            status: None,
            url: url.into(),
            body: truncate(&reason, MAX_BODY_CHARS),
        }
    }

    pub(crate) fn build_id_extraction(page: &str) -> Self {
        ShopError::BuildIdExtraction {
            snippet: truncate(page, MAX_SNIPPET_CHARS),
        }
    }

    /// HTTP status carried by a [`ShopError::Fetch`], if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ShopError::Fetch { status, .. } => *status,
            _ => None,
        }
    }

    /// `true` for an HTTP 404 from the storefront, the signal that the cached
    /// build ID has been rotated by a deploy.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Truncates `text` to at most `max_chars` characters, appending a marker when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "no response".to_string(), |s| format!("HTTP {s}"))
}

fn fmt_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}
