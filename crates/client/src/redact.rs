//! Query redaction for logs.
//!
//! Search strings can carry tokens, credentials or PII, so they are never
//! logged verbatim. The redacted form keeps enough (length and a short hash)
//! to correlate log lines that refer to the same query.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Render `query` as `<N chars, hash=XXXXXXXX>`.
pub fn redact_query(query: &str) -> String {
    let mut hasher = DefaultHasher::new();
    query.hash(&mut hasher);
    let hash = hasher.finish();
    format!("<{} chars, hash={:08x}>", query.chars().count(), hash as u32)
}
