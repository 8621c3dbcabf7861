//! Percent-encoding for job identifiers placed in URL paths.
//!
//! Search ids are opaque server strings. Scheduled and saved-search sids
//! contain characters such as `__` and `:`; ad hoc ones can be anything the
//! caller was handed. Encoding keeps a sid from spilling into neighbouring
//! path segments or the query string.
//!
//! ```
//! use splunk_rest::endpoints::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("1700000000.42"), "1700000000.42");
//! assert_eq!(encode_path_segment("a/../b"), "a%2F..%2Fb");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a URL path segment.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a single URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
