//! Parser for the subway feed's human-readable protocol dump.
//!
//! The upstream page wraps a pretty-printed realtime message in a `<pre>`
//! block:
//!
//! ```text
//! <pre>
//! header { gtfs_realtime_version: "2.0" }
//! entity {
//!   id: "1"
//!   vehicle {
//!     trip { route_id: "MFL" direction_id: 0 }
//!     vehicle { id: "1043" }
//!     position { latitude: 39.95 longitude: -75.16 }
//!   }
//! }
//! </pre>
//! ```
//!
//! Parsing runs in three stages: isolate and unescape the payload,
//! tokenize, then build a block tree by recursive descent. Entities are
//! read from the tree afterwards. The dump format is not a stable contract,
//! so [`parse`] never fails: anything unreadable yields no entities.

mod entity;
mod error;
mod lexer;
mod parser;

use std::borrow::Cow;

use tracing::{debug, warn};

pub use entity::{Entity, EntityPosition, TripInfo, VehicleInfo};
pub use error::TextFeedError;
pub use parser::{Block, Field, Value};

/// Opening payload delimiter.
const PAYLOAD_START: &str = "<pre>";

/// Closing payload delimiter.
const PAYLOAD_END: &str = "</pre>";

/// Parse a dump into entities, degrading to an empty list.
pub fn parse(text: &str) -> Vec<Entity> {
    match parse_document(text) {
        Ok(document) => entities(&document),
        Err(e) => {
            warn!(error = %e, "unreadable subway dump, treating as empty");
            Vec::new()
        }
    }
}

/// Parse a dump into its block tree.
pub fn parse_document(text: &str) -> Result<Block, TextFeedError> {
    let payload = isolate_payload(text)?;
    let payload = unescape_html(payload);
    let tokens = lexer::tokenize(&payload)?;
    parser::parse_tokens(&tokens)
}

/// Read every top-level `entity` block, skipping ones without an id.
pub fn entities(document: &Block) -> Vec<Entity> {
    document
        .blocks("entity")
        .filter_map(|block| {
            let entity = Entity::from_block(block);
            if entity.is_none() {
                debug!("dropping subway entity without an id");
            }
            entity
        })
        .collect()
}

/// The text between the payload delimiters.
///
/// A body without the opening delimiter is taken to be a bare dump.
fn isolate_payload(text: &str) -> Result<&str, TextFeedError> {
    let Some(start) = find_ignore_case(text, PAYLOAD_START) else {
        return Ok(text);
    };
    let body = &text[start + PAYLOAD_START.len()..];
    let end = find_ignore_case(body, PAYLOAD_END).ok_or(TextFeedError::MissingEnd {
        open: PAYLOAD_START,
    })?;
    Ok(&body[..end])
}

/// Byte offset of `needle` in `haystack`, ignoring ASCII case.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Resolve the HTML entities a `<pre>` block may contain.
fn unescape_html(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    const ENTITIES: [(&str, &str); 6] = [
        ("&quot;", "\""),
        ("&#34;", "\""),
        ("&#39;", "'"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&amp;", "&"),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, replacement)) => {
                out.push_str(replacement);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
