//! # Identifier Mapper
//!
//! Derives Go identifiers from directory paths. The mapping is injective:
//! two different paths under the API root never produce the same
//! identifier, so import aliases and router variables cannot collide.
//!
//! ## Encoding
//!
//! - ASCII letters other than `Z`, and digits not at the start of a segment,
//!   are kept as they are
//! - every other byte, `Z` and `_` included, becomes `Z` plus two hex digits
//!   (`my-api` → `myZ2Dapi`, `2fa` → `Z32fa`)
//! - segments are joined with `_`
//! - a dynamic segment gets one extra leading `_`
//!
//! ```text
//! users/userId     → users_userId
//! users/[userId]   → users__userId
//! user_id          → userZ5Fid
//! ```
//!
//! Encoded segments are never empty and never contain `_`, so the
//! identifier can be split back into its segments unambiguously.

use crate::tree::{Segment, SegmentKind};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Prefix of every handler package import alias.
pub const ALIAS_PREFIX: &str = "api";

/// Suffix of every subrouter variable.
pub const ROUTER_SUFFIX: &str = "Router";

/// Identifier for a segment path; empty for the API root.
pub fn identifier_for(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('_');
        }
        match &segment.kind {
            SegmentKind::Static => encode_into(&mut out, &segment.name),
            SegmentKind::Dynamic { param } => {
                out.push('_');
                encode_into(&mut out, param);
            }
        }
    }
    out
}

/// Import alias for the handler package of a directory (`api`, `api_users`).
pub fn import_alias(segments: &[Segment]) -> String {
    let ident = identifier_for(segments);
    if ident.is_empty() {
        ALIAS_PREFIX.to_string()
    } else {
        format!("{ALIAS_PREFIX}_{ident}")
    }
}

/// Variable holding the subrouter of a top-level group (`usersRouter`).
pub fn router_var(segment: &Segment) -> String {
    format!(
        "{}{ROUTER_SUFFIX}",
        identifier_for(std::slice::from_ref(segment))
    )
}

fn encode_into(out: &mut String, name: &str) {
    for (i, byte) in name.bytes().enumerate() {
        let keep = (byte.is_ascii_alphabetic() && byte != b'Z') || (byte.is_ascii_digit() && i > 0);
        if keep {
            out.push(char::from(byte));
        } else {
            out.push('Z');
            out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
        }
    }
}

/// Names declared or imported by the generated file itself.
pub const GENERATED_NAMES: &[&str] = &[
    "_",
    "r",
    "mux",
    "http",
    "json",
    "mw",
    "notfound",
    "RegisterRoutes",
    "defaultNotFoundHandler",
];

/// Whether a bare name would resolve to something the generated file
/// declares: a fixed name, a handler import alias or a subrouter variable.
pub fn is_generated_name(name: &str) -> bool {
    GENERATED_NAMES.contains(&name)
        || name == ALIAS_PREFIX
        || name
            .strip_prefix(ALIAS_PREFIX)
            .is_some_and(|rest| rest.starts_with('_'))
        || name.ends_with(ROUTER_SUFFIX)
}

/// Whether `s` is a valid Go identifier.
pub fn is_go_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric()) && !is_go_keyword(s)
}

fn is_go_keyword(s: &str) -> bool {
    matches!(
        s,
        "break"
            | "case"
            | "chan"
            | "const"
            | "continue"
            | "default"
            | "defer"
            | "else"
            | "fallthrough"
            | "for"
            | "func"
            | "go"
            | "goto"
            | "if"
            | "import"
            | "interface"
            | "map"
            | "package"
            | "range"
            | "return"
            | "select"
            | "struct"
            | "switch"
            | "type"
            | "var"
    )
}
