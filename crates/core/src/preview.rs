//! Preview-link token encoding and classification.
//!
//! A project is reachable by two addressing schemes:
//!
//! - its stored `preview_code`, a human-shareable token like `HAR-2025-001`;
//! - an opaque share token embedded in generated links: the URL-safe,
//!   unpadded base64 of `hm1:<project_id>` (versioned so the format can
//!   change without breaking old links).
//!
//! Raw numeric ids are recognized but are an admin-only convenience; the
//! resolver rejects them for unauthenticated callers.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::types::DbId;

/// Versioned prefix inside encoded share tokens.
const SHARE_TOKEN_PREFIX: &str = "hm1:";

/// How a path token addresses a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An encoded share link carrying the project id.
    ShareToken(DbId),
    /// Looks like a stored preview code (`HAR-2025-001` and friends).
    PreviewCode,
    /// A bare numeric primary key.
    RawId(DbId),
    /// None of the above. Still looked up as a preview code, since legacy
    /// codes are free-form; classification is advisory except for `RawId`.
    Malformed,
}

/// Encode a project id into an opaque share token for preview links.
pub fn encode_share_token(id: DbId) -> String {
    URL_SAFE_NO_PAD.encode(format!("{SHARE_TOKEN_PREFIX}{id}"))
}

/// Classify a raw path token into an addressing scheme.
pub fn classify_token(token: &str) -> TokenKind {
    if let Some(id) = decode_share_token(token) {
        return TokenKind::ShareToken(id);
    }
    if is_preview_code_shaped(token) {
        return TokenKind::PreviewCode;
    }
    if let Ok(id) = token.parse::<DbId>() {
        if id > 0 {
            return TokenKind::RawId(id);
        }
    }
    TokenKind::Malformed
}

/// Try to decode an encoded share token back to its inner project id.
pub fn decode_share_token(token: &str) -> Option<DbId> {
    let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
    let inner = std::str::from_utf8(&bytes).ok()?;
    let id = inner.strip_prefix(SHARE_TOKEN_PREFIX)?.parse::<DbId>().ok()?;
    (id > 0).then_some(id)
}

/// Whether a token looks like a preview code: two or more dash-separated
/// groups of uppercase letters and digits (e.g. `HAR-2025-001`).
fn is_preview_code_shaped(token: &str) -> bool {
    let groups: Vec<&str> = token.split('-').collect();
    groups.len() >= 2
        && groups.iter().all(|g| {
            !g.is_empty() && g.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_token_round_trip() {
        let token = encode_share_token(1001);
        assert_eq!(decode_share_token(&token), Some(1001));
        assert_eq!(classify_token(&token), TokenKind::ShareToken(1001));
    }

    #[test]
    fn test_preview_code_shape_recognized() {
        assert_eq!(classify_token("HAR-2025-001"), TokenKind::PreviewCode);
        assert_eq!(classify_token("HAR-2025-1001"), TokenKind::PreviewCode);
    }

    #[test]
    fn test_raw_numeric_id() {
        assert_eq!(classify_token("42"), TokenKind::RawId(42));
    }

    #[test]
    fn test_lowercase_or_ragged_tokens_are_malformed() {
        // Lowercase groups are not preview codes, and "har" is not valid
        // unpadded base64 of an hm1 payload.
        assert_eq!(classify_token("har-2025-001"), TokenKind::Malformed);
        assert_eq!(classify_token("HAR--001"), TokenKind::Malformed);
        assert_eq!(classify_token(""), TokenKind::Malformed);
    }

    #[test]
    fn test_non_positive_ids_rejected() {
        assert_eq!(classify_token("0"), TokenKind::Malformed);
        assert_eq!(classify_token("-5"), TokenKind::Malformed);
        assert_eq!(decode_share_token(&encode_share_token(0)), None);
    }

    #[test]
    fn test_foreign_base64_is_not_a_share_token() {
        // Valid base64, wrong prefix.
        let foreign = URL_SAFE_NO_PAD.encode("xx9:123");
        assert_eq!(decode_share_token(&foreign), None);
    }
}
