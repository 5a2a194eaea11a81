//! Cart Session and Formatting Helpers

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use uuid::Uuid;

use super::models::LineItem;

/// Cookie carrying the session identifier across requests.
pub const SESSION_COOKIE: &str = "cart_session";

/// Extracts the session id from the `cart_session` cookie, minting a fresh
/// one when the cookie is absent or unusable.
///
/// Returns `(session_id, is_new_session)`; callers set the cookie on new
/// sessions so every later request lands on the same cart.
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| is_safe_session_id(value));

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Session ids double as storage keys, so only the shape we mint is accepted.
fn is_safe_session_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// `Set-Cookie` value for a newly minted session.
pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly")
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Recovery Pack (Lemon Squash)"`.
pub fn format_item_summary(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}x {} ({})", item.quantity, item.name, item.variant_label))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn reuses_session_from_cookie() {
        let headers = headers_with_cookie("theme=dark; cart_session=abc123");
        let (id, is_new) = resolve_session_id(&headers);
        assert_eq!(id, "abc123");
        assert!(!is_new);
    }

    #[test]
    fn mints_session_when_cookie_missing() {
        let (id, is_new) = resolve_session_id(&HeaderMap::new());
        assert!(is_new);
        assert_eq!(id.len(), 32);
    }

    #[test]
    fn rejects_unsafe_session_values() {
        let headers = headers_with_cookie("cart_session=../../etc/passwd");
        let (id, is_new) = resolve_session_id(&headers);
        assert!(is_new);
        assert_ne!(id, "../../etc/passwd");
    }

    #[test]
    fn summary_lists_quantity_name_and_variant() {
        let items = vec![LineItem {
            product_id: "lemon-squash".to_string(),
            name: "Recovery Pack".to_string(),
            description: String::new(),
            images: vec![],
            unit_price: 4999,
            quantity: 2,
            variant_label: "Lemon Squash".to_string(),
        }];
        assert_eq!(format_item_summary(&items), "2x Recovery Pack (Lemon Squash)");
    }
}
