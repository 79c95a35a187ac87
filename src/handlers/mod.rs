// handlers/mod.rs - tiered route handlers
//
// Public (no auth) → Protected (token required) → Elevated (admin token) → Debug
// (mounted only when debug routes are enabled).
//
// Each handler resolves its context through extractors (`AuthUser`,
// `AdminUser`), validates input, calls one service and returns `ApiResult`,
// so every outcome leaves through the envelope builder.
pub mod public;
pub mod protected;
pub mod elevated;
pub mod debug;

/// Trimmed, non-empty value of an optional input field
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Non-empty secret, kept verbatim with surrounding whitespace
pub(crate) fn secret(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{required, secret};

    #[test]
    fn required_rejects_blank_input() {
        assert_eq!(required(None), None);
        assert_eq!(required(Some("   ".to_string())), None);
        assert_eq!(required(Some(" bob ".to_string())), Some("bob".to_string()));
    }

    #[test]
    fn secret_keeps_whitespace() {
        assert_eq!(secret(None), None);
        assert_eq!(secret(Some(String::new())), None);
        assert_eq!(secret(Some(" padded ".to_string())), Some(" padded ".to_string()));
    }
}
