//! Number and text formatting utilities.
//!
//! This module provides common formatting functions used across the
//! renderers for consistent output presentation.

/// Formats a number with comma separators for thousands.
///
/// # Examples
///
/// ```
/// use keycloak_tf_audit::utils::format::format_number;
///
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Truncates text to at most `max` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte names survive.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut result: String = text.chars().take(keep).collect();
    result.push_str("...");
    result
}

/// Check mark glyph for boolean table cells.
pub fn check_mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Warning glyph for conditions that deserve attention (temporary
/// passwords, disabled accounts).
pub fn warning_mark(warn: bool) -> &'static str {
    if warn {
        "⚠️"
    } else {
        "✅"
    }
}
