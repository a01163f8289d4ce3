//! Common validation and masking utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Loose RFC 5322 shape check: local part, `@`, dotted domain with a 2+ letter TLD
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Normalize an email address for use as a lookup key (trimmed, lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for logging
///
/// Keeps the first and last character of the local part:
/// `alice@example.com` becomes `a***e@example.com`. Local parts of one or
/// two characters are fully masked.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let chars: Vec<char> = local.chars().collect();
            if chars.len() <= 2 {
                format!("***@{}", domain)
            } else {
                format!("{}***{}@{}", chars[0], chars[chars.len() - 1], domain)
            }
        }
        None => "***".to_string(),
    }
}

/// Strip the separators users commonly type into a code (spaces and dashes)
pub fn normalize_code(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

/// Check that a normalized code is exactly `length` ASCII digits
pub fn is_numeric_code(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| c.is_ascii_digit())
}
