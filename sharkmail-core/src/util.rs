//! Small shared helpers.

/// Syntactic email validation.
///
/// Deliberately minimal: exactly one `@`, non-empty local part, and a domain
/// containing at least one dot. Deliverability is the mail provider's
/// problem, not ours.
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    let mut parts = address.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || address.contains(char::is_whitespace) {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
