//! Field format validation for registration requests.
//!
//! Every predicate here is total: it never fails, it only answers whether
//! the candidate string is acceptable.

/// Maximum length of the part before `@`.
const MAX_LOCAL_PART_LEN: usize = 64;

/// Maximum length of the part after `@`.
const MAX_DOMAIN_LEN: usize = 255;

/// Minimum length of the top-level extension (`com`, `mx`, ...).
const MIN_EXTENSION_LEN: usize = 2;

/// Exact number of digits in a phone number.
const PHONE_DIGITS: usize = 10;

/// Allowed password length range, inclusive.
const PASSWORD_MIN_LEN: usize = 6;
const PASSWORD_MAX_LEN: usize = 12;

/// Characters that satisfy the password "special character" rule.
const PASSWORD_SPECIALS: &[char] = &['@', '$', '&'];

/// Check that an email address has the `local@domain.ext` shape.
///
/// Surrounding whitespace is ignored. The final character-set check is
/// applied last and can reject addresses that already passed the
/// structural rules.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    let [local, domain] = parts.as_slice() else {
        return false;
    };

    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    if !domain.contains('.') {
        return false;
    }
    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
        return false;
    }

    let extension = domain.rsplit('.').next().unwrap_or_default();
    if extension.len() < MIN_EXTENSION_LEN {
        return false;
    }

    email.chars().all(is_email_char)
}

fn is_email_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '@')
}

/// Check that a phone number is exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Character classes counted by the password rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Special,
    Other,
}

impl CharClass {
    /// Classify a character, taking the first class that matches in
    /// upper → lower → digit → special order.
    fn of(c: char) -> Self {
        if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_ascii_digit() {
            CharClass::Digit
        } else if PASSWORD_SPECIALS.contains(&c) {
            CharClass::Special
        } else {
            CharClass::Other
        }
    }
}

/// Check a password against the length and character-class policy.
///
/// Accepts 6 to 12 characters with at least one uppercase letter, one
/// lowercase letter, one digit and one of `@`, `$`, `&`. Other characters
/// are allowed but count toward nothing.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return false;
    }

    let (mut upper, mut lower, mut digit, mut special) = (false, false, false, false);
    for c in password.chars() {
        match CharClass::of(c) {
            CharClass::Upper => upper = true,
            CharClass::Lower => lower = true,
            CharClass::Digit => digit = true,
            CharClass::Special => special = true,
            CharClass::Other => {}
        }
    }

    upper && lower && digit && special
}
