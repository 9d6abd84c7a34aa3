//! Machine identifier derivation
//!
//! Form slugs, field names and option values are all derived from
//! operator-entered text by the same transform, differing only in the
//! separator placed between words.

/// Word separator of a derived identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `contact-form` (form slugs)
    Hyphen,
    /// `full_name` (field names, option values)
    Underscore,
}

impl Separator {
    pub const fn as_char(self) -> char {
        match self {
            Self::Hyphen => '-',
            Self::Underscore => '_',
        }
    }
}

/// Derive a machine-safe identifier from display text.
///
/// Lowercases the input, replaces each run of whitespace with the
/// separator, then drops every character outside `[a-z0-9]` and the
/// separator itself. Leading and trailing whitespace is ignored.
///
/// ```
/// use cms_forms::{slugify, Separator};
///
/// assert_eq!(slugify("Contact Form", Separator::Hyphen), "contact-form");
/// assert_eq!(slugify("Full Name", Separator::Underscore), "full_name");
/// ```
pub fn slugify(input: &str, separator: Separator) -> String {
    let sep = separator.as_char();
    let mut out = String::with_capacity(input.len());
    let mut in_whitespace = false;

    for c in input.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace {
            out.push(sep);
            in_whitespace = false;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == sep {
            out.push(c);
        }
    }

    out
}
