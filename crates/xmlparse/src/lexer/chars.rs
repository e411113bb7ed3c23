//! Character classes shared by the XML productions

/// Characters allowed in element, attribute and instruction names.
///
/// ASCII word characters plus `:`, `.`, `-`, and any non-ASCII letter or
/// digit, so prefixed names like `ns:field` and `c:Key.Columns` stay whole.
pub fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, '_' | ':' | '.' | '-')
        || (!ch.is_ascii() && ch.is_alphanumeric())
}

/// Characters allowed in an unquoted attribute value
pub fn is_bare_value_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || (!ch.is_ascii() && ch.is_alphanumeric())
}

/// Strip one pair of matching quotes from an attribute value
pub fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}
