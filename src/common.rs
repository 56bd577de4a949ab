#[inline]
pub(crate) fn is_indent(c: char) -> bool {
    // deb822(5) says that continuation lines
    // start with a space (U+0020) or a tab (U+0009).
    c == ' ' || c == '\t'
}

#[inline]
pub(crate) fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[inline]
pub(crate) fn is_valid_key_char(c: char) -> bool {
    // deb822(5) says valid field characters are US-ASCII
    // characters excluding control characters, space and colon
    // (i.e. characters in the ranges U+0021 to U+0039 and U+003B to U+007E).
    // I.e. printable characters except for space and colon.
    c.is_ascii_graphic() && c != ':' && c != ' '
}

#[inline]
pub(crate) fn is_valid_initial_key_char(c: char) -> bool {
    // '-' and '#' are excluded so a field can't be confused with a
    // continuation-line marker or a comment when the line is scanned cold.
    c != '-' && c != '#' && is_valid_key_char(c)
}

/// A line consisting of only spaces and/or tabs (no newline). Used to
/// recognize paragraph separators.
#[inline]
pub(crate) fn is_blank_line(line: &str) -> bool {
    line.chars().all(is_indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_key_char_excludes_hash_and_dash() {
        assert!(!is_valid_initial_key_char('#'));
        assert!(!is_valid_initial_key_char('-'));
        assert!(is_valid_initial_key_char('X'));
    }

    #[test]
    fn test_blank_line() {
        assert!(is_blank_line(""));
        assert!(is_blank_line("   "));
        assert!(is_blank_line("\t \t"));
        assert!(!is_blank_line(" x "));
    }
}
