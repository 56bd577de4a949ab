//! Line-based tokenizer (C5).
//!
//! Input is conceptually "an iterator of text lines" (§4.4); in practice we
//! slice lines directly out of the source buffer (each a contiguous `&str`)
//! so tokens can borrow from the original text without copying, the way the
//! teacher's char-stream lexer borrows from its input. The *rules* applied
//! per line, and the state they carry (only "are we inside a field"), are
//! restructured from the teacher's character-by-character state machine
//! into the line-oriented shape §4.4 specifies, since the upstream Python
//! reference's `tokenize_deb822_file` function body was not available to
//! port verbatim (only its token *class* definitions were retrievable).

use crate::common::{is_blank_line, is_indent, is_valid_initial_key_char, is_valid_key_char};
use crate::syntax_kind::SyntaxKind;

/// Splits `input` into lines, each slice including its trailing `'\n'`
/// except possibly the last line of the input.
fn split_lines(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find('\n') {
            Some(idx) => {
                let (line, tail) = rest.split_at(idx + 1);
                rest = tail;
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Splits the post-colon (or post-continuation-space) content of a line
/// into an optional leading whitespace run, an optional value body, and an
/// optional trailing whitespace run. `content` must already have its
/// trailing `"\n"` (if any) stripped.
///
/// When the content is whitespace-only, the two runs collapse into a
/// single trailing whitespace token per §4.4 ("When value text is empty,
/// the two whitespace runs collapse into the trailing whitespace").
fn split_value_content(content: &str) -> (Option<&str>, Option<&str>, Option<&str>) {
    if content.is_empty() {
        return (None, None, None);
    }
    let trimmed = content.trim_matches(is_indent);
    if trimmed.is_empty() {
        return (None, None, Some(content));
    }
    let leading_len = content.len() - content.trim_start_matches(is_indent).len();
    let trailing_len = content.len() - content.trim_end_matches(is_indent).len();
    let leading = (leading_len > 0).then(|| &content[..leading_len]);
    let trailing = (trailing_len > 0).then(|| &content[content.len() - trailing_len..]);
    let value = &content[leading_len..content.len() - trailing_len];
    (leading, Some(value), trailing)
}

fn strip_trailing_newline(line: &str) -> (&str, bool) {
    match line.strip_suffix('\n') {
        Some(rest) => (rest, true),
        None => (line, false),
    }
}

fn emit_value_line_content<'a>(out: &mut Vec<(SyntaxKind, &'a str)>, line: &'a str) {
    let (content, had_newline) = strip_trailing_newline(line);
    let (leading, value, trailing) = split_value_content(content);
    if let Some(ws) = leading {
        out.push((SyntaxKind::WHITESPACE, ws));
    }
    if let Some(v) = value {
        out.push((SyntaxKind::VALUE, v));
    }
    if let Some(ws) = trailing {
        out.push((SyntaxKind::WHITESPACE, ws));
    }
    if had_newline {
        out.push((SyntaxKind::NEWLINE_AFTER_VALUE, "\n"));
    }
}

/// Scans a field name at the start of `line`, per the Debian Policy §5.1
/// character class (excluding `#`/`-` as the first character). Returns the
/// name and the rest of the line (starting at `:`) if `line` is shaped like
/// a field line.
fn scan_field_name(line: &str) -> Option<(&str, &str)> {
    let mut chars = line.char_indices();
    let (_, first) = chars.next()?;
    if !is_valid_initial_key_char(first) {
        return None;
    }
    let mut end = first.len_utf8();
    for (idx, c) in chars {
        if c == ':' {
            end = idx;
            break;
        }
        if !is_valid_key_char(c) {
            return None;
        }
        end = idx + c.len_utf8();
    }
    let (name, rest) = line.split_at(end);
    if !rest.starts_with(':') {
        return None;
    }
    Some((name, rest))
}

/// Recovers the contiguous slice of `input` starting at `start`'s start
/// pointer with length `len`. `start` must be a substring of `input`.
fn sub_slice<'a>(input: &'a str, start: &'a str, len: usize) -> &'a str {
    let offset = start.as_ptr() as usize - input.as_ptr() as usize;
    &input[offset..offset + len]
}

/// Tokenizes a complete deb822 text buffer.
pub fn lex(input: &str) -> Vec<(SyntaxKind, &str)> {
    let mut out = Vec::new();
    let mut in_field = false;
    let mut lines = split_lines(input).peekable();

    while let Some(line) = lines.next() {
        if is_blank_line(line.strip_suffix('\n').unwrap_or(line)) {
            let mut total_len = line.len();
            while let Some(next) = lines.peek() {
                if is_blank_line(next.strip_suffix('\n').unwrap_or(next)) {
                    total_len += next.len();
                    lines.next();
                } else {
                    break;
                }
            }
            let joined = sub_slice(input, line, total_len);
            out.push((SyntaxKind::WHITESPACE, joined));
            in_field = false;
            continue;
        }

        let mut chars = line.chars();
        let first = chars.next().unwrap();

        if first == '#' {
            out.push((SyntaxKind::COMMENT, line));
            continue;
        }

        // Only a literal leading space opens a continuation line (spec §3/
        // §4.4, ground truth `_deb822_repro.py`'s `if line[0] == ' ':`); a
        // tab-led line falls through to the field-name scan below, which
        // rejects it and it lands in the generic Error path like any other
        // unrecognized line shape.
        if first == ' ' {
            if in_field {
                let (cont, rest) = line.split_at(first.len_utf8());
                out.push((SyntaxKind::VALUE_CONTINUATION, cont));
                emit_value_line_content(&mut out, rest);
            } else {
                out.push((SyntaxKind::ERROR, line));
            }
            continue;
        }

        if let Some((name, rest)) = scan_field_name(line) {
            out.push((SyntaxKind::FIELD_NAME, name));
            let (colon, after_colon) = rest.split_at(1);
            out.push((SyntaxKind::FIELD_SEPARATOR, colon));
            emit_value_line_content(&mut out, after_colon);
            in_field = true;
            continue;
        }

        out.push((SyntaxKind::ERROR, line));
        in_field = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind::*;
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn test_minimal_field() {
        assert_eq!(
            lex("A: b\n"),
            vec![
                (FIELD_NAME, "A"),
                (FIELD_SEPARATOR, ":"),
                (WHITESPACE, " "),
                (VALUE, "b"),
                (NEWLINE_AFTER_VALUE, "\n"),
            ]
        );
    }

    #[test]
    fn test_continuation_and_comment() {
        let text = "Package: foo\n# field comment\nSection: main/devel\nDepends: libfoo,\n# inline\n         libbar,\n";
        let tokens = lex(text);
        assert_eq!(
            tokens,
            vec![
                (FIELD_NAME, "Package"),
                (FIELD_SEPARATOR, ":"),
                (WHITESPACE, " "),
                (VALUE, "foo"),
                (NEWLINE_AFTER_VALUE, "\n"),
                (COMMENT, "# field comment\n"),
                (FIELD_NAME, "Section"),
                (FIELD_SEPARATOR, ":"),
                (WHITESPACE, " "),
                (VALUE, "main/devel"),
                (NEWLINE_AFTER_VALUE, "\n"),
                (FIELD_NAME, "Depends"),
                (FIELD_SEPARATOR, ":"),
                (WHITESPACE, " "),
                (VALUE, "libfoo,"),
                (NEWLINE_AFTER_VALUE, "\n"),
                (COMMENT, "# inline\n"),
                (VALUE_CONTINUATION, " "),
                (WHITESPACE, "        "),
                (VALUE, "libbar,"),
                (NEWLINE_AFTER_VALUE, "\n"),
            ]
        );
    }

    #[test]
    fn test_blank_line_run_merges() {
        let tokens = lex("A: b\n\n\nC: d\n");
        assert_eq!(
            tokens,
            vec![
                (FIELD_NAME, "A"),
                (FIELD_SEPARATOR, ":"),
                (WHITESPACE, " "),
                (VALUE, "b"),
                (NEWLINE_AFTER_VALUE, "\n"),
                (WHITESPACE, "\n\n"),
                (FIELD_NAME, "C"),
                (FIELD_SEPARATOR, ":"),
                (WHITESPACE, " "),
                (VALUE, "d"),
                (NEWLINE_AFTER_VALUE, "\n"),
            ]
        );
    }

    #[test]
    fn test_continuation_without_field_is_error() {
        let tokens = lex(" stray\n");
        assert_eq!(tokens, vec![(ERROR, " stray\n")]);
    }

    #[test]
    fn test_empty_value_collapses_whitespace() {
        let tokens = lex("Depends:\n foo\n");
        assert_eq!(
            tokens,
            vec![
                (FIELD_NAME, "Depends"),
                (FIELD_SEPARATOR, ":"),
                (NEWLINE_AFTER_VALUE, "\n"),
                (VALUE_CONTINUATION, " "),
                (VALUE, "foo"),
                (NEWLINE_AFTER_VALUE, "\n"),
            ]
        );
    }

    #[test]
    fn test_initial_dash_is_not_a_field_name_start() {
        // a line starting with '-' cannot open a field; falls through to Error.
        let tokens = lex("-Foo: bar\n");
        assert_eq!(tokens, vec![(ERROR, "-Foo: bar\n")]);
    }

    #[test]
    fn test_tab_led_line_inside_field_is_error_not_continuation() {
        let tokens = lex("A: b\n\tc\n");
        assert_eq!(
            tokens,
            vec![
                (FIELD_NAME, "A"),
                (FIELD_SEPARATOR, ":"),
                (WHITESPACE, " "),
                (VALUE, "b"),
                (NEWLINE_AFTER_VALUE, "\n"),
                (ERROR, "\tc\n"),
            ]
        );
    }

    #[test]
    fn test_coverage_round_trips_every_token() {
        let text = "Package: foo\n# c\nDepends: a,\n b,\n\nSource: bar\n";
        let tokens = lex(text);
        let joined: String = tokens.iter().map(|(_, t)| *t).collect();
        assert_eq!(joined, text);
    }
}
