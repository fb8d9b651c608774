//! A stateful line cursor over SM source text.
//!
//! The header dispatcher and the chart decoder take turns pulling lines
//! from one shared cursor; whichever sub-parser is active owns the read
//! position until it returns on a clean boundary.

/// A pull source of logical lines, shared by every sub-parser.
#[derive(Debug)]
pub struct Cursor<'a> {
    /// The line position of the last yielded line, starts with 1.
    line: usize,
    /// The byte index position.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            line: 0,
            index: 0,
            source,
        }
    }

    /// Whether every line has been consumed.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    /// Moves the cursor past the next line and returns it, without its
    /// `\n` terminator. A trailing `\r` is retained; callers treat a line
    /// equal to `"\r"` as blank and trim it off header values.
    pub fn next_line(&mut self) -> Option<&'a str> {
        if self.is_end() {
            return None;
        }
        let rest = &self.source[self.index..];
        let (content, consumed) = match rest.find('\n') {
            Some(feed) => (&rest[..feed], feed + 1),
            None => (rest, rest.len()),
        };
        self.index += consumed;
        self.line += 1;
        Some(content)
    }

    /// The 1-based number of the most recently yielded line. Zero before
    /// the first [`Self::next_line`] call.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

#[test]
fn yields_lines_and_counts_them() {
    let mut cursor = Cursor::new("#TITLE:x;\n#ARTIST:y;\nlast");

    assert_eq!(cursor.line(), 0);
    assert_eq!(cursor.next_line(), Some("#TITLE:x;"));
    assert_eq!(cursor.line(), 1);
    assert_eq!(cursor.next_line(), Some("#ARTIST:y;"));
    assert_eq!(cursor.next_line(), Some("last"));
    assert_eq!(cursor.line(), 3);
    assert_eq!(cursor.next_line(), None);
    assert!(cursor.is_end());
}

#[test]
fn keeps_carriage_returns() {
    let mut cursor = Cursor::new("a\r\n\r\nb\r\n");

    assert_eq!(cursor.next_line(), Some("a\r"));
    assert_eq!(cursor.next_line(), Some("\r"));
    assert_eq!(cursor.next_line(), Some("b\r"));
    assert_eq!(cursor.next_line(), None);
}

#[test]
fn yields_empty_lines() {
    let mut cursor = Cursor::new("a\n\nb");

    assert_eq!(cursor.next_line(), Some("a"));
    assert_eq!(cursor.next_line(), Some(""));
    assert_eq!(cursor.next_line(), Some("b"));
    assert_eq!(cursor.next_line(), None);
}

#[test]
fn empty_input_is_end() {
    let mut cursor = Cursor::new("");

    assert!(cursor.is_end());
    assert_eq!(cursor.next_line(), None);
}
