//! Formattable sequence-name value type

use std::fmt;

use regex::Regex;

use crate::convention::Convention;
use crate::parser::{FramecodeParser, WidthPolicy};
use crate::Result;

/// A formattable name standing for every file in a frame sequence
///
/// Constructed from any filename containing a framecode; the canonical
/// textual form is the format-spec translation of the input, so
/// `frame0012.png`, `frame####.png` and `frame%04d.png` all canonicalize to
/// `frame{:04d}.png`. Two seqnames are equal when their canonical forms are
/// equal. The derived views re-translate from the held parser on each call;
/// there is no shared mutable state.
#[derive(Debug, Clone)]
pub struct Seqname {
    parser: FramecodeParser,
    canonical: String,
}

impl Seqname {
    /// Parse a filename into a seqname.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FrameparseError::NoFramecodeFound`] when the input
    /// carries no framecode.
    pub fn new(input: &str) -> Result<Self> {
        let parser = FramecodeParser::new(input)?;
        let canonical = parser.translate(Convention::FormatSpec)?;
        Ok(Self { parser, canonical })
    }

    /// Canonical form in format-spec notation, e.g. `frame{:04d}.png`
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The name in format-spec notation (the canonical form)
    pub fn format_spec(&self) -> &str {
        &self.canonical
    }

    /// The name in modulo notation, e.g. `frame%04d.png`
    pub fn modulo(&self) -> String {
        self.view(Convention::Modulo)
    }

    /// The name in hash-mark notation, e.g. `frame####.png`
    pub fn hashmarks(&self) -> String {
        self.view(Convention::HashMarks)
    }

    /// Regex matching files of this sequence with any frame-number width
    pub fn regex(&self) -> String {
        self.parser.create_regex(WidthPolicy::Any)
    }

    /// Fill width of the framecode
    pub fn width(&self) -> usize {
        self.parser.width()
    }

    /// Substitute a frame number, zero-padded to the canonical width.
    ///
    /// The sign occupies one character of the fill width, so with width 4
    /// the frame -7 formats as `-007`.
    pub fn format(&self, frame: i64) -> String {
        let width = self.parser.width();
        self.parser.replace(&format!("{frame:0width$}"))
    }

    /// Test whether a candidate filename belongs to this sequence.
    ///
    /// With `strict` the synthesized regex must cover the whole candidate;
    /// otherwise a match anywhere in the string suffices. A candidate that
    /// fails the regex is still accepted when it canonicalizes to the same
    /// seqname, which is how raw-digit names with a different padding are
    /// matched.
    pub fn matches(&self, candidate: &str, strict: bool) -> bool {
        let pattern = if strict {
            format!("^(?:{})$", self.regex())
        } else {
            self.regex()
        };
        let by_regex = Regex::new(&pattern)
            .map(|re| re.is_match(candidate))
            .unwrap_or(false);
        if by_regex {
            return true;
        }
        Seqname::new(candidate)
            .map(|other| other == *self)
            .unwrap_or(false)
    }

    fn view(&self, to: Convention) -> String {
        // Both exposed target conventions carry generators, so translation
        // cannot fail here.
        self.parser
            .translate(to)
            .unwrap_or_else(|_| self.canonical.clone())
    }
}

impl fmt::Display for Seqname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl AsRef<str> for Seqname {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for Seqname {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Seqname {}

impl PartialEq<str> for Seqname {
    fn eq(&self, other: &str) -> bool {
        self.canonical == other
    }
}

impl PartialEq<&str> for Seqname {
    fn eq(&self, other: &&str) -> bool {
        self.canonical == *other
    }
}
