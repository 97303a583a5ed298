//! The closed table of recognized framecode conventions
//!
//! A framecode is the portion of a filename that either carries a literal
//! frame number (`frame0012.png`) or stands in for one (`frame{:04d}.png`,
//! `frame%04d.png`, `frame####.png`). The convention set is closed, so the
//! registry is an enum-indexed table tested in a fixed priority order rather
//! than anything dynamic.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use crate::error::FrameparseError;

/// Python-style format specifier with zero fill, e.g. `{:04d}`
static FORMAT_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{:0(\d+)d*\}").unwrap());

/// C-style modulo specifier with zero fill, e.g. `%04d`
static MODULO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%0(\d+)d").unwrap());

/// A contiguous run of hash marks; detection keeps the last run
static HASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#+").unwrap());

/// A contiguous run of digits with optional sign; detection keeps the last run
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").unwrap());

/// A recognized framecode notation
///
/// Listed in detection priority order: when several conventions could match
/// a stem, the first one here wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Convention {
    /// Python-style format specifier: `{:04d}`
    #[serde(rename = "format_spec")]
    FormatSpec,

    /// C-style modulo specifier: `%04d`
    #[serde(rename = "modulo")]
    Modulo,

    /// Hash-mark placeholder: `####`; the last contiguous run in the stem
    #[serde(rename = "hashmarks")]
    HashMarks,

    /// A literal frame number: `0012`; the last contiguous run of digits
    #[serde(rename = "digits")]
    RawDigits,
}

impl Convention {
    /// All conventions in detection priority order
    pub const ALL: [Convention; 4] = [
        Convention::FormatSpec,
        Convention::Modulo,
        Convention::HashMarks,
        Convention::RawDigits,
    ];

    /// Canonical name of this convention
    pub const fn name(self) -> &'static str {
        match self {
            Convention::FormatSpec => "format_spec",
            Convention::Modulo => "modulo",
            Convention::HashMarks => "hashmarks",
            Convention::RawDigits => "digits",
        }
    }

    /// Whether a placeholder of this convention can be synthesized
    ///
    /// `RawDigits` has no generator: there is no single string of digits
    /// that stands for "any frame number".
    pub const fn can_generate(self) -> bool {
        !matches!(self, Convention::RawDigits)
    }

    fn regex(self) -> &'static Regex {
        match self {
            Convention::FormatSpec => &FORMAT_SPEC_RE,
            Convention::Modulo => &MODULO_RE,
            Convention::HashMarks => &HASH_RE,
            Convention::RawDigits => &DIGITS_RE,
        }
    }

    /// Find this convention's framecode in a stem.
    ///
    /// Returns the byte span of the match and the fill width it represents.
    /// FormatSpec and Modulo take the first occurrence and read the width
    /// out of the captured digit count; HashMarks and RawDigits take the
    /// last contiguous run and use its character length (sign included).
    pub(crate) fn locate(self, stem: &str) -> Option<(Range<usize>, usize)> {
        match self {
            Convention::FormatSpec | Convention::Modulo => {
                let caps = self.regex().captures(stem)?;
                let width = caps.get(1)?.as_str().parse().ok()?;
                Some((caps.get(0)?.range(), width))
            }
            Convention::HashMarks | Convention::RawDigits => {
                let m = self.regex().find_iter(stem).last()?;
                Some((m.range(), m.len()))
            }
        }
    }

    /// Substitute this convention's framecode in a stem with a literal string.
    ///
    /// Mirrors `locate`: the specifier conventions replace their first
    /// occurrence, the run conventions their last contiguous run.
    pub(crate) fn replace_in(self, stem: &str, repl: &str) -> String {
        match self {
            Convention::FormatSpec | Convention::Modulo => {
                self.regex().replace(stem, NoExpand(repl)).into_owned()
            }
            Convention::HashMarks | Convention::RawDigits => match self.locate(stem) {
                Some((span, _)) => {
                    let mut out = String::with_capacity(stem.len() + repl.len());
                    out.push_str(&stem[..span.start]);
                    out.push_str(repl);
                    out.push_str(&stem[span.end..]);
                    out
                }
                None => stem.to_string(),
            },
        }
    }

    /// Produce a placeholder of the given fill width, if this convention
    /// supports generation.
    pub(crate) fn placeholder(self, width: usize) -> Option<String> {
        match self {
            Convention::FormatSpec => Some(format!("{{:0{width}d}}")),
            Convention::Modulo => Some(format!("%0{width}d")),
            Convention::HashMarks => Some("#".repeat(width)),
            Convention::RawDigits => None,
        }
    }
}

/// Apply every convention in priority order and return the first hit on the
/// stem, together with its byte span and fill width.
pub(crate) fn detect(stem: &str) -> Option<(Convention, Range<usize>, usize)> {
    Convention::ALL.iter().find_map(|&conv| {
        conv.locate(stem)
            .map(|(span, width)| (conv, span, width))
    })
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Convention {
    type Err = FrameparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "format_spec" => Ok(Convention::FormatSpec),
            "modulo" => Ok(Convention::Modulo),
            "hashmarks" => Ok(Convention::HashMarks),
            "digits" => Ok(Convention::RawDigits),
            other => Err(FrameparseError::UnsupportedConvention(other.to_string())),
        }
    }
}
