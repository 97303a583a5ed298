//! Framecode detection, replacement, translation and regex synthesis
//!
//! [`FramecodeParser`] decomposes a filename around its framecode; the free
//! functions at the bottom of this module are one-shot conveniences that
//! construct a parser internally and degrade to documented fallbacks when no
//! framecode is present.

use std::ops::Range;
use std::path::{Path, MAIN_SEPARATOR_STR};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convention::{self, Convention};
use crate::error::FrameparseError;
use crate::Result;

/// Rule governing how strictly a synthesized regex constrains the matched
/// frame-number width relative to the reference width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthPolicy {
    /// Frame numbers of any width match
    #[default]
    Any,

    /// Frame numbers of the same width or wider match
    Min,

    /// Frame numbers of the same width or narrower match
    Max,

    /// Only frame numbers of exactly the same width match
    Exact,
}

impl FromStr for WidthPolicy {
    type Err = FrameparseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "any" => Ok(WidthPolicy::Any),
            "min" => Ok(WidthPolicy::Min),
            "max" => Ok(WidthPolicy::Max),
            "exact" => Ok(WidthPolicy::Exact),
            other => Err(FrameparseError::InvalidWidthPolicy(other.to_string())),
        }
    }
}

/// A filename decomposed around its framecode
///
/// Holds the directory, stem and extension of the input together with the
/// detected convention and the byte span of the framecode within the stem.
/// Instances are immutable; every operation derives a fresh string from the
/// recorded decomposition. Detection only ever looks at the basename, never
/// at directory components.
#[derive(Debug, Clone)]
pub struct FramecodeParser {
    directory: Option<String>,
    stem: String,
    suffix: String,
    convention: Convention,
    span: Range<usize>,
    width: usize,
}

impl FramecodeParser {
    /// Search `input` for a framecode and build a parser around it.
    ///
    /// The four conventions are tried in priority order (format spec,
    /// modulo, hash marks, raw digits) against the stem of the basename.
    ///
    /// # Errors
    ///
    /// Returns [`FrameparseError::NoFramecodeFound`] when no convention
    /// matches.
    pub fn new(input: &str) -> Result<Self> {
        let path = Path::new(input);
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let suffix = file_name[stem.len()..].to_string();

        let directory = match path.parent().and_then(|p| p.to_str()) {
            None | Some("") | Some(".") => None,
            Some(dir) => Some(dir.to_string()),
        };

        let (convention, span, width) = convention::detect(stem)
            .ok_or_else(|| FrameparseError::NoFramecodeFound(input.to_string()))?;

        debug!(input, %convention, width, "detected framecode");

        Ok(Self {
            directory,
            stem: stem.to_string(),
            suffix,
            convention,
            span,
            width,
        })
    }

    /// The raw matched framecode substring
    pub fn framecode(&self) -> &str {
        &self.stem[self.span.clone()]
    }

    /// The convention the framecode was written in
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// The fill width the framecode represents
    pub fn width(&self) -> usize {
        self.width
    }

    /// Replace the framecode with an arbitrary string and reassemble the
    /// full name, directory and extension included.
    ///
    /// The substitution follows the convention's own pattern semantics:
    /// first occurrence for the specifier conventions, last contiguous run
    /// for hash marks and digits.
    pub fn replace(&self, repl: &str) -> String {
        let new_stem = self.convention.replace_in(&self.stem, repl);
        self.reassemble(&new_stem)
    }

    /// Rewrite the name with its framecode translated to another convention,
    /// keeping the current fill width.
    ///
    /// # Errors
    ///
    /// Returns [`FrameparseError::UnsupportedGeneration`] when the target
    /// convention has no placeholder form (raw digits).
    pub fn translate(&self, to: Convention) -> Result<String> {
        let code = to
            .placeholder(self.width)
            .ok_or(FrameparseError::UnsupportedGeneration(to))?;
        Ok(self.replace(&code))
    }

    /// Synthesize a regex matching filenames of the same family: same
    /// directory, same stem affixes, same extension, with the numeric
    /// portion constrained by `policy`.
    pub fn create_regex(&self, policy: WidthPolicy) -> String {
        // A formatted negative number spends one character of its fill
        // width on the sign: with width 3, 4 prints as "004" but -4 as
        // "-04". The signed alternative therefore allows one digit fewer.
        let w = self.width;
        let v = self.width.saturating_sub(1);
        let number = match policy {
            WidthPolicy::Any => String::from(r"-?\d+"),
            WidthPolicy::Exact => format!(r"(?:\d{{{w}}}|-\d{{{v}}})"),
            WidthPolicy::Min => format!(r"(?:\d{{{w},}}|-\d{{{v},}})"),
            WidthPolicy::Max => format!(r"(?:\d{{1,{w}}}|-\d{{1,{v}}})"),
        };

        let prefix = regex::escape(&self.stem[..self.span.start]);
        let affix = regex::escape(&self.stem[self.span.end..]);
        let name = format!("{prefix}{number}{affix}{}", regex::escape(&self.suffix));

        match &self.directory {
            Some(dir) => format!(
                "{}{}{name}",
                regex::escape(dir),
                regex::escape(MAIN_SEPARATOR_STR)
            ),
            None => name,
        }
    }

    fn reassemble(&self, stem: &str) -> String {
        let name = format!("{stem}{}", self.suffix);
        match &self.directory {
            Some(dir) => format!("{dir}{MAIN_SEPARATOR_STR}{name}"),
            None => name,
        }
    }
}

/// Generate a format code or frame-number placeholder of the given width.
///
/// # Errors
///
/// Returns [`FrameparseError::InvalidWidth`] for a zero width and
/// [`FrameparseError::UnsupportedGeneration`] when the convention has no
/// placeholder form (raw digits).
pub fn generate_framecode(convention: Convention, width: usize) -> Result<String> {
    if width < 1 {
        return Err(FrameparseError::InvalidWidth(width));
    }
    convention
        .placeholder(width)
        .ok_or(FrameparseError::UnsupportedGeneration(convention))
}

/// Extract the framecode portion of a filename, or `None` when the name
/// carries no framecode.
pub fn get_framecode(input: &str) -> Option<String> {
    FramecodeParser::new(input)
        .ok()
        .map(|p| p.framecode().to_string())
}

/// Extract the literal frame number from a filename.
///
/// Only a raw-digits framecode carries a literal number; a format-spec,
/// modulo or hash-marks placeholder yields `None`.
pub fn get_frame_number(input: &str) -> Option<i64> {
    let parser = FramecodeParser::new(input).ok()?;
    if parser.convention() == Convention::RawDigits {
        parser.framecode().parse().ok()
    } else {
        None
    }
}

/// Whether the filename contains a recognized framecode
pub fn has_framecode(input: &str) -> bool {
    FramecodeParser::new(input).is_ok()
}

/// The convention of the framecode in a filename, or `None` when the name
/// carries no framecode.
pub fn get_framecode_convention(input: &str) -> Option<Convention> {
    FramecodeParser::new(input).ok().map(|p| p.convention())
}

/// The fill width of the framecode in a filename, or `None` when the name
/// carries no framecode.
pub fn get_framecode_width(input: &str) -> Option<usize> {
    FramecodeParser::new(input).ok().map(|p| p.width())
}

/// Replace the framecode in a filename with `repl`.
///
/// Returns the input unchanged when no framecode is found.
pub fn replace_framecode(input: &str, repl: &str) -> String {
    match FramecodeParser::new(input) {
        Ok(parser) => parser.replace(repl),
        Err(_) => input.to_string(),
    }
}

/// Translate the framecode in a filename to another convention.
///
/// Returns the input unchanged when no framecode is found.
///
/// # Errors
///
/// Returns [`FrameparseError::UnsupportedGeneration`] when the target
/// convention has no placeholder form (raw digits).
pub fn translate_framecode(input: &str, to: Convention) -> Result<String> {
    match FramecodeParser::new(input) {
        Ok(parser) => parser.translate(to),
        Err(_) => Ok(input.to_string()),
    }
}

/// Synthesize a regex matching filenames of the same family as `input`.
///
/// When no framecode is found, returns an escaped-literal pattern matching
/// `input` exactly.
pub fn create_regex_for(input: &str, policy: WidthPolicy) -> String {
    match FramecodeParser::new(input) {
        Ok(parser) => parser.create_regex(policy),
        Err(_) => regex::escape(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn fullmatch(pattern: &str, text: &str) -> bool {
        Regex::new(&format!("^(?:{pattern})$")).unwrap().is_match(text)
    }

    #[test]
    fn test_parse_raw_digits() {
        let parser = FramecodeParser::new("frame0001.png").unwrap();
        assert_eq!(parser.convention(), Convention::RawDigits);
        assert_eq!(parser.framecode(), "0001");
        assert_eq!(parser.width(), 4);
    }

    #[test]
    fn test_parse_placeholders() {
        for (name, conv, width) in [
            ("frame{:05d}.png", Convention::FormatSpec, 5),
            ("frame%03d.exr", Convention::Modulo, 3),
            ("frame####.tif", Convention::HashMarks, 4),
        ] {
            let parser = FramecodeParser::new(name).unwrap();
            assert_eq!(parser.convention(), conv);
            assert_eq!(parser.width(), width);
        }
    }

    #[test]
    fn test_parse_no_framecode() {
        assert!(matches!(
            FramecodeParser::new("notes.txt"),
            Err(FrameparseError::NoFramecodeFound(_))
        ));
    }

    #[test]
    fn test_detection_ignores_directory() {
        // Digits in directory components must not count as a framecode
        let parser = FramecodeParser::new("sq010/frame####.png").unwrap();
        assert_eq!(parser.convention(), Convention::HashMarks);
        assert!(!has_framecode("sq010/notes.txt"));
    }

    #[test]
    fn test_detection_ignores_extension() {
        // "frame.0001" parses the digits as an extension, not a stem
        assert!(!has_framecode("frame.0001"));
        assert!(has_framecode("frame.0001.exr"));
    }

    #[test]
    fn test_replace() {
        assert_eq!(replace_framecode("frame0001.png", "XXXX"), "frameXXXX.png");
        assert_eq!(
            replace_framecode("shots/sq01/frame0001.png", "XXXX"),
            "shots/sq01/frameXXXX.png"
        );
        // No framecode: input comes back unchanged
        assert_eq!(replace_framecode("notes.txt", "XXXX"), "notes.txt");
    }

    #[test]
    fn test_translate_between_conventions() {
        assert_eq!(
            translate_framecode("frame0001.png", Convention::FormatSpec).unwrap(),
            "frame{:04d}.png"
        );
        assert_eq!(
            translate_framecode("frame{:04d}.png", Convention::Modulo).unwrap(),
            "frame%04d.png"
        );
        assert_eq!(
            translate_framecode("frame%04d.png", Convention::HashMarks).unwrap(),
            "frame####.png"
        );
        assert_eq!(
            translate_framecode("frame####.png", Convention::FormatSpec).unwrap(),
            "frame{:04d}.png"
        );
    }

    #[test]
    fn test_translate_to_digits_fails() {
        assert_eq!(
            translate_framecode("file####.exr", Convention::RawDigits),
            Err(FrameparseError::UnsupportedGeneration(Convention::RawDigits))
        );
    }

    #[test]
    fn test_translate_without_framecode() {
        assert_eq!(
            translate_framecode("notes.txt", Convention::Modulo).unwrap(),
            "notes.txt"
        );
    }

    #[test]
    fn test_generate_framecode() {
        assert_eq!(
            generate_framecode(Convention::FormatSpec, 6).unwrap(),
            "{:06d}"
        );
        assert_eq!(generate_framecode(Convention::Modulo, 6).unwrap(), "%06d");
        assert_eq!(
            generate_framecode(Convention::HashMarks, 6).unwrap(),
            "######"
        );
        assert_eq!(
            generate_framecode(Convention::HashMarks, 0),
            Err(FrameparseError::InvalidWidth(0))
        );
        assert_eq!(
            generate_framecode(Convention::RawDigits, 4),
            Err(FrameparseError::UnsupportedGeneration(Convention::RawDigits))
        );
    }

    #[test]
    fn test_get_frame_number() {
        assert_eq!(get_frame_number("frame0100.png"), Some(100));
        assert_eq!(get_frame_number("frame-007.png"), Some(-7));
        // Placeholders have no literal frame number
        assert_eq!(get_frame_number("frame{:04d}.png"), None);
        assert_eq!(get_frame_number("frame%04d.png"), None);
        assert_eq!(get_frame_number("frame####.png"), None);
        assert_eq!(get_frame_number("notes.txt"), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(get_framecode("frame0001.png").unwrap(), "0001");
        assert_eq!(get_framecode("frame{:04d}.png").unwrap(), "{:04d}");
        assert_eq!(get_framecode("notes.txt"), None);
        assert_eq!(
            get_framecode_convention("frame%04d.png"),
            Some(Convention::Modulo)
        );
        assert_eq!(get_framecode_convention("notes.txt"), None);
        assert_eq!(get_framecode_width("frame##.png"), Some(2));
        assert_eq!(get_framecode_width("notes.txt"), None);
    }

    #[test]
    fn test_regex_any_policy() {
        let pattern = create_regex_for("frame0001.png", WidthPolicy::Any);
        assert!(fullmatch(&pattern, "frame0001.png"));
        assert!(fullmatch(&pattern, "frame1.png"));
        assert!(fullmatch(&pattern, "frame00001.png"));
        assert!(fullmatch(&pattern, "frame-042.png"));
        assert!(!fullmatch(&pattern, "frame.png"));
        assert!(!fullmatch(&pattern, "frameFOOBAR.png"));
    }

    #[test]
    fn test_regex_exact_policy() {
        let pattern = create_regex_for("frame0001.png", WidthPolicy::Exact);
        assert!(fullmatch(&pattern, "frame0001.png"));
        assert!(fullmatch(&pattern, "frame9999.png"));
        // The sign takes one character of the fill width
        assert!(fullmatch(&pattern, "frame-001.png"));
        assert!(!fullmatch(&pattern, "frame001.png"));
        assert!(!fullmatch(&pattern, "frame00001.png"));
        assert!(!fullmatch(&pattern, "frame-0001.png"));
    }

    #[test]
    fn test_regex_min_policy() {
        let pattern = create_regex_for("frame0001.png", WidthPolicy::Min);
        assert!(fullmatch(&pattern, "frame0001.png"));
        assert!(fullmatch(&pattern, "frame00001.png"));
        assert!(!fullmatch(&pattern, "frame001.png"));
    }

    #[test]
    fn test_regex_max_policy() {
        let pattern = create_regex_for("frame0001.png", WidthPolicy::Max);
        assert!(fullmatch(&pattern, "frame0001.png"));
        assert!(fullmatch(&pattern, "frame001.png"));
        assert!(!fullmatch(&pattern, "frame00001.png"));
    }

    #[test]
    fn test_regex_includes_directory() {
        let pattern = create_regex_for("shots/sq01/frame####.png", WidthPolicy::Any);
        assert!(fullmatch(&pattern, "shots/sq01/frame0001.png"));
        assert!(!fullmatch(&pattern, "other/sq01/frame0001.png"));
        assert!(!fullmatch(&pattern, "frame0001.png"));
    }

    #[test]
    fn test_regex_rejects_other_extension() {
        let pattern = create_regex_for("frame####.png", WidthPolicy::Any);
        assert!(!fullmatch(&pattern, "frame0001.exr"));
    }

    #[test]
    fn test_regex_without_framecode_is_literal() {
        let pattern = create_regex_for("render (final).txt", WidthPolicy::Any);
        assert!(fullmatch(&pattern, "render (final).txt"));
        assert!(!fullmatch(&pattern, "render (final)Xtxt"));
    }

    #[test]
    fn test_regex_escapes_affixes() {
        // Metacharacters around the framecode must be matched literally
        let pattern = create_regex_for("shot.v2+final.0001.exr", WidthPolicy::Any);
        assert!(fullmatch(&pattern, "shot.v2+final.0001.exr"));
        assert!(!fullmatch(&pattern, "shotXv2+finalX0001Xexr"));
    }

    #[test]
    fn test_width_policy_from_str() {
        assert_eq!("any".parse::<WidthPolicy>().unwrap(), WidthPolicy::Any);
        assert_eq!("exact".parse::<WidthPolicy>().unwrap(), WidthPolicy::Exact);
        assert!(matches!(
            "strict".parse::<WidthPolicy>(),
            Err(FrameparseError::InvalidWidthPolicy(_))
        ));
    }
}
