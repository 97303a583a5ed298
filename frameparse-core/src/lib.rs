//! # Frameparse Core
//!
//! Parsing, generation and matching of frame-sequence filenames, the
//! numbered-file naming convention used in media/VFX pipelines, plus a
//! compact textual codec for integer sets (e.g. `"1-5, 10-16x2, 20, 21"`).
//!
//! ## Modules
//!
//! - `convention`: The closed table of recognized framecode conventions
//! - `parser`: Framecode detection, replacement, translation and regex synthesis
//! - `seqname`: Formattable sequence-name value type
//! - `ranges`: Integer range compression/decompression
//! - `error`: Error types
//!
//! This crate performs no filesystem access: callers feed it candidate
//! filenames and consume the predicates and regex strings it produces.

#![warn(missing_docs)]

pub mod convention;
pub mod error;
pub mod parser;
pub mod ranges;
pub mod seqname;

// Re-export commonly used items
pub use convention::Convention;
pub use error::FrameparseError;
pub use parser::{
    create_regex_for, generate_framecode, get_frame_number, get_framecode,
    get_framecode_convention, get_framecode_width, has_framecode, replace_framecode,
    translate_framecode, FramecodeParser, WidthPolicy,
};
pub use ranges::{format_numbers, parse_numbers, ParsedNumbers};
pub use seqname::Seqname;

/// Result type alias for frameparse operations
pub type Result<T> = core::result::Result<T, FrameparseError>;
