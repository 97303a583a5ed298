//! Compact textual codec for integer sets
//!
//! Converts between sequences of integers and range strings such as
//! `"1-5, 10-16x2, 20, 21"`. `A-B` is an inclusive range, `A-BxC` an
//! inclusive range with step `C`, and `AxC` the value `A` repeated `C`
//! times.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FrameparseError;
use crate::Result;

/// One unit of range syntax: `A`, `AxC`, `A-B` or `A-BxC`
static UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d+)(?:-(-?\d+))?(?:x(-?\d+))?").unwrap());

/// Parse a range string into the integers it denotes.
///
/// Units may be separated by commas or spaces; fragments that do not parse
/// are skipped over rather than reported. Whitespace is only meaningful
/// when it sits directly between two numbers, so `"1 - 5"` reads as the
/// range `1-5` while `"1 5"` reads as two separate integers.
///
/// The returned iterator is finite and single-use; call `parse_numbers`
/// again for another pass.
///
/// # Examples
///
/// ```
/// use frameparse_core::parse_numbers;
///
/// let frames: Vec<i64> = parse_numbers("1-5, 10-16x2, 20, 21").collect();
/// assert_eq!(frames, [1, 2, 3, 4, 5, 10, 12, 14, 16, 20, 21]);
/// ```
pub fn parse_numbers(text: &str) -> ParsedNumbers {
    ParsedNumbers {
        text: strip_separators(text),
        pos: 0,
        run: None,
    }
}

/// Drop whitespace that is not directly between two digits.
///
/// Two passes: first remove whitespace not immediately followed by a digit,
/// then whitespace not immediately preceded by one.
fn strip_separators(text: &str) -> String {
    let mut forward = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() && !matches!(chars.peek(), Some(n) if n.is_ascii_digit()) {
            continue;
        }
        forward.push(c);
    }

    let mut out = String::with_capacity(forward.len());
    for c in forward.chars() {
        if c.is_whitespace() && !out.chars().next_back().is_some_and(|p| p.is_ascii_digit()) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Iterator over the integers denoted by a range string
///
/// Produced by [`parse_numbers`].
#[derive(Debug, Clone)]
pub struct ParsedNumbers {
    text: String,
    pos: usize,
    run: Option<Run>,
}

#[derive(Debug, Clone)]
enum Run {
    Repeat { value: i64, remaining: i64 },
    Range { next: Option<i64>, bound: i64, step: i64 },
}

impl Iterator for ParsedNumbers {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            // Drain the active run before scanning further
            if let Some(run) = &mut self.run {
                match run {
                    Run::Repeat { value, remaining } => {
                        if *remaining > 0 {
                            *remaining -= 1;
                            return Some(*value);
                        }
                    }
                    Run::Range { next, bound, step } => {
                        if let Some(value) = *next {
                            let more = if *step > 0 { value < *bound } else { value > *bound };
                            if more {
                                // An overflowing successor ends the run
                                *next = value.checked_add(*step);
                                return Some(value);
                            }
                        }
                    }
                }
                self.run = None;
            }

            let caps = UNIT_RE.captures(&self.text[self.pos..])?;
            let whole = caps.get(0)?;
            self.pos += whole.end();

            let a = match caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok()) {
                Some(a) => a,
                None => continue, // out-of-range literal, skip the fragment
            };
            let b = caps.get(2).and_then(|m| m.as_str().parse::<i64>().ok());
            let c = caps.get(3).and_then(|m| m.as_str().parse::<i64>().ok());

            match (b, c) {
                // A single integer
                (None, None) => return Some(a),

                // AxC: A repeated C times; a non-positive count denotes nothing
                (None, Some(count)) => {
                    if count > 0 {
                        self.run = Some(Run::Repeat {
                            value: a,
                            remaining: count - 1,
                        });
                        return Some(a);
                    }
                }

                // A-B or A-BxC: inclusive arithmetic range
                (Some(end), step_opt) => {
                    let step = step_opt.unwrap_or(1);
                    if step == 0 {
                        continue; // zero-step range is malformed, skip it
                    }
                    // Make the endpoint inclusive; skip the fragment when
                    // the adjustment would leave i64 range
                    let Some(bound) = (if step > 0 {
                        end.checked_add(1)
                    } else {
                        end.checked_sub(1)
                    }) else {
                        continue;
                    };
                    self.run = Some(Run::Range {
                        next: Some(a),
                        bound,
                        step,
                    });
                }
            }
        }
    }
}

/// Produce the compact string representation of a sequence of integers.
///
/// Consecutive arithmetic runs of three or more values compress to
/// `A-B`/`A-BxC`, repeated values to `AxC`, and everything else prints
/// literally, joined with `", "`. The input is taken as-is: duplicates and
/// decreasing order are legal, and only the literal differences between
/// consecutive values drive the encoding.
///
/// # Errors
///
/// Returns [`FrameparseError::EmptyInput`] when the iterator yields
/// nothing.
///
/// # Examples
///
/// ```
/// use frameparse_core::format_numbers;
///
/// let text = format_numbers([1, 2, 3, 4, 5, 10, 12, 14, 16, 20, 21]).unwrap();
/// assert_eq!(text, "1-5, 10-16x2, 20, 21");
/// ```
pub fn format_numbers<I>(numbers: I) -> Result<String>
where
    I: IntoIterator<Item = i64>,
{
    let mut numbers = numbers.into_iter();
    let mut output: Vec<String> = Vec::new();

    // Work on a three-number window: the candidate run's start and end,
    // plus the next value to test against it.
    let Some(mut seq_start) = numbers.next() else {
        return Err(FrameparseError::EmptyInput);
    };
    let Some(mut seq_end) = numbers.next() else {
        return Ok(seq_start.to_string());
    };
    let Some(mut next_number) = numbers.next() else {
        return Ok(if seq_start == seq_end {
            format!("{seq_start}x2")
        } else {
            format!("{seq_start}, {seq_end}")
        });
    };

    // Wrapping arithmetic keeps pathological inputs at the i64 extremes
    // from panicking; they simply fail the run test and print literally.
    let mut step = seq_end.wrapping_sub(seq_start);
    let mut seq_length: i64 = 2;

    loop {
        if next_number == seq_start.wrapping_add(step.wrapping_mul(seq_length)) {
            // The run extends
            seq_end = next_number;
            seq_length += 1;
            match numbers.next() {
                Some(n) => next_number = n,
                None => {
                    output.push(build_unit(seq_start, seq_end, step, seq_length));
                    break;
                }
            }
        } else {
            // The run breaks
            if seq_length >= 3 || step == 0 {
                output.push(build_unit(seq_start, seq_end, step, seq_length));

                // Shift two numbers forward
                seq_start = next_number;
                match numbers.next() {
                    Some(n) => {
                        seq_end = n;
                        step = seq_end.wrapping_sub(seq_start);
                    }
                    None => {
                        output.push(seq_start.to_string());
                        break;
                    }
                }
            } else {
                // Two loose values: emit the first, slide by one
                output.push(seq_start.to_string());
                seq_start = seq_end;
                seq_end = next_number;
                step = seq_end.wrapping_sub(seq_start);
            }

            match numbers.next() {
                Some(n) => next_number = n,
                None => {
                    // A trailing pair is left over
                    if step == 0 {
                        output.push(format!("{seq_start}x2"));
                    } else {
                        output.push(seq_start.to_string());
                        output.push(seq_end.to_string());
                    }
                    break;
                }
            }

            step = seq_end.wrapping_sub(seq_start);
            seq_length = 2;
        }
    }

    Ok(output.join(", "))
}

fn build_unit(start: i64, end: i64, step: i64, length: i64) -> String {
    if step == 0 {
        format!("{start}x{length}")
    } else if step == 1 {
        format!("{start}-{end}")
    } else {
        format!("{start}-{end}x{step}")
    }
}
