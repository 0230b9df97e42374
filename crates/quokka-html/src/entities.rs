//! Entity decoding and text normalization.
//!
//! Translates the predefined references (`&amp;` `&lt;` `&gt;` `&quot;`
//! `&apos;`) and numeric character references (`&#NN;`, `&#xNN;`) into
//! literal characters. Malformed or unrecognized references are copied
//! through untouched. Characters produced by a reference bypass the
//! end-of-line and attribute whitespace normalizations — `&#13;` stays a
//! carriage return.

use crate::options::ParseOptions;

/// Whitespace handling applied to literal characters.
#[derive(Clone, Copy, PartialEq, Eq)]
enum WhitespaceMode {
    /// Leave whitespace alone (text content).
    Keep,
    /// Convert tab/CR/LF to spaces (CDATA attribute normalization).
    Convert,
    /// Trim and collapse whitespace runs (NMTOKEN normalization).
    Collapse,
}

/// Decode a raw text run per the options.
pub(crate) fn decode_pcdata(raw: &str, options: &ParseOptions) -> String {
    decode(raw, options, WhitespaceMode::Keep)
}

/// Decode a raw attribute value per the options.
pub(crate) fn decode_attribute(raw: &str, options: &ParseOptions) -> String {
    let mode = if options.parse_wnorm_attribute {
        WhitespaceMode::Collapse
    } else if options.parse_wconv_attribute {
        WhitespaceMode::Convert
    } else {
        WhitespaceMode::Keep
    };
    decode(raw, options, mode)
}

fn decode(raw: &str, options: &ParseOptions, mode: WhitespaceMode) -> String {
    let mut out = String::with_capacity(raw.len());
    let bytes = raw.as_bytes();
    let mut pos = 0;
    // Collapse mode: a pending space is flushed before the next
    // non-whitespace character, which trims both ends for free.
    let mut pending_space = false;

    while pos < bytes.len() {
        if bytes[pos] == b'&'
            && options.parse_escapes
            && let Some((decoded, consumed)) = decode_reference(&raw[pos..])
        {
            flush_pending(&mut out, &mut pending_space);
            out.push(decoded);
            pos += consumed;
            continue;
        }

        let rest = &raw[pos..];
        let c = rest.chars().next().unwrap_or('\u{FFFD}');
        pos += c.len_utf8();

        // End-of-line normalization first, then whitespace handling.
        let c = if options.parse_eol && c == '\r' {
            if bytes.get(pos) == Some(&b'\n') {
                pos += 1;
            }
            '\n'
        } else {
            c
        };

        match mode {
            WhitespaceMode::Keep => out.push(c),
            WhitespaceMode::Convert => {
                if matches!(c, '\t' | '\r' | '\n') {
                    out.push(' ');
                } else {
                    out.push(c);
                }
            }
            WhitespaceMode::Collapse => {
                if c.is_ascii_whitespace() {
                    if !out.is_empty() {
                        pending_space = true;
                    }
                } else {
                    flush_pending(&mut out, &mut pending_space);
                    out.push(c);
                }
            }
        }
    }
    out
}

fn flush_pending(out: &mut String, pending_space: &mut bool) {
    if *pending_space {
        out.push(' ');
        *pending_space = false;
    }
}

/// Try to decode one reference at the start of `input` (which begins with
/// `&`). Returns the decoded character and the number of bytes consumed,
/// or `None` if the reference is malformed or unrecognized.
fn decode_reference(input: &str) -> Option<(char, usize)> {
    let semicolon = input.find(';')?;
    let body = &input[1..semicolon];
    let consumed = semicolon + 1;

    let decoded = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((decoded, consumed))
}
