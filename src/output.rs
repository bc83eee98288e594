//! Multi-radix rendering of evaluation results.
//!
//! A successful evaluation is shown in every radix a systems user tends
//! to reach for: unsigned and narrowest-fitting signed decimal, an ASCII
//! or Unicode view, minimal and fixed-width hex, and optionally the full
//! 64-bit binary pattern. Views that cannot represent the value render as
//! `Exceeded` instead of silently truncating.

use std::fmt::Write;

/// Presentation toggles, set once from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    /// Render hex digits in uppercase.
    pub uppercase_hex: bool,
    /// Show UTF-8/16/32 views instead of the plain ASCII line.
    pub unicode: bool,
    /// Append the 64-bit binary pattern.
    pub binary: bool,
}

/// Render a result into the block of lines printed after each
/// evaluation.
pub fn render(value: u64, options: &DisplayOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "   u64: {}", value);

    if value <= 0xff {
        let _ = writeln!(out, "    i8: {}", value as u8 as i8);
    } else if value <= 0xffff {
        let _ = writeln!(out, "   i16: {}", value as u16 as i16);
    } else if value <= 0xffff_ffff {
        let _ = writeln!(out, "   i32: {}", value as u32 as i32);
    } else {
        let _ = writeln!(out, "   i64: {}", value as i64);
    }

    if options.unicode {
        render_unicode(&mut out, value, options.uppercase_hex);
    } else {
        render_char(&mut out, value);
    }

    let _ = writeln!(out, "   Hex: 0x{}", hex(value, 0, options.uppercase_hex));
    if value <= u64::from(u16::MAX) {
        let _ = writeln!(out, " Hex16: 0x{}", hex(value, 4, options.uppercase_hex));
    } else {
        let _ = writeln!(out, " Hex16: Exceeded");
    }
    if value <= u64::from(u32::MAX) {
        let _ = writeln!(out, " Hex32: 0x{}", hex(value, 8, options.uppercase_hex));
    } else {
        let _ = writeln!(out, " Hex32: Exceeded");
    }
    let _ = writeln!(out, " Hex64: 0x{}", hex(value, 16, options.uppercase_hex));

    if options.binary {
        render_binary(&mut out, value);
    }

    out
}

fn render_char(out: &mut String, value: u64) {
    if value <= 31 {
        let _ = writeln!(out, "  char: <special>");
    } else if value <= 127 {
        let _ = writeln!(out, "  char: {}", value as u8 as char);
    } else {
        let _ = writeln!(out, "  char: Exceeded");
    }
}

fn render_unicode(out: &mut String, value: u64, uppercase: bool) {
    const LABELS: [&str; 3] = [" UTF-8", "UTF-16", "UTF-32"];

    if value > u64::from(u32::MAX) {
        for label in LABELS {
            let _ = writeln!(out, "{}: Exceeded", label);
        }
        return;
    }

    let encodings = [
        utf8_bytes as fn(char) -> Vec<u8>,
        utf16_bytes,
        utf32_bytes,
    ];
    let code_point = char::from_u32(value as u32);
    for (label, encoding) in LABELS.iter().zip(encodings) {
        let _ = write!(out, "{}: ", label);
        match code_point {
            Some(ch) => {
                if value <= 31 {
                    let _ = write!(out, "<special> ");
                } else {
                    let _ = write!(out, "{} ", ch);
                }
                let _ = write!(out, "(0x");
                for byte in encoding(ch) {
                    let _ = write!(out, "{}", hex(u64::from(byte), 2, uppercase));
                }
                let _ = writeln!(out, ")");
            }
            None => {
                let _ = writeln!(out, "<invalid>");
            }
        }
    }
}

fn utf8_bytes(ch: char) -> Vec<u8> {
    let mut buffer = [0u8; 4];
    ch.encode_utf8(&mut buffer).as_bytes().to_vec()
}

fn utf16_bytes(ch: char) -> Vec<u8> {
    let mut buffer = [0u16; 2];
    ch.encode_utf16(&mut buffer)
        .iter()
        .flat_map(|unit| unit.to_be_bytes())
        .collect()
}

fn utf32_bytes(ch: char) -> Vec<u8> {
    (ch as u32).to_be_bytes().to_vec()
}

/// 64 bits, most significant first, in space-separated groups of 8 with
/// 32 bits per line.
fn render_binary(out: &mut String, value: u64) {
    for half in [(value >> 32) as u32, value as u32] {
        for byte_index in (0..4).rev() {
            let byte = (half >> (byte_index * 8)) & 0xff;
            let _ = write!(out, " {:08b}", byte);
        }
        out.push('\n');
    }
}

fn hex(value: u64, width: usize, uppercase: bool) -> String {
    if uppercase {
        format!("{:0width$X}", value)
    } else {
        format!("{:0width$x}", value)
    }
}
