// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Escaping summary:
//
// Named control escapes (used in every context):
//
// - \a       Bell (0x07)
// - \t       Horizontal tab (0x09)
// - \n       Newline (0x0A)
// - \v       Vertical tab (0x0B)
// - \f       Form feed (0x0C)
// - \r       Carriage return (0x0D)
// - \e       Escape (0x1B)
//
// Context-dependent metacharacters:
//
// - Outside a character set, `\ . $ ^ { [ ( ) * + ? |` must be escaped
//   when used literally, e.g. `\(`, `\*`, and `\.`.
// - Inside a character set, only `\ [ ] ^ -` need escaping. The other
//   metacharacters lose their special meaning between the brackets.
//
// Remaining code points:
//
// - Code points outside printable ASCII (below 0x20 or above 0x7E) with no
//   named escape are written as a 2-digit hexadecimal escape when they fit
//   in one byte, e.g. `\x1c`. Larger code points are written as-is.

use crate::error::FluentError;

/// How a code point must be written to stay literal in the emitted pattern.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum EscapeMode {
    /// The character is written as-is.
    None,
    /// The character is preceded by a backslash, e.g. `\.`.
    Backslash,
    /// The character is written as a 2-digit hexadecimal escape, e.g. `\x1c`.
    Hexadecimal,
    /// The character is written as a named control escape; the payload is
    /// the escape letter, e.g. `t` for `\t`.
    Control(char),
}

/// Decide how `code_point` must be escaped.
///
/// The table is total over the 16-bit code range; passing a larger code
/// point is a caller error.
pub fn classify(code_point: u32, inside_char_set: bool) -> Result<EscapeMode, FluentError> {
    if code_point > 0xFFFF {
        return Err(FluentError::InvalidArgument(format!(
            "Code point U+{:04X} is outside the 16-bit range covered by the escaping table.",
            code_point
        )));
    }

    if let Some(letter) = control_escape_letter(code_point) {
        return Ok(EscapeMode::Control(letter));
    }

    if !(0x20..=0x7E).contains(&code_point) {
        let mode = if code_point <= 0xFF {
            EscapeMode::Hexadecimal
        } else {
            EscapeMode::None
        };
        return Ok(mode);
    }

    let character = code_point as u8 as char;
    let special = if inside_char_set {
        matches!(character, '\\' | '[' | ']' | '^' | '-')
    } else {
        matches!(
            character,
            '\\' | '.' | '$' | '^' | '{' | '[' | '(' | ')' | '*' | '+' | '?' | '|'
        )
    };

    if special {
        Ok(EscapeMode::Backslash)
    } else {
        Ok(EscapeMode::None)
    }
}

fn control_escape_letter(code_point: u32) -> Option<char> {
    match code_point {
        0x07 => Some('a'),
        0x09 => Some('t'),
        0x0A => Some('n'),
        0x0B => Some('v'),
        0x0C => Some('f'),
        0x0D => Some('r'),
        0x1B => Some('e'),
        _ => None,
    }
}

/// Append `character` to `buffer` in its escaped form.
///
/// Characters beyond the 16-bit range have no special meaning in any
/// context and are written as-is without consulting the table.
pub(crate) fn escape_char_into(
    buffer: &mut String,
    character: char,
    inside_char_set: bool,
) -> Result<(), FluentError> {
    let code_point = character as u32;
    if code_point > 0xFFFF {
        buffer.push(character);
        return Ok(());
    }

    match classify(code_point, inside_char_set)? {
        EscapeMode::None => buffer.push(character),
        EscapeMode::Backslash => {
            buffer.push('\\');
            buffer.push(character);
        }
        EscapeMode::Hexadecimal => {
            buffer.push_str(&format!("\\x{:02x}", code_point));
        }
        EscapeMode::Control(letter) => {
            buffer.push('\\');
            buffer.push(letter);
        }
    }

    Ok(())
}

/// Append every character of `text` to `buffer` in its escaped form.
pub(crate) fn escape_str_into(
    buffer: &mut String,
    text: &str,
    inside_char_set: bool,
) -> Result<(), FluentError> {
    for character in text.chars() {
        escape_char_into(buffer, character, inside_char_set)?;
    }
    Ok(())
}
