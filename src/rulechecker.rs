// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Chain analysis and argument validation shared by the renderer.
//
// Everything here is a pure function over the node model; nothing writes
// output. The renderer calls these before emitting a construct so that a
// failed validation never leaves partial text in the buffer.

use crate::charset::{CharSet, CharSetElement};
use crate::error::FluentError;
use crate::expression::{Content, ExpressionKind};

/// Whether the rendered form of `content` is a single quantifiable atom.
///
/// Content that is not atomic must be wrapped in a non-capturing group
/// before a quantifier is appended, e.g. `ab` quantified one-or-more
/// renders as `(?:ab)+` while `a` renders as `a+`.
pub(crate) fn is_atomic(content: &Content) -> bool {
    match content {
        Content::Text(text) => text.chars().count() == 1,
        Content::Chain(expression) => match expression.head.as_deref() {
            Some(node) => node.previous.is_none() && kind_is_atomic(&node.kind),
            None => false,
        },
        Content::AnyOf(contents) => contents.len() == 1 && is_atomic(&contents[0]),
        Content::Sequence(contents) => contents.len() == 1 && is_atomic(&contents[0]),
    }
}

fn kind_is_atomic(kind: &ExpressionKind) -> bool {
    match kind {
        ExpressionKind::Text(text) => text.chars().count() == 1,
        ExpressionKind::Char(_)
        | ExpressionKind::CharCode(_)
        | ExpressionKind::CharAny
        | ExpressionKind::PresetCharSet(_)
        | ExpressionKind::UnicodeCategory { .. }
        | ExpressionKind::CharSet(_)
        | ExpressionKind::AnchorAssertion(_)
        | ExpressionKind::BoundaryAssertion(_) => true,
        // every group form renders as one parenthesized token
        ExpressionKind::Group { .. } | ExpressionKind::Conditional { .. } => true,
        ExpressionKind::Verbatim(text) => verbatim_is_atomic(text),
        // a quantified atom must not receive a second bare quantifier
        // (`a*+` would change its meaning), a backreference may be
        // followed by a disambiguation group, and the remaining kinds are
        // zero-width or multi-token
        ExpressionKind::Quantifier { .. }
        | ExpressionKind::AnyOf(_)
        | ExpressionKind::BackReference(_)
        | ExpressionKind::Options { .. }
        | ExpressionKind::Comment(_) => false,
    }
}

fn verbatim_is_atomic(text: &str) -> bool {
    let count = text.chars().count();
    count == 1 || (count == 2 && text.starts_with('\\'))
}

/// Whether `content` contributes no text at all.
pub(crate) fn content_is_empty(content: &Content) -> bool {
    match content {
        Content::Text(text) => text.is_empty(),
        Content::Chain(expression) => expression.is_empty(),
        Content::AnyOf(contents) => contents.is_empty(),
        Content::Sequence(contents) => contents.iter().all(content_is_empty),
    }
}

/// Validate a group name identifier: a word character sequence that does
/// not start with a digit.
pub(crate) fn validate_group_name(name: &str) -> Result<(), FluentError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(FluentError::InvalidArgument(format!(
            "\"{}\" is not a valid group name.",
            name
        )))
    }
}

/// Validate a Unicode category or named block identifier, e.g. `Lu` or
/// `IsBasicLatin`.
pub(crate) fn validate_category_name(name: &str) -> Result<(), FluentError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(FluentError::InvalidArgument(format!(
            "\"{}\" is not a valid Unicode category or block name.",
            name
        )))
    }
}

/// Convert a code point to a character, rejecting surrogates and values
/// beyond the Unicode range.
pub(crate) fn char_from_code(code_point: u32) -> Result<char, FluentError> {
    char::from_u32(code_point).ok_or_else(|| {
        FluentError::InvalidArgument(format!(
            "U+{:04X} is not a valid Unicode scalar value.",
            code_point
        ))
    })
}

/// Validate a whole character set body: it must be non-empty and every
/// element must be well-formed. Nested subtracted sets are validated
/// recursively.
pub(crate) fn validate_char_set(set: &CharSet) -> Result<(), FluentError> {
    let mut cursor = set.head.as_deref();
    if cursor.is_none() {
        return Err(FluentError::InvalidArgument(
            "A character set requires at least one element.".to_owned(),
        ));
    }

    while let Some(node) = cursor {
        validate_char_set_element(&node.element)?;
        cursor = node.previous.as_deref();
    }

    Ok(())
}

fn validate_char_set_element(element: &CharSetElement) -> Result<(), FluentError> {
    match element {
        CharSetElement::Char(_) | CharSetElement::PresetCharSet(_) => Ok(()),
        CharSetElement::CharCode(code_point) => {
            char_from_code(*code_point)?;
            Ok(())
        }
        CharSetElement::CharRange(range) => {
            if range.start > range.end_included {
                return Err(FluentError::InvalidRange(
                    range.start as u32,
                    range.end_included as u32,
                ));
            }
            Ok(())
        }
        CharSetElement::CodePointRange(start, end_included) => {
            char_from_code(*start)?;
            char_from_code(*end_included)?;
            if start > end_included {
                return Err(FluentError::InvalidRange(*start, *end_included));
            }
            Ok(())
        }
        CharSetElement::UnicodeCategory { name, .. } => validate_category_name(name),
        CharSetElement::Subtraction(excluded) => validate_char_set(excluded),
    }
}

#[cfg(test)]
mod tests {
    use crate::charset::CharSet;
    use crate::expression::{Content, Expression};
    use crate::options::FlagSet;

    use super::{is_atomic, validate_group_name};

    #[test]
    fn test_is_atomic_text() {
        assert!(is_atomic(&Content::from("a")));
        assert!(is_atomic(&Content::from(".")));
        assert!(!is_atomic(&Content::from("ab")));
        assert!(!is_atomic(&Content::from("")));
    }

    #[test]
    fn test_is_atomic_chain() {
        // single-token nodes
        assert!(is_atomic(&Content::from(Expression::new().char('x'))));
        assert!(is_atomic(&Content::from(Expression::new().char_any())));
        assert!(is_atomic(&Content::from(CharSet::new().range('a', 'z'))));
        assert!(is_atomic(&Content::from(Expression::new().capture("ab"))));

        // multi-node chains and multi-token nodes
        assert!(!is_atomic(&Content::from(
            Expression::new().char('a').char('b')
        )));
        assert!(!is_atomic(&Content::from(Expression::new().one_or_more("a"))));
        assert!(!is_atomic(&Content::from(Expression::new().backreference(1))));
        assert!(!is_atomic(&Content::from(
            Expression::new().set_options(FlagSet::IGNORE_CASE, FlagSet::empty())
        )));
    }

    #[test]
    fn test_validate_group_name() {
        assert!(validate_group_name("g").is_ok());
        assert!(validate_group_name("word_1").is_ok());
        assert!(validate_group_name("_tmp").is_ok());

        assert!(validate_group_name("").is_err());
        assert!(validate_group_name("1st").is_err());
        assert!(validate_group_name("a-b").is_err());
        assert!(validate_group_name("a b").is_err());
    }
}
