// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Character set syntax:
//
// - [ ]            Character set
// - [^ ]           Negated character set
// - [a-z]          Character range (both endpoints included)
// - \w \d \s ...   Preset character sets
// - \p{Name}       Unicode category or named block
// - \P{Name}       Negated Unicode category or named block
// - [a-z-[aeiou]]  Character set subtraction

use crate::error::FluentError;
use crate::settings::Settings;

/// A character range; both endpoints are included.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CharRange {
    pub start: char,
    pub end_included: char,
}

/// Preset character sets with a fixed single-token spelling.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PresetCharSetName {
    CharWord,
    CharNotWord,
    CharDigit,
    CharNotDigit,
    CharSpace,
    CharNotSpace,
}

impl PresetCharSetName {
    pub(crate) fn pattern_text(&self) -> &'static str {
        match self {
            PresetCharSetName::CharWord => "\\w",
            PresetCharSetName::CharNotWord => "\\W",
            PresetCharSetName::CharDigit => "\\d",
            PresetCharSetName::CharNotDigit => "\\D",
            PresetCharSetName::CharSpace => "\\s",
            PresetCharSetName::CharNotSpace => "\\S",
        }
    }
}

/// One element of a character set body.
#[derive(Debug)]
pub(crate) enum CharSetElement {
    Char(char),
    CharCode(u32),
    CharRange(CharRange),
    CodePointRange(u32, u32),
    PresetCharSet(PresetCharSetName),
    UnicodeCategory { name: String, negative: bool },
    /// A nested set subtracted from the enclosing one, e.g. `[a-z-[aeiou]]`.
    Subtraction(CharSet),
}

#[derive(Debug)]
pub(crate) struct CharSetNode {
    pub(crate) element: CharSetElement,
    /// The node appended immediately before this one; set exactly once
    /// when the node is created.
    pub(crate) previous: Option<Box<CharSetNode>>,
}

/// An append-only chain of character set elements, rendered inside a
/// single `[...]` or `[^...]` wrapper in construction order.
///
/// Every combinator consumes the set and returns a new head node linked
/// to the old one, so a set is never mutated after construction.
///
/// ```
/// use regex_fluent::CharSet;
///
/// let set = CharSet::new().char('a').range('0', '9').negate();
/// assert_eq!(set.to_pattern().unwrap(), "[^a0-9]");
/// ```
#[derive(Debug, Default)]
pub struct CharSet {
    pub(crate) negative: bool,
    pub(crate) head: Option<Box<CharSetNode>>,
}

impl CharSet {
    pub fn new() -> Self {
        CharSet {
            negative: false,
            head: None,
        }
    }

    fn append(mut self, element: CharSetElement) -> Self {
        let previous = self.head.take();
        CharSet {
            negative: self.negative,
            head: Some(Box::new(CharSetNode { element, previous })),
        }
    }

    /// Append a single character.
    pub fn char(self, character: char) -> Self {
        self.append(CharSetElement::Char(character))
    }

    /// Append every character of `text` as a separate element.
    pub fn chars(self, text: &str) -> Self {
        let mut set = self;
        for character in text.chars() {
            set = set.append(CharSetElement::Char(character));
        }
        set
    }

    /// Append a single character given by its code point.
    pub fn char_code(self, code_point: u32) -> Self {
        self.append(CharSetElement::CharCode(code_point))
    }

    /// Append a character range; both endpoints are included.
    pub fn range(self, start: char, end_included: char) -> Self {
        self.append(CharSetElement::CharRange(CharRange {
            start,
            end_included,
        }))
    }

    /// Append a code point range; both endpoints are included.
    pub fn code_point_range(self, start: u32, end_included: u32) -> Self {
        self.append(CharSetElement::CodePointRange(start, end_included))
    }

    /// Append a preset character set such as `\w`.
    pub fn preset(self, name: PresetCharSetName) -> Self {
        self.append(CharSetElement::PresetCharSet(name))
    }

    /// Append a Unicode category or named block reference, e.g. `\p{Lu}`.
    pub fn category(self, name: &str) -> Self {
        self.append(CharSetElement::UnicodeCategory {
            name: name.to_owned(),
            negative: false,
        })
    }

    /// Append a negated Unicode category or named block reference,
    /// e.g. `\P{Lu}`.
    pub fn not_category(self, name: &str) -> Self {
        self.append(CharSetElement::UnicodeCategory {
            name: name.to_owned(),
            negative: true,
        })
    }

    /// Subtract a nested set from this one, e.g. `[a-z-[aeiou]]`.
    pub fn subtract(self, excluded: CharSet) -> Self {
        self.append(CharSetElement::Subtraction(excluded))
    }

    /// Mark the whole set as negated (`[^...]`).
    pub fn negate(mut self) -> Self {
        self.negative = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Render the set to pattern text with the default settings.
    pub fn to_pattern(&self) -> Result<String, FluentError> {
        self.to_pattern_with(Settings::default())
    }

    /// Render the set to pattern text.
    pub fn to_pattern_with(&self, settings: Settings) -> Result<String, FluentError> {
        let mut builder = crate::builder::PatternBuilder::with_settings(settings);
        builder.append_char_set(self)?;
        Ok(builder.finish())
    }
}

impl Drop for CharSet {
    // Unlink the chain iteratively so that dropping a long set does not
    // recurse once per node.
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.previous.take();
        }
    }
}
