// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Substitution tokens:
//
// - $$       A literal `$`
// - ${n}     The text captured by group number `n`
// - ${name}  The text captured by the named group
// - $&       The whole match
// - $`       The input text before the match
// - $'       The input text after the match
// - $+       The last group that captured
// - $_       The entire input text
//
// Group references are always written in the braced form so that a
// literal digit following the reference cannot extend it.

use crate::error::FluentError;
use crate::rulechecker::validate_group_name;

#[derive(Debug)]
enum SubstitutionElement {
    Text(String),
    Group(usize),
    NamedGroup(String),
    WholeMatch,
    BeforeMatch,
    AfterMatch,
    LastCapturedGroup,
    EntireInput,
}

#[derive(Debug)]
struct SubstitutionNode {
    element: SubstitutionElement,
    /// The node appended immediately before this one; set exactly once
    /// when the node is created.
    previous: Option<Box<SubstitutionNode>>,
}

/// An append-only chain of replacement-text tokens.
///
/// The chain model is the same as [`crate::Expression`]: combinators
/// consume the handle and return a new head, and rendering unwinds the
/// chain in construction order.
///
/// ```
/// use regex_fluent::Substitution;
///
/// let replacement = Substitution::new()
///     .group(1)
///     .text("-")
///     .named_group("rest")
///     .to_text()
///     .unwrap();
/// assert_eq!(replacement, "${1}-${rest}");
/// ```
#[derive(Debug, Default)]
pub struct Substitution {
    head: Option<Box<SubstitutionNode>>,
}

impl Substitution {
    /// Create an empty chain.
    pub fn new() -> Self {
        Substitution { head: None }
    }

    fn append(mut self, element: SubstitutionElement) -> Self {
        let previous = self.head.take();
        Substitution {
            head: Some(Box::new(SubstitutionNode { element, previous })),
        }
    }

    /// Append literal replacement text; `$` is doubled on emission.
    pub fn text(self, text: &str) -> Self {
        self.append(SubstitutionElement::Text(text.to_owned()))
    }

    /// Append a reference to a numbered group, `${index}`. Index 0 is the
    /// whole match.
    pub fn group(self, index: usize) -> Self {
        self.append(SubstitutionElement::Group(index))
    }

    /// Append a reference to a named group, `${name}`.
    pub fn named_group(self, name: &str) -> Self {
        self.append(SubstitutionElement::NamedGroup(name.to_owned()))
    }

    /// Append `$&`, the whole match.
    pub fn whole_match(self) -> Self {
        self.append(SubstitutionElement::WholeMatch)
    }

    /// Append `` $` ``, the input text before the match.
    pub fn before_match(self) -> Self {
        self.append(SubstitutionElement::BeforeMatch)
    }

    /// Append `$'`, the input text after the match.
    pub fn after_match(self) -> Self {
        self.append(SubstitutionElement::AfterMatch)
    }

    /// Append `$+`, the last group that captured.
    pub fn last_captured_group(self) -> Self {
        self.append(SubstitutionElement::LastCapturedGroup)
    }

    /// Append `$_`, the entire input text.
    pub fn entire_input(self) -> Self {
        self.append(SubstitutionElement::EntireInput)
    }

    /// Concatenate another independently built chain after this one. The
    /// splice happens at the far end, like [`crate::Expression::then`].
    pub fn then(mut self, mut other: Substitution) -> Self {
        let mut nodes = vec![];
        let mut cursor = other.head.take();
        while let Some(mut node) = cursor {
            cursor = node.previous.take();
            nodes.push(node);
        }

        let mut head = self.head.take();
        for mut node in nodes.into_iter().rev() {
            node.previous = head;
            head = Some(node);
        }

        Substitution { head }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Render the chain to substitution text.
    pub fn to_text(&self) -> Result<String, FluentError> {
        let mut pending = vec![];
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            pending.push(node);
            cursor = node.previous.as_deref();
        }

        let mut buffer = String::new();
        while let Some(node) = pending.pop() {
            match &node.element {
                SubstitutionElement::Text(text) => {
                    for character in text.chars() {
                        if character == '$' {
                            buffer.push_str("$$");
                        } else {
                            buffer.push(character);
                        }
                    }
                }
                SubstitutionElement::Group(index) => {
                    buffer.push_str(&format!("${{{}}}", index));
                }
                SubstitutionElement::NamedGroup(name) => {
                    validate_group_name(name)?;
                    buffer.push_str(&format!("${{{}}}", name));
                }
                SubstitutionElement::WholeMatch => buffer.push_str("$&"),
                SubstitutionElement::BeforeMatch => buffer.push_str("$`"),
                SubstitutionElement::AfterMatch => buffer.push_str("$'"),
                SubstitutionElement::LastCapturedGroup => buffer.push_str("$+"),
                SubstitutionElement::EntireInput => buffer.push_str("$_"),
            }
        }

        Ok(buffer)
    }
}

impl Drop for Substitution {
    // Unlink the chain iteratively so that dropping a long chain does not
    // recurse once per node.
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.previous.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::FluentError;

    use super::Substitution;

    #[test]
    fn test_substitution_tokens() {
        let text = Substitution::new()
            .text("<")
            .whole_match()
            .text(">")
            .to_text()
            .unwrap();
        assert_eq!(text, "<$&>");

        let text = Substitution::new()
            .before_match()
            .after_match()
            .last_captured_group()
            .entire_input()
            .to_text()
            .unwrap();
        assert_eq!(text, "$`$'$+$_");
    }

    #[test]
    fn test_substitution_group_references() {
        let text = Substitution::new()
            .group(2)
            .text(", ")
            .group(1)
            .to_text()
            .unwrap();
        assert_eq!(text, "${2}, ${1}");

        // braced references cannot be extended by a following digit
        let text = Substitution::new().group(1).text("0").to_text().unwrap();
        assert_eq!(text, "${1}0");

        let text = Substitution::new().named_group("word").to_text().unwrap();
        assert_eq!(text, "${word}");

        assert!(matches!(
            Substitution::new().named_group("1st").to_text(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_substitution_dollar_escaping() {
        let text = Substitution::new().text("cost: $5").to_text().unwrap();
        assert_eq!(text, "cost: $$5");
    }

    #[test]
    fn test_substitution_then() {
        let a = Substitution::new().group(1).text("-");
        let b = Substitution::new().group(2);
        assert_eq!(a.then(b).to_text().unwrap(), "${1}-${2}");
    }

    #[test]
    fn test_substitution_render_is_repeatable() {
        let substitution = Substitution::new().whole_match().text("!");
        assert_eq!(substitution.to_text().unwrap(), "$&!");
        assert_eq!(substitution.to_text().unwrap(), "$&!");
    }
}
