// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// The expression chain.
//
// Every combinator appends one node: it allocates the node, sets the
// node's `previous` link to the current chain head, and returns the new
// node as the new head. The result is a singly linked list whose head is
// the LAST-appended node and whose tail is the FIRST-appended node, i.e.
// the reverse of emission order:
//
// ```diagram
//                  head                              tail
//              /----------\      /----------\    /----------\
//              | comment  |      |  repeat  |    | literal  |
//              | previous-|------|-previous-|----|-previous-|---( None )
//              \----------/      \----------/    \----------/
//
//   emission:  "ab"  "(?:cd)+"  "(?#note)"       (tail first)
// ```
//
// A node's `previous` link is set exactly once, by the combinator that
// created the node, and never mutated afterward. Concatenating two
// independently built chains splices at the far end: the TAIL of the
// second chain receives the first chain's head as its `previous`, so the
// combined chain still unwinds in construction order.

use crate::charset::{CharSet, PresetCharSetName};
use crate::error::FluentError;
use crate::options::FlagSet;
use crate::settings::Settings;

/// Zero-width anchor assertions with a fixed spelling.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AnchorAssertionName {
    /// `^`
    LineStart,
    /// `$`
    LineEnd,
    /// `\A`
    TextStart,
    /// `\z`
    TextEnd,
    /// `\G`
    PreviousMatchEnd,
}

impl AnchorAssertionName {
    pub(crate) fn pattern_text(&self) -> &'static str {
        match self {
            AnchorAssertionName::LineStart => "^",
            AnchorAssertionName::LineEnd => "$",
            AnchorAssertionName::TextStart => "\\A",
            AnchorAssertionName::TextEnd => "\\z",
            AnchorAssertionName::PreviousMatchEnd => "\\G",
        }
    }
}

/// Word boundary assertions.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BoundaryAssertionName {
    /// `\b`
    IsBound,
    /// `\B`
    IsNotBound,
}

impl BoundaryAssertionName {
    pub(crate) fn pattern_text(&self) -> &'static str {
        match self {
            BoundaryAssertionName::IsBound => "\\b",
            BoundaryAssertionName::IsNotBound => "\\B",
        }
    }
}

/// A reference to a previously captured group.
#[derive(Debug, PartialEq)]
pub enum BackReference {
    Index(usize),
    Name(String),
}

/// Repetition bounds. All bounds are validated when the chain is
/// rendered, before any text is written for the construct.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum QuantifierKind {
    /// `?`
    Optional,
    /// `+`
    OneOrMore,
    /// `*`
    ZeroOrMore,
    /// `{n}`
    Repeat(usize),
    /// `{m,n}`
    RepeatRange(usize, usize),
    /// `{m,}`
    AtLeast(usize),
    /// `{0,n}`
    AtMost(usize),
}

/// The opener written for a group construct.
#[derive(Debug, PartialEq)]
pub enum GroupKind {
    /// `(...)`
    Capture,
    /// `(?:...)`
    NonCapture,
    /// `(?<name>...)`
    Named(String),
    /// `(?<name-close>...)` or `(?<-close>...)`
    Balancing {
        name: Option<String>,
        close: String,
    },
    /// `(?=...)` / `(?!...)`
    LookAhead { negative: bool },
    /// `(?<=...)` / `(?<!...)`
    LookBehind { negative: bool },
}

/// The test of a conditional construct `(?(test)yes|no)`.
#[derive(Debug)]
pub enum ConditionalTest {
    /// `(?(1)...)`: did group 1 participate in the match.
    GroupIndex(usize),
    /// `(?(name)...)`: did the named group participate in the match.
    GroupName(String),
    /// `(?(?=...)...)`: a zero-width assertion; the chain must render to
    /// a grouped assertion such as `is_before` produces.
    Assertion(Expression),
}

/// Generic content accepted by the structural combinators.
///
/// The four shapes are the only ones the renderer dispatches over:
/// literal text, a sub-chain, an ordered set of `|`-joined alternatives,
/// and an arbitrarily nested sequence flattened in order.
#[derive(Debug)]
pub enum Content {
    Text(String),
    Chain(Expression),
    AnyOf(Vec<Content>),
    Sequence(Vec<Content>),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<char> for Content {
    fn from(character: char) -> Self {
        Content::Chain(Expression::new().char(character))
    }
}

impl From<Expression> for Content {
    fn from(expression: Expression) -> Self {
        Content::Chain(expression)
    }
}

impl From<CharSet> for Content {
    fn from(set: CharSet) -> Self {
        Content::Chain(Expression::new().char_set(set))
    }
}

impl From<Vec<Content>> for Content {
    fn from(contents: Vec<Content>) -> Self {
        Content::Sequence(contents)
    }
}

/// What one chain node contributes to the pattern.
#[derive(Debug)]
pub(crate) enum ExpressionKind {
    /// Literal text, escaped on emission.
    Text(String),
    /// A single literal character, escaped on emission.
    Char(char),
    /// A single literal character given by its code point.
    CharCode(u32),
    /// `.`
    CharAny,
    /// Raw pattern text written without escaping. This is the entry point
    /// for the named-constant convenience layer.
    Verbatim(String),
    PresetCharSet(PresetCharSetName),
    /// `\p{Name}` / `\P{Name}`
    UnicodeCategory { name: String, negative: bool },
    CharSet(CharSet),
    AnchorAssertion(AnchorAssertionName),
    BoundaryAssertion(BoundaryAssertionName),
    Group {
        kind: GroupKind,
        content: Content,
    },
    Quantifier {
        kind: QuantifierKind,
        lazy: bool,
        content: Content,
    },
    AnyOf(Vec<Content>),
    Conditional {
        test: ConditionalTest,
        yes: Content,
        no: Option<Content>,
    },
    BackReference(BackReference),
    /// `(?i-mx:...)` with content, `(?i-mx)` without.
    Options {
        apply: FlagSet,
        disable: FlagSet,
        content: Option<Content>,
    },
    /// `(?#...)`
    Comment(String),
}

#[derive(Debug)]
pub(crate) struct ExpressionNode {
    pub(crate) kind: ExpressionKind,
    /// The node appended immediately before this one; set exactly once
    /// when the node is created.
    pub(crate) previous: Option<Box<ExpressionNode>>,
}

/// A handle to an append-only expression chain.
///
/// Chains are immutable after construction: every combinator consumes the
/// handle and returns a new one. Rendering a chain is read-only and can be
/// repeated any number of times with identical results.
///
/// ```
/// use regex_fluent::Expression;
///
/// let pattern = Expression::new()
///     .named_group("g", Expression::new().one_or_more("ab"))
///     .to_pattern()
///     .unwrap();
/// assert_eq!(pattern, "(?<g>(?:ab)+)");
/// ```
#[derive(Debug, Default)]
pub struct Expression {
    pub(crate) head: Option<Box<ExpressionNode>>,
}

impl Expression {
    /// Create an empty chain.
    pub fn new() -> Self {
        Expression { head: None }
    }

    fn append(mut self, kind: ExpressionKind) -> Self {
        let previous = self.head.take();
        Expression {
            head: Some(Box::new(ExpressionNode { kind, previous })),
        }
    }

    /// Append literal text; metacharacters are escaped on emission.
    pub fn literal(self, text: &str) -> Self {
        self.append(ExpressionKind::Text(text.to_owned()))
    }

    /// Append a single literal character.
    pub fn char(self, character: char) -> Self {
        self.append(ExpressionKind::Char(character))
    }

    /// Append a single literal character given by its code point.
    pub fn char_code(self, code_point: u32) -> Self {
        self.append(ExpressionKind::CharCode(code_point))
    }

    /// Append `.`.
    pub fn char_any(self) -> Self {
        self.append(ExpressionKind::CharAny)
    }

    /// Append raw pattern text without escaping.
    pub fn verbatim(self, text: &str) -> Self {
        self.append(ExpressionKind::Verbatim(text.to_owned()))
    }

    /// Append a preset character set such as `\w`.
    pub fn preset(self, name: PresetCharSetName) -> Self {
        self.append(ExpressionKind::PresetCharSet(name))
    }

    /// Append a Unicode category or named block reference, e.g. `\p{Lu}`.
    pub fn category(self, name: &str) -> Self {
        self.append(ExpressionKind::UnicodeCategory {
            name: name.to_owned(),
            negative: false,
        })
    }

    /// Append a negated Unicode category or named block reference.
    pub fn not_category(self, name: &str) -> Self {
        self.append(ExpressionKind::UnicodeCategory {
            name: name.to_owned(),
            negative: true,
        })
    }

    /// Append a whole character set.
    pub fn char_set(self, set: CharSet) -> Self {
        self.append(ExpressionKind::CharSet(set))
    }

    /// Append a zero-width anchor assertion.
    pub fn anchor(self, name: AnchorAssertionName) -> Self {
        self.append(ExpressionKind::AnchorAssertion(name))
    }

    /// Append a word boundary assertion.
    pub fn boundary(self, name: BoundaryAssertionName) -> Self {
        self.append(ExpressionKind::BoundaryAssertion(name))
    }

    /// Append a numbered capturing group `(...)`.
    pub fn capture(self, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::Capture,
            content: content.into(),
        })
    }

    /// Append a non-capturing group `(?:...)`.
    pub fn group(self, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::NonCapture,
            content: content.into(),
        })
    }

    /// Append a named capturing group `(?<name>...)`.
    pub fn named_group(self, name: &str, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::Named(name.to_owned()),
            content: content.into(),
        })
    }

    /// Append a balancing group `(?<name-close>...)`; pass `None` for the
    /// pure closing form `(?<-close>...)`.
    pub fn balancing_group(
        self,
        name: Option<&str>,
        close: &str,
        content: impl Into<Content>,
    ) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::Balancing {
                name: name.map(|n| n.to_owned()),
                close: close.to_owned(),
            },
            content: content.into(),
        })
    }

    /// Append a positive lookahead `(?=...)`.
    pub fn is_before(self, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::LookAhead { negative: false },
            content: content.into(),
        })
    }

    /// Append a negative lookahead `(?!...)`.
    pub fn is_not_before(self, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::LookAhead { negative: true },
            content: content.into(),
        })
    }

    /// Append a positive lookbehind `(?<=...)`.
    pub fn is_after(self, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::LookBehind { negative: false },
            content: content.into(),
        })
    }

    /// Append a negative lookbehind `(?<!...)`.
    pub fn is_not_after(self, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Group {
            kind: GroupKind::LookBehind { negative: true },
            content: content.into(),
        })
    }

    fn quantifier(self, kind: QuantifierKind, lazy: bool, content: impl Into<Content>) -> Self {
        self.append(ExpressionKind::Quantifier {
            kind,
            lazy,
            content: content.into(),
        })
    }

    /// Append `content?`.
    pub fn optional(self, content: impl Into<Content>) -> Self {
        self.quantifier(QuantifierKind::Optional, false, content)
    }

    /// Append `content??`.
    pub fn optional_lazy(self, content: impl Into<Content>) -> Self {
        self.quantifier(QuantifierKind::Optional, true, content)
    }

    /// Append `content+`.
    pub fn one_or_more(self, content: impl Into<Content>) -> Self {
        self.quantifier(QuantifierKind::OneOrMore, false, content)
    }

    /// Append `content+?`.
    pub fn one_or_more_lazy(self, content: impl Into<Content>) -> Self {
        self.quantifier(QuantifierKind::OneOrMore, true, content)
    }

    /// Append `content*`.
    pub fn zero_or_more(self, content: impl Into<Content>) -> Self {
        self.quantifier(QuantifierKind::ZeroOrMore, false, content)
    }

    /// Append `content*?`.
    pub fn zero_or_more_lazy(self, content: impl Into<Content>) -> Self {
        self.quantifier(QuantifierKind::ZeroOrMore, true, content)
    }

    /// Append `content{times}`.
    pub fn repeat(self, content: impl Into<Content>, times: usize) -> Self {
        self.quantifier(QuantifierKind::Repeat(times), false, content)
    }

    /// Append `content{from,to}`.
    pub fn repeat_range(self, content: impl Into<Content>, from: usize, to: usize) -> Self {
        self.quantifier(QuantifierKind::RepeatRange(from, to), false, content)
    }

    /// Append `content{from,to}?`.
    pub fn repeat_range_lazy(self, content: impl Into<Content>, from: usize, to: usize) -> Self {
        self.quantifier(QuantifierKind::RepeatRange(from, to), true, content)
    }

    /// Append `content{from,}`.
    pub fn at_least(self, content: impl Into<Content>, from: usize) -> Self {
        self.quantifier(QuantifierKind::AtLeast(from), false, content)
    }

    /// Append `content{from,}?`.
    pub fn at_least_lazy(self, content: impl Into<Content>, from: usize) -> Self {
        self.quantifier(QuantifierKind::AtLeast(from), true, content)
    }

    /// Append `content{0,to}`.
    pub fn at_most(self, content: impl Into<Content>, to: usize) -> Self {
        self.quantifier(QuantifierKind::AtMost(to), false, content)
    }

    /// Append an alternation: the contents are rendered in order, joined
    /// by `|`, with no implicit wrapper.
    pub fn any_of(self, contents: Vec<Content>) -> Self {
        self.append(ExpressionKind::AnyOf(contents))
    }

    /// Append a conditional construct `(?(test)yes|no)`.
    pub fn condition(
        self,
        test: ConditionalTest,
        yes: impl Into<Content>,
        no: Option<Content>,
    ) -> Self {
        self.append(ExpressionKind::Conditional {
            test,
            yes: yes.into(),
            no,
        })
    }

    /// Append a numeric backreference `\index`.
    pub fn backreference(self, index: usize) -> Self {
        self.append(ExpressionKind::BackReference(BackReference::Index(index)))
    }

    /// Append a named backreference `\k<name>`.
    pub fn backreference_by_name(self, name: &str) -> Self {
        self.append(ExpressionKind::BackReference(BackReference::Name(
            name.to_owned(),
        )))
    }

    /// Append an option group `(?i-mx:...)`. The flags are in force for
    /// the group body only.
    pub fn with_options(
        self,
        apply: FlagSet,
        disable: FlagSet,
        content: impl Into<Content>,
    ) -> Self {
        self.append(ExpressionKind::Options {
            apply,
            disable,
            content: Some(content.into()),
        })
    }

    /// Append a bare option setter `(?i-mx)`.
    pub fn set_options(self, apply: FlagSet, disable: FlagSet) -> Self {
        self.append(ExpressionKind::Options {
            apply,
            disable,
            content: None,
        })
    }

    /// Append an inline comment `(?#...)`.
    pub fn comment(self, text: &str) -> Self {
        self.append(ExpressionKind::Comment(text.to_owned()))
    }

    /// Concatenate another independently built chain after this one.
    ///
    /// The splice happens at the far end: the tail of `other` receives the
    /// current head as its `previous` link, so the combined chain still
    /// unwinds in construction order.
    pub fn then(mut self, mut other: Expression) -> Self {
        let mut nodes = vec![];
        let mut cursor = other.head.take();
        while let Some(mut node) = cursor {
            cursor = node.previous.take();
            nodes.push(node);
        }

        // `nodes` now holds other's nodes head-first; relink them onto the
        // current head starting from other's tail.
        let mut head = self.head.take();
        for mut node in nodes.into_iter().rev() {
            node.previous = head;
            head = Some(node);
        }

        Expression { head }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Render the chain to pattern text with the default settings.
    pub fn to_pattern(&self) -> Result<String, FluentError> {
        crate::builder::render(self)
    }

    /// Render the chain to pattern text.
    pub fn to_pattern_with(&self, settings: Settings) -> Result<String, FluentError> {
        crate::builder::render_with(self, settings)
    }
}

impl Drop for Expression {
    // Unlink the chain iteratively so that dropping a long chain does not
    // recurse once per node.
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.previous.take();
        }
    }
}
