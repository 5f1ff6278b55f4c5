// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// The renderer.
//
// A chain is unwound without recursion: starting from the head, the
// renderer walks the `previous` links and pushes each node onto an
// explicit stack, then pops and emits the nodes in that order, tail
// (earliest-appended) first. Chain length is user-controlled and
// unbounded, so the walk along the chain must never grow the call stack;
// recursion is reserved for nesting (group bodies), which is bounded by
// the construction depth.
//
// Structural constructs:
//
// - (...)              Capturing group
// - (?:...)            Non-capturing group
// - (?<name>...)       Named capturing group
// - (?<name-close>...) Balancing group
// - (?=...) (?!...)    Lookahead assertions
// - (?<=...) (?<!...)  Lookbehind assertions
// - a|b|c              Alternation
// - (?(test)yes|no)    Conditional
// - {n} {m,n} {m,}     Repetition bounds
// - (?i-mx:...)        Option group
// - \1 \k<name>        Backreferences
// - (?#...)            Inline comment
//
// The active flag set is threaded through the emit methods by value: an
// option group computes the body's flag state and passes it down, so the
// state seen by sibling and parent content is restored structurally
// rather than by a save/restore pair that an early error return could
// skip.

use crate::charset::{CharSet, CharSetElement};
use crate::error::FluentError;
use crate::escape::{escape_char_into, escape_str_into};
use crate::expression::{
    BackReference, ConditionalTest, Content, Expression, ExpressionKind, GroupKind, QuantifierKind,
};
use crate::options::FlagSet;
use crate::rulechecker::{
    char_from_code, content_is_empty, is_atomic, validate_category_name, validate_char_set,
    validate_group_name,
};
use crate::settings::Settings;

/// Render a chain to pattern text with the default settings.
pub fn render(expression: &Expression) -> Result<String, FluentError> {
    render_with(expression, Settings::default())
}

/// Render a chain to pattern text.
pub fn render_with(expression: &Expression, settings: Settings) -> Result<String, FluentError> {
    let mut builder = PatternBuilder::with_settings(settings);
    builder.append_expression(expression)?;
    Ok(builder.finish())
}

/// A single-use renderer that accumulates pattern text.
///
/// A builder owns mutable render state and serves one render pass; call
/// [`PatternBuilder::finish`] to take the accumulated text. The chains it
/// consumes are read-only and may be rendered again by another builder.
pub struct PatternBuilder {
    buffer: String,
    settings: Settings,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        PatternBuilder {
            buffer: String::new(),
            settings,
        }
    }

    /// Append literal text, escaping metacharacters.
    pub fn append_literal(&mut self, text: &str) -> Result<(), FluentError> {
        escape_str_into(&mut self.buffer, text, false)
    }

    /// Append a rendered expression chain.
    pub fn append_expression(&mut self, expression: &Expression) -> Result<(), FluentError> {
        self.emit_chain(expression, FlagSet::empty())
    }

    /// Append a rendered character set.
    pub fn append_char_set(&mut self, set: &CharSet) -> Result<(), FluentError> {
        self.emit_char_set(set)
    }

    /// Take the accumulated pattern text.
    pub fn finish(self) -> String {
        self.buffer
    }

    fn emit_chain(&mut self, expression: &Expression, flags: FlagSet) -> Result<(), FluentError> {
        // Walk the `previous` links from the head down to the tail,
        // stacking the nodes, then pop to emit in construction order.
        let mut pending = vec![];
        let mut cursor = expression.head.as_deref();
        while let Some(node) = cursor {
            pending.push(node);
            cursor = node.previous.as_deref();
        }

        while let Some(node) = pending.pop() {
            self.emit_kind(&node.kind, flags)?;
        }

        Ok(())
    }

    fn emit_kind(&mut self, kind: &ExpressionKind, flags: FlagSet) -> Result<(), FluentError> {
        match kind {
            ExpressionKind::Text(text) => self.emit_text(text, flags),
            ExpressionKind::Char(character) => self.emit_char(*character, flags),
            ExpressionKind::CharCode(code_point) => {
                let character = char_from_code(*code_point)?;
                self.emit_char(character, flags)
            }
            ExpressionKind::CharAny => {
                self.buffer.push('.');
                Ok(())
            }
            ExpressionKind::Verbatim(text) => {
                self.buffer.push_str(text);
                Ok(())
            }
            ExpressionKind::PresetCharSet(name) => {
                self.buffer.push_str(name.pattern_text());
                Ok(())
            }
            ExpressionKind::UnicodeCategory { name, negative } => {
                self.emit_unicode_category(name, *negative)
            }
            ExpressionKind::CharSet(set) => self.emit_char_set(set),
            ExpressionKind::AnchorAssertion(name) => {
                self.buffer.push_str(name.pattern_text());
                Ok(())
            }
            ExpressionKind::BoundaryAssertion(name) => {
                self.buffer.push_str(name.pattern_text());
                Ok(())
            }
            ExpressionKind::Group { kind, content } => self.emit_group(kind, content, flags),
            ExpressionKind::Quantifier {
                kind,
                lazy,
                content,
            } => self.emit_quantifier(*kind, *lazy, content, flags),
            ExpressionKind::AnyOf(contents) => self.emit_any_of(contents, flags),
            ExpressionKind::Conditional { test, yes, no } => {
                self.emit_conditional(test, yes, no.as_ref(), flags)
            }
            ExpressionKind::BackReference(reference) => self.emit_backreference(reference),
            ExpressionKind::Options {
                apply,
                disable,
                content,
            } => self.emit_options(*apply, *disable, content.as_ref(), flags),
            ExpressionKind::Comment(text) => self.emit_comment(text),
        }
    }

    // The content dispatch: the four shapes a structural construct accepts.
    fn emit_content(&mut self, content: &Content, flags: FlagSet) -> Result<(), FluentError> {
        match content {
            Content::Text(text) => self.emit_text(text, flags),
            Content::Chain(expression) => self.emit_chain(expression, flags),
            Content::AnyOf(contents) => self.emit_any_of(contents, flags),
            Content::Sequence(contents) => {
                for item in contents {
                    self.emit_content(item, flags)?;
                }
                Ok(())
            }
        }
    }

    fn emit_text(&mut self, text: &str, flags: FlagSet) -> Result<(), FluentError> {
        for character in text.chars() {
            self.emit_char(character, flags)?;
        }
        Ok(())
    }

    fn emit_char(&mut self, character: char, flags: FlagSet) -> Result<(), FluentError> {
        // Under `x` mode, unescaped white space is dropped and `#` starts
        // a comment, so both lose their literal meaning outside a
        // character set.
        if flags.contains(FlagSet::IGNORE_WHITESPACE) && matches!(character, ' ' | '#') {
            self.buffer.push('\\');
            self.buffer.push(character);
            return Ok(());
        }

        escape_char_into(&mut self.buffer, character, false)
    }

    fn emit_unicode_category(&mut self, name: &str, negative: bool) -> Result<(), FluentError> {
        validate_category_name(name)?;

        self.buffer
            .push_str(if negative { "\\P{" } else { "\\p{" });
        self.buffer.push_str(name);
        self.buffer.push('}');
        Ok(())
    }

    fn emit_group(
        &mut self,
        kind: &GroupKind,
        content: &Content,
        flags: FlagSet,
    ) -> Result<(), FluentError> {
        // validate the identifiers before the opener is written
        match kind {
            GroupKind::Named(name) => validate_group_name(name)?,
            GroupKind::Balancing { name, close } => {
                if let Some(name) = name {
                    validate_group_name(name)?;
                }
                validate_group_name(close)?;
            }
            _ => {}
        }

        match kind {
            GroupKind::Capture => self.buffer.push('('),
            GroupKind::NonCapture => self.buffer.push_str("(?:"),
            GroupKind::Named(name) => {
                self.buffer.push_str("(?");
                let (open, close) = self.settings.named_group_style.delimiters();
                self.buffer.push(open);
                self.buffer.push_str(name);
                self.buffer.push(close);
            }
            GroupKind::Balancing { name, close } => {
                self.buffer.push_str("(?");
                let (open_delimiter, close_delimiter) =
                    self.settings.named_group_style.delimiters();
                self.buffer.push(open_delimiter);
                if let Some(name) = name {
                    self.buffer.push_str(name);
                }
                self.buffer.push('-');
                self.buffer.push_str(close);
                self.buffer.push(close_delimiter);
            }
            GroupKind::LookAhead { negative } => {
                self.buffer.push_str(if *negative { "(?!" } else { "(?=" });
            }
            GroupKind::LookBehind { negative } => {
                self.buffer
                    .push_str(if *negative { "(?<!" } else { "(?<=" });
            }
        }

        self.emit_content(content, flags)?;
        self.buffer.push(')');
        Ok(())
    }

    fn emit_quantifier(
        &mut self,
        kind: QuantifierKind,
        lazy: bool,
        content: &Content,
        flags: FlagSet,
    ) -> Result<(), FluentError> {
        // validate the bounds and the content before any text is written
        if let QuantifierKind::RepeatRange(from, to) = kind {
            if from > to {
                return Err(FluentError::InvalidArgument(format!(
                    "Repetition range {{{},{}}} is invalid: the lower bound exceeds the upper bound.",
                    from, to
                )));
            }
        }

        if content_is_empty(content) {
            return Err(FluentError::InvalidArgument(
                "A quantifier requires non-empty content.".to_owned(),
            ));
        }

        let wrap = !is_atomic(content);
        if wrap {
            self.buffer.push_str("(?:");
        }
        self.emit_content(content, flags)?;
        if wrap {
            self.buffer.push(')');
        }

        match kind {
            QuantifierKind::Optional => self.buffer.push('?'),
            QuantifierKind::OneOrMore => self.buffer.push('+'),
            QuantifierKind::ZeroOrMore => self.buffer.push('*'),
            QuantifierKind::Repeat(times) => {
                self.buffer.push_str(&format!("{{{}}}", times));
            }
            QuantifierKind::RepeatRange(from, to) => {
                self.buffer.push_str(&format!("{{{},{}}}", from, to));
            }
            QuantifierKind::AtLeast(from) => {
                self.buffer.push_str(&format!("{{{},}}", from));
            }
            QuantifierKind::AtMost(to) => {
                self.buffer.push_str(&format!("{{0,{}}}", to));
            }
        }

        if lazy {
            self.buffer.push('?');
        }

        Ok(())
    }

    fn emit_any_of(&mut self, contents: &[Content], flags: FlagSet) -> Result<(), FluentError> {
        if contents.is_empty() {
            return Err(FluentError::InvalidArgument(
                "An alternation requires at least one alternative.".to_owned(),
            ));
        }

        for (index, content) in contents.iter().enumerate() {
            if index != 0 {
                self.buffer.push('|');
            }
            self.emit_content(content, flags)?;
        }

        Ok(())
    }

    fn emit_conditional(
        &mut self,
        test: &ConditionalTest,
        yes: &Content,
        no: Option<&Content>,
        flags: FlagSet,
    ) -> Result<(), FluentError> {
        match test {
            ConditionalTest::GroupIndex(index) => {
                if *index == 0 {
                    return Err(FluentError::InvalidArgument(
                        "A conditional group index must be 1 or greater.".to_owned(),
                    ));
                }
                self.buffer.push_str("(?(");
                self.buffer.push_str(&index.to_string());
                self.buffer.push(')');
            }
            ConditionalTest::GroupName(name) => {
                validate_group_name(name)?;
                self.buffer.push_str("(?(");
                self.buffer.push_str(name);
                self.buffer.push(')');
            }
            ConditionalTest::Assertion(expression) => {
                // The test shares the conditional's opening parenthesis,
                // e.g. `(?(?=...)yes|no)`, so the rendered test must be a
                // single grouped assertion.
                let mut sub_builder = PatternBuilder::with_settings(self.settings);
                sub_builder.emit_chain(expression, flags)?;
                let test_text = sub_builder.finish();

                if !(test_text.starts_with('(') && test_text.ends_with(')')) {
                    return Err(FluentError::InvalidArgument(
                        "A conditional test must be a grouped assertion.".to_owned(),
                    ));
                }

                self.buffer.push_str("(?");
                self.buffer.push_str(&test_text);
            }
        }

        self.emit_content(yes, flags)?;
        if let Some(no_content) = no {
            self.buffer.push('|');
            self.emit_content(no_content, flags)?;
        }
        self.buffer.push(')');
        Ok(())
    }

    fn emit_backreference(&mut self, reference: &BackReference) -> Result<(), FluentError> {
        match reference {
            BackReference::Index(index) => {
                if *index == 0 {
                    return Err(FluentError::InvalidArgument(
                        "A numeric backreference must be 1 or greater.".to_owned(),
                    ));
                }

                self.buffer.push('\\');
                self.buffer.push_str(&index.to_string());

                // the empty non-capturing group keeps a following literal
                // digit from turning the reference into an octal escape
                if self.settings.disambiguate_backreferences {
                    self.buffer.push_str("(?:)");
                }
            }
            BackReference::Name(name) => {
                validate_group_name(name)?;

                self.buffer.push_str("\\k");
                let (open, close) = self.settings.named_group_style.delimiters();
                self.buffer.push(open);
                self.buffer.push_str(name);
                self.buffer.push(close);
            }
        }

        Ok(())
    }

    fn emit_options(
        &mut self,
        apply: FlagSet,
        disable: FlagSet,
        content: Option<&Content>,
        flags: FlagSet,
    ) -> Result<(), FluentError> {
        if apply.is_empty() && disable.is_empty() {
            return Err(FluentError::InvalidArgument(
                "An option construct requires at least one flag to apply or disable.".to_owned(),
            ));
        }
        if apply.intersects(disable) {
            return Err(FluentError::InvalidArgument(
                "The applied and disabled flag sets overlap.".to_owned(),
            ));
        }

        self.buffer.push_str("(?");
        self.buffer.push_str(&apply.flags_text());
        if !disable.is_empty() {
            self.buffer.push('-');
            self.buffer.push_str(&disable.flags_text());
        }

        match content {
            Some(content) => {
                // the body state is passed down by value; the caller keeps
                // `flags` for whatever follows the group
                let body_flags = (flags | apply) & !disable;
                self.buffer.push(':');
                self.emit_content(content, body_flags)?;
                self.buffer.push(')');
            }
            None => {
                self.buffer.push(')');
            }
        }

        Ok(())
    }

    fn emit_comment(&mut self, text: &str) -> Result<(), FluentError> {
        if text.contains(')') {
            return Err(FluentError::InvalidArgument(
                "An inline comment must not contain the group terminator ')'.".to_owned(),
            ));
        }

        self.buffer.push_str("(?#");
        self.buffer.push_str(text);
        self.buffer.push(')');
        Ok(())
    }

    fn emit_char_set(&mut self, set: &CharSet) -> Result<(), FluentError> {
        // the whole body is validated before the opening bracket is written
        validate_char_set(set)?;

        let mut pending = vec![];
        let mut cursor = set.head.as_deref();
        while let Some(node) = cursor {
            pending.push(node);
            cursor = node.previous.as_deref();
        }

        self.buffer.push_str(if set.negative { "[^" } else { "[" });
        while let Some(node) = pending.pop() {
            self.emit_char_set_element(&node.element)?;
        }
        self.buffer.push(']');
        Ok(())
    }

    fn emit_char_set_element(&mut self, element: &CharSetElement) -> Result<(), FluentError> {
        match element {
            CharSetElement::Char(character) => {
                escape_char_into(&mut self.buffer, *character, true)
            }
            CharSetElement::CharCode(code_point) => {
                let character = char_from_code(*code_point)?;
                escape_char_into(&mut self.buffer, character, true)
            }
            CharSetElement::CharRange(range) => {
                escape_char_into(&mut self.buffer, range.start, true)?;
                self.buffer.push('-');
                escape_char_into(&mut self.buffer, range.end_included, true)
            }
            CharSetElement::CodePointRange(start, end_included) => {
                let start_char = char_from_code(*start)?;
                let end_char = char_from_code(*end_included)?;
                escape_char_into(&mut self.buffer, start_char, true)?;
                self.buffer.push('-');
                escape_char_into(&mut self.buffer, end_char, true)
            }
            CharSetElement::PresetCharSet(name) => {
                self.buffer.push_str(name.pattern_text());
                Ok(())
            }
            CharSetElement::UnicodeCategory { name, negative } => {
                self.emit_unicode_category(name, *negative)
            }
            CharSetElement::Subtraction(excluded) => {
                self.buffer.push('-');
                self.emit_char_set(excluded)
            }
        }
    }
}

impl Default for PatternBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::charset::CharSet;
    use crate::error::FluentError;
    use crate::expression::{ConditionalTest, Content, Expression};
    use crate::options::FlagSet;
    use crate::settings::{NamedGroupStyle, Settings};

    use super::PatternBuilder;

    #[test]
    fn test_builder_append_literal() {
        let mut builder = PatternBuilder::new();
        builder.append_literal("1+1").unwrap();
        builder.append_literal(" (two)").unwrap();
        assert_eq!(builder.finish(), r#"1\+1 \(two\)"#);
    }

    #[test]
    fn test_groups() {
        let pattern = Expression::new().capture("ab").to_pattern().unwrap();
        assert_eq!(pattern, "(ab)");

        let pattern = Expression::new().group("ab").to_pattern().unwrap();
        assert_eq!(pattern, "(?:ab)");

        let pattern = Expression::new()
            .named_group("word", "ab")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?<word>ab)");

        let pattern = Expression::new()
            .balancing_group(Some("content"), "open", "ab")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?<content-open>ab)");

        let pattern = Expression::new()
            .balancing_group(None, "open", "ab")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?<-open>ab)");
    }

    #[test]
    fn test_lookaround_assertions() {
        let pattern = Expression::new().is_before("ab").to_pattern().unwrap();
        assert_eq!(pattern, "(?=ab)");

        let pattern = Expression::new().is_not_before("ab").to_pattern().unwrap();
        assert_eq!(pattern, "(?!ab)");

        let pattern = Expression::new().is_after("ab").to_pattern().unwrap();
        assert_eq!(pattern, "(?<=ab)");

        let pattern = Expression::new().is_not_after("ab").to_pattern().unwrap();
        assert_eq!(pattern, "(?<!ab)");
    }

    #[test]
    fn test_group_name_validation() {
        assert!(matches!(
            Expression::new().named_group("1st", "a").to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
        assert!(matches!(
            Expression::new().named_group("", "a").to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));

        // validation fails before the opener is written: the buffer must
        // stay clean for the next append
        let mut builder = PatternBuilder::new();
        let bad = Expression::new().named_group("a b", "x");
        assert!(builder.append_expression(&bad).is_err());
        builder.append_literal("ok").unwrap();
        assert_eq!(builder.finish(), "ok");
    }

    #[test]
    fn test_quantifiers() {
        let pattern = Expression::new().optional("a").to_pattern().unwrap();
        assert_eq!(pattern, "a?");

        let pattern = Expression::new().one_or_more("a").to_pattern().unwrap();
        assert_eq!(pattern, "a+");

        let pattern = Expression::new().zero_or_more("a").to_pattern().unwrap();
        assert_eq!(pattern, "a*");

        let pattern = Expression::new().repeat("a", 3).to_pattern().unwrap();
        assert_eq!(pattern, "a{3}");

        let pattern = Expression::new()
            .repeat_range("a", 2, 5)
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "a{2,5}");

        let pattern = Expression::new().at_least("a", 2).to_pattern().unwrap();
        assert_eq!(pattern, "a{2,}");

        let pattern = Expression::new().at_most("a", 5).to_pattern().unwrap();
        assert_eq!(pattern, "a{0,5}");
    }

    #[test]
    fn test_lazy_quantifiers() {
        let pattern = Expression::new().optional_lazy("a").to_pattern().unwrap();
        assert_eq!(pattern, "a??");

        let pattern = Expression::new().one_or_more_lazy("a").to_pattern().unwrap();
        assert_eq!(pattern, "a+?");

        let pattern = Expression::new()
            .zero_or_more_lazy("a")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "a*?");

        let pattern = Expression::new()
            .repeat_range_lazy("a", 2, 5)
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "a{2,5}?");

        let pattern = Expression::new().at_least_lazy("a", 2).to_pattern().unwrap();
        assert_eq!(pattern, "a{2,}?");
    }

    #[test]
    fn test_quantifier_wrapping() {
        // multi-character content is wrapped in a non-capturing group
        let pattern = Expression::new().one_or_more("ab").to_pattern().unwrap();
        assert_eq!(pattern, "(?:ab)+");

        // an escaped single character is still one atom
        let pattern = Expression::new().one_or_more(".").to_pattern().unwrap();
        assert_eq!(pattern, r#"\.+"#);

        // a group is already one atom
        let pattern = Expression::new()
            .one_or_more(Expression::new().capture("ab"))
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(ab)+");

        // a character set is one atom
        let pattern = Expression::new()
            .one_or_more(CharSet::new().range('0', '9'))
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "[0-9]+");

        // a quantified atom must be wrapped before it is quantified again
        let pattern = Expression::new()
            .optional(Expression::new().one_or_more("a"))
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?:a+)?");
    }

    #[test]
    fn test_quantifier_bound_validation() {
        assert!(matches!(
            Expression::new().repeat_range("a", 3, 1).to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));

        // nothing may be written for a failed construct
        let mut builder = PatternBuilder::new();
        let bad = Expression::new().repeat_range("a", 3, 1);
        assert!(builder.append_expression(&bad).is_err());
        assert_eq!(builder.finish(), "");

        // a zero exact count is valid
        let pattern = Expression::new().repeat("a", 0).to_pattern().unwrap();
        assert_eq!(pattern, "a{0}");
    }

    #[test]
    fn test_quantifier_empty_content() {
        assert!(matches!(
            Expression::new().one_or_more("").to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
        assert!(matches!(
            Expression::new().one_or_more(Expression::new()).to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_alternation() {
        let pattern = Expression::new()
            .any_of(vec!["cat".into(), "dog".into(), "fish".into()])
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "cat|dog|fish");

        // a single alternative renders without a separator
        let pattern = Expression::new()
            .any_of(vec!["cat".into()])
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "cat");

        assert!(matches!(
            Expression::new().any_of(vec![]).to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_content_shapes() {
        // a nested sequence is flattened in order
        let content = Content::Sequence(vec![
            "a".into(),
            Content::Sequence(vec!["b".into(), "c".into()]),
            Expression::new().char_any().into(),
        ]);
        let pattern = Expression::new().group(content).to_pattern().unwrap();
        assert_eq!(pattern, "(?:abc.)");

        // alternatives nest inside a sequence
        let content = Content::Sequence(vec![
            "x=".into(),
            Content::AnyOf(vec!["yes".into(), "no".into()]),
        ]);
        let pattern = Expression::new().group(content).to_pattern().unwrap();
        assert_eq!(pattern, "(?:x=yes|no)");
    }

    #[test]
    fn test_conditional() {
        let pattern = Expression::new()
            .condition(ConditionalTest::GroupIndex(1), "yes", Some("no".into()))
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?(1)yes|no)");

        let pattern = Expression::new()
            .condition(ConditionalTest::GroupName("g".to_owned()), "yes", None)
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?(g)yes)");

        let pattern = Expression::new()
            .condition(
                ConditionalTest::Assertion(Expression::new().is_before("a")),
                "yes",
                Some("no".into()),
            )
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?(?=a)yes|no)");

        assert!(matches!(
            Expression::new()
                .condition(ConditionalTest::GroupIndex(0), "yes", None)
                .to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));

        // the test must render to a grouped assertion
        assert!(matches!(
            Expression::new()
                .condition(
                    ConditionalTest::Assertion(Expression::new().literal("a")),
                    "yes",
                    None,
                )
                .to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_backreferences() {
        let pattern = Expression::new().backreference(2).to_pattern().unwrap();
        assert_eq!(pattern, r#"\2"#);

        let pattern = Expression::new()
            .backreference_by_name("word")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, r#"\k<word>"#);

        assert!(matches!(
            Expression::new().backreference(0).to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_backreference_disambiguation() {
        let settings = Settings {
            disambiguate_backreferences: true,
            ..Settings::default()
        };

        let pattern = Expression::new()
            .backreference(1)
            .literal("0")
            .to_pattern_with(settings)
            .unwrap();
        assert_eq!(pattern, r#"\1(?:)0"#);
    }

    #[test]
    fn test_named_group_style() {
        let settings = Settings {
            named_group_style: NamedGroupStyle::Apostrophes,
            ..Settings::default()
        };

        let expression = Expression::new()
            .named_group("g", "a")
            .balancing_group(Some("n"), "o", "b")
            .backreference_by_name("g");
        let pattern = expression.to_pattern_with(settings).unwrap();
        assert_eq!(pattern, r#"(?'g'a)(?'n-o'b)\k'g'"#);

        // the default is angle brackets
        let pattern = expression.to_pattern().unwrap();
        assert_eq!(pattern, r#"(?<g>a)(?<n-o>b)\k<g>"#);
    }

    #[test]
    fn test_option_groups() {
        let pattern = Expression::new()
            .with_options(FlagSet::IGNORE_CASE, FlagSet::empty(), "ab")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?i:ab)");

        let pattern = Expression::new()
            .with_options(
                FlagSet::IGNORE_CASE | FlagSet::SINGLELINE,
                FlagSet::MULTILINE,
                "ab",
            )
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?is-m:ab)");

        let pattern = Expression::new()
            .set_options(FlagSet::IGNORE_CASE, FlagSet::IGNORE_WHITESPACE)
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?i-x)");

        assert!(matches!(
            Expression::new()
                .with_options(FlagSet::empty(), FlagSet::empty(), "ab")
                .to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
        assert!(matches!(
            Expression::new()
                .with_options(FlagSet::IGNORE_CASE, FlagSet::IGNORE_CASE, "ab")
                .to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_option_scope_does_not_leak() {
        // inside the `x` group a literal space must be escaped to stay
        // literal; the sibling content after the group is rendered under
        // the original flag state and keeps its bare space
        let pattern = Expression::new()
            .with_options(FlagSet::IGNORE_WHITESPACE, FlagSet::empty(), "a b")
            .literal("c d")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, r#"(?x:a\ b)c d"#);

        // nested scopes restore structurally as well
        let inner = Expression::new()
            .with_options(
                FlagSet::empty(),
                FlagSet::IGNORE_WHITESPACE,
                Expression::new().literal("1 2"),
            )
            .literal("3 4");
        let pattern = Expression::new()
            .with_options(FlagSet::IGNORE_WHITESPACE, FlagSet::empty(), inner)
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, r#"(?x:(?-x:1 2)3\ 4)"#);
    }

    #[test]
    fn test_comments() {
        let pattern = Expression::new()
            .comment("matches a word")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?#matches a word)");

        assert!(matches!(
            Expression::new().comment("oops)").to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_anchors_and_boundaries() {
        use crate::expression::{AnchorAssertionName, BoundaryAssertionName};

        let pattern = Expression::new()
            .anchor(AnchorAssertionName::LineStart)
            .boundary(BoundaryAssertionName::IsBound)
            .literal("ab")
            .anchor(AnchorAssertionName::LineEnd)
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, r#"^\bab$"#);
    }

    #[test]
    fn test_unicode_categories() {
        let pattern = Expression::new()
            .category("Lu")
            .not_category("IsGreek")
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, r#"\p{Lu}\P{IsGreek}"#);

        assert!(matches!(
            Expression::new().category("L u").to_pattern(),
            Err(FluentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_end_to_end_named_group_with_quantifier() {
        // literal "ab", quantified one-or-more, inside a group named "g"
        let pattern = Expression::new()
            .named_group("g", Expression::new().one_or_more("ab"))
            .to_pattern()
            .unwrap();
        assert_eq!(pattern, "(?<g>(?:ab)+)");
    }

    #[test]
    fn test_end_to_end_hex_color() {
        let hex_pair = || {
            Expression::new().repeat(CharSet::new().range('0', '9').range('a', 'f').range('A', 'F'), 2)
        };

        let pattern = Expression::new()
            .char('#')
            .named_group("red", hex_pair())
            .named_group("green", hex_pair())
            .named_group("blue", hex_pair())
            .to_pattern()
            .unwrap();
        assert_eq!(
            pattern,
            "#(?<red>[0-9a-fA-F]{2})(?<green>[0-9a-fA-F]{2})(?<blue>[0-9a-fA-F]{2})"
        );
    }
}
