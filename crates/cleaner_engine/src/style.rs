//! Inline `style` attribute edits.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};
use ego_tree::NodeId;

use crate::dom::Document;
use crate::types::DomError;

impl Document {
    /// Sets one declaration of the inline `style` attribute, leaving the others.
    pub fn set_style_property(
        &mut self,
        id: NodeId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let current = self.element(id)?.attr("style").unwrap_or_default();
        let merged = merge_declaration(current, property, value);
        self.set_attr(id, "style", &merged)
    }

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.element(id).ok()?.attr("style")?;
        declarations(style)
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }
}

type StyleDeclaration = (String, String);

/// Keeps each declaration's value as written; invalid ones are dropped.
struct InlineStyle;

impl<'i> DeclarationParser<'i> for InlineStyle {
    type Declaration = StyleDeclaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<StyleDeclaration, ParseError<'i, ()>> {
        let start = input.position();
        while input.next().is_ok() {}
        let value = input.slice_from(start).trim();
        Ok((name.to_ascii_lowercase(), value.to_string()))
    }
}

impl AtRuleParser<'_> for InlineStyle {
    type Prelude = ();
    type AtRule = StyleDeclaration;
    type Error = ();
}

impl QualifiedRuleParser<'_> for InlineStyle {
    type Prelude = ();
    type QualifiedRule = StyleDeclaration;
    type Error = ();
}

impl RuleBodyItemParser<'_, StyleDeclaration, ()> for InlineStyle {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

fn declarations(style: &str) -> Vec<StyleDeclaration> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut inline_style = InlineStyle;
    let body: RuleBodyParser<'_, '_, '_, InlineStyle, StyleDeclaration, ()> =
        RuleBodyParser::new(&mut parser, &mut inline_style);
    body.filter_map(Result::ok).collect()
}

fn merge_declaration(style: &str, property: &str, value: &str) -> String {
    let mut out = String::new();
    let mut replaced = false;
    for (name, existing) in declarations(style) {
        let existing = if name.eq_ignore_ascii_case(property) {
            replaced = true;
            value
        } else {
            existing.as_str()
        };
        out.push_str(&format!("{name}: {existing}; "));
    }
    if !replaced {
        out.push_str(&format!("{property}: {value}; "));
    }
    out.trim_end().to_string()
}
