//! The reference Pure grammar engine.

mod composer;
mod parser;

use tracing::debug;

use crate::{Element, GrammarEngine, GrammarResult};

pub use composer::RenderStyle;

/// Parser name of sections that carry no explicit `###` header.
pub const DEFAULT_PARSER_NAME: &str = "Pure";

/// Deepest container nesting that parse and compose accept, counting the
/// declaration body as level 1. Matches serde_json's recursion limit.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Pest-backed engine for the Pure model text format. Stateless, so one
/// instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureGrammar {
    render_style: RenderStyle,
}

impl PureGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_style(render_style: RenderStyle) -> Self {
        Self { render_style }
    }

    pub fn render_style(&self) -> RenderStyle {
        self.render_style
    }
}

impl GrammarEngine for PureGrammar {
    fn parse(&self, text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>> {
        let elements = parser::parse_document(text, keep_source_info)?;
        debug!(elements = elements.len(), bytes = text.len(), "Parsed model text");
        Ok(elements)
    }

    fn compose(&self, elements: &[Element]) -> GrammarResult<String> {
        let text = composer::compose_elements(elements, self.render_style)?;
        debug!(elements = elements.len(), bytes = text.len(), "Composed model text");
        Ok(text)
    }
}
