use serde_json::{Map, Value};

/// Path under which parsers publish their section index.
pub const SECTION_INDEX_PATH: &str = "__internal__::SectionIndex";

/// A single named unit of grammar text.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A declaration that corresponds to one entity.
    Declaration(Declaration),
    /// Metadata describing the sections of the parsed text. Never an entity.
    SectionIndex(SectionIndex),
}

impl Element {
    pub fn path(&self) -> &str {
        match self {
            Element::Declaration(declaration) => &declaration.path,
            Element::SectionIndex(index) => &index.path,
        }
    }

    pub fn is_section_index(&self) -> bool {
        matches!(self, Element::SectionIndex(_))
    }

    pub fn as_section_index(&self) -> Option<&SectionIndex> {
        match self {
            Element::SectionIndex(index) => Some(index),
            Element::Declaration(_) => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Element::Declaration(declaration) => Some(declaration),
            Element::SectionIndex(_) => None,
        }
    }
}

impl From<Declaration> for Element {
    fn from(declaration: Declaration) -> Self {
        Element::Declaration(declaration)
    }
}

impl From<SectionIndex> for Element {
    fn from(index: SectionIndex) -> Self {
        Element::SectionIndex(index)
    }
}

/// `Kind package::name { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Grammar keyword introducing the declaration (e.g. `Class`, `Enum`).
    pub kind: String,
    pub path: String,
    pub body: Map<String, Value>,
    /// Only populated when the parser was asked to keep source information.
    pub source_information: Option<SourceInformation>,
}

impl Declaration {
    pub fn new(kind: impl Into<String>, path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
            body,
            source_information: None,
        }
    }
}

/// Groups the sections a parse produced, in text order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionIndex {
    pub path: String,
    pub sections: Vec<Section>,
}

impl SectionIndex {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            path: SECTION_INDEX_PATH.to_string(),
            sections,
        }
    }
}

impl Default for SectionIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// One `###Parser` block of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub parser_name: String,
    /// Paths of the declarations in this section, in text order.
    pub elements: Vec<String>,
    pub kind: SectionKind,
    pub source_information: Option<SourceInformation>,
}

impl Section {
    /// A section that cannot declare imports.
    pub fn plain(parser_name: impl Into<String>, elements: Vec<String>) -> Self {
        Self {
            parser_name: parser_name.into(),
            elements,
            kind: SectionKind::Default,
            source_information: None,
        }
    }

    /// A section that may declare imports (possibly none).
    pub fn import_aware(
        parser_name: impl Into<String>,
        imports: Vec<String>,
        elements: Vec<String>,
    ) -> Self {
        Self {
            parser_name: parser_name.into(),
            elements,
            kind: SectionKind::ImportAware { imports },
            source_information: None,
        }
    }

    /// Imported packages, or `None` if this section kind has no import capability.
    pub fn imports(&self) -> Option<&[String]> {
        match &self.kind {
            SectionKind::ImportAware { imports } => Some(imports),
            SectionKind::Default => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    /// The implicit leading section of a text without headers or imports.
    Default,
    /// A section that carries `import package::*;` statements (as package paths).
    ImportAware { imports: Vec<String> },
}

/// 1-based line/column span in the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInformation {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}
