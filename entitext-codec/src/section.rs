use entitext_grammar::{Section, SectionIndex};

use crate::{CodecError, CodecResult};

/// Rejects a section index if any of its sections declares imports.
///
/// Sections without import capability, and import-aware sections with an
/// empty import list, are fine.
pub fn validate_section_index(index: &SectionIndex) -> CodecResult<()> {
    if index.sections.iter().any(has_imports) {
        return Err(CodecError::ImportsUnsupported);
    }
    Ok(())
}

fn has_imports(section: &Section) -> bool {
    section.imports().is_some_and(|imports| !imports.is_empty())
}
