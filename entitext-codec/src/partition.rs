use entitext_grammar::{Element, SectionIndex};

use crate::{CodecResult, validate_section_index};

/// A batch parse result split into metadata and content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Every section index found, each already validated.
    pub metadata: Vec<SectionIndex>,
    /// Content elements in parse order.
    pub content: Vec<Element>,
}

/// Splits a multi-entity parse result. Any number of section indexes may
/// appear anywhere; all of them are validated before anything is returned.
pub fn partition(elements: Vec<Element>) -> CodecResult<Partition> {
    let mut partition = Partition::default();
    for element in elements {
        match element {
            Element::SectionIndex(index) => partition.metadata.push(index),
            content => partition.content.push(content),
        }
    }
    for index in &partition.metadata {
        validate_section_index(index)?;
    }
    Ok(partition)
}
