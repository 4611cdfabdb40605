use entitext_grammar::Element;

use crate::{CodecError, CodecResult, validate_section_index};

/// Selects the content element of a single-entity parse.
///
/// | elements | outcome |
/// |---|---|
/// | none | `NoContentFound` |
/// | one section index | `NoContentFound` |
/// | one declaration | that declaration |
/// | section index + other, either order | index validated, then the other (`NoContentFound` if it is also an index) |
/// | two declarations | `TooManyContentElements { found: 2 }` |
/// | three or more, `m` indexes | `AmbiguousMetadata { found: m }` if `m > 1`, else `TooManyContentElements` |
///
/// Section indexes are validated only in the two-element case. A parse of
/// three or more elements fails on its counts alone, so an import-bearing
/// index there surfaces as `TooManyContentElements` or `AmbiguousMetadata`,
/// never as `ImportsUnsupported`.
pub fn classify(elements: Vec<Element>) -> CodecResult<Element> {
    let mut elements = elements.into_iter();
    match (elements.next(), elements.next(), elements.next()) {
        (None, _, _) => Err(CodecError::NoContentFound),

        (Some(Element::SectionIndex(_)), None, _) => Err(CodecError::NoContentFound),
        (Some(content), None, _) => Ok(content),

        (Some(Element::SectionIndex(index)), Some(second), None) => {
            validate_section_index(&index)?;
            match second {
                Element::SectionIndex(_) => Err(CodecError::NoContentFound),
                content => Ok(content),
            }
        }
        (Some(content), Some(Element::SectionIndex(index)), None) => {
            validate_section_index(&index)?;
            Ok(content)
        }
        (Some(_), Some(_), None) => Err(CodecError::TooManyContentElements { found: 2 }),

        (Some(first), Some(second), Some(third)) => {
            let total = 3 + elements.len();
            let metadata = [&first, &second, &third]
                .into_iter()
                .chain(elements.as_slice())
                .filter(|e| e.is_section_index())
                .count();
            if metadata > 1 {
                Err(CodecError::AmbiguousMetadata { found: metadata })
            } else {
                Err(CodecError::TooManyContentElements {
                    found: total - metadata,
                })
            }
        }
    }
}
