use entitext_model::is_valid_path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::MAX_NESTING_DEPTH;
use crate::{Declaration, Element, GrammarError, GrammarResult, Section, SectionIndex};

/// How declaration bodies are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Indented, one member per line.
    #[default]
    Pretty,
    /// Whole body on one line.
    Standard,
}

pub(crate) fn compose_elements(elements: &[Element], style: RenderStyle) -> GrammarResult<String> {
    let mut declarations = Vec::new();
    let mut index: Option<&SectionIndex> = None;
    for element in elements {
        match element {
            Element::Declaration(declaration) => declarations.push(declaration),
            Element::SectionIndex(section_index) => {
                if index.replace(section_index).is_some() {
                    return Err(GrammarError::Compose(
                        "cannot compose more than one section index".into(),
                    ));
                }
            }
        }
    }

    let mut chunks = Vec::new();
    match index {
        None => {
            for declaration in declarations {
                chunks.push(render_declaration(declaration, style)?);
            }
        }
        Some(index) => {
            let mut remaining: Vec<Option<&Declaration>> = declarations.into_iter().map(Some).collect();
            let mut grouped = Vec::new();
            for section in &index.sections {
                let mut members = Vec::new();
                for path in &section.elements {
                    let slot = remaining
                        .iter_mut()
                        .find(|d| d.is_some_and(|d| &d.path == path))
                        .and_then(Option::take);
                    if let Some(declaration) = slot {
                        members.push(declaration);
                    }
                }
                grouped.push((section, members));
            }

            // Declarations no section claims go first, outside any header.
            for declaration in remaining.into_iter().flatten() {
                chunks.push(render_declaration(declaration, style)?);
            }
            for (section, members) in grouped {
                if let Some(head) = render_section_head(section)? {
                    chunks.push(head);
                }
                for declaration in members {
                    chunks.push(render_declaration(declaration, style)?);
                }
            }
        }
    }

    if chunks.is_empty() {
        return Ok(String::new());
    }
    let mut text = chunks.join("\n\n");
    text.push('\n');
    Ok(text)
}

fn render_section_head(section: &Section) -> GrammarResult<Option<String>> {
    let mut lines = Vec::new();
    match section.imports() {
        // The implicit leading section has no header line.
        None => {}
        Some(_) => {
            if !is_valid_path(&section.parser_name) || section.parser_name.contains("::") {
                return Err(GrammarError::Compose(format!(
                    "invalid section parser name: {:?}",
                    section.parser_name
                )));
            }
            lines.push(format!("###{}", section.parser_name));
        }
    }
    for import in section.imports().unwrap_or_default() {
        if !is_valid_path(import) {
            return Err(GrammarError::Compose(format!("invalid import path: {import:?}")));
        }
        lines.push(format!("import {import}::*;"));
    }
    Ok((!lines.is_empty()).then(|| lines.join("\n")))
}

fn render_declaration(declaration: &Declaration, style: RenderStyle) -> GrammarResult<String> {
    if !is_valid_path(&declaration.kind) || declaration.kind.contains("::") {
        return Err(GrammarError::Compose(format!(
            "invalid element kind: {:?}",
            declaration.kind
        )));
    }
    if !is_valid_path(&declaration.path) {
        return Err(GrammarError::Compose(format!(
            "invalid element path: {:?}",
            declaration.path
        )));
    }

    if exceeds_depth(&declaration.body, MAX_NESTING_DEPTH) {
        return Err(GrammarError::Compose(format!(
            "body of {} nests deeper than {MAX_NESTING_DEPTH} levels",
            declaration.path
        )));
    }

    let body = Value::Object(declaration.body.clone());
    let rendered = match style {
        RenderStyle::Pretty => serde_json::to_string_pretty(&body),
        RenderStyle::Standard => serde_json::to_string(&body),
    }
    .map_err(|e| GrammarError::Compose(format!("cannot render body of {}: {e}", declaration.path)))?;

    Ok(format!("{} {}\n{}", declaration.kind, declaration.path, rendered))
}

/// Whether any container in `body` sits deeper than `limit`, the body being
/// level 1. Iterative, so the walk itself has no depth limit.
fn exceeds_depth(body: &Map<String, Value>, limit: usize) -> bool {
    let mut pending: Vec<(&Value, usize)> = body.values().map(|v| (v, 2)).collect();
    while let Some((value, depth)) = pending.pop() {
        let children: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(members) => members.values().collect(),
            _ => continue,
        };
        if depth > limit {
            return true;
        }
        pending.extend(children.into_iter().map(|child| (child, depth + 1)));
    }
    false
}
