use pest::Parser;
use pest::error::{Error as PestError, LineColLocation};
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;
use serde_json::{Map, Value};

use super::{DEFAULT_PARSER_NAME, MAX_NESTING_DEPTH};
use crate::{
    Declaration, Element, GrammarError, GrammarResult, Section, SectionIndex, SectionKind,
    SourceInformation,
};

#[derive(Parser)]
#[grammar = "pure/pure.pest"]
struct PureParser;

/// Parses a whole document. Declarations come first, in text order, followed
/// by a single section index when the text has section headers or imports.
pub(crate) fn parse_document(text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>> {
    check_nesting(text)?;
    let mut pairs = PureParser::parse(Rule::document, text).map_err(from_pest)?;
    let Some(document) = pairs.next() else {
        return Err(GrammarError::parse_at("empty parse tree", (1, 1)));
    };

    let mut declarations = Vec::new();
    let mut sections = Vec::new();
    let mut has_header = false;

    for pair in document.into_inner() {
        match pair.as_rule() {
            Rule::leading_section => {
                let (section, mut parsed) = build_section(pair, keep_source_info)?;
                let has_content = !section.elements.is_empty() || section.kind != SectionKind::Default;
                if has_content {
                    sections.push(section);
                }
                declarations.append(&mut parsed);
            }
            Rule::section => {
                has_header = true;
                let (section, mut parsed) = build_section(pair, keep_source_info)?;
                sections.push(section);
                declarations.append(&mut parsed);
            }
            _ => {}
        }
    }

    let has_imports = sections
        .iter()
        .any(|s| s.imports().is_some_and(|imports| !imports.is_empty()));

    let mut elements: Vec<Element> = declarations.into_iter().map(Element::Declaration).collect();
    if has_header || has_imports {
        elements.push(Element::SectionIndex(SectionIndex::new(sections)));
    }
    Ok(elements)
}

fn build_section(
    pair: Pair<'_, Rule>,
    keep_source_info: bool,
) -> GrammarResult<(Section, Vec<Declaration>)> {
    let source_information = keep_source_info.then(|| source_information(&pair));
    let is_leading = pair.as_rule() == Rule::leading_section;

    let mut parser_name = DEFAULT_PARSER_NAME.to_string();
    let mut imports = Vec::new();
    let mut declarations = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::section_header => {
                if let Some(name) = inner.into_inner().next() {
                    parser_name = name.as_str().to_string();
                }
            }
            Rule::import_statement => {
                let path = inner
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::import_path)
                    .map(|p| p.as_str().trim_end_matches("::*").to_string());
                imports.extend(path);
            }
            Rule::declaration => declarations.push(build_declaration(inner, keep_source_info)?),
            _ => {}
        }
    }

    let elements = declarations.iter().map(|d| d.path.clone()).collect();
    let kind = if is_leading && imports.is_empty() {
        SectionKind::Default
    } else {
        SectionKind::ImportAware { imports }
    };
    let section = Section {
        parser_name,
        elements,
        kind,
        source_information,
    };
    Ok((section, declarations))
}

fn build_declaration(pair: Pair<'_, Rule>, keep_source_info: bool) -> GrammarResult<Declaration> {
    let source_information = keep_source_info.then(|| source_information(&pair));
    let position = pair.line_col();
    let mut inner = pair.into_inner();

    let kind = next_pair(&mut inner, "element kind", position)?.as_str().to_string();
    let path = next_pair(&mut inner, "element path", position)?.as_str().to_string();
    let body = match build_value(next_pair(&mut inner, "element body", position)?, 1)? {
        Value::Object(map) => map,
        _ => return Err(GrammarError::parse_at("element body must be an object", position)),
    };

    Ok(Declaration {
        kind,
        path,
        body,
        source_information,
    })
}

/// `depth` counts the containers enclosing `pair`, itself included; the
/// declaration body is depth 1.
fn build_value(pair: Pair<'_, Rule>, depth: usize) -> GrammarResult<Value> {
    let is_container = matches!(pair.as_rule(), Rule::object | Rule::array);
    if is_container && depth > MAX_NESTING_DEPTH {
        return Err(too_deep(pair.line_col()));
    }
    match pair.as_rule() {
        Rule::object => {
            let mut map = Map::new();
            for member in pair.into_inner() {
                let position = member.line_col();
                let mut kv = member.into_inner();
                let key = decode_scalar(next_pair(&mut kv, "member name", position)?)?;
                let Value::String(key) = key else {
                    return Err(GrammarError::parse_at("member name must be a string", position));
                };
                let value = build_value(next_pair(&mut kv, "member value", position)?, depth + 1)?;
                map.insert(key, value);
            }
            Ok(Value::Object(map))
        }
        Rule::array => pair
            .into_inner()
            .map(|item| build_value(item, depth + 1))
            .collect::<GrammarResult<Vec<_>>>()
            .map(Value::Array),
        _ => decode_scalar(pair),
    }
}

/// Rejects text whose brackets nest deeper than [`MAX_NESTING_DEPTH`] before
/// the recursive descent of the pest parser sees it. Brackets inside string
/// literals and comments do not count.
fn check_nesting(text: &str) -> GrammarResult<()> {
    enum Scan {
        Code,
        Str,
        Escape,
        LineComment,
        BlockComment,
    }

    let mut scan = Scan::Code;
    let mut depth = 0usize;
    let mut prev = '\0';
    for (offset, c) in text.char_indices() {
        match scan {
            Scan::Code => match c {
                '"' => scan = Scan::Str,
                '/' if prev == '/' => {
                    scan = Scan::LineComment;
                    prev = '\0';
                    continue;
                }
                '*' if prev == '/' => {
                    scan = Scan::BlockComment;
                    prev = '\0';
                    continue;
                }
                '{' | '[' => {
                    depth += 1;
                    if depth > MAX_NESTING_DEPTH {
                        return Err(too_deep(line_col_at(text, offset)));
                    }
                }
                '}' | ']' => depth = depth.saturating_sub(1),
                _ => {}
            },
            Scan::Str => match c {
                '\\' => scan = Scan::Escape,
                '"' => scan = Scan::Code,
                _ => {}
            },
            Scan::Escape => scan = Scan::Str,
            Scan::LineComment => {
                if c == '\n' {
                    scan = Scan::Code;
                }
            }
            Scan::BlockComment => {
                if c == '/' && prev == '*' {
                    scan = Scan::Code;
                    prev = '\0';
                    continue;
                }
            }
        }
        prev = c;
    }
    Ok(())
}

fn too_deep(position: (usize, usize)) -> GrammarError {
    GrammarError::parse_at(
        format!("nesting exceeds {MAX_NESTING_DEPTH} levels"),
        position,
    )
}

/// 1-based line and column (in chars) of a byte offset.
fn line_col_at(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}

/// Strings, numbers and literals share JSON's lexical syntax, so serde_json decodes them.
fn decode_scalar(pair: Pair<'_, Rule>) -> GrammarResult<Value> {
    serde_json::from_str(pair.as_str())
        .map_err(|e| GrammarError::parse_at(format!("invalid literal: {e}"), pair.line_col()))
}

fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    what: &str,
    position: (usize, usize),
) -> GrammarResult<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| GrammarError::parse_at(format!("missing {what}"), position))
}

fn source_information(pair: &Pair<'_, Rule>) -> SourceInformation {
    let span = pair.as_span();
    let (start_line, start_column) = span.start_pos().line_col();
    let (end_line, end_column) = span.end_pos().line_col();
    SourceInformation {
        start_line,
        start_column,
        end_line,
        end_column,
    }
}

fn from_pest(e: PestError<Rule>) -> GrammarError {
    let position = match e.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    GrammarError::parse_at(e.variant.message().into_owned(), position)
}
