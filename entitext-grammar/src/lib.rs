//! Grammar side of entitext.
//!
//! - [`Element`]: one parsed unit: either a [`Declaration`] (the textual
//!   counterpart of an entity) or a [`SectionIndex`] (metadata grouping the
//!   parsed sections and their imports)
//! - [`GrammarEngine`]: text → elements and elements → text
//! - [`ExclusiveEngine`]: adapter serializing access to engines that are not reentrant
//! - [`PureGrammar`]: the reference engine, backed by a pest grammar
//!
//! # Text format
//!
//! ```text
//! ###Pure
//! import model::common::*;
//!
//! Class model::domain::Person
//! {
//!   "properties": []
//! }
//! ```
//!
//! Section headers and imports are optional; declarations are
//! `Kind package::name` followed by a JSON object body.

mod element;
mod engine;
mod error;
pub mod pure;

pub use element::{
    Declaration, Element, SECTION_INDEX_PATH, Section, SectionIndex, SectionKind,
    SourceInformation,
};
pub use engine::{ExclusiveEngine, GrammarEngine, GrammarEngineMut};
pub use error::{GrammarError, GrammarResult};
pub use pure::{DEFAULT_PARSER_NAME, MAX_NESTING_DEPTH, PureGrammar, RenderStyle};
