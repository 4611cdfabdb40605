//! Bidirectional text codec between [`Entity`] records and grammar text.
//!
//! The grammar itself (tokenizing, parsing, pretty-printing) belongs to a
//! [`GrammarEngine`]; the structural mapping between one entity and one
//! element belongs to an [`ElementConverter`]. This crate owns what sits
//! between them:
//!
//! - [`classify`]: picks the single content element out of a parse result
//!   and tolerates at most one section index
//! - [`partition`]: splits a batch parse result into section indexes and
//!   content elements, with no limit on section indexes
//! - [`validate_section_index`]: rejects section indexes that declare imports
//! - [`EntityTextCodec`]: the facade over serialize, deserialize,
//!   deserialize many, and the round-trip probe behind `can_serialize`
//!
//! # Example
//!
//! ```
//! use entitext_codec::{EntityTextCodec, EntityTextSerializer};
//! use entitext_model::Entity;
//! use serde_json::json;
//!
//! let codec = EntityTextCodec::pure();
//! let content = json!({
//!     "_type": "class",
//!     "package": "model::domain",
//!     "name": "Person",
//!     "properties": []
//! });
//! let entity = Entity::new(
//!     "model::domain::Person",
//!     "meta::pure::metamodel::type::Class",
//!     content.as_object().cloned().unwrap_or_default(),
//! );
//!
//! assert!(codec.can_serialize(&entity));
//! let text = codec.serialize_to_string(&entity).unwrap();
//! assert_eq!(codec.deserialize(&text).unwrap(), entity);
//! ```

mod classify;
mod codec;
mod config;
pub mod convert;
mod error;
mod partition;
mod probe;
mod section;
mod serializer;

pub use classify::classify;
pub use codec::EntityTextCodec;
pub use config::CodecConfig;
pub use convert::{ClassifierConverter, ClassifierMapping, ElementConverter};
pub use error::{CodecError, CodecResult};
pub use partition::{Partition, partition};
pub use section::validate_section_index;
pub use serializer::EntityTextSerializer;

pub use entitext_grammar::{Element, GrammarEngine, PureGrammar, RenderStyle, SectionIndex};
pub use entitext_model::Entity;
