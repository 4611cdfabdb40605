//! Entity model for entitext.
//!
//! Defines the record the codec persists as text:
//! - [`Entity`]: classifier path, logical path and an opaque JSON content map
//! - path helpers for the `package::name` notation shared by entities and
//!   grammar elements
//!
//! Entities are owned by the caller. Nothing in this crate knows about the
//! textual grammar; see `entitext-grammar` and `entitext-codec` for that.

mod entity;
pub mod path;

pub use entity::Entity;
pub use path::{PATH_SEPARATOR, is_valid_path, join_path, split_path};
