use std::io::{Read, Write};

use entitext_model::Entity;

use crate::CodecResult;

/// A named text format for entities.
///
/// Hosts may register several serializers and pick one per entity with
/// [`can_serialize`](Self::can_serialize), so the trait is object safe.
pub trait EntityTextSerializer: Send + Sync {
    /// Short format name (e.g., "pure").
    fn name(&self) -> &str;

    /// File extension without the leading dot.
    fn default_file_extension(&self) -> &str;

    /// Whether `entity` survives a serialize/deserialize round trip. Never fails.
    fn can_serialize(&self, entity: &Entity) -> bool;

    fn serialize_to_string(&self, entity: &Entity) -> CodecResult<String>;

    /// UTF-8 bytes of [`serialize_to_string`](Self::serialize_to_string).
    fn serialize_to_bytes(&self, entity: &Entity) -> CodecResult<Vec<u8>> {
        Ok(self.serialize_to_string(entity)?.into_bytes())
    }

    fn serialize(&self, entity: &Entity, writer: &mut dyn Write) -> CodecResult<()> {
        let text = self.serialize_to_string(entity)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Deserializes text that holds exactly one entity.
    fn deserialize(&self, content: &str) -> CodecResult<Entity>;

    /// Reads all of `reader` as UTF-8 and deserializes one entity.
    fn deserialize_reader(&self, reader: &mut dyn Read) -> CodecResult<Entity> {
        let content = std::io::read_to_string(reader)?;
        self.deserialize(&content)
    }

    /// Deserializes every entity in `content`, in text order.
    fn deserialize_many(&self, content: &str) -> CodecResult<Vec<Entity>>;

    fn deserialize_many_reader(&self, reader: &mut dyn Read) -> CodecResult<Vec<Entity>> {
        let content = std::io::read_to_string(reader)?;
        self.deserialize_many(&content)
    }
}
