//! Commands behind the `entitext` binary.
//!
//! Entities are read and printed as JSON (`path`, `classifierPath`,
//! `content`); model text goes through an [`EntityTextCodec`].

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use entitext_codec::{CodecConfig, EntityTextCodec, EntityTextSerializer};
use entitext_model::Entity;
use tracing::{debug, info};

/// Builds the codec from `config`, or the default Pure codec when none is given.
pub fn load_codec(config: Option<&Path>) -> Result<EntityTextCodec> {
    let Some(path) = config else {
        return Ok(EntityTextCodec::pure());
    };
    let config = CodecConfig::load_from(path)
        .with_context(|| format!("Failed to load codec config from {}", path.display()))?;
    EntityTextCodec::from_config(&config).context("Invalid codec config")
}

/// Reads one entity from a JSON file.
pub fn read_entity(path: &Path) -> Result<Entity> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not an entity JSON document", path.display()))
}

/// Serializes each entity file to `out`, one after another.
///
/// The output of several files concatenates into text that
/// [`EntityTextSerializer::deserialize_many`] reads back.
pub fn serialize_files(
    codec: &EntityTextCodec,
    paths: &[impl AsRef<Path>],
    out: &mut dyn Write,
) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        let entity = read_entity(path)?;
        codec
            .serialize(&entity, out)
            .with_context(|| format!("Failed to serialize {}", entity.path))?;
        debug!(entity_path = %entity.path, file = %path.display(), "Serialized entity");
    }
    Ok(())
}

/// Deserializes a model text file and renders the result as pretty JSON.
///
/// With `many`, the file may hold any number of entities and the result is a
/// JSON array; otherwise it must hold exactly one.
pub fn deserialize_file(codec: &EntityTextCodec, path: &Path, many: bool) -> Result<String> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let json = if many {
        let entities = codec
            .deserialize_many(&contents)
            .with_context(|| format!("Failed to deserialize {}", path.display()))?;
        info!(file = %path.display(), entities = entities.len(), "Deserialized model text");
        serde_json::to_string_pretty(&entities)?
    } else {
        let entity = codec
            .deserialize(&contents)
            .with_context(|| format!("Failed to deserialize {}", path.display()))?;
        serde_json::to_string_pretty(&entity)?
    };
    Ok(json)
}

/// Probes each entity file, returning `(entity path, serializable)` pairs in input order.
pub fn check_files(codec: &EntityTextCodec, paths: &[impl AsRef<Path>]) -> Result<Vec<(String, bool)>> {
    paths
        .iter()
        .map(|path| {
            let entity = read_entity(path.as_ref())?;
            let supported = codec.can_serialize(&entity);
            Ok::<_, anyhow::Error>((entity.path, supported))
        })
        .collect()
}
