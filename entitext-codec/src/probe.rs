//! Empirical support check behind `can_serialize`.

use entitext_grammar::GrammarEngine;
use entitext_model::Entity;
use tracing::{debug, error, warn};

use crate::{CodecError, ElementConverter, EntityTextCodec, EntityTextSerializer};

/// Why a probe gave up. Never leaves this module.
enum ProbeFailure {
    UnsupportedClassifier,
    Declined,
    Compose(CodecError),
    RoundTrip(CodecError),
}

/// Serializes `entity` and deserializes the result, reporting only whether
/// both directions complete. The reconstructed entity is not compared.
pub(crate) fn can_serialize<E, C>(codec: &EntityTextCodec<E, C>, entity: &Entity) -> bool
where
    E: GrammarEngine,
    C: ElementConverter,
{
    match round_trip(codec, entity) {
        Ok(()) => true,
        Err(ProbeFailure::UnsupportedClassifier) => {
            debug!(
                entity_path = %entity.path,
                classifier_path = %entity.classifier_path,
                "Classifier not supported"
            );
            false
        }
        Err(ProbeFailure::Declined) => {
            debug!(entity_path = %entity.path, "Converter declined entity");
            false
        }
        Err(ProbeFailure::Compose(e)) => {
            warn!(
                entity_path = %entity.path,
                serializer = codec.name(),
                error = %e,
                "Unable to serialize entity"
            );
            false
        }
        Err(ProbeFailure::RoundTrip(e)) => {
            error!(
                entity_path = %entity.path,
                serializer = codec.name(),
                error = %e,
                "Unable to deserialize entity after serializing it"
            );
            false
        }
    }
}

fn round_trip<E, C>(codec: &EntityTextCodec<E, C>, entity: &Entity) -> Result<(), ProbeFailure>
where
    E: GrammarEngine,
    C: ElementConverter,
{
    let converter = codec.converter();
    if !converter.is_supported_classifier(&entity.classifier_path) {
        return Err(ProbeFailure::UnsupportedClassifier);
    }
    let element = converter
        .from_entity_if_possible(entity)
        .ok_or(ProbeFailure::Declined)?;
    let text = codec
        .compose_element(element)
        .map_err(ProbeFailure::Compose)?;
    codec.deserialize(&text).map_err(ProbeFailure::RoundTrip)?;
    Ok(())
}
