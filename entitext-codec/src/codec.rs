use std::slice;

use entitext_grammar::{Element, GrammarEngine, PureGrammar};
use entitext_model::Entity;
use tracing::debug;

use crate::{
    ClassifierConverter, CodecConfig, CodecError, CodecResult, ElementConverter,
    EntityTextSerializer, Partition, classify, partition, probe,
};

/// Name and file extension of the Pure text format.
pub const PURE_FORMAT_NAME: &str = "pure";

/// Entity text codec over a grammar engine and an element converter.
///
/// Holds no state besides its collaborators, which are configured once and
/// only read afterwards. Sharing one codec across threads is as safe as the
/// collaborators are reentrant, which their `Send + Sync` bounds require.
#[derive(Debug, Clone)]
pub struct EntityTextCodec<E = PureGrammar, C = ClassifierConverter> {
    name: String,
    file_extension: String,
    engine: E,
    converter: C,
}

impl EntityTextCodec {
    /// The Pure format with the standard taxonomy and pretty rendering.
    pub fn pure() -> Self {
        Self::new(PureGrammar::new(), ClassifierConverter::standard())
    }

    /// Builds the Pure format as described by `config`.
    pub fn from_config(config: &CodecConfig) -> CodecResult<Self> {
        config.validate()?;
        let converter = ClassifierConverter::standard().with_mappings(config.classifiers.clone())?;
        let engine = PureGrammar::with_render_style(config.render_style);
        Ok(Self::new(engine, converter).with_format(&config.name, &config.file_extension))
    }
}

impl Default for EntityTextCodec {
    fn default() -> Self {
        Self::pure()
    }
}

impl<E, C> EntityTextCodec<E, C>
where
    E: GrammarEngine,
    C: ElementConverter,
{
    pub fn new(engine: E, converter: C) -> Self {
        Self {
            name: PURE_FORMAT_NAME.to_string(),
            file_extension: PURE_FORMAT_NAME.to_string(),
            engine,
            converter,
        }
    }

    /// Overrides the format name and default file extension.
    pub fn with_format(mut self, name: &str, file_extension: &str) -> Self {
        self.name = name.to_string();
        self.file_extension = file_extension.to_string();
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub(crate) fn compose_element(&self, element: Element) -> CodecResult<String> {
        self.engine
            .compose(slice::from_ref(&element))
            .map_err(CodecError::ComposeFailure)
    }

    fn parse(&self, content: &str) -> CodecResult<Vec<Element>> {
        // Source positions would otherwise end up in the deserialized model.
        self.engine
            .parse(content, false)
            .map_err(CodecError::ParseFailure)
    }
}

impl<E, C> EntityTextSerializer for EntityTextCodec<E, C>
where
    E: GrammarEngine,
    C: ElementConverter,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn default_file_extension(&self) -> &str {
        &self.file_extension
    }

    fn can_serialize(&self, entity: &Entity) -> bool {
        probe::can_serialize(self, entity)
    }

    fn serialize_to_string(&self, entity: &Entity) -> CodecResult<String> {
        let element = self.converter.from_entity(entity)?;
        self.compose_element(element)
    }

    fn deserialize(&self, content: &str) -> CodecResult<Entity> {
        let element = classify(self.parse(content)?)?;
        self.converter.to_entity(&element)
    }

    fn deserialize_many(&self, content: &str) -> CodecResult<Vec<Entity>> {
        let Partition { metadata, content } = partition(self.parse(content)?)?;
        debug!(
            section_indexes = metadata.len(),
            elements = content.len(),
            "Partitioned model text"
        );
        content
            .iter()
            .map(|element| self.converter.to_entity(element))
            .collect()
    }
}
