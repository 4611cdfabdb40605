//! Structural mapping between one entity and one grammar element.

use std::collections::HashSet;
use std::sync::Arc;

use entitext_grammar::{Declaration, Element};
use entitext_model::{Entity, is_valid_path, join_path, split_path};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{CodecError, CodecResult};

/// Content key holding the classifier's type tag.
pub const TYPE_KEY: &str = "_type";
/// Content key holding the package part of the entity path.
pub const PACKAGE_KEY: &str = "package";
/// Content key holding the simple name of the entity.
pub const NAME_KEY: &str = "name";

/// Maps entities to grammar elements and back.
///
/// Like [`entitext_grammar::GrammarEngine`], implementations are shared
/// across threads and called through `&self`.
pub trait ElementConverter: Send + Sync {
    /// Whether entities of this classifier have a grammar representation at all.
    fn is_supported_classifier(&self, classifier_path: &str) -> bool;

    /// Converts an entity, failing if its classifier or content cannot be represented.
    fn from_entity(&self, entity: &Entity) -> CodecResult<Element>;

    /// Like [`from_entity`](Self::from_entity), but declines with `None` instead of failing.
    fn from_entity_if_possible(&self, entity: &Entity) -> Option<Element> {
        self.from_entity(entity).ok()
    }

    /// Converts a content element back into an entity.
    fn to_entity(&self, element: &Element) -> CodecResult<Entity>;
}

impl<C: ElementConverter + ?Sized> ElementConverter for Arc<C> {
    fn is_supported_classifier(&self, classifier_path: &str) -> bool {
        (**self).is_supported_classifier(classifier_path)
    }

    fn from_entity(&self, entity: &Entity) -> CodecResult<Element> {
        (**self).from_entity(entity)
    }

    fn from_entity_if_possible(&self, entity: &Entity) -> Option<Element> {
        (**self).from_entity_if_possible(entity)
    }

    fn to_entity(&self, element: &Element) -> CodecResult<Entity> {
        (**self).to_entity(element)
    }
}

/// One classifier of the taxonomy and how it appears in text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierMapping {
    /// Entity classifier (e.g. `meta::pure::metamodel::type::Class`).
    pub classifier_path: String,
    /// Grammar keyword (e.g. `Class`).
    pub element_kind: String,
    /// Value of `_type` in entity content (e.g. `class`).
    pub type_tag: String,
}

impl ClassifierMapping {
    pub fn new(
        classifier_path: impl Into<String>,
        element_kind: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            classifier_path: classifier_path.into(),
            element_kind: element_kind.into(),
            type_tag: type_tag.into(),
        }
    }
}

const STANDARD_TAXONOMY: &[(&str, &str, &str)] = &[
    ("meta::pure::metamodel::type::Class", "Class", "class"),
    ("meta::pure::metamodel::type::Enumeration", "Enum", "Enumeration"),
    ("meta::pure::metamodel::relationship::Association", "Association", "association"),
    ("meta::pure::metamodel::extension::Profile", "Profile", "profile"),
    ("meta::pure::metamodel::function::ConcreteFunctionDefinition", "Function", "function"),
    ("meta::pure::metamodel::type::Measure", "Measure", "measure"),
    ("meta::pure::mapping::Mapping", "Mapping", "mapping"),
    ("meta::pure::runtime::PackageableRuntime", "Runtime", "runtime"),
    ("meta::pure::runtime::PackageableConnection", "Connection", "connection"),
    ("meta::legend::service::metamodel::Service", "Service", "service"),
    ("meta::pure::data::DataElement", "Data", "dataElement"),
];

/// Table-driven converter.
///
/// An entity's content must carry `_type`, `package` and `name` values that
/// agree with its classifier and path; the remaining members become the
/// declaration body verbatim. `to_entity` restores the three identity members,
/// so supported entities round-trip exactly.
#[derive(Debug, Clone)]
pub struct ClassifierConverter {
    mappings: Vec<ClassifierMapping>,
}

impl ClassifierConverter {
    /// Builds a converter over `mappings`. Classifier paths and element kinds must be unique.
    pub fn new(mappings: Vec<ClassifierMapping>) -> CodecResult<Self> {
        let converter = Self { mappings: Vec::new() };
        converter.with_mappings(mappings)
    }

    /// The built-in model taxonomy.
    pub fn standard() -> Self {
        Self {
            mappings: STANDARD_TAXONOMY
                .iter()
                .map(|(classifier, kind, tag)| ClassifierMapping::new(*classifier, *kind, *tag))
                .collect(),
        }
    }

    /// Appends extra mappings, keeping both paths and kinds unique.
    pub fn with_mappings(mut self, extra: Vec<ClassifierMapping>) -> CodecResult<Self> {
        let mut classifiers: HashSet<String> =
            self.mappings.iter().map(|m| m.classifier_path.clone()).collect();
        let mut kinds: HashSet<String> =
            self.mappings.iter().map(|m| m.element_kind.clone()).collect();

        for mapping in extra {
            if !is_valid_path(&mapping.classifier_path) {
                return Err(CodecError::Config(format!(
                    "invalid classifier path: {:?}",
                    mapping.classifier_path
                )));
            }
            if !is_valid_path(&mapping.element_kind) || mapping.element_kind.contains("::") {
                return Err(CodecError::Config(format!(
                    "invalid element kind: {:?}",
                    mapping.element_kind
                )));
            }
            if !classifiers.insert(mapping.classifier_path.clone()) {
                return Err(CodecError::Config(format!(
                    "duplicate classifier path: {}",
                    mapping.classifier_path
                )));
            }
            if !kinds.insert(mapping.element_kind.clone()) {
                return Err(CodecError::Config(format!(
                    "duplicate element kind: {}",
                    mapping.element_kind
                )));
            }
            self.mappings.push(mapping);
        }
        Ok(self)
    }

    pub fn mappings(&self) -> &[ClassifierMapping] {
        &self.mappings
    }

    fn by_classifier(&self, classifier_path: &str) -> Option<&ClassifierMapping> {
        self.mappings.iter().find(|m| m.classifier_path == classifier_path)
    }

    fn by_kind(&self, element_kind: &str) -> Option<&ClassifierMapping> {
        self.mappings.iter().find(|m| m.element_kind == element_kind)
    }
}

impl Default for ClassifierConverter {
    fn default() -> Self {
        Self::standard()
    }
}

impl ElementConverter for ClassifierConverter {
    fn is_supported_classifier(&self, classifier_path: &str) -> bool {
        self.by_classifier(classifier_path).is_some()
    }

    fn from_entity(&self, entity: &Entity) -> CodecResult<Element> {
        let mapping = self.by_classifier(&entity.classifier_path).ok_or_else(|| {
            CodecError::UnsupportedClassifier {
                classifier_path: entity.classifier_path.clone(),
            }
        })?;
        if !is_valid_path(&entity.path) {
            return Err(CodecError::conversion(&entity.path, "invalid entity path"));
        }

        let (package, name) = split_path(&entity.path);
        let mut body = entity.content.clone();
        take_expected(&mut body, TYPE_KEY, &mapping.type_tag, &entity.path)?;
        take_expected(&mut body, PACKAGE_KEY, package.unwrap_or(""), &entity.path)?;
        take_expected(&mut body, NAME_KEY, name, &entity.path)?;

        Ok(Declaration::new(mapping.element_kind.clone(), entity.path.clone(), body).into())
    }

    fn to_entity(&self, element: &Element) -> CodecResult<Entity> {
        let Element::Declaration(declaration) = element else {
            return Err(CodecError::conversion(
                element.path(),
                "a section index is not an entity",
            ));
        };
        let mapping = self.by_kind(&declaration.kind).ok_or_else(|| {
            CodecError::conversion(
                &declaration.path,
                format!("unknown element kind {:?}", declaration.kind),
            )
        })?;
        if let Some(key) = [TYPE_KEY, PACKAGE_KEY, NAME_KEY]
            .into_iter()
            .find(|key| declaration.body.contains_key(*key))
        {
            return Err(CodecError::conversion(
                &declaration.path,
                format!("body must not declare reserved member {key:?}"),
            ));
        }

        let (package, name) = split_path(&declaration.path);
        let mut content = Map::new();
        content.insert(TYPE_KEY.into(), Value::String(mapping.type_tag.clone()));
        content.insert(PACKAGE_KEY.into(), Value::String(package.unwrap_or("").into()));
        content.insert(NAME_KEY.into(), Value::String(name.into()));
        content.extend(declaration.body.clone());

        Ok(Entity::new(
            join_path(package.unwrap_or(""), name),
            mapping.classifier_path.clone(),
            content,
        ))
    }
}

fn take_expected(body: &mut Map<String, Value>, key: &str, expected: &str, path: &str) -> CodecResult<()> {
    match body.remove(key) {
        Some(Value::String(actual)) if actual == expected => Ok(()),
        Some(actual) => Err(CodecError::conversion(
            path,
            format!("{key} is {actual}, expected {expected:?}"),
        )),
        None => Err(CodecError::conversion(path, format!("content is missing {key:?}"))),
    }
}
