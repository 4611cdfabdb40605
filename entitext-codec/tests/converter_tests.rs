mod common;

use std::sync::Arc;

use common::{CLASS, declaration, index, make_class, person};
use entitext_codec::convert::{NAME_KEY, PACKAGE_KEY, TYPE_KEY};
use entitext_codec::{ClassifierConverter, ClassifierMapping, CodecError, ElementConverter};
use entitext_grammar::{Declaration, Element};
use entitext_model::Entity;
use pretty_assertions::assert_eq;
use serde_json::{Map, json};

fn binding() -> ClassifierMapping {
    ClassifierMapping::new(
        "meta::external::format::shared::binding::Binding",
        "Binding",
        "binding",
    )
}

// ── Taxonomy ─────────────────────────────────────────────────────

#[test]
fn standard_taxonomy_supports_classes() {
    let converter = ClassifierConverter::standard();
    assert!(converter.is_supported_classifier(CLASS));
    assert!(!converter.is_supported_classifier("meta::unknown::Thing"));
    assert!(!converter.is_supported_classifier(""));
}

#[test]
fn default_is_standard() {
    assert_eq!(
        ClassifierConverter::default().mappings(),
        ClassifierConverter::standard().mappings()
    );
}

#[test]
fn new_starts_from_empty_taxonomy() {
    let converter = ClassifierConverter::new(vec![binding()]).unwrap();
    assert_eq!(converter.mappings(), &[binding()]);
    assert!(!converter.is_supported_classifier(CLASS));
}

#[test]
fn extra_mappings_extend_standard() {
    let converter = ClassifierConverter::standard().with_mappings(vec![binding()]).unwrap();
    assert!(converter.is_supported_classifier(CLASS));
    assert!(converter.is_supported_classifier(&binding().classifier_path));
}

#[test]
fn duplicate_classifier_is_rejected() {
    let mut mapping = binding();
    mapping.classifier_path = CLASS.into();
    let err = ClassifierConverter::standard().with_mappings(vec![mapping]).unwrap_err();
    assert!(matches!(err, CodecError::Config(ref m) if m.contains("duplicate classifier path")));
}

#[test]
fn duplicate_kind_is_rejected() {
    let mut mapping = binding();
    mapping.element_kind = "Class".into();
    let err = ClassifierConverter::standard().with_mappings(vec![mapping]).unwrap_err();
    assert!(matches!(err, CodecError::Config(ref m) if m.contains("duplicate element kind")));
}

#[test]
fn qualified_kind_is_rejected() {
    let mut mapping = binding();
    mapping.element_kind = "ext::Binding".into();
    let err = ClassifierConverter::new(vec![mapping]).unwrap_err();
    assert!(matches!(err, CodecError::Config(ref m) if m.contains("invalid element kind")));
}

#[test]
fn malformed_classifier_path_is_rejected() {
    let mut mapping = binding();
    mapping.classifier_path = "meta::".into();
    let err = ClassifierConverter::new(vec![mapping]).unwrap_err();
    assert!(matches!(err, CodecError::Config(ref m) if m.contains("invalid classifier path")));
}

// ── Entity → element ─────────────────────────────────────────────

#[test]
fn identity_members_are_lifted_out_of_the_body() {
    let element = ClassifierConverter::standard()
        .from_entity(&make_class("model::A", json!({"properties": []})))
        .unwrap();
    let Element::Declaration(declaration) = element else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.kind, "Class");
    assert_eq!(declaration.path, "model::A");
    assert_eq!(declaration.body.len(), 1);
    assert!(declaration.body.contains_key("properties"));
    assert!(declaration.source_information.is_none());
}

#[test]
fn unpackaged_entity_uses_empty_package() {
    let entity = make_class("A", json!({}));
    assert_eq!(entity.content[PACKAGE_KEY], json!(""));
    let element = ClassifierConverter::standard().from_entity(&entity).unwrap();
    assert_eq!(element.path(), "A");
}

#[test]
fn unsupported_classifier_is_reported() {
    let entity = Entity::new("model::A", "meta::unknown::Thing", Map::new());
    let err = ClassifierConverter::standard().from_entity(&entity).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedClassifier { .. }));
    assert!(ClassifierConverter::standard().from_entity_if_possible(&entity).is_none());
}

#[test]
fn mismatched_identity_members_are_rejected() {
    let converter = ClassifierConverter::standard();
    for (key, value) in [
        (TYPE_KEY, json!("Enumeration")),
        (PACKAGE_KEY, json!("elsewhere")),
        (NAME_KEY, json!("Other")),
        (NAME_KEY, json!(42)),
    ] {
        let mut entity = make_class("model::A", json!({}));
        entity.content.insert(key.into(), value);
        let err = converter.from_entity(&entity).unwrap_err();
        assert!(
            matches!(err, CodecError::Conversion { ref path, .. } if path == "model::A"),
            "{key}: {err}"
        );
    }
}

#[test]
fn missing_identity_member_is_rejected() {
    let mut entity = make_class("model::A", json!({}));
    entity.content.remove(NAME_KEY);
    let err = ClassifierConverter::standard().from_entity(&entity).unwrap_err();
    assert!(err.to_string().contains("missing"), "{err}");
}

// ── Element → entity ─────────────────────────────────────────────

#[test]
fn to_entity_restores_identity_members() {
    let mut body = Map::new();
    body.insert("properties".into(), json!([]));
    let element: Element = Declaration::new("Class", "model::domain::A", body).into();
    let entity = ClassifierConverter::standard().to_entity(&element).unwrap();
    assert_eq!(entity, make_class("model::domain::A", json!({"properties": []})));
    assert_eq!(entity.package(), Some("model::domain"));
    assert_eq!(entity.name(), "A");
}

#[test]
fn section_index_is_not_an_entity() {
    let err = ClassifierConverter::standard().to_entity(&index()).unwrap_err();
    assert!(matches!(err, CodecError::Conversion { .. }));
}

#[test]
fn conversion_is_reversible() {
    let converter = ClassifierConverter::standard();
    let element = converter.from_entity(&person()).unwrap();
    assert_eq!(converter.to_entity(&element).unwrap(), person());
}

#[test]
fn custom_mapping_round_trips() {
    let converter = ClassifierConverter::standard().with_mappings(vec![binding()]).unwrap();
    let mut content = Map::new();
    content.insert(TYPE_KEY.into(), json!("binding"));
    content.insert(PACKAGE_KEY.into(), json!("ext"));
    content.insert(NAME_KEY.into(), json!("B"));
    content.insert("contentType".into(), json!("application/json"));
    let entity = Entity::new("ext::B", binding().classifier_path, content);

    let element = converter.from_entity(&entity).unwrap();
    assert_eq!(element.as_declaration().map(|d| d.kind.as_str()), Some("Binding"));
    assert_eq!(converter.to_entity(&element).unwrap(), entity);
}

#[test]
fn shared_converter_delegates() {
    let converter = Arc::new(ClassifierConverter::standard());
    assert!(converter.is_supported_classifier(CLASS));
    assert!(converter.to_entity(&declaration("a::B")).is_ok());
}
