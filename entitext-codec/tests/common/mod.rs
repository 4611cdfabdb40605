#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use entitext_codec::{ClassifierConverter, CodecResult, ElementConverter};
use entitext_grammar::{
    Declaration, Element, GrammarEngine, GrammarError, GrammarResult, Section, SectionIndex,
};
use entitext_model::{Entity, split_path};
use serde_json::{Map, Value, json};

pub const CLASS: &str = "meta::pure::metamodel::type::Class";
pub const ENUMERATION: &str = "meta::pure::metamodel::type::Enumeration";

/// A class entity whose content agrees with its path, plus `extra` members.
pub fn make_class(path: &str, extra: Value) -> Entity {
    let (package, name) = split_path(path);
    let mut content: Map<String, Value> = match extra {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    content.insert("_type".into(), json!("class"));
    content.insert("package".into(), json!(package.unwrap_or("")));
    content.insert("name".into(), json!(name));
    Entity::new(path, CLASS, content)
}

/// A class whose `x` member is `levels` arrays wrapped around a number.
pub fn make_nested_class(path: &str, levels: usize) -> Entity {
    let mut entity = make_class(path, json!({}));
    let nested = (0..levels).fold(json!(1), |inner, _| Value::Array(vec![inner]));
    entity.content.insert("x".into(), nested);
    entity
}

pub fn person() -> Entity {
    make_class(
        "model::domain::Person",
        json!({
            "properties": [
                {
                    "name": "firstName",
                    "type": "String",
                    "multiplicity": {"lowerBound": 1, "upperBound": 1}
                },
                {
                    "name": "age",
                    "type": "Integer",
                    "multiplicity": {"lowerBound": 0, "upperBound": 1}
                }
            ],
            "stereotypes": [],
            "taggedValues": [{"tag": {"profile": "meta::pure::profiles::doc", "value": "doc"}, "value": "A person"}]
        }),
    )
}

pub fn declaration(path: &str) -> Element {
    Declaration::new("Class", path, Map::new()).into()
}

/// Section index whose only section can hold imports but has none.
pub fn index() -> Element {
    SectionIndex::new(vec![Section::import_aware("Pure", vec![], vec![])]).into()
}

pub fn index_with_imports(imports: &[&str]) -> Element {
    let imports = imports.iter().map(|s| s.to_string()).collect();
    SectionIndex::new(vec![
        Section::plain("Pure", vec![]),
        Section::import_aware("Pure", imports, vec![]),
    ])
    .into()
}

// ── Scripted collaborators ───────────────────────────────────────

/// Engine that returns a fixed parse result and a fixed compose result.
pub struct ScriptedEngine {
    elements: Vec<Element>,
    composed: GrammarResult<String>,
    pub parses: AtomicUsize,
    pub composes: AtomicUsize,
}

impl ScriptedEngine {
    pub fn parsing(elements: Vec<Element>) -> Self {
        Self {
            elements,
            composed: Ok("scripted".into()),
            parses: AtomicUsize::new(0),
            composes: AtomicUsize::new(0),
        }
    }

    pub fn composing(mut self, composed: GrammarResult<String>) -> Self {
        self.composed = composed;
        self
    }

    pub fn failing_compose(self) -> Self {
        self.composing(Err(GrammarError::Compose("renderer exploded".into())))
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.parses.load(Ordering::SeqCst),
            self.composes.load(Ordering::SeqCst),
        )
    }
}

impl GrammarEngine for ScriptedEngine {
    fn parse(&self, _text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>> {
        assert!(!keep_source_info, "codec must never keep source information");
        self.parses.fetch_add(1, Ordering::SeqCst);
        Ok(self.elements.clone())
    }

    fn compose(&self, _elements: &[Element]) -> GrammarResult<String> {
        self.composes.fetch_add(1, Ordering::SeqCst);
        self.composed.clone()
    }
}

/// Standard converter that counts entity → element conversions.
#[derive(Default)]
pub struct CountingConverter {
    inner: ClassifierConverter,
    pub from_calls: AtomicUsize,
}

impl CountingConverter {
    pub fn from_calls(&self) -> usize {
        self.from_calls.load(Ordering::SeqCst)
    }
}

impl ElementConverter for CountingConverter {
    fn is_supported_classifier(&self, classifier_path: &str) -> bool {
        self.inner.is_supported_classifier(classifier_path)
    }

    fn from_entity(&self, entity: &Entity) -> CodecResult<Element> {
        self.from_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.from_entity(entity)
    }

    fn to_entity(&self, element: &Element) -> CodecResult<Entity> {
        self.inner.to_entity(element)
    }
}

// ── Log capture ──────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records every event into the returned buffer.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
