//! The grammar engine seam.

use std::sync::{Arc, Mutex};

use crate::{Element, GrammarError, GrammarResult};

/// Converts grammar text to elements and back.
///
/// Implementations must be reentrant: the codec shares one engine across
/// threads and calls it through `&self` without locking. Engines that keep
/// per-call state implement [`GrammarEngineMut`] and are wrapped in
/// [`ExclusiveEngine`] instead.
pub trait GrammarEngine: Send + Sync {
    /// Parses `text` into elements in text order. With `keep_source_info`
    /// false, no element carries source positions.
    fn parse(&self, text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>>;

    /// Renders `elements` as text. Must be deterministic.
    fn compose(&self, elements: &[Element]) -> GrammarResult<String>;
}

impl<E: GrammarEngine + ?Sized> GrammarEngine for Arc<E> {
    fn parse(&self, text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>> {
        (**self).parse(text, keep_source_info)
    }

    fn compose(&self, elements: &[Element]) -> GrammarResult<String> {
        (**self).compose(elements)
    }
}

impl<E: GrammarEngine + ?Sized> GrammarEngine for Box<E> {
    fn parse(&self, text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>> {
        (**self).parse(text, keep_source_info)
    }

    fn compose(&self, elements: &[Element]) -> GrammarResult<String> {
        (**self).compose(elements)
    }
}

/// A grammar engine that needs exclusive access while parsing or composing.
pub trait GrammarEngineMut: Send {
    fn parse(&mut self, text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>>;

    fn compose(&mut self, elements: &[Element]) -> GrammarResult<String>;
}

/// Serializes calls into a non-reentrant engine with a mutex.
#[derive(Debug, Default)]
pub struct ExclusiveEngine<E> {
    inner: Mutex<E>,
}

impl<E: GrammarEngineMut> ExclusiveEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Mutex::new(engine),
        }
    }

    pub fn into_inner(self) -> GrammarResult<E> {
        self.inner
            .into_inner()
            .map_err(|e| GrammarError::Lock(e.to_string()))
    }
}

impl<E: GrammarEngineMut> GrammarEngine for ExclusiveEngine<E> {
    fn parse(&self, text: &str, keep_source_info: bool) -> GrammarResult<Vec<Element>> {
        let mut engine = self
            .inner
            .lock()
            .map_err(|e| GrammarError::Lock(e.to_string()))?;
        engine.parse(text, keep_source_info)
    }

    fn compose(&self, elements: &[Element]) -> GrammarResult<String> {
        let mut engine = self
            .inner
            .lock()
            .map_err(|e| GrammarError::Lock(e.to_string()))?;
        engine.compose(elements)
    }
}
