//! Codec configuration, usually read from a `codec.toml`.

use std::path::Path;

use entitext_grammar::RenderStyle;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::PURE_FORMAT_NAME;
use crate::{ClassifierMapping, CodecError, CodecResult};

/// Settings for [`crate::EntityTextCodec::from_config`].
///
/// ```toml
/// name = "pure"
/// file_extension = "pure"
/// render_style = "standard"
///
/// [[classifiers]]
/// classifier_path = "meta::external::format::shared::binding::Binding"
/// element_kind = "Binding"
/// type_tag = "binding"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_name")]
    pub file_extension: String,
    #[serde(default)]
    pub render_style: RenderStyle,
    /// Appended to the standard taxonomy.
    #[serde(default)]
    pub classifiers: Vec<ClassifierMapping>,
}

fn default_name() -> String {
    PURE_FORMAT_NAME.to_string()
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            file_extension: default_name(),
            render_style: RenderStyle::default(),
            classifiers: Vec::new(),
        }
    }
}

impl CodecConfig {
    pub fn from_toml_str(contents: &str) -> CodecResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a config file. A missing file is an I/O error.
    pub fn load_from(path: &Path) -> CodecResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            classifiers = config.classifiers.len(),
            "Loaded codec config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> CodecResult<()> {
        if self.name.trim().is_empty() {
            return Err(CodecError::Config("name is required".into()));
        }
        if self.file_extension.trim().is_empty() {
            return Err(CodecError::Config("file_extension is required".into()));
        }
        if self.file_extension.starts_with('.') {
            return Err(CodecError::Config(
                "file_extension must not start with '.' (e.g., 'pure')".into(),
            ));
        }
        Ok(())
    }
}
