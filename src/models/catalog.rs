use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Display name → backend identifier.
pub static SUPPORTED_MODELS: [(&str, &str); 6] = [
    ("Llama 3 70B", "llama3-70b-8192"),
    ("Llama 3 8B", "llama3-8b-8192"),
    ("Llama 3.1 70B", "llama-3.1-70b-versatile"),
    ("Llama 3.1 8B", "llama-3.1-8b-instant"),
    ("Mixtral 8x7B", "mixtral-8x7b-32768"),
    ("Gemma 2 9B", "gemma2-9b-it"),
];

pub const DEFAULT_MODEL: &str = "Mixtral 8x7B";

/// A backend model identifier that is known to be on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId {
    display_name: &'static str,
    backend_id: &'static str,
}

impl ModelId {
    /// Accepts a display name (case-insensitive) or a backend id.
    pub fn resolve(name: &str) -> Result<Self> {
        let needle = name.trim();
        SUPPORTED_MODELS
            .iter()
            .find(|&&(display, backend)| display.eq_ignore_ascii_case(needle) || backend == needle)
            .map(|&(display, backend)| Self {
                display_name: display,
                backend_id: backend,
            })
            .ok_or_else(|| Error::UnsupportedModel(needle.to_string()))
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn as_str(&self) -> &'static str {
        self.backend_id
    }

    pub fn all() -> impl Iterator<Item = ModelId> {
        SUPPORTED_MODELS.iter().map(|&(display, backend)| ModelId {
            display_name: display,
            backend_id: backend,
        })
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::all()
            .find(|m| m.display_name == DEFAULT_MODEL)
            .unwrap_or_else(|| Self {
                display_name: SUPPORTED_MODELS[0].0,
                backend_id: SUPPORTED_MODELS[0].1,
            })
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.backend_id)
    }
}

impl TryFrom<String> for ModelId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::resolve(&value)
    }
}

impl From<ModelId> for String {
    fn from(model: ModelId) -> Self {
        model.backend_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_display_name_and_id() {
        let by_name = ModelId::resolve("llama 3.1 8b").unwrap();
        assert_eq!(by_name.as_str(), "llama-3.1-8b-instant");

        let by_id = ModelId::resolve("gemma2-9b-it").unwrap();
        assert_eq!(by_id.display_name(), "Gemma 2 9B");
    }

    #[test]
    fn test_rejects_unknown_model() {
        assert!(matches!(
            ModelId::resolve("gpt-4o"),
            Err(Error::UnsupportedModel(name)) if name == "gpt-4o"
        ));
    }

    #[test]
    fn test_default_is_mixtral() {
        assert_eq!(ModelId::default().as_str(), "mixtral-8x7b-32768");
        assert_eq!(ModelId::all().count(), 6);
    }
}
