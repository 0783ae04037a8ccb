//! Command registry.
//!
//! UI contributions (menu entries, toolbar buttons) are described by
//! command records mapping a stable command id to its label, tooltip,
//! icon, and accelerator. The registry is loaded once at startup from a
//! JSON document and is immutable afterwards; locale-specific accelerator
//! differences live in per-command override tables rather than scattered
//! patch code.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::icons::IconId;

/// Presentation record for one command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandSpec {
    /// Menu/toolbar label.
    pub label: String,
    /// Longer description shown on hover.
    #[serde(default)]
    pub tooltip: Option<String>,
    /// Icon, if the command has one.
    #[serde(default)]
    pub icon: Option<IconId>,
    /// Default accelerator (e.g. `"Ctrl+Shift+T"`).
    #[serde(default)]
    pub accelerator: Option<String>,
    /// Locale-specific accelerator overrides, keyed by BCP 47 tag
    /// (`"ja"`, `"zh-TW"`, ...).
    #[serde(default)]
    pub accelerator_overrides: HashMap<String, String>,
}

impl CommandSpec {
    /// Resolve the accelerator for `locale`.
    ///
    /// Tries the exact tag, then its language subtag (`"ja-JP"` falls back
    /// to `"ja"`), then the default accelerator.
    pub fn accelerator_for(&self, locale: &str) -> Option<&str> {
        if let Some(patched) = self.accelerator_overrides.get(locale) {
            return Some(patched);
        }
        if let Some(language) = locale.split('-').next()
            && language != locale
            && let Some(patched) = self.accelerator_overrides.get(language)
        {
            return Some(patched);
        }
        self.accelerator.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct CommandEntry {
    id: String,
    #[serde(flatten)]
    spec: CommandSpec,
}

/// Failure to load the command configuration.
#[derive(Debug, Error)]
pub enum CommandRegistryError {
    /// The configuration document could not be parsed.
    #[error("invalid command configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two entries declared the same command id.
    #[error("duplicate command id '{0}'")]
    Duplicate(String),
}

/// An immutable mapping from command id to [`CommandSpec`].
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandSpec>,
}

impl CommandRegistry {
    /// Load the registry from a JSON array of command entries:
    ///
    /// ```json
    /// [
    ///   {
    ///     "id": "navigate.open_type_hierarchy",
    ///     "label": "Open Type Hierarchy",
    ///     "accelerator": "F4",
    ///     "accelerator_overrides": { "ja": "Ctrl+F4" }
    ///   }
    /// ]
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CommandRegistryError> {
        let entries: Vec<CommandEntry> = serde_json::from_str(json)?;

        let mut commands = HashMap::with_capacity(entries.len());
        for entry in entries {
            if commands.insert(entry.id.clone(), entry.spec).is_some() {
                return Err(CommandRegistryError::Duplicate(entry.id));
            }
        }
        Ok(Self { commands })
    }

    /// Look up a command by id.
    pub fn get(&self, id: &str) -> Option<&CommandSpec> {
        self.commands.get(id)
    }

    /// Iterate over registered command ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"[
        {
            "id": "navigate.open_type_hierarchy",
            "label": "Open Type Hierarchy",
            "tooltip": "Show the type hierarchy of the selected element",
            "icon": 17,
            "accelerator": "F4",
            "accelerator_overrides": { "ja": "Ctrl+F4", "zh-TW": "Shift+F4" }
        },
        {
            "id": "source.organize_imports",
            "label": "Organize Imports",
            "accelerator": "Ctrl+Shift+O"
        }
    ]"#;

    #[test]
    fn test_load_and_lookup() {
        let registry = CommandRegistry::from_json(CONFIG).unwrap();
        assert_eq!(registry.len(), 2);

        let open = registry.get("navigate.open_type_hierarchy").unwrap();
        assert_eq!(open.label, "Open Type Hierarchy");
        assert_eq!(open.icon, Some(17));

        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_accelerator_locale_resolution() {
        let registry = CommandRegistry::from_json(CONFIG).unwrap();
        let open = registry.get("navigate.open_type_hierarchy").unwrap();

        assert_eq!(open.accelerator_for("en-US"), Some("F4"));
        assert_eq!(open.accelerator_for("ja"), Some("Ctrl+F4"));
        // Language fallback: ja-JP resolves through "ja".
        assert_eq!(open.accelerator_for("ja-JP"), Some("Ctrl+F4"));
        // Exact tag beats language fallback.
        assert_eq!(open.accelerator_for("zh-TW"), Some("Shift+F4"));
        assert_eq!(open.accelerator_for("zh-CN"), Some("F4"));

        let organize = registry.get("source.organize_imports").unwrap();
        assert_eq!(organize.accelerator_for("ja"), Some("Ctrl+Shift+O"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let config = r#"[
            { "id": "a", "label": "A" },
            { "id": "a", "label": "A again" }
        ]"#;
        assert!(matches!(
            CommandRegistry::from_json(config),
            Err(CommandRegistryError::Duplicate(id)) if id == "a"
        ));
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(
            CommandRegistry::from_json("{ not json"),
            Err(CommandRegistryError::Parse(_))
        ));
    }
}
