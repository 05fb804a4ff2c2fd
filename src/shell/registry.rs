//! # Template Registry
//!
//! The fixed, ordered list of templates shown in the sidebar. Adding a
//! template means writing its unit and appending one [`TemplateDescriptor`]
//! here.

use crate::templates::{catalog, TemplateUnit};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Immutable metadata for one template.
#[derive(Clone, Copy)]
pub struct TemplateDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// `#rrggbb`
    pub accent: &'static str,
    /// Builds the unit. Only ever called when the template is first selected.
    pub build: fn() -> Box<dyn TemplateUnit>,
}

impl fmt::Debug for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("accent", &self.accent)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate template id '{0}' in registry")]
    DuplicateId(&'static str),

    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),
}

static REGISTRY: [TemplateDescriptor; 7] = [
    TemplateDescriptor {
        id: "hangman",
        label: "Hangman",
        icon: "🎯",
        accent: "#a78bfa",
        build: catalog::build_hangman,
    },
    TemplateDescriptor {
        id: "dice",
        label: "Dice",
        icon: "🎲",
        accent: "#34d399",
        build: catalog::build_dice,
    },
    TemplateDescriptor {
        id: "add",
        label: "Add",
        icon: "➕",
        accent: "#2dd4bf",
        build: catalog::build_add,
    },
    TemplateDescriptor {
        id: "greet",
        label: "Greeter",
        icon: "👋",
        accent: "#fbbf24",
        build: catalog::build_greet,
    },
    TemplateDescriptor {
        id: "stats",
        label: "Stats",
        icon: "📊",
        accent: "#f472b6",
        build: catalog::build_stats,
    },
    TemplateDescriptor {
        id: "fibonacci",
        label: "Fibonacci",
        icon: "🌀",
        accent: "#818cf8",
        build: catalog::build_fibonacci,
    },
    TemplateDescriptor {
        id: "palindrome",
        label: "Palindrome",
        icon: "🔁",
        accent: "#38bdf8",
        build: catalog::build_palindrome,
    },
];

/// The built-in registry, in sidebar order.
pub fn registry() -> &'static [TemplateDescriptor] {
    &REGISTRY
}

/// Reject registries with repeated identifiers.
pub fn validate_registry(descriptors: &[TemplateDescriptor]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for d in descriptors {
        if !seen.insert(d.id) {
            return Err(RegistryError::DuplicateId(d.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::parse_hex_color;

    #[test]
    fn test_builtin_registry_is_valid() {
        assert_eq!(validate_registry(registry()), Ok(()));
    }

    #[test]
    fn test_registry_order() {
        let ids: Vec<&str> = registry().iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec!["hangman", "dice", "add", "greet", "stats", "fibonacci", "palindrome"]
        );
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut descriptors = registry().to_vec();
        descriptors.push(registry()[2]);
        assert_eq!(
            validate_registry(&descriptors),
            Err(RegistryError::DuplicateId("add"))
        );
    }

    #[test]
    fn test_accents_parse() {
        for d in registry() {
            assert!(parse_hex_color(d.accent).is_some(), "bad accent for {}", d.id);
        }
    }

    #[test]
    fn test_form_templates_have_specs() {
        for d in registry().iter().filter(|d| d.id != "hangman") {
            assert!(catalog::form_spec(d.id).is_some(), "no form spec for {}", d.id);
        }
    }
}
