//! # Selection & Mounting
//!
//! [`Shell`] tracks which template is on screen and which ones have ever
//! been opened. A unit is built the first time it is selected and then kept
//! for the rest of the session; switching away only hides it.

use super::registry::{RegistryError, TemplateDescriptor};
use crate::templates::TemplateUnit;
use std::collections::HashMap;

/// Which template is active, and which have been mounted.
///
/// `active` is always either `None` or a member of `mounted`; `mounted`
/// only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    active: Option<&'static str>,
    /// Insertion-ordered
    mounted: Vec<&'static str>,
}

impl SelectionState {
    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.mounted.contains(&id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active == Some(id)
    }

    pub fn mounted(&self) -> &[&'static str] {
        &self.mounted
    }

    /// Make `id` active, mounting it if needed. Returns `true` if this was
    /// the first selection.
    pub fn select(&mut self, id: &'static str) -> bool {
        self.active = Some(id);
        if self.is_mounted(id) {
            false
        } else {
            self.mounted.push(id);
            true
        }
    }
}

/// Registry plus the live units that have been mounted.
pub struct Shell {
    descriptors: &'static [TemplateDescriptor],
    selection: SelectionState,
    units: HashMap<&'static str, Box<dyn TemplateUnit>>,
}

impl Shell {
    pub fn new(descriptors: &'static [TemplateDescriptor]) -> Self {
        Self {
            descriptors,
            selection: SelectionState::default(),
            units: HashMap::new(),
        }
    }

    pub fn descriptors(&self) -> &'static [TemplateDescriptor] {
        self.descriptors
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn descriptor(&self, id: &str) -> Option<&'static TemplateDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    pub fn active_descriptor(&self) -> Option<&'static TemplateDescriptor> {
        self.selection.active().and_then(|id| self.descriptor(id))
    }

    /// Show the template `id`, building its unit on first selection.
    pub fn select(&mut self, id: &str) -> Result<(), RegistryError> {
        let descriptor = self
            .descriptor(id)
            .ok_or_else(|| RegistryError::UnknownTemplate(id.to_string()))?;

        if self.selection.select(descriptor.id) {
            tracing::debug!("mounting template '{}'", descriptor.id);
            self.units.insert(descriptor.id, (descriptor.build)());
        }
        Ok(())
    }

    pub fn active_unit(&self) -> Option<&dyn TemplateUnit> {
        let id = self.selection.active()?;
        self.units.get(id).map(|u| u.as_ref())
    }

    pub fn active_unit_mut(&mut self) -> Option<&mut (dyn TemplateUnit + 'static)> {
        let id = self.selection.active()?;
        self.units.get_mut(id).map(|u| u.as_mut())
    }

    /// Any mounted unit, active or hidden.
    pub fn unit_mut(&mut self, id: &str) -> Option<&mut (dyn TemplateUnit + 'static)> {
        self.units.get_mut(id).map(|u| u.as_mut())
    }

    pub fn mounted_count(&self) -> usize {
        self.units.len()
    }
}
