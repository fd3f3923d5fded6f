use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::error::SurfaceError;
use crate::projection::{render_css, CssPropertyUpdate};

/// The live style target that theme properties are projected onto.
///
/// In a browser this is the document root; in a native toolkit it is
/// whatever holds the style variables widgets read from.
pub trait StyleSurface {
    /// Set a named style property.
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), SurfaceError>;

    /// Add (`on == true`) or remove a boolean marker such as a class name.
    fn toggle_marker(&mut self, name: &str, on: bool);

    /// Set a named attribute.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Read a property back. Only used for self-diagnostics.
    fn property(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Default)]
struct SurfaceState {
    properties: IndexMap<String, String>,
    markers: IndexSet<String>,
    attributes: IndexMap<String, String>,
    rejected: BTreeSet<String>,
    detached: bool,
}

/// In-memory [StyleSurface].
///
/// Keeps properties in first-write order and can render them as a
/// stylesheet with [MemorySurface::to_css]. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every future write of the property `name`.
    pub fn reject_property(&self, name: impl Into<String>) {
        self.state.borrow_mut().rejected.insert(name.into());
    }

    /// Detach or reattach the surface. A detached surface rejects every
    /// property write.
    pub fn set_detached(&self, detached: bool) {
        self.state.borrow_mut().detached = detached;
    }

    /// Whether the marker `name` is set.
    pub fn has_marker(&self, name: &str) -> bool {
        self.state.borrow().markers.contains(name)
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    /// All properties in first-write order.
    pub fn properties(&self) -> Vec<CssPropertyUpdate> {
        self.state
            .borrow()
            .properties
            .iter()
            .map(|(property, value)| CssPropertyUpdate::new(property.clone(), value.clone()))
            .collect()
    }

    /// Remove every property, marker and attribute.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.properties.clear();
        state.markers.clear();
        state.attributes.clear();
    }

    /// Render the current properties as a `:root` stylesheet.
    pub fn to_css(&self) -> String {
        render_css(&self.properties())
    }
}

impl StyleSurface for MemorySurface {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        if state.detached {
            return Err(SurfaceError::Detached);
        }
        if state.rejected.contains(name) {
            return Err(SurfaceError::Rejected {
                property: name.to_string(),
                value: value.to_string(),
            });
        }
        state.properties.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn toggle_marker(&mut self, name: &str, on: bool) {
        let mut state = self.state.borrow_mut();
        if on {
            state.markers.insert(name.to_string());
        } else {
            state.markers.shift_remove(name);
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn property(&self, name: &str) -> Option<String> {
        self.state.borrow().properties.get(name).cloned()
    }
}
