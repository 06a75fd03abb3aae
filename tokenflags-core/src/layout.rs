//! Declarative panel layouts.
//!
//! A [`Layout`] describes a panel as data so it can live in a TOML or JSON
//! file:
//!
//! ```toml
//! size = 2
//!
//! [[controls]]
//! key = "fast-text"
//! label = "Fast Text"
//! section = "Shortcuts"
//! byte = 0
//! shift = 6
//! kind = "tri_state"
//!
//! [[controls]]
//! key = "leveling-speed"
//! label = "Leveling Speed"
//! byte = 1
//! shift = 0
//! kind = "enumerated"
//! options = [
//!     { label = "Normal", value = 0 },
//!     { label = "Fast", value = 1 },
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::{FieldAddress, MAX_BUFFER_LEN};
use crate::control::{Control, ControlState, EnumOption};
use crate::panel::Panel;
use crate::{FlagError, Result};

/// A whole panel: buffer size plus controls in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub size: usize,
    #[serde(default)]
    pub controls: Vec<LayoutControl>,
}

/// One control of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutControl {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub byte: usize,
    pub shift: u8,
    #[serde(flatten)]
    pub kind: ControlKind,
}

/// Variant of a control in a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    Binary,
    TriState,
    Enumerated { options: Vec<EnumOption> },
}

impl LayoutControl {
    pub fn to_control(&self) -> Control {
        let address = FieldAddress::new(self.byte, self.shift);
        let control = match &self.kind {
            ControlKind::Binary => Control::binary(&self.key, &self.label, address),
            ControlKind::TriState => Control::tri_state(&self.key, &self.label, address),
            ControlKind::Enumerated { options } => {
                Control::enumerated(&self.key, &self.label, address, options.clone())
            }
        };
        match &self.section {
            Some(section) => control.in_section(section),
            None => control,
        }
    }

    fn from_control(control: &Control) -> Self {
        let kind = match control.state() {
            ControlState::Binary(_) => ControlKind::Binary,
            ControlState::TriState(_) => ControlKind::TriState,
            ControlState::Enumerated(choice) => ControlKind::Enumerated {
                options: choice.options().to_vec(),
            },
        };
        Self {
            key: control.key().to_string(),
            label: control.label().to_string(),
            section: control.section().map(str::to_string),
            byte: control.address().byte,
            shift: control.address().shift,
            kind,
        }
    }
}

impl Layout {
    /// Parse a layout from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| FlagError::Layout(e.to_string()))
    }

    /// Convert an already-parsed document (for example a TOML file loaded as
    /// JSON values) into a layout.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| FlagError::Layout(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| FlagError::Layout(e.to_string()))
    }

    /// Describe the controls of an existing panel.
    pub fn from_panel(panel: &Panel) -> Self {
        Self {
            size: panel.size(),
            controls: panel.controls().map(LayoutControl::from_control).collect(),
        }
    }

    /// Describe a list of controls over a `size`-byte buffer.
    pub fn from_controls(size: usize, controls: &[Control]) -> Self {
        Self {
            size,
            controls: controls.iter().map(LayoutControl::from_control).collect(),
        }
    }

    /// Build a zeroed panel with every control registered in order.
    pub fn build(&self) -> Result<Panel> {
        if self.size == 0 {
            return Err(FlagError::Layout("size must be at least one byte".to_string()));
        }
        if self.size > MAX_BUFFER_LEN {
            return Err(FlagError::Layout(format!(
                "size {} exceeds the {}-byte limit",
                self.size, MAX_BUFFER_LEN
            )));
        }
        let mut panel = Panel::new(self.size);
        panel.register_all(self.controls.iter().map(LayoutControl::to_control))?;
        Ok(panel)
    }
}
