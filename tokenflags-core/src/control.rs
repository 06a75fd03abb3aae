//! Typed controls bound to buffer fields.
//!
//! A [`Control`] knows where its value lives and how to move it between the
//! buffer and its own displayed state:
//!
//! - **Binary** - one bit, on or off
//! - **Tri-state** - two bits, off / on / indeterminate
//! - **Enumerated** - as many bits as the largest declared option needs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::buffer::{BitFieldBuffer, Field, FieldAddress, value_mask};
use crate::{FlagError, Result};

/// Displayed state of a tri-state control.
///
/// Activation cycles `Off -> On -> Indeterminate -> Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    #[default]
    Off,
    On,
    /// "Don't care": the engine decides.
    Indeterminate,
}

impl TriState {
    /// Interpret a 2-bit field. Both 2 and 3 render as indeterminate.
    pub fn from_bits(bits: u8) -> Self {
        if bits & 0b10 != 0 {
            TriState::Indeterminate
        } else if bits & 0b01 != 0 {
            TriState::On
        } else {
            TriState::Off
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            TriState::Off => 0,
            TriState::On => 1,
            TriState::Indeterminate => 2,
        }
    }

    /// The state after one activation.
    pub fn next(self) -> Self {
        match self {
            TriState::Off => TriState::On,
            TriState::On => TriState::Indeterminate,
            TriState::Indeterminate => TriState::Off,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriState::Off => "off",
            TriState::On => "on",
            TriState::Indeterminate => "indeterminate",
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled value of an enumerated control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub label: String,
    pub value: u8,
}

impl EnumOption {
    pub fn new(label: impl Into<String>, value: u8) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// State of an enumerated control.
///
/// The raw field content is kept as read so that an unmapped value survives
/// a pull/push cycle; the selection is derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    options: Vec<EnumOption>,
    width: u8,
    raw: u8,
}

impl Choice {
    pub fn new(options: Vec<EnumOption>) -> Self {
        let width = enum_width(&options);
        Self {
            options,
            width,
            raw: 0,
        }
    }

    pub fn options(&self) -> &[EnumOption] {
        &self.options
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Index of the declared option matching the current value.
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.value == self.raw)
    }

    /// The declared option matching the current value, if any.
    pub fn selected(&self) -> Option<&EnumOption> {
        self.selected_index().map(|i| &self.options[i])
    }

    fn set_raw(&mut self, value: u8) {
        self.raw = value & value_mask(self.width);
    }

    fn select(&mut self, label: &str) -> bool {
        match self
            .options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(label))
        {
            Some(option) => {
                self.raw = option.value;
                true
            }
            None => false,
        }
    }

    fn advance(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let next = self
            .selected_index()
            .map(|i| (i + 1) % self.options.len())
            .unwrap_or(0);
        self.raw = self.options[next].value;
    }
}

/// Bits needed for the largest declared value: `floor(log2(max)) + 1`.
///
/// An option set whose largest value is 0 (or that is empty) gets one bit.
pub fn enum_width(options: &[EnumOption]) -> u8 {
    let max = options.iter().map(|o| o.value).max().unwrap_or(0);
    if max == 0 {
        1
    } else {
        (u8::BITS - max.leading_zeros()) as u8
    }
}

/// Variant-specific state of a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    Binary(bool),
    TriState(TriState),
    Enumerated(Choice),
}

/// A control bound to a field of the flag buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    key: String,
    label: String,
    section: Option<String>,
    address: FieldAddress,
    state: ControlState,
}

impl Control {
    /// A one-bit on/off control.
    pub fn binary(key: impl Into<String>, label: impl Into<String>, address: FieldAddress) -> Self {
        Self::with_state(key, label, address, ControlState::Binary(false))
    }

    /// A two-bit off/on/indeterminate control.
    pub fn tri_state(
        key: impl Into<String>,
        label: impl Into<String>,
        address: FieldAddress,
    ) -> Self {
        Self::with_state(key, label, address, ControlState::TriState(TriState::Off))
    }

    /// A control choosing among labelled values.
    pub fn enumerated(
        key: impl Into<String>,
        label: impl Into<String>,
        address: FieldAddress,
        options: Vec<EnumOption>,
    ) -> Self {
        Self::with_state(
            key,
            label,
            address,
            ControlState::Enumerated(Choice::new(options)),
        )
    }

    fn with_state(
        key: impl Into<String>,
        label: impl Into<String>,
        address: FieldAddress,
        state: ControlState,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            section: None,
            address,
            state,
        }
    }

    /// Group the control under a named section.
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn address(&self) -> FieldAddress {
        self.address
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Field width in bits, derived from the variant.
    pub fn width(&self) -> u8 {
        match &self.state {
            ControlState::Binary(_) => 1,
            ControlState::TriState(_) => 2,
            ControlState::Enumerated(choice) => choice.width(),
        }
    }

    pub fn field(&self) -> Field {
        Field::new(self.address, self.width())
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.state {
            ControlState::Binary(_) => "binary",
            ControlState::TriState(_) => "tri-state",
            ControlState::Enumerated(_) => "enumerated",
        }
    }

    /// Integer written to the buffer for the current state.
    pub fn value(&self) -> u8 {
        match &self.state {
            ControlState::Binary(on) => u8::from(*on),
            ControlState::TriState(state) => state.bits(),
            ControlState::Enumerated(choice) => choice.raw(),
        }
    }

    /// Set the state from a raw field value, masked to the control's width.
    pub fn set_value(&mut self, value: u8) {
        match &mut self.state {
            ControlState::Binary(on) => *on = value & 1 != 0,
            ControlState::TriState(state) => *state = TriState::from_bits(value & 0b11),
            ControlState::Enumerated(choice) => choice.set_raw(value),
        }
    }

    /// Refresh the displayed state from the buffer.
    pub fn pull(&mut self, buffer: &BitFieldBuffer) {
        let value = buffer.read(&self.field());
        self.set_value(value);
    }

    /// Write the displayed state into the buffer.
    pub fn push(&self, buffer: &mut BitFieldBuffer) {
        buffer.write(&self.field(), self.value());
    }

    /// One user activation: binary toggles, tri-state cycles and enumerated
    /// moves to the next declared option.
    pub fn activate(&mut self) {
        match &mut self.state {
            ControlState::Binary(on) => *on = !*on,
            ControlState::TriState(state) => *state = state.next(),
            ControlState::Enumerated(choice) => choice.advance(),
        }
    }

    /// Select an enumerated option by label (case-insensitive).
    pub fn select(&mut self, label: &str) -> Result<()> {
        let found = match &mut self.state {
            ControlState::Enumerated(choice) => choice.select(label),
            _ => false,
        };
        if found {
            Ok(())
        } else {
            Err(FlagError::UnknownOption {
                key: self.key.clone(),
                option: label.to_string(),
            })
        }
    }

    /// Assign a value written as text.
    ///
    /// Binary accepts `on/off`, `true/false`, `yes/no`, `1/0`. Tri-state also
    /// accepts `?`, `indeterminate`, `any` and `2`. Enumerated accepts an
    /// option label or its number.
    pub fn assign(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        let invalid = || FlagError::InvalidValue {
            key: self.key.clone(),
            value: text.to_string(),
        };

        match &mut self.state {
            ControlState::Binary(on) => {
                *on = parse_switch(text).ok_or_else(invalid)?;
            }
            ControlState::TriState(state) => {
                *state = match text.to_lowercase().as_str() {
                    "?" | "2" | "indeterminate" | "any" => TriState::Indeterminate,
                    other => {
                        if parse_switch(other).ok_or_else(invalid)? {
                            TriState::On
                        } else {
                            TriState::Off
                        }
                    }
                };
            }
            ControlState::Enumerated(choice) => {
                if !choice.select(text) {
                    let value: u8 = text.parse().map_err(|_| FlagError::UnknownOption {
                        key: self.key.clone(),
                        option: text.to_string(),
                    })?;
                    choice.set_raw(value);
                }
            }
        }
        Ok(())
    }

    /// Human-readable state.
    pub fn display(&self) -> String {
        match &self.state {
            ControlState::Binary(true) => "on".to_string(),
            ControlState::Binary(false) => "off".to_string(),
            ControlState::TriState(state) => state.to_string(),
            ControlState::Enumerated(choice) => match choice.selected() {
                Some(option) => option.label.clone(),
                None => format!("<unmapped {}>", choice.raw()),
            },
        }
    }
}

fn parse_switch(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
