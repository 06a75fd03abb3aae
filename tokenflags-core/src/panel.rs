//! The control registry.
//!
//! A [`Panel`] owns the flag buffer and the ordered set of controls bound to
//! it. There are exactly two synchronisation paths:
//!
//! - [`Panel::encode`]: every control pushes into the buffer, then the buffer
//!   is encoded into a [`Token`]
//! - [`Panel::apply`]: a token is decoded into the buffer, then every control
//!   pulls from it
//!
//! Bits that no control covers keep whatever the last applied token put
//! there, so a well-formed token re-encodes to itself. The one exception is a
//! tri-state field holding 3: it reads as indeterminate and re-encodes as 2.

use tokenflags_log::{debug, warn};

use crate::buffer::BitFieldBuffer;
use crate::codec::{Base32, Token};
use crate::control::{Control, ControlState};
use crate::{FlagError, Result};

/// Owner of a flag buffer and its bound controls.
#[derive(Debug, Clone)]
pub struct Panel {
    buffer: BitFieldBuffer,
    controls: Vec<Control>,
}

impl Panel {
    /// Create an empty panel over a zeroed buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            buffer: BitFieldBuffer::new(size),
            controls: Vec::new(),
        }
    }

    /// Create an empty panel and apply `token` to its buffer.
    pub fn with_token(size: usize, token: &str) -> Self {
        let mut panel = Self::new(size);
        panel.apply(token);
        panel
    }

    /// Buffer size in bytes.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &BitFieldBuffer {
        &self.buffer
    }

    /// Add a control and immediately pull its value from the buffer.
    ///
    /// Rejects controls whose field does not fit the buffer, overlaps an
    /// already registered field, or reuses a key.
    pub fn register(&mut self, mut control: Control) -> Result<&mut Control> {
        let field = control.field();
        if !field.fits(self.buffer.len()) {
            return Err(FlagError::FieldOutOfBounds {
                key: control.key().to_string(),
                byte: field.address.byte,
                shift: field.address.shift,
                width: field.width,
                len: self.buffer.len(),
            });
        }

        for existing in &self.controls {
            if existing.key() == control.key() {
                return Err(FlagError::DuplicateKey(control.key().to_string()));
            }
            if existing.field().overlaps(&field) {
                return Err(FlagError::OverlappingField {
                    key: control.key().to_string(),
                    other: existing.key().to_string(),
                });
            }
        }

        control.pull(&self.buffer);
        debug!(
            "registered {} control '{}' at byte {} shift {} width {}",
            control.kind_name(),
            control.key(),
            field.address.byte,
            field.address.shift,
            field.width
        );

        let index = self.controls.len();
        self.controls.push(control);
        Ok(&mut self.controls[index])
    }

    /// Register several controls in order, stopping at the first error.
    pub fn register_all<I>(&mut self, controls: I) -> Result<()>
    where
        I: IntoIterator<Item = Control>,
    {
        for control in controls {
            self.register(control)?;
        }
        Ok(())
    }

    /// Rebuild the buffer from every control and encode it.
    pub fn encode(&mut self) -> Token {
        for control in &self.controls {
            control.push(&mut self.buffer);
        }
        let token = Base32::encode(self.buffer.as_bytes());
        debug!("encoded {} controls into {}", self.controls.len(), token);
        token
    }

    /// Decode `token` into the buffer and refresh every control.
    ///
    /// Never fails: missing bytes are zero and unknown symbols count as zero.
    /// A token that does not pass [`Base32::check`] is logged.
    pub fn apply(&mut self, token: &str) {
        if let Err(e) = Base32::check(token, self.buffer.len()) {
            warn!("applying degraded token '{}': {}", token, e);
        }
        self.buffer.load(&Base32::decode(token));
        for control in &self.controls {
            if matches!(control.state(), ControlState::TriState(_))
                && self.buffer.read_field(control.address(), 2) == 3
            {
                warn!(
                    "'{}' holds 3, which reads as indeterminate and re-encodes as 2",
                    control.key()
                );
            }
        }
        self.pull_all();
        debug!("applied token to {} controls", self.controls.len());
    }

    /// Like [`Panel::apply`], but refuses tokens that are not well-formed and
    /// leaves the panel untouched in that case.
    pub fn apply_strict(&mut self, token: &str) -> Result<()> {
        Base32::check(token, self.buffer.len())?;
        self.apply(token);
        Ok(())
    }

    /// Zero the buffer and refresh every control.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pull_all();
    }

    fn pull_all(&mut self) {
        for control in &mut self.controls {
            control.pull(&self.buffer);
        }
    }

    /// Controls in registration order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn control(&self, key: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.key() == key)
    }

    pub fn control_mut(&mut self, key: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.key() == key)
    }

    fn require_mut(&mut self, key: &str) -> Result<&mut Control> {
        self.control_mut(key)
            .ok_or_else(|| FlagError::UnknownControl(key.to_string()))
    }

    /// Assign a textual value to the control named `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.require_mut(key)?.assign(value)
    }

    /// Activate the control named `key` once.
    pub fn activate(&mut self, key: &str) -> Result<()> {
        self.require_mut(key)?.activate();
        Ok(())
    }

    /// Section names in order of first appearance.
    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = Vec::new();
        for section in self.controls.iter().filter_map(|c| c.section()) {
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        sections
    }

    /// Controls of one section, in registration order.
    pub fn section<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Control> + 'a {
        self.controls
            .iter()
            .filter(move |c| c.section() == Some(name))
    }
}
