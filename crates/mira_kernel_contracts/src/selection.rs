#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::common::{validate_text, validate_unit_fraction};
use crate::section::{Mode, SectionId};
use crate::{ContractViolation, Validate};

/// A `#RRGGBB` swatch value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexColor(String);

impl HexColor {
    pub fn v1(value: impl Into<String>) -> Result<Self, ContractViolation> {
        let color = Self(value.into());
        color.validate()?;
        Ok(color)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for HexColor {
    fn validate(&self) -> Result<(), ContractViolation> {
        let bytes = self.0.as_bytes();
        if bytes.len() != 7 || bytes[0] != b'#' {
            return Err(ContractViolation::InvalidValue {
                field: "hex_color",
                reason: "must be #RRGGBB",
            });
        }
        if !self.0[1..].chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ContractViolation::InvalidValue {
                field: "hex_color",
                reason: "must contain only hex digits after '#'",
            });
        }
        Ok(())
    }
}

/// The mutable look record of one section. Owned by the section's UI
/// container; the router only mutates it through dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub section: SectionId,
    pub color_family: Option<String>,
    pub selected_colors: Vec<HexColor>,
    pub selected_texture: Option<String>,
    pub material_index: Option<u8>,
    pub selected_mode: Mode,
    pub selected_pattern: Option<u8>,
    pub darkness: f32,
}

impl SelectionState {
    pub fn v1(section: SectionId) -> Self {
        Self {
            section,
            color_family: None,
            selected_colors: Vec::new(),
            selected_texture: None,
            material_index: None,
            selected_mode: Mode::One,
            selected_pattern: None,
            darkness: 0.0,
        }
    }
}

impl Validate for SelectionState {
    fn validate(&self) -> Result<(), ContractViolation> {
        if !self.section.allowed_modes().contains(&self.selected_mode) {
            return Err(ContractViolation::InvalidValue {
                field: "selection_state.selected_mode",
                reason: "mode not allowed for this section",
            });
        }
        if self.selected_colors.len() > self.selected_mode.max_colors() {
            return Err(ContractViolation::InvalidValue {
                field: "selection_state.selected_colors",
                reason: "must not exceed the mode's slot count",
            });
        }
        for color in &self.selected_colors {
            color.validate()?;
        }
        if let Some(family) = &self.color_family {
            validate_text("selection_state.color_family", family, 32)?;
        }
        if let Some(texture) = &self.selected_texture {
            validate_text("selection_state.selected_texture", texture, 32)?;
        }
        if let Some(pattern) = self.selected_pattern {
            if pattern == 0 {
                return Err(ContractViolation::InvalidValue {
                    field: "selection_state.selected_pattern",
                    reason: "pattern index is 1-based",
                });
            }
        }
        validate_unit_fraction("selection_state.darkness", self.darkness)?;
        Ok(())
    }
}
