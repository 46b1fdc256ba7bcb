#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::common::validate_text;
use crate::section::Category;
use crate::selection::HexColor;
use crate::{ContractViolation, Validate};

/// Pattern/shape reference: a 1-based catalog index when the utterance
/// carried a number, otherwise the spoken label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternRef {
    Index(u32),
    Label(String),
}

/// A structured command extracted from one transcript, ready for dispatch.
///
/// An intent is only ever constructed from a successfully matched rule;
/// malformed captures are dropped by the parser instead of carrying an
/// invalid payload this far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    NavigateSection(Category),
    NavigateSubSection(String),
    SelectColor {
        label: String,
        hex: Option<HexColor>,
    },
    SelectColorByIndex(u32),
    SelectTexture(String),
    SetMode(String),
    SetPatternOrShape(PatternRef),
    SetDarkness(f32),
    SelectProductByNumber(u32),
    AddToCartByNumber(u32),
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::NavigateSection(_) => IntentKind::NavigateSection,
            Intent::NavigateSubSection(_) => IntentKind::NavigateSubSection,
            Intent::SelectColor { .. } => IntentKind::SelectColor,
            Intent::SelectColorByIndex(_) => IntentKind::SelectColorByIndex,
            Intent::SelectTexture(_) => IntentKind::SelectTexture,
            Intent::SetMode(_) => IntentKind::SetMode,
            Intent::SetPatternOrShape(_) => IntentKind::SetPatternOrShape,
            Intent::SetDarkness(_) => IntentKind::SetDarkness,
            Intent::SelectProductByNumber(_) => IntentKind::SelectProductByNumber,
            Intent::AddToCartByNumber(_) => IntentKind::AddToCartByNumber,
        }
    }
}

impl Validate for Intent {
    fn validate(&self) -> Result<(), ContractViolation> {
        match self {
            Intent::NavigateSection(_) => Ok(()),
            Intent::NavigateSubSection(name) => {
                validate_text("intent.navigate_sub_section", name, 64)
            }
            Intent::SelectColor { label, hex } => {
                validate_text("intent.select_color.label", label, 32)?;
                if let Some(hex) = hex {
                    hex.validate()?;
                }
                Ok(())
            }
            Intent::SelectColorByIndex(index) => {
                if *index == 0 {
                    return Err(ContractViolation::InvalidValue {
                        field: "intent.select_color_by_index",
                        reason: "index is 1-based",
                    });
                }
                Ok(())
            }
            Intent::SelectTexture(label) => validate_text("intent.select_texture", label, 32),
            Intent::SetMode(label) => validate_text("intent.set_mode", label, 16),
            Intent::SetPatternOrShape(PatternRef::Index(index)) => {
                if *index == 0 {
                    return Err(ContractViolation::InvalidValue {
                        field: "intent.set_pattern_or_shape",
                        reason: "index is 1-based",
                    });
                }
                Ok(())
            }
            Intent::SetPatternOrShape(PatternRef::Label(label)) => {
                validate_text("intent.set_pattern_or_shape", label, 32)
            }
            Intent::SetDarkness(percent) => {
                if !percent.is_finite() {
                    return Err(ContractViolation::NotFinite {
                        field: "intent.set_darkness",
                    });
                }
                if !(0.0..=100.0).contains(percent) {
                    return Err(ContractViolation::InvalidRange {
                        field: "intent.set_darkness",
                        min: 0.0,
                        max: 100.0,
                        got: *percent as f64,
                    });
                }
                Ok(())
            }
            Intent::SelectProductByNumber(number) | Intent::AddToCartByNumber(number) => {
                if *number == 0 {
                    return Err(ContractViolation::InvalidValue {
                        field: "intent.product_number",
                        reason: "product numbers are 1-based",
                    });
                }
                Ok(())
            }
        }
    }
}

/// Discriminant used by dispatch outcomes and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    NavigateSection,
    NavigateSubSection,
    SelectColor,
    SelectColorByIndex,
    SelectTexture,
    SetMode,
    SetPatternOrShape,
    SetDarkness,
    SelectProductByNumber,
    AddToCartByNumber,
}
