#![forbid(unsafe_code)]

use crate::common::validate_text;
use crate::{ContractViolation, Validate};

/// One event pushed by the speech-capture collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    Transcript(String),
    Error(String),
    Ended,
}

/// Opaque id of a running capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(pub u64);

/// BCP-47-ish locale tag handed to the capture engine. The Arabic locales
/// are the only ones routed through the normalizer; every other locale is
/// assumed to deliver English transcripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLocale(String);

impl CaptureLocale {
    pub fn v1(tag: impl Into<String>) -> Result<Self, ContractViolation> {
        let locale = Self(tag.into());
        locale.validate()?;
        Ok(locale)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_arabic(&self) -> bool {
        let tag = self.0.to_ascii_lowercase();
        tag == "ar" || tag.starts_with("ar-")
    }
}

impl Validate for CaptureLocale {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_text("capture_locale", &self.0, 32)?;
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ContractViolation::InvalidValue {
                field: "capture_locale",
                reason: "must contain only ASCII alphanumeric and hyphen",
            });
        }
        Ok(())
    }
}
