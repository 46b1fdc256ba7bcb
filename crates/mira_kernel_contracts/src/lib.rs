#![forbid(unsafe_code)]

pub mod capture;
pub mod common;
pub mod intent;
pub mod product;
pub mod section;
pub mod selection;

pub use common::{ContractViolation, SchemaVersion, Validate};
