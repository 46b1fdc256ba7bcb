#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::common::validate_text;
use crate::selection::HexColor;
use crate::{ContractViolation, Validate};

pub const MAX_PRODUCTS_PER_LIST: usize = 64;
pub const MAX_SHADES_PER_PRODUCT: usize = 16;

/// One storefront item as the catalog client delivers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductItem {
    pub product_id: String,
    pub display_url: String,
    pub hex_codes: Vec<HexColor>,
    pub texture: Option<String>,
    pub pattern_index: Option<u8>,
}

impl ProductItem {
    pub fn v1(
        product_id: impl Into<String>,
        display_url: impl Into<String>,
        hex_codes: Vec<HexColor>,
        texture: Option<String>,
        pattern_index: Option<u8>,
    ) -> Result<Self, ContractViolation> {
        let item = Self {
            product_id: product_id.into(),
            display_url: display_url.into(),
            hex_codes,
            texture,
            pattern_index,
        };
        item.validate()?;
        Ok(item)
    }
}

impl Validate for ProductItem {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_text("product_item.product_id", &self.product_id, 64)?;
        validate_text("product_item.display_url", &self.display_url, 256)?;
        if self.hex_codes.len() > MAX_SHADES_PER_PRODUCT {
            return Err(ContractViolation::InvalidValue {
                field: "product_item.hex_codes",
                reason: "exceeds per-product shade budget",
            });
        }
        for hex in &self.hex_codes {
            hex.validate()?;
        }
        if let Some(texture) = &self.texture {
            validate_text("product_item.texture", texture, 32)?;
        }
        if self.pattern_index == Some(0) {
            return Err(ContractViolation::InvalidValue {
                field: "product_item.pattern_index",
                reason: "pattern index is 1-based",
            });
        }
        Ok(())
    }
}

/// The currently loaded product list of one section. Ordinal references are
/// re-resolved against the latest list every time they are consumed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductList {
    items: Vec<ProductItem>,
}

impl ProductList {
    pub fn v1(items: Vec<ProductItem>) -> Result<Self, ContractViolation> {
        let list = Self { items };
        list.validate()?;
        Ok(list)
    }

    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ProductItem] {
        &self.items
    }

    /// 1-based ordinal lookup, the way "product number three" counts.
    pub fn nth_item(&self, ordinal: u32) -> Option<&ProductItem> {
        if ordinal == 0 {
            return None;
        }
        self.items.get(ordinal as usize - 1)
    }

    /// Distinct shade values across the list, first-seen order preserved.
    pub fn unique_hex_codes(&self) -> Vec<HexColor> {
        let mut seen: Vec<HexColor> = Vec::new();
        for item in &self.items {
            for hex in &item.hex_codes {
                if !seen.contains(hex) {
                    seen.push(hex.clone());
                }
            }
        }
        seen
    }
}

impl Validate for ProductList {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.items.len() > MAX_PRODUCTS_PER_LIST {
            return Err(ContractViolation::InvalidValue {
                field: "product_list.items",
                reason: "exceeds product list budget",
            });
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}
