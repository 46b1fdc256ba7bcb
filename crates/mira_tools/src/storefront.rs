#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use mira_kernel_contracts::product::{ProductItem, ProductList};
use mira_kernel_contracts::section::{Category, SectionId, ALL_SECTIONS};
use mira_kernel_contracts::selection::{HexColor, SelectionState};
use mira_os::router::{CartError, CartPort, NavigationPort, ProductLookupPort, SelectionPort};

/// In-memory stand-in for the storefront UI: owns each section's selection
/// state, a demo product catalog, and a navigation path. Used by the `mira`
/// binary and as a dispatch harness in examples and tests.
pub struct MemoryStorefront {
    path: String,
    category: Option<Category>,
    selections: BTreeMap<SectionId, SelectionState>,
    catalog: BTreeMap<SectionId, ProductList>,
    cart: Vec<String>,
    invalidated: Vec<SectionId>,
}

impl MemoryStorefront {
    pub fn new(start_section: SectionId) -> Self {
        let mut selections = BTreeMap::new();
        for section in ALL_SECTIONS {
            selections.insert(section, SelectionState::v1(section));
        }
        Self {
            path: start_section.route_path().to_string(),
            category: None,
            selections,
            catalog: BTreeMap::new(),
            cart: Vec::new(),
            invalidated: Vec::new(),
        }
    }

    /// A small fixed catalog, three shades per section.
    pub fn with_demo_catalog(start_section: SectionId) -> Self {
        let mut storefront = Self::new(start_section);
        for (index, section) in ALL_SECTIONS.into_iter().enumerate() {
            let items: Vec<ProductItem> = (1..=3u8)
                .map(|n| {
                    let hex = format!("#{:02X}{:02X}{:02X}", 60 + index * 12, 40 + n * 30, 90);
                    ProductItem::v1(
                        format!("{}-{n}", section.as_str()),
                        format!("https://shop.example/{}/{n}", section.as_str()),
                        vec![HexColor::v1(hex).expect("demo hex must be well-formed")],
                        Some("matte".to_string()),
                        section.pattern_labels().first().map(|_| n),
                    )
                    .expect("demo product must be well-formed")
                })
                .collect();
            storefront.catalog.insert(
                section,
                ProductList::v1(items).expect("demo catalog must fit the list budget"),
            );
        }
        storefront
    }

    pub fn selection(&self, section: SectionId) -> &SelectionState {
        &self.selections[&section]
    }

    pub fn cart(&self) -> &[String] {
        &self.cart
    }

    pub fn invalidated(&self) -> &[SectionId] {
        &self.invalidated
    }
}

impl NavigationPort for MemoryStorefront {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn navigate_to(&mut self, path: &str) {
        self.path = path.to_string();
    }

    fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }
}

impl SelectionPort for MemoryStorefront {
    fn selection_mut(&mut self, section: SectionId) -> Option<&mut SelectionState> {
        self.selections.get_mut(&section)
    }

    fn invalidate_product_query(&mut self, section: SectionId) {
        self.invalidated.push(section);
    }
}

impl ProductLookupPort for MemoryStorefront {
    fn product_list(&self, section: SectionId, _color_family: Option<&str>) -> ProductList {
        self.catalog.get(&section).cloned().unwrap_or_default()
    }
}

impl CartPort for MemoryStorefront {
    fn add_to_cart(&mut self, product_id: &str, _display_url: &str) -> Result<(), CartError> {
        self.cart.push(product_id.to_string());
        Ok(())
    }
}
