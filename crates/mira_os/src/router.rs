#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use tracing::{debug, warn};

use mira_engines::lexicon::{Lexicon, MATERIAL_TEXTURES};
use mira_kernel_contracts::intent::{Intent, IntentKind, PatternRef};
use mira_kernel_contracts::product::ProductList;
use mira_kernel_contracts::section::{Category, Mode, ReplacePolicy, SectionId};
use mira_kernel_contracts::selection::{HexColor, SelectionState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("cart rejected {product_id}: {reason}")]
    Rejected { product_id: String, reason: String },
    #[error("cart service unavailable")]
    Unavailable,
}

/// Navigation surface of the host UI.
pub trait NavigationPort {
    fn current_path(&self) -> String;
    fn navigate_to(&mut self, path: &str);
    fn set_category(&mut self, category: Category);
}

/// Access to each section's externally owned selection state. The router
/// never stores selection state itself; it only mutates through this port.
pub trait SelectionPort {
    fn selection_mut(&mut self, section: SectionId) -> Option<&mut SelectionState>;
    fn invalidate_product_query(&mut self, section: SectionId);
}

/// The section's currently loaded product list, optionally narrowed by
/// color family. Ordinal references are re-resolved on every call.
pub trait ProductLookupPort {
    fn product_list(&self, section: SectionId, color_family: Option<&str>) -> ProductList;
}

pub trait CartPort {
    fn add_to_cart(&mut self, product_id: &str, display_url: &str) -> Result<(), CartError>;
}

/// Mutable routing context carried across dispatches. The active section is
/// re-captured once per dispatch call; the counters persist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouterState {
    pub active_section: Option<SectionId>,
    pub replace_index: BTreeMap<SectionId, usize>,
    pub pending_product_number: Option<u32>,
    pub pending_cart_number: Option<u32>,
}

impl RouterState {
    pub fn v1() -> Self {
        Self::default()
    }
}

/// What happened to one intent. Every variant is non-fatal: the worst case
/// of a miss is an ignored voice command, never an error the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied(IntentKind),
    IgnoredForSection(IntentKind),
    OutOfRange(IntentKind),
    UnknownTarget(IntentKind),
    CartFailed(IntentKind),
}

/// Applies extracted intents to the active section's selection state.
pub struct RouterRuntime {
    lexicon: Lexicon,
}

impl RouterRuntime {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::v1(),
        }
    }

    /// Apply `intents` in order against the section that is on screen right
    /// now. The active section is captured once at invocation time; a
    /// navigation intent inside the batch does not redirect later intents.
    pub fn dispatch<P>(
        &self,
        intents: &[Intent],
        state: &mut RouterState,
        ports: &mut P,
    ) -> Vec<DispatchOutcome>
    where
        P: NavigationPort + SelectionPort + ProductLookupPort + CartPort,
    {
        state.active_section = SectionId::from_path_segment(&ports.current_path());
        intents
            .iter()
            .map(|intent| {
                let outcome = self.dispatch_one(intent, state, ports);
                match outcome {
                    DispatchOutcome::Applied(_) => {}
                    _ => debug!(?outcome, ?intent, "intent not applied"),
                }
                outcome
            })
            .collect()
    }

    fn dispatch_one<P>(
        &self,
        intent: &Intent,
        state: &mut RouterState,
        ports: &mut P,
    ) -> DispatchOutcome
    where
        P: NavigationPort + SelectionPort + ProductLookupPort + CartPort,
    {
        let kind = intent.kind();
        match intent {
            Intent::NavigateSection(category) => {
                ports.set_category(*category);
                DispatchOutcome::Applied(kind)
            }
            Intent::NavigateSubSection(name) => match SectionId::from_spoken_name(name) {
                Some(section) => {
                    state.pending_product_number = None;
                    ports.navigate_to(section.route_path());
                    DispatchOutcome::Applied(kind)
                }
                None => DispatchOutcome::UnknownTarget(kind),
            },
            Intent::SelectColor { label, hex } => self.apply_color(label, hex.as_ref(), state, ports),
            Intent::SelectColorByIndex(index) => self.apply_color_index(*index, state, ports),
            Intent::SelectTexture(label) => self.apply_texture(label, state, ports),
            Intent::SetMode(label) => self.apply_mode(label, state, ports),
            Intent::SetPatternOrShape(reference) => self.apply_pattern(reference, state, ports),
            Intent::SetDarkness(percent) => self.apply_darkness(*percent, state, ports),
            Intent::SelectProductByNumber(number) => self.apply_product(*number, state, ports),
            Intent::AddToCartByNumber(number) => self.apply_cart(*number, state, ports),
        }
    }

    fn apply_color<P>(
        &self,
        label: &str,
        hex: Option<&HexColor>,
        state: &RouterState,
        ports: &mut P,
    ) -> DispatchOutcome
    where
        P: SelectionPort,
    {
        let kind = IntentKind::SelectColor;
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        if !section.has_color() {
            return DispatchOutcome::IgnoredForSection(kind);
        }

        match section {
            SectionId::LipPlumper => {
                let Some(value) = self.lexicon.plumper_colors.get(label) else {
                    return DispatchOutcome::UnknownTarget(kind);
                };
                let Some(fixed) = HexColor::v1(value).ok() else {
                    return DispatchOutcome::UnknownTarget(kind);
                };
                let Some(selection) = ports.selection_mut(section) else {
                    return DispatchOutcome::IgnoredForSection(kind);
                };
                selection.color_family = Some(label.to_string());
                selection.selected_colors = vec![fixed];
                DispatchOutcome::Applied(kind)
            }
            SectionId::Foundation | SectionId::Concealer => {
                // Skin-tone names resolve through their own table, not the
                // color-name table.
                let Some(value) = self.lexicon.skin_tones.get(label) else {
                    return DispatchOutcome::UnknownTarget(kind);
                };
                let Some(tone) = HexColor::v1(value).ok() else {
                    return DispatchOutcome::UnknownTarget(kind);
                };
                let Some(selection) = ports.selection_mut(section) else {
                    return DispatchOutcome::IgnoredForSection(kind);
                };
                selection.color_family = Some(label.to_string());
                selection.selected_colors = vec![tone];
                DispatchOutcome::Applied(kind)
            }
            _ => {
                if hex.is_none() {
                    return DispatchOutcome::UnknownTarget(kind);
                }
                {
                    let Some(selection) = ports.selection_mut(section) else {
                        return DispatchOutcome::IgnoredForSection(kind);
                    };
                    selection.color_family = Some(label.to_string());
                }
                if section == SectionId::LipColor {
                    // A new family invalidates the family-keyed product
                    // query.
                    ports.invalidate_product_query(section);
                }
                DispatchOutcome::Applied(kind)
            }
        }
    }

    fn apply_color_index<P>(
        &self,
        index: u32,
        state: &RouterState,
        ports: &mut P,
    ) -> DispatchOutcome
    where
        P: SelectionPort + ProductLookupPort,
    {
        let kind = IntentKind::SelectColorByIndex;
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        if !section.has_color() {
            return DispatchOutcome::IgnoredForSection(kind);
        }

        let family = match ports.selection_mut(section) {
            Some(selection) => selection.color_family.clone(),
            None => return DispatchOutcome::IgnoredForSection(kind),
        };
        let list = ports.product_list(section, family.as_deref());
        let hexes = list.unique_hex_codes();
        let Some(hex) = (index as usize)
            .checked_sub(1)
            .and_then(|i| hexes.get(i).cloned())
        else {
            return DispatchOutcome::OutOfRange(kind);
        };

        let Some(selection) = ports.selection_mut(section) else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        apply_swatch_shade(selection, hex);
        DispatchOutcome::Applied(kind)
    }

    fn apply_texture<P>(&self, label: &str, state: &RouterState, ports: &mut P) -> DispatchOutcome
    where
        P: SelectionPort,
    {
        let kind = IntentKind::SelectTexture;
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        if !section.has_texture() {
            return DispatchOutcome::IgnoredForSection(kind);
        }
        let Some(value) = self.lexicon.texture_values.get(label) else {
            return DispatchOutcome::UnknownTarget(kind);
        };
        let Some(selection) = ports.selection_mut(section) else {
            return DispatchOutcome::IgnoredForSection(kind);
        };

        if section.texture_toggles() {
            if selection.selected_texture.as_deref() == Some(value) {
                // Re-selecting the active texture clears it.
                selection.selected_texture = None;
                selection.material_index = None;
            } else {
                selection.selected_texture = Some(value.to_string());
                selection.material_index = MATERIAL_TEXTURES
                    .iter()
                    .position(|texture| *texture == value)
                    .map(|position| position as u8);
            }
        } else {
            selection.selected_texture = Some(value.to_string());
        }
        DispatchOutcome::Applied(kind)
    }

    fn apply_mode<P>(
        &self,
        label: &str,
        state: &mut RouterState,
        ports: &mut P,
    ) -> DispatchOutcome
    where
        P: SelectionPort,
    {
        let kind = IntentKind::SetMode;
        let Some(mode) = Mode::parse_label(label) else {
            return DispatchOutcome::UnknownTarget(kind);
        };
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        if !section.allowed_modes().contains(&mode) {
            return DispatchOutcome::IgnoredForSection(kind);
        }
        let Some(selection) = ports.selection_mut(section) else {
            return DispatchOutcome::IgnoredForSection(kind);
        };

        selection.selected_mode = mode;
        let max = mode.max_colors();
        if selection.selected_colors.len() > max {
            selection.selected_colors.truncate(max);
        }
        if max == 1 {
            state.replace_index.insert(section, 0);
        }
        DispatchOutcome::Applied(kind)
    }

    fn apply_pattern<P>(
        &self,
        reference: &PatternRef,
        state: &RouterState,
        ports: &mut P,
    ) -> DispatchOutcome
    where
        P: SelectionPort,
    {
        let kind = IntentKind::SetPatternOrShape;
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        let labels = section.pattern_labels();
        if labels.is_empty() {
            return DispatchOutcome::IgnoredForSection(kind);
        }

        let index = match reference {
            PatternRef::Index(index) => {
                if *index == 0 || *index as usize > labels.len() {
                    return DispatchOutcome::OutOfRange(kind);
                }
                *index as u8
            }
            PatternRef::Label(label) => {
                match labels
                    .iter()
                    .position(|candidate| candidate.eq_ignore_ascii_case(label))
                {
                    Some(position) => (position + 1) as u8,
                    None => return DispatchOutcome::UnknownTarget(kind),
                }
            }
        };

        let Some(selection) = ports.selection_mut(section) else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        selection.selected_pattern = Some(index);
        DispatchOutcome::Applied(kind)
    }

    fn apply_darkness<P>(&self, percent: f32, state: &RouterState, ports: &mut P) -> DispatchOutcome
    where
        P: SelectionPort,
    {
        let kind = IntentKind::SetDarkness;
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        if !section.has_darkness() {
            return DispatchOutcome::IgnoredForSection(kind);
        }
        let Some(selection) = ports.selection_mut(section) else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        selection.darkness = (percent / 100.0).clamp(0.0, 1.0);
        DispatchOutcome::Applied(kind)
    }

    fn apply_product<P>(
        &self,
        number: u32,
        state: &mut RouterState,
        ports: &mut P,
    ) -> DispatchOutcome
    where
        P: SelectionPort + ProductLookupPort,
    {
        let kind = IntentKind::SelectProductByNumber;
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        state.pending_product_number = Some(number);

        let family = match ports.selection_mut(section) {
            Some(selection) => selection.color_family.clone(),
            None => return DispatchOutcome::IgnoredForSection(kind),
        };
        let list = ports.product_list(section, family.as_deref());
        let Some(item) = list.nth_item(number).cloned() else {
            return DispatchOutcome::OutOfRange(kind);
        };

        let policy = section.product_replace_policy();
        let slot = next_replace_slot(state, section);
        let Some(selection) = ports.selection_mut(section) else {
            return DispatchOutcome::IgnoredForSection(kind);
        };

        if section.has_color() {
            if let Some(hex) = item.hex_codes.first() {
                if apply_product_shade(selection, hex.clone(), policy, slot) {
                    advance_replace_slot(state, section, selection.selected_mode.max_colors());
                }
            }
        }
        if let Some(texture) = &item.texture {
            if section.has_texture() {
                selection.selected_texture = Some(texture.clone());
                if section.texture_toggles() {
                    selection.material_index = MATERIAL_TEXTURES
                        .iter()
                        .position(|candidate| candidate == texture)
                        .map(|position| position as u8);
                }
            }
        }
        if let Some(pattern) = item.pattern_index {
            if section.has_pattern() && (pattern as usize) <= section.pattern_labels().len() {
                selection.selected_pattern = Some(pattern);
            }
        }

        state.pending_product_number = None;
        DispatchOutcome::Applied(kind)
    }

    fn apply_cart<P>(&self, number: u32, state: &mut RouterState, ports: &mut P) -> DispatchOutcome
    where
        P: SelectionPort + ProductLookupPort + CartPort,
    {
        let kind = IntentKind::AddToCartByNumber;
        let Some(section) = state.active_section else {
            return DispatchOutcome::IgnoredForSection(kind);
        };
        state.pending_cart_number = Some(number);

        let family = match ports.selection_mut(section) {
            Some(selection) => selection.color_family.clone(),
            None => {
                state.pending_cart_number = None;
                return DispatchOutcome::IgnoredForSection(kind);
            }
        };
        let list = ports.product_list(section, family.as_deref());
        let Some(item) = list.nth_item(number).cloned() else {
            state.pending_cart_number = None;
            return DispatchOutcome::OutOfRange(kind);
        };

        let result = ports.add_to_cart(&item.product_id, &item.display_url);
        // Cleared on both paths so a rejected add is never retried forever.
        state.pending_cart_number = None;
        match result {
            Ok(()) => DispatchOutcome::Applied(kind),
            Err(error) => {
                warn!(%error, product_id = %item.product_id, "cart add failed");
                DispatchOutcome::CartFailed(kind)
            }
        }
    }
}

impl Default for RouterRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Swatch-style selection: toggle off on reselect, append below the slot
/// cap, drop the oldest shade when full.
fn apply_swatch_shade(selection: &mut SelectionState, hex: HexColor) {
    if let Some(position) = selection.selected_colors.iter().position(|c| *c == hex) {
        selection.selected_colors.remove(position);
        return;
    }
    let max = selection.selected_mode.max_colors();
    if selection.selected_colors.len() < max {
        selection.selected_colors.push(hex);
    } else {
        selection.selected_colors.remove(0);
        selection.selected_colors.push(hex);
    }
}

/// Product-driven shade write. Returns true when the rotating replace slot
/// was consumed and must advance.
fn apply_product_shade(
    selection: &mut SelectionState,
    hex: HexColor,
    policy: ReplacePolicy,
    slot: usize,
) -> bool {
    if selection.selected_colors.contains(&hex) {
        return false;
    }
    let max = selection.selected_mode.max_colors();
    if selection.selected_colors.len() < max {
        selection.selected_colors.push(hex);
        return false;
    }
    match policy {
        ReplacePolicy::DropOldest => {
            selection.selected_colors.remove(0);
            selection.selected_colors.push(hex);
            false
        }
        ReplacePolicy::RotatingIndex => {
            let slot = slot % max;
            selection.selected_colors[slot] = hex;
            true
        }
    }
}

fn next_replace_slot(state: &RouterState, section: SectionId) -> usize {
    state.replace_index.get(&section).copied().unwrap_or(0)
}

fn advance_replace_slot(state: &mut RouterState, section: SectionId, max: usize) {
    let slot = next_replace_slot(state, section);
    state.replace_index.insert(section, (slot + 1) % max.max(1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mira_kernel_contracts::product::{ProductItem, ProductList};
    use mira_kernel_contracts::section::ALL_SECTIONS;

    struct TestHost {
        path: String,
        category: Option<Category>,
        navigated_to: Vec<String>,
        selections: BTreeMap<SectionId, SelectionState>,
        products: BTreeMap<SectionId, ProductList>,
        invalidated: Vec<SectionId>,
        cart: Vec<String>,
        cart_fails: bool,
    }

    impl TestHost {
        fn at(section: SectionId) -> Self {
            let mut selections = BTreeMap::new();
            for s in ALL_SECTIONS {
                selections.insert(s, SelectionState::v1(s));
            }
            Self {
                path: section.route_path().to_string(),
                category: None,
                navigated_to: Vec::new(),
                selections,
                products: BTreeMap::new(),
                invalidated: Vec::new(),
                cart: Vec::new(),
                cart_fails: false,
            }
        }

        fn with_products(mut self, section: SectionId, hex_sets: &[&[&str]]) -> Self {
            let items = hex_sets
                .iter()
                .enumerate()
                .map(|(i, hexes)| {
                    ProductItem::v1(
                        format!("p{}", i + 1),
                        format!("https://shop.example/p{}", i + 1),
                        hexes.iter().map(|h| HexColor::v1(*h).unwrap()).collect(),
                        None,
                        None,
                    )
                    .unwrap()
                })
                .collect();
            self.products.insert(section, ProductList::v1(items).unwrap());
            self
        }

        fn selection(&self, section: SectionId) -> &SelectionState {
            &self.selections[&section]
        }

        fn colors(&self, section: SectionId) -> Vec<&str> {
            self.selection(section)
                .selected_colors
                .iter()
                .map(HexColor::as_str)
                .collect()
        }
    }

    impl NavigationPort for TestHost {
        fn current_path(&self) -> String {
            self.path.clone()
        }
        fn navigate_to(&mut self, path: &str) {
            self.navigated_to.push(path.to_string());
        }
        fn set_category(&mut self, category: Category) {
            self.category = Some(category);
        }
    }

    impl SelectionPort for TestHost {
        fn selection_mut(&mut self, section: SectionId) -> Option<&mut SelectionState> {
            self.selections.get_mut(&section)
        }
        fn invalidate_product_query(&mut self, section: SectionId) {
            self.invalidated.push(section);
        }
    }

    impl ProductLookupPort for TestHost {
        fn product_list(&self, section: SectionId, _color_family: Option<&str>) -> ProductList {
            self.products.get(&section).cloned().unwrap_or_default()
        }
    }

    impl CartPort for TestHost {
        fn add_to_cart(&mut self, product_id: &str, _display_url: &str) -> Result<(), CartError> {
            if self.cart_fails {
                return Err(CartError::Rejected {
                    product_id: product_id.to_string(),
                    reason: "out of stock".to_string(),
                });
            }
            self.cart.push(product_id.to_string());
            Ok(())
        }
    }

    fn dispatch_one(intent: Intent, state: &mut RouterState, host: &mut TestHost) -> DispatchOutcome {
        RouterRuntime::new().dispatch(&[intent], state, host)[0]
    }

    fn red() -> Intent {
        Intent::SelectColor {
            label: "Red".to_string(),
            hex: Some(HexColor::v1("#FF0000").unwrap()),
        }
    }

    #[test]
    fn at_route_01_select_red_on_lip_color_sets_family_and_invalidates() {
        let mut host = TestHost::at(SectionId::LipColor);
        let mut state = RouterState::v1();

        let outcome = dispatch_one(red(), &mut state, &mut host);
        assert_eq!(outcome, DispatchOutcome::Applied(IntentKind::SelectColor));
        assert_eq!(
            host.selection(SectionId::LipColor).color_family.as_deref(),
            Some("Red")
        );
        assert_eq!(host.invalidated, vec![SectionId::LipColor]);
    }

    #[test]
    fn at_route_02_dual_mode_fifo_keeps_the_newest_two_shades() {
        let mut host = TestHost::at(SectionId::LipColor).with_products(
            SectionId::LipColor,
            &[&["#AA0000"], &["#BB0000"], &["#CC0000"]],
        );
        let mut state = RouterState::v1();
        dispatch_one(Intent::SetMode("Dual".to_string()), &mut state, &mut host);

        for index in 1..=3 {
            dispatch_one(Intent::SelectColorByIndex(index), &mut state, &mut host);
        }
        assert_eq!(host.colors(SectionId::LipColor), vec!["#BB0000", "#CC0000"]);
    }

    #[test]
    fn at_route_03_reselecting_a_shade_toggles_it_off() {
        let mut host = TestHost::at(SectionId::EyeShadow)
            .with_products(SectionId::EyeShadow, &[&["#AA0000"], &["#BB0000"]]);
        let mut state = RouterState::v1();
        dispatch_one(Intent::SetMode("Tri".to_string()), &mut state, &mut host);

        dispatch_one(Intent::SelectColorByIndex(1), &mut state, &mut host);
        dispatch_one(Intent::SelectColorByIndex(2), &mut state, &mut host);
        dispatch_one(Intent::SelectColorByIndex(1), &mut state, &mut host);
        assert_eq!(host.colors(SectionId::EyeShadow), vec!["#BB0000"]);
    }

    #[test]
    fn at_route_04_out_of_range_color_index_is_a_no_op() {
        let mut host = TestHost::at(SectionId::LipColor)
            .with_products(SectionId::LipColor, &[&["#AA0000"], &["#BB0000"]]);
        let mut state = RouterState::v1();

        let outcome = dispatch_one(Intent::SelectColorByIndex(3), &mut state, &mut host);
        assert_eq!(
            outcome,
            DispatchOutcome::OutOfRange(IntentKind::SelectColorByIndex)
        );
        assert!(host.colors(SectionId::LipColor).is_empty());
    }

    #[test]
    fn at_route_05_texture_is_gated_by_section_capability() {
        let mut host = TestHost::at(SectionId::LipLiner);
        let mut state = RouterState::v1();
        let before = host.selection(SectionId::LipLiner).clone();

        let outcome = dispatch_one(
            Intent::SelectTexture("Matte".to_string()),
            &mut state,
            &mut host,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::IgnoredForSection(IntentKind::SelectTexture)
        );
        assert_eq!(*host.selection(SectionId::LipLiner), before);
    }

    #[test]
    fn at_route_06_set_dual_with_one_shade_does_not_truncate() {
        let mut host = TestHost::at(SectionId::LipColor);
        let mut state = RouterState::v1();
        host.selection_mut(SectionId::LipColor)
            .unwrap()
            .selected_colors = vec![HexColor::v1("#AA0000").unwrap()];

        let outcome = dispatch_one(Intent::SetMode("Dual".to_string()), &mut state, &mut host);
        assert_eq!(outcome, DispatchOutcome::Applied(IntentKind::SetMode));
        let selection = host.selection(SectionId::LipColor);
        assert_eq!(selection.selected_mode, Mode::Dual);
        assert_eq!(selection.selected_colors.len(), 1);
    }

    #[test]
    fn at_route_07_narrowing_to_one_truncates_and_resets_the_replace_slot() {
        let mut host = TestHost::at(SectionId::Blush);
        let mut state = RouterState::v1();
        state.replace_index.insert(SectionId::Blush, 2);
        {
            let selection = host.selection_mut(SectionId::Blush).unwrap();
            selection.selected_mode = Mode::Tri;
            selection.selected_colors = vec![
                HexColor::v1("#AA0000").unwrap(),
                HexColor::v1("#BB0000").unwrap(),
                HexColor::v1("#CC0000").unwrap(),
            ];
        }

        dispatch_one(Intent::SetMode("One".to_string()), &mut state, &mut host);
        assert_eq!(host.colors(SectionId::Blush), vec!["#AA0000"]);
        assert_eq!(state.replace_index[&SectionId::Blush], 0);
    }

    #[test]
    fn at_route_08_mode_outside_section_set_is_ignored() {
        let mut host = TestHost::at(SectionId::LipColor);
        let mut state = RouterState::v1();

        let outcome = dispatch_one(Intent::SetMode("Tri".to_string()), &mut state, &mut host);
        assert_eq!(outcome, DispatchOutcome::IgnoredForSection(IntentKind::SetMode));
        assert_eq!(host.selection(SectionId::LipColor).selected_mode, Mode::One);

        let outcome = dispatch_one(Intent::SetMode("Ombre".to_string()), &mut state, &mut host);
        assert_eq!(outcome, DispatchOutcome::Applied(IntentKind::SetMode));
    }

    #[test]
    fn at_route_09_product_number_two_derives_item_attributes() {
        let mut host = TestHost::at(SectionId::Eyebrows);
        let items: Vec<ProductItem> = (1..=5)
            .map(|i| {
                ProductItem::v1(
                    format!("brow{i}"),
                    format!("https://shop.example/brow{i}"),
                    vec![HexColor::v1(format!("#11223{i}")).unwrap()],
                    None,
                    Some(i as u8),
                )
                .unwrap()
            })
            .collect();
        host.products
            .insert(SectionId::Eyebrows, ProductList::v1(items).unwrap());
        let mut state = RouterState::v1();

        let outcome = dispatch_one(Intent::SelectProductByNumber(2), &mut state, &mut host);
        assert_eq!(
            outcome,
            DispatchOutcome::Applied(IntentKind::SelectProductByNumber)
        );
        let selection = host.selection(SectionId::Eyebrows);
        assert_eq!(selection.selected_colors[0].as_str(), "#112232");
        assert_eq!(selection.selected_pattern, Some(2));
        assert_eq!(state.pending_product_number, None);
    }

    #[test]
    fn at_route_10_blush_products_rotate_while_swatches_fifo() {
        let mut host = TestHost::at(SectionId::Blush).with_products(
            SectionId::Blush,
            &[&["#010101"], &["#020202"], &["#030303"], &["#040404"], &["#050505"]],
        );
        let mut state = RouterState::v1();
        dispatch_one(Intent::SetMode("Dual".to_string()), &mut state, &mut host);

        // Product-driven writes beyond the cap cycle the replace slot.
        for number in 1..=4 {
            dispatch_one(Intent::SelectProductByNumber(number), &mut state, &mut host);
        }
        // 1,2 fill; 3 replaces slot 0; 4 replaces slot 1.
        assert_eq!(host.colors(SectionId::Blush), vec!["#030303", "#040404"]);

        // A swatch selection on the same full state drops the oldest.
        dispatch_one(Intent::SelectColorByIndex(5), &mut state, &mut host);
        assert_eq!(host.colors(SectionId::Blush), vec!["#040404", "#050505"]);
    }

    #[test]
    fn at_route_11_cart_failures_clear_the_pending_number() {
        let mut host = TestHost::at(SectionId::LipColor)
            .with_products(SectionId::LipColor, &[&["#AA0000"]]);
        host.cart_fails = true;
        let mut state = RouterState::v1();

        let outcome = dispatch_one(Intent::AddToCartByNumber(1), &mut state, &mut host);
        assert_eq!(
            outcome,
            DispatchOutcome::CartFailed(IntentKind::AddToCartByNumber)
        );
        assert_eq!(state.pending_cart_number, None);
        assert!(host.cart.is_empty());

        host.cart_fails = false;
        let outcome = dispatch_one(Intent::AddToCartByNumber(1), &mut state, &mut host);
        assert_eq!(
            outcome,
            DispatchOutcome::Applied(IntentKind::AddToCartByNumber)
        );
        assert_eq!(host.cart, vec!["p1".to_string()]);
    }

    #[test]
    fn at_route_12_sub_section_navigation_clears_pending_product() {
        let mut host = TestHost::at(SectionId::LipColor);
        let mut state = RouterState::v1();
        state.pending_product_number = Some(4);

        let outcome = dispatch_one(
            Intent::NavigateSubSection("Eye Shadow".to_string()),
            &mut state,
            &mut host,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::Applied(IntentKind::NavigateSubSection)
        );
        assert_eq!(state.pending_product_number, None);
        assert_eq!(host.navigated_to, vec!["/try-on/eye-shadow".to_string()]);

        let outcome = dispatch_one(
            Intent::NavigateSubSection("Socks".to_string()),
            &mut state,
            &mut host,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::UnknownTarget(IntentKind::NavigateSubSection)
        );
    }

    #[test]
    fn at_route_13_darkness_applies_to_eyebrows_only() {
        let mut host = TestHost::at(SectionId::Eyebrows);
        let mut state = RouterState::v1();

        dispatch_one(Intent::SetDarkness(10.0), &mut state, &mut host);
        let darkness = host.selection(SectionId::Eyebrows).darkness;
        assert!((darkness - 0.1).abs() < f32::EPSILON);

        let mut host = TestHost::at(SectionId::LipColor);
        let outcome = dispatch_one(Intent::SetDarkness(10.0), &mut state, &mut host);
        assert_eq!(
            outcome,
            DispatchOutcome::IgnoredForSection(IntentKind::SetDarkness)
        );
    }

    #[test]
    fn at_route_14_texture_toggle_clears_on_reselect_and_indexes_materials() {
        let mut host = TestHost::at(SectionId::Blush);
        let mut state = RouterState::v1();
        let matte = Intent::SelectTexture("Matte".to_string());

        dispatch_one(matte.clone(), &mut state, &mut host);
        {
            let selection = host.selection(SectionId::Blush);
            assert_eq!(selection.selected_texture.as_deref(), Some("matte"));
            assert_eq!(selection.material_index, Some(0));
        }

        dispatch_one(matte, &mut state, &mut host);
        {
            let selection = host.selection(SectionId::Blush);
            assert_eq!(selection.selected_texture, None);
            assert_eq!(selection.material_index, None);
        }

        // Direct-set sections do not toggle off.
        let mut host = TestHost::at(SectionId::LipColor);
        let glossy = Intent::SelectTexture("Glossy".to_string());
        dispatch_one(glossy.clone(), &mut state, &mut host);
        dispatch_one(glossy, &mut state, &mut host);
        assert_eq!(
            host.selection(SectionId::LipColor).selected_texture.as_deref(),
            Some("gloss")
        );
    }

    #[test]
    fn at_route_15_skin_tones_and_plumper_resolve_their_own_tables() {
        let mut host = TestHost::at(SectionId::Foundation);
        let mut state = RouterState::v1();
        let outcome = dispatch_one(
            Intent::SelectColor {
                label: "Medium".to_string(),
                hex: None,
            },
            &mut state,
            &mut host,
        );
        assert_eq!(outcome, DispatchOutcome::Applied(IntentKind::SelectColor));
        assert_eq!(host.colors(SectionId::Foundation), vec!["#C68642"]);

        let mut host = TestHost::at(SectionId::LipPlumper);
        let outcome = dispatch_one(
            Intent::SelectColor {
                label: "Pink".to_string(),
                hex: Some(HexColor::v1("#FFC0CB").unwrap()),
            },
            &mut state,
            &mut host,
        );
        assert_eq!(outcome, DispatchOutcome::Applied(IntentKind::SelectColor));
        assert_eq!(host.colors(SectionId::LipPlumper), vec!["#FF69B4"]);

        // An unknown tone on foundation mutates nothing.
        let mut host = TestHost::at(SectionId::Foundation);
        let outcome = dispatch_one(
            Intent::SelectColor {
                label: "Red".to_string(),
                hex: Some(HexColor::v1("#FF0000").unwrap()),
            },
            &mut state,
            &mut host,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::UnknownTarget(IntentKind::SelectColor)
        );
        assert!(host.colors(SectionId::Foundation).is_empty());
    }

    #[test]
    fn at_route_16_navigate_section_always_applies() {
        let mut host = TestHost::at(SectionId::LipColor);
        let mut state = RouterState::v1();
        let outcome = dispatch_one(
            Intent::NavigateSection(Category::Eyes),
            &mut state,
            &mut host,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::Applied(IntentKind::NavigateSection)
        );
        assert_eq!(host.category, Some(Category::Eyes));
    }
}
