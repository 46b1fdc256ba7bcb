#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Top-level product category a voice command can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Lips,
    Eyes,
    Face,
    Hair,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Lips => "Lips",
            Category::Eyes => "Eyes",
            Category::Face => "Face",
            Category::Hair => "Hair",
        }
    }

    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "lips" => Some(Category::Lips),
            "eyes" => Some(Category::Eyes),
            "face" => Some(Category::Face),
            "hair" => Some(Category::Hair),
            _ => None,
        }
    }
}

/// How many simultaneous shades a section's look may combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    One,
    Dual,
    Tri,
    Ombre,
    Quad,
    Penta,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::One => "One",
            Mode::Dual => "Dual",
            Mode::Tri => "Tri",
            Mode::Ombre => "Ombre",
            Mode::Quad => "Quad",
            Mode::Penta => "Penta",
        }
    }

    pub fn max_colors(self) -> usize {
        match self {
            Mode::One => 1,
            Mode::Dual | Mode::Ombre => 2,
            Mode::Tri => 3,
            Mode::Quad => 4,
            Mode::Penta => 5,
        }
    }

    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "one" => Some(Mode::One),
            "dual" => Some(Mode::Dual),
            "tri" => Some(Mode::Tri),
            "ombre" => Some(Mode::Ombre),
            "quad" => Some(Mode::Quad),
            "penta" => Some(Mode::Penta),
            _ => None,
        }
    }
}

/// Replacement behavior when a product-driven shade write lands on a full
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacePolicy {
    DropOldest,
    RotatingIndex,
}

/// The sub-section (product page) a selection state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionId {
    LipColor,
    LipLiner,
    LipPlumper,
    Eyebrows,
    EyeShadow,
    EyeLiner,
    Lashes,
    Mascara,
    Foundation,
    Concealer,
    Contour,
    Blush,
    Bronzer,
    Highlighter,
    HairColor,
}

pub const ALL_SECTIONS: [SectionId; 15] = [
    SectionId::LipColor,
    SectionId::LipLiner,
    SectionId::LipPlumper,
    SectionId::Eyebrows,
    SectionId::EyeShadow,
    SectionId::EyeLiner,
    SectionId::Lashes,
    SectionId::Mascara,
    SectionId::Foundation,
    SectionId::Concealer,
    SectionId::Contour,
    SectionId::Blush,
    SectionId::Bronzer,
    SectionId::Highlighter,
    SectionId::HairColor,
];

impl SectionId {
    /// Route-segment form, also the canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::LipColor => "lip-color",
            SectionId::LipLiner => "lip-liner",
            SectionId::LipPlumper => "lip-plumper",
            SectionId::Eyebrows => "eyebrows",
            SectionId::EyeShadow => "eye-shadow",
            SectionId::EyeLiner => "eye-liner",
            SectionId::Lashes => "lashes",
            SectionId::Mascara => "mascara",
            SectionId::Foundation => "foundation",
            SectionId::Concealer => "concealer",
            SectionId::Contour => "contour",
            SectionId::Blush => "blush",
            SectionId::Bronzer => "bronzer",
            SectionId::Highlighter => "highlighter",
            SectionId::HairColor => "hair-color",
        }
    }

    pub fn route_path(self) -> &'static str {
        match self {
            SectionId::LipColor => "/try-on/lip-color",
            SectionId::LipLiner => "/try-on/lip-liner",
            SectionId::LipPlumper => "/try-on/lip-plumper",
            SectionId::Eyebrows => "/try-on/eyebrows",
            SectionId::EyeShadow => "/try-on/eye-shadow",
            SectionId::EyeLiner => "/try-on/eye-liner",
            SectionId::Lashes => "/try-on/lashes",
            SectionId::Mascara => "/try-on/mascara",
            SectionId::Foundation => "/try-on/foundation",
            SectionId::Concealer => "/try-on/concealer",
            SectionId::Contour => "/try-on/contour",
            SectionId::Blush => "/try-on/blush",
            SectionId::Bronzer => "/try-on/bronzer",
            SectionId::Highlighter => "/try-on/highlighter",
            SectionId::HairColor => "/try-on/hair-color",
        }
    }

    pub fn category(self) -> Category {
        match self {
            SectionId::LipColor | SectionId::LipLiner | SectionId::LipPlumper => Category::Lips,
            SectionId::Eyebrows
            | SectionId::EyeShadow
            | SectionId::EyeLiner
            | SectionId::Lashes
            | SectionId::Mascara => Category::Eyes,
            SectionId::Foundation
            | SectionId::Concealer
            | SectionId::Contour
            | SectionId::Blush
            | SectionId::Bronzer
            | SectionId::Highlighter => Category::Face,
            SectionId::HairColor => Category::Hair,
        }
    }

    /// Derive the active section from the final segment of a navigation path.
    pub fn from_path_segment(path: &str) -> Option<Self> {
        let segment = path.trim_end_matches('/').rsplit('/').next()?;
        ALL_SECTIONS
            .into_iter()
            .find(|section| section.as_str() == segment)
    }

    /// Match a spoken sub-section name: case-insensitive, with whitespace and
    /// hyphens ignored ("Lip Color", "lipcolor", "lip-color" all resolve).
    pub fn from_spoken_name(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        if folded.is_empty() {
            return None;
        }
        ALL_SECTIONS.into_iter().find(|section| {
            section
                .as_str()
                .chars()
                .filter(|c| *c != '-')
                .collect::<String>()
                == folded
        })
    }

    pub fn has_color(self) -> bool {
        !matches!(self, SectionId::Lashes)
    }

    pub fn has_texture(self) -> bool {
        matches!(
            self,
            SectionId::LipColor
                | SectionId::LipPlumper
                | SectionId::EyeShadow
                | SectionId::Foundation
                | SectionId::Contour
                | SectionId::Blush
                | SectionId::Bronzer
                | SectionId::Highlighter
        )
    }

    /// Sections where re-selecting the active texture clears it and a
    /// material index is derived for index-based rendering.
    pub fn texture_toggles(self) -> bool {
        matches!(
            self,
            SectionId::Foundation
                | SectionId::Contour
                | SectionId::Blush
                | SectionId::Bronzer
                | SectionId::Highlighter
        )
    }

    pub fn has_pattern(self) -> bool {
        !self.pattern_labels().is_empty()
    }

    pub fn has_darkness(self) -> bool {
        matches!(self, SectionId::Eyebrows)
    }

    /// Fixed visual-variant catalog per section, 1-based when referenced by
    /// index.
    pub fn pattern_labels(self) -> &'static [&'static str] {
        match self {
            SectionId::Eyebrows => &["natural", "arched", "straight", "curved", "high-arch"],
            SectionId::EyeLiner => &["classic", "winged", "smoky", "double"],
            SectionId::Lashes => &["natural", "volume", "dramatic", "cat-eye"],
            SectionId::Contour => &["soft", "defined"],
            SectionId::Blush => &["round", "angled", "sweep"],
            _ => &[],
        }
    }

    pub fn allowed_modes(self) -> &'static [Mode] {
        match self {
            SectionId::LipColor => &[Mode::One, Mode::Dual, Mode::Ombre],
            SectionId::EyeShadow => &[Mode::One, Mode::Dual, Mode::Tri, Mode::Quad, Mode::Penta],
            SectionId::Blush => &[Mode::One, Mode::Dual, Mode::Tri],
            SectionId::Contour => &[Mode::One, Mode::Dual],
            _ => &[Mode::One],
        }
    }

    /// Policy for product-driven shade writes when the selection is full.
    /// Swatch-style selection always drops the oldest shade; blush and
    /// contour cycle a replace index on the product-driven path instead.
    pub fn product_replace_policy(self) -> ReplacePolicy {
        match self {
            SectionId::Blush | SectionId::Contour => ReplacePolicy::RotatingIndex,
            _ => ReplacePolicy::DropOldest,
        }
    }
}
