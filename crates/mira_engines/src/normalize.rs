#![forbid(unsafe_code)]

use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub max_transcript_chars: usize,
}

impl NormalizerConfig {
    pub fn mvp_v1() -> Self {
        Self {
            max_transcript_chars: 2048,
        }
    }
}

/// The substitution groups a transcript can be classified into. Exactly one
/// group is applied per transcript; the order below is the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerGroup {
    Texture,
    Color,
    SelectProduct,
    SelectColorNumber,
    SetPattern,
    SetDarkness,
    SetMode,
    Section,
    AddToCart,
}

const GROUP_PRIORITY: [MarkerGroup; 9] = [
    MarkerGroup::Texture,
    MarkerGroup::Color,
    MarkerGroup::SelectProduct,
    MarkerGroup::SelectColorNumber,
    MarkerGroup::SetPattern,
    MarkerGroup::SetDarkness,
    MarkerGroup::SetMode,
    MarkerGroup::Section,
    MarkerGroup::AddToCart,
];

/// How a transcript was normalized, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeRoute {
    ExactSection,
    ExactSelect,
    Group(MarkerGroup),
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub text: String,
    pub route: NormalizeRoute,
}

/// Rewrites a raw transcript into canonical English by phrase substitution.
///
/// Total function: the worst case is a verbatim pass-through that no parser
/// rule will match, which downstream treats as a silently ignored command.
#[derive(Debug, Clone)]
pub struct NormalizerRuntime {
    config: NormalizerConfig,
    lexicon: Lexicon,
}

impl NormalizerRuntime {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            lexicon: Lexicon::v1(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn normalize(&self, transcript: &str) -> NormalizeOutcome {
        let trimmed = transcript.trim();
        if trimmed.is_empty() || trimmed.chars().count() > self.config.max_transcript_chars {
            return NormalizeOutcome {
                text: trimmed.to_string(),
                route: NormalizeRoute::PassThrough,
            };
        }

        // Full-utterance short circuit against the two exact dictionaries.
        if let Some(canonical) = self.lexicon.exact_section_phrases.get(trimmed) {
            return NormalizeOutcome {
                text: canonical.to_string(),
                route: NormalizeRoute::ExactSection,
            };
        }
        if let Some(canonical) = self.lexicon.exact_select_phrases.get(trimmed) {
            return NormalizeOutcome {
                text: canonical.to_string(),
                route: NormalizeRoute::ExactSelect,
            };
        }

        let group = self.classify(trimmed);
        let mut text = match group {
            Some(group) => self.apply_group(group, trimmed),
            None => trimmed.to_string(),
        };

        // Numbers are translated regardless of the matched group, composites
        // before single tokens so fragments never win.
        text = self.lexicon.numbers_multiword.apply(&text);
        text = self.lexicon.numbers_single.apply(&text);

        NormalizeOutcome {
            text,
            route: group.map_or(NormalizeRoute::PassThrough, NormalizeRoute::Group),
        }
    }

    /// First group whose required markers all occur in the transcript wins.
    fn classify(&self, text: &str) -> Option<MarkerGroup> {
        let lex = &self.lexicon;
        GROUP_PRIORITY.into_iter().find(|group| match group {
            MarkerGroup::Texture => {
                lex.texture_markers.contains_any_key(text)
                    && lex.texture_names.contains_any_key(text)
            }
            MarkerGroup::Color => {
                lex.color_markers.contains_any_key(text) && lex.color_names.contains_any_key(text)
            }
            MarkerGroup::SelectProduct => {
                lex.select_product.contains_any_key(text) && lex.contains_number(text)
            }
            MarkerGroup::SelectColorNumber => {
                lex.select_color_number.contains_any_key(text) && lex.contains_number(text)
            }
            MarkerGroup::SetPattern => {
                lex.set_pattern_markers.contains_any_key(text) && lex.contains_number(text)
            }
            MarkerGroup::SetDarkness => lex.darkness_markers.contains_any_key(text),
            MarkerGroup::SetMode => {
                lex.mode_markers.contains_any_key(text) && lex.mode_names.contains_any_key(text)
            }
            MarkerGroup::Section => {
                lex.section_markers.contains_any_key(text)
                    && lex.section_names.contains_any_key(text)
            }
            MarkerGroup::AddToCart => {
                lex.add_to_cart.contains_any_key(text) && lex.contains_number(text)
            }
        })
    }

    fn apply_group(&self, group: MarkerGroup, text: &str) -> String {
        let lex = &self.lexicon;
        match group {
            MarkerGroup::Texture => lex.texture_names.apply(&lex.texture_markers.apply(text)),
            MarkerGroup::Color => lex.color_names.apply(&lex.color_markers.apply(text)),
            MarkerGroup::SelectProduct => lex.select_product.apply(text),
            MarkerGroup::SelectColorNumber => lex.select_color_number.apply(text),
            MarkerGroup::SetPattern => lex.set_pattern_markers.apply(text),
            // Percent phrases first so the number pass cannot split them.
            MarkerGroup::SetDarkness => lex.darkness_markers.apply(&lex.darkness_percents.apply(text)),
            MarkerGroup::SetMode => lex.mode_names.apply(&lex.mode_markers.apply(text)),
            MarkerGroup::Section => lex.section_names.apply(&lex.section_markers.apply(text)),
            MarkerGroup::AddToCart => lex.add_to_cart.apply(text),
        }
    }
}

impl Default for NormalizerRuntime {
    fn default() -> Self {
        Self::new(NormalizerConfig::mvp_v1())
    }
}
