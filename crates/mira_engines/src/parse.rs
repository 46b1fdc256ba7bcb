#![forbid(unsafe_code)]

use regex::{Captures, Regex};

use mira_kernel_contracts::intent::{Intent, PatternRef};
use mira_kernel_contracts::section::Category;
use mira_kernel_contracts::selection::HexColor;
use mira_kernel_contracts::Validate;

use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentParserConfig {
    pub max_intents: u8,
}

impl IntentParserConfig {
    pub fn mvp_v1() -> Self {
        Self { max_intents: 10 }
    }
}

struct Rule {
    name: &'static str,
    pattern: Regex,
    extract: fn(&Captures, &Lexicon) -> Option<Intent>,
}

/// Extracts structured intents from a canonical transcript.
///
/// Every rule is applied independently against the same lower-cased string;
/// rules are deliberately not mutually exclusive. One utterance can yield
/// several candidate intents ("select red" is a failed sub-section match and
/// a successful color match at once) and the router filters by section.
pub struct IntentParserRuntime {
    config: IntentParserConfig,
    lexicon: Lexicon,
    rules: Vec<Rule>,
}

impl IntentParserRuntime {
    pub fn new(config: IntentParserConfig) -> Self {
        Self {
            config,
            lexicon: Lexicon::v1(),
            rules: rule_table(),
        }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }

    pub fn parse(&self, canonical: &str) -> Vec<Intent> {
        let text = canonical.trim().to_lowercase();
        if text.is_empty() {
            return Vec::new();
        }

        let mut intents = Vec::new();
        for rule in &self.rules {
            if intents.len() >= self.config.max_intents as usize {
                break;
            }
            let Some(captures) = rule.pattern.captures(&text) else {
                continue;
            };
            let Some(intent) = (rule.extract)(&captures, &self.lexicon) else {
                continue;
            };
            // Malformed captures never leave the parser.
            if intent.validate().is_ok() {
                intents.push(intent);
            }
        }
        intents
    }
}

impl Default for IntentParserRuntime {
    fn default() -> Self {
        Self::new(IntentParserConfig::mvp_v1())
    }
}

fn rule(name: &'static str, pattern: &str, extract: fn(&Captures, &Lexicon) -> Option<Intent>) -> Rule {
    Rule {
        name,
        pattern: Regex::new(pattern).expect("rule pattern must compile"),
        extract,
    }
}

fn rule_table() -> Vec<Rule> {
    vec![
        rule("product_select", r"select product number (.+)$", |caps, lex| {
            let number = lex.number_value(&caps[1])?;
            Some(Intent::SelectProductByNumber(number))
        }),
        rule("section_nav", r"go to section (.+)$", |caps, _| {
            let category = Category::parse_label(&capitalize(&caps[1]))?;
            Some(Intent::NavigateSection(category))
        }),
        rule("sub_section_nav", r"select (.+)$", |caps, _| {
            let name = capitalize(&caps[1]);
            mira_kernel_contracts::section::SectionId::from_spoken_name(&name)?;
            Some(Intent::NavigateSubSection(name))
        }),
        rule("add_to_cart", r"add to cart product number (.+)$", |caps, lex| {
            let number = lex.number_value(&caps[1])?;
            Some(Intent::AddToCartByNumber(number))
        }),
        rule("set_mode", r"set (.+)$", |caps, _| {
            let captured = caps[1].trim();
            // "pattern N" phrasings belong to the pattern rule and must not
            // double-match as a mode.
            if captured.starts_with("pattern") {
                return None;
            }
            Some(Intent::SetMode(capitalize(captured)))
        }),
        rule("set_texture", r"select texture (.+)$", |caps, _| {
            Some(Intent::SelectTexture(capitalize(&caps[1])))
        }),
        rule("select_color", r"select (.+)$", |caps, lex| {
            let mut label = capitalize(&caps[1]);
            if let Some(stripped) = label.strip_suffix(" Color") {
                label = stripped.to_string();
            }
            if label == "Gray" {
                label = "Grey".to_string();
            }
            if label.is_empty() {
                return None;
            }
            let hex = lex
                .color_hex
                .get(&label)
                .and_then(|value| HexColor::v1(value).ok());
            Some(Intent::SelectColor { label, hex })
        }),
        rule("select_color_index", r"select color (.+)$", |caps, lex| {
            let captured = caps[1].trim();
            let index = captured
                .parse::<u32>()
                .ok()
                .or_else(|| lex.ordinal_value(captured))
                .or_else(|| lex.number_value(captured))?;
            Some(Intent::SelectColorByIndex(index))
        }),
        rule("set_pattern", r"set pattern (.+)$", |caps, lex| {
            let captured = caps[1].trim();
            let reference = match lex.number_value(captured) {
                Some(index) => PatternRef::Index(index),
                None => PatternRef::Label(capitalize(captured)),
            };
            Some(Intent::SetPatternOrShape(reference))
        }),
        rule("set_darkness", r".*dark (.+)$", |caps, lex| {
            let captured = caps[1].trim();
            let percent = match captured.parse::<f32>() {
                Ok(value) => value,
                Err(_) => lex.percent_value(captured)? as f32,
            };
            if !(0.0..=100.0).contains(&percent) {
                return None;
            }
            Some(Intent::SetDarkness(percent))
        }),
    ]
}

/// Title-case each whitespace-separated token of an already lower-cased
/// capture.
fn capitalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
