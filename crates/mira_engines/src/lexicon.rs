#![forbid(unsafe_code)]

use std::collections::BTreeMap;

/// A phrase dictionary: source phrases mapped 1:1 to canonical tokens.
///
/// Keys are matched as whole substrings, never tokenized, because source
/// variants (including common misspellings) map many phrasings to one
/// canonical value. Substitution runs longest key first so that composite
/// phrases win over their own fragments.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    entries: BTreeMap<String, String>,
    keys_longest_first: Vec<String>,
}

impl PhraseTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::from_owned(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn from_owned(pairs: Vec<(String, String)>) -> Self {
        let entries: BTreeMap<String, String> = pairs.into_iter().collect();
        let mut keys_longest_first: Vec<String> = entries.keys().cloned().collect();
        keys_longest_first.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        Self {
            entries,
            keys_longest_first,
        }
    }

    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any key of this table occurs inside `text`.
    pub fn contains_any_key(&self, text: &str) -> bool {
        self.keys_longest_first.iter().any(|key| text.contains(key))
    }

    /// Substitute every contained key with its canonical value, longest key
    /// first.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for key in &self.keys_longest_first {
            if out.contains(key.as_str()) {
                out = out.replace(key.as_str(), &self.entries[key]);
            }
        }
        out
    }
}

/// The 3-texture subset rendered by material index on the face sections.
pub const MATERIAL_TEXTURES: [&str; 3] = ["matte", "satin", "shimmer"];

/// Every dictionary the pipeline consults, loaded once per runtime.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Full-utterance section navigation phrases (exact match only).
    pub exact_section_phrases: PhraseTable,
    /// Full-utterance "select <sub-section>" phrases (exact match only).
    pub exact_select_phrases: PhraseTable,

    pub texture_markers: PhraseTable,
    pub texture_names: PhraseTable,
    pub color_markers: PhraseTable,
    pub color_names: PhraseTable,
    pub select_product: PhraseTable,
    pub select_color_number: PhraseTable,
    pub set_pattern_markers: PhraseTable,
    pub darkness_markers: PhraseTable,
    pub darkness_percents: PhraseTable,
    pub mode_markers: PhraseTable,
    pub mode_names: PhraseTable,
    pub section_markers: PhraseTable,
    pub section_names: PhraseTable,
    pub add_to_cart: PhraseTable,

    /// Multi-token number phrases, substituted before the single-token pass
    /// so composites are never eaten by their own fragments.
    pub numbers_multiword: PhraseTable,
    /// Single-token number words and digit strings.
    pub numbers_single: PhraseTable,

    number_values: BTreeMap<String, u32>,
    ordinal_values: BTreeMap<String, u32>,
    percent_values: BTreeMap<String, u32>,

    pub color_hex: PhraseTable,
    pub skin_tones: PhraseTable,
    pub plumper_colors: PhraseTable,
    pub texture_values: PhraseTable,
}

impl Lexicon {
    pub fn v1() -> Self {
        Self {
            exact_section_phrases: PhraseTable::from_pairs(&[
                ("انتقل الى قسم الشفاه", "go to section lips"),
                ("انتقل الى قسم العيون", "go to section eyes"),
                ("انتقل الى قسم الوجه", "go to section face"),
                ("انتقل الى قسم الشعر", "go to section hair"),
                (
                    "انتقل الى قسمي لون الشفاه اختر لون الشفاه",
                    "go to lip color section select lip color",
                ),
            ]),
            exact_select_phrases: PhraseTable::from_owned(exact_select_pairs()),
            texture_markers: PhraseTable::from_pairs(&[
                ("اختر ملمس", "select texture"),
                ("اختاري ملمس", "select texture"),
                ("ملمس", "texture"),
            ]),
            texture_names: PhraseTable::from_pairs(&[
                ("مطفي", "matte"),
                ("مات", "matte"),
                ("لامع", "glossy"),
                ("ساتان", "satin"),
                ("معدني", "metallic"),
                ("شيمر", "shimmer"),
                ("كريمي", "creamy"),
            ]),
            color_markers: PhraseTable::from_pairs(&[
                ("اختر لون", "select"),
                ("اختاري لون", "select"),
                ("اختر", "select"),
                ("اختاري", "select"),
            ]),
            color_names: PhraseTable::from_owned(color_name_pairs()),
            select_product: PhraseTable::from_pairs(&[
                ("اختر منتج رقم", "select product number"),
                ("اختر المنتج رقم", "select product number"),
                ("اختاري منتج رقم", "select product number"),
                ("اختاري المنتج رقم", "select product number"),
                ("حدد منتج رقم", "select product number"),
                ("حددي منتج رقم", "select product number"),
            ]),
            select_color_number: PhraseTable::from_pairs(&[
                ("اختر لون رقم", "select color"),
                ("اختاري لون رقم", "select color"),
                ("اختر اللون رقم", "select color"),
            ]),
            set_pattern_markers: PhraseTable::from_pairs(&[
                ("ضع نمط", "set pattern"),
                ("ضعي نمط", "set pattern"),
                ("ضع شكل", "set pattern"),
                ("ضعي شكل", "set pattern"),
            ]),
            darkness_markers: PhraseTable::from_pairs(&[
                ("غامق", "dark"),
                ("داكن", "dark"),
            ]),
            darkness_percents: PhraseTable::from_pairs(&[
                ("عشرة بالمئة", "ten%"),
                ("عشرين بالمئة", "twenty%"),
                ("ثلاثين بالمئة", "thirty%"),
                ("اربعين بالمئة", "forty%"),
                // The fifty key is misspelled upstream; the whole pipeline
                // carries the literal form.
                ("خمسين بالمئة", "fivety%"),
            ]),
            mode_markers: PhraseTable::from_pairs(&[("ضعي", "set"), ("ضع", "set")]),
            mode_names: PhraseTable::from_pairs(&[
                ("احادي", "one"),
                ("ثنائي", "dual"),
                ("ثلاثي", "tri"),
                ("اومبري", "ombre"),
                ("رباعي", "quad"),
                ("خماسي", "penta"),
            ]),
            section_markers: PhraseTable::from_pairs(&[
                ("انتقل الى قسم", "go to section"),
                ("انتقلي الى قسم", "go to section"),
                ("اذهب الى قسم", "go to section"),
            ]),
            section_names: PhraseTable::from_pairs(&[
                ("الشفاه", "lips"),
                ("العيون", "eyes"),
                ("الوجه", "face"),
                ("الشعر", "hair"),
            ]),
            add_to_cart: PhraseTable::from_pairs(&[
                ("اضف الى السلة منتج رقم", "add to cart product number"),
                ("اضيفي الى السلة منتج رقم", "add to cart product number"),
                ("اضف للسلة منتج رقم", "add to cart product number"),
            ]),
            numbers_multiword: PhraseTable::from_owned(arabic_multiword_number_pairs()),
            numbers_single: PhraseTable::from_owned(single_number_pairs()),
            number_values: english_number_values(),
            ordinal_values: ordinal_values(),
            percent_values: percent_values(),
            color_hex: PhraseTable::from_owned(color_hex_pairs()),
            skin_tones: PhraseTable::from_pairs(&[
                ("Fair", "#F5D0B0"),
                ("Light", "#E8B894"),
                ("Medium", "#C68642"),
                ("Tan", "#A0522D"),
                ("Deep", "#6B4226"),
            ]),
            plumper_colors: PhraseTable::from_pairs(&[
                ("Purple", "#8E4585"),
                ("Orange", "#FF8243"),
                ("Pink", "#FF69B4"),
            ]),
            texture_values: PhraseTable::from_pairs(&[
                ("Matte", "matte"),
                ("Glossy", "gloss"),
                ("Satin", "satin"),
                ("Metallic", "metallic"),
                ("Shimmer", "shimmer"),
                ("Creamy", "cream"),
            ]),
        }
    }

    /// Whether any number word, composite, or digit string occurs in `text`.
    pub fn contains_number(&self, text: &str) -> bool {
        self.numbers_multiword.contains_any_key(text) || self.numbers_single.contains_any_key(text)
    }

    /// Resolve a captured number: digit string first, then the word table
    /// (single and two-word forms). Returns None for anything unparseable.
    pub fn number_value(&self, text: &str) -> Option<u32> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(value) = trimmed.parse::<u32>() {
            return Some(value);
        }
        self.number_values
            .get(trimmed.to_ascii_lowercase().as_str())
            .copied()
    }

    /// Resolve a spelled-out ordinal ("third") to its 1-based index.
    pub fn ordinal_value(&self, text: &str) -> Option<u32> {
        self.ordinal_values
            .get(text.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    /// Resolve a percent word ("ten%") to its integer percentage.
    pub fn percent_value(&self, text: &str) -> Option<u32> {
        self.percent_values
            .get(text.trim().to_ascii_lowercase().as_str())
            .copied()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::v1()
    }
}

const SUB_SECTION_NAMES_AR: [(&str, &str); 15] = [
    ("لون الشفاه", "lip color"),
    ("محدد الشفاه", "lip liner"),
    ("منفخ الشفاه", "lip plumper"),
    ("الحواجب", "eyebrows"),
    ("ظلال العيون", "eye shadow"),
    ("محدد العيون", "eye liner"),
    ("الرموش", "lashes"),
    ("المسكرة", "mascara"),
    ("كريم الاساس", "foundation"),
    ("الكونسيلر", "concealer"),
    ("الكونتور", "contour"),
    ("احمر الخدود", "blush"),
    ("البرونزر", "bronzer"),
    ("الهايلايتر", "highlighter"),
    ("لون الشعر", "hair color"),
];

fn exact_select_pairs() -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (arabic, english) in SUB_SECTION_NAMES_AR {
        pairs.push((format!("اختر {arabic}"), format!("select {english}")));
        pairs.push((format!("اختاري {arabic}"), format!("select {english}")));
    }
    pairs
}

fn color_name_pairs() -> Vec<(String, String)> {
    [
        ("احمر", "red"),
        ("وردي", "pink"),
        ("برتقالي", "orange"),
        ("بنفسجي", "purple"),
        ("ازرق", "blue"),
        ("اخضر", "green"),
        ("اصفر", "yellow"),
        ("بني", "brown"),
        ("اسود", "black"),
        ("ابيض", "white"),
        ("رمادي", "grey"),
        ("ذهبي", "gold"),
        ("فضي", "silver"),
        ("نيود", "nude"),
        ("خوخي", "peach"),
        ("مرجاني", "coral"),
        ("عنابي", "burgundy"),
        ("كستنائي", "maroon"),
        ("بيج", "beige"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn color_hex_pairs() -> Vec<(String, String)> {
    [
        ("Red", "#FF0000"),
        ("Pink", "#FFC0CB"),
        ("Orange", "#FFA500"),
        ("Purple", "#800080"),
        ("Blue", "#0000FF"),
        ("Green", "#008000"),
        ("Yellow", "#FFFF00"),
        ("Brown", "#A52A2A"),
        ("Black", "#000000"),
        ("White", "#FFFFFF"),
        ("Grey", "#808080"),
        ("Gold", "#FFD700"),
        ("Silver", "#C0C0C0"),
        ("Nude", "#E3BC9A"),
        ("Peach", "#FFDAB9"),
        ("Coral", "#FF7F50"),
        ("Burgundy", "#800020"),
        ("Maroon", "#800000"),
        ("Beige", "#F5F5DC"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

const ENGLISH_UNITS: [&str; 19] = [
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const ARABIC_UNITS: [&str; 10] = [
    "واحد",
    "اثنان",
    "ثلاثة",
    "اربعة",
    "خمسة",
    "ستة",
    "سبعة",
    "ثمانية",
    "تسعة",
    "عشرة",
];

fn english_number_word(n: u32) -> String {
    match n {
        1..=19 => ENGLISH_UNITS[n as usize - 1].to_string(),
        20 => "twenty".to_string(),
        30 => "thirty".to_string(),
        40 => "forty".to_string(),
        50 => "fifty".to_string(),
        21..=29 => format!("twenty {}", ENGLISH_UNITS[n as usize - 21]),
        31..=39 => format!("thirty {}", ENGLISH_UNITS[n as usize - 31]),
        41..=49 => format!("forty {}", ENGLISH_UNITS[n as usize - 41]),
        _ => n.to_string(),
    }
}

fn arabic_number_word(n: u32) -> String {
    match n {
        1..=10 => ARABIC_UNITS[n as usize - 1].to_string(),
        11 => "احد عشر".to_string(),
        12 => "اثنا عشر".to_string(),
        13..=19 => format!("{} عشر", ARABIC_UNITS[n as usize - 11]),
        20 => "عشرون".to_string(),
        30 => "ثلاثون".to_string(),
        40 => "اربعون".to_string(),
        50 => "خمسون".to_string(),
        21..=29 => format!("{} وعشرون", ARABIC_UNITS[n as usize - 21]),
        31..=39 => format!("{} وثلاثون", ARABIC_UNITS[n as usize - 31]),
        41..=49 => format!("{} واربعون", ARABIC_UNITS[n as usize - 41]),
        _ => n.to_string(),
    }
}

fn arabic_multiword_number_pairs() -> Vec<(String, String)> {
    (1..=50)
        .filter(|n| arabic_number_word(*n).contains(' '))
        .map(|n| (arabic_number_word(n), english_number_word(n)))
        .collect()
}

fn single_number_pairs() -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = (1..=50)
        .filter(|n| !arabic_number_word(*n).contains(' '))
        .map(|n| (arabic_number_word(n), english_number_word(n)))
        .collect();
    for n in 1..=50 {
        pairs.push((n.to_string(), english_number_word(n)));
    }
    pairs
}

fn english_number_values() -> BTreeMap<String, u32> {
    (1..=40).map(|n| (english_number_word(n), n)).collect()
}

fn ordinal_values() -> BTreeMap<String, u32> {
    [
        ("first", 1),
        ("second", 2),
        ("third", 3),
        ("fourth", 4),
        ("fifth", 5),
        ("sixth", 6),
        ("seventh", 7),
        ("eighth", 8),
        ("ninth", 9),
        ("tenth", 10),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn percent_values() -> BTreeMap<String, u32> {
    [
        ("ten%", 10),
        ("twenty%", 20),
        ("thirty%", 30),
        ("forty%", 40),
        // Intentional upstream misspelling of the fifty key.
        ("fivety%", 50),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_substitution_prefers_longest_keys() {
        let table = PhraseTable::from_pairs(&[("واحد", "one"), ("واحد وعشرون", "twenty one")]);
        assert_eq!(table.apply("واحد وعشرون"), "twenty one");
    }

    #[test]
    fn number_word_generation_covers_composites() {
        assert_eq!(english_number_word(21), "twenty one");
        assert_eq!(english_number_word(39), "thirty nine");
        assert_eq!(arabic_number_word(21), "واحد وعشرون");
        assert_eq!(arabic_number_word(15), "خمسة عشر");
    }

    #[test]
    fn number_value_resolves_digits_and_words() {
        let lexicon = Lexicon::v1();
        assert_eq!(lexicon.number_value("3"), Some(3));
        assert_eq!(lexicon.number_value("three"), Some(3));
        assert_eq!(lexicon.number_value("twenty one"), Some(21));
        assert_eq!(lexicon.number_value("Forty"), Some(40));
        assert_eq!(lexicon.number_value("red"), None);
        assert_eq!(lexicon.number_value(""), None);
    }

    #[test]
    fn at_lex_01_fivety_percent_quirk_is_preserved() {
        let lexicon = Lexicon::v1();
        assert_eq!(lexicon.percent_value("fivety%"), Some(50));
        assert_eq!(lexicon.percent_value("fifty%"), None);
        assert_eq!(lexicon.darkness_percents.get("خمسين بالمئة"), Some("fivety%"));
    }

    #[test]
    fn select_product_variants_collapse_to_one_canonical_phrase() {
        let lexicon = Lexicon::v1();
        assert_eq!(lexicon.select_product.len(), 6);
        for key in [
            "اختر منتج رقم",
            "اختاري المنتج رقم",
            "حددي منتج رقم",
        ] {
            assert_eq!(lexicon.select_product.get(key), Some("select product number"));
        }
    }

    #[test]
    fn ordinals_resolve_to_one_based_indices() {
        let lexicon = Lexicon::v1();
        assert_eq!(lexicon.ordinal_value("first"), Some(1));
        assert_eq!(lexicon.ordinal_value("Tenth"), Some(10));
        assert_eq!(lexicon.ordinal_value("three"), None);
    }
}
