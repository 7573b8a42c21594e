//! Lexical normalization for extraction input.
//!
//! Each domain carries a [`Lexicon`]: abbreviation expansions, compound
//! terms that should survive tokenization as a single token, and dosage
//! patterns for domains that express quantities inline. Normalization is
//! a preprocessing aid for callers that want token streams; entity
//! recognition itself runs on the raw text so that spans stay valid.

use gleanrs_core::{CharMap, Entity};
use once_cell::sync::Lazy;
use regex::Regex;

/// Output type label for dosage spans.
pub const DOSAGE_TYPE: &str = "DOSAGE";

/// Dosage spans come from a fixed table rather than scored patterns.
const DOSAGE_CONFIDENCE: f64 = 1.0;

/// Word runs or single non-space punctuation marks.
#[expect(clippy::expect_used, reason = "fixed pattern table is validated by tests")]
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+|[^\w\s]").expect("token pattern must compile"));

const MEDICAL_ABBREVIATIONS: &[(&str, &str)] = &[
    ("mg", "milligrams"),
    ("ml", "milliliters"),
    ("bp", "blood pressure"),
    ("hr", "heart rate"),
    ("temp", "temperature"),
    ("wbc", "white blood cell"),
    ("rbc", "red blood cell"),
    ("ecg", "electrocardiogram"),
    ("mri", "magnetic resonance imaging"),
    ("ct", "computed tomography"),
];

const MEDICAL_COMPOUNDS: &[&str] = &[
    "heart disease",
    "blood pressure",
    "heart rate",
    "chest pain",
    "abdominal pain",
    "back pain",
    "joint pain",
    "shortness of breath",
    "white blood cell",
    "red blood cell",
    "blood test",
    "ct scan",
];

/// Compiled case-insensitively against the raw text.
const MEDICAL_DOSE_PATTERNS: &[&str] = &[
    r"\d+\s*mg",
    r"\d+\s*ml",
    r"\d+\s*tablets?",
    r"\d+\s*capsules?",
    r"\d+\s*times?\s+daily",
    r"twice\s+daily",
    r"once\s+daily",
];

const FINANCE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("usd", "us dollars"),
    ("eur", "euros"),
    ("gbp", "british pounds"),
    ("acct", "account"),
    ("txn", "transaction"),
    ("inc", "incorporated"),
    ("ltd", "limited"),
    ("llc", "limited liability company"),
    ("ipo", "initial public offering"),
    ("q1", "first quarter"),
    ("q2", "second quarter"),
    ("q3", "third quarter"),
    ("q4", "fourth quarter"),
];

const FINANCE_COMPOUNDS: &[&str] = &[
    "stock market",
    "interest rate",
    "exchange rate",
    "savings account",
    "checking account",
    "bank account",
    "credit card",
    "debit card",
    "balance sheet",
    "cash flow",
    "initial public offering",
    "market capitalization",
    "due diligence",
];

static HEALTHCARE_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| Lexicon::build(MEDICAL_ABBREVIATIONS, MEDICAL_COMPOUNDS, MEDICAL_DOSE_PATTERNS));

static FINANCE_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| Lexicon::build(FINANCE_ABBREVIATIONS, FINANCE_COMPOUNDS, &[]));

static EMPTY_LEXICON: Lazy<Lexicon> = Lazy::new(|| Lexicon {
    abbreviations: Vec::new(),
    compounds: Vec::new(),
    dose_patterns: Vec::new(),
});

/// Domain vocabulary used during normalization and dosage extraction.
#[derive(Debug)]
pub struct Lexicon {
    /// Whole-word abbreviation matchers paired with their expansions.
    abbreviations: Vec<(Regex, String)>,
    /// Multi-word terms kept as single tokens, already lower-cased.
    compounds: Vec<String>,
    /// Raw pattern text paired with the compiled matcher.
    dose_patterns: Vec<(String, Regex)>,
}

impl Lexicon {
    /// Looks up the lexicon for a rule domain. Domains without fixed
    /// vocabulary get an empty lexicon, which makes normalization a
    /// plain tokenization pass.
    #[must_use]
    pub fn for_domain(domain: &str) -> &'static Self {
        match domain {
            "healthcare" => Self::healthcare(),
            "finance" => Self::finance(),
            _ => &EMPTY_LEXICON,
        }
    }

    #[must_use]
    pub fn healthcare() -> &'static Self {
        &HEALTHCARE_LEXICON
    }

    #[must_use]
    pub fn finance() -> &'static Self {
        &FINANCE_LEXICON
    }

    #[expect(clippy::expect_used, reason = "fixed lexicon tables are validated by tests")]
    fn build(
        abbreviations: &[(&str, &str)],
        compounds: &[&str],
        dose_patterns: &[&str],
    ) -> Self {
        let abbreviations = abbreviations
            .iter()
            .map(|(abbreviation, expansion)| {
                let regex = Regex::new(&format!(r"\b{abbreviation}\b"))
                    .expect("fixed abbreviation pattern must compile");
                (regex, (*expansion).to_string())
            })
            .collect();
        let compounds = compounds.iter().map(|term| (*term).to_string()).collect();
        let dose_patterns = dose_patterns
            .iter()
            .map(|pattern| {
                let regex = Regex::new(&format!("(?i){pattern}"))
                    .expect("fixed dosage pattern must compile");
                ((*pattern).to_string(), regex)
            })
            .collect();
        Self {
            abbreviations,
            compounds,
            dose_patterns,
        }
    }

    /// Lower-cases, expands abbreviations, splits into word and
    /// punctuation tokens, then merges compound terms. Longer compounds
    /// win: three-word merges are attempted before two-word ones.
    #[must_use]
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let mut lowered = text.to_lowercase();
        for (regex, expansion) in &self.abbreviations {
            lowered = regex.replace_all(&lowered, expansion.as_str()).into_owned();
        }

        let tokens: Vec<&str> = TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()).collect();
        let mut merged = Vec::with_capacity(tokens.len());
        let mut index = 0;
        while index < tokens.len() {
            if index + 2 < tokens.len() {
                let trigram =
                    format!("{} {} {}", tokens[index], tokens[index + 1], tokens[index + 2]);
                if self.compounds.contains(&trigram) {
                    merged.push(trigram);
                    index += 3;
                    continue;
                }
            }
            if index + 1 < tokens.len() {
                let bigram = format!("{} {}", tokens[index], tokens[index + 1]);
                if self.compounds.contains(&bigram) {
                    merged.push(bigram);
                    index += 2;
                    continue;
                }
            }
            merged.push(tokens[index].to_string());
            index += 1;
        }
        merged
    }

    /// Scans the raw text for dosage expressions and returns them as
    /// fixed-confidence entity spans, measured in characters.
    #[must_use]
    pub fn extract_dosages(&self, text: &str) -> Vec<Entity> {
        if self.dose_patterns.is_empty() {
            return Vec::new();
        }
        let map = CharMap::new(text);
        let mut dosages = Vec::new();
        for (raw, regex) in &self.dose_patterns {
            for found in regex.find_iter(text) {
                dosages.push(Entity {
                    text: found.as_str().to_string(),
                    start: map.char_of(found.start()),
                    end: map.char_of(found.end()),
                    entity_type: DOSAGE_TYPE.to_string(),
                    confidence: DOSAGE_CONFIDENCE,
                    pattern_matched: raw.clone(),
                });
            }
        }
        dosages
    }
}
