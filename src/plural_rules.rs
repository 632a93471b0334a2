use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

use crate::types::{Plural, PluralCategory};

lazy_static! {
    /// Static mapping from base language subtag → required plural categories (CLDR‑style, cardinals).
    static ref CATEGORY_TABLE: BTreeMap<&'static str, BTreeSet<PluralCategory>> = {
        use PluralCategory::*;
        let mut m: BTreeMap<&'static str, BTreeSet<PluralCategory>> = BTreeMap::new();

        fn s(items: &[PluralCategory]) -> BTreeSet<PluralCategory> {
            items.iter().cloned().collect()
        }

        // One/Other (most Indo‑European languages without complex plural rules)
        for code in [
            "en","de","nl","sv","da","nb","nn","no","is","fi","et","fa","hi","bn","gu",
            "ta","te","kn","ml","mr","it","es","pt","mk","el","eu","gl","af","sw","ur",
            "fil","tl","tr","id","ms","fr","hy","kab"
        ] {
            m.insert(code, s(&[One, Other]));
        }

        // Only Other (East/Southeast Asian common cases)
        for code in ["ja","zh","ko","th","vi","km","lo","my","yue"] {
            m.insert(code, s(&[Other]));
        }

        // Slavic (Russian group): one, few, many, other
        for code in ["ru","uk","be","sr","hr","bs","sh"] {
            m.insert(code, s(&[One, Few, Many, Other]));
        }

        m.insert("pl", s(&[One, Few, Many, Other]));

        for code in ["cs","sk"] {
            m.insert(code, s(&[One, Few, Other]));
        }

        m.insert("sl", s(&[One, Two, Few, Other]));
        m.insert("lt", s(&[One, Few, Other]));
        m.insert("lv", s(&[Zero, One, Other]));
        m.insert("ga", s(&[One, Two, Few, Many, Other]));
        m.insert("ro", s(&[One, Few, Other]));
        m.insert("ar", s(&[Zero, One, Two, Few, Many, Other]));

        // Hebrew (legacy code iw also maps here)
        for code in ["he","iw"] {
            m.insert(code, s(&[One, Two, Many, Other]));
        }

        m
    };
}

/// Languages where zero takes the singular form.
const ZERO_IS_ONE: &[&str] = &["fr", "pt", "hy", "kab"];

/// Category selection used by the built-in plural formatter.
///
/// Only distinguishes `one` from `other`. Languages with richer rules get the
/// `other` form for every non-singular count unless a custom
/// [`PluralFormatter`](crate::traits::PluralFormatter) is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// No grammatical number (ja, zh, ko, ...).
    OtherOnly,
    /// `one` for exactly ±1.
    OneOther,
    /// `one` for 0 and ±1 (fr, pt, ...).
    ZeroOneAsOne,
}

impl PluralRule {
    pub fn for_language(lang: &LanguageIdentifier) -> Self {
        let code = lang.language.as_str();
        if ZERO_IS_ONE.contains(&code) {
            return PluralRule::ZeroOneAsOne;
        }
        let required = required_categories_for(lang);
        if required.len() == 1 && required.contains(&PluralCategory::Other) {
            PluralRule::OtherOnly
        } else {
            PluralRule::OneOther
        }
    }

    /// Helper for string language codes (accepts underscores). Unknown codes get `OneOther`.
    pub fn for_str(lang: &str) -> Self {
        match parse_language(lang) {
            Some(lang) => Self::for_language(&lang),
            None => PluralRule::OneOther,
        }
    }

    pub fn category(&self, count: i64) -> PluralCategory {
        match self {
            PluralRule::OtherOnly => PluralCategory::Other,
            PluralRule::OneOther if count.unsigned_abs() == 1 => PluralCategory::One,
            PluralRule::ZeroOneAsOne if count.unsigned_abs() <= 1 => PluralCategory::One,
            _ => PluralCategory::Other,
        }
    }

    /// Picks the form of `plural` for `count`. An explicit `zero` form wins for 0.
    pub fn select<'a>(&self, plural: &'a Plural, count: i64) -> &'a str {
        if count == 0 {
            if let Some(zero) = plural.forms.get(&PluralCategory::Zero) {
                return zero;
            }
        }
        plural.form(&self.category(count))
    }
}

/// Returns the required CLDR plural categories for a given language identifier.
///
/// This is a curated subset of CLDR rules covering common locales. For unknown
/// or unsupported locales, falls back to {Other} to avoid false positives.
pub fn required_categories_for(lang: &LanguageIdentifier) -> BTreeSet<PluralCategory> {
    CATEGORY_TABLE
        .get(lang.language.as_str())
        .cloned()
        .unwrap_or_else(|| [PluralCategory::Other].into_iter().collect())
}

/// Compute which required categories are missing for a given plural entry and language.
pub fn missing_categories_for_plural(
    lang: &LanguageIdentifier,
    plural: &Plural,
) -> BTreeSet<PluralCategory> {
    let required = required_categories_for(lang);
    let have: BTreeSet<PluralCategory> = plural.forms.keys().cloned().collect();
    &required - &have
}

pub(crate) fn parse_language(lang: &str) -> Option<LanguageIdentifier> {
    lang.replace('_', "-").parse().ok()
}
