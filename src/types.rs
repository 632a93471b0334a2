//! Core resource types backing the in-memory locale packs.
//! A `Resource` is one string table (`Localizable`, `Errors`, ...) for one language.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// Table used when a lookup does not name one.
pub const DEFAULT_TABLE: &str = "Localizable";

/// A complete string table for a single language (the contents of one `.strings` file).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// Language code and table name.
    pub metadata: Metadata,

    /// Ordered list of all entries in this table.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Resource {
    /// Creates an empty table for `language`. An empty `table` means [`DEFAULT_TABLE`].
    pub fn new(language: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                language: language.into(),
                domain: table.into(),
            },
            entries: Vec::new(),
        }
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Finds an entry by key. When a key appears twice the last one wins, as with `.strings` files.
    pub fn find_entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.id == id)
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.metadata.language.replace('_', "-").parse().ok()
    }

    /// The table this resource answers for.
    pub fn table_name(&self) -> &str {
        if self.metadata.domain.is_empty() {
            DEFAULT_TABLE
        } else {
            &self.metadata.domain
        }
    }
}

/// Which language and table a resource belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    /// The language code (e.g. "en", "fr", "pt-BR").
    pub language: String,

    /// The table name (e.g. "Localizable", "Errors").
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub domain: String,
}

/// A single keyed string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// Lookup key, e.g. `Greeting.Hello`.
    pub id: String,

    pub value: Translation,

    /// Optional comment for translators.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,
}

impl Entry {
    pub fn singular(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: Translation::Singular(value.into()),
            comment: None,
        }
    }

    pub fn plural(id: impl Into<String>, plural: Plural) -> Self {
        Self {
            id: id.into(),
            value: Translation::Plural(plural),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Translation {
    /// A single translation without plural forms.
    Singular(String),

    /// A translation with plural forms.
    Plural(Plural),
}

impl Translation {
    /// The template a key lookup yields: the text itself, or the plural pattern id.
    pub fn pattern(&self) -> &str {
        match self {
            Translation::Singular(value) => value,
            Translation::Plural(plural) => &plural.id,
        }
    }
}

/// All plural forms for a single message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Plural {
    /// Format pattern returned by key lookups; the plural formatter maps it back to `forms`.
    pub id: String,

    /// Map from category → format string.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(default)]
    pub forms: BTreeMap<PluralCategory, String>,
}

impl Plural {
    /// Returns `None` when no forms are given.
    pub fn new(
        id: impl Into<String>,
        forms: impl IntoIterator<Item = (PluralCategory, String)>,
    ) -> Option<Self> {
        let forms: BTreeMap<PluralCategory, String> = forms.into_iter().collect();

        if forms.is_empty() {
            None
        } else {
            Some(Self {
                id: id.into(),
                forms,
            })
        }
    }

    /// Builds a plural whose id is its `other` form, or its first form if `other` is missing.
    pub fn from_forms(forms: impl IntoIterator<Item = (PluralCategory, String)>) -> Option<Self> {
        let forms: BTreeMap<PluralCategory, String> = forms.into_iter().collect();
        let id = forms
            .get(&PluralCategory::Other)
            .or_else(|| forms.values().next())?
            .clone();
        Self::new(id, forms)
    }

    /// Picks the form for `category`, falling back to `other` and then to the first form.
    pub fn form(&self, category: &PluralCategory) -> &str {
        self.forms
            .get(category)
            .or_else(|| self.forms.get(&PluralCategory::Other))
            .or_else(|| self.forms.values().next())
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }
}

/// Standard CLDR plural forms.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours() -> Plural {
        Plural::from_forms([
            (PluralCategory::One, "%d hour".to_string()),
            (PluralCategory::Other, "%d hours".to_string()),
        ])
        .unwrap()
    }

    #[test]
    fn test_resource_add_entry() {
        let mut resource = Resource::new("en", "Localizable");
        resource.add_entry(Entry::singular("hello", "Hello"));
        assert_eq!(resource.entries.len(), 1);
        assert_eq!(resource.entries[0].id, "hello");
    }

    #[test]
    fn test_find_entry_last_wins() {
        let mut resource = Resource::new("en", "");
        resource.add_entry(Entry::singular("hello", "Hello"));
        resource.add_entry(Entry::singular("hello", "Hi"));
        assert_eq!(resource.find_entry("hello").unwrap().value.pattern(), "Hi");
        assert!(resource.find_entry("missing").is_none());
    }

    #[test]
    fn test_table_name_defaults_to_localizable() {
        assert_eq!(Resource::new("en", "").table_name(), DEFAULT_TABLE);
        assert_eq!(Resource::new("en", "Errors").table_name(), "Errors");
    }

    #[test]
    fn test_resource_parse_language_identifier() {
        let resource = Resource::new("pt_BR", "");
        let lang_id = resource.parse_language_identifier().unwrap();
        assert_eq!(lang_id.language.as_str(), "pt");
        assert_eq!(lang_id.region.unwrap().as_str(), "BR");
    }

    #[test]
    fn test_resource_parse_invalid_language() {
        let resource = Resource::new("not-a-language", "");
        assert!(resource.parse_language_identifier().is_none());
    }

    #[test]
    fn test_translation_pattern() {
        let singular = Translation::Singular("Hello".to_string());
        assert_eq!(singular.pattern(), "Hello");

        let plural = Translation::Plural(hours());
        assert_eq!(plural.pattern(), "%d hours");
    }

    #[test]
    fn test_plural_new_empty() {
        let forms: Vec<(PluralCategory, String)> = vec![];
        assert!(Plural::new("apples", forms).is_none());
        assert!(Plural::from_forms(Vec::new()).is_none());
    }

    #[test]
    fn test_plural_from_forms_without_other() {
        let plural = Plural::from_forms([(PluralCategory::One, "one apple".to_string())]).unwrap();
        assert_eq!(plural.id, "one apple");
    }

    #[test]
    fn test_plural_form_fallbacks() {
        let plural = hours();
        assert_eq!(plural.form(&PluralCategory::One), "%d hour");
        assert_eq!(plural.form(&PluralCategory::Few), "%d hours");

        let only_one = Plural::from_forms([(PluralCategory::One, "x".to_string())]).unwrap();
        assert_eq!(only_one.form(&PluralCategory::Many), "x");
    }

    #[test]
    fn test_resource_json_shape() {
        let mut resource = Resource::new("en", "Localizable");
        resource.add_entry(Entry::plural("Date.UnitPlural.Hour", hours()));
        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("\"one\":\"%d hour\""));

        let parsed: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resource);
    }
}
