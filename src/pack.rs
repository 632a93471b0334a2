//! In-memory locale packs.
//!
//! A [`ResourcePack`] holds every string table for one language and serves as
//! both the [`StringTable`] and the [`PluralFormatter`] of the sources built
//! from it. [`ResourcePacks`] maps language codes to packs and is the default
//! [`PackResolver`].

use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufReader, Read},
    path::Path,
    sync::Arc,
};

use tracing::debug;

use crate::{
    error::Error,
    format::{FormatArg, format_printf},
    plural_rules::{PluralRule, missing_categories_for_plural, parse_language},
    source::{LocaleSource, PLATFORM_DEFAULT_IDENTIFIER},
    traits::{PackResolver, PluralFormatter, StringTable},
    types::{DEFAULT_TABLE, Entry, Plural, PluralCategory, Resource, Translation},
};

/// All string tables of one language.
#[derive(Debug, Clone)]
pub struct ResourcePack {
    language: String,
    rule: PluralRule,
    resources: Vec<Resource>,
}

impl ResourcePack {
    /// Creates an empty pack. The plural rule is derived from `language`.
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        Self {
            rule: PluralRule::for_str(&language),
            language,
            resources: Vec::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    pub fn with_plural_rule(mut self, rule: PluralRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Adds a whole table. Tables added later shadow earlier ones with the same name.
    ///
    /// Fails when one of its plurals shares a lookup pattern with a plural of
    /// another key but has different forms.
    pub fn add_resource(&mut self, resource: Resource) -> Result<(), Error> {
        self.resources.push(resource);
        if let Err(err) = self.check_plural_patterns() {
            self.resources.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Stores `value` under `key` in `table` (default table when `None`).
    pub fn insert(&mut self, table: Option<&str>, key: impl Into<String>, value: impl Into<String>) {
        self.table_mut(table).add_entry(Entry::singular(key, value));
    }

    /// Stores plural forms under `key`. The `other` form becomes the lookup pattern.
    ///
    /// Two keys may share a pattern only when their forms are identical,
    /// otherwise the formatter could not tell them apart.
    pub fn insert_plural(
        &mut self,
        table: Option<&str>,
        key: impl Into<String>,
        forms: impl IntoIterator<Item = (PluralCategory, String)>,
    ) -> Result<(), Error> {
        let key = key.into();
        let plural = Plural::from_forms(forms)
            .ok_or_else(|| Error::invalid_resource(format!("no plural forms for `{}`", key)))?;

        if let Some(lang) = parse_language(&self.language) {
            let missing = missing_categories_for_plural(&lang, &plural);
            if !missing.is_empty() {
                debug!(language = %self.language, key = %key, ?missing, "plural entry is missing categories");
            }
        }

        let table_name = table.unwrap_or(DEFAULT_TABLE);
        if let Some(other) = self.conflicting_plural(table_name, &key, &plural) {
            return Err(pattern_conflict(&key, &other, &plural.id));
        }

        self.table_mut(table).add_entry(Entry::plural(key, plural));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) into the default table.
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(None, key, value);
        self
    }

    /// Builder-style [`insert_plural`](Self::insert_plural) into the default table.
    pub fn with_plural<S: Into<String>>(
        mut self,
        key: impl Into<String>,
        forms: impl IntoIterator<Item = (PluralCategory, S)>,
    ) -> Result<Self, Error> {
        let forms = forms.into_iter().map(|(category, form)| {
            let form: String = form.into();
            (category, form)
        });
        self.insert_plural(None, key, forms)?;
        Ok(self)
    }

    fn table_mut(&mut self, table: Option<&str>) -> &mut Resource {
        let name = table.unwrap_or(DEFAULT_TABLE);
        let position = self.resources.iter().rposition(|r| r.table_name() == name);
        match position {
            Some(index) => &mut self.resources[index],
            None => {
                self.resources.push(Resource::new(self.language.clone(), name));
                let last = self.resources.len() - 1;
                &mut self.resources[last]
            }
        }
    }

    // The plural each (table, key) currently resolves to; later entries shadow earlier ones.
    fn live_plurals(&self) -> HashMap<(&str, &str), &Plural> {
        let mut live = HashMap::new();
        for resource in &self.resources {
            let table = resource.table_name();
            for entry in &resource.entries {
                let slot = (table, entry.id.as_str());
                match &entry.value {
                    Translation::Plural(plural) => {
                        live.insert(slot, plural);
                    }
                    Translation::Singular(_) => {
                        live.remove(&slot);
                    }
                }
            }
        }
        live
    }

    fn conflicting_plural(&self, table: &str, key: &str, plural: &Plural) -> Option<String> {
        self.live_plurals()
            .into_iter()
            .find(|((other_table, other_key), other)| {
                (*other_table != table || *other_key != key)
                    && other.id == plural.id
                    && other.forms != plural.forms
            })
            .map(|((_, other_key), _)| other_key.to_string())
    }

    fn check_plural_patterns(&self) -> Result<(), Error> {
        let mut by_pattern: HashMap<&str, (&str, &Plural)> = HashMap::new();
        for ((_, key), plural) in self.live_plurals() {
            match by_pattern.get(plural.id.as_str()) {
                Some((other_key, other)) if other.forms != plural.forms => {
                    return Err(pattern_conflict(key, other_key, &plural.id));
                }
                Some(_) => {}
                None => {
                    by_pattern.insert(plural.id.as_str(), (key, plural));
                }
            }
        }
        Ok(())
    }

    fn plural_for_pattern(&self, pattern: &str) -> Option<&Plural> {
        self.resources
            .iter()
            .rev()
            .flat_map(|resource| resource.entries.iter().rev())
            .find_map(|entry| match &entry.value {
                Translation::Plural(plural) if plural.id == pattern => Some(plural),
                _ => None,
            })
    }
}

impl StringTable for ResourcePack {
    fn find(&self, key: &str, table: Option<&str>) -> Option<String> {
        let name = table.unwrap_or(DEFAULT_TABLE);
        self.resources
            .iter()
            .rev()
            .filter(|resource| resource.table_name() == name)
            .find_map(|resource| resource.find_entry(key))
            .map(|entry| entry.value.pattern().to_string())
    }
}

impl PluralFormatter for ResourcePack {
    fn format_plural(&self, pattern: &str, count: i64, args: &[FormatArg]) -> String {
        let template = match self.plural_for_pattern(pattern) {
            Some(plural) => self.rule.select(plural, count),
            None => pattern,
        };
        format_printf(template, args)
    }
}

/// Packs keyed by language code.
///
/// Lookups ignore case and accept `_` separators. A regional code with no
/// pack of its own (`en-GB`) falls back to its base language (`en`).
#[derive(Debug, Clone, Default)]
pub struct ResourcePacks {
    packs: BTreeMap<String, Arc<ResourcePack>>,
}

impl ResourcePacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pack, replacing any pack registered for the same language.
    pub fn insert(&mut self, pack: ResourcePack) -> Option<Arc<ResourcePack>> {
        self.packs.insert(pack_key(pack.language()), Arc::new(pack))
    }

    /// Groups resources into packs by `metadata.language`.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Result<Self, Error> {
        let mut grouped: BTreeMap<String, ResourcePack> = BTreeMap::new();
        for resource in resources {
            let language = resource.metadata.language.trim().to_string();
            if language.is_empty() {
                return Err(Error::invalid_resource(format!(
                    "table `{}` has no language",
                    resource.table_name()
                )));
            }
            let is_base = language.eq_ignore_ascii_case(PLATFORM_DEFAULT_IDENTIFIER);
            if !is_base && resource.parse_language_identifier().is_none() {
                return Err(Error::InvalidIdentifier(language));
            }
            grouped
                .entry(pack_key(&language))
                .or_insert_with(|| ResourcePack::new(language))
                .add_resource(resource)?;
        }

        Ok(Self {
            packs: grouped
                .into_iter()
                .map(|(key, pack)| (key, Arc::new(pack)))
                .collect(),
        })
    }

    /// Reads a JSON array of [`Resource`] values.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let resources: Vec<Resource> = serde_json::from_reader(reader)?;
        Self::from_resources(resources)
    }

    /// Reads a JSON array of [`Resource`] values from a file.
    pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn get(&self, identifier: &str) -> Option<Arc<ResourcePack>> {
        let key = pack_key(identifier);
        if let Some(pack) = self.packs.get(&key) {
            return Some(pack.clone());
        }
        let lang = parse_language(&key)?;
        self.packs.get(lang.language.as_str()).cloned()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.packs.values().map(|pack| pack.language())
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

impl PackResolver for ResourcePacks {
    fn lookup_pack(&self, identifier: &str) -> Option<LocaleSource> {
        self.get(identifier).map(LocaleSource::from_pack)
    }
}

fn pattern_conflict(key: &str, other: &str, pattern: &str) -> Error {
    Error::invalid_resource(format!(
        "plural `{}` uses the pattern `{}` of `{}` with different forms",
        key, pattern, other
    ))
}

fn pack_key(language: &str) -> String {
    language.trim().replace('_', "-").to_ascii_lowercase()
}
