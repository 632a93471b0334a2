//! Locale sources: where localized strings are read from.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    pack::ResourcePack,
    traits::{PackResolver, PluralFormatter, StringTable},
};

/// Identifier of the source used before any locale is selected.
pub const PLATFORM_DEFAULT_IDENTIFIER: &str = "Base";

/// A resolved locale: string lookup plus plural formatting for one language.
///
/// Sources are immutable and cheap to clone. Switching languages means
/// building a new source, never editing an existing one.
#[derive(Clone)]
pub struct LocaleSource {
    identifier: String,
    table: Arc<dyn StringTable>,
    formatter: Arc<dyn PluralFormatter>,
}

impl LocaleSource {
    pub fn new(
        identifier: impl Into<String>,
        table: Arc<dyn StringTable>,
        formatter: Arc<dyn PluralFormatter>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            table,
            formatter,
        }
    }

    /// A source backed by a single in-memory pack, which handles both lookup and plurals.
    pub fn from_pack(pack: Arc<ResourcePack>) -> Self {
        Self {
            identifier: pack.language().to_string(),
            table: pack.clone(),
            formatter: pack,
        }
    }

    /// The source active before anything else is selected. Every lookup falls back to the key.
    pub fn platform_default() -> Self {
        Self::from_pack(Arc::new(ResourcePack::new(PLATFORM_DEFAULT_IDENTIFIER)))
    }

    /// Looks up the pack for a language code such as `"en"`, `"pt_BR"` or `"de-DE.UTF-8"`.
    ///
    /// Returns `None` when no pack matches; the caller decides what to fall back to.
    ///
    /// ```rust
    /// use localizable::{LocaleSource, ResourcePack, ResourcePacks};
    ///
    /// let mut packs = ResourcePacks::new();
    /// packs.insert(ResourcePack::new("en"));
    ///
    /// assert!(LocaleSource::resolve("en_US", &packs).is_some());
    /// assert!(LocaleSource::resolve("es", &packs).is_none());
    /// ```
    pub fn resolve(identifier: &str, resolver: &dyn PackResolver) -> Option<Self> {
        let normalized = normalize_identifier(identifier)?;
        let source = resolver.lookup_pack(&normalized);
        if source.is_none() {
            debug!(identifier, "no locale pack found");
        }
        source
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn table(&self) -> &dyn StringTable {
        self.table.as_ref()
    }

    pub fn formatter(&self) -> &dyn PluralFormatter {
        self.formatter.as_ref()
    }
}

impl PartialEq for LocaleSource {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && Arc::ptr_eq(&self.table, &other.table)
            && Arc::ptr_eq(&self.formatter, &other.formatter)
    }
}

impl fmt::Debug for LocaleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleSource")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Trims, drops `.encoding` and `@modifier` suffixes, and turns `_` into `-`.
pub(crate) fn normalize_identifier(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.replace('_', "-"))
}
