//! Key → display string resolution.
//!
//! Lookup never fails. A missing key resolves to the key itself and a
//! placeholder without a matching argument stays in the output verbatim.

use crate::{
    format::FormatArg,
    placeholder::{Arguments, substitute},
    registry::LocaleRegistry,
    source::LocaleSource,
};

/// Resolves `key` in `table` of `source`, then fills `$(name)` placeholders from `arguments`.
pub fn resolve(
    key: &str,
    table: Option<&str>,
    source: &LocaleSource,
    arguments: Option<&Arguments>,
) -> String {
    let template = source.table().lookup_string(key, table);

    match arguments {
        Some(arguments) => substitute(&template, arguments),
        None => template,
    }
}

/// Resolves `key` and hands the result to the source's plural formatter.
pub fn resolve_plural(
    key: &str,
    table: Option<&str>,
    source: &LocaleSource,
    count: i64,
    args: &[FormatArg],
) -> String {
    let pattern = resolve(key, table, source, None);
    source.formatter().format_plural(&pattern, count, args)
}

/// Resolves strings against a registry's active source.
///
/// ```rust
/// use std::sync::Arc;
/// use localizable::{Arguments, LocaleRegistry, LocaleSource, ResourcePack, StringResolver};
///
/// let pack = ResourcePack::new("en").with_string("Greeting.Hello", "Hello, $(name)!");
/// let registry = LocaleRegistry::new(LocaleSource::from_pack(Arc::new(pack)));
/// let resolver = StringResolver::new(&registry);
///
/// let args = Arguments::new().with("name", "Ana");
/// assert_eq!(resolver.resolve("Greeting.Hello", None, None, Some(&args)), "Hello, Ana!");
/// assert_eq!(resolver.resolve("Untranslated.Key", None, None, None), "Untranslated.Key");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StringResolver<'r> {
    registry: &'r LocaleRegistry,
    default_table: Option<&'r str>,
}

impl<'r> StringResolver<'r> {
    pub fn new(registry: &'r LocaleRegistry) -> Self {
        Self {
            registry,
            default_table: None,
        }
    }

    /// A resolver bound to [`LocaleRegistry::global`].
    pub fn global() -> StringResolver<'static> {
        StringResolver::new(LocaleRegistry::global())
    }

    /// Table used when a call passes `None`.
    pub fn with_default_table(mut self, table: &'r str) -> Self {
        self.default_table = Some(table);
        self
    }

    pub fn registry(&self) -> &'r LocaleRegistry {
        self.registry
    }

    /// Resolves against `source`, or the registry's active source when `None`.
    pub fn resolve(
        &self,
        key: &str,
        table: Option<&str>,
        source: Option<&LocaleSource>,
        arguments: Option<&Arguments>,
    ) -> String {
        let table = table.or(self.default_table);
        match source {
            Some(source) => resolve(key, table, source, arguments),
            None => resolve(key, table, &self.registry.active(), arguments),
        }
    }

    /// Plural-aware variant of [`resolve`](Self::resolve).
    pub fn resolve_plural(
        &self,
        key: &str,
        table: Option<&str>,
        source: Option<&LocaleSource>,
        count: i64,
        args: &[FormatArg],
    ) -> String {
        let table = table.or(self.default_table);
        match source {
            Some(source) => resolve_plural(key, table, source, count, args),
            None => resolve_plural(key, table, &self.registry.active(), count, args),
        }
    }
}
