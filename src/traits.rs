//! Contracts for the collaborators string resolution delegates to.
//!
//! Storage, table lookup and plural formatting live behind these traits. The
//! crate ships in-memory implementations in [`crate::pack`]; applications can
//! back them with anything else (platform bundles, gettext catalogs, ...).

use tracing::trace;

use crate::{format::FormatArg, source::LocaleSource};

/// Key → string lookup within one locale.
///
/// # Example
///
/// ```rust
/// use localizable::traits::StringTable;
///
/// #[derive(Debug)]
/// struct Shouting;
///
/// impl StringTable for Shouting {
///     fn find(&self, key: &str, _table: Option<&str>) -> Option<String> {
///         Some(key.to_uppercase())
///     }
/// }
///
/// assert_eq!(Shouting.lookup_string("hi", None), "HI");
/// ```
pub trait StringTable: std::fmt::Debug + Send + Sync {
    /// Returns the template stored under `key` in `table`, or `None` on a miss.
    fn find(&self, key: &str, table: Option<&str>) -> Option<String>;

    /// Like [`find`](Self::find), but falls back to the key itself on a miss.
    fn lookup_string(&self, key: &str, table: Option<&str>) -> String {
        self.find(key, table).unwrap_or_else(|| {
            trace!(key, table = ?table, "missing localization key");
            key.to_string()
        })
    }
}

/// Applies plural-form selection and positional interpolation to a pattern.
pub trait PluralFormatter: std::fmt::Debug + Send + Sync {
    /// Formats `pattern` for `count`. Must not fail; unusable tokens stay verbatim.
    fn format_plural(&self, pattern: &str, count: i64, args: &[FormatArg]) -> String;
}

/// Turns a locale identifier into a usable [`LocaleSource`].
pub trait PackResolver: Send + Sync {
    /// Returns `None` when no pack exists for `identifier`.
    fn lookup_pack(&self, identifier: &str) -> Option<LocaleSource>;
}
