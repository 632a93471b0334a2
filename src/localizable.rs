//! Extension methods that treat a string as its own localization key.
//!
//! All methods read the global registry's active source.

use crate::{format::FormatArg, placeholder::Arguments, resolver::StringResolver};

/// Localization shortcuts on `str`.
///
/// ```rust
/// use std::sync::Arc;
/// use localizable::{Arguments, Localizable, LocaleSource, ResourcePack, set_active_locale_source};
///
/// let pack = ResourcePack::new("en").with_string("Greeting.Hello", "Hello, $(name)!");
/// set_active_locale_source(LocaleSource::from_pack(Arc::new(pack)));
///
/// let args = Arguments::new().with("name", "Ana");
/// assert_eq!("Greeting.Hello".localized_with(&args), "Hello, Ana!");
/// ```
pub trait Localizable {
    /// Value for `self` in the default table, or `self` if there is none.
    fn localized(&self) -> String;

    /// Value for `self` in `table`.
    fn localized_in(&self, table: &str) -> String;

    /// Value for `self` with `$(name)` placeholders filled from `arguments`.
    fn localized_with(&self, arguments: &Arguments) -> String;

    /// Plural-formatted value for `self`.
    fn localized_plural(&self, count: i64, args: &[FormatArg]) -> String;
}

impl Localizable for str {
    fn localized(&self) -> String {
        StringResolver::global().resolve(self, None, None, None)
    }

    fn localized_in(&self, table: &str) -> String {
        StringResolver::global().resolve(self, Some(table), None, None)
    }

    fn localized_with(&self, arguments: &Arguments) -> String {
        StringResolver::global().resolve(self, None, None, Some(arguments))
    }

    fn localized_plural(&self, count: i64, args: &[FormatArg]) -> String {
        StringResolver::global().resolve_plural(self, None, None, count, args)
    }
}
