#![forbid(unsafe_code)]
//! Key-based localized string lookup for Rust.
//!
//! Resolves a key (plus an optional table and locale source) to display text,
//! fills `$(name)` placeholders, and formats plural patterns. The active
//! locale lives in a [`LocaleRegistry`] that publishes [`LocaleChanged`] on
//! every switch.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use localizable::{
//!     Arguments, LocaleRegistry, LocaleSource, PluralCategory, ResourcePack, ResourcePacks,
//!     StringResolver,
//! };
//!
//! let mut packs = ResourcePacks::new();
//! packs.insert(
//!     ResourcePack::new("en")
//!         .with_string("Greeting.Hello", "Hello, $(name)!")
//!         .with_plural(
//!             "Date.UnitPlural.Hour",
//!             [(PluralCategory::One, "%d hour"), (PluralCategory::Other, "%d hours")],
//!         )?,
//! );
//!
//! let registry = LocaleRegistry::default();
//! registry.set_active(LocaleSource::resolve("en_US", &packs).expect("english pack"));
//!
//! let resolver = StringResolver::new(&registry);
//! let args = Arguments::new().with("name", "Ana");
//! assert_eq!(resolver.resolve("Greeting.Hello", None, None, Some(&args)), "Hello, Ana!");
//! assert_eq!(resolver.resolve_plural("Date.UnitPlural.Hour", None, None, 5, &[5.into()]), "5 hours");
//! # Ok::<(), localizable::Error>(())
//! ```
//!
//! # Failure behaviour
//!
//! Resolution never fails. A missing key yields the key, an unknown placeholder
//! stays verbatim, and an unknown language code yields `None` from
//! [`LocaleSource::resolve`] so the caller can keep the current source.

pub mod config;
pub mod error;
pub mod format;
pub mod localizable;
pub mod pack;
pub mod placeholder;
pub mod plural_rules;
pub mod registry;
pub mod resolver;
pub mod source;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::LocalizationConfig,
    error::Error,
    format::FormatArg,
    localizable::Localizable,
    pack::{ResourcePack, ResourcePacks},
    placeholder::Arguments,
    plural_rules::PluralRule,
    registry::{
        LocaleChanged, LocaleRegistry, SubscriptionId, active_locale_source,
        set_active_locale_source,
    },
    resolver::{StringResolver, resolve, resolve_plural},
    source::LocaleSource,
    traits::{PackResolver, PluralFormatter, StringTable},
    types::{Entry, Metadata, Plural, PluralCategory, Resource, Translation},
};
