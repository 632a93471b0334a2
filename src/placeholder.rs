//! Named `$(name)` placeholders.
//!
//! Substitution is a single left-to-right pass over the template:
//! - `$(name)` with a matching argument is replaced by the argument's text.
//! - Tokens without a matching argument are left as-is.
//! - Replacement text is never rescanned, so a value containing `$(other)`
//!   shows up literally.

use std::{collections::BTreeMap, fmt::Display};

const OPEN: &str = "$(";

/// Placeholder name → displayed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: BTreeMap<String, String>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, rendering `value` with `Display`. A repeated name replaces the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.values.insert(name.into(), value.to_string());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The argument whose `$(name)` token starts `text`. The longest name wins.
    fn match_at(&self, text: &str) -> Option<(usize, &str)> {
        let rest = text.strip_prefix(OPEN)?;
        self.values
            .iter()
            .filter(|(name, _)| {
                rest.strip_prefix(name.as_str())
                    .is_some_and(|after| after.starts_with(')'))
            })
            .max_by_key(|(name, _)| name.len())
            .map(|(name, value)| (OPEN.len() + name.len() + 1, value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arguments = Arguments::new();
        for (name, value) in iter {
            arguments.insert(name, value);
        }
        arguments
    }
}

/// Replaces every `$(name)` token in `template` that has a matching argument.
///
/// ```rust
/// use localizable::placeholder::{substitute, Arguments};
///
/// let args = Arguments::new().with("name", "Ana");
/// assert_eq!(substitute("Hello, $(name)! $(unknown)", &args), "Hello, Ana! $(unknown)");
/// ```
pub fn substitute(template: &str, arguments: &Arguments) -> String {
    if arguments.is_empty() || !template.contains(OPEN) {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match arguments.match_at(candidate) {
            Some((token_len, value)) => {
                out.push_str(value);
                rest = &candidate[token_len..];
            }
            None => {
                out.push_str(OPEN);
                rest = &candidate[OPEN.len()..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_single() {
        let args = Arguments::new().with("name", "Ana");
        assert_eq!(substitute("Hello, $(name)!", &args), "Hello, Ana!");
    }

    #[test]
    fn test_substitute_repeated_and_multiple() {
        let args: Arguments = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(substitute("$(a)$(b)$(a)", &args), "121");
    }

    #[test]
    fn test_display_values() {
        let args = Arguments::new().with("count", 3).with("ratio", 0.5);
        assert_eq!(substitute("$(count) at $(ratio)", &args), "3 at 0.5");
    }

    #[test]
    fn test_unmatched_token_left_verbatim() {
        let args = Arguments::new().with("name", "Ana");
        assert_eq!(substitute("Hi $(nam) $(name", &args), "Hi $(nam) $(name");
    }

    #[test]
    fn test_unused_arguments_ignored() {
        let args = Arguments::new().with("unused", "x");
        assert_eq!(substitute("Plain text", &args), "Plain text");
    }

    #[test]
    fn test_no_recursive_substitution() {
        let args = Arguments::new().with("a", "$(b)").with("b", "B");
        assert_eq!(substitute("$(a) $(b)", &args), "$(b) B");
    }

    #[test]
    fn test_value_forming_token_with_following_text_is_not_rescanned() {
        let args = Arguments::new().with("open", "$(").with("x", "X");
        assert_eq!(substitute("$(open)x)", &args), "$(x)");
    }

    #[test]
    fn test_longest_name_wins() {
        let args = Arguments::new().with("a", "short").with("a)b", "long");
        assert_eq!(substitute("$(a)b)", &args), "long");
        assert_eq!(substitute("$(a)c)", &args), "shortc)");
    }

    #[test]
    fn test_nested_dollar_paren() {
        let args = Arguments::new().with("x", "1");
        assert_eq!(substitute("$($(x))", &args), "$(1)");
    }

    #[test]
    fn test_non_ascii() {
        let args = Arguments::new().with("имя", "Аня");
        assert_eq!(substitute("Привет, $(имя)! ✓", &args), "Привет, Аня! ✓");
    }

    #[test]
    fn test_insert_replaces() {
        let mut args = Arguments::new();
        args.insert("k", "v1");
        args.insert("k", "v2");
        assert_eq!(args.len(), 1);
        assert_eq!(args.get("k"), Some("v2"));
        assert_eq!(args.iter().count(), 1);
    }
}
