//! Name variants derived from a human-written name.
//!
//! Every model and field carries a [`NameVariants`] so templates can pick the
//! casing they need (`names.kebab`, `names.pascal`, ...). The same keys are the
//! `{key}` placeholders accepted in one-mode template paths.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
    ToTrainCase, ToUpperCamelCase,
};
use serde::Serialize;

/// Casing variants of one name.
///
/// For the raw name `User profile`:
///
/// | key        | value          |
/// |------------|----------------|
/// | `raw`      | `User profile` |
/// | `kebab`    | `user-profile` |
/// | `snake`    | `user_profile` |
/// | `header`   | `User-Profile` |
/// | `constant` | `USER_PROFILE` |
/// | `big`      | `USER-PROFILE` |
/// | `capital`  | `User Profile` |
/// | `lower`    | `user profile` |
/// | `upper`    | `USER PROFILE` |
/// | `compact`  | `userprofile`  |
/// | `pascal`   | `UserProfile`  |
/// | `camel`    | `userProfile`  |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameVariants {
    pub raw: String,
    pub kebab: String,
    pub snake: String,
    pub header: String,
    pub constant: String,
    pub big: String,
    pub capital: String,
    pub lower: String,
    pub upper: String,
    pub compact: String,
    pub pascal: String,
    pub camel: String,
}

impl NameVariants {
    /// Every variant key, in serialization order.
    pub const KEYS: [&'static str; 12] = [
        "raw", "kebab", "snake", "header", "constant", "big", "capital", "lower", "upper",
        "compact", "pascal", "camel",
    ];

    #[must_use]
    pub fn new(raw: &str) -> Self {
        let snake = raw.to_snake_case();
        let capital = raw.to_title_case();
        Self {
            raw: raw.to_string(),
            kebab: raw.to_kebab_case(),
            compact: snake.replace('_', ""),
            snake,
            header: raw.to_train_case(),
            constant: raw.to_shouty_snake_case(),
            big: raw.to_shouty_kebab_case(),
            lower: capital.to_lowercase(),
            upper: capital.to_uppercase(),
            capital,
            pascal: raw.to_upper_camel_case(),
            camel: raw.to_lower_camel_case(),
        }
    }

    /// Look up a variant by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "raw" => &self.raw,
            "kebab" => &self.kebab,
            "snake" => &self.snake,
            "header" => &self.header,
            "constant" => &self.constant,
            "big" => &self.big,
            "capital" => &self.capital,
            "lower" => &self.lower,
            "upper" => &self.upper,
            "compact" => &self.compact,
            "pascal" => &self.pascal,
            "camel" => &self.camel,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Iterate over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Self::KEYS.into_iter().filter_map(move |key| self.get(key).map(|value| (key, value)))
    }

    /// Replace every `{key}` placeholder in `template` with the matching variant.
    ///
    /// Unrecognized placeholders are left untouched.
    #[must_use]
    pub fn substitute(&self, template: &str) -> String {
        let mut output = template.to_string();
        for (key, value) in self.iter() {
            let placeholder = format!("{{{key}}}");
            if output.contains(&placeholder) {
                output = output.replace(&placeholder, value);
            }
        }
        output
    }
}
