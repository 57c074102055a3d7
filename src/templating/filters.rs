//! Custom Tera filters.

use std::collections::HashMap;

use crate::names::NameVariants;

/// Create the `variant` filter.
///
/// Converts any string into one of its name variants, for names that are not
/// already carried by a model or field:
///
/// ```text
/// {{ "created at" | variant(name="camel") }}   -> createdAt
/// {{ model.name | variant(name="constant") }}  -> USER_PROFILE
/// ```
///
/// The `name` argument must be one of [`NameVariants::KEYS`].
pub fn create_variant_filter() -> impl tera::Filter + 'static {
    |value: &tera::Value, args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let raw = value
            .as_str()
            .ok_or_else(|| tera::Error::msg("variant filter requires a string value"))?;

        let key = args
            .get("name")
            .and_then(|name| name.as_str())
            .ok_or_else(|| tera::Error::msg("variant filter requires a `name` argument"))?;

        let variants = NameVariants::new(raw);
        let variant = variants.get(key).ok_or_else(|| {
            tera::Error::msg(format!(
                "Unknown name variant '{}'. Available variants: {}",
                key,
                NameVariants::KEYS.join(", ")
            ))
        })?;

        Ok(tera::Value::String(variant.to_string()))
    }
}
