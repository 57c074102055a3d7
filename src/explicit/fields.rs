//! Field views and field-derived model properties.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::ops::Deref;
use std::sync::Arc;

use super::ExplicitModel;
use crate::models::{Field, FieldSubtype};
use crate::names::NameVariants;

/// A field plus the data derived from it.
///
/// The canonical [`Field`] is copied into the view and never modified; derived
/// values (`names`, the resolved target `model`) live next to it.
#[derive(Debug, Clone, Serialize)]
pub struct ExplicitField {
    #[serde(flatten)]
    pub field: Field,
    pub names: NameVariants,
    /// Depth-1 explicit model of the referenced target, top-level references only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Arc<ExplicitModel>>,
}

impl ExplicitField {
    fn new(field: &Field) -> Self {
        Self {
            names: NameVariants::new(&field.name),
            field: field.clone(),
            model: None,
        }
    }
}

impl Deref for ExplicitField {
    type Target = Field;

    fn deref(&self) -> &Field {
        &self.field
    }
}

/// Named boolean-flag groups of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Unique,
    Label,
    Nullable,
    Multiple,
    Embedded,
    Searchable,
    Sortable,
    Hidden,
    Internal,
    Restricted,
    Ownership,
    /// Fields that are both label and searchable
    SearchableLabel,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 12] = [
        FieldGroup::Unique,
        FieldGroup::Label,
        FieldGroup::Nullable,
        FieldGroup::Multiple,
        FieldGroup::Embedded,
        FieldGroup::Searchable,
        FieldGroup::Sortable,
        FieldGroup::Hidden,
        FieldGroup::Internal,
        FieldGroup::Restricted,
        FieldGroup::Ownership,
        FieldGroup::SearchableLabel,
    ];

    /// Key of the group in the serialized `fields` object.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            FieldGroup::Unique => "unique",
            FieldGroup::Label => "label",
            FieldGroup::Nullable => "nullable",
            FieldGroup::Multiple => "multiple",
            FieldGroup::Embedded => "embedded",
            FieldGroup::Searchable => "searchable",
            FieldGroup::Sortable => "sortable",
            FieldGroup::Hidden => "hidden",
            FieldGroup::Internal => "internal",
            FieldGroup::Restricted => "restricted",
            FieldGroup::Ownership => "ownership",
            FieldGroup::SearchableLabel => "searchableLabel",
        }
    }

    #[must_use]
    pub const fn contains(self, field: &Field) -> bool {
        match self {
            FieldGroup::Unique => field.unique,
            FieldGroup::Label => field.label,
            FieldGroup::Nullable => field.nullable,
            FieldGroup::Multiple => field.multiple,
            FieldGroup::Embedded => field.embedded,
            FieldGroup::Searchable => field.searchable,
            FieldGroup::Sortable => field.sortable,
            FieldGroup::Hidden => field.hidden,
            FieldGroup::Internal => field.internal,
            FieldGroup::Restricted => field.restricted,
            FieldGroup::Ownership => field.ownership,
            FieldGroup::SearchableLabel => field.label && field.searchable,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// The field list of an explicit model with its groups.
///
/// Groups are index views onto [`ExplicitFields::list`]; they hold no copies
/// and are materialized as arrays only when serialized.
#[derive(Debug, Clone)]
pub struct ExplicitFields {
    list: Vec<ExplicitField>,
    primary: Option<usize>,
    groups: [Vec<usize>; FieldGroup::ALL.len()],
    references: Option<Vec<usize>>,
}

impl ExplicitFields {
    pub(super) fn new(fields: &[Field]) -> Self {
        let list: Vec<ExplicitField> = fields.iter().map(ExplicitField::new).collect();
        let primary = list.iter().position(|f| f.primary);
        let groups = std::array::from_fn(|i| {
            let group = FieldGroup::ALL[i];
            list.iter()
                .enumerate()
                .filter(|(_, f)| group.contains(f))
                .map(|(index, _)| index)
                .collect()
        });

        Self {
            list,
            primary,
            groups,
            references: None,
        }
    }

    /// All fields in declaration order.
    #[must_use]
    pub fn list(&self) -> &[ExplicitField] {
        &self.list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The first field flagged as primary.
    #[must_use]
    pub fn primary(&self) -> Option<&ExplicitField> {
        self.primary.map(|index| &self.list[index])
    }

    #[must_use]
    pub fn group(&self, group: FieldGroup) -> Vec<&ExplicitField> {
        self.groups[group.index()].iter().map(|&index| &self.list[index]).collect()
    }

    #[must_use]
    pub fn count(&self, group: FieldGroup) -> usize {
        self.groups[group.index()].len()
    }

    /// Fields matching `predicate`, in declaration order.
    pub fn filter<P>(&self, predicate: P) -> Vec<&ExplicitField>
    where
        P: Fn(&ExplicitField) -> bool,
    {
        self.list.iter().filter(|f| predicate(f)).collect()
    }

    /// Entity fields whose target model was resolved.
    ///
    /// `None` below the top level, where references are not expanded.
    #[must_use]
    pub fn references(&self) -> Option<Vec<&ExplicitField>> {
        self.references
            .as_ref()
            .map(|indices| indices.iter().map(|&index| &self.list[index]).collect())
    }

    pub(super) fn attach_model(&mut self, index: usize, model: Arc<ExplicitModel>) {
        self.list[index].model = Some(model);
    }

    pub(super) fn set_references(&mut self, indices: Vec<usize>) {
        self.references = Some(indices);
    }
}

impl Serialize for ExplicitFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("list", &self.list)?;
        map.serialize_entry("primary", &self.primary())?;
        for group in FieldGroup::ALL {
            map.serialize_entry(group.key(), &self.group(group))?;
        }
        if let Some(references) = self.references() {
            map.serialize_entry("references", &references)?;
        }
        map.end()
    }
}

/// Summary flags derived from the field groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProperties {
    pub fields_count: usize,
    pub has_primary: bool,
    pub has_unique: bool,
    pub has_label: bool,
    pub has_nullable: bool,
    pub has_multiple: bool,
    pub has_embedded: bool,
    pub has_searchable: bool,
    pub has_sortable: bool,
    pub has_hidden: bool,
    pub has_internal: bool,
    pub has_restricted: bool,
    pub has_ownership: bool,
    pub has_searchable_label: bool,
    /// More than half of the fields are hidden
    pub mainly_hidden: bool,
    /// More than half of the fields are internal
    pub mainly_internal: bool,
    /// Has at least one latitude and one longitude number field
    pub is_geolocated: bool,
    /// Like `is_geolocated`, with both coordinates searchable
    pub is_geo_searchable: bool,
    /// Top level only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_dependencies: Option<bool>,
    /// Top level only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_referenced: Option<bool>,
}

impl ModelProperties {
    pub(super) fn from_fields(fields: &ExplicitFields) -> Self {
        let has = |group: FieldGroup| fields.count(group) > 0;
        let count = fields.len();
        let coordinate = |subtype: FieldSubtype, searchable: bool| {
            fields.list().iter().any(|f| f.is_number_of(subtype) && (!searchable || f.searchable))
        };

        Self {
            fields_count: count,
            has_primary: fields.primary().is_some(),
            has_unique: has(FieldGroup::Unique),
            has_label: has(FieldGroup::Label),
            has_nullable: has(FieldGroup::Nullable),
            has_multiple: has(FieldGroup::Multiple),
            has_embedded: has(FieldGroup::Embedded),
            has_searchable: has(FieldGroup::Searchable),
            has_sortable: has(FieldGroup::Sortable),
            has_hidden: has(FieldGroup::Hidden),
            has_internal: has(FieldGroup::Internal),
            has_restricted: has(FieldGroup::Restricted),
            has_ownership: has(FieldGroup::Ownership),
            has_searchable_label: has(FieldGroup::SearchableLabel),
            mainly_hidden: count < 2 * fields.count(FieldGroup::Hidden),
            mainly_internal: count < 2 * fields.count(FieldGroup::Internal),
            is_geolocated: coordinate(FieldSubtype::Latitude, false)
                && coordinate(FieldSubtype::Longitude, false),
            is_geo_searchable: coordinate(FieldSubtype::Latitude, true)
                && coordinate(FieldSubtype::Longitude, true),
            has_dependencies: None,
            is_referenced: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    fn field(name: &str, configure: impl FnOnce(&mut Field)) -> Field {
        let mut field = Field::new(name, FieldType::String);
        configure(&mut field);
        field
    }

    #[test]
    fn test_groups_are_views_in_declaration_order() {
        let fields = ExplicitFields::new(&[
            field("a", |f| f.hidden = true),
            field("b", |_| {}),
            field("c", |f| {
                f.hidden = true;
                f.label = true;
                f.searchable = true;
            }),
        ]);

        let hidden_group = fields.group(FieldGroup::Hidden);
        let hidden: Vec<&str> = hidden_group.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(hidden, vec!["a", "c"]);
        assert_eq!(fields.count(FieldGroup::SearchableLabel), 1);
        assert_eq!(fields.count(FieldGroup::Label), 1);
        assert!(std::ptr::eq(fields.group(FieldGroup::Hidden)[1], &fields.list()[2]));
    }

    #[test]
    fn test_primary_is_first_truthy() {
        let fields = ExplicitFields::new(&[
            field("a", |_| {}),
            field("b", |f| f.primary = true),
            field("c", |f| f.primary = true),
        ]);
        assert_eq!(fields.primary().map(|f| f.name.as_str()), Some("b"));
    }

    #[test]
    fn test_filter() {
        let fields = ExplicitFields::new(&[field("a", |_| {}), field("b", |f| f.hidden = true)]);
        assert_eq!(fields.filter(|_| true).len(), 2);
        assert_eq!(fields.filter(|f| f.hidden).len(), 1);
    }

    #[test]
    fn test_mainly_hidden_is_strict_majority() {
        let two_of_three = ExplicitFields::new(&[
            field("a", |f| f.hidden = true),
            field("b", |f| f.hidden = true),
            field("c", |_| {}),
        ]);
        assert!(ModelProperties::from_fields(&two_of_three).mainly_hidden);

        let half = ExplicitFields::new(&[field("a", |f| f.internal = true), field("b", |_| {})]);
        assert!(!ModelProperties::from_fields(&half).mainly_internal);
    }

    #[test]
    fn test_geolocation() {
        let coordinate = |name: &str, subtype, searchable| {
            let mut field = Field::new(name, FieldType::Number);
            field.subtype = Some(subtype);
            field.searchable = searchable;
            field
        };

        let both = ExplicitFields::new(&[
            coordinate("lat", FieldSubtype::Latitude, true),
            coordinate("lng", FieldSubtype::Longitude, true),
        ]);
        let properties = ModelProperties::from_fields(&both);
        assert!(properties.is_geolocated);
        assert!(properties.is_geo_searchable);

        let one_searchable = ExplicitFields::new(&[
            coordinate("lat", FieldSubtype::Latitude, false),
            coordinate("lng", FieldSubtype::Longitude, true),
        ]);
        let properties = ModelProperties::from_fields(&one_searchable);
        assert!(properties.is_geolocated);
        assert!(!properties.is_geo_searchable);

        let mut text_latitude = coordinate("lat", FieldSubtype::Latitude, true);
        text_latitude.field_type = FieldType::String;
        let wrong_type = ExplicitFields::new(&[
            text_latitude,
            coordinate("lng", FieldSubtype::Longitude, true),
        ]);
        assert!(!ModelProperties::from_fields(&wrong_type).is_geolocated);
    }

    #[test]
    fn test_serialized_shape() {
        let fields = ExplicitFields::new(&[field("created at", |f| f.sortable = true)]);
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["list"][0]["names"]["camel"], "createdAt");
        assert_eq!(json["list"][0]["type"], "string");
        assert!(json["primary"].is_null());
        assert_eq!(json["sortable"].as_array().unwrap().len(), 1);
        assert_eq!(json["searchableLabel"].as_array().unwrap().len(), 0);
        assert!(json.get("references").is_none());
        assert!(json["list"][0].get("model").is_none());
    }
}
