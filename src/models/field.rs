//! Field definitions for abstract data models.

use serde::{Deserialize, Serialize};

/// The primitive type of a field.
///
/// Unrecognized type strings deserialize to [`FieldType::Unknown`] instead of
/// failing, so a malformed field simply matches none of the type-specific
/// predicates used by the explicit model builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Boolean,
    Number,
    String,
    Datetime,
    Entity,
    Object,
    File,
    #[serde(other)]
    Unknown,
}

/// Refinement of a [`FieldType`].
///
/// Which subtypes are meaningful depends on the field type:
/// - number: `integer`, `float`, `latitude`, `longitude`
/// - string: `email`, `password`, `url`, `text`, `rich`
/// - datetime: `date`, `time`
/// - file: `image`, `video`, `audio`, `document`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSubtype {
    Integer,
    Float,
    Latitude,
    Longitude,
    Email,
    Password,
    Url,
    Text,
    Rich,
    Date,
    Time,
    Image,
    Video,
    Audio,
    Document,
    #[serde(other)]
    Unknown,
}

/// One attribute of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// The field's human name
    pub name: String,
    /// The field's primitive type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional subtype, dependent on `field_type`
    #[serde(default)]
    pub subtype: Option<FieldSubtype>,
    /// Identifier of the targeted model when `field_type` is `entity`
    #[serde(default)]
    pub reference: Option<String>,
    /// Should be used as a primary key
    #[serde(default)]
    pub primary: bool,
    /// Should be used as a unique key
    #[serde(default)]
    pub unique: bool,
    /// Should be used as a label
    #[serde(default)]
    pub label: bool,
    /// The field can be empty
    #[serde(default)]
    pub nullable: bool,
    /// The field is an array of values
    #[serde(default)]
    pub multiple: bool,
    /// The field should always be exposed explicitly
    #[serde(default)]
    pub embedded: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub sortable: bool,
    /// The field should not be exposed
    #[serde(default)]
    pub hidden: bool,
    /// The field is for internal use only and is never set by a user
    #[serde(default)]
    pub internal: bool,
    /// The field can only be set by authorized roles
    #[serde(default)]
    pub restricted: bool,
    /// The field defines the owner of the entity
    #[serde(default)]
    pub ownership: bool,
}

impl Field {
    /// Create a field with every flag unset.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            subtype: None,
            reference: None,
            primary: false,
            unique: false,
            label: false,
            nullable: false,
            multiple: false,
            embedded: false,
            searchable: false,
            sortable: false,
            hidden: false,
            internal: false,
            restricted: false,
            ownership: false,
        }
    }

    /// The referenced model id, if this field is an entity reference.
    ///
    /// Empty reference strings are treated as absent.
    #[must_use]
    pub fn reference_id(&self) -> Option<&str> {
        if self.field_type != FieldType::Entity {
            return None;
        }
        self.reference.as_deref().filter(|id| !id.is_empty())
    }

    /// Whether this field is an entity reference pointing at `model_id`.
    #[must_use]
    pub fn references(&self, model_id: &str) -> bool {
        self.reference_id() == Some(model_id)
    }

    /// Whether this is a number field with the given subtype.
    #[must_use]
    pub fn is_number_of(&self, subtype: FieldSubtype) -> bool {
        self.field_type == FieldType::Number && self.subtype == Some(subtype)
    }
}
