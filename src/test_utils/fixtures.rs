//! Test fixtures for creating sample models and templates
//!
//! Builders default to what most tests want: models allow every known action
//! to guests, fields have every flag unset, and templates use the tera engine.

use crate::models::{Access, Accesses, Field, FieldSubtype, FieldType, Model, Template, TemplateInput};
use crate::templating::TeraEngine;

/// Builder for [`Model`] values
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    /// Model with no fields whose accesses are all `guest`
    pub fn new(id: &str, name: &str) -> Self {
        let mut model = Model::new(id, name);
        model.accesses = Accesses::uniform(Access::Guest);
        Self {
            model,
        }
    }

    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.model.fields.push(field.into());
        self
    }

    /// Set the level of one action, keeping the other declared actions
    pub fn access(mut self, action: &str, level: Access) -> Self {
        self.model.accesses.set(action, level);
        self
    }

    /// Replace every access declaration
    pub fn accesses(mut self, accesses: Accesses) -> Self {
        self.model.accesses = accesses;
        self
    }

    pub fn build(self) -> Model {
        self.model
    }
}

/// Builder for [`Field`] values
#[derive(Clone, Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            field: Field::new(name, field_type),
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: &str, subtype: FieldSubtype) -> Self {
        Self::new(name, FieldType::Number).subtype(subtype)
    }

    /// Entity field referencing the model with `reference` as id
    pub fn entity(name: &str, reference: &str) -> Self {
        let mut builder = Self::new(name, FieldType::Entity);
        builder.field.reference = Some(reference.to_string());
        builder
    }

    pub fn subtype(mut self, subtype: FieldSubtype) -> Self {
        self.field.subtype = Some(subtype);
        self
    }

    pub fn primary(mut self) -> Self {
        self.field.primary = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.field.unique = true;
        self
    }

    pub fn label(mut self) -> Self {
        self.field.label = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.field.nullable = true;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.field.multiple = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.field.searchable = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.field.sortable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.field.hidden = true;
        self
    }

    pub fn internal(mut self) -> Self {
        self.field.internal = true;
        self
    }

    pub fn ownership(mut self) -> Self {
        self.field.ownership = true;
        self
    }

    pub fn build(self) -> Field {
        self.field
    }
}

impl From<FieldBuilder> for Field {
    fn from(builder: FieldBuilder) -> Self {
        builder.build()
    }
}

/// Tera template with the given path, input mode and content
pub fn template(path: &str, input: TemplateInput, content: &str) -> Template {
    Template::new(path, TeraEngine::NAME, input, content)
}
