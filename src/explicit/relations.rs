//! Reference graph views: dependencies and referencing models.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

use super::fields::ExplicitField;
use super::ExplicitModel;

/// Distinct models reachable from a model through one reference hop.
#[derive(Debug, Clone, Serialize)]
pub struct Dependencies {
    pub list: Vec<Arc<ExplicitModel>>,
    /// Whether any reference of the model targets the model itself
    #[serde(rename = "self")]
    pub self_reference: bool,
}

impl Dependencies {
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.list.iter().any(|model| model.id == id)
    }
}

/// Reduce resolved references to their distinct target models.
///
/// References are kept when `predicate` holds, self references are skipped
/// when `exclude_self` is set, and the first reference to each target wins.
pub(super) fn reduce_dependencies<'a, I, P>(
    model_id: &str,
    references: I,
    predicate: P,
    exclude_self: bool,
) -> Vec<Arc<ExplicitModel>>
where
    I: IntoIterator<Item = &'a ExplicitField>,
    P: Fn(&ExplicitField) -> bool,
{
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter(|field| predicate(field))
        .filter_map(|field| field.model.as_ref())
        .filter(|target| !(exclude_self && target.id == model_id))
        .filter(|target| seen.insert(target.id.clone()))
        .map(Arc::clone)
        .collect()
}

/// A model that references another one, narrowed to the referencing fields.
///
/// The underlying explicit model is shared; only the field selection is
/// specific to this view.
#[derive(Debug, Clone)]
pub struct ReferencingModel {
    model: Arc<ExplicitModel>,
    fields: Vec<usize>,
}

impl ReferencingModel {
    pub(super) fn new(model: Arc<ExplicitModel>, target_id: &str) -> Self {
        let fields = model
            .fields
            .list()
            .iter()
            .enumerate()
            .filter(|(_, field)| field.references(target_id))
            .map(|(index, _)| index)
            .collect();
        Self {
            model,
            fields,
        }
    }

    #[must_use]
    pub fn model(&self) -> &Arc<ExplicitModel> {
        &self.model
    }

    /// The fields of [`ReferencingModel::model`] that point at the target.
    #[must_use]
    pub fn fields(&self) -> Vec<&ExplicitField> {
        let list = self.model.fields.list();
        self.fields.iter().map(|&index| &list[index]).collect()
    }
}

impl Serialize for ReferencingModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("id", &self.model.id)?;
        map.serialize_entry("name", &self.model.name)?;
        map.serialize_entry("names", &self.model.names)?;
        map.serialize_entry("fields", &self.fields())?;
        map.serialize_entry("properties", &self.model.properties)?;
        map.serialize_entry("accesses", &self.model.accesses)?;
        map.end()
    }
}
