//! Explicit model builder.
//!
//! An [`ExplicitModel`] is the denormalized, read-only view of a [`Model`] that
//! templates consume: every field carries its name variants, fields are
//! partitioned into flag groups, accesses are expanded into comparison
//! descriptors, and (for top-level models) references are resolved into the
//! explicit models they point at.
//!
//! # Recursion
//!
//! Models form a directed graph that may contain self references and cycles.
//! [`explicit_model`] is bounded by two mechanisms:
//!
//! - Only depth 0 expands the graph. Targets of references and referencing
//!   models are built at depth 1, which never looks at references again, so a
//!   build never goes deeper than one hop.
//! - Depth-0 results are memoized in an [`ExplicitCache`] for the whole run,
//!   so every model is fully expanded at most once and repeated lookups return
//!   the identical [`Arc`].
//!
//! # Example
//!
//! ```rust
//! use modelgen::explicit::{explicit_model, ExplicitCache};
//! use modelgen::models::{Access, Accesses, Field, FieldType, Model};
//! use std::sync::Arc;
//!
//! let mut node = Model::new("n1", "Node");
//! node.accesses = Accesses::uniform(Access::Guest);
//! let mut parent = Field::new("parent", FieldType::Entity);
//! parent.reference = Some("n1".into());
//! node.fields.push(parent);
//!
//! let models = vec![node];
//! let mut cache = ExplicitCache::default();
//! let explicit = explicit_model(&models, &models[0], &mut cache, 0);
//!
//! let dependencies = explicit.dependencies.as_ref().unwrap();
//! assert!(dependencies.self_reference);
//! assert!(dependencies.is_empty());
//! assert!(Arc::ptr_eq(&explicit, &explicit_model(&models, &models[0], &mut cache, 0)));
//! ```

mod accesses;
mod cache;
mod fields;
mod relations;

pub use accesses::{AccessProperties, ActionAccess, ExplicitAccesses};
pub use cache::ExplicitCache;
pub use fields::{ExplicitField, ExplicitFields, FieldGroup, ModelProperties};
pub use relations::{Dependencies, ReferencingModel};

use serde::Serialize;
use std::sync::Arc;

use crate::models::Model;
use crate::names::NameVariants;

/// Denormalized per-run view of a [`Model`].
///
/// `dependencies` and `referenced_in` are only present on top-level (depth 0)
/// models, as are `fields.references` and the related properties.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplicitModel {
    pub id: String,
    pub name: String,
    pub names: NameVariants,
    pub fields: ExplicitFields,
    pub properties: ModelProperties,
    pub accesses: ExplicitAccesses,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_in: Option<Vec<ReferencingModel>>,
}

impl ExplicitModel {
    /// Build the depth-independent part of the view.
    fn base(model: &Model) -> Self {
        let fields = ExplicitFields::new(&model.fields);
        let properties = ModelProperties::from_fields(&fields);

        Self {
            id: model.id.clone(),
            name: model.name.clone(),
            names: NameVariants::new(&model.name),
            fields,
            properties,
            accesses: ExplicitAccesses::new(&model.accesses),
            dependencies: None,
            referenced_in: None,
        }
    }

    /// Whether references, dependencies and referencing models were resolved.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.dependencies.is_some()
    }

    /// Recompute dependencies keeping only references matching `predicate`.
    ///
    /// With `exclude_self` unset, a self reference yields the model itself
    /// among the results. Returns an empty list for models that were not
    /// expanded.
    pub fn dependencies_where<P>(&self, predicate: P, exclude_self: bool) -> Vec<Arc<ExplicitModel>>
    where
        P: Fn(&ExplicitField) -> bool,
    {
        match self.fields.references() {
            Some(references) => {
                relations::reduce_dependencies(&self.id, references, predicate, exclude_self)
            }
            None => Vec::new(),
        }
    }
}

/// Build the explicit model of `model` against the full model set.
///
/// At depth 0 the result is served from and stored into `cache`; any other
/// depth builds a fresh, unexpanded view and leaves the cache untouched.
/// Dangling references are dropped from the reference list. This function
/// never fails: malformed field data only drops out of type-specific groups.
pub fn explicit_model(
    models: &[Model],
    model: &Model,
    cache: &mut ExplicitCache,
    depth: usize,
) -> Arc<ExplicitModel> {
    let mut explicit = if depth == 0 {
        if let Some(cached) = cache.get(&model.id) {
            return cached;
        }
        ExplicitModel::base(model)
    } else {
        return Arc::new(ExplicitModel::base(model));
    };

    expand(models, model, cache, &mut explicit);
    cache.insert(Arc::new(explicit))
}

/// Build the explicit models of every model, in input order.
pub fn explicit_all_models(models: &[Model], cache: &mut ExplicitCache) -> Vec<Arc<ExplicitModel>> {
    models.iter().map(|model| explicit_model(models, model, cache, 0)).collect()
}

fn expand(models: &[Model], model: &Model, cache: &mut ExplicitCache, explicit: &mut ExplicitModel) {
    tracing::trace!("Expanding references of model '{}'", model.id);
    let mut references = Vec::new();
    for (index, field) in model.fields.iter().enumerate() {
        let Some(target_id) = field.reference_id() else {
            continue;
        };
        match models.iter().find(|candidate| candidate.id == target_id) {
            Some(target) => {
                let target = explicit_model(models, target, cache, 1);
                explicit.fields.attach_model(index, target);
                references.push(index);
            }
            None => {
                tracing::warn!(
                    "Dropping reference '{}' of model '{}': no model with id '{}'",
                    field.name,
                    model.id,
                    target_id
                );
            }
        }
    }
    explicit.fields.set_references(references);

    let resolved = explicit.fields.references().unwrap_or_default();
    let list = relations::reduce_dependencies(&model.id, resolved.iter().copied(), |_| true, true);
    let self_reference = resolved.iter().any(|field| field.references(&model.id));
    explicit.properties.has_dependencies = Some(!list.is_empty());
    explicit.dependencies = Some(Dependencies {
        list,
        self_reference,
    });

    let referenced_in: Vec<ReferencingModel> = models
        .iter()
        .filter(|candidate| candidate.fields.iter().any(|field| field.references(&model.id)))
        .map(|candidate| {
            ReferencingModel::new(explicit_model(models, candidate, cache, 1), &model.id)
        })
        .collect();
    explicit.properties.is_referenced = Some(!referenced_in.is_empty());
    explicit.referenced_in = Some(referenced_in);
}
