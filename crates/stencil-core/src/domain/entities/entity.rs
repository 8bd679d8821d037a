//! Entity aggregate: the single description every artifact is derived from.
//!
//! An [`Entity`] can only be obtained through [`EntityBuilder::build`], which
//! enforces the invariants the templates rely on:
//!
//! - the name, plural, lambda and every property name are valid identifiers
//! - the lambda is not a C# keyword or a local the test bodies declare
//! - property names are unique
//! - exactly one property is the primary key
//!
//! Once built, an entity is immutable. Parent relationships are derived from
//! foreign-key properties at build time so the seeding helper never has to
//! re-scan the property list.

use std::collections::{HashMap, HashSet};

use crate::domain::{error::DomainError, naming, value_objects::PropertyType};

// ── Properties ────────────────────────────────────────────────────────────────

/// One property of an entity, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityProperty {
    name: String,
    ty: PropertyType,
    is_primary_key: bool,
    foreign_entity: Option<String>,
}

impl EntityProperty {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_primary_key: false,
            foreign_entity: None,
        }
    }

    pub fn primary_key(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            is_primary_key: true,
            ..Self::new(name, ty)
        }
    }

    /// A property holding the key of `parent_entity`.
    pub fn foreign_key(
        name: impl Into<String>,
        ty: PropertyType,
        parent_entity: impl Into<String>,
    ) -> Self {
        Self {
            foreign_entity: Some(parent_entity.into()),
            ..Self::new(name, ty)
        }
    }

    /// Mark this property as pointing at `parent_entity`.
    pub fn references(mut self, parent_entity: impl Into<String>) -> Self {
        self.foreign_entity = Some(parent_entity.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> PropertyType {
        self.ty
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn is_foreign_key(&self) -> bool {
        self.foreign_entity.is_some()
    }

    /// Name of the entity this property points at, if it is a foreign key.
    pub fn foreign_entity(&self) -> Option<&str> {
        self.foreign_entity.as_deref()
    }
}

/// A dependency on another entity that must be seeded before this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRelationship {
    /// Foreign-key property on the child.
    pub property: String,
    /// PascalCase name of the parent entity.
    pub parent: String,
    /// Variable the seeded parent is bound to in generated tests.
    pub seed_variable: String,
    /// Primary-key property of the parent, read when wiring the seeded row
    /// into the child. [`DEFAULT_PARENT_KEY`] until the parent is known.
    pub parent_key: String,
}

/// Key assumed for a parent that is not part of the same batch.
pub const DEFAULT_PARENT_KEY: &str = "Id";

// ── Entity ────────────────────────────────────────────────────────────────────

/// Validated, immutable description of one domain entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    plural: String,
    lambda: String,
    properties: Vec<EntityProperty>,
    primary_key: usize,
    parents: Vec<ParentRelationship>,
}

impl Entity {
    pub fn builder(name: impl Into<String>) -> EntityBuilder {
        EntityBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn lambda(&self) -> &str {
        &self.lambda
    }

    pub fn properties(&self) -> &[EntityProperty] {
        &self.properties
    }

    pub fn primary_key(&self) -> &EntityProperty {
        &self.properties[self.primary_key]
    }

    pub fn parent_relationships(&self) -> &[ParentRelationship] {
        &self.parents
    }

    pub fn has_parent_relationships(&self) -> bool {
        !self.parents.is_empty()
    }

    /// `OrderItem` -> `orderitem`, as used in generated test method names.
    pub fn lowercase_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// `OrderItem` -> `orderItem`, as used in identifiers built from the name.
    pub fn variable_name(&self) -> String {
        naming::lowercase_first_letter(&self.name)
    }

    /// Local bound to the entity in generated tests; never a C# keyword and
    /// never one of the locals those tests declare themselves.
    pub fn local_name(&self) -> String {
        naming::local_variable_name(&self.name, &self.lambda)
    }

    /// Point each relationship at its parent's real primary key.
    ///
    /// `keys` maps entity names to primary-key property names; parents missing
    /// from it keep [`DEFAULT_PARENT_KEY`].
    pub fn with_parent_keys(mut self, keys: &HashMap<String, String>) -> Self {
        for parent in &mut self.parents {
            if let Some(key) = keys.get(&parent.parent) {
                parent.parent_key = key.clone();
            }
        }
        self
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Collects raw entity input; all validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    name: String,
    plural: Option<String>,
    lambda: Option<String>,
    properties: Vec<EntityProperty>,
}

impl EntityBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name as given, before normalisation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the derived plural.
    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Override the derived lambda parameter name.
    pub fn lambda(mut self, lambda: impl Into<String>) -> Self {
        self.lambda = Some(lambda.into());
        self
    }

    pub fn property(mut self, property: EntityProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = EntityProperty>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn build(self) -> Result<Entity, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyEntityName);
        }

        let name = naming::pascal_identifier(&self.name);
        ensure_identifier("entity name", &name)?;

        let plural = match self.plural.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => naming::pascal_identifier(p),
            _ => naming::pluralize(&name),
        };
        ensure_identifier("entity plural", &plural)?;

        let lambda = match self.lambda.as_deref().map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => naming::default_lambda(&name),
        };
        ensure_identifier("lambda", &lambda)?;
        if naming::is_csharp_keyword(&lambda) || naming::RESERVED_TEST_LOCALS.contains(&lambda.as_str()) {
            return Err(DomainError::invalid_identifier(
                "lambda",
                lambda,
                "is a C# keyword or a name the generated tests already use",
            ));
        }

        let properties = self
            .properties
            .into_iter()
            .map(|p| normalise_property(&name, p))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for property in &properties {
            if !seen.insert(property.name.as_str()) {
                return Err(DomainError::DuplicateProperty {
                    entity: name,
                    property: property.name.clone(),
                });
            }
        }

        let keys: Vec<usize> = properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_primary_key)
            .map(|(i, _)| i)
            .collect();

        let primary_key = match keys.as_slice() {
            [single] => *single,
            [] => return Err(DomainError::MissingPrimaryKey { entity: name }),
            many => {
                return Err(DomainError::MultiplePrimaryKeys {
                    properties: many.iter().map(|&i| properties[i].name.clone()).collect(),
                    entity: name,
                });
            }
        };

        let parents = derive_parents(&name, &properties);

        Ok(Entity {
            name,
            plural,
            lambda,
            properties,
            primary_key,
            parents,
        })
    }
}

fn ensure_identifier(field: &'static str, value: &str) -> Result<(), DomainError> {
    if naming::is_identifier(value) {
        Ok(())
    } else {
        Err(DomainError::invalid_identifier(
            field,
            value,
            "must start with a letter or '_' and contain only letters, digits or '_'",
        ))
    }
}

fn normalise_property(entity: &str, property: EntityProperty) -> Result<EntityProperty, DomainError> {
    let name = naming::pascal_identifier(&property.name);
    if name.is_empty() {
        return Err(DomainError::invalid_identifier(
            "property name",
            property.name,
            format!("property names on '{entity}' cannot be empty"),
        ));
    }
    ensure_identifier("property name", &name)?;

    let foreign_entity = match property.foreign_entity {
        Some(parent) => {
            let parent = naming::pascal_identifier(&parent);
            ensure_identifier("foreign entity", &parent)?;
            Some(parent)
        }
        None => None,
    };

    Ok(EntityProperty {
        name,
        foreign_entity,
        ..property
    })
}

/// One relationship per foreign-key property, in declaration order.
///
/// A parent referenced by several properties, or by the entity itself, gets
/// one seed variable per property so the generated statements never
/// redeclare a local.
fn derive_parents(entity: &str, properties: &[EntityProperty]) -> Vec<ParentRelationship> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for parent in properties.iter().filter_map(EntityProperty::foreign_entity) {
        *counts.entry(parent).or_default() += 1;
    }

    properties
        .iter()
        .filter_map(|p| p.foreign_entity().map(|parent| (p, parent)))
        .map(|(p, parent)| {
            let seed_variable = if counts[parent] > 1 || parent == entity {
                format!("fake{parent}For{}", p.name)
            } else {
                naming::fake_variable_name(parent)
            };
            ParentRelationship {
                property: p.name.clone(),
                parent: parent.to_string(),
                seed_variable,
                parent_key: DEFAULT_PARENT_KEY.to_string(),
            }
        })
        .collect()
}
