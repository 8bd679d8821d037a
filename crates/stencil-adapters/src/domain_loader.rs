//! Domain manifest loader.
//!
//! Reads a TOML or JSON manifest describing the entities to generate and
//! converts it into [`EntityDefinition`]s ready for the generation service.
//!
//! # Manifest format
//!
//! ```toml
//! [project]
//! name     = "Shop"          # project base name (optional)
//! solution = "./Shop"        # solution root (optional)
//! src      = "./Shop/src"    # optional, defaults to <solution>/src
//! test     = "./Shop/tests"  # optional, defaults to <solution>/tests
//!
//! [[entities]]
//! name        = "Order"
//! plural      = "Orders"     # optional, derived when omitted
//! lambda      = "o"          # optional, derived when omitted
//! soft_delete = true
//! protected   = true
//! permission  = "CanDeleteOrders"   # optional, defaults to Can{Action}{Plural}
//!
//! [[entities.properties]]
//! name        = "Id"
//! type        = "guid"
//! primary_key = true
//!
//! [[entities.properties]]
//! name           = "CustomerId"
//! type           = "guid"
//! foreign_entity = "Customer"
//! ```
//!
//! The JSON form uses the same keys. A syntactically broken manifest fails
//! as a whole; an entity with an unknown property type is rejected on its
//! own and reported alongside the others.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use stencil_core::{
    application::{ApplicationError, EntityDefinition},
    domain::{DomainError, Entity, EntityProperty, FeatureFlags, PropertyType},
    error::StencilResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a domain manifest.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DomainManifest {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub entities: Vec<EntityEntry>,
}

/// `[project]` section; every field can also come from CLI flags or config.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ProjectSection {
    pub name: Option<String>,
    pub solution: Option<PathBuf>,
    pub src: Option<PathBuf>,
    pub test: Option<PathBuf>,
}

/// One entry under `[[entities]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct EntityEntry {
    pub name: String,
    pub plural: Option<String>,
    pub lambda: Option<String>,
    #[serde(default, alias = "use_soft_delete")]
    pub soft_delete: bool,
    #[serde(default, alias = "is_protected")]
    pub protected: bool,
    pub permission: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
}

/// One entry under `[[entities.properties]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct PropertyEntry {
    pub name: String,
    /// Property type name, e.g. `"guid"` or `"int"`.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub primary_key: bool,
    /// Parent entity name when this property is a foreign key.
    pub foreign_entity: Option<String>,
}

/// Supported manifest encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// `.json` is JSON, anything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

// ── Conversion ────────────────────────────────────────────────────────────────

/// An entity that could not be turned into a definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntity {
    pub name: String,
    pub error: DomainError,
}

/// A parsed manifest split into usable and rejected entities.
#[derive(Debug, Clone)]
pub struct LoadedDomain {
    pub project: ProjectSection,
    pub definitions: Vec<EntityDefinition>,
    pub rejected: Vec<RejectedEntity>,
}

impl EntityEntry {
    /// Convert to a definition. Entity invariants are checked later, when
    /// the builder is built.
    pub fn to_definition(&self) -> Result<EntityDefinition, DomainError> {
        let properties = self
            .properties
            .iter()
            .map(PropertyEntry::to_property)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Entity::builder(&self.name).properties(properties);
        if let Some(plural) = &self.plural {
            builder = builder.plural(plural);
        }
        if let Some(lambda) = &self.lambda {
            builder = builder.lambda(lambda);
        }

        let flags = FeatureFlags {
            use_soft_delete: self.soft_delete,
            is_protected: self.protected,
            permission: self.permission.clone(),
        };

        Ok(EntityDefinition::new(builder, flags))
    }
}

impl PropertyEntry {
    fn to_property(&self) -> Result<EntityProperty, DomainError> {
        let ty: PropertyType = self.ty.parse()?;
        let mut property = if self.primary_key {
            EntityProperty::primary_key(&self.name, ty)
        } else {
            EntityProperty::new(&self.name, ty)
        };
        if let Some(parent) = &self.foreign_entity {
            property = property.references(parent);
        }
        Ok(property)
    }
}

impl DomainManifest {
    /// Parse manifest text.
    pub fn parse(raw: &str, format: ManifestFormat, origin: &Path) -> StencilResult<Self> {
        let parsed: Result<Self, String> = match format {
            ManifestFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
            ManifestFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| {
            ApplicationError::InvalidManifest {
                path: origin.to_path_buf(),
                reason,
            }
            .into()
        })
    }

    /// Split into definitions and per-entity rejections, in manifest order.
    pub fn into_domain(self) -> LoadedDomain {
        let mut definitions = Vec::with_capacity(self.entities.len());
        let mut rejected = Vec::new();

        for entry in &self.entities {
            match entry.to_definition() {
                Ok(definition) => definitions.push(definition),
                Err(error) => {
                    warn!(entity = %entry.name, %error, "rejecting entity");
                    rejected.push(RejectedEntity {
                        name: entry.name.clone(),
                        error,
                    });
                }
            }
        }

        LoadedDomain {
            project: self.project,
            definitions,
            rejected,
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Read and convert the manifest at `path`.
///
/// # Errors
///
/// - [`ApplicationError::ManifestNotFound`] when the file does not exist.
/// - [`ApplicationError::InvalidManifest`] when it cannot be read or parsed.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_domain(path: &Path) -> StencilResult<LoadedDomain> {
    if !path.exists() {
        return Err(ApplicationError::ManifestNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let raw = fs::read_to_string(path).map_err(|e| ApplicationError::InvalidManifest {
        path: path.to_path_buf(),
        reason: format!("failed to read: {e}"),
    })?;

    let manifest = DomainManifest::parse(&raw, ManifestFormat::from_path(path), path)?;
    let domain = manifest.into_domain();
    debug!(
        entities = domain.definitions.len(),
        rejected = domain.rejected.len(),
        "domain manifest loaded"
    );
    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use stencil_core::error::StencilError;
    use tempfile::NamedTempFile;

    const SHOP: &str = r#"
[project]
name = "Shop"
solution = "/work/Shop"

[[entities]]
name = "Order"
soft_delete = true
protected = true
permission = "CanDeleteOrders"

[[entities.properties]]
name = "Id"
type = "guid"
primary_key = true

[[entities.properties]]
name = "CustomerId"
type = "guid"
foreign_entity = "Customer"

[[entities]]
name = "Customer"

[[entities.properties]]
name = "Id"
type = "int"
primary_key = true
"#;

    fn parse_toml(raw: &str) -> DomainManifest {
        DomainManifest::parse(raw, ManifestFormat::Toml, Path::new("domain.toml")).unwrap()
    }

    #[test]
    fn parses_project_and_entities() {
        let domain = parse_toml(SHOP).into_domain();

        assert_eq!(domain.project.name.as_deref(), Some("Shop"));
        assert_eq!(domain.project.solution, Some(PathBuf::from("/work/Shop")));
        assert_eq!(domain.definitions.len(), 2);
        assert!(domain.rejected.is_empty());

        let order = &domain.definitions[0];
        assert!(order.flags.use_soft_delete);
        assert_eq!(
            order.flags.effective_permission("Delete", "Orders").as_deref(),
            Some("CanDeleteOrders")
        );

        let entity = order.entity.clone().build().unwrap();
        assert_eq!(entity.primary_key().name(), "Id");
        assert_eq!(entity.parent_relationships()[0].parent, "Customer");
    }

    #[test]
    fn json_uses_the_same_keys() {
        let raw = r#"{
            "entities": [{
                "name": "Ticket",
                "is_protected": true,
                "properties": [{ "name": "Id", "type": "long", "primary_key": true }]
            }]
        }"#;
        let domain = DomainManifest::parse(raw, ManifestFormat::Json, Path::new("domain.json"))
            .unwrap()
            .into_domain();

        let ticket = &domain.definitions[0];
        assert!(ticket.flags.is_protected);
        assert_eq!(
            ticket.flags.effective_permission("Delete", "Tickets").as_deref(),
            Some("CanDeleteTickets")
        );
        assert_eq!(domain.project, ProjectSection::default());
    }

    #[test]
    fn unknown_property_type_rejects_only_that_entity() {
        let raw = r#"
[[entities]]
name = "Broken"
[[entities.properties]]
name = "Id"
type = "varchar"
primary_key = true

[[entities]]
name = "Order"
[[entities.properties]]
name = "Id"
type = "guid"
primary_key = true
"#;
        let domain = parse_toml(raw).into_domain();

        assert_eq!(domain.definitions.len(), 1);
        assert_eq!(domain.rejected.len(), 1);
        assert_eq!(domain.rejected[0].name, "Broken");
        assert_eq!(
            domain.rejected[0].error,
            DomainError::UnknownPropertyType("varchar".into())
        );
    }

    #[test]
    fn syntax_errors_fail_the_whole_manifest() {
        let err = DomainManifest::parse("[[entities]\nname =", ManifestFormat::Toml, Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ManifestFormat::from_path(Path::new("a.json")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("a.JSON")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("a.toml")), ManifestFormat::Toml);
        assert_eq!(ManifestFormat::from_path(Path::new("domain")), ManifestFormat::Toml);
    }

    #[test]
    fn load_domain_reads_from_disk() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(SHOP.as_bytes()).unwrap();

        let domain = load_domain(file.path()).unwrap();
        assert_eq!(domain.definitions.len(), 2);
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let err = load_domain(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::ManifestNotFound { .. })
        ));
    }
}
