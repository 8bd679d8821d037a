//! Domain value objects: PropertyType, DtoKind, ArtifactKind, FeatureFlags.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Their
//! only jobs are string representations, `FromStr` parsers, and the small
//! per-variant tables the templates consult (C# type names, bad-id literals).
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. For `PropertyType`, add the `csharp_name` and `bad_id_literal` arms
//! 4. For `ArtifactKind`, add a template module under `artifacts/`

use crate::domain::{error::DomainError, naming};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PropertyType ──────────────────────────────────────────────────────────────

/// Semantic type of an entity property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Guid,
    String,
    Int,
    Long,
    Decimal,
    Double,
    Bool,
    DateTime,
    DateOnly,
}

impl PropertyType {
    pub const ALL: [PropertyType; 9] = [
        Self::Guid,
        Self::String,
        Self::Int,
        Self::Long,
        Self::Decimal,
        Self::Double,
        Self::Bool,
        Self::DateTime,
        Self::DateOnly,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guid => "guid",
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::DateTime => "datetime",
            Self::DateOnly => "dateonly",
        }
    }

    /// Type keyword as written in the generated C# source.
    pub const fn csharp_name(&self) -> &'static str {
        match self {
            Self::Guid => "Guid",
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::DateTime => "DateTime",
            Self::DateOnly => "DateOnly",
        }
    }

    /// Literal for a key value that will not exist in a fresh test database.
    ///
    /// `None` means no such value can be synthesized for this type, in which
    /// case the not-found test is left out of the generated suite.
    pub const fn bad_id_literal(&self) -> Option<&'static str> {
        match self {
            Self::Guid => Some("Guid.NewGuid()"),
            Self::String => Some("\"badKey\""),
            Self::Int => Some("84709321"),
            Self::Long => Some("84709321L"),
            Self::Decimal
            | Self::Double
            | Self::Bool
            | Self::DateTime
            | Self::DateOnly => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guid" | "uuid" => Ok(Self::Guid),
            "string" | "str" => Ok(Self::String),
            "int" | "int32" => Ok(Self::Int),
            "long" | "int64" => Ok(Self::Long),
            "decimal" => Ok(Self::Decimal),
            "double" | "float64" => Ok(Self::Double),
            "bool" | "boolean" => Ok(Self::Bool),
            "datetime" | "datetimeoffset" => Ok(Self::DateTime),
            "dateonly" | "date" => Ok(Self::DateOnly),
            other => Err(DomainError::UnknownPropertyType(other.to_string())),
        }
    }
}

// ── DtoKind ───────────────────────────────────────────────────────────────────

/// The DTO shapes generated for every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtoKind {
    Creation,
    Update,
}

impl DtoKind {
    /// Suffix appended to the entity name to form the DTO class name.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Creation => "ForCreationDto",
            Self::Update => "ForUpdateDto",
        }
    }
}

// ── ArtifactKind ──────────────────────────────────────────────────────────────

/// Every artifact the engine knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    DeleteFeature,
    DeleteCommandTest,
    UpdateEntityTest,
    EntityFaker,
    CreationDtoFaker,
    UpdateDtoFaker,
}

impl ArtifactKind {
    /// All kinds, in generation order.
    pub const fn all() -> [ArtifactKind; 6] {
        [
            Self::DeleteFeature,
            Self::DeleteCommandTest,
            Self::UpdateEntityTest,
            Self::EntityFaker,
            Self::CreationDtoFaker,
            Self::UpdateDtoFaker,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeleteFeature => "delete-feature",
            Self::DeleteCommandTest => "delete-command-test",
            Self::UpdateEntityTest => "update-entity-test",
            Self::EntityFaker => "entity-faker",
            Self::CreationDtoFaker => "creation-dto-faker",
            Self::UpdateDtoFaker => "update-dto-faker",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::DeleteFeature => "Delete command and handler",
            Self::DeleteCommandTest => "Integration tests for the delete command",
            Self::UpdateEntityTest => "Unit test for the entity update method",
            Self::EntityFaker => "Fake entity generator",
            Self::CreationDtoFaker => "Fake creation DTO generator",
            Self::UpdateDtoFaker => "Fake update DTO generator",
        }
    }

    /// File name this kind produces for an entity named `entity_name`.
    pub fn file_name(&self, entity_name: &str) -> String {
        let class_name = match self {
            Self::DeleteFeature => naming::delete_entity_feature_class_name(entity_name),
            Self::DeleteCommandTest => naming::delete_command_test_class_name(entity_name),
            Self::UpdateEntityTest => naming::update_entity_unit_test_name(entity_name),
            Self::EntityFaker => naming::faker_name(entity_name),
            Self::CreationDtoFaker => {
                naming::faker_name(&naming::dto_name(entity_name, DtoKind::Creation))
            }
            Self::UpdateDtoFaker => {
                naming::faker_name(&naming::dto_name(entity_name, DtoKind::Update))
            }
        };
        format!("{class_name}.cs")
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::all()
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownArtifactKind(s.to_string()))
    }
}

// ── FeatureFlags ──────────────────────────────────────────────────────────────

/// Per-artifact switches decided by the caller before generation.
///
/// Every flag defaults to "off", and "off" always means the corresponding
/// fragment is left out of the generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub use_soft_delete: bool,
    pub is_protected: bool,
    /// Permission name checked when `is_protected` is set.
    pub permission: Option<String>,
}

impl FeatureFlags {
    pub fn soft_delete(mut self, enabled: bool) -> Self {
        self.use_soft_delete = enabled;
        self
    }

    pub fn protected_by(mut self, permission: impl Into<String>) -> Self {
        self.is_protected = true;
        self.permission = Some(permission.into());
        self
    }

    /// Permission the generated code must check, if the feature is protected.
    ///
    /// Falls back to `Can{action}{plural}` when no explicit name was given.
    pub fn effective_permission(&self, action: &str, plural: &str) -> Option<String> {
        if !self.is_protected {
            return None;
        }
        Some(
            self.permission
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map_or_else(|| format!("Can{action}{plural}"), str::to_owned),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_from_str_accepts_aliases() {
        assert_eq!("uuid".parse::<PropertyType>().unwrap(), PropertyType::Guid);
        assert_eq!("Int32".parse::<PropertyType>().unwrap(), PropertyType::Int);
        assert_eq!(
            "boolean".parse::<PropertyType>().unwrap(),
            PropertyType::Bool
        );
        assert!("varchar".parse::<PropertyType>().is_err());
    }

    #[test]
    fn bad_id_table_is_total() {
        for ty in PropertyType::ALL {
            // Every type answers; only key-like types produce a literal.
            let literal = ty.bad_id_literal();
            match ty {
                PropertyType::Guid
                | PropertyType::String
                | PropertyType::Int
                | PropertyType::Long => assert!(literal.is_some(), "{ty} should have a bad id"),
                _ => assert!(literal.is_none(), "{ty} should not have a bad id"),
            }
        }
    }

    #[test]
    fn dto_suffixes() {
        assert_eq!(DtoKind::Creation.suffix(), "ForCreationDto");
        assert_eq!(DtoKind::Update.suffix(), "ForUpdateDto");
    }

    #[test]
    fn artifact_kind_round_trips_through_names() {
        for kind in ArtifactKind::all() {
            assert_eq!(kind.as_str().parse::<ArtifactKind>().unwrap(), kind);
        }
        assert_eq!(
            "delete_command_test".parse::<ArtifactKind>().unwrap(),
            ArtifactKind::DeleteCommandTest
        );
        assert!("controller".parse::<ArtifactKind>().is_err());
    }

    #[test]
    fn artifact_file_names() {
        assert_eq!(ArtifactKind::DeleteFeature.file_name("Order"), "DeleteOrder.cs");
        assert_eq!(
            ArtifactKind::DeleteCommandTest.file_name("Order"),
            "DeleteOrderCommandTests.cs"
        );
        assert_eq!(
            ArtifactKind::CreationDtoFaker.file_name("Order"),
            "FakeOrderForCreationDto.cs"
        );
    }

    #[test]
    fn open_feature_has_no_permission() {
        let flags = FeatureFlags::default();
        assert_eq!(flags.effective_permission("Delete", "Orders"), None);
    }

    #[test]
    fn protected_feature_defaults_permission_name() {
        let flags = FeatureFlags {
            is_protected: true,
            ..FeatureFlags::default()
        };
        assert_eq!(
            flags.effective_permission("Delete", "Orders").as_deref(),
            Some("CanDeleteOrders")
        );

        let flags = FeatureFlags::default().protected_by("CanRemoveOrders");
        assert_eq!(
            flags.effective_permission("Delete", "Orders").as_deref(),
            Some("CanRemoveOrders")
        );
    }
}
