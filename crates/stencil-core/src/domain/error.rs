// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (batch reports keep them after the run)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors (entity invariants, checked at construction)
    // ========================================================================
    #[error("Entity name cannot be empty")]
    EmptyEntityName,

    #[error("Invalid identifier '{value}' for {field}: {reason}")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Entity '{entity}' has no primary key property")]
    MissingPrimaryKey { entity: String },

    #[error("Entity '{entity}' marks more than one primary key: {properties:?}")]
    MultiplePrimaryKeys {
        entity: String,
        properties: Vec<String>,
    },

    #[error("Entity '{entity}' declares property '{property}' more than once")]
    DuplicateProperty { entity: String, property: String },

    #[error("Unknown property type '{0}'")]
    UnknownPropertyType(String),

    #[error("Unknown artifact kind '{0}'")]
    UnknownArtifactKind(String),

    // ========================================================================
    // Resolution Errors (context cannot produce a name or path)
    // ========================================================================
    #[error("Cannot resolve '{artifact}' for entity '{entity}': {reason}")]
    UnresolvableName {
        entity: String,
        artifact: String,
        reason: String,
    },
}

impl DomainError {
    pub(crate) fn invalid_identifier(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidIdentifier {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyEntityName => vec![
                "Every entity needs a PascalCase name".into(),
                "Example: name = \"Order\"".into(),
            ],
            Self::InvalidIdentifier { field, reason, .. } => vec![
                format!("Fix the {field}: {reason}"),
                "Identifiers must start with a letter and contain only letters, digits or '_'"
                    .into(),
            ],
            Self::MissingPrimaryKey { entity } => vec![
                format!("Mark exactly one property of '{entity}' as the primary key"),
                "Example: { name = \"Id\", type = \"guid\", primary_key = true }".into(),
            ],
            Self::MultiplePrimaryKeys { entity, properties } => vec![
                format!(
                    "'{entity}' marks {} as primary keys; keep only one",
                    properties.join(", ")
                ),
                "Composite keys are not supported".into(),
            ],
            Self::DuplicateProperty { property, .. } => vec![
                format!("Rename or remove the second '{property}' property"),
            ],
            Self::UnknownPropertyType(_) => vec![
                "Supported types: guid, string, int, long, decimal, double, bool, datetime, dateonly"
                    .into(),
            ],
            Self::UnknownArtifactKind(_) => vec!["Try: stencil list".into()],
            Self::UnresolvableName { reason, .. } => vec![
                format!("Resolution failed: {reason}"),
                "Check the solution, src and test directories and the project name".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvableName { .. } => ErrorCategory::Resolution,
            Self::UnknownArtifactKind(_) => ErrorCategory::NotFound,
            Self::EmptyEntityName
            | Self::InvalidIdentifier { .. }
            | Self::MissingPrimaryKey { .. }
            | Self::MultiplePrimaryKeys { .. }
            | Self::DuplicateProperty { .. }
            | Self::UnknownPropertyType(_) => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Resolution,
    NotFound,
}
