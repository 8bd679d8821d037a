//! Parent seeding shared by every test that inserts a fake entity.
//!
//! A child with foreign keys cannot be inserted until each parent row
//! exists. For every [`ParentRelationship`] this emits one seeding statement
//! pair and one `.RuleFor` clause wiring the seeded parent's key into the
//! child's creation DTO faker.
//!
//! [`ParentRelationship`]: crate::domain::ParentRelationship

use crate::domain::{error::DomainError, naming, resolver::Resolver, value_objects::DtoKind};

/// Statements are indented for a test method body; both fields are empty
/// for a root entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentSeeding {
    /// Seeding statements, each followed by a newline and method-body indent
    /// so the child's own statement can follow directly.
    pub statements: String,
    /// `.RuleFor(...)` clauses to splice between `new Fake{Dto}()` and
    /// `.Generate()`.
    pub rule_for: String,
}

impl ParentSeeding {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.rule_for.is_empty()
    }
}

const BODY_INDENT: &str = "\n        ";
const CHAIN_INDENT: &str = "\n            ";

pub fn seed_parents(resolver: &Resolver<'_>) -> ParentSeeding {
    let entity = resolver.entity();
    if !entity.has_parent_relationships() {
        return ParentSeeding::default();
    }

    let scope = naming::lowercase_first_letter(naming::testing_service_scope());
    let lambda = entity.lambda();

    let mut seeding = ParentSeeding::default();
    for parent in entity.parent_relationships() {
        let faker = naming::faker_name(&parent.parent);
        let creation_faker = naming::faker_name(&naming::dto_name(&parent.parent, DtoKind::Creation));
        let var = &parent.seed_variable;

        seeding.statements.push_str(&format!(
            "var {var} = {faker}.Generate(new {creation_faker}().Generate());{BODY_INDENT}\
             await {scope}.InsertAsync({var});{BODY_INDENT}{BODY_INDENT}"
        ));
        seeding.rule_for.push_str(&format!(
            "{CHAIN_INDENT}.RuleFor({lambda} => {lambda}.{}, _ => {var}.{})",
            parent.property, parent.parent_key
        ));
    }
    seeding.rule_for.push_str(CHAIN_INDENT);
    seeding
}

/// Faker namespaces of every distinct parent, in declaration order.
///
/// A self-referencing parent shares the entity's own faker namespace, which
/// the caller already imports, so it is skipped.
pub fn foreign_usings(resolver: &Resolver<'_>) -> Result<Vec<String>, DomainError> {
    let entity = resolver.entity();
    let mut usings: Vec<String> = Vec::new();

    for parent in entity.parent_relationships() {
        if parent.parent == entity.name() {
            continue;
        }
        let namespace = resolver.test_fakes(&parent.parent, "")?.namespace().to_string();
        if !usings.contains(&namespace) {
            usings.push(namespace);
        }
    }
    Ok(usings)
}
