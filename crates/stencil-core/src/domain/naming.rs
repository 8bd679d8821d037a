//! Naming conventions shared by every artifact.
//!
//! Every identifier that appears in more than one generated file is derived
//! here, so two templates can never disagree on how `Order` becomes
//! `FakeOrderForCreationDto` or `Orders`. All functions are total: empty
//! input yields empty (or the documented fallback) output, never a panic.

use heck::ToUpperCamelCase;

use crate::domain::value_objects::DtoKind;

/// Lambda parameter used when an entity name gives nothing to derive from.
pub const FALLBACK_LAMBDA: &str = "x";

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

const UNCOUNTABLE: &[&str] = &[
    "sheep",
    "fish",
    "deer",
    "series",
    "species",
    "news",
    "equipment",
    "information",
    "metadata",
];

/// Locals and lambda parameters the generated test bodies declare themselves.
pub const RESERVED_TEST_LOCALS: &[&str] = &["command", "act", "badId", "testingServiceScope", "db"];

/// Reserved C# keywords plus the contextual ones that are rejected as locals
/// inside an `async` method.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "base", "bool", "break", "byte", "case", "catch", "char",
    "checked", "class", "const", "continue", "decimal", "default", "delegate", "do", "double",
    "dynamic", "else", "enum", "event", "explicit", "extern", "false", "finally", "fixed",
    "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal",
    "is", "lock", "long", "nameof", "namespace", "new", "null", "object", "operator", "out",
    "override", "params", "private", "protected", "public", "readonly", "record", "ref",
    "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static", "string", "struct",
    "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe",
    "ushort", "using", "var", "virtual", "void", "volatile", "when", "where", "while", "yield",
];

// ── String transforms ─────────────────────────────────────────────────────────

/// `OrderItem` -> `orderItem`.
pub fn lowercase_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural of a PascalCase identifier.
///
/// Only the last word of a compound is inflected, so `SalesPerson` becomes
/// `SalesPeople` and `OrderCategory` becomes `OrderCategories`.
pub fn pluralize(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let split = last_word_start(value);
    let (head, last) = value.split_at(split);
    let lower = last.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return value.to_string();
    }

    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(single, _)| *single == lower) {
        return format!("{head}{}", match_first_letter_case(last, plural));
    }

    let inflected = if ends_with_consonant_y(&lower) {
        format!("{}ies", &last[..last.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{last}es")
    } else {
        format!("{last}s")
    };

    format!("{head}{inflected}")
}

/// Normalise free-form input (`order_item`, `order item`) to PascalCase.
///
/// Values that are already identifiers are returned untouched so acronyms
/// such as `SKU` survive.
pub fn pascal_identifier(value: &str) -> String {
    let trimmed = value.trim();
    if is_identifier(trimmed) && trimmed.chars().next().is_some_and(char::is_uppercase) {
        trimmed.to_string()
    } else {
        trimmed.to_upper_camel_case()
    }
}

/// Whether `value` is usable as a C# identifier segment.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub fn is_csharp_keyword(value: &str) -> bool {
    CSHARP_KEYWORDS.contains(&value)
}

/// Local variable bound to an entity instance in generated tests.
///
/// `Order` -> `order`, `Event` -> `@event`. A name that would clash with one
/// of [`RESERVED_TEST_LOCALS`] or with `lambda` gets an `Entity` suffix:
/// `Command` -> `commandEntity`.
pub fn local_variable_name(entity_name: &str, lambda: &str) -> String {
    let local = lowercase_first_letter(entity_name);
    if local == lambda || RESERVED_TEST_LOCALS.contains(&local.as_str()) {
        format!("{local}Entity")
    } else if is_csharp_keyword(&local) {
        format!("@{local}")
    } else {
        local
    }
}

/// First letter of the entity name, lowercased; `x` for an empty name.
pub fn default_lambda(entity_name: &str) -> String {
    entity_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| FALLBACK_LAMBDA.to_string())
}

// ── Class and file names ──────────────────────────────────────────────────────

pub fn dto_name(entity_name: &str, kind: DtoKind) -> String {
    format!("{entity_name}{}", kind.suffix())
}

pub fn faker_name(name: &str) -> String {
    format!("Fake{name}")
}

pub fn delete_entity_feature_class_name(entity_name: &str) -> String {
    format!("Delete{entity_name}")
}

pub fn delete_command_test_class_name(entity_name: &str) -> String {
    format!("Delete{entity_name}CommandTests")
}

pub fn update_entity_unit_test_name(entity_name: &str) -> String {
    format!("Update{entity_name}Tests")
}

pub fn repository_interface_name(entity_name: &str) -> String {
    format!("I{entity_name}Repository")
}

/// Name of the nested command record inside every feature class.
pub const fn command_name() -> &'static str {
    "Command"
}

/// Test helper that owns a DI scope against the test database.
pub const fn testing_service_scope() -> &'static str {
    "TestingServiceScope"
}

/// Variable holding the first seeded fake of an entity: `fakeOrderOne`.
pub fn fake_variable_name(entity_name: &str) -> String {
    format!("fake{entity_name}One")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn last_word_start(value: &str) -> usize {
    value
        .char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

fn ends_with_consonant_y(lower: &str) -> bool {
    let mut rev = lower.chars().rev();
    match (rev.next(), rev.next()) {
        (Some('y'), Some(prev)) => !"aeiou".contains(prev),
        _ => false,
    }
}

fn match_first_letter_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
            .unwrap_or_default()
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_first_letter_cases() {
        assert_eq!(lowercase_first_letter("OrderItem"), "orderItem");
        assert_eq!(lowercase_first_letter("o"), "o");
        assert_eq!(lowercase_first_letter(""), "");
    }

    #[test]
    fn pluralize_regular_words() {
        assert_eq!(pluralize("Order"), "Orders");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Batch"), "Batches");
    }

    #[test]
    fn pluralize_inflects_last_word_only() {
        assert_eq!(pluralize("OrderCategory"), "OrderCategories");
        assert_eq!(pluralize("SalesPerson"), "SalesPeople");
        assert_eq!(pluralize("Person"), "People");
        assert_eq!(pluralize("FishSpecies"), "FishSpecies");
    }

    #[test]
    fn pluralize_empty_is_empty() {
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn pascal_identifier_normalises_free_form() {
        assert_eq!(pascal_identifier("order_item"), "OrderItem");
        assert_eq!(pascal_identifier("order item"), "OrderItem");
        assert_eq!(pascal_identifier("SKU"), "SKU");
        assert_eq!(pascal_identifier("  Order "), "Order");
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("Order"));
        assert!(is_identifier("_order1"));
        assert!(!is_identifier("1Order"));
        assert!(!is_identifier("Order Item"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn local_variables_avoid_keywords_and_template_locals() {
        assert_eq!(local_variable_name("OrderItem", "o"), "orderItem");
        assert_eq!(local_variable_name("Event", "e"), "@event");
        assert_eq!(local_variable_name("Operator", "o"), "@operator");
        assert_eq!(local_variable_name("Command", "c"), "commandEntity");
        assert_eq!(local_variable_name("Db", "d"), "dbEntity");
        assert_eq!(local_variable_name("Order", "order"), "orderEntity");
    }

    #[test]
    fn default_lambda_falls_back() {
        assert_eq!(default_lambda("Order"), "o");
        assert_eq!(default_lambda(""), FALLBACK_LAMBDA);
    }

    #[test]
    fn derived_class_names() {
        assert_eq!(dto_name("Order", DtoKind::Creation), "OrderForCreationDto");
        assert_eq!(
            faker_name(&dto_name("Order", DtoKind::Update)),
            "FakeOrderForUpdateDto"
        );
        assert_eq!(delete_entity_feature_class_name("Order"), "DeleteOrder");
        assert_eq!(repository_interface_name("Order"), "IOrderRepository");
        assert_eq!(fake_variable_name("Order"), "fakeOrderOne");
    }
}
