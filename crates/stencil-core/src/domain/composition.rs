//! Conditional assembly of generated source files.
//!
//! A template fills a [`Fragments`] map with the blocks its flags call for,
//! then drops the assembled body into a [`SourceSkeleton`]. Fragments are
//! complete, indented members; the only glue between them is a blank line,
//! so assembly never has to trim or repair delimiters.

use std::collections::BTreeMap;

/// Independently includable blocks of a test class, in emission order.
///
/// The derived `Ord` is the order fragments appear in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FragmentKind {
    HappyPath,
    NotFound,
    SoftDelete,
    Permission,
}

/// Fragment-kind to fragment-text map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    parts: BTreeMap<FragmentKind, String>,
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment. Empty text is treated as "omitted".
    pub fn insert(&mut self, kind: FragmentKind, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.parts.insert(kind, text);
        }
    }

    /// Add the fragment produced by `render` only when `enabled`.
    pub fn insert_if(&mut self, kind: FragmentKind, enabled: bool, render: impl FnOnce() -> String) {
        if enabled {
            self.insert(kind, render());
        }
    }

    pub fn insert_opt(&mut self, kind: FragmentKind, text: Option<String>) {
        if let Some(text) = text {
            self.insert(kind, text);
        }
    }

    pub fn contains(&self, kind: FragmentKind) -> bool {
        self.parts.contains_key(&kind)
    }

    /// Kinds present, in emission order.
    pub fn kinds(&self) -> impl Iterator<Item = FragmentKind> + '_ {
        self.parts.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Concatenate every present fragment in fixed order.
    pub fn assemble(&self) -> String {
        self.parts
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Outer shell shared by every generated C# file.
///
/// ```text
/// namespace {namespace};
///
/// using {using};
/// ...
///
/// {declaration}
/// {
/// {body}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSkeleton {
    namespace: String,
    usings: Vec<String>,
    declaration: String,
    body: String,
}

impl SourceSkeleton {
    pub fn new(namespace: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            usings: Vec::new(),
            declaration: declaration.into(),
            body: String::new(),
        }
    }

    /// Add a `using`. Duplicates and empty namespaces are ignored, first
    /// occurrence wins.
    pub fn using(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !namespace.is_empty() && !self.usings.contains(&namespace) {
            self.usings.push(namespace);
        }
        self
    }

    pub fn usings<I, S>(self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        namespaces.into_iter().fold(self, Self::using)
    }

    /// Class members, already indented one level.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("namespace {};\n\n", self.namespace);

        if !self.usings.is_empty() {
            for using in &self.usings {
                out.push_str(&format!("using {using};\n"));
            }
            out.push('\n');
        }

        out.push_str(&self.declaration);
        out.push_str("\n{\n");
        if !self.body.is_empty() {
            out.push_str(&self.body);
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_assemble_in_fixed_order() {
        let mut fragments = Fragments::new();
        fragments.insert(FragmentKind::Permission, "    // permission");
        fragments.insert(FragmentKind::HappyPath, "    // happy");
        fragments.insert(FragmentKind::SoftDelete, "    // soft");

        assert_eq!(
            fragments.assemble(),
            "    // happy\n\n    // soft\n\n    // permission"
        );
        assert_eq!(
            fragments.kinds().collect::<Vec<_>>(),
            vec![FragmentKind::HappyPath, FragmentKind::SoftDelete, FragmentKind::Permission]
        );
    }

    #[test]
    fn empty_and_disabled_fragments_are_omitted() {
        let mut fragments = Fragments::new();
        fragments.insert(FragmentKind::HappyPath, "    // happy");
        fragments.insert(FragmentKind::NotFound, "");
        fragments.insert_opt(FragmentKind::Permission, None);
        fragments.insert_if(FragmentKind::SoftDelete, false, || unreachable!());

        assert!(!fragments.contains(FragmentKind::NotFound));
        assert!(!fragments.contains(FragmentKind::SoftDelete));
        assert_eq!(fragments.assemble(), "    // happy");
    }

    #[test]
    fn skeleton_renders_usings_once() {
        let text = SourceSkeleton::new("Shop.Tests", "public class OrderTests")
            .using("Xunit")
            .usings(["FluentAssertions", "Xunit", ""])
            .body("    // body")
            .render();

        assert_eq!(
            text,
            "namespace Shop.Tests;\n\nusing Xunit;\nusing FluentAssertions;\n\npublic class OrderTests\n{\n    // body\n}\n"
        );
    }

    #[test]
    fn skeleton_without_usings_or_body() {
        let text = SourceSkeleton::new("Shop", "public class Empty").render();
        assert_eq!(text, "namespace Shop;\n\npublic class Empty\n{\n}\n");
    }
}
