//! Metadata accessor: the narrow interface over the external class graph.
//!
//! The generator never reflects over code itself. Everything it knows about a
//! class (superclass, annotations, documented methods, doc tags) comes through
//! [`MetadataSource`] and the typed lookups on the doc structs below.

pub mod json;

use crate::text;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Read-only lookup into a class graph.
///
/// Implementations must be safe to share for concurrent reads; every method
/// takes `&self` and nothing is cached behind interior mutability.
pub trait MetadataSource {
    /// All classes, in a stable order.
    fn classes(&self) -> &[ClassDoc];

    /// Look up a class by fully-qualified name.
    fn class_named(&self, name: &str) -> Option<&ClassDoc>;

    /// Look up a package by name.
    fn package_named(&self, name: &str) -> Option<&PackageDoc>;
}

/// A single annotation with its ordered element values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annotation {
    /// Simple or qualified annotation type name.
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One `name = value` pair of an annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub name: String,
    pub value: Value,
}

/// A block tag from a doc comment, e.g. `@subresource gyro.aws.Foo`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDoc {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassDoc {
    /// Fully-qualified class name.
    pub name: String,
    /// Fully-qualified superclass name, if any.
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub methods: Vec<MethodDoc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodDoc {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Declared return type, possibly generic (`java.util.List<java.lang.String>`).
    #[serde(default, rename = "returns")]
    pub return_type: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Anything that carries annotations.
pub trait Annotated {
    fn annotations(&self) -> &[Annotation];

    /// First annotation whose simple name matches `name`.
    fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations()
            .iter()
            .find(|a| text::simple_name(&a.name) == name)
    }

    fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}

impl Annotated for PackageDoc {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for ClassDoc {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for MethodDoc {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotation {
    /// Element value by name.
    pub fn element(&self, name: &str) -> Option<&Value> {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    /// The conventional `value` element.
    pub fn value(&self) -> Option<&Value> {
        self.element("value")
    }

    /// The `value` element as a string, if it is one.
    pub fn string_value(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }
}

impl ClassDoc {
    /// Unqualified class name.
    pub fn simple_name(&self) -> &str {
        text::simple_name(&self.name)
    }

    /// Name of the package the class lives in (everything before the last `.`).
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(pkg, _)| pkg)
    }

    /// Class-level doc comment, or empty.
    pub fn comment_text(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

impl MethodDoc {
    /// True when the member carries a non-empty doc comment.
    pub fn is_documented(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    pub fn comment_text(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// First block tag with this name. The leading `@` is optional on both sides.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        let wanted = name.trim_start_matches('@');
        self.tags
            .iter()
            .find(|t| t.name.trim_start_matches('@') == wanted)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }

    /// Annotation names listed in the `@no-doc` opt-out tag.
    pub fn suppressed(&self) -> HashSet<String> {
        self.tags
            .iter()
            .filter(|t| t.name.trim_start_matches('@') == "no-doc")
            .flat_map(|t| t.text.split(','))
            .map(|s| s.trim().trim_start_matches('@').to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Element type of a generic collection return type, lower-cased.
    ///
    /// `java.util.List<java.lang.String>` → `string`; maps and non-generic
    /// types yield `None`.
    pub fn collection_element_type(&self) -> Option<String> {
        let returns = self.return_type.as_deref()?;
        let (outer, rest) = returns.split_once('<')?;
        if !is_collection_type(text::simple_name(outer)) {
            return None;
        }
        let inner = rest.strip_suffix('>')?.trim();
        if inner.is_empty() || inner.contains(',') {
            return None;
        }
        Some(text::simple_name(inner).to_lowercase())
    }

    pub fn is_collection(&self) -> bool {
        self.collection_element_type().is_some()
    }
}

fn is_collection_type(simple: &str) -> bool {
    simple == "Iterable"
        || simple.ends_with("List")
        || simple.ends_with("Set")
        || simple.ends_with("Collection")
}

/// A doc comment split at its first sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentParts {
    pub summary: String,
    pub remainder: String,
}

// A sentence ends at a period followed by whitespace or at a blank line.
static RE_SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\s|$)|\n[ \t]*\n").unwrap());

/// Split a doc comment into its first sentence and the rest.
///
/// Line breaks inside the first sentence are folded into single spaces; the
/// remainder keeps its line structure so it can be re-indented later.
pub fn split_comment(comment: &str) -> CommentParts {
    let comment = comment.trim();
    let (head, tail) = match RE_SENTENCE_END.find(comment) {
        Some(m) => {
            let cut = if m.as_str().starts_with('.') {
                m.start() + 1
            } else {
                m.start()
            };
            (&comment[..cut], &comment[cut..])
        }
        None => (comment, ""),
    };

    CommentParts {
        summary: head.split_whitespace().collect::<Vec<_>>().join(" "),
        remainder: tail.trim_matches('\n').trim().to_string(),
    }
}

/// Simple names of every ancestor of `class`, nearest first.
pub fn ancestor_names<S: MetadataSource + ?Sized>(source: &S, class: &ClassDoc) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen: HashSet<&str> = HashSet::from([class.name.as_str()]);
    let mut next = class.superclass.as_deref();

    while let Some(qualified) = next {
        names.push(text::simple_name(qualified).to_string());
        if !seen.insert(qualified) {
            tracing::error!(class = %class.name, at = qualified, "superclass cycle");
            break;
        }
        next = source
            .class_named(qualified)
            .and_then(|c| c.superclass.as_deref());
    }

    names
}
