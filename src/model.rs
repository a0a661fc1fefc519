//! Data model for classified classes and resolved attribute trees.

/// Suffix that marks a finder's type name.
pub const FINDER_SUFFIX: &str = "-finder";

/// How a class is documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Standalone page.
    Resource,
    /// Standalone page, paired with the resource of the same base name.
    Finder,
    /// Only ever rendered nested under a parent attribute.
    Subresource,
}

/// Classification of a single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Fully-qualified class name.
    pub class_name: String,
    /// Documented type name; finders carry [`FINDER_SUFFIX`].
    pub type_name: String,
    pub namespace: Option<String>,
    /// `DocGroup` of the class's package.
    pub group: Option<String>,
    /// Class package minus its last segment.
    pub provider_package: String,
    pub kind: ResourceKind,
}

impl ResourceDescriptor {
    /// True for resources and finders.
    pub fn is_standalone(&self) -> bool {
        matches!(self.kind, ResourceKind::Resource | ResourceKind::Finder)
    }

    pub fn is_finder(&self) -> bool {
        self.kind == ResourceKind::Finder
    }

    /// Type name without the finder suffix.
    pub fn base_name(&self) -> &str {
        self.type_name
            .strip_suffix(FINDER_SUFFIX)
            .unwrap_or(&self.type_name)
    }

    /// `namespace::base-name`, or just the base name without a namespace.
    pub fn display_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}::{}", ns, self.base_name()),
            None => self.base_name().to_string(),
        }
    }
}

/// Which members a resolution pass admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ExcludeOutput,
    IncludeOutput,
    OutputOnly,
}

impl Mode {
    pub const fn admits(self, is_output: bool) -> bool {
        match self {
            Mode::ExcludeOutput => !is_output,
            Mode::IncludeOutput => true,
            Mode::OutputOnly => is_output,
        }
    }
}

/// Doc comment split at the first sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// First sentence, with any trailing "See ..." reference removed.
    pub summary: String,
    /// Everything after the first sentence, line structure preserved.
    pub remainder: String,
}

/// Cross-page link target of a resource reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTarget {
    /// `namespace::type` of the referenced resource.
    pub display: String,
    /// reST label of the referenced page.
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Plain,
    /// Nested attribute tree of another class.
    Subresource {
        target: String,
        children: Vec<AttributeRecord>,
    },
    /// Link to an unrelated standalone resource.
    ResourceReference { target: ReferenceTarget },
}

/// One documented member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub name: String,
    pub description: Description,
    pub is_output: bool,
    pub kind: AttributeKind,
    /// Lower-cased element type when the member is a generic collection.
    pub collection_element_type: Option<String>,
    /// Sentences appended to the summary, in their fixed order.
    pub clauses: Vec<String>,
    pub depth: usize,
}

impl AttributeRecord {
    pub fn is_subresource(&self) -> bool {
        matches!(self.kind, AttributeKind::Subresource { .. })
    }

    /// Nested records; empty unless this is a subresource.
    pub fn children(&self) -> &[AttributeRecord] {
        match &self.kind {
            AttributeKind::Subresource { children, .. } => children,
            _ => &[],
        }
    }
}

/// Output of a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub records: Vec<AttributeRecord>,
    /// Whether any visited documented member, at any depth, was an output.
    pub any_output: bool,
}

/// Everything needed to render one standalone page.
#[derive(Debug, Clone)]
pub struct Page {
    pub descriptor: ResourceDescriptor,
    /// Class-level doc comment.
    pub comment: String,
    pub attributes: Vec<AttributeRecord>,
    /// Present only when some member is an output.
    pub outputs: Option<Vec<AttributeRecord>>,
}
