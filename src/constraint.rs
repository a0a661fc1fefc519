//! Constraint-sentence synthesizer.
//!
//! Validation annotations on a member are read into a closed set of
//! [`Constraint`] variants and turned into sentences appended to the member's
//! summary. Clause order is fixed by [`CATALOG`]; a member can opt out of any
//! rule by listing the annotation name in its `@no-doc` tag.

use crate::metadata::{Annotated, Annotation, CommentParts, MethodDoc};
use crate::model::Description;
use crate::text::{self, literal};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Annotation names in clause order.
pub const CATALOG: &[&str] = &[
    "ConflictsWith",
    "ValidStrings",
    "ValidNumbers",
    "DependsOn",
    "Max",
    "Min",
    "CollectionMax",
    "CollectionMin",
    "Range",
    "Ranges",
    "Regex",
    "Regexes",
    "Required",
];

/// Marker appended last to required members.
pub const REQUIRED_MARKER: &str = "(Required)";

/// One validation rule, with values already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    ConflictsWith(Vec<String>),
    ValidStrings { values: Vec<String>, collection: bool },
    ValidNumbers { values: Vec<String>, collection: bool },
    DependsOn(Vec<String>),
    Max(String),
    Min(String),
    CollectionMax(String),
    CollectionMin(String),
    Range(Bounds),
    Ranges(Vec<Bounds>),
    Regex(Pattern),
    Regexes(Vec<Pattern>),
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub regex: String,
    pub message: Option<String>,
}

impl Constraint {
    /// Read one catalog annotation. Malformed or missing values yield `None`.
    pub fn from_annotation(annotation: &Annotation, collection: bool) -> Option<Self> {
        let constraint = match text::simple_name(&annotation.name) {
            "ConflictsWith" => Self::ConflictsWith(field_names(annotation.value()?)?),
            "ValidStrings" => Self::ValidStrings {
                values: strings(annotation.value()?)?,
                collection,
            },
            "ValidNumbers" => Self::ValidNumbers {
                values: numbers(annotation.value()?)?,
                collection,
            },
            "DependsOn" => Self::DependsOn(field_names(annotation.value()?)?),
            "Max" => Self::Max(number(annotation.value()?)?),
            "Min" => Self::Min(number(annotation.value()?)?),
            "CollectionMax" => Self::CollectionMax(number(annotation.value()?)?),
            "CollectionMin" => Self::CollectionMin(number(annotation.value()?)?),
            "Range" => Self::Range(bounds(|name| annotation.element(name))?),
            "Ranges" => Self::Ranges(
                list(annotation.value()?)
                    .iter()
                    .map(|v| bounds(|name| nested_element(v, name)))
                    .collect::<Option<Vec<_>>>()
                    .filter(|r| !r.is_empty())?,
            ),
            "Regex" => Self::Regex(pattern(|name| annotation.element(name))?),
            "Regexes" => Self::Regexes(
                list(annotation.value()?)
                    .iter()
                    .map(|v| pattern(|name| nested_element(v, name)))
                    .collect::<Option<Vec<_>>>()
                    .filter(|p| !p.is_empty())?,
            ),
            "Required" => Self::Required,
            _ => return None,
        };
        Some(constraint)
    }

    /// The sentence this rule contributes.
    pub fn clause(&self) -> String {
        match self {
            Self::ConflictsWith(fields) => {
                format!("Cannot be set if {} is set.", literal_list(fields, "or"))
            }
            Self::ValidStrings { values, collection } | Self::ValidNumbers { values, collection } => {
                if let [only] = values.as_slice() {
                    format!("Currently the only supported value is {}.", literal(only))
                } else {
                    let sep = if *collection { "and" } else { "or" };
                    format!("Valid values are {}.", literal_list(values, sep))
                }
            }
            Self::DependsOn(fields) => {
                let verb = if fields.len() > 1 { "are" } else { "is" };
                format!("Can only be set if {} {} set.", literal_list(fields, "and"), verb)
            }
            Self::Max(n) => format!("Maximum allowed value is {}.", literal(n)),
            Self::Min(n) => format!("Minimum allowed value is {}.", literal(n)),
            Self::CollectionMax(n) => format!("A maximum of {} items are allowed.", literal(n)),
            Self::CollectionMin(n) => format!("A minimum of {} items are required.", literal(n)),
            Self::Range(b) => format!(
                "Valid values are between {} and {}.",
                literal(&b.min),
                literal(&b.max)
            ),
            Self::Ranges(ranges) => {
                let spans: Vec<String> = ranges
                    .iter()
                    .map(|b| format!("{} to {}", literal(&b.min), literal(&b.max)))
                    .collect();
                format!("Valid ranges are {}.", text::join_natural(&spans, "and"))
            }
            Self::Regex(p) => p.clause(),
            Self::Regexes(patterns) => patterns
                .iter()
                .map(Pattern::clause)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Required => REQUIRED_MARKER.to_string(),
        }
    }
}

impl Pattern {
    fn clause(&self) -> String {
        let prefix = match self.message.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => format!("{}. ", m.trim_end_matches('.')),
            _ => String::new(),
        };
        format!("{}Must match the pattern {}.", prefix, literal(&escape_pattern(&self.regex)))
    }
}

/// Constraints present on `member`, in catalog order, minus the suppressed ones.
pub fn constraints(member: &MethodDoc) -> Vec<Constraint> {
    let suppressed = member.suppressed();
    let collection = member.is_collection();

    CATALOG
        .iter()
        .filter(|name| !suppressed.contains(**name))
        .filter_map(|name| {
            let annotation = member.annotation(name)?;
            let constraint = Constraint::from_annotation(annotation, collection);
            if constraint.is_none() {
                tracing::debug!(member = %member.name, annotation = name, "malformed constraint ignored");
            }
            constraint
        })
        .collect()
}

// "See ..." starting a sentence, up to the end of the text.
static RE_SEE_ALSO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(?:^|[.!?]\s+)(See\s.*)$").unwrap());

/// Split a trailing "See ..." reference off a summary.
fn split_see_also(summary: &str) -> (String, Option<String>) {
    match RE_SEE_ALSO.captures(summary).and_then(|c| c.get(1)) {
        Some(see) => (
            summary[..see.start()].trim_end().to_string(),
            Some(see.as_str().trim().to_string()),
        ),
        None => (summary.to_string(), None),
    }
}

/// Appended clauses: constraint sentences in catalog order, then the
/// "See ..." reference, then the required marker.
fn clauses(member: &MethodDoc, see_also: Option<String>) -> Vec<String> {
    let mut required = false;
    let mut clauses = Vec::new();
    for constraint in constraints(member) {
        if constraint == Constraint::Required {
            required = true;
        } else {
            clauses.push(constraint.clause());
        }
    }
    clauses.extend(see_also);
    if required {
        clauses.push(REQUIRED_MARKER.to_string());
    }
    clauses.retain(|c| !c.is_empty());
    clauses
}

/// Summary with any "See ..." reference split off, and the clauses to append.
pub fn decorate(member: &MethodDoc, summary: &str) -> (String, Vec<String>) {
    let (base, see_also) = split_see_also(summary);
    (base, clauses(member, see_also))
}

/// Join a summary with its clauses and apply the markup fixups.
pub fn compose(summary: &str, clauses: &[String]) -> String {
    let mut out = summary.to_string();
    for clause in clauses {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(clause);
    }
    fixup(&out)
}

/// `synthesize(member, base_comment)`: the decorated first sentence.
pub fn synthesize(member: &MethodDoc, base_comment: &str) -> String {
    let (base, clauses) = decorate(member, base_comment);
    compose(&base, &clauses)
}

/// Description and clauses for a documented member.
///
/// A "See ..." paragraph opening the remainder is treated like one trailing
/// the summary: it is lifted out and appended before the required marker.
pub fn describe(member: &MethodDoc, parts: &CommentParts) -> (Description, Vec<String>) {
    let (summary, mut see_also) = split_see_also(&parts.summary);
    let mut remainder = parts.remainder.as_str();

    if see_also.is_none() && remainder.starts_with("See ") {
        let (paragraph, rest) = remainder.split_once("\n\n").unwrap_or((remainder, ""));
        see_also = Some(paragraph.split_whitespace().collect::<Vec<_>>().join(" "));
        remainder = rest.trim_start_matches('\n');
    }

    (
        Description {
            summary,
            remainder: remainder.to_string(),
        },
        clauses(member, see_also),
    )
}

/// Collapse doubled periods and turn `**` emphasis into literal delimiters.
///
/// Text already inside ``literal`` spans (patterns, values) is left alone.
pub fn fixup(sentence: &str) -> String {
    sentence
        .split("``")
        .enumerate()
        .map(|(i, segment)| {
            if i % 2 == 1 {
                return segment.to_string();
            }
            let mut out = segment.replace("**", "``");
            while out.contains("..") {
                out = out.replace("..", ".");
            }
            out
        })
        .collect::<Vec<_>>()
        .join("``")
}

fn escape_pattern(regex: &str) -> String {
    regex.replace('`', "\\`")
}

fn literal_list(items: &[String], last_separator: &str) -> String {
    let quoted: Vec<String> = items.iter().map(|i| literal(i)).collect();
    text::join_natural(&quoted, last_separator)
}

// -- Value extraction ---------------------------------------------------------

/// A single value or an array of values.
fn list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn strings(value: &Value) -> Option<Vec<String>> {
    let values = list(value)
        .into_iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    (!values.is_empty()).then_some(values)
}

fn field_names(value: &Value) -> Option<Vec<String>> {
    let names = strings(value)?;
    Some(names.iter().map(|n| text::camel_to_hyphen(n)).collect())
}

/// A number, or a string holding one, formatted with the decimal trimmed.
fn number(value: &Value) -> Option<String> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<f64>().ok()?;
            s.to_string()
        }
        _ => return None,
    };
    Some(text::trim_decimal(&raw))
}

fn numbers(value: &Value) -> Option<Vec<String>> {
    let values = list(value)
        .into_iter()
        .map(number)
        .collect::<Option<Vec<_>>>()?;
    (!values.is_empty()).then_some(values)
}

fn bounds<'a>(get: impl Fn(&str) -> Option<&'a Value>) -> Option<Bounds> {
    Some(Bounds {
        min: number(get("min")?)?,
        max: number(get("max")?)?,
    })
}

fn pattern<'a>(get: impl Fn(&str) -> Option<&'a Value>) -> Option<Pattern> {
    let regex = get("value")?.as_str()?.to_string();
    if regex.is_empty() {
        return None;
    }
    let message = get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty());
    Some(Pattern { regex, message })
}

/// Element of a nested annotation value: either `{"min": 1}` or an
/// annotation-shaped `{"elements": [{"name": "min", "value": 1}]}`.
fn nested_element<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    let object = value.as_object()?;
    match object.get("elements").and_then(Value::as_array) {
        Some(elements) => elements
            .iter()
            .find(|e| e.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|e| e.get("value")),
        None => object.get(name),
    }
}
