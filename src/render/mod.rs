//! reStructuredText page renderer.
//!
//! Top-level attributes are rows of a `list-table`; subresource attributes
//! nest below their parent row as indented blocks, one [`INDENT_STEP`] deeper
//! per level.

pub mod index;

use crate::classify;
use crate::config::Config;
use crate::constraint;
use crate::metadata::{ClassDoc, MetadataSource};
use crate::model::{AttributeKind, AttributeRecord, Mode, Page, ResourceDescriptor};
use crate::resolve::Resolver;
use crate::link;
use crate::text::{indent, repeat, trim_leading_space};

/// Indentation added per nesting level.
pub const INDENT_STEP: usize = 8;

const ROLES: &str = "\
.. role:: attribute

.. role:: subresource

.. role:: collection-type

.. role:: resource-type

";

const TABLE_HEADER: &str = "\
.. list-table::
    :widths: 30 70
    :header-rows: 1

    * - Attribute
      - Description

";

/// Resolve everything a standalone page shows.
pub fn page<S: MetadataSource + ?Sized>(
    source: &S,
    config: &Config,
    class: &ClassDoc,
) -> Page {
    let descriptor = classify::classify(source, config, class);
    page_for(source, config, descriptor, class)
}

/// Like [`page`], for an already-classified class.
pub fn page_for<S: MetadataSource + ?Sized>(
    source: &S,
    config: &Config,
    descriptor: ResourceDescriptor,
    class: &ClassDoc,
) -> Page {
    let resolver = Resolver::new(source, config);
    let attributes = resolver.resolve(class, Mode::ExcludeOutput, 0);
    // Outputs nested under a non-output subresource set `any_output` but are
    // never admitted at the top level.
    let outputs = attributes
        .any_output
        .then(|| resolver.resolve(class, Mode::OutputOnly, 0).records)
        .filter(|records| !records.is_empty());

    Page {
        descriptor,
        comment: class.comment_text().to_string(),
        attributes: attributes.records,
        outputs,
    }
}

/// Render a page to reST.
pub fn render(page: &Page) -> String {
    let mut out = String::new();

    let title = page.descriptor.display_name();
    out.push_str(&heading(&title, '='));

    let comment = trim_leading_space(page.comment.trim_end());
    let comment = comment.trim_matches('\n');
    if !comment.is_empty() {
        out.push_str(comment);
        out.push_str("\n\n");
    }

    out.push_str(&heading("Attributes", '-'));
    out.push_str(ROLES);
    out.push_str(TABLE_HEADER);
    write_records(&mut out, &page.attributes);

    if let Some(outputs) = &page.outputs {
        out.push_str(&heading("Outputs", '-'));
        out.push_str(TABLE_HEADER);
        write_records(&mut out, outputs);
    }

    out
}

/// Title line underlined to its exact character width, then a blank line.
pub fn heading(title: &str, underline: char) -> String {
    format!(
        "{}\n{}\n\n",
        title,
        repeat(&underline.to_string(), title.chars().count())
    )
}

fn write_records(out: &mut String, records: &[AttributeRecord]) {
    for record in records {
        write_record(out, record);
    }
}

fn write_record(out: &mut String, record: &AttributeRecord) {
    let column = record.depth * INDENT_STEP;
    let name = name_cell(record);

    // Column the description text starts at.
    let text_column = if record.depth == 0 {
        out.push_str(&indent(column + 4));
        out.push_str(&format!("* - {}\n", name));
        out.push_str(&indent(column + 6));
        out.push_str("- ");
        column + 8
    } else {
        if record.is_subresource() {
            out.push_str(&indent(column));
            out.push_str(".. rst-class:: subresource\n");
        }
        out.push_str(&indent(column));
        out.push_str(&name);
        out.push('\n');
        out.push_str(&indent(column + 4));
        column + 4
    };

    let sentence = constraint::compose(&record.description.summary, &record.clauses);
    out.push_str(&hang(&sentence, text_column));

    let remainder = reindent(&record.description.remainder, text_column);
    if !remainder.is_empty() {
        out.push_str("\n\n");
        out.push_str(&remainder);
    }
    out.push_str("\n\n");

    write_records(out, record.children());
}

/// Attribute name with its role tags and, for references, the page link.
fn name_cell(record: &AttributeRecord) -> String {
    let mut tags: Vec<String> = Vec::new();
    if let Some(element) = &record.collection_element_type {
        tags.push(format!(":collection-type:`{}`", element));
    }
    match &record.kind {
        AttributeKind::Plain => {}
        AttributeKind::Subresource { .. } => tags.push(":subresource:`subresource`".to_string()),
        AttributeKind::ResourceReference { target } => {
            tags.push(":resource-type:`resource`".to_string());
            tags.push(link::reference(&target.display, &target.anchor));
        }
    }

    if tags.is_empty() {
        return record.name.clone();
    }
    format!(":attribute:`{}` {}", record.name, tags.join(" "))
}

/// First line as-is, continuation lines hung at `column`.
fn hang(text: &str, column: usize) -> String {
    let pad = indent(column);
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(&format!("\n{}", pad))
}

/// Every line left-trimmed and re-indented to `column`; blank lines stay empty.
fn reindent(text: &str, column: usize) -> String {
    let pad = indent(column);
    text.trim_matches('\n')
        .split('\n')
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
