//! Site assembly: every standalone class becomes a page under its group
//! directory, finder/resource pairs are cross-linked, and each group plus the
//! provider gets an index.
//!
//! Nothing here touches the filesystem. [`generate`] returns the files and the
//! caller decides where they go.

use crate::classify;
use crate::config::Config;
use crate::link;
use crate::metadata::MetadataSource;
use crate::model::{ResourceDescriptor, FINDER_SUFFIX};
use crate::render::{self, index};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One generated document, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// A rendered page waiting to be labelled.
struct Rendered {
    descriptor: ResourceDescriptor,
    text: String,
}

/// Render every standalone class in `source` into a complete document set.
///
/// Output order is deterministic: groups and type names are sorted, and the
/// top-level index comes last.
pub fn generate<S: MetadataSource + ?Sized>(source: &S, config: &Config) -> Vec<OutputFile> {
    let mut groups: BTreeMap<String, BTreeMap<String, Rendered>> = BTreeMap::new();
    let mut provider_package: Option<String> = None;

    for class in source.classes() {
        if class.is_abstract {
            tracing::debug!(class = %class.name, "skipping abstract class");
            continue;
        }

        let descriptor = classify::classify(source, config, class);
        if !descriptor.is_standalone() {
            tracing::debug!(class = %class.name, "subresource, rendered only when nested");
            continue;
        }
        let Some(group) = descriptor.group.clone() else {
            tracing::debug!(class = %class.name, "no DocGroup on package, skipping");
            continue;
        };

        tracing::info!(page = %descriptor.display_name(), "generating documentation");
        provider_package.get_or_insert_with(|| descriptor.provider_package.clone());

        let page = render::page_for(source, config, descriptor, class);
        let text = render::render(&page);
        let rendered = Rendered {
            descriptor: page.descriptor,
            text,
        };

        match groups.entry(group).or_default().entry(rendered.descriptor.type_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(rendered);
            }
            Entry::Occupied(existing) => {
                tracing::warn!(
                    class = %class.name,
                    kept = %existing.get().descriptor.class_name,
                    type_name = %existing.key(),
                    "duplicate type name in group, keeping first"
                );
            }
        }
    }

    let mut files = Vec::new();
    let mut group_dirs = Vec::new();

    for (group, pages) in &groups {
        let dir = link::group_dir(group);

        for (type_name, page) in pages {
            let contents = label_page(group, pages, page);
            files.push(OutputFile {
                path: PathBuf::from(&dir).join(format!("{}.rst", type_name)),
                contents,
            });
        }

        let listed = pages
            .iter()
            .filter(|(_, page)| !page.descriptor.is_finder())
            .map(|(name, _)| name.as_str());
        files.push(OutputFile {
            path: PathBuf::from(&dir).join("index.rst"),
            contents: index::group_index(group, listed),
        });

        group_dirs.push(dir);
    }

    group_dirs.sort();
    group_dirs.dedup();

    let comment = provider_package
        .as_deref()
        .and_then(|name| source.package_named(name))
        .and_then(|package| package.comment.as_deref())
        .unwrap_or("");
    files.push(OutputFile {
        path: PathBuf::from("index.rst"),
        contents: index::provider_index(comment, &group_dirs),
    });

    files
}

/// Prefix a page with its label, plus the pair link when its counterpart exists.
fn label_page(group: &str, pages: &BTreeMap<String, Rendered>, page: &Rendered) -> String {
    let base = page.descriptor.base_name();
    let resource_anchor = link::resource_anchor(group, base);
    let query_anchor = link::query_anchor(group, base);

    if page.descriptor.is_finder() {
        let paired = pages
            .get(base)
            .is_some_and(|other| !other.descriptor.is_finder());
        if paired {
            return stitch_finder(&page.text, &resource_anchor, &query_anchor);
        }
        return labelled(&page.text, &query_anchor);
    }

    let finder_name = format!("{}{}", base, FINDER_SUFFIX);
    let paired = pages
        .get(&finder_name)
        .is_some_and(|other| other.descriptor.is_finder());
    if paired {
        stitch_resource(&page.text, &resource_anchor, &query_anchor)
    } else {
        labelled(&page.text, &resource_anchor)
    }
}

/// `text` under its own label.
pub fn labelled(text: &str, anchor: &str) -> String {
    format!("{}\n\n{}", link::label(anchor), text)
}

/// Resource page of a pair: its label, then a link to the finder page.
pub fn stitch_resource(text: &str, resource_anchor: &str, query_anchor: &str) -> String {
    pair_block(text, resource_anchor, "Query", query_anchor)
}

/// Finder page of a pair: its label, then a link back to the resource page.
pub fn stitch_finder(text: &str, resource_anchor: &str, query_anchor: &str) -> String {
    pair_block(text, query_anchor, "Back to resource", resource_anchor)
}

fn pair_block(text: &str, own_anchor: &str, link_text: &str, other_anchor: &str) -> String {
    format!(
        "{}\n\n.. rst-class:: .query-resource-link\n{}\n\n{}",
        link::label(own_anchor),
        link::reference(link_text, other_anchor),
        text
    )
}
