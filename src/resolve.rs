//! Attribute-tree resolver.
//!
//! Walks a class's inheritance chain base-first and turns every documented
//! member into an [`AttributeRecord`]. Members tagged `@subresource` expand
//! into the nested tree of the target class; members tagged `@resource` become
//! cross-page links to another standalone resource.

use crate::classify::{self, DIFFABLE_ROOT, FINDER_ROOT, RESOURCE_ROOT};
use crate::config::Config;
use crate::constraint;
use crate::link;
use crate::metadata::{self, Annotated, ClassDoc, MetadataSource, MethodDoc};
use crate::model::{AttributeKind, AttributeRecord, Mode, ReferenceTarget, Resolved};
use crate::text;
use std::collections::HashSet;

/// Tag naming the class a member's nested attributes come from.
pub const SUBRESOURCE_TAG: &str = "subresource";
/// Tag naming a standalone resource a member refers to.
pub const RESOURCE_TAG: &str = "resource";
/// Tag marking a member as output-only.
pub const OUTPUT_TAG: &str = "output";
/// Annotation marking a member as output-only.
pub const OUTPUT_ANNOTATION: &str = "Output";

pub struct Resolver<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    config: &'a Config,
}

impl<'a, S: MetadataSource + ?Sized> Resolver<'a, S> {
    pub fn new(source: &'a S, config: &'a Config) -> Self {
        Self { source, config }
    }

    /// Resolve the attribute tree of `class` at `depth`.
    pub fn resolve(&self, class: &ClassDoc, mode: Mode, depth: usize) -> Resolved {
        let mut path = vec![class.name.clone()];
        self.resolve_on_path(class, mode, depth, &mut path)
    }

    fn resolve_on_path(
        &self,
        class: &ClassDoc,
        mode: Mode,
        depth: usize,
        path: &mut Vec<String>,
    ) -> Resolved {
        let mut resolved = Resolved::default();

        for ancestor in self.lineage(class) {
            for member in ancestor.methods.iter().filter(|m| m.is_documented()) {
                let is_output = is_output(member);
                resolved.any_output |= is_output;
                if !mode.admits(is_output) {
                    continue;
                }

                let (kind, nested_output) = self.member_kind(ancestor, member, mode, depth, path);
                resolved.any_output |= nested_output;
                resolved
                    .records
                    .push(record(member, is_output, kind, depth));
            }
        }

        resolved
    }

    /// `class` and its ancestors in the graph, base class first.
    ///
    /// Stops at the framework roots, which carry no documented attributes.
    fn lineage<'c>(&'c self, class: &'c ClassDoc) -> Vec<&'c ClassDoc> {
        let mut chain = vec![class];
        let mut seen: HashSet<&str> = HashSet::from([class.name.as_str()]);
        let mut next = class.superclass.as_deref();

        while let Some(name) = next {
            if is_root(name) {
                break;
            }
            let Some(parent) = self.source.class_named(name) else {
                break;
            };
            if !seen.insert(parent.name.as_str()) {
                tracing::error!(class = %class.name, at = %parent.name, "superclass cycle, stopping walk");
                break;
            }
            chain.push(parent);
            next = parent.superclass.as_deref();
        }

        chain.reverse();
        chain
    }

    fn member_kind(
        &self,
        owner: &ClassDoc,
        member: &MethodDoc,
        mode: Mode,
        depth: usize,
        path: &mut Vec<String>,
    ) -> (AttributeKind, bool) {
        if let Some(tag) = member.tag(SUBRESOURCE_TAG) {
            let target_name = tag.text.trim();
            let Some(target_class) = self.source.class_named(target_name) else {
                tracing::warn!(
                    class = %owner.name,
                    member = %member.name,
                    to = target_name,
                    "unresolved subresource, rendering as plain attribute"
                );
                return (AttributeKind::Plain, false);
            };

            if path.iter().any(|p| p == &target_class.name) {
                tracing::error!(
                    class = %owner.name,
                    member = %member.name,
                    to = target_name,
                    "subresource cycle, not expanding"
                );
                return (
                    AttributeKind::Subresource {
                        target: target_class.name.clone(),
                        children: Vec::new(),
                    },
                    false,
                );
            }

            path.push(target_class.name.clone());
            let nested = self.resolve_on_path(target_class, mode, depth + 1, path);
            path.pop();

            return (
                AttributeKind::Subresource {
                    target: target_class.name.clone(),
                    children: nested.records,
                },
                nested.any_output,
            );
        }

        if let Some(tag) = member.tag(RESOURCE_TAG) {
            let target_name = tag.text.trim();
            match self.reference(target_name) {
                Some(target) => return (AttributeKind::ResourceReference { target }, false),
                None => {
                    tracing::warn!(
                        class = %owner.name,
                        member = %member.name,
                        to = target_name,
                        "resource reference has no page, omitting link"
                    );
                }
            }
        }

        (AttributeKind::Plain, false)
    }

    /// Link target of a referenced resource; `None` when it has no page.
    fn reference(&self, target: &str) -> Option<ReferenceTarget> {
        let class = self.source.class_named(target)?;
        if class.is_abstract {
            return None;
        }
        let descriptor = classify::classify(self.source, self.config, class);
        if !descriptor.is_standalone() {
            return None;
        }
        let group = descriptor.group.as_deref()?;
        Some(ReferenceTarget {
            display: descriptor.display_name(),
            anchor: link::anchor_for(group, &descriptor),
        })
    }
}

fn is_root(qualified: &str) -> bool {
    matches!(
        text::simple_name(qualified),
        RESOURCE_ROOT | FINDER_ROOT | DIFFABLE_ROOT
    )
}

fn is_output(member: &MethodDoc) -> bool {
    member.has_annotation(OUTPUT_ANNOTATION) || member.has_tag(OUTPUT_TAG)
}

fn record(member: &MethodDoc, is_output: bool, kind: AttributeKind, depth: usize) -> AttributeRecord {
    let parts = metadata::split_comment(member.comment_text());
    let (description, clauses) = constraint::describe(member, &parts);

    AttributeRecord {
        name: text::attribute_name(&member.name),
        description,
        is_output,
        kind,
        collection_element_type: member.collection_element_type(),
        clauses,
        depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::json::JsonMetadata;
    use serde_json::{json, Value};

    fn method(name: &str, comment: &str) -> Value {
        json!({"name": name, "comment": comment})
    }

    fn graph() -> JsonMetadata {
        JsonMetadata::from_value(json!({
            "packages": [
                {"name": "gyro.test.net", "annotations": [
                    {"name": "DocGroup", "elements": [{"name": "value", "value": "Network"}]}
                ]}
            ],
            "classes": [
                {"name": "gyro.test.net.A", "superclass": "gyro.core.resource.Resource",
                 "methods": [method("getAlpha", "Alpha."), {"name": "getHidden"}]},
                {"name": "gyro.test.net.B", "superclass": "gyro.test.net.A",
                 "methods": [method("getBeta", "Beta.")]},
                {"name": "gyro.test.net.C", "superclass": "gyro.test.net.B",
                 "annotations": [{"name": "Type", "elements": [{"name": "value", "value": "c"}]}],
                 "methods": [
                    method("getGamma", "Gamma."),
                    {"name": "getId", "comment": "The id.",
                     "annotations": [{"name": "Output"}]},
                    {"name": "getRule", "comment": "Rules.",
                     "returns": "java.util.List<gyro.test.net.Rule>",
                     "tags": [{"name": "@subresource", "text": "gyro.test.net.Rule"}]},
                    {"name": "getVpc", "comment": "The vpc.",
                     "tags": [{"name": "@resource", "text": "gyro.test.net.VpcResource"}]},
                    {"name": "getMissing", "comment": "Gone.",
                     "tags": [{"name": "@subresource", "text": "gyro.test.net.Nope"}]},
                    {"name": "getGateway", "comment": "The gateway.",
                     "tags": [{"name": "@resource", "text": "gyro.test.net.GatewayResource"}]},
                    {"name": "getRuleRef", "comment": "A rule.",
                     "tags": [{"name": "@resource", "text": "gyro.test.net.Rule"}]},
                    {"name": "getBase", "comment": "The base.",
                     "tags": [{"name": "@resource", "text": "gyro.test.net.NetworkResource"}]}
                 ]},
                {"name": "gyro.test.net.Rule", "superclass": "gyro.core.diff.Diffable",
                 "methods": [
                    method("getPort", "The port."),
                    {"name": "getState", "comment": "State.", "tags": [{"name": "@output"}]}
                 ]},
                {"name": "gyro.test.net.VpcResource", "superclass": "gyro.core.resource.Resource",
                 "annotations": [{"name": "Type", "elements": [{"name": "value", "value": "vpc"}]}]},
                {"name": "gyro.test.net.NetworkResource", "superclass": "gyro.core.resource.Resource",
                 "abstract": true,
                 "annotations": [{"name": "Type", "elements": [{"name": "value", "value": "network"}]}]},
                {"name": "gyro.test.net.Loop", "superclass": "gyro.core.diff.Diffable",
                 "methods": [{"name": "getSelf", "comment": "Self.",
                              "tags": [{"name": "@subresource", "text": "gyro.test.net.Loop"}]}]}
            ]
        }))
        .unwrap()
    }

    fn names(records: &[AttributeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn base_class_fields_first() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.C").unwrap();

        let resolved = resolver.resolve(class, Mode::ExcludeOutput, 0);
        assert_eq!(names(&resolved.records), [
                "alpha", "beta", "gamma", "rule", "vpc", "missing", "gateway", "rule-ref", "base"
            ]);
        assert!(resolved.any_output);
    }

    #[test]
    fn output_only_keeps_mode_in_nested_trees() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.C").unwrap();

        let resolved = resolver.resolve(class, Mode::OutputOnly, 0);
        assert_eq!(names(&resolved.records), ["id"]);

        let included = resolver.resolve(class, Mode::IncludeOutput, 0);
        let rule = included.records.iter().find(|r| r.name == "rule").unwrap();
        assert_eq!(names(rule.children()), ["port", "state"]);

        let excluded = resolver.resolve(class, Mode::ExcludeOutput, 0);
        let rule = excluded.records.iter().find(|r| r.name == "rule").unwrap();
        assert_eq!(names(rule.children()), ["port"]);
        assert_eq!(rule.children()[0].depth, 1);
        assert_eq!(rule.collection_element_type.as_deref(), Some("rule"));
    }

    #[test]
    fn reference_links_to_resource_page() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.C").unwrap();

        let resolved = resolver.resolve(class, Mode::ExcludeOutput, 0);
        let vpc = resolved.records.iter().find(|r| r.name == "vpc").unwrap();
        match &vpc.kind {
            AttributeKind::ResourceReference { target } => {
                assert_eq!(target.display, "test::vpc");
                assert_eq!(target.anchor, "Resource_Query_Link_Network_vpc_Resource");
            }
            other => panic!("expected reference, got {:?}", other),
        }
    }

    #[test]
    fn unresolved_subresource_is_plain() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.C").unwrap();

        let resolved = resolver.resolve(class, Mode::ExcludeOutput, 0);
        let missing = resolved.records.iter().find(|r| r.name == "missing").unwrap();
        assert_eq!(missing.kind, AttributeKind::Plain);
    }

    #[test]
    fn missing_reference_target_is_plain() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.C").unwrap();

        let resolved = resolver.resolve(class, Mode::ExcludeOutput, 0);
        let gateway = resolved.records.iter().find(|r| r.name == "gateway").unwrap();
        assert_eq!(gateway.kind, AttributeKind::Plain);
    }

    #[test]
    fn references_without_a_page_are_plain() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.C").unwrap();

        let resolved = resolver.resolve(class, Mode::ExcludeOutput, 0);
        for name in ["rule-ref", "base"] {
            let record = resolved.records.iter().find(|r| r.name == name).unwrap();
            assert_eq!(record.kind, AttributeKind::Plain, "{} should not link", name);
        }
    }

    #[test]
    fn cycles_are_not_expanded() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.Loop").unwrap();

        let resolved = resolver.resolve(class, Mode::IncludeOutput, 0);
        assert_eq!(resolved.records.len(), 1);
        assert!(resolved.records[0].is_subresource());
        assert!(resolved.records[0].children().is_empty());
    }

    #[test]
    fn undocumented_members_skipped() {
        let meta = graph();
        let config = Config::default();
        let resolver = Resolver::new(&meta, &config);
        let class = meta.class_named("gyro.test.net.A").unwrap();

        let resolved = resolver.resolve(class, Mode::IncludeOutput, 0);
        assert_eq!(names(&resolved.records), ["alpha"]);
        assert!(!resolved.any_output);
    }
}
