//! reST labels and cross-references between generated pages.
//!
//! Every standalone page is addressed by a label built from its doc group and
//! base type name, so links are stable across runs and need no lookup table.

use crate::model::ResourceDescriptor;

const LINK_PREFIX: &str = "Resource_Query_Link";

/// Label of a resource page.
pub fn resource_anchor(group: &str, base_name: &str) -> String {
    format!("{}_{}_{}_Resource", LINK_PREFIX, group, base_name)
}

/// Label of a finder ("query") page.
pub fn query_anchor(group: &str, base_name: &str) -> String {
    format!("{}_{}_{}_Query", LINK_PREFIX, group, base_name)
}

/// Label of the page `descriptor` is rendered to.
pub fn anchor_for(group: &str, descriptor: &ResourceDescriptor) -> String {
    if descriptor.is_finder() {
        query_anchor(group, descriptor.base_name())
    } else {
        resource_anchor(group, descriptor.base_name())
    }
}

/// Label definition line: `.. _anchor:`.
pub fn label(anchor: &str) -> String {
    format!(".. _{}:", anchor)
}

/// Inline cross-reference: `` :ref:`text <anchor>` ``.
pub fn reference(text: &str, anchor: &str) -> String {
    format!(":ref:`{} <{}>`", text, anchor)
}

/// Output directory of a doc group: lower-cased, spaces as hyphens.
pub fn group_dir(group: &str) -> String {
    group.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceKind;

    #[test]
    fn anchors() {
        assert_eq!(resource_anchor("EC2", "vpc"), "Resource_Query_Link_EC2_vpc_Resource");
        assert_eq!(query_anchor("EC2", "vpc"), "Resource_Query_Link_EC2_vpc_Query");
    }

    #[test]
    fn finder_anchor_uses_base_name() {
        let descriptor = ResourceDescriptor {
            class_name: "gyro.aws.ec2.VpcFinder".to_string(),
            type_name: "vpc-finder".to_string(),
            namespace: Some("aws".to_string()),
            group: Some("EC2".to_string()),
            provider_package: "gyro.aws".to_string(),
            kind: ResourceKind::Finder,
        };
        assert_eq!(anchor_for("EC2", &descriptor), "Resource_Query_Link_EC2_vpc_Query");
    }

    #[test]
    fn label_and_reference() {
        assert_eq!(label("x"), ".. _x:");
        assert_eq!(reference("Query", "x"), ":ref:`Query <x>`");
    }

    #[test]
    fn group_directories() {
        assert_eq!(group_dir("Autoscaling Groups"), "autoscaling-groups");
        assert_eq!(group_dir("EC2"), "ec2");
    }
}
