//! Resource classifier — decides whether a class gets a page of its own.

use crate::config::Config;
use crate::metadata::{self, Annotated, ClassDoc, MetadataSource};
use crate::model::{ResourceDescriptor, ResourceKind, FINDER_SUFFIX};
use crate::text;

/// Base type of every standalone resource.
pub const RESOURCE_ROOT: &str = "Resource";
/// Base type of every finder.
pub const FINDER_ROOT: &str = "Finder";
/// Base type of nested configuration objects.
pub const DIFFABLE_ROOT: &str = "Diffable";

/// Classify `class` and derive its documented names.
pub fn classify<S: MetadataSource + ?Sized>(
    source: &S,
    config: &Config,
    class: &ClassDoc,
) -> ResourceDescriptor {
    let ancestors = metadata::ancestor_names(source, class);
    let extends = |root: &str| ancestors.iter().any(|a| a == root);
    let is_resource = extends(RESOURCE_ROOT);
    let is_finder = !is_resource && extends(FINDER_ROOT);

    let explicit = class
        .annotation("Type")
        .and_then(|a| a.string_value())
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let base_name = match explicit {
        Some(name) => name.to_string(),
        None => text::camel_to_hyphen(&class.simple_name().replace("Resource", "")),
    };

    let kind = if explicit.is_none() {
        ResourceKind::Subresource
    } else if is_resource {
        ResourceKind::Resource
    } else if is_finder {
        ResourceKind::Finder
    } else {
        ResourceKind::Subresource
    };

    let type_name = if is_finder {
        format!("{}{}", base_name, FINDER_SUFFIX)
    } else {
        base_name
    };

    let package = class.package_name();
    let group = source
        .package_named(package)
        .and_then(|p| p.annotation("DocGroup"))
        .and_then(|a| a.string_value())
        .map(str::to_string);

    let provider_package = package
        .rsplit_once('.')
        .map_or(package, |(parent, _)| parent)
        .to_string();

    let namespace = namespace(source, config, &provider_package);

    ResourceDescriptor {
        class_name: class.name.clone(),
        type_name,
        namespace,
        group,
        provider_package,
        kind,
    }
}

/// Namespace of a provider package: its `DocNamespace` annotation, else the
/// segment after the root prefix.
fn namespace<S: MetadataSource + ?Sized>(
    source: &S,
    config: &Config,
    provider_package: &str,
) -> Option<String> {
    let annotated = source
        .package_named(provider_package)
        .and_then(|p| p.annotation("DocNamespace"))
        .and_then(|a| a.string_value())
        .map(str::to_string);

    annotated.or_else(|| {
        let mut segments = provider_package.split('.');
        if segments.next() != Some(config.root_prefix.as_str()) {
            return None;
        }
        segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
