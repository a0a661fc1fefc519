//! JSON class-graph dumps, the shipped [`MetadataSource`].
//!
//! A dump is an object with `packages` and `classes` arrays. Several dumps can
//! be merged; the first definition of a class or package name wins.

use super::{ClassDoc, MetadataSource, PackageDoc};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct Dump {
    #[serde(default)]
    packages: Vec<PackageDoc>,
    #[serde(default)]
    classes: Vec<ClassDoc>,
}

/// Class graph loaded from one or more JSON dumps.
#[derive(Debug, Default)]
pub struct JsonMetadata {
    packages: Vec<PackageDoc>,
    classes: Vec<ClassDoc>,
    package_index: HashMap<String, usize>,
    class_index: HashMap<String, usize>,
}

impl JsonMetadata {
    /// Parse a single dump from a string.
    pub fn parse(input: &str) -> Result<Self> {
        let dump: Dump = serde_json::from_str(input).map_err(|source| Error::Parse {
            path: "<input>".into(),
            source,
        })?;
        let mut metadata = Self::default();
        metadata.extend(dump);
        Ok(metadata)
    }

    /// Build from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let dump: Dump = serde_json::from_value(value).map_err(|source| Error::Parse {
            path: "<value>".into(),
            source,
        })?;
        let mut metadata = Self::default();
        metadata.extend(dump);
        Ok(metadata)
    }

    /// Load and merge every dump in `paths`, in the order given; the first
    /// definition of a class or package wins.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        if paths.is_empty() {
            return Err(Error::NoInput);
        }

        let mut metadata = Self::default();
        for path in paths {
            let path = path.as_ref();
            let content = fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let dump: Dump = serde_json::from_str(&content).map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(
                path = %path.display(),
                classes = dump.classes.len(),
                packages = dump.packages.len(),
                "loaded metadata dump"
            );
            metadata.extend(dump);
        }
        Ok(metadata)
    }

    fn extend(&mut self, dump: Dump) {
        for package in dump.packages {
            if self.package_index.contains_key(&package.name) {
                tracing::warn!(package = %package.name, "duplicate package, keeping first definition");
                continue;
            }
            self.package_index
                .insert(package.name.clone(), self.packages.len());
            self.packages.push(package);
        }

        for class in dump.classes {
            if self.class_index.contains_key(&class.name) {
                tracing::warn!(class = %class.name, "duplicate class, keeping first definition");
                continue;
            }
            self.class_index.insert(class.name.clone(), self.classes.len());
            self.classes.push(class);
        }
    }
}

impl MetadataSource for JsonMetadata {
    fn classes(&self) -> &[ClassDoc] {
        &self.classes
    }

    fn class_named(&self, name: &str) -> Option<&ClassDoc> {
        self.class_index.get(name.trim()).map(|&i| &self.classes[i])
    }

    fn package_named(&self, name: &str) -> Option<&PackageDoc> {
        self.package_index.get(name).map(|&i| &self.packages[i])
    }
}
