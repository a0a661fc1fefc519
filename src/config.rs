//! Generator configuration.

/// Root package prefix used when no `DocNamespace` annotation is present.
pub const DEFAULT_ROOT_PREFIX: &str = "gyro";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Provider packages under this prefix take their namespace from the next
    /// package segment (`gyro.aws` → `aws`).
    pub root_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_prefix: DEFAULT_ROOT_PREFIX.to_string(),
        }
    }
}

impl Config {
    pub fn with_root_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.root_prefix = prefix.into().trim_end_matches('.').to_string();
        self
    }
}
