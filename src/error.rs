//! Errors for the fallible edge of the library: reading metadata dumps.
//!
//! Classification, resolution and rendering never fail; bad members degrade
//! to omitted clauses or links and are reported through `tracing`.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no metadata input given")]
    NoInput,
}
