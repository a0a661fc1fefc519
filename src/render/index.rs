//! Group and provider index pages.

use super::heading;
use crate::text::trim_leading_space;

const TOCTREE: &str = ".. toctree::\n    :maxdepth: 1\n\n";

/// Table of contents for one doc group, listing the given page names.
pub fn group_index<'a>(group: &str, names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = heading(group, '=');
    out.push_str(TOCTREE);
    for name in names {
        out.push_str("    ");
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Top-level page: the provider package comment followed by a table of
/// contents over every group directory.
pub fn provider_index(comment: &str, group_dirs: &[String]) -> String {
    let mut out = String::new();

    let comment = trim_leading_space(comment).replace("{@literal @}", "@");
    let comment = comment.trim();
    if !comment.is_empty() {
        out.push_str(comment);
        out.push_str("\n\n");
    }

    out.push_str("Resources\n+++++++++\n\n");
    out.push_str(TOCTREE);
    for dir in group_dirs {
        out.push_str(&format!("    {}/index\n", dir));
    }
    out
}
