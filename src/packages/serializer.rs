//! Canonical packages section writer
//!
//! Output depends only on the [`Selection`] state. Every block is sorted by
//! its rendered token, so two equal selections always produce identical
//! bytes whatever order they were built in.

use super::parser::{SECTION_END, SECTION_HEADER};
use super::selection::Selection;

/// Render the canonical text of a packages section, terminated by a newline.
///
/// Layout: header with attributes, environment, groups and modules,
/// packages, one blank line, excluded groups, excluded packages, `%end`.
pub fn serialize(selection: &Selection) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(header(selection));

    if let Some(environment) = selection.environment() {
        lines.push(format!("@^{}", environment));
    }

    let mut groups: Vec<String> = selection.group_entries().map(|e| e.to_string()).collect();
    groups.sort();
    lines.extend(groups);

    let mut packages: Vec<String> = selection.package_entries().map(|e| e.to_string()).collect();
    packages.sort();
    lines.extend(packages);

    lines.push(String::new());

    // BTreeSet iteration is already sorted
    lines.extend(selection.excluded_groups().map(|g| format!("-@{}", g)));
    lines.extend(selection.excluded_packages().map(|p| format!("-{}", p)));

    lines.push(SECTION_END.to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn header(selection: &Selection) -> String {
    let mut words = vec![SECTION_HEADER.to_string()];

    if !selection.core_group_enabled() {
        words.push("--nocore".to_string());
    }
    if selection.missing_ignored() {
        words.push("--ignoremissing".to_string());
    }
    if let Some(languages) = selection.languages().flag_value() {
        words.push(format!("--instLangs={}", languages));
    }
    if selection.multilib_policy().is_multilib() {
        words.push("--multilib".to_string());
    }
    if selection.docs_excluded() {
        words.push("--excludedocs".to_string());
    }
    if selection.weakdeps_excluded() {
        words.push("--excludeWeakdeps".to_string());
    }
    if let Some(timeout) = selection.timeout() {
        words.push(format!("--timeout={}", timeout));
    }
    if let Some(retries) = selection.retries() {
        words.push(format!("--retries={}", retries));
    }

    words.join(" ")
}
