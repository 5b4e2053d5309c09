//! CLI output formatting.
//!
//! Output is information-centric: the primary display for every entity is
//! its semantic identity (resource name, facet label) with counts and
//! statuses as secondary context. Each stage has a `format_*` function
//! (returns `Vec<String>`) for testability and a `print_*` wrapper that
//! writes to stdout. Format functions are pure — no I/O, no side effects.

use crate::catalog::Facet;
use crate::site::{BuildReport, FetchReport};

/// Per-resource fetch status plus the derived facet inventory.
///
/// ```text
/// Resources
///     portfolio: loaded
///     categories: empty
///     background: failed
///
/// Facets
///     All Work (25 images)
///     Landscape (12 images)
/// ```
pub fn format_check_output(report: &FetchReport, facets: &[Facet]) -> Vec<String> {
    let mut lines = vec!["Resources".to_string()];
    for (key, status) in &report.statuses {
        lines.push(format!("    {key}: {status}"));
    }
    lines.push(String::new());
    lines.push("Facets".to_string());
    for facet in facets {
        let noun = if facet.count == 1 { "image" } else { "images" };
        lines.push(format!("    {} ({} {})", facet.label, facet.count, noun));
    }
    lines
}

/// Written pages, one per line, with a closing summary.
///
/// ```text
/// Home → index.html
/// Portfolio → portfolio/index.html
/// ...
/// Generated 9 pages from 25 images across 3 facets
/// ```
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.pages.len() + 1);
    for page in &report.pages {
        lines.push(format!("{} → {}", page_label(page), page));
    }
    lines.push(format!(
        "Generated {} pages from {} images across {} facets",
        report.pages.len(),
        report.image_count,
        report.facet_count
    ));
    lines
}

fn page_label(page: &str) -> &'static str {
    match page {
        "index.html" => "Home",
        "about.html" => "About",
        "featured.html" => "Featured",
        _ => "Portfolio",
    }
}

pub fn print_check_output(report: &FetchReport, facets: &[Facet]) {
    for line in format_check_output(report, facets) {
        println!("{line}");
    }
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ResourceKey;

    #[test]
    fn check_output_lists_statuses_and_facets() {
        let report = FetchReport {
            statuses: vec![
                (ResourceKey::Portfolio, "loaded"),
                (ResourceKey::Background, "failed"),
            ],
        };
        let facets = vec![
            Facet {
                label: "All Work".to_string(),
                count: 1,
            },
            Facet {
                label: "Wildlife".to_string(),
                count: 1,
            },
        ];
        let lines = format_check_output(&report, &facets);
        assert_eq!(lines[1], "    portfolio: loaded");
        assert_eq!(lines[2], "    background: failed");
        assert!(lines.contains(&"    All Work (1 image)".to_string()));
    }

    #[test]
    fn build_output_ends_with_summary() {
        let report = BuildReport {
            pages: vec!["index.html".to_string(), "about.html".to_string()],
            image_count: 4,
            facet_count: 2,
        };
        let lines = format_build_output(&report);
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines.last().unwrap(), "Generated 2 pages from 4 images across 2 facets");
    }
}
