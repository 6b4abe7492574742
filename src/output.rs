//! CLI output formatting.
//!
//! The builder reports progress as [`BuildEvent`]s; this module turns them
//! into the lines the CLI prints in verbose mode:
//!
//! ```text
//! Rendered index.html -> generated_html/index.html
//! Rendered about.html -> generated_html/about/index.html
//! Copied site/static -> generated_html
//! ```
//!
//! Format functions are pure (no I/O) so they can be tested directly; the
//! binary does the printing.

use crate::generate::BuildSummary;
use crate::types::BuildEvent;

/// Format a single build event as progress lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::PageRendered {
            template,
            output_path,
            ..
        } => vec![format!("Rendered {} -> {}", template, output_path.display())],
        BuildEvent::StaticCopied {
            source,
            destination,
            ..
        } => vec![format!(
            "Copied {} -> {}",
            source.display(),
            destination.display()
        )],
    }
}

/// Format the closing summary of a verbose build.
pub fn format_summary(summary: &BuildSummary) -> Vec<String> {
    let pages = summary.pages.len();
    vec![format!(
        "Generated {} {}, {} static {} in {}",
        pages,
        plural(pages, "page", "pages"),
        summary.static_files,
        plural(summary.static_files, "file", "files"),
        summary.output_root.display()
    )]
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_page_rendered() {
        let event = BuildEvent::PageRendered {
            url: "/about/".to_string(),
            template: "about.html".to_string(),
            output_path: PathBuf::from("out/about/index.html"),
        };
        assert_eq!(
            format_build_event(&event),
            vec!["Rendered about.html -> out/about/index.html"]
        );
    }

    #[test]
    fn format_static_copied() {
        let event = BuildEvent::StaticCopied {
            source: PathBuf::from("site/static"),
            destination: PathBuf::from("out"),
            files: 3,
        };
        assert_eq!(format_build_event(&event), vec!["Copied site/static -> out"]);
    }

    #[test]
    fn format_summary_pluralizes() {
        let summary = BuildSummary {
            output_root: PathBuf::from("out"),
            pages: vec![PathBuf::from("out/index.html")],
            static_files: 2,
        };
        assert_eq!(
            format_summary(&summary),
            vec!["Generated 1 page, 2 static files in out"]
        );
    }

    #[test]
    fn format_summary_empty_site() {
        let summary = BuildSummary {
            output_root: PathBuf::from("out"),
            pages: vec![],
            static_files: 1,
        };
        assert_eq!(
            format_summary(&summary),
            vec!["Generated 0 pages, 1 static file in out"]
        );
    }
}
