//! YAML front matter for already-exported trees.
//!
//! A separate post-export pass: rebuild the hierarchy, map every node to
//! the path the exporter would have written, and prepend front matter to
//! each matched file that does not already carry one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use walkdir::WalkDir;

use crate::api::Source;
use crate::domain::PageNode;
use crate::export::report::REPORT_FILENAME;
use crate::infra::sanitize_filename;

/// Front matter block prepended to exported files.
#[derive(Debug, Clone, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub notion_id: String,
    pub created: String,
    pub last_edited: String,
    pub export_date: String,
}

impl FrontMatter {
    /// Serializes as a `---` fenced YAML block followed by a blank line.
    pub fn to_block(&self) -> String {
        let yaml = serde_yaml::to_string(self).expect("front matter serialization is infallible");
        format!("---\n{yaml}---\n\n")
    }
}

/// Statistics from one front matter pass.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatterStats {
    pub files_found: usize,
    pub files_updated: usize,
    pub files_skipped: usize,
    pub files_not_matched: usize,
}

/// Whether content already starts with a front matter fence.
pub fn has_front_matter(content: &str) -> bool {
    content.starts_with("---\n")
}

/// Maps every node in the forest to the file path the exporter wrote for
/// it, fetching page metadata along the way.
///
/// A node whose metadata cannot be fetched is skipped together with its
/// subtree; the files stay on disk and count as unmatched.
pub fn map_paths(
    source: &dyn Source,
    roots: &[PageNode],
    output_dir: &Path,
) -> HashMap<PathBuf, FrontMatter> {
    let mut mapping = HashMap::new();
    let export_date = Utc::now().format("%Y-%m-%d").to_string();
    for root in roots {
        map_node(source, root, output_dir, &export_date, &mut mapping);
    }
    mapping
}

fn map_node(
    source: &dyn Source,
    node: &PageNode,
    base: &Path,
    export_date: &str,
    mapping: &mut HashMap<PathBuf, FrontMatter>,
) {
    let page = match source.get_page(&node.id) {
        Ok(page) => page,
        Err(err) => {
            eprintln!("warning: could not fetch metadata for {}: {err}", node.id);
            return;
        }
    };

    let front = FrontMatter {
        title: page.title,
        notion_id: node.id.clone(),
        created: page
            .created_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string()),
        last_edited: page
            .last_edited_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string()),
        export_date: export_date.to_string(),
    };

    if node.children.is_empty() {
        let file_name = format!("{}.md", sanitize_filename(&node.title));
        mapping.insert(base.join(file_name), front);
    } else {
        let folder = base.join(sanitize_filename(&node.title));
        mapping.insert(folder.join("index.md"), front);
        for child in &node.children {
            map_node(source, child, &folder, export_date, mapping);
        }
    }
}

/// Prepends front matter to every matched `.md` file lacking one.
pub fn add_front_matter(
    source: &dyn Source,
    roots: &[PageNode],
    output_dir: &Path,
    dry_run: bool,
    verbose: bool,
) -> Result<FrontMatterStats> {
    let mapping = map_paths(source, roots, output_dir);
    let mut stats = FrontMatterStats::default();

    for entry in WalkDir::new(output_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }
        if path.file_name().and_then(|name| name.to_str()) == Some(REPORT_FILENAME) {
            continue;
        }

        stats.files_found += 1;

        match mapping.get(path) {
            Some(front) => match apply_to_file(path, front, dry_run) {
                Ok(true) => stats.files_updated += 1,
                Ok(false) => stats.files_skipped += 1,
                Err(err) => {
                    eprintln!("warning: {}: {err:#}", path.display());
                    stats.files_skipped += 1;
                }
            },
            None => {
                if verbose {
                    println!("not matched: {}", path.display());
                }
                stats.files_not_matched += 1;
            }
        }
    }

    Ok(stats)
}

/// Returns true when the file was (or would be) updated.
fn apply_to_file(path: &Path, front: &FrontMatter, dry_run: bool) -> Result<bool> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if has_front_matter(&content) {
        return Ok(false);
    }

    if dry_run {
        return Ok(true);
    }

    let updated = format!("{}{content}", front.to_block());
    std::fs::write(path, updated)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeSource;
    use crate::domain::ParentKind;
    use tempfile::TempDir;

    fn sample_front() -> FrontMatter {
        FrontMatter {
            title: "Notes".into(),
            notion_id: "p1".into(),
            created: "2024-01-01T00:00:00+00:00".into(),
            last_edited: "2024-02-01T00:00:00+00:00".into(),
            export_date: "2024-03-01".into(),
        }
    }

    #[test]
    fn block_is_fenced_yaml_with_trailing_blank_line() {
        let block = sample_front().to_block();
        assert!(block.starts_with("---\n"));
        assert!(block.ends_with("---\n\n"));
        assert!(block.contains("title: Notes"));
        assert!(block.contains("notion_id: p1"));
    }

    #[test]
    fn detects_existing_front_matter() {
        assert!(has_front_matter("---\ntitle: x\n---\n\nbody"));
        assert!(!has_front_matter("# Heading\n\nbody"));
        assert!(!has_front_matter(""));
    }

    #[test]
    fn maps_leaves_and_folders_to_exporter_paths() {
        let mut source = FakeSource::new();
        source.add_page("p1", "Parent", ParentKind::Workspace);
        source.add_page("p2", "Child", ParentKind::Page("p1".into()));

        let mut parent = PageNode::new("p1", "Parent", None, false);
        parent
            .children
            .push(PageNode::new("p2", "Child", Some("p1".into()), false));

        let out = Path::new("/export");
        let mapping = map_paths(&source, &[parent], out);

        assert_eq!(mapping.len(), 2);
        assert!(mapping.contains_key(&out.join("Parent").join("index.md")));
        assert!(mapping.contains_key(&out.join("Parent").join("Child.md")));
    }

    #[test]
    fn pass_updates_matched_files_and_counts_the_rest() {
        let temp = TempDir::new().unwrap();
        let mut source = FakeSource::new();
        source.add_page("p1", "Notes", ParentKind::Workspace);

        std::fs::write(temp.path().join("Notes.md"), "body\n").unwrap();
        std::fs::write(temp.path().join("Stray.md"), "stray\n").unwrap();
        std::fs::write(temp.path().join(REPORT_FILENAME), "report\n").unwrap();

        let roots = vec![PageNode::new("p1", "Notes", None, false)];
        let stats = add_front_matter(&source, &roots, temp.path(), false, false).unwrap();

        assert_eq!(
            stats,
            FrontMatterStats {
                files_found: 2,
                files_updated: 1,
                files_skipped: 0,
                files_not_matched: 1,
            }
        );

        let updated = std::fs::read_to_string(temp.path().join("Notes.md")).unwrap();
        assert!(updated.starts_with("---\n"));
        assert!(updated.ends_with("body\n"));
        // the report file is never touched
        let report = std::fs::read_to_string(temp.path().join(REPORT_FILENAME)).unwrap();
        assert_eq!(report, "report\n");
    }

    #[test]
    fn files_with_front_matter_are_skipped() {
        let temp = TempDir::new().unwrap();
        let mut source = FakeSource::new();
        source.add_page("p1", "Notes", ParentKind::Workspace);

        std::fs::write(temp.path().join("Notes.md"), "---\ntitle: x\n---\n\nbody").unwrap();

        let roots = vec![PageNode::new("p1", "Notes", None, false)];
        let stats = add_front_matter(&source, &roots, temp.path(), false, false).unwrap();

        assert_eq!(stats.files_updated, 0);
        assert_eq!(stats.files_skipped, 1);
    }

    #[test]
    fn dry_run_counts_but_does_not_write() {
        let temp = TempDir::new().unwrap();
        let mut source = FakeSource::new();
        source.add_page("p1", "Notes", ParentKind::Workspace);

        std::fs::write(temp.path().join("Notes.md"), "body\n").unwrap();

        let roots = vec![PageNode::new("p1", "Notes", None, false)];
        let stats = add_front_matter(&source, &roots, temp.path(), true, false).unwrap();

        assert_eq!(stats.files_updated, 1);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("Notes.md")).unwrap(),
            "body\n"
        );
    }
}
