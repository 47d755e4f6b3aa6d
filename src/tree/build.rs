use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::classify::{classify_dir, classify_handler};
use super::types::{Group, RouteLeaf, RouteTree};
use crate::error::{GenerateError, Result, StructureError};

/// Walk `api_root` and build the route tree.
///
/// Entries are visited depth-first with siblings sorted by name, so the
/// resulting tree does not depend on the order the filesystem lists them in.
/// Symbolic links are followed; a link that loops back to an ancestor is an
/// error. Hidden entries (leading `.`) are skipped with their subtree.
///
/// # Errors
///
/// - [`GenerateError::Filesystem`] if the root is missing, not a directory, or
///   any entry cannot be read
/// - [`GenerateError::SymlinkCycle`] on a link loop
/// - [`GenerateError::Structure`] for malformed names, two dynamic siblings,
///   a parameter repeated along one path, or two handlers for the same
///   method in one directory
pub fn build_tree(api_root: &Path) -> Result<RouteTree> {
    let meta = std::fs::metadata(api_root).map_err(|source| GenerateError::Filesystem {
        path: api_root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(GenerateError::Filesystem {
            path: api_root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    // stack[d] is the open group at depth d; the root sits at index 0.
    let mut stack: Vec<(PathBuf, Group)> = vec![(api_root.to_path_buf(), Group::default())];

    let walker = WalkDir::new(api_root)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        let depth = entry.depth();
        while stack.len() > depth {
            close_group(&mut stack)?;
        }

        let is_dir = entry.file_type().is_dir();
        let Some(name) = entry.file_name().to_str() else {
            if is_dir {
                return Err(StructureError::NonUtf8Name {
                    path: entry.path().to_path_buf(),
                }
                .into());
            }
            debug!(file = %entry.path().display(), "ignoring non-UTF-8 file name");
            continue;
        };

        if is_dir {
            let segment = classify_dir(name, entry.path())?;
            let (_, parent) = stack.last().ok_or_else(|| unbalanced(entry.path()))?;
            if let Some(param) = segment.param_name() {
                if parent.segments.iter().any(|s| s.param_name() == Some(param)) {
                    return Err(StructureError::DuplicateParameter {
                        path: entry.path().to_path_buf(),
                        param: param.to_string(),
                    }
                    .into());
                }
            }
            let mut segments = parent.segments.clone();
            segments.push(segment);
            debug!(path = %entry.path().display(), "group");
            stack.push((
                entry.path().to_path_buf(),
                Group {
                    segments,
                    is_top_level: depth == 1,
                    ..Group::default()
                },
            ));
        } else if let Some(method) = classify_handler(name) {
            let (dir, group) = stack.last_mut().ok_or_else(|| unbalanced(entry.path()))?;
            if group.leaves.iter().any(|l| l.method == method) {
                return Err(StructureError::DuplicateMethod {
                    path: dir.clone(),
                    method,
                }
                .into());
            }
            debug!(%method, file = %entry.path().display(), "handler");
            let source_package_path = group.relative_path();
            group.leaves.push(RouteLeaf {
                method,
                exported_symbol: method.exported_symbol().to_string(),
                source_package_path,
                file: entry.path().to_path_buf(),
            });
        } else {
            debug!(file = %entry.path().display(), "ignoring non-handler file");
        }
    }

    while stack.len() > 1 {
        close_group(&mut stack)?;
    }
    let (_, mut root) = stack.pop().ok_or_else(|| unbalanced(api_root))?;
    sort_leaves(&mut root);

    let tree = RouteTree { root };
    info!(
        root = %api_root.display(),
        groups = tree.top_level_groups().count(),
        routes = tree.route_count(),
        "built route tree"
    );
    Ok(tree)
}

/// Pop the innermost group and attach it to its parent.
fn close_group(stack: &mut Vec<(PathBuf, Group)>) -> Result<()> {
    let (path, group) = stack.pop().ok_or_else(|| unbalanced(Path::new("")))?;
    let (parent_path, parent) = stack.last_mut().ok_or_else(|| unbalanced(&path))?;

    if let Some(param) = group.segments.last().and_then(|s| s.param_name()) {
        if let Some(existing) = parent
            .children
            .values()
            .find_map(|c| c.segments.last().and_then(|s| s.param_name()))
        {
            return Err(StructureError::AmbiguousDynamic {
                path: parent_path.clone(),
                first: existing.to_string(),
                second: param.to_string(),
            }
            .into());
        }
    }

    parent.children.insert(group.name().to_string(), group);
    Ok(())
}

fn sort_leaves(group: &mut Group) {
    group.leaves.sort_by_key(|l| l.method);
    for child in group.children.values_mut() {
        sort_leaves(child);
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with('.'))
}

fn walk_error(err: walkdir::Error) -> GenerateError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    if err.loop_ancestor().is_some() {
        return GenerateError::SymlinkCycle { path };
    }
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
    GenerateError::Filesystem { path, source }
}

fn unbalanced(path: &Path) -> GenerateError {
    GenerateError::Filesystem {
        path: path.to_path_buf(),
        source: std::io::Error::other("directory walk left the group stack unbalanced"),
    }
}
