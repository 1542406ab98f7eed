use super::{EntryKind, TreeEntry};
use std::collections::HashMap;

/// Derive the file tree shown next to a frame from every selected file seen
/// so far. Folders are inferred from path segments; each level lists folders
/// before files, both alphabetically, in depth-first order.
pub fn build_tree(selected_files: &[String]) -> Vec<TreeEntry> {
    let mut nodes: HashMap<String, EntryKind> = HashMap::new();

    for file_path in selected_files {
        nodes.insert(file_path.clone(), EntryKind::File);
        let parts: Vec<&str> = file_path.split('/').collect();
        for i in 1..parts.len() {
            let folder_path = parts[..i].join("/");
            nodes.entry(folder_path).or_insert(EntryKind::Folder);
        }
    }

    let mut result = Vec::new();
    dfs(&nodes, "", &mut result);
    result
}

fn dfs(nodes: &HashMap<String, EntryKind>, parent: &str, out: &mut Vec<TreeEntry>) {
    let parent_depth = if parent.is_empty() {
        0
    } else {
        parent.split('/').count()
    };

    let mut folders = Vec::new();
    let mut files = Vec::new();
    for (path, kind) in nodes {
        if path.split('/').count() != parent_depth + 1 {
            continue;
        }
        if !parent.is_empty() && !path.starts_with(&format!("{parent}/")) {
            continue;
        }
        match kind {
            EntryKind::Folder => folders.push(path.clone()),
            EntryKind::File => files.push(path.clone()),
        }
    }
    folders.sort();
    files.sort();

    for folder in folders {
        out.push(TreeEntry {
            path: folder.clone(),
            kind: EntryKind::Folder,
        });
        dfs(nodes, &folder, out);
    }
    for file in files {
        out.push(TreeEntry {
            path: file,
            kind: EntryKind::File,
        });
    }
}
