//! Directory tree rendering.

use crate::domain::{DirectoryNode, TreeNode};

/// Render the children of `root` as a box-drawing tree, one line per node.
///
/// The root itself is not printed. The last sibling at each level uses `└─`
/// and its descendants get a blank continuation instead of `│`.
pub fn render_tree(root: &DirectoryNode) -> String {
    let mut out = String::new();
    walk_tree(&root.items, "", &mut out);
    out
}

fn walk_tree(items: &[TreeNode], prefix: &str, out: &mut String) {
    let total = items.len();
    for (idx, item) in items.iter().enumerate() {
        let is_last = idx + 1 == total;
        let connector = if is_last { "└─ " } else { "├─ " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(item.name());
        out.push('\n');

        if let TreeNode::Directory(dir) = item {
            let extension = if is_last { "   " } else { "│  " };
            walk_tree(&dir.items, &format!("{}{}", prefix, extension), out);
        }
    }
}
