use std::fmt::Write;

use bt::TreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_status: bool,
    pub show_uid: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_status: true,
            show_uid: false,
        }
    }
}

/// One line per node, children indented by a tab under their parent.
pub fn render(root: &dyn TreeNode, options: RenderOptions) -> String {
    let mut out = String::new();
    render_node(root, 0, options, &mut out);
    out
}

/// Structure only: node kinds and names.
pub fn pretty_repr(root: &dyn TreeNode) -> String {
    render(
        root,
        RenderOptions {
            show_status: false,
            show_uid: false,
        },
    )
}

fn render_node(node: &dyn TreeNode, depth: usize, options: RenderOptions, out: &mut String) {
    for _ in 0..depth {
        out.push('\t');
    }
    // Writing into a String cannot fail.
    let _ = write!(out, "{} {}", node.node_type(), node.name());
    if options.show_uid {
        let _ = write!(out, " #{}", node.uid());
    }
    if options.show_status {
        let _ = write!(out, " [{}]", node.status());
    }
    out.push('\n');

    for child in node.children() {
        render_node(&**child, depth + 1, options, out);
    }
}
