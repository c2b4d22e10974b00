//! Layered layout used when a tree document is inflated into a graph.
//!
//! No layout solver is involved: a node's width is the sum of its children's
//! widths plus the gaps between them, clamped to the leaf width, and every
//! depth level sits one row gap below its parent. Siblings therefore never
//! overlap.

use crate::graph::{Edge, Node, NodeId, NodeType, Position, ROOT_NODE_ID};
use crate::tree::TreeNode;
use serde::{Deserialize, Serialize};

/// Geometry used by the tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Gap between sibling subtrees (and between top-level roots)
    pub horizontal_gap: f64,
    /// Distance between depth levels
    pub vertical_gap: f64,
    /// Width reserved for a leaf node
    pub leaf_width: f64,
    /// Height reserved for a leaf node
    pub leaf_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            horizontal_gap: 220.0,
            vertical_gap: 140.0,
            leaf_width: 180.0,
            leaf_height: 56.0,
        }
    }
}

/// Bounding box of a laid out subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

/// Id for the node at `path` (`"0"`, `"0-2"`, `"1-0-3"`, ...).
///
/// An ORGANIZATION at the very first root position becomes the root node.
pub fn node_id_for_path(path: &str, node_type: NodeType) -> NodeId {
    if path == "0" && node_type == NodeType::Organization {
        ROOT_NODE_ID.to_string()
    } else {
        format!("node-{path}")
    }
}

/// Accumulates nodes and edges during a pre-order walk.
pub(crate) struct Placer<'o> {
    options: &'o LayoutOptions,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

impl<'o> Placer<'o> {
    pub(crate) fn new(options: &'o LayoutOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Lay out every root left to right.
    pub(crate) fn place_roots(&mut self, roots: &[TreeNode]) {
        let mut x = 0.0;
        for (index, root) in roots.iter().enumerate() {
            let extent = self.place(root, x, &index.to_string());
            x += extent.width + self.options.horizontal_gap;
        }
    }

    /// Place one subtree in pre-order with an explicit stack of open nodes.
    fn place(&mut self, root: &TreeNode, x: f64, path: &str) -> Extent {
        let mut stack = vec![self.open(root, x, 0.0, path.to_string())];

        while let Some(top) = stack.last_mut() {
            let tree = top.tree;
            if let Some(child) = tree.children.get(top.next_child) {
                let child_path = format!("{}-{}", top.path, top.next_child);
                let child_x = top.x + top.total_width;
                let child_y = top.y + self.options.vertical_gap;
                top.next_child += 1;
                let frame = self.open(child, child_x, child_y, child_path);
                stack.push(frame);
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let extent = self.close(&done);
            match stack.last_mut() {
                Some(parent) => {
                    self.edges.push(Edge::new(parent.id.clone(), done.id));
                    parent.total_width += extent.width + self.options.horizontal_gap;
                    parent.max_height = parent.max_height.max(extent.height);
                }
                None => return extent,
            }
        }

        self.leaf_extent()
    }

    fn open<'t>(&mut self, tree: &'t TreeNode, x: f64, y: f64, path: String) -> OpenNode<'t> {
        let id = node_id_for_path(&path, tree.node_type);
        let mut node = Node::new(id.clone(), tree.data(), Position::new(x, y));
        if node.is_root() {
            node.draggable = false;
        }
        self.nodes.push(node);

        OpenNode {
            tree,
            id,
            path,
            x,
            y,
            next_child: 0,
            total_width: 0.0,
            max_height: 0.0,
        }
    }

    fn close(&self, node: &OpenNode<'_>) -> Extent {
        if node.tree.children.is_empty() {
            return self.leaf_extent();
        }
        Extent {
            width: (node.total_width - self.options.horizontal_gap).max(self.options.leaf_width),
            height: self.options.vertical_gap + node.max_height,
        }
    }

    fn leaf_extent(&self) -> Extent {
        Extent {
            width: self.options.leaf_width,
            height: self.options.leaf_height,
        }
    }
}

/// A placed node whose children are still being laid out.
struct OpenNode<'t> {
    tree: &'t TreeNode,
    id: NodeId,
    path: String,
    x: f64,
    y: f64,
    next_child: usize,
    total_width: f64,
    max_height: f64,
}
