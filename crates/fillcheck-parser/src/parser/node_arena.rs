//! NodeArena creation methods.

use super::base::NodeIndex;
use super::node::*;
use std::sync::Arc;

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        NodeArena {
            nodes: Vec::with_capacity(safe_capacity),
            extended_info: Vec::with_capacity(safe_capacity),
            source_text: Arc::from(""),
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.extended_info.clear();
        self.source_text = Arc::from("");
    }

    pub fn set_source_text(&mut self, text: Arc<str>) {
        self.source_text = text;
    }

    /// Full text of the parsed file.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Append a node and record it as the parent of its children.
    ///
    /// Children are always created before their parent, so every child index
    /// is already valid here.
    pub fn add_node(&mut self, pos: u32, end: u32, flags: u16, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        data.for_each_child(|child| {
            if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
                info.parent = index;
            }
        });
        self.nodes.push(Node {
            pos,
            end,
            flags,
            data,
        });
        self.extended_info.push(ExtendedNodeInfo::default());
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
