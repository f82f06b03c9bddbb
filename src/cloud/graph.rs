use std::collections::HashMap;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Stack,
    Resource,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::Resource => "resource",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub image: String,
}

impl Node {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub label: Option<String>,
}

impl Link {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Clone, Debug)]
pub struct CloudGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    index_by_id: HashMap<String, usize>,
}

impl CloudGraph {
    pub(super) fn from_nodes(nodes: Vec<Node>, index_by_id: HashMap<String, usize>) -> Self {
        Self {
            nodes,
            links: Vec::new(),
            index_by_id,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn kinds(&self) -> Vec<NodeKind> {
        self.nodes.iter().map(|node| node.kind).collect()
    }

    pub fn stack_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Stack)
            .count()
    }

    /// Textual parallel-edge key, `source.id + "-" + target.id`.
    pub fn link_key(&self, link: &Link) -> String {
        format!(
            "{}-{}",
            self.nodes[link.source].id, self.nodes[link.target].id
        )
    }
}
