use std::collections::HashMap;

use serde::Deserialize;

use super::graph::{CloudGraph, Link, Node, NodeKind};
use super::load::{Endpoint, LoadError};

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawDocument {
    pub(super) nodes: Vec<RawNode>,
    #[serde(default)]
    pub(super) links: Vec<RawLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: NodeKind,
    pub(super) name: String,
    pub(super) image: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawLink {
    pub(super) source: String,
    pub(super) target: String,
    #[serde(default)]
    pub(super) label: Option<String>,
}

pub(super) fn resolve_document(document: RawDocument) -> Result<CloudGraph, LoadError> {
    if document.nodes.is_empty() {
        return Err(LoadError::EmptyGraph);
    }

    let mut index_by_id = HashMap::with_capacity(document.nodes.len());
    let mut nodes = Vec::with_capacity(document.nodes.len());
    for (index, raw) in document.nodes.into_iter().enumerate() {
        if index_by_id.insert(raw.id.clone(), index).is_some() {
            return Err(LoadError::DuplicateNode { id: raw.id });
        }
        nodes.push(Node {
            id: raw.id,
            kind: raw.kind,
            name: raw.name,
            image: raw.image,
        });
    }

    let mut graph = CloudGraph::from_nodes(nodes, index_by_id);
    let mut links = Vec::with_capacity(document.links.len());
    for (link_index, raw) in document.links.into_iter().enumerate() {
        let source = lookup(&graph, link_index, Endpoint::Source, raw.source)?;
        let target = lookup(&graph, link_index, Endpoint::Target, raw.target)?;
        links.push(Link {
            source,
            target,
            label: raw.label.filter(|label| !label.is_empty()),
        });
    }
    graph.links = links;

    Ok(graph)
}

fn lookup(
    graph: &CloudGraph,
    link: usize,
    endpoint: Endpoint,
    id: String,
) -> Result<usize, LoadError> {
    graph
        .index_of(&id)
        .ok_or(LoadError::BrokenReference { link, endpoint, id })
}
