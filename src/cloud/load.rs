use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::graph::CloudGraph;
use super::parse::{RawDocument, resolve_document};

#[cfg(test)]
const IN_MEMORY_LOCATION: &str = "<memory>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("unparseable: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("graph document {location} is {source}")]
    Fetch {
        location: String,
        #[source]
        source: FetchFailure,
    },
    #[error("graph document contains no nodes")]
    EmptyGraph,
    #[error("link #{link} has unknown {endpoint} node id {id:?}")]
    BrokenReference {
        link: usize,
        endpoint: Endpoint,
        id: String,
    },
    #[error("node id {id:?} appears more than once")]
    DuplicateNode { id: String },
}

impl LoadError {
    fn fetch(location: &str, source: impl Into<FetchFailure>) -> Self {
        Self::Fetch {
            location: location.to_owned(),
            source: source.into(),
        }
    }
}

pub fn load_graph(location: &Path) -> Result<CloudGraph, LoadError> {
    let location_text = location.display().to_string();
    let raw =
        fs::read_to_string(location).map_err(|error| LoadError::fetch(&location_text, error))?;
    let graph = parse_document(&raw, &location_text)?;
    info!(
        location = %location_text,
        nodes = graph.node_count(),
        links = graph.link_count(),
        "resolved graph document"
    );
    Ok(graph)
}

#[cfg(test)]
pub fn parse_graph(raw: &str) -> Result<CloudGraph, LoadError> {
    parse_document(raw, IN_MEMORY_LOCATION)
}

fn parse_document(raw: &str, location: &str) -> Result<CloudGraph, LoadError> {
    let document: RawDocument =
        serde_json::from_str(raw).map_err(|error| LoadError::fetch(location, error))?;
    resolve_document(document)
}
