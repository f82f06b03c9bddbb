mod graph;
mod load;
mod parse;

pub use graph::{CloudGraph, Link, NodeKind};
#[cfg(test)]
pub use load::parse_graph;
pub use load::{LoadError, load_graph};
