use std::collections::HashSet;

use log::debug;

use super::types::{Category, GraphData, GraphLink};

/// A node record with its category resolved, not yet positioned.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
	pub id: String,
	pub display_name: String,
	pub category: Category,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedGraph {
	pub nodes: Vec<NodeRecord>,
	pub links: Vec<GraphLink>,
}

/// Flattens a raw dataset into typed records.
///
/// Nodes with a missing or unknown group are dropped, as are repeated ids
/// (first one wins). Links naming two ids are kept even if an id does not
/// resolve; they stay inert downstream. Links with an endpoint that names no
/// id at all are dropped here.
pub fn normalize(data: &GraphData) -> NormalizedGraph {
	let mut seen = HashSet::with_capacity(data.nodes.len());
	let mut nodes = Vec::with_capacity(data.nodes.len());
	let (mut unknown_group, mut duplicates) = (0usize, 0usize);

	for raw in &data.nodes {
		let Some(category) = raw.group.as_deref().and_then(Category::parse) else {
			unknown_group += 1;
			continue;
		};
		if !seen.insert(raw.id.as_str()) {
			duplicates += 1;
			continue;
		}
		nodes.push(NodeRecord {
			id: raw.id.clone(),
			display_name: raw.name.clone().unwrap_or_else(|| raw.id.clone()),
			category,
		});
	}

	if unknown_group > 0 || duplicates > 0 {
		debug!("normalize: dropped {unknown_group} nodes with unknown group, {duplicates} duplicate ids");
	}

	let links = data
		.links
		.iter()
		.filter_map(|link| Some(GraphLink::new(link.source.id()?, link.target.id()?)))
		.collect();

	NormalizedGraph { nodes, links }
}
