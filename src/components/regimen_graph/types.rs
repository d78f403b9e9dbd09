use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DatasetError;

/// A point in either surface (screen) or world (graph) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate, growing rightwards.
	pub x: f64,
	/// Vertical coordinate, growing downwards as on a canvas.
	pub y: f64,
}

impl Point {
	/// Creates a point from its coordinates.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance between two points in the same space.
	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Layout tier of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	/// Hub node on the inner ring.
	Condition,
	/// Satellite node on the outer ring.
	Drug,
}

impl Category {
	/// Parses a wire `group`; anything other than `condition`/`drug` is `None`.
	pub fn parse(group: &str) -> Option<Self> {
		match group {
			"condition" => Some(Self::Condition),
			"drug" => Some(Self::Drug),
			_ => None,
		}
	}

	pub fn radius(self) -> f64 {
		match self {
			Self::Condition => 20.0,
			Self::Drug => 8.0,
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			Self::Condition => "#0f172a",
			Self::Drug => "#10b981",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Condition => "condition",
			Self::Drug => "drug",
		})
	}
}

/// A link endpoint as it arrives on the wire: either a bare id or an
/// already-resolved node object carrying an `id`. Anything else decodes as
/// `Other` and names no node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkEndpoint {
	/// Bare node id.
	Id(String),
	/// Node object carrying an `id`.
	Node {
		/// Id of the referenced node.
		id: String,
	},
	/// Any other JSON value.
	Other(serde_json::Value),
}

impl LinkEndpoint {
	/// The referenced node id, if the endpoint names one.
	pub fn id(&self) -> Option<&str> {
		match self {
			Self::Id(id) | Self::Node { id } => Some(id),
			Self::Other(_) => None,
		}
	}
}

impl From<&str> for LinkEndpoint {
	fn from(id: &str) -> Self {
		Self::Id(id.to_owned())
	}
}

/// Node record as it arrives on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
	/// Unique node id.
	pub id: String,
	/// Display name; the id is shown when absent.
	#[serde(default)]
	pub name: Option<String>,
	/// `condition` or `drug`; other values leave the node out of the graph.
	#[serde(default)]
	pub group: Option<String>,
}

/// Link record as it arrives on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLink {
	/// One end of the link.
	pub source: LinkEndpoint,
	/// The other end of the link.
	pub target: LinkEndpoint,
}

/// Graph dataset as produced by the regimen graph builder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Node records in wire order.
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	/// Link records in wire order.
	#[serde(default)]
	pub links: Vec<RawLink>,
}

impl GraphData {
	/// Decodes the `{nodes, links}` wire shape. Incomplete records still decode.
	pub fn from_json(json: &str) -> Result<Self, DatasetError> {
		Ok(serde_json::from_str(json)?)
	}

	/// True when there are no nodes to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// A positioned node owned by the visualization state.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique id within the dataset.
	pub id: String,
	/// Label text before truncation.
	pub display_name: String,
	/// Layout tier, which also fixes radius and color.
	pub category: Category,
	/// Center in world space.
	pub position: Point,
}

impl GraphNode {
	pub fn radius(&self) -> f64 {
		self.category.radius()
	}

	pub fn color(&self) -> &'static str {
		self.category.color()
	}

	pub fn contains(&self, world: Point) -> bool {
		self.position.distance_to(world) <= self.radius()
	}
}

/// A link reduced to plain endpoint ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphLink {
	/// Id of the source node.
	pub source_id: String,
	/// Id of the target node.
	pub target_id: String,
}

impl GraphLink {
	pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
		Self {
			source_id: source_id.into(),
			target_id: target_id.into(),
		}
	}

	pub fn touches(&self, id: &str) -> bool {
		self.source_id == id || self.target_id == id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_accept_bare_ids_and_objects() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{"id": "Hypertension", "name": "Hypertension", "group": "condition"},
					{"id": "DB00722", "name": "Lisinopril", "group": "drug", "toxicity": 0.2}
				],
				"links": [
					{"source": "Hypertension", "target": {"id": "DB00722", "x": 1.5}, "value": 1}
				]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links[0].source, LinkEndpoint::Id("Hypertension".into()));
		assert_eq!(data.links[0].target.id(), Some("DB00722"));
	}

	#[test]
	fn incomplete_records_still_decode() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{"id": "C", "group": "condition"},
					{"id": "D0", "group": "drug"},
					{"id": "X"}
				],
				"links": [
					{"source": "C", "target": "D0"},
					{"source": "C", "target": 7},
					{"source": {"name": "no id"}, "target": null}
				]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes[2].group, None);
		assert_eq!(data.links.len(), 3);
		assert_eq!(data.links[1].target, LinkEndpoint::Other(serde_json::json!(7)));
		assert_eq!(data.links[1].target.id(), None);
		assert_eq!(data.links[2].source.id(), None);
	}

	#[test]
	fn missing_collections_decode_as_empty() {
		let data = GraphData::from_json("{}").unwrap();
		assert!(data.is_empty());
		assert!(data.links.is_empty());
	}

	#[test]
	fn malformed_json_is_reported() {
		assert!(GraphData::from_json("{\"nodes\": 3}").is_err());
	}

	#[test]
	fn category_fixes_radius_and_color() {
		assert_eq!(Category::parse("condition"), Some(Category::Condition));
		assert_eq!(Category::parse("enzyme"), None);
		assert_eq!(Category::Condition.radius(), 20.0);
		assert_eq!(Category::Drug.radius(), 8.0);
		assert_eq!(Category::Drug.color(), "#10b981");
	}
}
