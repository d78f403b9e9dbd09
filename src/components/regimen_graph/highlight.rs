use std::collections::{HashMap, HashSet};

use super::types::{Category, GraphLink, GraphNode, Point};

/// Zoom above which drug labels are shown when nothing is hovered.
pub const LABEL_ZOOM_THRESHOLD: f64 = 1.2;
pub const LABEL_MAX_CHARS: usize = 25;
pub const LABEL_TRUNCATED_CHARS: usize = 23;
pub const LABEL_GAP: f64 = 10.0;
pub const GLOW_PADDING: f64 = 10.0;
pub const GLOW_OPACITY: f64 = 0.2;
pub const DIMMED_NODE_OPACITY: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// CSS stroke color.
	pub stroke: &'static str,
	/// Line width in world units.
	pub width: f64,
	/// Stroke alpha.
	pub opacity: f64,
}

pub const EDGE_STYLE: EdgeStyle = EdgeStyle {
	stroke: "#cbd5e1",
	width: 2.0,
	opacity: 0.6,
};

pub const DIMMED_EDGE_STYLE: EdgeStyle = EdgeStyle {
	stroke: "#e2e8f0",
	width: 1.0,
	opacity: 0.2,
};

/// Unordered node pairs joined by at least one resolvable link.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
	pairs: HashSet<(String, String)>,
}

impl Adjacency {
	pub fn new(nodes: &[GraphNode], links: &[GraphLink]) -> Self {
		let live: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let pairs = links
			.iter()
			.filter(|l| live.contains(l.source_id.as_str()) && live.contains(l.target_id.as_str()))
			.map(|l| ordered(&l.source_id, &l.target_id))
			.collect();
		Self { pairs }
	}

	pub fn adjacent(&self, a: &str, b: &str) -> bool {
		let (x, y) = if a <= b { (a, b) } else { (b, a) };
		self.pairs.contains(&(x.to_owned(), y.to_owned()))
	}
}

fn ordered(a: &str, b: &str) -> (String, String) {
	if a <= b {
		(a.to_owned(), b.to_owned())
	} else {
		(b.to_owned(), a.to_owned())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelVisual {
	/// Possibly truncated display name.
	pub text: String,
	/// Bottom center of the text.
	pub anchor: Point,
	/// Condition labels are drawn larger and darker.
	pub emphasized: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	/// Node id.
	pub id: String,
	/// Current center in world space.
	pub position: Point,
	/// Circle radius.
	pub radius: f64,
	/// CSS fill color.
	pub color: &'static str,
	/// Not the hover focus or one of its neighbours.
	pub dimmed: bool,
	/// Fill alpha derived from `dimmed`.
	pub opacity: f64,
	/// Glow halo radius, set only for the hovered node.
	pub glow_radius: Option<f64>,
	/// Label to draw, if visible.
	pub label: Option<LabelVisual>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
	/// Id of the source node.
	pub source_id: String,
	/// Id of the target node.
	pub target_id: String,
	/// Current source position.
	pub from: Point,
	/// Current target position.
	pub to: Point,
	/// Neither end is the hover focus.
	pub dimmed: bool,
	/// Stroke derived from `dimmed`.
	pub style: EdgeStyle,
}

/// Everything the renderer needs for one frame, in world coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// One entry per link whose ends both resolve, drawn first.
	pub edges: Vec<EdgeVisual>,
	/// Nodes in draw order.
	pub nodes: Vec<NodeVisual>,
}

impl Scene {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&NodeVisual> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

pub fn label_visible(category: Category, hovered: bool, hover_active: bool, scale: f64) -> bool {
	category == Category::Condition || hovered || (!hover_active && scale > LABEL_ZOOM_THRESHOLD)
}

/// Full name when hovered, otherwise cut to 23 characters plus `...` once it
/// exceeds 25.
pub fn label_text(name: &str, hovered: bool) -> String {
	if hovered || name.chars().count() <= LABEL_MAX_CHARS {
		return name.to_owned();
	}
	let mut text: String = name.chars().take(LABEL_TRUNCATED_CHARS).collect();
	text.push_str("...");
	text
}

/// Derives dimming, glow and labels from the hover focus and zoom level.
///
/// Links with an endpoint that is not a live node produce no edge.
pub fn resolve_scene(
	nodes: &[GraphNode],
	links: &[GraphLink],
	adjacency: &Adjacency,
	hovered: Option<&str>,
	scale: f64,
) -> Scene {
	let by_id: HashMap<&str, &GraphNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	let hover_active = hovered.is_some();

	let edges = links
		.iter()
		.filter_map(|link| {
			let source = by_id.get(link.source_id.as_str())?;
			let target = by_id.get(link.target_id.as_str())?;
			let dimmed = hovered.is_some_and(|h| !link.touches(h));
			Some(EdgeVisual {
				source_id: link.source_id.clone(),
				target_id: link.target_id.clone(),
				from: source.position,
				to: target.position,
				dimmed,
				style: if dimmed { DIMMED_EDGE_STYLE } else { EDGE_STYLE },
			})
		})
		.collect();

	let nodes = nodes
		.iter()
		.map(|node| {
			let is_hovered = hovered == Some(node.id.as_str());
			let dimmed = hovered.is_some_and(|h| h != node.id && !adjacency.adjacent(h, &node.id));
			let radius = node.radius();
			let label = label_visible(node.category, is_hovered, hover_active, scale).then(|| LabelVisual {
				text: label_text(&node.display_name, is_hovered),
				anchor: Point::new(node.position.x, node.position.y - (radius + LABEL_GAP)),
				emphasized: node.category == Category::Condition,
			});
			NodeVisual {
				id: node.id.clone(),
				position: node.position,
				radius,
				color: node.color(),
				dimmed,
				opacity: if dimmed { DIMMED_NODE_OPACITY } else { 1.0 },
				glow_radius: is_hovered.then_some(radius + GLOW_PADDING),
				label,
			}
		})
		.collect();

	Scene { edges, nodes }
}
