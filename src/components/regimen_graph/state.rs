use log::{debug, info, trace};

use super::highlight::{Adjacency, Scene, resolve_scene};
use super::interaction::{GraphEvent, InteractionState, handle_event};
use super::layout::{LayoutConfig, layout};
use super::normalize::{NodeRecord, normalize};
use super::types::{GraphData, GraphLink, GraphNode};
use super::viewport::{ViewportMapper, ViewportTransform};

/// Whether viewport and interaction state survive a dataset replacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewRetention {
	/// Keep pan, zoom, drag and hover.
	#[default]
	Preserve,
	/// Return to the default viewport with nothing hovered or dragged.
	Reset,
}

/// All state owned by one regimen graph view.
///
/// Updates consume the state and return the next snapshot, so the host can
/// render exactly once per committed update.
#[derive(Clone, Debug)]
pub struct RegimenGraphState {
	/// Geometry the current layout was computed with.
	pub config: LayoutConfig,
	/// Current pan and zoom.
	pub transform: ViewportTransform,
	/// Gesture in progress and hover focus.
	pub interaction: InteractionState,
	records: Vec<NodeRecord>,
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
	adjacency: Adjacency,
}

impl RegimenGraphState {
	/// Normalizes and lays out `data` with a default viewport.
	pub fn new(data: &GraphData, config: LayoutConfig) -> Self {
		let mut state = Self {
			config,
			transform: ViewportTransform::default(),
			interaction: InteractionState::default(),
			records: Vec::new(),
			nodes: Vec::new(),
			links: Vec::new(),
			adjacency: Adjacency::default(),
		};
		state.load(data);
		state
	}

	/// Positioned nodes, conditions first.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// All links, including ones that do not resolve.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Whether a resolvable link joins `a` and `b`, in either direction.
	pub fn adjacent(&self, a: &str, b: &str) -> bool {
		self.adjacency.adjacent(a, b)
	}

	/// Replaces nodes and links wholesale and lays them out again.
	pub fn with_dataset(mut self, data: &GraphData, retention: ViewRetention) -> Self {
		self.load(data);
		match retention {
			ViewRetention::Preserve => self.interaction.retain_live(&self.nodes),
			ViewRetention::Reset => {
				self.transform = ViewportTransform::default();
				self.interaction = InteractionState::default();
			}
		}
		self
	}

	/// Changes the canvas height, which re-centers the layout. Dragged
	/// positions are discarded.
	pub fn with_height(mut self, height: f64) -> Self {
		if self.config.height != height {
			self.config.height = height;
			self.nodes = layout(&self.records, &self.config);
		}
		self
	}

	/// Applies one input event and returns the next snapshot.
	pub fn apply<M: ViewportMapper + ?Sized>(mut self, event: GraphEvent, mapper: &M) -> Self {
		trace!("event: {event:?}");
		handle_event(
			&mut self.interaction,
			&mut self.nodes,
			&mut self.transform,
			event,
			mapper,
		);
		self
	}

	/// Resolves the visual attributes for the current frame.
	pub fn scene(&self) -> Scene {
		resolve_scene(
			&self.nodes,
			&self.links,
			&self.adjacency,
			self.interaction.hovered_node_id(),
			self.transform.scale(),
		)
	}

	fn load(&mut self, data: &GraphData) {
		let graph = normalize(data);
		self.records = graph.nodes;
		self.links = graph.links;
		self.nodes = layout(&self.records, &self.config);
		self.adjacency = Adjacency::new(&self.nodes, &self.links);
		if self.nodes.is_empty() {
			debug!("empty dataset, nothing to render");
		} else {
			info!(
				"loaded regimen graph: {} nodes, {} links",
				self.nodes.len(),
				self.links.len()
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use super::*;
	use crate::components::regimen_graph::interaction::Gesture;
	use crate::components::regimen_graph::types::Point;
	use crate::components::regimen_graph::viewport::IdentityMapper;

	fn data(json: &str) -> GraphData {
		GraphData::from_json(json).unwrap()
	}

	fn star() -> GraphData {
		data(
			r#"{
				"nodes": [
					{"id": "C", "name": "Type 2 Diabetes", "group": "condition"},
					{"id": "D0", "name": "Metformin", "group": "drug"},
					{"id": "D1", "name": "Empagliflozin", "group": "drug"}
				],
				"links": [
					{"source": "C", "target": "D0"},
					{"source": {"id": "C"}, "target": {"id": "D1"}}
				]
			}"#,
		)
	}

	#[test]
	fn single_condition_without_links() {
		let state = RegimenGraphState::new(
			&data(r#"{"nodes": [{"id": "A", "group": "condition"}], "links": []}"#),
			LayoutConfig::default(),
		);
		assert_eq!(state.nodes()[0].position, Point::new(500.0, 400.0));
		assert!(state.scene().edges.is_empty());
	}

	#[test]
	fn star_places_drugs_on_outer_ring_and_renders_both_edges() {
		let state = RegimenGraphState::new(&star(), LayoutConfig::default());
		let center = state.config.center();
		let d0 = state.node("D0").unwrap().position;
		let d1 = state.node("D1").unwrap().position;

		assert!((d0.distance_to(center) - 300.0).abs() < 1e-9);
		assert!((d1.distance_to(center) - 330.0).abs() < 1e-9);
		assert!((d0.y - center.y).abs() < 1e-9 && d0.x > center.x);
		assert!(((d1.y - center.y).atan2(d1.x - center.x).abs() - PI).abs() < 1e-9);

		let scene = state.scene();
		assert_eq!(scene.edges.len(), 2);
		assert!(scene.edges.iter().all(|e| e.source_id == "C" && e.from == center));
	}

	#[test]
	fn dragging_a_node_keeps_incident_edges_attached() {
		let state = RegimenGraphState::new(&star(), LayoutConfig::default());
		let grab = state.transform.world_to_screen(state.node("D0").unwrap().position);
		let drop = Point::new(120.0, 80.0);
		let untouched: Vec<_> = state.nodes().iter().filter(|n| n.id != "D0").cloned().collect();

		let state = state
			.apply(GraphEvent::PointerDown(grab), &IdentityMapper)
			.apply(GraphEvent::PointerMove(drop), &IdentityMapper)
			.apply(GraphEvent::PointerUp, &IdentityMapper);

		let expected = state.transform.screen_to_world(drop);
		assert_eq!(state.node("D0").unwrap().position, expected);
		for node in &untouched {
			assert_eq!(state.node(&node.id), Some(node));
		}
		let edge = state.scene().edges.into_iter().find(|e| e.target_id == "D0").unwrap();
		assert_eq!(edge.to, expected);
	}

	#[test]
	fn dataset_replacement_can_preserve_or_reset_the_view() {
		let state = RegimenGraphState::new(&star(), LayoutConfig::default())
			.apply(GraphEvent::ZoomIn, &IdentityMapper)
			.apply(GraphEvent::Hover(Some("D1".into())), &IdentityMapper);

		let replacement = data(
			r#"{"nodes": [{"id": "C", "group": "condition"}, {"id": "D0", "group": "drug"}], "links": []}"#,
		);

		let preserved = state.clone().with_dataset(&replacement, ViewRetention::Preserve);
		assert!((preserved.transform.scale() - 1.0).abs() < 1e-12);
		assert_eq!(preserved.interaction.hovered, None);
		assert_eq!(preserved.nodes().len(), 2);

		let reset = state.with_dataset(&replacement, ViewRetention::Reset);
		assert_eq!(reset.transform, ViewportTransform::default());
		assert_eq!(reset.interaction.gesture, Gesture::Idle);
	}

	#[test]
	fn malformed_records_leave_the_rest_of_the_graph_drawn() {
		let state = RegimenGraphState::new(
			&data(
				r#"{
					"nodes": [
						{"id": "C", "group": "condition"},
						{"id": "D0", "group": "drug"},
						{"id": "X"}
					],
					"links": [
						{"source": "C", "target": "D0"},
						{"source": "C", "target": 7}
					]
				}"#,
			),
			LayoutConfig::default(),
		);
		let scene = state.scene();
		assert_eq!(scene.nodes.len(), 2);
		assert_eq!(scene.edges.len(), 1);
		assert_eq!(state.node("C").unwrap().position, state.config.center());
	}

	#[test]
	fn height_change_recenters_layout() {
		let state = RegimenGraphState::new(&star(), LayoutConfig::default()).with_height(600.0);
		assert_eq!(state.node("C").unwrap().position, Point::new(500.0, 300.0));
	}

	#[test]
	fn dataset_replacement_lays_out_against_updated_height() {
		let mut state = RegimenGraphState::new(&star(), LayoutConfig::default());
		state.config.height = 500.0;
		let state = state.with_dataset(&star(), ViewRetention::Preserve);
		assert_eq!(state.node("C").unwrap().position, Point::new(500.0, 250.0));
	}

	#[test]
	fn empty_dataset_renders_nothing() {
		let state = RegimenGraphState::new(&GraphData::default(), LayoutConfig::default());
		assert!(state.is_empty());
		assert!(state.scene().is_empty());
		let state = state.apply(GraphEvent::PointerDown(Point::new(1.0, 1.0)), &IdentityMapper);
		assert!(matches!(state.interaction.gesture, Gesture::Panning { .. }));
	}

	#[test]
	fn hover_dimming_is_symmetric_across_the_graph() {
		let state = RegimenGraphState::new(&star(), LayoutConfig::default());
		let ids: Vec<String> = state.nodes().iter().map(|n| n.id.clone()).collect();
		for a in &ids {
			let scene_a = state.clone().apply(GraphEvent::Hover(Some(a.clone())), &IdentityMapper).scene();
			for b in ids.iter().filter(|b| *b != a) {
				let scene_b = state.clone().apply(GraphEvent::Hover(Some(b.clone())), &IdentityMapper).scene();
				assert_eq!(scene_a.node(b).unwrap().dimmed, scene_b.node(a).unwrap().dimmed);
			}
		}
	}
}
