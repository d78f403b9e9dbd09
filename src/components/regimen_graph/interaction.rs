use log::debug;

use super::types::{GraphNode, Point};
use super::viewport::{ViewportMapper, ViewportTransform, ZOOM_STEP};

/// Pointer gesture in progress. At most one node is dragged at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	/// A node follows the pointer.
	Dragging {
		/// Id of the dragged node.
		node_id: String,
	},
	/// Background drag.
	Panning {
		/// Surface point where the drag started.
		anchor: Point,
		/// Pan offset when the drag started.
		start_offset: Point,
	},
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	/// Gesture in progress.
	pub gesture: Gesture,
	/// Hover focus, always a live node id.
	pub hovered: Option<String>,
}

impl InteractionState {
	pub fn dragged_node_id(&self) -> Option<&str> {
		match &self.gesture {
			Gesture::Dragging { node_id } => Some(node_id),
			_ => None,
		}
	}

	pub fn hovered_node_id(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Drops references to nodes that are not in `nodes`.
	pub fn retain_live(&mut self, nodes: &[GraphNode]) {
		let live = |id: &str| nodes.iter().any(|n| n.id == id);
		if self.hovered.as_deref().is_some_and(|id| !live(id)) {
			self.hovered = None;
		}
		if self.dragged_node_id().is_some_and(|id| !live(id)) {
			self.gesture = Gesture::Idle;
		}
	}
}

/// Input accepted by the visualization. Pointer positions are in host screen
/// coordinates and go through a [`ViewportMapper`].
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// Button pressed; grabs the node under the pointer or starts a pan.
	PointerDown(Point),
	/// Pointer moved over the canvas.
	PointerMove(Point),
	/// Button released.
	PointerUp,
	/// Pointer left the canvas.
	PointerLeave,
	/// Wheel scrolled by `delta_y`.
	Wheel {
		/// Vertical wheel delta; positive scrolls forward.
		delta_y: f64,
	},
	/// Explicit hover from a host that does its own hit testing.
	Hover(Option<String>),
	/// Toolbar zoom in.
	ZoomIn,
	/// Toolbar zoom out.
	ZoomOut,
	/// Toolbar reset of pan and zoom.
	Reset,
}

/// Index of the topmost node under `world`. Later nodes draw on top.
pub fn node_at(nodes: &[GraphNode], world: Point) -> Option<usize> {
	nodes.iter().rposition(|node| node.contains(world))
}

/// Applies one event to the interaction state, node positions and transform.
pub fn handle_event<M: ViewportMapper + ?Sized>(
	interaction: &mut InteractionState,
	nodes: &mut [GraphNode],
	transform: &mut ViewportTransform,
	event: GraphEvent,
	mapper: &M,
) {
	match event {
		GraphEvent::PointerDown(screen) => {
			if interaction.gesture != Gesture::Idle {
				return;
			}
			let world = mapper.screen_to_world(screen, transform);
			interaction.gesture = match node_at(nodes, world) {
				Some(idx) => {
					debug!("drag start: {}", nodes[idx].id);
					Gesture::Dragging {
						node_id: nodes[idx].id.clone(),
					}
				}
				None => Gesture::Panning {
					anchor: mapper.to_surface(screen),
					start_offset: Point::new(transform.offset_x, transform.offset_y),
				},
			};
		}
		GraphEvent::PointerMove(screen) => match &interaction.gesture {
			Gesture::Dragging { node_id } => {
				let world = mapper.screen_to_world(screen, transform);
				if let Some(node) = nodes.iter_mut().find(|n| n.id == *node_id) {
					node.position = world;
				}
			}
			Gesture::Panning {
				anchor,
				start_offset,
			} => {
				let surface = mapper.to_surface(screen);
				transform.offset_x = start_offset.x + (surface.x - anchor.x);
				transform.offset_y = start_offset.y + (surface.y - anchor.y);
			}
			Gesture::Idle => {
				let world = mapper.screen_to_world(screen, transform);
				interaction.hovered = node_at(nodes, world).map(|idx| nodes[idx].id.clone());
			}
		},
		GraphEvent::PointerUp => end_gesture(interaction),
		GraphEvent::PointerLeave => {
			end_gesture(interaction);
			interaction.hovered = None;
		}
		GraphEvent::Wheel { delta_y } => transform.zoom_by_wheel(delta_y),
		GraphEvent::Hover(target) => {
			if interaction.gesture == Gesture::Idle {
				interaction.hovered = target.filter(|id| nodes.iter().any(|n| n.id == *id));
			}
		}
		GraphEvent::ZoomIn => transform.zoom_by(ZOOM_STEP),
		GraphEvent::ZoomOut => transform.zoom_by(-ZOOM_STEP),
		GraphEvent::Reset => {
			debug!("viewport reset");
			transform.reset();
		}
	}
}

fn end_gesture(interaction: &mut InteractionState) {
	if let Gesture::Dragging { node_id } = &interaction.gesture {
		debug!("drag end: {node_id}");
	}
	interaction.gesture = Gesture::Idle;
}
