use std::f64::consts::PI;

use serde::Deserialize;

use super::normalize::NodeRecord;
use super::types::{Category, GraphNode, Point};

/// Fixed logical canvas width.
pub const CANVAS_WIDTH: f64 = 1000.0;
/// Canvas height used when the host does not pass one.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Geometry of the two-tier radial layout.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Logical canvas width.
	pub width: f64,
	/// Logical canvas height.
	pub height: f64,
	/// Inner ring radius, used when there is more than one condition.
	pub condition_ring_radius: f64,
	/// Outer ring radius for even-indexed drugs.
	pub drug_ring_radius: f64,
	/// Extra radius for odd-indexed drugs.
	pub drug_stagger: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			width: CANVAS_WIDTH,
			height: DEFAULT_CANVAS_HEIGHT,
			condition_ring_radius: 80.0,
			drug_ring_radius: 300.0,
			drug_stagger: 30.0,
		}
	}
}

impl LayoutConfig {
	pub fn with_height(height: f64) -> Self {
		Self {
			height,
			..Self::default()
		}
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

fn on_ring(center: Point, radius: f64, angle: f64) -> Point {
	Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Places conditions on an inner ring and drugs on a staggered outer ring.
///
/// Placement depends only on category and ordinal within the category, so
/// the same input order always yields the same coordinates. Output lists all
/// conditions first, then all drugs.
pub fn layout(records: &[NodeRecord], config: &LayoutConfig) -> Vec<GraphNode> {
	let center = config.center();
	let (conditions, drugs): (Vec<_>, Vec<_>) =
		records.iter().partition(|r| r.category == Category::Condition);

	let n = conditions.len();
	let placed_conditions = conditions.into_iter().enumerate().map(|(i, record)| {
		let angle = (i as f64 / n as f64) * 2.0 * PI;
		let radius = if n == 1 { 0.0 } else { config.condition_ring_radius };
		positioned(record, on_ring(center, radius, angle))
	});

	let m = drugs.len();
	let placed_drugs = drugs.into_iter().enumerate().map(|(i, record)| {
		let angle = (i as f64 / m as f64) * 2.0 * PI;
		let stagger = if i % 2 == 0 { 0.0 } else { config.drug_stagger };
		positioned(record, on_ring(center, config.drug_ring_radius + stagger, angle))
	});

	placed_conditions.chain(placed_drugs).collect()
}

fn positioned(record: &NodeRecord, position: Point) -> GraphNode {
	GraphNode {
		id: record.id.clone(),
		display_name: record.display_name.clone(),
		category: record.category,
		position,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn record(id: &str, category: Category) -> NodeRecord {
		NodeRecord {
			id: id.into(),
			display_name: id.into(),
			category,
		}
	}

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
	}

	#[test]
	fn single_condition_sits_at_center() {
		let nodes = layout(&[record("A", Category::Condition)], &LayoutConfig::default());
		assert_eq!(nodes[0].position, Point::new(500.0, 400.0));
	}

	#[test]
	fn drugs_alternate_stagger_on_outer_ring() {
		let config = LayoutConfig::default();
		let nodes = layout(
			&[
				record("C", Category::Condition),
				record("D0", Category::Drug),
				record("D1", Category::Drug),
			],
			&config,
		);
		let center = config.center();
		assert!(close(nodes[1].position, Point::new(center.x + 300.0, center.y)));
		assert!(close(nodes[2].position, Point::new(center.x - 330.0, center.y)));
		assert!((nodes[1].position.distance_to(center) - 300.0).abs() < EPS);
		assert!((nodes[2].position.distance_to(center) - 330.0).abs() < EPS);
	}

	#[test]
	fn multiple_conditions_use_inner_ring() {
		let config = LayoutConfig::with_height(600.0);
		let nodes = layout(
			&[
				record("C0", Category::Condition),
				record("C1", Category::Condition),
				record("C2", Category::Condition),
			],
			&config,
		);
		for node in &nodes {
			assert!((node.position.distance_to(config.center()) - 80.0).abs() < EPS);
		}
		assert!(close(nodes[0].position, Point::new(580.0, 300.0)));
	}

	#[test]
	fn conditions_come_first_and_keep_relative_order() {
		let nodes = layout(
			&[
				record("D0", Category::Drug),
				record("C0", Category::Condition),
				record("D1", Category::Drug),
				record("C1", Category::Condition),
			],
			&LayoutConfig::default(),
		);
		let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["C0", "C1", "D0", "D1"]);
	}

	#[test]
	fn layout_is_reproducible() {
		let records = [record("C", Category::Condition), record("D", Category::Drug)];
		let config = LayoutConfig::default();
		assert_eq!(layout(&records, &config), layout(&records, &config));
	}

	#[test]
	fn empty_input_yields_empty_layout() {
		assert!(layout(&[], &LayoutConfig::default()).is_empty());
	}
}
