use super::types::Point;

pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 4.0;
pub const DEFAULT_SCALE: f64 = 0.8;
/// Toolbar zoom step.
pub const ZOOM_STEP: f64 = 0.2;
/// Wheel delta to zoom delta. Negative so that scrolling forward zooms out.
pub const WHEEL_ZOOM_FACTOR: f64 = -0.001;

/// Pan offset and zoom scale applied as translate-then-scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
	pub offset_x: f64,
	pub offset_y: f64,
	scale: f64,
}

impl Default for ViewportTransform {
	fn default() -> Self {
		Self {
			offset_x: 0.0,
			offset_y: 0.0,
			scale: DEFAULT_SCALE,
		}
	}
}

impl ViewportTransform {
	pub fn scale(&self) -> f64 {
		self.scale
	}

	pub fn zoom_by(&mut self, delta: f64) {
		if !delta.is_finite() {
			return;
		}
		self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
	}

	pub fn zoom_by_wheel(&mut self, delta_y: f64) {
		self.zoom_by(delta_y * WHEEL_ZOOM_FACTOR);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.offset_x += dx;
		self.offset_y += dy;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn screen_to_world(&self, screen: Point) -> Point {
		Point::new(
			(screen.x - self.offset_x) / self.scale,
			(screen.y - self.offset_y) / self.scale,
		)
	}

	pub fn world_to_screen(&self, world: Point) -> Point {
		Point::new(
			world.x * self.scale + self.offset_x,
			world.y * self.scale + self.offset_y,
		)
	}
}

/// Maps pointer coordinates reported by the host into canvas surface units,
/// i.e. the space the viewport transform is applied in.
///
/// The browser host accounts for the canvas bounding rect and CSS scaling;
/// tests substitute a closure or [`IdentityMapper`].
pub trait ViewportMapper {
	fn to_surface(&self, screen: Point) -> Point;

	fn screen_to_world(&self, screen: Point, transform: &ViewportTransform) -> Point {
		transform.screen_to_world(self.to_surface(screen))
	}
}

impl<F> ViewportMapper for F
where
	F: Fn(Point) -> Point,
{
	fn to_surface(&self, screen: Point) -> Point {
		self(screen)
	}
}

/// Pointer coordinates are already in surface units.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityMapper;

impl ViewportMapper for IdentityMapper {
	fn to_surface(&self, screen: Point) -> Point {
		screen
	}
}
