/// How the ring radius shrinks from the base of a segment to its tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaperCurve {
	/// `radius * (1 - t)^1.2` over the whole segment; `taper_start` has no effect.
	#[default]
	Fixed,
	/// Same curve, but flat until `taper_start` and compressed into the remainder.
	Onset,
}

/// Parameters of a tree generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
	/// Recursion depth. The root is always emitted; `<= 0` emits only the root.
	pub max_level: i32,
	/// Trunk height.
	pub height: f32,
	/// Trunk base radius.
	pub radius: f32,
	/// Rings of branches along each segment.
	pub ring_count: u32,
	/// Branches spaced evenly around each ring.
	pub branches_per_ring: u32,
	/// Child to parent scale ratio before decay.
	pub scale_factor: f32,
	/// Extra rotation per ring, in radians, giving the helical stagger.
	pub ring_offset: f32,
	/// Fraction of the segment height where the taper begins under [`TaperCurve::Onset`].
	pub taper_start: f32,
	pub taper: TaperCurve,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			max_level: 4,
			height: 10.0,
			radius: 1.0,
			ring_count: 3,
			branches_per_ring: 4,
			scale_factor: 0.5,
			ring_offset: 0.5,
			taper_start: 0.3,
			taper: TaperCurve::Fixed,
		}
	}
}

impl TreeConfig {
	pub fn with_max_level(mut self, max_level: i32) -> Self {
		self.max_level = max_level;
		self
	}

	pub fn with_height(mut self, height: f32) -> Self {
		self.height = height;
		self
	}

	pub fn with_radius(mut self, radius: f32) -> Self {
		self.radius = radius;
		self
	}

	pub fn with_ring_count(mut self, ring_count: u32) -> Self {
		self.ring_count = ring_count;
		self
	}

	pub fn with_branches_per_ring(mut self, branches_per_ring: u32) -> Self {
		self.branches_per_ring = branches_per_ring;
		self
	}

	pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
		self.scale_factor = scale_factor;
		self
	}

	pub fn with_ring_offset(mut self, ring_offset: f32) -> Self {
		self.ring_offset = ring_offset;
		self
	}

	pub fn with_taper_start(mut self, taper_start: f32) -> Self {
		self.taper_start = taper_start;
		self
	}

	pub fn with_taper(mut self, taper: TaperCurve) -> Self {
		self.taper = taper;
		self
	}

	/// Children produced by one expanded segment.
	pub fn branching_factor(&self) -> usize {
		self.ring_count as usize * self.branches_per_ring as usize
	}
}
