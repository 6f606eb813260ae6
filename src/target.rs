/// A circular target in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Target {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "target radius must be positive");
        Self { x, y, radius }
    }

    /// Closed-disk hit test
    pub fn is_clicked(&self, px: f64, py: f64) -> bool {
        let dx = px - self.x;
        let dy = py - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}
