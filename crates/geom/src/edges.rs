/// Spacing on the four sides of a rectangle. Used for both margins (outside a
/// node, reserved by its parent) and padding (inside a node, reserved from its
/// children).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Edges {
    /// Left edge.
    pub left: u32,
    /// Top edge.
    pub top: u32,
    /// Right edge.
    pub right: u32,
    /// Bottom edge.
    pub bottom: u32,
}

impl Edges {
    /// Construct edges in left, top, right, bottom order.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same spacing on every side.
    pub fn uniform(n: u32) -> Self {
        Self::new(n, n, n, n)
    }

    /// Zero spacing.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total horizontal spacing.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical spacing.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<[u32; 4]> for Edges {
    fn from(v: [u32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}
