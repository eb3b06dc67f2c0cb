use std::ops::{Add, Mul};

/// A cell position on the board. Signed so that a step off the left or top
/// edge is representable and can be rejected by a bounds check.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Self {
        Coords { x, y }
    }

    pub const fn splat(v: i32) -> Self {
        Coords { x: v, y: v }
    }
}

impl Add for Coords {
    type Output = Coords;

    fn add(self, other: Coords) -> Coords {
        Coords::new(self.x + other.x, self.y + other.y)
    }
}

// Componentwise, not a dot product
impl Mul for Coords {
    type Output = Coords;

    fn mul(self, other: Coords) -> Coords {
        Coords::new(self.x * other.x, self.y * other.y)
    }
}

impl From<(i32, i32)> for Coords {
    fn from((x, y): (i32, i32)) -> Self {
        Coords::new(x, y)
    }
}
