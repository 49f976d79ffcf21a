use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const UP: Vector = Vector { x: 0, y: 1 };
    pub const DOWN: Vector = Vector { x: 0, y: -1 };
    pub const LEFT: Vector = Vector { x: -1, y: 0 };
    pub const RIGHT: Vector = Vector { x: 1, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Vector) -> Point {
        Point::new(self.x + direction.x, self.y + direction.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Playable area spanning from the origin to a maximum corner, both inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    max: Vector,
}

impl Grid {
    pub fn new(max: Vector) -> Self {
        Self { max }
    }

    pub fn max(&self) -> Vector {
        self.max
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x <= self.max.x && point.y <= self.max.y
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.max.x, self.max.y)
    }
}
