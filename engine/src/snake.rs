use std::fmt;

use super::space::{Point, Vector};

/// One occupied cell of the snake, owning the link to the next older cell.
#[derive(Clone, Debug)]
pub struct Segment {
    point: Point,
    next: Option<Box<Segment>>,
}

impl Segment {
    fn new(point: Point) -> Self {
        Self { point, next: None }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn next(&self) -> Option<&Segment> {
        self.next.as_deref()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> SegmentIter<'_> {
        SegmentIter {
            current: Some(self),
        }
    }

    pub fn find(&self, point: Point) -> bool {
        self.iter().any(|p| p == point)
    }

    fn drop_tail(&mut self) {
        // Walks to the second-to-last segment. A sole segment keeps itself.
        let mut current = self;
        while current
            .next
            .as_ref()
            .is_some_and(|next| next.next.is_some())
        {
            current = current
                .next
                .as_deref_mut()
                .expect("checked by the loop condition");
        }
        current.next = None;
    }
}

pub struct SegmentIter<'a> {
    current: Option<&'a Segment>,
}

impl Iterator for SegmentIter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let segment = self.current?;
        self.current = segment.next.as_deref();
        Some(segment.point)
    }
}

/// A snake is a head-first chain of segments plus the direction it is facing.
/// The chain itself never validates moves; the game does.
#[derive(Clone, Debug)]
pub struct Snake {
    head: Box<Segment>,
    direction: Vector,
}

impl Snake {
    pub fn new(head: Point, direction: Vector) -> Self {
        Self {
            head: Box::new(Segment::new(head)),
            direction,
        }
    }

    pub fn head(&self) -> &Segment {
        &self.head
    }

    pub fn head_point(&self) -> Point {
        self.head.point
    }

    pub fn facing(&self) -> Vector {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.head.len()
    }

    /// Any vector is accepted, not just the four unit directions.
    pub fn turn(&mut self, direction: Vector) {
        self.direction = direction;
    }

    /// Step forward by adding a new head segment, keeping the tail.
    pub fn grow(&mut self) {
        let next_point = self.head.point.step(self.direction);
        let old_head = std::mem::replace(&mut self.head, Box::new(Segment::new(next_point)));
        self.head.next = Some(old_head);
    }

    /// Step forward by adding a new head segment and evicting the tail.
    pub fn advance(&mut self) {
        self.grow();
        self.head.drop_tail();
    }

    pub fn contains(&self, point: Point) -> bool {
        self.head.find(point)
    }

    pub fn points(&self) -> SegmentIter<'_> {
        self.head.iter()
    }
}

impl fmt::Display for Snake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for point in self.points() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{point}")?;
            first = false;
        }
        Ok(())
    }
}
