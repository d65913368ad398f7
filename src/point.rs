use Direction::*;

/// Integer grid position, also used as a movement vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// Unit vector for this direction. Screen rows grow downwards.
    pub fn vector(self) -> Point {
        match self {
            Up => Point::new(0, -1),
            Down => Point::new(0, 1),
            Left => Point::new(-1, 0),
            Right => Point::new(1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.vector().add(other.vector()).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_componentwise() {
        assert_eq!(Point::new(2, 3).add(Point::new(-1, 4)), Point::new(1, 7));
    }

    #[test]
    fn zero_vector() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(0, 1).is_zero());
    }

    #[test]
    fn vectors_are_unit_length() {
        for dir in Direction::ALL {
            let v = dir.vector();
            assert_eq!(v.x.abs() + v.y.abs(), 1, "{:?}", dir);
        }
    }

    #[test]
    fn opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Down.is_opposite(Up));
        assert!(Left.is_opposite(Right));
        assert!(Right.is_opposite(Left));
        assert!(!Up.is_opposite(Up));
        assert!(!Up.is_opposite(Left));
    }
}
