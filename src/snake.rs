use std::collections::VecDeque;

use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[cfg(test)]
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn reverses(self, other: Direction) -> bool {
        other == self.opposite()
    }

    fn between(from: Point, to: Point) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Up),
            (0, 1) => Some(Down),
            (-1, 0) => Some(Left),
            (1, 0) => Some(Right),
            _ => None,
        }
    }
}

/// Snake body, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
}

impl Snake {
    /// A straight snake of `size` segments with its head at `head`, laid out
    /// behind the head so it faces `direction`.
    pub fn new(head: Point, size: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        let body = (0..size.max(1) as i32)
            .map(|i| Point::new(head.x - dx * i, head.y - dy * i))
            .collect();
        Snake { body }
    }

    #[cfg(test)]
    /// Builds a snake from its segments, head first. Returns `None` for an
    /// empty body.
    pub fn from_segments<I, P>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let body: VecDeque<Point> = segments.into_iter().map(Into::into).collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    pub fn head(&self) -> Point {
        // Length >= 1 is guaranteed by every constructor and by `slither`.
        self.body[0]
    }

    /// The direction of the last move, read off the neck. `None` for a
    /// single-segment snake.
    pub fn heading(&self) -> Option<Direction> {
        let neck = self.body.get(1)?;
        Direction::between(*neck, self.head())
    }

    #[cfg(test)]
    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    #[cfg(test)]
    pub fn contains(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    /// True when `p` would hit the body after this tick's move. The tail
    /// cell is free unless the snake keeps it because it is growing.
    pub fn blocks(&self, p: Point, growing: bool) -> bool {
        let checked = if growing { self.body.len() } else { self.body.len() - 1 };
        self.body.iter().take(checked).any(|seg| *seg == p)
    }

    /// Pushes a new head, dropping the tail unless the snake grows.
    pub fn slither(&mut self, new_head: Point, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}
