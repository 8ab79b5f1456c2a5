use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// Body segments with the head at index 0.
#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
}

impl Snake {
    /// Builds a snake whose head is at `pos` and whose body trails behind it,
    /// opposite to `direction`. A length of 0 is treated as 1.
    pub fn new(pos: Coords, size: usize, direction: Direction) -> Self {
        let diff = direction.delta();

        let body = (0..size.max(1) as i32)
            .map(|i| (pos.0 - diff.0 * i, pos.1 - diff.1 * i))
            .collect();
        Snake { body, direction }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Reversing straight into the neck is silently ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    /// Every segment takes its predecessor's place, then the head steps one
    /// cell in the current direction. Length never changes here.
    pub fn advance(&mut self) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.direction.delta();
        let head = self.body[0];
        self.body[0] = (head.0 + dx, head.1 + dy);
    }

    /// Duplicates the tail; the copy separates on the next `advance`.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    pub fn self_collision(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_tail_behind_head() {
        let snake = Snake::new((20, 10), 3, Right);
        assert_eq!(snake.body(), &[(20, 10), (19, 10), (18, 10)]);
        assert_eq!(snake.get_direction(), Right);

        let snake = Snake::new((1, 10), 3, Left);
        assert_eq!(snake.body(), &[(1, 10), (2, 10), (3, 10)]);
    }

    #[test]
    fn advance_preserves_length() {
        let mut snake = Snake::new((20, 10), 3, Right);
        let turns = [Down, Left, Left, Up, Right, Right, Right];

        for dir in turns.iter() {
            snake.set_direction(*dir);
            snake.advance();
            assert_eq!(snake.len(), 3);
        }
    }

    #[test]
    fn advance_shifts_segments_toward_head() {
        let mut snake = Snake::new((20, 10), 3, Right);
        snake.advance();
        assert_eq!(snake.body(), &[(21, 10), (20, 10), (19, 10)]);

        snake.set_direction(Down);
        snake.advance();
        assert_eq!(snake.body(), &[(21, 11), (21, 10), (20, 10)]);
    }

    #[test]
    fn opposite_direction_is_ignored() {
        let mut snake = Snake::new((20, 10), 3, Right);
        snake.set_direction(Left);
        assert_eq!(snake.get_direction(), Right);

        snake.set_direction(Up);
        assert_eq!(snake.get_direction(), Up);
        snake.set_direction(Down);
        assert_eq!(snake.get_direction(), Up);
    }

    #[test]
    fn grow_duplicates_tail() {
        let mut snake = Snake::new((5, 5), 3, Right);
        snake.advance();
        snake.grow();
        assert_eq!(snake.body(), &[(6, 5), (5, 5), (4, 5), (4, 5)]);

        snake.advance();
        assert_eq!(snake.body(), &[(7, 5), (6, 5), (5, 5), (4, 5)]);
    }

    #[test]
    fn single_segment_snake() {
        let mut snake = Snake::new((5, 5), 1, Up);
        snake.advance();
        assert_eq!(snake.body(), &[(5, 4)]);
        assert!(!snake.self_collision());

        assert_eq!(Snake::new((5, 5), 0, Up).len(), 1);
    }

    #[test]
    fn detects_self_collision() {
        let mut snake = Snake::new((5, 5), 5, Right);
        assert!(!snake.self_collision());

        for dir in [Down, Left, Up].iter() {
            snake.set_direction(*dir);
            snake.advance();
        }

        assert_eq!(snake.body(), &[(4, 5), (4, 6), (5, 6), (5, 5), (4, 5)]);
        assert!(snake.self_collision());
    }

    #[test]
    fn occupies_checks_every_segment() {
        let snake = Snake::new((5, 5), 3, Right);
        assert!(snake.occupies((5, 5)));
        assert!(snake.occupies((3, 5)));
        assert!(!snake.occupies((6, 5)));
    }
}
