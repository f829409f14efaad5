use crate::board::{self, BLOCK};
use crate::Coords;
use Direction::*;
use StepResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

pub enum StepResult {
    Moved,
    OutOfBounds,
}

pub struct Snake {
    body: Vec<Coords>, // tail first, head last
    heading: Option<Direction>,
    target_len: usize,
}

impl Snake {
    /// A single-cell snake with no heading; it stays put until the first
    /// move intent arrives.
    pub fn new(start: Coords) -> Self {
        Snake { body: vec![start], heading: None, target_len: 1 }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        *self.body.last().unwrap()
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Changes heading unless the new direction exactly reverses the
    /// current one, which would drive the head straight into the neck.
    pub fn set_heading(&mut self, new: Direction) {
        match self.heading {
            Some(cur) if new == cur.opposite() => {}
            _ => self.heading = Some(new),
        }
    }

    /// Advances the head one block along the heading, appends it, and trims
    /// the tail once the body exceeds the target length. Growth happens by
    /// not trimming. With `wrap` set the head wraps modulo the board
    /// instead of leaving it.
    pub fn step(&mut self, wrap: bool) -> StepResult {
        let (dx, dy) = self.heading.map_or((0, 0), Direction::delta);
        let (hx, hy) = self.head();
        let mut new_head = (hx + dx * BLOCK, hy + dy * BLOCK);

        if wrap {
            new_head = board::wrap(new_head);
        } else if !board::in_bounds(new_head) {
            return OutOfBounds;
        }

        self.body.push(new_head);
        if self.body.len() > self.target_len {
            self.body.remove(0);
        }
        Moved
    }

    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body[..self.body.len() - 1].contains(&head)
    }

    pub fn collides_with(&self, obstacles: &[Coords]) -> bool {
        obstacles.contains(&self.head())
    }

    pub fn grow(&mut self, by: usize) {
        self.target_len += by;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_attempts_never_change_heading() {
        let mut snake = Snake::new((300, 200));
        snake.set_heading(Right);
        snake.set_heading(Left);
        assert_eq!(snake.heading(), Some(Right));

        snake.set_heading(Up);
        snake.set_heading(Down);
        assert_eq!(snake.heading(), Some(Up));
    }

    #[test]
    fn any_heading_is_legal_while_stationary() {
        for dir in [Up, Down, Left, Right].iter() {
            let mut snake = Snake::new((300, 200));
            snake.set_heading(*dir);
            assert_eq!(snake.heading(), Some(*dir));
        }
    }

    #[test]
    fn step_moves_one_block_and_trims_to_target() {
        let mut snake = Snake::new((300, 200));
        snake.set_heading(Right);

        assert!(matches!(snake.step(false), Moved));
        assert_eq!(snake.head(), (310, 200));
        assert_eq!(snake.body().len(), 1);

        snake.grow(1);
        assert!(matches!(snake.step(false), Moved));
        assert_eq!(snake.head(), (320, 200));
        assert_eq!(snake.body(), &[(310, 200), (320, 200)]);
    }

    #[test]
    fn stationary_snake_stays_put_without_self_collision() {
        let mut snake = Snake::new((300, 200));
        for _ in 0..5 {
            assert!(matches!(snake.step(false), Moved));
        }
        assert_eq!(snake.head(), (300, 200));
        assert_eq!(snake.body().len(), 1);
        assert!(!snake.collides_with_self());
    }

    #[test]
    fn leaving_the_board_is_out_of_bounds() {
        let mut snake = Snake::new((0, 200));
        snake.set_heading(Left);
        assert!(matches!(snake.step(false), OutOfBounds));
        // The body is untouched by a rejected step
        assert_eq!(snake.head(), (0, 200));
    }

    #[test]
    fn wrapping_step_reenters_on_the_far_side() {
        let mut snake = Snake::new((0, 200));
        snake.set_heading(Left);
        assert!(matches!(snake.step(true), Moved));
        assert_eq!(snake.head(), (board::WIDTH - BLOCK, 200));
    }

    #[test]
    fn head_reentering_the_body_is_a_self_collision() {
        let mut snake = Snake::new((300, 200));
        snake.set_heading(Right);
        snake.grow(4);
        for _ in 0..4 {
            snake.step(false);
        }
        assert_eq!(snake.body().len(), 5);
        assert!(!snake.collides_with_self());

        // A tight turn: up, left, down lands back on the body
        snake.set_heading(Up);
        snake.step(false);
        snake.set_heading(Left);
        snake.step(false);
        snake.set_heading(Down);
        snake.step(false);
        assert!(snake.collides_with_self());
    }

    #[test]
    fn obstacle_collision_checks_the_head_only() {
        let mut snake = Snake::new((300, 200));
        snake.set_heading(Right);
        snake.step(false);
        assert!(snake.collides_with(&[(310, 200)]));
        assert!(!snake.collides_with(&[(300, 200)]));
    }
}
