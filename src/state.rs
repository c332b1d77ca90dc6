use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use crate::food::place_food;
use crate::snake::{Direction, Point, Snake};

pub const INITIAL_HEAD: Point = Point::new(5, 5);
pub const INITIAL_LENGTH: usize = 3;
pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    pub direction: Direction,
    pub food: Point,
    pub game_over: bool,
    /// Set together with `game_over` when the snake filled the whole board.
    pub won: bool,
}

impl GameState {
    /// The opening position: a three-segment snake heading right, with food
    /// dropped on a random free cell.
    pub fn new<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Self {
        let snake = Snake::new(INITIAL_HEAD, INITIAL_LENGTH, INITIAL_DIRECTION);
        let food = place_food(&occupied(&snake), board.width, board.height, rng)
            .unwrap_or(Point::new(0, 0));

        GameState {
            board,
            snake,
            direction: INITIAL_DIRECTION,
            food,
            game_over: false,
            won: false,
        }
    }

    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(INITIAL_LENGTH)
    }

    /// Steers the snake. A turn that would send the head back into the neck
    /// is refused; it is checked against the last move actually made, so two
    /// quick turns within one tick cannot reverse the snake either.
    pub fn turn(mut self, requested: Direction) -> Self {
        let moving = self.snake.heading().unwrap_or(self.direction);
        if !self.game_over && !moving.reverses(requested) {
            self.direction = requested;
        }
        self
    }

    /// Moves the snake one cell. Hitting a wall or the body ends the game
    /// and leaves the snake where it was.
    pub fn advance<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        if self.game_over {
            return self;
        }

        let new_head = self.snake.head().step(self.direction);

        if !self.board.contains(new_head) {
            info!("hit the wall at ({}, {})", new_head.x, new_head.y);
            self.game_over = true;
            return self;
        }

        let eating = new_head == self.food;
        if self.snake.blocks(new_head, eating) {
            info!("ran into itself at ({}, {})", new_head.x, new_head.y);
            self.game_over = true;
            return self;
        }

        self.snake.slither(new_head, eating);

        if eating {
            match place_food(&occupied(&self.snake), self.board.width, self.board.height, rng) {
                Some(food) => {
                    debug!(
                        "ate food, length {}, next food at ({}, {})",
                        self.snake.len(),
                        food.x,
                        food.y
                    );
                    self.food = food;
                }
                None => {
                    info!("board is full");
                    self.game_over = true;
                    self.won = true;
                }
            }
        }

        self
    }
}

fn occupied(snake: &Snake) -> HashSet<Point> {
    snake.segments().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOARD: Board = Board { width: 20, height: 10 };

    fn state(segments: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        GameState {
            board: BOARD,
            snake: Snake::from_segments(segments.iter().copied()).unwrap(),
            direction,
            food: food.into(),
            game_over: false,
            won: false,
        }
    }

    fn body(s: &GameState) -> Vec<Point> {
        s.snake.segments().collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn initial_state() {
        let s = GameState::new(BOARD, &mut rng());
        assert_eq!(body(&s), vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)]);
        assert_eq!(s.direction, Right);
        assert!(!s.snake.contains(s.food));
        assert!(BOARD.contains(s.food));
        assert!(!s.game_over);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn moves_right_one_cell() {
        let s = state(&[(5, 5), (4, 5), (3, 5)], Right, (0, 0)).advance(&mut rng());
        assert_eq!(body(&s), vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]);
        assert!(!s.game_over);
    }

    #[test]
    fn open_moves_keep_length() {
        for d in [Up, Down, Right] {
            let before = state(&[(5, 5), (4, 5), (3, 5)], d, (0, 0));
            let old_head = before.snake.head();
            let after = before.advance(&mut rng());
            assert_eq!(after.snake.len(), 3);
            assert_eq!(after.snake.head(), old_head.step(d));
            assert!(!after.game_over);
        }
    }

    #[test]
    fn left_wall_ends_game() {
        let s = state(&[(0, 5), (1, 5)], Left, (9, 9)).advance(&mut rng());
        assert!(s.game_over);
        assert!(!s.won);
        assert_eq!(body(&s), vec![Point::new(0, 5), Point::new(1, 5)]);
    }

    #[test]
    fn every_wall_ends_game() {
        let cases = [
            (&[(3, 0), (3, 1)][..], Up),
            (&[(3, 9), (3, 8)][..], Down),
            (&[(19, 4), (18, 4)][..], Right),
        ];
        for (segments, d) in cases {
            let before = state(segments, d, (10, 5));
            let after = before.clone().advance(&mut rng());
            assert!(after.game_over, "{:?} should hit the wall", d);
            assert_eq!(after.snake, before.snake);
        }
    }

    #[test]
    fn eating_grows_and_replaces_food() {
        let s = state(&[(5, 5), (4, 5), (3, 5)], Right, (6, 5)).advance(&mut rng());
        assert_eq!(s.snake.len(), 4);
        assert_eq!(s.snake.head(), Point::new(6, 5));
        assert_eq!(s.snake.tail(), Point::new(3, 5));
        assert!(!s.snake.contains(s.food));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn running_into_body_ends_game() {
        // Head at (2,2) turning down into (2,3), a middle segment.
        let s = state(&[(2, 2), (1, 2), (1, 3), (2, 3), (3, 3)], Down, (9, 9));
        let after = s.clone().advance(&mut rng());
        assert!(after.game_over);
        assert_eq!(after.snake, s.snake);
    }

    #[test]
    fn chasing_the_tail_is_allowed() {
        // 2x2 loop: head moves into the cell the tail leaves this tick.
        let s = state(&[(1, 1), (1, 0), (0, 0), (0, 1)], Left, (9, 9)).advance(&mut rng());
        assert!(!s.game_over);
        assert_eq!(
            body(&s),
            vec![Point::new(0, 1), Point::new(1, 1), Point::new(1, 0), Point::new(0, 0)]
        );
    }

    #[test]
    fn chasing_the_tail_while_eating_is_fatal() {
        let s = state(&[(1, 1), (1, 0), (0, 0), (0, 1)], Left, (0, 1)).advance(&mut rng());
        assert!(s.game_over);
    }

    #[test]
    fn filling_the_board_wins() {
        let mut s = state(&[(1, 0), (0, 0)], Down, (1, 1));
        s.board = Board { width: 2, height: 2 };
        s.snake = Snake::from_segments([(1, 0), (0, 0), (0, 1)]).unwrap();

        let s = s.advance(&mut rng());
        assert!(s.game_over);
        assert!(s.won);
        assert_eq!(s.snake.len(), 4);
    }

    #[test]
    fn finished_game_does_not_move() {
        let mut s = state(&[(5, 5), (4, 5)], Right, (0, 0));
        s.game_over = true;
        let after = s.clone().advance(&mut rng()).turn(Up);
        assert_eq!(after, s);
    }

    #[test]
    fn turn_refuses_reversal() {
        let s = state(&[(5, 5), (4, 5)], Right, (0, 0));
        assert_eq!(s.clone().turn(Left).direction, Right);
        assert_eq!(s.turn(Up).direction, Up);
    }

    #[test]
    fn two_turns_in_one_tick_cannot_reverse() {
        let s = state(&[(5, 5), (4, 5), (3, 5)], Right, (0, 0));
        let s = s.turn(Up).turn(Left);
        assert_eq!(s.direction, Up);

        let s = s.advance(&mut rng());
        assert!(!s.game_over);
        assert_eq!(s.snake.head(), Point::new(5, 4));
    }

    #[test]
    fn turn_back_is_allowed_once_the_snake_has_moved() {
        let s = state(&[(5, 5), (4, 5), (3, 5)], Right, (0, 0));
        let s = s.turn(Up).advance(&mut rng()).turn(Left);
        assert_eq!(s.direction, Left);
    }
}
