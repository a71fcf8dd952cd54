//! Model of the snake game: the grid-free game state and its update rule.

use std::collections::VecDeque;

use log::{debug, info, warn};
use rand::Rng;

/// Amount of time between forced snake moves.
pub const MILLIS_BETWEEN_FRAMES: u64 = 200;

/// Number of columns on the board.
pub const BOARD_COLS: i16 = 10;
/// Number of rows on the board.
pub const BOARD_ROWS: i16 = 10;

/// Where the snake's single starting segment sits.
const SNAKE_START: Position = Position { x: 5, y: 5 };
/// Where the first piece of food sits.
const FOOD_START: Position = Position { x: 2, y: 2 };

/// A board coordinate. `x` is the column, `y` the row, both 0-indexed.
///
/// Coordinates are signed so that the head can step one cell off the board
/// on the tick that ends the game (see [`SnakeGame::tick`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    #[must_use]
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Whether this position lies on the board.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_COLS).contains(&self.x) && (0..BOARD_ROWS).contains(&self.y)
    }
}

/// Direction the snake will move on the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// The `(dx, dy)` step for this heading. Rows grow downward.
    #[must_use]
    pub fn delta(self) -> (i16, i16) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// What occupies a single cell in the rendered board snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Snake,
    Food,
}

/// The snake game state.
///
/// All fields are private; the only ways to mutate a game are
/// [`SnakeGame::set_heading`], [`SnakeGame::tick`] and [`SnakeGame::restart`].
/// The rendered grid is not part of the state, it is recomputed on demand by
/// [`SnakeGame::board`].
#[derive(Clone, Debug)]
pub struct SnakeGame {
    snake: VecDeque<Position>,
    food: Position,
    heading: Heading,
    score: u32,
    game_over: bool,
}

impl SnakeGame {
    /// Creates a game in its fixed starting state: a one-segment snake at
    /// (5,5) heading right, food at (2,2), score 0.
    #[must_use]
    pub fn new() -> Self {
        let mut snake = VecDeque::new();
        snake.push_front(SNAKE_START);
        Self {
            snake,
            food: FOOD_START,
            heading: Heading::Right,
            score: 0,
            game_over: false,
        }
    }

    /// Requests a new heading for the next tick.
    ///
    /// A request for the exact opposite of the current heading is silently
    /// ignored, so the snake can never reverse into its own neck. This is a
    /// normal outcome of rapid key input, not an error.
    pub fn set_heading(&mut self, requested: Heading) {
        if requested == self.heading.opposite() {
            debug!("Ignoring reversal from {:?} to {:?}", self.heading, requested);
            return;
        }
        self.heading = requested;
    }

    /// Advances the game by one step in the current heading.
    ///
    /// Does nothing once the game is over. On a terminal move (off the board
    /// or into the body) the head is still advanced one last time before the
    /// state freezes, so the final frame shows where the snake died.
    ///
    /// # Panics
    ///
    /// Panics if the snake is empty, which would break the length >= 1
    /// invariant and never happens through the public operations.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }
        let head = *self.snake.front().unwrap();
        let (dx, dy) = self.heading.delta();
        let new_head = Position::new(head.x + dx, head.y + dy);

        // collision test is against every pre-move segment behind the head,
        // the cell the tail vacates this tick included
        let hit_self = self.snake.iter().skip(1).any(|&seg| seg == new_head);
        if !new_head.in_bounds() || hit_self {
            info!("Game over at {:?} with score {}", new_head, self.score);
            self.game_over = true;
        }

        self.snake.push_front(new_head);
        if new_head == self.food {
            self.score += 1;
            debug!("Ate food at {:?}. Score is now {}", new_head, self.score);
            self.spawn_food();
        } else {
            self.snake.pop_back();
        }
    }

    /// Places new food on a uniformly random empty cell.
    ///
    /// Samples coordinates and rejects any that land on the snake. The board
    /// always has free cells in reachable states, so this terminates.
    fn spawn_food(&mut self) {
        // the board dimensions are small positive constants
        let total_cells = usize::try_from(BOARD_COLS * BOARD_ROWS).unwrap();
        if self.snake.len() >= total_cells {
            warn!("No empty cell left to place food");
            return;
        }
        let mut rng = rand::thread_rng();
        loop {
            let candidate = Position::new(
                rng.gen_range(0..BOARD_COLS),
                rng.gen_range(0..BOARD_ROWS),
            );
            if !self.snake.contains(&candidate) {
                self.food = candidate;
                return;
            }
        }
    }

    /// Resets every field to the fixed starting state.
    pub fn restart(&mut self) {
        info!("Restarting game. Final score was {}", self.score);
        *self = Self::new();
    }

    /// Projects the current state onto a `BOARD_ROWS` x `BOARD_COLS` grid.
    ///
    /// Rows are outer, columns inner. Snake segments that sit off the board
    /// (the final overshoot frame) are skipped.
    ///
    /// # Panics
    ///
    /// Panics if casting coordinates from i16 to usize fails. In-bounds
    /// coordinates are non-negative, so this is never expected to happen.
    #[must_use]
    pub fn board(&self) -> Vec<Vec<Cell>> {
        let to_index = |v: i16| usize::try_from(v).unwrap();
        let mut grid = vec![vec![Cell::Empty; to_index(BOARD_COLS)]; to_index(BOARD_ROWS)];
        for seg in &self.snake {
            if seg.in_bounds() {
                grid[to_index(seg.y)][to_index(seg.x)] = Cell::Snake;
            }
        }
        grid[to_index(self.food.y)][to_index(self.food.x)] = Cell::Food;
        grid
    }

    #[must_use]
    pub fn get_score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn get_heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub fn get_snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    #[must_use]
    pub fn get_food(&self) -> Position {
        self.food
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(snake: &[(i16, i16)], heading: Heading, food: (i16, i16)) -> SnakeGame {
        SnakeGame {
            snake: snake.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            food: Position::new(food.0, food.1),
            heading,
            score: 0,
            game_over: false,
        }
    }

    fn positions(game: &SnakeGame) -> Vec<(i16, i16)> {
        game.get_snake().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_initial_state() {
        let game = SnakeGame::new();
        assert_eq!(positions(&game), vec![(5, 5)]);
        assert_eq!(game.get_food(), Position::new(2, 2));
        assert_eq!(game.get_heading(), Heading::Right);
        assert_eq!(game.get_score(), 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_plain_move_keeps_length_and_score() {
        let mut game = game_with(&[(5, 5)], Heading::Right, (2, 2));
        game.tick();
        assert_eq!(positions(&game), vec![(6, 5)]);
        assert_eq!(game.get_food(), Position::new(2, 2));
        assert_eq!(game.get_score(), 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_wall_hit_ends_game_with_overshoot_frame() {
        let mut game = game_with(&[(9, 5)], Heading::Right, (2, 2));
        game.tick();
        assert!(game.is_game_over());
        // the off-board head is kept for the final frame
        assert_eq!(positions(&game), vec![(10, 5)]);
    }

    #[test]
    fn test_all_four_walls_are_terminal() {
        for (start, heading) in [
            ((5, 0), Heading::Up),
            ((5, 9), Heading::Down),
            ((0, 5), Heading::Left),
            ((9, 5), Heading::Right),
        ] {
            let mut game = game_with(&[start], heading, (2, 2));
            game.tick();
            assert!(game.is_game_over(), "expected game over going {heading:?}");
        }
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let mut game = game_with(&[(1, 5)], Heading::Right, (2, 5));
        game.tick();
        assert_eq!(positions(&game), vec![(2, 5), (1, 5)]);
        assert_eq!(game.get_score(), 1);
        assert!(!game.is_game_over());
        // new food must avoid the grown snake
        let food = game.get_food();
        assert!(food.in_bounds());
        assert!(!game.get_snake().contains(&food));
    }

    #[test]
    fn test_reversing_into_body_is_terminal() {
        // heading upward from (5,5) runs straight into the neck at (5,4)
        let mut game = game_with(&[(5, 5), (5, 4), (5, 3)], Heading::Up, (2, 2));
        game.tick();
        assert!(game.is_game_over());
    }

    #[test]
    fn test_entering_vacated_tail_cell_is_terminal() {
        // a 2x2 loop: the head enters the cell the tail is about to leave.
        // The collision set is the whole pre-move body behind the head, so
        // this still counts as running into yourself.
        let mut game = game_with(&[(5, 5), (5, 4), (4, 4), (4, 5)], Heading::Left, (0, 0));
        game.tick();
        assert!(game.is_game_over());
    }

    #[test]
    fn test_tick_after_game_over_is_a_no_op() {
        let mut game = game_with(&[(9, 5)], Heading::Right, (2, 2));
        game.tick();
        assert!(game.is_game_over());
        let frozen = positions(&game);
        let food = game.get_food();
        let score = game.get_score();
        for _ in 0..5 {
            game.tick();
        }
        assert_eq!(positions(&game), frozen);
        assert_eq!(game.get_food(), food);
        assert_eq!(game.get_score(), score);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_opposite_heading_is_ignored() {
        let mut game = SnakeGame::new();
        assert_eq!(game.get_heading(), Heading::Right);
        game.set_heading(Heading::Left);
        assert_eq!(game.get_heading(), Heading::Right);
        game.set_heading(Heading::Up);
        assert_eq!(game.get_heading(), Heading::Up);
        game.set_heading(Heading::Down);
        assert_eq!(game.get_heading(), Heading::Up);
        game.set_heading(Heading::Right);
        assert_eq!(game.get_heading(), Heading::Right);
        game.set_heading(Heading::Right);
        assert_eq!(game.get_heading(), Heading::Right);
    }

    #[test]
    fn test_heading_set_between_ticks_applies_to_next_tick() {
        let mut game = game_with(&[(5, 5)], Heading::Right, (2, 2));
        game.set_heading(Heading::Down);
        game.tick();
        assert_eq!(positions(&game), vec![(5, 6)]);
    }

    #[test]
    fn test_restart_returns_to_initial_state() {
        let mut game = game_with(&[(1, 5)], Heading::Right, (2, 5));
        game.tick(); // eat, score 1
        game.set_heading(Heading::Down);
        while !game.is_game_over() {
            game.tick();
        }
        game.restart();
        assert_eq!(positions(&game), vec![(5, 5)]);
        assert_eq!(game.get_food(), Position::new(2, 2));
        assert_eq!(game.get_heading(), Heading::Right);
        assert_eq!(game.get_score(), 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_board_projection_is_tri_state() {
        let game = game_with(&[(5, 5), (5, 4)], Heading::Down, (2, 2));
        let board = game.board();
        assert_eq!(board.len(), BOARD_ROWS as usize);
        assert_eq!(board[0].len(), BOARD_COLS as usize);
        assert_eq!(board[5][5], Cell::Snake);
        assert_eq!(board[4][5], Cell::Snake);
        assert_eq!(board[2][2], Cell::Food);
        assert_eq!(board[0][0], Cell::Empty);
        let snake_cells = board
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Snake)
            .count();
        assert_eq!(snake_cells, 2);
    }

    #[test]
    fn test_board_projection_skips_off_board_head() {
        let mut game = game_with(&[(9, 5)], Heading::Right, (2, 2));
        game.tick();
        let board = game.board();
        let snake_cells = board
            .iter()
            .flatten()
            .filter(|c| **c == Cell::Snake)
            .count();
        assert_eq!(snake_cells, 0);
    }

    #[test]
    fn test_invariants_hold_under_random_play() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut game = SnakeGame::new();
            for _ in 0..500 {
                if rng.gen_bool(0.5) {
                    let heading = match rng.gen_range(0..4) {
                        0 => Heading::Up,
                        1 => Heading::Down,
                        2 => Heading::Left,
                        _ => Heading::Right,
                    };
                    game.set_heading(heading);
                }
                game.tick();
                if game.is_game_over() {
                    break;
                }
                assert!(game.get_snake().iter().all(|seg| seg.in_bounds()));
                for (i, a) in game.get_snake().iter().enumerate() {
                    for b in game.get_snake().iter().skip(i + 1) {
                        assert_ne!(a, b, "snake overlaps itself while alive");
                    }
                }
                assert!(!game.get_snake().contains(&game.get_food()));
            }
        }
    }
}
