use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::Config;
use crate::grid::{Cell, Grid};
use crate::snake::{Direction::{self, *}, Snake};
use crate::Coords;

const INITIAL_SNAKE_LENGTH: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOver {
    WallCollision,
    SelfCollision,
    /// No free cell left for food. Counts as a win.
    BoardFull,
}

impl GameOver {
    pub fn is_win(self) -> bool {
        matches!(self, GameOver::BoardFull)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver(GameOver),
}

/// One game session. Sole owner and mutator of the grid and the snake; input
/// only reaches it through `request_heading`.
pub struct Game<R = StdRng> {
    grid: Grid,
    snake: Snake,
    food: Option<Coords>,
    state: GameState,
    rng: R,
}

impl Game<StdRng> {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game::with_rng(config.width(), config.height(), rng)
    }
}

impl<R: Rng> Game<R> {
    /// Starts with the default snake: four segments on the second row,
    /// heading right, shortened to fit narrow boards.
    pub fn with_rng(width: usize, height: usize, rng: R) -> Self {
        let size = INITIAL_SNAKE_LENGTH.min(width).max(1);
        let head = Coords::new(size as i32 - 1, 1i32.min(height as i32 - 1));
        Game::with_snake(width, height, Snake::new(head, size, Right), rng)
    }

    /// Every segment of `snake` must lie on the board.
    pub fn with_snake(width: usize, height: usize, snake: Snake, rng: R) -> Self {
        let mut grid = Grid::new(width, height);
        for pos in snake.body() {
            grid.set(*pos, Cell::Body);
        }

        let mut game = Game { grid, snake, food: None, state: GameState::Running, rng };
        if !game.spawn_food() {
            game.finish(GameOver::BoardFull);
        }
        game
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    /// Forwards a turn to the snake. Ignored once the game is over.
    pub fn request_heading(&mut self, dir: Direction) -> bool {
        if !self.is_running() {
            return false;
        }

        let accepted = self.snake.request_heading(dir);
        if accepted {
            log::debug!("heading change to {:?} queued", dir);
        }
        accepted
    }

    /// Advances the simulation by one cell. A no-op once the game is over.
    pub fn tick(&mut self) -> GameState {
        if !self.is_running() {
            return self.state;
        }

        let new_head = self.snake.step();

        if !self.grid.in_bounds(new_head) {
            self.finish(GameOver::WallCollision);
            return self.state;
        }
        if self.snake.bites_itself() {
            self.finish(GameOver::SelfCollision);
            return self.state;
        }

        if let Some(old_tail) = self.snake.vacated() {
            self.grid.clear(old_tail);
        }
        for pos in self.snake.body() {
            self.grid.set(*pos, Cell::Body);
        }

        if self.food == Some(new_head) {
            if let Some(tail) = self.snake.grow() {
                self.grid.set(tail, Cell::Body);
            }
            log::debug!("food eaten at {:?}, length now {}", new_head, self.snake.len());

            if !self.spawn_food() {
                self.finish(GameOver::BoardFull);
            }
        }

        self.state
    }

    ///////////////////////////////////////////////////////////////////////////

    fn spawn_food(&mut self) -> bool {
        let choices = self.grid.free_cells();
        self.food = choices.choose(&mut self.rng).copied();

        match self.food {
            Some(food) => {
                self.grid.set(food, Cell::Food);
                true
            },
            None => false,
        }
    }

    fn finish(&mut self, reason: GameOver) {
        log::info!("game over: {:?} with length {}", reason, self.snake.len());
        self.state = GameState::GameOver(reason);
    }
}
