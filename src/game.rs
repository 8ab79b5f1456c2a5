use log::{debug, info};
use rand::Rng;

use crate::Coords;
use crate::error::GameError;
use crate::grid::{Cell, Grid};
use crate::input::Command;
use crate::placement::Placer;
use crate::snake::{Direction, Snake};

const GRID_WIDTH: usize = 40;
const GRID_HEIGHT: usize = 20;
const INITIAL_SNAKE_LENGTH: usize = 3;
const FOOD_REWARD: u32 = 10;

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub initial_snake_length: usize,
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            food_reward: FOOD_REWARD,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    /// A new wall appears every time food is eaten.
    Hard,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    HitWall,
    OutOfBounds,
    SelfCollision,
    Quit,
    /// No free cell was left for the next food.
    BoardFull,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver(EndReason),
}

/// What a single tick did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    Moved,
    AteFood { wall: Option<Coords> },
    Ended(EndReason),
}

/// Read-only view handed to the renderer after every tick.
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub snake: &'a Snake,
    pub food: Coords,
    pub score: u32,
    pub difficulty: Difficulty,
    pub status: Status,
}

pub struct Game<R> {
    grid: Grid,
    snake: Snake,
    food: Coords,
    score: u32,
    food_reward: u32,
    difficulty: Difficulty,
    status: Status,
    placer: Placer<R>,
}

impl<R: Rng> Game<R> {
    pub fn new(config: &GameConfig, difficulty: Difficulty, rng: R) -> Result<Self, GameError> {
        let mut grid = Grid::new(config.width, config.height)?;
        let center = ((config.width / 2) as i32, (config.height / 2) as i32);
        let snake = Snake::new(center, config.initial_snake_length, Direction::Right);

        let mut placer = Placer::new(rng);
        let food = placer.place_food(&mut grid, &snake)?;

        info!("New {:?} game on a {}x{} grid", difficulty, config.width, config.height);

        Ok(Game {
            grid,
            snake,
            food,
            score: 0,
            food_reward: config.food_reward,
            difficulty,
            status: Status::Running,
            placer,
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            snake: &self.snake,
            food: self.food,
            score: self.score,
            difficulty: self.difficulty,
            status: self.status,
        }
    }

    /// Advances the game by one step. `command` is whatever the player
    /// pressed since the last tick, if anything. Once the game is over this
    /// only reports why.
    pub fn tick(&mut self, command: Option<Command>) -> TickEvent {
        if let Status::GameOver(reason) = self.status {
            return TickEvent::Ended(reason);
        }

        match command {
            Some(Command::Quit) => return self.end(EndReason::Quit),
            Some(Command::Turn(dir)) => self.snake.set_direction(dir),
            None => {}
        }

        self.snake.advance();
        let head = self.snake.head();

        match self.grid.cell_at(head) {
            None => return self.end(EndReason::OutOfBounds),
            Some(Cell::Wall) => return self.end(EndReason::HitWall),
            _ => {}
        }

        if self.snake.self_collision() {
            return self.end(EndReason::SelfCollision);
        }

        if head != self.food {
            return TickEvent::Moved;
        }

        self.snake.grow();
        self.score += self.food_reward;
        self.grid.set_cell(self.food, Cell::Empty);
        debug!("Food eaten at {:?}, score {}", head, self.score);

        match self.placer.place_food(&mut self.grid, &self.snake) {
            Ok(pos) => self.food = pos,
            Err(_) => return self.end(EndReason::BoardFull),
        }

        let wall = match self.difficulty {
            Difficulty::Hard => self.placer.place_wall(&mut self.grid, &self.snake).ok(),
            Difficulty::Easy => None,
        };

        TickEvent::AteFood { wall }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn end(&mut self, reason: EndReason) -> TickEvent {
        info!("Game over ({:?}) with score {}", reason, self.score);
        self.status = Status::GameOver(reason);
        TickEvent::Ended(reason)
    }

    #[cfg(test)]
    pub(crate) fn move_food(&mut self, pos: Coords) {
        self.grid.set_cell(self.food, Cell::Empty);
        self.grid.set_cell(pos, Cell::Food);
        self.food = pos;
    }

    #[cfg(test)]
    pub(crate) fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}
