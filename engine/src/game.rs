use std::fmt;

use super::snake::Snake;
use super::space::{Grid, Point, Vector};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    InvalidGrid(Grid),
    HeadOutsideGrid(Point),
    FoodOutsideGrid(Point),
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::InvalidGrid(grid) => {
                write!(f, "grid {grid} does not contain the origin")
            }
            ConstructionError::HeadOutsideGrid(point) => {
                write!(f, "snake head {point} is outside the grid")
            }
            ConstructionError::FoodOutsideGrid(point) => {
                write!(f, "food {point} is outside the grid")
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoFoodError;

impl fmt::Display for NoFoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the game currently has no food")
    }
}

impl std::error::Error for NoFoodError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickError {
    BoundaryCollision(Point),
    SelfCollision(Point),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::BoundaryCollision(point) => {
                write!(f, "snake hit the grid boundary at {point}")
            }
            TickError::SelfCollision(point) => {
                write!(f, "snake ran into itself at {point}")
            }
        }
    }
}

impl std::error::Error for TickError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    Moved,
    AteFood,
}

/// One running game: a grid, a snake, and a food point. The game validates
/// and executes moves; the snake itself stays unaware of the grid.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    snake: Snake,
    food: Point,
}

impl Game {
    pub fn new(grid: Grid, snake: Snake, food: Point) -> Result<Game, ConstructionError> {
        if !grid.contains(Point::new(0, 0)) {
            return Err(ConstructionError::InvalidGrid(grid));
        }
        if !grid.contains(snake.head_point()) {
            return Err(ConstructionError::HeadOutsideGrid(snake.head_point()));
        }
        if !grid.contains(food) {
            return Err(ConstructionError::FoodOutsideGrid(food));
        }
        Ok(Game { grid, snake, food })
    }

    /// A single-segment snake in the middle of the grid, facing up.
    pub fn centered(size: Vector, food: Point) -> Result<Game, ConstructionError> {
        let head = Point::new(size.x / 2, size.y / 2);
        Game::new(Grid::new(size), Snake::new(head, Vector::UP), food)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn size(&self) -> Vector {
        self.grid.max()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn facing(&self) -> Vector {
        self.snake.facing()
    }

    pub fn head_point(&self) -> Point {
        self.snake.head_point()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn turn(&mut self, direction: Vector) {
        self.snake.turn(direction);
    }

    pub fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    fn clear_food(&mut self) {
        // "No food" is a point just outside the grid, so the usual
        // containment check doubles as the missing-food check.
        let max = self.grid.max();
        self.food = Point::new(max.x + 1, max.y + 1);
    }

    pub fn needs_food(&self) -> bool {
        !self.grid.contains(self.food)
    }

    pub fn food(&self) -> Result<Point, NoFoodError> {
        if self.needs_food() {
            return Err(NoFoodError);
        }
        Ok(self.food)
    }

    /// Advance the game by one step along the snake's facing direction.
    /// Collisions leave the snake untouched; the boundary check runs first.
    pub fn tick(&mut self) -> Result<TickResult, TickError> {
        let target = self.snake.head_point().step(self.snake.facing());

        if !self.grid.contains(target) {
            return Err(TickError::BoundaryCollision(target));
        }
        if self.snake.contains(target) {
            return Err(TickError::SelfCollision(target));
        }

        if target == self.food {
            self.snake.grow();
            self.clear_food();
            Ok(TickResult::AteFood)
        } else {
            self.snake.advance();
            Ok(TickResult::Moved)
        }
    }
}
