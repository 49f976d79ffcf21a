pub mod game;
pub mod logger;
pub mod snake;
pub mod space;

pub use game::{ConstructionError, Game, NoFoodError, TickError, TickResult};
pub use snake::{Segment, Snake};
pub use space::{Grid, Point, Vector};
