use tokio::sync::{mpsc, oneshot};

use engine::log;
use engine::{Game, Grid, Point, TickError, TickResult, Vector};

/// One "place new food" exchange. The server snapshots the grid and the
/// occupied cells so the policy never touches the live game.
pub struct FoodRequest {
    pub grid: Grid,
    pub occupied: Vec<Point>,
    pub reply: oneshot::Sender<Point>,
}

/// Driver-side halves of the server's channels.
pub struct ServerHandle {
    pub tick_tx: mpsc::Sender<u64>,
    pub turn_tx: mpsc::Sender<Vector>,
    pub food_rx: mpsc::Receiver<FoodRequest>,
    pub boundary_rx: oneshot::Receiver<TickError>,
    pub collision_rx: oneshot::Receiver<TickError>,
    pub shutdown_tx: oneshot::Sender<()>,
}

enum Input {
    Stop,
    Tick(Option<u64>),
    Turn(Option<Vector>),
}

/// Event loop around a single game. All mutation of the game happens on the
/// task running `run`, so ticks, turns, and food placement never interleave.
pub struct GameServer {
    game: Game,
    tick_rx: mpsc::Receiver<u64>,
    turn_rx: mpsc::Receiver<Vector>,
    food_tx: mpsc::Sender<FoodRequest>,
    boundary_tx: Option<oneshot::Sender<TickError>>,
    collision_tx: Option<oneshot::Sender<TickError>>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl GameServer {
    pub fn new(game: Game) -> (GameServer, ServerHandle) {
        let (tick_tx, tick_rx) = mpsc::channel(1);
        let (turn_tx, turn_rx) = mpsc::channel(1);
        let (food_tx, food_rx) = mpsc::channel(1);
        let (boundary_tx, boundary_rx) = oneshot::channel();
        let (collision_tx, collision_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let server = GameServer {
            game,
            tick_rx,
            turn_rx,
            food_tx,
            boundary_tx: Some(boundary_tx),
            collision_tx: Some(collision_tx),
            shutdown_rx,
        };
        let handle = ServerHandle {
            tick_tx,
            turn_tx,
            food_rx,
            boundary_rx,
            collision_rx,
            shutdown_tx,
        };
        (server, handle)
    }

    pub async fn run(mut self) {
        log!(
            "snake server started [grid {}][snake {}]",
            self.game.grid(),
            self.game.snake()
        );

        loop {
            let input = tokio::select! {
                _ = &mut self.shutdown_rx => Input::Stop,
                tick = self.tick_rx.recv() => Input::Tick(tick),
                turn = self.turn_rx.recv() => Input::Turn(turn),
            };

            match input {
                Input::Stop => {
                    log!("stop requested");
                    break;
                }
                // A closed input channel means the driver went away.
                Input::Tick(None) | Input::Turn(None) => break,
                Input::Tick(Some(sequence)) => {
                    if !self.handle_tick(sequence).await {
                        break;
                    }
                }
                Input::Turn(Some(direction)) => {
                    log!("turned {} -> {}", self.game.facing(), direction);
                    self.game.turn(direction);
                }
            }
        }

        // Returning drops every owned channel half, which wakes all peers.
        log!("snake server stopped");
    }

    async fn handle_tick(&mut self, sequence: u64) -> bool {
        let result = match self.game.tick() {
            Ok(result) => result,
            Err(err) => {
                log!("tick {}: {} [snake {}]", sequence, err, self.game.snake());
                let signal = match err {
                    TickError::BoundaryCollision(_) => &mut self.boundary_tx,
                    TickError::SelfCollision(_) => &mut self.collision_tx,
                };
                if let Some(tx) = signal.take() {
                    let _ = tx.send(err);
                }
                return false;
            }
        };

        match result {
            TickResult::AteFood => {
                log!(
                    "tick {}: ate and grew [facing {}][snake {}]",
                    sequence,
                    self.game.facing(),
                    self.game.snake()
                );
                self.request_food().await
            }
            TickResult::Moved => {
                match self.game.food() {
                    Ok(food) => log!(
                        "tick {}: moved [facing {}][food {}][snake {}]",
                        sequence,
                        self.game.facing(),
                        food,
                        self.game.snake()
                    ),
                    Err(_) => log!(
                        "tick {}: moved [facing {}][food none][snake {}]",
                        sequence,
                        self.game.facing(),
                        self.game.snake()
                    ),
                }
                true
            }
        }
    }

    /// Ask the food policy for one point and block until it answers. No
    /// other input is processed while the exchange is pending.
    async fn request_food(&mut self) -> bool {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = FoodRequest {
            grid: self.game.grid(),
            occupied: self.game.snake().points().collect(),
            reply: reply_tx,
        };

        if self.food_tx.send(request).await.is_err() {
            log!("no food policy is listening, stopping");
            return false;
        }

        match reply_rx.await {
            Ok(food) => {
                if !self.game.grid().contains(food) {
                    log!("warning: food policy placed {} outside the grid", food);
                } else if self.game.snake().contains(food) {
                    log!("warning: food policy placed {} on the snake", food);
                }
                self.game.set_food(food);
                log!("new food at {}", food);
                true
            }
            Err(_) => {
                log!("food policy dropped the reply, stopping");
                false
            }
        }
    }
}
