mod food;
mod server;
mod server_config;
mod session_rng;

use std::time::Duration;

use clap::Parser;

use engine::log;
use engine::{Game, Point, Vector, logger};
use food::{RandomFood, ScriptedFood, TranslateFood, run_food_policy};
use server::GameServer;
use server_config::ServerConfig;
use session_rng::SessionRng;

#[derive(Parser)]
#[command(name = "snake_server")]
struct Args {
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    field_width: Option<i32>,
    #[arg(long)]
    field_height: Option<i32>,
    #[arg(long)]
    tick_interval_ms: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Fixed food placements, e.g. --food-script "1,2;3,4". The game goes
    /// foodless once the script runs out.
    #[arg(long, value_parser = parse_point, value_delimiter = ';')]
    food_script: Vec<Point>,
    /// Translate each food placement by a fixed vector, e.g. --food-step "0,2".
    #[arg(long, value_parser = parse_vector)]
    food_step: Option<Vector>,
    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(width) = args.field_width {
        config.field_width = width;
    }
    if let Some(height) = args.field_height {
        config.field_height = height;
    }
    if let Some(interval) = args.tick_interval_ms {
        config.tick_interval_ms = interval;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("session seed: {}", rng.seed());

    let size = Vector::new(config.field_width - 1, config.field_height - 1);
    let head = Point::new(size.x / 2, size.y / 2);
    let food = initial_food(&mut rng, size, head);
    let game = Game::centered(size, food)?;

    let (game_server, handle) = GameServer::new(game);
    let server_task = tokio::spawn(game_server.run());

    if !args.food_script.is_empty() {
        tokio::spawn(run_food_policy(
            ScriptedFood::new(args.food_script.clone()),
            handle.food_rx,
        ));
    } else if let Some(step) = args.food_step {
        tokio::spawn(run_food_policy(TranslateFood::new(food, step), handle.food_rx));
    } else {
        tokio::spawn(run_food_policy(RandomFood::new(rng), handle.food_rx));
    }

    // No input capture here; the turn channel just stays open and idle.
    let _turn_tx = handle.turn_tx;
    let tick_tx = handle.tick_tx;
    let mut boundary_rx = handle.boundary_rx;
    let mut collision_rx = handle.collision_rx;
    let mut shutdown_tx = Some(handle.shutdown_tx);

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
    let mut sequence: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sequence += 1;
                if tick_tx.send(sequence).await.is_err() {
                    break;
                }
            }
            err = &mut boundary_rx => {
                if let Ok(err) = err {
                    log!("game over: {}", err);
                }
                break;
            }
            err = &mut collision_rx => {
                if let Ok(err) = err {
                    log!("game over: {}", err);
                }
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                log!("interrupted, shutting down");
                if let Some(tx) = shutdown_tx.take() {
                    let _ = tx.send(());
                }
                break;
            }
        }
    }

    server_task.await?;
    log!("session ended after {} ticks", sequence);

    Ok(())
}

fn initial_food(rng: &mut SessionRng, size: Vector, head: Point) -> Point {
    loop {
        let food = Point::new(rng.random_range(0..=size.x), rng.random_range(0..=size.y));
        if food != head {
            return food;
        }
    }
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = split_pair(value)?;
    Ok(Point::new(x, y))
}

fn parse_vector(value: &str) -> Result<Vector, String> {
    let (x, y) = split_pair(value)?;
    Ok(Vector::new(x, y))
}

fn split_pair(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("Expected x,y but got {}", value))?;
    let x = x.trim().parse::<i32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<i32>().map_err(|e| e.to_string())?;
    Ok((x, y))
}
