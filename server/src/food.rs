use std::collections::VecDeque;

use tokio::sync::mpsc;

use engine::log;
use engine::{Grid, Point, Vector};

use crate::server::FoodRequest;
use crate::session_rng::SessionRng;

/// Chooses where the next food point goes. Implementations see a snapshot of
/// the grid and the cells the snake occupies at request time.
pub trait FoodPolicy: Send + 'static {
    fn next_food(&mut self, grid: Grid, occupied: &[Point]) -> Point;
}

/// Answers food requests until the request channel closes. A reply may be
/// dropped by a server that shut down mid-exchange; that is tolerated.
pub async fn run_food_policy<P: FoodPolicy>(
    mut policy: P,
    mut requests: mpsc::Receiver<FoodRequest>,
) {
    log!("food policy: listening for requests");
    while let Some(request) = requests.recv().await {
        let food = policy.next_food(request.grid, &request.occupied);
        if request.reply.send(food).is_err() {
            log!("food policy: reply for {} had no receiver", food);
        }
    }
    log!("food policy: request channel closed");
}

/// Uniformly random free cell, rejection-sampled with a seeded generator.
pub struct RandomFood {
    rng: SessionRng,
}

impl RandomFood {
    pub fn new(rng: SessionRng) -> Self {
        Self { rng }
    }
}

impl FoodPolicy for RandomFood {
    fn next_food(&mut self, grid: Grid, occupied: &[Point]) -> Point {
        let max = grid.max();
        loop {
            let candidate = Point::new(
                self.rng.random_range(0..=max.x),
                self.rng.random_range(0..=max.y),
            );
            if !occupied.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Plays back a fixed list of points in order.
pub struct ScriptedFood {
    points: VecDeque<Point>,
}

impl ScriptedFood {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points: points.into(),
        }
    }
}

impl FoodPolicy for ScriptedFood {
    fn next_food(&mut self, _grid: Grid, _occupied: &[Point]) -> Point {
        match self.points.pop_front() {
            Some(point) => point,
            None => {
                log!("food policy: script exhausted");
                Point::new(-1, -1)
            }
        }
    }
}

/// Each placement is the previous one translated by a fixed vector.
pub struct TranslateFood {
    current: Point,
    step: Vector,
}

impl TranslateFood {
    pub fn new(start: Point, step: Vector) -> Self {
        Self {
            current: start,
            step,
        }
    }
}

impl FoodPolicy for TranslateFood {
    fn next_food(&mut self, _grid: Grid, _occupied: &[Point]) -> Point {
        self.current = self.current.step(self.step);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    #[test]
    fn test_random_food_stays_on_free_cells() {
        let grid = Grid::new(Vector::new(2, 2));
        let occupied = vec![
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(2, 2),
        ];
        let mut policy = RandomFood::new(SessionRng::new(42));

        for _ in 0..100 {
            let food = policy.next_food(grid, &occupied);
            assert!(grid.contains(food), "{food} left the grid");
            assert!(!occupied.contains(&food), "{food} is occupied");
        }
    }

    #[test]
    fn test_scripted_food_plays_back_in_order() {
        let script = vec![Point::new(1, 2), Point::new(3, 4), Point::new(0, 8)];
        let grid = Grid::new(Vector::new(10, 10));
        let mut policy = ScriptedFood::new(script.clone());

        for expected in script {
            assert_eq!(policy.next_food(grid, &[]), expected);
        }
        assert_eq!(policy.next_food(grid, &[]), Point::new(-1, -1));
    }

    #[test]
    fn test_translate_food_steps_each_call() {
        let grid = Grid::new(Vector::new(10, 10));
        let mut policy = TranslateFood::new(Point::new(3, 2), Vector::new(1, 2));

        assert_eq!(policy.next_food(grid, &[]), Point::new(4, 4));
        assert_eq!(policy.next_food(grid, &[]), Point::new(5, 6));
        assert_eq!(policy.next_food(grid, &[]), Point::new(6, 8));
    }

    #[tokio::test]
    async fn test_policy_task_answers_requests() {
        let script = vec![Point::new(7, 8), Point::new(2, 9)];
        let (request_tx, request_rx) = mpsc::channel(1);
        let task = tokio::spawn(run_food_policy(ScriptedFood::new(script.clone()), request_rx));

        for expected in script {
            let (reply_tx, reply_rx) = oneshot::channel();
            let request = FoodRequest {
                grid: Grid::new(Vector::new(10, 10)),
                occupied: vec![],
                reply: reply_tx,
            };
            request_tx.send(request).await.unwrap();
            let food = timeout(std::time::Duration::from_secs(5), reply_rx)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(food, expected);
        }

        drop(request_tx);
        timeout(std::time::Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_policy_task_survives_dropped_reply() {
        let (request_tx, request_rx) = mpsc::channel(1);
        let task = tokio::spawn(run_food_policy(
            ScriptedFood::new(vec![Point::new(1, 1), Point::new(2, 2)]),
            request_rx,
        ));

        let (reply_tx, reply_rx) = oneshot::channel();
        drop(reply_rx);
        let request = FoodRequest {
            grid: Grid::new(Vector::new(10, 10)),
            occupied: vec![],
            reply: reply_tx,
        };
        request_tx.send(request).await.unwrap();

        // The next exchange still works.
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = FoodRequest {
            grid: Grid::new(Vector::new(10, 10)),
            occupied: vec![],
            reply: reply_tx,
        };
        request_tx.send(request).await.unwrap();
        let food = timeout(std::time::Duration::from_secs(5), reply_rx)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(food, Point::new(2, 2));

        drop(request_tx);
        timeout(std::time::Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
    }
}
