use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{self, HEIGHT, WIDTH};
use crate::powerup::{ActiveEffect, PowerUp, PowerUpKind};
use crate::snake::{Direction, Snake, StepResult};
use crate::Coords;

pub const BASE_SPEED: u32 = 15;
pub const MIN_SPEED: u32 = 5;
pub const MAX_RAMP_SPEED: u32 = 30;

const NUM_OBSTACLES: usize = 10;
const INITIAL_SPAWN_RANGE_MS: (u64, u64) = (5_000, 15_000);
const RESPAWN_RANGE_MS: (u64, u64) = (10_000, 20_000);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    Lost,
}

/// Discrete input intents consumed at the input boundary. `Restart`,
/// `ToMenu` and `Quit` are session-level and resolved by the screens, not
/// by the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Pause,
    Resume,
    Restart,
    ToMenu,
    Quit,
}

/// How a finished play session asks its caller to continue. Returned up an
/// explicit loop rather than re-entering the session from event handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Restart,
    ToMenu,
    Quit,
}

/// Everything the renderer needs for one frame. The core never consults
/// the renderer back.
pub struct DrawModel<'a> {
    pub snake: &'a [Coords],
    pub heading: Option<Direction>,
    pub obstacles: &'a [Coords],
    pub food: Coords,
    pub power_up: Option<PowerUp>,
    pub score: u32,
}

pub struct Game<R: Rng> {
    rng: R,
    snake: Snake,
    obstacles: Vec<Coords>,
    food: Coords,
    power_up: Option<PowerUp>,
    effect: Option<ActiveEffect>,
    last_spawn_ms: u64,
    spawn_interval_ms: u64,
    speed: u32,
    status: GameStatus,
    queued: Option<Direction>,
}

impl<R: Rng> Game<R> {
    pub fn new(mut rng: R, now_ms: u64) -> Self {
        let start = (WIDTH / 2, HEIGHT / 2);

        let mut obstacles: Vec<Coords> = Vec::with_capacity(NUM_OBSTACLES);
        while obstacles.len() < NUM_OBSTACLES {
            let cell =
                board::random_free_cell(&mut rng, |c| c == start || obstacles.contains(&c));
            obstacles.push(cell);
        }

        let food = board::random_free_cell(&mut rng, |c| c == start || obstacles.contains(&c));
        let spawn_interval_ms =
            rng.gen_range(INITIAL_SPAWN_RANGE_MS.0..=INITIAL_SPAWN_RANGE_MS.1);

        Game {
            rng,
            snake: Snake::new(start),
            obstacles,
            food,
            power_up: None,
            effect: None,
            last_spawn_ms: now_ms,
            spawn_interval_ms,
            speed: BASE_SPEED,
            status: GameStatus::Playing,
            queued: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.snake.target_len() as u32 - 1
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn effect_kind(&self) -> Option<PowerUpKind> {
        self.effect.map(|e| e.kind)
    }

    /// The pacing sleep for the current tick rate.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1_000 / u64::from(self.speed))
    }

    pub fn draw_model(&self) -> DrawModel<'_> {
        DrawModel {
            snake: self.snake.body(),
            heading: self.snake.heading(),
            obstacles: &self.obstacles,
            food: self.food,
            power_up: self.power_up,
            score: self.score(),
        }
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Move(dir) => self.queue_direction(dir),
            Intent::Pause => {
                if self.status == GameStatus::Playing {
                    self.status = GameStatus::Paused;
                }
            }
            Intent::Resume => {
                if self.status == GameStatus::Paused {
                    self.status = GameStatus::Playing;
                }
            }
            // Session-level intents are resolved by the screens
            Intent::Restart | Intent::ToMenu | Intent::Quit => {}
        }
    }

    /// Accepts at most one direction change per tick, rejecting exact
    /// reversals of the current heading at input time.
    fn queue_direction(&mut self, dir: Direction) {
        if self.queued.is_some() {
            return;
        }
        if let Some(cur) = self.snake.heading() {
            if dir == cur.opposite() {
                return;
            }
        }
        self.queued = Some(dir);
    }

    /// One full update. The step order is fixed: heading, movement and
    /// bounds, body trim, collisions, power-up spawn, collection, effect
    /// expiry, food. A collision ends the tick immediately.
    pub fn tick(&mut self, now_ms: u64) {
        if self.status != GameStatus::Playing {
            return;
        }

        if let Some(dir) = self.queued.take() {
            self.snake.set_heading(dir);
        }

        let invincible = self.effect_kind() == Some(PowerUpKind::Invincibility);

        if let StepResult::OutOfBounds = self.snake.step(invincible) {
            self.status = GameStatus::Lost;
            return;
        }

        if !invincible
            && (self.snake.collides_with_self() || self.snake.collides_with(&self.obstacles))
        {
            self.status = GameStatus::Lost;
            return;
        }

        self.eval_power_up_spawn(now_ms);
        self.eval_power_up_collection(now_ms);
        self.eval_effect_expiry(now_ms);
        self.eval_food();
    }

    /// Spawns an instance once the slot is empty and the randomized
    /// interval has elapsed. An active effect does not block spawning; the
    /// instance slot and the effect slot are gated independently.
    fn eval_power_up_spawn(&mut self, now_ms: u64) {
        if self.power_up.is_some() || now_ms - self.last_spawn_ms <= self.spawn_interval_ms {
            return;
        }

        let kind = *PowerUpKind::ALL.choose(&mut self.rng).unwrap();
        let Game { rng, snake, obstacles, food, .. } = self;
        let pos = board::random_free_cell(rng, |c| {
            snake.body().contains(&c) || obstacles.contains(&c) || c == *food
        });
        self.power_up = Some(PowerUp { kind, pos });
    }

    fn eval_power_up_collection(&mut self, now_ms: u64) {
        let pu = match self.power_up {
            Some(pu) if pu.pos == self.snake.head() => pu,
            _ => return,
        };

        self.effect = Some(ActiveEffect {
            kind: pu.kind,
            expires_at_ms: now_ms + pu.kind.duration_ms(),
        });
        self.power_up = None;
        self.last_spawn_ms = now_ms;
        self.spawn_interval_ms = self.rng.gen_range(RESPAWN_RANGE_MS.0..=RESPAWN_RANGE_MS.1);

        match pu.kind {
            PowerUpKind::SpeedBoost => self.speed += 5,
            PowerUpKind::SlowDown => self.speed = MIN_SPEED.max(self.speed.saturating_sub(5)),
            // Multiplier and invincibility act on scoring and collision
            // checks while the effect is live; nothing immediate here
            PowerUpKind::ScoreMultiplier | PowerUpKind::Invincibility => {}
        }
    }

    fn eval_effect_expiry(&mut self, now_ms: u64) {
        let effect = match self.effect {
            Some(e) if now_ms >= e.expires_at_ms => e,
            _ => return,
        };

        if matches!(effect.kind, PowerUpKind::SpeedBoost | PowerUpKind::SlowDown) {
            // Back to base, discarding any interim food-driven ramp
            self.speed = BASE_SPEED;
        }
        self.effect = None;
    }

    fn eval_food(&mut self) {
        if self.snake.head() != self.food {
            return;
        }

        let Game { rng, snake, obstacles, power_up, .. } = self;
        self.food = board::random_free_cell(rng, |c| {
            obstacles.contains(&c)
                || snake.body().contains(&c)
                || power_up.map_or(false, |p| p.pos == c)
        });

        let growth = if self.effect_kind() == Some(PowerUpKind::ScoreMultiplier) { 2 } else { 1 };
        self.snake.grow(growth);

        let slowed = self.effect_kind() == Some(PowerUpKind::SlowDown);
        if self.score() % 5 == 0 && self.speed < MAX_RAMP_SPEED && !slowed {
            self.speed += 1;
        }
    }
}
