use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use ratatui::style::Color;

use crate::games::geometry::Aabb;
use crate::games::surface::{Surface, BACKGROUND};
use crate::games::{Game, InputScope, SCORE_STEP};

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 300.0;

const DINO_X: f32 = 50.0;
const DINO_SIZE: f32 = 40.0;
/// Resting y of the actor's top edge.
const GROUND_Y: f32 = 250.0;
const GROUND_LINE: f32 = 290.0;
const GRAVITY: f32 = 0.6;
const JUMP_VELOCITY: f32 = -12.0;

const OBSTACLE_WIDTH: f32 = 20.0;
const OBSTACLE_HEIGHTS: [f32; 2] = [40.0, 30.0];
/// Spawn gap in ticks is this divided by the current speed.
const SPAWN_BUDGET: f32 = 150.0;

const BASE_SPEED: f32 = 3.0;
const SPEED_STEP: f32 = 0.5;
const SPEED_STEP_SCORE: u32 = 50;

const GROUND_COLOR: Color = Color::Rgb(71, 85, 105);
const DINO_COLOR: Color = Color::Rgb(249, 115, 22);
const OBSTACLE_COLOR: Color = Color::Rgb(100, 116, 139);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Actor {
    pub y: f32,
    pub vy: f32,
    pub airborne: bool,
}

impl Actor {
    fn grounded() -> Self {
        Self { y: GROUND_Y, vy: 0.0, airborne: false }
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(DINO_X, self.y, DINO_SIZE, DINO_SIZE)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.x, GROUND_LINE - self.height, self.width, self.height)
    }

    fn off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

pub struct DinoRun {
    actor: Actor,
    obstacles: Vec<Obstacle>,
    spawn_timer: u32,
    speed: f32,
    score: u32,
    game_over: bool,
    rng: StdRng,
    surface: Surface,
}

impl DinoRun {
    pub fn new(rng: StdRng) -> Self {
        let mut d = Self {
            actor: Actor::grounded(),
            obstacles: Vec::new(),
            spawn_timer: 0,
            speed: BASE_SPEED,
            score: 0,
            game_over: false,
            rng,
            surface: Surface::new(WIDTH, HEIGHT),
        };
        d.reset();
        d
    }

    #[cfg(test)]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    #[cfg(test)]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[cfg(test)]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// No double jumps and no buffering: ignored unless on the ground.
    pub fn jump(&mut self) {
        if !self.actor.airborne {
            self.actor.vy = JUMP_VELOCITY;
            self.actor.airborne = true;
        }
    }

    fn apply_gravity(&mut self) {
        self.actor.vy += GRAVITY;
        self.actor.y += self.actor.vy;
        if self.actor.y >= GROUND_Y {
            self.actor = Actor::grounded();
        }
    }

    fn spawn_obstacle(&mut self) {
        self.spawn_timer += 1;
        if self.spawn_timer as f32 > SPAWN_BUDGET / self.speed {
            let height = OBSTACLE_HEIGHTS[self.rng.gen_range(0..OBSTACLE_HEIGHTS.len())];
            self.obstacles.push(Obstacle { x: WIDTH, width: OBSTACLE_WIDTH, height });
            self.spawn_timer = 0;
        }
    }

    fn move_obstacles(&mut self) {
        for obs in &mut self.obstacles {
            obs.x -= self.speed;
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|obs| !obs.off_screen());
        let passed = before - self.obstacles.len();

        // Each pass is scored and checked on its own, so one tick can bump
        // the speed more than once.
        for _ in 0..passed {
            self.score += SCORE_STEP;
            if self.score % SPEED_STEP_SCORE == 0 {
                self.speed += SPEED_STEP;
                debug!("dino: score {} speed now {}", self.score, self.speed);
            }
        }
    }

    fn check_collision(&self) -> bool {
        let dino = self.actor.bounds();
        self.obstacles.iter().any(|obs| dino.intersects(&obs.bounds()))
    }

    fn draw(&mut self) {
        self.surface.clear(BACKGROUND);
        self.surface.fill_rect(0.0, GROUND_LINE, WIDTH, 2.0, GROUND_COLOR);

        let y = self.actor.y;
        self.surface.fill_rect(DINO_X, y, DINO_SIZE, DINO_SIZE, DINO_COLOR);
        self.surface.fill_rect(DINO_X + 5.0, y + 5.0, 8.0, 8.0, BACKGROUND); // eye
        self.surface.fill_rect(DINO_X, y + DINO_SIZE - 10.0, 12.0, 10.0, BACKGROUND);
        self.surface.fill_rect(DINO_X + 20.0, y + DINO_SIZE - 10.0, 12.0, 10.0, BACKGROUND);

        for obs in &self.obstacles {
            let b = obs.bounds();
            self.surface.fill_rect(b.x, b.y, b.width, b.height, OBSTACLE_COLOR);
        }
    }
}

impl Game for DinoRun {
    const TITLE: &'static str = "Dino Run";
    const TICK_INTERVAL: Duration = Duration::from_millis(16);
    const INPUT_SCOPE: InputScope = InputScope::Keyboard;

    fn update(&mut self) {
        if self.game_over {
            return;
        }

        self.apply_gravity();
        self.spawn_obstacle();
        self.move_obstacles();

        if self.check_collision() {
            self.game_over = true;
        }

        self.draw();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char(' ') | KeyCode::Up) {
            self.jump();
        }
    }

    fn reset(&mut self) {
        self.actor = Actor::grounded();
        self.obstacles.clear();
        self.spawn_timer = 0;
        self.speed = BASE_SPEED;
        self.score = 0;
        self.game_over = false;
        self.surface.clear(BACKGROUND);
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn status(&self) -> String {
        format!("Speed: {:.1}", self.speed)
    }
}
