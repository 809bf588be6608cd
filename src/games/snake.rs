use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use ratatui::style::Color;

use crate::games::geometry::probe_and_accept;
use crate::games::surface::{Surface, BACKGROUND};
use crate::games::{Game, InputScope, SCORE_STEP};

pub const TILE_COUNT: i32 = 25;
const GRID_SIZE: f32 = 20.0;
const START: Segment = Segment { x: 12, y: 12 };
const FOOD_ATTEMPTS: usize = 100;

const HEAD_COLOR: Color = Color::Rgb(52, 211, 153);
const BODY_COLOR: Color = Color::Rgb(16, 185, 129);
const FOOD_COLOR: Color = Color::Rgb(245, 158, 11);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
}

impl Segment {
    fn in_bounds(&self) -> bool {
        (0..TILE_COUNT).contains(&self.x) && (0..TILE_COUNT).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const STILL: Direction = Direction { dx: 0, dy: 0 };
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };
}

pub struct Snake {
    body: VecDeque<Segment>,
    food: Segment,
    direction: Direction,
    pending: Direction,
    score: u32,
    game_over: bool,
    rng: StdRng,
    surface: Surface,
}

impl Snake {
    pub fn new(rng: StdRng) -> Self {
        let mut s = Self {
            body: VecDeque::from([START]),
            food: Segment { x: 18, y: 18 },
            direction: Direction::STILL,
            pending: Direction::STILL,
            score: 0,
            game_over: false,
            rng,
            surface: Surface::new(TILE_COUNT as f32 * GRID_SIZE, TILE_COUNT as f32 * GRID_SIZE),
        };
        s.reset();
        s
    }

    #[cfg(test)]
    pub fn body(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    pub fn head(&self) -> Segment {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[cfg(test)]
    pub fn food(&self) -> Segment {
        self.food
    }

    /// Buffer a turn for the next tick. Turns along the axis the snake is
    /// already moving on are dropped, so it can never reverse in place.
    pub fn steer(&mut self, dir: Direction) {
        let blocked = (dir.dx != 0 && self.direction.dx != 0) || (dir.dy != 0 && self.direction.dy != 0);
        if !blocked {
            self.pending = dir;
        }
    }

    fn occupied(&self, cell: Segment) -> bool {
        self.body.iter().any(|s| *s == cell)
    }

    fn spawn_food(&mut self) -> Segment {
        let Self { rng, body, .. } = self;
        let (food, attempts) = probe_and_accept(
            FOOD_ATTEMPTS,
            || Segment {
                x: rng.gen_range(0..TILE_COUNT),
                y: rng.gen_range(0..TILE_COUNT),
            },
            |cell| !body.contains(cell),
        );
        if attempts == FOOD_ATTEMPTS && body.contains(&food) {
            debug!("snake: food placed on the body after {attempts} attempts");
        }
        food
    }

    fn draw(&mut self) {
        self.surface.clear(BACKGROUND);
        for (i, seg) in self.body.iter().enumerate() {
            let color = if i == 0 { HEAD_COLOR } else { BODY_COLOR };
            self.surface.fill_rect(
                seg.x as f32 * GRID_SIZE,
                seg.y as f32 * GRID_SIZE,
                GRID_SIZE - 2.0,
                GRID_SIZE - 2.0,
                color,
            );
        }
        self.surface.fill_circle(
            self.food.x as f32 * GRID_SIZE + GRID_SIZE / 2.0,
            self.food.y as f32 * GRID_SIZE + GRID_SIZE / 2.0,
            GRID_SIZE / 2.0 - 2.0,
            FOOD_COLOR,
        );
    }
}

impl Game for Snake {
    const TITLE: &'static str = "Snake";
    const TICK_INTERVAL: Duration = Duration::from_millis(150);
    const INPUT_SCOPE: InputScope = InputScope::Keyboard;

    fn update(&mut self) {
        if self.game_over {
            return;
        }
        self.direction = self.pending;

        if self.direction != Direction::STILL {
            let head = self.head();
            let next = Segment {
                x: head.x + self.direction.dx,
                y: head.y + self.direction.dy,
            };

            if !next.in_bounds() || self.occupied(next) {
                self.game_over = true;
                return;
            }

            self.body.push_front(next);
            if next == self.food {
                self.score += SCORE_STEP;
                self.food = self.spawn_food();
            } else {
                self.body.pop_back();
            }
        }

        self.draw();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.steer(Direction::UP),
            KeyCode::Down => self.steer(Direction::DOWN),
            KeyCode::Left => self.steer(Direction::LEFT),
            KeyCode::Right => self.steer(Direction::RIGHT),
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.body = VecDeque::from([START]);
        self.food = self.spawn_food();
        self.direction = Direction::STILL;
        self.pending = Direction::STILL;
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
        format!("Length: {}", self.len())
    }
}
