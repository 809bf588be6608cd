use std::time::Duration;

use log::{debug, trace};
use ratatui::style::Color;

use crate::games::geometry::{Aabb, Vec2};
use crate::games::surface::{Surface, BACKGROUND};
use crate::games::{Game, InputScope, SCORE_STEP};

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 400.0;

const PADDLE_WIDTH: f32 = 100.0;
const PADDLE_HEIGHT: f32 = 10.0;
const PADDLE_GAP: f32 = 10.0;
/// Horizontal speed range handed out by the paddle, centre to edge.
const PADDLE_SPIN: f32 = 8.0;

const BALL_RADIUS: f32 = 8.0;
const BALL_START: Vec2 = Vec2::new(WIDTH / 2.0, HEIGHT - 30.0);
const BALL_VELOCITY: Vec2 = Vec2::new(3.0, -3.0);

pub const BRICK_COLUMNS: usize = 8;
pub const BRICK_ROWS: usize = 5;
const BRICK_WIDTH: f32 = 45.0;
const BRICK_HEIGHT: f32 = 20.0;
const BRICK_PADDING: f32 = 5.0;
const BRICK_OFFSET_TOP: f32 = 30.0;
const BRICK_OFFSET_LEFT: f32 = 10.0;

const ROW_COLORS: [Color; BRICK_ROWS] = [
    Color::Rgb(239, 68, 68),   // red
    Color::Rgb(249, 115, 22),  // orange
    Color::Rgb(245, 158, 11),  // amber
    Color::Rgb(234, 179, 8),   // yellow
    Color::Rgb(132, 204, 22),  // lime
];
const BALL_COLOR: Color = Color::Rgb(245, 158, 11);
const PADDLE_COLOR: Color = Color::Rgb(59, 130, 246);

#[derive(Clone, Copy, Debug)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Paddle {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Top edge of the paddle; the plane the ball bounces off.
    fn top(&self) -> f32 {
        HEIGHT - self.height - PADDLE_GAP
    }

    fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Brick {
    pub bounds: Aabb,
    pub row: usize,
    pub alive: bool,
}

pub struct Arkanoid {
    ball: Ball,
    paddle: Paddle,
    bricks: Vec<Brick>,
    score: u32,
    game_over: bool,
    surface: Surface,
}

impl Arkanoid {
    pub fn new() -> Self {
        let mut a = Self {
            ball: Ball { pos: BALL_START, vel: BALL_VELOCITY, radius: BALL_RADIUS },
            paddle: Paddle { x: 0.0, width: PADDLE_WIDTH, height: PADDLE_HEIGHT },
            bricks: Vec::with_capacity(BRICK_COLUMNS * BRICK_ROWS),
            score: 0,
            game_over: false,
            surface: Surface::new(WIDTH, HEIGHT),
        };
        a.reset();
        a
    }

    fn init_bricks(&mut self) {
        self.bricks.clear();
        for col in 0..BRICK_COLUMNS {
            for row in 0..BRICK_ROWS {
                self.bricks.push(Brick {
                    bounds: Aabb::new(
                        col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
                        row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
                        BRICK_WIDTH,
                        BRICK_HEIGHT,
                    ),
                    row,
                    alive: true,
                });
            }
        }
    }

    #[cfg(test)]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    #[cfg(test)]
    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    pub fn total_bricks(&self) -> usize {
        self.bricks.len()
    }

    pub fn won(&self) -> bool {
        self.bricks_left() == 0
    }

    fn collide_bricks(&mut self) {
        for brick in self.bricks.iter_mut().filter(|b| b.alive) {
            if !brick.bounds.contains_point(self.ball.pos) {
                continue;
            }
            let center = brick.bounds.center();
            let dx = self.ball.pos.x - center.x;
            let dy = self.ball.pos.y - center.y;
            if (dx / brick.bounds.width).abs() > (dy / brick.bounds.height).abs() {
                self.ball.vel.x = -self.ball.vel.x;
            } else {
                self.ball.vel.y = -self.ball.vel.y;
            }
            brick.alive = false;
            self.score += SCORE_STEP;
            trace!("arkanoid: brick at ({}, {}) destroyed", brick.bounds.x, brick.bounds.y);
        }

        if self.won() {
            debug!("arkanoid: all bricks cleared");
            self.game_over = true;
        }
    }

    fn move_ball(&mut self) {
        let ball = &mut self.ball;
        ball.pos.x += ball.vel.x;
        ball.pos.y += ball.vel.y;

        let next_x = ball.pos.x + ball.vel.x;
        let next_y = ball.pos.y + ball.vel.y;

        if next_x > WIDTH - ball.radius || next_x < ball.radius {
            ball.vel.x = -ball.vel.x;
        }

        if next_y < ball.radius {
            ball.vel.y = -ball.vel.y;
        } else if next_y > self.paddle.top() - ball.radius {
            if ball.vel.y > 0.0 && self.paddle.spans(ball.pos.x) {
                let hit = (ball.pos.x - self.paddle.x) / self.paddle.width;
                ball.vel.x = (hit - 0.5) * PADDLE_SPIN;
                ball.vel.y = -ball.vel.y;
            } else if next_y > HEIGHT - ball.radius {
                self.game_over = true;
            }
        }
    }

    fn draw(&mut self) {
        self.surface.clear(BACKGROUND);
        for brick in self.bricks.iter().filter(|b| b.alive) {
            let b = brick.bounds;
            self.surface.fill_rect(b.x, b.y, b.width, b.height, ROW_COLORS[brick.row]);
            self.surface.stroke_rect(b.x, b.y, b.width, b.height, BACKGROUND);
        }
        self.surface
            .fill_circle(self.ball.pos.x, self.ball.pos.y, self.ball.radius, BALL_COLOR);
        self.surface.fill_rect(
            self.paddle.x,
            self.paddle.top(),
            self.paddle.width,
            self.paddle.height,
            PADDLE_COLOR,
        );
    }
}

impl Game for Arkanoid {
    const TITLE: &'static str = "Arkanoid";
    const TICK_INTERVAL: Duration = Duration::from_millis(16);
    const INPUT_SCOPE: InputScope = InputScope::Pointer;

    fn update(&mut self) {
        if self.game_over {
            return;
        }
        // Draw first: the frame shows where the previous tick left things.
        self.draw();
        self.collide_bricks();
        self.move_ball();
    }

    fn handle_pointer(&mut self, x: f32) {
        self.paddle.x = (x - self.paddle.width / 2.0).clamp(0.0, WIDTH - self.paddle.width);
    }

    fn reset(&mut self) {
        self.ball = Ball { pos: BALL_START, vel: BALL_VELOCITY, radius: BALL_RADIUS };
        self.paddle.x = WIDTH / 2.0 - PADDLE_WIDTH / 2.0;
        self.init_bricks();
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
        format!("Bricks: {}/{}", self.bricks_left(), self.total_bricks())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::games::session::tests::Recorder;
    use crate::games::session::Session;

    fn place(a: &mut Arkanoid, x: f32, y: f32, dx: f32, dy: f32) {
        a.ball.pos = Vec2::new(x, y);
        a.ball.vel = Vec2::new(dx, dy);
    }

    #[test]
    fn starts_with_full_grid() {
        let a = Arkanoid::new();
        assert_eq!(a.total_bricks(), 40);
        assert_eq!(a.bricks_left(), 40);
        assert_eq!(a.paddle().x, 150.0);
        assert_eq!(a.ball().pos, BALL_START);
    }

    #[test]
    fn side_hit_flips_horizontal_velocity_only() {
        let mut a = Arkanoid::new();
        // First brick spans x 10..55, y 30..50.
        place(&mut a, 52.0, 41.0, 2.0, 1.0);
        a.update();
        assert_eq!(a.ball().vel, Vec2::new(-2.0, 1.0));
        assert_eq!(a.get_score(), 10);
        assert_eq!(a.bricks_left(), 39);
    }

    #[test]
    fn top_hit_flips_vertical_velocity_only() {
        let mut a = Arkanoid::new();
        place(&mut a, 33.0, 48.0, 1.0, -2.0);
        a.update();
        assert_eq!(a.ball().vel, Vec2::new(1.0, 2.0));
        assert_eq!(a.get_score(), 10);
    }

    #[test]
    fn destroyed_bricks_stay_destroyed() {
        let mut a = Arkanoid::new();
        place(&mut a, 33.0, 40.0, 0.0, 0.0);
        a.update();
        a.update();
        a.update();
        assert_eq!(a.get_score(), 10);
        assert_eq!(a.bricks_left(), 39);
    }

    #[test]
    fn clearing_every_brick_is_a_win() {
        let mut a = Arkanoid::new();
        let centers: Vec<_> = a.bricks.iter().map(|b| b.bounds.center()).collect();
        for c in centers {
            assert!(!a.is_game_over());
            place(&mut a, c.x, c.y, 0.0, 1.0);
            a.update();
        }
        assert!(a.is_game_over());
        assert!(a.won());
        assert_eq!(a.get_score(), 400);

        let ball = a.ball().pos;
        a.update();
        assert_eq!(a.ball().pos, ball);
    }

    #[test]
    fn paddle_redirects_by_hit_position() {
        let mut a = Arkanoid::new();
        a.handle_pointer(225.0);
        place(&mut a, 200.0, 368.0, 0.0, 3.0);
        a.update();
        assert_eq!(a.ball().vel, Vec2::new(-2.0, -3.0));
        assert!(!a.is_game_over());
    }

    #[test]
    fn missing_the_ball_loses() {
        let mut a = Arkanoid::new();
        a.handle_pointer(0.0);
        place(&mut a, 300.0, 360.0, 0.0, 3.0);
        for _ in 0..20 {
            a.update();
        }
        assert!(a.is_game_over());
        assert!(!a.won());
        assert_eq!(a.get_score(), 0);
    }

    #[test]
    fn walls_reflect() {
        let mut a = Arkanoid::new();
        place(&mut a, 387.0, 200.0, 3.0, 1.0);
        a.update();
        assert_eq!(a.ball().vel.x, -3.0);

        place(&mut a, 200.0, 13.0, 1.0, -3.0);
        a.update();
        assert_eq!(a.ball().vel.y, 3.0);
    }

    #[test]
    fn pointer_keeps_paddle_on_the_surface() {
        let mut a = Arkanoid::new();
        a.handle_pointer(10.0);
        assert_eq!(a.paddle().x, 0.0);
        a.handle_pointer(390.0);
        assert_eq!(a.paddle().x, 300.0);
        a.handle_pointer(200.0);
        assert_eq!(a.paddle().x, 150.0);
    }

    #[test]
    fn tracking_paddle_keeps_the_ball_and_scores_in_tens() {
        let mut a = Arkanoid::new();
        let mut last = 0;
        for _ in 0..5000 {
            let x = a.ball().pos.x - 30.0;
            a.handle_pointer(x + PADDLE_WIDTH / 2.0);
            a.update();
            assert!(a.get_score() >= last);
            assert_eq!(a.get_score() % 10, 0);
            last = a.get_score();
            if a.is_game_over() {
                break;
            }
        }
        assert!(!a.is_game_over() || a.won());
    }

    #[test]
    fn reset_clears_the_previous_run() {
        let mut a = Arkanoid::new();
        place(&mut a, 33.0, 40.0, 0.0, 1.0);
        a.update();
        assert_eq!(a.bricks_left(), 39);
        a.handle_pointer(40.0);
        place(&mut a, 200.0, 200.0, -3.0, 3.0);
        for _ in 0..10 {
            a.update();
        }
        assert_ne!(a.ball().pos, BALL_START);

        a.reset();
        assert_eq!(a.bricks_left(), 40);
        assert!(a.bricks.iter().all(|b| b.alive));
        assert_eq!(a.get_score(), 0);
        assert!(!a.is_game_over());
        assert_eq!(a.paddle().x, 150.0);
        assert_eq!(a.ball().pos, BALL_START);
        assert_eq!(a.ball().vel, BALL_VELOCITY);
        assert!(a.surface().is_blank());
    }

    #[test]
    fn frame_shows_state_before_the_tick() {
        let mut a = Arkanoid::new();
        a.update();
        let drawn = a.surface().shapes().iter().any(|s| {
            matches!(s, crate::games::surface::Shape::Circle { center, .. } if *center == BALL_START)
        });
        assert!(drawn);
        assert_ne!(a.ball().pos, BALL_START);
    }

    #[test]
    fn session_routes_pointer_but_not_keys() {
        let rec = Recorder::default();
        let mut s = Session::new(Arkanoid::new(), rec.sinks());
        s.pointer(0.0);
        assert_eq!(s.game().paddle().x, 150.0);

        s.start();
        s.key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        assert_eq!(s.game().paddle().x, 150.0);
        s.pointer(0.0);
        assert_eq!(s.game().paddle().x, 0.0);
    }
}
