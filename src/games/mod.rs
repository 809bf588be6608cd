pub mod arkanoid;
pub mod dino_run;
pub mod geometry;
pub mod session;
pub mod snake;
pub mod surface;

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::games::surface::Surface;

pub const SCORE_STEP: u32 = 10;

/// Which input listener an engine registers while a run is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputScope {
    /// Window-level keyboard listener.
    Keyboard,
    /// Pointer movement over the engine's own surface.
    Pointer,
}

/// One mini-game engine. `update` is a stateful step function: the host
/// calls it exactly once per `TICK_INTERVAL` while a run is live.
pub trait Game {
    const TITLE: &'static str;
    const TICK_INTERVAL: Duration;
    const INPUT_SCOPE: InputScope;

    fn update(&mut self);
    fn handle_input(&mut self, _key: KeyEvent) {}
    fn handle_pointer(&mut self, _x: f32) {}
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
    fn surface(&self) -> &Surface;

    /// Extra status-bar text shown next to the score.
    fn status(&self) -> String {
        String::new()
    }
}
