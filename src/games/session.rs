use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use log::{debug, info};

use crate::games::surface::Surface;
use crate::games::{Game, InputScope};

/// Host-supplied receivers for score and game-over changes.
pub struct Sinks {
    score: Box<dyn FnMut(u32)>,
    game_over: Box<dyn FnMut(bool)>,
}

impl Sinks {
    pub fn new(score: impl FnMut(u32) + 'static, game_over: impl FnMut(bool) + 'static) -> Self {
        Self {
            score: Box::new(score),
            game_over: Box::new(game_over),
        }
    }
}

/// Fixed-interval scheduler. Fires at most once per `due` call and never
/// catches up on intervals it missed.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(at) if now >= at => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Over,
    TornDown,
}

/// One run-able instance of a game. Owns the engine state exclusively,
/// along with the sinks, the tick timer and the input listener it
/// registers for a live run.
pub struct Session<G: Game> {
    game: G,
    sinks: Option<Sinks>,
    ticker: Ticker,
    listening: bool,
    phase: Phase,
    published: Option<(u32, bool)>,
}

impl<G: Game> Session<G> {
    pub fn new(game: G, sinks: Sinks) -> Self {
        Self {
            game,
            sinks: Some(sinks),
            ticker: Ticker::new(G::TICK_INTERVAL),
            listening: false,
            phase: Phase::Idle,
            published: None,
        }
    }

    #[cfg(test)]
    pub fn game(&self) -> &G {
        &self.game
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Start a fresh run, or restart the current one.
    pub fn start(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.release();
        self.game.reset();
        self.published = None;
        self.publish();
        self.listening = true;
        self.ticker.arm(Instant::now());
        self.phase = Phase::Running;
        info!("{}: run started", G::TITLE);
    }

    /// Host scheduling hook. Runs one tick if the timer is due.
    pub fn pump(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running || !self.ticker.due(now) {
            return false;
        }
        self.step();
        true
    }

    /// Run exactly one tick regardless of the timer.
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.game.update();
        self.settle();
    }

    pub fn key(&mut self, key: KeyEvent) {
        if !self.listening || G::INPUT_SCOPE != InputScope::Keyboard {
            return;
        }
        self.game.handle_input(key);
        self.settle();
    }

    pub fn pointer(&mut self, x: f32) {
        if !self.listening || G::INPUT_SCOPE != InputScope::Pointer {
            return;
        }
        self.game.handle_pointer(x);
        self.settle();
    }

    /// Release listeners and timer and drop the sinks. The session stays
    /// inert afterwards.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.release();
        self.sinks = None;
        self.phase = Phase::TornDown;
        info!("{}: session torn down", G::TITLE);
    }

    fn settle(&mut self) {
        self.publish();
        if self.phase == Phase::Running && self.game.is_game_over() {
            self.release();
            self.phase = Phase::Over;
            info!("{}: game over, score {}", G::TITLE, self.game.get_score());
        }
    }

    fn release(&mut self) {
        if self.listening || self.ticker.is_armed() {
            debug!("{}: releasing listener and timer", G::TITLE);
        }
        self.listening = false;
        self.ticker.disarm();
    }

    fn publish(&mut self) {
        let Some(sinks) = self.sinks.as_mut() else { return };
        let now = (self.game.get_score(), self.game.is_game_over());
        let (old_score, old_over) = match self.published {
            Some((s, o)) => (Some(s), Some(o)),
            None => (None, None),
        };
        if old_score != Some(now.0) {
            (sinks.score)(now.0);
        }
        if old_over != Some(now.1) {
            (sinks.game_over)(now.1);
        }
        self.published = Some(now);
    }
}

impl<G: Game> Drop for Session<G> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Object-safe view of a session so the host can hold any game.
pub trait SessionHandle {
    fn title(&self) -> &'static str;
    fn input_scope(&self) -> InputScope;
    fn phase(&self) -> Phase;
    fn surface(&self) -> &Surface;
    fn status(&self) -> String;
    fn start(&mut self);
    fn pump(&mut self, now: Instant) -> bool;
    fn key(&mut self, key: KeyEvent);
    fn pointer(&mut self, x: f32);
}

impl<G: Game> SessionHandle for Session<G> {
    fn title(&self) -> &'static str {
        G::TITLE
    }

    fn input_scope(&self) -> InputScope {
        G::INPUT_SCOPE
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn surface(&self) -> &Surface {
        self.game.surface()
    }

    fn status(&self) -> String {
        self.game.status()
    }

    fn start(&mut self) {
        Session::start(self)
    }

    fn pump(&mut self, now: Instant) -> bool {
        Session::pump(self, now)
    }

    fn key(&mut self, key: KeyEvent) {
        Session::key(self, key)
    }

    fn pointer(&mut self, x: f32) {
        Session::pointer(self, x)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[derive(Default)]
    pub(crate) struct Recorder {
        pub scores: Rc<RefCell<Vec<u32>>>,
        pub overs: Rc<RefCell<Vec<bool>>>,
    }

    impl Recorder {
        pub fn sinks(&self) -> Sinks {
            let scores = Rc::clone(&self.scores);
            let overs = Rc::clone(&self.overs);
            Sinks::new(
                move |s| scores.borrow_mut().push(s),
                move |o| overs.borrow_mut().push(o),
            )
        }

        pub fn calls(&self) -> usize {
            self.scores.borrow().len() + self.overs.borrow().len()
        }
    }

    /// Scores on every tick and ends after `lives` ticks; counts key presses.
    struct Countdown {
        lives: u32,
        ticks: u32,
        keys: u32,
        surface: Surface,
    }

    impl Countdown {
        fn new(lives: u32) -> Self {
            Self { lives, ticks: 0, keys: 0, surface: Surface::new(10.0, 10.0) }
        }
    }

    impl Game for Countdown {
        const TITLE: &'static str = "Countdown";
        const TICK_INTERVAL: Duration = Duration::from_millis(50);
        const INPUT_SCOPE: InputScope = InputScope::Keyboard;

        fn update(&mut self) {
            self.ticks += 1;
        }

        fn handle_input(&mut self, _key: KeyEvent) {
            self.keys += 1;
        }

        fn reset(&mut self) {
            self.ticks = 0;
            self.keys = 0;
        }

        fn get_score(&self) -> u32 {
            self.ticks * 10
        }

        fn is_game_over(&self) -> bool {
            self.ticks >= self.lives
        }

        fn surface(&self) -> &Surface {
            &self.surface
        }
    }

    fn space() -> KeyEvent {
        KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)
    }

    #[test]
    fn ticker_skips_missed_intervals() {
        let start = Instant::now();
        let mut t = Ticker::new(Duration::from_millis(16));
        assert!(!t.due(start + Duration::from_secs(1)));

        t.arm(start);
        assert!(!t.due(start + Duration::from_millis(10)));
        assert!(t.due(start + Duration::from_millis(100)));
        // No backlog for the five intervals that were missed.
        assert!(!t.due(start + Duration::from_millis(101)));
        assert!(t.due(start + Duration::from_millis(116)));

        t.disarm();
        assert!(!t.due(start + Duration::from_secs(5)));
    }

    #[test]
    fn idle_session_ignores_ticks_and_input() {
        let rec = Recorder::default();
        let mut s = Session::new(Countdown::new(3), rec.sinks());
        s.step();
        s.key(space());
        assert_eq!(s.game().ticks, 0);
        assert_eq!(s.game().keys, 0);
        assert_eq!(rec.calls(), 0);
        assert!(!s.is_listening());
    }

    #[test]
    fn start_publishes_zero_and_registers_listener() {
        let rec = Recorder::default();
        let mut s = Session::new(Countdown::new(3), rec.sinks());
        s.start();
        assert_eq!(*rec.scores.borrow(), vec![0]);
        assert_eq!(*rec.overs.borrow(), vec![false]);
        assert!(s.is_listening());
        assert!(s.is_ticking());
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn pump_runs_at_most_one_tick() {
        let rec = Recorder::default();
        let mut s = Session::new(Countdown::new(10), rec.sinks());
        s.start();
        let later = Instant::now() + Duration::from_secs(2);
        assert!(s.pump(later));
        assert!(!s.pump(later));
        assert_eq!(s.game().ticks, 1);
    }

    #[test]
    fn game_over_releases_listener_and_timer() {
        let rec = Recorder::default();
        let mut s = Session::new(Countdown::new(2), rec.sinks());
        s.start();
        s.step();
        s.step();
        assert_eq!(s.phase(), Phase::Over);
        assert!(!s.is_listening());
        assert!(!s.is_ticking());
        assert_eq!(*rec.scores.borrow(), vec![0, 10, 20]);
        assert_eq!(*rec.overs.borrow(), vec![false, true]);

        s.step();
        s.key(space());
        assert_eq!(s.game().ticks, 2);
        assert_eq!(s.game().keys, 0);
    }

    #[test]
    fn restart_resets_score_and_flag() {
        let rec = Recorder::default();
        let mut s = Session::new(Countdown::new(1), rec.sinks());
        s.start();
        s.step();
        assert_eq!(s.phase(), Phase::Over);

        s.start();
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(rec.scores.borrow().last(), Some(&0));
        assert_eq!(rec.overs.borrow().last(), Some(&false));
        assert_eq!(s.game().ticks, 0);
    }

    #[test]
    fn torn_down_session_never_calls_sinks_again() {
        let rec = Recorder::default();
        let mut s = Session::new(Countdown::new(5), rec.sinks());
        s.start();
        s.step();
        let before = rec.calls();

        s.teardown();
        assert!(!s.is_listening());
        assert!(!s.is_ticking());
        s.step();
        s.key(space());
        s.start();
        assert!(!s.pump(Instant::now() + Duration::from_secs(1)));

        assert_eq!(rec.calls(), before);
        assert_eq!(s.game().ticks, 1);
        assert_eq!(s.phase(), Phase::TornDown);
    }

    #[test]
    fn dropping_a_session_releases_its_sinks() {
        let rec = Recorder::default();
        let s = Session::new(Countdown::new(5), rec.sinks());
        assert_eq!(Rc::strong_count(&rec.scores), 2);
        drop(s);
        assert_eq!(Rc::strong_count(&rec.scores), 1);
        assert_eq!(Rc::strong_count(&rec.overs), 1);
    }
}
