use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use log::info;
use ratatui::layout::Rect;

use crate::config::{Config, GameKind};
use crate::games::arkanoid::Arkanoid;
use crate::games::dino_run::DinoRun;
use crate::games::session::{Phase, Session, SessionHandle, Sinks};
use crate::games::snake::Snake;
use crate::games::InputScope;

pub const GAME_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Home,
    Snake,
    Arkanoid,
    DinoRun,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Snake, Tab::Arkanoid, Tab::DinoRun]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => " Home ",
            Tab::Snake => " Snake ",
            Tab::Arkanoid => " Arkanoid ",
            Tab::DinoRun => " Dino Run ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Snake => 1,
            Tab::Arkanoid => 2,
            Tab::DinoRun => 3,
        }
    }

    fn game(index: usize) -> Tab {
        match index {
            0 => Tab::Snake,
            1 => Tab::Arkanoid,
            _ => Tab::DinoRun,
        }
    }
}

impl From<GameKind> for Tab {
    fn from(kind: GameKind) -> Self {
        match kind {
            GameKind::Snake => Tab::Snake,
            GameKind::Arkanoid => Tab::Arkanoid,
            GameKind::Dino => Tab::DinoRun,
        }
    }
}

/// What the host shows for the running game, fed only through the sinks.
#[derive(Clone, Default)]
pub struct Scoreboard {
    score: Rc<Cell<u32>>,
    game_over: Rc<Cell<bool>>,
}

impl Scoreboard {
    pub fn score(&self) -> u32 {
        self.score.get()
    }

    pub fn game_over(&self) -> bool {
        self.game_over.get()
    }

    fn clear(&self) {
        self.score.set(0);
        self.game_over.set(false);
    }

    fn sinks(&self) -> Sinks {
        let score = Rc::clone(&self.score);
        let game_over = Rc::clone(&self.game_over);
        Sinks::new(move |s| score.set(s), move |g| game_over.set(g))
    }
}

/// Map a terminal cell inside `area` to a logical x on a surface `width` wide.
pub fn pointer_x(area: Rect, column: u16, row: u16, width: f32) -> Option<f32> {
    if area.width == 0 || column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
        return None;
    }
    let cell = (column - area.x) as f32 + 0.5;
    Some(cell / area.width as f32 * width)
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    pub session: Option<Box<dyn SessionHandle>>,
    pub scoreboard: Scoreboard,
    /// Inner area of the game canvas from the last frame, for pointer mapping.
    pub canvas_area: Rect,
    config: Config,
    sessions_opened: u64,
}

impl App {
    pub fn new(config: Config) -> Self {
        let start = config.game.map(Tab::from);
        let mut app = Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            session: None,
            scoreboard: Scoreboard::default(),
            canvas_area: Rect::default(),
            config,
            sessions_opened: 0,
        };
        if let Some(tab) = start {
            app.switch_tab(tab);
        }
        app
    }

    pub fn phase(&self) -> Option<Phase> {
        self.session.as_ref().map(|s| s.phase())
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.pump(now);
        }
    }

    /// Leave the current tab. The old session is dropped, which tears it down.
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        self.session = None;
        self.scoreboard.clear();
        self.current_tab = tab;
        self.session = self.open_session(tab);
    }

    fn open_session(&mut self, tab: Tab) -> Option<Box<dyn SessionHandle>> {
        if tab == Tab::Home {
            return None;
        }
        let rng = self.config.rng(self.sessions_opened);
        self.sessions_opened += 1;
        self.selected_game = tab.index() - 1;
        let sinks = self.scoreboard.sinks();
        let session: Box<dyn SessionHandle> = match tab {
            Tab::Snake => Box::new(Session::new(Snake::new(rng), sinks)),
            Tab::Arkanoid => Box::new(Session::new(Arkanoid::new(), sinks)),
            _ => Box::new(Session::new(DinoRun::new(rng), sinks)),
        };
        info!("opened {}", session.title());
        Some(session)
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if self.current_tab == Tab::Home => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                self.switch_tab(Tab::Home);
                return;
            }
            _ => {}
        }

        if self.current_tab == Tab::Home {
            self.on_home_key(key);
            return;
        }

        let Some(session) = self.session.as_mut() else { return };
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => session.start(),
            KeyCode::Enter if session.phase() != Phase::Running => session.start(),
            _ => session.key(key),
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('1') => self.switch_tab(Tab::Snake),
            KeyCode::Char('2') => self.switch_tab(Tab::Arkanoid),
            KeyCode::Char('3') => self.switch_tab(Tab::DinoRun),
            KeyCode::Right | KeyCode::Down => {
                self.selected_game = (self.selected_game + 1) % GAME_COUNT;
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_game = (self.selected_game + GAME_COUNT - 1) % GAME_COUNT;
            }
            KeyCode::Enter => self.switch_tab(Tab::game(self.selected_game)),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let area = self.canvas_area;
        let Some(session) = self.session.as_mut() else { return };
        if session.input_scope() != InputScope::Pointer {
            return;
        }
        if let Some(x) = pointer_x(area, mouse.column, mouse.row, session.surface().width()) {
            session.pointer(x);
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_tab(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_tab(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
