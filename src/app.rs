use std::thread::sleep;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use log::info;

use crate::board::{BLOCK, HEIGHT, WIDTH};
use crate::game::{DrawModel, Game, GameStatus, Intent, SessionOutcome};
use crate::score::HighScoreStore;
use crate::snake::Direction;
use crate::term::TermManager;
use crate::{Coords, TermCoords, TermInt};

const GRID_COLS: TermInt = (WIDTH / BLOCK) as TermInt;
const GRID_ROWS: TermInt = (HEIGHT / BLOCK) as TermInt;
const BOARD_LEFT: TermInt = 1;
const BOARD_TOP: TermInt = 2; // row 0 is the status line, row 1 the border
const MIN_TERM_WIDTH: TermInt = GRID_COLS + 2;
const MIN_TERM_HEIGHT: TermInt = GRID_ROWS + 3;

const SNAKE_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const FOOD_COLOR: Color = Color::Rgb { r: 213, g: 50, b: 80 };
const OBSTACLE_COLOR: Color = Color::Rgb { r: 50, g: 153, b: 213 };
const TEXT_COLOR: Color = Color::White;

const SNAKE_BODY_CHAR: char = '█';
const OBSTACLE_CHAR: char = '▒';
const FOOD_CHAR: char = 'O';
const POWER_UP_CHAR: char = '◆';

const INFO_LINES: &[&str] = &[
    "Game info",
    "",
    "Eat the red food to grow; every bite scores a point.",
    "Avoid the walls, the blue obstacles and your own tail.",
    "",
    "Power-ups appear now and then, each lasting 5 seconds:",
    "  Yellow - speed boost",
    "  Purple - slow down",
    "  Orange - score multiplier",
    "  Cyan   - invincibility (walls wrap around)",
    "",
    "Arrow keys or WASD to move, P or Esc to pause.",
    "",
    "B - Back",
];

enum MenuChoice {
    Play,
    HighScore,
    Info,
    Quit,
}

pub struct App {
    term: TermManager,
    store: HighScoreStore,
}

impl App {
    pub fn new() -> Self {
        App { term: TermManager::new(), store: HighScoreStore::new() }
    }

    pub fn run(&mut self) {
        let (w, h) = self.term.get_terminal_size();
        if w < MIN_TERM_WIDTH || h < MIN_TERM_HEIGHT {
            eprintln!(
                "Terminal too small: need at least {}x{}, got {}x{}",
                MIN_TERM_WIDTH, MIN_TERM_HEIGHT, w, h
            );
            return;
        }

        self.term.setup();

        loop {
            match self.main_menu() {
                MenuChoice::Play => {
                    if let SessionOutcome::Quit = self.play() {
                        break;
                    }
                }
                MenuChoice::HighScore => {
                    let high = self.store.load();
                    let value = format!("{}", high);
                    if self.message_screen(&["High score", "", &value, "", "B - Back"]) {
                        break;
                    }
                }
                MenuChoice::Info => {
                    if self.message_screen(INFO_LINES) {
                        break;
                    }
                }
                MenuChoice::Quit => break,
            }
        }

        self.term.restore();
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Runs sessions until the player asks for the menu or quits. Restart
    /// loops here instead of re-entering the session from event handling.
    fn play(&mut self) -> SessionOutcome {
        loop {
            match self.run_session() {
                SessionOutcome::Restart => continue,
                outcome => return outcome,
            }
        }
    }

    fn run_session(&mut self) -> SessionOutcome {
        let mut high = self.store.load();
        let mut game = Game::new(rand::thread_rng(), 0);
        let epoch = Instant::now();
        let mut prev_cells: Vec<Coords> = Vec::new();

        info!("session started, high score {}", high);
        self.draw_static(&game.draw_model(), high);

        loop {
            for ev in self.term.read_key_events_queue() {
                match map_key(&ev) {
                    Some(Intent::Quit) => return SessionOutcome::Quit,
                    Some(Intent::Pause) => {
                        game.apply(Intent::Pause);
                        match self.pause_screen(game.score(), high) {
                            Intent::Resume => game.apply(Intent::Resume),
                            Intent::Restart => return SessionOutcome::Restart,
                            Intent::ToMenu => return SessionOutcome::ToMenu,
                            _ => return SessionOutcome::Quit,
                        }
                    }
                    Some(intent) => game.apply(intent),
                    None => {}
                }
            }

            let now_ms = epoch.elapsed().as_millis() as u64;
            game.tick(now_ms);

            if game.status() == GameStatus::Lost {
                let score = game.score();
                info!("session lost with score {}", score);
                high = self.store.record(score);
                return self.loss_screen(score, high);
            }

            self.render(&game.draw_model(), high, &mut prev_cells);
            sleep(game.tick_interval());
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn main_menu(&mut self) -> MenuChoice {
        self.term.clear();
        self.term.show_message(&[
            "Snake",
            "",
            "P - Play",
            "H - High score",
            "I - Game info",
            "Q - Quit",
        ]);

        loop {
            let ev = self.term.read_key_blocking();
            if is_ctrl_c(&ev) {
                return MenuChoice::Quit;
            }
            match ev.code {
                KeyCode::Char('p') => return MenuChoice::Play,
                KeyCode::Char('h') => return MenuChoice::HighScore,
                KeyCode::Char('i') => return MenuChoice::Info,
                KeyCode::Char('q') => return MenuChoice::Quit,
                _ => {}
            }
        }
    }

    /// Shows a static screen until B is pressed; returns true if the
    /// player asked to quit instead.
    fn message_screen(&mut self, lines: &[&str]) -> bool {
        self.term.clear();
        self.term.show_message(lines);

        loop {
            let ev = self.term.read_key_blocking();
            if is_ctrl_c(&ev) {
                return true;
            }
            match ev.code {
                KeyCode::Char('b') => return false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
        }
    }

    fn pause_screen(&mut self, score: u32, high: u32) -> Intent {
        let score_line = format!("Score: {}", score);
        let high_line = format!("High score: {}", high);
        self.term.show_message(&[
            "Paused",
            "",
            &score_line,
            &high_line,
            "",
            "R - Resume",
            "C - Restart",
            "M - Main menu",
            "Q - Quit",
        ]);

        loop {
            let ev = self.term.read_key_blocking();
            if is_ctrl_c(&ev) {
                return Intent::Quit;
            }
            match ev.code {
                KeyCode::Char('r') => {
                    // Uncovers the board underneath the box
                    self.term.hide_message();
                    return Intent::Resume;
                }
                KeyCode::Char('c') => return Intent::Restart,
                KeyCode::Char('m') => return Intent::ToMenu,
                KeyCode::Char('q') => return Intent::Quit,
                _ => {}
            }
        }
    }

    fn loss_screen(&mut self, score: u32, high: u32) -> SessionOutcome {
        let score_line = format!("Score: {}   High score: {}", score, high);
        self.term.show_message(&[
            "You lost!",
            "",
            &score_line,
            "",
            "C - Play again",
            "M - Main menu",
            "Q - Quit",
        ]);

        loop {
            let ev = self.term.read_key_blocking();
            if is_ctrl_c(&ev) {
                return SessionOutcome::Quit;
            }
            match ev.code {
                KeyCode::Char('c') => return SessionOutcome::Restart,
                KeyCode::Char('m') => return SessionOutcome::ToMenu,
                KeyCode::Char('q') => return SessionOutcome::Quit,
                _ => {}
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_static(&mut self, model: &DrawModel<'_>, high: u32) {
        self.term.clear();
        self.term.draw_frame((BOARD_LEFT - 1, BOARD_TOP - 1), GRID_COLS + 2, GRID_ROWS + 2);

        for &cell in model.obstacles {
            self.term.print_at(cell_to_term(cell), OBSTACLE_CHAR, OBSTACLE_COLOR);
        }

        self.draw_status(model.score, high);
        self.term.flush();
    }

    fn render(&mut self, model: &DrawModel<'_>, high: u32, prev: &mut Vec<Coords>) {
        // Erase last frame's dynamic cells, repainting any obstacle the
        // snake slid over while invincible
        for &cell in prev.iter() {
            let (ch, color) = if model.obstacles.contains(&cell) {
                (OBSTACLE_CHAR, OBSTACLE_COLOR)
            } else {
                (' ', Color::Reset)
            };
            self.term.print_at(cell_to_term(cell), ch, color);
        }
        prev.clear();

        let last = model.snake.len() - 1;
        for (i, &cell) in model.snake.iter().enumerate() {
            let ch = if i == last { head_char(model.heading) } else { SNAKE_BODY_CHAR };
            self.term.print_at(cell_to_term(cell), ch, SNAKE_COLOR);
            prev.push(cell);
        }

        self.term.print_at(cell_to_term(model.food), FOOD_CHAR, FOOD_COLOR);
        prev.push(model.food);

        if let Some(pu) = model.power_up {
            self.term.print_at(cell_to_term(pu.pos), POWER_UP_CHAR, pu.kind.color());
            prev.push(pu.pos);
        }

        self.draw_status(model.score, high);
        self.term.flush();
    }

    fn draw_status(&mut self, score: u32, high: u32) {
        let line = format!("Score: {}   High score: {}", score, high);
        self.term.print_str_at((BOARD_LEFT, 0), &line, TEXT_COLOR);
    }
}

fn cell_to_term((x, y): Coords) -> TermCoords {
    ((x / BLOCK) as TermInt + BOARD_LEFT, (y / BLOCK) as TermInt + BOARD_TOP)
}

fn head_char(heading: Option<Direction>) -> char {
    match heading {
        Some(Direction::Up) => '^',
        Some(Direction::Down) => 'v',
        Some(Direction::Left) => '<',
        Some(Direction::Right) => '>',
        None => SNAKE_BODY_CHAR,
    }
}

fn map_key(ev: &KeyEvent) -> Option<Intent> {
    if is_ctrl_c(ev) {
        return Some(Intent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Intent::Move(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Down => Some(Intent::Move(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Left => Some(Intent::Move(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Right => Some(Intent::Move(Direction::Right)),
        KeyCode::Char('p') | KeyCode::Esc => Some(Intent::Pause),
        KeyCode::Char('q') => Some(Intent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_cells_map_inside_the_frame() {
        assert_eq!(cell_to_term((0, 0)), (BOARD_LEFT, BOARD_TOP));
        assert_eq!(
            cell_to_term((WIDTH - BLOCK, HEIGHT - BLOCK)),
            (BOARD_LEFT + GRID_COLS - 1, BOARD_TOP + GRID_ROWS - 1)
        );
    }

    #[test]
    fn keys_map_to_intents() {
        let key = |code| KeyEvent { code, modifiers: KeyModifiers::empty() };

        assert_eq!(map_key(&key(KeyCode::Up)), Some(Intent::Move(Direction::Up)));
        assert_eq!(map_key(&key(KeyCode::Char('a'))), Some(Intent::Move(Direction::Left)));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Intent::Pause));
        assert_eq!(map_key(&key(KeyCode::Char('q'))), Some(Intent::Quit));
        assert_eq!(map_key(&key(KeyCode::Char('x'))), None);

        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(map_key(&ctrl_c), Some(Intent::Quit));
        assert_eq!(map_key(&key(KeyCode::Char('c'))), None);
    }
}
