use std::thread::sleep;
use std::time::Duration;

use tracing::info;

use crate::config::GameConfig;
use crate::error::Result;
use crate::game_loop::GameLoop;
use crate::input::{map_key, KeyAction};
use crate::render::ScoreSink;
use crate::term::TermManager;

/// Interactive terminal session around a [`GameLoop`]
pub struct SnakeGame {
    frame_interval: Duration,
    paused: bool,
    term: TermManager,
    game: GameLoop,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let term = TermManager::new(config.grid, config.board_size)?;

        Ok(SnakeGame {
            frame_interval: Duration::from_millis(config.frame_ms),
            paused: false,
            term,
            game: GameLoop::new(config),
        })
    }

    /// Takes over the terminal until the player quits. The terminal is handed
    /// back even when the session fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.session();
        let restored = self.term.restore();
        res.and(restored)
    }

    fn session(&mut self) -> Result<()> {
        self.term.clear_screen()?;
        self.term.draw_borders()?;
        self.term.show_score(self.game.state().score);
        self.game.redraw(&mut self.term);
        self.term.present()?;

        if !self.show_intro()? {
            return Ok(());
        }

        info!("game started");

        loop {
            sleep(self.frame_interval);

            for key_ev in self.term.read_key_events_queue()? {
                match map_key(&key_ev) {
                    KeyAction::Turn(dir) if !self.paused => {
                        self.game.request_direction(dir);
                    }
                    KeyAction::Turn(_) => {}
                    KeyAction::TogglePause => self.toggle_pause()?,
                    KeyAction::Restart => {
                        info!(score = self.game.state().score, "restart requested");
                        self.paused = false;
                        self.term.hide_message()?;
                        self.game.restart(&mut self.term);
                        self.term.present()?;
                    }
                    KeyAction::Quit => {
                        info!(score = self.game.state().score, "quit");
                        return Ok(());
                    }
                    KeyAction::None => {}
                }
            }

            if self.paused {
                continue;
            }

            if self.game.frame(&mut self.term).is_some() {
                self.term.present()?;
            }
        }
    }

    /// Returns false if the player quit from the intro screen
    fn show_intro(&mut self) -> Result<bool> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause, R to restart",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = self.term.read_key_blocking()?;
        if map_key(&key) == KeyAction::Quit {
            return Ok(false);
        }

        self.term.hide_message()?;
        Ok(true)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}
