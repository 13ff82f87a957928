/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Flashquiz.
 *
 * Flashquiz is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Flashquiz is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Flashquiz.  If not, see <http://www.gnu.org/licenses/>.
 */

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Widget, Terminal};

use crate::UiError;

///Owns the terminal for the length of a session. Dropping it puts the
///terminal back the way it was found, in reverse order of setup.
pub struct TerminalWrapper {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    #[allow(unused)]
    hidden_cursor: HiddenCursor,
}

impl TerminalWrapper {
    pub fn new() -> Result<TerminalWrapper, std::io::Error> {
        let raw_mode = RawMode::enable()?;
        let alt_screen = AltScreen::enter(raw_mode)?;
        let hidden_cursor = HiddenCursor::hide(alt_screen)?;
        let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

        Ok(TerminalWrapper {
            terminal,
            hidden_cursor,
        })
    }

    pub fn render_widget(&mut self, widget: impl Widget) -> Result<(), UiError> {
        self.terminal
            .draw(|frame| frame.render_widget(widget, frame.area()))?;
        Ok(())
    }
}

struct RawMode;

impl RawMode {
    fn enable() -> Result<RawMode, std::io::Error> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[repr(transparent)]
struct AltScreen(#[allow(unused)] RawMode);

impl AltScreen {
    fn enter(raw_mode: RawMode) -> Result<Self, std::io::Error> {
        execute!(std::io::stdout(), EnterAlternateScreen)?;
        Ok(Self(raw_mode))
    }
}

impl Drop for AltScreen {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

#[repr(transparent)]
struct HiddenCursor(#[allow(unused)] AltScreen);

impl HiddenCursor {
    fn hide(alt_screen: AltScreen) -> Result<Self, std::io::Error> {
        execute!(std::io::stdout(), Hide)?;
        Ok(Self(alt_screen))
    }
}

impl Drop for HiddenCursor {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), Show);
    }
}
