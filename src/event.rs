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

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{session::Input, UiError};

///Waits up to `frame` for events, then drains everything already queued so
///fast typing is never dropped between frames. Events stay raw because what a
///key means can change while the batch is being handled.
pub fn poll_events(frame: Duration) -> Result<Vec<Event>, UiError> {
    let mut events = vec![];

    if !event::poll(frame)? {
        return Ok(events);
    }

    loop {
        events.push(event::read()?);

        if !event::poll(Duration::from_millis(0))? {
            break Ok(events);
        }
    }
}

pub fn match_user_input(event: Event, awaiting_continue: bool) -> Option<Input> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            modifiers,
            ..
        }) => match code {
            KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
            KeyCode::Enter => Some(Input::Submit),
            KeyCode::Backspace => Some(Input::Backspace),
            KeyCode::Right => Some(Input::Continue),
            KeyCode::Char(' ') if awaiting_continue => Some(Input::Continue),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Char(c)),
            _ => None,
        },
        _ => None,
    }
}
