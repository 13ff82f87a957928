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

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::session::{SessionStats, View};

const COLOR_CORRECT: Color = Color::Green;
const COLOR_INCORRECT: Color = Color::Red;
const COLOR_HINT: Color = Color::DarkGray;

const QUIT_HINT: &str = "Esc to quit";

pub(crate) struct QuizWidget<'a> {
    view: &'a View<'a>,
    stats: SessionStats,
}

impl<'a> QuizWidget<'a> {
    pub fn new(view: &'a View<'a>, stats: SessionStats) -> Self {
        Self { view, stats }
    }
}

impl Widget for QuizWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (status_area, question_area, answer_area, prompt_area) = {
            let layout = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Ratio(1, 2),
                    Constraint::Ratio(1, 4),
                    Constraint::Min(1),
                ],
            );

            let split = layout.split(area);
            (split[0], split[1], split[2], split[3])
        };

        match self.view {
            View::NameEntry { prompt, input } => {
                Paragraph::new(Line::from(vec![Span::raw(*prompt), Span::raw(input.as_str())]))
                    .wrap(Wrap { trim: false })
                    .centered()
                    .render(question_area, buf);

                hint(QUIT_HINT).render(prompt_area, buf);
            }
            View::Question {
                question,
                prompt,
                input,
            } => {
                status(self.stats).render(status_area, buf);

                Paragraph::new(format!("Question: {question}"))
                    .wrap(Wrap { trim: false })
                    .centered()
                    .render(question_area, buf);

                Paragraph::new(Line::from(vec![Span::raw(*prompt), Span::raw(input.as_str())]))
                    .wrap(Wrap { trim: false })
                    .centered()
                    .render(answer_area, buf);

                hint(QUIT_HINT).render(prompt_area, buf);
            }
            View::Feedback {
                question,
                message,
                positive,
                prompt,
            } => {
                status(self.stats).render(status_area, buf);

                Paragraph::new(format!("Question: {question}"))
                    .wrap(Wrap { trim: false })
                    .centered()
                    .render(question_area, buf);

                let color = if *positive {
                    COLOR_CORRECT
                } else {
                    COLOR_INCORRECT
                };
                Paragraph::new(*message)
                    .wrap(Wrap { trim: false })
                    .centered()
                    .fg(color)
                    .render(answer_area, buf);

                Paragraph::new(*prompt)
                    .wrap(Wrap { trim: false })
                    .centered()
                    .render(prompt_area, buf);
            }
        }
    }
}

fn status(stats: SessionStats) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::raw(format!("Correct: {}", stats.correct)).fg(COLOR_CORRECT),
        Span::raw("  "),
        Span::raw(format!("Wrong: {}", stats.wrong)).fg(COLOR_INCORRECT),
        Span::raw("  "),
        Span::raw(format!("Answered: {}", stats.answered())),
    ]))
    .right_aligned()
}

fn hint(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).centered().fg(COLOR_HINT)
}
