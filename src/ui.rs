pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Paragraph, Widget, Wrap,
    },
    Frame,
};

use holdfast::{aids::CircleCue, game::GameState, menu::SettingsMenu};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const CIRCLE_HEIGHT: u16 = 12;

/// Entry point used by the run loop
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(app.machine.state()).render(app, f);
}

fn frame_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::DIM))
        .title(title)
}

/// Text lines of the current frame, centred, with the circle aid underneath
pub struct GameView<'a> {
    pub lines: &'a [String],
    pub circle: Option<CircleCue>,
    pub faulted: bool,
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = frame_block(" holdfast ");
        let inner = block.inner(area);
        block.render(area, buf);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let error_style = Style::default().patch(bold_style).fg(Color::Red);

        let text_height = self.lines.len() as u16;
        let circle_height = if self.circle.is_some() {
            CIRCLE_HEIGHT.min(inner.height.saturating_sub(text_height + 1))
        } else {
            0
        };
        let top = inner
            .height
            .saturating_sub(text_height + circle_height + 1)
            / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(top),
                Constraint::Length(text_height),
                Constraint::Length(1),
                Constraint::Length(circle_height),
                Constraint::Min(0),
            ])
            .split(inner);

        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let style = match (self.faulted, idx) {
                    (true, _) => error_style,
                    (false, 0) => bold_style,
                    (false, _) => dim_style,
                };
                Line::from(Span::styled(line.as_str(), style))
            })
            .collect::<Vec<Line>>();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        if let Some(cue) = self.circle {
            let shade = Color::Rgb(cue.alpha, cue.alpha, cue.alpha);
            Canvas::default()
                .marker(Marker::Braille)
                .x_bounds([-1.0, 1.0])
                .y_bounds([-1.0, 1.0])
                .paint(|ctx| {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: 0.9,
                        color: shade,
                    });
                })
                .render(chunks[3], buf);
        }
    }
}

/// The customisation menu
pub struct SettingsView<'a> {
    pub app: &'a App,
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = frame_block(" holdfast: customisation ");
        let inner = block.inner(area);
        block.render(area, buf);

        let entries = SettingsMenu::entries(self.app.machine.settings());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(entries.len() as u16),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Span::styled(
            "Customisation",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let cursor = self.app.menu.cursor();
        let rows = entries
            .into_iter()
            .enumerate()
            .map(|(idx, (label, value))| {
                let base = if idx == cursor {
                    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
                } else {
                    Style::default()
                };
                match value {
                    Some(value) => Line::from(vec![
                        Span::styled(format!("{label}: "), base),
                        Span::styled(value, base.fg(Color::Yellow)),
                    ]),
                    None => Line::from(Span::styled(format!("[ {label} ]"), base.fg(Color::Green))),
                }
            })
            .collect::<Vec<Line>>();

        Paragraph::new(rows)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            "(↑/↓) move / (←/→/space) change / (enter) select / (ctrl+c) quit",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }
}

impl App {
    pub fn game_view(&self) -> GameView<'_> {
        GameView {
            lines: &self.output.lines,
            circle: self.output.circle,
            faulted: self.machine.state() == GameState::Faulted,
        }
    }
}
