use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::{
    countdown::RunState,
    input::PLACEHOLDER,
    widget::{Focus, TimerWidget},
};

const PANEL_WIDTH: u16 = 52;
const PANEL_HEIGHT: u16 = 17;
const BUTTON_WIDTH: u16 = 10;
const SET_WIDTH: u16 = 7;

pub const TITLE: &str = "Countdown Timer";
pub const HELP: &str = "(tab) focus (enter) press (s/p/r) (esc) quit";

/// Screen regions of the timer panel
#[derive(Debug, Clone, Copy)]
pub struct PanelLayout {
    pub panel: Rect,
    pub input: Rect,
    pub set: Rect,
    pub display: Rect,
    pub status: Rect,
    pub start: Rect,
    pub pause: Rect,
    pub reset: Rect,
    pub help: Rect,
}

impl PanelLayout {
    pub fn new(area: Rect) -> Self {
        let panel = centered(area, PANEL_WIDTH, PANEL_HEIGHT);
        let inner = Block::default().borders(Borders::ALL).inner(panel);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(1)
            .constraints([
                Constraint::Length(1), // padding
                Constraint::Length(3), // input + set
                Constraint::Length(1), // padding
                Constraint::Length(3), // display
                Constraint::Length(1), // status
                Constraint::Length(3), // buttons
                Constraint::Min(0),
                Constraint::Length(1), // help
            ])
            .split(inner);

        let input_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(SET_WIDTH)])
            .spacing(1)
            .split(rows[1]);

        let buttons = Layout::horizontal([Constraint::Length(BUTTON_WIDTH); 3])
            .flex(Flex::Center)
            .spacing(2)
            .split(rows[5]);

        Self {
            panel,
            input: input_row[0],
            set: input_row[1],
            display: rows[3],
            status: rows[4],
            start: buttons[0],
            pause: buttons[1],
            reset: buttons[2],
            help: rows[7],
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl TimerWidget {
    /// Where the terminal cursor belongs, if the duration field has focus
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        if self.focus != Focus::Input {
            return None;
        }
        let field = Block::default()
            .borders(Borders::ALL)
            .inner(PanelLayout::new(area).input);
        if field.width == 0 || field.height == 0 {
            return None;
        }
        let offset = (self.input.width() as u16).min(field.width - 1);
        Some((field.x + offset, field.y))
    }

    fn status_text(&self) -> &'static str {
        if self.countdown.is_expired() {
            return "Done";
        }
        match self.countdown.run_state() {
            RunState::Idle => "Idle",
            RunState::Running => "Running",
            RunState::Paused => "Paused",
        }
    }
}

fn render_button(label: &str, color: Color, focused: bool, area: Rect, buf: &mut Buffer) {
    let mut label_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let mut border_type = BorderType::Plain;
    if focused {
        label_style = label_style.add_modifier(Modifier::REVERSED);
        border_type = BorderType::Thick;
    }

    Paragraph::new(Span::styled(label.to_string(), label_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(color)),
        )
        .render(area, buf);
}

impl Widget for &TimerWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PanelLayout::new(area);
        let countdown = &self.countdown;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let title_style = Style::default().patch(bold_style).fg(Color::LightMagenta);
        let display_style = Style::default().patch(bold_style).fg(Color::Blue);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let placeholder_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(Span::styled(TITLE, title_style)).centered())
            .render(layout.panel, buf);

        let field = if self.input.is_empty() {
            Span::styled(PLACEHOLDER, placeholder_style)
        } else {
            Span::raw(self.input.text().to_string())
        };
        let field_border = if self.focus == Focus::Input {
            Style::default().fg(Color::Cyan)
        } else {
            dim_style
        };
        Paragraph::new(field)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(field_border),
            )
            .render(layout.input, buf);

        render_button(
            "Set",
            Color::Magenta,
            self.focus == Focus::Set,
            layout.set,
            buf,
        );

        // spaced out digits read larger
        let readout = countdown
            .display()
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Paragraph::new(Span::styled(readout, display_style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP | Borders::BOTTOM)
                    .border_style(dim_style),
            )
            .render(layout.display, buf);

        Paragraph::new(Span::styled(self.status_text(), dim_style))
            .alignment(Alignment::Center)
            .render(layout.status, buf);

        render_button(
            countdown.primary_label(),
            Color::Green,
            self.focus == Focus::Start,
            layout.start,
            buf,
        );
        render_button(
            "Pause",
            Color::Red,
            self.focus == Focus::Pause,
            layout.pause,
            buf,
        );
        render_button(
            "Reset",
            Color::Yellow,
            self.focus == Focus::Reset,
            layout.reset,
            buf,
        );

        Paragraph::new(Span::styled(HELP, italic_style))
            .alignment(Alignment::Center)
            .render(layout.help, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(centered(area, 52, 17), area);

        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 52, 17), Rect::new(24, 11, 52, 17));
    }

    #[test]
    fn layout_places_buttons_left_to_right() {
        let layout = PanelLayout::new(Rect::new(0, 0, 80, 24));
        assert!(layout.start.x < layout.pause.x);
        assert!(layout.pause.x < layout.reset.x);
        assert_eq!(layout.start.width, BUTTON_WIDTH);
        assert!(layout.input.x < layout.set.x);
        assert!(layout.display.y > layout.input.y);
        assert!(layout.start.y > layout.display.y);
    }

    #[test]
    fn cursor_follows_typed_text() {
        let area = Rect::new(0, 0, 80, 24);
        let mut widget = TimerWidget::new();
        let (x0, y0) = widget.cursor_position(area).unwrap();

        widget.type_char('4');
        widget.type_char('2');
        let (x1, y1) = widget.cursor_position(area).unwrap();
        assert_eq!(x1, x0 + 2);
        assert_eq!(y1, y0);

        widget.focus = Focus::Set;
        assert_eq!(widget.cursor_position(area), None);
    }
}
