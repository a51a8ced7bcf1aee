pub mod charting;
pub mod layout;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::{App, Button};
use charting::{format_duration, SeriesChart};
use layout::AppLayout;

/// Draw the whole screen and remember where the buttons landed for clicks.
pub fn draw(app: &mut App, f: &mut Frame) {
    let area = f.area();
    app.button_areas = AppLayout::new(area).buttons;
    f.render_widget(&*app, area);
}

fn button_style(button: Button, enabled: bool) -> Style {
    if !enabled {
        return Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
    }
    let color = match button {
        Button::Start => Color::Green,
        Button::Stop => Color::Yellow,
        Button::Reset => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = AppLayout::new(area);
        let metrics = self.metrics();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        Paragraph::new(Span::styled(
            format!("Global Letter Count: {}", metrics.letter_count),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(layout.count_label, buf);

        Paragraph::new(Span::styled(
            format!("Typing Speed: {} CPM", metrics.speed_cpm as u64),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(layout.speed_label, buf);

        let mut status = vec![if metrics.tracking {
            Span::styled("● tracking", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ stopped", Style::default().fg(Color::Gray))
        }];
        if let Some(started) = self.started_wall {
            status.push(Span::raw(format!(
                "   session since {}",
                started.format("%H:%M:%S")
            )));
        }
        status.push(Span::raw(format!(
            "   active {}",
            format_duration(metrics.active_duration)
        )));
        if let Some(err) = &self.observer_error {
            status.push(Span::styled(
                format!("   observer: {err}"),
                Style::default().fg(Color::Red),
            ));
        }
        Paragraph::new(Line::from(status))
            .style(italic_style)
            .alignment(Alignment::Center)
            .render(layout.status, buf);

        for (button, rect) in [Button::Start, Button::Stop, Button::Reset]
            .into_iter()
            .zip(layout.buttons)
        {
            let style = button_style(button, self.is_enabled(button));
            Paragraph::new(button.to_string())
                .style(style)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(style),
                )
                .render(rect, buf);
        }

        let count_points = self.history.count_points();
        SeriesChart {
            title: "Letter Count Over Time",
            name: "Letter Count",
            y_title: "Count",
            color: Color::Blue,
            points: &count_points,
        }
        .build()
        .render(layout.count_chart, buf);

        let speed_points = self.history.speed_points();
        SeriesChart {
            title: "Typing Speed Over Time",
            name: "Typing Speed (CPM)",
            y_title: "CPM",
            color: Color::Red,
            points: &speed_points,
        }
        .build()
        .render(layout.speed_chart, buf);

        Paragraph::new(Span::styled(
            "(F1) start / (F2) stop / (F3) reset / (esc) quit, or click a button",
            italic_style,
        ))
        .render(layout.legend, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn typed_app() -> App {
        let mut app = App::new();
        let t0 = Instant::now();
        app.apply(Action::Start, t0);
        for s in 0..3 {
            app.tracker.on_keystroke(t0 + Duration::from_secs(s));
        }
        crate::sampler::sample(&app.tracker, &mut app.history, t0 + Duration::from_secs(3));
        app
    }

    #[test]
    fn test_render_initial_screen() {
        let app = App::new();
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("Global Letter Count: 0"));
        assert!(text.contains("Typing Speed: 0 CPM"));
        assert!(text.contains("Start Tracking"));
        assert!(text.contains("Stop Tracking"));
        assert!(text.contains("Reset Counters"));
        assert!(text.contains("Letter Count Over Time"));
        assert!(text.contains("Typing Speed Over Time"));
        assert!(text.contains("stopped"));
    }

    #[test]
    fn test_render_shows_metrics() {
        let app = typed_app();
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("Global Letter Count: 3"));
        assert!(text.contains("Typing Speed: 90 CPM"));
        assert!(text.contains("tracking"));
        assert!(text.contains("active 2s"));
    }

    #[test]
    fn test_disabled_button_is_dimmed() {
        let app = typed_app();
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let [start, stop, _] = AppLayout::new(area).buttons;
        let start_cell = &buffer[(start.x, start.y)];
        let stop_cell = &buffer[(stop.x, stop.y)];
        assert_eq!(start_cell.fg, Color::DarkGray);
        assert_eq!(stop_cell.fg, Color::Yellow);
    }

    #[test]
    fn test_draw_records_button_areas_and_survives_resize() {
        let mut app = typed_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        let small = app.button_areas;
        assert_eq!(small, AppLayout::new(Rect::new(0, 0, 80, 24)).buttons);

        terminal.backend_mut().resize(140, 50);
        terminal.autoresize().unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        assert_eq!(app.button_areas, AppLayout::new(Rect::new(0, 0, 140, 50)).buttons);
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let app = typed_app();
        for (w, h) in [(1, 1), (10, 5), (30, 8)] {
            let area = Rect::new(0, 0, w, h);
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
        }
    }
}
