use ratatui::layout::{Constraint, Direction, Layout, Rect};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const BUTTON_WIDTH: u16 = 20;

/// Screen regions, recomputed from the frame size on every draw so the
/// charts always fill whatever the terminal gives us.
///
/// ```text
/// Global Letter Count: N
/// Typing Speed: N CPM
/// status
/// [Start] [Stop] [Reset]
/// +----- count chart -----+
/// +----- speed chart -----+
/// legend
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub count_label: Rect,
    pub speed_label: Rect,
    pub status: Rect,
    /// start, stop, reset
    pub buttons: [Rect; 3],
    pub count_chart: Rect,
    pub speed_chart: Rect,
    pub legend: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // count
                Constraint::Length(1), // speed
                Constraint::Length(1), // status
                Constraint::Length(3), // buttons
                Constraint::Min(0),    // charts
                Constraint::Length(1), // legend
            ])
            .split(area);

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Min(0),
            ])
            .spacing(2u16)
            .split(rows[3]);

        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[4]);

        Self {
            count_label: rows[0],
            speed_label: rows[1],
            status: rows[2],
            buttons: [buttons[0], buttons[1], buttons[2]],
            count_chart: charts[0],
            speed_chart: charts[1],
            legend: rows[5],
        }
    }
}
