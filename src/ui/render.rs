//! Frame composition and drawing

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::{
    engine::SELECTABLE_DURATIONS,
    state::{Color, ViewState},
};

/// Lines to draw, top to bottom, with their foreground colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub background: style::Color,
    pub lines: Vec<(String, style::Color)>,
}

/// Format seconds as `MM:SS`; minutes are not wrapped into hours
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Red => style::Color::Red,
        Color::Orange => style::Color::Rgb { r: 255, g: 165, b: 0 },
    }
}

/// Build the frame for a view without touching the terminal
pub fn compose(view: &ViewState) -> Frame {
    let Some(time_left) = view.time_left else {
        let options = SELECTABLE_DURATIONS
            .iter()
            .enumerate()
            .map(|(i, minutes)| format!("[{}] {} min", i + 1, minutes))
            .collect::<Vec<_>>()
            .join("  ");

        return Frame {
            background: style::Color::Black,
            lines: vec![
                ("Select a duration".to_string(), style::Color::White),
                (String::new(), style::Color::White),
                (options, style::Color::White),
                (String::new(), style::Color::White),
                ("[q] quit".to_string(), style::Color::DarkGrey),
            ],
        };
    };

    let mut lines = vec![(format_time(time_left), term_color(view.text_color()))];

    if view.show_controls {
        // Dark labels stay readable on the orange warning background
        let control_color = if view.is_warning && !view.is_final {
            style::Color::Black
        } else {
            style::Color::White
        };
        let toggle = if view.is_running { "Pause" } else { "Resume" };
        lines.push((String::new(), control_color));
        lines.push((format!("[space] {}    [r] Reset", toggle), control_color));
    }

    Frame {
        background: term_color(view.bg_color()),
        lines,
    }
}

/// Draw a view centred on the terminal
pub fn draw<W: Write>(out: &mut W, view: &ViewState) -> io::Result<()> {
    let frame = compose(view);
    let (cols, rows) = terminal::size()?;
    let top = rows.saturating_sub(frame.lines.len() as u16) / 2;

    queue!(out, SetBackgroundColor(frame.background), Clear(ClearType::All))?;
    for (i, (text, color)) in frame.lines.iter().enumerate() {
        let x = cols.saturating_sub(text.chars().count() as u16) / 2;
        queue!(out, MoveTo(x, top + i as u16), SetForegroundColor(*color), Print(text))?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ColorPair, TimerMode};

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(570), "09:30");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn test_selection_screen_lists_presets() {
        let frame = compose(&ViewState::idle());
        assert!(frame.lines.iter().any(|(line, _)| line.contains("[9] 60 min")));
    }

    #[test]
    fn test_countdown_frame_uses_view_colors() {
        let view = ViewState {
            time_left: Some(42),
            is_running: false,
            mode: TimerMode::Paused,
            colors: ColorPair::WARNING,
            is_warning: true,
            ..ViewState::idle()
        };
        let frame = compose(&view);
        assert_eq!(frame.background, style::Color::Rgb { r: 255, g: 165, b: 0 });
        assert_eq!(frame.lines[0], ("00:42".to_string(), style::Color::Red));
        assert!(frame.lines[2].0.contains("Resume"));
        assert_eq!(frame.lines[2].1, style::Color::Black);

        let hidden = compose(&ViewState { show_controls: false, ..view });
        assert_eq!(hidden.lines.len(), 1);
    }
}
