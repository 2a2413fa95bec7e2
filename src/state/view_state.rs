//! Derived view state consumed by the presentation layer

use serde::{Deserialize, Serialize};

use super::TimerMode;

/// Screen colours used by the countdown display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Orange,
}

/// Background and text colour shown together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub background: Color,
    pub text: Color,
}

/// Which threshold band the remaining time falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Normal,
    Warning,
    Final,
}

/// Two-state blink phase, only advanced while in the final band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkPhase {
    #[default]
    Off,
    On,
}

impl BlinkPhase {
    pub fn toggled(self) -> Self {
        match self {
            BlinkPhase::Off => BlinkPhase::On,
            BlinkPhase::On => BlinkPhase::Off,
        }
    }
}

impl ColorPair {
    /// Red digits on black
    pub const NORMAL: ColorPair = ColorPair { background: Color::Black, text: Color::Red };
    /// Red digits on orange
    pub const WARNING: ColorPair = ColorPair { background: Color::Orange, text: Color::Red };
    /// Inverted flash frame: black digits on red
    pub const FLASH: ColorPair = ColorPair { background: Color::Red, text: Color::Black };

    /// Colour lookup as a pure function of band and blink phase
    pub fn for_band(band: Band, phase: BlinkPhase) -> Self {
        match (band, phase) {
            (Band::Normal, _) => Self::NORMAL,
            (Band::Warning, _) => Self::WARNING,
            (Band::Final, BlinkPhase::On) => Self::FLASH,
            (Band::Final, BlinkPhase::Off) => Self::NORMAL,
        }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Seconds remaining, `None` on the selection screen
    pub time_left: Option<u64>,
    pub is_running: bool,
    pub mode: TimerMode,
    pub colors: ColorPair,
    pub warning_threshold: u64,
    pub final_threshold: u64,
    pub is_warning: bool,
    pub is_final: bool,
    pub show_controls: bool,
}

impl ViewState {
    /// View for the duration selection screen
    pub fn idle() -> Self {
        Self {
            time_left: None,
            is_running: false,
            mode: TimerMode::Idle,
            colors: ColorPair::NORMAL,
            warning_threshold: 0,
            final_threshold: 0,
            is_warning: false,
            is_final: false,
            show_controls: true,
        }
    }

    pub fn bg_color(&self) -> Color {
        self.colors.background
    }

    pub fn text_color(&self) -> Color {
        self.colors.text
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_band_alternates_with_phase() {
        let off = ColorPair::for_band(Band::Final, BlinkPhase::Off);
        let on = ColorPair::for_band(Band::Final, BlinkPhase::On);
        assert_ne!(off, on);
        assert_eq!(on, ColorPair::for_band(Band::Final, BlinkPhase::Off.toggled()));
    }

    #[test]
    fn test_phase_ignored_outside_final_band() {
        for phase in [BlinkPhase::Off, BlinkPhase::On] {
            assert_eq!(ColorPair::for_band(Band::Normal, phase), ColorPair::NORMAL);
            assert_eq!(ColorPair::for_band(Band::Warning, phase), ColorPair::WARNING);
        }
    }
}
