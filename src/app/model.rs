use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::InputStats;
use crate::config::Config;
use crate::format::ResultFormat;

use super::notifications::NotificationQueue;

/// Free-form UI metadata for one panel. Updated by shallow merge.
pub type PanelState = serde_json::Map<String, Value>;

/// Color scheme applied at the document root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Percentage of horizontal space given to the left panel, in `10..=90`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelRatio(u8);

impl PanelRatio {
    pub const MIN: u8 = 10;
    pub const MAX: u8 = 90;

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for PanelRatio {
    fn default() -> Self {
        Self(50)
    }
}

impl fmt::Display for PanelRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("panel ratio {0} is outside {min}..={max}", min = PanelRatio::MIN, max = PanelRatio::MAX)]
pub struct RatioOutOfRange(pub i64);

impl TryFrom<i64> for PanelRatio {
    type Error = RatioOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(RatioOutOfRange(value)),
        }
    }
}

fn default_left_panel_state() -> PanelState {
    let mut state = PanelState::new();
    state.insert("isExpanded".into(), Value::Bool(true));
    state.insert("activeTab".into(), Value::from("input"));
    state.insert("lastFocusTime".into(), Value::Null);
    state
}

fn default_right_panel_state() -> PanelState {
    let mut state = PanelState::new();
    state.insert("isExpanded".into(), Value::Bool(true));
    state.insert("activeTab".into(), Value::from("result"));
    state
}

/// The complete application state.
///
/// Fields are only written by [`update`](super::update) and by hydration;
/// consumers get read access through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(super) input_text: String,
    pub(super) selected_format: ResultFormat,
    pub(super) current_theme: Theme,
    pub(super) panel_ratio: PanelRatio,
    pub(super) left_panel_state: PanelState,
    pub(super) right_panel_state: PanelState,
    pub(super) config: Config,
    pub(super) notifications: NotificationQueue,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            selected_format: ResultFormat::default(),
            current_theme: Theme::default(),
            panel_ratio: PanelRatio::default(),
            left_panel_state: default_left_panel_state(),
            right_panel_state: default_right_panel_state(),
            config: Config::default(),
            notifications: NotificationQueue::default(),
        }
    }
}

impl Model {
    /// Text in the input panel.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Format used for the result panel.
    pub const fn selected_format(&self) -> ResultFormat {
        self.selected_format
    }

    /// Active theme.
    pub const fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Left panel width in percent.
    pub const fn panel_ratio(&self) -> PanelRatio {
        self.panel_ratio
    }

    /// Left panel UI metadata.
    pub const fn left_panel_state(&self) -> &PanelState {
        &self.left_panel_state
    }

    /// Right panel UI metadata.
    pub const fn right_panel_state(&self) -> &PanelState {
        &self.right_panel_state
    }

    /// User settings.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Live notifications, oldest first.
    pub const fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Live statistics for the input panel against the configured limit.
    pub fn input_stats(&self) -> InputStats {
        InputStats::compute(&self.input_text, self.config.max_input_length)
    }

    /// Whether `text` fits within the configured input limit.
    pub(super) fn fits_input_limit(&self, text: &str) -> bool {
        text.chars().count() <= self.config.max_input_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_ratio_bounds() {
        assert!(PanelRatio::try_from(9).is_err());
        assert_eq!(PanelRatio::try_from(10).unwrap().get(), 10);
        assert_eq!(PanelRatio::try_from(90).unwrap().get(), 90);
        assert!(PanelRatio::try_from(91).is_err());
        assert!(PanelRatio::try_from(-50).is_err());
        assert!(PanelRatio::try_from(300).is_err());
    }

    #[test]
    fn test_theme_parsing_and_toggle() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("auto".parse::<Theme>().is_err());
        assert!("Dark".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_default_model() {
        let model = Model::default();
        assert_eq!(model.input_text(), "");
        assert_eq!(model.selected_format(), ResultFormat::Text);
        assert_eq!(model.current_theme(), Theme::Dark);
        assert_eq!(model.panel_ratio().get(), 50);
        assert_eq!(model.left_panel_state()["activeTab"], "input");
        assert!(model.left_panel_state()["lastFocusTime"].is_null());
        assert_eq!(model.right_panel_state()["activeTab"], "result");
        assert_eq!(model.config().max_input_length, 50_000);
        assert!(model.notifications().is_empty());
    }
}
