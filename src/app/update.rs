use chrono::{DateTime, Utc};

use crate::app::Model;
use crate::app::model::{PanelRatio, PanelState, Theme};
use crate::app::notifications::{NotificationId, NotificationKind};
use crate::config::ConfigPatch;
use crate::format::ResultFormat;

/// Every state change the store accepts.
///
/// Format and theme arrive by name, as the presentation layer sends them;
/// unknown names are rejected by [`update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Replace the input text (rejected above the configured length limit)
    SetInputText(String),
    /// Select the result format by name
    SetFormat(String),
    /// Select the theme by name
    SetTheme(String),
    /// Set the left panel's share of the width, in percent
    SetPanelRatio(i64),
    /// Shallow-merge into the left panel's UI metadata
    MergeLeftPanelState(PanelState),
    /// Shallow-merge into the right panel's UI metadata
    MergeRightPanelState(PanelState),
    /// Shallow-merge into the config
    MergeConfig(ConfigPatch),
    /// Append a notification created at `at`
    AddNotification {
        message: String,
        kind: NotificationKind,
        at: DateTime<Utc>,
    },
    /// Remove a notification by id
    RemoveNotification(NotificationId),
}

impl Message {
    /// Short name for logging, without the payload.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetInputText(_) => "set_input_text",
            Self::SetFormat(_) => "set_format",
            Self::SetTheme(_) => "set_theme",
            Self::SetPanelRatio(_) => "set_panel_ratio",
            Self::MergeLeftPanelState(_) => "merge_left_panel_state",
            Self::MergeRightPanelState(_) => "merge_right_panel_state",
            Self::MergeConfig(_) => "merge_config",
            Self::AddNotification { .. } => "add_notification",
            Self::RemoveNotification(_) => "remove_notification",
        }
    }
}

/// What [`update`] did with a message.
///
/// Rejection is not an error: the state is simply left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A notification was appended under this id.
    Added(NotificationId),
    Rejected,
}

impl Outcome {
    pub const fn is_applied(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Apply `msg` to `model`.
///
/// This is the only place state transitions happen. It validates, mutates,
/// and reports; persistence and other side effects belong to the store.
pub fn update(model: &mut Model, msg: Message) -> Outcome {
    match msg {
        Message::SetInputText(text) => {
            if !model.fits_input_limit(&text) {
                return Outcome::Rejected;
            }
            model.input_text = text;
        }
        Message::SetFormat(name) => {
            let Ok(format) = name.parse::<ResultFormat>() else {
                return Outcome::Rejected;
            };
            model.selected_format = format;
        }
        Message::SetTheme(name) => {
            let Ok(theme) = name.parse::<Theme>() else {
                return Outcome::Rejected;
            };
            model.current_theme = theme;
        }
        Message::SetPanelRatio(value) => {
            let Ok(ratio) = PanelRatio::try_from(value) else {
                return Outcome::Rejected;
            };
            model.panel_ratio = ratio;
        }
        Message::MergeLeftPanelState(partial) => {
            model.left_panel_state.extend(partial);
        }
        Message::MergeRightPanelState(partial) => {
            model.right_panel_state.extend(partial);
        }
        Message::MergeConfig(patch) => {
            model.config.merge(&patch);
        }
        Message::AddNotification { message, kind, at } => {
            return Outcome::Added(model.notifications.push(message, kind, at));
        }
        Message::RemoveNotification(id) => {
            if !model.notifications.remove(id) {
                return Outcome::Rejected;
            }
        }
    }
    Outcome::Applied
}
