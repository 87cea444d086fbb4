use chrono::{DateTime, Utc};

use crate::app::notifications::NotificationId;
use crate::app::schedule::Task;
use crate::app::{Message, NotificationKind, Outcome, Store};
use crate::clipboard::{ClipboardError, ClipboardSource};
use crate::storage::keys;

/// Side effect owed by an applied message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Effect {
    PersistInputText,
    PersistFormat,
    PersistTheme,
    PersistPanelRatio,
    PersistConfig,
    ScheduleExpiry(DateTime<Utc>),
    CancelExpiry(NotificationId),
    None,
}

impl Effect {
    pub(super) const fn of(msg: &Message) -> Self {
        match msg {
            Message::SetInputText(_) => Self::PersistInputText,
            Message::SetFormat(_) => Self::PersistFormat,
            Message::SetTheme(_) => Self::PersistTheme,
            Message::SetPanelRatio(_) => Self::PersistPanelRatio,
            Message::MergeConfig(_) => Self::PersistConfig,
            Message::AddNotification { at, .. } => Self::ScheduleExpiry(*at),
            Message::RemoveNotification(id) => Self::CancelExpiry(*id),
            Message::MergeLeftPanelState(_) | Message::MergeRightPanelState(_) => Self::None,
        }
    }
}

impl Store {
    pub(super) fn run_effect(&mut self, effect: Effect, outcome: Outcome) {
        match effect {
            Effect::PersistInputText => {
                self.persistence
                    .write(keys::INPUT_TEXT, self.model.input_text());
            }
            Effect::PersistFormat => {
                self.persistence
                    .write(keys::SELECTED_FORMAT, self.model.selected_format().as_str());
            }
            Effect::PersistTheme => {
                let theme = self.model.current_theme();
                self.persistence.write(keys::THEME, theme.as_str());
                if let Some(listener) = self.theme_listener.as_mut() {
                    listener(theme);
                }
            }
            Effect::PersistPanelRatio => {
                self.persistence
                    .write(keys::PANEL_RATIO, &self.model.panel_ratio().to_string());
            }
            Effect::PersistConfig => match serde_json::to_string(self.model.config()) {
                Ok(json) => self.persistence.write(keys::CONFIG, &json),
                Err(err) => tracing::warn!(error = %err, "failed to serialize config"),
            },
            Effect::ScheduleExpiry(created_at) => {
                if let Outcome::Added(id) = outcome {
                    let due = created_at
                        + chrono::Duration::milliseconds(super::notifications::NOTIFICATION_TTL_MS);
                    let handle = self.scheduler.schedule(due, Task::ExpireNotification(id));
                    self.expiry_tasks.insert(id, handle);
                }
            }
            Effect::CancelExpiry(id) => {
                if let Some(handle) = self.expiry_tasks.remove(&id) {
                    self.scheduler.cancel(handle);
                }
            }
            Effect::None => {}
        }
    }

    /// Append the clipboard's text to the input.
    ///
    /// The read is awaited on the caller's task; the result goes through
    /// [`Store::apply_clipboard`].
    pub async fn paste_from<C: ClipboardSource>(&mut self, source: &C) -> Outcome {
        let result = source.read_text().await;
        self.apply_clipboard(result)
    }

    /// Merge a finished clipboard read into the input.
    ///
    /// Failures and overflow become notifications; state is only touched
    /// through [`Store::set_input_text`].
    pub fn apply_clipboard(&mut self, result: Result<String, ClipboardError>) -> Outcome {
        match result {
            Ok(text) if text.is_empty() => Outcome::Rejected,
            Ok(text) => {
                let combined = format!("{}{text}", self.model.input_text());
                if self.model.fits_input_limit(&combined) {
                    self.set_input_text(combined)
                } else {
                    self.add_notification(
                        "Clipboard content exceeds character limit",
                        NotificationKind::Warning,
                    );
                    Outcome::Rejected
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read clipboard");
                self.add_notification("Failed to access clipboard", NotificationKind::Error);
                Outcome::Rejected
            }
        }
    }
}
