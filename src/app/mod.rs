//! Application state and its mutators.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Model`]: the complete application state
//! - [`Message`]: every accepted state change
//! - [`update`]: validation and state transitions, no side effects
//! - [`Store`]: owns the model and runs side effects (persistence, theme
//!   signaling, notification expiry) for applied messages

mod clock;
mod effects;
mod hydrate;
mod model;
pub mod notifications;
mod schedule;
mod update;

pub use clock::{Clock, ManualClock, SystemClock};
pub use model::{Model, PanelRatio, PanelState, RatioOutOfRange, Theme, UnknownTheme};
pub use notifications::{Notification, NotificationId, NotificationKind, NotificationQueue};
pub use update::{Message, Outcome, update};

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::config::{ConfigPatch, SettingsForm};
use crate::storage::Persistence;

use schedule::{Scheduler, Task, TaskHandle};

type ThemeListener = Box<dyn FnMut(Theme)>;

/// Handle to the application state.
///
/// Constructed once per session and passed to every consumer. Reads go
/// through [`Store::model`]; writes go through the mutators, which validate
/// their input and silently ignore anything invalid. Each mutator also
/// returns an [`Outcome`] for callers that want to know.
pub struct Store {
    model: Model,
    persistence: Persistence,
    clock: Box<dyn Clock>,
    scheduler: Scheduler,
    expiry_tasks: HashMap<NotificationId, TaskHandle>,
    theme_listener: Option<ThemeListener>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("model", &self.model)
            .field("pending_tasks", &self.scheduler.len())
            .field("theme_listener", &self.theme_listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Create a store on the system clock, hydrated from `persistence`.
    pub fn new(persistence: Persistence) -> Self {
        Self::with_clock(persistence, SystemClock)
    }

    /// Create a store on `clock`, hydrated from `persistence`.
    pub fn with_clock(persistence: Persistence, clock: impl Clock + 'static) -> Self {
        let mut store = Self {
            model: Model::default(),
            persistence,
            clock: Box::new(clock),
            scheduler: Scheduler::default(),
            expiry_tasks: HashMap::new(),
            theme_listener: None,
        };
        store.hydrate();
        tracing::info!(
            theme = %store.model.current_theme(),
            format = %store.model.selected_format(),
            ratio = %store.model.panel_ratio(),
            "store initialized"
        );
        store
    }

    /// Register the theme listener. It is called right away with the
    /// current theme, then on every accepted theme change.
    #[must_use]
    pub fn on_theme_changed(mut self, mut listener: impl FnMut(Theme) + 'static) -> Self {
        listener(self.model.current_theme());
        self.theme_listener = Some(Box::new(listener));
        self
    }

    /// Read-only view of the current state.
    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Current time on the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Apply `msg` and run its side effects if it was accepted.
    pub fn dispatch(&mut self, msg: Message) -> Outcome {
        let name = msg.name();
        let effect = effects::Effect::of(&msg);
        let outcome = update(&mut self.model, msg);
        if outcome.is_applied() {
            self.run_effect(effect, outcome);
        } else {
            tracing::debug!(message = name, "rejected");
        }
        outcome
    }

    /// Replace the input text if it fits the configured limit.
    pub fn set_input_text(&mut self, text: impl Into<String>) -> Outcome {
        self.dispatch(Message::SetInputText(text.into()))
    }

    /// Empty the input text.
    pub fn clear_input(&mut self) -> Outcome {
        self.set_input_text(String::new())
    }

    /// Select the result format by name.
    pub fn set_format(&mut self, format: &str) -> Outcome {
        self.dispatch(Message::SetFormat(format.to_string()))
    }

    /// Switch to the named theme and notify the listener.
    pub fn set_theme(&mut self, theme: &str) -> Outcome {
        self.dispatch(Message::SetTheme(theme.to_string()))
    }

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) -> Outcome {
        let next = self.model.current_theme().toggled();
        self.set_theme(next.as_str())
    }

    /// Set the left panel width in percent.
    pub fn set_panel_ratio(&mut self, ratio: i64) -> Outcome {
        self.dispatch(Message::SetPanelRatio(ratio))
    }

    /// Shallow-merge into the left panel state.
    pub fn merge_left_panel_state(&mut self, partial: PanelState) -> Outcome {
        self.dispatch(Message::MergeLeftPanelState(partial))
    }

    /// Shallow-merge into the right panel state.
    pub fn merge_right_panel_state(&mut self, partial: PanelState) -> Outcome {
        self.dispatch(Message::MergeRightPanelState(partial))
    }

    /// Record that the input panel just received focus.
    pub fn touch_left_focus(&mut self) -> Outcome {
        let mut partial = PanelState::new();
        partial.insert("lastFocusTime".into(), self.now().to_rfc3339().into());
        self.merge_left_panel_state(partial)
    }

    /// Shallow-merge into the config and save the result.
    pub fn merge_config(&mut self, patch: ConfigPatch) -> Outcome {
        self.dispatch(Message::MergeConfig(patch))
    }

    /// Append a notification that removes itself after five seconds.
    pub fn add_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Outcome {
        let at = self.now();
        self.dispatch(Message::AddNotification {
            message: message.into(),
            kind,
            at,
        })
    }

    /// Dismiss a notification and cancel its expiry.
    pub fn remove_notification(&mut self, id: NotificationId) -> Outcome {
        self.dispatch(Message::RemoveNotification(id))
    }

    /// Save the settings dialog: theme, layout and config in one step.
    pub fn apply_settings(&mut self, form: &SettingsForm) {
        self.set_theme(form.theme.as_str());
        self.set_panel_ratio(form.panel_ratio);
        self.merge_config(form.config_patch());
        self.add_notification(
            "Configuration saved successfully",
            NotificationKind::Success,
        );
    }

    /// Restore default theme, layout and config.
    pub fn reset_settings(&mut self) {
        let defaults = SettingsForm::default();
        self.set_theme(defaults.theme.as_str());
        self.set_panel_ratio(defaults.panel_ratio);
        self.merge_config(ConfigPatch::from(crate::config::Config::default()));
        self.add_notification("Configuration reset to defaults", NotificationKind::Info);
    }

    /// Fire every scheduled task that is due. Returns how many fired.
    pub fn run_due_tasks(&mut self) -> usize {
        let now = self.now();
        let due = self.scheduler.take_due(now);
        let fired = due.len();
        for task in due {
            match task {
                Task::ExpireNotification(id) => {
                    self.expiry_tasks.remove(&id);
                    self.dispatch(Message::RemoveNotification(id));
                }
            }
        }
        fired
    }

    /// When the next scheduled task is due, if any.
    pub fn next_task_due(&self) -> Option<DateTime<Utc>> {
        self.scheduler.next_due()
    }

    /// Number of scheduled tasks not yet fired.
    pub fn pending_task_count(&self) -> usize {
        self.scheduler.len()
    }
}
