use crate::app::model::{PanelRatio, Theme};
use crate::app::Store;
use crate::config::ConfigPatch;
use crate::format::ResultFormat;
use crate::storage::keys;

impl Store {
    /// Restore persisted fields. Runs once, from the constructor.
    ///
    /// Stored values were validated when written, so they are assigned
    /// directly: no write-back, no notifications, no theme signal. Values
    /// that no longer parse are skipped and the defaults stand.
    pub(super) fn hydrate(&mut self) {
        if let Some(raw) = self.persistence.read(keys::THEME) {
            match raw.parse::<Theme>() {
                Ok(theme) => self.model.current_theme = theme,
                Err(err) => tracing::debug!(error = %err, "ignoring stored theme"),
            }
        }

        if let Some(raw) = self.persistence.read(keys::PANEL_RATIO) {
            match raw.trim().parse::<i64>().ok().map(PanelRatio::try_from) {
                Some(Ok(ratio)) => self.model.panel_ratio = ratio,
                _ => tracing::debug!(value = %raw, "ignoring stored panel ratio"),
            }
        }

        if let Some(raw) = self.persistence.read(keys::SELECTED_FORMAT) {
            match raw.parse::<ResultFormat>() {
                Ok(format) => self.model.selected_format = format,
                Err(err) => tracing::debug!(error = %err, "ignoring stored format"),
            }
        }

        if let Some(raw) = self.persistence.read(keys::CONFIG) {
            match serde_json::from_str::<ConfigPatch>(&raw) {
                Ok(patch) => self.model.config.merge(&patch),
                Err(err) => tracing::warn!(error = %err, "failed to parse saved config"),
            }
        }

        // After config, so the restored length limit applies.
        if let Some(text) = self.persistence.read(keys::INPUT_TEXT) {
            if self.model.fits_input_limit(&text) {
                self.model.input_text = text;
            } else {
                tracing::debug!("ignoring stored input text above the length limit");
            }
        }
    }
}
