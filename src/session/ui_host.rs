use crate::services::TranslateError;
use crate::session::BoxId;

/// What the orchestrator needs from whatever owns the text boxes.
///
/// Every method is called on the thread that owns the UI.
pub trait UiHost {
    fn text(&self, id: BoxId) -> String;

    /// Replaces the whole contents of the box.
    fn set_text(&self, id: BoxId, text: &str);

    /// Language code selected for the box, `None` to let the service decide.
    fn language(&self, id: BoxId) -> Option<String>;

    fn progress_pulse(&self);

    fn progress_done(&self);

    fn report_error(&self, error: &TranslateError);
}
