pub mod box_id;
pub mod orchestrator;
pub mod ui_host;

pub use box_id::{BoxFocus, BoxId};
pub use orchestrator::{JobId, JobPoll, JobState, Orchestrator, TranslateOutcome};
pub use ui_host::UiHost;
