mod idiom_header_bar;
mod idiom_window;
mod status_bar;
mod text_pane;

pub use idiom_header_bar::IdiomHeaderBar;
pub use idiom_window::IdiomWindow;
pub use status_bar::StatusBar;
pub use text_pane::TextPane;
