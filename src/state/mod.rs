pub mod app_state;

pub use app_state::{update, AppState, Event, LoadStatus, MoodView};
