pub mod classifier;
pub mod outlook;
pub mod signals;

pub use classifier::classify;
pub use outlook::{outlook, DayMood};
pub use signals::Signals;
