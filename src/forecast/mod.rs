pub mod onecall;

pub use onecall::parse_onecall;
