pub mod clock;
pub mod parse;
pub mod time;
