pub mod time;

pub use time::timestamp_in_seconds;
