pub mod time;

pub use time::time_of_day;
