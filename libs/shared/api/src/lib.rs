pub mod scheduler;

pub use scheduler::{ApiError, SchedulerClient};
