pub mod models;
pub mod services;
pub mod workflow;

pub use models::*;
pub use services::*;
pub use workflow::{BookingWorkflow, RequestToken, WorkflowPhase};
