pub mod models;
pub mod services;
pub mod state;

pub use models::*;
pub use services::*;
pub use state::{DirectoryPhase, DirectoryState};
