mod controller;
mod health;
mod outcome;
mod server_state;

pub use controller::ProcessController;
pub use health::{HealthChecker, HealthStatus};
pub use outcome::{StartOutcome, StopOutcome};
pub use server_state::ServerState;
