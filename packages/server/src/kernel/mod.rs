// Infrastructure layer: external service traits, their adapters, the
// dependency container and background tasks.

pub mod deps;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TwilioAdapter};
pub use scheduled_tasks::start_scheduler;
pub use traits::*;
