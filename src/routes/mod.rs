pub mod assignments;
pub mod auth;
pub mod evaluations;
pub mod files;
pub mod health;
pub mod submissions;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use evaluations::configure_evaluation_routes;
pub use files::configure_file_routes;
pub use health::configure_health_routes;
pub use submissions::configure_submission_routes;
