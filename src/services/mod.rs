pub mod assignments;
pub mod auth;
pub mod evaluations;
pub mod files;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use evaluations::EvaluationService;
pub use files::FileService;
pub use submissions::SubmissionService;
