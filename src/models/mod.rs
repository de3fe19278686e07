pub mod assignments;
pub mod auth;
pub mod common;
pub mod evaluations;
pub mod files;
pub mod submissions;
pub mod users;

pub use common::AppStartTime;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::{ApiResponse, ErrorCode};
