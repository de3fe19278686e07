//! SeaORM 实体定义
//!
//! 这里定义的是数据库表结构对应的实体，
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assignments;
pub mod feedbacks;
pub mod files;
pub mod submissions;
pub mod users;
