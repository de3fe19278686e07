//! 应用配置模块

mod r#impl;
mod structs;

pub use structs::*;
