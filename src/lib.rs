//! 作业提交与评阅平台后端服务
//!
//! 基于 Actix Web 构建的师生作业管理系统：教师发布作业并评阅，
//! 学生按版本提交，提交一经评阅即不可再改。
//!
//! # 架构
//! - `access`: 集中的角色与所有权判定
//! - `blobstore`: 上传文件的二进制存储
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod access;
pub mod blobstore;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
