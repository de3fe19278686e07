use serde::{Deserialize, Serialize};

use crate::models::common::pagination::PaginationQuery;

/// 提交携带的文件描述（由文件上传接口返回）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionFileInfo {
    pub url: String,
    pub name: String,
    pub size: i64,
}

/// 创建提交请求
#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    /// 文本内容；TEXT 作业必填，FILE 作业可作为备注
    pub content: Option<String>,
    /// 文件描述；FILE 作业必填
    pub file: Option<SubmissionFileInfo>,
}

/// 提交列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}
