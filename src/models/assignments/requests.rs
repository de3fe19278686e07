use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::assignments::entities::SubmissionType;
use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub submission_type: SubmissionType,
    pub max_score: Option<f64>, // 缺省为 100
}

/// 更新作业请求（提交形式创建后不可修改，故不在此列）
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式
    pub max_score: Option<f64>,
    pub is_published: Option<bool>,
}

impl UpdateAssignmentRequest {
    /// 是否为"仅发布"补丁：除 is_published=true 外不携带任何字段。
    /// 已有提交的作业只放行这一种更新
    pub fn is_publish_toggle_only(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.max_score.is_none()
            && self.is_published == Some(true)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.max_score.is_none()
            && self.is_published.is_none()
    }
}

/// 作业列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_toggle_only() {
        let patch = UpdateAssignmentRequest {
            is_published: Some(true),
            ..Default::default()
        };
        assert!(patch.is_publish_toggle_only());

        let patch = UpdateAssignmentRequest {
            is_published: Some(true),
            max_score: Some(80.0),
            ..Default::default()
        };
        assert!(!patch.is_publish_toggle_only());

        let patch = UpdateAssignmentRequest {
            is_published: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_publish_toggle_only());
    }
}
