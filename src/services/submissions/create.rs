use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::{AssignmentSystemError, Result};
use crate::models::assignments::entities::SubmissionType;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate;

/// 学生提交作业
///
/// 重复提交永远追加新版本而不覆盖旧版本；版本号与迟交标志都在
/// 此刻一次性确定，之后不再变化。
pub async fn submit_assignment(
    storage: &Arc<dyn Storage>,
    caller: &User,
    assignment_id: i64,
    payload: CreateSubmissionRequest,
) -> Result<Submission> {
    if !caller.role.is_student() {
        return Err(AssignmentSystemError::forbidden("只有学生可以提交作业"));
    }

    // 1. 作业必须存在
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AssignmentSystemError::not_found("作业不存在"))?;

    // 2. 未发布的作业不接受提交
    if !assignment.is_published {
        return Err(AssignmentSystemError::conflict("作业未发布，暂不可提交"));
    }

    // 3. 按作业形式校验并归一化载荷
    let normalized = normalize_payload(&assignment.submission_type, payload)?;

    // 4. 迟交标志以提交时刻为准，一次性计算
    let is_late = Utc::now() > assignment.due_date;

    let submission = storage
        .create_submission(assignment_id, caller.id, &normalized, is_late)
        .await?;

    info!(
        "Student {} submitted assignment {} (version {}, late={})",
        caller.id, assignment_id, submission.version, submission.is_late
    );
    Ok(submission)
}

/// 按作业形式整理提交载荷
///
/// TEXT：内容必填且去除首尾空白，文件描述被丢弃；
/// FILE：文件描述必填，备注可选（空白备注视为未填）。
fn normalize_payload(
    submission_type: &SubmissionType,
    payload: CreateSubmissionRequest,
) -> Result<CreateSubmissionRequest> {
    match submission_type {
        SubmissionType::Text => {
            let content = payload.content.as_deref().unwrap_or("");
            validate::validate_submission_content(content)
                .map_err(AssignmentSystemError::validation)?;
            Ok(CreateSubmissionRequest {
                content: Some(content.trim().to_string()),
                file: None,
            })
        }
        SubmissionType::File => {
            let file = payload
                .file
                .ok_or_else(|| AssignmentSystemError::validation("FILE 类型作业必须携带文件描述"))?;
            if file.url.trim().is_empty() || file.name.trim().is_empty() {
                return Err(AssignmentSystemError::validation("文件描述缺少地址或文件名"));
            }
            let content = match payload.content.as_deref().map(str::trim) {
                Some(notes) if !notes.is_empty() => {
                    validate::validate_submission_content(notes)
                        .map_err(AssignmentSystemError::validation)?;
                    Some(notes.to_string())
                }
                _ => None,
            };
            Ok(CreateSubmissionRequest {
                content,
                file: Some(file),
            })
        }
    }
}
