//! 访问策略
//!
//! 所有角色与所有权判断集中在这一个模块里，业务层不做内联权限分支。
//! 约定：
//! - 学生访问未发布作业时返回 NotFound 而不是 Forbidden，不暴露资源存在性；
//! - 教师访问他人作业时返回 Forbidden（教师之间不隐藏存在性）；
//! - 提交与评语仅提交学生本人和作业所属教师可见。

use crate::errors::{AssignmentSystemError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::User;

/// 判断用户是否为作业的所属教师
pub fn is_owner(assignment: &Assignment, user_id: i64) -> bool {
    assignment.teacher_id == user_id
}

/// 作业对调用者是否可见
pub fn can_view_assignment(assignment: &Assignment, caller: &User) -> bool {
    if caller.role.is_teacher() {
        is_owner(assignment, caller.id)
    } else {
        assignment.is_published
    }
}

/// 提交对调用者是否可见
pub fn can_view_submission(
    submission: &Submission,
    assignment: &Assignment,
    caller: &User,
) -> bool {
    (caller.role.is_student() && submission.student_id == caller.id)
        || (caller.role.is_teacher() && is_owner(assignment, caller.id))
}

/// 作业读取检查
pub fn check_assignment_view(assignment: &Assignment, caller: &User) -> Result<()> {
    if can_view_assignment(assignment, caller) {
        return Ok(());
    }
    if caller.role.is_teacher() {
        Err(AssignmentSystemError::forbidden("无权查看该作业"))
    } else {
        // 学生探测未发布作业时隐藏其存在
        Err(AssignmentSystemError::not_found("作业不存在"))
    }
}

/// 作业变更检查：只有所属教师可以修改/发布/删除/评阅
pub fn check_assignment_owner(assignment: &Assignment, caller: &User) -> Result<()> {
    if caller.role.is_teacher() && is_owner(assignment, caller.id) {
        Ok(())
    } else {
        Err(AssignmentSystemError::forbidden(
            "只有作业所属教师可以执行此操作",
        ))
    }
}

/// 提交读取检查
pub fn check_submission_view(
    submission: &Submission,
    assignment: &Assignment,
    caller: &User,
) -> Result<()> {
    if can_view_submission(submission, assignment, caller) {
        Ok(())
    } else {
        Err(AssignmentSystemError::forbidden("无权查看该提交"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::SubmissionType;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::users::entities::UserRole;
    use chrono::Utc;

    fn make_user(id: i64, role: UserRole) -> User {
        User {
            id,
            name: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_assignment(id: i64, teacher_id: i64, is_published: bool) -> Assignment {
        Assignment {
            id,
            teacher_id,
            title: "测试作业".to_string(),
            description: "这是一个用于测试的作业描述".to_string(),
            due_date: Utc::now(),
            submission_type: SubmissionType::Text,
            max_score: 100.0,
            is_published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_submission(id: i64, assignment_id: i64, student_id: i64) -> Submission {
        Submission {
            id,
            assignment_id,
            student_id,
            content: Some("answer".to_string()),
            file_url: None,
            file_name: None,
            file_size: None,
            submitted_at: Utc::now(),
            is_late: false,
            version: 1,
            status: SubmissionStatus::Submitted,
            score: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_teacher_sees_own_assignment() {
        let teacher = make_user(1, UserRole::Teacher);
        let assignment = make_assignment(10, 1, false);
        assert!(can_view_assignment(&assignment, &teacher));
        assert!(check_assignment_view(&assignment, &teacher).is_ok());
        assert!(check_assignment_owner(&assignment, &teacher).is_ok());
    }

    #[test]
    fn test_other_teacher_gets_forbidden() {
        let other = make_user(2, UserRole::Teacher);
        let assignment = make_assignment(10, 1, true);
        let err = check_assignment_view(&assignment, &other).unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));
        let err = check_assignment_owner(&assignment, &other).unwrap_err();
        assert!(matches!(err, AssignmentSystemError::Forbidden(_)));
    }

    #[test]
    fn test_student_unpublished_hidden_as_not_found() {
        let student = make_user(3, UserRole::Student);
        let assignment = make_assignment(10, 1, false);
        assert!(!can_view_assignment(&assignment, &student));
        let err = check_assignment_view(&assignment, &student).unwrap_err();
        assert!(matches!(err, AssignmentSystemError::NotFound(_)));
    }

    #[test]
    fn test_student_sees_published_assignment() {
        let student = make_user(3, UserRole::Student);
        let assignment = make_assignment(10, 1, true);
        assert!(check_assignment_view(&assignment, &student).is_ok());
        // 已发布也不代表学生可以修改
        assert!(check_assignment_owner(&assignment, &student).is_err());
    }

    #[test]
    fn test_submission_visibility() {
        let assignment = make_assignment(10, 1, true);
        let submission = make_submission(100, 10, 3);

        let owner_student = make_user(3, UserRole::Student);
        let other_student = make_user(4, UserRole::Student);
        let owner_teacher = make_user(1, UserRole::Teacher);
        let other_teacher = make_user(2, UserRole::Teacher);

        assert!(check_submission_view(&submission, &assignment, &owner_student).is_ok());
        assert!(check_submission_view(&submission, &assignment, &owner_teacher).is_ok());
        assert!(check_submission_view(&submission, &assignment, &other_student).is_err());
        assert!(check_submission_view(&submission, &assignment, &other_teacher).is_err());
    }
}
