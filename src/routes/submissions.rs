use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use crate::errors::Result;
use crate::middlewares;
use crate::models::submissions::requests::{CreateSubmissionRequest, SubmissionListParams};
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeIDI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 学生提交作业（路径中的 id 是作业 ID）
pub async fn submit_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateSubmissionRequest>,
) -> Result<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(path.0, body.into_inner(), &req)
        .await
}

// 获取单条提交详情（路径中的 id 是提交 ID）
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> Result<HttpResponse> {
    SUBMISSION_SERVICE.detail(path.0, &req).await
}

// 当前学生的提交历史
pub async fn list_my_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> Result<HttpResponse> {
    SUBMISSION_SERVICE
        .my_submissions(query.into_inner(), &req)
        .await
}

// 教师查看某作业的提交名册（每个学生一行，最新版本）
pub async fn list_assignment_roster(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    query: web::Query<SubmissionListParams>,
) -> Result<HttpResponse> {
    SUBMISSION_SERVICE
        .roster(path.0, query.into_inner(), &req)
        .await
}

// 某作业的版本历史（学生看自己的，所属教师看全部）
pub async fn list_versions(req: HttpRequest, path: SafeAssignmentIdI64) -> Result<HttpResponse> {
    SUBMISSION_SERVICE.versions(path.0, &req).await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            // 具体路径必须先于 "/{id}" 注册
            .service(
                web::resource("/my").route(
                    web::get()
                        .to(list_my_submissions)
                        .wrap(middlewares::RequireRole::student()),
                ),
            )
            .service(
                web::resource("/assignment/{assignment_id}").route(
                    web::get()
                        .to(list_assignment_roster)
                        .wrap(middlewares::RequireRole::teacher()),
                ),
            )
            .service(
                web::resource("/versions/{assignment_id}")
                    // 业务层按角色裁剪可见范围
                    .route(web::get().to(list_versions)),
            )
            .service(
                web::resource("/{id}")
                    // 提交作业 - 仅学生，id 为作业 ID
                    .route(
                        web::post()
                            .to(submit_assignment)
                            .wrap(middlewares::RequireRole::student()),
                    )
                    // 提交详情 - id 为提交 ID，可见性在业务层判断
                    .route(web::get().to(get_submission)),
            ),
    );
}
