use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use crate::errors::Result;
use crate::middlewares;
use crate::models::evaluations::requests::{EvaluateSubmissionRequest, UpdateFeedbackRequest};
use crate::services::EvaluationService;
use crate::utils::SafeSubmissionIdI64;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// 教师评阅提交
pub async fn evaluate_submission(
    req: HttpRequest,
    path: SafeSubmissionIdI64,
    body: web::Json<EvaluateSubmissionRequest>,
) -> Result<HttpResponse> {
    EVALUATION_SERVICE
        .evaluate(path.0, body.into_inner(), &req)
        .await
}

// 查询提交的评语
pub async fn get_feedback(req: HttpRequest, path: SafeSubmissionIdI64) -> Result<HttpResponse> {
    EVALUATION_SERVICE.feedback(path.0, &req).await
}

// 评语作者修改评语
pub async fn update_feedback(
    req: HttpRequest,
    path: SafeSubmissionIdI64,
    body: web::Json<UpdateFeedbackRequest>,
) -> Result<HttpResponse> {
    EVALUATION_SERVICE
        .update_feedback(path.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/feedback/{submission_id}")
                    // 读评语 - 可见性与提交一致，在业务层判断
                    .route(web::get().to(get_feedback))
                    // 改评语 - 仅教师（作者校验在业务层）
                    .route(
                        web::put()
                            .to(update_feedback)
                            .wrap(middlewares::RequireRole::teacher()),
                    ),
            )
            .service(
                web::resource("/{submission_id}").route(
                    web::post()
                        .to(evaluate_submission)
                        .wrap(middlewares::RequireRole::teacher()),
                ),
            ),
    );
}
