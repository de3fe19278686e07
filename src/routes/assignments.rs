use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use crate::errors::Result;
use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> Result<HttpResponse> {
    ASSIGNMENT_SERVICE.create(body.into_inner(), &req).await
}

// 列出作业（教师看自己的全部，学生看全部已发布）
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> Result<HttpResponse> {
    ASSIGNMENT_SERVICE.list(query.into_inner(), &req).await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> Result<HttpResponse> {
    ASSIGNMENT_SERVICE.detail(path.0, &req).await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> Result<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update(path.0, body.into_inner(), &req)
        .await
}

// 删除作业
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> Result<HttpResponse> {
    ASSIGNMENT_SERVICE.delete(path.0, &req).await
}

// 发布作业
pub async fn publish_assignment(req: HttpRequest, path: SafeIDI64) -> Result<HttpResponse> {
    ASSIGNMENT_SERVICE.publish(path.0, &req).await
}

// 取消发布作业
pub async fn unpublish_assignment(req: HttpRequest, path: SafeIDI64) -> Result<HttpResponse> {
    ASSIGNMENT_SERVICE.unpublish(path.0, &req).await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出作业 - 业务层按角色过滤
                    .route(web::get().to(list_assignments))
                    // 创建作业 - 仅教师
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::teacher()),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 获取详情 - 可见性在业务层判断
                    .route(web::get().to(get_assignment))
                    // 更新 - 仅教师（所有权在业务层判断）
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(middlewares::RequireRole::teacher()),
                    )
                    // 删除 - 仅教师
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::teacher()),
                    ),
            )
            .service(
                web::resource("/{id}/publish").route(
                    web::patch()
                        .to(publish_assignment)
                        .wrap(middlewares::RequireRole::teacher()),
                ),
            )
            .service(
                web::resource("/{id}/unpublish").route(
                    web::patch()
                        .to(unpublish_assignment)
                        .wrap(middlewares::RequireRole::teacher()),
                ),
            ),
    );
}
