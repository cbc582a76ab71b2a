/*!
 * 角色或资源归属校验中间件
 *
 * 必须在 RequireJWT 之后使用。放行条件二选一：
 * 用户角色在允许列表中，或用户是路径参数指向资源的归属者。
 *
 * ```rust,ignore
 * web::resource("/studyplans/{id}")
 *     .wrap(RequireRoleOrOwner::new(
 *         UserRole::admin_roles(),
 *         OwnedResource::StudyPlan,
 *         "id",
 *     ))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::info;

use crate::{
    models::{
        ErrorCode,
        users::entities::{User, UserRole},
    },
    storage::Storage,
};

use super::create_error_response;

/// 支持归属校验的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedResource {
    /// 归属字段为 teacher_id
    Classroom,
    /// 归属字段为 student_id
    StudyPlan,
    /// 归属字段为 student_id
    Submission,
}

#[derive(Clone)]
pub struct RequireRoleOrOwner {
    allowed_roles: Vec<UserRole>,
    resource: OwnedResource,
    id_param: &'static str,
}

impl RequireRoleOrOwner {
    pub fn new(roles: &[&UserRole], resource: OwnedResource, id_param: &'static str) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| (*r).clone()).collect(),
            resource,
            id_param,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRoleOrOwner
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleOrOwnerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleOrOwnerMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
            resource: self.resource,
            id_param: self.id_param,
        }))
    }
}

pub struct RequireRoleOrOwnerMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<UserRole>,
    resource: OwnedResource,
    id_param: &'static str,
}

/// 资源存在时返回其归属者字段，归属者可能为空（如管理员建的教室）
async fn resolve_owner(
    storage: &Arc<dyn Storage>,
    resource: OwnedResource,
    id: i64,
) -> Result<Option<Option<i64>>, crate::errors::PortalError> {
    let owner = match resource {
        OwnedResource::Classroom => storage
            .get_classroom_by_id(id)
            .await?
            .map(|c| c.teacher_id),
        OwnedResource::StudyPlan => storage.get_study_plan_by_id(id).await?.map(|p| p.student_id),
        OwnedResource::Submission => storage
            .get_submission_by_id(id)
            .await?
            .map(|s| Some(s.student_id)),
    };
    Ok(owner)
}

impl<S, B> Service<ServiceRequest> for RequireRoleOrOwnerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();
        let resource = self.resource;
        let id_param = self.id_param;

        Box::pin(async move {
            let Some(user) = req.extensions().get::<User>().cloned() else {
                info!(
                    "Ownership check failed: No user found in request. Make sure RequireJWT middleware is applied first."
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if allowed_roles.contains(&user.role) {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            let Some(id) = req
                .match_info()
                .get(id_param)
                .and_then(|raw| raw.parse::<i64>().ok())
            else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::BadRequest,
                        "Invalid resource id",
                    )
                    .map_into_right_body(),
                ));
            };

            let Some(storage) = req.app_data::<web::Data<Arc<dyn Storage>>>() else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Storage not available",
                    )
                    .map_into_right_body(),
                ));
            };

            match resolve_owner(storage.get_ref(), resource, id).await {
                Ok(Some(Some(owner_id))) if owner_id == user.id => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Ok(Some(_)) => {
                    info!(
                        "Access denied for user {} on {:?} {}: not the owner",
                        user.id, resource, id
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                Ok(None) => Ok(req.into_response(
                    create_error_response(
                        StatusCode::NOT_FOUND,
                        ErrorCode::NotFound,
                        "Resource not found",
                    )
                    .map_into_right_body(),
                )),
                Err(e) => {
                    tracing::error!("Ownership lookup failed for {:?} {}: {}", resource, id, e);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
