use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassroomService, check_classroom_manage_permission};
use crate::middlewares::RequireJWT;
use crate::models::classrooms::requests::{AddStudentRequest, UpdateStudentRequest};
use crate::models::classrooms::entities::RosterStudent;
use crate::models::classrooms::responses::{AddStudentResponse, RosterResponse};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use crate::utils::validate::validate_email;

pub async fn list_roster(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) =
        check_classroom_manage_permission(&storage, &current_user, classroom_id).await
    {
        return Ok(resp);
    }

    match storage.list_roster(classroom_id).await {
        Ok(students) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(RosterResponse { students }, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询名册失败: {e}"),
            )),
        ),
    }
}

/// 按邮箱把学生加入名册。邮箱不存在时可选创建账号，
/// 临时密码只在响应中出现一次。
pub async fn add_student(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    add_request: AddStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) =
        check_classroom_manage_permission(&storage, &current_user, classroom_id).await
    {
        return Ok(resp);
    }

    if let Err(msg) = validate_email(&add_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let existing = match storage.get_user_by_email(&add_request.email).await {
        Ok(user) => user,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    let (student, temp_password) = match existing {
        Some(user) => {
            if user.role != UserRole::Student {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "该邮箱对应的账号不是学生",
                )));
            }
            (user, None)
        }
        None => {
            if !add_request.create_account {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "该邮箱没有对应账号，可设置 create_account 创建",
                )));
            }
            match create_student_account(&storage, &add_request).await {
                Ok((user, password)) => (user, Some(password)),
                Err(resp) => return Ok(resp),
            }
        }
    };

    match storage.join_classroom(classroom_id, student.id).await {
        Ok(added) => {
            if !added {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomAlreadyJoined,
                    "该学生已在名册中",
                )));
            }
            tracing::info!(
                "Student {} added to classroom {} by user {}",
                student.id,
                classroom_id,
                current_user.id
            );
            let response = AddStudentResponse {
                student: roster_entry(&student),
                temp_password,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "学生添加成功")))
        }
        Err(e) => {
            tracing::error!("Failed to add student to roster: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "学生添加失败",
                )),
            )
        }
    }
}

pub async fn update_student(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    student_id: i64,
    update_request: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) =
        check_classroom_manage_permission(&storage, &current_user, classroom_id).await
    {
        return Ok(resp);
    }

    match storage.is_student_in_classroom(classroom_id, student_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "该学生不在名册中",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询名册失败: {e}"),
                )),
            );
        }
    }

    if let Some(ref email) = update_request.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let update = UpdateUserRequest {
        email: update_request.email,
        role: None,
        status: None,
        display_name: update_request.name,
        password: None,
    };

    match storage.update_user(student_id, update).await {
        Ok(Some(user)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(roster_entry(&user), "学生信息已更新")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "邮箱已被占用",
                )))
            } else {
                tracing::error!("Failed to update roster student {}: {}", student_id, e);
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::UserUpdateFailed,
                        "学生信息更新失败",
                    )),
                )
            }
        }
    }
}

pub async fn remove_student(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if let Err(resp) =
        check_classroom_manage_permission(&storage, &current_user, classroom_id).await
    {
        return Ok(resp);
    }

    match storage.leave_classroom(classroom_id, student_id).await {
        Ok(true) => {
            tracing::info!(
                "Student {} removed from classroom {} by user {}",
                student_id,
                classroom_id,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生已移出名册")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "该学生不在名册中",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("移出名册失败: {e}"),
            )),
        ),
    }
}

fn roster_entry(user: &User) -> RosterStudent {
    RosterStudent {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        display_name: user.display_name.clone(),
        joined_at: chrono::Utc::now(),
    }
}

/// 为名册导入/手工添加创建学生账号，用户名由邮箱前缀派生
pub(crate) async fn create_student_account(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    add_request: &AddStudentRequest,
) -> Result<(User, String), HttpResponse> {
    let temp_password = format!("St-{}", generate_random_code(10));
    let password_hash = hash_password(&temp_password).map_err(|e| {
        tracing::error!("Failed to hash temp password: {}", e);
        HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
            ErrorCode::UserCreationFailed,
            "学生账号创建失败",
        ))
    })?;

    // 邮箱前缀做用户名基底，冲突时追加随机后缀
    let base = add_request
        .email
        .split('@')
        .next()
        .unwrap_or("student")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(24)
        .collect::<String>();
    let base = if base.len() < 3 {
        format!("student-{}", generate_random_code(6).to_lowercase())
    } else {
        base
    };

    let username = match storage.get_user_by_username(&base).await {
        Ok(None) => base,
        Ok(Some(_)) => format!("{}-{}", base, generate_random_code(4).to_lowercase()),
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    let create = CreateUserRequest {
        username,
        email: add_request.email.clone(),
        password: password_hash,
        role: UserRole::Student,
        display_name: Some(add_request.name.clone()),
    };

    match storage.create_user(create).await {
        Ok(user) => Ok((user, temp_password)),
        Err(e) => {
            tracing::error!("Failed to create student account: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::UserCreationFailed,
                    "学生账号创建失败",
                )),
            )
        }
    }
}
