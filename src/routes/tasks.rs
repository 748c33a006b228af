use crate::{auth::AuthenticatedUser, error::AppError, models::TaskInput, store::TaskStore};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

/// Lists every task in creation order.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid session token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskStore>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(tasks.list_all()))
}

/// Creates a new task.
///
/// ## Request Body:
/// - `title`: 3 to 100 characters, not blank.
/// - `description`: not blank.
/// - `status`: one of `Started`, `InProgress`, `Complete`.
///
/// ## Responses:
/// - `201 Created`: The stored `Task`, including its generated `id`.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `422 Unprocessable Entity`: If a field is invalid. Only the first
///   failing field (title, then description, then status) is reported.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskStore>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(task_data.into_inner())?;
    log::info!("user {} created task {}", user.0.user_id, task.id);
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a task by its UUID.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `404 Not Found`: If no task has this id.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.get_by_id(task_id.into_inner())?;
    Ok(HttpResponse::Ok().json(task))
}

/// Replaces the title, description and status of a task.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `404 Not Found`: If no task has this id.
/// - `422 Unprocessable Entity`: If a field is invalid; the task is left unchanged.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.update(task_id.into_inner(), task_data.into_inner())?;
    log::info!("user {} updated task {}", user.0.user_id, task.id);
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its UUID.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `404 Not Found`: If no task has this id.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    tasks.delete(id)?;
    log::info!("user {} deleted task {}", user.0.user_id, id);
    Ok(HttpResponse::NoContent().finish())
}
