use crate::{
    auth::{LoginRequest, RegisterRequest, TokenResponse},
    error::{AppError, StoreError},
    models::NewUser,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns it. The password hash is never
/// part of the response.
#[post("/register")]
pub async fn register(
    users: web::Data<UserStore>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let new_user = NewUser::from(register_data.into_inner());
    // The store lock can be held for a whole bcrypt round, so even the
    // lookup stays off the async worker.
    let user = web::block(move || {
        // Early answer only; `create_user` still enforces uniqueness itself.
        if users.get_by_username(&new_user.username).is_ok() {
            return Err(StoreError::UsernameTaken);
        }
        users.create_user(new_user)
    })
    .await??;

    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// Authenticates a user and returns a session token.
#[post("/login")]
pub async fn login(
    users: web::Data<UserStore>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let LoginRequest { username, password } = login_data.into_inner();
    let token = web::block(move || users.authenticate(&username, &password)).await??;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn user_store() -> web::Data<UserStore> {
        web::Data::new(UserStore::new(b"route_test_secret", chrono::Duration::hours(1)))
    }

    #[actix_rt::test]
    async fn test_register_validation() {
        let app = test::init_service(App::new().app_data(user_store()).service(register)).await;

        for payload in [
            json!({ "username": "bad name!", "password": "password123" }),
            json!({ "username": "", "password": "password123" }),
            json!({ "username": "someone", "password": "" }),
        ] {
            let req = test::TestRequest::post()
                .uri("/register")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", payload);
        }

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": "someone" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_register_then_login() {
        let app = test::init_service(
            App::new()
                .app_data(user_store())
                .service(register)
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": "alice", "password": "secret123" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["role"], "user");
        assert!(body.get("password_hash").is_none());

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "alice", "password": "secret123" }))
            .to_request();
        let body: TokenResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!body.token.is_empty());

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "alice", "password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
