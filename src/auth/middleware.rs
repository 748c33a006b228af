use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::error::AppError;
use crate::store::UserStore;

/// Requires a valid `Authorization: Bearer <token>` header on every request
/// except login and registration.
///
/// The validated `SessionClaims` are stored in the request extensions.
/// Rejected requests are answered here with the `AppError` response and never
/// reach the wrapped service.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    fn forward(
        &self,
        req: ServiceRequest,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }

    fn reject(
        req: ServiceRequest,
        err: AppError,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let response = req.error_response(err).map_into_right_body();
        Box::pin(async move { Ok(response) })
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if matches!(req.path(), "/api/auth/login" | "/api/auth/register") {
            return self.forward(req);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        let Some(token) = token else {
            return Self::reject(req, AppError::Unauthorized("Missing token".into()));
        };

        let verdict = match req.app_data::<web::Data<UserStore>>() {
            Some(users) => users.validate_token(&token).map_err(AppError::from),
            None => {
                log::error!("AuthMiddleware mounted without a UserStore in app data");
                Err(AppError::InternalServerError("Internal server error".into()))
            }
        };

        match verdict {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                self.forward(req)
            }
            Err(err) => Self::reject(req, err),
        }
    }
}
