use std::collections::HashMap;
use std::future::{Ready, ready};

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};

/// Query parameter browser forms use to tunnel a method through `POST`
pub const METHOD_QUERY_PARAM: &str = "_method";

/// Header alternative to the query parameter
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Middleware that lets HTML forms, which can only `GET` and `POST`, reach
/// `PUT`, `PATCH` and `DELETE` routes. Must wrap the app so it runs before routing.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

/// Service that implements the method override logic
pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = requested_method(&req) {
                log::debug!("Overriding POST {} as {}", req.path(), method);
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}

fn requested_method(req: &ServiceRequest) -> Option<Method> {
    let from_header = req
        .headers()
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let requested = from_header.or_else(|| {
        web::Query::<HashMap<String, String>>::from_query(req.query_string())
            .ok()
            .and_then(|query| query.into_inner().remove(METHOD_QUERY_PARAM))
    })?;

    parse_override(&requested)
}

/// Only methods a form cannot send are accepted as overrides
pub fn parse_override(value: &str) -> Option<Method> {
    match value.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
