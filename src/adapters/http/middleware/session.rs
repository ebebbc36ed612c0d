use actix_web::{
  Error, HttpMessage,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};
use uuid::Uuid;

use crate::domain::Session;

/// Resolves the caller's [`Session`] from a trusted upstream header.
///
/// Authentication itself happens in front of this service (a gateway or
/// reverse proxy). The proxy forwards the authenticated user id in the
/// configured header; requests without it are guests. A header that is not a
/// valid UUID is treated as absent and logged.
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// # use invoicer::adapters::http::middleware::SessionMiddleware;
///
/// let app = App::new()
///   .wrap(SessionMiddleware::new("X-Authenticated-User"));
/// ```
#[derive(Debug, Clone)]
pub struct SessionMiddleware {
  user_header: Rc<str>,
}

impl SessionMiddleware {
  pub fn new(user_header: impl Into<String>) -> Self {
    Self {
      user_header: Rc::from(user_header.into()),
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = SessionMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(SessionMiddlewareService {
      service: Rc::new(service),
      user_header: self.user_header.clone(),
    }))
  }
}

pub struct SessionMiddlewareService<S> {
  service: Rc<S>,
  user_header: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let session = resolve_session(&req, &self.user_header);

    Box::pin(async move {
      req.extensions_mut().insert(session);
      service.call(req).await
    })
  }
}

fn resolve_session(req: &ServiceRequest, user_header: &str) -> Session {
  let Some(value) = req.headers().get(user_header) else {
    return Session::Guest;
  };

  match value.to_str().ok().map(str::trim).map(Uuid::parse_str) {
    Some(Ok(user_id)) => Session::authenticated(user_id),
    _ => {
      tracing::warn!(
        "Ignoring malformed {} header on {}",
        user_header,
        req.path()
      );
      Session::Guest
    }
  }
}

/// Extension trait to read the resolved session from a request
pub trait SessionExt {
  /// Returns [`Session::Guest`] when the middleware did not run.
  fn session(&self) -> Session;
}

impl SessionExt for actix_web::HttpRequest {
  fn session(&self) -> Session {
    self
      .extensions()
      .get::<Session>()
      .copied()
      .unwrap_or(Session::Guest)
  }
}
