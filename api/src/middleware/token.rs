//! Token verification middleware for protecting API endpoints.
//!
//! The middleware extracts a bearer token from the request, verifies it
//! against the signing key and the revocation ledger, re-fetches the
//! principal, and injects both into request extensions for handlers.
//!
//! Two modes:
//! 1. Strict: any extraction or verification failure rejects the request
//! 2. Lenient: failures leave the request anonymous, except a ledger
//!    outage, which is still a hard failure

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use ink_core::domain::entities::token::{Claims, TokenKind};
use ink_core::domain::entities::user::User;
use ink_core::errors::{AuthError, DomainError, DomainResult};
use ink_core::repositories::{RevocationLedger, UserRepository};
use ink_core::services::auth::gate;
use ink_core::services::mail::Mailer;
use ink_core::services::AuthService;
use ink_shared::config::{AuthConfig, CookieConfig};

use crate::handlers::ApiError;

/// Where the token was found in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Authorization: Bearer header
    Header,
    /// Refresh cookie
    Cookie,
    /// `token` query parameter (action links)
    Query,
}

/// How the gate treats verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationMode {
    /// Reject the request on any failure
    Strict,
    /// Proceed anonymously on failure; ledger outages still reject
    Lenient,
}

/// The verified token for the current request, as presented on the wire.
///
/// Handlers that revoke (logout, refresh rotation) need the raw string
/// back, since the ledger records a digest of the exact bytes presented.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    /// Raw token exactly as extracted from the request
    pub raw: String,
    /// Verified claims
    pub claims: Claims,
}

impl FromRequest for VerifiedToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<VerifiedToken>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));
        ready(result)
    }
}

/// The freshly resolved principal for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));
        ready(result)
    }
}

/// Optional principal for routes behind a lenient gate
pub struct MaybeUser(pub Option<User>);

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<CurrentUser>().map(|c| c.0.clone());
        ready(Ok(MaybeUser(user)))
    }
}

/// Dynamic-dispatch seam between the middleware and the auth service.
///
/// The gate is configured per route and cannot carry the service's
/// generic parameters, so it reaches the service through this trait
/// object stored in app data.
#[async_trait]
pub trait TokenPipeline: Send + Sync {
    /// Verify a raw token, optionally requiring a kind
    async fn verify(&self, token: &str, expected: Option<TokenKind>) -> DomainResult<Claims>;

    /// Re-fetch the principal for verified claims
    async fn resolve(&self, claims: &Claims) -> DomainResult<User>;
}

#[async_trait]
impl<U, L, M> TokenPipeline for AuthService<U, L, M>
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
    M: Mailer + 'static,
{
    async fn verify(&self, token: &str, expected: Option<TokenKind>) -> DomainResult<Claims> {
        self.tokens().verify(token, expected).await
    }

    async fn resolve(&self, claims: &Claims) -> DomainResult<User> {
        self.resolve_principal(claims).await
    }
}

/// Extract a token from the request, checking locations in priority
/// order: Authorization header, then the refresh cookie, then the
/// `token` query parameter.
pub fn extract_token(req: &ServiceRequest, cookie_name: &str) -> Option<(String, TokenSource)> {
    if let Some(token) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some((token.to_string(), TokenSource::Header));
    }

    if let Some(cookie) = req.cookie(cookie_name) {
        return Some((cookie.value().to_string(), TokenSource::Cookie));
    }

    req.query_string()
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|v| !v.is_empty())
        .map(|v| (v.to_string(), TokenSource::Query))
}

/// Token gate middleware factory, configured per route
pub struct TokenGate {
    expected: Option<TokenKind>,
    mode: VerificationMode,
}

impl TokenGate {
    /// Gate that rejects on any failure, requiring a token of `kind`
    pub fn strict(kind: TokenKind) -> Self {
        Self {
            expected: Some(kind),
            mode: VerificationMode::Strict,
        }
    }

    /// Gate that leaves the request anonymous on failure
    pub fn lenient(kind: TokenKind) -> Self {
        Self {
            expected: Some(kind),
            mode: VerificationMode::Lenient,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenGateMiddleware {
            service: Rc::new(service),
            expected: self.expected,
            mode: self.mode,
        }))
    }
}

/// Token gate middleware service
pub struct TokenGateMiddleware<S> {
    service: Rc<S>,
    expected: Option<TokenKind>,
    mode: VerificationMode,
}

impl<S, B> Service<ServiceRequest> for TokenGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let expected = self.expected;
        let mode = self.mode;

        let pipeline = req
            .app_data::<web::Data<Arc<dyn TokenPipeline>>>()
            .map(|data| Arc::clone(data.get_ref()));
        let cookie_name = req
            .app_data::<web::Data<AuthConfig>>()
            .map(|c| c.cookie.name.clone())
            .unwrap_or_else(|| CookieConfig::default().name);

        Box::pin(async move {
            let Some(pipeline) = pipeline else {
                let error = ApiError(DomainError::Internal {
                    message: "Token pipeline not configured".to_string(),
                });
                return Ok(reject(req, error));
            };

            let extracted = extract_token(&req, &cookie_name);

            match mode {
                VerificationMode::Strict => {
                    let Some((token, _)) = extracted else {
                        return Ok(reject(req, ApiError(AuthError::Unauthenticated.into())));
                    };

                    let (claims, user) = match identify(&*pipeline, &token, expected).await {
                        Ok(pair) => pair,
                        Err(e) => return Ok(reject(req, ApiError(e))),
                    };

                    req.extensions_mut().insert(VerifiedToken {
                        raw: token,
                        claims,
                    });
                    req.extensions_mut().insert(CurrentUser(user));
                }
                VerificationMode::Lenient => {
                    if let Some((token, _)) = extracted {
                        match try_identify(&*pipeline, &token, expected).await {
                            Ok(Some((claims, user))) => {
                                req.extensions_mut().insert(VerifiedToken {
                                    raw: token,
                                    claims,
                                });
                                req.extensions_mut().insert(CurrentUser(user));
                            }
                            Ok(None) => {}
                            Err(e) => return Ok(reject(req, ApiError(e))),
                        }
                    }
                }
            }

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

/// Render a gate rejection as a complete response.
///
/// Erroring out of the service chain would leave the status mapping to
/// whoever catches the boxed error; answering in place keeps it here.
fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    let response = error.error_response().map_into_right_body();
    req.into_response(response)
}

/// Strict identification: any failure rejects the request.
async fn identify(
    pipeline: &dyn TokenPipeline,
    token: &str,
    expected: Option<TokenKind>,
) -> Result<(Claims, User), DomainError> {
    let claims = pipeline.verify(token, expected).await?;
    let user = pipeline.resolve(&claims).await?;
    gate::require_not_banned(&user)?;
    Ok((claims, user))
}

/// Lenient identification: swallow every failure except a ledger
/// outage, which must never be read as "not revoked".
async fn try_identify(
    pipeline: &dyn TokenPipeline,
    token: &str,
    expected: Option<TokenKind>,
) -> Result<Option<(Claims, User)>, DomainError> {
    let claims = match pipeline.verify(token, expected).await {
        Ok(claims) => claims,
        Err(e) if e.is_infrastructure_fault() => return Err(e),
        Err(_) => return Ok(None),
    };

    match pipeline.resolve(&claims).await {
        Ok(user) if !user.is_banned => Ok(Some((claims, user))),
        Ok(_) => Ok(None),
        Err(e) if e.is_infrastructure_fault() => Err(e),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // Imported by path: a glob of `actix_web::test` would shadow the
    // built-in `#[test]` attribute with actix's async macro.
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_token_prefers_header() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer header_token"))
            .cookie(actix_web::cookie::Cookie::new("inkwell_refresh", "cookie_token"))
            .uri("/?token=query_token")
            .to_srv_request();

        assert_eq!(
            extract_token(&req, "inkwell_refresh"),
            Some(("header_token".to_string(), TokenSource::Header))
        );
    }

    #[test]
    fn test_extract_token_falls_back_to_cookie_then_query() {
        let req = TestRequest::default()
            .cookie(actix_web::cookie::Cookie::new("inkwell_refresh", "cookie_token"))
            .uri("/?token=query_token")
            .to_srv_request();
        assert_eq!(
            extract_token(&req, "inkwell_refresh"),
            Some(("cookie_token".to_string(), TokenSource::Cookie))
        );

        let req = TestRequest::default()
            .uri("/path?other=1&token=query_token")
            .to_srv_request();
        assert_eq!(
            extract_token(&req, "inkwell_refresh"),
            Some(("query_token".to_string(), TokenSource::Query))
        );
    }

    #[test]
    fn test_extract_token_absent() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(extract_token(&req, "inkwell_refresh"), None);

        // A non-Bearer Authorization header does not count.
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic abc"))
            .to_srv_request();
        assert_eq!(extract_token(&req, "inkwell_refresh"), None);

        // Neither does an empty query value.
        let req = TestRequest::default()
            .uri("/?token=")
            .to_srv_request();
        assert_eq!(extract_token(&req, "inkwell_refresh"), None);
    }
}
