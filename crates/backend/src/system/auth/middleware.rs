use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;
    let claims = validate(&token).await?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;
    let claims = validate(&token).await?;

    if !claims.is_admin {
        tracing::warn!("User {} denied admin route {}", claims.username, req.uri().path());
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Owned `Authorization: Bearer` token; must not borrow the request across an await
fn bearer_token(req: &Request<Body>) -> Result<String, StatusCode> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn validate(token: &str) -> Result<TokenClaims, StatusCode> {
    super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_is_extracted() {
        let req = Request::builder()
            .header("Authorization", "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&req), Err(StatusCode::UNAUTHORIZED));

        let req = Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Err(StatusCode::UNAUTHORIZED));
    }
}
