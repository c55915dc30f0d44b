//! Authentication middleware.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;

use common::{AppError, AppResult};
use domain::BEARER_TOKEN_PREFIX;

use super::Middleware;
use crate::session::Session;

/// Attaches the stored bearer token to every outgoing request.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    session: Session,
}

impl BearerAuth {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl Middleware for BearerAuth {
    fn before(&self, request: &mut Request) -> AppResult<()> {
        // No token, no header
        let Some(token) = self.session.token()? else {
            return Ok(());
        };

        let mut value = HeaderValue::from_str(&format!("{}{}", BEARER_TOKEN_PREFIX, token))
            .map_err(|_| AppError::storage("stored token is not a valid header value"))?;
        value.set_sensitive(true);

        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}
