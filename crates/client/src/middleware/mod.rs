//! Request pipeline hooks for authentication and session expiry.
//!
//! Each [`Middleware`] gets a look at the outgoing request before it is
//! sent and at the response status once it arrives. The client runs them
//! in registration order.

mod auth;
mod redirect;

pub use auth::BearerAuth;
pub use redirect::{LogRedirect, LoginRedirect, UnauthorizedRedirect};

use reqwest::{Request, StatusCode};

use common::AppResult;

/// Pre-request / post-response hook pair.
pub trait Middleware: Send + Sync {
    /// Runs before the request is sent. An error aborts the call.
    fn before(&self, _request: &mut Request) -> AppResult<()> {
        Ok(())
    }

    /// Runs after a response arrives, whatever its status.
    fn after(&self, _status: StatusCode) -> AppResult<()> {
        Ok(())
    }
}
