//! Login redirect for a terminal session.

use finance_client::middleware::LoginRedirect;
use tracing::debug;

/// Tells the user to sign in again after the session expired.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRedirect;

impl LoginRedirect for TerminalRedirect {
    fn redirect(&self, login_path: &str) {
        debug!(login_path, "Session expired");
        eprintln!("Your session has expired. Run `finance login` to sign in again.");
    }
}
