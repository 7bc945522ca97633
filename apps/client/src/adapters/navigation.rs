use tracing::info;

use crate::application::use_cases::expiry::Navigator;

/// Terminal stand-in for the login screen: tells the user how to sign in again.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoginRedirect;

impl Navigator for LoginRedirect {
    fn redirect_to_login(&self) {
        info!("Redirecting to login");
        eprintln!("Your session has expired. Run `propnest request-otp <phone>` to log in again.");
    }
}
