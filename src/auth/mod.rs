//! User authentication via encrypted session cookies.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;

pub(crate) use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{LoginState, get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::{build_log_in_redirect_url, normalize_redirect_url};

#[cfg(test)]
pub(crate) use cookie::COOKIE_SESSION;

#[cfg(test)]
pub use middleware::AuthState;
