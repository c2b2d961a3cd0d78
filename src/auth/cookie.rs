//! Defines functions for handling user authentication with cookies.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

/// The session cookie stores its own expiry date time as its value, so the
/// server can check whether the session is still valid without a session
/// store. The cookie is encrypted and signed by `PrivateCookieJar`, so the
/// client cannot tamper with the expiry.
pub(crate) const COOKIE_SESSION: &str = "session";
/// The default duration for which auth cookies are valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

/// Date time format for the session expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
         sign:mandatory]:[offset_minute]:[offset_second]"
);

/// Add a session cookie to the cookie jar, indicating that the user is logged in.
///
/// Sets the initial expiry of the cookie to `duration` from the current time.
/// You can use [DEFAULT_COOKIE_DURATION] for the default duration.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns a [time::error::Format] if the expiry time cannot be formatted.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, time::error::Format> {
    let expiry = OffsetDateTime::now_utc() + duration;
    // Use format instead of to_string to avoid errors at midnight when the hour is printed as
    // a single digit when [DATE_TIME_FORMAT] expects two digits.
    let expiry_string = expiry.format(DATE_TIME_FORMAT)?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, expiry_string))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the session cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Check that `jar` contains a session cookie that has not yet expired.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if there is no session cookie in the jar.
/// - [Error::InvalidCredentials] if the cookie value cannot be parsed or the session has expired.
pub(crate) fn validate_session(jar: &PrivateCookieJar) -> Result<(), Error> {
    let cookie = jar.get(COOKIE_SESSION).ok_or(Error::CookieMissing)?;
    let expiry = extract_date_time(&cookie).map_err(|_| Error::InvalidCredentials)?;

    if expiry <= OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    Ok(())
}

/// Set the expiry of the session cookie in `jar` to the latest of UTC now
/// plus `duration` and the cookie's current expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::CookieMissing] if the session cookie is not in the cookie jar.
/// - [Error::InvalidDateFormat] if the cookie value cannot be parsed, extending
///   the cookie by `duration` would overflow the date time, or the new expiry
///   date time cannot be formatted.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let session_cookie = jar.get(COOKIE_SESSION).ok_or(Error::CookieMissing)?;
    let current_expiry = extract_date_time(&session_cookie).map_err(|error| {
        Error::InvalidDateFormat(
            error.to_string(),
            session_cookie.value_trimmed().to_owned(),
        )
    })?;

    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| {
            Error::InvalidDateFormat("date time overflow".to_owned(), duration.to_string())
        })?;

    let expiry = max(current_expiry, new_expiry);
    let expiry_string = expiry
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), expiry.to_string()))?;

    // Cookies parsed from a request only carry the name and value, so the
    // cookie must be rebuilt with the same attributes as [set_auth_cookie]
    // rather than mutated in place.
    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, expiry_string))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

pub(crate) fn extract_date_time(cookie: &Cookie) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(cookie.value_trimmed(), DATE_TIME_FORMAT)
}
