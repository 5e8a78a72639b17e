//! Login, registration and logout handlers.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::AuthError;

use super::cookies::{REFRESH_COOKIE, SESSION_COOKIE, removal_cookie};
use super::state::OidcState;
use super::{establish_session, found};

/// Credentials posted from the login or registration form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `GET /login` and `GET /register`: the combined sign-in page.
pub async fn login_form(State(state): State<OidcState>) -> Html<String> {
    Html(state.pages.login_page(None))
}

/// `POST /login`: verify credentials and establish a session.
///
/// A failed attempt re-renders the login page; the message does not say
/// whether the user or the password was wrong.
pub async fn login(
    State(state): State<OidcState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AuthError> {
    match state.users.login(&form.username, &form.password).await? {
        Some(user) => {
            let jar = establish_session(&state, jar, &user.id).await?;
            Ok((jar, found("/accept")).into_response())
        }
        None => Ok(Html(state.pages.login_page(Some("invalid credentials"))).into_response()),
    }
}

/// `POST /register`: create an account and establish a session.
pub async fn register(
    State(state): State<OidcState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AuthError> {
    let user = state.users.register(&form.username, &form.password).await?;
    let jar = establish_session(&state, jar, &user.id).await?;
    Ok((jar, found("/accept")).into_response())
}

/// `POST /logout`: drop both token cookies.
///
/// The server-side session record is left in place; the refresh code on
/// it is useless without the cookie-held refresh token.
pub async fn logout(jar: CookieJar) -> Response {
    let jar = jar
        .remove(removal_cookie(SESSION_COOKIE))
        .remove(removal_cookie(REFRESH_COOKIE));
    (jar, found("/")).into_response()
}
