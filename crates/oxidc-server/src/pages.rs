//! Static HTML pages for the interactive flow.
//!
//! The page shells are assembled once and cached in `OnceLock`s; per
//! request only the dynamic fragments are substituted in. No template
//! engine: the two pages are small enough that plain string assembly
//! stays readable.

use std::sync::OnceLock;

use oxidc_auth::http::{ConsentPageContext, PageRenderer};

const ERROR_SLOT: &str = "<!--error-->";
const BODY_SLOT: &str = "<!--body-->";

fn layout() -> &'static str {
    static LAYOUT: OnceLock<String> = OnceLock::new();
    LAYOUT.get_or_init(|| {
        format!(
            "<!doctype html>\n<html>\n<head><title>oxidc</title></head>\n\
             <body>\n{BODY_SLOT}\n</body>\n</html>\n"
        )
    })
}

fn login_shell() -> &'static str {
    static SHELL: OnceLock<String> = OnceLock::new();
    SHELL.get_or_init(|| {
        let body = format!(
            "<h1>Sign in</h1>\n{ERROR_SLOT}\n\
             <form method=\"post\" action=\"/login\">\n\
             <input name=\"username\" placeholder=\"username\">\n\
             <input name=\"password\" type=\"password\" placeholder=\"password\">\n\
             <button type=\"submit\">Sign in</button>\n\
             </form>\n\
             <form method=\"post\" action=\"/register\">\n\
             <input name=\"username\" placeholder=\"username\">\n\
             <input name=\"password\" type=\"password\" placeholder=\"password\">\n\
             <button type=\"submit\">Register</button>\n\
             </form>"
        );
        layout().replace(BODY_SLOT, &body)
    })
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The built-in page renderer.
#[derive(Default, Clone, Copy)]
pub struct StaticPages;

impl PageRenderer for StaticPages {
    fn login_page(&self, error: Option<&str>) -> String {
        let message = match error {
            Some(error) => format!("<p class=\"error\">{}</p>", escape(error)),
            None => String::new(),
        };
        login_shell().replace(ERROR_SLOT, &message)
    }

    fn consent_page(&self, context: &ConsentPageContext) -> String {
        let client_name = if context.client.display_name.is_empty() {
            &context.client.client_id
        } else {
            &context.client.display_name
        };
        let standing = if context.view.current.is_some() {
            "<p>You have authorized this application before.</p>"
        } else {
            ""
        };
        let body = format!(
            "<h1>Authorize {client}</h1>\n\
             <p>Signed in as {user}.</p>\n\
             <p>Requested scopes: {scopes}</p>\n\
             {standing}\n\
             <form method=\"post\" action=\"/confirm\">\n\
             <button type=\"submit\">Authorize</button>\n\
             </form>",
            client = escape(client_name),
            user = escape(&context.user_id),
            scopes = escape(&context.pending.scope),
        );
        layout().replace(BODY_SLOT, &body)
    }
}
