//! Redirect-URI admission.

use regex::Regex;

use crate::types::{Client, RedirectUriMode};

/// Decides whether `candidate` is an acceptable redirect target for
/// `client`.
///
/// Prefix mode is a literal prefix comparison with no normalization, so
/// `"http://valid/"` in the allow list does not admit `"http://valid"`.
/// Regex mode compiles each entry and admits on any match; anchoring is
/// the pattern's own responsibility (a trailing `$` pins the end). A
/// pattern that fails to compile is skipped with a warning instead of
/// failing the whole check.
#[must_use]
pub fn is_valid_redirect_uri(client: &Client, candidate: &str) -> bool {
    match client.redirect_uri_mode {
        RedirectUriMode::Prefix => client
            .allowed_redirect_uris
            .iter()
            .any(|prefix| candidate.starts_with(prefix.as_str())),
        RedirectUriMode::Regex => client.allowed_redirect_uris.iter().any(|pattern| {
            match Regex::new(pattern) {
                Ok(re) => re.is_match(candidate),
                Err(error) => {
                    tracing::warn!(
                        client_id = %client.client_id,
                        pattern = %pattern,
                        %error,
                        "skipping malformed redirect uri pattern"
                    );
                    false
                }
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_client() -> Client {
        let mut client = Client::new("regex-app");
        client.redirect_uri_mode = RedirectUriMode::Regex;
        client.allowed_redirect_uris = vec![
            "http://valid/$".into(),
            "http://wildcard/.*$".into(),
            "https://path/with/uri$".into(),
            "https://path/with/slash/".into(),
            "https://path/with/wildslah/*".into(),
        ];
        client
    }

    fn prefix_client() -> Client {
        let mut client = Client::new("prefix-app");
        client.allowed_redirect_uris = vec![
            "http://valid/".into(),
            "http://noslash".into(),
            "https://params?".into(),
        ];
        client
    }

    #[test]
    fn test_regex_mode_admits() {
        let client = regex_client();
        for uri in ["http://valid/", "http://wildcard/123/xyz", "https://path/with/uri"] {
            assert!(is_valid_redirect_uri(&client, uri), "{uri}");
        }
    }

    #[test]
    fn test_regex_mode_rejects() {
        let client = regex_client();
        for uri in ["http://valid", "http://wildcard", "https://path/with/uri/"] {
            assert!(!is_valid_redirect_uri(&client, uri), "{uri}");
        }
    }

    #[test]
    fn test_prefix_mode_admits() {
        let client = prefix_client();
        for uri in ["http://valid/yes", "https://params?a=b", "http://noslash", "http://noslash/x"] {
            assert!(is_valid_redirect_uri(&client, uri), "{uri}");
        }
    }

    #[test]
    fn test_prefix_mode_rejects() {
        let client = prefix_client();
        for uri in ["http://valid", "https://params#?a=b", "http://other/"] {
            assert!(!is_valid_redirect_uri(&client, uri), "{uri}");
        }
    }

    #[test]
    fn test_malformed_regex_is_skipped_not_fatal() {
        let mut client = regex_client();
        client
            .allowed_redirect_uris
            .insert(0, "https://broken/(unclosed".into());
        // the broken pattern neither admits nor aborts; later entries still apply
        assert!(is_valid_redirect_uri(&client, "http://valid/"));
        assert!(!is_valid_redirect_uri(&client, "https://broken/(unclosed"));
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let client = Client::new("empty");
        assert!(!is_valid_redirect_uri(&client, "http://anything/"));
    }
}
