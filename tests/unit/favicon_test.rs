//! Unit tests for the favicon/initials helpers.

use rstest::rstest;

use smartmarks::services::favicon::{display_domain, favicon_url, initials, FALLBACK_LABEL};

#[rstest]
#[case("https://www.example.com/page", "example.com")]
#[case("http://example.com", "example.com")]
#[case("https://docs.rs/rusqlite", "docs.rs")]
#[case("github.com/rust-lang/rust", "github.com")]
#[case("https://EXAMPLE.com", "example.com")]
#[case("https://example.com:8080/admin", "example.com")]
#[case("https://example.com?q=1", "example.com")]
#[case("https://example.com#section", "example.com")]
fn test_display_domain(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(display_domain(input), expected);
}

#[rstest]
#[case("::not a url::")]
#[case("")]
#[case("https://")]
#[case("https://exa mple.com")]
#[case("https:///path-only")]
fn test_unparsable_urls_fall_back(#[case] input: &str) {
    assert_eq!(display_domain(input), FALLBACK_LABEL);
}

#[rstest]
#[case("example.com", "EX")]
#[case("github.com", "GI")]
#[case("x.org", "X.")]
#[case("link", "LI")]
fn test_initials(#[case] domain: &str, #[case] expected: &str) {
    assert_eq!(initials(domain), expected);
}

#[test]
fn test_favicon_url_targets_the_icon_service() {
    assert_eq!(
        favicon_url("example.com"),
        "https://www.google.com/s2/favicons?domain=example.com&sz=64"
    );
}
