//! Property-based tests for URL normalization.
//!
//! These tests verify that normalization always yields a schemed URL, never
//! rewrites an already-schemed input, and is idempotent.

use proptest::prelude::*;

use smartmarks::types::bookmark::normalize_url;

/// Strategy for generating host-like strings without a scheme.
fn arb_bare_host() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9]{1,12}",
        prop_oneof![Just(".com"), Just(".org"), Just(".dev"), Just(".io")],
        proptest::option::of("/[a-z0-9]{1,10}"),
    )
        .prop_map(|(host, tld, path)| format!("{}{}{}", host, tld, path.unwrap_or_default()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // The result always carries an http or https scheme.
    #[test]
    fn normalized_urls_always_have_a_scheme(input in "\\PC{0,40}") {
        let normalized = normalize_url(&input);
        prop_assert!(
            normalized.starts_with("http://") || normalized.starts_with("https://"),
            "'{}' normalized to '{}'",
            input,
            normalized
        );
    }

    // Already-schemed inputs pass through byte for byte.
    #[test]
    fn schemed_input_is_preserved(host in arb_bare_host(), https in any::<bool>()) {
        let scheme = if https { "https" } else { "http" };
        let url = format!("{}://{}", scheme, host);
        prop_assert_eq!(normalize_url(&url), url);
    }

    // Bare hosts get the https prefix and nothing else changes.
    #[test]
    fn bare_host_gets_https_prefix(host in arb_bare_host()) {
        prop_assert_eq!(normalize_url(&host), format!("https://{}", host));
    }

    // Normalizing twice is the same as normalizing once.
    #[test]
    fn normalization_is_idempotent(input in "\\PC{0,40}") {
        let once = normalize_url(&input);
        prop_assert_eq!(normalize_url(&once), once.clone());
    }
}
