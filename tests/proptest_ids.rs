//! Property-based tests using proptest
//!
//! These tests check the `page_id/resource_id` import identifier against
//! randomized inputs.

use proptest::prelude::*;
use statuspage_provider::resource::PageResourceId;
use statuspage_provider::ProviderError;

/// Any string without the separator
fn arb_segment() -> impl Strategy<Value = String> {
    "[^/]{0,24}"
}

/// Any string at all, separators included
fn arb_any() -> impl Strategy<Value = String> {
    ".{0,24}"
}

proptest! {
    /// A single separator splits the input in two
    #[test]
    fn parse_splits_page_and_resource(page in arb_segment(), resource in arb_segment()) {
        let id = PageResourceId::parse(&format!("{}/{}", page, resource)).unwrap();
        prop_assert_eq!(id.page_id, page);
        prop_assert_eq!(id.resource_id, resource);
    }

    /// Only the first separator splits; the rest stays in the resource id
    #[test]
    fn parse_splits_on_first_separator_only(
        page in arb_segment(),
        first in arb_any(),
        second in arb_any()
    ) {
        let id = PageResourceId::parse(&format!("{}/{}/{}", page, first, second)).unwrap();
        prop_assert_eq!(id.page_id, page);
        prop_assert_eq!(id.resource_id, format!("{}/{}", first, second));
    }

    /// Inputs without a separator are rejected and echoed back
    #[test]
    fn parse_rejects_input_without_separator(input in arb_segment()) {
        let err = PageResourceId::parse(&input).unwrap_err();
        prop_assert!(err.to_string().ends_with(&input));
        prop_assert_eq!(err, ProviderError::MalformedIdentifier(input));
    }

    /// Formatting a parsed id reproduces the input
    #[test]
    fn display_reproduces_input(page in arb_segment(), resource in arb_any()) {
        let input = format!("{}/{}", page, resource);
        let id = PageResourceId::parse(&input).unwrap();
        prop_assert_eq!(id.to_string(), input);
    }
}

#[test]
fn parse_empty_string_fails() {
    assert_eq!(
        PageResourceId::parse(""),
        Err(ProviderError::MalformedIdentifier(String::new()))
    );
}

#[test]
fn parse_lone_separator_gives_empty_parts() {
    assert_eq!(PageResourceId::parse("/"), Ok(PageResourceId::new("", "")));
}

#[test]
fn parse_concrete_scenarios() {
    assert_eq!(
        PageResourceId::parse("pg7abc123/cp9xyz789"),
        Ok(PageResourceId::new("pg7abc123", "cp9xyz789"))
    );
    assert_eq!(
        PageResourceId::parse("pg7abc123/grp1/extra"),
        Ok(PageResourceId::new("pg7abc123", "grp1/extra"))
    );

    let err = PageResourceId::parse("no-separator-here").unwrap_err();
    assert!(err.to_string().contains("no-separator-here"));
}
