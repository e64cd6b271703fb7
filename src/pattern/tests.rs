use crate::model::Dimension;

use super::{DISABLED, PatternSet, RawTokens, extract, preset};

#[test]
fn presets_resolve_per_dimension() {
    assert_eq!(preset(Dimension::Z, "_Z"), Some(r"_Z(?P<Z>\d+)"));
    assert_eq!(preset(Dimension::Time, "Time"), Some(r"Time(?P<T>\d+)"));
    assert_eq!(preset(Dimension::Channel, "_w"), Some(r"_w(?P<C>\w+?)"));
    assert_eq!(preset(Dimension::Z, "Time"), None);
}

#[test]
fn extracts_tokens_from_all_enabled_dimensions() {
    let patterns = PatternSet::compile("_C", "_Z", "_T").expect("patterns");
    let tokens = extract("exp1_C2_Z003_T01.tif", &patterns);
    assert_eq!(tokens.channel.as_deref(), Some("2"));
    assert_eq!(tokens.z.as_deref(), Some("003"));
    assert_eq!(tokens.time.as_deref(), Some("01"));
}

#[test]
fn disabled_or_unmatched_dimension_yields_absent_token() {
    let patterns = PatternSet::compile("_C", DISABLED, "_T").expect("patterns");
    assert!(!patterns.is_enabled(Dimension::Z));
    let tokens = extract("plain_name.tif", &patterns);
    assert_eq!(tokens, RawTokens::default());
}

#[test]
fn custom_regex_with_named_group_is_accepted() {
    let patterns =
        PatternSet::compile(r"Channel(?P<C>.+?)_", DISABLED, DISABLED).expect("patterns");
    let tokens = extract("WellA1_ChannelFluo Green_T0.tif", &patterns);
    assert_eq!(tokens.channel.as_deref(), Some("Fluo Green"));
}

#[test]
fn custom_regex_without_named_group_is_rejected() {
    let error = PatternSet::compile(r"_C(\d+)", DISABLED, DISABLED).expect_err("must reject");
    assert!(error.to_string().contains("named capture group"));
}

#[test]
fn malformed_regex_is_rejected() {
    assert!(PatternSet::compile(r"_C(?P<C>[", DISABLED, DISABLED).is_err());
}
