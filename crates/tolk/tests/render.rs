//! Tests for placeholder substitution and rendering.

use std::sync::Arc;

use serde_json::json;
use tolk::{
    CollectingSink, DelimiterPair, Diagnostic, PluralNumber, Renderer, TranslationValue, params,
};

fn renderer_with_sink() -> (Renderer, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let renderer = Renderer::builder().sink(sink.clone()).build();
    (renderer, sink)
}

// =========================================================================
// Substitution
// =========================================================================

#[test]
fn text_without_placeholders_is_unchanged() {
    let (renderer, sink) = renderer_with_sink();
    let text = "Nothing to replace: {} { spaced } :::";
    assert_eq!(renderer.substitute(text, &params! { "x" => 1 }), text);
    assert!(sink.is_empty());
}

#[test]
fn placeholders_are_replaced() {
    let (renderer, sink) = renderer_with_sink();
    let out = renderer.substitute(
        "Hello {name}, you have {count} new {kind}",
        &params! { "name" => "Ada", "count" => 3, "kind" => "messages" },
    );
    assert_eq!(out, "Hello Ada, you have 3 new messages");
    assert!(sink.is_empty());
}

#[test]
fn repeated_placeholder_replaced_everywhere() {
    let renderer = Renderer::default();
    let out = renderer.substitute("{x}-{x}-{x}", &params! { "x" => "ab" });
    assert_eq!(out, "ab-ab-ab");
}

#[test]
fn values_are_stringified() {
    let renderer = Renderer::default();
    let out = renderer.substitute(
        "{int} {float} {flag}",
        &params! { "int" => -4, "float" => 2.5, "flag" => true },
    );
    assert_eq!(out, "-4 2.5 true");
}

#[test]
fn substituted_value_is_not_substituted_again() {
    let renderer = Renderer::default();
    let out = renderer.substitute("{a}", &params! { "a" => "{b}", "b" => "nested" });
    assert_eq!(out, "{b}");
}

#[test]
fn rendering_is_repeatable() {
    let renderer = Renderer::default();
    let replacements = params! { "name" => "Ada" };
    let first = renderer.substitute("Hi {name} {missing}", &replacements);
    let second = renderer.substitute("Hi {name} {missing}", &replacements);
    assert_eq!(first, second);
}

// =========================================================================
// Missing Placeholders
// =========================================================================

#[test]
fn missing_placeholder_is_kept_verbatim() {
    let (renderer, sink) = renderer_with_sink();
    let out = renderer.substitute("Hello {name}, {greeting}", &params! { "name" => "Ada" });
    assert_eq!(out, "Hello Ada, {greeting}");

    let diagnostics = sink.take();
    assert_eq!(
        diagnostics,
        vec![Diagnostic::MissingPlaceholder {
            placeholder: "{greeting}".to_string(),
            text: "Hello {name}, {greeting}".to_string(),
            suggestions: vec![],
        }]
    );
}

#[test]
fn missing_placeholder_suggests_close_names() {
    let (renderer, sink) = renderer_with_sink();
    renderer.substitute("Hi {nmae}", &params! { "name" => "Ada" });

    let diagnostics = sink.take();
    let [Diagnostic::MissingPlaceholder { suggestions, .. }] = diagnostics.as_slice() else {
        panic!("expected one missing placeholder diagnostic");
    };
    assert_eq!(suggestions, &vec!["name".to_string()]);
}

// =========================================================================
// Custom Delimiters
// =========================================================================

#[test]
fn delimiters_are_matched_literally() {
    let renderer = Renderer::builder()
        .delimiters(DelimiterPair::new("[[", "]]"))
        .build();
    let out = renderer.substitute("[[a]] [a] {a} [[ a ]]", &params! { "a" => "X" });
    assert_eq!(out, "X [a] {a} [[ a ]]");
}

#[test]
fn regex_metacharacters_in_delimiters() {
    let renderer = Renderer::builder()
        .delimiters(DelimiterPair::new("$(", ")"))
        .build();
    let out = renderer.substitute("Total: $(sum) $sum", &params! { "sum" => 10 });
    assert_eq!(out, "Total: 10 $sum");
}

#[test]
fn double_brace_delimiters() {
    let renderer = Renderer::builder()
        .delimiters(DelimiterPair::new("{{", "}}"))
        .build();
    let out = renderer.substitute("{{name}} and {name}", &params! { "name" => "Ada" });
    assert_eq!(out, "Ada and {name}");
}

#[test]
fn misconfigured_delimiters_are_reported_and_repaired() {
    let sink = CollectingSink::new();

    let pair = DelimiterPair::from_markers(&["<", ">", "!"], &sink);
    assert_eq!(pair, DelimiterPair::new("<", ">"));

    let pair = DelimiterPair::from_markers::<&str>(&[], &sink);
    assert_eq!(pair, DelimiterPair::default());

    let pair = DelimiterPair::from_markers(&["", "%"], &sink);
    assert_eq!(pair, DelimiterPair::new("{", "%"));

    let given: Vec<Vec<String>> = sink
        .take()
        .into_iter()
        .map(|d| match d {
            Diagnostic::MisconfiguredDelimiters { given } => given,
            other => panic!("unexpected diagnostic {other:?}"),
        })
        .collect();
    assert_eq!(
        given,
        vec![
            vec!["<".to_string(), ">".to_string(), "!".to_string()],
            vec![],
            vec![String::new(), "%".to_string()],
        ]
    );
}

// =========================================================================
// Translation Values
// =========================================================================

#[test]
fn list_elements_are_substituted_independently() {
    let (renderer, sink) = renderer_with_sink();
    let list = TranslationValue::from(vec!["Dear {name},", "{missing}", "one:::many"]);

    let out = renderer.render("en", &list, &params! { "name" => "Ada" }, None);
    assert_eq!(
        out,
        TranslationValue::from(vec!["Dear Ada,", "{missing}", "one:::many"])
    );
    assert!(sink.is_empty(), "list items do not report missing placeholders");
}

#[test]
fn list_is_never_pluralized() {
    let (renderer, sink) = renderer_with_sink();
    let list = TranslationValue::from(vec!["one item:::many items"]);

    let out = renderer.render("en", &list, &params! {}, Some(&5.into()));
    assert_eq!(out, TranslationValue::from(vec!["one item:::many items"]));
    assert!(sink.is_empty());
}

#[test]
fn non_numeric_count_reported_for_lists_and_other_values() {
    let (renderer, sink) = renderer_with_sink();
    let list = TranslationValue::from(vec!["a:::b"]);

    let out = renderer.render("en", &list, &params! {}, Some(&"three".into()));
    assert_eq!(out, TranslationValue::from(vec!["a:::b"]));
    assert_eq!(
        sink.take(),
        vec![Diagnostic::NonNumericPluralCount {
            count: "three".to_string()
        }]
    );

    let value = TranslationValue::Other(json!({ "nested": true }));
    assert_eq!(
        renderer.render("en", &value, &params! {}, Some(&true.into())),
        value
    );
    assert_eq!(
        sink.take(),
        vec![Diagnostic::NonNumericPluralCount {
            count: "true".to_string()
        }]
    );
}

#[test]
fn other_values_pass_through() {
    let renderer = Renderer::default();
    let value = TranslationValue::Other(json!(42));
    assert_eq!(
        renderer.render("en", &value, &params! {}, Some(&1.into())),
        value
    );

    let null = TranslationValue::Other(json!(null));
    assert_eq!(renderer.render("en", &null, &params! {}, None), null);
}

#[test]
fn f32_replacement_renders_as_written() {
    let renderer = Renderer::default();
    let text = TranslationValue::from("x={x}");
    assert_eq!(
        renderer.render("en", &text, &params! { "x" => 0.1_f32 }, None),
        "x=0.1"
    );
}

#[test]
fn text_with_count_selects_plural_form_after_substitution() {
    let renderer = Renderer::default();
    let text = TranslationValue::from("{n} file:::{n} files");

    let one = renderer.render("en", &text, &params! { "n" => 1 }, Some(&1.into()));
    let many = renderer.render("en", &text, &params! { "n" => 7 }, Some(&7.into()));
    assert_eq!(one, "1 file");
    assert_eq!(many, "7 files");
}

#[test]
fn text_without_count_keeps_all_forms() {
    let renderer = Renderer::default();
    let text = TranslationValue::from("one:::many");
    assert_eq!(renderer.render("en", &text, &params! {}, None), "one:::many");
}

#[test]
fn custom_plural_rules_are_used() {
    let renderer = Renderer::builder()
        .plural_rules(Arc::new(|_: &str, _: PluralNumber| 2_usize))
        .build();
    let text = TranslationValue::from("a:::b:::c");
    assert_eq!(renderer.render("xx", &text, &params! {}, Some(&0.into())), "c");
}
