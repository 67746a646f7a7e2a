//! End-to-end tests for the translation engine.

use std::sync::Arc;
use std::thread;

use tolk::{
    CollectingSink, Diagnostic, Engine, MemoryStore, Query, Renderer, TranslationValue, params,
};

fn store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::builder().locale("de-CH").fallback("en").build());
    store
        .load_bundle_str(
            r#"{
                "de-CH": { "greeting": "Grüezi {name}" },
                "de": {
                    "greeting": "Hallo {name}",
                    "farewell": "Tschüss",
                    "files": "eine Datei:::{n} Dateien"
                },
                "en": {
                    "greeting": "Hello {name}",
                    "farewell": "Goodbye",
                    "apples": "one apple:::{n} apples",
                    "steps": ["First {a}", "Then {b}"]
                }
            }"#,
        )
        .unwrap();
    store
}

fn engine_with_sink() -> (Engine<Arc<MemoryStore>>, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let engine = Engine::builder()
        .store(store())
        .renderer(Renderer::builder().sink(sink.clone()).build())
        .build();
    (engine, sink)
}

// =========================================================================
// Translation
// =========================================================================

#[test]
fn translate_walks_fallback_chain() {
    let engine = Engine::new(store());
    let query = Query::builder()
        .replacements(params! { "name" => "Anna" })
        .build();

    assert_eq!(engine.text("greeting", &query), "Grüezi Anna");
    assert_eq!(engine.text("farewell", &query), "Tschüss");
    assert_eq!(
        engine.text("apples", &Query::builder().count(1).build()),
        "one apple"
    );
    assert_eq!(engine.text("nowhere", &query), "nowhere");
}

#[test]
fn default_value_is_rendered() {
    let engine = Engine::new(store());
    let query = Query::builder()
        .default_value("No {thing} here")
        .replacements(params! { "thing" => "key" })
        .build();
    assert_eq!(engine.text("missing", &query), "No key here");
}

#[test]
fn plural_form_uses_resolved_locale() {
    let engine = Engine::new(store());
    let query = Query::builder()
        .replacements(params! { "n" => 4 })
        .count(4)
        .build();
    assert_eq!(engine.text("files", &query), "4 Dateien");
    assert_eq!(engine.text("apples", &query), "4 apples");
}

#[test]
fn translate_in_ignores_current_locale() {
    let engine = Engine::new(store());
    let query = Query::builder()
        .replacements(params! { "name" => "Sam" })
        .build();

    assert_eq!(engine.text_in("en", "greeting", &query), "Hello Sam");
    assert_eq!(engine.text_in("de-AT", "greeting", &query), "Hallo Sam");
    assert_eq!(engine.text_in("fr", "farewell", &query), "Goodbye");
    assert_eq!(engine.locale(), "de-CH");
}

#[test]
fn list_translation() {
    let engine = Engine::new(store());
    let query = Query::builder()
        .replacements(params! { "a" => "mix", "b" => "bake" })
        .build();

    assert_eq!(
        engine.translate("steps", &query),
        TranslationValue::from(vec!["First mix", "Then bake"])
    );
    assert_eq!(engine.text("steps", &query), "First mix\nThen bake");
}

#[test]
fn engine_sees_store_changes_between_calls() {
    let store = store();
    let engine = Engine::new(store.clone());
    let query = Query::new();

    assert_eq!(engine.text("farewell", &query), "Tschüss");

    store.set_locale("en");
    assert_eq!(engine.text("farewell", &query), "Goodbye");

    store.load_locale_str("en", r#"{ "farewell": "Bye" }"#).unwrap();
    assert_eq!(engine.text("farewell", &query), "Bye");

    store.remove_locale("en");
    assert_eq!(engine.text("farewell", &query), "farewell");
}

#[test]
fn engine_over_borrowed_store() {
    let store = MemoryStore::builder().locale("en").build();
    store.load_locale_str("en", r#"{ "a": "A" }"#).unwrap();

    let engine = Engine::new(&store);
    assert_eq!(engine.text("a", &Query::new()), "A");
}

// =========================================================================
// Existence Checks
// =========================================================================

#[test]
fn key_and_locale_existence() {
    let store = store();
    let engine = Engine::new(store.clone());

    assert!(engine.key_exists("greeting"));
    // only the loaded current locale is consulted
    assert!(!engine.key_exists("farewell"));
    assert!(!engine.key_exists("apples"));

    store.set_locale("fr");
    assert!(engine.key_exists("apples"));
    assert!(!engine.key_exists("files"));

    assert!(engine.locale_exists("de"));
    assert!(!engine.locale_exists("fr"));
}

// =========================================================================
// Diagnostics
// =========================================================================

#[test]
fn diagnostics_reach_configured_sink() {
    let (engine, sink) = engine_with_sink();

    let query = Query::builder().count("many").build();
    assert_eq!(engine.text("greeting", &query), "Grüezi {name}");

    assert_eq!(
        sink.take(),
        vec![
            Diagnostic::MissingPlaceholder {
                placeholder: "{name}".to_string(),
                text: "Grüezi {name}".to_string(),
                suggestions: vec![],
            },
            Diagnostic::NonNumericPluralCount {
                count: "many".to_string()
            },
        ]
    );
}

#[test]
fn engine_is_shared_across_threads() {
    let engine = Arc::new(Engine::new(store()));
    let handles: Vec<_> = ["Ada", "Bo", "Cy"]
        .into_iter()
        .map(|name| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let query = Query::builder()
                    .replacements(params! { "name" => name })
                    .build();
                engine.text_in("en", "greeting", &query)
            })
        })
        .collect();

    let greetings: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(greetings, vec!["Hello Ada", "Hello Bo", "Hello Cy"]);
}
