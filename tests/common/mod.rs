//! Shared fixtures for the lookup flow tests: a mock country API and a
//! controller wired to scripted I/O.

#![allow(dead_code)]

use countryline::config::AppConfig;
use countryline::repl::io::{MockEventStream, MockRenderStream};
use countryline::AppController;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub type TestController = AppController<MockEventStream, MockRenderStream>;

/// Log to the test writer when `COUNTRYLINE_LOG` is set
pub fn init_tracing() {
    if let Ok(filter) = tracing_subscriber::EnvFilter::try_from_env("COUNTRYLINE_LOG") {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

/// Bulk-endpoint record
pub fn country(name: &str, population: u64, region: &str, capital: Option<&str>) -> Value {
    json!({
        "name": {"common": name, "official": format!("Official {name}")},
        "population": population,
        "region": region,
        "capital": capital.map(|c| vec![c]).unwrap_or_default(),
    })
}

/// `count` records named "Land 0", "Land 1", ...
pub fn numbered_countries(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| country(&format!("Land {i}"), 1000 * i as u64, "Oceania", None))
            .collect(),
    )
}

pub fn germany_detail() -> Value {
    json!([{
        "name": {"common": "Germany", "official": "Federal Republic of Germany"},
        "capital": ["Berlin"],
        "continents": ["Europe"],
        "population": 83240525,
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "languages": {"deu": "German"},
        "flags": {"svg": "https://flagcdn.com/de.svg", "png": "https://flagcdn.com/w320/de.png"}
    }])
}

pub fn france_detail() -> Value {
    json!([{
        "name": {"common": "France", "official": "French Republic"},
        "capital": ["Paris"],
        "continents": ["Europe"],
        "population": 67391582,
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "languages": {"fra": "French"},
        "flags": {"svg": "https://flagcdn.com/fr.svg"}
    }])
}

pub async fn mount_dataset(server: &MockServer, records: Value) {
    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, name: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/name/{name}")))
        .and(query_param("fullText", "true"))
        .respond_with(template)
        .mount(server)
        .await;
}

pub fn controller_for(server: &MockServer) -> (TestController, MockRenderStream) {
    let config = AppConfig {
        base_url: server.uri(),
        user_agent: Some("countryline-tests".to_string()),
    };
    let screen = MockRenderStream::new();
    let controller =
        AppController::with_io_streams(&config, MockEventStream::empty(), screen.clone())
            .expect("controller should build");
    (controller, screen)
}

/// Controller over `records` with the dataset already loaded
pub async fn loaded_controller(
    server: &MockServer,
    records: Value,
) -> (TestController, MockRenderStream) {
    mount_dataset(server, records).await;
    let (mut controller, screen) = controller_for(server);
    controller.load_dataset().await.expect("load should not error");
    (controller, screen)
}

pub fn press(controller: &mut TestController, code: KeyCode, modifiers: KeyModifiers) {
    controller
        .process_key_event(KeyEvent::new(code, modifiers))
        .expect("key should be processed");
}

pub fn type_text(controller: &mut TestController, text: &str) {
    for ch in text.chars() {
        press(controller, KeyCode::Char(ch), KeyModifiers::NONE);
    }
}

pub fn suggestion_texts(controller: &TestController) -> Vec<String> {
    controller
        .session()
        .suggestions()
        .iter()
        .map(|s| s.text().to_string())
        .collect()
}
