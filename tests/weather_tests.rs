//! Relay endpoint integration tests against a mock weather provider.

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};
use weather_relay::{AppMetrics, MetricsConfig, RelayConfig, WeatherRelay, create_app};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn relay_for(base_url: &str) -> WeatherRelay {
    let config = RelayConfig::new(API_KEY, base_url).unwrap();
    WeatherRelay::new(&config, None).unwrap()
}

fn london_observation() -> Value {
    json!({
        "coord": {"lon": -0.12, "lat": 51.5},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "base": "stations",
        "main": {"temp": 12.4, "feels_like": 11.8, "humidity": 76},
        "visibility": 10000,
        "wind": {"speed": 4.6, "deg": 230},
        "dt": 1_700_000_000,
        "sys": {"country": "GB"},
        "timezone": 0,
        "id": 2643743,
        "name": "London",
        "cod": 200
    })
}

fn forecast_payload(entries: i64) -> Value {
    let list: Vec<Value> = (0..entries)
        .map(|i| {
            json!({
                "dt": 1_700_000_000 + i * 10_800,
                "main": {"temp": 10.0 + i as f64 * 0.1},
                "weather": [{"main": "Rain", "description": "light rain"}],
                "dt_txt": format!("entry {i}")
            })
        })
        .collect();

    json!({
        "cod": "200",
        "cnt": entries,
        "list": list,
        "city": {"name": "London", "country": "GB", "timezone": 0}
    })
}

/// Mock that fails the test on drop if the provider is called at all
async fn forbid_upstream_calls(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

macro_rules! relay_app {
    ($server:expr) => {
        test::init_service(create_app(
            relay_for(&$server.uri()),
            AppMetrics::new().unwrap(),
            MetricsConfig::default(),
        ))
        .await
    };
}

#[actix_web::test]
async fn test_weather_by_city_passes_payload_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_observation()))
        .expect(1)
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/weather?city=London")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, london_observation());
    assert!(!body["name"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn test_weather_by_city_encodes_city_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "São Paulo"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/weather?city=S%C3%A3o%20Paulo")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_weather_missing_city() {
    let server = MockServer::start().await;
    forbid_upstream_calls(&server).await;

    let app = relay_app!(server);
    for uri in ["/weather", "/weather?city=", "/weather?city=%20%20"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri = {uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "bad_request");
    }
}

#[actix_web::test]
async fn test_malformed_query_string_gets_json_error() {
    let server = MockServer::start().await;
    forbid_upstream_calls(&server).await;

    let app = relay_app!(server);
    for uri in [
        "/weather?city=a&city=b",
        "/forecast/city?city=a&city=b",
        "/weather/geo?lat=1&lat=2&lon=3",
        "/forecast?lat=1&lon=2&lon=3",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri = {uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "bad_request", "uri = {uri}");
        assert!(body["message"].as_str().unwrap().contains("duplicate field"));
    }
}

#[actix_web::test]
async fn test_weather_city_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/weather?city=Nowhereville")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("Nowhereville"));
}

#[actix_web::test]
async fn test_weather_bad_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"cod": 401, "message": "Invalid API key test-key"}),
        ))
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/weather?city=London")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("unauthorized"));
    assert!(!body_str.contains(API_KEY), "credential leaked: {body_str}");
}

#[actix_web::test]
async fn test_weather_other_upstream_failures_are_500() {
    for status in [400u16, 429, 500, 503] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("appid=test-key"))
            .expect(1)
            .mount(&server)
            .await;

        let app = relay_app!(server);
        let req = test::TestRequest::get()
            .uri("/weather?city=London")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(
            resp.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream status {status}"
        );
        let body = test::read_body(resp).await;
        let body_str = std::str::from_utf8(&body).unwrap();
        assert!(body_str.contains("upstream_error"));
        assert!(!body_str.contains(API_KEY));
    }
}

#[actix_web::test]
async fn test_weather_undecodable_payload_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/weather?city=London")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_weather_unreachable_provider_is_500() {
    // Nothing listens on the discard port
    let app = test::init_service(create_app(
        relay_for("http://127.0.0.1:9"),
        AppMetrics::new().unwrap(),
        MetricsConfig::default(),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/weather?city=London")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_weather_by_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_observation()))
        .expect(1)
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/weather/geo?lat=51.5&lon=-0.12")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "London");
}

#[actix_web::test]
async fn test_invalid_coordinates_never_reach_upstream() {
    let server = MockServer::start().await;
    forbid_upstream_calls(&server).await;

    let app = relay_app!(server);
    let uris = [
        "/weather/geo",
        "/weather/geo?lat=34.05",
        "/weather/geo?lon=-118.25",
        "/weather/geo?lat=100&lon=0",
        "/weather/geo?lat=-90.5&lon=0",
        "/weather/geo?lat=0&lon=200",
        "/weather/geo?lat=0&lon=-180.01",
        "/weather/geo?lat=abc&lon=0",
        "/forecast?lat=91&lon=0",
        "/forecast?lat=0&lon=east",
        "/forecast?lat=10",
    ];

    for uri in uris {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri = {uri}");
    }
}

#[actix_web::test]
async fn test_boundary_coordinates_are_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Edge"})))
        .expect(2)
        .mount(&server)
        .await;

    let app = relay_app!(server);
    for uri in ["/weather/geo?lat=90&lon=180", "/weather/geo?lat=-90&lon=-180"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "uri = {uri}");
    }
}

#[actix_web::test]
async fn test_forecast_adds_daily_and_hourly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(40)))
        .expect(1)
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/forecast?lat=51.5&lon=-0.12")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let upstream = forecast_payload(40);

    assert_eq!(body["list"], upstream["list"]);
    assert_eq!(body["city"], upstream["city"]);
    assert_eq!(body["cnt"], 40);

    let daily = body["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 5);
    for (i, entry) in daily.iter().enumerate() {
        assert_eq!(entry, &upstream["list"][i * 8]);
    }

    let hourly = body["hourly"].as_array().unwrap();
    assert_eq!(hourly.len(), 24);
    assert_eq!(hourly[23], upstream["list"][23]);
}

#[actix_web::test]
async fn test_forecast_daily_rounds_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(17)))
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/forecast?lat=1&lon=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["daily"].as_array().unwrap().len(), 3);
    assert_eq!(body["hourly"].as_array().unwrap().len(), 17);
}

#[actix_web::test]
async fn test_forecast_by_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(9)))
        .expect(1)
        .mount(&server)
        .await;

    let app = relay_app!(server);
    let req = test::TestRequest::get()
        .uri("/forecast/city?city=London")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["daily"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_forecast_by_city_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Nowhereville"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let app = relay_app!(server);

    let req = test::TestRequest::get()
        .uri("/forecast/city?city=Nowhereville")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/forecast/city").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
