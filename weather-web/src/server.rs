//! HTTP routes: `/`, `/forecast/{city}` and `/health`.
//!
//! Handlers only dispatch: read the city, call the provider, hand the outcome
//! to the renderer. Upstream failures end up on the page as a message; every
//! route answers `200 OK`.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};
use chrono::Local;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;
use weather_core::WeatherProvider;

use crate::render;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// Form posted by the index page.
#[derive(Debug, Deserialize)]
pub struct CityForm {
    #[serde(default)]
    pub city: String,
}

pub fn router(provider: Arc<dyn WeatherProvider>) -> Router {
    Router::new()
        .route("/", get(index).post(lookup_current))
        .route("/forecast/{city}", get(forecast))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { provider })
}

pub async fn run(address: SocketAddr, provider: Arc<dyn WeatherProvider>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "listening");
    axum::serve(listener, router(provider))
        .await
        .context("HTTP server terminated")
}

/// GET / — empty form.
async fn index() -> Html<String> {
    Html(render::index_page(None, None))
}

/// POST / — current weather for the submitted city.
async fn lookup_current(State(state): State<AppState>, Form(form): Form<CityForm>) -> Html<String> {
    let page = match state.provider.current(&form.city).await {
        Ok(weather) => render::index_page(Some(&weather), None),
        Err(err) => render::index_page(None, Some(&err.to_string())),
    };
    Html(page)
}

/// GET /forecast/{city} — five-day forecast.
async fn forecast(State(state): State<AppState>, Path(city): Path<String>) -> Html<String> {
    let page = match state.provider.forecast(&city).await {
        Ok(forecast) => render::forecast_page(Ok(&forecast), Local::now()),
        Err(err) => render::forecast_page(Err(&err.to_string()), Local::now()),
    };
    Html(page)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;
    use weather_core::{
        CitySummary, FetchError, Forecast, WeatherRecord,
        error::{CURRENT_UNAVAILABLE, FORECAST_UNAVAILABLE},
        time::epoch_to_local,
    };

    /// Answers "London" and fails everything else; remembers requested cities.
    #[derive(Debug, Default)]
    struct FakeProvider {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
            self.seen.lock().unwrap().push(city.to_string());
            if city != "London" {
                return Err(FetchError::Unavailable {
                    message: CURRENT_UNAVAILABLE,
                    status: StatusCode::NOT_FOUND,
                });
            }
            Ok(WeatherRecord {
                city: "London".into(),
                temperature: 15.0,
                description: "light rain".into(),
                humidity: 80,
                wind: 3.2,
                lat: 51.5,
                lon: -0.1,
                icon: Some("10d".into()),
            })
        }

        async fn forecast(&self, city: &str) -> Result<Forecast, FetchError> {
            self.seen.lock().unwrap().push(city.to_string());
            if city == "Timeout" {
                return Err(FetchError::Malformed("operation timed out".into()));
            }
            if city != "London" {
                return Err(FetchError::Unavailable {
                    message: FORECAST_UNAVAILABLE,
                    status: StatusCode::NOT_FOUND,
                });
            }
            Ok(Forecast {
                city: CitySummary {
                    name: "London".into(),
                    country: "GB".into(),
                    sunrise: epoch_to_local(1_709_966_400).unwrap(),
                    sunset: epoch_to_local(1_710_007_800).unwrap(),
                },
                points: vec![],
            })
        }
    }

    async fn send(provider: Arc<FakeProvider>, request: Request<Body>) -> (StatusCode, String) {
        let response = router(provider).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_city(body: &'static str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn index_renders_empty_form() {
        let provider = Arc::new(FakeProvider::default());
        let (status, body) = send(provider.clone(), Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"name="city""#));
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_renders_current_weather() {
        let provider = Arc::new(FakeProvider::default());
        let (status, body) = send(provider.clone(), post_city("city=London")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("light rain"));
        assert!(body.contains("15.0"));
        assert!(body.contains("/forecast/London"));
        assert!(body.contains("10d@2x.png"));
        assert_eq!(*provider.seen.lock().unwrap(), vec!["London".to_string()]);
    }

    #[tokio::test]
    async fn post_unknown_city_renders_error() {
        let provider = Arc::new(FakeProvider::default());
        let (status, body) = send(provider, post_city("city=Nonexistent123")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("City not found or API error"));
    }

    #[tokio::test]
    async fn post_without_city_field_passes_empty_name() {
        let provider = Arc::new(FakeProvider::default());
        let (status, _) = send(provider.clone(), post_city("")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(*provider.seen.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn forecast_route_decodes_path_segment() {
        let provider = Arc::new(FakeProvider::default());
        let (status, body) = send(
            provider.clone(),
            Request::get("/forecast/New%20York").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Forecast data not available"));
        assert_eq!(*provider.seen.lock().unwrap(), vec!["New York".to_string()]);
    }

    #[tokio::test]
    async fn forecast_route_renders_city_summary() {
        let provider = Arc::new(FakeProvider::default());
        let (status, body) =
            send(provider, Request::get("/forecast/London").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("London, GB"));
    }

    #[tokio::test]
    async fn forecast_failure_text_reaches_the_page() {
        let provider = Arc::new(FakeProvider::default());
        let (status, body) =
            send(provider, Request::get("/forecast/Timeout").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("operation timed out"));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let provider = Arc::new(FakeProvider::default());
        let (status, body) = send(provider, Request::get("/health").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
