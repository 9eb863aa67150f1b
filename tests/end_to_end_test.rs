use anyhow::Result;
use geochron::adapters::selector::IndexSelector;
use geochron::core::ConfigProvider;
use geochron::utils::validation::Validate;
use geochron::{
    GeoChronEngine, GeoChronError, HttpPipeline, LookupRequest, Target, TomlConfig, ViewState,
};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_for(postal: &MockServer, geocoder: &MockServer, provider: &str) -> TomlConfig {
    let toml_content = format!(
        r#"
[services]
postal_endpoint = "{}"
geocoder = "{}"
geocoder_endpoint = "{}"
user_agent = "geochron-tests/1.0"
timeout_seconds = 5

[geocoding]
throttle_ms = 500

[display]
zoom = 9
"#,
        postal.base_url(),
        provider,
        geocoder.base_url()
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    config.validate().unwrap();
    config
}

fn mock_new_delhi_postal(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/pincode/110001");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{
                "Status": "Success",
                "PostOffice": [
                    {"Name": "Baroda House", "District": "New Delhi", "State": "Delhi"},
                    {"Name": "Connaught Place", "District": "New Delhi", "State": "Delhi"}
                ]
            }]));
    })
}

#[tokio::test]
async fn test_pincode_to_solar_time() -> Result<()> {
    let postal = MockServer::start();
    let geocoder = MockServer::start();

    let postal_mock = mock_new_delhi_postal(&postal);
    // 第一層查無資料，第二層命中
    let tier1 = geocoder.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "Connaught Place, New Delhi, Delhi, India");
        then.status(200).json_body(serde_json::json!([]));
    });
    let tier2 = geocoder.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "New Delhi, Delhi, India");
        then.status(200).json_body(serde_json::json!([
            {"lat": "28.6139", "lon": "77.2090", "display_name": "New Delhi, Delhi, India"}
        ]));
    });

    let config = config_for(&postal, &geocoder, "nominatim");
    let pipeline = HttpPipeline::from_config(&config)?;
    let mut engine = GeoChronEngine::new(pipeline, ViewState::new()).with_zoom(config.zoom());

    let request = LookupRequest::new(
        "2024-06-15",
        "12:00:00",
        Target::Pincode("110001".to_string()),
    )?;
    let report = engine.run(&request, &IndexSelector::new(2)).await?;

    postal_mock.assert();
    tier1.assert();
    tier2.assert();

    assert_eq!(report.utc.to_rfc3339(), "2024-06-15T06:30:00+00:00");
    assert_eq!(report.solar_time, "11:38:50");
    assert_eq!(report.tier, 2);
    assert_eq!(report.label, "Connaught Place");
    assert_eq!(report.coordinate.display(4), "28.6139, 77.2090");

    let marker = engine.view().marker().expect("marker placed");
    assert_eq!(marker.label, "Connaught Place");
    assert_eq!(engine.view().zoom(), 9);
    assert_eq!(engine.view().center(), (28.6139, 77.2090));

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["solar_time"], "11:38:50");
    assert_eq!(json["area"]["office_name"], "Connaught Place");
    Ok(())
}

#[tokio::test]
async fn test_place_lookup_with_photon() -> Result<()> {
    let postal = MockServer::start();
    let geocoder = MockServer::start();

    let postal_mock = postal.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });
    let photon = geocoder.mock(|when, then| {
        when.method(GET)
            .path("/api/")
            .query_param("q", "Connaught Place, New Delhi, Delhi");
        then.status(200).json_body(serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "geometry": {"type": "Point", "coordinates": [-180.0, 0.0]},
                "properties": {"name": "Antimeridian"}
            }]
        }));
    });

    let config = config_for(&postal, &geocoder, "photon");
    let mut engine = GeoChronEngine::new(HttpPipeline::from_config(&config)?, ViewState::new());

    // 05:30 IST == 00:00 UTC; 經度 -180 -> 12:00:00
    let request = LookupRequest::new(
        "2024-06-15",
        "05:30:00",
        Target::Place("Connaught Place, New Delhi, Delhi".to_string()),
    )?;
    let report = engine.run(&request, &IndexSelector::new(1)).await?;

    photon.assert();
    postal_mock.assert_hits(0);
    assert_eq!(report.solar_time, "12:00:00");
    assert_eq!(report.label, "Antimeridian");
    assert!(report.area.is_none());
    Ok(())
}

#[tokio::test]
async fn test_failed_run_leaves_engine_usable() -> Result<()> {
    let postal = MockServer::start();
    let geocoder = MockServer::start();

    let missing = postal.mock(|when, then| {
        when.method(GET).path("/pincode/999999");
        then.status(200).json_body(serde_json::json!([
            {"Status": "Error", "PostOffice": null}
        ]));
    });
    let postal_mock = mock_new_delhi_postal(&postal);
    let search = geocoder.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .json_body(serde_json::json!([{"lat": "28.6139", "lon": "77.2090"}]));
    });

    let config = config_for(&postal, &geocoder, "nominatim");
    let mut engine = GeoChronEngine::new(HttpPipeline::from_config(&config)?, ViewState::new());
    let selector = IndexSelector::new(1);

    let bad = LookupRequest::new("2024-06-15", "12:00", Target::Pincode("999999".into()))?;
    let err = engine.run(&bad, &selector).await.unwrap_err();
    assert!(matches!(err, GeoChronError::NotFoundError { .. }));
    assert!(engine.view().marker().is_none());
    missing.assert();
    search.assert_hits(0);

    let good = LookupRequest::new("2024-06-15", "12:00", Target::Pincode("110001".into()))?;
    let report = engine.run(&good, &selector).await?;
    assert_eq!(report.label, "Baroda House");
    postal_mock.assert();
    search.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_malformed_pincode_never_hits_network() -> Result<()> {
    let postal = MockServer::start();
    let geocoder = MockServer::start();
    let any_postal = postal.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(serde_json::json!([]));
    });

    let config = config_for(&postal, &geocoder, "nominatim");
    let mut engine = GeoChronEngine::new(HttpPipeline::from_config(&config)?, ViewState::new());

    let request = LookupRequest::new("2024-06-15", "12:00", Target::Pincode("11001".into()))?;
    let err = engine
        .run(&request, &IndexSelector::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, GeoChronError::ValidationError { .. }));
    any_postal.assert_hits(0);
    Ok(())
}

#[test]
fn test_config_file_drives_pipeline() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[services]\ngeocoder = \"photon\"\n[time]\noffset_hours = 0\noffset_minutes = 0\n")
        .unwrap();

    let config = TomlConfig::from_file(temp_file.path()).unwrap();
    assert!(config.validate().is_ok());

    let pipeline = HttpPipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.offset().hours, 0);
}
