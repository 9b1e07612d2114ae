use crate::helpers::{
    hawaii_stations, measurement, year_of_measurements, TestApp, TestDatabase, MOST_ACTIVE,
};
use axum::http::StatusCode;
use climate::{app, build_app_state};
use serde_json::json;
use std::collections::BTreeSet;

async fn serve(db: &TestDatabase) -> TestApp {
    let app_state = build_app_state("http://127.0.0.1:9900".to_string(), db.path_str(), 2)
        .await
        .expect("Failed to build app state");

    TestApp {
        app: app(app_state),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[tokio::test]
async fn startup_rejects_missing_dataset() {
    let result = build_app_state(
        "http://127.0.0.1:9900".to_string(),
        "/nonexistent/Resources/hawaii.sqlite".to_string(),
        2,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn precipitation_keys_are_the_dates_in_the_last_year() {
    let mut rows = year_of_measurements();
    // Older than the window, must not show up
    rows.push(measurement(MOST_ACTIVE, "2016-08-22", Some(4.2), 70.0));
    let db = TestDatabase::new(&rows, &hawaii_stations()).await;
    let test_app = serve(&db).await;

    let (status, json) = test_app.get_json("/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);

    let keys: BTreeSet<String> = json.as_object().unwrap().keys().cloned().collect();
    let expected: BTreeSet<String> = rows
        .iter()
        .map(|(_, date, _, _)| date.clone())
        .filter(|date| date.as_str() >= "2016-08-23")
        .collect();

    assert_eq!(keys.len(), 366);
    assert_eq!(keys, expected);
    assert!(!keys.contains("2016-08-22"));
}

#[tokio::test]
async fn precipitation_is_idempotent() {
    let db = TestDatabase::new(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = serve(&db).await;

    let (first_status, first) = test_app.get("/api/v1.0/precipitation").await;
    let (second_status, second) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn stations_match_the_station_table() {
    let stations = hawaii_stations();
    let db = TestDatabase::new(&year_of_measurements(), &stations).await;
    let test_app = serve(&db).await;

    let (status, json) = test_app.get_json("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);

    let returned = json.as_array().unwrap();
    assert_eq!(returned.len(), stations.len());
    for (row, expected) in returned.iter().zip(&stations) {
        assert_eq!(row["id"], expected.id);
        assert_eq!(row["station"], expected.station.as_str());
        assert_eq!(row["name"], expected.name.as_str());
        assert_eq!(row["latitude"], json!(expected.latitude));
        assert_eq!(row["longitude"], json!(expected.longitude));
        assert_eq!(row["elevation"], json!(expected.elevation));
    }
}

#[tokio::test]
async fn tobs_only_reports_the_most_active_station() {
    let rows = year_of_measurements();
    let db = TestDatabase::new(&rows, &hawaii_stations()).await;
    let test_app = serve(&db).await;

    let (status, json) = test_app.get_json("/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);

    let temps = json.as_object().unwrap();
    let most_active: Vec<_> = rows.iter().filter(|(s, ..)| *s == MOST_ACTIVE).collect();
    assert_eq!(temps.len(), most_active.len());
    for (_, date, _, tobs) in most_active {
        assert_eq!(temps[date.as_str()], json!(tobs), "{date}");
    }
}

#[tokio::test]
async fn five_day_range_aggregates_only_that_window() {
    let rows = year_of_measurements();
    let db = TestDatabase::new(&rows, &hawaii_stations()).await;
    let test_app = serve(&db).await;

    let (status, json) = test_app
        .get_json("/api/v1.0/2017-01-01/2017-01-05")
        .await;
    assert_eq!(status, StatusCode::OK);

    let window: Vec<f64> = rows
        .iter()
        .filter(|(_, date, _, _)| date.as_str() >= "2017-01-01" && date.as_str() <= "2017-01-05")
        .filter_map(|(_, _, _, tobs)| *tobs)
        .collect();
    let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = window.iter().sum::<f64>() / window.len() as f64;

    assert_eq!(
        json,
        json!({
            "minimum temperature": round2(min),
            "average temperature": round2(avg),
            "maximum temperature": round2(max),
            "date_from": "2017-01-01",
            "date_to": "2017-01-05"
        })
    );
}

#[tokio::test]
async fn open_ended_range_is_clamped_to_latest_date() {
    let db = TestDatabase::new(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = serve(&db).await;

    let (status, json) = test_app.get_json("/api/v1.0/2015-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["date_from"], "2016-08-23");
    assert_eq!(json["date_to"], "2017-08-23");
}

#[tokio::test]
async fn ranges_outside_the_dataset_have_no_data() {
    let db = TestDatabase::new(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = serve(&db).await;

    for uri in [
        "/api/v1.0/2017-08-24",
        "/api/v1.0/2017-09-01/2018-01-01",
        "/api/v1.0/2015-01-01/2016-08-22",
    ] {
        let (status, json) = test_app.get_json(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json, json!({"error": "no data"}), "{uri}");
    }
}

#[tokio::test]
async fn malformed_date_is_a_client_error() {
    let db = TestDatabase::new(&year_of_measurements(), &hawaii_stations()).await;
    let test_app = serve(&db).await;

    let (status, json) = test_app.get_json("/api/v1.0/not-a-date").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({"error": "invalid date format, expected YYYY-MM-DD: not-a-date"})
    );
}

#[tokio::test]
async fn empty_dataset_returns_not_found() {
    let db = TestDatabase::new(&[], &hawaii_stations()).await;
    let test_app = serve(&db).await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/tobs",
        "/api/v1.0/2017-01-01",
        "/api/v1.0/2017-01-01/2017-01-05",
    ] {
        let (status, json) = test_app.get_json(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json, json!({"error": "dataset is empty"}), "{uri}");
    }

    let (status, json) = test_app.get_json("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}
