//! Integration tests for NagerClient using wiremock

use postcal::holidays::{HolidayResolver, NagerClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test successful holiday fetch; country code is upper-cased
#[tokio::test]
async fn test_fetch_holidays() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/PublicHolidays/2025/US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "date": "2025-07-04",
                "localName": "Independence Day",
                "name": "Independence Day",
                "countryCode": "US",
                "fixed": false,
                "global": true,
                "counties": null,
                "launchYear": null,
                "types": ["Public"]
            },
            {
                "date": "2025-12-25",
                "localName": "Christmas Day",
                "name": "Christmas Day",
                "countryCode": "US",
                "fixed": false,
                "global": true,
                "counties": null,
                "launchYear": null,
                "types": ["Public"]
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = NagerClient::with_endpoint(mock_server.uri()).unwrap();
    let holidays = client.holidays(2025, "us").await;

    assert_eq!(holidays.len(), 2);
    assert_eq!(holidays[0].name, "Independence Day");
    assert_eq!(holidays[0].date.to_string(), "2025-07-04");
    assert_eq!(holidays[1].name, "Christmas Day");
}

/// Test that server errors degrade to no holidays
#[tokio::test]
async fn test_server_error_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/PublicHolidays/2025/XX"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = NagerClient::with_endpoint(mock_server.uri()).unwrap();
    assert!(client.holidays(2025, "XX").await.is_empty());
}

/// Test that undecodable bodies degrade to no holidays
#[tokio::test]
async fn test_malformed_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/PublicHolidays/2025/US"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = NagerClient::with_endpoint(mock_server.uri()).unwrap();
    assert!(client.holidays(2025, "US").await.is_empty());
}

/// Test country listing
#[tokio::test]
async fn test_available_countries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/AvailableCountries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "countryCode": "US", "name": "United States" },
            { "countryCode": "IN", "name": "India" }
        ])))
        .mount(&mock_server)
        .await;

    let client = NagerClient::with_endpoint(mock_server.uri()).unwrap();
    let countries = client.available_countries().await;

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[1].country_code, "IN");
}
