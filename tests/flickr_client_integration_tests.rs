use omada::api::{ApiError, FlickrClient};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn photos_body(ids: &[&str], page: u32, pages: u32) -> serde_json::Value {
    let photo: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id, "owner": "12345@N00", "secret": "abc", "server": "65535",
                "farm": 66, "title": format!("photo {id}"),
                "ispublic": 1, "isfriend": 0, "isfamily": 0
            })
        })
        .collect();
    json!({
        "photos": {
            "page": page, "pages": pages, "perpage": 100,
            "total": pages * 100, "photo": photo
        },
        "stat": "ok"
    })
}

fn client_for(server: &MockServer) -> FlickrClient {
    FlickrClient::new("test-key".to_string(), Some(server.uri()))
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_get_recent_sends_method_and_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "flickr.photos.getRecent"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("format", "json"))
        .and(query_param("nojsoncallback", "1"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photos_body(&["1", "2"], 2, 4)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = assert_ok!(client_for(&mock_server).get_recent(2).await);
    assert_eq!(response.photos.page, 2);
    assert_eq!(response.photos.pages, 4);
    assert_eq!(response.photos.photo.len(), 2);
    assert_eq!(response.photos.photo[0].title, "photo 1");
}

#[tokio::test]
async fn test_search_sends_text_and_per_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photos.search"))
        .and(query_param("text", "red barn"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photos_body(&["9"], 1, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).with_per_page(Some(25));
    let response = assert_ok!(client.get_search("red barn", 1).await);
    assert_eq!(response.photos.photo[0].id, "9");
}

#[tokio::test]
async fn test_get_photo_info() {
    let mock_server = MockServer::start().await;

    let body = json!({
        "photo": {
            "id": "42", "secret": "s3", "server": "7", "farm": 8,
            "owner": {"nsid": "n@N01", "username": "alice", "realname": "Alice"},
            "title": {"_content": "Harbor"},
            "description": {"_content": "Boats at rest"},
            "comments": {"_content": "4"},
            "views": "120",
            "dates": {"posted": "1765143767", "taken": "2025-12-06 13:12:12", "lastupdate": "1765143800"}
        },
        "stat": "ok"
    });

    Mock::given(method("GET"))
        .and(query_param("method", "flickr.photos.getInfo"))
        .and(query_param("photo_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let info = client_for(&mock_server).get_photo_info("42").await.unwrap();
    assert_eq!(info.photo.owner.username, "alice");
    assert_eq!(info.photo.title.content, "Harbor");
    assert_eq!(info.photo.views, "120");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_recent(1).await;
    match result {
        Err(ApiError::Http { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_with_empty_body_uses_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_recent(1).await;
    assert!(matches!(
        result,
        Err(ApiError::Http { status: 404, ref message }) if message == "Not Found"
    ));
}

#[tokio::test]
async fn test_stat_fail_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "fail", "code": 100, "message": "Invalid API Key (Key has invalid format)"
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_search("cats", 1).await;
    match result {
        Err(ApiError::Api { code, message }) => {
            assert_eq!(code, 100);
            assert!(message.contains("Invalid API Key"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("jsonFlickrApi({"))
        .mount(&mock_server)
        .await;

    let error = assert_err!(client_for(&mock_server).get_recent(1).await);
    assert!(matches!(error, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) on a test machine.
    let client = FlickrClient::new("k".to_string(), Some("http://127.0.0.1:9/".to_string()));
    let result = client.get_recent(1).await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}
