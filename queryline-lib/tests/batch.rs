//! Batch paging-loop tests against a loopback server.

mod common;

use common::Reply;
use common::TestServer;

use queryline_lib::error::ApiError;
use queryline_lib::Query;
use queryline_lib::QuerylineClient;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize, PartialEq)]
struct Album {
    name: String,
}

fn names(albums: &[Album]) -> Vec<&str> {
    albums.iter().map(|a| a.name.as_str()).collect()
}

fn client_with_page_size(server: &TestServer, page_size: u64) -> QuerylineClient {
    QuerylineClient::builder()
        .endpoint(server.endpoint())
        .service_id("demo")
        .use_tls(false)
        .page_size(page_size)
        .build()
}

#[tokio::test]
async fn full_pages_then_short_page_accumulate_in_order() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#),
        Reply::ok(r#"{"album_list": [{"name": "d"}, {"name": "e"}]}"#),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    let albums: Vec<Album> = client.fetch_all(Query::new("album")).await.unwrap();

    assert_eq!(names(&albums), ["a", "b", "c", "d", "e"]);
    assert_eq!(
        server.paths(),
        vec![
            "/s:demo/get/main/limit=3;start=0".to_string(),
            "/s:demo/get/main/limit=3;start=3".to_string(),
        ]
    );
}

#[tokio::test]
async fn short_first_page_issues_single_request() {
    let server = TestServer::start(vec![Reply::ok(
        r#"{"album_list": [{"name": "a"}, {"name": "b"}]}"#,
    )])
    .await;
    let client = client_with_page_size(&server, 3);

    let albums: Vec<Album> = client.fetch_all(Query::new("album")).await.unwrap();

    assert_eq!(names(&albums), ["a", "b"]);
    assert_eq!(server.paths().len(), 1);
}

#[tokio::test]
async fn exact_multiple_stops_on_empty_page() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#),
        Reply::ok(r#"{"album_list": []}"#),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    let albums: Vec<Album> = client.fetch_all(Query::new("album")).await.unwrap();

    assert_eq!(names(&albums), ["a", "b", "c"]);
    assert_eq!(server.paths().len(), 2);
}

#[tokio::test]
async fn explicit_limit_is_never_overwritten() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}]}"#),
        Reply::ok(r#"{"album_list": [{"name": "c"}]}"#),
    ])
    .await;
    // Client default of 500 must not replace the query's own limit.
    let client = client_with_page_size(&server, 500);

    let albums: Vec<Album> = client.fetch_all(Query::new("album").limit(2)).await.unwrap();

    assert_eq!(names(&albums), ["a", "b", "c"]);
    assert_eq!(
        server.paths(),
        vec![
            "/s:demo/get/main/limit=2;start=0".to_string(),
            "/s:demo/get/main/limit=2;start=2".to_string(),
        ]
    );
}

#[tokio::test]
async fn explicit_start_offsets_the_whole_batch() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "k"}, {"name": "l"}, {"name": "m"}]}"#),
        Reply::ok(r#"{"album_list": [{"name": "n"}]}"#),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    let albums: Vec<Album> = client
        .fetch_all(Query::new("album").start(10))
        .await
        .unwrap();

    assert_eq!(names(&albums), ["k", "l", "m", "n"]);
    assert_eq!(
        server.paths(),
        vec![
            "/s:demo/get/main/limit=3;start=10".to_string(),
            "/s:demo/get/main/limit=3;start=13".to_string(),
        ]
    );
}

#[tokio::test]
async fn shrunken_server_page_still_advances_by_observed_count() {
    // The second page comes back one record short of the limit even
    // though more data exists; the loop must treat it as the end without
    // double-reading anything on a rerun.
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#),
        Reply::ok(r#"{"album_list": [{"name": "d"}, {"name": "e"}, {"name": "f"}]}"#),
        Reply::ok(r#"{"album_list": [{"name": "g"}]}"#),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    let albums: Vec<Album> = client.fetch_all(Query::new("album")).await.unwrap();

    assert_eq!(names(&albums), ["a", "b", "c", "d", "e", "f", "g"]);
    assert_eq!(
        server.paths(),
        vec![
            "/s:demo/get/main/limit=3;start=0".to_string(),
            "/s:demo/get/main/limit=3;start=3".to_string(),
            "/s:demo/get/main/limit=3;start=6".to_string(),
        ]
    );
}

#[tokio::test]
async fn failure_on_later_page_discards_accumulated_records() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#),
        Reply::ok(r#"{"error": "service_unavailable"}"#),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    let result = client.fetch_all::<Album>(Query::new("album")).await;

    assert!(matches!(result, Err(ApiError::ServiceUnavailable)));
    assert_eq!(server.paths().len(), 2);
}

#[tokio::test]
async fn connection_failure_on_later_page_aborts_the_batch() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#),
        Reply::status(502, "bad gateway"),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    match client.fetch_all::<Album>(Query::new("album")).await {
        Err(e) => assert_eq!(e.status_code(), Some(502)),
        Ok(albums) => panic!("expected failure, got {} records", albums.len()),
    }
}

#[tokio::test]
async fn pages_iterator_yields_offsets_and_short_flag() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#),
        Reply::ok(r#"{"album_list": [{"name": "d"}]}"#),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    let mut pages = client.pages(Query::new("album"));

    let first = pages.next().await.unwrap().unwrap();
    assert_eq!(first.start(), 0);
    assert_eq!(first.len(), 3);
    assert!(!first.is_short());

    let second = pages.next().await.unwrap().unwrap();
    assert_eq!(second.start(), 3);
    assert_eq!(second.len(), 1);
    assert!(second.is_short());

    assert!(pages.next().await.is_none());
}

#[tokio::test]
async fn cancelled_token_stops_batch_before_any_request() {
    let server = TestServer::start(vec![]).await;
    let client = client_with_page_size(&server, 3);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client
        .fetch_all_with_cancel::<Album>(Query::new("album"), &cancel)
        .await;

    assert!(matches!(result, Err(ApiError::Cancelled)));
    assert!(server.paths().is_empty());
}

#[tokio::test]
async fn uncancelled_token_leaves_batch_untouched() {
    let server = TestServer::start(vec![
        Reply::ok(r#"{"album_list": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#),
        Reply::ok(r#"{"album_list": []}"#),
    ])
    .await;
    let client = client_with_page_size(&server, 3);

    let cancel = CancellationToken::new();
    let albums: Vec<Album> = client
        .fetch_all_with_cancel(Query::new("album"), &cancel)
        .await
        .unwrap();

    assert_eq!(names(&albums), ["a", "b", "c"]);
}
