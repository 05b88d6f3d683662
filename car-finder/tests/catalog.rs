use std::{
    io::{BufRead, BufReader, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

use car_finder::{catalog::CatalogClient, FetchError};
use shared::filters::{FilterKey, Filters};

/// Serves a single canned HTTP response and hands back the request line it received.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }

        reader.get_mut().write_all(response.as_bytes()).unwrap();
        request_line.trim_end().to_string()
    });

    (base, handle)
}

#[tokio::test]
async fn fetches_cars_with_filters_in_query() {
    let body = r#"[
        {"id":1,"brand":"Toyota","model":"Supra","price":30000,"fuel":"Petrol","seats":2,"image":"http://img.test/1.png"},
        {"id":2,"brand":"Toyota","model":"Yaris","price":10000,"fuel":"Petrol","seats":5,"image":"http://img.test/2.png"}
    ]"#;
    let (base, server) = serve_once("200 OK", body);
    let client = CatalogClient::new(&base).unwrap();

    let mut filters = Filters::default();
    filters.set(FilterKey::Brand, "Toyota");
    let cars = client.fetch_cars(&filters).await.unwrap();

    let ids: Vec<u64> = cars.iter().map(|car| car.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(
        server.join().unwrap(),
        "GET /api/cars?brand=Toyota&price=any&fuel=any&seats=any&search=&sort=none HTTP/1.1"
    );
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let (base, server) = serve_once("503 Service Unavailable", "[]");
    let client = CatalogClient::new(&base).unwrap();

    let result = client.fetch_cars(&Filters::default()).await;

    assert_eq!(result, Err(FetchError::Status(503)));
    server.join().unwrap();
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let (base, server) = serve_once("200 OK", r#"{"cars":[]}"#);
    let client = CatalogClient::new(&base).unwrap();

    let result = client.fetch_cars(&Filters::default()).await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
    server.join().unwrap();
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let client = CatalogClient::new(&base).unwrap();

    let result = client.fetch_cars(&Filters::default()).await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn downloads_image_bytes() {
    let (base, server) = serve_once("200 OK", "PNG");
    let client = CatalogClient::new(&base).unwrap();

    let bytes = client
        .fetch_image(&format!("{base}/images/1.png"))
        .await
        .unwrap();

    assert_eq!(bytes, b"PNG");
    assert_eq!(server.join().unwrap(), "GET /images/1.png HTTP/1.1");
}
