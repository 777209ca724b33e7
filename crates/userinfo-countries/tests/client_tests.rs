// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};
use userinfo_countries::{Client, CountryLoadOutcome, spawn_load};

const COUNTRIES_BODY: &str = r#"[
    {"name": {"common": "Uruguay", "official": "Oriental Republic of Uruguay"}},
    {"name": {"common": "Japan", "official": "Japan"}},
    {"name": {"common": "Ghana", "official": "Republic of Ghana"}}
]"#;

fn json_response(body: &str, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

#[test]
fn fetch_countries_reads_common_names_in_upstream_order() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let endpoint = format!("http://{}/v3.1/all?fields=name", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/v3.1/all?fields=name");
        assert_eq!(request.method(), &Method::Get);
        request
            .respond(json_response(COUNTRIES_BODY, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&endpoint, Duration::from_secs(1))?;
    let countries = client.fetch_countries()?;
    let names: Vec<_> = countries.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(names, vec!["Uruguay", "Japan", "Ghana"]);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn fetch_countries_surfaces_server_message() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let endpoint = format!("http://{}/v3.1/all", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(
                r#"{"status":400,"message":"fields query is required"}"#,
                400,
            ))
            .expect("response should succeed");
    });

    let client = Client::new(&endpoint, Duration::from_secs(1))?;
    let error = client
        .fetch_countries()
        .expect_err("400 response should fail");
    assert_eq!(
        error.to_string(),
        "server error (400): fields query is required"
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn fetch_countries_error_names_unreachable_endpoint() {
    let client = Client::new("http://127.0.0.1:1/v3.1/all", Duration::from_millis(200))
        .expect("client should initialize");

    let error = client
        .fetch_countries()
        .expect_err("fetch should fail for unreachable endpoint");
    let message = error.to_string();
    assert!(message.contains("127.0.0.1:1"), "unexpected message: {message}");
}

#[test]
fn spawn_load_delivers_loaded_outcome() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let endpoint = format!("http://{}/all", server.server_addr());

    let server_handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(COUNTRIES_BODY, 200))
            .expect("response should succeed");
    });

    let (tx, rx) = mpsc::channel();
    let client = Client::new(&endpoint, Duration::from_secs(1))?;
    let handle = spawn_load(client, 7, move |outcome| {
        let _ = tx.send(outcome);
    })?;
    assert_eq!(handle.request_id(), 7);

    let outcome = rx.recv_timeout(Duration::from_secs(5))?;
    match outcome {
        CountryLoadOutcome::Loaded {
            request_id,
            countries,
        } => {
            assert_eq!(request_id, 7);
            assert_eq!(countries.len(), 3);
        }
        other => panic!("expected loaded outcome, got {other:?}"),
    }

    handle.join()?;
    server_handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn spawn_load_reports_failure_as_outcome() -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let client = Client::new("http://127.0.0.1:1/all", Duration::from_millis(200))?;
    let handle = spawn_load(client, 2, move |outcome| {
        let _ = tx.send(outcome);
    })?;

    let outcome = rx.recv_timeout(Duration::from_secs(5))?;
    assert!(
        matches!(&outcome, CountryLoadOutcome::Failed { request_id: 2, error } if !error.is_empty()),
        "unexpected outcome: {outcome:?}"
    );

    handle.join()?;
    Ok(())
}

#[test]
fn canceled_load_never_delivers() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let endpoint = format!("http://{}/all", server.server_addr());
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let server_handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        release_rx.recv().expect("release signal expected");
        request
            .respond(json_response(COUNTRIES_BODY, 200))
            .expect("response should succeed");
    });

    let (tx, rx) = mpsc::channel();
    let client = Client::new(&endpoint, Duration::from_secs(5))?;
    let handle = spawn_load(client, 1, move |outcome| {
        let _ = tx.send(outcome);
    })?;

    handle.cancel();
    assert!(handle.is_canceled());
    release_tx.send(())?;

    handle.join()?;
    server_handle.join().expect("server thread should join");
    assert!(rx.try_recv().is_err(), "canceled load must not deliver");
    Ok(())
}
