// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use fieldops_app::{ContractorStage, Dataset, ViewKind};
use fieldops_client::Client;
use serde_json::json;
use std::io::Read;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json").expect("valid content type header")
}

#[test]
fn unreachable_backend_names_the_config_key() {
    let client = Client::new("http://127.0.0.1:1/api", Duration::from_millis(50))
        .expect("client should initialize");

    let error = client
        .fetch_dataset(ViewKind::Orders)
        .expect_err("fetch should fail for unreachable endpoint");
    let message = error.to_string();
    assert!(message.contains("http://127.0.0.1:1/api"));
    assert!(message.contains("[api].base_url"));
}

#[test]
fn fetch_dataset_decodes_camel_case_records() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.url(), "/api/contractors");
        let body = r#"[
            {
                "id": 1,
                "companyName": "Gulf Coast Appliance",
                "contactName": "Rae Kim",
                "region": "Houston",
                "trade": "refrigeration",
                "stage": "onboarding",
                "technicianCount": 6,
                "rating": 4.5,
                "lastContacted": "2026-02-11",
                "notes": "Prefers email"
            },
            {
                "id": 2,
                "companyName": "Lone Star Repair",
                "contactName": "Eli Park",
                "region": "Dallas",
                "trade": "laundry",
                "stage": "lead"
            }
        ]"#;
        let response = Response::from_string(body)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let dataset = client.fetch_dataset(ViewKind::Contractors)?;
    assert_eq!(dataset.kind(), ViewKind::Contractors);
    assert_eq!(dataset.len(), 2);
    match dataset {
        Dataset::Contractors(collection) => {
            let records = collection.records();
            assert_eq!(records[0].stage, ContractorStage::Onboarding);
            assert_eq!(records[1].rating, None);
            assert_eq!(records[1].last_contacted, None);
            assert!(records[1].notes.is_empty());
        }
        other => return Err(anyhow!("unexpected dataset {:?}", other.kind())),
    }

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn server_error_message_is_surfaced() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/parts-orders");
        let response = Response::from_string(r#"{"error":"warehouse sync in progress"}"#)
            .with_status_code(503)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .fetch_dataset(ViewKind::Parts)
        .expect_err("503 should fail");
    assert_eq!(
        error.to_string(),
        "server error (503): warehouse sync in progress"
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn malformed_records_fail_with_collection_context() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string(r#"[{"id": 1, "technicianName": 42}]"#)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .fetch_dataset(ViewKind::Retention)
        .expect_err("wrongly typed record should fail");
    assert!(format!("{error:#}").contains("decode retention response"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn submit_posts_json_body_to_view_collection() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Post);
        assert_eq!(request.url(), "/api/recommendations");
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("request body should be readable");
        let parsed: serde_json::Value =
            serde_json::from_str(&body).expect("request body should be JSON");
        assert_eq!(parsed["technicianName"], "Sam Ortiz");

        let response = Response::from_string(r#"{"id": 88}"#)
            .with_status_code(201)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let created = client.submit(
        ViewKind::Coaching,
        &json!({"technicianName": "Sam Ortiz", "title": "Shadow a senior tech"}),
    )?;
    assert_eq!(created["id"], 88);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn empty_mutation_response_is_null() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/api", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(Response::empty(204))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let response = client.post("contractors", &json!({"companyName": "Bayou Service"}))?;
    assert!(response.is_null());

    handle.join().expect("server thread should join");
    Ok(())
}
