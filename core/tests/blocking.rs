//! `BlockingClient` over ureq, against the live mock server and a raw TCP
//! responder for byte-level edge cases.

#![cfg(feature = "blocking")]

use std::io::{Read, Write};
use std::net::TcpListener;

use serde_json::json;
use suburb_core::BlockingClient;

const KEY: &str = "integration-key";

/// Answer one request with `200` and the given raw body bytes.
fn serve_raw_once(body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn invalid_utf8_body_is_decode_failure() {
    let client = BlockingClient::new(serve_raw_once(&[0xff, 0xfe]), KEY);

    let err = client.list_queues().unwrap_err();
    assert!(err.is_decode(), "expected decode error, got {err:?}");
    assert!(!err.is_transport());
}

#[test]
fn blocking_queue_lifecycle() {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, KEY).await
        })
        .unwrap();
    });

    let client = BlockingClient::new(format!("http://{addr}"), KEY);

    client.create_queue("orders", "main").unwrap();
    client.push_to_queue("orders", "main", "m1").unwrap();
    assert_eq!(client.get_queue_length("orders", "main").unwrap(), json!({"response": 1}));
    assert_eq!(client.pop_queue("orders", "main").unwrap(), json!({"response": "m1"}));
    assert_eq!(
        client.peek_queue("orders", "main").unwrap(),
        json!({"error": "queue is empty"})
    );
    client.delete_queue("orders", "main").unwrap();

    client.set_flag("features", "beta", &false).unwrap();
    assert_eq!(client.get_flag("features", "beta").unwrap(), json!({"response": false}));
    client.delete_flag("features", "beta").unwrap();
    assert_eq!(client.list_flags().unwrap(), json!({"response": []}));

    client.add_log("orders", "worker", "warn", "slow").unwrap();
    assert_eq!(client.list_logs().unwrap()["response"][0]["level"], "warn");
    assert_eq!(client.list_queues().unwrap(), json!({"response": []}));
}
