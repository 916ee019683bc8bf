use masspay::infrastructure::http::Endpoints;
use serde_json::json;
use std::io::Read;
use std::net::SocketAddr;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A local stand-in for the mass pay service.
///
/// Answers incoming requests with the scripted responses in order, recording
/// each request's path and JSON body for later assertion, then shuts down.
pub struct MockService {
    addr: SocketAddr,
    requests: Receiver<(String, serde_json::Value)>,
    handle: JoinHandle<()>,
}

pub fn spawn(responses: Vec<String>) -> MockService {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock service");
    let addr = server.server_addr().to_ip().expect("tcp listen address");
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        for response in responses {
            let mut request = match server.recv() {
                Ok(request) => request,
                Err(_) => return,
            };
            let mut body = String::new();
            request
                .as_reader()
                .read_to_string(&mut body)
                .expect("read request body");
            let parsed = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
            let _ = tx.send((request.url().to_string(), parsed));

            let http_response = tiny_http::Response::from_string(response).with_header(
                tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("header"),
            );
            let _ = request.respond(http_response);
        }
    });

    MockService {
        addr,
        requests: rx,
        handle,
    }
}

impl MockService {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            create_job: format!("http://{}/api/create", self.addr),
            job_status: format!("http://{}/api/status", self.addr),
        }
    }

    /// Next recorded request as (path, body). Panics if none arrives in time.
    pub fn next_request(&self) -> (String, serde_json::Value) {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("request against mock service")
    }

    /// Waits for the server thread to finish its script.
    pub fn join(self) {
        let _ = self.handle.join();
    }
}

pub fn job_json(status: &str) -> serde_json::Value {
    json!({
        "job_id": "4790",
        "user_job_id": "ledger-2031",
        "uid": "812-111-1111",
        "status": status,
        "total": 5.01,
        "fees": 0,
        "rows": 2,
        "source": "balance",
        "email": "admin@domain.com",
        "assumeCosts": "true"
    })
}

pub fn success_response(job: serde_json::Value) -> String {
    json!({"success": true, "job": job}).to_string()
}

pub fn rejection_response(message: &str) -> String {
    json!({"status": false, "message": message}).to_string()
}

/// Endpoints pointing at a port nothing listens on.
pub fn dead_endpoints() -> Endpoints {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Endpoints {
        create_job: format!("http://{addr}/api/create"),
        job_status: format!("http://{addr}/api/status"),
    }
}
