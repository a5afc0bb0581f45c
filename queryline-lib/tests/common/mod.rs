//! Loopback HTTP server serving scripted replies for client tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use queryline_lib::QuerylineClient;

/// One scripted reply.
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    /// A 200 reply with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// A reply with an explicit status code.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Serves scripted replies in order and records every request path.
pub struct TestServer {
    addr: SocketAddr,
    paths: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("failed to bind test server");
        let addr = listener.local_addr().expect("failed to get local address");

        let paths: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let replies = Arc::new(Mutex::new(VecDeque::from(replies)));

        let recorded = paths.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);

                let recorded = recorded.clone();
                let replies = replies.clone();
                let service = service_fn(move |req: Request<Incoming>| {
                    let recorded = recorded.clone();
                    let replies = replies.clone();
                    async move {
                        recorded.lock().unwrap().push(req.uri().path().to_string());

                        let reply = replies.lock().unwrap().pop_front().unwrap_or(Reply {
                            status: 500,
                            body: "script exhausted".to_string(),
                        });

                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(StatusCode::from_u16(reply.status).unwrap())
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(reply.body)))
                                .unwrap(),
                        )
                    }
                });

                let _ = http1::Builder::new().serve_connection(io, service).await;
            }
        });

        Self { addr, paths }
    }

    /// Endpoint string for the client builder, `127.0.0.1:<port>`.
    pub fn endpoint(&self) -> String {
        format!("127.0.0.1:{}", self.addr.port())
    }

    /// A client wired to this server over plain HTTP.
    pub fn client(&self) -> QuerylineClient {
        QuerylineClient::builder()
            .endpoint(self.endpoint())
            .service_id("demo")
            .use_tls(false)
            .build()
    }

    /// The request paths seen so far, in order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}
