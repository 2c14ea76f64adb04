//! Shared helpers: a wiremock server driven from a runtime the test owns,
//! so the blocking client under test never runs inside async context.

#![allow(dead_code)]

use openstates::{Client, ClientConfig, default_user_agent};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub struct TestServer {
    // dropped before the runtime
    server: MockServer,
    rt: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn client(&self) -> Client {
        self.client_with_key(Some("test-key"))
    }

    pub fn client_with_key(&self, key: Option<&str>) -> Client {
        Client::with_config(ClientConfig {
            root: self.uri(),
            api_key: key.map(str::to_string),
            user_agent: default_user_agent(),
        })
        .expect("client")
        .with_page_delay(Duration::ZERO)
    }
}

pub trait MountOn {
    fn mount_on(self, server: &TestServer);
}

impl MountOn for Mock {
    fn mount_on(self, server: &TestServer) {
        server.mount(self);
    }
}

pub fn bill(n: u32) -> Value {
    json!({
        "id": format!("ocd-bill/{:08}", n),
        "identifier": format!("HB {}", n),
        "title": format!("An act numbered {}", n),
        "created_at": "2021-01-11T17:32:05.123456+00:00",
        "updated_at": "2021-06-01T10:00:00+00:00",
    })
}

pub fn bill_page(page: u32, max_page: u32, per_page: u32) -> Value {
    let first = (page - 1) * per_page;
    let results: Vec<Value> = (first..first + per_page).map(bill).collect();
    json!({
        "results": results,
        "pagination": {
            "per_page": per_page,
            "page": page,
            "max_page": max_page,
            "total_items": max_page * per_page,
        }
    })
}
