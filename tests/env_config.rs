//! Configuration precedence through the process environment.
//!
//! The environment is process-global, so every check that touches it lives
//! in the single test below, in its own test binary.

mod common;

use common::{MountOn, TestServer};
use openstates::{API_KEY_ENV_VAR, Client, Params};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const API_ROOT_ENV_VAR: &str = "OPENSTATES_API_ROOT";
const RC_ENV_VAR: &str = "OPENSTATES_RC";

fn sent_key(server: &TestServer, client: &Client) -> Option<String> {
    client.get("people", &Params::new()).unwrap();
    let requests = server.requests();
    requests
        .last()
        .and_then(|r| r.headers.get("x-api-key"))
        .map(|v| v.to_str().unwrap().to_string())
}

#[test]
fn arguments_then_environment_then_rc_file() {
    let server = TestServer::start();
    Mock::given(method("GET"))
        .and(path("/people"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount_on(&server);

    let dir = std::env::temp_dir().join(format!("openstates-env-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let rc = dir.join("openstatesrc");
    std::fs::write(&rc, "url: https://rc.invalid\nkey: from-rc\n").unwrap();

    // SAFETY: no other thread in this binary reads or writes the environment.
    unsafe {
        std::env::set_var(RC_ENV_VAR, &rc);
        std::env::set_var(API_ROOT_ENV_VAR, server.uri());
        std::env::set_var(API_KEY_ENV_VAR, "from-env");
    }

    // environment beats the rc file
    let client = Client::new(None, None).unwrap();
    assert_eq!(client.root(), server.uri());
    assert_eq!(sent_key(&server, &client).as_deref(), Some("from-env"));

    // explicit arguments beat the environment
    let client = Client::new(Some(server.uri()), Some("explicit".to_string())).unwrap();
    assert_eq!(sent_key(&server, &client).as_deref(), Some("explicit"));

    // the rc file fills what the environment leaves unset
    unsafe {
        std::env::remove_var(API_KEY_ENV_VAR);
    }
    let client = Client::new(None, None).unwrap();
    assert_eq!(client.root(), server.uri());
    assert_eq!(sent_key(&server, &client).as_deref(), Some("from-rc"));

    unsafe {
        std::env::remove_var(API_ROOT_ENV_VAR);
    }
    let client = Client::from_env().unwrap();
    assert_eq!(client.root(), "https://rc.invalid");
    assert!(client.has_api_key());

    unsafe {
        std::env::remove_var(RC_ENV_VAR);
    }
    std::fs::remove_dir_all(&dir).ok();
}
