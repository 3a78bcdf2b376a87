#![allow(dead_code)]

use regex::Regex;
use serde_json::{json, Value};
use tide::http::{Body, Method, Request, Response, StatusCode, Url};

use phototrack::db::Database;
use phototrack::State;

pub const UNASSIGNED_ID: &str = "12345678-90ab-cdef-1234-567890abcdef";

pub fn default_site() -> Value {
    json!({
        "Address": "Tchernobyl, Ukraine",
        "Archive": "myarchive.zip",
        "Latitude": 50.8,
        "Longitude": 5.9,
        "Name": "The Site",
        "PitNumber": "Le Trou #4",
        "SecondsSinceEpoch": "666666666",
        "Status": 4,
    })
}

pub fn default_photo() -> Value {
    json!({
        "Image": "BeautifulImage",
        "Latitude": 50.5,
        "Longitude": 5.7,
        "SecondsSinceEpoch": "999999999",
        "Tag": "Yeah!",
        "SiteUuid": UNASSIGNED_ID,
    })
}

pub fn default_user() -> Value {
    json!({
        "FullName": "Joe User",
        "Email": "user@domain.com",
        "Organization": "SuperOrg",
        "UserName": "usr",
        "Password": "pwd",
        "IsAdmin": true,
        "IsSupervisor": true,
    })
}

pub fn default_login() -> Value {
    json!({ "username": "user", "password": "pass" })
}

pub fn is_valid_uuid(value: &Value) -> bool {
    let pattern =
        Regex::new("^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap();
    value.as_str().map_or(false, |id| pattern.is_match(id))
}

/// Checks that every key of `expected` reads back unchanged, except `skip`.
///
/// Floats only need to agree to one decimal.
pub fn assert_echoes(expected: &Value, actual: &Value, skip: &[&str]) {
    let expected = expected.as_object().expect("expected an object");

    for (key, expected_value) in expected {
        if skip.contains(&key.as_str()) {
            continue;
        }

        let actual_value = actual
            .get(key)
            .unwrap_or_else(|| panic!("{} missing from {}", key, actual));

        if expected_value.is_f64() {
            let rounded = (actual_value.as_f64().unwrap() * 10.0).round() / 10.0;
            assert_eq!(rounded, expected_value.as_f64().unwrap(), "{}", key);
        } else {
            assert_eq!(actual_value, expected_value, "{}", key);
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub allow: Option<String>,
    pub set_cookie: Option<String>,
}

pub struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

pub struct TestApp {
    app: tide::Server<State>,
}

impl TestApp {
    pub fn new() -> Self {
        TestApp::with_database(Database::default())
    }

    pub fn with_database(db: Database) -> Self {
        TestApp {
            app: phototrack::server(State::new(db)),
        }
    }

    pub fn from_server(app: tide::Server<State>) -> Self {
        TestApp { app }
    }

    pub fn server(&self) -> tide::Server<State> {
        self.app.clone()
    }

    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> TestResponse {
        let url = Url::parse(&format!("http://localhost{}", path)).unwrap();
        let mut req = Request::new(method, url);
        if let Some(body) = body {
            req.set_body(Body::from_json(body).unwrap());
        }

        let mut res: Response = self.app.respond(req).await.unwrap();
        let header = |res: &Response, name: &str| {
            res.header(name)
                .map(|values| values.iter().map(|v| v.as_str()).collect::<Vec<_>>().join("; "))
        };
        let allow = header(&res, "Allow");
        let set_cookie = header(&res, "Set-Cookie");

        let text = res.body_string().await.unwrap();
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .unwrap_or_else(|err| panic!("{} {} answered non-JSON {:?}: {}", method, path, text, err))
        };

        TestResponse {
            status: res.status(),
            body,
            allow,
            set_cookie,
        }
    }

    /// Sends a bodiless request and keeps the response body as bytes.
    pub async fn raw(&self, method: Method, path: &str) -> RawResponse {
        let url = Url::parse(&format!("http://localhost{}", path)).unwrap();
        let mut res: Response = self.app.respond(Request::new(method, url)).await.unwrap();

        RawResponse {
            status: res.status(),
            content_type: res.header("Content-Type").map(|values| values.last().as_str().to_string()),
            body: res.body_bytes().await.unwrap(),
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        self.request(Method::Post, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Method::Delete, path, None).await
    }

    /// Creates an entity and returns the identifier stored under `id_key`.
    pub async fn create(&self, collection: &str, body: &Value, id_key: &str) -> String {
        let res = self.post(collection, body).await;
        assert_eq!(res.status, StatusCode::Ok, "{}", res.body);
        res.body[id_key]
            .as_str()
            .unwrap_or_else(|| panic!("no {} in {}", id_key, res.body))
            .to_string()
    }
}
