// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request
/// method and path. A path can carry a sequence of responses consumed one per
/// call, with the last one repeating; readiness polls are exercised this way.
/// Every request is recorded so tests can assert submission order.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Method/path pairs of every request received, in arrival order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.push("GET", path, status, body);
        self
    }

    /// Add a sequence of GET responses for a path; the last one repeats
    pub fn on_get_sequence(self, path: &str, responses: &[(u16, &str)]) -> Self {
        for (status, body) in responses {
            self.push("GET", path, *status, body);
        }
        self
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.push("POST", path, status, body);
        self
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.push("DELETE", path, status, body);
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn push(&self, method: &str, path: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));

        let response = self.next_response(&method, &path);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// Render a Secret whose data holds the given plain-text fields
pub fn secret_json(name: &str, namespace: &str, fields: &[(&str, &str)]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let data: serde_json::Map<String, serde_json::Value> = fields
        .iter()
        .map(|(k, v)| {
            (
                k.to_string(),
                serde_json::Value::String(STANDARD.encode(v.as_bytes())),
            )
        })
        .collect();
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": { "name": name, "namespace": namespace, "uid": "test-uid" },
        "type": "Opaque",
        "data": data
    })
    .to_string()
}

/// Render a DBaaSInventory with the given conditions and instances
pub fn inventory_json(
    name: &str,
    namespace: &str,
    conditions: &[(&str, &str)],
    instances: &[(&str, &str)],
) -> String {
    let conditions: Vec<serde_json::Value> = conditions
        .iter()
        .map(|(t, s)| serde_json::json!({ "type": t, "status": s }))
        .collect();
    let instances: Vec<serde_json::Value> = instances
        .iter()
        .map(|(id, n)| serde_json::json!({ "instanceID": id, "name": n }))
        .collect();
    serde_json::json!({
        "apiVersion": "dbaas.redhat.com/v1alpha1",
        "kind": "DBaaSInventory",
        "metadata": { "name": name, "namespace": namespace, "uid": "test-uid" },
        "spec": {
            "providerRef": { "name": "test-registration", "namespace": namespace },
            "credentialsRef": { "name": format!("dbaas-secret-e2e-{}", name), "namespace": namespace }
        },
        "status": { "conditions": conditions, "instances": instances }
    })
    .to_string()
}

/// Render a DBaaSConnection with the given conditions
pub fn connection_json(name: &str, namespace: &str, conditions: &[(&str, &str)]) -> String {
    let conditions: Vec<serde_json::Value> = conditions
        .iter()
        .map(|(t, s)| serde_json::json!({ "type": t, "status": s }))
        .collect();
    serde_json::json!({
        "apiVersion": "dbaas.redhat.com/v1alpha1",
        "kind": "DBaaSConnection",
        "metadata": { "name": name, "namespace": namespace, "uid": "test-uid" },
        "spec": {
            "inventoryRef": { "name": "test-inventory", "namespace": namespace },
            "instanceID": "inst-1"
        },
        "status": { "conditions": conditions }
    })
    .to_string()
}
