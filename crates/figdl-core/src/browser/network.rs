//! Network traffic recorder fed by CDP request/response events.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::discover::{NetworkRequest, NetworkResponse};

/// Shared between the listener tasks and the session.
#[derive(Debug)]
pub(crate) struct NetworkLog {
    requests: Vec<NetworkRequest>,
    responses: Vec<NetworkResponse>,
    /// request id → HTTP method, to label responses.
    methods: HashMap<String, String>,
    last_activity: Instant,
}

pub(crate) type SharedLog = Arc<Mutex<NetworkLog>>;

impl NetworkLog {
    pub(crate) fn shared() -> SharedLog {
        Arc::new(Mutex::new(NetworkLog {
            requests: Vec::new(),
            responses: Vec::new(),
            methods: HashMap::new(),
            last_activity: Instant::now(),
        }))
    }

    pub(crate) fn record_request(&mut self, request_id: String, req: NetworkRequest) {
        self.methods.insert(request_id, req.method.clone());
        self.requests.push(req);
        self.last_activity = Instant::now();
    }

    /// `content_type` is the response MIME type; method comes from the
    /// matching request, `GET` if it was not seen.
    pub(crate) fn record_response(
        &mut self,
        request_id: &str,
        url: String,
        resource_type: String,
        content_type: String,
    ) {
        let method = self
            .methods
            .get(request_id)
            .cloned()
            .unwrap_or_else(|| "GET".to_string());
        self.responses.push(NetworkResponse {
            url,
            resource_type,
            content_type,
            method,
        });
        self.last_activity = Instant::now();
    }

    pub(crate) fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    pub(crate) fn take(&mut self) -> (Vec<NetworkRequest>, Vec<NetworkResponse>) {
        (
            std::mem::take(&mut self.requests),
            std::mem::take(&mut self.responses),
        )
    }
}

/// Lowercased CDP resource type name (`Image` → `image`, `XHR` → `xhr`).
pub(crate) fn resource_type_name(cdp_name: &str) -> String {
    cdp_name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_inherits_request_method() {
        let log = NetworkLog::shared();
        let mut l = log.lock().unwrap();
        l.record_request(
            "42.1".into(),
            NetworkRequest {
                url: "https://s3.test/a".into(),
                resource_type: "fetch".into(),
                method: "POST".into(),
            },
        );
        l.record_response("42.1", "https://s3.test/a".into(), "fetch".into(), "image/png".into());
        l.record_response("99.9", "https://s3.test/b".into(), "image".into(), "image/gif".into());
        let (reqs, resps) = l.take();
        assert_eq!(reqs.len(), 1);
        assert_eq!(resps[0].method, "POST");
        assert_eq!(resps[1].method, "GET");
        assert!(l.take().1.is_empty());
    }

    #[test]
    fn resource_type_names() {
        use chromiumoxide::cdp::browser_protocol::network::ResourceType;
        assert_eq!(resource_type_name(ResourceType::Image.as_ref()), "image");
        assert_eq!(resource_type_name(ResourceType::Xhr.as_ref()), "xhr");
        assert_eq!(resource_type_name(ResourceType::Media.as_ref()), "media");
    }
}
