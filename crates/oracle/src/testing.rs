use std::future::Future;
use std::sync::{Arc, Mutex};

use charla_http::HttpClient;

#[derive(Debug, Clone)]
pub(crate) struct RecordedPost {
    pub path: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct Inner {
    responses: Mutex<Vec<Result<Vec<u8>, String>>>,
    posts: Mutex<Vec<RecordedPost>>,
}

/// Scripted [`HttpClient`]: replays canned responses in order and records
/// every request it sees.
#[derive(Clone, Default)]
pub(crate) struct MockHttp {
    inner: Arc<Inner>,
}

impl MockHttp {
    pub fn replying(body: &str) -> Self {
        let mock = Self::default();
        mock.push(Ok(body.as_bytes().to_vec()));
        mock
    }

    pub fn failing(message: &str) -> Self {
        let mock = Self::default();
        mock.push(Err(message.to_string()));
        mock
    }

    pub fn push(&self, response: Result<Vec<u8>, String>) {
        self.inner.responses.lock().unwrap().push(response);
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.inner.posts.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttp {
    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, charla_http::Error>> + Send {
        self.inner.posts.lock().unwrap().push(RecordedPost {
            path: path.to_string(),
            body,
            content_type: content_type.to_string(),
        });
        let mut responses = self.inner.responses.lock().unwrap();
        let next = if responses.is_empty() {
            Err("mock exhausted".to_string())
        } else {
            responses.remove(0)
        };
        async move { next.map_err(|message| message.into()) }
    }
}
