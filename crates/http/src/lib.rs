use std::future::Future;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Minimal HTTP capability the oracle clients are generic over.
///
/// Implementations own the base URL and authentication; `path` is always
/// relative. A non-2xx status must surface as `Err`, never as body bytes.
pub trait HttpClient: Send + Sync {
    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}
