use tokio::sync::RwLock;

/// Per-process session state shared between the API surface and the
/// remote listing client.
///
/// The upstream listing API authenticates with a CSRF token captured by
/// the browser side and handed to us opaquely; this service never
/// acquires, validates or refreshes it. Owned by `main` and torn down
/// with the process.
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    pub fn new(initial_token: Option<String>) -> Self {
        Self {
            token: RwLock::new(initial_token),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }
}
