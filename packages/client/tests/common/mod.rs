// ABOUTME: Shared fixtures for API client integration tests
// ABOUTME: Recording navigator and a client wired to in-memory state and a toast queue
#![allow(dead_code)]

use flashdeck_client::{ApiClient, Navigator, ToastQueue};
use flashdeck_storage::AppState;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

pub struct TestClient {
    pub client: ApiClient,
    pub state: Arc<AppState>,
    pub toasts: Arc<ToastQueue>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn test_client(base_url: &str) -> TestClient {
    test_client_with_state(base_url, AppState::in_memory())
}

pub fn test_client_with_state(base_url: &str, state: AppState) -> TestClient {
    let state = Arc::new(state);
    let toasts = Arc::new(ToastQueue::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(base_url, state.clone(), toasts.clone(), navigator.clone()).unwrap();

    TestClient {
        client,
        state,
        toasts,
        navigator,
    }
}
