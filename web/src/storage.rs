use memoria_core::{StorageBackend, StorageError, StorageResult};
use wasm_bindgen::JsValue;

/// Browser `localStorage` as a high-score backend.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    fn storage() -> StorageResult<web_sys::Storage> {
        gloo::utils::window()
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}
