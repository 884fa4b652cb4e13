//! `localStorage` backend for the system store

use sysstore_core::{CoreError, CoreResult, KeyValueStorage};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Browser `localStorage`; entries survive page reloads
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

fn local_storage() -> CoreResult<Storage> {
    web_sys::window()
        .ok_or_else(|| CoreError::storage_error("No browser window"))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| CoreError::storage_error("localStorage is unavailable"))
}

fn js_error(err: JsValue) -> CoreError {
    CoreError::storage_error(format!("{err:?}"))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        local_storage()?.remove_item(key).map_err(js_error)
    }
}
