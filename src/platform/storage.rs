//! JSON values in LocalStorage
//!
//! Native builds have no persistent store: loads find nothing and saves only
//! check that the value serializes.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::LotteryError;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read and decode `key`. Missing or undecodable entries yield `None`.
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring stored '{}': {}", key, e);
            None
        }
    }
}

/// Encode and store `value` under `key`
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), LotteryError> {
    let json = serde_json::to_string(value)?;
    match local_storage() {
        Some(storage) => {
            if storage.set_item(key, &json).is_err() {
                log::warn!("LocalStorage refused '{}'", key);
            }
        }
        None => log::warn!("LocalStorage unavailable, '{}' not saved", key),
    }
    Ok(())
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, value: &T) -> Result<(), LotteryError> {
    serde_json::to_string(value)?;
    Ok(())
}
