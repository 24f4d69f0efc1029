//! Theme persistence backed by `window.localStorage`.

use std::rc::Rc;

use sitekit_shared::{KeyValueStore, MemoryStore, UiError};
use web_sys::{Storage, Window};

/// `window.localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> sitekit_shared::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| UiError::Storage(format!("{err:?}")))
    }
}

/// Pick the durable store, falling back to memory when the browser denies
/// `localStorage` (private mode, disabled cookies).
pub fn open(window: &Window) -> Rc<dyn KeyValueStore> {
    match window.local_storage() {
        Ok(Some(storage)) => Rc::new(LocalStorage {
            storage,
        }),
        Ok(None) | Err(_) => {
            log::warn!("localStorage unavailable, theme preference will not persist");
            Rc::new(MemoryStore::new())
        },
    }
}
