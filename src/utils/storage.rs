// ============================================================================
// STORAGE - Backends de almacenamiento clave/valor
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::{window, Storage};

use crate::error::{UiError, UiResult};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Almacenamiento de strings crudos (localStorage o memoria)
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> UiResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> UiResult<()>;
    fn remove_item(&self, key: &str) -> UiResult<()>;
}

/// window.localStorage; sin storage (modo privado, iframe sandbox) => error Storage
#[derive(Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    fn storage(&self) -> UiResult<Storage> {
        get_local_storage().ok_or_else(|| UiError::Storage("localStorage no disponible".to_string()))
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> UiResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|_| UiError::Storage(format!("error leyendo '{}'", key)))
    }

    fn set_item(&self, key: &str, value: &str) -> UiResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| UiError::Storage(format!("error guardando '{}'", key)))
    }

    fn remove_item(&self, key: &str) -> UiResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| UiError::Storage(format!("error eliminando '{}'", key)))
    }
}

/// Backend en memoria (tests y entornos sin window)
#[derive(Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> UiResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> UiResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> UiResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
