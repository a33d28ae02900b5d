use crate::error::Result;

/// Abstract interface for raw key/value storage.
///
/// This trait handles the "where" of storage (memory vs directory), while
/// `LocalStorageService` handles the "what" (keys, versioning, encoding,
/// validation). Values are opaque strings.
///
/// All methods take `&self`; implementations use interior mutability where
/// they need it.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if the key has never been written (or was removed).
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be all-or-nothing: a failed write leaves the previous value intact.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for &K {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<K> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
