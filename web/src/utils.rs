use codegate_core::GameError;
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Namespaced local storage key of a persisted preference.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
    fn local_save(&self);
}

/// `None` is stored as an absent key.
impl<T> LocalOrDefault for Option<T>
where
    T: StorageKey + Serialize + DeserializeOwned,
{
    fn local_or_default() -> Self {
        match LocalStorage::get(T::KEY) {
            Ok(value) => Some(value),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("ignoring stored {}: {}", T::KEY, err);
                None
            }
        }
    }

    fn local_save(&self) {
        match self {
            Some(value) => {
                if let Err(err) = LocalStorage::set(T::KEY, value) {
                    log::error!("failed to save {}: {}", T::KEY, err);
                }
            }
            None => LocalStorage::delete(T::KEY),
        }
    }
}

/// Engine transitions the page treats as no-ops when refused.
pub(crate) trait Accepted<T> {
    fn accepted(self) -> Option<T>;
}

impl<T> Accepted<T> for Result<T, GameError> {
    fn accepted(self) -> Option<T> {
        self.inspect_err(|err| log::trace!("ignored: {}", err)).ok()
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let mut bytes = [0; 8];
    for byte in &mut bytes {
        *byte = (256. * random()) as u8;
    }
    u64::from_be_bytes(bytes)
}
