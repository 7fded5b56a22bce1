use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// The slice of a third-party creature record that volunteer cards show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    pub types: Vec<String>,
}

#[derive(Deserialize)]
struct ApiCreature {
    id: u32,
    name: String,
    sprites: ApiSprites,
    #[serde(default)]
    types: Vec<ApiTypeSlot>,
}

#[derive(Deserialize)]
struct ApiSprites {
    front_default: Option<String>,
}

#[derive(Deserialize)]
struct ApiTypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    kind: ApiNamed,
}

#[derive(Deserialize)]
struct ApiNamed {
    name: String,
}

impl Creature {
    /// Decodes the creature API's response body.
    pub fn from_api_json(body: &str) -> serde_json::Result<Self> {
        let mut api: ApiCreature = serde_json::from_str(body)?;
        api.types.sort_by_key(|slot| slot.slot);
        Ok(Self {
            id: api.id,
            name: api.name,
            sprite_url: api.sprites.front_default,
            types: api.types.into_iter().map(|slot| slot.kind.name).collect(),
        })
    }

    /// Name with the first letter upper-cased.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// String key-value storage backing the creature cache.
pub trait CacheStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store, used where no browser storage exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.into(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Creature records cached by numeric id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreatureCache<S> {
    store: S,
}

impl<S: CacheStore> CreatureCache<S> {
    pub const KEY_PREFIX: &'static str = "codegate:creature:";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn cache_key(id: u32) -> String {
        format!("{}{}", Self::KEY_PREFIX, id)
    }

    /// Cached record for `id`; an unreadable entry is dropped and reported as
    /// a miss.
    pub fn cached(&mut self, id: u32) -> Option<Creature> {
        let key = Self::cache_key(id);
        let raw = self.store.get(&key)?;
        match serde_json::from_str::<Creature>(&raw) {
            Ok(creature) if creature.id == id => Some(creature),
            Ok(creature) => {
                log::warn!("cache entry {} holds creature {}", key, creature.id);
                self.store.remove(&key);
                None
            }
            Err(err) => {
                log::warn!("dropping malformed cache entry {}: {}", key, err);
                self.store.remove(&key);
                None
            }
        }
    }

    pub fn store(&mut self, creature: &Creature) {
        match serde_json::to_string(creature) {
            Ok(raw) => self.store.set(&Self::cache_key(creature.id), raw),
            Err(err) => log::error!("failed to encode creature {}: {}", creature.id, err),
        }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn pikachu() -> Creature {
        Creature {
            id: 25,
            name: "pikachu".into(),
            sprite_url: Some("https://img.example/25.png".into()),
            types: vec!["electric".into()],
        }
    }

    #[test]
    fn stored_creature_is_served_from_cache() {
        let mut cache = CreatureCache::new(MemoryStore::new());
        assert_eq!(cache.cached(25), None);

        cache.store(&pikachu());
        assert_eq!(cache.cached(25), Some(pikachu()));
        assert_eq!(cache.inner().len(), 1);
        assert!(
            cache
                .inner()
                .get("codegate:creature:25")
                .is_some()
        );
    }

    #[test]
    fn malformed_entry_is_a_miss_and_evicted() {
        let mut store = MemoryStore::new();
        store.set(&CreatureCache::<MemoryStore>::cache_key(7), "{not json".to_string());
        let mut cache = CreatureCache::new(store);

        assert_eq!(cache.cached(7), None);
        assert!(cache.inner().is_empty());
    }

    #[test]
    fn entry_for_another_id_is_a_miss() {
        let mut store = MemoryStore::new();
        let raw = serde_json::to_string(&pikachu()).unwrap();
        store.set(&CreatureCache::<MemoryStore>::cache_key(1), raw);
        let mut cache = CreatureCache::new(store);

        assert_eq!(cache.cached(1), None);
        assert!(cache.inner().is_empty());
    }

    #[test]
    fn decodes_api_response() {
        let body = r#"{
            "id": 6,
            "name": "charizard",
            "height": 17,
            "sprites": {"front_default": "https://img.example/6.png", "back_default": null},
            "types": [
                {"slot": 2, "type": {"name": "flying", "url": "x"}},
                {"slot": 1, "type": {"name": "fire", "url": "y"}}
            ]
        }"#;

        let creature = Creature::from_api_json(body).unwrap();
        assert_eq!(creature.id, 6);
        assert_eq!(creature.display_name(), "Charizard");
        assert_eq!(creature.types, ["fire", "flying"]);
        assert_eq!(
            creature.sprite_url.as_deref(),
            Some("https://img.example/6.png")
        );
    }

    #[test]
    fn api_response_without_sprite_is_accepted() {
        let body = r#"{"id": 1, "name": "bulbasaur", "sprites": {"front_default": null}}"#;
        let creature = Creature::from_api_json(body).unwrap();

        assert_eq!(creature.sprite_url, None);
        assert!(creature.types.is_empty());
    }
}
