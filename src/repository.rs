//! Planet repository
//!
//! Each planet is stored as one JSON document at `planets/<id>.json` in a
//! [`StorageBackend`]. Writes are serialised through an async mutex so the
//! name-uniqueness check and the insert happen as one step within this
//! process. Separate processes sharing a bucket are not coordinated.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use crate::storage::StorageBackend;
use crate::types::{is_valid_id, Planet};
use crate::{Error, Result};

const PLANETS_PREFIX: &str = "planets";

/// Store gateway for planet records
#[async_trait]
pub trait PlanetRepository: Send + Sync {
    /// All planets, in key order
    async fn find_all(&self) -> Result<Vec<Planet>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Planet>>;

    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> Result<Option<Planet>>;

    /// Insert or replace a planet by id
    async fn save(&self, planet: Planet) -> Result<Planet>;

    /// Insert a planet unless one with the same name exists.
    ///
    /// Fails with [`Error::PlanetAlreadyExists`] when the name is taken.
    async fn insert_if_absent(&self, planet: Planet) -> Result<Planet>;

    async fn delete(&self, planet: &Planet) -> Result<()>;
}

/// [`PlanetRepository`] backed by JSON documents in object storage
pub struct DocumentRepository {
    storage: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl DocumentRepository {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    fn document_key(id: &str) -> String {
        format!("{}/{}.json", PLANETS_PREFIX, id)
    }

    async fn load(&self, key: &str) -> Result<Planet> {
        let data = self.storage.get(key).await?;
        serde_json::from_slice(&data).map_err(|e| {
            tracing::error!(%key, error = %e, "Corrupt planet document");
            Error::from(e)
        })
    }

    async fn store(&self, planet: &Planet) -> Result<()> {
        if !is_valid_id(&planet.id) {
            return Err(Error::InvalidRequest(format!(
                "invalid planet id '{}'",
                planet.id
            )));
        }

        let json = serde_json::to_vec(planet)?;
        self.storage
            .put(&Self::document_key(&planet.id), Bytes::from(json))
            .await
    }
}

#[async_trait]
impl PlanetRepository for DocumentRepository {
    async fn find_all(&self) -> Result<Vec<Planet>> {
        let keys = self.storage.list(PLANETS_PREFIX).await?;

        let mut planets = Vec::with_capacity(keys.len());
        for key in keys.iter().filter(|k| k.ends_with(".json")) {
            match self.load(key).await {
                Ok(planet) => planets.push(planet),
                // Corrupt documents are logged by `load`; removed ones raced a delete
                Err(Error::Serialization(_)) | Err(Error::ObjectNotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(planets)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Planet>> {
        if !is_valid_id(id) {
            return Ok(None);
        }

        match self.load(&Self::document_key(id)).await {
            Ok(planet) => Ok(Some(planet)),
            Err(Error::ObjectNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Planet>> {
        let planets = self.find_all().await?;
        Ok(planets.into_iter().find(|p| p.name == name))
    }

    async fn save(&self, planet: Planet) -> Result<Planet> {
        let _guard = self.write_lock.lock().await;
        self.store(&planet).await?;
        Ok(planet)
    }

    async fn insert_if_absent(&self, planet: Planet) -> Result<Planet> {
        let _guard = self.write_lock.lock().await;

        if self.find_by_name(&planet.name).await?.is_some() {
            return Err(Error::PlanetAlreadyExists(planet.name));
        }

        self.store(&planet).await?;
        tracing::debug!(id = %planet.id, name = %planet.name, "Planet stored");
        Ok(planet)
    }

    async fn delete(&self, planet: &Planet) -> Result<()> {
        if !is_valid_id(&planet.id) {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        self.storage.delete(&Self::document_key(&planet.id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::local::LocalStorage;
    use crate::types::CreatePlanetRequest;
    use tempfile::TempDir;

    fn planet(name: &str, in_movies: u32) -> Planet {
        Planet::new(CreatePlanetRequest::new(name, "arid", "desert"), in_movies)
    }

    fn repository(temp_dir: &TempDir) -> DocumentRepository {
        let storage = Arc::new(LocalStorage::new(temp_dir.path()).unwrap());
        DocumentRepository::new(storage)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let tatooine = repo.insert_if_absent(planet("Tatooine", 5)).await.unwrap();

        let by_id = repo.find_by_id(&tatooine.id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&tatooine));

        let by_name = repo.find_by_name("Tatooine").await.unwrap();
        assert_eq!(by_name, Some(tatooine));

        assert!(repo.find_by_name("tatooine").await.unwrap().is_none());
        assert!(repo.find_by_id("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_without_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let first = repo.insert_if_absent(planet("Tatooine", 5)).await.unwrap();
        let err = repo
            .insert_if_absent(planet("Tatooine", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PlanetAlreadyExists(name) if name == "Tatooine"));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![first]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_keep_names_unique() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Arc::new(repository(&temp_dir));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert_if_absent(planet("Hoth", 4)).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let hoth = repo.insert_if_absent(planet("Hoth", 1)).await.unwrap();
        let endor = repo.insert_if_absent(planet("Endor", 1)).await.unwrap();

        repo.delete(&hoth).await.unwrap();

        assert!(repo.find_by_id(&hoth.id).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap(), vec![endor]);
    }

    #[tokio::test]
    async fn test_save_replaces_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        let mut naboo = repo.save(planet("Naboo", 4)).await.unwrap();
        naboo.climate = "temperate".to_string();
        repo.save(naboo.clone()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![naboo]);
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        assert!(repo.find_by_id("../planets").await.unwrap().is_none());

        let mut bad = planet("Kamino", 1);
        bad.id = "../escape".to_string();
        assert!(matches!(
            repo.save(bad).await,
            Err(Error::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalStorage::new(temp_dir.path()).unwrap());
        let repo = DocumentRepository::new(storage.clone());

        let hoth = repo.insert_if_absent(planet("Hoth", 1)).await.unwrap();
        storage
            .put("planets/zzz.json", Bytes::from("garbage"))
            .await
            .unwrap();

        assert_eq!(repo.find_all().await.unwrap(), vec![hoth.clone()]);
        assert_eq!(repo.find_by_name("Hoth").await.unwrap(), Some(hoth));

        let endor = repo.insert_if_absent(planet("Endor", 3)).await.unwrap();
        assert_eq!(repo.find_by_id(&endor.id).await.unwrap(), Some(endor));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    /// Local storage that claims every key exists, as seen by a reader
    /// racing a concurrent delete
    struct StaleExistsStorage(LocalStorage);

    #[async_trait]
    impl StorageBackend for StaleExistsStorage {
        async fn get(&self, key: &str) -> Result<Bytes> {
            self.0.get(key).await
        }

        async fn put(&self, key: &str, data: Bytes) -> Result<()> {
            self.0.put(key, data).await
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.0.delete(key).await
        }

        async fn exists(&self, _key: &str) -> Result<bool> {
            Ok(true)
        }

        async fn list(&self, prefix: &str) -> Result<Vec<String>> {
            self.0.list(prefix).await
        }
    }

    #[tokio::test]
    async fn test_find_by_id_after_concurrent_delete() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StaleExistsStorage(LocalStorage::new(temp_dir.path()).unwrap());
        let repo = DocumentRepository::new(Arc::new(storage));

        let tatooine = repo.insert_if_absent(planet("Tatooine", 5)).await.unwrap();
        repo.delete(&tatooine).await.unwrap();

        assert!(repo.find_by_id(&tatooine.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);

        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(repo.find_by_name("Alderaan").await.unwrap().is_none());
    }
}
