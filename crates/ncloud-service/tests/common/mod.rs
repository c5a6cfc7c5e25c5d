//! In-memory fake stores for driving the namespace service.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use ncloud_core::result::AppResult;
use ncloud_core::traits::content::ContentStore;
use ncloud_core::traits::search::{SearchDocument, SearchIndex};
use ncloud_entity::directory::{Directory, NewDirectory};
use ncloud_entity::file::{File, NewFile};
use ncloud_entity::store::{DirectoryStore, FileStore};

/// Directory store backed by a plain in-memory vector.
#[derive(Debug, Default)]
pub struct FakeDirectoryStore {
    records: Mutex<Vec<Directory>>,
}

impl FakeDirectoryStore {
    pub fn seed(&self, directory: Directory) {
        self.records.lock().unwrap().push(directory);
    }

    pub fn get(&self, id: Uuid) -> Option<Directory> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl DirectoryStore for FakeDirectoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Directory>> {
        Ok(self.get(id))
    }

    async fn find_owned(&self, owner_id: Uuid) -> AppResult<Vec<Directory>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_owned_children(&self, owner_id: Uuid) -> AppResult<Vec<Directory>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.owner_id == owner_id && d.parent_id.is_some())
            .cloned()
            .collect())
    }

    async fn find_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<Vec<Directory>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.owner_id == owner_id && ids.contains(&d.id))
            .cloned()
            .collect())
    }

    async fn insert_many(&self, directories: &[NewDirectory]) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        for new in directories {
            records.push(Directory {
                id: new.id,
                name: new.name.clone(),
                owner_id: new.owner_id,
                parent_id: new.parent_id,
                previous_parent_id: None,
                capability_key: new.capability_key.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn delete_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|d| !(d.owner_id == owner_id && ids.contains(&d.id)));
        Ok((before - records.len()) as u64)
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|d| d.id == id) {
            Some(record) => {
                record.name = name.to_string();
                record.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_parent_bulk(
        &self,
        ids: &[Uuid],
        destination: Uuid,
        owner_id: Uuid,
    ) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let mut updated = 0;
        for record in records
            .iter_mut()
            .filter(|d| d.owner_id == owner_id && ids.contains(&d.id))
        {
            record.parent_id = Some(destination);
            record.updated_at = Utc::now();
            updated += 1;
        }
        Ok(updated)
    }

    async fn set_parent_conditional(
        &self,
        id: Uuid,
        origin: Uuid,
        destination: Uuid,
    ) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|d| d.id == id && d.parent_id == Some(origin))
        {
            Some(record) => {
                record.parent_id = Some(destination);
                record.previous_parent_id = Some(origin);
                record.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn restore_previous_parent(&self, id: Uuid) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|d| d.id == id && d.previous_parent_id.is_some())
        {
            Some(record) => {
                record.parent_id = record.previous_parent_id.take();
                record.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// File store backed by a plain in-memory vector.
#[derive(Debug, Default)]
pub struct FakeFileStore {
    records: Mutex<Vec<File>>,
}

impl FakeFileStore {
    pub fn seed(&self, file: File) {
        self.records.lock().unwrap().push(file);
    }

    pub fn get(&self, id: Uuid) -> Option<File> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<File> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for FakeFileStore {
    async fn find_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<Vec<File>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.owner_id == owner_id && ids.contains(&f.id))
            .cloned()
            .collect())
    }

    async fn find_by_parent_ids(&self, parent_ids: &[Uuid]) -> AppResult<Vec<File>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|f| parent_ids.contains(&f.parent_id))
            .cloned()
            .collect())
    }

    async fn insert_many(&self, files: &[NewFile]) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        for new in files {
            records.push(File {
                id: new.id,
                name: new.name.clone(),
                owner_id: new.owner_id,
                parent_id: new.parent_id,
                previous_parent_id: None,
                mime_type: new.mime_type.clone(),
                size_bytes: new.size_bytes,
                capability_key: new.capability_key.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn delete_by_parent_ids(&self, parent_ids: &[Uuid]) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|f| !parent_ids.contains(&f.parent_id));
        Ok((before - records.len()) as u64)
    }

    async fn delete_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|f| !(f.owner_id == owner_id && ids.contains(&f.id)));
        Ok((before - records.len()) as u64)
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|f| f.id == id) {
            Some(record) => {
                record.name = name.to_string();
                record.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_parent_conditional(
        &self,
        id: Uuid,
        origin: Uuid,
        destination: Uuid,
        capability_key: &str,
    ) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|f| f.id == id && f.parent_id == origin)
        {
            Some(record) => {
                record.parent_id = destination;
                record.previous_parent_id = Some(origin);
                record.capability_key = capability_key.to_string();
                record.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn restore_previous_parent(&self, id: Uuid, capability_key: &str) -> AppResult<u64> {
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|f| f.id == id && f.previous_parent_id.is_some())
        {
            Some(record) => {
                if let Some(previous) = record.previous_parent_id.take() {
                    record.parent_id = previous;
                }
                record.capability_key = capability_key.to_string();
                record.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Search index that records every call for assertions.
#[derive(Debug, Default)]
pub struct FakeSearchIndex {
    pub upserts: Mutex<Vec<(String, Vec<SearchDocument>)>>,
    pub deletes: Mutex<Vec<(String, Vec<Uuid>)>>,
    pub filter_deletes: Mutex<Vec<(String, String)>>,
}

impl FakeSearchIndex {
    /// All upserted documents for one index, flattened.
    pub fn upserted(&self, index: &str) -> Vec<SearchDocument> {
        self.upserts
            .lock()
            .unwrap()
            .iter()
            .filter(|(i, _)| i == index)
            .flat_map(|(_, docs)| docs.clone())
            .collect()
    }

    /// All deleted ids for one index, flattened.
    pub fn deleted(&self, index: &str) -> Vec<Uuid> {
        self.deletes
            .lock()
            .unwrap()
            .iter()
            .filter(|(i, _)| i == index)
            .flat_map(|(_, ids)| ids.clone())
            .collect()
    }
}

#[async_trait]
impl SearchIndex for FakeSearchIndex {
    async fn upsert(&self, index: &str, documents: Vec<SearchDocument>) -> AppResult<()> {
        self.upserts
            .lock()
            .unwrap()
            .push((index.to_string(), documents));
        Ok(())
    }

    async fn delete(&self, index: &str, ids: Vec<Uuid>) -> AppResult<()> {
        self.deletes.lock().unwrap().push((index.to_string(), ids));
        Ok(())
    }

    async fn delete_by_filter(&self, index: &str, filter: &str) -> AppResult<()> {
        self.filter_deletes
            .lock()
            .unwrap()
            .push((index.to_string(), filter.to_string()));
        Ok(())
    }
}

/// Content store tracking folders and `(directory, file)` pairs.
#[derive(Debug, Default)]
pub struct FakeContentStore {
    pub dirs: Mutex<HashSet<Uuid>>,
    pub files: Mutex<HashSet<(Uuid, Uuid)>>,
}

impl FakeContentStore {
    pub fn seed_dir(&self, directory_id: Uuid) {
        self.dirs.lock().unwrap().insert(directory_id);
    }

    pub fn seed_file(&self, directory_id: Uuid, file_id: Uuid) {
        self.seed_dir(directory_id);
        self.files.lock().unwrap().insert((directory_id, file_id));
    }

    pub fn has_dir(&self, directory_id: Uuid) -> bool {
        self.dirs.lock().unwrap().contains(&directory_id)
    }

    pub fn has_file(&self, directory_id: Uuid, file_id: Uuid) -> bool {
        self.files.lock().unwrap().contains(&(directory_id, file_id))
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn create_dir(&self, directory_id: Uuid) -> AppResult<()> {
        self.dirs.lock().unwrap().insert(directory_id);
        Ok(())
    }

    async fn remove_dir(&self, directory_id: Uuid) -> AppResult<()> {
        self.dirs.lock().unwrap().remove(&directory_id);
        self.files
            .lock()
            .unwrap()
            .retain(|(dir, _)| *dir != directory_id);
        Ok(())
    }

    async fn remove_file(&self, directory_id: Uuid, file_id: Uuid) -> AppResult<()> {
        self.files.lock().unwrap().remove(&(directory_id, file_id));
        Ok(())
    }

    async fn rename_file(&self, from_dir: Uuid, to_dir: Uuid, file_id: Uuid) -> AppResult<()> {
        let mut files = self.files.lock().unwrap();
        files.remove(&(from_dir, file_id));
        files.insert((to_dir, file_id));
        Ok(())
    }

    async fn copy_file(
        &self,
        _from_dir: Uuid,
        _from_file: Uuid,
        to_dir: Uuid,
        to_file: Uuid,
    ) -> AppResult<()> {
        self.files.lock().unwrap().insert((to_dir, to_file));
        Ok(())
    }

    async fn exists_dir(&self, directory_id: Uuid) -> AppResult<bool> {
        Ok(self.has_dir(directory_id))
    }
}

/// Convenience for asserting over id sets.
pub fn id_set(ids: impl IntoIterator<Item = Uuid>) -> HashSet<Uuid> {
    ids.into_iter().collect()
}
