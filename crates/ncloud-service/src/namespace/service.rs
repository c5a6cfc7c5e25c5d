//! The namespace mutation coordinator.
//!
//! Applies every structural change to the three stores in a fixed
//! order: metadata first, then the search projection, then disk.
//! Metadata failures abort the operation; projection and disk failures
//! are logged and the operation continues, because the metadata store
//! is authoritative and the other two can be reconciled later.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use ncloud_auth::{CapabilityCodec, Permission, PermissionGate};
use ncloud_core::error::AppError;
use ncloud_core::result::AppResult;
use ncloud_core::traits::content::ContentStore;
use ncloud_core::traits::search::{
    DIRECTORY_INDEX, FILE_INDEX, SearchDocument, SearchIndex, in_filter,
};
use ncloud_entity::directory::{Directory, NewDirectory, TreeIndex};
use ncloud_entity::file::{File, NewFile};
use ncloud_entity::store::{DirectoryStore, FileStore};

use crate::context::RequestContext;
use crate::tree::TreeIndexBuilder;

use super::request::{
    CopyFilesRequest, CopyRequest, CreateDirectoryRequest, DeleteTarget, DirectoryListing,
    MoveRequest, RenameRequest, RestoreDirectoriesRequest, RestoreFilesRequest, UpdatedResponse,
    UserRoots,
};

/// Coordinates namespace mutations across the metadata store, the
/// search projection, and the content store.
///
/// Holds the only write path for `parent_id`, `previous_parent_id`, and
/// `capability_key` after creation. One logical operation per call; the
/// only cross-request guard is the optimistic origin check on
/// conditional moves.
#[derive(Clone)]
pub struct NamespaceService {
    directories: Arc<dyn DirectoryStore>,
    files: Arc<dyn FileStore>,
    search: Arc<dyn SearchIndex>,
    content: Arc<dyn ContentStore>,
    codec: CapabilityCodec,
    gate: PermissionGate,
    tree: TreeIndexBuilder,
}

impl NamespaceService {
    /// Creates a new namespace service over the given stores.
    pub fn new(
        directories: Arc<dyn DirectoryStore>,
        files: Arc<dyn FileStore>,
        search: Arc<dyn SearchIndex>,
        content: Arc<dyn ContentStore>,
        codec: CapabilityCodec,
    ) -> Self {
        Self {
            gate: PermissionGate::new(codec.clone()),
            tree: TreeIndexBuilder::new(directories.clone()),
            directories,
            files,
            search,
            content,
            codec,
        }
    }

    /// Creates a directory under an existing parent owned by the caller.
    ///
    /// The parent is checked by ownership record scan, not by token: the
    /// caller creates inside their own tree, and the fresh directory gets
    /// its own full-permission capability token bound to its new id.
    pub async fn create_directory(
        &self,
        ctx: &RequestContext,
        req: CreateDirectoryRequest,
    ) -> AppResult<Directory> {
        let parent = self
            .directories
            .find_by_id(req.parent_directory)
            .await?
            .ok_or_else(|| AppError::not_found("Parent directory not found"))?;
        if parent.owner_id != ctx.user_id {
            return Err(AppError::authorization(
                "Parent directory belongs to another user",
            ));
        }

        let id = Uuid::new_v4();
        let record = NewDirectory {
            id,
            name: req.name,
            owner_id: ctx.user_id,
            parent_id: Some(req.parent_directory),
            capability_key: self.codec.issue_directory(id)?,
        };
        record
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid directory name: {e}")))?;

        self.directories
            .insert_many(std::slice::from_ref(&record))
            .await?;
        let directory = self
            .directories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Directory record missing after insert"))?;

        if let Err(e) = self
            .search
            .upsert(DIRECTORY_INDEX, vec![Self::directory_document(&directory)])
            .await
        {
            warn!(error = %e, directory = %id, "Search projection lagging behind directory create");
        }
        if let Err(e) = self.content.create_dir(id).await {
            warn!(error = %e, directory = %id, "Disk folder not created with directory record");
        }

        info!(user = %ctx.user_id, directory = %id, "Created directory");
        Ok(directory)
    }

    /// Reads a directory together with its immediate contents.
    ///
    /// Ownership-checked, not token-checked: listing is scoped to the
    /// caller's own records, so a directory belonging to another user
    /// reads as if it did not exist.
    pub async fn list_directory(&self, ctx: &RequestContext, id: Uuid) -> AppResult<DirectoryListing> {
        let directory = self
            .directories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Directory not found"))?;
        if directory.owner_id != ctx.user_id {
            return Err(AppError::not_found("Directory not found"));
        }

        let directories: Vec<Directory> = self
            .directories
            .find_owned_children(ctx.user_id)
            .await?
            .into_iter()
            .filter(|d| d.parent_id == Some(id))
            .collect();
        let files = self.files.find_by_parent_ids(std::slice::from_ref(&id)).await?;

        Ok(DirectoryListing {
            directory,
            directories,
            files,
        })
    }

    /// Provisions the "Main" and "Trash" roots for a new user.
    ///
    /// Root tokens carry only read and upload: roots can never be
    /// renamed, moved, or deleted.
    pub async fn provision_user_roots(&self, ctx: &RequestContext) -> AppResult<UserRoots> {
        let mut records = Vec::with_capacity(2);
        for name in ["Main", "Trash"] {
            let id = Uuid::new_v4();
            records.push(NewDirectory {
                id,
                name: name.to_string(),
                owner_id: ctx.user_id,
                parent_id: None,
                capability_key: self.codec.issue(id, Permission::root_set(), None)?,
            });
        }
        self.directories.insert_many(&records).await?;

        let main = self.fetch_directory(records[0].id).await?;
        let trash = self.fetch_directory(records[1].id).await?;

        let documents = vec![
            Self::directory_document(&main),
            Self::directory_document(&trash),
        ];
        if let Err(e) = self.search.upsert(DIRECTORY_INDEX, documents).await {
            warn!(error = %e, user = %ctx.user_id, "Search projection lagging behind root provisioning");
        }
        for record in &records {
            if let Err(e) = self.content.create_dir(record.id).await {
                warn!(error = %e, directory = %record.id, "Disk folder not created for root");
            }
        }

        info!(user = %ctx.user_id, main = %main.id, trash = %trash.id, "Provisioned user roots");
        Ok(UserRoots { main, trash })
    }

    /// Permanently deletes directories and everything beneath them.
    ///
    /// Every target's token must grant `delete` and match its id; one
    /// bad token rejects the whole batch before anything is touched.
    /// Ids the acting user does not own fall out of the owner-scoped
    /// delete and are silently skipped.
    pub async fn delete_directories(
        &self,
        ctx: &RequestContext,
        targets: Vec<DeleteTarget>,
    ) -> AppResult<UpdatedResponse> {
        for target in &targets {
            if !self
                .gate
                .authorize(&target.access_key, Permission::Delete, Some(target.id))
            {
                return Err(AppError::authorization(format!(
                    "Capability does not permit deleting {}",
                    target.id
                )));
            }
        }
        if targets.is_empty() {
            return Ok(UpdatedResponse { updated: 0 });
        }

        let index = self.tree.build(ctx.user_id).await?;
        let roots: Vec<Uuid> = targets.iter().map(|t| t.id).collect();
        let affected = Self::closed_set(&index, &roots);

        // File records go first so no file ever points at a deleted
        // directory, then the directory records themselves.
        let files_removed = self.files.delete_by_parent_ids(&affected).await?;
        let directories_removed = self
            .directories
            .delete_by_ids_owned(&affected, ctx.user_id)
            .await?;

        if let Err(e) = self.search.delete(DIRECTORY_INDEX, affected.clone()).await {
            warn!(error = %e, "Search projection still lists deleted directories");
        }
        let filter = in_filter("parent_directory", &affected);
        if let Err(e) = self.search.delete_by_filter(FILE_INDEX, &filter).await {
            warn!(error = %e, "Search projection still lists deleted files");
        }
        for id in &affected {
            if let Err(e) = self.content.remove_dir(*id).await {
                warn!(error = %e, directory = %id, "Disk purge failed; folder left behind");
            }
        }

        info!(
            user = %ctx.user_id,
            directories = directories_removed,
            files = files_removed,
            "Deleted directory subtrees"
        );
        Ok(UpdatedResponse {
            updated: directories_removed,
        })
    }

    /// Permanently deletes individual files.
    ///
    /// Same batch-token policy as directory deletion: every target's
    /// token must grant `delete` and match its id, and ids the acting
    /// user does not own fall out of the owner-scoped delete.
    pub async fn delete_files(
        &self,
        ctx: &RequestContext,
        targets: Vec<DeleteTarget>,
    ) -> AppResult<UpdatedResponse> {
        for target in &targets {
            if !self
                .gate
                .authorize(&target.access_key, Permission::Delete, Some(target.id))
            {
                return Err(AppError::authorization(format!(
                    "Capability does not permit deleting file {}",
                    target.id
                )));
            }
        }
        if targets.is_empty() {
            return Ok(UpdatedResponse { updated: 0 });
        }

        let ids: Vec<Uuid> = targets.iter().map(|t| t.id).collect();
        // Snapshot parents before the delete so disk paths stay known.
        let records = self.files.find_by_ids_owned(&ids, ctx.user_id).await?;
        let removed = self.files.delete_by_ids_owned(&ids, ctx.user_id).await?;

        if let Err(e) = self.search.delete(FILE_INDEX, ids).await {
            warn!(error = %e, "Search projection still lists deleted files");
        }
        for record in &records {
            if let Err(e) = self.content.remove_file(record.parent_id, record.id).await {
                warn!(error = %e, file = %record.id, "Disk purge failed; file content left behind");
            }
        }

        info!(user = %ctx.user_id, files = removed, "Deleted files");
        Ok(UpdatedResponse { updated: removed })
    }

    /// Moves directories into a destination directory.
    ///
    /// Items without a declared origin move unconditionally; items with
    /// one move only if they still live there, and record it as
    /// `previous_parent_id` so the move can be undone. A destination
    /// equal to an item or inside its subtree rejects the whole batch.
    /// No disk I/O: the disk layout addresses folders by id, not path.
    pub async fn move_directories(
        &self,
        ctx: &RequestContext,
        req: MoveRequest,
    ) -> AppResult<UpdatedResponse> {
        if !self.gate.matches_id(&req.access_key, req.id) {
            return Err(AppError::authorization(
                "Invalid capability for the destination directory",
            ));
        }
        for item in &req.items {
            if !self
                .gate
                .authorize(&item.access_key, Permission::Modify, Some(item.id))
            {
                return Err(AppError::authorization(format!(
                    "Capability does not permit moving {}",
                    item.id
                )));
            }
        }

        let index = self.tree.build(ctx.user_id).await?;
        for item in &req.items {
            if req.id == item.id || index.is_inside(req.id, item.id) {
                return Err(AppError::validation(format!(
                    "Moving {} into {} would create a cycle",
                    item.id, req.id
                )));
            }
        }

        let mut updated = 0u64;
        let mut mirrored: Vec<Uuid> = Vec::new();

        let unconditional: Vec<Uuid> = req
            .items
            .iter()
            .filter(|item| item.parent_directory.is_none())
            .map(|item| item.id)
            .collect();
        if !unconditional.is_empty() {
            updated += self
                .directories
                .set_parent_bulk(&unconditional, req.id, ctx.user_id)
                .await?;
            mirrored.extend(&unconditional);
        }
        for item in &req.items {
            let Some(origin) = item.parent_directory else {
                continue;
            };
            // Already where it is going; skipping keeps previous_parent_id
            // unset so a later restore has nothing to undo.
            if origin == req.id {
                continue;
            }
            let count = self
                .directories
                .set_parent_conditional(item.id, origin, req.id)
                .await?;
            if count > 0 {
                mirrored.push(item.id);
            }
            updated += count;
        }

        let documents: Vec<SearchDocument> = mirrored
            .iter()
            .map(|id| SearchDocument::reparent(*id, req.id))
            .collect();
        if !documents.is_empty() {
            if let Err(e) = self.search.upsert(DIRECTORY_INDEX, documents).await {
                warn!(error = %e, destination = %req.id, "Search projection lagging behind directory move");
            }
        }

        info!(user = %ctx.user_id, destination = %req.id, updated, "Moved directories");
        Ok(UpdatedResponse { updated })
    }

    /// Moves files into a destination directory.
    ///
    /// Every item must declare its origin, and its token's parent
    /// binding must still equal it; tokens issued before an earlier
    /// move fail that check even though their signatures verify. Each
    /// successful move installs a fresh token bound to the destination,
    /// which is what revokes the old one.
    pub async fn move_files(
        &self,
        ctx: &RequestContext,
        req: MoveRequest,
    ) -> AppResult<UpdatedResponse> {
        if !self.gate.matches_id(&req.access_key, req.id) {
            return Err(AppError::authorization(
                "Invalid capability for the destination directory",
            ));
        }
        for item in &req.items {
            let Some(origin) = item.parent_directory else {
                return Err(AppError::validation(format!(
                    "File move for {} must declare its origin directory",
                    item.id
                )));
            };
            if !self
                .gate
                .authorize_file(&item.access_key, Permission::Modify, item.id, origin)
            {
                return Err(AppError::authorization(format!(
                    "Capability does not permit moving file {}",
                    item.id
                )));
            }
        }

        let mut updated = 0u64;
        let mut moved: Vec<(Uuid, Uuid)> = Vec::new();
        for item in &req.items {
            let Some(origin) = item.parent_directory else {
                continue;
            };
            // Already where it is going; the existing token stays valid.
            if origin == req.id {
                continue;
            }
            let key = self.codec.issue_file(item.id, req.id)?;
            let count = self
                .files
                .set_parent_conditional(item.id, origin, req.id, &key)
                .await?;
            if count > 0 {
                moved.push((item.id, origin));
            }
            updated += count;
        }

        let documents: Vec<SearchDocument> = moved
            .iter()
            .map(|(id, _)| SearchDocument::reparent(*id, req.id))
            .collect();
        if !documents.is_empty() {
            if let Err(e) = self.search.upsert(FILE_INDEX, documents).await {
                warn!(error = %e, destination = %req.id, "Search projection lagging behind file move");
            }
        }
        for (file_id, origin) in &moved {
            if let Err(e) = self.content.rename_file(*origin, req.id, *file_id).await {
                warn!(error = %e, file = %file_id, "Disk content not moved with file record");
            }
        }

        info!(user = %ctx.user_id, destination = %req.id, updated, "Moved files");
        Ok(UpdatedResponse { updated })
    }

    /// Renames a directory.
    ///
    /// The token must grant `modify` and match the directory id; root
    /// tokens never carry `modify`, so "Main" and "Trash" cannot be
    /// renamed. The new name is mirrored to the search projection.
    pub async fn rename_directory(
        &self,
        ctx: &RequestContext,
        req: RenameRequest,
    ) -> AppResult<UpdatedResponse> {
        if !self
            .gate
            .authorize(&req.access_key, Permission::Modify, Some(req.id))
        {
            return Err(AppError::authorization(format!(
                "Capability does not permit renaming {}",
                req.id
            )));
        }
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid directory name: {e}")))?;

        let updated = self.directories.rename(req.id, &req.name).await?;
        if updated > 0 {
            let document = SearchDocument::renamed(req.id, req.name.clone());
            if let Err(e) = self.search.upsert(DIRECTORY_INDEX, vec![document]).await {
                warn!(error = %e, directory = %req.id, "Search projection lagging behind directory rename");
            }
        }

        info!(user = %ctx.user_id, directory = %req.id, updated, "Renamed directory");
        Ok(UpdatedResponse { updated })
    }

    /// Renames a file. Same token policy as directory renames; the
    /// parent binding is untouched, so the existing token stays valid.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        req: RenameRequest,
    ) -> AppResult<UpdatedResponse> {
        if !self
            .gate
            .authorize(&req.access_key, Permission::Modify, Some(req.id))
        {
            return Err(AppError::authorization(format!(
                "Capability does not permit renaming file {}",
                req.id
            )));
        }
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid file name: {e}")))?;

        let updated = self.files.rename(req.id, &req.name).await?;
        if updated > 0 {
            let document = SearchDocument::renamed(req.id, req.name.clone());
            if let Err(e) = self.search.upsert(FILE_INDEX, vec![document]).await {
                warn!(error = %e, file = %req.id, "Search projection lagging behind file rename");
            }
        }

        info!(user = %ctx.user_id, file = %req.id, updated, "Renamed file");
        Ok(UpdatedResponse { updated })
    }

    /// Copies directory subtrees into a destination directory.
    ///
    /// Every copied directory and file gets a new id and a fresh token;
    /// parent links are rewritten through the old-to-new id map, with
    /// the copied roots attaching to the destination. Returns the new
    /// top-level copies. Ids the user does not own are skipped.
    pub async fn copy_directories(
        &self,
        ctx: &RequestContext,
        req: CopyRequest,
    ) -> AppResult<Vec<Directory>> {
        if !self.gate.matches_id(&req.access_key, req.destination) {
            return Err(AppError::authorization(
                "Invalid capability for the destination directory",
            ));
        }

        let owned = self.directories.find_owned(ctx.user_id).await?;
        let by_id: HashMap<Uuid, &Directory> = owned.iter().map(|d| (d.id, d)).collect();
        let mut index = TreeIndex::new();
        for record in &owned {
            if let Some(parent_id) = record.parent_id {
                index.add_edge(parent_id, record.id);
            }
        }

        let roots: Vec<Uuid> = req
            .directories
            .iter()
            .copied()
            .filter(|id| by_id.contains_key(id))
            .collect();
        let affected = Self::closed_set(&index, &roots);
        let id_map: HashMap<Uuid, Uuid> = affected
            .iter()
            .map(|old| (*old, Uuid::new_v4()))
            .collect();

        let mut new_directories = Vec::with_capacity(affected.len());
        for old_id in &affected {
            let Some(old) = by_id.get(old_id) else {
                continue;
            };
            let Some(new_id) = id_map.get(old_id).copied() else {
                continue;
            };
            // Roots of the copy attach to the destination; everything
            // deeper follows its (copied) parent.
            let parent_id = old
                .parent_id
                .and_then(|p| id_map.get(&p).copied())
                .unwrap_or(req.destination);
            new_directories.push(NewDirectory {
                id: new_id,
                name: old.name.clone(),
                owner_id: ctx.user_id,
                parent_id: Some(parent_id),
                capability_key: self.codec.issue_directory(new_id)?,
            });
        }

        let old_files = self.files.find_by_parent_ids(&affected).await?;
        let mut new_files = Vec::with_capacity(old_files.len());
        let mut content_copies: Vec<(Uuid, Uuid, Uuid, Uuid)> = Vec::new();
        for old in &old_files {
            let Some(new_parent) = id_map.get(&old.parent_id).copied() else {
                continue;
            };
            let new_id = Uuid::new_v4();
            new_files.push(NewFile {
                id: new_id,
                name: old.name.clone(),
                owner_id: ctx.user_id,
                parent_id: new_parent,
                mime_type: old.mime_type.clone(),
                size_bytes: old.size_bytes,
                capability_key: self.codec.issue_file(new_id, new_parent)?,
            });
            content_copies.push((old.parent_id, old.id, new_parent, new_id));
        }

        self.directories.insert_many(&new_directories).await?;
        self.files.insert_many(&new_files).await?;

        // Folders strictly before file contents.
        for record in &new_directories {
            if let Err(e) = self.content.create_dir(record.id).await {
                warn!(error = %e, directory = %record.id, "Disk folder not created for copy");
            }
        }
        for (from_dir, from_file, to_dir, to_file) in &content_copies {
            if let Err(e) = self
                .content
                .copy_file(*from_dir, *from_file, *to_dir, *to_file)
                .await
            {
                warn!(error = %e, file = %from_file, "Disk content not copied with file record");
            }
        }

        let directory_documents: Vec<SearchDocument> = new_directories
            .iter()
            .map(|r| SearchDocument {
                id: r.id,
                name: Some(r.name.clone()),
                parent_directory: r.parent_id,
                user: Some(ctx.user_id),
                kind: None,
            })
            .collect();
        if let Err(e) = self.search.upsert(DIRECTORY_INDEX, directory_documents).await {
            warn!(error = %e, "Search projection lagging behind directory copy");
        }
        let file_documents: Vec<SearchDocument> = new_files
            .iter()
            .map(|r| SearchDocument {
                id: r.id,
                name: Some(r.name.clone()),
                parent_directory: Some(r.parent_id),
                user: Some(ctx.user_id),
                kind: r.mime_type.clone(),
            })
            .collect();
        if !file_documents.is_empty() {
            if let Err(e) = self.search.upsert(FILE_INDEX, file_documents).await {
                warn!(error = %e, "Search projection lagging behind file copy");
            }
        }

        let new_roots: Vec<Uuid> = roots
            .iter()
            .filter_map(|old| id_map.get(old).copied())
            .collect();
        let created = self
            .directories
            .find_by_ids_owned(&new_roots, ctx.user_id)
            .await?;

        info!(
            user = %ctx.user_id,
            destination = %req.destination,
            directories = new_directories.len(),
            files = new_files.len(),
            "Copied directory subtrees"
        );
        Ok(created)
    }

    /// Copies files from one directory into another.
    ///
    /// Both directories are addressed by token. Files that do not live
    /// in the declared source (or are not the caller's) are skipped.
    /// Copies are fresh entities: new ids, fresh tokens, no restore
    /// history.
    pub async fn copy_files(
        &self,
        ctx: &RequestContext,
        req: CopyFilesRequest,
    ) -> AppResult<Vec<File>> {
        if !self.gate.matches_id(&req.source_access_key, req.source) {
            return Err(AppError::authorization(
                "Invalid capability for the source directory",
            ));
        }
        if !self.gate.matches_id(&req.destination_access_key, req.destination) {
            return Err(AppError::authorization(
                "Invalid capability for the destination directory",
            ));
        }

        let records = self.files.find_by_ids_owned(&req.files, ctx.user_id).await?;
        let mut new_files = Vec::new();
        let mut content_copies: Vec<(Uuid, Uuid)> = Vec::new();
        for old in records.iter().filter(|f| f.parent_id == req.source) {
            let new_id = Uuid::new_v4();
            new_files.push(NewFile {
                id: new_id,
                name: old.name.clone(),
                owner_id: ctx.user_id,
                parent_id: req.destination,
                mime_type: old.mime_type.clone(),
                size_bytes: old.size_bytes,
                capability_key: self.codec.issue_file(new_id, req.destination)?,
            });
            content_copies.push((old.id, new_id));
        }

        self.files.insert_many(&new_files).await?;

        for (old_id, new_id) in &content_copies {
            if let Err(e) = self
                .content
                .copy_file(req.source, *old_id, req.destination, *new_id)
                .await
            {
                warn!(error = %e, file = %old_id, "Disk content not copied with file record");
            }
        }
        let documents: Vec<SearchDocument> = new_files
            .iter()
            .map(|r| SearchDocument {
                id: r.id,
                name: Some(r.name.clone()),
                parent_directory: Some(r.parent_id),
                user: Some(ctx.user_id),
                kind: r.mime_type.clone(),
            })
            .collect();
        if !documents.is_empty() {
            if let Err(e) = self.search.upsert(FILE_INDEX, documents).await {
                warn!(error = %e, "Search projection lagging behind file copy");
            }
        }

        let new_ids: Vec<Uuid> = new_files.iter().map(|f| f.id).collect();
        let created = self.files.find_by_ids_owned(&new_ids, ctx.user_id).await?;

        info!(
            user = %ctx.user_id,
            source = %req.source,
            destination = %req.destination,
            copied = created.len(),
            "Copied files"
        );
        Ok(created)
    }

    /// Restores trashed directories to their recorded previous parents.
    ///
    /// Ownership-checked, not token-checked: restore acts on the
    /// caller's own records. Directories with no restore history and
    /// ids the caller does not own are skipped; calling twice updates
    /// nothing the second time.
    pub async fn restore_directories(
        &self,
        ctx: &RequestContext,
        req: RestoreDirectoriesRequest,
    ) -> AppResult<UpdatedResponse> {
        let records = self
            .directories
            .find_by_ids_owned(&req.directories, ctx.user_id)
            .await?;

        let mut updated = 0u64;
        let mut mirrored: Vec<SearchDocument> = Vec::new();
        for record in &records {
            let Some(previous) = record.previous_parent_id else {
                continue;
            };
            let count = self.directories.restore_previous_parent(record.id).await?;
            if count > 0 {
                mirrored.push(SearchDocument::reparent(record.id, previous));
            }
            updated += count;
        }

        if !mirrored.is_empty() {
            if let Err(e) = self.search.upsert(DIRECTORY_INDEX, mirrored).await {
                warn!(error = %e, "Search projection lagging behind directory restore");
            }
        }

        info!(user = %ctx.user_id, updated, "Restored directories");
        Ok(UpdatedResponse { updated })
    }

    /// Restores trashed files to their recorded previous parents,
    /// reissuing each restored file's token against the restored parent
    /// and moving its disk content back.
    pub async fn restore_files(
        &self,
        ctx: &RequestContext,
        req: RestoreFilesRequest,
    ) -> AppResult<UpdatedResponse> {
        let records = self.files.find_by_ids_owned(&req.files, ctx.user_id).await?;

        let mut updated = 0u64;
        let mut mirrored: Vec<SearchDocument> = Vec::new();
        let mut moved: Vec<(Uuid, Uuid, Uuid)> = Vec::new();
        for record in &records {
            let Some(previous) = record.previous_parent_id else {
                continue;
            };
            let key = self.codec.issue_file(record.id, previous)?;
            let count = self.files.restore_previous_parent(record.id, &key).await?;
            if count > 0 {
                mirrored.push(SearchDocument::reparent(record.id, previous));
                moved.push((record.parent_id, previous, record.id));
            }
            updated += count;
        }

        if !mirrored.is_empty() {
            if let Err(e) = self.search.upsert(FILE_INDEX, mirrored).await {
                warn!(error = %e, "Search projection lagging behind file restore");
            }
        }
        for (from_dir, to_dir, file_id) in &moved {
            if let Err(e) = self.content.rename_file(*from_dir, *to_dir, *file_id).await {
                warn!(error = %e, file = %file_id, "Disk content not moved with restored file");
            }
        }

        info!(user = %ctx.user_id, updated, "Restored files");
        Ok(UpdatedResponse { updated })
    }

    async fn fetch_directory(&self, id: Uuid) -> AppResult<Directory> {
        self.directories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Directory record missing after insert"))
    }

    fn directory_document(directory: &Directory) -> SearchDocument {
        SearchDocument {
            id: directory.id,
            name: Some(directory.name.clone()),
            parent_directory: directory.parent_id,
            user: Some(directory.owner_id),
            kind: None,
        }
    }

    /// Roots plus all their descendants, deduplicated, parents before
    /// their own descendants.
    fn closed_set(index: &TreeIndex, roots: &[Uuid]) -> Vec<Uuid> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in roots.iter().copied().chain(index.enumerate(roots)) {
            if seen.insert(id) {
                out.push(id);
            }
        }
        out
    }
}

impl std::fmt::Debug for NamespaceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceService").finish_non_exhaustive()
    }
}
