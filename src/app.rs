//! Application controller: owns the client state and turns user actions
//! into backend requests

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::api::types::{TransferKind, TransferRequest, UploadFile};
use crate::api::StorageApi;
use crate::dialog::Form;
use crate::error::ApiError;
use crate::events::{Event, FormInput};
use crate::notify::Notifier;
use crate::state::listing::entries_from_listing;
use crate::state::{ClientState, EntryKind, Navigation, SelectedItem};
use crate::validation::{map_create_bucket_error, validate_bucket_name};
use crate::view::{self, View};

pub const DELETE_ITEMS_PROMPT: &str = "Are you sure you want to delete the selected items?";
const NO_BUCKET: &str = "Please select a bucket first";

/// Blocking yes/no prompt shown before destructive actions
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Requests issued by one bulk action.
///
/// The requests run independently and are not awaited by the action that
/// issued them; awaiting the batch is optional.
#[must_use = "dropping a Batch does not cancel its requests"]
pub struct Batch {
    label: &'static str,
    requests: Vec<JoinHandle<bool>>,
    refresh: Option<JoinHandle<()>>,
}

/// Outcome counts of a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Wait for every request (and the trailing refresh, if any)
    pub async fn wait(self) -> BatchReport {
        let total = self.requests.len();
        let succeeded = join_all(self.requests)
            .await
            .into_iter()
            .filter(|outcome| matches!(outcome, Ok(true)))
            .count();

        if let Some(refresh) = self.refresh {
            if let Err(e) = refresh.await {
                tracing::error!("Refresh task failed: {}", e);
            }
        }

        tracing::info!("{}: {} of {} succeeded", self.label, succeeded, total);
        BatchReport {
            succeeded,
            failed: total - succeeded,
        }
    }
}

/// The file-manager controller.
///
/// Cheap to clone: clones share state, backend and notifier. Spawned
/// requests hold a clone, so every method must be called from within a
/// `tokio::task::LocalSet`.
pub struct App<A> {
    api: Rc<A>,
    state: Rc<RefCell<ClientState>>,
    notifier: Notifier,
    confirm: Rc<dyn Confirm>,
}

impl<A> Clone for App<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            notifier: self.notifier.clone(),
            confirm: self.confirm.clone(),
        }
    }
}

impl<A: StorageApi + 'static> App<A> {
    pub fn new(api: A, notifier: Notifier, confirm: Rc<dyn Confirm>) -> Self {
        Self {
            api: Rc::new(api),
            state: Rc::new(RefCell::new(ClientState::default())),
            notifier,
            confirm,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn navigation(&self) -> Navigation {
        self.state.borrow().navigation.clone()
    }

    pub fn buckets(&self) -> Vec<String> {
        self.state.borrow().buckets.clone()
    }

    /// Selected keys in key order
    pub fn selected(&self) -> Vec<String> {
        self.state
            .borrow()
            .selection
            .snapshot()
            .into_iter()
            .map(|item| item.path)
            .collect()
    }

    pub fn dialog(&self) -> Option<Form> {
        self.state.borrow().modal.form().cloned()
    }

    /// Render the current state
    pub fn view(&self) -> View {
        view::render(&self.state.borrow(), self.notifier.banners())
    }

    /// Status check and bucket list, run together at startup
    pub async fn startup(&self) {
        tokio::join!(self.check_status(), self.load_buckets());
    }

    pub async fn check_status(&self) {
        match self.api.status().await {
            Ok(status) if status.is_configured() => {
                tracing::info!(
                    "Storage backend configured (region: {})",
                    status.region.as_deref().unwrap_or("unknown")
                );
            }
            Ok(status) => {
                tracing::debug!("Storage status: {:?}", status);
                self.notifier.error(status.warning());
            }
            Err(e) => {
                tracing::error!("Status check error: {}", e);
                self.notifier
                    .error(format!("Unable to check storage status: {}", e));
            }
        }
    }

    pub async fn load_buckets(&self) {
        match self.api.list_buckets().await {
            Ok(buckets) => {
                tracing::info!("Loaded {} buckets", buckets.len());
                self.state.borrow_mut().buckets = buckets;
            }
            Err(ApiError::Rejected(Some(error))) => {
                self.state.borrow_mut().buckets.clear();
                self.notifier.error(error);
            }
            Err(e) => {
                tracing::error!("Failed to list buckets: {}", e);
                self.notifier.error("Failed to load buckets");
            }
        }
    }

    /// Open a bucket at its root
    pub async fn select_bucket(&self, bucket: &str) {
        tracing::info!("Bucket selected: {}", bucket);
        {
            let mut state = self.state.borrow_mut();
            state.navigation.enter_bucket(bucket);
            state.selection.clear();
        }
        self.refresh().await;
    }

    /// Move to `prefix` within the current bucket
    pub async fn navigate(&self, prefix: &str) {
        {
            let mut state = self.state.borrow_mut();
            if state.navigation.bucket().is_none() {
                return;
            }
            tracing::info!("Navigating from '{}' to '{}'", state.navigation.prefix(), prefix);
            state.navigation.set_prefix(prefix);
            state.selection.clear();
        }
        self.refresh().await;
    }

    /// Go up one level
    pub async fn ascend(&self) {
        let parent = self.state.borrow().navigation.parent_prefix();
        self.navigate(&parent).await;
    }

    /// Breadcrumb click; index 0 is the bucket root
    pub async fn open_crumb(&self, index: usize) {
        let target = self
            .state
            .borrow()
            .navigation
            .breadcrumbs()
            .into_iter()
            .nth(index)
            .map(|crumb| crumb.target);

        match target {
            Some(prefix) => self.navigate(&prefix).await,
            None => tracing::debug!("No breadcrumb at index {}", index),
        }
    }

    /// Double-activation of an entry: folders are entered, files ignored
    pub async fn activate(&self, key: &str) {
        let kind = self.state.borrow().entry(key).map(|e| e.kind);
        match kind {
            Some(EntryKind::Folder) => self.navigate(key).await,
            Some(EntryKind::File) => tracing::debug!("Activated file: {}", key),
            None => tracing::debug!("Activated unknown entry: {}", key),
        }
    }

    /// Re-list the current location.
    ///
    /// On failure the previous entries stay on screen. A reply for a location
    /// the user has already left is dropped.
    pub async fn refresh(&self) {
        let (bucket, prefix) = {
            let state = self.state.borrow();
            match state.navigation.bucket() {
                Some(bucket) => (bucket.to_string(), state.navigation.prefix().to_string()),
                None => return,
            }
        };

        match self.api.list_objects(&bucket, &prefix).await {
            Ok(listing) => {
                let mut guard = self.state.borrow_mut();
                let state = &mut *guard;
                if !state.navigation.is_at(&bucket, &prefix) {
                    tracing::debug!("Discarding stale listing for {}/{}", bucket, prefix);
                    return;
                }

                state.entries = entries_from_listing(&prefix, &listing);
                let entries = &state.entries;
                state
                    .selection
                    .retain(|key| entries.iter().any(|e| e.key == key));

                tracing::info!("{} items in {}/{}", state.entries.len(), bucket, prefix);
            }
            Err(e) => {
                tracing::error!("Failed to list objects: {}", e);
                self.notifier.error(e.user_message("Failed to load contents"));
            }
        }
    }

    /// Select an entry of the current listing; `additive` toggles it instead
    pub fn select(&self, key: &str, additive: bool) {
        let mut state = self.state.borrow_mut();
        let Some(kind) = state.entry(key).map(|e| e.kind) else {
            tracing::debug!("Ignoring selection of unlisted key: {}", key);
            return;
        };

        state.selection.select(key, kind, additive);
        tracing::debug!("Selection: {} items", state.selection.len());
    }

    pub fn open_new_folder_dialog(&self) {
        let mut state = self.state.borrow_mut();
        if state.navigation.bucket().is_none() {
            self.notifier.error(NO_BUCKET);
            return;
        }
        state.modal.open(Form::NewFolder);
    }

    pub fn open_new_bucket_dialog(&self) {
        self.state.borrow_mut().modal.open(Form::NewBucket);
    }

    pub fn open_delete_bucket_dialog(&self) {
        self.state.borrow_mut().modal.open(Form::DeleteBucket);
    }

    /// Destination dialog for copy/move, pre-filled with the current location.
    /// Nothing happens while the selection is empty.
    pub fn open_transfer_dialog(&self, kind: TransferKind) {
        let mut state = self.state.borrow_mut();
        if state.selection.is_empty() {
            return;
        }

        let form = Form::Transfer {
            kind,
            dest_bucket: state.navigation.bucket().unwrap_or_default().to_string(),
            dest_path: state.navigation.prefix().to_string(),
        };
        state.modal.open(form);
    }

    pub fn close_dialog(&self) {
        self.state.borrow_mut().modal.close();
    }

    /// Copy or move every selected item to `dest_bucket`/`dest_path`.
    ///
    /// One request per item, each reported on its own. The dialog closes and
    /// the listing refreshes right after the requests are issued.
    pub fn transfer(&self, kind: TransferKind, dest_bucket: &str, dest_path: &str) -> Option<Batch> {
        let (src_bucket, items) = self.selection_context()?;
        let navigation = self.navigation();

        tracing::info!(
            "{} {} item(s) to {}/{}",
            kind.endpoint(),
            items.len(),
            dest_bucket,
            dest_path
        );

        let requests = items
            .into_iter()
            .map(|item| {
                let relative = navigation.relative_key(&item.path);
                let request = TransferRequest {
                    src_bucket: src_bucket.clone(),
                    src_key: item.path.clone(),
                    dest_bucket: dest_bucket.to_string(),
                    dest_key: format!("{}{}", dest_path, relative),
                };

                let app = self.clone();
                tokio::task::spawn_local(async move {
                    match app.api.transfer(kind, &request).await {
                        Ok(message) => {
                            app.notifier.success(message);
                            true
                        }
                        Err(e) => {
                            tracing::error!("{} {} failed: {}", kind.endpoint(), request.src_key, e);
                            app.notifier.error(e.user_message(kind.failure_message()));
                            false
                        }
                    }
                })
            })
            .collect();

        self.close_dialog();
        let app = self.clone();
        let refresh = tokio::task::spawn_local(async move { app.refresh().await });

        Some(Batch {
            label: kind.endpoint(),
            requests,
            refresh: Some(refresh),
        })
    }

    /// Delete every selected item after confirmation.
    ///
    /// Files and folders go to their own endpoints; each success refreshes
    /// the listing. The selection is cleared once the requests are issued.
    pub fn delete_selected(&self) -> Option<Batch> {
        if self.state.borrow().selection.is_empty() {
            return None;
        }
        if !self.confirm.confirm(DELETE_ITEMS_PROMPT) {
            tracing::debug!("Delete cancelled");
            return None;
        }

        let (bucket, items) = self.selection_context()?;
        tracing::info!("Deleting {} item(s) from {}", items.len(), bucket);

        let requests = items
            .into_iter()
            .map(|item| {
                let app = self.clone();
                let bucket = bucket.clone();
                tokio::task::spawn_local(async move {
                    let result = match item.kind {
                        EntryKind::File => app.api.delete_file(&bucket, &item.path).await,
                        EntryKind::Folder => app.api.delete_folder(&bucket, &item.path).await,
                    };

                    match result {
                        Ok(message) => {
                            app.notifier.success(message);
                            app.refresh().await;
                            true
                        }
                        Err(e) => {
                            tracing::error!("Delete {} failed: {}", item.path, e);
                            app.notifier.error(e.user_message("Delete failed"));
                            false
                        }
                    }
                })
            })
            .collect();

        self.state.borrow_mut().selection.clear();

        Some(Batch {
            label: "delete",
            requests,
            refresh: None,
        })
    }

    /// Upload local files into the current folder, one request per file.
    ///
    /// Every successful upload refreshes the listing on its own.
    pub fn upload(&self, files: Vec<UploadFile>) -> Option<Batch> {
        let (bucket, prefix) = {
            let state = self.state.borrow();
            match state.navigation.bucket() {
                Some(bucket) => (bucket.to_string(), state.navigation.prefix().to_string()),
                None => {
                    self.notifier.error(NO_BUCKET);
                    return None;
                }
            }
        };

        let requests = files
            .into_iter()
            .map(|file| {
                let app = self.clone();
                let bucket = bucket.clone();
                let key = format!("{}{}", prefix, file.name);
                tracing::info!("Uploading {} ({} bytes) to {}/{}", file.name, file.data.len(), bucket, key);

                tokio::task::spawn_local(async move {
                    match app.api.upload(&bucket, &key, file).await {
                        Ok(message) => {
                            app.notifier.success(message);
                            app.refresh().await;
                            true
                        }
                        Err(e) => {
                            tracing::error!("Upload {} failed: {}", key, e);
                            app.notifier.error(e.user_message("Upload failed"));
                            false
                        }
                    }
                })
            })
            .collect();

        Some(Batch {
            label: "upload",
            requests,
            refresh: None,
        })
    }

    /// Validate and create a bucket; the dialog closes whatever the outcome
    pub async fn create_bucket(&self, raw_name: &str) {
        let name = match validate_bucket_name(raw_name) {
            Ok(name) => name.to_string(),
            Err(e) => {
                tracing::debug!("Rejected bucket name '{}': {:?}", raw_name, e);
                self.notifier.error(e.to_string());
                self.close_dialog();
                return;
            }
        };

        match self.api.create_bucket(&name).await {
            Ok(message) => {
                self.notifier.success(message);
                self.close_dialog();
                self.load_buckets().await;
            }
            Err(e @ ApiError::Rejected(_)) => {
                let text = map_create_bucket_error(&e.user_message("Create failed"));
                self.notifier.error(text);
                self.close_dialog();
            }
            Err(e) => {
                tracing::error!("Create bucket error: {}", e);
                self.notifier
                    .error("Network error occurred. Please check if the server is running.");
                self.close_dialog();
            }
        }
    }

    /// Delete a bucket by name after an explicit confirmation naming it.
    ///
    /// Deleting the open bucket resets navigation and clears the listing.
    pub async fn delete_bucket(&self, raw_name: &str) {
        let name = raw_name.trim();
        if name.is_empty() {
            self.notifier.error("Bucket name is required");
            self.close_dialog();
            return;
        }

        let prompt = format!(
            "Are you sure you want to delete the bucket \"{}\"? This will permanently delete all contents.",
            name
        );
        if !self.confirm.confirm(&prompt) {
            self.close_dialog();
            return;
        }

        match self.api.delete_bucket(name).await {
            Ok(message) => {
                self.notifier.success(message);
                {
                    let mut state = self.state.borrow_mut();
                    if state.navigation.bucket() == Some(name) {
                        state.navigation.reset();
                        state.entries.clear();
                        state.selection.clear();
                    }
                    state.modal.close();
                }
                self.load_buckets().await;
            }
            Err(e @ ApiError::Rejected(_)) => {
                self.notifier.error(e.user_message("Delete failed"));
                self.close_dialog();
            }
            Err(e) => {
                tracing::error!("Delete bucket error: {}", e);
                self.notifier.error("Network error occurred");
                self.close_dialog();
            }
        }
    }

    /// Create `<current prefix><name>/`. A failure leaves the dialog open.
    pub async fn create_folder(&self, name: &str) {
        if name.is_empty() {
            return;
        }

        let (bucket, folder) = {
            let state = self.state.borrow();
            match state.navigation.bucket() {
                Some(bucket) => (
                    bucket.to_string(),
                    format!("{}{}/", state.navigation.prefix(), name),
                ),
                None => {
                    self.notifier.error(NO_BUCKET);
                    return;
                }
            }
        };

        match self.api.create_folder(&bucket, &folder).await {
            Ok(message) => {
                self.notifier.success(message);
                self.close_dialog();
                self.refresh().await;
            }
            Err(e) => {
                tracing::error!("Create folder {} failed: {}", folder, e);
                self.notifier.error(e.user_message("Create failed"));
            }
        }
    }

    /// Route one user interaction to its action.
    ///
    /// Bulk actions hand back their [`Batch`]; everything else completes
    /// before this returns.
    pub async fn dispatch(&self, event: Event) -> Option<Batch> {
        match event {
            Event::LoadBuckets => self.load_buckets().await,
            Event::BucketClicked(bucket) => self.select_bucket(&bucket).await,
            Event::EntryClicked { key, additive } => self.select(&key, additive),
            Event::EntryActivated(key) => self.activate(&key).await,
            Event::ParentActivated => self.ascend().await,
            Event::CrumbClicked(index) => self.open_crumb(index).await,
            Event::Refresh => self.refresh().await,
            Event::NewFolderRequested => self.open_new_folder_dialog(),
            Event::NewBucketRequested => self.open_new_bucket_dialog(),
            Event::DeleteBucketRequested => self.open_delete_bucket_dialog(),
            Event::TransferRequested(kind) => self.open_transfer_dialog(kind),
            Event::DeleteSelectedRequested => return self.delete_selected(),
            Event::UploadRequested(files) => return self.upload(files),
            Event::Submit(input) => return self.submit(input).await,
            Event::DialogClosed => self.close_dialog(),
            Event::DialogClicked { on_backdrop } => self.state.borrow_mut().modal.click(on_backdrop),
        }
        None
    }

    async fn submit(&self, input: FormInput) -> Option<Batch> {
        let form = self.dialog();
        match (form, input) {
            (Some(Form::NewFolder), FormInput::Name(name)) => self.create_folder(&name).await,
            (Some(Form::NewBucket), FormInput::Name(name)) => self.create_bucket(&name).await,
            (Some(Form::DeleteBucket), FormInput::Name(name)) => self.delete_bucket(&name).await,
            (Some(Form::Transfer { kind, .. }), FormInput::Destination { bucket, path }) => {
                return self.transfer(kind, &bucket, &path);
            }
            (form, input) => {
                tracing::warn!("Input {:?} does not fit dialog {:?}", input, form);
            }
        }
        None
    }

    /// Current bucket and a copy of the selection, if both exist
    fn selection_context(&self) -> Option<(String, Vec<SelectedItem>)> {
        let state = self.state.borrow();
        if state.selection.is_empty() {
            return None;
        }
        let bucket = state.navigation.bucket()?.to_string();
        Some((bucket, state.selection.snapshot()))
    }
}
