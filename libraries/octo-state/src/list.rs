//! User list coordinator
//!
//! Reconciles the paged remote listing with the local cache. Intents are
//! queued and handled one at a time in arrival order; each handler only
//! flips guards and spawns the actual work, so the queue never stalls on
//! the network.
//!
//! Who writes `users`:
//! - the installed search subscription, if there is one
//! - otherwise the standing cache subscription, while search is inactive
//! - fetch completions, which set or extend the list directly

use crate::intent::UserListIntent;
use crate::pending::{PendingWork, Ticket};
use crate::state::UserListState;
use futures_util::StreamExt;
use octo_core::{GitHubUser, NavigationRoute, UserCache, UserId, UserStream, UsersRepository};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Buffered one-shot events per subscriber
const EVENT_CAPACITY: usize = 16;

type QueuedIntent = (UserListIntent, Ticket);

/// Drives the user list screen.
///
/// Must be created inside a Tokio runtime. Dropping it stops the intent
/// queue, the cache subscription and any search subscription; fetches
/// already on the wire run to completion.
pub struct UserListCoordinator {
    inner: Arc<ListInner>,
    intent_loop: JoinHandle<()>,
    cache_watch: JoinHandle<()>,
}

impl UserListCoordinator {
    pub fn new(repository: Arc<dyn UsersRepository>, cache: Arc<dyn UserCache>) -> Self {
        let (intents, intent_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(UserListState::default());
        let (selected, _) = broadcast::channel(EVENT_CAPACITY);
        let (navigation, _) = broadcast::channel(EVENT_CAPACITY);
        let pending = PendingWork::new();

        let inner = Arc::new(ListInner {
            repository,
            cache,
            state,
            intents,
            search: Mutex::new(SearchSlot::default()),
            selected,
            navigation,
            pending,
        });

        let intent_loop = tokio::spawn(Arc::clone(&inner).run(intent_rx));
        let first_snapshot = inner.pending.ticket();
        let cache_watch = tokio::spawn(Arc::clone(&inner).watch_cache(first_snapshot));

        Self {
            inner,
            intent_loop,
            cache_watch,
        }
    }

    /// Queue an intent; it is handled after every intent sent before it
    pub fn send_intent(&self, intent: UserListIntent) {
        self.inner.enqueue(intent);
    }

    /// Snapshot of the current state
    pub fn state(&self) -> UserListState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserListState> {
        self.inner.state.subscribe()
    }

    /// Users picked with `NavigateToDetail`
    pub fn selected_users(&self) -> broadcast::Receiver<GitHubUser> {
        self.inner.selected.subscribe()
    }

    pub fn navigation_events(&self) -> broadcast::Receiver<NavigationRoute> {
        self.inner.navigation.subscribe()
    }

    /// Wait until every queued intent has been handled and its fetch has
    /// finished, and every search subscription has delivered its first
    /// snapshot
    pub async fn wait_until_idle(&self) {
        self.inner.pending.wait_idle().await;
    }
}

impl Drop for UserListCoordinator {
    fn drop(&mut self) {
        self.intent_loop.abort();
        self.cache_watch.abort();
        self.inner.lock_search().cancel();
    }
}

/// The currently installed search subscription
#[derive(Default)]
struct SearchSlot {
    /// Bumped on every install so a cancelled subscription cannot write
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl SearchSlot {
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
    }
}

#[derive(Debug, Clone, Copy)]
enum Spinner {
    Loading,
    Refreshing,
}

impl Spinner {
    fn clear(self, state: &mut UserListState) {
        match self {
            Self::Loading => state.is_loading = false,
            Self::Refreshing => state.is_refreshing = false,
        }
    }
}

struct ListInner {
    repository: Arc<dyn UsersRepository>,
    cache: Arc<dyn UserCache>,
    state: watch::Sender<UserListState>,
    intents: mpsc::UnboundedSender<QueuedIntent>,
    search: Mutex<SearchSlot>,
    selected: broadcast::Sender<GitHubUser>,
    navigation: broadcast::Sender<NavigationRoute>,
    pending: PendingWork,
}

impl ListInner {
    fn enqueue(&self, intent: UserListIntent) {
        let ticket = self.pending.ticket();
        if self.intents.send((intent, ticket)).is_err() {
            warn!("User list intent queue is closed");
        }
    }

    fn lock_search(&self) -> MutexGuard<'_, SearchSlot> {
        self.search.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(self: Arc<Self>, mut intents: mpsc::UnboundedReceiver<QueuedIntent>) {
        while let Some((intent, ticket)) = intents.recv().await {
            debug!(?intent, "Handling user list intent");
            self.handle(intent, ticket);
        }
    }

    fn handle(self: &Arc<Self>, intent: UserListIntent, ticket: Ticket) {
        match intent {
            UserListIntent::LoadUsers => self.load_users(ticket),
            UserListIntent::LoadNextPage => self.load_next_page(ticket),
            UserListIntent::RefreshUsers => self.refresh_users(ticket),
            UserListIntent::SearchUsers(query) => self.search_users(query, ticket),
            UserListIntent::ToggleSearch => self.toggle_search(ticket),
            UserListIntent::ClearSearch => self.clear_search(ticket),
            UserListIntent::NavigateToDetail(user) => self.navigate_to_detail(user),
        }
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    fn load_users(self: &Arc<Self>, ticket: Ticket) {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error_message = None;
            true
        });

        if !started {
            debug!("Already loading, ignoring LoadUsers");
            return;
        }

        tokio::spawn(Arc::clone(self).fetch_first_page(Spinner::Loading, ticket));
    }

    fn refresh_users(self: &Arc<Self>, ticket: Ticket) {
        self.state.send_modify(|state| {
            state.is_refreshing = true;
            state.error_message = None;
        });

        tokio::spawn(Arc::clone(self).fetch_first_page(Spinner::Refreshing, ticket));
    }

    async fn fetch_first_page(self: Arc<Self>, spinner: Spinner, _ticket: Ticket) {
        let page = match self.repository.get_github_users(0).await {
            Ok(page) => page,
            Err(err) => {
                warn!(since = 0, error = %err, "Failed to fetch users");
                self.fail(spinner, err.to_string());
                return;
            }
        };

        if let Err(err) = self.cache.replace_all(&page).await {
            warn!(error = %err, "Failed to replace cached users");
            self.fail(spinner, err.to_string());
            return;
        }

        info!(count = page.len(), "Loaded first page of users");

        let has_more_pages = !page.is_empty();
        self.state.send_modify(|state| {
            state.users = page;
            state.has_more_pages = has_more_pages;
            spinner.clear(state);
        });
    }

    fn load_next_page(self: &Arc<Self>, ticket: Ticket) {
        let mut since = 0;
        let started = self.state.send_if_modified(|state| {
            if state.is_paginating || !state.has_more_pages || state.is_search_active {
                return false;
            }
            since = state.users.last().map_or(0, |user| user.id);
            state.is_paginating = true;
            state.error_message = None;
            true
        });

        if !started {
            debug!("Pagination not possible right now, ignoring LoadNextPage");
            return;
        }

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let _ticket = ticket;
            inner.fetch_next_page(since).await;
        });
    }

    async fn fetch_next_page(&self, since: UserId) {
        let page = match self.repository.get_github_users(since).await {
            Ok(page) => page,
            Err(err) => {
                warn!(since, error = %err, "Failed to fetch next page");
                self.state.send_modify(|state| {
                    state.is_paginating = false;
                    state.error_message = Some(err.to_string());
                });
                return;
            }
        };

        if !page.is_empty() {
            if let Err(err) = self.cache.insert_users(&page).await {
                warn!(since, error = %err, "Failed to cache next page");
                self.state.send_modify(|state| {
                    state.is_paginating = false;
                    state.error_message = Some(err.to_string());
                });
                return;
            }
        }

        debug!(since, count = page.len(), "Fetched next page");

        let has_more_pages = !page.is_empty();
        self.state.send_modify(|state| {
            merge_page(&mut state.users, page);
            state.has_more_pages = has_more_pages;
            state.is_paginating = false;
        });
    }

    fn fail(&self, spinner: Spinner, message: String) {
        self.state.send_modify(|state| {
            spinner.clear(state);
            state.error_message = Some(message);
        });
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    fn search_users(self: &Arc<Self>, query: String, ticket: Ticket) {
        let stream = if query.trim().is_empty() {
            self.cache.observe_all()
        } else {
            self.cache.observe_search(&query)
        };

        debug!(query = %query, "Searching cached users");
        self.state.send_modify(|state| state.search_query = query);
        self.install_search(stream, ticket);
    }

    fn toggle_search(self: &Arc<Self>, ticket: Ticket) {
        let mut deactivated = false;
        self.state.send_modify(|state| {
            state.is_search_active = !state.is_search_active;
            if !state.is_search_active {
                state.search_query.clear();
                deactivated = true;
            }
        });

        if deactivated {
            self.clear_search(ticket);
        }
    }

    fn clear_search(self: &Arc<Self>, ticket: Ticket) {
        self.state.send_modify(|state| {
            state.search_query.clear();
            state.is_search_active = false;
        });
        self.install_search(self.cache.observe_all(), ticket);
    }

    /// Replace the search subscription; the previous one stops writing
    /// before this returns
    fn install_search(self: &Arc<Self>, stream: UserStream, ticket: Ticket) {
        let mut slot = self.lock_search();
        slot.cancel();
        let generation = slot.generation;

        let inner = Arc::clone(self);
        slot.task = Some(tokio::spawn(async move {
            inner.mirror_search(stream, generation, ticket).await;
        }));
    }

    async fn mirror_search(&self, mut stream: UserStream, generation: u64, ticket: Ticket) {
        let mut first_snapshot = Some(ticket);

        while let Some(snapshot) = stream.next().await {
            if !self.apply_search_snapshot(generation, snapshot) {
                break;
            }
            drop(first_snapshot.take());
        }
    }

    /// Returns false once this subscription has been replaced
    fn apply_search_snapshot(
        &self,
        generation: u64,
        snapshot: octo_core::Result<Vec<GitHubUser>>,
    ) -> bool {
        let slot = self.lock_search();
        if slot.generation != generation {
            return false;
        }

        match snapshot {
            Ok(users) => self.state.send_modify(|state| state.users = users),
            Err(err) => {
                warn!(error = %err, "Search subscription failed");
                self.state
                    .send_modify(|state| state.error_message = Some(err.to_string()));
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Cache reconciliation
    // ------------------------------------------------------------------

    async fn watch_cache(self: Arc<Self>, first_snapshot: Ticket) {
        let mut first_snapshot = Some(first_snapshot);
        let mut stream = self.cache.observe_all();

        while let Some(snapshot) = stream.next().await {
            match snapshot {
                Ok(users) if users.is_empty() => {
                    debug!("Cache is empty, bootstrapping from remote");
                    self.enqueue(UserListIntent::LoadUsers);
                }
                Ok(users) => self.mirror_cache(users),
                Err(err) => {
                    warn!(error = %err, "Cache subscription failed");
                    self.state
                        .send_modify(|state| state.error_message = Some(err.to_string()));
                }
            }
            drop(first_snapshot.take());
        }
    }

    fn mirror_cache(&self, users: Vec<GitHubUser>) {
        let slot = self.lock_search();
        if slot.task.is_some() {
            return;
        }

        self.state.send_if_modified(|state| {
            if state.is_search_active || state.users == users {
                return false;
            }
            state.users = users;
            true
        });
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn navigate_to_detail(&self, user: GitHubUser) {
        let route = NavigationRoute::UserDetail { user_id: user.id };
        debug!(user_id = user.id, "Navigating to user detail");

        if self.selected.send(user).is_err() {
            debug!("No listeners for selected users");
        }
        if self.navigation.send(route).is_err() {
            debug!("No listeners for navigation events");
        }
    }
}

/// Append `page` to `users`, replacing any record whose id is already shown
fn merge_page(users: &mut Vec<GitHubUser>, page: Vec<GitHubUser>) {
    let positions: HashMap<UserId, usize> = users
        .iter()
        .enumerate()
        .map(|(index, user)| (user.id, index))
        .collect();

    for user in page {
        match positions.get(&user.id) {
            Some(&index) => users[index] = user,
            None => users.push(user),
        }
    }
}
