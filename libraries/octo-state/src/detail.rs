//! User detail coordinator

use crate::intent::UserDetailIntent;
use crate::pending::{PendingWork, Ticket};
use crate::state::UserDetailState;
use octo_core::{UserCache, UserId};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Shown when the requested id is not cached
pub const USER_NOT_FOUND: &str = "User not found";

/// Looks users up in the cache for the detail screen.
///
/// Lookups run one after another in the order requested. Must be created
/// inside a Tokio runtime.
pub struct UserDetailCoordinator {
    inner: Arc<DetailInner>,
    intents: mpsc::UnboundedSender<(UserDetailIntent, Ticket)>,
    intent_loop: JoinHandle<()>,
}

impl UserDetailCoordinator {
    pub fn new(cache: Arc<dyn UserCache>) -> Self {
        let (intents, intent_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(UserDetailState::default());
        let (back, _) = broadcast::channel(4);

        let inner = Arc::new(DetailInner {
            cache,
            state,
            back,
            pending: PendingWork::new(),
        });
        let intent_loop = tokio::spawn(Arc::clone(&inner).run(intent_rx));

        Self {
            inner,
            intents,
            intent_loop,
        }
    }

    pub fn send_intent(&self, intent: UserDetailIntent) {
        let ticket = self.inner.pending.ticket();
        if self.intents.send((intent, ticket)).is_err() {
            warn!("User detail intent queue is closed");
        }
    }

    pub fn state(&self) -> UserDetailState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserDetailState> {
        self.inner.state.subscribe()
    }

    /// Fires `true` on every `NavigateBack`
    pub fn back_navigation(&self) -> broadcast::Receiver<bool> {
        self.inner.back.subscribe()
    }

    pub async fn wait_until_idle(&self) {
        self.inner.pending.wait_idle().await;
    }
}

impl Drop for UserDetailCoordinator {
    fn drop(&mut self) {
        self.intent_loop.abort();
    }
}

struct DetailInner {
    cache: Arc<dyn UserCache>,
    state: watch::Sender<UserDetailState>,
    back: broadcast::Sender<bool>,
    pending: PendingWork,
}

impl DetailInner {
    async fn run(self: Arc<Self>, mut intents: mpsc::UnboundedReceiver<(UserDetailIntent, Ticket)>) {
        while let Some((intent, _ticket)) = intents.recv().await {
            match intent {
                UserDetailIntent::LoadUser(user_id) => self.load_user(user_id).await,
                UserDetailIntent::NavigateBack => {
                    if self.back.send(true).is_err() {
                        debug!("No listeners for back navigation");
                    }
                }
            }
        }
    }

    async fn load_user(&self, user_id: UserId) {
        self.state.send_modify(|state| state.is_loading = true);

        match self.cache.get_user_by_id(user_id).await {
            Ok(user) => {
                debug!(user_id, found = user.is_some(), "Looked up user");
                let error_message = user.is_none().then(|| USER_NOT_FOUND.to_string());
                self.state.send_modify(|state| {
                    state.user = user;
                    state.is_loading = false;
                    state.error_message = error_message;
                });
            }
            Err(err) => {
                warn!(user_id, error = %err, "Failed to look up user");
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error_message = Some(err.to_string());
                });
            }
        }
    }
}
