//! Detail views - per-mount load state with stale-response discard.
//!
//! A [`DetailView`] is owned by whatever renders it; dropping it is the
//! unmount. Each load is represented by a [`PendingLoad`] that holds only a
//! weak reference to the view and the generation it was issued at. When the
//! response arrives it is applied only if the view still exists and no newer
//! load has been issued since.

use crate::client::{ApiClient, Resource};
use crate::error::SdkError;
use crate::request::RequestState;
use quaerendo_domain::{ClaimWithEvidence, Disclosure, Evidence, Section, SectionState};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::debug;

/// Detail view of a single piece of evidence (`/evidence/:id`)
pub type EvidenceView = DetailView<Evidence>;

/// Detail view of a claim and its evidence (`/claim/:id`)
pub type ClaimView = DetailView<ClaimWithEvidence>;

/// What happened to a completed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result is now the view's state
    Applied,
    /// The response had no body; the view is still pending
    Empty,
    /// A newer load was issued; the result was discarded
    Superseded,
    /// The view was unmounted; the result was discarded
    Unmounted,
}

struct ViewState<T: Resource> {
    id: Option<T::Id>,
    generation: u64,
    request: RequestState<T>,
    disclosure: Disclosure,
}

/// Point-in-time copy of a view's state, for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<I, T> {
    /// Entity the view is showing, if a load was ever requested
    pub id: Option<I>,
    /// Load state of that entity
    pub request: RequestState<T>,
    /// Section expand/collapse state
    pub disclosure: Disclosure,
}

/// A mounted detail view
///
/// Disclosure state starts at its default on mount and survives id changes
/// within the same mount; a fresh mount starts over.
pub struct DetailView<T: Resource> {
    inner: Arc<Mutex<ViewState<T>>>,
}

impl<T: Resource> DetailView<T> {
    /// Mount a fresh view: nothing requested, default disclosure
    pub fn mount() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewState {
                id: None,
                generation: 0,
                request: RequestState::Pending,
                disclosure: Disclosure::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start loading `id`; any load still in flight is superseded
    pub fn request(&self, id: T::Id) -> PendingLoad<T> {
        let mut state = self.lock();
        state.generation += 1;
        state.id = Some(id);
        state.request = RequestState::Pending;
        debug!(%id, generation = state.generation, "Detail load requested");

        PendingLoad {
            view: Arc::downgrade(&self.inner),
            id,
            generation: state.generation,
        }
    }

    /// Request the current id again, if one was ever requested
    ///
    /// This is the only way a failed load is retried.
    pub fn reload(&self) -> Option<PendingLoad<T>> {
        let id = self.lock().id?;
        Some(self.request(id))
    }

    /// Entity currently shown
    pub fn id(&self) -> Option<T::Id> {
        self.lock().id
    }

    /// Whether the current load has not resolved
    pub fn is_pending(&self) -> bool {
        self.lock().request.is_pending()
    }

    /// Current disclosure state
    pub fn disclosure(&self) -> Disclosure {
        self.lock().disclosure
    }

    /// Flip one section; the other is untouched
    pub fn toggle(&self, section: Section) -> SectionState {
        self.lock().disclosure.toggle(section)
    }

    /// Inspect the current load state without cloning it
    pub fn with_request<R>(&self, f: impl FnOnce(&RequestState<T>) -> R) -> R {
        f(&self.lock().request)
    }
}

impl<T: Resource + Clone> DetailView<T> {
    /// Copy out the current state
    pub fn snapshot(&self) -> ViewSnapshot<T::Id, T> {
        let state = self.lock();
        ViewSnapshot {
            id: state.id,
            request: state.request.clone(),
            disclosure: state.disclosure,
        }
    }
}

/// A load that has been issued but not yet completed
#[must_use = "a pending load does nothing until it is completed or run"]
pub struct PendingLoad<T: Resource> {
    view: Weak<Mutex<ViewState<T>>>,
    id: T::Id,
    generation: u64,
}

impl<T: Resource> PendingLoad<T> {
    /// Entity being loaded
    pub fn id(&self) -> T::Id {
        self.id
    }

    /// Apply `result` to the view if this load is still current
    pub fn complete(self, result: Result<T, SdkError>) -> LoadOutcome {
        self.settle(Some(result.into()))
    }

    /// Settle a load whose response carried no body
    ///
    /// The view keeps its `Pending` state; nothing is rendered for the entity.
    pub fn complete_empty(self) -> LoadOutcome {
        self.settle(None)
    }

    fn settle(self, next: Option<RequestState<T>>) -> LoadOutcome {
        let Some(view) = self.view.upgrade() else {
            debug!(id = %self.id, "Discarding response for unmounted view");
            return LoadOutcome::Unmounted;
        };

        let mut state = view.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.generation != self.generation {
            debug!(
                id = %self.id,
                generation = self.generation,
                current = state.generation,
                "Discarding superseded response"
            );
            return LoadOutcome::Superseded;
        }

        match next {
            Some(request) => {
                state.request = request;
                LoadOutcome::Applied
            }
            None => {
                debug!(id = %self.id, "Response had no body; view stays pending");
                LoadOutcome::Empty
            }
        }
    }

    /// Perform the request through `client` and complete this load
    pub async fn run(self, client: &ApiClient) -> LoadOutcome {
        match client.get_optional_json::<T>(&T::api_path(self.id)).await {
            Ok(Some(value)) => self.complete(Ok(value)),
            Ok(None) => self.complete_empty(),
            Err(e) => self.complete(Err(e)),
        }
    }
}
