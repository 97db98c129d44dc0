// SPDX-License-Identifier: MPL-2.0
//! The toast store: single ingestion and broadcast point for toasts.
//!
//! The store keeps no toast content. It hands out ids, remembers which ids
//! are live, and broadcasts [`ToastEvent`]s to its subscribers in
//! registration order. Events emitted before anyone subscribed are kept in
//! a backlog and replayed to the first subscriber, so toasts fired during
//! startup are not lost.
//!
//! The store is an explicit object: build one at application start and
//! clone the handle wherever toasts are produced.

use super::record::{PromiseState, ToastEvent, ToastId, ToastKind, ToastOptions};
use crate::error::BoxError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener = Arc<dyn Fn(&ToastEvent) + Send + Sync>;

struct Subscriber {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_toast_id: u64,
    next_subscriber_id: u64,
    subscribers: Vec<Subscriber>,
    /// Events emitted while no subscriber was attached.
    backlog: Vec<ToastEvent>,
    /// Ids created and not yet dismissed, oldest first.
    live: Vec<ToastId>,
}

impl Registry {
    fn allocate_id(&mut self) -> ToastId {
        loop {
            self.next_toast_id += 1;
            let candidate = ToastId::Num(self.next_toast_id);
            if !self.live.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Handle to a toast store. Cloning shares the same store.
#[derive(Clone, Default)]
pub struct ToastStore {
    inner: Arc<Mutex<Registry>>,
}

impl fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        f.debug_struct("ToastStore")
            .field("subscribers", &registry.subscribers.len())
            .field("live", &registry.live.len())
            .field("backlog", &registry.backlog.len())
            .finish()
    }
}

impl ToastStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity shared by every clone of this store.
    #[must_use]
    pub fn key(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener for every future event.
    ///
    /// The first subscriber also receives the backlog of events emitted
    /// before any subscriber existed.
    pub fn subscribe(&self, listener: impl Fn(&ToastEvent) + Send + Sync + 'static) -> Unsubscribe {
        let listener: Listener = Arc::new(listener);
        let active = Arc::new(AtomicBool::new(true));

        let (id, backlog) = {
            let mut registry = self.lock();
            registry.next_subscriber_id += 1;
            let id = registry.next_subscriber_id;
            registry.subscribers.push(Subscriber {
                id,
                active: Arc::clone(&active),
                listener: Arc::clone(&listener),
            });
            (id, std::mem::take(&mut registry.backlog))
        };

        if !backlog.is_empty() {
            tracing::trace!(count = backlog.len(), "replaying buffered toast events");
        }
        for event in &backlog {
            listener(event);
        }

        Unsubscribe {
            registry: Arc::downgrade(&self.inner),
            id,
            active,
        }
    }

    fn publish(&self, event: ToastEvent) {
        let listeners: Vec<(Arc<AtomicBool>, Listener)> = {
            let mut registry = self.lock();
            if registry.subscribers.is_empty() {
                tracing::trace!(id = %event.id(), "no subscriber yet, buffering toast event");
                registry.backlog.push(event);
                return;
            }
            registry
                .subscribers
                .iter()
                .map(|s| (Arc::clone(&s.active), Arc::clone(&s.listener)))
                .collect()
        };

        for (active, listener) in listeners {
            if active.load(Ordering::SeqCst) {
                listener(&event);
            }
        }
    }

    /// Creates a toast, or merges into the live toast with the same id.
    pub fn create(&self, mut options: ToastOptions) -> ToastId {
        let id = {
            let mut registry = self.lock();
            let id = match options.id.take() {
                Some(id) => id,
                None => registry.allocate_id(),
            };
            if !registry.live.contains(&id) {
                registry.live.push(id.clone());
            }
            id
        };

        tracing::debug!(%id, kind = ?options.kind, "toast published");
        self.publish(ToastEvent::Upsert {
            id: id.clone(),
            fields: options,
        });
        id
    }

    /// Merges `options` into the toast with `id`.
    ///
    /// An unknown id creates the toast.
    pub fn update(&self, id: impl Into<ToastId>, options: ToastOptions) -> ToastId {
        self.create(options.id(id))
    }

    /// Broadcasts a dismiss marker for `id`. Unknown ids are ignored.
    pub fn dismiss(&self, id: &ToastId) {
        let known = {
            let mut registry = self.lock();
            match registry.live.iter().position(|live| live == id) {
                Some(index) => {
                    registry.live.remove(index);
                    true
                }
                None => false,
            }
        };

        if !known {
            tracing::trace!(%id, "dismiss ignored for unknown toast");
            return;
        }

        tracing::debug!(%id, "toast dismissed");
        self.publish(ToastEvent::Dismiss { id: id.clone() });
    }

    /// Dismisses every live toast.
    pub fn dismiss_all(&self) {
        let ids = std::mem::take(&mut self.lock().live);
        tracing::debug!(count = ids.len(), "dismissing all toasts");
        for id in ids {
            self.publish(ToastEvent::Dismiss { id });
        }
    }

    /// Ids created and not yet dismissed, oldest first.
    #[must_use]
    pub fn live_ids(&self) -> Vec<ToastId> {
        self.lock().live.clone()
    }

    #[must_use]
    pub fn is_live(&self, id: &ToastId) -> bool {
        self.lock().live.contains(id)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn create_kind(&self, kind: ToastKind, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create(options.kind(kind).title(title))
    }

    /// Plain toast without a kind-specific icon.
    pub fn message(&self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Default, title, options)
    }

    pub fn success(&self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Success, title, options)
    }

    pub fn error(&self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Error, title, options)
    }

    pub fn info(&self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Info, title, options)
    }

    pub fn warning(&self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Warning, title, options)
    }

    pub fn loading(&self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Loading, title, options)
    }

    /// Toast whose whole body is rendered by the owner from `key`.
    pub fn custom(&self, key: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create(options.custom(key))
    }

    /// Shows a loading toast backed by `future`.
    ///
    /// The loading toast is created immediately. The returned
    /// [`PromiseToast`] does nothing until it is awaited or spawned; once
    /// `future` settles, the same toast is turned into a success or error
    /// toast. A resolver failure downgrades to an error toast without
    /// description. `finally` runs exactly once after settling.
    pub fn promise<F, T, E>(&self, future: F, handlers: PromiseHandlers<T, E>) -> PromiseToast
    where
        F: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        self.promise_with(move || future, handlers)
    }

    /// Like [`ToastStore::promise`], with the operation started by `factory`.
    ///
    /// `factory` is called right after the loading toast is created, before
    /// this returns. The future it hands back only makes progress once the
    /// returned [`PromiseToast`] is awaited or spawned.
    pub fn promise_with<Fac, F, T, E>(
        &self,
        factory: Fac,
        handlers: PromiseHandlers<T, E>,
    ) -> PromiseToast
    where
        Fac: FnOnce() -> F,
        F: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let PromiseHandlers {
            loading,
            success,
            error,
            description,
            finally,
            options,
        } = handlers;

        let mut initial = options
            .kind(ToastKind::Loading)
            .promise(PromiseState::Pending);
        if let Some(text) = loading {
            initial = initial.title(text);
        }
        let id = self.create(initial);
        let future = factory();

        let store = self.clone();
        let toast_id = id.clone();
        let settle = async move {
            let outcome = future.await;
            store.settle(&toast_id, outcome, success, error, description);
            if let Some(finally) = finally {
                finally();
            }
        };

        PromiseToast {
            id,
            settle: Box::pin(settle),
        }
    }

    fn settle<T, E>(
        &self,
        id: &ToastId,
        outcome: std::result::Result<T, E>,
        success: Option<Resolver<T>>,
        error: Option<Resolver<E>>,
        description: Option<Resolver<T>>,
    ) {
        let resolved: Option<std::result::Result<ToastOptions, BoxError>> = match outcome {
            Ok(value) => success.map(|resolver| {
                let title = resolver.resolve(&value)?;
                let mut fields = ToastOptions::new()
                    .kind(ToastKind::Success)
                    .title(title)
                    .promise(PromiseState::Resolved);
                if let Some(description) = description {
                    fields = fields.description(description.resolve(&value)?);
                }
                Ok(fields)
            }),
            Err(err) => error.map(|resolver| {
                let title = resolver.resolve(&err)?;
                Ok(ToastOptions::new()
                    .kind(ToastKind::Error)
                    .title(title)
                    .promise(PromiseState::Rejected))
            }),
        };

        if !self.is_live(id) {
            tracing::debug!(%id, "promise settled after its toast was dismissed");
            return;
        }

        match resolved {
            Some(Ok(fields)) => {
                self.update(id.clone(), fields);
            }
            Some(Err(failure)) => {
                tracing::warn!(%id, error = %failure, "promise resolver failed");
                self.update(
                    id.clone(),
                    ToastOptions::new()
                        .kind(ToastKind::Error)
                        .title(failure.to_string())
                        .promise(PromiseState::Rejected),
                );
            }
            None => self.dismiss(id),
        }
    }
}

/// Detaches a listener registered with [`ToastStore::subscribe`].
#[must_use = "dropping the handle keeps the listener registered"]
pub struct Unsubscribe {
    registry: Weak<Mutex<Registry>>,
    id: u64,
    active: Arc<AtomicBool>,
}

impl Unsubscribe {
    /// Stops delivery immediately. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.subscribers.retain(|s| s.id != self.id);
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Computes a toast title from a settled value.
pub enum Resolver<T> {
    Text(String),
    With(Box<dyn FnOnce(&T) -> std::result::Result<String, BoxError> + Send>),
}

impl<T> Resolver<T> {
    fn resolve(self, value: &T) -> std::result::Result<String, BoxError> {
        match self {
            Resolver::Text(text) => Ok(text),
            Resolver::With(f) => f(value),
        }
    }
}

/// Titles and hooks used by [`ToastStore::promise`].
pub struct PromiseHandlers<T, E> {
    loading: Option<String>,
    success: Option<Resolver<T>>,
    error: Option<Resolver<E>>,
    description: Option<Resolver<T>>,
    finally: Option<Box<dyn FnOnce() + Send>>,
    options: ToastOptions,
}

impl<T, E> Default for PromiseHandlers<T, E> {
    fn default() -> Self {
        Self {
            loading: None,
            success: None,
            error: None,
            description: None,
            finally: None,
            options: ToastOptions::default(),
        }
    }
}

impl<T, E> PromiseHandlers<T, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn loading(mut self, title: impl Into<String>) -> Self {
        self.loading = Some(title.into());
        self
    }

    #[must_use]
    pub fn success_text(mut self, title: impl Into<String>) -> Self {
        self.success = Some(Resolver::Text(title.into()));
        self
    }

    #[must_use]
    pub fn success(
        mut self,
        f: impl FnOnce(&T) -> std::result::Result<String, BoxError> + Send + 'static,
    ) -> Self {
        self.success = Some(Resolver::With(Box::new(f)));
        self
    }

    #[must_use]
    pub fn error_text(mut self, title: impl Into<String>) -> Self {
        self.error = Some(Resolver::Text(title.into()));
        self
    }

    #[must_use]
    pub fn error(
        mut self,
        f: impl FnOnce(&E) -> std::result::Result<String, BoxError> + Send + 'static,
    ) -> Self {
        self.error = Some(Resolver::With(Box::new(f)));
        self
    }

    /// Description computed from the success value.
    #[must_use]
    pub fn description(
        mut self,
        f: impl FnOnce(&T) -> std::result::Result<String, BoxError> + Send + 'static,
    ) -> Self {
        self.description = Some(Resolver::With(Box::new(f)));
        self
    }

    #[must_use]
    pub fn finally(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.finally = Some(Box::new(f));
        self
    }

    /// Extra options applied to the loading toast.
    #[must_use]
    pub fn options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }
}

/// A loading toast waiting for its operation to settle.
///
/// Nothing settles until the future is driven, either by awaiting
/// [`PromiseToast::into_future`] (e.g. inside an iced `Task`) or by
/// [`PromiseToast::spawn`] on a tokio runtime.
pub struct PromiseToast {
    id: ToastId,
    settle: Pin<Box<dyn Future<Output = ()> + Send>>,
}

impl PromiseToast {
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    pub fn into_future(self) -> impl Future<Output = ()> + Send {
        self.settle
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.settle)
    }
}

impl fmt::Debug for PromiseToast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseToast").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn recorder(store: &ToastStore) -> (Arc<Mutex<Vec<ToastEvent>>>, Unsubscribe) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let handle = store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (events, handle)
    }

    fn kinds_and_titles(events: &[ToastEvent]) -> Vec<(Option<ToastKind>, Option<String>)> {
        events
            .iter()
            .filter_map(|event| match event {
                ToastEvent::Upsert { fields, .. } => Some((fields.kind, fields.title.clone())),
                ToastEvent::Dismiss { .. } => None,
            })
            .collect()
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let store = ToastStore::new();
        let first = store.message("a", ToastOptions::new());
        let second = store.message("b", ToastOptions::new());
        assert_eq!(first, ToastId::Num(1));
        assert_eq!(second, ToastId::Num(2));
    }

    #[test]
    fn generated_ids_skip_caller_supplied_ones() {
        let store = ToastStore::new();
        store.message("pinned", ToastOptions::new().id(1u64));
        let generated = store.message("fresh", ToastOptions::new());
        assert_eq!(generated, ToastId::Num(2));
    }

    #[test]
    fn events_before_first_subscriber_are_replayed() {
        let store = ToastStore::new();
        store.success("early", ToastOptions::new());

        let (events, _handle) = recorder(&store);
        assert_eq!(events.lock().unwrap().len(), 1);

        let (late, _late_handle) = recorder(&store);
        assert!(late.lock().unwrap().is_empty());
    }

    #[test]
    fn every_subscriber_sees_events_in_order() {
        let store = ToastStore::new();
        let (a, _ha) = recorder(&store);
        let (b, _hb) = recorder(&store);

        let id = store.info("one", ToastOptions::new());
        store.update(id.clone(), ToastOptions::new().title("two"));
        store.dismiss(&id);

        for events in [a, b] {
            let events = events.lock().unwrap();
            assert_eq!(events.len(), 3);
            assert!(matches!(events[2], ToastEvent::Dismiss { .. }));
            assert_eq!(kinds_and_titles(&events)[1].1.as_deref(), Some("two"));
        }
    }

    #[test]
    fn unsubscribe_is_idempotent_and_immediate() {
        let store = ToastStore::new();
        let (events, handle) = recorder(&store);

        handle.unsubscribe();
        handle.unsubscribe();
        assert!(!handle.is_active());
        assert_eq!(store.subscriber_count(), 0);

        let (_keeper, _keep) = recorder(&store);
        store.message("after", ToastOptions::new());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn dismissing_unknown_id_twice_broadcasts_nothing() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);

        store.dismiss(&ToastId::from("ghost"));
        store.dismiss(&ToastId::from("ghost"));

        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn dismiss_forgets_the_id() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);
        let id = store.message("bye", ToastOptions::new());

        store.dismiss(&id);
        store.dismiss(&id);

        assert!(!store.is_live(&id));
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn dismiss_all_marks_every_live_id() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);
        store.message("a", ToastOptions::new());
        store.message("b", ToastOptions::new());
        store.dismiss_all();

        let dismissed = events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, ToastEvent::Dismiss { .. }))
            .count();
        assert_eq!(dismissed, 2);
        assert!(store.live_ids().is_empty());
    }

    #[test]
    fn duplicate_create_keeps_one_live_id() {
        let store = ToastStore::new();
        store.message("first", ToastOptions::new().id("same"));
        store.message("second", ToastOptions::new().id("same"));
        assert_eq!(store.live_ids(), vec![ToastId::from("same")]);
    }

    #[test]
    fn convenience_constructors_fix_the_kind() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);
        store.success("s", ToastOptions::new());
        store.error("e", ToastOptions::new());
        store.warning("w", ToastOptions::new());
        store.loading("l", ToastOptions::new());

        let kinds: Vec<_> = kinds_and_titles(&events.lock().unwrap())
            .into_iter()
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(ToastKind::Success),
                Some(ToastKind::Error),
                Some(ToastKind::Warning),
                Some(ToastKind::Loading)
            ]
        );
    }

    #[tokio::test]
    async fn promise_goes_from_loading_to_success() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);
        let finally_count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finally_count);

        let pending = store.promise(
            async { Ok::<u32, String>(7) },
            PromiseHandlers::new()
                .loading("L")
                .success(|_| Ok("S".to_string()))
                .finally(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
        );
        let id = pending.id().clone();
        assert_eq!(finally_count.load(Ordering::SeqCst), 0);
        pending.into_future().await;

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.id() == &id));
        assert_eq!(
            kinds_and_titles(&events),
            vec![
                (Some(ToastKind::Loading), Some("L".to_string())),
                (Some(ToastKind::Success), Some("S".to_string())),
            ]
        );
        assert_eq!(finally_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn promise_rejection_uses_error_resolver() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);

        store
            .promise(
                async { Err::<(), String>("disk full".to_string()) },
                PromiseHandlers::new()
                    .loading("Saving")
                    .error(|err: &String| Ok(format!("Failed: {err}"))),
            )
            .into_future()
            .await;

        let titles = kinds_and_titles(&events.lock().unwrap());
        assert_eq!(
            titles[1],
            (Some(ToastKind::Error), Some("Failed: disk full".to_string()))
        );
    }

    #[tokio::test]
    async fn failing_resolver_falls_back_to_error_without_description() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);
        let finally_count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finally_count);

        store
            .promise(
                async { Ok::<u32, String>(1) },
                PromiseHandlers::new()
                    .loading("L")
                    .success(|_| Err("formatter broke".into()))
                    .description(|_| Ok("never shown".to_string()))
                    .finally(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .into_future()
            .await;

        let events = events.lock().unwrap();
        match &events[1] {
            ToastEvent::Upsert { fields, .. } => {
                assert_eq!(fields.kind, Some(ToastKind::Error));
                assert!(fields.description.is_none());
            }
            other => panic!("expected upsert, got {other:?}"),
        }
        assert_eq!(finally_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn promise_without_resolver_dismisses_loading_toast() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);

        store
            .promise(async { Ok::<(), ()>(()) }, PromiseHandlers::new().loading("L"))
            .into_future()
            .await;

        let events = events.lock().unwrap();
        assert!(matches!(events.last(), Some(ToastEvent::Dismiss { .. })));
    }

    #[tokio::test]
    async fn factory_starts_with_the_loading_toast() {
        let store = ToastStore::new();
        let (events, _handle) = recorder(&store);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let watcher = store.clone();

        let pending = store.promise_with(
            move || {
                seen.fetch_add(1, Ordering::SeqCst);
                let loading_shown = watcher.live_ids().len();
                async move { Ok::<usize, ()>(loading_shown) }
            },
            PromiseHandlers::new().success(|shown: &usize| Ok(format!("{shown} live"))),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(events.lock().unwrap().len(), 1);

        pending.spawn().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let events = events.lock().unwrap();
        let Some(ToastEvent::Upsert { fields, .. }) = events.last() else {
            panic!("expected the settled toast");
        };
        assert_eq!(fields.title.as_deref(), Some("1 live"));
    }
}
