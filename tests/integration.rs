// SPDX-License-Identifier: MPL-2.0
//! End-to-end flows through the public API: producers write to a store, a
//! feed delivers the events, and a surface turns them into a stack.

use iced_toaster::config::{self, Config};
use iced_toaster::toast::toaster::{Effect, Message};
use iced_toaster::toast::{
    Action, Position, PromiseHandlers, PromiseState, ToastDuration, ToastEvent, ToastFeed,
    ToastId, ToastInput, ToastKind, ToastList, ToastOptions, ToastStore, Toaster,
};
use iced_toaster::ui::theming::{ResolvedTheme, ThemeMode, ThemeTracker};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

struct Surface {
    feed: ToastFeed,
    toaster: Toaster,
    now: Instant,
}

impl Surface {
    fn connect(store: &ToastStore, config: Config) -> Self {
        let theme = ThemeTracker::with_detector(ThemeMode::Light, || ResolvedTheme::Light);
        Self {
            feed: ToastFeed::connect(store),
            toaster: Toaster::with_theme(store.clone(), config, theme),
            now: Instant::now(),
        }
    }

    /// Applies queued store events, one update per event.
    fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.feed.try_next() {
            self.toaster.update(Message::Store(event), self.now);
            applied += 1;
        }
        applied
    }

    fn measure_all(&mut self, height: f32) {
        let ids: Vec<ToastId> = self.toaster.toasts().iter().rev().map(|t| t.id.clone()).collect();
        for id in ids {
            self.send(Message::Toast {
                id,
                input: ToastInput::Measured(height),
            });
        }
    }

    fn send(&mut self, message: Message) -> Vec<Effect> {
        self.toaster.update(message, self.now)
    }

    fn advance(&mut self, ms: u64) -> Vec<Effect> {
        self.now += Duration::from_millis(ms);
        self.send(Message::Tick(self.now))
    }
}

#[test]
fn toasts_created_before_the_surface_are_replayed() {
    let store = ToastStore::new();
    store.info("early", ToastOptions::new());
    store.success("also early", ToastOptions::new());

    let mut surface = Surface::connect(&store, Config::default());
    assert_eq!(surface.drain(), 2);
    let titles: Vec<_> = surface
        .toaster
        .toasts()
        .iter()
        .filter_map(|t| t.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["also early", "early"]);
}

#[test]
fn every_store_mutation_is_its_own_update() {
    let store = ToastStore::new();
    let mut surface = Surface::connect(&store, Config::default());

    let id = store.loading("working", ToastOptions::new());
    store.update(id.clone(), ToastOptions::new().kind(ToastKind::Success).title("done"));
    assert_eq!(surface.feed.pending(), 2);

    assert_eq!(surface.drain(), 2);
    let record = surface.toaster.record(&id).expect("toast is live");
    assert_eq!(record.kind, ToastKind::Success);
    assert_eq!(record.title.as_deref(), Some("done"));
}

#[test]
fn toast_closes_itself_then_leaves_the_store() {
    let store = ToastStore::new();
    let mut surface = Surface::connect(&store, Config::default());
    let closed = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&closed);

    let id = store.message(
        "bye",
        ToastOptions::new()
            .duration(ToastDuration::millis(500))
            .on_auto_close(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            }),
    );
    surface.drain();
    surface.measure_all(48.0);

    surface.advance(499);
    assert_eq!(closed.load(Ordering::SeqCst), 0);
    surface.advance(1);
    assert_eq!(closed.load(Ordering::SeqCst), 1);

    surface.advance(200);
    assert!(surface.toaster.record(&id).is_none());
    assert!(!store.is_live(&id));
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn groups_follow_per_toast_positions() {
    let store = ToastStore::new();
    let mut surface = Surface::connect(&store, Config::default());

    store.message("default", ToastOptions::new());
    store.message("top", ToastOptions::new().position(Position::TopCenter));
    store.message("default again", ToastOptions::new());
    surface.drain();
    surface.measure_all(50.0);

    assert_eq!(
        surface.toaster.positions(),
        vec![Position::BottomRight, Position::TopCenter]
    );
    let bottom = surface.toaster.stack(Position::BottomRight);
    assert_eq!(bottom.len(), 2);
    assert_eq!(bottom[1].offset, 64.0);
    let top = surface.toaster.stack(Position::TopCenter);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].offset, 0.0);
}

#[test]
fn action_click_runs_handler_and_closes() {
    let store = ToastStore::new();
    let mut surface = Surface::connect(&store, Config::default());
    let clicks = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&clicks);

    let id = store.create(
        ToastOptions::new()
            .title("Event deleted")
            .action(Action::new("Undo").on_click(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })),
    );
    surface.drain();
    surface.measure_all(50.0);

    surface.send(Message::Toast {
        id: id.clone(),
        input: ToastInput::Action,
    });
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    assert!(surface.toaster.lifecycle(&id).is_some_and(|l| l.removed()));
}

#[tokio::test]
async fn promise_turns_loading_into_success() {
    let store = ToastStore::new();
    let mut list = ToastList::new();
    let mut feed = ToastFeed::connect(&store);

    let promise = store.promise(
        async { Ok::<_, String>(3) },
        PromiseHandlers::new()
            .loading("Saving")
            .success(|n: &i32| Ok(format!("Saved {n} files")))
            .error_text("Failed"),
    );
    let id = promise.id().clone();

    let first = feed.next().await.expect("loading toast");
    list.apply(&first);
    assert_eq!(list.get(&id).map(|t| t.kind), Some(ToastKind::Loading));
    assert!(list.get(&id).is_some_and(|t| t.promise_pending()));

    promise.into_future().await;
    let second = feed.next().await.expect("settled toast");
    assert!(matches!(&second, ToastEvent::Upsert { .. }));
    list.apply(&second);

    let record = list.get(&id).expect("still listed");
    assert_eq!(record.kind, ToastKind::Success);
    assert_eq!(record.title.as_deref(), Some("Saved 3 files"));
    assert_eq!(record.promise, Some(PromiseState::Resolved));
}

#[tokio::test]
async fn rejected_promise_becomes_an_error_toast() {
    let store = ToastStore::new();
    let mut list = ToastList::new();
    let mut feed = ToastFeed::connect(&store);
    let settled = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&settled);

    let promise = store.promise(
        async { Err::<(), _>("disk full".to_string()) },
        PromiseHandlers::new()
            .loading("Saving")
            .success_text("Saved")
            .error(|err: &String| Ok(format!("Could not save: {err}")))
            .finally(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }),
    );
    let id = promise.id().clone();
    promise.spawn().await.expect("settle task");

    while let Some(event) = feed.try_next() {
        list.apply(&event);
    }
    let record = list.get(&id).expect("still listed");
    assert_eq!(record.kind, ToastKind::Error);
    assert_eq!(record.title.as_deref(), Some("Could not save: disk full"));
    assert_eq!(settled.load(Ordering::SeqCst), 1);
}

#[test]
fn config_round_trips_through_settings_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut saved = Config::default();
    saved.layout.position = Position::TopLeft;
    saved.layout.visible_toasts = 5;
    saved.appearance.rich_colors = true;
    saved.keyboard.hotkey = "Ctrl+Shift+N".to_string();
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to read config file");
    assert_eq!(loaded, saved);

    let store = ToastStore::new();
    let surface = Surface::connect(&store, loaded);
    assert_eq!(surface.toaster.label(), "Notifications Ctrl+Shift+N");
}
