// SPDX-License-Identifier: MPL-2.0
//! Demo application: a small form that fires every kind of toast.
//!
//! The `App` owns the [`ToastStore`] producers write to and the
//! [`Toaster`] surface that renders it, and shows how a host wires the
//! surface into its own update loop, view and subscriptions.

mod message;

pub use message::{Flags, Message};

use crate::config::{self, paths};
use crate::toast::toaster::{self, Effect};
use crate::toast::{
    Action, ClassNames, Position, PromiseHandlers, ToastDuration, ToastKind, ToastOptions,
    ToastRecord, ToastStore, Toaster,
};
use crate::ui;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles::{ClassList, Part, ToastColors};
use crate::ui::theming::ThemeTracker;
use iced::widget::{
    button, checkbox, column, container, operation, pick_list, row, text, text_input, Id, Stack,
};
use iced::{window, Element, Length, Subscription, Task, Theme};
use std::cell::RefCell;
use std::fmt;
use std::time::{Duration, Instant};

const TITLE_INPUT: &str = "toast-title";

pub const WINDOW_DEFAULT_WIDTH: f32 = 900.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 640.0;

pub struct App {
    store: ToastStore,
    toaster: Toaster,
    title: String,
    description: String,
    rich_colors: bool,
    close_button: bool,
    position: Position,
    promises: u32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("toasts", &self.toaster.toasts().len())
            .field("position", &self.position)
            .finish()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced requires an `Fn` boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || App::new(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window::Settings {
            size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.config_dir);
        let (mut config, config_warning) = config::load();
        if let Some(position) = flags.position {
            config.layout.position = position;
        }
        if let Some(theme) = flags.theme {
            config.appearance.theme = theme;
        }

        let store = ToastStore::new();
        if let Some(warning) = config_warning {
            // Buffered until the surface subscribes.
            store.warning(warning, ToastOptions::new().duration(ToastDuration::Infinite));
        }

        let mut toaster = Toaster::with_theme(
            store.clone(),
            config.clone(),
            ThemeTracker::new(config.appearance.theme),
        );
        toaster.remember_focus(Id::new(TITLE_INPUT));

        let app = Self {
            store,
            toaster,
            title: "Event has been created".to_string(),
            description: String::new(),
            rich_colors: config.appearance.rich_colors,
            close_button: config.appearance.close_button,
            position: config.layout.position,
            promises: 0,
        };
        (app, operation::focus(Id::new(TITLE_INPUT)))
    }

    fn title(&self) -> String {
        format!("Iced Toaster ({})", self.toaster.label())
    }

    fn theme(&self) -> Theme {
        self.toaster.theme().resolved().iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        ui::subscription(&self.toaster).map(Message::Toaster)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Toaster(message) => {
                let now = match &message {
                    toaster::Message::Tick(at) => *at,
                    _ => Instant::now(),
                };
                let effects = self.toaster.update(message, now);
                return Task::batch(effects.into_iter().map(|effect| match effect {
                    Effect::RestoreFocus(id) => operation::focus(id),
                }));
            }
            Message::TitleChanged(title) => self.title = title,
            Message::DescriptionChanged(description) => self.description = description,
            Message::RichColorsToggled(enabled) => self.rich_colors = enabled,
            Message::CloseButtonToggled(enabled) => self.close_button = enabled,
            Message::PositionSelected(position) => self.position = position,
            Message::Show(kind) => self.show(kind),
            Message::Submit => self.show(ToastKind::Default),
            Message::ShowAction => {
                let store = self.store.clone();
                self.store.create(
                    self.options()
                        .kind(ToastKind::Action)
                        .title(self.title.clone())
                        .action(Action::new("Undo").on_click(move |event| {
                            tracing::info!(id = %event.toast_id, "undo clicked");
                            store.success("Change reverted", ToastOptions::new());
                        }))
                        .cancel(Action::new("Keep")),
                );
            }
            Message::ShowPromise { fail } => {
                self.promises += 1;
                let attempt = self.promises;
                let promise = self.store.promise(
                    async move {
                        tokio::time::sleep(Duration::from_secs(2)).await;
                        if fail {
                            Err(format!("upload #{attempt} timed out"))
                        } else {
                            Ok(attempt)
                        }
                    },
                    PromiseHandlers::new()
                        .loading("Uploading…")
                        .success(|n: &u32| Ok(format!("Upload #{n} finished")))
                        .error(|err: &String| Ok(format!("Upload failed: {err}")))
                        .finally(|| tracing::debug!("upload settled"))
                        .options(self.options()),
                );
                return Task::perform(promise.into_future(), |()| Message::PromiseSettled);
            }
            Message::PromiseSettled => {}
            Message::ShowCustom => {
                self.store.custom(
                    "undo-banner",
                    ToastOptions::new()
                        .position(self.position)
                        .duration(ToastDuration::millis(8000)),
                );
            }
            Message::DismissAll => self.store.dismiss_all(),
        }
        Task::none()
    }

    fn options(&self) -> ToastOptions {
        let mut options = ToastOptions::new()
            .position(self.position)
            .rich_colors(self.rich_colors)
            .close_button(self.close_button)
            .on_dismiss(|record| tracing::info!(id = %record.id, "toast dismissed"))
            .on_auto_close(|record| tracing::info!(id = %record.id, "toast closed itself"));
        if !self.description.trim().is_empty() {
            options = options.description(self.description.clone());
        }
        options
    }

    fn show(&mut self, kind: ToastKind) {
        let title = self.title.clone();
        let options = self.options();
        match kind {
            ToastKind::Success => self.store.success(title, options),
            ToastKind::Info => self.store.info(title, options),
            ToastKind::Warning => self.store.warning(title, options),
            ToastKind::Error => self.store.error(
                title,
                options.class_names(ClassNames {
                    toast: Some("urgent".into()),
                    ..ClassNames::default()
                }),
            ),
            ToastKind::Loading => self.store.loading(title, options),
            ToastKind::Default | ToastKind::Normal | ToastKind::Action => {
                self.store.message(title, options)
            }
        };
    }

    fn view(&self) -> Element<'_, Message> {
        let kinds = [
            ("Default", ToastKind::Default),
            ("Success", ToastKind::Success),
            ("Info", ToastKind::Info),
            ("Warning", ToastKind::Warning),
            ("Error", ToastKind::Error),
            ("Loading", ToastKind::Loading),
        ];
        let kind_buttons = kinds
            .into_iter()
            .fold(row![].spacing(spacing::XS), |row, (label, kind)| {
                row.push(button(text(label)).on_press(Message::Show(kind)))
            });

        let extra_buttons = row![
            button(text("Action")).on_press(Message::ShowAction),
            button(text("Promise")).on_press(Message::ShowPromise { fail: false }),
            button(text("Failing promise")).on_press(Message::ShowPromise { fail: true }),
            button(text("Custom")).on_press(Message::ShowCustom),
            button(text("Dismiss all")).on_press(Message::DismissAll),
        ]
        .spacing(spacing::XS);

        let form = column![
            text("Toasts").size(typography::TITLE * 2.0),
            text_input("Title", &self.title)
                .id(Id::new(TITLE_INPUT))
                .on_input(Message::TitleChanged)
                .on_submit(Message::Submit),
            text_input("Description (optional)", &self.description)
                .on_input(Message::DescriptionChanged),
            row![
                pick_list(Position::ALL, Some(self.position), Message::PositionSelected),
                checkbox(self.rich_colors)
                    .label("Rich colors")
                    .on_toggle(Message::RichColorsToggled),
                checkbox(self.close_button)
                    .label("Close button")
                    .on_toggle(Message::CloseButtonToggled),
            ]
            .spacing(spacing::MD)
            .align_y(iced::alignment::Vertical::Center),
            kind_buttons,
            extra_buttons,
            text(format!(
                "Hover the stack or press {} to expand it, Escape to collapse.",
                self.toaster.config().hotkey().label()
            ))
            .size(typography::CAPTION),
        ]
        .spacing(spacing::MD)
        .max_width(640.0);

        let content = container(form)
            .padding(spacing::LG)
            .width(Length::Fill)
            .height(Length::Fill);

        let layer = ui::toaster(&self.toaster)
            .class_name("demo")
            .stylesheet(&urgent_border)
            .custom(&undo_banner)
            .view()
            .map(Message::Toaster);

        Stack::new().push(content).push(layer).into()
    }
}

/// Stylesheet of the demo: `urgent` toasts get a red border.
fn urgent_border(classes: &ClassList, colors: &mut ToastColors) {
    if classes.has(Part::Toast, "urgent") {
        colors.border = palette::ERROR_500;
    }
}

fn undo_banner<'a>(record: &ToastRecord, key: &str) -> Element<'a, toaster::Message> {
    let close = toaster::Message::Toast {
        id: record.id.clone(),
        input: crate::toast::ToastInput::Close,
    };
    container(
        row![
            text(format!("Custom toast `{key}`")).width(Length::Fill),
            button(text("Close")).on_press(close),
        ]
        .spacing(spacing::SM)
        .align_y(iced::alignment::Vertical::Center),
    )
    .padding(spacing::MD)
    .style(container::rounded_box)
    .into()
}
