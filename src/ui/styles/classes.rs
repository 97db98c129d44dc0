// SPDX-License-Identifier: MPL-2.0
//! Class names and owner stylesheets.
//!
//! Toasts carry free-form class names for each part. The surface joins the
//! toaster-wide and per-toast names with a [`ClassJoiner`] and hands the
//! result to the owner's [`Stylesheet`], which may adjust the colors.

use super::ToastColors;
use crate::toast::{ClassNames, ToastRecord};

/// Joins optional class names into one space-separated string.
pub type ClassJoiner = fn(&[Option<&str>]) -> String;

/// Adjusts a toast's colors from its class names.
pub type Stylesheet = dyn Fn(&ClassList, &mut ToastColors);

/// Default joiner: drops missing and empty names.
#[must_use]
pub fn classic(classes: &[Option<&str>]) -> String {
    classes
        .iter()
        .flatten()
        .map(|class| class.trim())
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A styled part of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Toast,
    Title,
    Description,
    CloseButton,
    ActionButton,
    CancelButton,
    Icon,
}

/// Class names applied to every toast of a toaster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToasterClasses {
    pub class_name: Option<String>,
    pub description_class_name: Option<String>,
    pub class_names: ClassNames,
}

/// Joined class names of one toast, per part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    toast: String,
    title: String,
    description: String,
    close_button: String,
    action_button: String,
    cancel_button: String,
    icon: String,
}

impl ClassList {
    #[must_use]
    pub fn build(record: &ToastRecord, defaults: &ToasterClasses, cx: ClassJoiner) -> Self {
        let shared = &defaults.class_names;
        let own = &record.class_names;
        let pair = |a: &Option<String>, b: &Option<String>| cx(&[a.as_deref(), b.as_deref()]);

        Self {
            toast: cx(&[
                defaults.class_name.as_deref(),
                record.class_name.as_deref(),
                shared.toast.as_deref(),
                own.toast.as_deref(),
                Some(record.kind.as_str()),
            ]),
            title: pair(&shared.title, &own.title),
            description: cx(&[
                defaults.description_class_name.as_deref(),
                record.description_class_name.as_deref(),
                shared.description.as_deref(),
                own.description.as_deref(),
            ]),
            close_button: pair(&shared.close_button, &own.close_button),
            action_button: pair(&shared.action_button, &own.action_button),
            cancel_button: pair(&shared.cancel_button, &own.cancel_button),
            icon: pair(&shared.icon, &own.icon),
        }
    }

    #[must_use]
    pub fn get(&self, part: Part) -> &str {
        match part {
            Part::Toast => &self.toast,
            Part::Title => &self.title,
            Part::Description => &self.description,
            Part::CloseButton => &self.close_button,
            Part::ActionButton => &self.action_button,
            Part::CancelButton => &self.cancel_button,
            Part::Icon => &self.icon,
        }
    }

    /// Whether `part` carries the class `name`.
    #[must_use]
    pub fn has(&self, part: Part, name: &str) -> bool {
        self.get(part).split_whitespace().any(|class| class == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ToastId, ToastKind, ToastOptions};

    #[test]
    fn classic_skips_missing_and_blank_names() {
        assert_eq!(classic(&[Some("a"), None, Some(" "), Some("b")]), "a b");
        assert_eq!(classic(&[]), "");
    }

    #[test]
    fn toast_classes_join_shared_own_and_kind() {
        let record = ToastRecord::from_options(
            ToastId::Num(1),
            &ToastOptions::new()
                .kind(ToastKind::Error)
                .class_name("mine")
                .class_names(ClassNames {
                    title: Some("bold".into()),
                    ..ClassNames::default()
                }),
        );
        let defaults = ToasterClasses {
            class_name: Some("app".into()),
            ..ToasterClasses::default()
        };

        let classes = ClassList::build(&record, &defaults, classic);
        assert_eq!(classes.get(Part::Toast), "app mine error");
        assert!(classes.has(Part::Title, "bold"));
        assert!(!classes.has(Part::Toast, "mi"));
        assert_eq!(classes.get(Part::Icon), "");
    }

    #[test]
    fn custom_joiner_is_used() {
        fn upper(classes: &[Option<&str>]) -> String {
            classic(classes).to_uppercase()
        }
        let record = ToastRecord::from_options(ToastId::Num(1), &ToastOptions::new());
        let classes = ClassList::build(&record, &ToasterClasses::default(), upper);
        assert_eq!(classes.get(Part::Toast), "DEFAULT");
    }
}
