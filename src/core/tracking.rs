//! Field change tracking.
//!
//! Records that want their changes logged implement [`Trackable`]: they list the
//! fields worth tracking and may override how a change is classified (subtype)
//! and whether it triggers a templated notification. Update paths call
//! [`collect_init_values`] with the before/after records, ask the record for its
//! subtype and templates, and store the outcome with [`record_tracking_message`].

use crate::{
    entities::{TrackingMessage, tracking_message},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Subtype used when a record does not pick a more specific one
pub const DEFAULT_SUBTYPE: &str = "mail.mt_note";

/// A tracked field value
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedValue {
    /// Text value
    Text(String),
    /// Floating point value
    Float(f64),
    /// Integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// Unset value
    Empty,
}

impl fmt::Display for TrackedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Float(value) => write!(f, "{value:.2}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Empty => f.write_str("-"),
        }
    }
}

/// When a tracked field shows up in a tracking message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackVisibility {
    /// Displayed in every message, changed or not
    Always,
    /// Displayed only when the field itself changed
    OnChange,
}

/// Old values of the tracked fields that changed, keyed by field name
pub type InitValues = BTreeMap<&'static str, TrackedValue>;

/// Changed tracked fields per record id
pub type Tracking = BTreeMap<i64, BTreeSet<&'static str>>;

/// How a templated notification is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionMode {
    /// Posted on the record as a comment
    Comment,
    /// Sent as an individual mailing to each recipient
    MassMail,
}

impl CompositionMode {
    /// Identifier stored alongside tracking messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::MassMail => "mass_mail",
        }
    }
}

/// Notification template selected for a field change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateRef {
    /// Template identifier
    pub template: &'static str,
    /// Delivery mode
    pub composition_mode: CompositionMode,
}

/// Templates to render, keyed by the field whose change triggered them
pub type TemplateMapping = BTreeMap<&'static str, TemplateRef>;

/// A record whose field changes are tracked.
pub trait Trackable {
    /// Tracked fields and their visibility.
    fn tracked_fields() -> &'static [(&'static str, TrackVisibility)]
    where
        Self: Sized;

    /// Current value of a tracked field, `None` for unknown fields.
    fn tracked_value(&self, field: &str) -> Option<TrackedValue>;

    /// Subtype for a change whose old values are `init_values`.
    ///
    /// `None` means the generic [`DEFAULT_SUBTYPE`].
    fn track_subtype(&self, _init_values: &InitValues) -> Option<&'static str> {
        None
    }

    /// Templates to send for a batch of changed records.
    fn track_template(_records: &[Self], _tracking: &Tracking) -> TemplateMapping
    where
        Self: Sized,
    {
        TemplateMapping::new()
    }
}

/// Old values of the tracked fields that differ between `old` and `new`.
pub fn collect_init_values<T: Trackable>(old: &T, new: &T) -> InitValues {
    T::tracked_fields()
        .iter()
        .filter_map(|(field, _)| {
            let before = old.tracked_value(field)?;
            let after = new.tracked_value(field)?;
            (before != after).then_some((*field, before))
        })
        .collect()
}

/// Renders the body of a tracking message, one `field: old -> new` line per change.
///
/// Fields tracked with [`TrackVisibility::Always`] that did not change are listed
/// with their current value so the message always identifies the record.
pub fn render_tracking_body<T: Trackable>(new: &T, init_values: &InitValues) -> String {
    T::tracked_fields()
        .iter()
        .filter_map(|(field, visibility)| {
            let current = new.tracked_value(field)?;
            match (init_values.get(field), visibility) {
                (Some(before), _) => Some(format!("{field}: {before} -> {current}")),
                (None, TrackVisibility::Always) => Some(format!("{field}: {current}")),
                (None, TrackVisibility::OnChange) => None,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stores a tracking message for a plant.
pub async fn record_tracking_message<C>(
    db: &C,
    plant_id: i64,
    subtype: &str,
    template: Option<TemplateRef>,
    body: String,
    author_id: Option<i64>,
) -> Result<tracking_message::Model>
where
    C: ConnectionTrait,
{
    let message = tracking_message::ActiveModel {
        plant_id: Set(plant_id),
        subtype: Set(subtype.to_string()),
        template: Set(template.map(|t| t.template.to_string())),
        composition_mode: Set(template.map(|t| t.composition_mode.as_str().to_string())),
        body: Set(body),
        author_id: Set(author_id),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    message.insert(db).await.map_err(Into::into)
}

/// Retrieves the tracking messages of a plant, newest first.
pub async fn get_tracking_messages(
    db: &DatabaseConnection,
    plant_id: i64,
) -> Result<Vec<tracking_message::Model>> {
    TrackingMessage::find()
        .filter(tracking_message::Column::PlantId.eq(plant_id))
        .order_by_desc(tracking_message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Note {
        title: String,
        pinned: bool,
    }

    impl Trackable for Note {
        fn tracked_fields() -> &'static [(&'static str, TrackVisibility)] {
            &[
                ("title", TrackVisibility::Always),
                ("pinned", TrackVisibility::OnChange),
            ]
        }

        fn tracked_value(&self, field: &str) -> Option<TrackedValue> {
            match field {
                "title" => Some(TrackedValue::Text(self.title.clone())),
                "pinned" => Some(TrackedValue::Boolean(self.pinned)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_collect_init_values_keeps_only_changes() {
        let old = Note {
            title: "Watering".to_string(),
            pinned: false,
        };
        let new = Note {
            pinned: true,
            ..old.clone()
        };

        let init = collect_init_values(&old, &new);
        assert_eq!(init.len(), 1);
        assert_eq!(init.get("pinned"), Some(&TrackedValue::Boolean(false)));
    }

    #[test]
    fn test_defaults_pick_generic_subtype_and_no_template() {
        let note = Note {
            title: "Watering".to_string(),
            pinned: true,
        };
        let init = InitValues::from([("pinned", TrackedValue::Boolean(false))]);
        assert!(note.track_subtype(&init).is_none());

        let tracking = Tracking::from([(1, BTreeSet::from(["pinned"]))]);
        assert!(Note::track_template(&[note], &tracking).is_empty());
    }

    #[test]
    fn test_render_body_lists_always_fields() {
        let old = Note {
            title: "Watering".to_string(),
            pinned: false,
        };
        let new = Note {
            pinned: true,
            ..old.clone()
        };
        let init = collect_init_values(&old, &new);

        assert_eq!(
            render_tracking_body(&new, &init),
            "title: Watering\npinned: false -> true"
        );
    }

    #[test]
    fn test_unchanged_record_has_no_init_values() {
        let note = Note {
            title: "Repot".to_string(),
            pinned: false,
        };
        assert!(collect_init_values(&note, &note.clone()).is_empty());
    }

    #[test]
    fn test_composition_mode_identifiers() {
        assert_eq!(CompositionMode::Comment.as_str(), "comment");
        assert_eq!(CompositionMode::MassMail.as_str(), "mass_mail");
    }
}
