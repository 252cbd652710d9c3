//! Website routing helpers - slugs and public plant URLs.
//!
//! Slug generation is a pluggable collaborator ([`Slugger`]); the catalog only
//! fixes the `/plant/` prefix and the fact that the slug is built from the
//! plant's name and id.

use crate::entities::plant;
use sea_orm::ActiveValue;

/// Path prefix of public plant pages
pub const PLANT_URL_PREFIX: &str = "/plant/";

/// Turns a record name and id into a URL-safe path segment.
pub trait Slugger {
    /// Returns the slug for the record with the given id and name.
    fn slug(&self, id: i64, name: &str) -> String;
}

/// Lowercase, dash-separated name followed by the record id (`rose-bush-7`).
///
/// Only ASCII letters and digits are kept; everything else, accented letters
/// included, is treated as a separator and runs of separators collapse into a
/// single dash. A name with nothing alphanumeric in it
/// yields the bare id.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSlugger;

impl Slugger for DefaultSlugger {
    fn slug(&self, id: i64, name: &str) -> String {
        let slug_name = slugify(name);
        if slug_name.is_empty() {
            id.to_string()
        } else {
            format!("{slug_name}-{id}")
        }
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Public URL of a plant, or `None` while the plant has not been saved yet.
pub fn compute_website_url<S>(slugger: &S, plant: &plant::ActiveModel) -> Option<String>
where
    S: Slugger + ?Sized,
{
    let id = match &plant.id {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => *id,
        ActiveValue::NotSet => return None,
    };
    let name = match &plant.name {
        ActiveValue::Set(name) | ActiveValue::Unchanged(name) => name.as_str(),
        ActiveValue::NotSet => "",
    };
    Some(plant_url(slugger, id, name))
}

/// Public URL of a stored plant.
pub fn website_url<S>(slugger: &S, plant: &plant::Model) -> String
where
    S: Slugger + ?Sized,
{
    plant_url(slugger, plant.id, &plant.name)
}

fn plant_url<S>(slugger: &S, id: i64, name: &str) -> String
where
    S: Slugger + ?Sized,
{
    format!("{PLANT_URL_PREFIX}{}", slugger.slug(id, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Set;

    #[test]
    fn test_default_slug() {
        assert_eq!(DefaultSlugger.slug(7, "Rose Bush"), "rose-bush-7");
        assert_eq!(
            DefaultSlugger.slug(3, "  Ficus -- Benjamina! "),
            "ficus-benjamina-3"
        );
        assert_eq!(DefaultSlugger.slug(12, "Aloé Vera"), "alo-vera-12");
        assert!(
            DefaultSlugger
                .slug(4, "Süßer Ölbaum")
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        );
    }

    #[test]
    fn test_slug_without_usable_name_is_the_id() {
        assert_eq!(DefaultSlugger.slug(5, "!!!"), "5");
        assert_eq!(DefaultSlugger.slug(5, ""), "5");
    }

    #[test]
    fn test_unsaved_plant_has_no_url() {
        let plant = plant::ActiveModel {
            name: Set("Rose Bush".to_string()),
            ..Default::default()
        };
        assert!(compute_website_url(&DefaultSlugger, &plant).is_none());
    }

    #[test]
    fn test_saved_plant_url() {
        let plant = plant::ActiveModel {
            id: ActiveValue::Unchanged(7),
            name: ActiveValue::Unchanged("Rose Bush".to_string()),
            ..Default::default()
        };
        assert_eq!(
            compute_website_url(&DefaultSlugger, &plant).as_deref(),
            Some("/plant/rose-bush-7")
        );
    }

    #[test]
    fn test_custom_slugger() {
        struct IdOnly;
        impl Slugger for IdOnly {
            fn slug(&self, id: i64, _name: &str) -> String {
                format!("p{id}")
            }
        }

        let plant = plant::ActiveModel {
            id: Set(9),
            name: Set("Fern".to_string()),
            ..Default::default()
        };
        assert_eq!(
            compute_website_url(&IdOnly, &plant).as_deref(),
            Some("/plant/p9")
        );
    }
}
