//! Startup seeding from config.toml.
//!
//! Makes sure the administrator, categories and tags named in the configuration
//! exist. Entries already present are matched by login or name and left alone,
//! so seeding can run on every start.

use crate::{
    config::catalog::Config,
    core::{category, context::RequestContext, tag, user},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

/// What a seeding run created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Categories created by this run
    pub categories_created: usize,
    /// Tags created by this run
    pub tags_created: usize,
}

/// Seeds the catalog and returns a context acting as the configured administrator.
///
/// # Errors
/// Returns an error if a configured entry is invalid or a database operation fails.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<(RequestContext, SeedSummary)> {
    let login = config.admin.login.trim();
    let admin = match user::get_user_by_login(db, login).await? {
        Some(existing) => existing,
        None => {
            info!("Creating administrator {}", login);
            user::create_user(db, config.admin.name.clone(), login.to_string()).await?
        }
    };

    let mut summary = SeedSummary::default();

    for entry in &config.categories {
        if category::get_category_by_name(db, entry.name.trim()).await?.is_some() {
            debug!("Category {} already exists", entry.name);
            continue;
        }
        category::create_category(db, entry.name.clone(), entry.alias.clone()).await?;
        summary.categories_created += 1;
    }

    for entry in &config.tags {
        if tag::get_tag_by_name(db, entry.name.trim()).await?.is_some() {
            debug!("Tag {} already exists", entry.name);
            continue;
        }
        tag::create_tag(db, entry.name.clone(), entry.color).await?;
        summary.tags_created += 1;
    }

    Ok((RequestContext::new(admin.id), summary))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    const CONFIG: &str = r#"
        [admin]
        name = "Nursery Admin"
        login = "admin"

        [[categories]]
        name = "Succulents"
        alias = "succulents"

        [[categories]]
        name = "Trees"

        [[tags]]
        name = "Shade"
        color = 2

        [[tags]]
        name = "Indoor"
    "#;

    #[tokio::test]
    async fn test_seed_catalog_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config: Config = toml::from_str(CONFIG).unwrap();

        let (ctx, summary) = seed_catalog(&db, &config).await?;
        assert_eq!(summary.categories_created, 2);
        assert_eq!(summary.tags_created, 2);

        let admin = user::get_user_by_login(&db, "admin").await?.unwrap();
        assert_eq!(ctx.user_id, admin.id);

        let indoor = tag::get_tag_by_name(&db, "Indoor").await?.unwrap();
        assert_eq!(indoor.color, tag::DEFAULT_TAG_COLOR);

        let (again, summary) = seed_catalog(&db, &config).await?;
        assert_eq!(again, ctx);
        assert_eq!(summary, SeedSummary::default());
        assert_eq!(category::get_all_categories(&db).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_matches_padded_admin_login() -> Result<()> {
        let db = setup_test_db().await?;
        let config: Config = toml::from_str(
            r#"
            [admin]
            name = "Nursery Admin"
            login = " admin "
            "#,
        )
        .unwrap();

        let (first, _) = seed_catalog(&db, &config).await?;
        let (second, _) = seed_catalog(&db, &config).await?;
        assert_eq!(first, second);

        let admin = user::get_user_by_login(&db, "admin").await?.unwrap();
        assert_eq!(admin.id, first.user_id);

        Ok(())
    }
}
