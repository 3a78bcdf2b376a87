use phototrack_api_structs::SitePayload;

use super::{Database, Error};
use crate::models::photos::Photo;
use crate::models::sites::{Site, SiteId};

#[async_trait::async_trait]
pub trait SiteProvider {
    async fn list_sites(&self) -> Vec<Site>;

    async fn get_site(&self, site_id: &str) -> Option<Site>;

    async fn insert_site(&self, payload: SitePayload) -> Result<SiteId, Error>;

    /// Returns `false` if no site has that identifier.
    async fn replace_site(&self, site_id: &str, payload: SitePayload) -> bool;

    /// Photos whose `SiteUuid` names the site, or `None` if the site doesn't exist.
    async fn list_site_photos(&self, site_id: &str) -> Option<Vec<Photo>>;

    /// Photos referring to the site are left alone.
    async fn delete_site(&self, site_id: &str) -> Option<Site>;
}

#[async_trait::async_trait]
impl SiteProvider for Database {
    async fn list_sites(&self) -> Vec<Site> {
        self.sites.read().await.list()
    }

    async fn get_site(&self, site_id: &str) -> Option<Site> {
        self.sites.read().await.get(site_id)
    }

    async fn insert_site(&self, payload: SitePayload) -> Result<SiteId, Error> {
        self.sites.write().await.create(payload)
    }

    async fn replace_site(&self, site_id: &str, payload: SitePayload) -> bool {
        self.sites.write().await.replace(site_id, payload)
    }

    async fn list_site_photos(&self, site_id: &str) -> Option<Vec<Photo>> {
        let sites = self.sites.read().await;
        sites.get(site_id)?;

        Some(
            self.photos
                .read()
                .await
                .filter(|photo| photo.site_uuid == site_id),
        )
    }

    async fn delete_site(&self, site_id: &str) -> Option<Site> {
        self.sites.write().await.remove(site_id)
    }
}
