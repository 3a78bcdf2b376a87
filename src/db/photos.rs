use phototrack_api_structs::PhotoPayload;

use super::{Database, Error};
use crate::models::photos::{Photo, PhotoId};

/// Photos are created and deleted, never updated in place.
#[async_trait::async_trait]
pub trait PhotoProvider {
    async fn list_photos(&self) -> Vec<Photo>;

    async fn get_photo(&self, photo_id: &str) -> Option<Photo>;

    async fn insert_photo(&self, payload: PhotoPayload) -> Result<PhotoId, Error>;

    async fn delete_photo(&self, photo_id: &str) -> Option<Photo>;
}

#[async_trait::async_trait]
impl PhotoProvider for Database {
    async fn list_photos(&self) -> Vec<Photo> {
        self.photos.read().await.list()
    }

    async fn get_photo(&self, photo_id: &str) -> Option<Photo> {
        self.photos.read().await.get(photo_id)
    }

    async fn insert_photo(&self, payload: PhotoPayload) -> Result<PhotoId, Error> {
        self.photos.write().await.create(payload)
    }

    async fn delete_photo(&self, photo_id: &str) -> Option<Photo> {
        self.photos.write().await.remove(photo_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sites::SiteProvider;

    #[async_std::test]
    async fn photo_may_reference_an_unknown_site() {
        let db = Database::default();
        let payload = PhotoPayload {
            site_uuid: "12345678-90ab-cdef-1234-567890abcdef".to_string(),
            ..Default::default()
        };

        let photo_id = db.insert_photo(payload).await.unwrap();
        let photo = db.get_photo(&photo_id).await.unwrap();

        assert_eq!(photo.site_uuid, "12345678-90ab-cdef-1234-567890abcdef");
        assert!(db.get_site(&photo.site_uuid).await.is_none());
    }

    #[async_std::test]
    async fn deleting_a_site_keeps_its_photos() {
        let db = Database::default();
        let site_id = db.insert_site(Default::default()).await.unwrap();
        let photo_id = db
            .insert_photo(PhotoPayload {
                site_uuid: site_id.clone(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(db.delete_site(&site_id).await.is_some());
        assert_eq!(db.list_photos().await.len(), 1);
        assert!(db.get_photo(&photo_id).await.is_some());
    }

    #[async_std::test]
    async fn site_photos_are_selected_by_site_uuid() {
        let db = Database::default();
        let site_id = db.insert_site(Default::default()).await.unwrap();
        let other_site = db.insert_site(Default::default()).await.unwrap();

        let mut expected = Vec::new();
        for site_uuid in [&site_id, &other_site, &site_id] {
            let photo_id = db
                .insert_photo(PhotoPayload {
                    site_uuid: site_uuid.clone(),
                    ..Default::default()
                })
                .await
                .unwrap();
            if site_uuid == &site_id {
                expected.push(photo_id);
            }
        }

        let photos = db.list_site_photos(&site_id).await.unwrap();
        let photo_ids: Vec<_> = photos.into_iter().map(|photo| photo.uuid).collect();
        assert_eq!(photo_ids, expected);

        assert!(db.list_site_photos("12345678-90ab-cdef-1234-567890abcdef").await.is_none());
    }
}
