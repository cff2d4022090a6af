//! Published reservation service
//!
//! Creates listings for a hotelier and attaches the uploaded image.
//! Image bytes go to the [`ImageStore`]; the metadata row goes to the database.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    CreatePublishedReservationDto, DomainError, DomainResult, NewImage, PublishedReservation,
    RepositoryProvider, ReservationImage,
};
use crate::infrastructure::storage::ImageStore;

pub const LISTINGS_PUBLISHED: &str = "published_reservations_created_total";
pub const IMAGES_UPLOADED: &str = "images_uploaded_total";

/// Raw image received from a multipart upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct ListingService {
    repos: Arc<dyn RepositoryProvider>,
    images: Arc<dyn ImageStore>,
    max_image_bytes: usize,
}

impl ListingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        images: Arc<dyn ImageStore>,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            repos,
            images,
            max_image_bytes,
        }
    }

    pub async fn publish(
        &self,
        dto: CreatePublishedReservationDto,
    ) -> DomainResult<PublishedReservation> {
        let hotelier_id = dto.hotelier_id;
        let reservation = self.repos.published_reservations().create(dto).await?;

        metrics::counter!(LISTINGS_PUBLISHED).increment(1);
        info!(
            reservation_id = reservation.id,
            hotelier_id,
            "Reservation published"
        );
        Ok(reservation)
    }

    pub async fn get(&self, id: i32) -> DomainResult<PublishedReservation> {
        self.repos
            .published_reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("PublishedReservation", id))
    }

    pub async fn list(&self, hotelier_id: Option<i32>) -> DomainResult<Vec<PublishedReservation>> {
        match hotelier_id {
            Some(id) => self.repos.published_reservations().list_by_hotelier(id).await,
            None => self.repos.published_reservations().list_all().await,
        }
    }

    pub async fn image_for(&self, reservation_id: i32) -> DomainResult<Option<ReservationImage>> {
        self.repos.images().find_by_reservation(reservation_id).await
    }

    /// Images of `reservation_ids`, keyed by reservation id.
    pub async fn images_for(
        &self,
        reservation_ids: &[i32],
    ) -> DomainResult<HashMap<i32, ReservationImage>> {
        let images = self
            .repos
            .images()
            .find_by_reservations(reservation_ids)
            .await?;
        Ok(images
            .into_iter()
            .map(|image| (image.published_reservation_id, image))
            .collect())
    }

    /// Metadata and bytes of the image attached to `reservation_id`.
    pub async fn read_image(
        &self,
        reservation_id: i32,
    ) -> DomainResult<(ReservationImage, Vec<u8>)> {
        let image = self
            .image_for(reservation_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Image",
                field: "published_reservation_id",
                value: reservation_id.to_string(),
            })?;

        let bytes = self
            .images
            .get(&image.path)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
            .ok_or_else(|| DomainError::Storage(format!("Image bytes missing at {}", image.path)))?;

        Ok((image, bytes))
    }

    /// Store `upload` as the image of `reservation_id`, replacing any previous one.
    /// Only the owning hotelier may attach an image.
    pub async fn attach_image(
        &self,
        requester_id: i32,
        reservation_id: i32,
        upload: ImageUpload,
    ) -> DomainResult<ReservationImage> {
        let reservation = self.get(reservation_id).await?;
        if !reservation.is_owned_by(requester_id) {
            return Err(DomainError::Forbidden(
                "Reservation belongs to another hotelier".into(),
            ));
        }

        let upload = ImageUpload {
            content_type: effective_content_type(&upload.file_name, &upload.content_type),
            ..upload
        };
        if upload.bytes.is_empty() {
            return Err(DomainError::Validation("Image file is empty".into()));
        }
        if !upload.content_type.starts_with("image/") {
            return Err(DomainError::Validation(format!(
                "Unsupported file type: {}",
                upload.content_type
            )));
        }
        if upload.bytes.len() > self.max_image_bytes {
            return Err(DomainError::Validation(format!(
                "Image exceeds the {} byte limit",
                self.max_image_bytes
            )));
        }

        let key = format!(
            "{}/{}.{}",
            reservation_id,
            uuid::Uuid::new_v4(),
            extension_for(&upload.file_name, &upload.content_type)
        );

        self.images
            .put(&key, &upload.bytes)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let new_image = NewImage {
            published_reservation_id: reservation_id,
            file_name: upload.file_name,
            content_type: upload.content_type,
            size_bytes: upload.bytes.len() as i64,
            path: key.clone(),
        };

        let (stored, previous) = match self.repos.images().replace_for_reservation(new_image).await
        {
            Ok(result) => result,
            Err(e) => {
                if let Err(cleanup) = self.images.remove(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned image bytes");
                }
                return Err(e);
            }
        };

        if let Some(previous) = previous {
            if let Err(e) = self.images.remove(&previous.path).await {
                warn!(path = %previous.path, error = %e, "Failed to remove replaced image");
            }
        }

        metrics::counter!(IMAGES_UPLOADED).increment(1);
        info!(
            reservation_id,
            size_bytes = stored.size_bytes,
            "Image attached to reservation"
        );
        Ok(stored)
    }
}

/// File extension for the stored object: taken from the file name, else the
/// first one registered for the content type.
fn extension_for(file_name: &str, content_type: &str) -> String {
    let from_name = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    from_name.unwrap_or_else(|| {
        mime_guess::get_mime_extensions_str(content_type)
            .and_then(|exts| exts.first())
            .map_or_else(|| "bin".to_string(), |ext| ext.to_string())
    })
}

/// Browsers and some clients send `application/octet-stream` (or nothing)
/// for less common formats; fall back to the file name in that case.
fn effective_content_type(file_name: &str, declared: &str) -> String {
    let declared = declared.trim();
    if !declared.is_empty() && declared != "application/octet-stream" {
        return declared.to_string();
    }
    mime_guess::from_path(file_name)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| declared.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amenities, CreateHotelierDto};
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_connection;
    use crate::infrastructure::storage::InMemoryImageStore;

    struct Fixture {
        service: ListingService,
        store: Arc<InMemoryImageStore>,
        owner_id: i32,
        other_id: i32,
    }

    async fn fixture() -> Fixture {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(test_connection().await));
        let mut ids = Vec::new();
        for name in ["sol", "lua"] {
            let h = repos
                .hoteliers()
                .create(CreateHotelierDto {
                    name: name.into(),
                    email: format!("{}@hotel.com", name),
                    username: name.into(),
                    password_hash: "hash".into(),
                    phone: None,
                })
                .await
                .unwrap();
            ids.push(h.id);
        }
        let store = Arc::new(InMemoryImageStore::new());
        Fixture {
            service: ListingService::new(repos, store.clone(), 1024),
            store,
            owner_id: ids[0],
            other_id: ids[1],
        }
    }

    fn listing(hotelier_id: i32) -> CreatePublishedReservationDto {
        CreatePublishedReservationDto {
            hotelier_id,
            name: "Suite Vista Mar".into(),
            rooms: 1,
            people: 2,
            price: 420.0,
            amenities: Amenities {
                wifi: true,
                ..Default::default()
            },
        }
    }

    fn png(bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            file_name: "Fachada.PNG".into(),
            content_type: "image/png".into(),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn attach_stores_bytes_and_metadata() {
        let f = fixture().await;
        let r = f.service.publish(listing(f.owner_id)).await.unwrap();

        let img = f.service.attach_image(f.owner_id, r.id, png(b"abcd")).await.unwrap();
        assert_eq!(img.size_bytes, 4);
        assert!(img.path.starts_with(&format!("{}/", r.id)));
        assert!(img.path.ends_with(".png"));
        assert_eq!(f.store.get(&img.path).await.unwrap().as_deref(), Some(&b"abcd"[..]));

        let (meta, bytes) = f.service.read_image(r.id).await.unwrap();
        assert_eq!(meta.id, img.id);
        assert_eq!(bytes, b"abcd");
    }

    #[tokio::test]
    async fn read_image_without_upload_is_not_found() {
        let f = fixture().await;
        let r = f.service.publish(listing(f.owner_id)).await.unwrap();
        assert!(matches!(
            f.service.read_image(r.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn replacing_image_removes_old_bytes() {
        let f = fixture().await;
        let r = f.service.publish(listing(f.owner_id)).await.unwrap();

        let first = f.service.attach_image(f.owner_id, r.id, png(b"one")).await.unwrap();
        let second = f.service.attach_image(f.owner_id, r.id, png(b"two")).await.unwrap();

        assert_eq!(f.store.len().await, 1);
        assert!(f.store.get(&first.path).await.unwrap().is_none());
        assert_eq!(
            f.service.image_for(r.id).await.unwrap().map(|i| i.id),
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn other_hotelier_cannot_attach() {
        let f = fixture().await;
        let r = f.service.publish(listing(f.owner_id)).await.unwrap();

        let err = f
            .service
            .attach_image(f.other_id, r.id, png(b"abcd"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(f.store.len().await, 0);
    }

    #[tokio::test]
    async fn rejects_non_images_empty_and_oversized() {
        let f = fixture().await;
        let r = f.service.publish(listing(f.owner_id)).await.unwrap();

        let pdf = ImageUpload {
            file_name: "doc.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF".to_vec(),
        };
        for upload in [pdf, png(b""), png(&[0u8; 2048])] {
            let err = f.service.attach_image(f.owner_id, r.id, upload).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        assert_eq!(f.store.len().await, 0);
    }

    #[tokio::test]
    async fn attach_to_missing_reservation_is_not_found() {
        let f = fixture().await;
        let err = f
            .service
            .attach_image(f.owner_id, 404, png(b"abcd"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_filters_by_hotelier() {
        let f = fixture().await;
        f.service.publish(listing(f.owner_id)).await.unwrap();
        f.service.publish(listing(f.other_id)).await.unwrap();

        assert_eq!(f.service.list(Some(f.owner_id)).await.unwrap().len(), 1);
        assert_eq!(f.service.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn images_for_keys_by_reservation() {
        let f = fixture().await;
        let with_image = f.service.publish(listing(f.owner_id)).await.unwrap();
        let bare = f.service.publish(listing(f.owner_id)).await.unwrap();
        let img = f
            .service
            .attach_image(f.owner_id, with_image.id, png(b"abcd"))
            .await
            .unwrap();

        let images = f.service.images_for(&[with_image.id, bare.id]).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images.get(&with_image.id).map(|i| i.id), Some(img.id));
        assert!(!images.contains_key(&bare.id));
    }

    #[test]
    fn extension_falls_back_to_registered_one() {
        assert_eq!(extension_for("photo.JPG", "image/jpeg"), "jpg");
        assert_eq!(extension_for("photo", "image/webp"), "webp");
        assert_eq!(extension_for("photo.", "image/png"), "png");
        assert_eq!(extension_for("photo", "image/x-made-up"), "bin");
    }

    #[tokio::test]
    async fn octet_stream_upload_takes_type_from_file_name() {
        let f = fixture().await;
        let r = f.service.publish(listing(f.owner_id)).await.unwrap();

        let upload = ImageUpload {
            file_name: "fachada.tif".into(),
            content_type: "application/octet-stream".into(),
            bytes: b"II*\0".to_vec(),
        };
        let img = f.service.attach_image(f.owner_id, r.id, upload).await.unwrap();
        assert_eq!(img.content_type, "image/tiff");
        assert!(img.path.ends_with(".tif"));
    }

    #[tokio::test]
    async fn octet_stream_without_image_name_is_still_rejected() {
        let f = fixture().await;
        let r = f.service.publish(listing(f.owner_id)).await.unwrap();

        let upload = ImageUpload {
            file_name: "blob".into(),
            content_type: "application/octet-stream".into(),
            bytes: b"data".to_vec(),
        };
        let err = f.service.attach_image(f.owner_id, r.id, upload).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
