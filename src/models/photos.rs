use base64::Engine;
use serde::Serialize;
use time::OffsetDateTime;

use phototrack_api_structs::{seconds_since_epoch, PhotoPayload};

use super::{Entity, Position};

pub type PhotoId = String;

const TEXT_MIME: &str = "text/plain";

const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Photo {
    pub uuid: PhotoId,
    #[serde(skip)]
    pub image: String,
    pub image_mime: String,
    #[serde(flatten)]
    pub position: Option<Position>,
    #[serde(with = "seconds_since_epoch")]
    pub seconds_since_epoch: i64,
    pub tag: String,
    /// Stored as given. Nothing checks that the site exists.
    pub site_uuid: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

impl Entity for Photo {
    type Payload = PhotoPayload;

    const COLLECTION: &'static str = "photos";

    fn create(id: String, payload: PhotoPayload, now: OffsetDateTime) -> Self {
        Photo {
            uuid: id,
            image_mime: image_mime(&payload.image).to_string(),
            image: payload.image,
            position: Position::from_pair(payload.latitude, payload.longitude),
            seconds_since_epoch: payload.seconds_since_epoch,
            tag: payload.tag,
            site_uuid: payload.site_uuid,
            time: now,
        }
    }
}

impl Photo {
    /// The stored image as served by `/photos/{id}/image`.
    ///
    /// Base64 uploads are decoded. Text uploads are returned as they came.
    pub fn image_bytes(&self) -> Vec<u8> {
        if self.image_mime == TEXT_MIME {
            return self.image.clone().into_bytes();
        }

        base64::engine::general_purpose::STANDARD
            .decode(self.image.trim())
            .unwrap_or_else(|_| self.image.clone().into_bytes())
    }
}

/// Guesses the MIME type of an uploaded image.
///
/// Images are expected as standard base64. Anything that doesn't decode is
/// kept as text.
pub fn image_mime(image: &str) -> &'static str {
    let bytes = match base64::engine::general_purpose::STANDARD.decode(image.trim()) {
        Ok(bytes) => bytes,
        Err(_) => return TEXT_MIME,
    };

    SIGNATURES
        .iter()
        .find(|(signature, _)| bytes.starts_with(signature))
        .map(|(_, mime)| *mime)
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use base64::Engine;

    use super::*;

    fn encode(bytes: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    #[test]
    fn image_mime_recognizes_common_formats() {
        assert_eq!(image_mime(&encode(b"\xff\xd8\xff\xe0\x00\x10JFIF")), "image/jpeg");
        assert_eq!(image_mime(&encode(b"\x89PNG\r\n\x1a\n\x00\x00")), "image/png");
        assert_eq!(image_mime(&encode(b"GIF89a\x01\x00")), "image/gif");
    }

    #[test]
    fn image_mime_falls_back() {
        assert_eq!(image_mime("BeautifulImage"), "text/plain");
        assert_eq!(image_mime(&encode(b"just some bytes")), "application/octet-stream");
    }

    fn photo(image: &str) -> Photo {
        Photo::create(
            "id".to_string(),
            PhotoPayload {
                image: image.to_string(),
                ..Default::default()
            },
            OffsetDateTime::UNIX_EPOCH,
        )
    }

    #[test]
    fn image_bytes_decode_recognized_uploads() {
        let png = b"\x89PNG\r\n\x1a\n\x00\x00";
        assert_eq!(photo(&encode(png)).image_bytes(), png);

        let opaque = b"just some bytes";
        assert_eq!(photo(&encode(opaque)).image_bytes(), opaque);
    }

    #[test]
    fn image_bytes_keep_text_uploads_verbatim() {
        assert_eq!(photo("BeautifulImage").image_bytes(), b"BeautifulImage");
    }

    #[test]
    fn image_is_not_serialized_but_its_mime_is() {
        let photo = Photo::create(
            "id".to_string(),
            PhotoPayload {
                image: "BeautifulImage".to_string(),
                latitude: Some(50.5),
                longitude: Some(5.7),
                seconds_since_epoch: 999_999_999,
                tag: "Yeah!".to_string(),
                site_uuid: "12345678-90ab-cdef-1234-567890abcdef".to_string(),
            },
            OffsetDateTime::UNIX_EPOCH,
        );
        let value = serde_json::to_value(&photo).unwrap();

        assert!(value.get("Image").is_none());
        assert_eq!(value["ImageMime"], "text/plain");
        assert_eq!(value["SiteUuid"], "12345678-90ab-cdef-1234-567890abcdef");
        assert_eq!(value["SecondsSinceEpoch"], "999999999");
        assert_eq!(value["Latitude"], 50.5);
        assert_eq!(value["Time"], "1970-01-01T00:00:00Z");
    }
}
