use serde::Serialize;
use time::OffsetDateTime;

use phototrack_api_structs::{seconds_since_epoch, SitePayload};

use super::{Entity, Position, Replace};

pub type SiteId = String;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    pub uuid: SiteId,
    pub address: String,
    pub archive: String,
    #[serde(flatten)]
    pub position: Option<Position>,
    pub name: String,
    pub pit_number: String,
    #[serde(with = "seconds_since_epoch")]
    pub seconds_since_epoch: i64,
    pub status: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

impl Site {
    fn assign(&mut self, payload: SitePayload) {
        if !payload.photos.is_empty() {
            tracing::debug!(
                site = %self.uuid,
                photos = payload.photos.len(),
                "Ignoring photos embedded in site payload"
            );
        }

        self.address = payload.address;
        self.archive = payload.archive;
        self.position = Position::from_pair(payload.latitude, payload.longitude);
        self.name = payload.name;
        self.pit_number = payload.pit_number;
        self.seconds_since_epoch = payload.seconds_since_epoch;
        self.status = payload.status;
    }
}

impl Entity for Site {
    type Payload = SitePayload;

    const COLLECTION: &'static str = "sites";

    fn create(id: String, payload: SitePayload, now: OffsetDateTime) -> Self {
        let mut site = Site {
            uuid: id,
            address: String::new(),
            archive: String::new(),
            position: None,
            name: String::new(),
            pit_number: String::new(),
            seconds_since_epoch: 0,
            status: 0,
            time: now,
        };
        site.assign(payload);
        site
    }
}

impl Replace for Site {
    fn replace(&mut self, payload: SitePayload, now: OffsetDateTime) {
        self.assign(payload);
        self.time = now;
    }
}
