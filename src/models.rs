pub mod blog;
pub mod refresh_token;
pub mod user;

use mongodb::bson::DateTime as BsonDateTime;

pub(crate) fn bson_to_rfc3339(dt: BsonDateTime) -> String {
    let ms = dt.timestamp_millis();
    let secs = ms.div_euclid(1000);
    let nsec = (ms.rem_euclid(1000) * 1_000_000) as u32;
    chrono::DateTime::<chrono::Utc>::from_timestamp(secs, nsec)
        .unwrap_or_default()
        .to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch_millis() {
        let dt = BsonDateTime::from_millis(1_700_000_000_123);
        assert_eq!(bson_to_rfc3339(dt), "2023-11-14T22:13:20.123+00:00");
    }
}
