use chrono::DateTime;
use chrono_tz::Tz;

use crate::record::{NormalizedRecord, RawRecord, WebsiteCategory, WebsiteLink};

pub const COVER_URL_PREFIX: &str = "https://images.igdb.com/igdb/image/upload/t_cover_big/";

/// Group key for records without a usable release timestamp.
pub const UNDATED_KEY: &str = "undated";

/// Map a catalog record onto the output schema. Never fails; missing fields become `None`.
pub fn normalize(raw: &RawRecord, timezone: &Tz) -> NormalizedRecord {
    let websites = raw.websites.as_deref().unwrap_or_default();

    NormalizedRecord {
        name: raw.name.clone(),
        description: raw.summary.clone(),
        cover_url: cover_url(raw),
        official_url: first_link(websites, WebsiteCategory::Official),
        steam_url: first_link(websites, WebsiteCategory::Steam),
        itch_url: first_link(websites, WebsiteCategory::Itch),
        gog_url: first_link(websites, WebsiteCategory::Gog),
        epic_url: first_link(websites, WebsiteCategory::Epic),
        source_url: raw.url.clone(),
        rating: raw.total_rating.or(raw.rating),
        release_date: release_date_key(raw.first_release_date, timezone),
    }
}

pub fn normalize_all(records: &[RawRecord], timezone: &Tz) -> Vec<NormalizedRecord> {
    records
        .iter()
        .map(|record| normalize(record, timezone))
        .collect()
}

fn cover_url(raw: &RawRecord) -> Option<String> {
    raw.cover
        .as_ref()
        .and_then(|cover| cover.image_id.as_deref())
        .filter(|id| !id.is_empty())
        .map(|id| format!("{COVER_URL_PREFIX}{id}.jpg"))
}

/// Url of the first link in upstream order whose category matches. A matching link without
/// a url still wins, leaving the field empty.
pub fn first_link(websites: &[WebsiteLink], category: WebsiteCategory) -> Option<String> {
    websites
        .iter()
        .find(|link| link.category == Some(category.code()))
        .and_then(|link| link.url.clone())
}

/// `YYYY-MM-DD` in `timezone`, or [`UNDATED_KEY`] when the timestamp is missing or out of range.
pub fn release_date_key(timestamp: Option<i64>, timezone: &Tz) -> String {
    timestamp
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|instant| {
            instant
                .with_timezone(timezone)
                .format("%Y-%m-%d")
                .to_string()
        })
        .unwrap_or_else(|| UNDATED_KEY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawCover;

    fn link(category: i64, url: &str) -> WebsiteLink {
        WebsiteLink {
            category: Some(category),
            url: Some(url.to_string()),
        }
    }

    #[test]
    fn record_without_websites_has_no_links() {
        let raw = RawRecord {
            name: Some("Hollow Knight: Silksong".to_string()),
            first_release_date: Some(1_704_067_200),
            ..RawRecord::default()
        };

        let record = normalize(&raw, &Tz::UTC);
        assert_eq!(record.name.as_deref(), Some("Hollow Knight: Silksong"));
        assert!(record.official_url.is_none());
        assert!(record.steam_url.is_none());
        assert!(record.itch_url.is_none());
        assert!(record.gog_url.is_none());
        assert!(record.epic_url.is_none());
        assert!(record.cover_url.is_none());
        assert_eq!(record.release_date, "2024-01-01");
    }

    #[test]
    fn first_matching_category_wins() {
        let raw = RawRecord {
            websites: Some(vec![
                link(1, "https://example.com"),
                link(13, "https://store.steampowered.com/app/1"),
                link(13, "https://store.steampowered.com/app/2"),
                link(17, "https://www.gog.com/game/example"),
                link(16, "https://store.epicgames.com/p/example"),
                link(15, "https://example.itch.io/game"),
                link(3, "https://en.wikipedia.org/wiki/Example"),
            ]),
            ..RawRecord::default()
        };

        let record = normalize(&raw, &Tz::UTC);
        assert_eq!(record.official_url.as_deref(), Some("https://example.com"));
        assert_eq!(
            record.steam_url.as_deref(),
            Some("https://store.steampowered.com/app/1")
        );
        assert_eq!(
            record.gog_url.as_deref(),
            Some("https://www.gog.com/game/example")
        );
        assert_eq!(
            record.epic_url.as_deref(),
            Some("https://store.epicgames.com/p/example")
        );
        assert_eq!(
            record.itch_url.as_deref(),
            Some("https://example.itch.io/game")
        );
    }

    #[test]
    fn first_match_without_url_leaves_field_empty() {
        let websites = vec![
            WebsiteLink {
                category: Some(13),
                url: None,
            },
            link(13, "https://store.steampowered.com/app/3"),
            link(1, "https://example.com"),
        ];
        assert!(first_link(&websites, WebsiteCategory::Steam).is_none());
        assert_eq!(
            first_link(&websites, WebsiteCategory::Official).as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn cover_and_passthrough_fields() {
        let raw = RawRecord {
            summary: Some("A tiny fox.".to_string()),
            url: Some("https://www.igdb.com/games/tunic".to_string()),
            rating: Some(80.0),
            total_rating: Some(88.5),
            cover: Some(RawCover {
                image_id: Some("co1abc".to_string()),
            }),
            ..RawRecord::default()
        };

        let record = normalize(&raw, &Tz::UTC);
        assert_eq!(
            record.cover_url.as_deref(),
            Some("https://images.igdb.com/igdb/image/upload/t_cover_big/co1abc.jpg")
        );
        assert_eq!(record.description.as_deref(), Some("A tiny fox."));
        assert_eq!(
            record.source_url.as_deref(),
            Some("https://www.igdb.com/games/tunic")
        );
        assert_eq!(record.rating, Some(88.5));
        assert_eq!(record.release_date, UNDATED_KEY);
    }

    #[test]
    fn release_date_depends_on_timezone() {
        // 2024-01-02T03:00:00Z is still January 1st in New York.
        let ts = Some(1_704_164_400);
        assert_eq!(release_date_key(ts, &Tz::UTC), "2024-01-02");
        assert_eq!(
            release_date_key(ts, &chrono_tz::America::New_York),
            "2024-01-01"
        );
    }

    #[test]
    fn unrepresentable_timestamp_is_undated() {
        assert_eq!(release_date_key(Some(i64::MAX), &Tz::UTC), UNDATED_KEY);
        assert_eq!(release_date_key(None, &Tz::UTC), UNDATED_KEY);
    }
}
