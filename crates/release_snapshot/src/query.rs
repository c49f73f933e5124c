use crate::window::TimeWindow;

pub const RECORD_FIELDS: &[&str] = &[
    "name",
    "first_release_date",
    "summary",
    "url",
    "rating",
    "total_rating",
    "cover.image_id",
    "websites.category",
    "websites.url",
];

/// One page of the catalog query: `limit` records starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn nth(page: usize, page_size: usize) -> Self {
        Self {
            page,
            offset: page * page_size,
            limit: page_size,
        }
    }
}

/// Render the catalog query-language body for `request` within `window`.
pub fn build_query(window: &TimeWindow, request: &PageRequest) -> String {
    format!(
        "fields {fields}; where first_release_date >= {start} & first_release_date <= {end}; limit {limit}; offset {offset}; sort first_release_date asc;",
        fields = RECORD_FIELDS.join(","),
        start = window.start_unix(),
        end = window.end_unix(),
        limit = request.limit,
        offset = request.offset,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn query_encodes_window_paging_and_sort() {
        let window = TimeWindow {
            start: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            end: Utc.timestamp_opt(1_703_000_000, 0).unwrap(),
        };

        let query = build_query(&window, &PageRequest::nth(2, 500));
        assert_eq!(
            query,
            "fields name,first_release_date,summary,url,rating,total_rating,cover.image_id,websites.category,websites.url; \
             where first_release_date >= 1700000000 & first_release_date <= 1703000000; \
             limit 500; offset 1000; sort first_release_date asc;"
        );
    }

    #[test]
    fn first_page_starts_at_zero() {
        let request = PageRequest::nth(0, 500);
        assert_eq!(request.offset, 0);
        assert_eq!(request.limit, 500);
    }
}
