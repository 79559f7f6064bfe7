use std::collections::BTreeMap;

use serde::Serialize;

use crate::{lead::Lead, page_view::PageView};

/// Number of rows returned by the recent-leads and recent-page-views reads.
pub const RECENT_LIMIT: usize = 50;

/// Response body of `GET /api/stats`.
///
/// `Default` is the degraded state: any field whose query failed keeps its
/// zero or empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_leads: i64,
    pub total_page_views: i64,
    pub variants: BTreeMap<String, i64>,
    pub recent_leads: Vec<Lead>,
    pub recent_page_views: Vec<PageView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_serialises_with_wire_names() {
        let value = serde_json::to_value(StatsSnapshot::default()).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "totalLeads": 0,
                "totalPageViews": 0,
                "variants": {},
                "recentLeads": [],
                "recentPageViews": []
            })
        );
    }
}
