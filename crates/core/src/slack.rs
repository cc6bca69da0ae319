//! Slack Block Kit payload for mission detection summaries.
//!
//! Pure JSON construction; posting the message is left to ops tooling.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::types::Timestamp;

/// Detection classes reported in the summary, with their emoji, in
/// display order.
const CLASS_EMOJI: [(&str, &str); 7] = [
    ("whale", ":whale:"),
    ("dolphin", ":dolphin:"),
    ("seal", ":seal:"),
    ("bird", ":bird:"),
    ("boat", ":boat:"),
    ("shark", ":shark:"),
    ("kelp", ":kelp:"),
];

/// Build the Block Kit blocks for a finished mission.
///
/// `detections` maps class name to detection count; classes outside
/// [`CLASS_EMOJI`] are not reported.  `review_url` should point at the
/// analytics view pre-filtered to the mission (see [`mission_prefix`]).
pub fn mission_summary(
    finished_at: Timestamp,
    mission: &str,
    detections: &BTreeMap<String, u64>,
    review_url: &str,
) -> Vec<Value> {
    let summary = CLASS_EMOJI
        .iter()
        .filter_map(|(class, emoji)| {
            detections
                .get(*class)
                .map(|count| format!("{emoji} *{count}* detections of {class}s"))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    vec![
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    ":plane: Hello UAV Members! \n*{mission}* mission has finished processing at {finished_at}\n"
                ),
            },
        }),
        json!({ "type": "divider" }),
        json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": summary },
        }),
        json!({ "type": "divider" }),
        json!({
            "type": "actions",
            "elements": [{
                "type": "button",
                "text": { "type": "plain_text", "text": "Review detections in Mantis", "emoji": true },
                "value": "review_detections",
                "url": review_url,
            }],
        }),
    ]
}

/// Mission-name prefix used to filter the analytics view: everything up
/// to the first `T` (the date part of a `YYYYMMDDThhmmss` mission name).
pub fn mission_prefix(mission: &str) -> &str {
    mission.split('T').next().unwrap_or(mission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn detections(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn summary_lists_classes_in_display_order() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let blocks = mission_summary(
            at,
            "20240601T081500",
            &detections(&[("boat", 2), ("whale", 5)]),
            "http://mantis.example.org/review",
        );

        assert_eq!(blocks.len(), 5);
        let text = blocks[2]["text"]["text"].as_str().unwrap();
        let whale_at = text.find(":whale: *5*").unwrap();
        let boat_at = text.find(":boat: *2*").unwrap();
        assert!(whale_at < boat_at);
    }

    #[test]
    fn unknown_classes_are_ignored() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let blocks = mission_summary(
            at,
            "20240601T081500",
            &detections(&[("submarine", 1)]),
            "http://mantis.example.org/review",
        );
        assert_eq!(blocks[2]["text"]["text"], "");
    }

    #[test]
    fn header_names_the_mission() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let blocks = mission_summary(at, "20240601T081500", &detections(&[]), "http://x");
        let header = blocks[0]["text"]["text"].as_str().unwrap();
        assert!(header.contains("*20240601T081500*"));
    }

    #[test]
    fn mission_prefix_stops_at_first_t() {
        assert_eq!(mission_prefix("20240601T081500"), "20240601");
        assert_eq!(mission_prefix("no-timestamp"), "no-timestamp");
    }
}
