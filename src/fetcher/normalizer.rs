use html_escape::decode_html_entities;

use crate::domain::RssFeed;

/// Exact item titles known to be wrong upstream, with their replacements
const TITLE_CORRECTIONS: &[(&str, &str)] =
    &[("Optimize For Simplicity First", "Optimize for simplicity")];

/// Make text fields safe for display. Never drops or reorders items.
pub fn normalize(mut feed: RssFeed) -> RssFeed {
    let channel = &mut feed.channel;
    channel.title = unescape(&channel.title);
    channel.description = unescape(&channel.description);

    for item in &mut channel.items {
        item.title = correct_title(unescape(&item.title));
        item.description = unescape(&item.description);
    }

    feed
}

fn unescape(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

fn correct_title(title: String) -> String {
    TITLE_CORRECTIONS
        .iter()
        .find(|(from, _)| *from == title)
        .map(|(_, to)| to.to_string())
        .unwrap_or(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RssChannel, RssItem};

    fn item(title: &str, description: &str) -> RssItem {
        RssItem {
            title: title.to_string(),
            link: "https://example.com".to_string(),
            description: description.to_string(),
            pub_date: String::new(),
        }
    }

    fn feed(items: Vec<RssItem>) -> RssFeed {
        RssFeed {
            channel: RssChannel {
                title: "Tom &amp; Jerry&#39;s".to_string(),
                link: "https://example.com".to_string(),
                description: "&lt;b&gt;cartoons&lt;/b&gt;".to_string(),
                items,
            },
        }
    }

    #[test]
    fn test_channel_entities_decoded() {
        let normalized = normalize(feed(vec![]));

        assert_eq!(normalized.channel.title, "Tom & Jerry's");
        assert_eq!(normalized.channel.description, "<b>cartoons</b>");
    }

    #[test]
    fn test_items_decoded_and_order_preserved() {
        let items = vec![
            item("First &quot;one&quot;", "a &amp; b"),
            item("Second", "&#8220;quoted&#8221;"),
            item("Third &hellip;", ""),
        ];

        let normalized = normalize(feed(items));
        let items = &normalized.channel.items;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "First \"one\"");
        assert_eq!(items[0].description, "a & b");
        assert_eq!(items[1].title, "Second");
        assert_eq!(items[1].description, "\u{201c}quoted\u{201d}");
        assert_eq!(items[2].title, "Third \u{2026}");
    }

    #[test]
    fn test_known_title_corrected() {
        let normalized = normalize(feed(vec![item("Optimize For Simplicity First", "")]));
        assert_eq!(normalized.channel.items[0].title, "Optimize for simplicity");
    }

    #[test]
    fn test_correction_is_exact_match_only() {
        let normalized = normalize(feed(vec![item("Optimize For Simplicity First!", "")]));
        assert_eq!(
            normalized.channel.items[0].title,
            "Optimize For Simplicity First!"
        );
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut raw = item("t", "d");
        raw.link = "https://example.com/?a=1&amp;b=2".to_string();
        raw.pub_date = "Mon, 01 Jan 2024 00:00:00 +0000".to_string();

        let normalized = normalize(feed(vec![raw.clone()]));
        assert_eq!(normalized.channel.items[0].link, raw.link);
        assert_eq!(normalized.channel.items[0].pub_date, raw.pub_date);
    }
}
