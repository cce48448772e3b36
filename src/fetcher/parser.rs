use feed_rs::model::FeedType;
use feed_rs::parser;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::{RssChannel, RssFeed, RssItem};
use crate::errors::{GatorError, GatorResult};

const ROOT: &str = "rss";

/// Decode raw bytes as an RSS channel document. Atom, JSON Feed and RDF
/// documents are rejected even though they parse.
///
/// Field text is kept exactly as it appears in the document, with XML
/// escapes resolved: `pubDate` is never reformatted and whitespace is
/// never trimmed.
pub fn parse_document(bytes: &[u8]) -> GatorResult<RssFeed> {
    ensure_rss(bytes)?;
    decode_channel(bytes)
}

fn ensure_rss(bytes: &[u8]) -> GatorResult<()> {
    let feed = parser::parse(bytes).map_err(xml_error)?;

    match feed.feed_type {
        FeedType::RSS0 | FeedType::RSS2 => Ok(()),
        other => Err(GatorError::FeedParse(format!(
            "expected an RSS channel document, found {:?}",
            other
        ))),
    }
}

fn decode_channel(bytes: &[u8]) -> GatorResult<RssFeed> {
    let mut reader = Reader::from_reader(bytes);
    let mut path: Vec<String> = Vec::new();
    let mut channel = RssChannel::default();
    let mut item: Option<RssItem> = None;
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                let name = element_name(start.name().as_ref())?;
                check_root(&mut saw_root, &path, &name)?;
                path.push(name);

                if is_item(&path) {
                    item = Some(RssItem::default());
                }
                // A repeated element replaces the earlier value
                if let Some(slot) = field_slot(&path, &mut channel, item.as_mut()) {
                    slot.clear();
                }
            }
            Event::Empty(start) => {
                let name = element_name(start.name().as_ref())?;
                check_root(&mut saw_root, &path, &name)?;
                path.push(name);

                if is_item(&path) {
                    channel.items.push(RssItem::default());
                } else if let Some(slot) = field_slot(&path, &mut channel, item.as_mut()) {
                    slot.clear();
                }
                path.pop();
            }
            Event::End(_) => {
                if is_item(&path) {
                    if let Some(done) = item.take() {
                        channel.items.push(done);
                    }
                }
                path.pop();
            }
            Event::Text(text) => {
                if let Some(slot) = field_slot(&path, &mut channel, item.as_mut()) {
                    slot.push_str(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(data) => {
                if let Some(slot) = field_slot(&path, &mut channel, item.as_mut()) {
                    slot.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(GatorError::FeedParse(format!(
            "document ended inside <{}>",
            open
        )));
    }
    if !saw_root {
        return Err(GatorError::FeedParse("document has no root element".to_string()));
    }

    Ok(RssFeed { channel })
}

fn check_root(saw_root: &mut bool, path: &[String], name: &str) -> GatorResult<()> {
    if !path.is_empty() {
        return Ok(());
    }
    if *saw_root || name != ROOT {
        return Err(GatorError::FeedParse(format!(
            "expected a single <{}> root element, found <{}>",
            ROOT, name
        )));
    }
    *saw_root = true;
    Ok(())
}

fn element_name(raw: &[u8]) -> GatorResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(xml_error)
}

fn is_item(path: &[String]) -> bool {
    path.len() == 3 && path[0] == ROOT && path[1] == "channel" && path[2] == "item"
}

/// The text field a document position feeds into, if any
fn field_slot<'a>(
    path: &[String],
    channel: &'a mut RssChannel,
    item: Option<&'a mut RssItem>,
) -> Option<&'a mut String> {
    let names: Vec<&str> = path.iter().map(String::as_str).collect();

    match names.as_slice() {
        ["rss", "channel", "title"] => Some(&mut channel.title),
        ["rss", "channel", "link"] => Some(&mut channel.link),
        ["rss", "channel", "description"] => Some(&mut channel.description),
        ["rss", "channel", "item", "title"] => item.map(|i| &mut i.title),
        ["rss", "channel", "item", "link"] => item.map(|i| &mut i.link),
        ["rss", "channel", "item", "description"] => item.map(|i| &mut i.description),
        ["rss", "channel", "item", "pubDate"] => item.map(|i| &mut i.pub_date),
        _ => None,
    }
}

fn xml_error(e: impl std::fmt::Display) -> GatorError {
    GatorError::FeedParse(e.to_string())
}
