//! Syndication feed parsing.
//!
//! Google News (and most other publishers) serve RSS 2.0; the parser also
//! accepts RSS 1.0 (RDF) and Atom documents so any standard search feed can be
//! pointed at. Reading is delegated to the `rss` crate, with `atom_syndication`
//! tried when the document is not RSS. Every format is flattened into the same
//! [`FeedEntry`] shape.
//!
//! Parsing is tolerant at the entry level: an entry without a title or a link
//! cannot become an article and is skipped. Only a document that neither
//! crate can read produces a [`FeedError`].

use atom_syndication::{Entry, Link};
use chrono::SecondsFormat;
use rss::{Channel, Item};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("document is neither RSS ({rss}) nor Atom ({atom})")]
    Unrecognized {
        rss: rss::Error,
        atom: atom_syndication::Error,
    },
}

/// One entry of a parsed feed, whatever its original format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub source: Option<EntrySource>,
}

/// The publisher an aggregating feed attributes an entry to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySource {
    pub title: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Rss,
    Atom,
}

fn clean(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// `pubDate`, or the first Dublin Core `dc:date` (the RSS 1.0 convention).
fn rss_published(item: &Item) -> Option<String> {
    clean(item.pub_date()).or_else(|| {
        item.dublin_core_ext()
            .and_then(|dc| clean(dc.dates().first().map(String::as_str)))
    })
}

fn rss_entry(item: &Item) -> Option<FeedEntry> {
    Some(FeedEntry {
        title: clean(item.title())?,
        link: clean(item.link())?,
        summary: clean(item.description()),
        published: rss_published(item),
        source: item.source().map(|s| EntrySource {
            title: clean(s.title()),
            href: clean(Some(s.url())),
        }),
    })
}

/// The `rel="alternate"` link, else the first one.
fn alternate_href(links: &[Link]) -> Option<&str> {
    links
        .iter()
        .find(|link| link.rel() == "alternate")
        .or_else(|| links.first())
        .map(Link::href)
}

fn atom_entry(entry: &Entry) -> Option<FeedEntry> {
    Some(FeedEntry {
        title: clean(Some(entry.title().as_str()))?,
        link: clean(alternate_href(entry.links()))?,
        summary: clean(entry.summary().map(|t| t.as_str())),
        published: entry
            .published()
            .map(|d| d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        source: entry.source().map(|s| EntrySource {
            title: clean(Some(s.title().as_str())),
            href: clean(alternate_href(s.links())),
        }),
    })
}

/// Parse a syndication document into at most `limit` entries, in feed order.
///
/// Entries lacking a title or link are skipped and do not count against
/// `limit`.
pub fn parse_feed(xml: &str, limit: usize) -> Result<Vec<FeedEntry>, FeedError> {
    let (format, entries): (Format, Vec<Option<FeedEntry>>) =
        match Channel::read_from(xml.as_bytes()) {
            Ok(channel) => (Format::Rss, channel.items().iter().map(rss_entry).collect()),
            Err(rss) => match atom_syndication::Feed::read_from(xml.as_bytes()) {
                Ok(feed) => (
                    Format::Atom,
                    feed.entries().iter().map(atom_entry).collect(),
                ),
                Err(atom) => return Err(FeedError::Unrecognized { rss, atom }),
            },
        };

    let total = entries.len();
    let kept: Vec<FeedEntry> = entries.into_iter().flatten().take(limit).collect();
    debug!(?format, total, kept = kept.len(), limit, "Parsed feed");
    Ok(kept)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Trimmed-down copy of a Google News search feed.
    pub(crate) const GOOGLE_NEWS_RSS: &str =
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"World" - Google News</title>
    <link>https://news.google.com/search?q=World&amp;hl=en-US&amp;gl=US&amp;ceid=US:en</link>
    <language>en-US</language>
    <item>
      <title>Leaders meet in Geneva - Reuters</title>
      <link>https://news.google.com/rss/articles/AAA</link>
      <guid isPermaLink="false">AAA</guid>
      <pubDate>Tue, 06 May 2025 14:30:00 GMT</pubDate>
      <description>&lt;a href="https://news.google.com/rss/articles/AAA"&gt;Leaders meet&lt;/a&gt;</description>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>Markets rally on trade hopes - AP News</title>
      <link>https://news.google.com/rss/articles/BBB</link>
      <guid isPermaLink="false">BBB</guid>
      <pubDate>Tue, 06 May 2025 13:00:00 GMT</pubDate>
      <source url="https://apnews.com">AP News</source>
    </item>
    <item>
      <title>Untitled wire story</title>
      <link>https://news.google.com/rss/articles/CCC</link>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example</title>
  <entry>
    <title type="html">Atom headline</title>
    <link rel="self" href="https://example.com/self"/>
    <link rel="alternate" href="https://example.com/story"/>
    <summary>Short summary</summary>
    <published>2025-05-06T10:00:00Z</published>
    <source>
      <title>Example Wire</title>
      <link href="https://example.com"/>
    </source>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_google_news_rss() {
        let entries = parse_feed(GOOGLE_NEWS_RSS, 10).unwrap();
        assert_eq!(entries.len(), 3);

        let first = &entries[0];
        assert_eq!(first.title, "Leaders meet in Geneva - Reuters");
        assert_eq!(first.link, "https://news.google.com/rss/articles/AAA");
        assert_eq!(
            first.summary.as_deref(),
            Some(r#"<a href="https://news.google.com/rss/articles/AAA">Leaders meet</a>"#)
        );
        assert_eq!(first.published.as_deref(), Some("Tue, 06 May 2025 14:30:00 GMT"));
        let source = first.source.as_ref().unwrap();
        assert_eq!(source.title.as_deref(), Some("Reuters"));
        assert_eq!(source.href.as_deref(), Some("https://www.reuters.com"));

        assert!(entries[1].summary.is_none());
        assert!(entries[2].source.is_none());
        assert!(entries[2].published.is_none());
    }

    #[test]
    fn test_limit_preserves_feed_order() {
        let entries = parse_feed(GOOGLE_NEWS_RSS, 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].link.ends_with("AAA"));
        assert!(entries[1].link.ends_with("BBB"));
    }

    #[test]
    fn test_zero_limit() {
        assert!(parse_feed(GOOGLE_NEWS_RSS, 0).unwrap().is_empty());
    }

    #[test]
    fn test_parse_atom_prefers_alternate_link() {
        let entries = parse_feed(ATOM, 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Atom headline");
        assert_eq!(entries[0].link, "https://example.com/story");
        assert_eq!(entries[0].summary.as_deref(), Some("Short summary"));
        assert_eq!(entries[0].published.as_deref(), Some("2025-05-06T10:00:00Z"));
        assert_eq!(
            entries[0].source.as_ref().unwrap().title.as_deref(),
            Some("Example Wire")
        );
    }

    #[test]
    fn test_entries_without_link_are_skipped() {
        let xml = r#"<rss version="2.0"><channel>
            <item><title>No link here</title></item>
            <item><title>Kept</title><link>https://example.com/kept</link></item>
        </channel></rss>"#;
        let entries = parse_feed(xml, 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Kept");
    }

    #[test]
    fn test_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>Nothing</title></channel></rss>"#;
        assert!(parse_feed(xml, 10).unwrap().is_empty());
    }

    #[test]
    fn test_html_page_is_rejected() {
        let err = parse_feed("<html><body>Sorry</body></html>", 10).unwrap_err();
        assert!(matches!(err, FeedError::Unrecognized { .. }));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        assert!(parse_feed("", 10).is_err());
    }

    #[test]
    fn test_item_with_namespaced_link_is_kept() {
        let xml = r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>Wire</title>
    <atom:link href="https://example.com/feed" rel="self" type="application/rss+xml"/>
    <item>
      <title>First</title>
      <link>https://example.com/1</link>
      <atom:link href="https://example.com/1/amp" rel="amphtml"/>
    </item>
    <item>
      <title>Second</title>
      <link>https://example.com/2</link>
    </item>
  </channel>
</rss>"#;
        let entries = parse_feed(xml, 10).unwrap();
        let links: Vec<&str> = entries.iter().map(|e| e.link.as_str()).collect();
        assert_eq!(links, ["https://example.com/1", "https://example.com/2"]);
    }

    #[test]
    fn test_items_split_by_channel_image() {
        let xml = r#"<rss version="2.0">
  <channel>
    <title>Wire</title>
    <item><title>Before image</title><link>https://example.com/a</link></item>
    <image>
      <url>https://example.com/logo.png</url>
      <title>Wire</title>
      <link>https://example.com</link>
    </image>
    <item><title>After image</title><link>https://example.com/b</link></item>
  </channel>
</rss>"#;
        let entries = parse_feed(xml, 10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Before image");
        assert_eq!(entries[1].title, "After image");
    }

    #[test]
    fn test_atom_entries_split_by_title() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>One</title>
    <link href="https://example.com/one"/>
  </entry>
  <title>Example</title>
  <entry>
    <title>Two</title>
    <link href="https://example.com/two"/>
  </entry>
</feed>"#;
        let entries = parse_feed(xml, 10).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
        assert!(entries[1].link.ends_with("/two"));
    }

    #[test]
    fn test_rdf_item_uses_dc_date() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns="http://purl.org/rss/1.0/"
         xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="https://example.com/">
    <title>Wire</title>
    <link>https://example.com/</link>
    <description>Latest</description>
  </channel>
  <item rdf:about="https://example.com/dated">
    <title>Dated story</title>
    <link>https://example.com/dated</link>
    <dc:date>2025-05-06T09:00:00Z</dc:date>
  </item>
  <item rdf:about="https://example.com/undated">
    <title>Undated story</title>
    <link>https://example.com/undated</link>
  </item>
</rdf:RDF>"#;
        let entries = parse_feed(xml, 10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].published.as_deref(), Some("2025-05-06T09:00:00Z"));
        assert!(entries[1].published.is_none());
    }
}
