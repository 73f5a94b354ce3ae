//! Sitemap protocol 0.9 rendering with `xhtml:link` hreflang alternates.

use chrono::SecondsFormat;
use quick_xml::{Error, Writer};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use vitrin_application::SitemapEntry;
use vitrin_core::{AppError, AppResult};

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Renders sitemap entries as an XML document, keeping their order.
pub fn render_sitemap(entries: &[SitemapEntry]) -> AppResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_urlset(&mut writer, entries)
        .map_err(|error| AppError::Internal(format!("failed to render sitemap: {error}")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|error| AppError::Internal(format!("sitemap is not valid utf-8: {error}")))
}

fn write_urlset(writer: &mut Writer<Vec<u8>>, entries: &[SitemapEntry]) -> Result<(), Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NAMESPACE));
    urlset.push_attribute(("xmlns:xhtml", XHTML_NAMESPACE));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(writer, "loc", &entry.url)?;
        write_text_element(
            writer,
            "lastmod",
            &entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
        write_text_element(writer, "changefreq", entry.change_frequency.as_str())?;
        write_text_element(writer, "priority", &format!("{:.1}", entry.priority))?;

        for (hreflang, href) in &entry.alternates.languages {
            let mut link = BytesStart::new("xhtml:link");
            link.push_attribute(("rel", "alternate"));
            link.push_attribute(("hreflang", hreflang.as_str()));
            link.push_attribute(("href", href.as_str()));
            writer.write_event(Event::Empty(link))?;
        }

        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    Ok(writer.write_event(Event::End(BytesEnd::new("urlset")))?)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    Ok(writer.write_event(Event::End(BytesEnd::new(name)))?)
}
