//! Sitemap and sitemap index document builders.

use chrono::NaiveDate;

use crate::entry::{UrlEntry, format_date};
use crate::errors::Result;
use crate::render::{Element, render_document};
use crate::resolve::Base;

/// Namespace of the sitemaps.org protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Namespace of the image sitemap extension.
pub const IMAGE_NAMESPACE: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Renders a `<urlset>` document listing every entry, in order.
///
/// Only the annotations an entry carries are emitted; `today` is used for
/// entries whose last modification is [`LastMod::Today`](crate::LastMod::Today).
pub fn build_sitemap(entries: &[UrlEntry], base: &Base, today: NaiveDate) -> Result<String> {
    let urls = entries
        .iter()
        .map(|entry| url_element(entry, base, today))
        .collect::<Result<Vec<_>>>()?;

    let has_images = entries
        .iter()
        .any(|entry| matches!(entry, UrlEntry::Record(record) if !record.images.is_empty()));

    let mut urlset = Element::new("urlset").attr("xmlns", SITEMAP_NAMESPACE);
    if has_images {
        urlset = urlset.attr("xmlns:image", IMAGE_NAMESPACE);
    }

    render_document(&urlset.children(urls))
}

fn url_element(entry: &UrlEntry, base: &Base, today: NaiveDate) -> Result<Element> {
    let url = Element::new("url").child(Element::text("loc", base.resolve(entry.url())?));

    let record = match entry {
        UrlEntry::Path(_) => return Ok(url),
        UrlEntry::Record(record) => record,
    };

    let images = record
        .images
        .iter()
        .map(|image| {
            base.resolve(image)
                .map(|loc| Element::new("image:image").child(Element::text("image:loc", loc)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(url
        .maybe_child(
            record
                .last_mod
                .as_ref()
                .map(|last_mod| Element::text("lastmod", last_mod.render(today))),
        )
        .maybe_child(
            record
                .change_freq
                .as_ref()
                .map(|change_freq| Element::text("changefreq", change_freq.as_str())),
        )
        .children(images))
}

/// Renders a `<sitemapindex>` document pointing at each child document.
///
/// Every child is stamped with `today`: the index says when a chunk was
/// regenerated, not when its pages last changed.
pub fn build_index(child_paths: &[&str], base: &Base, today: NaiveDate) -> Result<String> {
    let lastmod = format_date(today);

    let sitemaps = child_paths
        .iter()
        .map(|path| {
            base.resolve(path).map(|loc| {
                Element::new("sitemap")
                    .child(Element::text("loc", loc))
                    .child(Element::text("lastmod", lastmod.as_str()))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    render_document(
        &Element::new("sitemapindex")
            .attr("xmlns", SITEMAP_NAMESPACE)
            .children(sitemaps),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{LastMod, UrlRecord};
    use indoc::indoc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 7, 15).unwrap()
    }

    fn base() -> Base {
        Base::parse("https://bitmidi.com").unwrap()
    }

    #[test]
    fn test_build_sitemap_plain_entries() {
        let entries: Vec<UrlEntry> = vec!["/1".into(), "/2".into(), "/3".into()];
        let xml = build_sitemap(&entries, &base(), today()).unwrap();

        assert_eq!(
            xml,
            indoc! {r#"
                <?xml version="1.0" encoding="utf-8"?>
                <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                  <url>
                    <loc>https://bitmidi.com/1</loc>
                  </url>
                  <url>
                    <loc>https://bitmidi.com/2</loc>
                  </url>
                  <url>
                    <loc>https://bitmidi.com/3</loc>
                  </url>
                </urlset>"#}
        );
    }

    #[test]
    fn test_build_sitemap_all_options() {
        let entries: Vec<UrlEntry> = vec![
            UrlRecord::new("/1")
                .last_mod(LastMod::Verbatim("2000-01-01".to_string()))
                .change_freq("daily")
                .into(),
            UrlRecord::new("/2")
                .last_mod(NaiveDate::from_ymd_opt(2000, 2, 2).unwrap())
                .change_freq("weekly")
                .into(),
            UrlRecord::new("/3").last_mod(LastMod::Today).into(),
            UrlRecord::new("/4").into(),
        ];
        let xml = build_sitemap(&entries, &base(), today()).unwrap();

        assert_eq!(
            xml,
            indoc! {r#"
                <?xml version="1.0" encoding="utf-8"?>
                <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                  <url>
                    <loc>https://bitmidi.com/1</loc>
                    <lastmod>2000-01-01</lastmod>
                    <changefreq>daily</changefreq>
                  </url>
                  <url>
                    <loc>https://bitmidi.com/2</loc>
                    <lastmod>2000-02-02</lastmod>
                    <changefreq>weekly</changefreq>
                  </url>
                  <url>
                    <loc>https://bitmidi.com/3</loc>
                    <lastmod>2018-07-15</lastmod>
                  </url>
                  <url>
                    <loc>https://bitmidi.com/4</loc>
                  </url>
                </urlset>"#}
        );
    }

    #[test]
    fn test_build_sitemap_images_keep_order_and_bind_prefix() {
        let entries: Vec<UrlEntry> = vec![
            UrlRecord::new("/gallery")
                .image("/a.png")
                .image("https://cdn.example.com/b.png")
                .into(),
        ];
        let xml = build_sitemap(&entries, &base(), today()).unwrap();

        assert!(xml.contains(r#"xmlns:image="http://www.google.com/schemas/sitemap-image/1.1""#));
        let first = xml.find("<image:loc>https://bitmidi.com/a.png</image:loc>").unwrap();
        let second = xml.find("<image:loc>https://cdn.example.com/b.png</image:loc>").unwrap();
        assert!(first < second);
        assert_eq!(xml.matches("<image:image>").count(), 2);
    }

    #[test]
    fn test_build_sitemap_without_images_has_no_image_namespace() {
        let entries: Vec<UrlEntry> = vec!["/1".into()];
        let xml = build_sitemap(&entries, &base(), today()).unwrap();
        assert!(!xml.contains("xmlns:image"));
    }

    #[test]
    fn test_build_index() {
        let nested = Base::parse("https://example.com/cars/sitemap/").unwrap();
        let xml = build_index(&["/sitemap-0.xml", "/sitemap-1.xml"], &nested, today()).unwrap();

        assert_eq!(
            xml,
            indoc! {r#"
                <?xml version="1.0" encoding="utf-8"?>
                <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                  <sitemap>
                    <loc>https://example.com/cars/sitemap/sitemap-0.xml</loc>
                    <lastmod>2018-07-15</lastmod>
                  </sitemap>
                  <sitemap>
                    <loc>https://example.com/cars/sitemap/sitemap-1.xml</loc>
                    <lastmod>2018-07-15</lastmod>
                  </sitemap>
                </sitemapindex>"#}
        );
    }
}
