use chrono::NaiveDate;
use std::fmt::Write as _;

pub const DEFAULT_SITE_URL: &str = "https://mspro.ru";

struct StaticPage {
    path: &'static str,
    changefreq: &'static str,
    priority: &'static str,
}

const STATIC_PAGES: [StaticPage; 5] = [
    StaticPage { path: "", changefreq: "weekly", priority: "1.0" },
    StaticPage { path: "/about", changefreq: "monthly", priority: "0.8" },
    StaticPage { path: "/services", changefreq: "weekly", priority: "0.9" },
    StaticPage { path: "/cases", changefreq: "weekly", priority: "0.8" },
    StaticPage { path: "/contacts", changefreq: "monthly", priority: "0.7" },
];

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn push_url(xml: &mut String, loc: &str, lastmod: NaiveDate, changefreq: &str, priority: &str) {
    let _ = write!(
        xml,
        "\n  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
        escape_xml(loc),
        lastmod.format("%Y-%m-%d"),
        changefreq,
        priority
    );
}

/// Builds `sitemap.xml` for the static pages plus every service and case page.
pub fn generate_sitemap(
    base_url: &str,
    today: NaiveDate,
    services: &[(String, NaiveDate)],
    cases: &[(String, NaiveDate)],
) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">",
    );

    for page in &STATIC_PAGES {
        push_url(&mut xml, &format!("{}{}", base, page.path), today, page.changefreq, page.priority);
    }
    for (slug, updated_at) in services {
        push_url(&mut xml, &format!("{}/services/{}", base, slug), *updated_at, "monthly", "0.8");
    }
    for (slug, updated_at) in cases {
        push_url(&mut xml, &format!("{}/cases/{}", base, slug), *updated_at, "monthly", "0.7");
    }

    xml.push_str("\n</urlset>\n");
    xml
}

pub fn generate_robots(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nDisallow: /admin/\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n\nCrawl-delay: 1\n",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn test_sitemap_lists_static_and_dynamic_pages() {
        let services = vec![("antikorroziya".to_string(), date(9, 13))];
        let cases = vec![("bridge-spb".to_string(), date(8, 15))];
        let xml = generate_sitemap("https://mspro.ru/", date(10, 1), &services, &cases);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<url>").count(), 7);
        assert!(xml.contains("<loc>https://mspro.ru</loc>\n    <lastmod>2025-10-01</lastmod>"));
        assert!(xml.contains(
            "<loc>https://mspro.ru/services/antikorroziya</loc>\n    <lastmod>2025-09-13</lastmod>\n    <changefreq>monthly</changefreq>\n    <priority>0.8</priority>"
        ));
        assert!(xml.contains("<loc>https://mspro.ru/cases/bridge-spb</loc>\n    <lastmod>2025-08-15</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_sitemap_escapes_locations() {
        let services = vec![("a&b".to_string(), date(1, 1))];
        let xml = generate_sitemap("https://mspro.ru", date(1, 1), &services, &[]);
        assert!(xml.contains("/services/a&amp;b</loc>"));
    }

    #[test]
    fn test_robots_points_to_sitemap() {
        let robots = generate_robots("https://mspro.ru/");
        assert!(robots.starts_with("User-agent: *\nAllow: /"));
        assert!(robots.contains("Disallow: /admin/\nDisallow: /api/"));
        assert!(robots.contains("Sitemap: https://mspro.ru/sitemap.xml"));
        assert!(robots.contains("Crawl-delay: 1"));
    }
}
