use scraper::Html;

/// Removes markup from an HTML fragment, keeping its text content
pub fn strip_tags(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}
