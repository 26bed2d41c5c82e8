use crate::domain::model::RosterEntry;
use crate::parser::element_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// 從 onclick 屬性擷取樂手 ID
static MUSICIAN_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"apriScheda\((\d+),").expect("musician id pattern"));

static CATEGORY_COLUMN: Lazy<Selector> = Lazy::new(|| selector("div.col.bg-white.mx-1"));
static HEADER: Lazy<Selector> = Lazy::new(|| selector("h4"));
static MEDIA: Lazy<Selector> = Lazy::new(|| selector("div.media"));
static MEDIA_BODY: Lazy<Selector> = Lazy::new(|| selector("div.media-body"));
static NAME: Lazy<Selector> = Lazy::new(|| selector("strong"));
static TOWN: Lazy<Selector> = Lazy::new(|| selector("small"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("roster selector")
}

/// Extract `(name, town, id, category)` entries from the saved roster page.
///
/// Each instrument category is a column headed by an `<h4>`; every musician in
/// it is a `media` block whose `onclick` handler carries the musician id.
/// Entries without a parseable id or without a `media-body` are skipped.
pub fn extract_roster(page: &str) -> Vec<RosterEntry> {
    let document = Html::parse_document(page);

    let mut entries = Vec::new();
    for column in document.select(&CATEGORY_COLUMN) {
        let Some(header) = column.select(&HEADER).next() else {
            tracing::debug!("Skipping category column without a header");
            continue;
        };
        let category = element_text(header);

        let before = entries.len();
        entries.extend(
            column
                .select(&MEDIA)
                .filter_map(|block| extract_entry(block, &category)),
        );
        tracing::debug!(
            "Category '{}': {} musicians",
            category,
            entries.len() - before
        );
    }

    entries
}

fn extract_entry(block: ElementRef<'_>, category: &str) -> Option<RosterEntry> {
    let id = block.value().attr("onclick").and_then(parse_musician_id)?;
    let body = block.select(&MEDIA_BODY).next()?;

    let name = body
        .select(&NAME)
        .next()
        .map(element_text)
        .unwrap_or_else(|| "Unknown Name".to_string());

    let town = body
        .select(&TOWN)
        .next()
        .map(element_text)
        .filter(|town| !town.is_empty());

    Some(RosterEntry {
        name,
        town,
        id,
        category: category.to_string(),
    })
}

fn parse_musician_id(onclick: &str) -> Option<u64> {
    MUSICIAN_ID
        .captures(onclick)
        .and_then(|caps| caps[1].parse().ok())
}
