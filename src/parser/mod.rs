pub mod profile;
pub mod roster;

pub use profile::parse_profile;
pub use roster::extract_roster;

use scraper::ElementRef;

/// Text of an element and its descendants, whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
