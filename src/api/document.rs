use scraper::{ElementRef, Selector};

use crate::error::{Result, ScrapeError};

pub fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector {
        css,
        reason: format!("{:?}", e),
    })
}

/// Trimmed text content of an element and all its descendants.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Direct `<td>` children of a table row.
pub fn cells_of(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "td")
        .collect()
}
