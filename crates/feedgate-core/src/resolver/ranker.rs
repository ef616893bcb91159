//! Search-result candidates: extraction, exact-name filtering and ranking.
//!
//! Only results whose normalized name equals the normalized query survive;
//! survivors are ordered by `2 * seed + leech`, highest first.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::error::ResolutionError;

/// One search result under consideration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub link: String,
    pub seed: u32,
    pub leech: u32,
}

impl Candidate {
    pub fn weight(&self) -> u64 {
        2 * u64::from(self.seed) + u64::from(self.leech)
    }
}

/// Periods become spaces, then lower-case.
pub fn normalize_name(name: &str) -> String {
    name.replace('.', " ").to_lowercase()
}

/// Orders by descending weight. Stable: ties keep first-observed order.
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.weight().cmp(&a.weight()));
    candidates
}

pub fn best(candidates: Vec<Candidate>) -> Option<Candidate> {
    rank(candidates).into_iter().next()
}

fn selector(css: &str, page_url: &str) -> Result<Selector, ResolutionError> {
    Selector::parse(css).map_err(|e| ResolutionError::markup(page_url, e.to_string()))
}

/// Extracts candidates named exactly `query` (after normalization) from a
/// search results page.
///
/// Each result is an `a.detLink` inside a table row whose last two cells hold
/// the seed and leech counts. Links are joined against `base`.
pub fn parse_candidates(
    html: &str,
    query: &str,
    base: &Url,
    page_url: &str,
) -> Result<Vec<Candidate>, ResolutionError> {
    let wanted = normalize_name(query);
    let document = Html::parse_document(html);
    let link_selector = selector("a.detLink", page_url)?;

    let mut candidates = Vec::new();
    for link in document.select(&link_selector) {
        let name = link.text().next().unwrap_or_default();
        if normalize_name(name) != wanted {
            continue;
        }

        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| ResolutionError::markup(page_url, format!("result {name:?} has no href")))?;
        let link_url = base
            .join(href)
            .map_err(|e| ResolutionError::markup(page_url, format!("bad link {href:?}: {e}")))?;

        let (seed, leech) = row_counts(link)
            .ok_or_else(|| ResolutionError::markup(page_url, format!("no seed/leech cells for {name:?}")))?;

        candidates.push(Candidate {
            name: name.to_string(),
            link: link_url.to_string(),
            seed,
            leech,
        });
    }
    Ok(candidates)
}

/// Seed and leech counts from the last two cells of the enclosing row.
fn row_counts(link: ElementRef<'_>) -> Option<(u32, u32)> {
    let row = link
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")?;
    let cells: Vec<ElementRef<'_>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect();
    let [.., seed, leech] = cells.as_slice() else {
        return None;
    };
    Some((cell_number(*seed)?, cell_number(*leech)?))
}

fn cell_number(cell: ElementRef<'_>) -> Option<u32> {
    cell.text().next()?.trim().parse().ok()
}
