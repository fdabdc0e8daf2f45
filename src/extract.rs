//! SEO metadata extraction from fetched HTML.

use crate::constants::{MAX_SEO_FIELD_LENGTH, TRUNCATION_MARKER};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TITLE: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("title").ok());
static META_DESCRIPTION: Lazy<Option<Selector>> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).ok());
static H1: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("h1").ok());

/// The fields recorded for every successful check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    pub h1: String,
}

/// Result of looking up the first element matching a selector.
enum Lookup<'a> {
    Found(ElementRef<'a>),
    Absent,
}

impl<'a> Lookup<'a> {
    fn first(document: &'a Html, selector: &Option<Selector>) -> Self {
        match selector.as_ref().and_then(|s| document.select(s).next()) {
            Some(element) => Lookup::Found(element),
            None => Lookup::Absent,
        }
    }

    fn text(&self) -> String {
        match self {
            Lookup::Found(element) => element.text().collect(),
            Lookup::Absent => String::new(),
        }
    }

    fn attr(&self, name: &str) -> String {
        match self {
            Lookup::Found(element) => element.value().attr(name).unwrap_or_default().to_owned(),
            Lookup::Absent => String::new(),
        }
    }
}

/// Pull title, meta description and first heading out of `html`.
///
/// Never fails: missing elements and broken markup yield empty strings.
pub fn extract(html: &str) -> PageSeo {
    let document = Html::parse_document(html);

    PageSeo {
        title: truncate(Lookup::first(&document, &TITLE).text()),
        description: truncate(Lookup::first(&document, &META_DESCRIPTION).attr("content")),
        h1: truncate(Lookup::first(&document, &H1).text()),
    }
}

/// Cut `value` to `MAX_SEO_FIELD_LENGTH` characters, marker included.
pub fn truncate(value: String) -> String {
    if value.chars().count() <= MAX_SEO_FIELD_LENGTH {
        return value;
    }
    let keep = MAX_SEO_FIELD_LENGTH - TRUNCATION_MARKER.chars().count();
    let mut cut: String = value.chars().take(keep).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}
