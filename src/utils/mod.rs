//! Helpers shared by the entity modules: name formatting, the `dd/MM/yyyy`
//! date wire format, payload field checks and listing pagination.

use std::ops::RangeInclusive;

use bookstore_kernel::{settings::PaginationSettings, DomainError};
use serde::{Deserialize, Serialize};

/// Trims, collapses runs of spaces and capitalises every word.
///
/// `"  dom   CASMURRO "` becomes `"Dom Casmurro"`.
pub fn format_name(value: &str) -> String {
    value
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Serde adapter for dates exchanged as `dd/MM/yyyy`.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(raw, FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Same format for optional fields; pair with `#[serde(default)]`.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.collect_str(&date.format(super::FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// Accumulates payload field failures so they are reported together.
#[derive(Debug, Default)]
pub struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required, non-blank text whose length lies in `range`.
    pub fn text(&mut self, label: &str, value: Option<&str>, range: RangeInclusive<usize>) {
        match value {
            Some(text) if !text.trim().is_empty() => {
                if !range.contains(&text.chars().count()) {
                    self.push(format!(
                        "{label} must have between {} and {} characters.",
                        range.start(),
                        range.end()
                    ));
                }
            }
            _ => self.push(format!("{label} is required.")),
        }
    }

    /// Required, non-blank text of any length.
    pub fn not_blank(&mut self, label: &str, value: Option<&str>) {
        if value.map_or(true, |text| text.trim().is_empty()) {
            self.push(format!("{label} is required."));
        }
    }

    pub fn required<T>(&mut self, label: &str, value: &Option<T>) {
        if value.is_none() {
            self.push(format!("{label} is required."));
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_error(self) -> DomainError {
        DomainError::input_format(self.messages)
    }
}

/// `page` / `page_size` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One page of an ordered listing.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Cuts one page out of an already ordered result.
///
/// Page indexes are zero-based. The page size is at least 1 and never above
/// the configured maximum. A page past the end is empty.
pub fn paginate<T>(items: Vec<T>, params: PageParams, settings: &PaginationSettings) -> Page<T> {
    let page = params.page.unwrap_or(settings.default_page);
    let page_size = params
        .page_size
        .unwrap_or(settings.default_page_size)
        .clamp(1, settings.max_page_size.max(1));

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let items = items
        .into_iter()
        .skip(page.saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}
