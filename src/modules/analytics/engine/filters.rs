use ulid::Ulid;

/// Splits a comma-separated query parameter into a trimmed, deduplicated
/// list, dropping empty segments. Order of first appearance is preserved.
pub fn parse_list(raw: Option<&str>) -> Vec<String> {
    let mut values: Vec<String> = vec![];

    if let Some(raw) = raw {
        for piece in raw.split(',') {
            let piece = piece.trim();
            if piece.is_empty() || values.iter().any(|seen| seen == piece) {
                continue;
            }
            values.push(piece.to_string());
        }
    }

    values
}

/// Seller ids must be well-formed ULIDs; malformed entries are silently
/// dropped so filtering continues with the valid subset.
pub fn parse_seller_ids(raw: Option<&str>) -> Vec<String> {
    parse_list(raw)
        .into_iter()
        .filter(|id| Ulid::from_string(id).is_ok())
        .collect()
}

pub fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Distinguishes "no category filter" from "a category filter that matched
/// nothing". The latter must short-circuit the whole report to the zeroed
/// response instead of behaving like no filter at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductFilter {
    Unfiltered,
    Matched(Vec<String>),
}

impl ProductFilter {
    pub fn is_empty_match(&self) -> bool {
        matches!(self, ProductFilter::Matched(ids) if ids.is_empty())
    }

    pub fn into_ids(self) -> Option<Vec<String>> {
        match self {
            ProductFilter::Unfiltered => None,
            ProductFilter::Matched(ids) => Some(ids),
        }
    }
}
