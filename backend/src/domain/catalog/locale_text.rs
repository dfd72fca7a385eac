//! Normalisation of legacy catalog text columns.
//!
//! Product names are stored as a small locale-keyed literal such as
//! `{"en_US": "Shampoo", "es_ES": "Champú"}` and category names as a
//! slash-delimited path such as `All / Beauty / Hair Care`. Both are reduced
//! to a single display string here.

/// Delimiter between segments of a hierarchical category path.
pub const PATH_DELIMITER: char = '/';

/// Errors raised while decoding a locale-keyed text column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The column held no text at all.
    #[error("locale text is empty")]
    Empty,
    /// The selected entry had no `key: value` separator.
    #[error("locale entry `{entry}` has no key separator")]
    MissingSeparator { entry: String },
}

/// Decode a locale-keyed literal into its display value.
///
/// When two entries are present the second wins, otherwise the first one is
/// used. Quotes around the value are removed and, if the value is itself a
/// path, only its last segment is kept.
///
/// # Examples
/// ```
/// use catalog_backend::domain::catalog::decode_locale_text;
///
/// assert_eq!(
///     decode_locale_text("{en_US: Shampoo, es_ES: Champú}").as_deref(),
///     Ok("Champú")
/// );
/// assert_eq!(decode_locale_text("{en_US: Shampoo}").as_deref(), Ok("Shampoo"));
/// assert!(decode_locale_text("").is_err());
/// ```
pub fn decode_locale_text(raw: &str) -> Result<String, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::Empty);
    }

    let body = strip_braces(raw);
    let entries: Vec<&str> = body.split(',').collect();
    let entry = match entries.as_slice() {
        [_, second] => *second,
        [first, ..] => *first,
        [] => body,
    };

    let (_, value) = entry
        .split_once(':')
        .ok_or_else(|| DecodeError::MissingSeparator {
            entry: entry.trim().to_owned(),
        })?;
    let value = value.strip_prefix(' ').unwrap_or(value);
    let value = strip_quotes(value);

    Ok(last_segment(value).to_owned())
}

/// Return the trimmed leaf segment of a slash-delimited category path.
///
/// # Examples
/// ```
/// use catalog_backend::domain::catalog::decode_category_path;
///
/// assert_eq!(decode_category_path("All / Beauty / Hair Care"), "Hair Care");
/// assert_eq!(decode_category_path("All"), "All");
/// ```
pub fn decode_category_path(raw: &str) -> String {
    last_segment(raw).to_owned()
}

/// Whether a raw category path should appear in category listings.
///
/// Paths with exactly two or three segments are intermediate levels of the
/// catalog tree and are withheld from filter population.
pub fn is_listed_category_path(raw: &str) -> bool {
    let segments = raw.split(PATH_DELIMITER).count();
    !(2..=3).contains(&segments)
}

fn strip_braces(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('{').unwrap_or(trimmed);
    trimmed.strip_suffix('}').unwrap_or(trimmed)
}

fn strip_quotes(value: &str) -> &str {
    let trimmed = value.trim_end();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn last_segment(value: &str) -> &str {
    value
        .rsplit(PATH_DELIMITER)
        .next()
        .unwrap_or(value)
        .trim()
}
