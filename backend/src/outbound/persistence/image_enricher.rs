//! Attach stored images to fetched products.
//!
//! One batch statement per page looks up every attachment whose `res_id`
//! belongs to the page. PNG and JPEG payloads are inlined as base64 data
//! URIs; anything else is skipped.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::domain::catalog::ProductRecord;
use crate::domain::ports::{CatalogRepositoryError, StatementKind};

use super::query_builder::{SqlParam, SqlStatement};
use super::sql_reader::SqlReader;

const ATTACHMENTS_SQL: &str = "SELECT res_id::bigint AS res_id, mimetype::text AS mimetype, \
db_datas FROM ir_attachment \
WHERE db_datas IS NOT NULL AND length(db_datas) > 0 AND res_id = ANY($1) \
ORDER BY res_id, id";

const INLINE_MIME_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Encode `payload` as a data URI when `mimetype` is an inline image type.
///
/// # Examples
/// ```
/// use catalog_backend::outbound::persistence::data_uri;
///
/// assert_eq!(
///     data_uri(Some("image/png"), b"png").as_deref(),
///     Some("data:image/png;base64,cG5n")
/// );
/// assert_eq!(data_uri(Some("image/gif"), b"gif"), None);
/// ```
pub fn data_uri(mimetype: Option<&str>, payload: &[u8]) -> Option<String> {
    let mimetype = mimetype.filter(|mime| INLINE_MIME_TYPES.contains(mime))?;
    Some(format!("data:{mimetype};base64,{}", STANDARD.encode(payload)))
}

/// Batch attachment lookup for product pages.
pub struct ImageEnricher<R> {
    reader: Arc<R>,
}

impl<R: SqlReader> ImageEnricher<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    /// Append each record's images in attachment order.
    ///
    /// Issues no statement for an empty slice. A failed lookup fails the
    /// whole enrichment with [`StatementKind::Images`].
    pub async fn enrich(&self, records: &mut [ProductRecord]) -> Result<(), CatalogRepositoryError> {
        if records.is_empty() {
            return Ok(());
        }

        // Every position per id, so a repeated row gets the same images.
        let mut positions: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
        for (index, record) in records.iter().enumerate() {
            positions.entry(record.id).or_default().push(index);
        }
        let ids = positions
            .keys()
            .filter_map(|id| i64::try_from(*id).ok())
            .collect();
        let statement = SqlStatement::new(ATTACHMENTS_SQL, vec![SqlParam::BigIntArray(ids)]);

        let rows = self
            .reader
            .load_images(statement)
            .await
            .map_err(|err| err.into_repository_error(StatementKind::Images))?;

        for row in rows {
            let Some(uri) = data_uri(row.mimetype.as_deref(), &row.db_datas) else {
                debug!(res_id = row.res_id, mimetype = ?row.mimetype, "skipping non-inline attachment");
                continue;
            };
            let targets = u64::try_from(row.res_id)
                .ok()
                .and_then(|id| positions.get(&id));
            match targets {
                Some(indices) => {
                    for &index in indices {
                        records[index].images.push(uri.clone());
                    }
                }
                None => warn!(res_id = row.res_id, "attachment does not belong to the page"),
            }
        }
        Ok(())
    }
}
