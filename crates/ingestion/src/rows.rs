//! Field records to [`RawRow`]s.
//!
//! Records arrive as plain string fields in one of three layouts:
//! `date,open,high,low,close,volume`, `date,open,high,low,close`, or the
//! legacy `date,volume`. A leading header record is recognised by a date
//! field that does not decode followed by a non-numeric field.

use dayaxis_core::{CompatMode, RawRow};
use tracing::debug;

use crate::date_normalizer;

/// Outcome of converting a batch of field records.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub rows: Vec<RawRow>,
    /// A header record was found and dropped.
    pub header_skipped: bool,
    /// Records with a field count outside 2, 5 or 6, read positionally.
    pub odd_width: u64,
}

/// Convert field records into rows.
pub fn parse_records<R, F>(records: &[R], compat: CompatMode) -> ParsedRecords
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    let mut parsed = ParsedRecords::default();
    let mut records = records.iter().map(AsRef::<[F]>::as_ref).peekable();

    if records.peek().is_some_and(|first| is_header(*first)) {
        records.next();
        parsed.header_skipped = true;
        debug!("Skipping header record");
    }

    for fields in records {
        if fields.is_empty() {
            continue;
        }
        if !matches!(fields.len(), 2 | 5 | 6) {
            parsed.odd_width += 1;
        }
        parsed.rows.push(row_from_fields(fields, compat));
    }

    parsed
}

/// Build one row from its fields.
///
/// With [`CompatMode::two_field_volume`] on, a two-field record is
/// `(date, volume)`. Otherwise every record is read positionally, so the
/// second field of a two-field record lands in `open`.
pub fn row_from_fields<F: AsRef<str>>(fields: &[F], compat: CompatMode) -> RawRow {
    let field = |i: usize| fields.get(i).and_then(|f| parse_number(f.as_ref()));
    let mut row = RawRow::new(fields.first().map(|f| f.as_ref().trim()).unwrap_or_default());

    if fields.len() == 2 && compat.two_field_volume {
        row.volume = field(1);
        return row;
    }

    row.open = field(1);
    row.high = field(2);
    row.low = field(3);
    row.close = field(4);
    row.volume = field(5);
    row
}

/// A trimmed, finite decimal. Empty or non-numeric text is absent.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_header<F: AsRef<str>>(fields: &[F]) -> bool {
    let date_decodes = fields
        .first()
        .is_some_and(|f| date_normalizer::parse(f.as_ref()).is_ok());
    !date_decodes
        && fields
            .get(1)
            .is_some_and(|f| parse_number(f.as_ref()).is_none())
}
