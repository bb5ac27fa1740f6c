//! Normalization from raw feed records to the catalog types in
//! [`taplist_core::catalog`].

use serde_json::Value;

use taplist_core::{
    BreweryCatalog, PriceTier, ProductCatalog, ProductEntry, ProductSummary, SelectedValue,
};

use crate::error::ScraperError;
use crate::types::FeedRecord;

/// Number of (volume, price, service) slots a tap-list record can carry.
pub const PRICE_SLOTS: usize = 6;

const BREWERY_KEY: &str = "nomeDaCervejaria";
const EMBEDDED_VALUES_KEY: &str = "valorese";

/// Groups tap-list records by brewery.
///
/// Breweries keep first-seen order and products keep feed order within their
/// brewery. Records without a brewery name are grouped under `""`.
#[must_use]
pub fn normalize_brewery_records(records: &[FeedRecord]) -> BreweryCatalog {
    let mut catalog = BreweryCatalog::new();
    for record in records {
        let brewery = record.text(BREWERY_KEY).unwrap_or_default();
        catalog.push(&brewery, normalize_product_entry(record));
    }
    catalog
}

#[must_use]
pub fn normalize_product_entry(record: &FeedRecord) -> ProductEntry {
    ProductEntry {
        name: record.text("nome"),
        style: record.text("estilo"),
        abv: record.number("abv"),
        ibu: record.number("ibu"),
        price_tiers: price_tiers(record),
    }
}

/// Collects the populated price slots of a tap-list record, in slot order.
///
/// Slot 0 uses the bare keys `volume`/`preco`/`servico`; slots 1–5 append the
/// slot number. A slot is kept only if all three fields are populated.
#[must_use]
pub fn price_tiers(record: &FeedRecord) -> Vec<PriceTier> {
    (0..PRICE_SLOTS)
        .filter_map(|slot| {
            let volume = record.text(&slot_key("volume", slot))?;
            let price = record.scalar(&slot_key("preco", slot))?;
            let service = record.text(&slot_key("servico", slot))?;
            Some(PriceTier {
                volume,
                service,
                price,
            })
        })
        .collect()
}

fn slot_key(base: &str, slot: usize) -> String {
    if slot == 0 {
        base.to_string()
    } else {
        format!("{base}{slot}")
    }
}

/// Flattens menu records into product summaries, one per record.
#[must_use]
pub fn normalize_product_records(records: &[FeedRecord]) -> ProductCatalog {
    records.iter().map(normalize_product_summary).collect()
}

#[must_use]
pub fn normalize_product_summary(record: &FeedRecord) -> ProductSummary {
    ProductSummary {
        name: record.text("nome"),
        group_name: record.text("nomeDoGrupo"),
        value: selected_value(record),
    }
}

/// Picks the first positive `valor` from the record's embedded `valorese`
/// list. An unreadable list counts as empty.
#[must_use]
pub fn selected_value(record: &FeedRecord) -> SelectedValue {
    let candidates = embedded_candidates(record).unwrap_or_else(|e| {
        tracing::debug!(
            product = record.text("nome").as_deref().unwrap_or(""),
            error = %e,
            "treating unreadable candidate list as empty"
        );
        Vec::new()
    });

    SelectedValue::first_positive(
        candidates
            .iter()
            .filter_map(|c| c.get("valor").and_then(Value::as_f64)),
    )
}

/// Reads the `valorese` candidate list.
///
/// The field normally holds a JSON-encoded array inside a string. An inline
/// array is accepted as-is; an absent or `null` field is an empty list.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedEmbeddedField`] if the string does not
/// decode to a JSON array, or the field has any other type.
fn embedded_candidates(record: &FeedRecord) -> Result<Vec<Value>, ScraperError> {
    let malformed = |reason: String| ScraperError::MalformedEmbeddedField {
        field: EMBEDDED_VALUES_KEY.to_string(),
        reason,
    };

    match record.get(EMBEDDED_VALUES_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::String(raw)) => {
            serde_json::from_str::<Vec<Value>>(raw).map_err(|e| malformed(e.to_string()))
        }
        Some(other) => Err(malformed(format!("unexpected JSON type: {other}"))),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
