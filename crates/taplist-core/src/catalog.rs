//! Normalized catalog shapes published by the refresh engine.
//!
//! The serialized field names mirror the public JSON the API has always
//! served (Portuguese labels, e.g. `"Volumes e Preços"`), so the wire shape
//! is fixed by `#[serde(rename)]` rather than by the Rust field names.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A scalar taken verbatim from a feed record, e.g. a price that one store
/// sends as `12.5` and another as `"12,50"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeedScalar {
    Number(f64),
    Text(String),
}

impl FeedScalar {
    /// Numeric reading of the scalar. Text accepts both `.` and `,` as the
    /// decimal separator. `NaN` and infinities read as `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

/// One (volume, service, price) slot of a tap-list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTier {
    /// Serving size label, e.g. `"500ml"`.
    #[serde(rename = "Volume")]
    pub volume: String,
    /// Service/channel label, e.g. `"Growler"` or `"Copo"`.
    #[serde(rename = "Serviço")]
    pub service: String,
    #[serde(rename = "Preço")]
    pub price: FeedScalar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductEntry {
    #[serde(rename = "Nome")]
    pub name: Option<String>,
    #[serde(rename = "Estilo")]
    pub style: Option<String>,
    #[serde(rename = "ABV")]
    pub abv: Option<f64>,
    #[serde(rename = "IBU")]
    pub ibu: Option<f64>,
    #[serde(rename = "Volumes e Preços")]
    pub price_tiers: Vec<PriceTier>,
}

/// All products listed under one brewery, in feed order.
#[derive(Debug, Clone, PartialEq)]
pub struct BreweryGroup {
    pub brewery: String,
    pub products: Vec<ProductEntry>,
}

/// Brewery name → products, keeping breweries in first-seen order.
///
/// Serialized as a JSON object whose keys follow insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreweryCatalog {
    groups: Vec<BreweryGroup>,
}

impl BreweryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `product` under `brewery`, opening a new group the first time
    /// a brewery name is seen.
    pub fn push(&mut self, brewery: &str, product: ProductEntry) {
        if let Some(group) = self.groups.iter_mut().find(|g| g.brewery == brewery) {
            group.products.push(product);
        } else {
            self.groups.push(BreweryGroup {
                brewery: brewery.to_owned(),
                products: vec![product],
            });
        }
    }

    #[must_use]
    pub fn get(&self, brewery: &str) -> Option<&[ProductEntry]> {
        self.groups
            .iter()
            .find(|g| g.brewery == brewery)
            .map(|g| g.products.as_slice())
    }

    #[must_use]
    pub fn groups(&self) -> &[BreweryGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of products across every brewery.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.groups.iter().map(|g| g.products.len()).sum()
    }
}

impl Serialize for BreweryCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.brewery, &group.products)?;
        }
        map.end()
    }
}

/// The value shown for a menu product: the first positive candidate price,
/// or `N/A` when no candidate qualifies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectedValue {
    Available(f64),
    NotAvailable,
}

impl SelectedValue {
    /// Picks the first strictly positive value, in order.
    #[must_use]
    pub fn first_positive<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        candidates
            .into_iter()
            .find(|v| *v > 0.0)
            .map_or(Self::NotAvailable, Self::Available)
    }
}

impl Serialize for SelectedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    #[serde(rename = "Nome")]
    pub name: Option<String>,
    #[serde(rename = "Nome do Grupo")]
    pub group_name: Option<String>,
    #[serde(rename = "Valor")]
    pub value: SelectedValue,
}

pub type ProductCatalog = Vec<ProductSummary>;

/// The pair of catalogs published together by one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub breweries: BreweryCatalog,
    pub products: ProductCatalog,
}
