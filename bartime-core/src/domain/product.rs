use serde::{Deserialize, Serialize};
use std::fmt;

/// Product classification that selects which special-time tables apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Commodity futures (the default for any unlisted product)
    Commodity,
    /// Stock index futures
    StockIndex,
    /// Treasury bond futures
    Bonds,
}

const STOCK_INDEX_PRODUCTS: &[&str] = &["IC", "IH", "IF", "IM"];
const BOND_PRODUCTS: &[&str] = &["T", "TS", "TF", "TL"];

impl ProductCategory {
    /// Classify a product identifier (e.g. `IF`, `rb`, `T`).
    ///
    /// Matching is exact; use [`product_id_from_symbol`] first when holding a
    /// full contract symbol such as `IF2406`.
    pub fn classify(product_id: &str) -> Self {
        if BOND_PRODUCTS.contains(&product_id) {
            ProductCategory::Bonds
        } else if STOCK_INDEX_PRODUCTS.contains(&product_id) {
            ProductCategory::StockIndex
        } else {
            ProductCategory::Commodity
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductCategory::Commodity => "commodity",
            ProductCategory::StockIndex => "stock-index",
            ProductCategory::Bonds => "bonds",
        };
        f.write_str(name)
    }
}

/// Strip the contract-month suffix from an instrument symbol: `IF2406` -> `IF`.
pub fn product_id_from_symbol(symbol: &str) -> &str {
    let end = symbol
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(symbol.len());
    &symbol[..end]
}
