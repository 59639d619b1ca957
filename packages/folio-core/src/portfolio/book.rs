//! Holding book: the set of open positions and their lifecycle.

use crate::types::Holding;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Quantities below this are treated as fully liquidated.
const DUST: f64 = 1e-9;

/// On-disk holdings file, either a bare list or wrapped in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum HoldingsFile {
    List(Vec<Holding>),
    Wrapped { holdings: Vec<Holding> },
}

/// In-memory book of holdings, one per symbol.
#[derive(Debug, Clone, Default)]
pub struct HoldingBook {
    holdings: Vec<Holding>,
}

impl HoldingBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from existing holdings.
    ///
    /// Duplicate symbols are merged by summing quantity and cost.
    pub fn from_holdings(holdings: impl IntoIterator<Item = Holding>) -> Self {
        let mut book = Self::new();
        for holding in holdings {
            let symbol = holding.symbol.to_uppercase();
            match book.find_mut(&symbol) {
                Some(existing) => {
                    existing.quantity += holding.quantity;
                    existing.total_cost += holding.total_cost;
                }
                None => book.holdings.push(Holding::new(
                    &symbol,
                    holding.quantity,
                    holding.total_cost,
                )),
            }
        }
        book
    }

    /// Load holdings from a JSON file.
    ///
    /// A missing file yields an empty book.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "holdings file not found, starting empty");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let holdings = match serde_json::from_str(&content)? {
            HoldingsFile::List(holdings) => holdings,
            HoldingsFile::Wrapped { holdings } => holdings,
        };
        Ok(Self::from_holdings(holdings))
    }

    /// All holdings in insertion order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Find a holding by symbol (case-insensitive).
    pub fn find(&self, symbol: &str) -> Option<&Holding> {
        let symbol_upper = symbol.to_uppercase();
        self.holdings.iter().find(|h| h.symbol == symbol_upper)
    }

    fn find_mut(&mut self, symbol: &str) -> Option<&mut Holding> {
        let symbol_upper = symbol.to_uppercase();
        self.holdings.iter_mut().find(|h| h.symbol == symbol_upper)
    }

    /// Record a purchase.
    ///
    /// Creates the holding or adds to it; `cost` is the total paid for this
    /// purchase and accumulates into the cost basis.
    pub fn buy(&mut self, symbol: &str, quantity: f64, cost: f64) -> Result<Holding> {
        if !(quantity.is_finite() && quantity > 0.0) {
            return Err(Error::InvalidOperation(format!(
                "Buy quantity must be positive, got {}",
                quantity
            )));
        }
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(Error::InvalidOperation(format!(
                "Buy cost must be non-negative, got {}",
                cost
            )));
        }

        if let Some(existing) = self.find_mut(symbol) {
            existing.quantity += quantity;
            existing.total_cost += cost;
            return Ok(existing.clone());
        }

        let holding = Holding::new(symbol, quantity, cost);
        self.holdings.push(holding.clone());
        Ok(holding)
    }

    /// Record a sale.
    ///
    /// The cost basis shrinks in proportion to the units sold (average cost).
    /// Returns the remaining holding, or `None` once it is fully liquidated
    /// and removed from the book.
    pub fn sell(&mut self, symbol: &str, quantity: f64) -> Result<Option<Holding>> {
        if !(quantity.is_finite() && quantity > 0.0) {
            return Err(Error::InvalidOperation(format!(
                "Sell quantity must be positive, got {}",
                quantity
            )));
        }

        let symbol_upper = symbol.to_uppercase();
        let existing = self
            .find_mut(&symbol_upper)
            .ok_or_else(|| Error::HoldingNotFound(symbol_upper.clone()))?;

        if quantity > existing.quantity + DUST {
            return Err(Error::InvalidOperation(format!(
                "Cannot sell {} {}, only {} held",
                quantity, symbol_upper, existing.quantity
            )));
        }

        let remaining = existing.quantity - quantity;
        if remaining <= DUST {
            self.remove(&symbol_upper)?;
            return Ok(None);
        }

        existing.total_cost = existing.average_cost() * remaining;
        existing.quantity = remaining;
        Ok(Some(existing.clone()))
    }

    /// Remove a holding outright.
    pub fn remove(&mut self, symbol: &str) -> Result<Holding> {
        let symbol_upper = symbol.to_uppercase();
        let idx = self
            .holdings
            .iter()
            .position(|h| h.symbol == symbol_upper)
            .ok_or(Error::HoldingNotFound(symbol_upper))?;
        Ok(self.holdings.remove(idx))
    }
}
