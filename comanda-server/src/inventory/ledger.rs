//! Stock ledger service
//!
//! Every quantity change appends an immutable [`InventoryTransaction`];
//! quantity is never clamped, so over-usage shows up as a negative balance
//! with the low-stock flag set. Crossing into low stock publishes an
//! `inventory.low_stock` event; no automatic reorder is taken.

use shared::event::EventPayload;
use shared::models::{
    Ingredient, IngredientCreate, InventoryTransaction, OperatorContext, StockAdjustment,
    TransactionKind,
};
use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::core::AppState;
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_payload};

/// Ledger subsystem errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(i64),

    #[error("Invalid stock adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("{0}")]
    Validation(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::IngredientNotFound(id) => AppError::with_message(
                ErrorCode::IngredientNotFound,
                format!("Ingredient {} not found", id),
            )
            .with_detail("ingredient_id", id),
            LedgerError::InvalidAdjustment(msg) => {
                AppError::with_message(ErrorCode::StockAdjustmentInvalid, msg)
            }
            LedgerError::Validation(msg) => AppError::validation(msg),
        }
    }
}

impl From<AppError> for LedgerError {
    fn from(err: AppError) -> Self {
        LedgerError::Validation(err.message)
    }
}

/// Stock ledger service
pub struct LedgerService<'a> {
    state: &'a AppState,
}

impl<'a> LedgerService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Register a new ingredient
    ///
    /// A positive opening quantity is recorded as an initial RESTOCK
    /// transaction so the ledger reconstructs the full balance.
    pub fn register(
        &self,
        ctx: &OperatorContext,
        payload: IngredientCreate,
    ) -> LedgerResult<Ingredient> {
        validate_payload(&payload)?;
        if !payload.quantity.is_finite() || !payload.reorder_level.is_finite() {
            return Err(LedgerError::Validation(
                "quantity and reorder_level must be finite numbers".to_string(),
            ));
        }

        let now = now_millis();
        let ingredient = self.state.store.ingredients.insert_with(|id| Ingredient {
            id,
            name: payload.name.clone(),
            quantity: payload.quantity,
            unit: payload.unit.clone(),
            category: payload.category,
            reorder_level: payload.reorder_level,
            cost_per_unit: payload.cost_per_unit,
            last_restocked_at: (payload.quantity > 0.0).then_some(now),
            last_used_at: None,
        });

        if ingredient.quantity > 0.0 {
            let transaction = self.append_transaction(
                ingredient.id,
                ingredient.quantity,
                TransactionKind::Restock,
                Some("initial stock".to_string()),
                now,
            );
            self.state.publish(
                "inventory",
                EventPayload::StockAdjusted {
                    ingredient: ingredient.clone(),
                    transaction,
                },
            );
        }

        tracing::info!(
            ingredient_id = ingredient.id,
            name = %ingredient.name,
            quantity = ingredient.quantity,
            operator_id = ctx.operator_id,
            "Ingredient registered"
        );
        Ok(ingredient)
    }

    /// Apply a signed stock delta
    ///
    /// Negative deltas are usage (stamps `last_used_at`), positive deltas
    /// are restocks (stamps `last_restocked_at`). The movement kind can be
    /// overridden, e.g. ADJUSTMENT for a stocktake correction.
    pub fn adjust(
        &self,
        ctx: &OperatorContext,
        id: i64,
        adjustment: StockAdjustment,
    ) -> LedgerResult<Ingredient> {
        if !adjustment.delta.is_finite() {
            return Err(LedgerError::InvalidAdjustment(format!(
                "delta must be a finite number, got {}",
                adjustment.delta
            )));
        }
        if adjustment.delta == 0.0 {
            return Err(LedgerError::InvalidAdjustment(
                "delta must be non-zero".to_string(),
            ));
        }
        validate_optional_text(&adjustment.note, "note", MAX_NOTE_LEN)?;

        let now = now_millis();
        let kind = adjustment.kind.unwrap_or(if adjustment.delta < 0.0 {
            TransactionKind::Usage
        } else {
            TransactionKind::Restock
        });

        let (ingredient, was_low) = {
            let mut ingredients = self.state.store.ingredients.write();
            let entry = ingredients
                .get_mut(&id)
                .ok_or(LedgerError::IngredientNotFound(id))?;

            let was_low = entry.is_low_stock();
            entry.quantity += adjustment.delta;
            if adjustment.delta < 0.0 {
                entry.last_used_at = Some(now);
            } else {
                entry.last_restocked_at = Some(now);
            }
            (entry.clone(), was_low)
        };

        let transaction =
            self.append_transaction(id, adjustment.delta, kind, adjustment.note, now);

        tracing::info!(
            ingredient_id = id,
            delta = adjustment.delta,
            kind = ?kind,
            quantity = ingredient.quantity,
            operator_id = ctx.operator_id,
            "Stock adjusted"
        );
        self.state.publish(
            "inventory",
            EventPayload::StockAdjusted {
                ingredient: ingredient.clone(),
                transaction,
            },
        );
        if !was_low && ingredient.is_low_stock() {
            tracing::warn!(
                ingredient_id = id,
                name = %ingredient.name,
                quantity = ingredient.quantity,
                reorder_level = ingredient.reorder_level,
                "Ingredient fell below reorder level"
            );
            self.state.publish(
                "inventory",
                EventPayload::LowStock {
                    ingredient: ingredient.clone(),
                },
            );
        }
        Ok(ingredient)
    }

    pub fn get(&self, id: i64) -> LedgerResult<Ingredient> {
        self.state
            .store
            .ingredients
            .get(id)
            .ok_or(LedgerError::IngredientNotFound(id))
    }

    pub fn list(&self) -> Vec<Ingredient> {
        self.state.store.ingredients.list()
    }

    /// Ingredients at or below their reorder level
    pub fn low_stock(&self) -> Vec<Ingredient> {
        self.state
            .store
            .ingredients
            .list()
            .into_iter()
            .filter(|i| i.is_low_stock())
            .collect()
    }

    /// Movement history for one ingredient, newest first
    pub fn transactions(&self, id: i64) -> LedgerResult<Vec<InventoryTransaction>> {
        self.get(id)?;
        let mut transactions: Vec<InventoryTransaction> = self
            .state
            .store
            .transactions
            .list()
            .into_iter()
            .filter(|t| t.ingredient_id == id)
            .collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(transactions)
    }

    fn append_transaction(
        &self,
        ingredient_id: i64,
        delta: f64,
        kind: TransactionKind,
        note: Option<String>,
        timestamp: i64,
    ) -> InventoryTransaction {
        self.state
            .store
            .transactions
            .insert_with(|id| InventoryTransaction {
                id,
                ingredient_id,
                delta,
                kind,
                timestamp,
                note,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use shared::models::{IngredientCategory, OperatorRole};

    fn test_state() -> AppState {
        AppState::initialize(&Config::from_env())
    }

    fn manager() -> OperatorContext {
        OperatorContext::new(1, "Carmen", OperatorRole::Manager)
    }

    fn register(state: &AppState, quantity: f64, reorder_level: f64) -> Ingredient {
        LedgerService::new(state)
            .register(&manager(), IngredientCreate {
                name: "Tomato".to_string(),
                quantity,
                unit: "kg".to_string(),
                category: IngredientCategory::Produce,
                reorder_level,
                cost_per_unit: 2.5,
            })
            .unwrap()
    }

    #[test]
    fn test_usage_below_zero_is_observable() {
        let state = test_state();
        let ingredient = register(&state, 3.0, 10.0);
        let service = LedgerService::new(&state);

        let updated = service
            .adjust(&manager(), ingredient.id, StockAdjustment {
                delta: -5.0,
                kind: None,
                note: None,
            })
            .unwrap();

        assert_eq!(updated.quantity, -2.0);
        assert!(updated.is_low_stock());
        assert!(updated.last_used_at.is_some());

        let transactions = service.transactions(ingredient.id).unwrap();
        // Initial restock + the usage
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].delta, -5.0);
        assert_eq!(transactions[0].kind, TransactionKind::Usage);
    }

    #[test]
    fn test_restock_stamps_last_restocked() {
        let state = test_state();
        let ingredient = register(&state, 0.0, 10.0);
        let service = LedgerService::new(&state);

        let updated = service
            .adjust(&manager(), ingredient.id, StockAdjustment {
                delta: 25.0,
                kind: None,
                note: Some("weekly delivery".to_string()),
            })
            .unwrap();

        assert_eq!(updated.quantity, 25.0);
        assert!(!updated.is_low_stock());
        assert!(updated.last_restocked_at.is_some());

        let transactions = service.transactions(ingredient.id).unwrap();
        assert_eq!(transactions[0].kind, TransactionKind::Restock);
        assert_eq!(transactions[0].note.as_deref(), Some("weekly delivery"));
    }

    #[test]
    fn test_explicit_kind_wins_over_inferred() {
        let state = test_state();
        let ingredient = register(&state, 20.0, 10.0);
        let service = LedgerService::new(&state);

        service
            .adjust(&manager(), ingredient.id, StockAdjustment {
                delta: -1.5,
                kind: Some(TransactionKind::Adjustment),
                note: Some("stocktake correction".to_string()),
            })
            .unwrap();

        let transactions = service.transactions(ingredient.id).unwrap();
        assert_eq!(transactions[0].kind, TransactionKind::Adjustment);
    }

    #[test]
    fn test_zero_delta_rejected() {
        let state = test_state();
        let ingredient = register(&state, 5.0, 10.0);
        let err = LedgerService::new(&state)
            .adjust(&manager(), ingredient.id, StockAdjustment {
                delta: 0.0,
                kind: None,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAdjustment(_)));
    }

    #[test]
    fn test_unknown_ingredient_rejected() {
        let state = test_state();
        let err = LedgerService::new(&state)
            .adjust(&manager(), 999, StockAdjustment {
                delta: 1.0,
                kind: None,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::IngredientNotFound(999)));
    }

    #[test]
    fn test_low_stock_listing() {
        let state = test_state();
        let service = LedgerService::new(&state);
        let low = register(&state, 2.0, 10.0);
        // Second ingredient is comfortably stocked
        service
            .register(&manager(), IngredientCreate {
                name: "Olive oil".to_string(),
                quantity: 40.0,
                unit: "l".to_string(),
                category: IngredientCategory::DryGoods,
                reorder_level: 5.0,
                cost_per_unit: 6.0,
            })
            .unwrap();

        let listing: Vec<i64> = service.low_stock().iter().map(|i| i.id).collect();
        assert_eq!(listing, vec![low.id]);
    }

    #[tokio::test]
    async fn test_low_stock_event_on_crossing_only() {
        let state = test_state();
        let ingredient = register(&state, 20.0, 10.0);
        let service = LedgerService::new(&state);
        let mut rx = state.events.subscribe();

        // 20 → 8: crosses the threshold
        service
            .adjust(&manager(), ingredient.id, StockAdjustment {
                delta: -12.0,
                kind: None,
                note: None,
            })
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().kind, "inventory.adjust");
        assert_eq!(rx.recv().await.unwrap().kind, "inventory.low_stock");

        // 8 → 6: already low, no second alert
        service
            .adjust(&manager(), ingredient.id, StockAdjustment {
                delta: -2.0,
                kind: None,
                note: None,
            })
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().kind, "inventory.adjust");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_register_seeds_initial_transaction() {
        let state = test_state();
        let ingredient = register(&state, 12.0, 5.0);
        let transactions = LedgerService::new(&state)
            .transactions(ingredient.id)
            .unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].delta, 12.0);
        assert_eq!(transactions[0].kind, TransactionKind::Restock);
    }
}
