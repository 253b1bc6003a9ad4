//! Order service
//!
//! Command processing for the order aggregate. Every mutation runs its
//! read-validate-write sequence inside the store's write section (tables
//! before orders, matching the store lock order), then publishes events
//! after the section has been released.

use shared::event::EventPayload;
use shared::models::{
    BulkSkip, BulkStatusOutcome, BulkStatusUpdate, KitchenSummary, OperatorContext, OperatorRole,
    Order, OrderCreate, OrderItem, OrderPriority, OrderStatus, Payment, PaymentRequest,
    PriorityCount, Table, TableStatus,
};

use crate::core::AppState;
use crate::utils::time::{minutes_between, now_millis};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_payload};

use super::error::{OrderError, OrderResult};
use super::money;

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub is_paid: Option<bool>,
}

/// Order service
pub struct OrderService<'a> {
    state: &'a AppState,
}

impl<'a> OrderService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a new order
    ///
    /// Line prices resolve as: submitted price, else current menu-item
    /// price, else 0. An explicit non-zero total from the caller wins over
    /// the computed sum.
    pub fn create(&self, ctx: &OperatorContext, payload: OrderCreate) -> OrderResult<Order> {
        validate_payload(&payload)?;
        validate_optional_text(
            &payload.special_instructions,
            "special_instructions",
            MAX_NOTE_LEN,
        )?;

        if payload.items.is_empty() {
            return Err(OrderError::Empty);
        }
        if let Some(total) = payload.total_amount {
            if !total.is_finite() || total < 0.0 {
                return Err(OrderError::Validation(format!(
                    "total_amount must be a non-negative number, got {}",
                    total
                )));
            }
        }
        if let Some(table_id) = payload.table_id {
            self.state
                .store
                .tables
                .get(table_id)
                .ok_or(OrderError::TableNotFound(table_id))?;
        }

        // Snapshot line items: name and price are fixed at creation
        let mut items = Vec::with_capacity(payload.items.len());
        for input in &payload.items {
            if input.quantity < 1 {
                return Err(OrderError::InvalidItem(format!(
                    "quantity must be >= 1, got {}",
                    input.quantity
                )));
            }
            let menu_item = match input.menu_item_id {
                Some(id) => Some(
                    self.state
                        .store
                        .menu_items
                        .get(id)
                        .ok_or(OrderError::MenuItemNotFound(id))?,
                ),
                None => None,
            };
            let price = input
                .price
                .or_else(|| menu_item.as_ref().map(|m| m.price))
                .unwrap_or(0.0);
            money::validate_price(price)?;
            let name = input
                .name
                .clone()
                .or_else(|| menu_item.as_ref().map(|m| m.name.clone()))
                .unwrap_or_else(|| "Unnamed item".to_string());

            items.push(OrderItem {
                menu_item_id: input.menu_item_id,
                name,
                price,
                quantity: input.quantity,
                note: input.note.clone(),
            });
        }

        let computed_total = money::order_total(&items);
        let total_amount = match payload.total_amount {
            Some(t) if t != 0.0 => money::to_f64(money::to_decimal(t)),
            _ => computed_total,
        };

        let now = now_millis();
        let order = self.state.store.orders.insert_with(|id| Order {
            id,
            table_id: payload.table_id,
            waiter_id: ctx.operator_id,
            waiter_name: ctx.operator_name.clone(),
            chef_id: None,
            chef_name: None,
            status: OrderStatus::Pending,
            priority: payload.priority.unwrap_or_default(),
            items: items.clone(),
            special_instructions: payload.special_instructions.clone(),
            is_paid: false,
            payment: None,
            total_amount,
            created_at: now,
            updated_at: now,
            started_preparing_at: None,
            completed_at: None,
            estimated_preparation_minutes: None,
            actual_preparation_minutes: None,
        });

        tracing::info!(
            order_id = order.id,
            waiter_id = ctx.operator_id,
            total = order.total_amount,
            items = order.items.len(),
            "Order created"
        );
        self.state.publish(
            "order",
            EventPayload::OrderCreated {
                order: order.clone(),
            },
        );
        Ok(order)
    }

    /// Fetch one order
    pub fn get(&self, ctx: &OperatorContext, id: i64) -> OrderResult<Order> {
        let order = self
            .state
            .store
            .orders
            .get(id)
            .ok_or(OrderError::NotFound(id))?;
        ensure_can_act(ctx, &order)?;
        Ok(order)
    }

    /// List orders, newest first; waiters only see their own
    pub fn list(&self, ctx: &OperatorContext, filter: OrderFilter) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .state
            .store
            .orders
            .list()
            .into_iter()
            .filter(|o| {
                ctx.role.can_manage_any_order() || o.waiter_id == ctx.operator_id
            })
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| filter.is_paid.is_none_or(|p| o.is_paid == p))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        orders
    }

    /// Apply one status transition with its side effects
    ///
    /// Any edge outside the transition table is rejected and the order is
    /// left untouched.
    pub fn update_status(
        &self,
        ctx: &OperatorContext,
        id: i64,
        new_status: OrderStatus,
    ) -> OrderResult<Order> {
        let mut freed_table: Option<Table> = None;
        let updated = {
            // Lock order: tables before orders
            let mut tables = self.state.store.tables.write();
            let mut orders = self.state.store.orders.write();
            let order = orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;
            ensure_can_act(ctx, order)?;

            let from = order.status;
            if !from.can_transition_to(new_status) {
                return Err(OrderError::InvalidTransition {
                    from,
                    to: new_status,
                });
            }

            let now = now_millis();
            order.status = new_status;
            order.updated_at = now;

            match new_status {
                OrderStatus::Preparing => {
                    order.chef_id = Some(ctx.operator_id);
                    order.chef_name = Some(ctx.operator_name.clone());
                    order.started_preparing_at = Some(now);
                    order.estimated_preparation_minutes =
                        Some(std::cmp::max(5, order.items.len() * 5) as i32);
                }
                OrderStatus::Served => {
                    order.completed_at = Some(now);
                    if let Some(started) = order.started_preparing_at {
                        order.actual_preparation_minutes =
                            Some(minutes_between(started, now) as i32);
                    }
                    if order.is_paid
                        && let Some(table_id) = order.table_id
                        && let Some(table) = tables.get_mut(&table_id)
                    {
                        table.status = TableStatus::Available;
                        table.reserved_by = None;
                        freed_table = Some(table.clone());
                    }
                }
                OrderStatus::Cancelled => {
                    order.completed_at = Some(now);
                }
                _ => {}
            }

            order.clone()
        };

        tracing::info!(
            order_id = id,
            status = updated.status.as_str(),
            operator_id = ctx.operator_id,
            "Order status updated"
        );
        if let Some(table) = freed_table {
            self.state
                .publish("table", EventPayload::TableUpdated { table });
        }
        self.state.publish(
            "order",
            EventPayload::OrderUpdated {
                order: updated.clone(),
            },
        );
        Ok(updated)
    }

    /// Process payment for an order
    ///
    /// The charged amount is always the order total. Serving staff settle
    /// before or after the order is served; once both served and paid, the
    /// table is released.
    pub fn process_payment(
        &self,
        ctx: &OperatorContext,
        id: i64,
        request: PaymentRequest,
    ) -> OrderResult<Order> {
        let mut freed_table: Option<Table> = None;
        let updated = {
            let mut tables = self.state.store.tables.write();
            let mut orders = self.state.store.orders.write();
            let order = orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;
            ensure_can_act(ctx, order)?;

            if order.is_paid {
                return Err(OrderError::AlreadyPaid(id));
            }
            if order.status == OrderStatus::Cancelled {
                return Err(OrderError::Validation(
                    "cannot pay a cancelled order".to_string(),
                ));
            }

            let now = now_millis();
            order.payment = Some(Payment {
                method: request.method,
                amount: order.total_amount,
                reference: request.reference,
                paid_at: now,
            });
            order.is_paid = true;
            order.updated_at = now;

            if order.status == OrderStatus::Served
                && let Some(table_id) = order.table_id
                && let Some(table) = tables.get_mut(&table_id)
            {
                table.status = TableStatus::Available;
                table.reserved_by = None;
                freed_table = Some(table.clone());
            }

            order.clone()
        };

        tracing::info!(
            order_id = id,
            amount = updated.total_amount,
            "Payment processed"
        );
        if let Some(table) = freed_table {
            self.state
                .publish("table", EventPayload::TableUpdated { table });
        }
        self.state.publish(
            "order",
            EventPayload::OrderPaid {
                order: updated.clone(),
            },
        );
        Ok(updated)
    }

    /// Apply one target status to many orders
    ///
    /// Orders that reject the transition are skipped and reported; the rest
    /// go through the full side-effect path.
    pub fn bulk_update_status(
        &self,
        ctx: &OperatorContext,
        payload: BulkStatusUpdate,
    ) -> BulkStatusOutcome {
        let mut outcome = BulkStatusOutcome {
            updated: Vec::new(),
            skipped: Vec::new(),
        };
        for order_id in payload.order_ids {
            match self.update_status(ctx, order_id, payload.status) {
                Ok(_) => outcome.updated.push(order_id),
                Err(err) => outcome.skipped.push(BulkSkip {
                    order_id,
                    reason: err.to_string(),
                }),
            }
        }
        outcome
    }

    /// Kitchen queue: open orders, priority refreshed from wait time,
    /// most urgent first
    pub fn kitchen_queue(&self) -> Vec<Order> {
        let now = now_millis();
        let mut queue: Vec<Order> = {
            let mut orders = self.state.store.orders.write();
            orders
                .values_mut()
                .filter(|o| !o.status.is_terminal())
                .map(|order| {
                    let wait = minutes_between(order.created_at, now);
                    order.priority = OrderPriority::for_wait_minutes(wait);
                    order.clone()
                })
                .collect()
        };
        queue.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.created_at.cmp(&b.created_at))
        });
        queue
    }

    /// Kitchen dashboard summary
    pub fn kitchen_summary(&self) -> KitchenSummary {
        let orders = self.state.store.orders.read();

        let total_pending = orders
            .values()
            .filter(|o| o.status == OrderStatus::Pending)
            .count();
        let total_preparing = orders
            .values()
            .filter(|o| o.status == OrderStatus::Preparing)
            .count();

        let prep_times: Vec<i32> = orders
            .values()
            .filter(|o| o.status == OrderStatus::Served)
            .filter_map(|o| o.actual_preparation_minutes)
            .collect();
        let avg_preparation_minutes = if prep_times.is_empty() {
            0.0
        } else {
            prep_times.iter().sum::<i32>() as f64 / prep_times.len() as f64
        };

        let orders_by_priority = [
            OrderPriority::Low,
            OrderPriority::Normal,
            OrderPriority::High,
            OrderPriority::Urgent,
        ]
        .into_iter()
        .map(|priority| PriorityCount {
            priority,
            count: orders
                .values()
                .filter(|o| {
                    matches!(o.status, OrderStatus::Pending | OrderStatus::Preparing)
                        && o.priority == priority
                })
                .count(),
        })
        .collect();

        KitchenSummary {
            total_pending,
            total_preparing,
            avg_preparation_minutes,
            orders_by_priority,
        }
    }
}

/// Waiters may only act on orders they own; kitchen and management roles
/// may act on any order.
fn ensure_can_act(ctx: &OperatorContext, order: &Order) -> OrderResult<()> {
    if ctx.role == OperatorRole::Waiter && order.waiter_id != ctx.operator_id {
        return Err(OrderError::Forbidden(
            "waiters may only act on their own orders".to_string(),
        ));
    }
    Ok(())
}
