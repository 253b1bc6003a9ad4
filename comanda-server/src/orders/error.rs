use shared::models::OrderStatus;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Order subsystem errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(i64),

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order {0} is already paid")]
    AlreadyPaid(i64),

    #[error("Order has no items")]
    Empty,

    #[error("Invalid line item: {0}")]
    InvalidItem(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(i64),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
                    .with_detail("order_id", id)
            }
            OrderError::InvalidTransition { from, to } => {
                AppError::invalid_transition(from.as_str(), to.as_str())
            }
            OrderError::AlreadyPaid(id) => AppError::with_message(
                ErrorCode::OrderAlreadyPaid,
                format!("Order {} is already paid", id),
            )
            .with_detail("order_id", id),
            OrderError::Empty => AppError::new(ErrorCode::OrderEmpty),
            OrderError::InvalidItem(msg) => {
                AppError::with_message(ErrorCode::OrderItemInvalid, msg)
            }
            OrderError::MenuItemNotFound(id) => AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {} not found", id),
            )
            .with_detail("menu_item_id", id),
            OrderError::TableNotFound(id) => {
                AppError::with_message(ErrorCode::TableNotFound, format!("Table {} not found", id))
                    .with_detail("table_id", id)
            }
            OrderError::Forbidden(msg) => AppError::forbidden(msg),
            OrderError::Validation(msg) => AppError::validation(msg),
        }
    }
}

impl From<AppError> for OrderError {
    fn from(err: AppError) -> Self {
        OrderError::Validation(err.message)
    }
}
