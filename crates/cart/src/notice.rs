//! User-facing notices for failed cart operations.
//!
//! The store returns typed errors and never renders notification text; UI
//! layers that want the standard fire-and-forget messages map an error to a
//! [`Notice`] with [`Notice::from_error`] and display it however they like.

use crate::error::CartError;

/// Which store operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// [`crate::store::CartStore::add`]
    Add,
    /// [`crate::store::CartStore::remove`]
    Remove,
    /// [`crate::store::CartStore::set_amount`]
    Update,
}

/// A user-facing notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Adding a product to the cart failed.
    AddFailed,
    /// Removing a product from the cart failed.
    RemoveFailed,
    /// The requested quantity exceeds the available stock.
    OutOfStock,
    /// Changing a product's quantity failed.
    UpdateFailed,
}

impl Notice {
    /// Map an operation error to the notice a user should see.
    ///
    /// An out-of-stock rejection keeps its own message no matter which
    /// operation triggered it - adding an item already in the cart goes
    /// through the stock check and reports "out of stock", not "add failed".
    #[must_use]
    pub fn from_error(op: Operation, err: &CartError) -> Self {
        match err {
            CartError::OutOfStock { .. } => Self::OutOfStock,
            _ => match op {
                Operation::Add => Self::AddFailed,
                Operation::Remove => Self::RemoveFailed,
                Operation::Update => Self::UpdateFailed,
            },
        }
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let message = match self {
            Self::AddFailed => "add failed",
            Self::RemoveFailed => "remove failed",
            Self::OutOfStock => "out of stock",
            Self::UpdateFailed => "update failed",
        };
        f.write_str(message)
    }
}
