//! Notices
//!
//! Short-lived messages shown to the customer after an action, e.g. the order
//! confirmation or a rejected checkout.

use std::fmt;

use crate::checkout::{CheckoutError, OrderConfirmation};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeVariant {
    /// Informational
    #[default]
    Default,

    /// Something went wrong and needs the customer's attention
    Destructive,
}

/// A titled message for the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Headline
    pub title: String,

    /// Body text
    pub description: String,

    /// Visual weight
    pub variant: NoticeVariant,
}

impl Notice {
    /// Informational notice.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    /// Destructive notice.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    /// Confirmation for a placed order.
    pub fn order_placed(confirmation: &OrderConfirmation<'_>) -> Self {
        Self::info("Order placed!", confirmation.description())
    }

    /// Whether the notice reports a failure.
    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

impl From<&CheckoutError> for Notice {
    fn from(error: &CheckoutError) -> Self {
        match error {
            CheckoutError::EmptyCart => {
                Notice::destructive("Your cart is empty", "Add products to place an order")
            }
            CheckoutError::MissingFields(fields) => {
                let listed = fields
                    .iter()
                    .map(|field| field.label())
                    .collect::<Vec<_>>()
                    .join(", ");

                Notice::destructive(
                    "Fill in the required fields",
                    format!("Name, phone and address are required to order (missing: {listed})"),
                )
            }
            CheckoutError::TotalPrice(_) | CheckoutError::Money(_) => {
                Notice::destructive("Could not price the order", error.to_string())
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
