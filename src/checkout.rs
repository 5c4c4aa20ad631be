//! Checkout
//!
//! Turns a cart, or a line list submitted by a client, into the set of lines and
//! grand total that gets recorded as a sale. Submitted amounts are checked against
//! each other: a subtotal must equal quantity x price and the total must equal the
//! sum of subtotals.

use smallvec::SmallVec;
use thiserror::Error;
use uuid::Uuid;

use crate::{cart::Cart, payments::PaymentMethod};

/// Checkout validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to sell.
    #[error("items are required")]
    Empty,

    /// A line has a zero quantity (line index).
    #[error("item {0} must have a quantity of at least one")]
    ZeroQuantity(usize),

    /// A line has no product name (line index).
    #[error("item {0} is missing a product name")]
    MissingProductName(usize),

    /// A line's subtotal is not quantity x price (line index, expected, submitted).
    #[error("item {0} subtotal should be {1}, got {2}")]
    SubtotalMismatch(usize, u64, u64),

    /// The grand total is not the sum of subtotals (expected, submitted).
    #[error("total should be {0}, got {1}")]
    TotalMismatch(u64, u64),

    /// An amount does not fit in 64 bits.
    #[error("amount overflow")]
    Overflow,
}

/// One line of a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    /// Catalog product, when known
    pub product_id: Option<Uuid>,

    /// Product name at the time of sale
    pub product_name: String,

    /// Units sold
    pub quantity: u32,

    /// Unit price in minor units
    pub price: u64,

    /// Quantity x price
    pub subtotal: u64,
}

impl CheckoutLine {
    /// Build a line, computing its subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Overflow`] if quantity x price overflows.
    pub fn new(
        product_id: Option<Uuid>,
        product_name: impl Into<String>,
        quantity: u32,
        price: u64,
    ) -> Result<Self, CheckoutError> {
        let subtotal = price
            .checked_mul(u64::from(quantity))
            .ok_or(CheckoutError::Overflow)?;

        Ok(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            price,
            subtotal,
        })
    }
}

/// A validated sale, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    lines: SmallVec<[CheckoutLine; 8]>,
    payment: PaymentMethod,
    total: u64,
}

impl Checkout {
    /// Build a checkout from the current contents of a cart.
    ///
    /// The cart is left untouched; clearing it is the caller's job once the sale
    /// has been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Empty`] for an empty cart, or
    /// [`CheckoutError::Overflow`] if an amount overflows.
    pub fn from_cart(cart: &Cart, payment: PaymentMethod) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::Empty);
        }

        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                CheckoutLine::new(
                    Some(line.product_id),
                    line.name.clone(),
                    line.quantity,
                    line.price,
                )
            })
            .collect::<Result<SmallVec<[CheckoutLine; 8]>, _>>()?;

        let total = sum_subtotals(&lines)?;

        Ok(Self {
            lines,
            payment,
            total,
        })
    }

    /// Validate lines and a total submitted by a client.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing the first inconsistency found.
    pub fn from_submitted(
        lines: impl IntoIterator<Item = CheckoutLine>,
        payment: PaymentMethod,
        total: u64,
    ) -> Result<Self, CheckoutError> {
        let lines: SmallVec<[CheckoutLine; 8]> = lines.into_iter().collect();

        if lines.is_empty() {
            return Err(CheckoutError::Empty);
        }

        for (index, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CheckoutError::ZeroQuantity(index));
            }

            if line.product_name.trim().is_empty() {
                return Err(CheckoutError::MissingProductName(index));
            }

            let expected = line
                .price
                .checked_mul(u64::from(line.quantity))
                .ok_or(CheckoutError::Overflow)?;

            if expected != line.subtotal {
                return Err(CheckoutError::SubtotalMismatch(
                    index,
                    expected,
                    line.subtotal,
                ));
            }
        }

        let expected_total = sum_subtotals(&lines)?;

        if expected_total != total {
            return Err(CheckoutError::TotalMismatch(expected_total, total));
        }

        Ok(Self {
            lines,
            payment,
            total,
        })
    }

    /// Sale lines in cart order.
    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    /// Chosen payment method.
    pub fn payment(&self) -> &PaymentMethod {
        &self.payment
    }

    /// Grand total in minor units.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Split into parts.
    pub fn into_parts(self) -> (SmallVec<[CheckoutLine; 8]>, PaymentMethod, u64) {
        (self.lines, self.payment, self.total)
    }
}

fn sum_subtotals(lines: &[CheckoutLine]) -> Result<u64, CheckoutError> {
    lines.iter().try_fold(0_u64, |total, line| {
        total
            .checked_add(line.subtotal)
            .ok_or(CheckoutError::Overflow)
    })
}
