//! Receipt
//!
//! Plain-text receipt for a recorded sale.

use std::io;

use jiff::Zoned;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{checkout::CheckoutLine, payments::PaymentKind};

/// Default receipt currency.
pub const DEFAULT_CURRENCY: &Currency = iso::KES;

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Amount is too large to format as money.
    #[error("amount {0} is too large to format")]
    AmountTooLarge(u64),

    /// Rendered output was not valid UTF-8.
    #[error("receipt is not valid UTF-8")]
    Encoding,

    /// IO error
    #[error("IO error")]
    IO,
}

/// Receipt for a single recorded sale.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Name printed in the header
    pub store_name: &'a str,

    /// Sale token, e.g. `SALE-1717171717171-a1b2c3`
    pub token: &'a str,

    /// When the sale was recorded, in the store's time zone
    pub issued_at: Zoned,

    /// Sold lines in order
    pub lines: &'a [CheckoutLine],

    /// Grand total in minor units
    pub total: u64,

    /// How the customer paid
    pub payment: PaymentKind,

    /// Currency for all amounts
    pub currency: &'static Currency,
}

impl Receipt<'_> {
    /// Write the receipt as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or the writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let rule = "-".repeat(40);

        writeln!(out, "{}", self.store_name).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "Transaction: {}", self.token).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "Date: {}", self.issued_at.strftime("%Y-%m-%d %H:%M:%S %Z"))
            .map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "{rule}").map_err(|_err| ReceiptError::IO)?;

        for line in self.lines {
            writeln!(
                out,
                "{} x{}  {}",
                line.product_name,
                line.quantity,
                self.money(line.subtotal)?
            )
            .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out, "{rule}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "TOTAL: {}", self.money(self.total)?).map_err(|_err| ReceiptError::IO)?;
        writeln!(
            out,
            "Payment: {}",
            self.payment.as_str().to_ascii_uppercase()
        )
        .map_err(|_err| ReceiptError::IO)?;
        writeln!(out).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "Thank you for your purchase!").map_err(|_err| ReceiptError::IO)
    }

    /// Render the receipt to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted.
    pub fn render(&self) -> Result<String, ReceiptError> {
        let mut buffer = Vec::new();

        self.write_to(&mut buffer)?;

        String::from_utf8(buffer).map_err(|_err| ReceiptError::Encoding)
    }

    fn money(&self, minor: u64) -> Result<Money<'static, Currency>, ReceiptError> {
        let amount = i64::try_from(minor).map_err(|_err| ReceiptError::AmountTooLarge(minor))?;

        Ok(Money::from_minor(amount, self.currency))
    }
}
