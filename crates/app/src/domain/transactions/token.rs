//! Sale tokens.

use jiff::Timestamp;
use rand::Rng;

/// Sale token prefix.
pub const SALE_TOKEN_PREFIX: &str = "SALE";

/// Generate a human-readable sale token: `SALE-<unix millis>-<6 hex digits>`.
#[must_use]
pub fn generate_sale_token(now: Timestamp) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..0x0100_0000);

    format!("{SALE_TOKEN_PREFIX}-{}-{suffix:06x}", now.as_millisecond())
}
