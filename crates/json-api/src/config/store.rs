//! Store Config

use clap::Args;
use jiff::tz::TimeZone;

/// Store details.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Store name printed on receipts
    #[arg(long, env = "STORE_NAME", default_value = "Cellar")]
    pub store_name: String,

    /// IANA time zone used for receipt dates and daily sales
    #[arg(long, env = "STORE_TIME_ZONE", default_value = "Africa/Nairobi")]
    pub time_zone: String,
}

impl StoreConfig {
    /// Look the configured time zone up in the system database.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known time zone.
    pub fn resolve_time_zone(&self) -> Result<TimeZone, jiff::Error> {
        TimeZone::get(&self.time_zone)
    }
}
