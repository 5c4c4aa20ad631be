use std::str::FromStr;

use cellar::{
    cart::Cart,
    payments::{PaymentKind, PaymentMethod},
};
use cellar_app::{
    database::{self, Db},
    domain::{
        products::{PgProductsService, ProductsService},
        transactions::{PgTransactionsService, checkout},
        users::{PgUsersService, UsersService},
    },
};
use clap::Args;
use jiff::tz::TimeZone;

/// One `--item` value: a barcode with an optional `:quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemArg {
    barcode: String,
    quantity: u32,
}

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (barcode, quantity) = match value.rsplit_once(':') {
            Some((barcode, quantity)) => {
                let quantity = quantity
                    .trim()
                    .parse::<u32>()
                    .map_err(|error| format!("invalid quantity in {value:?}: {error}"))?;

                (barcode, quantity)
            }
            None => (value, 1),
        };

        let barcode = barcode.trim();

        if barcode.is_empty() {
            return Err(format!("missing barcode in {value:?}"));
        }

        if quantity == 0 {
            return Err(format!("quantity must be positive in {value:?}"));
        }

        Ok(Self {
            barcode: barcode.to_string(),
            quantity,
        })
    }
}

#[derive(Debug, Args)]
pub(crate) struct RecordSaleArgs {
    /// Email of the cashier recording the sale
    #[arg(long)]
    email: String,

    /// Product barcode, optionally followed by `:quantity`; repeatable
    #[arg(long = "item", required = true)]
    items: Vec<ItemArg>,

    /// Payment method: cash, card or mobile
    #[arg(long)]
    payment: PaymentKind,

    /// Customer phone number for mobile payments
    #[arg(long)]
    phone: Option<String>,

    /// Store name printed on the receipt
    #[arg(long, env = "STORE_NAME", default_value = "Cellar")]
    store_name: String,

    /// IANA time zone for the receipt date
    #[arg(long, env = "STORE_TIME_ZONE", default_value = "Africa/Nairobi")]
    time_zone: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RecordSaleArgs) -> Result<(), String> {
    let time_zone = TimeZone::get(&args.time_zone)
        .map_err(|error| format!("unknown time zone {:?}: {error}", args.time_zone))?;

    let payment = PaymentMethod::new(args.payment, args.phone.as_deref())
        .map_err(|error| format!("invalid payment: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);
    let products = PgProductsService::new(db.clone());
    let transactions = PgTransactionsService::new(db.clone());
    let users = PgUsersService::new(db);

    let cashier = users
        .find_user_by_email(&args.email)
        .await
        .map_err(|error| format!("failed to look up cashier: {error}"))?
        .ok_or_else(|| format!("no user with email {}", args.email))?;

    let mut cart = Cart::new();

    for item in &args.items {
        let product = products
            .find_product_by_barcode(&item.barcode)
            .await
            .map_err(|error| format!("failed to look up {}: {error}", item.barcode))?
            .ok_or_else(|| format!("no product with barcode {}", item.barcode))?;

        let snapshot = product.snapshot();
        let already = cart
            .line(snapshot.id)
            .map_or(0, |line| i64::from(line.quantity));

        cart.add_item(&snapshot);
        cart.update_quantity(snapshot.id, already + i64::from(item.quantity));
    }

    let sale = checkout(&transactions, cashier.uuid, &mut cart, payment)
        .await
        .map_err(|error| format!("failed to record sale: {error}"))?;

    let receipt = sale
        .receipt(&args.store_name, &time_zone)
        .render()
        .map_err(|error| format!("failed to render receipt: {error}"))?;

    print!("{receipt}");

    Ok(())
}
