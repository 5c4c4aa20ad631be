use clap::{Args, Subcommand};

mod record;

#[derive(Debug, Args)]
pub(crate) struct SaleCommand {
    #[command(subcommand)]
    command: SaleSubcommand,
}

#[derive(Debug, Subcommand)]
enum SaleSubcommand {
    /// Ring up products by barcode and print the receipt
    Record(record::RecordSaleArgs),
}

pub(crate) async fn run(command: SaleCommand) -> Result<(), String> {
    match command.command {
        SaleSubcommand::Record(args) => record::run(args).await,
    }
}
