use clap::{Parser, Subcommand};

mod catalog;
mod db;
mod sale;
mod user;

#[derive(Debug, Parser)]
#[command(name = "cellar-app", about = "Cellar point-of-sale CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Catalog(catalog::CatalogCommand),
    Sale(sale::SaleCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Catalog(command) => catalog::run(command).await,
            Commands::Sale(command) => sale::run(command).await,
        }
    }
}
