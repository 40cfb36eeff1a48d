use crate::prelude::{println, *};

pub mod directory;
pub mod info;
pub mod list;
pub mod sectors;

pub use directory::Directory;

/// Organisations module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "organisations")]
#[command(about = "Organisation directory operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Build the sector-keyed organisation list
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Resolve the sectors an organisation belongs to
    #[clap(name = "sectors")]
    Sectors(sectors::SectorsOptions),

    /// Look up an organisation through its sector's info provider
    #[clap(name = "lookup")]
    Lookup(info::LookupOptions),

    /// Fetch consortium information for an organisation
    #[clap(name = "consortium")]
    Consortium(info::ConsortiumOptions),

    /// Fetch location details for an organisation
    #[clap(name = "details")]
    Details(info::DetailsOptions),
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running organisations module...");
    }

    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Sectors(options) => sectors::run(options, global).await,
        Commands::Lookup(options) => info::run_lookup(options, global).await,
        Commands::Consortium(options) => info::run_consortium(options, global).await,
        Commands::Details(options) => info::run_details(options, global).await,
    }
}
