use crate::prelude::*;
use clap::Parser;

mod collate;
mod error;
mod filters;
mod organisations;
mod prelude;
mod providers;
mod solr;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Directory and search-filter tools for library discovery portals"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Path to the portal configuration file
    #[clap(long, env = "OPACTOOLS_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Override the display language
    #[clap(long, env = "OPACTOOLS_LANGUAGE", global = true)]
    language: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "OPACTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// Load the portal configuration, or defaults when no file is configured
    pub fn portal_config(&self) -> Result<opactools_core::config::PortalConfig> {
        match &self.config {
            Some(path) => opactools_core::config::PortalConfig::load(path).map_err(|e| {
                Error::Config(format!("Failed to load {}: {}", path.display(), e)).into()
            }),
            None => Ok(opactools_core::config::PortalConfig::default()),
        }
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Organisation directory operations
    Organisations(crate::organisations::App),

    /// Search filter translation operations
    Filters(crate::filters::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Organisations(sub_app) => crate::organisations::run(sub_app, app.global).await,
        SubCommands::Filters(sub_app) => crate::filters::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
