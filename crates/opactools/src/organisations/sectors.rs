use crate::organisations::Directory;
use crate::prelude::{println, *};

/// Options for resolving an organisation's sectors
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Sectors for a building code:
  opactools organisations sectors Helka

  # As JSON:
  opactools organisations sectors Ateneum --json

NOTES:
  - Building codes are matched case-insensitively
  - An organisation absent from every facet defaults to the lib sector")]
pub struct SectorsOptions {
    /// Organisation id (building code without the 0/<code>/ wrapper)
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the sectors command
pub async fn run(options: SectorsOptions, global: crate::Global) -> Result<()> {
    let config = global.portal_config()?;
    let directory = Directory::new(config, global.language.clone())?;

    let sectors = directory.sectors_for(&options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&sectors)?);
    } else {
        println!("Sectors for {}:", options.id);
        for sector in &sectors {
            println!("  - {}", sector);
        }
    }

    Ok(())
}
