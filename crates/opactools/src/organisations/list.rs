use crate::organisations::Directory;
use crate::prelude::{println, *};
use opactools_core::organisations::OrganisationList;

/// Options for building the organisation list
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Build the organisation list for the active language:
  opactools organisations list

  # Force a rebuild, ignoring a fresh cache file:
  opactools organisations list --refresh

  # Swedish list as JSON:
  opactools organisations list --language sv --json

NOTES:
  - The list is cached per language as organisations_list_<lang>.json under
    the configured cache directory and reused within the configured TTL
  - A failed cache write is reported as a warning; the list is still printed
  - Sectors come from the sector_str_mv facet, locations from the building
    facet limited to the 0/ prefix")]
pub struct ListOptions {
    /// Ignore a fresh cache file and force a rebuild
    #[arg(long)]
    pub refresh: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the list command
pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let config = global.portal_config()?;
    let directory = Directory::new(config, global.language.clone())?;

    if global.verbose {
        println!("Display language: {}", directory.language());
    }

    let list = directory
        .organisations_list(options.refresh, !options.json)
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        output_table(&list);
    }

    Ok(())
}

fn output_table(list: &OrganisationList) {
    let total: usize = list.values().map(Vec::len).sum();
    println!("{} sector(s), {} location(s):\n", list.len(), total);

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Sector", "Name", "Organisation", "Link"]);

    for (sector, entries) in list {
        for entry in entries {
            table.add_row(prettytable::row![
                sector,
                entry.name,
                entry.organisation.as_deref().unwrap_or("-"),
                entry.link
            ]);
        }
    }

    table.printstd();
}
