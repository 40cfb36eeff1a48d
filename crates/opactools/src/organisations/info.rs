//! Provider-routed organisation info commands
//!
//! Lookup, consortium, and details all resolve the organisation's sectors
//! first (unless given explicitly) and route to the museum or
//! library-directory provider accordingly.

use chrono::NaiveDate;

use crate::organisations::Directory;
use crate::prelude::{println, *};
use crate::providers::Provider;
use opactools_core::providers::OrganisationDetails;

/// Options for looking up an organisation
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Look up an organisation, resolving its sectors from the directory:
  opactools organisations lookup Helka

  # Route explicitly to the museum provider:
  opactools organisations lookup Ateneum --sector mus

NOTES:
  - Organisations in the mus sector are served by the museum API, everything
    else by the library directory
  - Sector resolution falls back to lib for unknown organisations")]
pub struct LookupOptions {
    /// Organisation id
    pub id: String,

    /// Sector to route by (repeatable); resolved from the directory when
    /// omitted
    #[arg(long = "sector")]
    pub sectors: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for fetching consortium information
#[derive(Debug, clap::Args, Clone)]
pub struct ConsortiumOptions {
    /// Organisation id
    pub id: String,

    /// Sector to route by (repeatable); resolved from the directory when
    /// omitted
    #[arg(long = "sector")]
    pub sectors: Vec<String>,

    /// Keep only these location ids (repeatable)
    #[arg(long = "location")]
    pub locations: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for fetching location details
#[derive(Debug, clap::Args, Clone)]
pub struct DetailsOptions {
    /// Organisation id
    pub id: String,

    /// Location id, when different from the organisation id
    #[arg(long)]
    pub location: Option<String>,

    /// First schedule date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last schedule date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Sector to route by (repeatable); resolved from the directory when
    /// omitted
    #[arg(long = "sector")]
    pub sectors: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

async fn routed_provider(
    directory: &Directory,
    sectors: Vec<String>,
    id: &str,
    verbose: bool,
) -> Result<Provider> {
    let (sectors, kind) = directory.provider_for(sectors, id).await?;
    if verbose {
        println!("Routing sectors {:?} via {:?}", sectors, kind);
    }
    Provider::for_kind(kind, directory.language())
}

/// Handle the lookup command
pub async fn run_lookup(options: LookupOptions, global: crate::Global) -> Result<()> {
    let config = global.portal_config()?;
    let directory = Directory::new(config, global.language.clone())?;
    let provider = routed_provider(&directory, options.sectors, &options.id, global.verbose).await?;

    let organisations = provider.lookup(&options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&organisations)?);
    } else if organisations.is_empty() {
        println!("No organisations found for {}.", options.id);
    } else {
        let mut table = crate::prelude::new_table();
        table.add_row(prettytable::row!["Id", "Name", "City", "Homepage"]);
        for organisation in &organisations {
            table.add_row(prettytable::row![
                organisation.id,
                organisation.name,
                organisation
                    .address
                    .as_ref()
                    .and_then(|address| address.city.as_deref())
                    .unwrap_or("-"),
                organisation.homepage.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();
    }

    Ok(())
}

/// Handle the consortium command
pub async fn run_consortium(options: ConsortiumOptions, global: crate::Global) -> Result<()> {
    let config = global.portal_config()?;
    let directory = Directory::new(config, global.language.clone())?;
    let provider = routed_provider(&directory, options.sectors, &options.id, global.verbose).await?;

    let consortium = provider.consortium_info(&options.id, &options.locations).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&consortium)?);
    } else {
        println!("{}", consortium.name);
        if let Some(description) = &consortium.description {
            println!("{}", description);
        }
        if let Some(homepage) = &consortium.homepage {
            println!("{}", homepage);
        }
        println!();

        let mut table = crate::prelude::new_table();
        table.add_row(prettytable::row!["Id", "Location", "City"]);
        for location in &consortium.locations {
            table.add_row(prettytable::row![
                location.id,
                location.name,
                location
                    .address
                    .as_ref()
                    .and_then(|address| address.city.as_deref())
                    .unwrap_or("-")
            ]);
        }
        table.printstd();
    }

    Ok(())
}

/// Handle the details command
pub async fn run_details(options: DetailsOptions, global: crate::Global) -> Result<()> {
    let config = global.portal_config()?;
    let directory = Directory::new(config, global.language.clone())?;
    let provider = routed_provider(&directory, options.sectors, &options.id, global.verbose).await?;

    let details = provider
        .details(
            &options.id,
            options.location.as_deref(),
            options.start_date,
            options.end_date,
        )
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        output_details(&details);
    }

    Ok(())
}

fn output_details(details: &OrganisationDetails) {
    println!("{} ({})", details.name, details.id);
    if let Some(address) = &details.address {
        let line: Vec<&str> = [
            address.street.as_deref(),
            address.zipcode.as_deref(),
            address.city.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !line.is_empty() {
            println!("{}", line.join(", "));
        }
    }
    if let Some(email) = &details.email {
        println!("{}", email);
    }
    if let Some(phone) = &details.phone {
        println!("{}", phone);
    }
    if let Some(homepage) = &details.homepage {
        println!("{}", homepage);
    }

    if !details.schedules.is_empty() {
        println!();
        let mut table = crate::prelude::new_table();
        table.add_row(prettytable::row!["Date", "Opens", "Closes"]);
        for day in &details.schedules {
            if day.closed {
                table.add_row(prettytable::row![day.date, "closed", ""]);
            } else {
                table.add_row(prettytable::row![
                    day.date,
                    day.opens.as_deref().unwrap_or("-"),
                    day.closes.as_deref().unwrap_or("-")
                ]);
            }
        }
        table.printstd();
    }
}
