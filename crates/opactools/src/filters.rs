use crate::prelude::{println, *};
use opactools_core::filters::{
    format_date_range_filter_entry, format_geographic_filter_entry, is_date_range_filter,
    parse_date_range_filter, FilterEntry,
};

/// Filters module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "filters")]
#[command(about = "Search filter translation operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Parse a backend filter expression into a date-range descriptor
    #[clap(name = "parse")]
    Parse(ParseOptions),

    /// Format an applied-filter entry for display
    #[clap(name = "display")]
    Display(DisplayOptions),
}

/// Options for parsing a filter expression
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Parse an explicit range operator:
  opactools filters parse 'Intersects|[1900 TO 2000]'

  # Ranges without an operator default to the overlap type:
  opactools filters parse '[1900 TO 2000]'

  # Anything else is not a range (reported, not an error):
  opactools filters parse 'building:\"0/Helka/\"'

NOTES:
  - Bounds are either * or digit/hyphen date tokens
  - With --json a non-range prints null")]
pub struct ParseOptions {
    /// Filter expression as stored in the applied-filters list
    pub filter: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for formatting an applied-filter entry
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Date-range entry on the configured date-range field:
  opactools filters display search_daterange_mv '[* TO 2000]'

  # Any other field passes through unchanged:
  opactools filters display genre_facet dissertations

NOTES:
  - Date-range formatting only applies to the date_range_field named in the
    portal configuration; without one, detection is disabled
  - Geographic entries are currently passed through unchanged")]
pub struct DisplayOptions {
    /// Filter field name
    pub field: String,

    /// Filter expression
    pub value: String,

    /// Display text produced so far, defaults to the raw value
    #[arg(long)]
    pub display_text: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Parse(options) => run_parse(options),
        Commands::Display(options) => run_display(options, &global),
    }
}

fn run_parse(options: ParseOptions) -> Result<()> {
    let parsed = parse_date_range_filter(&options.filter);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    match parsed {
        Some(range) => {
            let mut table = crate::prelude::new_table();
            table.add_row(prettytable::row!["From", "To", "Type"]);
            table.add_row(prettytable::row![range.from, range.to, range.range_type]);
            table.printstd();
        }
        None => println!("Not a range filter."),
    }

    Ok(())
}

fn run_display(options: DisplayOptions, global: &crate::Global) -> Result<()> {
    let config = global.portal_config()?;

    let mut entry = FilterEntry::new(options.field, options.value);
    if let Some(display_text) = options.display_text {
        entry.display_text = display_text;
    }

    let entry = if is_date_range_filter(&entry.field, config.date_range_field.as_deref()) {
        format_date_range_filter_entry(entry)
    } else {
        format_geographic_filter_entry(entry)
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{}", entry.display_text);
    }

    Ok(())
}
