use clap::{Parser, Subcommand};
use epigeo::augment::Field;
use epigeo::resolver::{NameResolver, OutputFormat, SourceDb, Standard, StandardizeOptions};
use epigeo::table::DataTable;
use epigeo::{FieldAugmenter, GeoError};
use std::fs;
use std::io::Read;

/// EpiGeo — country name standardization and reference-data augmentation.
///
/// Examples:
///   epigeo lookup france "south korea" --standard iso3
///   epigeo lookup "Korea, South" --db jhu
///   epigeo lookup g7 italy --region
///   epigeo regions
///   epigeo region "European Union"
///   epigeo augment data.json --geo-column location --field population --field capital
#[derive(Parser)]
#[command(name = "epigeo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Standardize free-text location names.
    Lookup {
        /// Location names (free text, iso codes or numeric codes).
        #[arg(required = true)]
        locations: Vec<String>,

        /// Output standard: iso2, iso3, name or numeric.
        #[arg(long, short = 's', default_value = "iso2", value_parser = parse_standard)]
        standard: Standard,

        /// Output shape: list, mapping or table.
        #[arg(long, short = 'o', default_value = "list", value_parser = parse_output)]
        output: OutputFormat,

        /// Apply a source dataset's naming overrides: jhu, worldometers or owid.
        #[arg(long, value_parser = parse_db)]
        db: Option<SourceDb>,

        /// Expand region names (e.g. G7, Europe) into their members.
        #[arg(long, short = 'r')]
        region: bool,
    },

    /// List all known region names.
    Regions,

    /// List the member iso3 codes of one region.
    Region { name: String },

    /// List the supported augmentation fields and their data sources.
    Fields,

    /// Add reference fields to a location-keyed JSON table.
    Augment {
        /// Input table as JSON ({"columns": [...], "rows": [...]}); "-" for stdin.
        input: String,

        /// Column holding the free-text location names.
        #[arg(long, default_value = "location")]
        geo_column: String,

        /// Field to add (repeatable). See `epigeo fields`.
        #[arg(long = "field", required = true, value_parser = parse_field)]
        fields: Vec<Field>,

        /// Recompute fields whose columns already exist.
        #[arg(long)]
        overload: bool,
    },
}

fn parse_standard(s: &str) -> Result<Standard, String> {
    s.parse().map_err(|e: GeoError| e.to_string())
}

fn parse_output(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: GeoError| e.to_string())
}

fn parse_db(s: &str) -> Result<SourceDb, String> {
    s.parse().map_err(|e: GeoError| e.to_string())
}

fn parse_field(s: &str) -> Result<Field, String> {
    s.parse().map_err(|e: GeoError| e.to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), GeoError> {
    match command {
        Command::Lookup {
            locations,
            standard,
            output,
            db,
            region,
        } => {
            let mut resolver = NameResolver::new(standard);
            let opts = StandardizeOptions {
                output,
                db,
                interpret_region: region,
            };
            let result = resolver.to_standard(&locations, &opts)?;
            print_json(&result.output)
        }

        Command::Regions => {
            let mut resolver = NameResolver::new(Standard::Iso3);
            let names = resolver.region_catalog()?.region_names();
            print_json(&names)
        }

        Command::Region { name } => {
            let mut resolver = NameResolver::new(Standard::Iso3);
            let members = resolver.region_catalog()?.countries_for(&name)?;
            print_json(&members)
        }

        Command::Fields => {
            let listing: Vec<serde_json::Value> = Field::all()
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "field": f.column_name(),
                        "source": f.source(),
                    })
                })
                .collect();
            print_json(&listing)
        }

        Command::Augment {
            input,
            geo_column,
            fields,
            overload,
        } => {
            let body = read_input(&input)?;
            let table: DataTable = serde_json::from_str(&body)?;
            let mut augmenter = FieldAugmenter::new(NameResolver::new(Standard::Iso2));
            let augmented = augmenter.add_fields(&fields, &table, &geo_column, overload)?;
            print_json(&augmented)
        }
    }
}

fn read_input(path: &str) -> Result<String, GeoError> {
    if path == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), GeoError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
