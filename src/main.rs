use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use relgraph::{Config, ExtendedRelationInfo, Introspector, RelationInfo, SchemaRegistry};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relgraph")]
#[command(about = "Inspect direct and transitive entity relations from a schema")]
struct Args {
    /// Schema file or directory (overrides schema_path from relgraph.toml)
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered entity names
    Entities,
    /// Direct (depth-1) relations of an entity
    Direct { entity: String },
    /// Direct and transitive relations of an entity
    Extended {
        entity: String,
        /// Maximum number of hops (default from config)
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.schema {
        Some(path) => Config::for_schema(path)?,
        None => Config::load()?,
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.relgraph.log_level.as_str()),
    )
    .init();

    log::info!("Loading schema from {}", config.schema_path().display());
    let registry = SchemaRegistry::load(config.schema_path())?;
    let introspector = Introspector::with_config(registry, &config);

    match args.command {
        Command::Entities => {
            let names: Vec<&str> = introspector.provider().entity_names().collect();
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
                OutputFormat::Table => names.iter().for_each(|n| println!("{}", n)),
            }
        }
        Command::Direct { entity } => {
            let relations = introspector.get_direct_relations(&entity)?;
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&relations)?),
                OutputFormat::Table => print_direct_table(&relations),
            }
        }
        Command::Extended { entity, max_depth } => {
            let relations = introspector.get_extended_relations(&entity, max_depth)?;
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*relations)?),
                OutputFormat::Table => print_extended_table(&relations),
            }
        }
    }

    Ok(())
}

fn flag(on: bool) -> &'static str {
    if on {
        "yes"
    } else {
        "-"
    }
}

fn print_direct_table(relations: &[RelationInfo]) {
    println!("{:-<90}", "");
    println!(
        "{:<24} {:<12} {:<20} {:>8} {:>8} {:>6} {:>6}",
        "Property", "Type", "Target", "Nullable", "Cascade", "Eager", "Lazy"
    );
    println!("{:-<90}", "");
    for r in relations {
        println!(
            "{:<24} {:<12} {:<20} {:>8} {:>8} {:>6} {:>6}",
            r.property_name,
            r.relation_type.to_string(),
            r.target,
            flag(r.is_nullable),
            flag(r.is_cascade),
            flag(r.is_eager),
            flag(r.is_lazy)
        );
    }
    println!("{:-<90}", "");
}

fn print_extended_table(relations: &[ExtendedRelationInfo]) {
    println!("{:-<110}", "");
    println!(
        "{:<32} {:<12} {:<12} {:<20} {:>5} {:>8} {:>8} {:>6} {:>6}",
        "Property", "Type", "Aggregated", "Target", "Depth", "Nullable", "Cascade", "Eager", "Lazy"
    );
    println!("{:-<110}", "");
    for r in relations {
        println!(
            "{:<32} {:<12} {:<12} {:<20} {:>5} {:>8} {:>8} {:>6} {:>6}",
            r.property_name,
            r.relation_type.to_string(),
            r.aggregated_cardinality.to_string(),
            r.target,
            r.depth(),
            flag(r.is_nullable),
            flag(r.is_cascade),
            flag(r.is_eager),
            flag(r.is_lazy)
        );
    }
    println!("{:-<110}", "");
}
