use clap::{Args as ClapArgs, Parser, Subcommand};
use sakenn::{open_source, CatalogSource, Distance, ItemId, Recommender, RecommenderConfig, ZeroVectorPolicy};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Sake recommendations by taste similarity
#[derive(Parser, Debug)]
#[command(name = "sakenn")]
#[command(about = "Recommend sake with a similar taste balance", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the items nearest to one item
    Recommend(RecommendArgs),
    /// List the most voted items
    Hot(HotArgs),
}

#[derive(ClapArgs, Debug)]
struct CatalogArgs {
    /// Catalog file (.json or .csv)
    #[arg(short, long)]
    catalog: PathBuf,

    /// JSON config file; command line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column holding the item id
    #[arg(long)]
    id_field: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct RecommendArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Id of the item to find neighbours for
    #[arg(long)]
    id: String,

    /// Number of neighbours
    #[arg(short)]
    k: Option<usize>,

    /// Distance metric: cosine, euclidean or manhattan
    #[arg(long)]
    metric: Option<Distance>,

    /// Cosine handling of all-zero vectors: reject or orthogonal
    #[arg(long)]
    zero_vectors: Option<ZeroVectorPolicy>,

    /// Leave the queried item out of its own results
    #[arg(long)]
    exclude_self: bool,
}

#[derive(ClapArgs, Debug)]
struct HotArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Minimum likes plus dislikes (exclusive)
    #[arg(long)]
    min_votes: Option<u64>,
}

fn load_config(args: &CatalogArgs) -> anyhow::Result<RecommenderConfig> {
    let mut config = match &args.config {
        Some(path) => RecommenderConfig::from_file(path)?,
        None => RecommenderConfig::default(),
    };
    if let Some(id_field) = &args.id_field {
        config.id_field = id_field.clone();
    }
    Ok(config)
}

fn recommender(args: &CatalogArgs, config: RecommenderConfig) -> anyhow::Result<Recommender> {
    let source = open_source(&args.catalog, &config.id_field)?;
    info!("Catalog source: {}", source.describe());
    Recommender::new(Arc::from(source), config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr, results to stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting SakeNN v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Recommend(cmd) => {
            let mut config = load_config(&cmd.catalog)?;
            if let Some(k) = cmd.k {
                config.k = k;
            }
            if let Some(metric) = cmd.metric {
                config.metric = metric;
            }
            if let Some(zero_vectors) = cmd.zero_vectors {
                config.zero_vectors = zero_vectors;
            }
            config.exclude_self |= cmd.exclude_self;

            let recommender = recommender(&cmd.catalog, config)?;
            for recommendation in recommender.recommend(&ItemId::parse(&cmd.id))? {
                println!("{}", serde_json::to_string(&recommendation)?);
            }
        }
        Command::Hot(cmd) => {
            let mut config = load_config(&cmd.catalog)?;
            if let Some(min_votes) = cmd.min_votes {
                config.min_votes = min_votes;
            }

            let recommender = recommender(&cmd.catalog, config)?;
            for item in recommender.popular()? {
                println!("{}", serde_json::to_string(&item)?);
            }
        }
    }

    Ok(())
}
