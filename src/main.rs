use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing::trace;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use cppsim::{analyze, driver};

fn main() -> anyhow::Result<()> {
    initialize_logging();

    let cppsim = Cppsim::parse();

    match cppsim.subcmd {
        CppsimSubcommand::Analyze(opts) => run_analyze(opts)?,
        CppsimSubcommand::Vocabulary(opts) => {
            let symbols = driver::load_symbols(opts.vocabulary.as_deref())?;
            println!("{}", symbols.to_json()?);
        }
    }

    Ok(())
}

fn run_analyze(opts: AnalyzeOpts) -> anyhow::Result<()> {
    let symbols = driver::load_symbols(opts.vocabulary.as_deref())?;
    let source = driver::read_source(opts.code.as_deref(), opts.source.as_deref())?;
    trace!(source_len = source.len(), "Read source");

    let analysis = analyze(&source, &symbols);

    if let Some(dir) = opts.emit_dir.as_ref() {
        driver::emit_artifacts(dir, &analysis)?;
    }

    println!("{}", driver::render_output(&analysis, opts.json)?);
    Ok(())
}

fn initialize_logging() {
    let env_filter = env::var("RUST_LOG").unwrap_or_default();
    let filter = EnvFilter::from_str(&env_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .init();
}

#[derive(clap::Parser)]
#[clap(name = "cppsim", about = "Classify, check and draw toy C-like statements.")]
struct Cppsim {
    #[clap(subcommand)]
    subcmd: CppsimSubcommand,
}

#[derive(clap::Subcommand)]
enum CppsimSubcommand {
    /// Tokenize a statement and report syntax, semantics and its parse tree
    Analyze(AnalyzeOpts),
    /// Print the active vocabulary as JSON
    Vocabulary(VocabularyOpts),
}

#[derive(clap::Parser, Debug)]
struct AnalyzeOpts {
    /// Source file; stdin is read when neither this nor --code is given
    source: Option<PathBuf>,

    /// Analyze this text instead of a file
    #[clap(short, long, conflicts_with = "source")]
    code: Option<String>,

    /// JSON vocabulary replacing the standard lexeme table
    #[clap(long)]
    vocabulary: Option<PathBuf>,

    /// Print the analysis as JSON
    #[clap(long)]
    json: bool,

    /// Also write tokens.json, analysis.json and tree.txt into this directory
    #[clap(long)]
    emit_dir: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct VocabularyOpts {
    /// JSON vocabulary to print instead of the standard one
    #[clap(long)]
    vocabulary: Option<PathBuf>,
}
