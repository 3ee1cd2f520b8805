//! xtask - Developer entry point for the storefront suite
//!
//! ```text
//! cargo xtask run --env local --browser firefox --workers 2
//! cargo xtask serve --port 3000
//! cargo xtask browsers
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront_e2e::{BrowserKind, BrowserSession, Runner, SuiteConfig, mock_site, scenarios};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Run and support the storefront end-to-end suite", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the suite (flags override .env.<env> and the environment)
    Run(RunArgs),

    /// Serve the local mock storefront
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },

    /// List supported browser targets
    Browsers,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Environment file to load (.env.<ENV>); defaults to TEST_ENV or "dev"
    #[arg(long)]
    env: Option<String>,

    /// Directory holding the .env files
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Browser target, see `xtask browsers`
    #[arg(long)]
    browser: Option<BrowserKind>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    workers: Option<usize>,

    #[arg(long)]
    retries: Option<u32>,

    /// Run tests of a suite concurrently
    #[arg(long)]
    parallel: bool,

    /// Only run tests whose "<suite> > <name>" title matches this regex
    #[arg(long)]
    grep: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    storefront_e2e::logging::init();

    match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::Serve { port } => serve(port).await,
        Commands::Browsers => {
            for kind in BrowserKind::ALL {
                let device = kind.device();
                println!(
                    "{:<15} {:<16} {:<9} {}x{}",
                    kind.key(),
                    device.name,
                    device.engine.as_str(),
                    device.viewport.width,
                    device.viewport.height
                );
            }
            Ok(())
        }
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = match &args.env {
        Some(env) => SuiteConfig::load_env(&args.root, env)?,
        None => SuiteConfig::load(&args.root)?,
    };
    if let Some(browser) = args.browser {
        config.browser = browser;
    }
    if args.headed {
        if config.ci {
            tracing::warn!("--headed ignored on CI");
        } else {
            config.headless = false;
        }
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url
            .parse()
            .with_context(|| format!("invalid --base-url '{}'", base_url))?;
    }
    if let Some(workers) = args.workers {
        if workers == 0 {
            bail!("--workers must be at least 1");
        }
        config.workers = workers;
    }
    if let Some(retries) = args.retries {
        config.retries = retries;
    }
    config.parallel |= args.parallel;

    let selected = match &args.grep {
        Some(pattern) => scenarios::filter(scenarios::all(), pattern)?,
        None => scenarios::all(),
    };
    if selected.is_empty() {
        bail!("no tests match the given filter");
    }

    let session = BrowserSession::launch(&config).await?;
    let report = Runner::new(&session, &config).run(&selected).await;
    if let Err(e) = session.close().await {
        tracing::warn!("Browser shutdown failed: {}", e);
    }

    let path = report.write(&config.output_dir).await?;
    println!("Report: {}", path.display());

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

async fn serve(port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("bind port {}", port))?;
    let addr = listener.local_addr()?;
    tracing::info!("Mock storefront listening on http://{}", addr);
    axum::serve(listener, mock_site::router()).await?;
    Ok(())
}
