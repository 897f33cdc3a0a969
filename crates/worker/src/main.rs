use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tickerlens_core::domain::comparison::METRICS;
use tickerlens_core::market::FinnhubClient;

#[derive(Debug, Parser)]
#[command(name = "tickerlens_worker")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or upgrade the database schema.
    Migrate,

    /// Score the trailing week of news for each ticker and record today's history row.
    News {
        #[arg(long = "ticker", required = true)]
        tickers: Vec<String>,

        /// Score date (YYYY-MM-DD). Defaults to today's local date.
        #[arg(long)]
        date: Option<String>,

        /// Do everything except writing to the database.
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare fundamentals of two or more tickers and print the result as JSON.
    Compare {
        #[arg(required = true, num_args = 2..)]
        tickers: Vec<String>,
    },

    /// Print one page of sentiment history.
    History {
        #[arg(long, default_value_t = 1)]
        page: i64,
    },

    /// Print the wishlist.
    Wishlist,

    /// Print the portfolio.
    Portfolio,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = tickerlens_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Migrate => {
            let pool = open_database(&settings).await?;
            tracing::info!(database_url = settings.database_url(), "schema up to date");
            pool.close().await;
        }
        Command::News {
            tickers,
            date,
            dry_run,
        } => {
            let date = resolve_date(date.as_deref())?;
            let market = FinnhubClient::from_settings(&settings)?;
            let pool = if dry_run {
                None
            } else {
                Some(open_database(&settings).await?)
            };

            let mut failures = 0usize;
            for ticker in &tickers {
                match tickerlens_core::flow::news::score_ticker_news(
                    &market,
                    pool.as_ref(),
                    ticker,
                    date,
                )
                .await
                {
                    Ok(out) => {
                        tracing::info!(
                            %ticker,
                            %date,
                            dry_run,
                            articles = out.news.len(),
                            overall_score = out.overall_score,
                            "news scored"
                        );
                    }
                    Err(err) => {
                        failures += 1;
                        sentry_anyhow::capture_anyhow(&err);
                        tracing::error!(%ticker, error = %format!("{err:#}"), "news scoring failed");
                    }
                }
            }

            anyhow::ensure!(
                failures == 0,
                "{failures} of {} tickers failed",
                tickers.len()
            );
        }
        Command::Compare { tickers } => {
            let tickers = tickerlens_core::flow::compare::normalize_tickers(&tickers)?;
            let market = FinnhubClient::from_settings(&settings)?;
            let result =
                tickerlens_core::flow::compare::compare_tickers(&market, METRICS, &tickers).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::History { page } => {
            let pool = open_database(&settings).await?;
            let page = tickerlens_core::storage::history::list_page(&pool, page).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Wishlist => {
            let pool = open_database(&settings).await?;
            let items = tickerlens_core::storage::wishlist::list(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Command::Portfolio => {
            let pool = open_database(&settings).await?;
            let holdings = tickerlens_core::storage::portfolio::list(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&holdings)?);
        }
    }

    Ok(())
}

async fn open_database(
    settings: &tickerlens_core::config::Settings,
) -> anyhow::Result<sqlx::SqlitePool> {
    let pool = tickerlens_core::storage::connect(settings.database_url())
        .await
        .context("connect DATABASE_URL failed")?;
    tickerlens_core::storage::migrate(&pool).await?;
    Ok(pool)
}

fn init_sentry(settings: &tickerlens_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

fn resolve_date(date_arg: Option<&str>) -> anyhow::Result<chrono::NaiveDate> {
    match date_arg {
        Some(s) => chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --date {s}, expected YYYY-MM-DD")),
        None => Ok(tickerlens_core::time::window::today()),
    }
}
