//! System Library client - headless runner
//!
//! Drives the borrow page for one book against a live backend:
//!
//! ```text
//! system-library-client <book-id> [--publisher ID] [--year YEAR] [--due YYYY-MM-DD] [--wait-list]
//! system-library-client --loans [borrowed|returned]
//! system-library-client --upload <image-file>
//! ```

use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use system_library_client::{
    config::AppConfig,
    models::{CheckOutView, Status},
    page::{
        breadcrumbs, navigation::EntityKind, BorrowPage, HistoryNavigator, Navigator,
        PageAction, Route, SubmitOutcome, TracingNotifier,
    },
    repository::Repository,
    services::Services,
};

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(String::as_str)
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_log_directive().into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    tracing::info!(
        "Starting System Library client v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let repository = Repository::new(&config)?;
    let images = repository.images.clone();
    let services = Services::new(repository);

    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Some(file) = flag_value(&args, "--upload") {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file))?;
        let name = std::path::Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file);
        let url = images.upload(name, bytes).await?;
        tracing::info!("Image available at {}", url);
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--loans") {
        let view = match flag_value(&args, "--loans") {
            Some("returned") => CheckOutView::Returned,
            _ => CheckOutView::Borrowed(Status::Pending),
        };
        let page = services.loans.list_own(view).await?;
        tracing::info!("{} check-outs ({:?})", page.total_items, view);
        for check_out in page.items {
            tracing::info!(
                "#{:?} {} due {:?} returned={}",
                check_out.id,
                check_out.status(),
                check_out.end_time,
                check_out.returned()
            );
        }
        return Ok(());
    }

    let book_id: i64 = args
        .first()
        .ok_or_else(|| anyhow!("usage: system-library-client <book-id> [options]"))?
        .parse()
        .context("Book id must be a number")?;

    let route = Route::BorrowBook(book_id);
    let crumbs: Vec<String> = breadcrumbs(&route.path()).into_iter().map(|c| c.title).collect();
    tracing::debug!("{}", crumbs.join(" / "));

    let navigator = Arc::new(HistoryNavigator::new(&Route::list(EntityKind::Book).path()));
    navigator.go(&route.path());

    let mut page = BorrowPage::new(
        book_id,
        services.borrow.clone(),
        navigator.clone(),
        Arc::new(TracingNotifier),
    );
    page.mount().await?;

    if let Some(publisher) = flag_value(&args, "--publisher") {
        page.select_publisher(Some(publisher.parse().context("Invalid publisher id")?))
            .await;
    }
    if let Some(year) = flag_value(&args, "--year") {
        page.select_year(Some(year.parse().context("Invalid year")?)).await;
    }
    if let Some(due) = flag_value(&args, "--due") {
        let due = NaiveDate::parse_from_str(due, "%Y-%m-%d").context("Invalid due date")?;
        page.select_due_date(Some(due));
    }

    let view = page.view();
    tracing::info!(
        "{} by {}: publisher {:?}, year {:?}, {} left",
        view.title,
        view.authors,
        view.selected_publisher,
        view.selected_year,
        view.amount.map_or_else(|| "unknown".to_string(), |a| a.to_string())
    );

    match view.action {
        Some(PageAction::JoinWaitList { .. }) if args.iter().any(|a| a == "--wait-list") => {
            if let SubmitOutcome::Submitted(entry) = page.join_wait_list().await? {
                tracing::info!("Wait list entry {:?} created", entry.id);
            }
        }
        Some(PageAction::Borrow { .. }) if flag_value(&args, "--due").is_some() => {
            match page.borrow().await? {
                SubmitOutcome::Submitted(check_out) => {
                    tracing::info!("Check-out {:?} is {}", check_out.id, check_out.status());
                }
                SubmitOutcome::InvalidDate => tracing::warn!("A due date is required"),
                SubmitOutcome::Disabled => tracing::warn!("No copy left for this selection"),
            }
        }
        action => tracing::info!("Available action: {:?}", action),
    }

    tracing::debug!("Now at {:?}", navigator.current());
    Ok(())
}
