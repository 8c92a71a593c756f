use anyhow::Result;
use clap::{Parser, Subcommand};
use fw_core::feedback::{ChangeKind, Priority, SiteArea};
use fw_widget::{
    ApiClient, FeedbackForm, SubmissionContext, SubmissionPipeline, WidgetController,
    WidgetStorage,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(name = "fw")]
#[command(about = "Feedback widget node", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the logging endpoint
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:8090",
        env = "FEEDBACK_API_URL"
    )]
    api_url: String,

    /// Directory holding the widget's local feedback log
    #[arg(long, global = true, env = "FEEDBACK_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the logging endpoint
    Serve,
    /// Submit a change request through the widget pipeline
    Submit {
        /// Area of the site (header, hero, about, ...)
        #[arg(long)]
        area: String,
        /// Type of change (color, image, text, layout, add, remove, other)
        #[arg(long, default_value = "other")]
        kind: String,
        /// What should change
        #[arg(long)]
        details: String,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Page the request refers to
        #[arg(long, default_value = "/")]
        page: String,
        /// Screen size as WxH
        #[arg(long, default_value = "unknown")]
        screen_size: String,
    },
    /// List stored feedback from the endpoint, local log as fallback
    List,
    /// Write the local feedback log to a JSON file
    Export {
        /// Output path; defaults to feedback-<date>.json
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Clear the local feedback log
    ClearLog,
    /// Forget that onboarding was completed
    ResetOnboarding,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Serve = cli.command {
        let config = fw_api::load_config()?;
        return fw_api::run(config).await;
    }

    fw_core::logging::init_with("fw-cli", false);

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(WidgetStorage::default_dir);
    let storage = Arc::new(WidgetStorage::new(data_dir));

    match cli.command {
        Commands::Serve => unreachable!("handled above"),
        Commands::Submit {
            area,
            kind,
            details,
            priority,
            page,
            screen_size,
        } => {
            let form = FeedbackForm {
                area: SiteArea::from(area.as_str()),
                change_kind: ChangeKind::from(kind.as_str()),
                details,
                priority: Priority::from(priority.as_str()),
            };
            let context = SubmissionContext {
                page,
                screen_size,
                ..SubmissionContext::default()
            };
            submit_flow(storage, &cli.api_url, form, context).await?;
        }
        Commands::List => {
            list_feedback(storage, &cli.api_url).await?;
        }
        Commands::Export { output } => {
            let path = storage.export(output).await?;
            println!("Wrote {}", path.display());
        }
        Commands::ClearLog => {
            storage.clear().await?;
            println!("Local feedback log cleared.");
        }
        Commands::ResetOnboarding => {
            storage.reset_onboarding().await?;
            println!("Onboarding will run again next session.");
        }
    }

    Ok(())
}

/// Plays one widget session: first-time users see the onboarding view
/// before the form; the submission always ends on the success view.
async fn submit_flow(
    storage: Arc<WidgetStorage>,
    api_url: &str,
    form: FeedbackForm,
    context: SubmissionContext,
) -> Result<()> {
    let mut controller = WidgetController::init(storage.clone()).await;

    if let Some(delay) = controller.auto_open_delay() {
        tokio::time::sleep(delay).await;
        controller.open();
        println!("Welcome! This session collects change requests for the site prototype.");
        println!("Re-run `fw submit` any time you want something changed.");
        controller.start_exploring().await;
    }

    controller.trigger_click();

    let pipeline = SubmissionPipeline::new(ApiClient::new(api_url)?, storage);
    let entry = pipeline.submit(form, &context).await;
    controller.submission_succeeded();

    println!(
        "Thank you! Your change request has been logged ({}).",
        entry.id
    );

    controller.close();
    Ok(())
}

async fn list_feedback(storage: Arc<WidgetStorage>, api_url: &str) -> Result<()> {
    let api = ApiClient::new(api_url)?;
    let entries = match api.fetch_all().await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "endpoint not reachable, reading local log");
            storage.list().await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
