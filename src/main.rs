use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use photobatcher::api;
use photobatcher::assets::{AssetLoader, ConfigSource};
use photobatcher::models::{AppConfig, BatchRequest, UploadedImage};
use photobatcher::server;
use photobatcher::services::{
    archive_root, build_archive, download_file_name, BatchService, PreviewService,
};

#[derive(Parser)]
#[command(name = "photobatcher")]
#[command(about = "PhotoBatcher - listing-ready product photos for online marketplaces")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Process photos on disk into a zip archive
    Process {
        /// Target platform (repeat or comma-separate: ebay, poshmark, mercari)
        #[arg(short, long = "platform", required = true, value_delimiter = ',')]
        platforms: Vec<String>,

        /// Title used to name the archive
        #[arg(short, long)]
        title: Option<String>,

        /// Output zip path (defaults to the suggested download name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input image files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Render the enhanced preview of a single photo
    Preview {
        /// Input image file
        #[arg(short, long)]
        input: PathBuf,

        /// Output JPEG path
        #[arg(short, long)]
        output: PathBuf,

        /// Size the preview for this platform instead of the default
        #[arg(short, long)]
        platform: Option<String>,
    },
    /// List supported platforms and their output sizes
    Platforms,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PhotoBatcher API",
        description = "Listing-ready product photos for online marketplaces",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_batch,
        api::handle_preview,
        api::handle_platforms,
    ),
    components(schemas(
        api::BatchUpload,
        api::PreviewUpload,
        api::PlatformInfo,
    )),
    tags(
        (name = "Batch", description = "Batch processing into per-platform archives"),
        (name = "Preview", description = "Single image before/after preview")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process {
            platforms,
            title,
            output,
            files,
        }) => run_process_command(platforms, title, output, files),
        Some(Commands::Preview {
            input,
            output,
            platform,
        }) => run_preview_command(&input, &output, platform.as_deref()),
        Some(Commands::Platforms) => {
            run_platforms_command();
            Ok(())
        }
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photobatcher=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Run a batch over files on disk (no server needed)
fn run_process_command(
    platforms: Vec<String>,
    title: Option<String>,
    output: Option<PathBuf>,
    files: Vec<PathBuf>,
) -> anyhow::Result<()> {
    init_cli_logging();

    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    let service = BatchService::new(&config);

    let mut images = Vec::with_capacity(files.len());
    for path in &files {
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        images.push(UploadedImage::new(path.display().to_string(), bytes));
    }

    let batch = service.validate(BatchRequest {
        images,
        platforms,
        title,
    })?;
    let outcome = service.process(&batch)?;

    let now = chrono::Local::now().naive_local();
    let root = archive_root(batch.title.as_deref(), &config.product_name, now.date());
    let archive = build_archive(&root, &outcome.entries)?;

    let output = output.unwrap_or_else(|| {
        PathBuf::from(download_file_name(
            batch.title.as_deref(),
            &config.product_name,
            now,
        ))
    });
    std::fs::write(&output, &archive)?;

    println!(
        "Wrote {} ({} entries, {} bytes)",
        output.display(),
        outcome.entries.len(),
        archive.len()
    );
    for failure in &outcome.failures {
        eprintln!(
            "  skipped {} for {}: {}",
            failure.file_name, failure.platform, failure.error
        );
    }

    Ok(())
}

/// Render the preview of one file
fn run_preview_command(
    input: &Path,
    output: &Path,
    platform: Option<&str>,
) -> anyhow::Result<()> {
    init_cli_logging();

    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    let platform: Option<photo_pipeline::Platform> = platform.map(str::parse).transpose()?;

    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let jpeg = PreviewService::new(&config).render(&bytes, platform)?;

    std::fs::write(output, &jpeg)?;
    println!("Rendered {} ({} bytes)", output.display(), jpeg.len());

    Ok(())
}

/// Print the platform profile table
fn run_platforms_command() {
    println!("{:<10} {:<10} {:>10}", "ID", "LABEL", "SIZE");
    for platform in photo_pipeline::Platform::ALL {
        println!(
            "{:<10} {:<10} {:>10}",
            platform.id(),
            platform.label(),
            format!("{0}x{0}", platform.target_size())
        );
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);

    // Header
    println!("PhotoBatcher v{VERSION}");
    println!("Listing-ready product photos for online marketplaces\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    let config_source = match loader.config_source() {
        ConfigSource::Embedded => "embedded".to_string(),
        ConfigSource::File(path) => path.display().to_string(),
        ConfigSource::Missing(path) => format!("{} (not found, using embedded)", path.display()),
    };
    println!("  CONFIG_FILE = {config_source}");

    // Configuration section
    println!("\nConfiguration:");
    println!("  Product name:   {}", config.product_name);
    println!("  Max images:     {}", config.limits.max_images);
    println!("  Max pixels:     {}", config.limits.max_image_pixels);
    println!(
        "  Max upload:     {} MiB",
        config.limits.max_upload_bytes / (1024 * 1024)
    );
    println!("  Failure policy: {:?}", config.failure_policy);
    println!("  Resize mode:    {:?}", config.resize_mode);

    // Commands section
    println!("\nCommands:");
    println!("  photobatcher serve       Start the HTTP server");
    println!("  photobatcher process     Process photos into a zip archive");
    println!("  photobatcher preview     Render the preview of one photo");
    println!("  photobatcher platforms   List supported platforms");
    println!("\nRun 'photobatcher --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photobatcher=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let asset_loader = AssetLoader::from_env();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!(config = ?asset_loader.config_source(), "Config source");

    let state = server::create_app_state(&asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "PhotoBatcher server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
