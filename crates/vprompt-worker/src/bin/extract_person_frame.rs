//! Extract the best single-person frame from a video.

use std::process::ExitCode;

use tracing::{error, info};

use vprompt_gemini::GeminiClient;
use vprompt_media::{check_ffmpeg, FfmpegFrameExtractor};
use vprompt_models::MediaAsset;
use vprompt_worker::{init_tracing, PersonFrameExtractor, PipelineConfig, PipelineError};

#[tokio::main]
async fn main() -> ExitCode {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    dotenvy::dotenv().ok();
    init_tracing();

    let mut config = PipelineConfig::from_env();
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_video_path(path);
    }
    info!("Pipeline config: {:?}", config);

    let client = match GeminiClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            let err = PipelineError::client_setup(e);
            error!("{}", err);
            eprintln!("Error: {}", err);
            if matches!(err, PipelineError::MissingCredential(_)) {
                eprintln!("Please set GEMINI_API_KEY in your environment or .env file");
            }
            return ExitCode::from(err.exit_code());
        }
    };
    info!(model = %client.config().model, "Gemini client ready");

    if let Err(e) = check_ffmpeg() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let extractor = FfmpegFrameExtractor::new(config.ffmpeg_timeout);
    let asset = MediaAsset::new(&config.video_path);
    println!("Processing: {}", asset.path().display());

    match PersonFrameExtractor::new(&client, &extractor, &config)
        .run(&asset)
        .await
    {
        Ok(frame) => {
            println!("Saved frame: {}", frame.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(stderr) = e.diagnostics() {
                eprintln!("{}", stderr);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
