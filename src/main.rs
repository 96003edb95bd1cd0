//! Application entry point — Speaking Zone exam service.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Load the usage counter store (missing/corrupt file ⇒ empty).
//! 4. Build the grading, speech and lookup clients from config.
//! 5. Wire the [`ExamRouter`] and run the console transport until EOF.

use std::sync::Arc;

use speaking_zone::{
    assess::AssessmentEngine,
    config::{AppConfig, AppPaths},
    gate::AllowAll,
    grader::ExamGrader,
    lookup::{HttpDictionary, HttpTranslator, WordHelper},
    session::ExamRouter,
    stats::UsageStats,
    stt::VoiceTranscriber,
    transport::ConsoleTransport,
};

/// User id the console transport impersonates.
const CONSOLE_USER_ID: u64 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Speaking Zone starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Usage counters
    let stats = Arc::new(UsageStats::load_from(AppPaths::new().stats_file));

    // 4. External-service clients
    let grader = Arc::new(ExamGrader::from_config(&config.grader));
    let engine = Arc::new(AssessmentEngine::new(grader));
    let transcriber = Arc::new(VoiceTranscriber::from_config(&config.stt));
    let helper = Arc::new(WordHelper::new(
        Arc::new(HttpDictionary::from_config(&config.lookup)),
        Arc::new(HttpTranslator::from_config(&config.lookup)),
    ));

    // 5. Router + console transport.  The console run is single-user, so the
    //    entitlement gate is wide open; a chat deployment plugs in its own
    //    membership check here.
    let transport = Arc::new(ConsoleTransport::new(CONSOLE_USER_ID));
    let router = ExamRouter::new(
        Arc::new(AllowAll),
        transcriber,
        engine,
        stats,
        helper,
        transport.clone(),
    );

    transport.run(&router).await
}
