#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use florascan_api::{construct_router, state::State};
use florascan_history::CsvHistory;
use florascan_types::ClassifierConfig;
use florascan_vision::TractClassifier;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting florascan API service");

    let config = config::Config::from_env()?;

    let mut classifier_config = ClassifierConfig {
        threshold: config.threshold,
        ..ClassifierConfig::default()
    };
    if let Some(labels_path) = &config.labels_path {
        let raw = std::fs::read_to_string(labels_path)?;
        let labels = florascan_vision::parse_labels(&raw);
        if labels.is_empty() {
            return Err(format!("labels file {} contains no labels", labels_path.display()).into());
        }
        if !labels.contains(&classifier_config.negative_label) {
            tracing::warn!(
                negative = %classifier_config.negative_label,
                "label override does not include the negative class; only the \
                 confidence threshold will reject predictions"
            );
        }
        classifier_config.labels = labels;
    }
    tracing::info!(
        labels = classifier_config.labels.len(),
        threshold = classifier_config.threshold,
        "classifier configuration ready"
    );

    // Model load fails startup outright; it is never retried or reloaded.
    let classifier = TractClassifier::load(&config.model_path, classifier_config.input_size)?;
    let history = CsvHistory::new(&config.history_path)?;

    let state = Arc::new(State::new(
        Arc::new(classifier),
        classifier_config,
        Arc::new(history),
    ));

    let app = construct_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
