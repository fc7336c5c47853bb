use florascan_history::HistoryStore;
use florascan_types::ClassifierConfig;
use florascan_vision::ImageClassifier;
use std::sync::Arc;

/// Process-wide immutable context: the loaded model, the class configuration,
/// and the history log handle. Constructed once at startup and shared with
/// every request; the model is never reloaded per request.
pub struct State {
    pub classifier: Arc<dyn ImageClassifier>,
    pub config: ClassifierConfig,
    pub history: Arc<dyn HistoryStore>,
}

pub type AppState = Arc<State>;

impl State {
    pub fn new(
        classifier: Arc<dyn ImageClassifier>,
        config: ClassifierConfig,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            classifier,
            config,
            history,
        }
    }
}
