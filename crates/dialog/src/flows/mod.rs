//! Turn sequences for each intent.
//!
//! A flow writes its messages into the turn's outbox and returns the
//! [`PendingPrompt`](crate::state::PendingPrompt) it suspended on, if any.

pub mod greeting;
pub mod movie;

use std::sync::Arc;

use clients::{IntentClassifier, MovieCatalog, SentimentScorer};

use crate::presenter::MoviePresenter;

/// The external services a turn may call, plus the presenter
pub struct Services {
    pub classifier: Arc<dyn IntentClassifier>,
    pub catalog: Arc<dyn MovieCatalog>,
    pub sentiment: Arc<dyn SentimentScorer>,
    pub presenter: MoviePresenter,
}

impl Services {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        catalog: Arc<dyn MovieCatalog>,
        sentiment: Arc<dyn SentimentScorer>,
    ) -> Self {
        Self {
            classifier,
            catalog,
            sentiment,
            presenter: MoviePresenter::new(),
        }
    }

    /// Replace the presenter, e.g. with a seeded one
    pub fn with_presenter(mut self, presenter: MoviePresenter) -> Self {
        self.presenter = presenter;
        self
    }
}
