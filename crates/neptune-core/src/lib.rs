use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

pub mod app_config;
pub mod config;
pub mod insight;
pub mod intelligence;
pub mod style;
pub mod topic;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use insight::{Correction, InsightKind, LearningInsight};
pub use intelligence::{BusinessGoal, WorkspaceProfile};
pub use style::{
    CommunicationStyle, Formality, PreferredStyle, ResponsePattern, Tone, Verbosity,
    STYLE_CONFIDENCE_FLOOR,
};
pub use topic::{FactorNotes, PriorityScoreBreakdown, TopicStatus};
