pub mod input;
pub mod question;
pub mod settings;

pub use input::{AcceptedType, FileRef, InputItem, InputPayload};
pub use question::{AnswerOption, QuestionRecord};
pub use settings::{Difficulty, GenerationSettings, ModelVersion, SettingsError};
