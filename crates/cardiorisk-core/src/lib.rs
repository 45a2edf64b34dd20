pub mod assessment;
pub mod last_result;
pub mod schema;

pub use assessment::{Assessment, Label, Prediction, format_timestamp};
pub use last_result::LastResult;
pub use schema::{FeatureError, FeatureSchema, FeatureVector, UCI_HEART_FEATURES};
