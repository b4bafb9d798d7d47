pub mod db;
pub mod models;
pub mod utils;
pub mod wizard;

pub use db::repository::{RepositoryError, TierRepository};
pub use models::*;
pub use wizard::{WizardController, WizardError, WizardExit};
