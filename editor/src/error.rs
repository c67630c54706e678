use partwizard_core::PartWizardError;
use partwizard_core::highlight::HighlightError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Errors surfaced by the editor windows.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Part(#[from] PartWizardError),
    #[error(transparent)]
    Highlight(#[from] HighlightError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type EditorResult<T = ()> = Result<T, EditorError>;
