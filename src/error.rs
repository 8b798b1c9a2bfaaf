use thiserror::Error;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Worksheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Template worksheet '{0}' does not exist")]
    TemplateNotFound(String),

    #[error("Invalid worksheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    #[error("Invalid cell reference '{0}'")]
    InvalidCellRef(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<umya_spreadsheet::structs::XlsxError> for RosterError {
    fn from(err: umya_spreadsheet::structs::XlsxError) -> Self {
        RosterError::Workbook(err.to_string())
    }
}

impl From<calamine::XlsxError> for RosterError {
    fn from(err: calamine::XlsxError) -> Self {
        RosterError::Workbook(err.to_string())
    }
}
