use thiserror::Error;

#[derive(Debug, Error)]
pub enum TblgenError {
    #[error(transparent)]
    Attr(#[from] hyattr::Error),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file '{file}': {source}")]
    Config {
        file: String,
        source: toml::de::Error,
    },

    #[error("No input manifest given, either on the command line or in the configuration file")]
    MissingInput,

    #[error("Generated output differs from '{path}'")]
    OutputDiffers { path: String },

    #[error("A dependency file can only be written together with an output file")]
    DepfileWithoutOutput,

    #[error("Check mode needs an output file to compare against")]
    CheckWithoutOutput,

    #[error("Failed to publish '{path}': {source}")]
    Persist {
        path: String,
        source: tempfile::PersistError,
    },
}

pub type TblgenResult<T> = Result<T, TblgenError>;

/// Attach the offending path to an I/O error.
pub fn io_error(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> TblgenError + '_ {
    move |source| TblgenError::Io {
        path: path.display().to_string(),
        source,
    }
}
