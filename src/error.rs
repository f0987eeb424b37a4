use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("WindowError: {details}")]
    Window { details: String },
    #[error("TerminalError: {source}")]
    Terminal {
        #[from]
        source: std::io::Error,
    },
    #[error("InvalidViewport: {width}x{height}")]
    InvalidViewport { width: usize, height: usize },
    #[error("LoggerError: {details}")]
    Logger { details: String },
}

impl From<minifb::Error> for RenderError {
    fn from(e: minifb::Error) -> Self {
        RenderError::Window {
            details: e.to_string(),
        }
    }
}

impl From<log::SetLoggerError> for RenderError {
    fn from(e: log::SetLoggerError) -> Self {
        RenderError::Logger {
            details: e.to_string(),
        }
    }
}
