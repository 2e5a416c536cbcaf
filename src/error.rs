use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The order, or both counterparties, were not supplied.
    MissingInput(&'static str),
    InvalidGeometry(String),
    /// A block that must stay on one page is taller than the content band.
    AtomicBlockTooTall {
        block: &'static str,
        required: f32,
        available: f32,
    },
    PageOutOfRange {
        index: usize,
        count: usize,
    },
    Image(String),
    Font(String),
    Pdf(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingInput(what) => write!(f, "missing required input: {what}"),
            Error::InvalidGeometry(reason) => write!(f, "invalid page geometry: {reason}"),
            Error::AtomicBlockTooTall {
                block,
                required,
                available,
            } => write!(
                f,
                "{block} needs {required:.1}pt but the content band is only {available:.1}pt tall"
            ),
            Error::PageOutOfRange { index, count } => {
                write!(f, "page {index} out of range (document has {count} pages)")
            }
            Error::Image(e) => write!(f, "image error: {e}"),
            Error::Font(e) => write!(f, "font error: {e}"),
            Error::Pdf(e) => write!(f, "PDF error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
