use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    InvalidMonthName,
    InvalidMonthRange,
    InvalidMonthType,
    InvalidYearRange,
    InvalidYearType,
    UnsupportedFirstDay,
    NoColorSourceError,
    ColorCountMismatch,
    UnsupportedColormap,
    UnsupportedFont,
    InvalidColor,
    InvalidTable,
    ConfigError,
    FontLoad,
    ImageError,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(
            ErrorKind::ConfigError,
            &format!("could not parse TOML: {}", toml_error),
        )
    }
}

impl From<image::ImageError> for Error {
    fn from(image_error: image::ImageError) -> Error {
        match image_error {
            image::ImageError::IoError(err) => Error::from(err),
            other => Error::new(ErrorKind::ImageError, &other.to_string()),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        if let ErrorKind::IOError(err) = err.kind {
            err
        } else {
            let msg = match err.message {
                Some(msg) => msg,
                None => err.kind.as_str(),
            };
            io::Error::new(io::ErrorKind::InvalidInput, msg)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::InvalidMonthName => "invalid month name".to_owned(),
            ErrorKind::InvalidMonthRange => "month out of range".to_owned(),
            ErrorKind::InvalidMonthType => "invalid month type".to_owned(),
            ErrorKind::InvalidYearRange => "year out of range".to_owned(),
            ErrorKind::InvalidYearType => "invalid year type".to_owned(),
            ErrorKind::UnsupportedFirstDay => "unsupported first day of week".to_owned(),
            ErrorKind::NoColorSourceError => "no color source".to_owned(),
            ErrorKind::ColorCountMismatch => "color count mismatch".to_owned(),
            ErrorKind::UnsupportedColormap => "unsupported colormap".to_owned(),
            ErrorKind::UnsupportedFont => "unsupported font".to_owned(),
            ErrorKind::InvalidColor => "invalid color".to_owned(),
            ErrorKind::InvalidTable => "invalid table".to_owned(),
            ErrorKind::ConfigError => "invalid configuration".to_owned(),
            ErrorKind::FontLoad => "could not load font".to_owned(),
            ErrorKind::ImageError => "image error".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
