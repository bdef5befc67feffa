use super::{ParameterField, UploadKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SpectronResult<T> = Result<T, SpectronError>;
pub type ParseResult<T> = Result<T, ParseError>;
pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectronErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl SpectronErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// Categorised error surfaced at the crate boundary.
///
/// Component errors ([`ParseError`], [`ValidationError`], ...) convert into this
/// type so front ends can map every failure onto a stable exit code and a
/// `[PLACEHOLDER]` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectronError {
    category: SpectronErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl SpectronError {
    pub fn new(
        category: SpectronErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            SpectronErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectronErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectronErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectronErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> SpectronErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }
}

impl Display for SpectronError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for SpectronError {}

/// Failures while decoding an uploaded file into a [`super::Spectrum`] or
/// [`super::Catalog`]. Nothing is installed into a session when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed spectrum '{name}': {reason}")]
    MalformedSpectrum { name: String, reason: String },
    #[error("malformed catalog '{name}' at line {line}: {reason}")]
    MalformedCatalog {
        name: String,
        line: usize,
        reason: String,
    },
    #[error("{kind} upload '{name}' contains no records")]
    EmptyInput { name: String, kind: UploadKind },
    #[error("upload '{name}' could not be decoded: {reason}")]
    InvalidEncoding { name: String, reason: String },
    #[error("upload '{name}' has an unsupported file extension")]
    UnsupportedUpload { name: String },
    /// The file parsed, but the catalog it describes is not valid.
    #[error("catalog '{name}' is invalid: {source}")]
    InvalidCatalog {
        name: String,
        source: ValidationError,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be finite and > 0, got {value}")]
    InvalidValue { field: ParameterField, value: f64 },
    #[error("no catalog named '{molecule}' is loaded")]
    UnknownMolecule { molecule: String },
    #[error("unknown table field '{field}'")]
    UnknownField { field: String },
    #[error("{entity} has inconsistent lengths: {detail}")]
    InconsistentLengths { entity: String, detail: String },
    #[error("{entity} must contain at least one point")]
    EmptyEntity { entity: String },
}

/// A transition whose line strength or profile cannot be evaluated. These are
/// non-fatal: the synthesizer drops the transition and reports a warning.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NumericDegeneracy {
    #[error("upper and lower Boltzmann factors are equal at {frequency} MHz")]
    EqualBoltzmannFactors { frequency: f64 },
    #[error("line width must be > 0, got {sigma} MHz")]
    NonPositiveWidth { sigma: f64 },
    #[error("{quantity} evaluated to a non-finite value ({value})")]
    NonFinite { quantity: &'static str, value: f64 },
}

impl From<ParseError> for SpectronError {
    fn from(error: ParseError) -> Self {
        let placeholder = match &error {
            ParseError::InvalidCatalog { source, .. } => source.placeholder(),
            ParseError::MalformedSpectrum { .. } => "INPUT.MALFORMED_SPECTRUM",
            ParseError::MalformedCatalog { .. } => "INPUT.MALFORMED_CATALOG",
            ParseError::EmptyInput { .. } => "INPUT.EMPTY_INPUT",
            ParseError::InvalidEncoding { .. } => "INPUT.UPLOAD_ENCODING",
            ParseError::UnsupportedUpload { .. } => "INPUT.UNSUPPORTED_UPLOAD",
        };
        Self::input_validation(placeholder, error.to_string())
    }
}

impl ValidationError {
    fn placeholder(&self) -> &'static str {
        match self {
            Self::InvalidValue { .. } => "INPUT.INVALID_VALUE",
            Self::UnknownMolecule { .. } => "INPUT.UNKNOWN_MOLECULE",
            Self::UnknownField { .. } => "INPUT.UNKNOWN_FIELD",
            Self::InconsistentLengths { .. } => "INPUT.INCONSISTENT_LENGTHS",
            Self::EmptyEntity { .. } => "INPUT.EMPTY_ENTITY",
        }
    }
}

impl From<ValidationError> for SpectronError {
    fn from(error: ValidationError) -> Self {
        Self::input_validation(error.placeholder(), error.to_string())
    }
}

impl From<NumericDegeneracy> for SpectronError {
    fn from(error: NumericDegeneracy) -> Self {
        Self::computation("RUN.NUMERIC_DEGENERACY", error.to_string())
    }
}
