/// Failure categories surfaced by the CLI.
///
/// Each category maps to a stable process exit code so shell scripts can
/// distinguish bad inputs from bad math from renderer trouble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A data file exists but its contents do not parse.
    FileFormat,
    /// The number of labels does not match the number of input files.
    LabelPathMismatch,
    /// The operating system refused a read or write.
    Io,
    /// Too few usable points for the requested operation.
    InsufficientData,
    /// A fit produced no usable answer (e.g. parallel lines).
    DegenerateFit,
    /// The chart backend failed while drawing or encoding.
    Render,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::FileFormat | ErrorKind::LabelPathMismatch | ErrorKind::Io => 2,
            ErrorKind::InsufficientData => 3,
            ErrorKind::DegenerateFit | ErrorKind::Render => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
