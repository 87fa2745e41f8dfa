use std::fmt;

/// Machine-readable error codes for scripts and dashboards driving the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DatasetNotConfigured,
    DatasetNotFound,
    ConfigParseError,
    DatasetParseError,
    MissingColumn,
    DataIntegrity,
    UnknownSelection,
    ExportWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DatasetNotConfigured => "E1001",
            Self::DatasetNotFound => "E1002",
            Self::ConfigParseError => "E1003",
            Self::DatasetParseError => "E2001",
            Self::MissingColumn => "E2002",
            Self::DataIntegrity => "E2003",
            Self::UnknownSelection => "E3001",
            Self::ExportWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DatasetNotConfigured => "No dataset configured",
            Self::DatasetNotFound => "Dataset file not found",
            Self::ConfigParseError => "Config file parse error",
            Self::DatasetParseError => "Dataset parse error",
            Self::MissingColumn => "Required column missing",
            Self::DataIntegrity => "Winner is not one of the two players",
            Self::UnknownSelection => "Tournament or category not in dataset",
            Self::ExportWriteFailed => "Export write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DatasetNotConfigured => {
                Some("Pass --data <file.csv> or set [dataset] path in rally.toml.")
            }
            Self::DatasetNotFound => Some("Check the dataset path and read permissions."),
            Self::ConfigParseError => Some("Fix syntax in rally.toml and retry."),
            Self::DatasetParseError => Some("Check the CSV delimiter and quoting."),
            Self::MissingColumn => {
                Some("Map the column name under [dataset.columns] in rally.toml.")
            }
            Self::DataIntegrity => Some("Fix or remove the corrupt row in the dataset."),
            Self::UnknownSelection => Some("Run `rally catalog` to list available selections."),
            Self::ExportWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 9] = [
        ErrorCode::DatasetNotConfigured,
        ErrorCode::DatasetNotFound,
        ErrorCode::ConfigParseError,
        ErrorCode::DatasetParseError,
        ErrorCode::MissingColumn,
        ErrorCode::DataIntegrity,
        ErrorCode::UnknownSelection,
        ErrorCode::ExportWriteFailed,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let code = code.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn display_is_the_code() {
        assert_eq!(ErrorCode::DataIntegrity.to_string(), "E2003");
    }
}
