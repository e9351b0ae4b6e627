//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the front end emits.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const USAGE_ERROR: Code = Code::new("ERR004");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const INVALID_NUMBER: Code = Code::new("E022");
    pub const UNTERMINATED_COMMENT: Code = Code::new("E023");
    pub const INVALID_CHAR_LITERAL: Code = Code::new("E024");
    pub const INVALID_ESCAPE: Code = Code::new("E025");
    pub const NON_PRINTABLE_CHARACTER: Code = Code::new("E026");
    pub const INCOMPLETE_OPERATOR: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const GRAMMAR_VIOLATION: Code = Code::new("E043");
    pub const DECLARATION_ORDER: Code = Code::new("E044");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
}

/// Semantic analysis error codes
pub mod semantic {
    use super::Code;

    pub const DUPLICATE_SYMBOL: Code = Code::new("E090");
    pub const DUPLICATE_CLASS: Code = Code::new("E091");
    pub const UNDECLARED_IDENTIFIER: Code = Code::new("E092");
    pub const UNDECLARED_CLASS: Code = Code::new("E093");
    pub const UNDECLARED_PARENT_CLASS: Code = Code::new("E094");
    pub const RESERVED_WORD_MISUSE: Code = Code::new("E095");
}

/// Success codes for completed operations
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const SYNTAX_VALIDATION_PASSED: Code = Code::new("I041");
    pub const SYMBOL_DECLARED: Code = Code::new("I050");
    pub const SEMANTIC_ANALYSIS_COMPLETE: Code = Code::new("I070");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        use Severity::*;

        // (code, category, severity, recoverable, requires_halt, description)
        let entries: [(&'static str, &'static str, Severity, bool, bool, &'static str); 25] = [
            ("ERR001", "System", Critical, false, true, "Critical internal error"),
            ("ERR002", "System", Critical, false, true, "System initialization failure"),
            ("ERR004", "System", Low, false, true, "Invalid command-line usage"),
            ("E005", "FileProcessing", Medium, false, true, "Source file not found"),
            ("E007", "FileProcessing", Medium, false, true, "Source file exceeds maximum size"),
            ("E009", "FileProcessing", Medium, false, true, "Permission denied reading source file"),
            ("E011", "FileProcessing", Medium, false, true, "I/O error reading source file"),
            ("E012", "FileProcessing", Medium, false, true, "Path does not name a regular file"),
            ("E020", "Lexical", High, false, true, "Character cannot start any token"),
            ("E021", "Lexical", High, false, true, "String literal not closed before end of line or input"),
            ("E022", "Lexical", High, false, true, "Integer literal immediately followed by a letter"),
            ("E023", "Lexical", High, false, true, "Block comment not closed before end of input"),
            ("E024", "Lexical", High, false, true, "Malformed character literal"),
            ("E025", "Lexical", High, false, true, "Unsupported escape sequence in string literal"),
            ("E026", "Lexical", High, false, true, "Non-printable character inside a literal"),
            ("E027", "Lexical", High, false, true, "Operator character without its required partner"),
            ("E043", "Syntax", High, false, true, "No grammar alternative matches the lookahead token"),
            ("E044", "Syntax", High, false, true, "Class member declared out of order"),
            ("E050", "Syntax", High, false, true, "Token does not match the expected kind"),
            ("E090", "Semantic", High, false, true, "Name already declared in the same scope"),
            ("E091", "Semantic", High, false, true, "Class declared more than once"),
            ("E092", "Semantic", High, false, true, "Identifier used before declaration"),
            ("E093", "Semantic", High, false, true, "Type or allocation names an undeclared class"),
            ("E094", "Semantic", High, false, true, "Parent class not declared before its subclass"),
            ("E095", "Semantic", High, false, true, "Reserved word used as an identifier"),
        ];

        entries
            .into_iter()
            .map(
                |(code, category, severity, recoverable, requires_halt, description)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Low)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Success and informational codes are not registered and report "Info"
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_constant_is_registered() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::USAGE_ERROR,
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            lexical::INVALID_CHARACTER,
            lexical::UNTERMINATED_STRING,
            lexical::INVALID_NUMBER,
            lexical::UNTERMINATED_COMMENT,
            lexical::INVALID_CHAR_LITERAL,
            lexical::INVALID_ESCAPE,
            lexical::NON_PRINTABLE_CHARACTER,
            lexical::INCOMPLETE_OPERATOR,
            syntax::GRAMMAR_VIOLATION,
            syntax::DECLARATION_ORDER,
            syntax::UNEXPECTED_TOKEN,
            semantic::DUPLICATE_SYMBOL,
            semantic::DUPLICATE_CLASS,
            semantic::UNDECLARED_IDENTIFIER,
            semantic::UNDECLARED_CLASS,
            semantic::UNDECLARED_PARENT_CLASS,
            semantic::RESERVED_WORD_MISUSE,
        ];

        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_front_end_errors_are_fatal() {
        assert!(requires_halt(lexical::INVALID_NUMBER.as_str()));
        assert!(requires_halt(syntax::UNEXPECTED_TOKEN.as_str()));
        assert!(requires_halt(semantic::DUPLICATE_SYMBOL.as_str()));
        assert!(!is_recoverable(semantic::UNDECLARED_PARENT_CLASS.as_str()));
        assert_eq!(get_category(lexical::INVALID_CHARACTER.as_str()), "Lexical");
    }

    #[test]
    fn test_success_codes_fall_back_to_info() {
        let code = success::TOKENIZATION_COMPLETE;
        assert_eq!(get_category(code.as_str()), "Info");
        assert_eq!(get_description(code.as_str()), "Unknown error");
        assert!(!requires_halt(code.as_str()));
    }
}
