// Exit code registry (single source of truth)
//
// 0-9:   generic
// 10-19: parse attempt stage failures, one code per stage so scripts can
//        tell "the model replied garbage" from "the model was unreachable".

use tabforge_normalize::NormalizeError;
use tabforge_session::ParseError;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_IO: u8 = 3;

pub const EXIT_NO_STRUCTURED_DATA: u8 = 10;
pub const EXIT_MALFORMED: u8 = 11;
pub const EXIT_UNSUPPORTED_SHAPE: u8 = 12;
pub const EXIT_BAD_SHAPE: u8 = 13;
pub const EXIT_MODEL_CALL: u8 = 14;
pub const EXIT_FILE_READ: u8 = 15;

pub fn normalize_exit_code(error: &NormalizeError) -> u8 {
    match error {
        NormalizeError::NoStructuredData => EXIT_NO_STRUCTURED_DATA,
        NormalizeError::Malformed(_) => EXIT_MALFORMED,
        NormalizeError::UnsupportedShape(_) => EXIT_UNSUPPORTED_SHAPE,
        NormalizeError::Shape(_) => EXIT_BAD_SHAPE,
    }
}

pub fn parse_error_exit_code(error: &ParseError) -> u8 {
    match error {
        ParseError::FileRead(_) => EXIT_FILE_READ,
        ParseError::ModelCall(_) => EXIT_MODEL_CALL,
        ParseError::Normalize(inner) => normalize_exit_code(inner),
        ParseError::AttemptInFlight | ParseError::Superseded => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_codes_are_distinct() {
        let codes = [
            EXIT_NO_STRUCTURED_DATA,
            EXIT_MALFORMED,
            EXIT_UNSUPPORTED_SHAPE,
            EXIT_BAD_SHAPE,
            EXIT_MODEL_CALL,
            EXIT_FILE_READ,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_normalize_mapping() {
        assert_eq!(
            normalize_exit_code(&NormalizeError::NoStructuredData),
            EXIT_NO_STRUCTURED_DATA
        );
        assert_eq!(
            parse_error_exit_code(&ParseError::Normalize(NormalizeError::Shape("x".into()))),
            EXIT_BAD_SHAPE
        );
        assert_eq!(
            parse_error_exit_code(&ParseError::ModelCall("down".into())),
            EXIT_MODEL_CALL
        );
    }

    #[test]
    fn test_lifecycle_errors_are_generic_failures() {
        // Neither condition is a stage of the parse pipeline itself, so
        // neither gets a stage-specific code.
        assert_eq!(parse_error_exit_code(&ParseError::AttemptInFlight), EXIT_ERROR);
        assert_eq!(parse_error_exit_code(&ParseError::Superseded), EXIT_ERROR);
        assert_eq!(ParseError::Superseded.stage(), "superseded");
    }
}
