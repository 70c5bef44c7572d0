//! # Error Tests
//!
//! Display text of the crate's error types.

use rvforge_core::InstructionFormat;
use rvforge_core::common::{ConfigurationError, LookupError, ParseError};

#[test]
fn test_lookup_error_names_the_mnemonic() {
    let err = LookupError::new("foo");
    assert_eq!(err.mnemonic, "foo");
    assert_eq!(err.to_string(), "unknown instruction 'foo'");
}

#[test]
fn test_configuration_error_messages() {
    assert_eq!(
        ConfigurationError::ZeroCount.to_string(),
        "instance count must be at least 1"
    );
    assert_eq!(
        ConfigurationError::EmptyFormat(InstructionFormat::J).to_string(),
        "no instructions found for format J"
    );
    assert_eq!(
        ConfigurationError::NoneResolved {
            unresolved: vec!["foo".to_string(), "bar".to_string()],
        }
        .to_string(),
        "none of the requested instructions exist: foo, bar"
    );
}

#[test]
fn test_parse_error_messages() {
    assert_eq!(
        ParseError::EmptyOperand { position: 3 }.to_string(),
        "empty operand at position 3"
    );
    assert_eq!(
        ParseError::InvalidMemoryOperand("4(x2)x3".to_string()).to_string(),
        "malformed memory operand '4(x2)x3'"
    );
    assert_eq!(
        ParseError::MissingSeparator("x1 x2".to_string()).to_string(),
        "missing ',' between operands in 'x1 x2'"
    );
}
