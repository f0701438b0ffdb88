use soroban_sdk::String;

use crate::errors::ContractError;

const MAX_NAME_LEN: u32 = 64;
const MAX_LINK_LEN: u32 = 128;
const MAX_TIMESTAMP_LEN: u32 = 64;

/// Validate an institution display name: non-empty, bounded, printable ASCII.
pub fn validate_name(name: &String) -> Result<(), ContractError> {
    validate_text(name, MAX_NAME_LEN)
}

/// Validate a link field (institution link or record link).
pub fn validate_link(link: &String) -> Result<(), ContractError> {
    validate_text(link, MAX_LINK_LEN)
}

/// Validate a record timestamp. The value is opaque text supplied by the
/// caller and never parsed, so only shape is checked.
pub fn validate_timestamp(timestamp: &String) -> Result<(), ContractError> {
    validate_text(timestamp, MAX_TIMESTAMP_LEN)
}

fn validate_text(value: &String, max_len: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len == 0 || len > max_len {
        return Err(ContractError::InvalidInput);
    }

    // Soroban String exposes bytes; restrict to printable ASCII.
    let mut buf = [0u8; MAX_LINK_LEN as usize];
    value.copy_into_slice(&mut buf[..len as usize]);

    for &b in &buf[..len as usize] {
        if !(32..=126).contains(&b) {
            return Err(ContractError::InvalidInput);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn accepts_typical_values() {
        let env = Env::default();

        assert_eq!(
            validate_name(&String::from_str(&env, "FakeInstitution")),
            Ok(())
        );
        assert_eq!(validate_link(&String::from_str(&env, "fakelink.com")), Ok(()));
        assert_eq!(
            validate_timestamp(&String::from_str(&env, "11/21/11/12:00:01")),
            Ok(())
        );
    }

    #[test]
    fn rejects_empty_values() {
        let env = Env::default();

        assert_eq!(
            validate_name(&String::from_str(&env, "")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_link(&String::from_str(&env, "")),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_timestamp(&String::from_str(&env, "")),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn rejects_oversized_values() {
        let env = Env::default();

        let long_name = "a".repeat(65);
        assert_eq!(
            validate_name(&String::from_str(&env, &long_name)),
            Err(ContractError::InvalidInput)
        );

        let long_link = "a".repeat(129);
        assert_eq!(
            validate_link(&String::from_str(&env, &long_link)),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn rejects_control_characters() {
        let env = Env::default();

        assert_eq!(
            validate_name(&String::from_str(&env, "Fake\nInstitution")),
            Err(ContractError::InvalidInput)
        );
    }
}
