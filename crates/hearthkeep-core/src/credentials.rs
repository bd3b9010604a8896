//! Secrets kept in the OS keyring under the `hearthkeep` service.

use crate::error::AssistantError;

const SERVICE: &str = "hearthkeep";

pub fn get(key: &str) -> Result<Option<String>, AssistantError> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set(key: &str, value: &str) -> Result<(), AssistantError> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    entry.set_password(value)?;
    Ok(())
}

/// Missing entries are not an error.
pub fn delete(key: &str) -> Result<(), AssistantError> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
