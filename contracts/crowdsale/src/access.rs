use crate::storage;
use crate::types::Error;
use soroban_sdk::{Address, Env};

/// The owner is implicitly privileged above operators: every operator-level
/// capability is also granted to the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != storage::get_owner(env) {
        return Err(Error::AccessDenied);
    }
    Ok(())
}

pub fn require_operator_or_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !storage::is_operator(env, caller) && *caller != storage::get_owner(env) {
        return Err(Error::AccessDenied);
    }
    Ok(())
}
