//! Per-patient access lists.
//!
//! Each patient owns an ordered, duplicate-free list of parties allowed to
//! read their records. Only the patient mutates their own list. Read access
//! is evaluated against the list at query time, so removal revokes
//! visibility of past and future records alike.

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::errors::ContractError;
use crate::{identity, Role};

const ACL: Symbol = symbol_short!("ACL");

/// The patient's access list, empty if nothing was ever shared.
pub fn access_list(env: &Env, patient: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&(ACL, patient.clone()))
        .unwrap_or(Vec::new(env))
}

/// Whether `party` may read `patient`'s records: the party is the patient or
/// appears on the access list.
pub fn can_read(env: &Env, patient: &Address, party: &Address) -> bool {
    party == patient || access_list(env, patient).contains(party)
}

/// Append `grantee` to the patient's list. Returns `false` without touching
/// storage when the grantee is already present, so each party is counted
/// once for visibility.
pub fn share(env: &Env, patient: &Address, grantee: &Address) -> Result<bool, ContractError> {
    require_patient(env, patient)?;

    let key = (ACL, patient.clone());
    let mut list = access_list(env, patient);
    if list.contains(grantee) {
        return Ok(false);
    }

    list.push_back(grantee.clone());
    env.storage().persistent().set(&key, &list);
    crate::extend_ttl_address_key(env, &key);
    Ok(true)
}

/// Remove the first occurrence of `grantee`, shifting later entries down to
/// fill the gap. Returns `false` when the grantee was not on the list; that
/// case is not an error.
pub fn unshare(env: &Env, patient: &Address, grantee: &Address) -> Result<bool, ContractError> {
    require_patient(env, patient)?;

    let key = (ACL, patient.clone());
    let mut list = access_list(env, patient);
    match list.first_index_of(grantee) {
        Some(index) => {
            list.remove(index);
            env.storage().persistent().set(&key, &list);
            crate::extend_ttl_address_key(env, &key);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// The full list, visible to the patient and to current list members only.
pub fn list_for(
    env: &Env,
    patient: &Address,
    caller: &Address,
) -> Result<Vec<Address>, ContractError> {
    let list = access_list(env, patient);
    if caller == patient || list.contains(caller) {
        Ok(list)
    } else {
        Err(ContractError::Unauthorized)
    }
}

/// Indexed accessor into the list.
pub fn entry_at(env: &Env, patient: &Address, index: u32) -> Result<Address, ContractError> {
    access_list(env, patient)
        .get(index)
        .ok_or(ContractError::IndexOutOfRange)
}

fn require_patient(env: &Env, patient: &Address) -> Result<(), ContractError> {
    if !identity::has_role(env, patient, &Role::Patient) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
