//! Role table and institution directory.
//!
//! A party moves from unregistered to exactly one of the three roles and
//! never transitions again; re-registration, including under the same role,
//! fails with `AlreadyRegistered`.

use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::errors::ContractError;
use crate::{validation, Institution, Role};

const ROLE: Symbol = symbol_short!("ROLE");
const INST: Symbol = symbol_short!("INST");
const INST_IX: Symbol = symbol_short!("INST_IX");
const INST_CNT: Symbol = symbol_short!("INST_CNT");
const PATIENTS: Symbol = symbol_short!("PATS");

/// Get the role a party holds, if any.
pub fn role_of(env: &Env, party: &Address) -> Option<Role> {
    env.storage().persistent().get(&(ROLE, party.clone()))
}

/// Check whether a party holds exactly the given role.
pub fn has_role(env: &Env, party: &Address, role: &Role) -> bool {
    role_of(env, party).as_ref() == Some(role)
}

/// Assign a role to an unregistered party. Roles are write-once.
fn assign_role(env: &Env, party: &Address, role: Role) -> Result<(), ContractError> {
    let key = (ROLE, party.clone());
    if env.storage().persistent().has(&key) {
        return Err(ContractError::AlreadyRegistered);
    }
    env.storage().persistent().set(&key, &role);
    crate::extend_ttl_address_key(env, &key);
    Ok(())
}

pub fn register_patient(env: &Env, caller: &Address) -> Result<(), ContractError> {
    assign_role(env, caller, Role::Patient)?;

    let mut patients = patient_directory(env);
    patients.push_back(caller.clone());
    env.storage().persistent().set(&PATIENTS, &patients);
    crate::extend_ttl_symbol_key(env, &PATIENTS);

    Ok(())
}

pub fn register_doctor(env: &Env, caller: &Address) -> Result<(), ContractError> {
    assign_role(env, caller, Role::Doctor)
}

/// Register an institution and append it to the directory at the next
/// available index. Returns the assigned index.
pub fn register_institution(
    env: &Env,
    caller: &Address,
    name: String,
    link: String,
) -> Result<u32, ContractError> {
    validation::validate_name(&name)?;
    validation::validate_link(&link)?;

    assign_role(env, caller, Role::Institution)?;

    let index = institution_count(env);
    let institution = Institution {
        address: caller.clone(),
        name,
        link,
        index,
        registered_at: env.ledger().timestamp(),
    };

    let key = (INST, index);
    env.storage().persistent().set(&key, &institution);
    crate::extend_ttl_u32_key(env, &key);

    let idx_key = (INST_IX, caller.clone());
    env.storage().persistent().set(&idx_key, &index);
    crate::extend_ttl_address_key(env, &idx_key);

    env.storage()
        .instance()
        .set(&INST_CNT, &index.saturating_add(1));

    Ok(index)
}

/// Get the institution at a directory position.
pub fn institution_at(env: &Env, index: u32) -> Result<Institution, ContractError> {
    env.storage()
        .persistent()
        .get(&(INST, index))
        .ok_or(ContractError::IndexOutOfRange)
}

/// Get the institution entry for an address.
pub fn institution_of(env: &Env, party: &Address) -> Result<Institution, ContractError> {
    let index: u32 = env
        .storage()
        .persistent()
        .get(&(INST_IX, party.clone()))
        .ok_or(ContractError::InstitutionNotFound)?;
    institution_at(env, index)
}

pub fn institution_count(env: &Env) -> u32 {
    env.storage().instance().get(&INST_CNT).unwrap_or(0)
}

/// All registered patients in registration order.
pub fn patient_directory(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&PATIENTS)
        .unwrap_or(Vec::new(env))
}
