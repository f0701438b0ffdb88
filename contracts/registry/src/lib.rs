#![no_std]

pub mod access;
pub mod errors;
pub mod events;
pub mod identity;
pub mod records;
pub mod validation;

use soroban_sdk::{
    contract, contractimpl, contracttype, Address, Env, String, Symbol, Vec,
};

pub use errors::{ContractError, ErrorCategory, ErrorContext, ErrorLogEntry, ErrorSeverity};

// ── Storage TTL management ───────────────────────────────────────────────────

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) for a storage key containing an Address.
pub(crate) fn extend_ttl_address_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a storage key containing a u64 value.
pub(crate) fn extend_ttl_u64_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a storage key containing a u32 index.
pub(crate) fn extend_ttl_u32_key(env: &Env, key: &(Symbol, u32)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a bare Symbol storage key.
pub(crate) fn extend_ttl_symbol_key(env: &Env, key: &Symbol) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Types ────────────────────────────────────────────────────────────────────

/// Roles a party can hold in the registry. A party holds at most one role,
/// assigned at registration and never changed afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Patient,
    Doctor,
    Institution,
}

/// A registered care institution. `name` and `link` are immutable after
/// registration; `index` is the institution's position in the directory.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Institution {
    pub address: Address,
    pub name: String,
    pub link: String,
    pub index: u32,
    pub registered_at: u64,
}

/// One care event. `timestamp` is caller-supplied opaque text and is never
/// parsed; `added_at` is the ledger time at creation. Records are immutable
/// and never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthRecord {
    pub institution: Address,
    pub doctor: Address,
    pub patient: Address,
    pub timestamp: String,
    pub link: String,
    pub added_at: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct HealthRegistryContract;

#[contractimpl]
impl HealthRegistryContract {
    // ── Identity registry ────────────────────────────────────────────────────

    /// Register the caller as a patient. Fails if the caller already holds
    /// any role.
    pub fn register_patient(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();

        identity::register_patient(&env, &caller).map_err(|e| {
            errors::report(&env, e, Some(caller.clone()), resource(&env, "register_patient"))
        })?;

        events::publish_patient_registered(&env, caller);
        Ok(())
    }

    /// Register the caller as a doctor. Fails if the caller already holds
    /// any role.
    pub fn register_doctor(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();

        identity::register_doctor(&env, &caller).map_err(|e| {
            errors::report(&env, e, Some(caller.clone()), resource(&env, "register_doctor"))
        })?;

        events::publish_doctor_registered(&env, caller);
        Ok(())
    }

    /// Register the caller as an institution with a display name and an
    /// informational link, and append it to the institution directory.
    pub fn register_institution(
        env: Env,
        caller: Address,
        name: String,
        link: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let index = identity::register_institution(&env, &caller, name.clone(), link.clone())
            .map_err(|e| {
                errors::report(
                    &env,
                    e,
                    Some(caller.clone()),
                    resource(&env, "register_institution"),
                )
            })?;

        events::publish_institution_registered(&env, caller, name, link, index);
        Ok(())
    }

    /// Check whether a party is a registered patient.
    pub fn is_patient(env: Env, party: Address) -> bool {
        identity::has_role(&env, &party, &Role::Patient)
    }

    /// Check whether a party is a registered doctor.
    pub fn is_doctor(env: Env, party: Address) -> bool {
        identity::has_role(&env, &party, &Role::Doctor)
    }

    /// Check whether a party is a registered institution.
    pub fn is_institution(env: Env, party: Address) -> bool {
        identity::has_role(&env, &party, &Role::Institution)
    }

    /// Get the role a party holds, if any.
    pub fn get_role(env: Env, party: Address) -> Option<Role> {
        identity::role_of(&env, &party)
    }

    /// Get the institution registered at a directory position.
    pub fn institution_at(env: Env, index: u32) -> Result<Institution, ContractError> {
        identity::institution_at(&env, index)
            .map_err(|e| errors::report(&env, e, None, resource(&env, "institution_at")))
    }

    /// Look up the institution entry for a registered institution address.
    pub fn get_institution(env: Env, party: Address) -> Result<Institution, ContractError> {
        identity::institution_of(&env, &party)
            .map_err(|e| errors::report(&env, e, Some(party), resource(&env, "get_institution")))
    }

    /// Number of institutions in the directory.
    pub fn institution_count(env: Env) -> u32 {
        identity::institution_count(&env)
    }

    // ── Access list manager ──────────────────────────────────────────────────

    /// Grant `grantee` read access to the patient's records. Self-service:
    /// only the patient can manage their own list. Appending a party already
    /// on the list succeeds and leaves the list unchanged.
    pub fn share_records(
        env: Env,
        patient: Address,
        grantee: Address,
    ) -> Result<(), ContractError> {
        patient.require_auth();

        let appended = access::share(&env, &patient, &grantee).map_err(|e| {
            errors::report(&env, e, Some(patient.clone()), resource(&env, "share_records"))
        })?;

        if appended {
            events::publish_records_shared(&env, patient, grantee);
        }
        Ok(())
    }

    /// Remove the first occurrence of `grantee` from the patient's access
    /// list, shifting later entries down. Removing an absent party is a
    /// successful no-op.
    pub fn unshare_records(
        env: Env,
        patient: Address,
        grantee: Address,
    ) -> Result<(), ContractError> {
        patient.require_auth();

        let removed = access::unshare(&env, &patient, &grantee).map_err(|e| {
            errors::report(&env, e, Some(patient.clone()), resource(&env, "unshare_records"))
        })?;

        if removed {
            events::publish_records_unshared(&env, patient, grantee);
        }
        Ok(())
    }

    /// Return the patient's full access list. Callable by the patient and by
    /// parties already on the list; anyone else gets `Unauthorized`.
    pub fn get_patient_access_list(
        env: Env,
        patient: Address,
        caller: Address,
    ) -> Result<Vec<Address>, ContractError> {
        caller.require_auth();

        access::list_for(&env, &patient, &caller).map_err(|e| {
            errors::report(
                &env,
                e,
                Some(caller),
                resource(&env, "get_patient_access_list"),
            )
        })
    }

    /// Indexed accessor into the patient's access list.
    pub fn access_list_at(
        env: Env,
        patient: Address,
        index: u32,
    ) -> Result<Address, ContractError> {
        access::entry_at(&env, &patient, index)
            .map_err(|e| errors::report(&env, e, Some(patient), resource(&env, "access_list_at")))
    }

    /// Current length of the patient's access list.
    pub fn access_list_len(env: Env, patient: Address) -> u32 {
        access::access_list(&env, &patient).len()
    }

    /// Check whether a party may read the patient's records (the party is the
    /// patient, or is on the patient's access list).
    pub fn has_access(env: Env, patient: Address, party: Address) -> bool {
        access::can_read(&env, &patient, &party)
    }

    // ── Record store ─────────────────────────────────────────────────────────

    /// Append an immutable record for `patient`. Only registered institutions
    /// may write; the patient must be registered. Write authority is
    /// independent of the patient's access list.
    pub fn add_record(
        env: Env,
        caller: Address,
        patient: Address,
        doctor: Address,
        timestamp: String,
        link: String,
    ) -> Result<u64, ContractError> {
        caller.require_auth();

        let record_id = records::add(&env, &caller, &patient, doctor.clone(), timestamp, link)
            .map_err(|e| {
                errors::report(&env, e, Some(caller.clone()), resource(&env, "add_record"))
            })?;

        events::publish_record_added(&env, record_id, patient, caller, doctor);
        Ok(record_id)
    }

    /// Raw indexed accessor into a patient's record sequence. Performs no
    /// read authorization; hosts must not expose it to untrusted parties.
    pub fn record_at(
        env: Env,
        patient: Address,
        index: u32,
    ) -> Result<HealthRecord, ContractError> {
        records::record_at(&env, &patient, index)
            .map_err(|e| errors::report(&env, e, Some(patient), resource(&env, "record_at")))
    }

    /// Number of records stored for a patient.
    pub fn patient_record_count(env: Env, patient: Address) -> u32 {
        records::patient_ids(&env, &patient).len()
    }

    /// Total number of records across all patients.
    pub fn total_record_count(env: Env) -> u64 {
        records::total_count(&env)
    }

    // ── Access-filtered queries ──────────────────────────────────────────────

    /// Records of `patient` visible to `caller`, in insertion order. A caller
    /// without access receives an empty vector, never an error.
    pub fn get_records(env: Env, patient: Address, caller: Address) -> Vec<HealthRecord> {
        caller.require_auth();
        records::records_for(&env, &patient, &caller)
    }

    /// All records visible to `caller`, across every patient, in global
    /// creation order. Records the caller cannot see are skipped; the
    /// relative order of the rest is preserved.
    pub fn get_all_records(env: Env, caller: Address) -> Vec<HealthRecord> {
        caller.require_auth();
        records::all_records_for(&env, &caller)
    }

    /// Patients whose records are visible to `caller`, in registration order.
    pub fn get_accessible_patients(env: Env, caller: Address) -> Vec<Address> {
        caller.require_auth();
        records::accessible_patients(&env, &caller)
    }

    // ── Diagnostics ──────────────────────────────────────────────────────────

    /// The structured error log (most recent 100 entries).
    pub fn get_error_log(env: Env) -> Vec<ErrorLogEntry> {
        errors::get_error_log(&env)
    }

    /// Total number of errors surfaced since deployment.
    pub fn get_error_count(env: Env) -> u64 {
        errors::get_error_count(&env)
    }

    /// Contract version.
    pub fn version() -> u32 {
        1
    }
}

fn resource(env: &Env, name: &str) -> Option<String> {
    Some(String::from_str(env, name))
}

#[cfg(test)]
mod test;
