//! Append-only record store and the access-filtered query engine.
//!
//! Every record is stored once in a global sequence (ids are 1-based and
//! strictly increasing) and referenced by id from the owning patient's list,
//! so per-patient order and cross-patient order are both stable.

use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::errors::ContractError;
use crate::{access, identity, validation, HealthRecord, Role};

const RECORD: Symbol = symbol_short!("RECORD");
const REC_CNT: Symbol = symbol_short!("REC_CNT");
const PAT_REC: Symbol = symbol_short!("PAT_REC");

/// Append a record. Only registered institutions write; the patient must be
/// registered. The `doctor` field is stored as supplied and deliberately not
/// checked against the role table, matching the observed registry contract.
pub fn add(
    env: &Env,
    caller: &Address,
    patient: &Address,
    doctor: Address,
    timestamp: String,
    link: String,
) -> Result<u64, ContractError> {
    if !identity::has_role(env, caller, &Role::Institution) {
        return Err(ContractError::Unauthorized);
    }
    if !identity::has_role(env, patient, &Role::Patient) {
        return Err(ContractError::PatientNotFound);
    }

    validation::validate_timestamp(&timestamp)?;
    validation::validate_link(&link)?;

    let record_id = total_count(env).saturating_add(1);
    let record = HealthRecord {
        institution: caller.clone(),
        doctor,
        patient: patient.clone(),
        timestamp,
        link,
        added_at: env.ledger().timestamp(),
    };

    let key = (RECORD, record_id);
    env.storage().persistent().set(&key, &record);
    crate::extend_ttl_u64_key(env, &key);

    let patient_key = (PAT_REC, patient.clone());
    let mut patient_records = patient_ids(env, patient);
    patient_records.push_back(record_id);
    env.storage().persistent().set(&patient_key, &patient_records);
    crate::extend_ttl_address_key(env, &patient_key);

    env.storage().instance().set(&REC_CNT, &record_id);

    Ok(record_id)
}

/// Total number of records ever added, equal to the highest assigned id.
pub fn total_count(env: &Env) -> u64 {
    env.storage().instance().get(&REC_CNT).unwrap_or(0)
}

/// Global record ids belonging to a patient, in insertion order.
pub fn patient_ids(env: &Env, patient: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&(PAT_REC, patient.clone()))
        .unwrap_or(Vec::new(env))
}

fn record_by_id(env: &Env, record_id: u64) -> Option<HealthRecord> {
    env.storage().persistent().get(&(RECORD, record_id))
}

/// Raw indexed accessor into a patient's sequence. No read authorization.
pub fn record_at(env: &Env, patient: &Address, index: u32) -> Result<HealthRecord, ContractError> {
    let record_id = patient_ids(env, patient)
        .get(index)
        .ok_or(ContractError::IndexOutOfRange)?;
    record_by_id(env, record_id).ok_or(ContractError::IndexOutOfRange)
}

/// The patient's records visible to `caller`. No access yields an empty
/// vector, never an error: absent authorization degrades to "no results".
pub fn records_for(env: &Env, patient: &Address, caller: &Address) -> Vec<HealthRecord> {
    let mut out = Vec::new(env);
    if !access::can_read(env, patient, caller) {
        return out;
    }

    for record_id in patient_ids(env, patient).iter() {
        if let Some(record) = record_by_id(env, record_id) {
            out.push_back(record);
        }
    }
    out
}

/// Scan the global sequence in creation order and keep the records whose
/// patient is visible to `caller`. Filtering never reorders survivors.
pub fn all_records_for(env: &Env, caller: &Address) -> Vec<HealthRecord> {
    let mut out = Vec::new(env);
    let total = total_count(env);

    for record_id in 1..=total {
        if let Some(record) = record_by_id(env, record_id) {
            if access::can_read(env, &record.patient, caller) {
                out.push_back(record);
            }
        }
    }
    out
}

/// Patients whose records `caller` may read, in registration order.
pub fn accessible_patients(env: &Env, caller: &Address) -> Vec<Address> {
    let mut out = Vec::new(env);
    for patient in identity::patient_directory(env).iter() {
        if access::can_read(env, &patient, caller) {
            out.push_back(patient);
        }
    }
    out
}
