use soroban_sdk::{symbol_short, Address, Env, String};

use crate::errors::ErrorContext;

/// Event published when a patient registers.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRegisteredEvent {
    pub patient: Address,
    pub timestamp: u64,
}

/// Event published when a doctor registers.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorRegisteredEvent {
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when an institution registers.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstitutionRegisteredEvent {
    pub institution: Address,
    pub name: String,
    pub link: String,
    pub index: u32,
    pub timestamp: u64,
}

/// Event published when a record is added.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub record_id: u64,
    pub patient: Address,
    pub institution: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when a patient shares their records with a party.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordsSharedEvent {
    pub patient: Address,
    pub grantee: Address,
    pub timestamp: u64,
}

/// Event published when a patient revokes a party's access.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordsUnsharedEvent {
    pub patient: Address,
    pub grantee: Address,
    pub timestamp: u64,
}

pub fn publish_patient_registered(env: &Env, patient: Address) {
    let topics = (symbol_short!("PAT_REG"), patient.clone());
    let data = PatientRegisteredEvent {
        patient,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_registered(env: &Env, doctor: Address) {
    let topics = (symbol_short!("DOC_REG"), doctor.clone());
    let data = DoctorRegisteredEvent {
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when an institution joins the directory.
/// This event includes the directory index assigned at registration.
pub fn publish_institution_registered(
    env: &Env,
    institution: Address,
    name: String,
    link: String,
    index: u32,
) {
    let topics = (symbol_short!("INST_REG"), institution.clone());
    let data = InstitutionRegisteredEvent {
        institution,
        name,
        link,
        index,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a record is added for a patient.
pub fn publish_record_added(
    env: &Env,
    record_id: u64,
    patient: Address,
    institution: Address,
    doctor: Address,
) {
    let topics = (
        symbol_short!("REC_ADD"),
        patient.clone(),
        institution.clone(),
    );
    let data = RecordAddedEvent {
        record_id,
        patient,
        institution,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a grantee is appended to a patient's access list.
pub fn publish_records_shared(env: &Env, patient: Address, grantee: Address) {
    let topics = (symbol_short!("ACC_SHR"), patient.clone(), grantee.clone());
    let data = RecordsSharedEvent {
        patient,
        grantee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a grantee is removed from a patient's access list.
pub fn publish_records_unshared(env: &Env, patient: Address, grantee: Address) {
    let topics = (symbol_short!("ACC_UNS"), patient.clone(), grantee.clone());
    let data = RecordsUnsharedEvent {
        patient,
        grantee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an error event for monitoring and indexing.
pub fn publish_error(env: &Env, error_code: u32, context: ErrorContext) {
    let topics = (
        symbol_short!("ERROR"),
        context.category.clone(),
        context.severity.clone(),
    );
    let data = (
        error_code,
        context.category,
        context.severity,
        context.message,
        context.user,
        context.resource_id,
        context.timestamp,
    );
    env.events().publish(topics, data);
}
