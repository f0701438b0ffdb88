#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

extern crate std;

use super::*;
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::{symbol_short, Address, Env, IntoVal, TryIntoVal};

fn setup() -> (Env, HealthRegistryContractClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(HealthRegistryContract, ());
    let client = HealthRegistryContractClient::new(&env, &contract_id);

    (env, client)
}

#[test]
fn test_register_patient() {
    let (env, client) = setup();

    let patient = Address::generate(&env);
    assert!(!client.is_patient(&patient));

    client.register_patient(&patient);

    assert!(client.is_patient(&patient));
    assert_eq!(client.get_role(&patient), Some(Role::Patient));

    let events = env.events().all();
    assert!(!events.is_empty());
    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("PAT_REG"), patient.clone()).into_val(&env)
    );
    let payload: events::PatientRegisteredEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.patient, patient);
}

#[test]
fn test_register_doctor() {
    let (env, client) = setup();

    let doctor = Address::generate(&env);
    assert!(!client.is_doctor(&doctor));

    client.register_doctor(&doctor);

    assert!(client.is_doctor(&doctor));
    assert!(!client.is_patient(&doctor));
    assert!(!client.is_institution(&doctor));
}

#[test]
fn test_register_institution() {
    let (env, client) = setup();

    let institution = Address::generate(&env);
    let name = String::from_str(&env, "FakeInstitution");
    let link = String::from_str(&env, "fakelink.com");

    client.register_institution(&institution, &name, &link);

    assert!(client.is_institution(&institution));
    assert_eq!(client.institution_count(), 1);

    let entry = client.institution_at(&0);
    assert_eq!(entry.address, institution);
    assert_eq!(entry.name, name);
    assert_eq!(entry.link, link);
    assert_eq!(entry.index, 0);

    let events = env.events().all();
    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("INST_REG"), institution.clone()).into_val(&env)
    );
    let payload: events::InstitutionRegisteredEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.institution, institution);
    assert_eq!(payload.name, name);
    assert_eq!(payload.link, link);
    assert_eq!(payload.index, 0);
}

#[test]
fn test_second_registration_fails() {
    let (env, client) = setup();

    let party = Address::generate(&env);
    client.register_patient(&party);

    let same_role = client.try_register_patient(&party);
    assert_eq!(same_role, Err(Ok(ContractError::AlreadyRegistered)));

    let other_role = client.try_register_doctor(&party);
    assert_eq!(other_role, Err(Ok(ContractError::AlreadyRegistered)));

    // The original role is untouched.
    assert!(client.is_patient(&party));
    assert!(!client.is_doctor(&party));
}

#[test]
fn test_add_record_and_record_at() {
    let (env, client) = setup();

    let patient = Address::generate(&env);
    let institution = Address::generate(&env);
    let doctor = Address::generate(&env);

    client.register_patient(&patient);
    client.register_institution(
        &institution,
        &String::from_str(&env, "FakeInstitution"),
        &String::from_str(&env, "fakelink.com"),
    );

    let timestamp = String::from_str(&env, "11/21/11/12:00:01");
    let link = String::from_str(&env, "record.link.com");
    let record_id = client.add_record(&institution, &patient, &doctor, &timestamp, &link);
    assert_eq!(record_id, 1);

    let record = client.record_at(&patient, &0);
    assert_eq!(record.institution, institution);
    assert_eq!(record.doctor, doctor);
    assert_eq!(record.patient, patient);
    assert_eq!(record.timestamp, timestamp);
    assert_eq!(record.link, link);

    assert_eq!(client.patient_record_count(&patient), 1);
    assert_eq!(client.total_record_count(), 1);

    let events = env.events().all();
    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (
            symbol_short!("REC_ADD"),
            patient.clone(),
            institution.clone()
        )
            .into_val(&env)
    );
    let payload: events::RecordAddedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.record_id, 1);
    assert_eq!(payload.patient, patient);
    assert_eq!(payload.institution, institution);
    assert_eq!(payload.doctor, doctor);
}

#[test]
fn test_share_and_unshare_events() {
    let (env, client) = setup();

    let patient = Address::generate(&env);
    let grantee = Address::generate(&env);
    client.register_patient(&patient);

    client.share_records(&patient, &grantee);
    assert!(client.has_access(&patient, &grantee));

    let events = env.events().all();
    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("ACC_SHR"), patient.clone(), grantee.clone()).into_val(&env)
    );
    let payload: events::RecordsSharedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.patient, patient);
    assert_eq!(payload.grantee, grantee);

    client.unshare_records(&patient, &grantee);
    assert!(!client.has_access(&patient, &grantee));

    let events = env.events().all();
    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("ACC_UNS"), patient.clone(), grantee.clone()).into_val(&env)
    );
    let payload: events::RecordsUnsharedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.patient, patient);
    assert_eq!(payload.grantee, grantee);
}

#[test]
fn test_patient_always_reads_own_records() {
    let (env, client) = setup();

    let patient = Address::generate(&env);
    let institution = Address::generate(&env);
    let doctor = Address::generate(&env);

    client.register_patient(&patient);
    client.register_institution(
        &institution,
        &String::from_str(&env, "Clinic"),
        &String::from_str(&env, "clinic.example"),
    );

    client.add_record(
        &institution,
        &patient,
        &doctor,
        &String::from_str(&env, "16/05/11/09:40:39"),
        &String::from_str(&env, "new.link.com"),
    );

    // Self access needs no share.
    let own = client.get_records(&patient, &patient);
    assert_eq!(own.len(), 1);

    // The writing institution gets nothing until the patient shares.
    let unshared = client.get_records(&patient, &institution);
    assert_eq!(unshared.len(), 0);
}

#[test]
fn test_error_classification() {
    assert_eq!(
        ContractError::InvalidInput.category(),
        ErrorCategory::Validation
    );
    assert_eq!(
        ContractError::Unauthorized.category(),
        ErrorCategory::Authorization
    );
    assert_eq!(
        ContractError::PatientNotFound.category(),
        ErrorCategory::NotFound
    );
    assert_eq!(
        ContractError::AlreadyRegistered.category(),
        ErrorCategory::StateConflict
    );

    assert_eq!(ContractError::Unauthorized.severity(), ErrorSeverity::Medium);
    assert_eq!(ContractError::IndexOutOfRange.severity(), ErrorSeverity::Low);
}

#[test]
fn test_error_log_mechanics() {
    let env = Env::default();
    let contract_id = env.register(HealthRegistryContract, ());
    let user = Address::generate(&env);

    env.as_contract(&contract_id, || {
        errors::log_error(&env, ContractError::Unauthorized, Some(user.clone()), None);
        errors::log_error(
            &env,
            ContractError::AlreadyRegistered,
            None,
            Some(String::from_str(&env, "register_patient")),
        );

        assert_eq!(errors::get_error_count(&env), 2);
        let log = errors::get_error_log(&env);
        assert_eq!(log.len(), 2);

        let first = log.get(0).unwrap();
        assert_eq!(first.error_code, ContractError::Unauthorized as u32);
        assert_eq!(first.context.category, ErrorCategory::Authorization);
        assert_eq!(first.context.severity, ErrorSeverity::Medium);
        assert_eq!(first.context.user, Some(user.clone()));

        let second = log.get(1).unwrap();
        assert_eq!(second.error_code, ContractError::AlreadyRegistered as u32);
        assert_eq!(
            second.context.resource_id,
            Some(String::from_str(&env, "register_patient"))
        );
    });
}

#[test]
fn test_version() {
    assert_eq!(HealthRegistryContract::version(), 1);
}
