use crate::common::{init, mock::*, test_utils::*};
use cert_wallet_lib::domain::{
    entities::PersonIdentifier,
    events::NoopEventPublisher,
    repositories::CurrentUserRepository,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn names(view: &[cert_wallet_lib::domain::entities::PersonCertificates]) -> Vec<String> {
    view.iter()
        .map(|person| person.display_name().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_certificates_of_two_persons_are_grouped() {
    init();
    let anna_dob = date(1981, 3, 20);
    let bernd_dob = date(1975, 11, 2);
    let sources = LiveSources::new();
    sources.vaccinations.replace(vec![
        vaccination("Anna Alpha", anna_dob, date(2021, 6, 1)).with_badge(true),
        vaccination("Bernd Beta", bernd_dob, date(2021, 6, 3)),
    ]);
    sources.tests.replace(vec![
        test_certificate("anna  alpha", anna_dob, date(2021, 12, 24)).with_badge(true),
    ]);
    sources
        .recoveries
        .replace(vec![recovery("BERND BETA", bernd_dob, date(2022, 1, 5))]);

    let anna = PersonIdentifier::new("Anna Alpha", anna_dob);
    let current_user = CountingCurrentUser::new(Some(anna.clone()));
    let provider = sources
        .start(current_user.clone(), Arc::new(NoopEventPublisher))
        .await;

    let view = provider.current();
    assert_eq!(names(&view), vec!["Anna Alpha", "Bernd Beta"]);
    assert_eq!(view[0].certificates.len(), 2);
    assert_eq!(view[1].certificates.len(), 2);
    assert!(view[0].is_current_user);
    assert!(!view[1].is_current_user);
    assert_eq!(view[0].badge_count, 2);
    assert_eq!(view[1].badge_count, 0);
    assert_eq!(*provider.persons_badge_count().borrow(), 2);
    assert_eq!(current_user.reads(), 1);
}

#[tokio::test]
async fn test_preference_naming_absent_person_flags_nobody() {
    init();
    let sources = LiveSources::new();
    sources.vaccinations.replace(vec![
        vaccination("Anna Alpha", date(1981, 3, 20), date(2021, 6, 1)),
        vaccination("Bernd Beta", date(1975, 11, 2), date(2021, 6, 3)),
    ]);
    let carla = PersonIdentifier::new("Carla Gamma", date(1990, 1, 1));
    let current_user = CountingCurrentUser::new(Some(carla));

    let provider = sources
        .start(current_user.clone(), Arc::new(NoopEventPublisher))
        .await;

    assert!(provider.current().iter().all(|person| !person.is_current_user));
    assert_eq!(current_user.reads(), 1);
}

#[tokio::test]
async fn test_empty_sources_give_empty_view_without_reading_preference() {
    init();
    let sources = LiveSources::new();
    let current_user = CountingCurrentUser::new(None);

    let provider = sources
        .start(current_user.clone(), Arc::new(NoopEventPublisher))
        .await;

    assert!(provider.current().is_empty());
    assert_eq!(*provider.persons_badge_count().borrow(), 0);
    assert_eq!(current_user.reads(), 0);
}

#[tokio::test]
async fn test_single_person_is_current_user_without_reading_preference() {
    init();
    let dob = date(1964, 8, 12);
    let sources = LiveSources::new();
    sources
        .vaccinations
        .replace(vec![vaccination("Dr. Erika Müller", dob, date(2021, 5, 5))]);
    sources
        .tests
        .replace(vec![test_certificate("ERIKA MUELLER", dob, date(2021, 11, 11))]);
    let current_user = CountingCurrentUser::failing();

    let provider = sources
        .start(current_user.clone(), Arc::new(NoopEventPublisher))
        .await;

    let view = provider.current();
    assert_eq!(view.len(), 1);
    assert!(view[0].is_current_user);
    assert_eq!(view[0].certificates.len(), 2);
    assert_eq!(current_user.reads(), 0);
}

#[tokio::test]
async fn test_failing_preference_read_flags_nobody() {
    init();
    let sources = LiveSources::new();
    sources.vaccinations.replace(vec![
        vaccination("Anna Alpha", date(1981, 3, 20), date(2021, 6, 1)),
        vaccination("Bernd Beta", date(1975, 11, 2), date(2021, 6, 3)),
    ]);
    let current_user = CountingCurrentUser::failing();

    let provider = sources
        .start(current_user.clone(), Arc::new(NoopEventPublisher))
        .await;

    assert_eq!(provider.current().len(), 2);
    assert!(provider.current().iter().all(|person| !person.is_current_user));
    assert_eq!(current_user.reads(), 1);
}

#[tokio::test]
async fn test_same_name_different_birth_date_are_separate_persons() {
    init();
    let sources = LiveSources::new();
    sources.vaccinations.replace(vec![
        vaccination("Max Mustermann", date(1970, 1, 1), date(2021, 6, 1)),
        vaccination("Max Mustermann", date(2001, 1, 1), date(2021, 6, 1)),
    ]);

    let provider = sources
        .start(CountingCurrentUser::new(None), Arc::new(NoopEventPublisher))
        .await;

    let view = provider.current();
    assert_eq!(view.len(), 2);
    assert_ne!(view[0].code(), view[1].code());
}

#[tokio::test]
async fn test_every_certificate_lands_in_exactly_one_group() {
    init();
    let sources = LiveSources::new();
    let certificates = vec![
        vaccination("Anna Alpha", date(1981, 3, 20), date(2021, 6, 1)),
        vaccination("Anna  ALPHA", date(1981, 3, 20), date(2021, 8, 1)),
        vaccination("Bernd Beta", date(1975, 11, 2), date(2021, 6, 3)),
        vaccination("Carla Gamma", date(1990, 1, 1), date(2021, 7, 7)),
    ];
    let ids: Vec<_> = certificates.iter().map(|c| c.id).collect();
    sources.vaccinations.replace(certificates);

    let provider = sources
        .start(CountingCurrentUser::new(None), Arc::new(NoopEventPublisher))
        .await;

    let mut grouped: Vec<_> = provider
        .current()
        .iter()
        .flat_map(|person| person.certificates.iter().map(|c| c.id))
        .collect();
    grouped.sort();
    let mut expected = ids;
    expected.sort();
    assert_eq!(grouped, expected);
    assert_eq!(provider.current().len(), 3);
}

#[tokio::test]
async fn test_view_follows_source_changes() {
    init();
    let anna_dob = date(1981, 3, 20);
    let sources = LiveSources::new();
    let certificate = vaccination("Anna Alpha", anna_dob, date(2021, 6, 1)).with_badge(true);
    sources.vaccinations.replace(vec![certificate.clone()]);
    let current_user = CountingCurrentUser::new(None);

    let provider = sources
        .start(current_user.clone(), Arc::new(NoopEventPublisher))
        .await;
    let mut persons = provider.person_certificates();
    let mut badge_count = provider.persons_badge_count();
    assert_eq!(*badge_count.borrow_and_update(), 1);

    sources
        .recoveries
        .upsert(recovery("Bernd Beta", date(1975, 11, 2), date(2022, 1, 5)));
    let view = wait_for_persons(&mut persons, |view| view.len() == 2).await;
    assert_eq!(names(&view), vec!["Anna Alpha", "Bernd Beta"]);
    assert_eq!(current_user.reads(), 1);

    sources
        .vaccinations
        .set_notification_badge(certificate.id, false);
    tokio::time::timeout(WAIT, badge_count.wait_for(|count| *count == 0))
        .await
        .expect("timed out waiting for badge count")
        .unwrap();
    assert!(current_user.reads() >= 2);
}

#[tokio::test]
async fn test_preference_change_moves_current_user() {
    init();
    let anna = PersonIdentifier::new("Anna Alpha", date(1981, 3, 20));
    let bernd = PersonIdentifier::new("Bernd Beta", date(1975, 11, 2));
    let sources = LiveSources::new();
    sources.vaccinations.replace(vec![
        vaccination("Anna Alpha", date(1981, 3, 20), date(2021, 6, 1)),
        vaccination("Bernd Beta", date(1975, 11, 2), date(2021, 6, 3)),
    ]);
    let current_user = CountingCurrentUser::new(Some(anna.clone()));

    let provider = sources
        .start(current_user.clone(), Arc::new(NoopEventPublisher))
        .await;
    let mut persons = provider.person_certificates();
    assert!(persons.borrow_and_update()[0].is_current_user);

    current_user.set(bernd.clone()).await.unwrap();
    let view = wait_for_persons(&mut persons, |view| {
        view.iter()
            .any(|person| person.is_current_user && person.person_identifier == bernd)
    })
    .await;
    assert!(!view[0].is_current_user);

    current_user.clear().await.unwrap();
    wait_for_persons(&mut persons, |view| view.iter().all(|p| !p.is_current_user)).await;
}

#[tokio::test]
async fn test_shutdown_keeps_last_view() {
    init();
    let sources = LiveSources::new();
    sources
        .vaccinations
        .replace(vec![vaccination("Anna Alpha", date(1981, 3, 20), date(2021, 6, 1))]);

    let provider = sources
        .start(CountingCurrentUser::new(None), Arc::new(NoopEventPublisher))
        .await;
    provider.shutdown().await;

    sources
        .tests
        .upsert(test_certificate("Bernd Beta", date(1975, 11, 2), date(2021, 12, 1)));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(provider.current().len(), 1);
}
