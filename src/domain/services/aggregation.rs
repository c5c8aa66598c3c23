use crate::domain::{
    entities::{Certificate, PersonCertificates, PersonIdentifier, PersonWalletInfo},
    repositories::{CertificateCollection, CurrentUserRepository, WalletInfoCollection},
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Latest value of every live input at the time of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct SourceSnapshot {
    pub vaccinations: CertificateCollection,
    pub tests: CertificateCollection,
    pub recoveries: CertificateCollection,
    pub wallet_infos: WalletInfoCollection,
}

impl SourceSnapshot {
    pub fn certificate_count(&self) -> usize {
        self.vaccinations.len() + self.tests.len() + self.recoveries.len()
    }
}

/// Partitions certificates by person.
///
/// Sources are visited vaccination, test, recovery, each in its own order.
/// Persons appear in the order they are first seen and every person keeps its
/// certificates in visiting order, so ties between equal dates resolve to
/// source order.
pub fn group_certificates(
    vaccinations: &[Certificate],
    tests: &[Certificate],
    recoveries: &[Certificate],
) -> Vec<PersonCertificates> {
    let mut persons: Vec<PersonCertificates> = Vec::new();
    let mut positions: HashMap<PersonIdentifier, usize> = HashMap::new();

    for certificate in vaccinations.iter().chain(tests).chain(recoveries) {
        let position = *positions
            .entry(certificate.person_identifier.clone())
            .or_insert_with(|| {
                persons.push(PersonCertificates::new(
                    certificate.person_identifier.clone(),
                ));
                persons.len() - 1
            });
        persons[position].push(certificate.clone());
    }

    persons
}

/// Flags the person owning the device.
///
/// A single person is the current user without consulting the preference;
/// the preference is read only when there is a choice to make. A failed read
/// leaves every person unflagged.
pub async fn resolve_current_user(
    persons: &mut [PersonCertificates],
    current_user: &dyn CurrentUserRepository,
) {
    match persons.len() {
        0 => {}
        1 => persons[0].is_current_user = true,
        _ => {
            let preferred = match current_user.get().await {
                Ok(preferred) => preferred,
                Err(error) => {
                    warn!("Failed to read current user preference: {}", error);
                    None
                }
            };
            for person in persons.iter_mut() {
                person.is_current_user = preferred.as_ref() == Some(&person.person_identifier);
            }
            if preferred.is_some() && !persons.iter().any(|p| p.is_current_user) {
                debug!("Current user preference matches none of {} persons", persons.len());
            }
        }
    }
}

pub fn attach_wallet_infos(persons: &mut [PersonCertificates], wallet_infos: &[PersonWalletInfo]) {
    if wallet_infos.is_empty() {
        return;
    }
    let by_code: HashMap<&str, &PersonWalletInfo> = wallet_infos
        .iter()
        .map(|info| (info.person_identifier_code.as_str(), info))
        .collect();
    for person in persons.iter_mut() {
        person.wallet_info = by_code.get(person.code().as_str()).map(|info| (*info).clone());
    }
}

/// One full aggregation pass over a snapshot. Never fails.
pub async fn aggregate(
    snapshot: &SourceSnapshot,
    current_user: &dyn CurrentUserRepository,
) -> Vec<PersonCertificates> {
    let mut persons = group_certificates(
        &snapshot.vaccinations,
        &snapshot.tests,
        &snapshot.recoveries,
    );
    resolve_current_user(&mut persons, current_user).await;
    attach_wallet_infos(&mut persons, &snapshot.wallet_infos);
    persons
}
