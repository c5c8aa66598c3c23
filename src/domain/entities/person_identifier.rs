use super::name::normalize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Grouping key for "same person".
///
/// Two holders are the same person when their normalized name tokens match
/// element-wise and their dates of birth are equal. Distinct people that share
/// both collapse into one identity; nothing here tries to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonIdentifier {
    name_tokens: Vec<String>,
    date_of_birth: NaiveDate,
}

impl PersonIdentifier {
    pub fn new(holder_name: &str, date_of_birth: NaiveDate) -> Self {
        Self {
            name_tokens: normalize(holder_name),
            date_of_birth,
        }
    }

    /// Rebuilds an identifier from tokens that were normalized before, e.g. when
    /// reading a persisted preference back.
    pub fn from_parts(name_tokens: Vec<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            name_tokens,
            date_of_birth,
        }
    }

    pub fn name_tokens(&self) -> &[String] {
        &self.name_tokens
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// `yyyy-mm-dd#TOKEN<TOKEN`
    pub fn grouping_key(&self) -> String {
        format!(
            "{}#{}",
            self.date_of_birth.format("%Y-%m-%d"),
            self.name_tokens.join("<")
        )
    }

    /// Opaque code detail views use to address a person: hex encoded SHA-256
    /// of the grouping key.
    pub fn code(&self) -> String {
        hex::encode(Sha256::digest(self.grouping_key().as_bytes()))
    }
}

impl fmt::Display for PersonIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grouping_key())
    }
}
