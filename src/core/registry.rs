use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::catalog::Catalog;
use crate::models::{Match, MatchedCandidate};

#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry and the catalog disagree on candidate identities
    #[error("Candidate not in catalog: {0}")]
    UnknownCandidate(String),
}

/// What `record_match` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRecord {
    Created(Match),
    /// The candidate was already matched; the existing entry is returned
    AlreadyMatched(Match),
}

impl MatchRecord {
    pub fn entry(&self) -> &Match {
        match self {
            MatchRecord::Created(m) | MatchRecord::AlreadyMatched(m) => m,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, MatchRecord::Created(_))
    }
}

/// Insertion-ordered list of matches, at most one per candidate
#[derive(Debug, Clone)]
pub struct MatchRegistry {
    catalog: Arc<Catalog>,
    matches: Vec<Match>,
}

impl MatchRegistry {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            matches: Vec::new(),
        }
    }

    /// Registry pre-populated with earlier matches. Entries are kept as given,
    /// so a seed that names an unknown candidate surfaces in `list_matches`.
    pub fn with_matches(catalog: Arc<Catalog>, matches: Vec<Match>) -> Self {
        let mut registry = Self::new(catalog);
        for m in matches {
            if !registry.is_matched(&m.candidate_id) {
                registry.matches.push(m);
            }
        }
        registry
    }

    pub fn record_match(
        &mut self,
        candidate_id: &str,
        matched_at: DateTime<Utc>,
    ) -> Result<MatchRecord, RegistryError> {
        if !self.catalog.contains(candidate_id) {
            return Err(RegistryError::UnknownCandidate(candidate_id.to_string()));
        }

        if let Some(existing) = self.find(candidate_id) {
            tracing::warn!("Candidate {} already matched at {}", candidate_id, existing.matched_at);
            return Ok(MatchRecord::AlreadyMatched(existing.clone()));
        }

        let entry = Match {
            id: uuid::Uuid::new_v4().to_string(),
            candidate_id: candidate_id.to_string(),
            matched_at,
        };
        self.matches.push(entry.clone());

        tracing::debug!("Recorded match {} with candidate {}", entry.id, candidate_id);
        Ok(MatchRecord::Created(entry))
    }

    /// Matches joined with their candidates, in the order they were recorded
    pub fn list_matches(&self) -> Result<Vec<MatchedCandidate>, RegistryError> {
        self.matches
            .iter()
            .map(|m| {
                let candidate = self
                    .catalog
                    .get(&m.candidate_id)
                    .ok_or_else(|| RegistryError::UnknownCandidate(m.candidate_id.clone()))?;

                Ok(MatchedCandidate {
                    candidate: candidate.clone(),
                    matched_at: m.matched_at,
                })
            })
            .collect()
    }

    pub fn find(&self, candidate_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.candidate_id == candidate_id)
    }

    pub fn is_matched(&self, candidate_id: &str) -> bool {
        self.find(candidate_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
