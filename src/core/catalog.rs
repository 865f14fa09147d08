use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::{Candidate, Match, Message, Sender};

/// Read-only set of attendees available for the session
///
/// Order matters: the discover deck presents candidates in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    candidates: Vec<Candidate>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let index = candidates
            .iter()
            .enumerate()
            .map(|(pos, candidate)| (candidate.id.clone(), pos))
            .collect();

        Self { candidates, index }
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.index.get(id).map(|&pos| &self.candidates[pos])
    }

    pub fn at(&self, position: usize) -> Option<&Candidate> {
        self.candidates.get(position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}

/// Everything a fresh session starts from: the catalog plus any history
/// (matches and chat logs) that already exists for the local user
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub catalog: Catalog,
    pub matches: Vec<Match>,
    pub chats: Vec<(String, Vec<Message>)>,
}

impl SeedData {
    /// Catalog only, no prior matches or chats
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// The demo attendee list with two earlier matches and their chats,
    /// timestamped relative to `now`
    pub fn hackathon_demo(now: DateTime<Utc>) -> Self {
        let catalog = Catalog::new(vec![
            candidate("1", "Alex Johnson", &["React", "TypeScript", "UI/UX"], "Backend Developer"),
            candidate("2", "Sam Chen", &["Python", "AI/ML", "Data Science"], "Frontend Developer"),
            candidate("3", "Taylor Kim", &["Java", "Spring Boot", "DevOps"], "UI/UX Designer"),
            candidate("4", "Jordan Smith", &["Product Design", "Figma", "UI/UX"], "Full Stack Developer"),
            candidate("5", "Casey Williams", &["Node.js", "MongoDB", "Express"], "Mobile Developer"),
            candidate("6", "Morgan Lee", &["Swift", "iOS", "Mobile"], "Tech Co-founder"),
            candidate("7", "Riley Garcia", &["Blockchain", "Solidity", "Web3"], "Product Manager"),
            candidate("8", "Quinn Martinez", &["AR/VR", "Unity", "3D Modeling"], "Business Development"),
        ]);

        let ago = |ms: i64| now - Duration::milliseconds(ms);

        let matches = vec![
            Match {
                id: "match1".to_string(),
                candidate_id: "1".to_string(),
                matched_at: ago(3_600_000),
            },
            Match {
                id: "match2".to_string(),
                candidate_id: "4".to_string(),
                matched_at: ago(86_400_000),
            },
        ];

        let chats = vec![
            (
                "1".to_string(),
                vec![
                    message("msg1", Sender::Candidate("1".to_string()), "Hey! I saw you're looking for a backend developer. I'm interested in collaborating!", ago(3_600_000)),
                    message("msg2", Sender::LocalUser, "Hi Alex! Yes, I need help with setting up a database and API. What's your experience with that?", ago(3_500_000)),
                    message("msg3", Sender::Candidate("1".to_string()), "I've worked with PostgreSQL and Express for several projects. Would love to chat more about your idea!", ago(3_400_000)),
                ],
            ),
            (
                "4".to_string(),
                vec![
                    message("msg4", Sender::Candidate("4".to_string()), "Hello! I'm a UI/UX designer and I think we could work well together.", ago(86_400_000)),
                    message("msg5", Sender::LocalUser, "Hi Jordan! I'm looking for someone to help design the user interface for my app. Do you have a portfolio?", ago(85_000_000)),
                    message("msg6", Sender::Candidate("4".to_string()), "Yes, I can share some of my recent work. I specialize in clean, intuitive interfaces.", ago(84_000_000)),
                ],
            ),
        ];

        Self { catalog, matches, chats }
    }
}

fn candidate(id: &str, name: &str, skills: &[&str], looking_for: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        looking_for: looking_for.to_string(),
        avatar: "/placeholder.svg?height=200&width=200".to_string(),
    }
}

fn message(id: &str, sender: Sender, text: &str, timestamp: DateTime<Utc>) -> Message {
    Message {
        id: id.to_string(),
        sender,
        text: text.to_string(),
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_lookup() {
        let seed = SeedData::hackathon_demo(Utc::now());

        assert_eq!(seed.catalog.len(), 8);
        assert_eq!(seed.catalog.get("6").map(|c| c.name.as_str()), Some("Morgan Lee"));
        assert_eq!(seed.catalog.at(0).map(|c| c.id.as_str()), Some("1"));
        assert!(seed.catalog.get("42").is_none());
    }

    #[test]
    fn test_demo_history_references_catalog() {
        let seed = SeedData::hackathon_demo(Utc::now());

        for m in &seed.matches {
            assert!(seed.catalog.contains(&m.candidate_id));
        }
        for (candidate_id, log) in &seed.chats {
            assert!(seed.catalog.contains(candidate_id));
            assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        }
    }
}
