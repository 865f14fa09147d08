use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Candidate;

pub const RESPONSE_POOL_SIZE: usize = 8;

/// Canned replies of the simulated counterpart. One of them mentions the
/// counterpart's first listed skill.
pub fn response_pool(first_skill: &str) -> [String; RESPONSE_POOL_SIZE] {
    [
        "That sounds interesting! Can you tell me more?".to_string(),
        "I'd love to collaborate on that idea.".to_string(),
        "Great point! I was thinking something similar.".to_string(),
        "I have some experience with that. Maybe we can work together?".to_string(),
        format!("I'm also interested in {}. How long have you been working with it?", first_skill),
        "Would you like to meet up at the hackathon to discuss this further?".to_string(),
        "That's exactly what I was looking for in a teammate!".to_string(),
        "I have some resources that might help with that. I'll share them with you at the event."
            .to_string(),
    ]
}

/// A reply picked ahead of time, with the delay after which it arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReply {
    pub text: String,
    pub delay: Duration,
}

/// Random source behind the simulated counterpart
///
/// Seeded for reproducible sessions, from entropy otherwise.
#[derive(Debug)]
pub struct Responder {
    rng: Mutex<StdRng>,
    min_delay: Duration,
    max_delay: Duration,
}

impl Responder {
    /// Replies arrive after a delay drawn uniformly from `[min_delay, max_delay)`.
    /// An empty range collapses to `min_delay`.
    pub fn new(seed: Option<u64>, min_delay: Duration, max_delay: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng: Mutex::new(rng),
            min_delay,
            max_delay,
        }
    }

    pub fn plan_reply(&self, candidate: &Candidate) -> PlannedReply {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let pool = response_pool(candidate.first_skill().unwrap_or("that"));
        let text = pool[rng.gen_range(0..RESPONSE_POOL_SIZE)].clone();

        let delay = if self.max_delay > self.min_delay {
            rng.gen_range(self.min_delay..self.max_delay)
        } else {
            self.min_delay
        };

        PlannedReply { text, delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            id: "2".to_string(),
            name: "Sam Chen".to_string(),
            skills: vec!["Python".to_string(), "AI/ML".to_string()],
            looking_for: "Frontend Developer".to_string(),
            avatar: String::new(),
        }
    }

    #[test]
    fn test_pool_interpolates_first_skill() {
        let pool = response_pool("Python");
        assert_eq!(pool.iter().filter(|r| r.contains("Python")).count(), 1);
    }

    #[test]
    fn test_replies_come_from_pool_within_delay_range() {
        let responder = Responder::new(Some(7), Duration::from_millis(1000), Duration::from_millis(3000));
        let pool = response_pool("Python");

        for _ in 0..200 {
            let reply = responder.plan_reply(&candidate());
            assert!(pool.contains(&reply.text));
            assert!(reply.delay >= Duration::from_millis(1000));
            assert!(reply.delay < Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_same_seed_same_replies() {
        let a = Responder::new(Some(42), Duration::from_millis(1000), Duration::from_millis(3000));
        let b = Responder::new(Some(42), Duration::from_millis(1000), Duration::from_millis(3000));

        for _ in 0..10 {
            assert_eq!(a.plan_reply(&candidate()), b.plan_reply(&candidate()));
        }
    }

    #[test]
    fn test_candidate_without_skills() {
        let mut candidate = candidate();
        candidate.skills.clear();
        let responder = Responder::new(Some(1), Duration::ZERO, Duration::ZERO);

        let reply = responder.plan_reply(&candidate);
        assert!(response_pool("that").contains(&reply.text));
        assert_eq!(reply.delay, Duration::ZERO);
    }
}
