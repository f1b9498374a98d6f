use serde::{Deserialize, Serialize};

/// A named payout ladder: `steps[n]` is the multiplier for the (n+1)-th hit
/// of the same rank within one round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Paytable {
    pub id: String,
    pub name: String,
    pub steps: Vec<u64>,
}

pub const DEFAULT_PAYTABLE_ID: &str = "paytable-1";

impl Paytable {
    pub fn new(id: &str, name: &str, steps: &[u64]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            steps: steps.to_vec(),
        }
    }

    pub fn builtin() -> Vec<Paytable> {
        vec![
            Paytable::new("paytable-1", "Paytable 1", &[3, 4, 15, 50]),
            Paytable::new("paytable-2", "Paytable 2", &[2, 6, 36, 100]),
            Paytable::new("paytable-3", "Paytable 3", &[1, 10, 40, 200]),
        ]
    }

    pub fn by_id(id: &str) -> Option<Paytable> {
        Self::builtin().into_iter().find(|p| p.id == id)
    }

    /// Multiplier for the hit at `hits_so_far`, `None` once the ladder is spent.
    pub fn step(&self, hits_so_far: u32) -> Option<u64> {
        self.steps.get(hits_so_far as usize).copied()
    }

    pub fn len(&self) -> u32 {
        self.steps.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `3×, 4×, 15×, 50×`
    pub fn summary(&self) -> String {
        self.steps
            .iter()
            .map(|s| format!("{}×", s))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Paytable::new("paytable-1", "Paytable 1", &[3, 4, 15, 50])
    }
}
