use chrono::Utc;
use folio_model::{BlockId, BlockPage};

/// Mints block ids.
///
/// Ids are integers seeded from the wall clock in milliseconds. Every id is
/// greater than any numeric id already on the target page and greater than
/// every id this generator handed out before. A page whose ids already reach
/// the top of the integer range gets text ids (`block-1`, `block-2`, ...).
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: i64,
    spilled: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }

    /// Generator whose first id is `seed` (unless the page forces a higher one)
    pub fn starting_at(seed: i64) -> Self {
        Self {
            last: seed.saturating_sub(1),
            spilled: 0,
        }
    }

    pub fn next_for(&mut self, page: &BlockPage) -> BlockId {
        let taken = page.every_id();
        let floor = taken
            .iter()
            .filter_map(numeric_value)
            .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
            .map(|max| max.floor() as i64);

        let base = match floor {
            Some(floor) => self.last.max(floor),
            None => self.last,
        };
        match base.checked_add(1) {
            Some(next) => {
                self.last = next;
                BlockId::int(next)
            }
            None => self.spill(&taken),
        }
    }

    fn spill(&mut self, taken: &[BlockId]) -> BlockId {
        loop {
            self.spilled += 1;
            let id = BlockId::Text(format!("block-{}", self.spilled));
            if !taken.contains(&id) {
                tracing::debug!(%id, "Integer ids exhausted on page");
                return id;
            }
        }
    }
}

fn numeric_value(id: &BlockId) -> Option<f64> {
    match id {
        BlockId::Number(_) => id.as_f64(),
        BlockId::Text(text) => text.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}
