//! Short and long rests.

use std::fmt;

use ds_core::{CharacterRecord, Recharge};
use serde::Serialize;

/// Which rest was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestKind {
    /// An hour of light activity.
    Short,
    /// Eight hours of sleep.
    Long,
}

impl fmt::Display for RestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "Short rest"),
            Self::Long => write!(f, "Long rest"),
        }
    }
}

/// What a rest changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestSummary {
    /// The rest taken.
    pub kind: RestKind,
    /// Resources that gained uses back.
    pub resources_restored: Vec<String>,
    /// Hit points regained.
    pub hp_regained: i32,
    /// Status effects that ended.
    pub effects_ended: Vec<String>,
}

impl RestSummary {
    fn new(kind: RestKind) -> Self {
        Self {
            kind,
            resources_restored: Vec::new(),
            hp_regained: 0,
            effects_ended: Vec::new(),
        }
    }

    /// True if the rest changed nothing.
    pub fn is_noop(&self) -> bool {
        self.resources_restored.is_empty() && self.hp_regained == 0 && self.effects_ended.is_empty()
    }
}

impl fmt::Display for RestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.is_noop() {
            return write!(f, ": nothing to recover");
        }
        if self.hp_regained > 0 {
            write!(f, "; regained {} HP", self.hp_regained)?;
        }
        if !self.resources_restored.is_empty() {
            write!(f, "; restored {}", self.resources_restored.join(", "))?;
        }
        if !self.effects_ended.is_empty() {
            write!(f, "; ended {}", self.effects_ended.join(", "))?;
        }
        Ok(())
    }
}

/// Refill every resource that recharges on a short rest.
pub fn short_rest(record: &mut CharacterRecord) -> RestSummary {
    let mut summary = RestSummary::new(RestKind::Short);
    refill(record, &mut summary, |r| r == Recharge::ShortRest);
    record.touch();
    tracing::debug!(character = %record.name, restored = summary.resources_restored.len(), "short rest");
    summary
}

/// Refill every resource, restore hit points, drop temporary hit points
/// and end all status effects.
pub fn long_rest(record: &mut CharacterRecord) -> RestSummary {
    let mut summary = RestSummary::new(RestKind::Long);
    refill(record, &mut summary, |_| true);

    let before = record.hit_points.current;
    record.hit_points.restore();
    summary.hp_regained = record.hit_points.current.saturating_sub(before);

    for effect in record.effects.iter_mut().filter(|e| e.active) {
        effect.active = false;
        summary.effects_ended.push(effect.name.clone());
    }

    record.touch();
    tracing::debug!(
        character = %record.name,
        hp = summary.hp_regained,
        restored = summary.resources_restored.len(),
        "long rest"
    );
    summary
}

fn refill(record: &mut CharacterRecord, summary: &mut RestSummary, applies: impl Fn(Recharge) -> bool) {
    for resource in record
        .resources
        .iter_mut()
        .filter(|r| applies(r.recharge) && !r.is_full())
    {
        resource.restore();
        summary.resources_restored.push(resource.name.clone());
    }
}
