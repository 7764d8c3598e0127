//! # Target selection module
//!
//! Before navigation starts the rover picks exactly one target from a pool of candidate bodies
//! named `{prefix}{index:02}`. Each candidate is weighed (see [`Weight::of_body`]) and the
//! lightest one is chosen, with one important rule: candidates whose weight comes from an
//! explicit mass always win over candidates weighed by their volume, whatever the values.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod candidate;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use serde::Serialize;

// Internal
pub use candidate::*;
pub use params::*;
use sim_if::{world::BodyId, Supervisor};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The selected navigation target.
///
/// The target does not own its body, its pose is read through the supervisor every tick using
/// `body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    /// Name of the target body
    pub name: String,

    /// Handle to the target body
    pub body: BodyId,

    /// Weight the target was selected with
    pub weight: Weight,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during target selection.
#[derive(Debug, thiserror::Error)]
pub enum TargetSelError {
    #[error("No candidate with a valid mass or volume was found among {prefix}01..{prefix}{pool_bound:02}")]
    NoValidCandidates { prefix: String, pool_bound: usize },

    #[error("Failed to select a target among {0} valid candidates")]
    NoWinner(usize),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Select the navigation target from the candidate pool.
pub fn select_target<S>(supervisor: &S, params: &TargetSelParams) -> Result<Target, TargetSelError>
where
    S: Supervisor + ?Sized,
{
    info!("--- Searching for the lightest target ---");

    let candidates = scan_candidates(supervisor, params);

    if candidates.is_empty() {
        warn!("No object with a valid mass or volume was found");
        return Err(TargetSelError::NoValidCandidates {
            prefix: params.name_prefix.clone(),
            pool_bound: params.pool_bound,
        });
    }

    info!("--- Analysing {} valid objects ---", candidates.len());

    let chosen = choose(&candidates).ok_or(TargetSelError::NoWinner(candidates.len()))?;

    match chosen.weight.kind {
        WeightKind::Mass => info!(">> Final selection by explicit mass"),
        WeightKind::Volume => info!(">> Final selection by volume (fallback)"),
    }
    info!(
        ">> Target set: {} (value: {:.3})",
        chosen.name, chosen.weight.value
    );

    Ok(Target::from(chosen.clone()))
}

/// Enumerate the candidate pool, keeping only bodies that exist and have a valid weight.
///
/// Candidates are returned in index order.
pub fn scan_candidates<S>(supervisor: &S, params: &TargetSelParams) -> Vec<Candidate>
where
    S: Supervisor + ?Sized,
{
    let mut candidates = Vec::new();

    for index in 1..=params.pool_bound {
        let name = format!("{}{:02}", params.name_prefix, index);

        if name.len() > params.max_name_len {
            warn!(
                "Candidate name {} is longer than {} characters, skipped",
                name, params.max_name_len
            );
            continue;
        }

        let body = match supervisor.body_from_name(&name) {
            Some(b) => b,
            None => continue,
        };

        let weight = Weight::of_body(supervisor, body);

        if weight.is_valid() {
            info!("Found object {}: {} = {:.3}", name, weight.kind, weight.value);
            candidates.push(Candidate { name, body, weight });
        }
    }

    candidates
}

/// Choose the target among valid candidates.
///
/// Two running minima are kept: one over authoritative (mass) candidates only, and one over all
/// candidates. Comparisons are strict so the first candidate wins ties. The authoritative
/// minimum is chosen whenever one exists.
pub fn choose(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best_by_mass: Option<&Candidate> = None;
    let mut best_overall: Option<&Candidate> = None;

    for c in candidates.iter().filter(|c| c.is_authoritative()) {
        if best_by_mass.map_or(true, |b| c.weight.value < b.weight.value) {
            info!(
                "-> New best explicit mass: {} ({:.3})",
                c.name, c.weight.value
            );
            best_by_mass = Some(c);
        }
    }

    for c in candidates.iter() {
        if best_overall.map_or(true, |b| c.weight.value < b.weight.value) {
            best_overall = Some(c);
        }
    }

    best_by_mass.or(best_overall)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl From<Candidate> for Target {
    fn from(c: Candidate) -> Self {
        Self {
            name: c.name,
            body: c.body,
            weight: c.weight,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use sim_if::world::BodyPose;

    /// Pool of bodies indexed by name, each with an optional mass and size.
    #[derive(Default)]
    struct MockPool(Vec<(String, Option<f64>, Option<[f64; 3]>)>);

    impl MockPool {
        fn with(mut self, name: &str, mass: Option<f64>, size: Option<[f64; 3]>) -> Self {
            self.0.push((name.to_string(), mass, size));
            self
        }
    }

    impl Supervisor for MockPool {
        fn body_from_name(&self, name: &str) -> Option<BodyId> {
            self.0.iter().position(|b| b.0 == name).map(BodyId)
        }

        fn self_body(&self) -> BodyId {
            BodyId(usize::MAX)
        }

        fn body_mass(&self, body: BodyId) -> Option<f64> {
            self.0.get(body.0).and_then(|b| b.1)
        }

        fn body_size(&self, body: BodyId) -> Option<[f64; 3]> {
            self.0.get(body.0).and_then(|b| b.2)
        }

        fn body_pose(&self, _body: BodyId) -> Option<BodyPose> {
            None
        }
    }

    fn select(pool: &MockPool) -> Result<Target, TargetSelError> {
        select_target(pool, &TargetSelParams::default())
    }

    #[test]
    fn test_mass_beats_smaller_volume() {
        let pool = MockPool::default()
            .with("CAIXA01", Some(2.0), None)
            .with("CAIXA02", None, Some([1.0, 1.0, 1.0]));

        let target = select(&pool).unwrap();
        assert_eq!(target.name, "CAIXA01");
        assert_eq!(target.weight.kind, WeightKind::Mass);
        assert_eq!(target.weight.value, 2.0);
    }

    #[test]
    fn test_volume_fallback() {
        let pool = MockPool::default()
            .with("CAIXA01", None, Some([2.0, 1.0, 1.0]))
            .with("CAIXA02", None, Some([1.0, 1.0, 1.0]));

        let target = select(&pool).unwrap();
        assert_eq!(target.name, "CAIXA02");
        assert_eq!(target.body, BodyId(1));
        assert_eq!(target.weight.kind, WeightKind::Volume);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let pool = MockPool::default()
            .with("CAIXA03", None, Some([0.5, 0.5, 0.5]))
            .with("CAIXA01", None, Some([0.5, 0.5, 0.5]))
            .with("CAIXA02", None, Some([1.0, 0.5, 0.5]));

        assert_eq!(select(&pool).unwrap().name, "CAIXA01");

        let pool = MockPool::default()
            .with("CAIXA07", Some(1.5), None)
            .with("CAIXA04", Some(1.5), None);

        assert_eq!(select(&pool).unwrap().name, "CAIXA04");
    }

    #[test]
    fn test_authoritative_ignores_volume_candidates() {
        let base = MockPool::default()
            .with("CAIXA05", Some(3.0), None)
            .with("CAIXA09", Some(0.8), Some([0.1, 0.1, 0.1]));

        assert_eq!(select(&base).unwrap().name, "CAIXA09");

        // Tiny volume-only candidates, before and after the mass candidates, change nothing
        let crowded = base
            .with("CAIXA01", None, Some([0.01, 0.01, 0.01]))
            .with("CAIXA12", None, Some([0.001, 0.001, 0.001]));

        assert_eq!(select(&crowded).unwrap().name, "CAIXA09");
    }

    #[test]
    fn test_invalid_weights_excluded() {
        let pool = MockPool::default()
            // Neither mass nor size
            .with("CAIXA01", None, None)
            // Non-positive mass falls back to size
            .with("CAIXA02", Some(-1.0), Some([2.0, 2.0, 2.0]))
            // Degenerate size
            .with("CAIXA03", None, Some([1.0, 0.0, 1.0]))
            .with("CAIXA04", Some(0.0), Some([-1.0, 1.0, 1.0]))
            .with("CAIXA05", None, Some([std::f64::INFINITY, 1.0, 1.0]));

        let candidates = scan_candidates(&pool, &TargetSelParams::default());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "CAIXA02");
        assert_eq!(candidates[0].weight.value, 8.0);
        assert!(!candidates[0].is_authoritative());
    }

    #[test]
    fn test_no_candidates() {
        let pool = MockPool::default()
            .with("CAIXA01", None, None)
            .with("BOX02", Some(1.0), None);

        assert!(matches!(
            select(&pool),
            Err(TargetSelError::NoValidCandidates { .. })
        ));
        assert!(choose(&[]).is_none());
    }

    #[test]
    fn test_pool_bound_and_name_length() {
        let pool = MockPool::default()
            .with("CAIXA65", Some(0.1), None)
            .with("CAIXA64", Some(0.5), None);

        // Index 65 is outside the default pool
        assert_eq!(select(&pool).unwrap().name, "CAIXA64");

        let params = TargetSelParams {
            pool_bound: 100,
            ..Default::default()
        };
        assert_eq!(select_target(&pool, &params).unwrap().name, "CAIXA65");

        let params = TargetSelParams {
            max_name_len: 4,
            ..Default::default()
        };
        assert!(select_target(&pool, &params).is_err());
    }

    #[test]
    fn test_three_digit_indices() {
        let pool = MockPool::default().with("CAIXA100", None, Some([1.0, 1.0, 1.0]));
        let params = TargetSelParams {
            pool_bound: 100,
            ..Default::default()
        };

        assert_eq!(select_target(&pool, &params).unwrap().name, "CAIXA100");
    }
}
