use crate::model::PhysicalSize;

/// Collapses per-plane calibration observations to a single agreed value.
/// Returns `None` unless every non-absent observation matches exactly on
/// value and unit; unknown calibration is a valid terminal state, not an
/// error.
pub fn reconcile_pixel_size(observations: &[Option<PhysicalSize>]) -> Option<PhysicalSize> {
    let mut agreed: Option<&PhysicalSize> = None;
    for observation in observations.iter().flatten() {
        match agreed {
            None => agreed = Some(observation),
            Some(current) if current == observation => {}
            Some(_) => return None,
        }
    }
    agreed.cloned()
}
