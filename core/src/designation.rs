//! Identifier and display-name generation for mission entities.
//!
//! Shepherd designations are positional (`SHEP-001` for the first unit).
//! Debris designations are drawn from the RNG, so the same seed yields the
//! same designations.

use crate::rng::RandomSource;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of the random suffix in a debris designation.
pub const DEBRIS_SUFFIX_LEN: usize = 6;

pub struct Designation;

impl Designation {
    /// `SHEP-###` for the 1-based unit `number`.
    pub fn shepherd_id(number: usize) -> String {
        format!("SHEP-{number:03}")
    }

    pub fn shepherd_name(number: usize) -> String {
        format!("Shepherd {number}")
    }

    /// `DEBRIS-XXXXXX`, six uppercase base-36 characters.
    pub fn debris_id(rng: &mut dyn RandomSource) -> String {
        let suffix: String = (0..DEBRIS_SUFFIX_LEN)
            .map(|_| BASE36[rng.pick_index(BASE36.len())] as char)
            .collect();
        format!("DEBRIS-{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SubsystemSlot};

    #[test]
    fn shepherd_ids_are_zero_padded() {
        assert_eq!(Designation::shepherd_id(1), "SHEP-001");
        assert_eq!(Designation::shepherd_id(16), "SHEP-016");
        assert_eq!(Designation::shepherd_id(123), "SHEP-123");
        assert_eq!(Designation::shepherd_name(7), "Shepherd 7");
    }

    #[test]
    fn debris_id_generation_is_deterministic() {
        let bank = RngBank::new(12345);
        let id1 = Designation::debris_id(&mut bank.for_subsystem(SubsystemSlot::DebrisInspection));
        let id2 = Designation::debris_id(&mut bank.for_subsystem(SubsystemSlot::DebrisInspection));
        assert_eq!(id1, id2, "Same seed should produce same designation");
    }

    #[test]
    fn generates_well_formed_debris_ids() {
        let mut rng = RngBank::new(12345).for_subsystem(SubsystemSlot::DebrisInspection);
        for _ in 0..100 {
            let id = Designation::debris_id(&mut rng);
            let suffix = id.strip_prefix("DEBRIS-").expect("prefix");
            assert_eq!(suffix.len(), DEBRIS_SUFFIX_LEN, "bad designation: {id}");
            assert!(
                suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()),
                "non base-36 designation: {id}"
            );
        }
    }
}
