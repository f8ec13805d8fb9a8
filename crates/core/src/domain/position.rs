//! Queue Position Tracker - determines which meeting is at the front
//!
//! Pure function of a queue's active-meeting set; no hidden state, no I/O.
//! The lifecycle manager calls this before and after every mutation to detect
//! front-meeting transitions.

use crate::domain::Meeting;

/// Return the front meeting of an active set: the one with the minimal
/// `(created_at, seq)` key, or `None` when the set is empty.
///
/// Tie-break: creation time is authoritative; meetings created with identical
/// timestamps are disambiguated by insertion sequence (first-inserted wins).
pub fn front_meeting(active: &[Meeting]) -> Option<&Meeting> {
    active.iter().min_by_key(|m| m.order_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MeetingKind;

    fn meeting(id: &str, created_at: i64, seq: i64) -> Meeting {
        Meeting::new(id, "advising", MeetingKind::new("inperson"), created_at, seq)
    }

    #[test]
    fn test_empty_set_has_no_front() {
        assert!(front_meeting(&[]).is_none());
    }

    #[test]
    fn test_single_meeting_is_front() {
        let active = vec![meeting("m1", 5000, 1)];
        assert_eq!(front_meeting(&active).unwrap().id, "m1");
    }

    #[test]
    fn test_earliest_created_is_front() {
        let active = vec![
            meeting("m2", 2000, 2),
            meeting("m1", 1000, 1),
            meeting("m3", 3000, 3),
        ];
        assert_eq!(front_meeting(&active).unwrap().id, "m1");
    }

    #[test]
    fn test_timestamp_tie_broken_by_sequence() {
        // Identical creation timestamps: first-inserted wins
        let active = vec![meeting("m2", 1000, 2), meeting("m1", 1000, 1)];
        assert_eq!(front_meeting(&active).unwrap().id, "m1");
    }

    #[test]
    fn test_front_is_independent_of_slice_order() {
        let a = vec![meeting("m1", 1000, 1), meeting("m2", 2000, 2)];
        let b = vec![meeting("m2", 2000, 2), meeting("m1", 1000, 1)];
        assert_eq!(
            front_meeting(&a).unwrap().id,
            front_meeting(&b).unwrap().id
        );
    }
}
