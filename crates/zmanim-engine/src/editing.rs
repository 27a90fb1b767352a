//! Editing a synagogue's prayer-time list.
//!
//! Entries are replaced whole, located by `id`. Any operation that changes a
//! day-type group's membership or sequence leaves that group numbered
//! densely `0..n-1`, so repeated edits never accumulate gaps or duplicate
//! `order` values. The other group is never touched.
//!
//! Validation happens here, at write time. The resolver tolerates anything.

use crate::clock::parse_clock_time;
use crate::error::{Result, ZmanimError};
use crate::model::{DayType, PrayerTimeEntry, PrayerType, TimeRelation, TimeSpec};

/// Default minutes before sunset for a newly added entry.
pub const NEW_ENTRY_MINUTES: i64 = 20;

/// Template for a new line: Mincha, 20 minutes before sunset, placed last.
pub fn new_entry(list: &[PrayerTimeEntry], id: impl Into<String>, day_type: DayType) -> PrayerTimeEntry {
    PrayerTimeEntry {
        id: id.into(),
        day_type,
        prayer_type: PrayerType::Mincha,
        description: String::new(),
        time: TimeSpec::relative(TimeRelation::BeforeSunset, NEW_ENTRY_MINUTES),
        order: group_len(list, day_type) as i64,
    }
}

/// Check that an entry names a usable time.
pub fn validate_entry(entry: &PrayerTimeEntry) -> Result<()> {
    match &entry.time {
        TimeSpec::Fixed { time } => parse_clock_time(time)
            .map(|_| ())
            .ok_or_else(|| ZmanimError::InvalidClockTime(format!("'{}'", time))),
        TimeSpec::Relative(rel) if rel.minutes < 0 => Err(ZmanimError::NegativeMinutes(rel.minutes)),
        TimeSpec::Relative(_) => Ok(()),
        TimeSpec::Unrecognized { time_type, .. } => Err(ZmanimError::UnrecognizedTimeSpec(format!(
            "entry '{}' has time type '{}'",
            entry.id, time_type
        ))),
    }
}

/// Validate and append `entry` at the end of its group.
pub fn add_entry(list: &mut Vec<PrayerTimeEntry>, mut entry: PrayerTimeEntry) -> Result<()> {
    validate_entry(&entry)?;
    entry.order = group_len(list, entry.day_type) as i64;
    list.push(entry);
    Ok(())
}

/// Validate and replace the entry with the same `id`.
///
/// The replacement keeps the old position. If it moves to the other day type
/// it is placed last there and both groups are renumbered.
pub fn replace_entry(list: &mut [PrayerTimeEntry], mut entry: PrayerTimeEntry) -> Result<()> {
    validate_entry(&entry)?;
    let idx = position_of(list, &entry.id)?;
    let old_day = list[idx].day_type;

    if old_day == entry.day_type {
        entry.order = list[idx].order;
        list[idx] = entry;
    } else {
        let new_day = entry.day_type;
        entry.order = group_len(list, new_day) as i64;
        list[idx] = entry;
        renumber(list, old_day);
        renumber(list, new_day);
    }
    Ok(())
}

/// Remove the entry with `id` and renumber its group.
pub fn remove_entry(list: &mut Vec<PrayerTimeEntry>, id: &str) -> Result<PrayerTimeEntry> {
    let idx = position_of(list, id)?;
    let removed = list.remove(idx);
    renumber(list, removed.day_type);
    Ok(removed)
}

/// Move the entry at display position `from` to display position `to`
/// within `day_type`'s group, then renumber the group.
pub fn move_entry(list: &mut [PrayerTimeEntry], day_type: DayType, from: usize, to: usize) -> Result<()> {
    let mut sequence = group_sequence(list, day_type);
    let len = sequence.len();
    for position in [from, to] {
        if position >= len {
            return Err(ZmanimError::PositionOutOfRange { position, len });
        }
    }

    let moved = sequence.remove(from);
    sequence.insert(to, moved);
    for (order, idx) in sequence.into_iter().enumerate() {
        list[idx].order = order as i64;
    }
    Ok(())
}

/// Rewrite `order` for `day_type`'s group to `0..n-1`, keeping the current
/// display sequence (stable by existing `order`, ties by list position).
pub fn renumber(list: &mut [PrayerTimeEntry], day_type: DayType) {
    for (order, idx) in group_sequence(list, day_type).into_iter().enumerate() {
        list[idx].order = order as i64;
    }
}

/// List indices of a group's entries in display order.
fn group_sequence(list: &[PrayerTimeEntry], day_type: DayType) -> Vec<usize> {
    let mut indices: Vec<usize> = list
        .iter()
        .enumerate()
        .filter(|(_, e)| e.day_type == day_type)
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| list[i].order);
    indices
}

fn group_len(list: &[PrayerTimeEntry], day_type: DayType) -> usize {
    list.iter().filter(|e| e.day_type == day_type).count()
}

fn position_of(list: &[PrayerTimeEntry], id: &str) -> Result<usize> {
    list.iter()
        .position(|e| e.id == id)
        .ok_or_else(|| ZmanimError::UnknownEntry(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(id: &str, day_type: DayType, order: i64) -> PrayerTimeEntry {
        PrayerTimeEntry {
            id: id.into(),
            day_type,
            prayer_type: PrayerType::Other,
            description: id.into(),
            time: TimeSpec::fixed("08:00"),
            order,
        }
    }

    fn ids_in_order(list: &[PrayerTimeEntry], day_type: DayType) -> Vec<(&str, i64)> {
        group_sequence(list, day_type)
            .into_iter()
            .map(|i| (list[i].id.as_str(), list[i].order))
            .collect()
    }

    fn sample() -> Vec<PrayerTimeEntry> {
        vec![
            fixed("w0", DayType::Weekday, 0),
            fixed("s0", DayType::Sabbath, 0),
            fixed("w1", DayType::Weekday, 1),
            fixed("w2", DayType::Weekday, 2),
            fixed("s1", DayType::Sabbath, 1),
        ]
    }

    #[test]
    fn test_new_entry_template() {
        let list = sample();
        let e = new_entry(&list, "n", DayType::Weekday);
        assert_eq!(e.prayer_type, PrayerType::Mincha);
        assert_eq!(e.time, TimeSpec::relative(TimeRelation::BeforeSunset, 20));
        assert_eq!(e.order, 3);
        assert!(validate_entry(&e).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fixed_time() {
        let mut e = fixed("x", DayType::Weekday, 0);
        e.time = TimeSpec::fixed("7pm");
        assert!(matches!(validate_entry(&e), Err(ZmanimError::InvalidClockTime(_))));
        e.time = TimeSpec::fixed("");
        assert!(validate_entry(&e).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_minutes() {
        let mut e = fixed("x", DayType::Weekday, 0);
        e.time = TimeSpec::relative(TimeRelation::AfterSunrise, -5);
        assert_eq!(validate_entry(&e), Err(ZmanimError::NegativeMinutes(-5)));
    }

    #[test]
    fn test_validate_rejects_unrecognized() {
        let mut e = fixed("x", DayType::Weekday, 0);
        e.time = TimeSpec::Unrecognized {
            time_type: "lunar".into(),
            fixed_time: None,
            relative_time: None,
        };
        assert!(matches!(validate_entry(&e), Err(ZmanimError::UnrecognizedTimeSpec(_))));
    }

    #[test]
    fn test_add_entry_appends_to_group() {
        let mut list = sample();
        add_entry(&mut list, fixed("s2", DayType::Sabbath, 99)).unwrap();
        assert_eq!(
            ids_in_order(&list, DayType::Sabbath),
            [("s0", 0), ("s1", 1), ("s2", 2)]
        );
    }

    #[test]
    fn test_add_invalid_entry_leaves_list_unchanged() {
        let mut list = sample();
        let mut bad = fixed("bad", DayType::Weekday, 0);
        bad.time = TimeSpec::fixed("noon-ish");
        assert!(add_entry(&mut list, bad).is_err());
        assert_eq!(list, sample());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list = sample();
        let mut updated = fixed("w1", DayType::Weekday, 50);
        updated.description = "מנחה".into();
        replace_entry(&mut list, updated).unwrap();
        let w1 = list.iter().find(|e| e.id == "w1").unwrap();
        assert_eq!(w1.order, 1);
        assert_eq!(w1.description, "מנחה");
    }

    #[test]
    fn test_replace_moving_day_type_renumbers_both() {
        let mut list = sample();
        replace_entry(&mut list, fixed("w0", DayType::Sabbath, 0)).unwrap();
        assert_eq!(
            ids_in_order(&list, DayType::Weekday),
            [("w1", 0), ("w2", 1)]
        );
        assert_eq!(
            ids_in_order(&list, DayType::Sabbath),
            [("s0", 0), ("s1", 1), ("w0", 2)]
        );
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut list = sample();
        let err = replace_entry(&mut list, fixed("nope", DayType::Weekday, 0)).unwrap_err();
        assert_eq!(err, ZmanimError::UnknownEntry("nope".into()));
    }

    #[test]
    fn test_remove_renumbers_group_only() {
        let mut list = sample();
        let removed = remove_entry(&mut list, "w0").unwrap();
        assert_eq!(removed.id, "w0");
        assert_eq!(
            ids_in_order(&list, DayType::Weekday),
            [("w1", 0), ("w2", 1)]
        );
        assert_eq!(
            ids_in_order(&list, DayType::Sabbath),
            [("s0", 0), ("s1", 1)]
        );
    }

    #[test]
    fn test_move_entry() {
        let mut list = sample();
        move_entry(&mut list, DayType::Weekday, 2, 0).unwrap();
        assert_eq!(
            ids_in_order(&list, DayType::Weekday),
            [("w2", 0), ("w0", 1), ("w1", 2)]
        );
    }

    #[test]
    fn test_move_out_of_range() {
        let mut list = sample();
        let err = move_entry(&mut list, DayType::Sabbath, 0, 2).unwrap_err();
        assert_eq!(err, ZmanimError::PositionOutOfRange { position: 2, len: 2 });
    }

    #[test]
    fn test_renumber_fixes_gaps_and_ties() {
        let mut list = vec![
            fixed("b", DayType::Weekday, 10),
            fixed("a", DayType::Weekday, 3),
            fixed("c", DayType::Weekday, 10),
        ];
        renumber(&mut list, DayType::Weekday);
        assert_eq!(
            ids_in_order(&list, DayType::Weekday),
            [("a", 0), ("b", 1), ("c", 2)]
        );
        let snapshot = list.clone();
        renumber(&mut list, DayType::Weekday);
        assert_eq!(list, snapshot);
    }
}
