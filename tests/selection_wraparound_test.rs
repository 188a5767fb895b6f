// Cursor movement across section, measure, string and beat boundaries

use tab_editor_wasm::{Config, Direction, Selection, Tab, TabError};

/// 2 sections, each with 2 measures of 4 beats on 6 strings
fn two_by_two_tab() -> Tab {
    let config = Config {
        start_sections: 2,
        start_measures: 2,
        start_notes_per_measure: 4,
        ..Config::default()
    };
    Tab::from_config("wrap", config).expect("config is valid")
}

#[test]
fn test_left_from_origin_wraps_to_last_beat_of_last_section() {
    let tab = two_by_two_tab();
    let mut sel = Selection::default();

    sel.move_cursor(Direction::Left, &tab).unwrap();

    assert_eq!(sel, Selection::new(1, 1, 0, 3));
}

#[test]
fn test_up_from_first_string_wraps_to_last() {
    let tab = two_by_two_tab();
    let mut sel = Selection::default();

    sel.move_cursor(Direction::Up, &tab).unwrap();

    assert_eq!(sel.selected_string, 5);
    assert_eq!(sel.selected_beat, 0);
    assert_eq!(sel.selected_measure, 0);
}

#[test]
fn test_walking_right_visits_every_beat_once() {
    let tab = two_by_two_tab();
    let mut sel = Selection::default();
    let mut visited = vec![sel];

    // 2 sections * 2 measures * 4 beats
    for _ in 0..15 {
        sel.move_cursor(Direction::Right, &tab).unwrap();
        visited.push(sel);
    }

    let mut unique = visited.clone();
    unique.sort_by_key(|s| (s.selected_section, s.selected_measure, s.selected_beat));
    unique.dedup();
    assert_eq!(unique.len(), 16);
    assert_eq!(sel, Selection::new(1, 1, 0, 3));

    sel.move_cursor(Direction::Right, &tab).unwrap();
    assert_eq!(sel, Selection::default());
}

#[test]
fn test_left_then_right_returns_to_start() {
    let tab = two_by_two_tab();
    let start = Selection::new(1, 0, 2, 0);
    let mut sel = start;

    sel.move_cursor(Direction::Left, &tab).unwrap();
    assert_eq!(sel, Selection::new(0, 1, 2, 3));

    sel.move_cursor(Direction::Right, &tab).unwrap();
    assert_eq!(sel, start);
}

#[test]
fn test_cascade_uses_beats_of_destination_measure() {
    let mut tab = two_by_two_tab();
    tab.sections[0].measures[0].set_beats(7);
    let mut sel = Selection::new(0, 1, 0, 0);

    sel.move_cursor(Direction::Left, &tab).unwrap();

    assert_eq!(sel, Selection::new(0, 0, 0, 6));
}

#[test]
fn test_next_measure_from_last_section_wraps_to_first() {
    let tab = two_by_two_tab();
    let mut sel = Selection::new(1, 1, 3, 2);

    sel.next_measure(&tab).unwrap();

    assert_eq!(sel, Selection::new(0, 0, 3, 2));
}

#[test]
fn test_prev_section_keeps_stale_measure_index() {
    let config = Config::default();
    let mut tab = two_by_two_tab();
    tab.sections[0].set_measures(1, &config).unwrap();
    let mut sel = Selection::new(1, 1, 0, 0);

    sel.prev_section(&tab);

    // Measure 1 does not exist in section 0; the cursor is left as-is
    assert_eq!(sel, Selection::new(0, 1, 0, 0));
    assert!(!sel.is_valid_for(&tab));
    assert!(matches!(
        sel.move_cursor(Direction::Down, &tab),
        Err(TabError::StaleSelection { section: 0, measure: 1 })
    ));

    sel.clamp_to(&tab);
    assert_eq!(sel, Selection::new(0, 0, 0, 0));
}

#[test]
fn test_select_string_with_name_scenario() {
    let tab = two_by_two_tab();
    let section = &tab.sections[0];
    let mut sel = Selection::default();

    assert!(section.select_string_with_name(&mut sel, "e"));
    assert_eq!(sel.selected_string, 0);

    assert!(section.select_string_with_name(&mut sel, "b"));
    assert_eq!(sel.selected_string, 1);

    assert!(section.select_string_with_name(&mut sel, "D"));
    assert_eq!(sel.selected_string, 3);

    assert!(!section.select_string_with_name(&mut sel, "x"));
    assert_eq!(sel.selected_string, 3);
}

#[test]
fn test_failed_move_leaves_selection_unchanged() {
    let config = Config::default();
    let mut tab = two_by_two_tab();
    tab.sections[1].set_measures(1, &config).unwrap();
    let start = Selection::new(1, 3, 2, 0);
    let mut sel = start;

    for direction in [Direction::Left, Direction::Right, Direction::Up] {
        assert!(matches!(
            sel.move_cursor(direction, &tab),
            Err(TabError::StaleSelection { .. })
        ));
        assert_eq!(sel, start);
    }
}
