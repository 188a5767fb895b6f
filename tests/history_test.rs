// Save/undo behaviour of the rotating snapshot history

use tab_editor_wasm::storage::{FileStore, MemoryStore};
use tab_editor_wasm::undo::SaveInfo;
use tab_editor_wasm::{
    Config, HistoryStore, SaveOutcome, Tab, UndoOutcome, UndoRefusal, MAX_SAVES,
};

fn new_tab(id: &str) -> Tab {
    Tab::from_config(id, Config::default()).expect("default config is valid")
}

/// Give each save a distinct encoding
fn mark(tab: &mut Tab, n: u32) {
    tab.set_name(format!("version {}", n));
}

#[test]
fn test_save_twice_without_change_is_deduplicated() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let tab = new_tab("dedup");

    assert_eq!(history.save(&tab).unwrap(), SaveOutcome::Saved);
    assert_eq!(history.save(&tab).unwrap(), SaveOutcome::Unchanged);

    let info = history.save_info("dedup").unwrap().unwrap();
    assert_eq!(info.num_saves, 1);
    assert_eq!(info.current_save, 1);
}

#[test]
fn test_save_after_edit_advances() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let mut tab = new_tab("edit");
    history.save(&tab).unwrap();

    tab.sections[0].measures[0].strings[0].notes[0].fret_number = Some(3);

    assert_eq!(history.save(&tab).unwrap(), SaveOutcome::Saved);
    assert_eq!(history.save_info("edit").unwrap().unwrap().num_saves, 2);
}

#[test]
fn test_undo_restores_previous_snapshot() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let mut tab = new_tab("undo");
    history.save(&tab).unwrap();

    tab.set_capo(2);
    history.save(&tab).unwrap();

    match history.undo("undo").unwrap() {
        UndoOutcome::Restored(restored) => assert_eq!(restored.capo, 0),
        other => panic!("expected restore, got {:?}", other),
    }
    assert_eq!(
        history.undo("undo").unwrap(),
        UndoOutcome::Refused(UndoRefusal::NoEarlierState)
    );
}

#[test]
fn test_undo_window_after_twenty_saves() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let mut tab = new_tab("window");

    for n in 0..MAX_SAVES as u32 {
        mark(&mut tab, n);
        assert_eq!(history.save(&tab).unwrap(), SaveOutcome::Saved);
    }

    for step in 1..MAX_SAVES {
        let outcome = history.undo("window").unwrap();
        match outcome {
            UndoOutcome::Restored(restored) => {
                assert_eq!(restored.name, format!("version {}", MAX_SAVES - 1 - step));
            }
            other => panic!("undo {} should succeed, got {:?}", step, other),
        }
    }

    // The 20th undo runs out of retained snapshots
    assert_eq!(
        history.undo("window").unwrap(),
        UndoOutcome::Refused(UndoRefusal::RetentionExceeded)
    );
}

#[test]
fn test_rotation_overwrites_oldest_snapshots() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let mut tab = new_tab("rotate");

    for n in 0..25 {
        mark(&mut tab, n);
        history.save(&tab).unwrap();
    }

    let info = history.save_info("rotate").unwrap().unwrap();
    assert_eq!(info, SaveInfo { num_saves: 25, current_save: 25 });
    assert_eq!(history.store().len(), MAX_SAVES + 1);

    // Slot 0 now holds save 20 (0-based), not the first one
    let slot_zero = history.load(Some(0), "rotate").unwrap().unwrap();
    assert_eq!(slot_zero.name, "version 20");

    let mut undone = 0;
    while history.undo("rotate").unwrap().is_restored() {
        undone += 1;
    }
    assert_eq!(undone, MAX_SAVES - 1);
    assert_eq!(history.load(None, "rotate").unwrap().unwrap().name, "version 5");
}

#[test]
fn test_save_after_undo_discards_forward_history() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let mut tab = new_tab("branch");

    for n in 1..=3 {
        mark(&mut tab, n);
        history.save(&tab).unwrap();
    }

    let mut tab = history.undo("branch").unwrap().restored_or(tab);
    assert_eq!(tab.name, "version 2");

    mark(&mut tab, 4);
    assert_eq!(history.save(&tab).unwrap(), SaveOutcome::Saved);
    assert_eq!(
        history.save_info("branch").unwrap().unwrap(),
        SaveInfo { num_saves: 3, current_save: 3 }
    );

    // Reachable states: version 4 (current), then 2, then 1; version 3 is gone
    let mut reachable = vec![history.load(None, "branch").unwrap().unwrap().name];
    while let UndoOutcome::Restored(restored) = history.undo("branch").unwrap() {
        reachable.push(restored.name);
    }
    assert_eq!(reachable, vec!["version 4", "version 2", "version 1"]);
}

#[test]
fn test_histories_are_isolated_per_identity() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let mut a = new_tab("a");
    let b = new_tab("b");

    history.save(&a).unwrap();
    a.set_capo(1);
    history.save(&a).unwrap();
    history.save(&b).unwrap();

    assert_eq!(history.save_info("a").unwrap().unwrap().num_saves, 2);
    assert_eq!(history.save_info("b").unwrap().unwrap().num_saves, 1);
    assert!(history.can_undo("a").unwrap());
    assert!(!history.can_undo("b").unwrap());
}

#[test]
fn test_round_trip_through_history() {
    let mut history = HistoryStore::new(MemoryStore::new());
    let mut tab = new_tab("round");
    tab.set_capo(3);
    tab.sections[0].set_name("Verse");
    tab.sections[0].measures[1].set_beats(6);
    tab.sections[0].measures[1].strings[4].notes[5].fret_number = Some(12);

    history.save(&tab).unwrap();

    assert_eq!(history.load(None, "round").unwrap(), Some(tab));
}

#[test]
fn test_file_backed_histories_stay_apart_for_similar_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = HistoryStore::new(FileStore::open(dir.path()).unwrap());
    let dotted = new_tab("a.b");
    let mut slashed = new_tab("a/b");
    slashed.set_name("slashed");

    history.save(&dotted).unwrap();
    history.save(&slashed).unwrap();

    assert_eq!(
        history.save_info("a/b").unwrap(),
        Some(SaveInfo { num_saves: 1, current_save: 1 })
    );
    assert_eq!(history.load(None, "a.b").unwrap(), Some(dotted));
    assert_eq!(history.load(None, "a/b").unwrap(), Some(slashed));
}
