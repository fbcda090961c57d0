//! End-to-end behavior of the structural-key pipeline on a fragmented
//! surface.

use textarea::input::{ContinuationOptions, Key, KeyEvent, KeyOutcome, Modifiers, handle_key};
use textarea::surface::{
    FragmentedSurface, NodePosition, RenderNode, Selection, Surface, current_offset, place_caret,
};

fn surface_at(text: &str, caret: usize) -> FragmentedSurface {
    let mut surface = FragmentedSurface::from_text(text);
    place_caret(&mut surface, caret);
    surface
}

fn commit(surface: &mut FragmentedSurface) -> KeyOutcome {
    handle_key(
        surface,
        &KeyEvent::plain(Key::Enter),
        &ContinuationOptions::default(),
    )
    .unwrap()
}

fn backspace(surface: &mut FragmentedSurface) -> KeyOutcome {
    handle_key(
        surface,
        &KeyEvent::plain(Key::Backspace),
        &ContinuationOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_fence_commit_places_caret_inside() {
    let mut surface = surface_at("intro\n```", 9);
    assert_eq!(commit(&mut surface), KeyOutcome::Intercepted);
    assert_eq!(surface.text(), "intro\n```\n\n```");
    assert_eq!(current_offset(&surface), Some(6 + 4));
}

#[test]
fn test_tilde_fence_commit() {
    let mut surface = surface_at("~~~", 3);
    commit(&mut surface);
    assert_eq!(surface.text(), "~~~\n\n~~~");
    assert_eq!(current_offset(&surface), Some(4));
}

#[test]
fn test_bullet_commit_appends_marker() {
    let mut surface = surface_at("- item", 6);
    commit(&mut surface);
    assert_eq!(surface.text(), "- item\n- ");
    assert_eq!(current_offset(&surface), Some(9));
}

#[test]
fn test_bullet_character_is_preserved() {
    for bullet in ['-', '*', '+'] {
        let line = format!("  {bullet} x");
        let mut surface = surface_at(&line, 5);
        commit(&mut surface);
        assert_eq!(surface.text(), format!("{line}\n  {bullet} "));
    }
}

#[test]
fn test_empty_bullet_commit_exits_list() {
    let mut surface = surface_at("- a\n- ", 6);
    commit(&mut surface);
    assert_eq!(surface.text(), "- a\n\n");
    assert_eq!(current_offset(&surface), Some(5));
    assert!(!surface.text().ends_with("- "));
}

#[test]
fn test_ordered_commit_increments_twice() {
    let mut surface = surface_at("3. content", 10);
    commit(&mut surface);
    assert_eq!(surface.text(), "3. content\n4. ");

    let mut typed = surface.clone();
    assert!(typed.insert_at_caret("more"));
    commit(&mut typed);
    assert_eq!(typed.text(), "3. content\n4. more\n5. ");
    assert_eq!(current_offset(&typed), Some(typed.char_len()));
}

#[test]
fn test_ordered_overflow_is_native() {
    let line = format!("{}. x", u64::MAX);
    let mut surface = surface_at(&line, line.len());
    assert_eq!(commit(&mut surface), KeyOutcome::Native);
    assert_eq!(surface.text(), line);
}

#[test]
fn test_quote_commit_normalizes_space() {
    let mut surface = surface_at(">quoted", 7);
    commit(&mut surface);
    assert_eq!(surface.text(), ">quoted\n> ");
}

#[test]
fn test_commit_mid_line_splits_after_caret() {
    let mut surface = surface_at("- alpha beta", 7);
    commit(&mut surface);
    assert_eq!(surface.text(), "- alpha\n-  beta");
    assert_eq!(current_offset(&surface), Some(10));
}

#[test]
fn test_backspace_strips_quote_keeping_indent() {
    let mut surface = surface_at("x\n  > ", 6);
    assert_eq!(backspace(&mut surface), KeyOutcome::Intercepted);
    assert_eq!(surface.text(), "x\n  ");
    assert_eq!(current_offset(&surface), Some(4));
}

#[test]
fn test_backspace_strips_ordered_marker() {
    let mut surface = surface_at("12. ", 4);
    backspace(&mut surface);
    assert_eq!(surface.text(), "");
}

#[test]
fn test_backspace_not_at_line_end_is_native() {
    let mut surface = surface_at("- \nnext", 1);
    assert_eq!(backspace(&mut surface), KeyOutcome::Native);
    assert_eq!(surface.text(), "- \nnext");
}

#[test]
fn test_shift_tab_without_indent_keeps_key() {
    let mut surface = surface_at("- a", 3);
    let outcome = handle_key(
        &mut surface,
        &KeyEvent::new(Key::Tab, Modifiers::SHIFT),
        &ContinuationOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome, KeyOutcome::Intercepted);
    assert_eq!(surface.text(), "- a");
    assert_eq!(current_offset(&surface), Some(3));
}

#[test]
fn test_outdent_removes_at_most_one_step() {
    let mut surface = surface_at("     1. a", 9);
    handle_key(
        &mut surface,
        &KeyEvent::new(Key::Tab, Modifiers::SHIFT),
        &ContinuationOptions::default(),
    )
    .unwrap();
    assert_eq!(surface.text(), "   1. a");
    assert_eq!(current_offset(&surface), Some(7));
}

#[test]
fn test_caret_outside_surface_declines() {
    let mut surface = FragmentedSurface::from_text("- a");
    surface.set_selection(Some(Selection::caret(NodePosition::new(7, 0))));
    assert_eq!(commit(&mut surface), KeyOutcome::Native);
    assert_eq!(surface.text(), "- a");
}

#[test]
fn test_commit_across_element_nodes() {
    let mut surface = FragmentedSurface::from_nodes(vec![
        RenderNode::Text("- one".into()),
        RenderNode::Element,
        RenderNode::Text("\n- tw".into()),
        RenderNode::Text("o".into()),
    ]);
    surface.set_selection(Some(Selection::caret(NodePosition::new(3, 1))));
    commit(&mut surface);
    assert_eq!(surface.text(), "- one\n- two\n- ");
    assert_eq!(current_offset(&surface), Some(14));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn plain_text_commit_only_inserts_newline(
            lines in proptest::collection::vec("[a-z][a-z ,.!?]{0,12}", 1..5),
            target in 0..80usize,
        ) {
            let text = lines.join("\n");
            let mut surface = FragmentedSurface::from_text(&text);
            let caret = target.min(surface.char_len());
            place_caret(&mut surface, caret);

            prop_assert_eq!(commit(&mut surface), KeyOutcome::Native);
            prop_assert_eq!(surface.text(), text.clone());

            // Native default behavior is then the only change.
            prop_assert!(surface.insert_at_caret("\n"));
            let mut expected: String = text.chars().take(caret).collect();
            expected.push('\n');
            expected.extend(text.chars().skip(caret));
            prop_assert_eq!(surface.text(), expected);
        }

        #[test]
        fn repeated_commits_never_drift(count in 1..20usize) {
            let mut surface = surface_at("- a", 3);
            for _ in 0..count {
                prop_assert!(surface.insert_at_caret("x"));
                commit(&mut surface);
                prop_assert_eq!(current_offset(&surface), Some(surface.char_len()));
            }
            prop_assert_eq!(surface.text().matches("\n- ").count(), count);
        }
    }
}
