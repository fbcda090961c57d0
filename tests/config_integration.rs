use std::path::PathBuf;

use textarea::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".textarearc");
    let content = r#"
# comment
--no-tab-indent

--autosave-ms 900
   
--debug-log=keys.log
--style=font-family: serif; font-size: 18px
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_tab_indent);
    assert_eq!(flags.autosave_ms, Some(900));
    assert_eq!(flags.debug_log, Some(PathBuf::from("keys.log")));
    assert_eq!(
        flags.style.as_deref(),
        Some("font-family: serif; font-size: 18px")
    );
}

#[test]
fn test_missing_config_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".textarearc");
    let content = "--no-tab-indent\n--autosave-ms 900\n--download-dir snapshots\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "textarea".to_string(),
        "--autosave-ms".to_string(),
        "100".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_tab_indent, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(effective.autosave_ms, Some(100), "cli should override delay");
    assert_eq!(
        effective.download_dir,
        Some(PathBuf::from("snapshots")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "textarea".to_string(),
        "--style=color: red".to_string(),
        "--debug-log=keys.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.style.as_deref(), Some("color: red"));
    assert_eq!(flags.debug_log, Some(PathBuf::from("keys.log")));
}

#[test]
fn test_positional_hash_is_not_a_flag() {
    let args = vec!["textarea".to_string(), "#y0jNKQ".to_string()];
    assert_eq!(parse_flag_tokens(&args), ConfigFlags::default());
}
