//! Integration tests for script mode
//!
//! These run command files from disk and check the written transcript.

use std::fs;
use std::io;

use buffer_console::{
    run_script, Console, ConsoleError, ConsoleSettings, INVALID_UTF8, MISSING_SCRIPT,
};
use tempfile::TempDir;

fn settings_in(dir: &TempDir) -> ConsoleSettings {
    ConsoleSettings::default().with_transcript_path(Some(dir.path().join("output.txt")))
}

fn run(dir: &TempDir, script: &str, settings: &ConsoleSettings) -> String {
    let input = dir.path().join("commands.txt");
    fs::write(&input, script).unwrap();

    let mut console = Console::new(io::empty(), Vec::new());
    let report = run_script(&input, settings, &mut console).unwrap();
    assert!(report.is_some());
    String::from_utf8(console.into_output()).unwrap()
}

#[test]
fn test_script_writes_transcript() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let script = "AddText hello\n\
                  PrintText\n\
                  AddText  world\n\
                  PrintText\n\
                  MoveLeft 6\n\
                  DeleteText 1\n\
                  PrintText\n";

    let stdout = run(&dir, script, &settings);

    let transcript = fs::read_to_string(&settings.transcript_path).unwrap();
    assert_eq!(transcript, "hello\nhello world\nhell world\n");
    assert_eq!(stdout, transcript);
}

#[test]
fn test_script_stops_at_exit() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    run(
        &dir,
        "AddText abc\nPrintText\nExit\nAddText def\nPrintText\n",
        &settings,
    );

    let transcript = fs::read_to_string(&settings.transcript_path).unwrap();
    assert_eq!(transcript, "abc\n");
}

#[test]
fn test_script_reports_bad_lines_and_continues() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let stdout = run(
        &dir,
        "Print\nDeleteText 1\nAddText abc\nMoveRight two\nPrintText\n",
        &settings,
    );

    assert_eq!(
        stdout,
        "Error: Invalid command: Print\n\
         Error: Nothing to delete.\n\
         Error: Invalid number of arrow strokes 'two'. Please enter a non-negative integer.\n\
         abc\n"
    );
    let transcript = fs::read_to_string(&settings.transcript_path).unwrap();
    assert_eq!(transcript, "abc\n");
}

#[test]
fn test_print_text_ignores_argument() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    run(&dir, "AddText abc\nPrintText extra\n", &settings);
    assert_eq!(
        fs::read_to_string(&settings.transcript_path).unwrap(),
        "abc\n"
    );
}

#[test]
fn test_script_without_renders_writes_empty_transcript() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    run(&dir, "MoveLeft 1\n", &settings);
    assert_eq!(fs::read_to_string(&settings.transcript_path).unwrap(), "");
}

#[test]
fn test_script_skips_undecodable_line() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let input = dir.path().join("commands.txt");
    fs::write(
        &input,
        &b"AddText abc\nPrintText\nAddText \xff\xfe\nAddText d\nPrintText\n"[..],
    )
    .unwrap();

    let mut console = Console::new(io::empty(), Vec::new());
    let report = run_script(&input, &settings, &mut console)
        .unwrap()
        .unwrap();

    assert_eq!(report.undecodable, 1);
    assert_eq!(report.stats.rendered, 2);
    assert_eq!(
        String::from_utf8(console.into_output()).unwrap(),
        format!("abc\nError: {}\nabcd\n", INVALID_UTF8)
    );
    assert_eq!(
        fs::read_to_string(&settings.transcript_path).unwrap(),
        "abc\nabcd\n"
    );
}

#[test]
fn test_script_respects_capacity() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir).with_capacity(Some(5)).unwrap();
    let stdout = run(&dir, "AddText abcde\nAddText abcd\nPrintText\n", &settings);

    assert!(stdout.starts_with("Error: Buffer is full."));
    assert_eq!(
        fs::read_to_string(&settings.transcript_path).unwrap(),
        "abcd\n"
    );
}

#[test]
fn test_missing_script() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let mut console = Console::new(io::empty(), Vec::new());

    let report = run_script(&dir.path().join("nope.txt"), &settings, &mut console).unwrap();

    assert!(report.is_none());
    assert_eq!(
        String::from_utf8(console.into_output()).unwrap(),
        format!("Error: {}\n", MISSING_SCRIPT)
    );
    assert!(!settings.transcript_path.exists());
}

#[test]
fn test_directory_is_not_a_script() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let mut console = Console::new(io::empty(), Vec::new());
    assert!(run_script(dir.path(), &settings, &mut console)
        .unwrap()
        .is_none());
}

#[test]
fn test_unwritable_transcript_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("commands.txt");
    fs::write(&input, "AddText a\nPrintText\n").unwrap();
    let settings = ConsoleSettings::default()
        .with_transcript_path(Some(dir.path().join("missing").join("out.txt")));

    let mut console = Console::new(io::empty(), Vec::new());
    let err = run_script(&input, &settings, &mut console).unwrap_err();
    assert!(matches!(err, ConsoleError::Transcript { .. }));
}
