use chrono::{NaiveDate, NaiveDateTime};
use notefill_core::{
    ClockSnapshot, DailyFillService, DailyNoteSettings, FileCreatedEvent, FillError, FillOutcome,
    FsVault, MemoryVault, SkipReason, TokenDialect, Vault,
};

const CLOCK_EPOCH_MS: i64 = 1_710_060_000_000;

fn clock() -> ClockSnapshot {
    ClockSnapshot::new(wall_clock(8, 15, 30), CLOCK_EPOCH_MS)
}

fn wall_clock(h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn fresh(path: &str) -> FileCreatedEvent {
    FileCreatedEvent::new(path, CLOCK_EPOCH_MS - 200)
}

fn journal_service(template: &str) -> DailyFillService<MemoryVault> {
    let mut vault = MemoryVault::new();
    vault.insert_note("Templates/Daily.md", template);
    let settings = DailyNoteSettings {
        folder_path: "Journal".to_string(),
        template_file_path: "Templates/Daily.md".to_string(),
        filename_date_format: "YYYY-MM-DD".to_string(),
    };
    DailyFillService::new(vault, settings)
}

#[test]
fn fresh_daily_note_receives_the_rendered_template() {
    let template = "\
# {{title}}

<< [[{{yesterday}}]] | [[{{tomorrow}}]] >>

Started {{time:HH:mm}}.

- [ ] plan the day
";
    let mut service = journal_service(template);
    service.vault_mut().insert_note("Journal/2024-03-10.md", "");

    let outcome = service
        .handle_created(&fresh("Journal/2024-03-10.md"), clock())
        .unwrap();
    assert_eq!(outcome, FillOutcome::Filled);

    let expected = "\
# 2024-03-10

<< [[2024-03-09]] | [[2024-03-11]] >>

Started 08:15.

- [ ] plan the day
";
    assert_eq!(service.vault().note("Journal/2024-03-10.md"), Some(expected));
}

#[test]
fn host_style_backslash_paths_still_qualify() {
    let mut service = journal_service("{{date}}");
    service.vault_mut().insert_note("Journal/2024-03-10.md", "");

    let outcome = service
        .handle_created(&fresh("Journal\\2024-03-10.md"), clock())
        .unwrap();
    assert_eq!(outcome, FillOutcome::Filled);
    assert_eq!(service.vault().note("Journal/2024-03-10.md"), Some("2024-03-10"));
}

#[test]
fn empty_folder_setting_watches_the_whole_vault() {
    let mut vault = MemoryVault::new();
    vault.insert_note("Templates/Daily.md", "{{date}}");
    vault.insert_note("2024-03-10.md", "");
    vault.insert_note("Deep/Nested/2024-03-10.md", "");
    let settings = DailyNoteSettings {
        folder_path: String::new(),
        template_file_path: "Templates/Daily.md".to_string(),
        filename_date_format: String::new(),
    };
    let mut service = DailyFillService::new(vault, settings);

    assert_eq!(
        service.handle_created(&fresh("2024-03-10.md"), clock()).unwrap(),
        FillOutcome::Filled
    );
    assert_eq!(
        service
            .handle_created(&fresh("Deep/Nested/2024-03-10.md"), clock())
            .unwrap(),
        FillOutcome::Filled
    );
}

#[test]
fn custom_filename_format_drives_the_reference_date() {
    let mut vault = MemoryVault::new();
    vault.insert_note("Templates/Daily.md", "{{date}} / {{date+1d:DD.MM.YYYY}}");
    vault.insert_note("Journal/10.03.2024.md", "");
    let settings = DailyNoteSettings {
        folder_path: "Journal".to_string(),
        template_file_path: "Templates/Daily.md".to_string(),
        filename_date_format: "DD.MM.YYYY".to_string(),
    };
    let mut service = DailyFillService::new(vault, settings);

    let outcome = service
        .handle_created(&fresh("Journal/10.03.2024.md"), clock())
        .unwrap();
    assert_eq!(outcome, FillOutcome::Filled);
    assert_eq!(
        service.vault().note("Journal/10.03.2024.md"),
        Some("2024-03-10 / 11.03.2024")
    );
}

#[test]
fn skip_ladder_reports_the_first_failing_check() {
    let mut service = journal_service("{{date}}");
    service.vault_mut().insert_note("Journal/2024-03-10.md", "");
    service.vault_mut().insert_note("Journal/shopping-list.md", "");
    service.vault_mut().insert_note("Archive/2024-03-10.md", "");

    // Folder creation events arrive with paths that are not files.
    assert_eq!(
        service
            .handle_created(&fresh("Journal/Subfolder"), clock())
            .unwrap(),
        FillOutcome::Skipped(SkipReason::NotAFile)
    );
    assert_eq!(
        service
            .handle_created(&fresh("Archive/2024-03-10.md"), clock())
            .unwrap(),
        FillOutcome::Skipped(SkipReason::OutsideFolder)
    );
    assert_eq!(
        service
            .handle_created(&fresh("Journal/shopping-list.md"), clock())
            .unwrap(),
        FillOutcome::Skipped(SkipReason::NotADailyNote)
    );
}

#[test]
fn freshness_window_is_a_strict_boundary() {
    let mut service = journal_service("{{date}}");
    service.vault_mut().insert_note("Journal/2024-03-10.md", "synced content");

    let just_inside = FileCreatedEvent::new("Journal/2024-03-10.md", CLOCK_EPOCH_MS - 999);
    assert_eq!(
        service.handle_created(&just_inside, clock()).unwrap(),
        FillOutcome::Filled
    );

    service.vault_mut().insert_note("Journal/2024-03-10.md", "synced content");
    let at_threshold = FileCreatedEvent::new("Journal/2024-03-10.md", CLOCK_EPOCH_MS - 1000);
    assert_eq!(
        service.handle_created(&at_threshold, clock()).unwrap(),
        FillOutcome::Skipped(SkipReason::StaleEvent)
    );
    assert_eq!(
        service.vault().note("Journal/2024-03-10.md"),
        Some("synced content")
    );
}

#[test]
fn template_setting_without_suffix_resolves_to_markdown() {
    let mut vault = MemoryVault::new();
    vault.insert_note("Templates/Daily.md", "{{date}}");
    vault.insert_note("Journal/2024-03-10.md", "");
    let settings = DailyNoteSettings {
        folder_path: "Journal".to_string(),
        template_file_path: "Templates/Daily".to_string(),
        filename_date_format: "YYYY-MM-DD".to_string(),
    };
    let mut service = DailyFillService::new(vault, settings);

    assert_eq!(
        service
            .handle_created(&fresh("Journal/2024-03-10.md"), clock())
            .unwrap(),
        FillOutcome::Filled
    );
}

#[test]
fn missing_template_warns_and_leaves_the_note_alone() {
    let mut vault = MemoryVault::new();
    vault.insert_note("Journal/2024-03-10.md", "untouched");
    let settings = DailyNoteSettings {
        folder_path: "Journal".to_string(),
        template_file_path: "Templates/Missing.md".to_string(),
        filename_date_format: "YYYY-MM-DD".to_string(),
    };
    let mut service = DailyFillService::new(vault, settings);

    let err = service
        .handle_created(&fresh("Journal/2024-03-10.md"), clock())
        .unwrap_err();
    match err {
        FillError::TemplateUnavailable { path } => assert_eq!(path, "Templates/Missing.md"),
        other => panic!("expected TemplateUnavailable, got {other:?}"),
    }
    assert_eq!(service.vault().note("Journal/2024-03-10.md"), Some("untouched"));
}

#[test]
fn narrowed_dialect_keeps_optional_keywords_verbatim() {
    let mut service =
        journal_service("{{title}} / {{date}}").with_dialect(TokenDialect::core());
    service.vault_mut().insert_note("Journal/2024-03-10.md", "");

    service
        .handle_created(&fresh("Journal/2024-03-10.md"), clock())
        .unwrap();
    assert_eq!(
        service.vault().note("Journal/2024-03-10.md"),
        Some("{{title}} / 2024-03-10")
    );
}

#[test]
fn settings_updates_apply_to_later_events() {
    let mut service = journal_service("{{date}}");
    service.vault_mut().insert_note("Inbox/2024-03-10.md", "");

    assert_eq!(
        service
            .handle_created(&fresh("Inbox/2024-03-10.md"), clock())
            .unwrap(),
        FillOutcome::Skipped(SkipReason::OutsideFolder)
    );

    let mut settings = service.settings().clone();
    settings.folder_path = "Inbox".to_string();
    service.update_settings(settings);

    assert_eq!(
        service
            .handle_created(&fresh("Inbox/2024-03-10.md"), clock())
            .unwrap(),
        FillOutcome::Filled
    );
}

#[test]
fn fills_on_a_filesystem_vault() {
    let dir = tempfile::tempdir().unwrap();
    let mut vault = FsVault::new(dir.path());
    vault
        .write("Templates/Daily.md", "# {{title}}\n{{date+1d}}\n")
        .unwrap();
    vault.write("Journal/2024-03-10.md", "").unwrap();

    let settings = DailyNoteSettings {
        folder_path: "Journal".to_string(),
        template_file_path: "Templates/Daily".to_string(),
        filename_date_format: String::new(),
    };
    let mut service = DailyFillService::new(vault, settings);

    let outcome = service
        .handle_created(&fresh("Journal/2024-03-10.md"), clock())
        .unwrap();
    assert_eq!(outcome, FillOutcome::Filled);
    assert_eq!(
        service.vault().read("Journal/2024-03-10.md").unwrap(),
        "# 2024-03-10\n2024-03-11\n"
    );
}
