#[cfg(test)]
mod tests {
    use chronix::libs::calendar::YearMonth;
    use chronix::libs::error::ExportError;
    use chronix::libs::export::{part_prefix, write_atomic, Exporter};
    use chronix::libs::reports::TimesheetRequest;
    use chronix::libs::snapshot::Snapshot;
    use chronix::libs::workbook::WorkbookOptions;
    use chrono::Local;
    use std::path::Path;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    const SNAPSHOT: &str = r#"{
        "projects": [
            { "id": "p1", "name": "Gare du Nord", "bill_rate": 45 },
            { "id": "p2", "name": "Pont Neuf" }
        ],
        "workers": [
            { "id": "w1", "full_name": "Alice Martin", "email": "alice@example.com", "pay_rate": 20 },
            { "id": "w2", "full_name": "Bruno Petit", "pay_rate": "18,5" }
        ],
        "assignments": [{ "project_id": "p1", "worker_id": "w1" }, { "project_id": "p2", "worker_id": "w2" }],
        "entries": [
            { "worker_id": "w1", "project_id": "p1", "work_date": "2024-07-01", "hours": 7.5, "status": "worked" },
            { "worker_id": "w1", "project_id": "p1", "work_date": "2024-07-02", "hours": 8, "status": "worked",
              "note": "Scaffolding" },
            { "worker_id": "w2", "project_id": "p2", "work_date": "2024-07-01", "hours": "6,25", "status": "worked" }
        ]
    }"#;

    struct ExportTestContext {
        temp_dir: TempDir,
        snapshot: Snapshot,
        period: YearMonth,
    }

    impl AsyncTestContext for ExportTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            let snapshot = serde_json::from_str::<Snapshot>(SNAPSHOT).unwrap().hydrate();
            ExportTestContext {
                temp_dir,
                snapshot,
                period: YearMonth::new(2024, 7).unwrap(),
            }
        }
    }

    /// Temporary files left next to `path`.
    fn leftover_parts(path: &Path) -> usize {
        let prefix = part_prefix(path);
        std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(&prefix))
            .count()
    }

    fn assert_xlsx(path: &Path) {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"PK"), "{} is not a zip container", path.display());
        assert_eq!(leftover_parts(path), 0);
    }

    #[test_context(ExportTestContext)]
    #[tokio::test]
    async fn test_export_payroll(ctx: &mut ExportTestContext) {
        let exporter = Exporter::new(ctx.temp_dir.path().join("out"), WorkbookOptions::default());
        let entries = ctx.snapshot.entries_for(ctx.period, None);

        let path = exporter.export_payroll(&entries, ctx.period).await.unwrap();

        assert_eq!(path, ctx.temp_dir.path().join("out").join("payroll_2024-07.xlsx"));
        assert_xlsx(&path);
    }

    #[test_context(ExportTestContext)]
    #[tokio::test]
    async fn test_export_payroll_without_entries(ctx: &mut ExportTestContext) {
        let exporter = Exporter::new(ctx.temp_dir.path(), WorkbookOptions::default());
        let path = exporter.export_payroll(&[], YearMonth::new(2023, 1).unwrap()).await.unwrap();
        assert!(path.ends_with("payroll_2023-01.xlsx"));
        assert_xlsx(&path);
    }

    #[test_context(ExportTestContext)]
    #[tokio::test]
    async fn test_export_details_for_all_projects(ctx: &mut ExportTestContext) {
        let exporter = Exporter::new(ctx.temp_dir.path(), WorkbookOptions::default());
        let all_entries = ctx.snapshot.entries_for(ctx.period, None);
        let request = TimesheetRequest {
            month: ctx.period,
            project_id: None,
            projects: &ctx.snapshot.projects,
            workers: &ctx.snapshot.workers,
            entries: &all_entries,
            all_entries: &all_entries,
        };

        let path = exporter.export_details(&request).await.unwrap();

        let expected = format!("Timesheets_{}.xlsx", Local::now().date_naive().format("%Y-%m-%d"));
        assert_eq!(path.file_name().unwrap().to_string_lossy(), expected);
        assert_xlsx(&path);
    }

    #[test_context(ExportTestContext)]
    #[tokio::test]
    async fn test_export_global_month(ctx: &mut ExportTestContext) {
        let exporter = Exporter::new(
            ctx.temp_dir.path(),
            WorkbookOptions {
                apply_print_layout: true,
                apply_colors: false,
            },
        );
        let entries = ctx.snapshot.entries_for(ctx.period, None);

        let path = exporter
            .export_global_month(ctx.period, &ctx.snapshot.workers, &entries)
            .await
            .unwrap();

        assert!(path.ends_with("Global_2024-07.xlsx"));
        assert_xlsx(&path);
    }

    #[test_context(ExportTestContext)]
    #[tokio::test]
    async fn test_concurrent_exports_do_not_interfere(ctx: &mut ExportTestContext) {
        let exporter = Exporter::new(ctx.temp_dir.path(), WorkbookOptions::default());
        let entries = ctx.snapshot.entries_for(ctx.period, None);
        let august = ctx.period.shift(1);

        let (july, aug, global) = tokio::join!(
            exporter.export_payroll(&entries, ctx.period),
            exporter.export_payroll(&[], august),
            exporter.export_global_month(ctx.period, &ctx.snapshot.workers, &entries),
        );

        for path in [july.unwrap(), aug.unwrap(), global.unwrap()] {
            assert_xlsx(&path);
        }
    }

    #[test_context(ExportTestContext)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_report_exported_twice_at_once(ctx: &mut ExportTestContext) {
        let exporter = Exporter::new(ctx.temp_dir.path(), WorkbookOptions::default());
        let entries = ctx.snapshot.entries_for(ctx.period, None);

        for _ in 0..50 {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let exporter = exporter.clone();
                    let entries = entries.clone();
                    let period = ctx.period;
                    tokio::spawn(async move { exporter.export_payroll(&entries, period).await })
                })
                .collect();

            for handle in handles {
                let path = handle.await.unwrap().unwrap();
                assert!(path.ends_with("payroll_2024-07.xlsx"));
            }
        }

        assert_xlsx(&ctx.temp_dir.path().join("payroll_2024-07.xlsx"));
    }

    #[test_context(ExportTestContext)]
    #[tokio::test]
    async fn test_unwritable_output_dir(ctx: &mut ExportTestContext) {
        let blocker = ctx.temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let exporter = Exporter::new(&blocker, WorkbookOptions::default());

        let result = exporter.export_payroll(&[], ctx.period).await;

        assert!(matches!(result, Err(ExportError::Write { .. })));
        assert_eq!(std::fs::read(&blocker).unwrap(), b"file");
    }

    #[test_context(ExportTestContext)]
    #[tokio::test]
    async fn test_write_atomic_leaves_no_partial_file(ctx: &mut ExportTestContext) {
        let target = ctx.temp_dir.path().join("missing").join("report.xlsx");

        let result = write_atomic(&target, b"PK".to_vec()).await;

        assert!(matches!(result, Err(ExportError::Write { .. })));
        assert!(!target.exists());

        let target = ctx.temp_dir.path().join("report.xlsx");
        write_atomic(&target, b"PK".to_vec()).await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"PK");
        assert_eq!(leftover_parts(&target), 0);
    }
}
