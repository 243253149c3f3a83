#[cfg(test)]
mod tests {
    use chronix::libs::config::{Config, DataConfig, ExportConfig, OUTPUT_DIR_ENV, SNAPSHOT_ENV};
    use chronix::libs::workbook::WorkbookOptions;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the per-user data directory at a temp dir.
    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { temp_dir }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.export.is_none());
        assert!(config.data.is_none());

        let export = ExportConfig::default();
        assert_eq!(export.output_dir, PathBuf::from("."));
        assert_eq!(export.workbook_options(), WorkbookOptions::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_read_and_delete(ctx: &mut ConfigTestContext) {
        // A missing file reads as the default configuration.
        let config = Config::read().unwrap();
        assert!(config.export.is_none());

        let config = Config {
            export: Some(ExportConfig {
                output_dir: ctx.temp_dir.path().join("reports"),
                one_page_landscape: false,
                with_colors: true,
            }),
            data: Some(DataConfig {
                snapshot_path: ctx.temp_dir.path().join("snapshot.json"),
            }),
        };
        config.save().unwrap();

        let read = Config::read().unwrap();
        assert_eq!(read.export, config.export);
        assert_eq!(read.data, config.data);
        assert_eq!(
            read.export.unwrap().workbook_options(),
            WorkbookOptions {
                apply_print_layout: false,
                apply_colors: true,
            }
        );

        Config::delete().unwrap();
        assert!(Config::read().unwrap().data.is_none());
        // Deleting twice is fine.
        Config::delete().unwrap();
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config {
            export: Some(ExportConfig {
                output_dir: PathBuf::from("stored"),
                ..Default::default()
            }),
            data: Some(DataConfig {
                snapshot_path: PathBuf::from("stored.json"),
            }),
        };

        std::env::set_var(OUTPUT_DIR_ENV, "from-env");
        std::env::set_var(SNAPSHOT_ENV, "from-env.json");
        assert_eq!(config.export_settings().output_dir, PathBuf::from("from-env"));
        assert_eq!(config.snapshot_path(), Some(PathBuf::from("from-env.json")));

        std::env::set_var(OUTPUT_DIR_ENV, "  ");
        std::env::remove_var(SNAPSHOT_ENV);
        assert_eq!(config.export_settings().output_dir, PathBuf::from("stored"));
        assert_eq!(config.snapshot_path(), Some(PathBuf::from("stored.json")));
        std::env::remove_var(OUTPUT_DIR_ENV);
    }
}
