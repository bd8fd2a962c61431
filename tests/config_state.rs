#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use salonbook::libs::config::{Config, DisplayConfig};
    use salonbook::libs::data_storage::DataStorage;
    use salonbook::libs::paging::{PagingConfig, DEFAULT_PAGE_SIZE};
    use salonbook::libs::state::{SavedState, StateStore};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl ConfigTestContext {
        fn path(&self, name: &str) -> PathBuf {
            self.temp_dir.path().join(name)
        }
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_config_uses_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::load_from(ctx.path("config.json")).unwrap();

        assert_eq!(config.paging.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.display.utc_offset_minutes, 0);
        assert!(config.database.path.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_is_filled_in(ctx: &mut ConfigTestContext) {
        let path = ctx.path("config.json");
        fs::write(&path, r#"{ "display": { "utc_offset_minutes": 180 } }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.display.utc_offset_minutes, 180);
        assert_eq!(config.paging, PagingConfig::default());
        assert_eq!(config.render_options().offset, FixedOffset::east_opt(3 * 3600).unwrap());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_save_and_load(ctx: &mut ConfigTestContext) {
        let path = ctx.path("config.json");
        let mut config = Config {
            display: DisplayConfig { utc_offset_minutes: -300 },
            paging: PagingConfig { page_size: 50 },
            ..Default::default()
        };
        config.database.path = Some(ctx.path("custom.db"));

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_out_of_range_offset_falls_back_to_utc(_ctx: &mut ConfigTestContext) {
        let config = Config {
            display: DisplayConfig { utc_offset_minutes: 100_000 },
            ..Default::default()
        };
        assert_eq!(config.render_options().offset, FixedOffset::east_opt(0).unwrap());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_state_store(ctx: &mut ConfigTestContext) {
        let store = StateStore::at(ctx.path("state.json"));
        assert_eq!(store.load().unwrap(), SavedState::default());

        let state = SavedState {
            filter_year: 2025,
            filter_month: 2,
        };
        store.save(&state).unwrap();
        assert_eq!(StateStore::at(ctx.path("state.json")).load().unwrap(), state);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupt_state_is_an_error(ctx: &mut ConfigTestContext) {
        let path = ctx.path("state.json");
        fs::write(&path, "not json").unwrap();
        assert!(StateStore::at(&path).load().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_data_storage_creates_directory(ctx: &mut ConfigTestContext) {
        let base = ctx.path("nested").join("salonbook");
        let path = DataStorage::at(&base).get_path("config.json").unwrap();

        assert!(base.is_dir());
        assert_eq!(path, base.join("config.json"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_open_db_uses_configured_path(ctx: &mut ConfigTestContext) {
        let db_path = ctx.path("configured.db");
        let mut config = Config::default();
        config.database.path = Some(db_path.clone());

        assert_eq!(config.db_path().unwrap(), db_path);
        config.open_db().unwrap();
        assert!(db_path.exists());
    }
}
