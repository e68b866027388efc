#[cfg(test)]
mod batch_tests {
    use std::fs;

    use smartzip_core::catalog::QueryFilter;
    use smartzip_core::compression::Algorithm;
    use smartzip_core::config::EngineConfig;
    use smartzip_core::engine::{ParallelismProfile, SmartZip};
    use smartzip_core::telemetry::ItemStatus;

    #[test]
    fn batch_keeps_input_order_and_counts_missing_files() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::under(dir.path()).with_parallelism(ParallelismProfile::new(3, 2));
        let engine = SmartZip::open(config).unwrap();

        let inputs = dir.path().join("inputs");
        fs::create_dir_all(&inputs).unwrap();
        let mut paths = Vec::new();
        for i in 0..12 {
            let path = inputs.join(format!("file{i:02}.txt"));
            if i % 4 != 3 {
                fs::write(&path, format!("line {i}\n").repeat(50 + i * 10)).unwrap();
            }
            paths.push(path);
        }

        let report = engine.store_batch(&paths);
        assert!(report.sanity_check());
        assert_eq!(report.items.len(), 12);
        assert_eq!(report.succeeded(), 9);
        assert_eq!(report.skipped(), 3);
        assert_eq!(report.failed(), 0);
        assert!(report.compression_ratio < 1.0);

        for (item, path) in report.items.iter().zip(&paths) {
            assert_eq!(item.item, path.display().to_string());
            let expected = if path.exists() { ItemStatus::Stored } else { ItemStatus::Skipped };
            assert_eq!(item.status, expected);
        }

        let rows = engine.query(&QueryFilter::new()).unwrap();
        assert_eq!(rows.len(), 9);
        assert_eq!(engine.catalog().decision_count().unwrap(), 9);
        let per_alg: u64 = Algorithm::ALL.iter().map(|a| report.counters.count_for(*a)).sum();
        assert_eq!(per_alg, 9);

        for item in report.items.iter().filter(|i| i.status == ItemStatus::Stored) {
            let id = item.entry_id.unwrap().to_string();
            let (_, bytes) = engine.fetch(&id).unwrap();
            let name = std::path::Path::new(&item.item);
            assert_eq!(bytes, fs::read(name).unwrap());
        }
    }

    #[test]
    fn empty_batch_is_a_clean_report() {
        let dir = tempfile::tempdir().unwrap();
        let engine = SmartZip::open_under(dir.path()).unwrap();
        let report = engine.store_batch::<&str>(&[]);
        assert!(report.items.is_empty());
        assert_eq!(report.compression_ratio, 1.0);
        assert!(report.sanity_check());
    }
}
