//! Integration tests for the game catalog
//!
//! Every store contract test runs against both backends.

use gamevault_library::{
    CatalogError, Field, GameDetails, GamePatch, GameRecord, GameStore, MIN_RELEASE_YEAR,
    MemoryStore, RejectReason, SqliteStore, ValidationError, apply_patch, import_file,
    import_lines,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with a scratch directory for database and import files
struct CatalogTestEnv {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CatalogTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("games.db");
        Self { temp_dir, db_path }
    }

    fn write_import_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write import file");
        path
    }

    /// One fresh store per backend
    fn stores(&self) -> Vec<(&'static str, Box<dyn GameStore>)> {
        let memory: Box<dyn GameStore> = Box::new(MemoryStore::new());
        let sqlite: Box<dyn GameStore> =
            Box::new(SqliteStore::open(&self.db_path).expect("Failed to open database"));
        vec![("memory", memory), ("sqlite", sqlite)]
    }
}

fn game(id: i64, title: &str, rating: f64) -> GameRecord {
    GameRecord::new(id, GameDetails::new(title, "Shooter", 2001, 59.99, rating)).unwrap()
}

#[test]
fn test_create_then_get_returns_equal_record() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        let halo = game(1, "Halo", 9.5);
        store.create(halo.clone()).unwrap();
        assert_eq!(store.get(1).unwrap(), halo, "backend {}", backend);
    }
}

#[test]
fn test_duplicate_create_leaves_store_unchanged() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        store.create(game(1, "Halo", 9.5)).unwrap();

        let err = store.create(game(1, "Impostor", 1.0)).unwrap_err();
        assert!(
            matches!(err, CatalogError::DuplicateId(1)),
            "backend {}",
            backend
        );
        assert_eq!(store.get(1).unwrap().title(), "Halo");
        assert_eq!(store.count().unwrap(), 1);
    }
}

#[test]
fn test_get_missing_game() {
    let env = CatalogTestEnv::new();
    for (backend, store) in env.stores() {
        assert!(
            matches!(store.get(42), Err(CatalogError::NotFound(42))),
            "backend {}",
            backend
        );
        assert!(!store.contains(42).unwrap());
    }
}

#[test]
fn test_delete() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        assert!(
            matches!(store.delete(5), Err(CatalogError::NotFound(5))),
            "backend {}",
            backend
        );

        store.create(game(5, "Halo", 9.5)).unwrap();
        store.delete(5).unwrap();

        assert!(matches!(store.get(5), Err(CatalogError::NotFound(5))));
        assert!(matches!(store.delete(5), Err(CatalogError::NotFound(5))));
    }
}

#[test]
fn test_update_replaces_mutable_fields() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        store.create(game(1, "Halo", 9.5)).unwrap();

        let details = GameDetails::new("Halo 2", "FPS", 2004, 49.99, 9.0);
        let updated = store.update(1, details.clone()).unwrap();

        assert_eq!(updated.id(), 1, "backend {}", backend);
        assert_eq!(updated.details(), &details);
        assert_eq!(store.get(1).unwrap(), updated);

        assert!(matches!(
            store.update(2, details),
            Err(CatalogError::NotFound(2))
        ));
    }
}

#[test]
fn test_update_missing_game_reports_not_found_before_validation() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        let invalid = GameDetails::new("", "Shooter", 1900, -1.0, 42.0);
        assert!(
            matches!(store.update(7, invalid.clone()), Err(CatalogError::NotFound(7))),
            "backend {}",
            backend
        );

        store.create(game(7, "Halo", 9.5)).unwrap();
        assert!(
            matches!(store.update(7, invalid), Err(CatalogError::Validation(_))),
            "backend {}",
            backend
        );
        assert_eq!(store.get(7).unwrap().title(), "Halo");
    }
}

#[test]
fn test_list_all_ordered_by_id() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        assert!(store.list_all().unwrap().is_empty());

        store.create(game(3, "C", 5.0)).unwrap();
        store.create(game(1, "A", 5.0)).unwrap();
        store.create(game(2, "B", 5.0)).unwrap();

        let titles: Vec<String> = store
            .list_all()
            .unwrap()
            .iter()
            .map(|g| g.title().to_string())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"], "backend {}", backend);
    }
}

#[test]
fn test_average_rating() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        assert!(
            matches!(store.average_rating(), Err(CatalogError::EmptyStore)),
            "backend {}",
            backend
        );

        store.create(game(1, "Halo", 9.5)).unwrap();
        store.create(game(2, "Zelda", 10.0)).unwrap();

        let average = store.average_rating().unwrap();
        assert!((average - 9.75).abs() < 1e-9, "backend {}", backend);
    }
}

#[test]
fn test_next_id() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        assert_eq!(store.next_id().unwrap(), 1, "backend {}", backend);
        store.create(game(10, "Halo", 9.5)).unwrap();
        assert_eq!(store.next_id().unwrap(), 11, "backend {}", backend);
    }
}

#[test]
fn test_import_two_valid_lines() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        let report = import_lines(
            store.as_mut(),
            [
                "1,Halo Infinite,Shooter,2021,59.99,8.9",
                "2,Forza Horizon 5,Racing,2021,49.99,9.1",
            ],
        )
        .unwrap();

        assert_eq!(report.inserted, 2, "backend {}", backend);
        assert!(report.is_clean());
        assert!(store.contains(1).unwrap());
        assert!(store.contains(2).unwrap());
    }
}

#[test]
fn test_import_never_overwrites() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        let original = game(1, "Halo", 9.5);
        store.create(original.clone()).unwrap();

        let report =
            import_lines(store.as_mut(), ["1,Halo Infinite,Shooter,2021,59.99,8.9"]).unwrap();

        assert_eq!(report.inserted, 0, "backend {}", backend);
        assert_eq!(report.rejected[0].reason, RejectReason::Duplicate(1));
        assert_eq!(store.get(1).unwrap(), original);
    }
}

#[test]
fn test_import_file_skips_bad_lines() {
    let env = CatalogTestEnv::new();
    let path = env.write_import_file(
        "games.txt",
        "1,Halo Infinite,Shooter,2021,59.99,8.9\n\
         3,OnlyThreeFields,Bad\n\
         \n\
         4,Doom,Shooter,nineteen,4.99,9.0\n\
         5,Pong,Arcade,1949,1.00,5.0\n\
         2,Forza Horizon 5,Racing,2021,49.99,9.1\n",
    );

    for (backend, mut store) in env.stores() {
        let report = import_file(store.as_mut(), &path).unwrap();

        assert_eq!(report.inserted, 2, "backend {}", backend);
        let tags: Vec<(usize, &str)> = report
            .rejected
            .iter()
            .map(|r| (r.line_number, r.reason.tag()))
            .collect();
        assert_eq!(tags, vec![(2, "format"), (4, "type"), (5, "range")]);
        assert_eq!(store.count().unwrap(), 2);
    }
}

#[test]
fn test_import_missing_file() {
    let env = CatalogTestEnv::new();
    let mut store = MemoryStore::new();
    let err = import_file(&mut store, &env.temp_dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn test_patch_title_only() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        store.create(game(1, "Halo", 9.5)).unwrap();

        let outcome = apply_patch(store.as_mut(), 1, &GamePatch::new().title("Halo CE")).unwrap();

        let stored = store.get(1).unwrap();
        assert_eq!(stored.title(), "Halo CE", "backend {}", backend);
        assert_eq!(stored.genre(), "Shooter");
        assert_eq!(stored.release_year(), 2001);
        assert_eq!(stored.price(), 59.99);
        assert_eq!(stored.rating(), 9.5);
        assert_eq!(outcome.applied, vec![Field::Title]);
        assert!(outcome.skipped.is_empty());
    }
}

#[test]
fn test_patch_out_of_range_rating_keeps_other_fields() {
    let env = CatalogTestEnv::new();
    for (backend, mut store) in env.stores() {
        store.create(game(1, "Halo", 9.5)).unwrap();

        let patch = GamePatch::new().price(19.99).rating(15.0);
        let outcome = apply_patch(store.as_mut(), 1, &patch).unwrap();

        let stored = store.get(1).unwrap();
        assert_eq!(stored.rating(), 9.5, "backend {}", backend);
        assert_eq!(stored.price(), 19.99);
        assert_eq!(outcome.applied, vec![Field::Price]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].field, Field::Rating);
    }
}

/// Creation, import and partial update share one release-year bound; 1960
/// is accepted everywhere.
#[test]
fn test_release_year_bound_is_uniform() {
    assert_eq!(MIN_RELEASE_YEAR, 1950);

    let mut store = MemoryStore::new();
    store.create(game(1, "Halo", 9.5)).unwrap();

    let outcome = apply_patch(&mut store, 1, &GamePatch::new().release_year(1960)).unwrap();
    assert_eq!(outcome.record.release_year(), 1960);

    let outcome = apply_patch(&mut store, 1, &GamePatch::new().release_year(1949)).unwrap();
    assert_eq!(outcome.record.release_year(), 1960);
    assert!(matches!(
        outcome.skipped[0].reason,
        ValidationError::OutOfRange {
            field: Field::ReleaseYear,
            ..
        }
    ));

    let report = import_lines(&mut store, ["2,Tennis for Two,Sports,1958,0,6.5"]).unwrap();
    assert_eq!(report.inserted, 1);
}

#[test]
fn test_sqlite_catalog_persists_imports() {
    let env = CatalogTestEnv::new();
    {
        let mut store = SqliteStore::open(&env.db_path).unwrap();
        import_lines(&mut store, ["1,Halo Infinite,Shooter,2021,59.99,8.9"]).unwrap();
    }

    let store = SqliteStore::open(&env.db_path).unwrap();
    assert_eq!(store.get(1).unwrap().title(), "Halo Infinite");
}
