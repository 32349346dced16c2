// Data loading: roster first, then every stat table concurrently.
//
// The roster is required (the name index every table is keyed through comes
// from it). Tables are optional and independent: each ends up loaded,
// absent or failed, and a failure only empties that one table.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use riftdraft_core::champion::{load_roster, NameIndex};
use riftdraft_core::config::{Config, DataPaths};
use riftdraft_core::insight::DataSnapshot;
use riftdraft_core::tables::{
    self, BanTable, ComboTable, MatchupTable, SoloTable, StatTables, SynergyTable, TableError,
    TableStatus, TableStatuses,
};
use tracing::{info, warn};

async fn load_table<T, F>(
    label: &'static str,
    path: Option<PathBuf>,
    names: Arc<NameIndex>,
    load: F,
    entries: fn(&T) -> usize,
) -> (T, TableStatus)
where
    T: Default + Send + 'static,
    F: FnOnce(&Path, &NameIndex) -> Result<T, TableError> + Send + 'static,
{
    let Some(path) = path else {
        info!("{} table not configured", label);
        return (T::default(), TableStatus::Absent);
    };

    let shown = path.display().to_string();
    match tokio::task::spawn_blocking(move || load(&path, &names)).await {
        Ok(Ok(table)) => {
            let count = entries(&table);
            info!("Loaded {} table from {} ({} entries)", label, shown, count);
            (table, TableStatus::Loaded { entries: count })
        }
        Ok(Err(e)) => {
            warn!("{} table unavailable: {}", label, e);
            (
                T::default(),
                TableStatus::Failed {
                    reason: e.to_string(),
                },
            )
        }
        Err(e) => {
            warn!("{} table loader task failed: {}", label, e);
            (
                T::default(),
                TableStatus::Failed {
                    reason: format!("loader task failed: {e}"),
                },
            )
        }
    }
}

/// Load the roster and all configured tables relative to `base_dir`.
pub async fn load_snapshot(config: &Config, base_dir: &Path) -> anyhow::Result<DataSnapshot> {
    let paths = &config.data_paths;
    let resolve = |p: &Option<String>| p.as_deref().map(|p| DataPaths::resolve(base_dir, p));

    let roster_path = DataPaths::resolve(base_dir, &paths.roster);
    let roster = {
        let path = roster_path.clone();
        tokio::task::spawn_blocking(move || load_roster(&path))
            .await
            .context("roster loader task failed")?
            .with_context(|| format!("failed to load roster from {}", roster_path.display()))?
    };
    info!("Loaded roster: {} champions", roster.len());

    let names = Arc::new(roster.name_index());

    let (solo, synergy, matchup, combos, bans) = tokio::join!(
        load_table("solo", resolve(&paths.solo), names.clone(), tables::load_solo, SoloTable::len),
        load_table(
            "synergy",
            resolve(&paths.synergy),
            names.clone(),
            tables::load_synergy,
            SynergyTable::len,
        ),
        load_table(
            "matchup",
            resolve(&paths.matchup),
            names.clone(),
            tables::load_matchup,
            MatchupTable::len,
        ),
        load_table("combo", resolve(&paths.combo), names.clone(), tables::load_combos, ComboTable::len),
        load_table("bans", resolve(&paths.bans), names.clone(), tables::load_bans, BanTable::len),
    );

    let tables = StatTables {
        solo: solo.0,
        synergy: synergy.0,
        matchup: matchup.0,
        combos: combos.0,
        bans: bans.0,
        status: TableStatuses {
            solo: solo.1,
            synergy: synergy.1,
            matchup: matchup.1,
            combo: combos.1,
            bans: bans.1,
        },
    };

    let names = Arc::try_unwrap(names).unwrap_or_else(|shared| (*shared).clone());
    Ok(DataSnapshot {
        roster,
        names,
        tables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftdraft_core::config::{MatchupDisplayConfig, RecommendationConfig};
    use std::fs;

    fn config(solo: Option<&str>, synergy: Option<&str>) -> Config {
        Config {
            data_paths: DataPaths {
                roster: "roster.csv".into(),
                solo: solo.map(String::from),
                synergy: synergy.map(String::from),
                matchup: None,
                combo: None,
                bans: None,
            },
            recommendations: RecommendationConfig::default(),
            matchups: MatchupDisplayConfig::default(),
        }
    }

    fn base_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("riftdraft_loader_{test}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("roster.csv"),
            "Champion,Gameplay1,Gameplay2,Power Spike,Synergy Focus\nGaren,Tank,,,\nLee Sin,Diver,,,\n",
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn loads_configured_tables_and_reports_missing_ones() {
        let dir = base_dir("partial");
        fs::write(
            dir.join("solo.json"),
            r#"{"Garen": {"TOP": {"win_rate": 51.0, "games": 100}}}"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&config(Some("solo.json"), Some("missing.json")), &dir)
            .await
            .unwrap();

        assert_eq!(snapshot.roster.len(), 2);
        assert_eq!(snapshot.tables.status.solo, TableStatus::Loaded { entries: 1 });
        assert!(matches!(
            snapshot.tables.status.synergy,
            TableStatus::Failed { .. }
        ));
        assert_eq!(snapshot.tables.status.matchup, TableStatus::Absent);
        assert!(snapshot.tables.synergy.is_empty());
        assert_eq!(snapshot.names.resolve("leesin"), "Lee Sin");

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn malformed_table_does_not_block_the_others() {
        let dir = base_dir("malformed");
        fs::write(dir.join("solo.json"), "[1, 2, 3]").unwrap();
        fs::write(
            dir.join("synergy.json"),
            r#"{"Garen": {"TOP": {"JUNGLE": {"Lee Sin": {"delta": 2.0, "games": 40}}}}}"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&config(Some("solo.json"), Some("synergy.json")), &dir)
            .await
            .unwrap();
        assert!(!snapshot.tables.status.solo.is_loaded());
        assert_eq!(snapshot.tables.status.synergy, TableStatus::Loaded { entries: 1 });

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_roster_is_fatal() {
        let dir = std::env::temp_dir().join("riftdraft_loader_no_roster");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let err = load_snapshot(&config(None, None), &dir).await.unwrap_err();
        assert!(err.to_string().contains("failed to load roster"));
        let _ = fs::remove_dir_all(&dir);
    }
}
