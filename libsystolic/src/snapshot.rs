use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, grid::Grid, verify::Outcome};

/// The observed generations of one scenario, as handed to a playback front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSave {
    pub scenario: String,
    pub rows: usize,
    pub columns: usize,
    pub converged_at: Option<usize>,

    #[serde(with = "text_grids")]
    pub generations: Vec<Grid>,
}

impl SnapshotSave {
    /// Initial grid first, then every unloaded generation.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        let generations = std::iter::once(&outcome.initial)
            .chain(outcome.history.iter())
            .cloned()
            .collect();

        Self {
            scenario: outcome.name.clone(),
            rows: outcome.initial.rows,
            columns: outcome.initial.columns,
            converged_at: outcome.converged_at,
            generations,
        }
    }

    pub fn save<P>(&self, path: P) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
    {
        let save_serialized =
            serde_json::to_string_pretty(&self).context("Couldn't serialize snapshot save")?;

        let path = path.as_ref();
        let parent_path = path.parent().context("No parent path")?;

        fs::create_dir_all(parent_path).context("Couldn't create snapshot directory")?;
        fs::write(path, save_serialized).context("Couldn't write snapshot save")?;

        Ok(())
    }

    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let save_serialized = fs::read(path).context("Couldn't read snapshot save")?;
        let save: Self = serde_json::from_slice(&save_serialized)
            .context("Couldn't deserialize snapshot save")?;

        save.check_dimensions()
            .context("Snapshot save doesn't match its declared size")?;
        Ok(save)
    }

    /// Every generation must have the declared `rows` x `columns`.
    pub fn check_dimensions(&self) -> Result<(), ConfigError> {
        let expected = (self.rows, self.columns);

        match self.generations.iter().find(|grid| grid.dimensions() != expected) {
            Some(grid) => Err(ConfigError::DimensionMismatch {
                expected,
                actual: grid.dimensions(),
            }),
            None => Ok(()),
        }
    }
}

/// Grids as lists of `"0110"` row strings, which keeps saves readable.
mod text_grids {
    use itertools::Itertools;
    use serde::{Deserialize, Deserializer, Serializer, ser::SerializeSeq};

    use crate::grid::Grid;

    pub fn serialize<S>(grids: &[Grid], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(grids.len()))?;

        for grid in grids {
            let rows = grid
                .iter_rows()
                .map(|row| {
                    row.iter()
                        .map(|cell| if cell.is_alive() { '1' } else { '0' })
                        .collect::<String>()
                })
                .collect_vec();

            seq.serialize_element(&rows)?;
        }

        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Grid>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let grids_rows = Vec::<Vec<String>>::deserialize(deserializer)?;

        grids_rows
            .into_iter()
            .map(|rows| rows.join("\n").parse::<Grid>().map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pattern::Pattern,
        verify::{Scenario, Verifier, VerifyConfig},
    };

    fn blinker_save() -> SnapshotSave {
        let scenario = Scenario::new("blinker", Pattern::Blinker.centered(5, 5).unwrap());
        let outcome = Verifier::new(VerifyConfig {
            generations: 2,
            ..VerifyConfig::default()
        })
        .run(&scenario)
        .unwrap();

        SnapshotSave::from_outcome(&outcome)
    }

    #[test]
    fn includes_initial_generation() {
        let save = blinker_save();

        assert_eq!(save.generations.len(), 3);
        assert_eq!(save.generations[0], save.generations[2]);
        assert_eq!((save.rows, save.columns), (5, 5));
    }

    #[test]
    fn json_uses_row_strings() {
        let save = blinker_save();
        let json = serde_json::to_value(&save).unwrap();

        assert_eq!(json["generations"][0][2], "01110");
        assert_eq!(json["generations"][1][1], "00100");

        let restored: SnapshotSave = serde_json::from_value(json).unwrap();
        assert_eq!(restored, save);
    }

    #[test]
    fn save_and_load_through_disk() {
        let save = blinker_save();
        let path = std::env::temp_dir()
            .join(format!("libsystolic-snapshot-{}", std::process::id()))
            .join("blinker.json");

        save.save(&path).unwrap();
        let loaded = SnapshotSave::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, save);
    }

    #[test]
    fn load_rejects_mismatched_generations() {
        let path = std::env::temp_dir()
            .join(format!("libsystolic-snapshot-bad-{}", std::process::id()))
            .join("bad.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"scenario":"bad","rows":5,"columns":5,"converged_at":null,"generations":[["01","10"]]}"#,
        )
        .unwrap();

        let err = SnapshotSave::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::DimensionMismatch {
                expected: (5, 5),
                actual: (2, 2)
            })
        );
    }

    #[test]
    fn save_reports_directory_errors() {
        let blocker = std::env::temp_dir()
            .join(format!("libsystolic-snapshot-file-{}", std::process::id()));
        fs::write(&blocker, "").unwrap();

        let err = blinker_save()
            .save(blocker.join("nested").join("blinker.json"))
            .unwrap_err();
        let _ = fs::remove_file(&blocker);

        assert_eq!(err.to_string(), "Couldn't create snapshot directory");
    }
}
