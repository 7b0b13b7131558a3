//! JSON file character store.
//!
//! One `<character-id>.json` per character in a single directory. Writes go
//! through a temp file, a rename and a directory sync so a failed save never
//! truncates the previous record.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use levelup_domain::{Character, CharacterId};
use uuid::Uuid;

use crate::infrastructure::ports::{CharacterRepo, RepoError};

pub struct JsonCharacterRepo {
    dir: PathBuf,
}

impl JsonCharacterRepo {
    /// Store rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: CharacterId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn read(path: &Path) -> Result<Character, RepoError> {
        let content = fs::read_to_string(path).map_err(|e| RepoError::io("read character", e))?;
        serde_json::from_str(&content).map_err(RepoError::serialization)
    }
}

/// Flush a directory entry so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl CharacterRepo for JsonCharacterRepo {
    fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read(&path).map(Some)
    }

    fn save(&self, character: &Character) -> Result<(), RepoError> {
        fs::create_dir_all(&self.dir).map_err(|e| RepoError::io("create store", e))?;

        let json = serde_json::to_vec_pretty(character).map_err(RepoError::serialization)?;
        let path = self.path_for(character.id());
        let tmp_path = self
            .dir
            .join(format!(".{}.tmp-{}", character.id(), Uuid::new_v4()));

        let written = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)
            .and_then(|mut file| {
                file.write_all(&json)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, &path))
            .and_then(|()| sync_dir(&self.dir));

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(RepoError::io("save character", e));
        }

        tracing::debug!(character_id = %character.id(), path = %path.display(), "Character saved");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Character>, RepoError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| RepoError::io("list characters", e))?;
        let mut characters = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| RepoError::io("list characters", e))?
                .path();
            let is_record = path.extension().is_some_and(|ext| ext == "json")
                && path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| stem.parse::<CharacterId>().is_ok());
            if !is_record {
                continue;
            }
            match Self::read(&path) {
                Ok(character) => characters.push(character),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable character file");
                }
            }
        }

        characters.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use levelup_domain::{AbilityScores, CharacterName};

    fn character(name: &str) -> Character {
        Character::new(
            CharacterName::new(name).unwrap(),
            "Fighter",
            AbilityScores::uniform(12),
            11,
            Utc::now(),
        )
    }

    #[test]
    fn save_then_get_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepo::new(dir.path().join("pcs"));
        let pc = character("Tordek");

        repo.save(&pc).unwrap();

        assert_eq!(repo.get(pc.id()).unwrap(), Some(pc));
    }

    #[test]
    fn get_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepo::new(dir.path());
        assert_eq!(repo.get(CharacterId::new()).unwrap(), None);
    }

    #[test]
    fn save_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepo::new(dir.path());
        let mut pc = character("Mialee");
        repo.save(&pc).unwrap();
        pc.gain_hit_points(5);
        repo.save(&pc).unwrap();

        assert_eq!(repo.get(pc.id()).unwrap().unwrap().hit_points().max, 16);
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn store_directory_can_be_synced() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepo::new(dir.path().join("fresh"));
        repo.save(&character("Eberk")).unwrap();
        sync_dir(repo.dir()).unwrap();
    }

    #[test]
    fn list_sorts_by_name_and_skips_junk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepo::new(dir.path());
        repo.save(&character("Lidda")).unwrap();
        repo.save(&character("Jozan")).unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();
        fs::write(dir.path().join(format!("{}.json", CharacterId::new())), "broken").unwrap();

        let names: Vec<_> = repo
            .list()
            .unwrap()
            .iter()
            .map(|c| c.name().as_str().to_string())
            .collect();
        assert_eq!(names, vec!["Jozan", "Lidda"]);
    }

    #[test]
    fn corrupt_record_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepo::new(dir.path());
        let id = CharacterId::new();
        fs::write(dir.path().join(format!("{id}.json")), "nope").unwrap();
        assert!(matches!(repo.get(id), Err(RepoError::Serialization(_))));
    }
}
