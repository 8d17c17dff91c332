//! Sample data pools backing benchmark row generation.
//!
//! A [`SampleStore`] is loaded once from a YAML data file mapping keys to
//! candidate pools, then queried per column while rows are generated. A key
//! is either a type-group name (built-in sample tables) or an upper-cased
//! column name (user-supplied data files); the two strategies are never
//! mixed within one row.
//!
//! Every malformed configuration is a fatal error naming the offending file.
//! The tool exists to stage deterministic benchmark data, so silently
//! skipping or defaulting a value would defeat its purpose.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use table_def::{IntervalSpan, Literal, SampleGroup, SampleKind};
use thiserror::Error;

lazy_static! {
    /// `Y` or `Y-M`, for year-to-month interval spans.
    static ref YEAR_MONTH_PATTERN: Regex = Regex::new(r"^\d+(-\d{1,2})?$").unwrap();
    /// `D HH:MM:SS[.ffffff]`, for day-to-second interval spans.
    static ref DAY_SECOND_PATTERN: Regex =
        Regex::new(r"^\d+ \d{1,2}:\d{1,2}:\d{1,2}(\.\d{1,6})?$").unwrap();
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to read sample data file {}: {source}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sample data in {}: {source}", file.display())]
    Format {
        file: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported candidate value for key `{key}` in {}", file.display())]
    ValueShape { key: String, file: PathBuf },

    #[error("no sample data configured for key `{key}` in {}", file.display())]
    MissingKey { key: String, file: PathBuf },

    #[error("key `{key}` in {} holds {actual}, expected {expected}", file.display())]
    WrongShape {
        key: String,
        file: PathBuf,
        actual: &'static str,
        expected: &'static str,
    },

    #[error("large object file {} could not be read: {source}", file.display())]
    LobIo {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("large object file {} is not valid UTF-8 text without a BOM", file.display())]
    LobEncoding { file: PathBuf },

    #[error(
        "interval value `{value}` for key `{key}` in {} does not match the {pattern} pattern",
        file.display()
    )]
    IntervalPattern {
        value: String,
        key: String,
        file: PathBuf,
        pattern: &'static str,
    },
}

/// How the per-column pool key is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Key from the column's resolved type group; character types of one
    /// width class share a pool. Used by the built-in sample tables.
    TypeGroup,
    /// Key is the column's own upper-cased name. Used with custom per-table
    /// data files.
    ColumnName,
}

impl KeyStrategy {
    pub fn key(self, column_name: &str, group: SampleGroup) -> String {
        match self {
            KeyStrategy::TypeGroup => group.key().to_owned(),
            KeyStrategy::ColumnName => column_name.to_uppercase(),
        }
    }
}

/// Raw on-disk shape of one pool entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPool {
    Range {
        #[serde(rename = "MIN")]
        min: u32,
        #[serde(rename = "MAX")]
        max: u32,
    },
    Values(Vec<serde_yaml::Value>),
}

#[derive(Debug, Clone)]
enum Pool {
    /// Flat candidate list; `None` entries are explicit nulls.
    Values(Vec<Option<Literal>>),
    /// Byte length range for generated binary payloads.
    ByteRange { min: u32, max: u32 },
}

/// A loaded sample data file plus the directory LOB references resolve
/// against.
#[derive(Debug, Clone)]
pub struct SampleStore {
    pools: HashMap<String, Pool>,
    lob_dir: PathBuf,
    file: PathBuf,
}

fn convert_candidate(
    value: serde_yaml::Value,
    key: &str,
    file: &Path,
) -> Result<Option<Literal>, SampleError> {
    match value {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::Bool(b) => Ok(Some(Literal::Integer(b as i64))),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(Literal::Integer(i)))
            } else if let Some(d) = n.as_f64() {
                Ok(Some(Literal::Double(d)))
            } else {
                Err(SampleError::ValueShape {
                    key: key.to_owned(),
                    file: file.to_owned(),
                })
            }
        }
        serde_yaml::Value::String(s) => Ok(Some(Literal::String(s))),
        _ => Err(SampleError::ValueShape {
            key: key.to_owned(),
            file: file.to_owned(),
        }),
    }
}

impl SampleStore {
    /// Loads a sample data file. `lob_dir` is the directory that
    /// large-object file references resolve against.
    pub fn load(file: &Path, lob_dir: &Path) -> Result<Self, SampleError> {
        let source = fs::read_to_string(file).map_err(|source| SampleError::Io {
            file: file.to_owned(),
            source,
        })?;
        Self::from_yaml(&source, file, lob_dir)
    }

    pub fn from_yaml(source: &str, file: &Path, lob_dir: &Path) -> Result<Self, SampleError> {
        let raw: HashMap<String, RawPool> =
            serde_yaml::from_str(source).map_err(|source| SampleError::Format {
                file: file.to_owned(),
                source,
            })?;
        let mut pools = HashMap::with_capacity(raw.len());
        for (key, pool) in raw {
            let pool = match pool {
                RawPool::Range { min, max } => Pool::ByteRange { min, max },
                RawPool::Values(values) => Pool::Values(
                    values
                        .into_iter()
                        .map(|v| convert_candidate(v, &key, file))
                        .collect::<Result<_, _>>()?,
                ),
            };
            pools.insert(key.to_uppercase(), pool);
        }
        Ok(SampleStore {
            pools,
            lob_dir: lob_dir.to_owned(),
            file: file.to_owned(),
        })
    }

    fn pool(&self, key: &str) -> Result<&Pool, SampleError> {
        self.pools
            .get(&key.to_uppercase())
            .ok_or_else(|| SampleError::MissingKey {
                key: key.to_owned(),
                file: self.file.clone(),
            })
    }

    fn values(&self, key: &str) -> Result<&[Option<Literal>], SampleError> {
        match self.pool(key)? {
            Pool::Values(values) => Ok(values),
            Pool::ByteRange { .. } => Err(SampleError::WrongShape {
                key: key.to_owned(),
                file: self.file.clone(),
                actual: "a length range",
                expected: "a candidate list",
            }),
        }
    }

    /// Uniform draw from the pool for `key`. A NOT NULL column re-draws
    /// until a non-null candidate is hit, which is a draw over the non-null
    /// subset. An empty pool yields null.
    pub fn scalar<R: Rng + ?Sized>(
        &self,
        key: &str,
        nullable: bool,
        rng: &mut R,
    ) -> Result<Literal, SampleError> {
        let values = self.values(key)?;
        let drawn = if nullable {
            values.choose(rng).cloned().flatten()
        } else {
            let non_null: Vec<&Option<Literal>> =
                values.iter().filter(|v| v.is_some()).collect();
            non_null.choose(rng).map(|v| (*v).clone()).flatten()
        };
        Ok(drawn.unwrap_or(Literal::Null))
    }

    /// Binary draw: a flat list behaves like [`scalar`](Self::scalar), a
    /// `{MIN, MAX}` record yields freshly generated random bytes whose
    /// length is uniform in `[MIN, MAX]`.
    pub fn binary<R: Rng + ?Sized>(
        &self,
        key: &str,
        nullable: bool,
        rng: &mut R,
    ) -> Result<Literal, SampleError> {
        match self.pool(key)? {
            Pool::Values(_) => self.scalar(key, nullable, rng),
            Pool::ByteRange { min, max } => {
                let len = rng.gen_range(*min..=*max) as usize;
                let mut bytes = vec![0u8; len];
                rng.fill(&mut bytes[..]);
                Ok(Literal::Blob(bytes))
            }
        }
    }

    /// Picks a random file reference and loads its content. `.txt` files
    /// are decoded as UTF-8 without a BOM; anything else is raw bytes.
    pub fn lob<R: Rng + ?Sized>(&self, key: &str, rng: &mut R) -> Result<Literal, SampleError> {
        let values = self.values(key)?;
        let reference = match values.choose(rng) {
            Some(Some(Literal::String(name))) => name,
            Some(_) => {
                return Err(SampleError::WrongShape {
                    key: key.to_owned(),
                    file: self.file.clone(),
                    actual: "a non-filename candidate",
                    expected: "large object file names",
                })
            }
            None => return Ok(Literal::Null),
        };
        let path = self.lob_dir.join(reference);
        let bytes = fs::read(&path).map_err(|source| SampleError::LobIo {
            file: path.clone(),
            source,
        })?;
        if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        {
            if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
                return Err(SampleError::LobEncoding { file: path });
            }
            let text =
                String::from_utf8(bytes).map_err(|_| SampleError::LobEncoding { file: path })?;
            Ok(Literal::String(text))
        } else {
            Ok(Literal::Blob(bytes))
        }
    }

    /// Scalar draw validated against the interval pattern for `span`.
    pub fn interval<R: Rng + ?Sized>(
        &self,
        key: &str,
        nullable: bool,
        span: IntervalSpan,
        rng: &mut R,
    ) -> Result<Literal, SampleError> {
        let value = match self.scalar(key, nullable, rng)? {
            Literal::Null => return Ok(Literal::Null),
            Literal::Integer(i) => i.to_string(),
            Literal::String(s) => s,
            Literal::Double(_) | Literal::Blob(_) => {
                return Err(SampleError::WrongShape {
                    key: key.to_owned(),
                    file: self.file.clone(),
                    actual: "a non-interval candidate",
                    expected: "interval strings",
                })
            }
        };
        let (pattern, name) = match span {
            IntervalSpan::YearToMonth => (&*YEAR_MONTH_PATTERN, "YEAR[-MONTH]"),
            IntervalSpan::DayToSecond => (&*DAY_SECOND_PATTERN, "D HH:MM:SS[.ffffff]"),
        };
        if !pattern.is_match(&value) {
            return Err(SampleError::IntervalPattern {
                value,
                key: key.to_owned(),
                file: self.file.clone(),
                pattern: name,
            });
        }
        Ok(Literal::String(value))
    }

    /// Dispatches on the sampling kind of a column's type group.
    pub fn value_of_kind<R: Rng + ?Sized>(
        &self,
        key: &str,
        kind: SampleKind,
        nullable: bool,
        rng: &mut R,
    ) -> Result<Literal, SampleError> {
        match kind {
            SampleKind::Scalar => self.scalar(key, nullable, rng),
            SampleKind::Binary => self.binary(key, nullable, rng),
            SampleKind::Lob => self.lob(key, rng),
            SampleKind::Interval(span) => self.interval(key, nullable, span, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use table_def::SampleGroup;

    use super::*;

    fn store(yaml: &str, lob_dir: &Path) -> SampleStore {
        SampleStore::from_yaml(yaml, Path::new("sample.yaml"), lob_dir).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn scalar_not_null_never_draws_null() {
        let store = store("VARCHAR:\n  - one\n  - ~\n  - two\n", Path::new("."));
        let mut rng = rng();
        for _ in 0..200 {
            let value = store.scalar("VARCHAR", false, &mut rng).unwrap();
            assert_ne!(value, Literal::Null);
        }
    }

    #[test]
    fn scalar_nullable_can_draw_null() {
        let store = store("VARCHAR:\n  - ~\n", Path::new("."));
        let mut rng = rng();
        assert_eq!(
            store.scalar("VARCHAR", true, &mut rng).unwrap(),
            Literal::Null
        );
    }

    #[test]
    fn empty_pool_yields_null() {
        let store = store("VARCHAR: []\n", Path::new("."));
        let mut rng = rng();
        assert_eq!(
            store.scalar("VARCHAR", false, &mut rng).unwrap(),
            Literal::Null
        );
    }

    #[test]
    fn keys_are_case_insensitive() {
        let store = store("integer:\n  - 7\n", Path::new("."));
        let mut rng = rng();
        assert_eq!(
            store.scalar("INTEGER", false, &mut rng).unwrap(),
            Literal::Integer(7)
        );
    }

    #[test]
    fn missing_key_is_fatal() {
        let store = store("VARCHAR:\n  - one\n", Path::new("."));
        let mut rng = rng();
        let err = store.scalar("DATE", true, &mut rng).unwrap_err();
        assert!(matches!(err, SampleError::MissingKey { ref key, .. } if key == "DATE"));
    }

    #[test]
    fn binary_range_draws_length_in_bounds() {
        let store = store("BINARY:\n  MIN: 5\n  MAX: 10\n", Path::new("."));
        let mut rng = rng();
        for _ in 0..100 {
            match store.binary("BINARY", false, &mut rng).unwrap() {
                Literal::Blob(bytes) => {
                    assert!((5..=10).contains(&bytes.len()));
                }
                other => panic!("expected bytes, got {:?}", other),
            }
        }
    }

    #[test]
    fn binary_over_flat_list_behaves_as_scalar() {
        let store = store("BINARY:\n  - payload\n", Path::new("."));
        let mut rng = rng();
        assert_eq!(
            store.binary("BINARY", false, &mut rng).unwrap(),
            Literal::String("payload".to_owned())
        );
    }

    #[test]
    fn scalar_over_range_pool_is_rejected() {
        let store = store("BINARY:\n  MIN: 1\n  MAX: 2\n", Path::new("."));
        let mut rng = rng();
        assert!(matches!(
            store.scalar("BINARY", false, &mut rng),
            Err(SampleError::WrongShape { .. })
        ));
    }

    #[test]
    fn lob_text_file_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("payload.txt"), "lorem ipsum").unwrap();
        let store = store("LOB:\n  - payload.txt\n", dir.path());
        let mut rng = rng();
        assert_eq!(
            store.lob("LOB", &mut rng).unwrap(),
            Literal::String("lorem ipsum".to_owned())
        );
    }

    #[test]
    fn lob_binary_file_is_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("payload.png"), [0x89u8, 0x50, 0x4e]).unwrap();
        let store = store("LOB:\n  - payload.png\n", dir.path());
        let mut rng = rng();
        assert_eq!(
            store.lob("LOB", &mut rng).unwrap(),
            Literal::Blob(vec![0x89, 0x50, 0x4e])
        );
    }

    #[test]
    fn lob_bom_is_rejected_naming_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = fs::File::create(dir.path().join("bom.txt")).unwrap();
        f.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        f.write_all(b"text").unwrap();
        let store = store("LOB:\n  - bom.txt\n", dir.path());
        let mut rng = rng();
        match store.lob("LOB", &mut rng).unwrap_err() {
            SampleError::LobEncoding { file } => {
                assert!(file.ends_with("bom.txt"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn lob_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store("LOB:\n  - missing.txt\n", dir.path());
        let mut rng = rng();
        assert!(matches!(
            store.lob("LOB", &mut rng),
            Err(SampleError::LobIo { .. })
        ));
    }

    #[test]
    fn interval_patterns() {
        let store = store(
            "INTERVAL_YM:\n  - 3-11\n  - 5\nINTERVAL_DS:\n  - 2 10:45:00\n  - 0 1:2:3.123456\n",
            Path::new("."),
        );
        let mut rng = rng();
        for _ in 0..20 {
            store
                .interval("INTERVAL_YM", false, IntervalSpan::YearToMonth, &mut rng)
                .unwrap();
            store
                .interval("INTERVAL_DS", false, IntervalSpan::DayToSecond, &mut rng)
                .unwrap();
        }
    }

    #[test]
    fn interval_mismatch_names_the_data_file() {
        let store = store("INTERVAL_YM:\n  - 2 10:45:00\n", Path::new("."));
        let mut rng = rng();
        match store
            .interval("INTERVAL_YM", false, IntervalSpan::YearToMonth, &mut rng)
            .unwrap_err()
        {
            SampleError::IntervalPattern { value, file, .. } => {
                assert_eq!(value, "2 10:45:00");
                assert_eq!(file, Path::new("sample.yaml"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn key_strategies() {
        assert_eq!(
            KeyStrategy::TypeGroup.key("col_char", SampleGroup::Char),
            "CHAR"
        );
        assert_eq!(
            KeyStrategy::ColumnName.key("col_char", SampleGroup::Char),
            "COL_CHAR"
        );
    }
}
