//! Parsing of the case manifest (the "sample text file").
//!
//! The manifest is a list of `key:value` lines. The `caseId` key holds the
//! identifier of the case. Every other key is the pedigree role of a sample
//! (`proband`, `mother`, `father` or any other label) and its value is the
//! sample name. Only the text between the first and second `:` is the value;
//! anything after a second `:` is ignored.
//!
//! ```text
//! caseId:CASE0001
//! proband:NA12878
//! mother:NA12892
//! father:NA12891
//! ```

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use crate::errors::Error;
use crate::errors::Result;

/// The key holding the case identifier.
pub const CASE_ID_KEY: &str = "caseId";

/// The role key for a proband.
pub const PROBAND: &str = "proband";

/// The role key for a mother.
pub const MOTHER: &str = "mother";

/// The role key for a father.
pub const FATHER: &str = "father";

/// A sample listed in the manifest along with its role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The role label, as written in the manifest.
    pub role: String,

    /// The sample name.
    pub sample: String,
}

/// A parsed case manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    case_id: String,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parses a manifest from any buffered reader.
    pub fn parse<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut case_id = None;
        let mut entries = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();

            if line.is_empty() {
                continue;
            }

            let mut fields = line.split(':');
            let key = fields.next().unwrap_or_default();
            let value = fields
                .next()
                .ok_or_else(|| Error::MalformedManifestLine {
                    line: i + 1,
                    content: line.to_string(),
                })?;

            if key == CASE_ID_KEY {
                if case_id.is_some() {
                    return Err(Error::DuplicateCaseId { line: i + 1 });
                }

                case_id = Some(value.to_string());
            } else {
                entries.push(ManifestEntry {
                    role: key.to_string(),
                    sample: value.to_string(),
                });
            }
        }

        Ok(Manifest {
            case_id: case_id.ok_or(Error::MissingCaseId)?,
            entries,
        })
    }

    /// Opens and parses the manifest at `path`.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// The case identifier.
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// The sample names in manifest order.
    pub fn samples(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.sample.as_str()).collect()
    }

    /// The role label of a sample, if the sample is in the manifest.
    pub fn role_of(&self, sample: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.sample == sample)
            .map(|e| e.role.as_str())
    }

    /// Every proband sample.
    pub fn probands(&self) -> Vec<&str> {
        self.with_role(PROBAND).collect()
    }

    /// The mother sample, if present.
    pub fn mother(&self) -> Option<&str> {
        self.with_role(MOTHER).last()
    }

    /// The father sample, if present.
    pub fn father(&self) -> Option<&str> {
        self.with_role(FATHER).last()
    }

    /// Whether at least one parent is present.
    pub fn has_parents(&self) -> bool {
        self.mother().is_some() || self.father().is_some()
    }

    fn with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.role == role)
            .map(|e| e.sample.as_str())
    }
}
