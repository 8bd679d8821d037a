use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where generated code lands and what the projects are called.
///
/// Built once per run and shared by every artifact. The context is not
/// validated on construction; the [`Resolver`](crate::domain::Resolver)
/// checks it whenever a path is resolved, so a bad root surfaces as an
/// error naming the artifact that needed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationContext {
    pub solution_directory: PathBuf,
    pub src_directory: PathBuf,
    pub test_directory: PathBuf,
    /// Project name every namespace starts with, e.g. `Shop` or `Acme.Shop`.
    pub project_base_name: String,
}

impl GenerationContext {
    pub fn new(
        solution_directory: impl Into<PathBuf>,
        src_directory: impl Into<PathBuf>,
        test_directory: impl Into<PathBuf>,
        project_base_name: impl Into<String>,
    ) -> Self {
        Self {
            solution_directory: solution_directory.into(),
            src_directory: src_directory.into(),
            test_directory: test_directory.into(),
            project_base_name: project_base_name.into(),
        }
    }

    /// Conventional layout: `<solution>/src` and `<solution>/tests`.
    pub fn conventional(solution_directory: impl Into<PathBuf>, project_base_name: impl Into<String>) -> Self {
        let solution_directory = solution_directory.into();
        Self {
            src_directory: solution_directory.join("src"),
            test_directory: solution_directory.join("tests"),
            solution_directory,
            project_base_name: project_base_name.into(),
        }
    }
}

/// Which context root a class path hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    Solution,
    Src,
    Test,
}

impl Root {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solution => "solution",
            Self::Src => "src",
            Self::Test => "test",
        }
    }

    pub(crate) fn path<'a>(&self, context: &'a GenerationContext) -> &'a Path {
        match self {
            Self::Solution => &context.solution_directory,
            Self::Src => &context.src_directory,
            Self::Test => &context.test_directory,
        }
    }
}

/// Resolved location and identity of one generated class.
///
/// The namespace is the relative folder with segments joined by `.`, so a
/// file and every reference to it agree by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassPath {
    namespace: String,
    directory: PathBuf,
    full_path: PathBuf,
    class_name: String,
}

impl ClassPath {
    pub(crate) fn from_parts(root: &Path, segments: &[String], file_name: &str) -> Self {
        let directory = segments.iter().fold(root.to_path_buf(), |dir, s| dir.join(s));
        let full_path = directory.join(file_name);
        let class_name = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .to_string();

        Self {
            namespace: segments.join("."),
            directory,
            full_path,
            class_name,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Directory containing the file.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// File name without its extension.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.class_name)
    }
}
