use {
    crate::{
        error::*,
        marker::{FixedCell, CELLS, REDUCED, SIDE},
    },
    nanoserde::{DeJson, SerJson},
    std::path::{Path, PathBuf},
    tracing::debug,
};

pub const NUM_GROUPS: usize = 11;
pub const MIN_DISTANCE: u32 = 2;
pub const FLIP_DEPTH: usize = 2;
pub const SOLUTION_PATH: &str = "solution.txt";

/// Parameters of one marker search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Groups to pick from each half of the group list.
    pub required_count: usize,
    /// Minimum distance between any two picked groups.
    pub threshold: u32,
    /// Deepest flip count tried when measuring distance.
    pub flip_depth: usize,
    pub fixed_cells: Vec<FixedCell>,
    pub output: PathBuf,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            required_count: NUM_GROUPS,
            threshold: MIN_DISTANCE,
            flip_depth: FLIP_DEPTH,
            fixed_cells: REDUCED.to_vec(),
            output: PathBuf::from(SOLUTION_PATH),
        }
    }
}

/// On-disk form of [`SearchConfig`]; every field may be left out.
#[derive(Clone, Debug, Default, PartialEq, SerJson, DeJson)]
pub struct ConfigFile {
    #[nserde(default)]
    pub required_count: Option<usize>,
    #[nserde(default)]
    pub threshold: Option<u32>,
    #[nserde(default)]
    pub flip_depth: Option<usize>,
    #[nserde(default)]
    pub fixed_cells: Option<Vec<FixedCell>>,
    #[nserde(default)]
    pub output: Option<String>,
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let file = ConfigFile::deserialize_json(json)?;
        Ok(Self::default().with_file(file))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading search config from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(n) = file.required_count {
            self.required_count = n;
        }
        if let Some(t) = file.threshold {
            self.threshold = t;
        }
        if let Some(d) = file.flip_depth {
            self.flip_depth = d;
        }
        if let Some(cells) = file.fixed_cells {
            self.fixed_cells = cells;
        }
        if let Some(output) = file.output {
            self.output = output.into();
        }
        self
    }

    /// Defaults, then `--config FILE`, then individual flags.
    pub fn from_cli(args: &mut pico_args::Arguments) -> Result<Self> {
        let path: Option<PathBuf> = args.opt_value_from_str("--config")?;
        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };

        if let Some(n) = args.opt_value_from_str("--groups")? {
            config.required_count = n;
        }
        if let Some(t) = args.opt_value_from_str("--threshold")? {
            config.threshold = t;
        }
        if let Some(d) = args.opt_value_from_str("--depth")? {
            config.flip_depth = d;
        }
        if args.contains("--full") {
            config.fixed_cells.clear();
        }
        if let Some(output) = args.opt_value_from_str::<_, PathBuf>("--output")? {
            config.output = output;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.required_count == 0 {
            return Err(Error::InvalidConfig("required_count must be at least 1".into()));
        }
        if self.threshold == 0 {
            return Err(Error::InvalidConfig("threshold must be at least 1".into()));
        }
        if self.flip_depth > CELLS {
            return Err(Error::InvalidConfig(format!(
                "flip_depth must be at most {CELLS}, got {}",
                self.flip_depth
            )));
        }

        for (i, cell) in self.fixed_cells.iter().enumerate() {
            if cell.row >= SIDE || cell.col >= SIDE {
                return Err(Error::InvalidConfig(format!(
                    "fixed cell ({}, {}) is outside the grid",
                    cell.row, cell.col
                )));
            }
            if self.fixed_cells[..i]
                .iter()
                .any(|c| (c.row, c.col) == (cell.row, cell.col))
            {
                return Err(Error::InvalidConfig(format!(
                    "fixed cell ({}, {}) given twice",
                    cell.row, cell.col
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
fn args(list: &[&str]) -> pico_args::Arguments {
    pico_args::Arguments::from_vec(list.iter().map(Into::into).collect())
}

#[test]
fn test_defaults() {
    let config = SearchConfig::default();
    assert_eq!(config.required_count, 11);
    assert_eq!(config.threshold, 2);
    assert_eq!(config.flip_depth, 2);
    assert_eq!(config.fixed_cells, REDUCED);
    assert_eq!(config.output, Path::new("solution.txt"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_json_overrides_defaults() {
    let config = SearchConfig::from_json(
        r#"{"threshold": 3, "fixed_cells": [{"row": 1, "col": 1, "value": true}]}"#,
    )
    .unwrap();
    assert_eq!(config.required_count, 11);
    assert_eq!(config.threshold, 3);
    assert_eq!(
        config.fixed_cells,
        [FixedCell {
            row: 1,
            col: 1,
            value: true
        }]
    );

    let empty = SearchConfig::from_json("{}").unwrap();
    assert_eq!(empty, SearchConfig::default());

    assert!(matches!(
        SearchConfig::from_json("{\"threshold\": "),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_cli_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search.json");
    std::fs::write(&path, r#"{"required_count": 4, "flip_depth": 1}"#).unwrap();

    let path = path.to_str().unwrap();
    let mut args = args(&["--config", path, "--depth", "3", "--full", "--output", "out.txt"]);
    let config = SearchConfig::from_cli(&mut args).unwrap();

    assert_eq!(config.required_count, 4);
    assert_eq!(config.flip_depth, 3);
    assert!(config.fixed_cells.is_empty());
    assert_eq!(config.output, Path::new("out.txt"));
    assert!(args.finish().is_empty());
}

#[test]
fn test_invalid_values() {
    let mut args_zero = args(&["--groups", "0"]);
    assert!(matches!(
        SearchConfig::from_cli(&mut args_zero),
        Err(Error::InvalidConfig(_))
    ));

    let mut args_bad = args(&["--threshold", "two"]);
    assert!(matches!(
        SearchConfig::from_cli(&mut args_bad),
        Err(Error::Args(_))
    ));

    let deep = SearchConfig {
        flip_depth: 10,
        ..Default::default()
    };
    assert!(deep.validate().is_err());

    let outside = SearchConfig {
        fixed_cells: vec![FixedCell {
            row: 3,
            col: 0,
            value: false,
        }],
        ..Default::default()
    };
    assert!(outside.validate().is_err());

    let mut twice = SearchConfig::default();
    twice.fixed_cells.push(REDUCED[0]);
    assert!(twice.validate().is_err());
}
