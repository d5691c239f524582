//! Four-line text presets for replaying an initial layout.
//!
//! ```text
//! 50                 <- base mass, in mass units
//! 3                  <- object count
//! 100,250,640        <- x positions
//! 80,300,410         <- y positions
//! ```
//!
//! Coordinate lists may be wrapped in `[` `]`, and entries may be integers
//! or decimals. Whether the number of positions matches the object count
//! is checked when the preset is applied, not when it is parsed.

use glam::DVec2;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing line: {0}")]
    MissingLine(&'static str),

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("{xs} x positions but {ys} y positions")]
    UnevenCoordinates { xs: usize, ys: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub base_mass: u32,
    pub object_count: u32,
    pub positions: Vec<DVec2>,
}

impl Preset {
    pub fn parse(text: &str) -> Result<Self, PresetError> {
        let mut lines = text.lines();
        let mut next = |name| lines.next().ok_or(PresetError::MissingLine(name));

        let base_mass = parse_int(next("base mass")?, 1)?;
        let object_count = parse_int(next("object count")?, 2)?;
        let xs = parse_list(next("x positions")?, 3)?;
        let ys = parse_list(next("y positions")?, 4)?;

        if xs.len() != ys.len() {
            return Err(PresetError::UnevenCoordinates {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let positions = xs.into_iter().zip(ys).map(|(x, y)| DVec2::new(x, y)).collect();
        Ok(Self {
            base_mass,
            object_count,
            positions,
        })
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.base_mass)?;
        writeln!(f, "{}", self.object_count)?;
        writeln!(f, "{}", join_coords(&self.positions, |p| p.x))?;
        write!(f, "{}", join_coords(&self.positions, |p| p.y))
    }
}

fn join_coords(positions: &[DVec2], coord: impl Fn(&DVec2) -> f64) -> String {
    positions
        .iter()
        .map(|p| coord(p).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_int(line: &str, line_no: usize) -> Result<u32, PresetError> {
    let value = line.trim();
    value.parse().map_err(|_| PresetError::InvalidNumber {
        line: line_no,
        value: value.to_owned(),
    })
}

fn parse_list(line: &str, line_no: usize) -> Result<Vec<f64>, PresetError> {
    line.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| PresetError::InvalidNumber {
                line: line_no,
                value: s.to_owned(),
            })
        })
        .collect()
}

/// Reads and parses a preset file.
pub fn load(path: &Path) -> Result<Preset, PresetError> {
    let text = fs::read_to_string(path)?;
    Preset::parse(&text)
}

/// Writes `preset` to `dir/presetN.txt`, using the smallest `N` not
/// already taken.
///
/// ### Returns
/// The path of the written file.
pub fn save_next(dir: &Path, preset: &Preset) -> Result<PathBuf, PresetError> {
    let mut n = 0u32;
    let path = loop {
        let candidate = dir.join(format!("preset{n}.txt"));
        if !candidate.exists() {
            break candidate;
        }
        n += 1;
    };

    fs::write(&path, preset.to_string())?;
    log::info!("saved preset to {}", path.display());
    Ok(path)
}
