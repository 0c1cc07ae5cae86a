//! NumPy `.npy` trajectory files.
//!
//! Supports format versions 1.0–3.0 holding a C-ordered float array of
//! shape `(T, S, 6)`, or `(S, 6)` for a single trajectory. Both `f8` and
//! `f4` are accepted in either byte order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::TrajectorySource;
use crate::errors::{AirshipError, Result};
use crate::trajectory::{PoseSample, SAMPLE_FIELDS, Trajectory, TrajectorySet};

const MAGIC: &[u8; 6] = b"\x93NUMPY";
const HEADER_ALIGN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpyDtype {
    F64 { big_endian: bool },
    F32 { big_endian: bool },
}

impl NpyDtype {
    fn parse(descr: &str) -> Result<Self> {
        let mut chars = descr.chars();
        let big_endian = match chars.next() {
            Some('<') => false,
            Some('>') => true,
            Some('=') => cfg!(target_endian = "big"),
            _ => return Err(malformed(format!("unsupported dtype '{descr}'"))),
        };
        let kind = chars.as_str();
        match kind {
            "f8" => Ok(Self::F64 { big_endian }),
            "f4" => Ok(Self::F32 { big_endian }),
            _ => Err(malformed(format!("unsupported dtype '{descr}'"))),
        }
    }

    #[must_use]
    pub fn item_size(self) -> usize {
        match self {
            Self::F64 { .. } => 8,
            Self::F32 { .. } => 4,
        }
    }
}

/// The parsed header dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    pub dtype: NpyDtype,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
}

impl NpyHeader {
    /// Parses the Python dict literal stored in the file header, e.g.
    /// `{'descr': '<f8', 'fortran_order': False, 'shape': (10, 1000, 6), }`.
    pub fn parse(text: &str) -> Result<Self> {
        let descr = quoted_value(dict_value(text, "descr")?)?;
        let fortran_order = match dict_value(text, "fortran_order")? {
            v if v.starts_with("True") => true,
            v if v.starts_with("False") => false,
            _ => return Err(malformed("invalid 'fortran_order' value")),
        };
        let shape = tuple_value(dict_value(text, "shape")?)?;

        Ok(Self {
            dtype: NpyDtype::parse(descr)?,
            fortran_order,
            shape,
        })
    }
}

/// Reads trajectories from a `.npy` file on disk.
#[derive(Debug, Clone)]
pub struct NpyTrajectorySource {
    path: PathBuf,
}

impl NpyTrajectorySource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `set` as a little-endian `f8` array of shape `(T, S, 6)`.
    pub fn save(path: impl AsRef<Path>, set: &TrajectorySet) -> Result<()> {
        fs::write(path, encode(set)?)?;
        Ok(())
    }
}

impl TrajectorySource for NpyTrajectorySource {
    fn load(&self) -> Result<TrajectorySet> {
        let bytes = fs::read(&self.path).map_err(|err| {
            AirshipError::TrajectorySourceUnavailable(format!("{}: {err}", self.path.display()))
        })?;
        decode(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decodes a complete `.npy` byte buffer.
pub fn decode(bytes: &[u8]) -> Result<TrajectorySet> {
    if bytes.len() < 10 || &bytes[..6] != MAGIC {
        return Err(malformed("missing NPY magic string"));
    }

    let (header_len, header_start) = match bytes[6] {
        1 => (usize::from(u16::from_le_bytes([bytes[8], bytes[9]])), 10),
        2 | 3 => {
            if bytes.len() < 12 {
                return Err(malformed("truncated NPY header"));
            }
            let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
            (len as usize, 12)
        }
        major => return Err(malformed(format!("unsupported NPY version {major}"))),
    };

    let header_end = header_start + header_len;
    let header_bytes = bytes
        .get(header_start..header_end)
        .ok_or_else(|| malformed("truncated NPY header"))?;
    let text = std::str::from_utf8(header_bytes).map_err(|_| malformed("NPY header is not UTF-8"))?;
    let header = NpyHeader::parse(text)?;

    if header.fortran_order {
        return Err(malformed("Fortran-ordered arrays are not supported"));
    }

    let (count, samples) = match header.shape.as_slice() {
        [count, samples, SAMPLE_FIELDS] => (*count, *samples),
        [samples, SAMPLE_FIELDS] => (1, *samples),
        other => {
            return Err(malformed(format!(
                "expected shape (T, S, {SAMPLE_FIELDS}) or (S, {SAMPLE_FIELDS}), got {other:?}"
            )));
        }
    };

    if samples == 0 && count > 0 {
        return Err(malformed(format!("shape {:?} has no samples", header.shape)));
    }

    let value_count = count
        .checked_mul(samples)
        .and_then(|n| n.checked_mul(SAMPLE_FIELDS));
    let byte_count = value_count.and_then(|n| n.checked_mul(header.dtype.item_size()));
    let (Some(value_count), Some(byte_count)) = (value_count, byte_count) else {
        return Err(malformed(format!("shape {:?} is too large", header.shape)));
    };

    let data = &bytes[header_end..];
    if data.len() < byte_count {
        return Err(malformed(format!(
            "data section holds {} bytes, expected {byte_count}",
            data.len()
        )));
    }

    let scalars = decode_scalars(data, header.dtype, value_count);
    let stride = samples * SAMPLE_FIELDS;
    let trajectories = (0..count)
        .map(|t| {
            scalars[t * stride..(t + 1) * stride]
                .chunks_exact(SAMPLE_FIELDS)
                .map(|c| PoseSample::from_row([c[0], c[1], c[2], c[3], c[4], c[5]]))
                .collect::<Trajectory>()
        })
        .collect();

    log::debug!(
        "Decoded NPY trajectories: shape {:?}, dtype {:?}",
        header.shape,
        header.dtype
    );
    Ok(TrajectorySet::new(trajectories))
}

/// Encodes `set` as a version 1.0 (or 2.0 for huge headers) `.npy` buffer.
///
/// All trajectories must have the same number of samples.
pub fn encode(set: &TrajectorySet) -> Result<Vec<u8>> {
    let samples = set.iter().next().map_or(0, Trajectory::len);
    if set.iter().any(|t| t.len() != samples) {
        return Err(malformed("cannot encode trajectories of differing lengths as one array"));
    }

    let mut header = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({}, {}, {SAMPLE_FIELDS}), }}",
        set.len(),
        samples
    );

    // Pad with spaces so the data section starts on a 64-byte boundary.
    let prefix_len = if header.len() + 11 > usize::from(u16::MAX) { 12 } else { 10 };
    let unpadded = prefix_len + header.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    header.push_str(&" ".repeat(padding));
    header.push('\n');

    let mut out = Vec::with_capacity(prefix_len + header.len() + set.len() * samples * SAMPLE_FIELDS * 8);
    out.extend_from_slice(MAGIC);
    if prefix_len == 10 {
        out.extend_from_slice(&[1, 0]);
        out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    } else {
        out.extend_from_slice(&[2, 0]);
        out.extend_from_slice(&(header.len() as u32).to_le_bytes());
    }
    out.extend_from_slice(header.as_bytes());

    for trajectory in set {
        for sample in trajectory.samples() {
            for value in sample.to_row() {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
    }
    Ok(out)
}

fn decode_scalars(data: &[u8], dtype: NpyDtype, count: usize) -> Vec<f64> {
    match dtype {
        NpyDtype::F64 { big_endian } => data
            .chunks_exact(8)
            .take(count)
            .map(|c| {
                let mut b = [0u8; 8];
                b.copy_from_slice(c);
                if big_endian {
                    f64::from_be_bytes(b)
                } else {
                    f64::from_le_bytes(b)
                }
            })
            .collect(),
        NpyDtype::F32 { big_endian } => data
            .chunks_exact(4)
            .take(count)
            .map(|c| {
                let mut b = [0u8; 4];
                b.copy_from_slice(c);
                f64::from(if big_endian {
                    f32::from_be_bytes(b)
                } else {
                    f32::from_le_bytes(b)
                })
            })
            .collect(),
    }
}

/// Text following `'key':` in the header dict.
fn dict_value<'a>(text: &'a str, key: &str) -> Result<&'a str> {
    let pattern_single = format!("'{key}'");
    let pattern_double = format!("\"{key}\"");
    let (start, pattern_len) = text
        .find(&pattern_single)
        .map(|i| (i, pattern_single.len()))
        .or_else(|| text.find(&pattern_double).map(|i| (i, pattern_double.len())))
        .ok_or_else(|| malformed(format!("NPY header has no '{key}' entry")))?;

    let rest = text[start + pattern_len..].trim_start();
    let rest = rest
        .strip_prefix(':')
        .ok_or_else(|| malformed(format!("NPY header entry '{key}' has no value")))?;
    Ok(rest.trim_start())
}

fn quoted_value(value: &str) -> Result<&str> {
    let quote = value
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        .ok_or_else(|| malformed("expected a quoted string in NPY header"))?;
    let body = &value[1..];
    let end = body
        .find(quote)
        .ok_or_else(|| malformed("unterminated string in NPY header"))?;
    Ok(&body[..end])
}

fn tuple_value(value: &str) -> Result<Vec<usize>> {
    let body = value
        .strip_prefix('(')
        .and_then(|v| v.find(')').map(|end| &v[..end]))
        .ok_or_else(|| malformed("expected a shape tuple in NPY header"))?;

    body.split(',')
        .map(str::trim)
        .filter(|dim| !dim.is_empty())
        .map(|dim| {
            // Older NumPy writes long integers as `10L`.
            dim.trim_end_matches('L')
                .parse::<usize>()
                .map_err(|_| malformed(format!("invalid shape dimension '{dim}'")))
        })
        .collect()
}

fn malformed(message: impl Into<String>) -> AirshipError {
    AirshipError::MalformedTrajectory(message.into())
}
