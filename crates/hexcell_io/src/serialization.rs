//! JSON helpers and the renderer frame export.
//!
//! A [`Frame`] is everything an out-of-process renderer needs to paint one generation:
//! dimensions, the state of every cell and the color of every state.

use std::path::Path;

use hexcell_core::CellView;
use hexcell_data::{Palette, StateId};
use serde::{Deserialize, Serialize};

use crate::error::{IoError, Result};

/// Serializes data to JSON with error handling.
pub fn to_json<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Serializes data to pretty-printed JSON.
pub fn to_json_pretty<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Deserializes data from JSON string.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }

    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

/// Writes pretty JSON to a file.
pub fn write_json_file<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let json = to_json_pretty(data)?;
    std::fs::write(&path, json).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing JSON to {:?}", path.as_ref()))
    })?;
    Ok(())
}

/// Reads JSON from a file.
pub fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let json = std::fs::read_to_string(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading JSON from {:?}", path.as_ref()))
    })?;
    from_json(&json)
}

/// One rendered generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub generation: u64,
    pub width: u16,
    pub height: u16,
    pub palette: Vec<[u8; 3]>,
    pub cells: Vec<StateId>,
}

impl Frame {
    /// Copies the current cell states out of any [`CellView`].
    pub fn capture<V: CellView>(view: &V, palette: &Palette, generation: u64) -> Self {
        let (width, height) = view.dimension();
        Self {
            generation,
            width,
            height,
            palette: palette.colors.iter().map(|c| c.to_array()).collect(),
            cells: (0..view.size()).map(|i| view.state_at(i)).collect(),
        }
    }

    /// Color of the cell at a linear index.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Option<[u8; 3]> {
        let state = *self.cells.get(index)?;
        self.palette.get(state as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexcell_core::HexGrid;
    use hexcell_data::{Rgb, BACKGROUND_COLOR};

    #[test]
    fn test_empty_json_fails() {
        let result: Result<Frame> = from_json("   ");
        assert!(matches!(result, Err(IoError::Validation(_))));
    }

    #[test]
    fn test_invalid_json_fails() {
        let result: Result<Frame> = from_json("{ invalid json");
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_capture() {
        let mut grid = HexGrid::new(3, 2).unwrap();
        grid.set(2, 1, 1);
        let palette = Palette::new(vec![BACKGROUND_COLOR, Rgb::new(200, 10, 10)]);
        let frame = Frame::capture(&grid, &palette, 7);

        assert_eq!(frame.generation, 7);
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.cells, vec![0, 0, 0, 0, 0, 1]);
        assert_eq!(frame.color_at(5), Some([200, 10, 10]));
        assert_eq!(frame.color_at(0), Some([20, 20, 20]));
        assert_eq!(frame.color_at(6), None);

        let restored: Frame = from_json(&to_json(&frame).unwrap()).unwrap();
        assert_eq!(restored, frame);
    }
}
