//! VirtualWorld implementation of the Typst World trait
//!
//! The sheet engine compiles exactly one in-memory source file per
//! request, so the world holds a single main `Source` and never
//! touches the real filesystem.

use std::collections::HashMap;

use chrono::{Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Array, Bytes, Datetime, Dict, Value};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::{global_font_cache, FontCache};
use crate::compiler::EngineError;

/// An in-memory world for one compilation
pub struct VirtualWorld {
    /// The single main source file
    main: Source,
    /// Reference to the global font cache
    font_cache: &'static FontCache,
    /// System inputs (accessible via sys.inputs in Typst)
    inputs: Dict,
    /// Timestamp for `datetime.today()` in the document
    time: chrono::DateTime<Utc>,
    /// Pre-hashed standard library
    library: LazyHash<Library>,
}

impl VirtualWorld {
    /// Create a new world from source text and JSON inputs
    pub fn new(
        source: String,
        inputs: HashMap<String, serde_json::Value>,
    ) -> Result<Self, EngineError> {
        let main_id = FileId::new(None, VirtualPath::new("/main.typ"));
        let main = Source::new(main_id, source);

        let inputs_dict = convert_inputs(inputs)?;
        let library = Library::builder().with_inputs(inputs_dict.clone()).build();

        Ok(Self {
            main,
            font_cache: global_font_cache(),
            inputs: inputs_dict,
            time: Utc::now(),
            library: LazyHash::new(library),
        })
    }

    /// Get the inputs dictionary
    pub fn inputs(&self) -> &Dict {
        &self.inputs
    }
}

/// Convert JSON values to a Typst Dict
fn convert_inputs(inputs: HashMap<String, serde_json::Value>) -> Result<Dict, EngineError> {
    let mut dict = Dict::new();

    for (key, value) in inputs {
        dict.insert(key.into(), json_to_typst_value(&value)?);
    }

    Ok(dict)
}

/// Convert a JSON value to a Typst Value
fn json_to_typst_value(json: &serde_json::Value) -> Result<Value, EngineError> {
    match json {
        serde_json::Value::Null => Ok(Value::None),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(EngineError::InvalidInput(format!("invalid number: {}", n)))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s.as_str().into())),
        serde_json::Value::Array(arr) => {
            let items: Vec<Value> = arr
                .iter()
                .map(json_to_typst_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(Array::from(items.as_slice())))
        }
        serde_json::Value::Object(obj) => {
            let mut dict = Dict::new();
            for (k, v) in obj {
                dict.insert(k.as_str().into(), json_to_typst_value(v)?);
            }
            Ok(Value::Dict(dict))
        }
    }
}

impl World for VirtualWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        // The cache stores a plain FontBook; wrap it once since the
        // cache itself is a process-wide singleton.
        static BOOK: std::sync::OnceLock<LazyHash<FontBook>> = std::sync::OnceLock::new();
        BOOK.get_or_init(|| LazyHash::new(self.font_cache.book().clone()))
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        // No assets are ever mounted; the sheet is pure text.
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let offset_hours = offset.unwrap_or(0);
        let adjusted = self.time + chrono::Duration::hours(offset_hours);

        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_world_creation() {
        let world = VirtualWorld::new("Hello, World!".to_string(), HashMap::new());
        assert!(world.is_ok());

        let world = world.unwrap();
        let main_id = world.main();
        let source = world.source(main_id);
        assert!(source.is_ok());
    }

    #[test]
    fn test_unknown_file_is_not_found() {
        let world = VirtualWorld::new("test".to_string(), HashMap::new()).unwrap();
        let other = FileId::new(None, VirtualPath::new("/other.typ"));

        assert!(world.source(other).is_err());
        assert!(world.file(other).is_err());
    }

    #[test]
    fn test_input_conversion() {
        let mut inputs = HashMap::new();
        inputs.insert("title".to_string(), serde_json::json!("Daftar"));
        inputs.insert("row_height_pt".to_string(), serde_json::json!(21.5));
        inputs.insert(
            "rows".to_string(),
            serde_json::json!([["1", "Alice", null], ["2", "Bob", null]]),
        );

        let world = VirtualWorld::new("test".to_string(), inputs).unwrap();

        let dict = world.inputs();
        assert!(dict.contains("title"));
        assert!(dict.contains("rows"));
    }

    #[test]
    fn test_today_function() {
        let world = VirtualWorld::new("test".to_string(), HashMap::new()).unwrap();
        assert!(world.today(None).is_some());
    }
}
