use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Timer;

pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}

pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, to_json(obj)?)?;
    Ok(())
}

pub fn write_binary<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        fs_err::create_dir_all(parent)?;
    }
    let file = std::io::BufWriter::new(fs_err::File::create(path)?);
    bincode::serialize_into(file, obj).with_context(|| format!("serializing {}", path))?;
    Ok(())
}

pub fn maybe_read_json<T: DeserializeOwned>(path: &str, timer: &mut Timer) -> Result<T> {
    timer.start(format!("parse {}", path));
    let result = fs_err::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|contents| {
            serde_json::from_str(&contents).with_context(|| format!("parsing {}", path))
        });
    timer.stop(format!("parse {}", path));
    result
}

pub fn maybe_read_binary<T: DeserializeOwned>(path: &str, timer: &mut Timer) -> Result<T> {
    timer.start(format!("parse {}", path));
    let result = fs_err::File::open(path)
        .map_err(anyhow::Error::from)
        .and_then(|file| {
            bincode::deserialize_from(std::io::BufReader::new(file))
                .with_context(|| format!("deserializing {}", path))
        });
    timer.stop(format!("parse {}", path));
    result
}

/// Reads JSON if the path ends with `.json`, and bincode otherwise.
pub fn read_object<T: DeserializeOwned>(path: &str, timer: &mut Timer) -> Result<T> {
    if path.ends_with(".json") {
        maybe_read_json(path, timer)
    } else {
        maybe_read_binary(path, timer)
    }
}
