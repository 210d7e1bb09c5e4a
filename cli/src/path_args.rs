use crate::error::{CliError, CliResult};
use std::{ffi::OsStr, fs, path::PathBuf};

const MODULE_FILE_EXTENSION: &str = "modus";

fn get_modules_from_dir(path: PathBuf, acc: &mut Vec<PathBuf>) -> CliResult<()> {
    let file_type = fs::metadata(&path)?.file_type();
    if file_type.is_file() {
        if path.extension() == Some(OsStr::new(MODULE_FILE_EXTENSION)) {
            acc.push(path);
        }
    } else if file_type.is_dir() {
        let mut entries = fs::read_dir(&path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        for entry in entries {
            get_modules_from_dir(entry, acc)?;
        }
    } else {
        // `fs::metadata` follows symlinks, so this is only reachable for things like device files
        return Err(CliError::InvalidModuleFile(path));
    }
    Ok(())
}

/// Collects the module files named by `paths`. Files are taken as given, whatever their
/// extension, and directories are searched recursively for `.modus` files.
pub fn get_modules_from_paths<'a, T>(paths: T) -> CliResult<Vec<PathBuf>>
where
    T: Iterator<Item = &'a str>,
{
    let mut result = Vec::new();
    for p in paths {
        let file_type = fs::metadata(p)?.file_type();
        if file_type.is_file() {
            result.push(p.into());
        } else {
            get_modules_from_dir(p.into(), &mut result)?;
        }
    }
    Ok(result)
}
