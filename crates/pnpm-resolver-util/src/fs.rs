use std::fs;
use std::io;
use std::path::Path;

/// Read a file as UTF-8 text, replacing invalid sequences with the replacement character.
///
/// Manifests are decoded the same way Node decodes `readFileSync(path, "utf-8")`,
/// so a stray invalid byte degrades to U+FFFD instead of failing the read.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// List the names of the immediate children of `dir`, in the order the OS returns them.
///
/// Entries whose names are not valid UTF-8 are skipped: they can never match
/// a package specifier.
///
/// # Errors
/// Returns an error if the directory cannot be opened. Errors on individual
/// entries are skipped.
pub fn dir_entry_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)?.flatten() {
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}
