use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Print to stdout, degrading to ASCII with unsupported characters dropped
/// if the write is rejected. Printing never propagates an error.
pub fn print_stdout(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "{}", text).is_err() {
        let ascii: String = text.chars().filter(char::is_ascii).collect();
        let _ = writeln!(stdout, "{}", ascii);
    }
    let _ = stdout.flush();
}

/// Append to `path`, creating it if needed. The handle is scoped to the
/// single write.
pub fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// Replace `path` with `text`. Used only by the watch-session final flush.
pub fn overwrite(path: &Path, text: &str) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    file.write_all(text.as_bytes())?;
    Ok(())
}
