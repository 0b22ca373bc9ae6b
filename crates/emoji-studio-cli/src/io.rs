use emoji_studio_core::ExportArtifact;
use std::error::Error;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Writes the artifact to `output` (a directory gets the suggested file name),
/// to the suggested file name when stdout is a terminal, or to stdout.
pub(crate) fn write_output_with_tty(
    artifact: &ExportArtifact,
    output: Option<&PathBuf>,
    stdout_is_tty: bool,
) -> Result<(), Box<dyn Error>> {
    if let Some(path) = output {
        let path = if path.is_dir() {
            path.join(&artifact.file_name)
        } else {
            path.clone()
        };
        std::fs::write(&path, &artifact.bytes)?;
        if stdout_is_tty {
            print_wrote(&path);
        }
        return Ok(());
    }

    if stdout_is_tty {
        let path = Path::new(&artifact.file_name);
        std::fs::write(path, &artifact.bytes)?;
        print_wrote(path);
        return Ok(());
    }

    let mut stdout = io::stdout();
    stdout.write_all(&artifact.bytes)?;
    stdout.flush()?;
    Ok(())
}

pub(crate) fn print_wrote(path: &Path) {
    println!("WROTE {}", path.display());
}

pub(crate) fn read_stdin_with(stdin_override: Option<&str>) -> Result<String, io::Error> {
    if let Some(value) = stdin_override {
        return Ok(value.to_string());
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
