use crate::config::{DEFAULT_CONFIG_FILE, write_template};
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Write a config template for `driver` into `dir`.
pub fn run(dir: &Path, driver: &str, out: &mut dyn Write) -> Result<()> {
    write_template(dir, driver)?;
    writeln!(out, "Config file template is created as '{DEFAULT_CONFIG_FILE}'.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        run(dir.path(), "postgres", &mut out).unwrap();

        assert!(dir.path().join(DEFAULT_CONFIG_FILE).is_file());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Config file template is created as 'tablarian.config'.\n"
        );
    }

    #[test]
    fn test_init_twice() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), "postgres", &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        let err = run(dir.path(), "postgres", &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Config file 'tablarian.config' already exists.");
        assert!(out.is_empty());
    }
}
