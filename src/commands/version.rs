use crate::error::Result;
use std::io::Write;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "tablarian: {VERSION}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("tablarian: {}\n", env!("CARGO_PKG_VERSION"))
        );
    }
}
