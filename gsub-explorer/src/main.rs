//! Print the contents of a GSUB subtable, and optionally rebuild it.
//!
//! The input is the raw bytes of a single subtable, as extracted from a font.

use std::{path::Path, str::FromStr};

use read_gsub::{
    tables::gsub::{LigatureSubstFormat1, SingleSubst},
    FontData, FontRead,
};
use write_gsub::{BuildTable, FromData};

mod print;

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = flags::Args::from_env().map_err(Error::new)?;
    let bytes = std::fs::read(&args.input)
        .map_err(|e| Error(format!("could not read '{}': {e}", args.input.display())))?;
    let kind = args.format.unwrap_or_default();
    log::debug!("read {} bytes from {}", bytes.len(), args.input.display());

    let stdout = std::io::stdout();
    let mut locked = stdout.lock();
    print_subtable(&mut locked, kind, &bytes)?;

    if args.rebuild || args.output.is_some() {
        let canonical = !args.full;
        let rebuilt = rebuild(kind, &bytes, canonical)?;
        if rebuilt == bytes {
            println!("rebuilt {} bytes: identical to input", rebuilt.len());
        } else {
            let first_diff = rebuilt
                .iter()
                .zip(&bytes)
                .position(|(a, b)| a != b)
                .unwrap_or(rebuilt.len().min(bytes.len()));
            println!(
                "rebuilt {} bytes: differs from input ({} bytes) at byte {first_diff}",
                rebuilt.len(),
                bytes.len()
            );
        }
        if let Some(path) = &args.output {
            write_output(path, &rebuilt)?;
        }
    }
    Ok(())
}

/// The kind of subtable in the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Kind {
    Single,
    #[default]
    Ligature,
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Kind::Single),
            "ligature" => Ok(Kind::Ligature),
            other => Err(format!(
                "unknown subtable kind '{}', expected 'single' or 'ligature'",
                other.escape_default()
            )),
        }
    }
}

fn print_subtable(out: &mut dyn std::io::Write, kind: Kind, bytes: &[u8]) -> Result<(), Error> {
    let data = FontData::new(bytes);
    let result = match kind {
        Kind::Single => {
            let table = SingleSubst::read(data).map_err(Error::new)?;
            print::print_single_subst(out, &table)
        }
        Kind::Ligature => {
            let table = LigatureSubstFormat1::read(data).map_err(Error::new)?;
            print::print_ligature_subst(out, &table)
        }
    };
    result.map_err(Error::new)
}

/// Load `bytes` into builders and write them back out.
fn rebuild(kind: Kind, bytes: &[u8], canonical: bool) -> Result<Vec<u8>, Error> {
    log::info!(
        "rebuilding {kind:?} subtable ({})",
        if canonical { "canonical" } else { "full" }
    );
    let rebuilt = match kind {
        Kind::Single => load::<write_gsub::tables::gsub::SingleSubst>(bytes, canonical)?.build(),
        Kind::Ligature => {
            load::<write_gsub::tables::gsub::LigatureSubstFormat1>(bytes, canonical)?.build()
        }
    };
    rebuilt.map_err(Error::new)
}

fn load<T: FromData>(bytes: &[u8], canonical: bool) -> Result<T, Error> {
    let loaded = if canonical {
        T::load_canonical(bytes)
    } else {
        T::load(FontData::new(bytes))
    };
    loaded.map_err(Error::new)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    std::fs::write(path, bytes)
        .map_err(|e| Error(format!("could not write '{}': {e}", path.display())))?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use super::Kind;
    use std::path::PathBuf;

    xflags::xflags! {
        /// Print and rebuild GSUB subtables
        cmd args {
            /// The file holding the raw subtable bytes
            required input: PathBuf
            /// The kind of subtable: 'single' or 'ligature' (the default)
            optional -f, --format format: Kind
            /// Load the subtable into builders and write it back out
            optional --rebuild
            /// When rebuilding, serialize every table instead of reusing the input bytes
            optional --full
            /// Write the rebuilt subtable to this file
            optional -o, --output output: PathBuf
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsub_test_data::gsub as test_data;

    #[test]
    fn parse_kind() {
        assert_eq!("single".parse::<Kind>(), Ok(Kind::Single));
        assert_eq!("ligature".parse::<Kind>(), Ok(Kind::Ligature));
        assert!("multiple".parse::<Kind>().is_err());
    }

    #[test]
    fn rebuild_modes() {
        let bytes = test_data::LIGATURE_SUBST_SETS_FIRST;
        assert_eq!(rebuild(Kind::Ligature, bytes, true).unwrap(), bytes);
        assert_eq!(
            rebuild(Kind::Ligature, bytes, false).unwrap(),
            test_data::LIGATURE_SUBST_BUILDER_ORDER
        );
        let single = test_data::SINGLESUBSTFORMAT1_TABLE;
        assert_eq!(rebuild(Kind::Single, single, false).unwrap(), single);
    }

    #[test]
    fn wrong_kind_is_an_error() {
        // a single subst format 2 table does not parse as a ligature subtable
        let err = rebuild(Kind::Ligature, test_data::SINGLESUBSTFORMAT2_TABLE, true).unwrap_err();
        assert!(err.0.contains("format"), "{err}");
    }
}
