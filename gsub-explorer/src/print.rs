//! pretty printing implementation

use std::io::Write;

use read_gsub::{
    tables::{
        gsub::{LigatureSet, LigatureSubstFormat1, SingleSubst},
        layout::CoverageTable,
    },
    ReadError,
};

/// Writes indented `name: value` lines.
struct PrettyPrinter<'a> {
    depth: usize,
    indent_size: usize,
    writer: &'a mut dyn Write,
}

impl<'a> PrettyPrinter<'a> {
    fn new(writer: &'a mut dyn Write) -> Self {
        PrettyPrinter {
            depth: 0,
            indent_size: 2,
            writer,
        }
    }

    fn line(&mut self, text: impl std::fmt::Display) -> std::io::Result<()> {
        let indent = self.depth * self.indent_size;
        writeln!(self.writer, "{:indent$}{text}", "")
    }

    fn field(&mut self, name: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
        self.line(format_args!("{name}: {value}"))
    }

    fn indented(
        &mut self,
        f: impl FnOnce(&mut Self) -> std::io::Result<()>,
    ) -> std::io::Result<()> {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn error(&mut self, what: &str, err: ReadError) -> std::io::Result<()> {
        self.line(format_args!("{what}: Error '{err}'"))
    }

    fn coverage(&mut self, coverage: &CoverageTable) -> std::io::Result<()> {
        self.line("Coverage")?;
        self.indented(|p| {
            p.field("format", coverage.coverage_format())?;
            p.field("glyph_count", coverage.len())?;
            let glyphs = coverage
                .iter()
                .map(|gid| gid.to_u16().to_string())
                .collect::<Vec<_>>();
            p.field("glyphs", format_args!("[{}]", glyphs.join(", ")))
        })
    }

    fn ligature_set(&mut self, set: &LigatureSet) -> std::io::Result<()> {
        self.field("ligature_count", set.len())?;
        for (i, lig) in set.iter().enumerate() {
            match lig {
                Ok(lig) => {
                    let components = lig
                        .component_glyph_ids()
                        .values()
                        .map(|gid| gid.to_u16().to_string())
                        .collect::<Vec<_>>();
                    self.line(format_args!(
                        "[{i}] {} -> {}",
                        components.join(" "),
                        lig.ligature_glyph().to_u16()
                    ))?;
                }
                Err(err) => self.error(&format!("[{i}]"), err)?,
            }
        }
        Ok(())
    }
}

pub fn print_ligature_subst(
    writer: &mut dyn Write,
    table: &LigatureSubstFormat1,
) -> std::io::Result<()> {
    let mut p = PrettyPrinter::new(writer);
    p.line("LigatureSubstFormat1")?;
    p.indented(|p| {
        p.field("coverage_offset", table.coverage_offset())?;
        p.coverage(&table.coverage())?;
        p.field("ligature_set_count", table.ligature_set_count())?;
        let sets = table.ligature_sets();
        for (i, first) in table.coverage().iter().enumerate() {
            let offset = sets.offset(i).unwrap_or_default();
            p.line(format_args!("LigatureSet {i} (first glyph {}) @ {offset}", first.to_u16()))?;
            match sets.get(i) {
                Ok(set) => p.indented(|p| p.ligature_set(&set))?,
                Err(err) => p.indented(|p| p.error("LigatureSet", err))?,
            }
        }
        Ok(())
    })
}

pub fn print_single_subst(writer: &mut dyn Write, table: &SingleSubst) -> std::io::Result<()> {
    let mut p = PrettyPrinter::new(writer);
    p.line(format_args!("SingleSubstFormat{}", table.subst_format()))?;
    p.indented(|p| {
        match table {
            SingleSubst::Format1(table) => {
                p.field("coverage_offset", table.coverage_offset())?;
                p.coverage(&table.coverage())?;
                p.field("delta_glyph_id", table.delta_glyph_id())?;
            }
            SingleSubst::Format2(table) => {
                p.field("coverage_offset", table.coverage_offset())?;
                p.coverage(&table.coverage())?;
                p.field("glyph_count", table.glyph_count())?;
            }
        }
        let coverage = table.coverage();
        for (i, gid) in coverage.iter().enumerate() {
            let substitute = match table {
                SingleSubst::Format1(table) => {
                    Some((gid.to_u16() as i32 + table.delta_glyph_id() as i32) as u16)
                }
                SingleSubst::Format2(table) => table.substitute_for(i).map(|gid| gid.to_u16()),
            };
            if let Some(substitute) = substitute {
                p.line(format_args!("{} -> {substitute}", gid.to_u16()))?;
            }
        }
        Ok(())
    })
}
