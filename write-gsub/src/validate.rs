//! The pre-compilation validation pass

use std::fmt::{Debug, Display};

/// Pre-compilation validation of tables.
///
/// The OpenType specification describes various requirements for different
/// tables that are awkward to encode in the type system, such as requiring
/// certain arrays to have equal lengths. These requirements are enforced
/// via a validation pass.
pub trait Validate {
    /// Ensure that this table is well-formed, reporting any errors.
    ///
    /// This calls [validate_impl][Self::validate_impl] and collects any errors.
    fn validate(&self) -> Result<(), ValidationReport> {
        let mut ctx = Default::default();
        self.validate_impl(&mut ctx);
        if ctx.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { errors: ctx.errors })
        }
    }

    /// Validate this table.
    ///
    /// If you need to implement this directly, it should look something like:
    ///
    /// ```rust
    /// # use write_gsub::validate::{ErrorKind, Validate, ValidationCtx};
    /// struct MyRecord {
    ///     my_values: Vec<u16>,
    /// }
    ///
    /// impl Validate for MyRecord {
    ///     fn validate_impl(&self, ctx: &mut ValidationCtx) {
    ///         ctx.in_table("MyRecord", |ctx| {
    ///             ctx.in_field("my_values", |ctx| {
    ///                 if self.my_values.len() > (u16::MAX as usize) {
    ///                     ctx.report(ErrorKind::TooManyItems, "array is too long");
    ///                 }
    ///             })
    ///         })
    ///     }
    /// }
    /// ```
    fn validate_impl(&self, ctx: &mut ValidationCtx);
}

/// The kind of problem found during validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An entry in a table was never set.
    IncompleteTable,
    /// Coverage glyphs are not strictly increasing.
    InvalidCoverage,
    /// Two arrays that must have the same length do not.
    InconsistentCount,
    /// An array is too long for its count field.
    TooManyItems,
}

/// A context for collecting validation error.
///
/// This is responsible for tracking the position in the tree at which
/// a given error is reported.
///
/// ## paths/locations
///
/// As validation travels down through the object graph, the path is recorded
/// via appropriate calls to methods like [in_table][Self::in_table] and [in_field][Self::in_field].
#[derive(Clone, Debug, Default)]
pub struct ValidationCtx {
    cur_location: Vec<LocationElem>,
    errors: Vec<ValidationError>,
}

/// A single problem, and where it was found.
#[derive(Debug, Clone)]
pub struct ValidationError {
    kind: ErrorKind,
    error: String,
    location: Vec<LocationElem>,
}

/// One or more validation errors.
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
enum LocationElem {
    Table(&'static str),
    Field(&'static str),
    Index(usize),
}

impl ValidationCtx {
    /// Run the provided closure in the context of a new table.
    ///
    /// Errors reported in the closure will include the provided identifer
    /// in their path.
    pub fn in_table(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Table(name), f);
    }

    /// Run the provided closure in the context of a new field.
    ///
    /// Errors reported in the closure will be associated with the field.
    pub fn in_field(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Field(name), f);
    }

    /// Run the provided closure in the context of an array.
    pub fn in_array(&mut self, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Index(0), f);
    }

    /// Run the provided closure in the context of a new array item.
    ///
    /// This should only be called in a closure passed to [in_array][Self::in_array];
    /// elsewhere it just runs the closure.
    pub fn array_item(&mut self, f: impl FnOnce(&mut ValidationCtx)) {
        f(self);
        if let Some(LocationElem::Index(i)) = self.cur_location.last_mut() {
            *i += 1;
        } else {
            log::warn!("array_item called outside of array");
        }
    }

    /// Report a new error, associating it with the current path.
    pub fn report(&mut self, kind: ErrorKind, msg: impl Display) {
        self.errors.push(ValidationError {
            kind,
            location: self.cur_location.clone(),
            error: msg.to_string(),
        });
    }

    fn with_elem(&mut self, elem: LocationElem, f: impl FnOnce(&mut ValidationCtx)) {
        self.cur_location.push(elem);
        f(self);
        self.cur_location.pop();
    }
}

impl ValidationError {
    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// A description of the problem.
    pub fn message(&self) -> &str {
        &self.error
    }

    /// The location of the problem, e.g. `LigatureSubstFormat1.ligature_sets[1]`.
    ///
    /// Nested tables are separated by `/`.
    pub fn path(&self) -> String {
        let mut out = String::new();
        for elem in &self.location {
            match elem {
                LocationElem::Table(name) if out.is_empty() => out.push_str(name),
                LocationElem::Table(name) => {
                    out.push('/');
                    out.push_str(name);
                }
                LocationElem::Field(name) => {
                    out.push('.');
                    out.push_str(name);
                }
                LocationElem::Index(idx) => out.push_str(&format!("[{idx}]")),
            }
        }
        out
    }
}

impl ValidationReport {
    /// The problems found.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `true` if any problem of this kind was found.
    pub fn has(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|err| err.kind == kind)
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let [only] = self.errors.as_slice() {
            return writeln!(f, "Validation error:\n{only}");
        }

        writeln!(f, "{} validation errors:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "#{}\n{error}", i + 1)?;
        }
        Ok(())
    }
}

impl Debug for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}: \"{}\"", self.kind, self.error)?;
        writeln!(f, "in: {}", self.path())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_array(|ctx| {
            for item in self.iter() {
                ctx.array_item(|ctx| {
                    item.validate_impl(ctx);
                })
            }
        });
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        if let Some(t) = self {
            t.validate_impl(ctx)
        }
    }
}
