//! pretty hex diffs, for comparing binary output.
//!
//! This is adapted from the pretty_assertions crate.
//!
//! source: https://github.com/colin-kiegel/rust-pretty-assertions/blob/main/pretty_assertions/src/lib.rs (MIT/Apache)

use std::fmt;

use nu_ansi_term::Color;

#[macro_export]
macro_rules! assert_hex_eq {
    ($left:expr, $right:expr$(,)?) => {{
        let left: &[u8] = $left;
        let right: &[u8] = $right;
        if left != right {
            let to_diff = $crate::hex_diff::ToDiff { left, right };
            ::std::panic!("assertion failed: `(left == right)`\n\n{to_diff}\n");
        }
    }};
}

pub(crate) struct ToDiff<'a> {
    pub(crate) left: &'a [u8],
    pub(crate) right: &'a [u8],
}

impl fmt::Display for ToDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_diff(f, self.make_diff(), 8)
    }
}

enum DiffItem {
    Same(u8),
    Different(u8),
    Blank,
}

struct DiffResult {
    left: Vec<DiffItem>,
    right: Vec<DiffItem>,
}

impl ToDiff<'_> {
    fn make_diff(&self) -> DiffResult {
        let mut left = Vec::new();
        let mut right = Vec::new();

        for item in diff::slice(self.left, self.right) {
            match item {
                diff::Result::Both(byte, _) => {
                    pad_to_same_len(&mut left, &mut right);
                    left.push(DiffItem::Same(*byte));
                    right.push(DiffItem::Same(*byte));
                }
                diff::Result::Left(byte) => left.push(DiffItem::Different(*byte)),
                diff::Result::Right(byte) => right.push(DiffItem::Different(*byte)),
            }
        }
        pad_to_same_len(&mut left, &mut right);
        DiffResult { left, right }
    }
}

fn pad_to_same_len(left: &mut Vec<DiffItem>, right: &mut Vec<DiffItem>) {
    let len = left.len().max(right.len());
    left.resize_with(len, || DiffItem::Blank);
    right.resize_with(len, || DiffItem::Blank);
}

fn write_diff(f: &mut impl fmt::Write, diff: DiffResult, width: usize) -> fmt::Result {
    let DiffResult { left, right } = diff;
    for (left, right) in left.chunks(width).zip(right.chunks(width)) {
        write!(f, " ")?;
        for item in left {
            write_item(f, item)?;
        }
        // pad out last line:
        for _ in left.len()..width {
            write!(f, "   ")?;
        }
        write!(f, "{} ", Color::White.dimmed().paint("|"))?;
        for item in right {
            write_item(f, item)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_item(f: &mut impl fmt::Write, item: &DiffItem) -> fmt::Result {
    match item {
        DiffItem::Same(byte) => write!(f, "{} ", hex_digits(*byte)),
        DiffItem::Different(byte) => {
            write!(f, "{} ", Color::Red.paint(hex_digits(*byte)))
        }
        DiffItem::Blank => write!(f, "__ "),
    }
}

fn hex_digits(byte: u8) -> String {
    format!("{byte:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_digits_formats_two_digits() {
        assert_eq!(hex_digits(0x0a), "0a");
        assert_eq!(hex_digits(0xf3), "f3");
    }

    #[test]
    fn diff_marks_changed_bytes() {
        let diff = ToDiff {
            left: &[0, 1, 2],
            right: &[0, 9, 2, 3],
        }
        .make_diff();
        assert_eq!(diff.left.len(), diff.right.len());
        assert!(matches!(diff.left[0], DiffItem::Same(0)));
        assert!(diff.right.iter().any(|item| matches!(item, DiffItem::Different(9))));
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn mismatch_panics() {
        assert_hex_eq!(&[1u8, 2], &[1u8, 3]);
    }
}
