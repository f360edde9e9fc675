//! Rust code generation modules.

pub mod composites;
pub mod enums;
pub mod sets;
pub mod types;

pub use composites::FlyweightGenerator;
pub use enums::EnumGenerator;
pub use sets::SetGenerator;
pub use types::{PrimitiveMapping, field_ident, type_ident};

/// One complete generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Generated type name; also the output unit name.
    pub name: String,
    /// Complete Rust source text.
    pub source: String,
}

/// Line-oriented source builder with four-space indentation.
#[derive(Debug)]
pub(crate) struct SourceWriter {
    out: String,
    emit_docs: bool,
}

impl SourceWriter {
    pub(crate) fn new(emit_docs: bool) -> Self {
        Self {
            out: String::with_capacity(4096),
            emit_docs,
        }
    }

    /// Appends `text` at `indent` levels; an empty `text` yields an empty line.
    pub(crate) fn line(&mut self, indent: usize, text: &str) {
        if !text.is_empty() {
            for _ in 0..indent {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Appends a `///` doc line when docs are enabled.
    pub(crate) fn doc(&mut self, indent: usize, text: &str) {
        if !self.emit_docs {
            return;
        }
        if text.is_empty() {
            self.line(indent, "///");
        } else {
            self.line(indent, &format!("/// {text}"));
        }
    }

    /// Writes the leading comment and `use` declarations of a unit.
    pub(crate) fn file_header(&mut self, package: &str, imports: &[String]) {
        self.line(
            0,
            &format!("// Generated by flatsbe-codegen from package `{package}`. Do not edit."),
        );
        if !imports.is_empty() {
            self.blank();
            for import in imports {
                self.line(0, &format!("use {import};"));
            }
        }
        self.blank();
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_writer_indent_and_docs() {
        let mut w = SourceWriter::new(true);
        w.doc(0, "Doc.");
        w.line(0, "fn f() {");
        w.line(1, "body();");
        w.line(1, "");
        w.line(0, "}");
        assert_eq!(w.finish(), "/// Doc.\nfn f() {\n    body();\n\n}\n");
    }

    #[test]
    fn test_source_writer_without_docs() {
        let mut w = SourceWriter::new(false);
        w.doc(1, "Hidden.");
        w.doc(1, "");
        w.line(0, "x");
        assert_eq!(w.finish(), "x\n");
    }

    #[test]
    fn test_file_header() {
        let mut w = SourceWriter::new(true);
        w.file_header("car.example", &["flatsbe_core::error::UnknownEnumValue".to_string()]);
        assert_eq!(
            w.finish(),
            "// Generated by flatsbe-codegen from package `car.example`. Do not edit.\n\
             \n\
             use flatsbe_core::error::UnknownEnumValue;\n\
             \n"
        );
    }
}
