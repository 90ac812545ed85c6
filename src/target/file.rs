//! Rendering of a complete target source file.
use crate::common::prettify::{render_to, ToPretty};
use crate::target::code::Code;
use crate::target::go;
use crate::target::imports::{default_name, ImportRegistry};
use crate::target::pretty::{code_doc, quote};
use pretty::{DocAllocator, DocBuilder};
use std::io::{self, Write};
use tracing::debug;

/// A translated module awaiting rendering.
///
/// Qualified references are only discovered while laying out the
/// fragments, so rendering is done twice: once into a sink to fill the
/// import registry, then for real with the import block in front.
pub struct GoFile {
    package: String,
    header: String,
    fragments: Vec<Code>,
    entry_point: Option<String>,
}

impl GoFile {
    pub fn new<T: AsRef<str>>(package: T, fragments: Vec<Code>) -> Self {
        GoFile {
            package: package.as_ref().to_string(),
            header: "generated by pygo".to_string(),
            fragments,
            entry_point: None,
        }
    }

    /// Replace the header comment
    pub fn with_header<T: AsRef<str>>(self, header: T) -> Self {
        GoFile {
            header: header.as_ref().to_string(),
            ..self
        }
    }

    /// Gather top-level statements into an entry-point function of
    /// the given name, leaving declarations at package level
    pub fn with_entry_point<T: AsRef<str>>(self, name: T) -> Self {
        GoFile {
            entry_point: Some(name.as_ref().to_string()),
            ..self
        }
    }

    /// Package level fragments in output order
    fn top_level(&self) -> Vec<Code> {
        match &self.entry_point {
            None => self.fragments.clone(),
            Some(name) => {
                let (decls, stmts): (Vec<Code>, Vec<Code>) = self
                    .fragments
                    .iter()
                    .cloned()
                    .partition(Code::is_declaration);
                let mut top = decls;
                top.push(go::func_decl(None, name, go::signature(vec![], vec![]), stmts));
                top
            }
        }
    }

    /// Render the file with its minimal import list
    pub fn render<W: Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        let top = self.top_level();
        let imports = ImportRegistry::new();
        let body = Body {
            fragments: &top,
            imports: &imports,
        };

        render_to(&body, width, &mut io::sink())?;
        debug!(
            package = self.package.as_str(),
            imports = imports.imports().len(),
            "import discovery pass complete"
        );

        writeln!(out, "// {}", self.header)?;
        writeln!(out)?;
        writeln!(out, "package {}", self.package)?;
        writeln!(out)?;
        if !imports.is_empty() {
            writeln!(out, "import (")?;
            for (path, local) in imports.imports() {
                if local == default_name(&path) {
                    writeln!(out, "    {}", quote(&path))?;
                } else {
                    writeln!(out, "    {} {}", local, quote(&path))?;
                }
            }
            writeln!(out, ")")?;
            writeln!(out)?;
        }
        render_to(&body, width, out)?;
        writeln!(out)
    }

    /// Render to a string
    pub fn to_source(&self, width: usize) -> String {
        let mut buf = Vec::new();
        // writing to a vector cannot fail
        let _ = self.render(width, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Package level fragments separated by blank lines
struct Body<'a> {
    fragments: &'a [Code],
    imports: &'a ImportRegistry,
}

impl<'a> ToPretty for Body<'a> {
    fn pretty<'b, D, A>(&'b self, allocator: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone,
    {
        let docs: Vec<DocBuilder<'b, D, A>> = self
            .fragments
            .iter()
            .map(|c| code_doc(c, self.imports, allocator))
            .collect();
        allocator.intersperse(docs, allocator.hardline().append(allocator.hardline()))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::target::go::*;

    #[test]
    pub fn test_imports_discovered_before_body() {
        let file = GoFile::new(
            "hello",
            vec![
                call(qual("fmt", "Println"), vec![string("hi")]),
                call(qual("pygo/runtime", "Assert"), vec![bool(true)]),
            ],
        );
        assert_eq!(
            file.to_source(80),
            "// generated by pygo\n\npackage hello\n\nimport (\n    \"fmt\"\n    \"pygo/runtime\"\n)\n\n\
             fmt.Println(\"hi\")\n\nruntime.Assert(true)\n"
        );
    }

    #[test]
    pub fn test_no_imports() {
        let file = GoFile::new("empty", vec![]).with_header("test");
        assert_eq!(file.to_source(80), "// test\n\npackage empty\n\n\n");
    }

    #[test]
    pub fn test_entry_point() {
        let file = GoFile::new(
            "main",
            vec![
                define(vec![id("x")], vec![int(1)]),
                func_decl(None, "f", signature(vec![], vec![]), vec![]),
            ],
        )
        .with_entry_point("main");
        assert_eq!(
            file.to_source(80),
            "// generated by pygo\n\npackage main\n\nfunc f() {\n}\n\nfunc main() {\n    x := 1\n}\n"
        );
    }
}
