//! Basic pretty printing facilities

use pretty::{DocAllocator, DocBuilder, RcAllocator};
use std::io::{self, Write};

/// Default line width for rendered output
pub const DEFAULT_WIDTH: usize = 100;

pub trait ToPretty {
    fn pretty<'b, D, A>(&'b self, allocator: &'b D) -> DocBuilder<'b, D, A>
    where
        D: DocAllocator<'b, A>,
        D::Doc: Clone,
        A: Clone;
}

/// Render to a writer at the specified width, without trailing line
pub fn render_to<I, W>(expr: &I, width: usize, out: &mut W) -> io::Result<()>
where
    I: ToPretty,
    W: Write,
{
    let allocator = RcAllocator;
    let doc = expr.pretty::<_, ()>(&allocator);
    doc.1.render(width, out)
}

/// Render to a string at the specified width, without trailing line
pub fn prettify_width<I>(expr: &I, width: usize) -> String
where
    I: ToPretty,
{
    let mut w = Vec::new();
    // writing to a vector cannot fail
    let _ = render_to(expr, width, &mut w);
    String::from_utf8_lossy(&w).into_owned()
}
