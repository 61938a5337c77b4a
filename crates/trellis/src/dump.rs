use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{NodeId, error::Result, input::focus::FocusManager, tree::Core};

/// Traverses the subtree at `start` and returns a string showing each node's
/// name, kind, bounds and flags. This is a debug function.
pub fn dump(core: &Core, start: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, start, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without color codes.
pub fn dump_plain(core: &Core, start: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, core, start, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Write a colored marker after a node's name.
fn write_marker(buffer: &mut Buffer, color: Color, text: &str) -> Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(buffer, " ({text})")?;
    buffer.reset()?;
    Ok(())
}

/// Write one node and its subtree.
fn dump_node(buffer: &mut Buffer, core: &Core, id: NodeId, level: usize) -> Result<()> {
    let indent = "    ".repeat(level);
    let node = core.get(id)?;

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    let name = if node.name.is_empty() {
        node.kind.name()
    } else {
        node.name.as_str()
    };
    write!(buffer, "{name}")?;
    buffer.reset()?;
    write!(buffer, " [{}]", node.kind.name())?;

    let f = node.flags;
    if core.is_focused(id) {
        write_marker(buffer, Color::Magenta, "focus")?;
    }
    for (set, text) in [
        (f.hidden, "hidden"),
        (f.collapsed, "collapsed"),
        (f.disabled, "disabled"),
    ] {
        if set {
            write_marker(buffer, Color::Yellow, text)?;
        }
    }
    if node.needs_layout {
        write_marker(buffer, Color::Red, "dirty")?;
    }
    writeln!(buffer)?;

    let b = node.bounds;
    write_field(
        buffer,
        &indent,
        "bounds:",
        &format!("x: {}, y: {}, w: {}, h: {}", b.tl.x, b.tl.y, b.w, b.h),
    )?;
    let m = node.measured;
    write_field(buffer, &indent, "measured:", &format!("{} x {}", m.w, m.h))?;

    for child in &node.children {
        dump_node(buffer, core, *child, level + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Expanse, layout::Layout};

    #[test]
    fn plain_dump() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let a = core.add_container(root, Layout::new().size(10, 5))?;
        core.set_name(a, "panel")?;
        core.set_hidden(a, true)?;
        core.layout(Expanse::new(40, 20))?;
        let out = dump_plain(&core, root)?;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "root [container]");
        assert_eq!(lines[3], "    panel [container] (hidden)");
        assert_eq!(lines[4], "      bounds: x: 0, y: 0, w: 10, h: 5");
        Ok(())
    }
}
