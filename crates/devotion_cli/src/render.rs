//! Plain-text drawing of core screens.

use devotion_core::view::list::{ListBody, ListScreen};
use devotion_core::view::summary::SummaryScreen;
use devotion_core::view::{EditorScreen, MenuScreen};
use devotion_core::EntryKind;
use std::io::{self, Write};

pub fn write_menu(out: &mut impl Write, menu: &MenuScreen) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", menu.title)?;
    writeln!(out, "{}", menu.verse)?;
    writeln!(out)?;
    for (index, item) in menu.items.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, item.label)?;
    }
    writeln!(out, "  q. Quit")
}

pub fn write_editor_header(out: &mut impl Write, editor: &EditorScreen) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", editor.title)?;
    writeln!(
        out,
        "Press Enter to keep the value in brackets, or type - to clear it. Fields marked * are required."
    )?;
    if editor.fields.iter().any(|field| field.spec.is_multiline()) {
        writeln!(out, "Multi-line fields end with a line containing only \".\".")?;
    }
    Ok(())
}

pub fn write_list(out: &mut impl Write, list: &ListScreen) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", list.title)?;
    match &list.body {
        ListBody::Placeholder(text) => writeln!(out, "{text}")?,
        ListBody::Rows(rows) => {
            for (index, row) in rows.iter().enumerate() {
                let marker = if row.selected { " *" } else { "" };
                let kind = match row.target.kind {
                    EntryKind::Scripture => "scripture",
                    EntryKind::Inspirational => "reading",
                };
                writeln!(out, "  {}. {} [{kind}]{marker}", index + 1, row.headline)?;
                if !row.detail.is_empty() {
                    writeln!(out, "     {}", row.detail)?;
                }
                if let Some(video) = &row.video {
                    writeln!(out, "     Video: {} <{}>", video.title, video.url)?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, summary: &SummaryScreen) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", summary.title)?;
    for field in &summary.fields {
        if field.key == "tags" {
            if !summary.tags.is_empty() {
                writeln!(out, "Tags: {}", summary.tags.join(", "))?;
            }
            continue;
        }
        if field.block {
            writeln!(out, "{}:", field.label)?;
            for line in field.value.lines() {
                writeln!(out, "  {line}")?;
            }
        } else {
            writeln!(out, "{}: {}", field.label, field.value)?;
        }
    }
    Ok(())
}
