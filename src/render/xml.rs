//! XML rendering.
//!
//! Emits an XML declaration followed by a `<wayback>` document: a
//! `<results>` element with one `<result>` child per record (`url`,
//! `length`, `timestamp`, `date` sub-elements) and a `<count>` element,
//! indented with 2 spaces.

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer as XmlWriter;

use crate::aggregate::RunResult;

/// Writes the result set as an XML document.
pub fn write_xml(result: &RunResult, sink: &mut dyn Write) -> Result<()> {
    let mut writer = XmlWriter::new_with_indent(&mut *sink, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("Failed to write XML declaration")?;

    write_start(&mut writer, "wayback")?;
    write_start(&mut writer, "results")?;
    for record in &result.records {
        write_start(&mut writer, "result")?;
        write_text_element(&mut writer, "url", &record.url)?;
        write_text_element(&mut writer, "length", &record.length)?;
        write_text_element(&mut writer, "timestamp", &record.timestamp)?;
        write_text_element(&mut writer, "date", &record.date_rfc3339())?;
        write_end(&mut writer, "result")?;
    }
    write_end(&mut writer, "results")?;
    write_text_element(&mut writer, "count", &result.count.to_string())?;
    write_end(&mut writer, "wayback")?;

    let inner = writer.into_inner();
    writeln!(inner).context("Failed to write XML output")?;
    Ok(())
}

fn write_start(writer: &mut XmlWriter<&mut dyn Write>, name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .with_context(|| format!("Failed to write XML element <{}>", name))
}

fn write_end(writer: &mut XmlWriter<&mut dyn Write>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .with_context(|| format!("Failed to write XML element </{}>", name))
}

fn write_text_element(
    writer: &mut XmlWriter<&mut dyn Write>,
    name: &str,
    value: &str,
) -> Result<()> {
    write_start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .with_context(|| format!("Failed to write XML text for <{}>", name))?;
    write_end(writer, name)
}
