//! Fields command implementation

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use termfreq_index::{FieldDictionary, MemoryIndex};

use crate::commands::{OutputFormat, load_index};
use crate::utils::format_count;

#[derive(Serialize)]
struct FieldsSummary {
    field_count: usize,
    fields: Vec<FieldInfo>,
}

#[derive(Serialize)]
struct FieldInfo {
    name: String,
    term_count: usize,
    sum_doc_freq: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sum_total_term_freq: Option<u64>,
}

impl From<&FieldDictionary> for FieldInfo {
    fn from(dict: &FieldDictionary) -> Self {
        FieldInfo {
            name: dict.name().to_string(),
            term_count: dict.len(),
            sum_doc_freq: dict.sum_doc_freq(),
            sum_total_term_freq: dict.sum_total_term_freq(),
        }
    }
}

pub fn run(format: OutputFormat, index_path: String) -> Result<()> {
    let index = load_index(&index_path)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_summary(&index, format, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_summary(index: &MemoryIndex, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let summary = FieldsSummary {
        field_count: index.field_dictionaries().len(),
        fields: index
            .field_dictionaries()
            .iter()
            .map(FieldInfo::from)
            .collect(),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)?;
        }
        OutputFormat::Text | OutputFormat::Tsv if summary.fields.is_empty() => {
            writeln!(out, "No fields")?;
        }
        OutputFormat::Text => {
            for field in &summary.fields {
                writeln!(
                    out,
                    "{}: {} terms, doc freq sum = {}, totalTF sum = {}",
                    field.name,
                    format_count(field.term_count as u64),
                    format_count(field.sum_doc_freq),
                    field
                        .sum_total_term_freq
                        .map_or_else(|| "n/a".to_string(), format_count)
                )?;
            }
        }
        OutputFormat::Tsv => {
            for field in &summary.fields {
                let total = field
                    .sum_total_term_freq
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    field.name, field.term_count, field.sum_doc_freq, total
                )?;
            }
        }
    }
    Ok(())
}
