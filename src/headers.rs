//! `canonicalize` and `restore`: rewrite the header row of a CSV file.
//!
//! The rename record that a table carries in memory is persisted as a JSON
//! sidecar file (`--record`) so that a later `restore` run can reattach it.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

use crate::{
    alias_file,
    cli::{CanonicalizeArgs, CsvIoArgs, RestoreArgs},
    frame::{Frame, LabeledTable},
    io_utils,
    printable_delimiter,
    rename::{self, CanonicalOptions, RENAME_RECORD_KEY},
};

fn read_frame(io: &CsvIoArgs) -> Result<(Frame, u8)> {
    let delimiter = io_utils::resolve_input_delimiter(&io.input, io.delimiter);
    let encoding = io_utils::resolve_encoding(io.input_encoding.as_deref())?;
    info!(
        "Reading '{}' with delimiter '{}'",
        io.input.display(),
        printable_delimiter(delimiter)
    );
    let mut reader = io_utils::open_csv_reader_from_path(&io.input, delimiter, true)?;
    let frame = Frame::from_csv_reader(&mut reader, encoding)
        .with_context(|| format!("Reading CSV from {:?}", io.input))?;
    Ok((frame, delimiter))
}

fn write_frame(io: &CsvIoArgs, frame: &Frame, input_delimiter: u8) -> Result<()> {
    let output = io.output.as_deref();
    let delimiter =
        io_utils::resolve_output_delimiter(output, io.output_delimiter, input_delimiter);
    let encoding = io_utils::resolve_encoding(io.output_encoding.as_deref())?;
    let mut writer = io_utils::open_csv_writer(output, delimiter, encoding)?;
    frame
        .write_csv(&mut writer)
        .with_context(|| format!("Writing CSV output {:?}", output.unwrap_or(Path::new("-"))))
}

pub fn canonicalize(args: &CanonicalizeArgs) -> Result<()> {
    let mut registry = alias_file::load(&args.aliases)
        .with_context(|| format!("Loading aliases from {:?}", args.aliases))?;
    registry.freeze();
    let (mut frame, delimiter) = read_frame(&args.io)?;

    let options = CanonicalOptions {
        drop_conflicts: args.drop_conflicts,
        remember: args.record.is_some(),
    };
    let before = frame.header_names();
    registry
        .to_canonical_in_place(&mut frame, options)
        .with_context(|| format!("Canonicalizing headers of {:?}", args.io.input))?;
    let renamed = before
        .iter()
        .zip(frame.header_names())
        .filter(|(old, new)| *old != new)
        .count();

    if let Some(path) = &args.record {
        let record = frame
            .metadata(RENAME_RECORD_KEY)
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        let serialized =
            serde_json::to_string_pretty(&record).context("Serializing rename record")?;
        fs::write(path, serialized)
            .with_context(|| format!("Writing rename record {path:?}"))?;
        info!("Rename record written to {:?}", path);
    }

    write_frame(&args.io, &frame, delimiter)?;
    info!(
        "Renamed {} of {} column(s) across {} row(s)",
        renamed,
        before.len(),
        frame.row_count()
    );
    Ok(())
}

pub fn restore(args: &RestoreArgs) -> Result<()> {
    let (mut frame, delimiter) = read_frame(&args.io)?;
    if let Some(path) = &args.record {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading rename record {path:?}"))?;
        let record: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Parsing rename record {path:?}"))?;
        frame.set_metadata(RENAME_RECORD_KEY, record);
    }

    rename::restore_aliases_in_place(&mut frame, !args.lenient)
        .with_context(|| format!("Restoring aliases in {:?}", args.io.input))?;
    write_frame(&args.io, &frame, delimiter)?;
    info!(
        "Restored headers for {} row(s) from {:?}",
        frame.row_count(),
        args.io.input
    );
    Ok(())
}
