use std::fs;
use std::io::{self, Read, Write};
use std::path::{is_separator, Path};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use super::cli::{Mode, Options, Output};
use crate::compression::block::{decode_block, encode_block};
use crate::error::{BwtError, Result};

/// Run the transform the options ask for, over each file or over stdin.
pub fn run(opts: &Options) -> Result<()> {
    if opts.files.is_empty() {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        let out = process(opts, &data)?;
        write_stdout(&out)?;
        return Ok(());
    }

    for name in &opts.files {
        process_file(opts, name)?;
    }
    Ok(())
}

/// Transform one whole input as a single block.
pub fn process(opts: &Options, data: &[u8]) -> Result<Vec<u8>> {
    match opts.op_mode {
        Mode::Compress => encode_block(opts.stage, data, opts.algorithm),
        Mode::Decompress => decode_block(opts.stage, data),
    }
}

/// Name of the file written for `input`: the stage extension is appended when
/// compressing and stripped when decompressing.
pub fn output_name(opts: &Options, input: &str) -> String {
    let ext = opts.stage.extension();
    match opts.op_mode {
        Mode::Compress => format!("{}.{}", input, ext),
        Mode::Decompress => match input.strip_suffix(&format!(".{}", ext)) {
            Some(stem) if !stem.is_empty() && !stem.ends_with(is_separator) => stem.to_string(),
            _ => {
                warn!("{} does not end in .{}, writing {}.out", input, ext, input);
                format!("{}.out", input)
            }
        },
    }
}

/// Read, transform and write a single file.
pub fn process_file(opts: &Options, name: &str) -> Result<()> {
    let data = fs::read(name)?;
    info!("Read {} bytes from {}.", data.len(), name);

    let out = process(opts, &data)?;

    match opts.output {
        Output::Stdout => write_stdout(&out)?,
        Output::File => {
            let out_name = output_name(opts, name);
            if Path::new(&out_name).exists() && !opts.force_overwrite {
                return Err(BwtError::Io(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("output file {} already exists", out_name),
                )));
            }
            write_file(&out_name, &out)?;
            info!("Wrote {} bytes to {}.", out.len(), out_name);

            if !opts.keep_input_files {
                fs::remove_file(name)?;
                debug!("Removed input file {}.", name);
            }
        }
    }
    Ok(())
}

/// Write through a temporary file in the target directory so a failed write never
/// leaves a partial output behind.
fn write_file(name: &str, out: &[u8]) -> Result<()> {
    let dir = match Path::new(name).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(out)?;
    tmp.flush()?;
    tmp.persist(name).map_err(|e| e.error)?;
    Ok(())
}

fn write_stdout(out: &[u8]) -> Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    lock.write_all(out)?;
    lock.flush()?;
    Ok(())
}
