//! The translation pipeline for each input: load, translate, render.
use crate::driver::error::PygoError;
use crate::driver::options::PygoOptions;
use crate::driver::resources::{Resources, RUNTIME};
use crate::driver::statistics::Statistics;
use crate::syntax::input::Input;
use crate::target::file::GoFile;
use crate::translate::translate;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Target source for one input
pub struct Translated {
    pub input: Input,
    pub source: String,
}

/// Load, translate and render one input
pub fn translate_input(
    input: &Input,
    opts: &PygoOptions,
    statistics: &mut Statistics,
) -> Result<Translated, PygoError> {
    let t = Instant::now();
    let module = input.load()?;
    statistics
        .timings_mut()
        .record(format!("load {}", input.name()), t.elapsed());

    let t = Instant::now();
    let fragments = translate(&module, &opts.translate).map_err(|e| PygoError::from(e).in_module(input.name()))?;
    statistics
        .timings_mut()
        .record(format!("translate {}", input.name()), t.elapsed());
    statistics.add_module(fragments.len());
    info!(module = input.name(), fragments = fragments.len(), "translated");

    let t = Instant::now();
    let mut file = GoFile::new(opts.package_for(input), fragments)
        .with_header(format!("generated by pygo from {}", input.locator()));
    if let Some(entry) = opts.entry_point() {
        file = file.with_entry_point(entry);
    }
    let source = file.to_source(opts.width);
    statistics
        .timings_mut()
        .record(format!("render {}", input.name()), t.elapsed());

    Ok(Translated {
        input: input.clone(),
        source,
    })
}

/// Output path for a translated input when writing several files
/// into a directory
fn output_path(dir: &Path, input: &Input) -> PathBuf {
    dir.join(format!("{}.go", input.name()))
}

/// Translate every input independently and write the results: to
/// standard output, to the single output file, or into the output
/// directory when there are several inputs.
pub fn run(opts: &PygoOptions, statistics: &mut Statistics) -> Result<(), PygoError> {
    if let Some(path) = &opts.emit_runtime {
        let runtime = Resources::default().get(RUNTIME).unwrap_or_default();
        fs::write(path, runtime)?;
        info!(path = %path.display(), "wrote runtime support package");
    }

    if opts.files.is_empty() {
        if opts.emit_runtime.is_some() {
            return Ok(());
        }
        return Err(PygoError::NoInputs);
    }

    let mut results = vec![];
    for input in &opts.files {
        let mut local = Statistics::default();
        let translated = translate_input(input, opts, &mut local);
        statistics.merge(local);
        results.push(translated?);
    }

    match (&opts.output, results.as_slice()) {
        (Some(path), [single]) => fs::write(path, &single.source)?,
        (Some(dir), many) => {
            fs::create_dir_all(dir)?;
            for t in many {
                fs::write(output_path(dir, &t.input), &t.source)?;
            }
        }
        (None, all) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for t in all {
                out.write_all(t.source.as_bytes())?;
            }
        }
    }
    Ok(())
}
