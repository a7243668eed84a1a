use std::path::PathBuf;

use crate::metadata::{Extractor, Field};
use crate::paths;

use super::{CmdResult, Context};

pub fn run(cx: &Context, files: &[PathBuf]) -> CmdResult {
    let extractor = Extractor::new(&cx.fs, &cx.tags, &cx.settings.library);

    for file in files {
        let e = extractor.extract(file);
        println!("{}", file.display());
        let disc = match e.disc {
            Some(d) => format!("CD{} of {}", d.disc_number, d.total_discs),
            None => "single disc".to_string(),
        };
        println!("  layout       {} ({disc})", e.classification.layout.name());
        for field in Field::ALL {
            println!(
                "  {:<12} {:<40} [{}]",
                field.name(),
                e.metadata.get(field),
                e.provenance(field).label()
            );
        }
        match paths::canonical_path(&e.metadata, &e.classification) {
            Ok(target) if paths::needs_change(file, &target) => {
                println!("  canonical    {}", target.display())
            }
            Ok(_) => println!("  canonical    (already in place)"),
            Err(err) => println!("  canonical    {err}"),
        }
        if e.is_ambiguous() {
            println!("  needs input  {}", e.missing_required().join(", "));
        }
    }
    Ok(())
}
